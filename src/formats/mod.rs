//! Localization file formats supported by this crate.
//!
//! Only Android `strings.xml` is implemented; see [`android_strings`].

pub mod android_strings;

// Reexporting the format for easier access
pub use android_strings::{Entry, Format as AndroidStringsFormat, FormatSection};
