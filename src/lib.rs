#![forbid(unsafe_code)]
//! Android `strings.xml` support for a multi-platform localization pipeline.
//!
//! Reads `strings.xml` files into a translation store and writes them back,
//! translating between Android's escaping and placeholder syntax and the
//! platform-neutral canonical form (`%@` string arguments, positions only
//! where they matter).
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use android_strings_codec::{FormatterOptions, TranslationSet, read_file, write_file};
//!
//! let mut set = TranslationSet::new(["en"]).with_consume_all(true);
//!
//! // Language comes from the `values-fr` directory
//! read_file("res/values-fr/strings.xml", None, &mut set)?;
//!
//! let options = FormatterOptions::new().with_include_untranslated(true);
//! write_file("out/values-fr/strings.xml", &set, "fr", &options)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Pipelines with their own store implement [`traits::TranslationStore`]
//! instead of using [`TranslationSet`].

pub mod error;
pub mod escape;
pub mod formats;
pub mod language;
pub mod options;
pub mod placeholder;
pub mod traits;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    error::Error,
    formats::{
        AndroidStringsFormat, Entry,
        android_strings::{read_file, write_file},
    },
    language::{can_handle_directory, determine_language_given_path},
    options::FormatterOptions,
    placeholder::{to_canonical, to_platform},
    traits::{Parser, Row, Section, TranslationStore},
    types::{TranslationRow, TranslationSection, TranslationSet},
};
