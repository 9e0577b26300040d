//! Traits for document parsing/serialization and for the translation store
//! the reader and writer talk to.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use crate::error::Error;

/// A trait for parsing and writing one localization document from/to one file.
///
/// # Example
///
/// ```rust,no_run
/// use android_strings_codec::traits::Parser;
/// let format = android_strings_codec::formats::AndroidStringsFormat::read_from("values/strings.xml")?;
/// format.write_to("values/strings_copy.xml")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let reader = BufReader::new(file);
        Self::from_reader(reader)
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Write to file path.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }

    /// Parse from bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(bytes))
    }
}

/// The translation store the reader fills and the writer drains.
///
/// The store owns sections, rows and tags. This crate only queries
/// translated text and hands decoded `(key, language, text)` triples back;
/// it never restructures sections or rows.
pub trait TranslationStore {
    type Section: Section;

    /// Configured language codes. The first one is the base language.
    fn language_codes(&self) -> &[String];

    /// Sections in document order.
    fn sections(&self) -> impl Iterator<Item = &Self::Section>;

    /// Translated text for `key` in `language`, if any.
    fn translation(&self, key: &str, language: &str) -> Option<&str>;

    /// Records `text` as the translation of `key` in `language`.
    fn set_translation(&mut self, key: &str, language: &str, text: String);

    fn base_language(&self) -> Option<&str> {
        self.language_codes().first().map(String::as_str)
    }
}

/// A named, ordered group of rows.
pub trait Section {
    type Row: Row;

    fn name(&self) -> &str;

    fn rows(&self) -> impl Iterator<Item = &Self::Row>;
}

/// One translatable string across all languages.
pub trait Row {
    fn key(&self) -> &str;

    fn comment(&self) -> Option<&str>;

    /// Whether this row passes the caller's tag filter.
    fn matches_filter(&self, tags: &[String], include_untagged: bool) -> bool;
}
