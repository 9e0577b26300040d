//! All error types for the android-strings-codec crate.
//!
//! These are returned from all fallible operations (parsing, serialization, store snapshots).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid UTF-8 in document: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("could not determine language from path `{0}`")]
    UndeterminedLanguage(String),

    #[error("cache error: {0}")]
    Cache(#[from] serde_json::Error),
}

impl Error {
    /// Creates a new invalid resource error
    pub fn invalid_resource(message: impl Into<String>) -> Self {
        Error::InvalidResource(message.into())
    }
}
