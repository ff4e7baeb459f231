//! All error types for the locsync crate.
//!
//! A missing `Info.plist` is deliberately not represented here: the merge
//! engine logs a warning and reports [`crate::merge::DescriptorMerge::Missing`].

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("malformed descriptor document: {0}")]
    MalformedDescriptor(String),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid translation source: {0}")]
    InvalidSource(String),

    #[error("no default language: mark exactly one source file as `<lang>.default.json`")]
    NoDefaultLanguage,

    #[error("invalid language identifier `{0}`")]
    InvalidLanguage(String),

    #[error("resource root '{}' is not a directory", .0.display())]
    MissingResourceRoot(PathBuf),

    #[error("cannot store text in a property list: {0}")]
    UnencodableText(String),

    #[error("invalid exclusion pattern: {0}")]
    Pattern(#[from] globset::Error),
}

impl Error {
    /// Creates a new malformed descriptor error
    pub fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedDescriptor(message.into())
    }

    /// Creates a new invalid source error
    pub fn invalid_source(message: impl Into<String>) -> Self {
        Error::InvalidSource(message.into())
    }
}
