//! Error types for slide deck generation.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while planning, writing or reading a slide deck.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or write a file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Title or content was left blank.
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// Image bytes are not in a format the presentation can embed.
    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),

    /// Failed to parse a PPTX file structure.
    #[error("PPTX parsing error: {0}")]
    PptxParseError(String),

    /// ZIP archive error.
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML writing or parsing error.
    #[error("XML error: {0}")]
    XmlError(String),
}
