//! Error types for dir2docx library.

use std::io;
use thiserror::Error;

/// Result type alias for dir2docx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while assembling or writing a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A glob pattern in an association could not be compiled.
    #[error("Invalid glob pattern: {0}")]
    InvalidPattern(String),

    /// No tokenizer could be determined for a file.
    #[error("Unknown language for {0}")]
    UnknownLanguage(String),

    /// The tokenizer could not make sense of the file content.
    #[error("Unrecognized content: {0}")]
    Tokenize(String),

    /// A text file is not valid UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// An image file could not be decoded for embedding.
    #[error("Image error: {0}")]
    Image(String),

    /// A style with the same id is already registered.
    #[error("Style already exists: {0}")]
    DuplicateStyle(String),

    /// Error while writing the DOCX package.
    #[error("Packaging error: {0}")]
    Package(String),

    /// Error during rendering (JSON dump, model inconsistencies).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Whether this error only affects a single file.
    ///
    /// Recoverable errors make the renderer fall back to plain line-numbered
    /// output for the file; everything else aborts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::UnknownLanguage(_) | Error::Tokenize(_))
    }
}

impl From<globset::Error> for Error {
    fn from(err: globset::Error) -> Self {
        Error::InvalidPattern(err.to_string())
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::Package(err.to_string()),
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => Error::Io(e),
            _ => Error::Image(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownLanguage("notes.zzz".to_string());
        assert_eq!(err.to_string(), "Unknown language for notes.zzz");

        let err = Error::DuplicateStyle("Keyword".to_string());
        assert_eq!(err.to_string(), "Style already exists: Keyword");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_recoverable_errors() {
        assert!(Error::UnknownLanguage("a".into()).is_recoverable());
        assert!(Error::Tokenize("b".into()).is_recoverable());
        assert!(!Error::Encoding("c".into()).is_recoverable());
        assert!(!Error::Package("d".into()).is_recoverable());
    }

    #[test]
    fn test_glob_error_conversion() {
        let err: Error = globset::Glob::new("a[").unwrap_err().into();
        assert!(matches!(err, Error::InvalidPattern(_)));
    }
}
