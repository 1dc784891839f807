//! Error types for folio operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while opening or paginating a book.
///
/// The four structural variants (`MissingContainer`, `MalformedContainer`,
/// `MalformedRootDescriptor`, `EmptyBook`) all mean "this document cannot be
/// opened". Per-chapter problems never surface here; they are logged and the
/// offending entry is skipped.
#[derive(Error, Debug)]
pub enum Error {
    #[error("container descriptor missing or unreadable: {}", path.display())]
    MissingContainer {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed container descriptor: {0}")]
    MalformedContainer(String),

    #[error("malformed root descriptor {}: {reason}", path.display())]
    MalformedRootDescriptor { path: PathBuf, reason: String },

    #[error("book has no readable chapters")]
    EmptyBook,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("settings error: {0}")]
    Settings(#[from] serde_json::Error),
}

impl Error {
    /// True for the errors that abort opening a document.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::MissingContainer { .. }
                | Error::MalformedContainer(_)
                | Error::MalformedRootDescriptor { .. }
                | Error::EmptyBook
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
