//! Error types for the story library.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by [`crate::StoryLibrary`] operations.
#[derive(Debug, Error)]
pub enum StoryError {
    /// Underlying filesystem failure.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path being accessed when the failure happened.
        path: PathBuf,
        /// The originating error.
        #[source]
        source: std::io::Error,
    },

    /// The requested story file does not exist.
    #[error("Story file not found: {0}")]
    NotFound(String),

    /// The filename escapes the library directory or is otherwise unusable.
    #[error("Invalid story filename: {0}")]
    InvalidFilename(String),

    /// A story title produced an empty filename.
    #[error("Story title must contain at least one visible character")]
    EmptyTitle,
}

impl StoryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for story library results.
pub type StoryResult<T> = Result<T, StoryError>;
