//! Error types for the chord editor
//!
//! `RemoteError` is what a collaborator (normalizer, lyric preparer, song
//! store) reports; `EditorError` is what an editor operation reports to its
//! caller and, as a message, to the user.

use thiserror::Error;

/// Failure reported by an external collaborator
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    /// The request never produced a response (network, host callback threw)
    #[error("request failed: {0}")]
    Transport(String),

    /// The service answered with an error message
    #[error("{0}")]
    Service(String),

    /// The service answered but the payload could not be read
    #[error("unreadable response: {0}")]
    Decode(String),
}

/// Failure of an editor operation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EditorError {
    /// A remote round-trip failed; nothing was committed
    #[error("Failed to {operation}: {source}")]
    Remote {
        operation: &'static str,
        #[source]
        source: RemoteError,
    },

    /// The clear leg of a move was committed but the set leg failed
    #[error("Failed to move chord: {0}")]
    MoveIncomplete(#[source] RemoteError),

    #[error("chord offset {offset} is beyond the end of line {line_index} (length {len})")]
    InvalidChordOffset {
        line_index: usize,
        offset: usize,
        len: usize,
    },

    #[error("line {0} does not exist")]
    LineOutOfRange(usize),

    #[error("Please enter title and lyrics.")]
    MissingLyrics,

    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("no song content is loaded")]
    NoContent,

    /// Another edit holds the session
    #[error("another edit is still in progress")]
    Busy,
}

impl EditorError {
    pub fn remote(operation: &'static str, source: RemoteError) -> Self {
        EditorError::Remote { operation, source }
    }
}
