//! Error types for drawing, roster editing, persistence and image lookup.

use std::io;

use thiserror::Error;

/// Errors raised by the assignment engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    /// Fewer than two participants. Nobody can draw from somebody else.
    #[error("need at least 2 participants to draw, got {count}")]
    InvalidInput { count: usize },

    /// A participant has nothing to draw from.
    #[error("{participant} has no decks to draw from")]
    EmptyDeckList { participant: String },
}

/// Errors raised when editing a roster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("participant name must not be empty")]
    EmptyName,

    #[error("participant {0} already exists")]
    DuplicateParticipant(String),

    #[error("no participant named {0}")]
    UnknownParticipant(String),

    #[error("{participant} has no deck #{index}")]
    DeckIndexOutOfRange { participant: String, index: usize },
}

/// Errors raised when loading or saving the roster file.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// The file is not an object mapping names to arrays of strings.
    #[error("malformed roster: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }
}

/// Errors raised by the card image lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no image for {0}")]
    NotFound(String),
}
