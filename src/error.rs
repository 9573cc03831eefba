use thiserror::Error;

use crate::board::BoardError;

/// Failures of a refresh cycle. All are recoverable: the view stays usable
/// and only the affected cycle is abandoned.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The server could not be reached or answered with an error.
    #[error("could not fetch board state from server: {0:#}")]
    FetchFailure(#[source] anyhow::Error),
    /// The server answered, but the payload does not describe a valid game state.
    #[error("server sent a malformed board state: {0}")]
    MalformedPayload(String),
    #[error(transparent)]
    InvalidCoordinate(#[from] BoardError),
}

impl SyncError {
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, SyncError::FetchFailure(_))
    }

    pub fn is_malformed_payload(&self) -> bool {
        matches!(self, SyncError::MalformedPayload(_))
    }
}
