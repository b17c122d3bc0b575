use thiserror::Error;

/// Failure modes of the board and reply services.
///
/// `NotFound` and `Unauthorized` stay separate kinds: callers (and tests)
/// must be able to tell a missing id apart from a failed password check even
/// when both abort the same operation.
#[derive(Debug, Error)]
pub enum BoardError {
    /// A required field was missing or empty.
    #[error("{0}")]
    Validation(&'static str),

    /// The id did not resolve within the requested board/thread scope.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The id resolved but the supplied password did not verify.
    #[error("incorrect password")]
    Unauthorized,

    /// The store failed; always surfaced, never collapsed into an empty
    /// result.
    #[error("storage failure: {0:#}")]
    Store(anyhow::Error),
}

impl From<anyhow::Error> for BoardError {
    fn from(err: anyhow::Error) -> Self {
        BoardError::Store(err)
    }
}

pub type Result<T> = std::result::Result<T, BoardError>;
