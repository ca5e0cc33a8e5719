use thiserror::Error;

/// Errors raised by the relay core.
///
/// Rule violations (undefined word, reused word, broken relay) are not errors: they
/// are absorbed into the turn [`State`](crate::state::State). Only programmer-facing
/// invariants and misuse of the API surface here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Word index {index} has already been consumed")]
    DuplicateConsumption { index: usize },
    #[error("Word index {index} is out of range for a pool of {len} words")]
    OutOfRange { index: usize, len: usize },
    #[error("Invariant violated ({checker}): {message}")]
    InvariantViolation { checker: String, message: String },
    #[error("Word is not available: {0}")]
    WordUnavailable(String),
    #[error("Player id must be 0 or 1, got {0}")]
    InvalidPlayerId(usize),
    #[error("Both seats use player id {0}")]
    DuplicatePlayerId(usize),
    #[error("No match in progress")]
    NotStarted,
    #[error("Match already finished")]
    MatchFinished,
    #[error("Player {0} does not accept external words")]
    NotInteractive(String),
    #[error("Player {0} has no word to submit")]
    NoPendingWord(String),
    #[error("Input closed before a word was submitted")]
    InputClosed,
    #[error("Dictionary contains no usable words")]
    EmptyDictionary,
}
