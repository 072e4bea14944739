use thiserror::Error;

/// Domain-level errors for violation detection
///
/// The matcher has a single failure mode: a caller handing it trades of more
/// than one reporter. That is an integration bug, not a user error, and the
/// whole scan is abandoned without partial results.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl MatchingError {
    pub fn mixed_reporters(first: &str, other: &str) -> Self {
        MatchingError::InvalidInput(format!(
            "trades must belong to exactly one reporter, found '{}' and '{}'",
            first, other
        ))
    }
}

pub type MatchingResult<T> = std::result::Result<T, MatchingError>;
