use hangman_types::WordDifficulty;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("No words available for category '{category}' at difficulty {difficulty}")]
    NoWordsAvailable {
        category: String,
        difficulty: WordDifficulty,
    },

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Invalid word list for '{category}' at line {line}: {reason}")]
    InvalidWordList {
        category: String,
        line: usize,
        reason: String,
    },

    #[error("Invalid letter '{0}': guess must be a single letter A-Z")]
    InvalidLetter(String),

    #[error("Round {0} is still in progress")]
    RoundInProgress(u32),
}

impl EngineError {
    /// Whether the caller sent bad input, as opposed to the host being misconfigured.
    pub fn is_client_error(&self) -> bool {
        match self {
            EngineError::InvalidLetter(_)
            | EngineError::UnknownCategory(_)
            | EngineError::RoundInProgress(_) => true,
            EngineError::NoWordsAvailable { .. } | EngineError::InvalidWordList { .. } => false,
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
