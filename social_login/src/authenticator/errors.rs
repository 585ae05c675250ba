use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AuthError {
    #[error("Unknown authentication strategy \"{0}\"")]
    UnknownStrategy(String),

    #[error("No strategy module available for provider \"{0}\"")]
    MissingStrategyModule(String),

    #[error("Strategy for \"{expected}\" registered itself as \"{actual}\"")]
    StrategyNameMismatch { expected: String, actual: String },

    #[error("Strategy error: {0}")]
    Strategy(String),

    #[error("Verification error: {0}")]
    Verification(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
