use thiserror::Error;

/// Reasons a transaction (or a user-facing choice) is rejected before it reaches the log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("amount must be a positive number, got `{0}`")]
    InvalidAmount(String),
    #[error("unknown category `{0}`")]
    UnknownCategory(String),
    #[error("unknown transaction type `{0}` (expected income or expense)")]
    UnknownKind(String),
    #[error("unknown filter `{0}` (expected all, income or expense)")]
    UnknownFilter(String),
}

/// Error type that captures storage, configuration and input failures.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
