use thiserror::Error;

#[derive(Error, Debug)]
pub enum BurndownError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Risk '{record_id}' is missing required field '{field}'")]
    MissingField { record_id: String, field: &'static str },

    #[error("Invalid date '{value}': expected {format}")]
    InvalidDate { value: String, format: &'static str },

    #[error("Unknown role '{role}'")]
    UnknownRole { role: String },

    #[error("User '{username}' not found")]
    UnknownUser { username: String },

    #[error("Risk ID '{risk_id}' already exists in the register")]
    DuplicateRiskId { risk_id: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type BurndownResult<T> = Result<T, BurndownError>;
