//! Error types for options-risk

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RiskError {
    #[error("Data error: {0}")]
    Data(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type RiskResult<T> = Result<T, RiskError>;

impl RiskError {
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateInput(msg.into())
    }

    /// True for the condition raised when `w` is not finite (t = 0 or v = 0)
    pub fn is_degenerate(&self) -> bool {
        matches!(self, RiskError::DegenerateInput(_))
    }
}

impl From<serde_json::Error> for RiskError {
    fn from(e: serde_json::Error) -> Self {
        RiskError::Serialization(e.to_string())
    }
}
