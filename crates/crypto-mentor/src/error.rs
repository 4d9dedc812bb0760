//! Error Types for Crypto Mentor

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MentorError>;

#[derive(Error, Debug)]
pub enum MentorError {
    /// Asset id is not in the catalog
    #[error("Cryptocurrency not found: {0}")]
    NotFound(String),

    /// Chart length is zero or the period string is unknown
    #[error("Invalid chart range: {0}")]
    InvalidRange(String),

    /// Market feed could not be reached
    #[error("Market feed unavailable: {0}")]
    Unavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MentorError {
    /// Check if error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(id) => format!("I don't know a cryptocurrency called '{id}'."),
            Self::InvalidRange(_) => "Chart periods are 1d, 7d, 30d or 90d.".into(),
            Self::Unavailable(_) => "Market data is currently unavailable. Please try again.".into(),
            Self::Config(_) => "Service configuration error.".into(),
        }
    }
}
