use thiserror::Error;

/// aistrolog error types
#[derive(Error, Debug)]
pub enum AistrologError {
    /// Slug is not one of the twelve known signs
    #[error("unknown sign: {0}")]
    UnknownSign(String),

    /// Date string is not a valid DD-MM-YYYY calendar date
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Failed to parse JSON content
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend request failed
    #[error("http error: {0}")]
    Http(String),

    /// Backend answered with a non-success status
    #[error("backend returned status {0}")]
    Status(u16),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for aistrolog
pub type Result<T> = std::result::Result<T, AistrologError>;
