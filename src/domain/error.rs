use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppError {
    /// A required field, body or file part is absent or empty.
    MissingInput(String),
    ValidationError(String),
    Conflict(String),
    AuthError(String),
    ParseError(String),
    ComputationError(String),
    DatabaseError(String),
    Internal(String),
}

impl AppError {
    /// Message safe to hand back to the HTTP caller.
    ///
    /// Storage and internal failures are reduced to a generic message; the
    /// full detail only goes to the log.
    pub fn public_message(&self) -> String {
        match self {
            AppError::MissingInput(msg)
            | AppError::ValidationError(msg)
            | AppError::Conflict(msg)
            | AppError::AuthError(msg)
            | AppError::ParseError(msg)
            | AppError::ComputationError(msg) => msg.clone(),
            AppError::DatabaseError(_) | AppError::Internal(_) => {
                "Internal server error".to_string()
            }
        }
    }

    /// Prefix the message with the operation that failed, keeping the kind.
    pub fn context(self, prefix: &str) -> Self {
        match self {
            AppError::ParseError(msg) => AppError::ParseError(format!("{}: {}", prefix, msg)),
            AppError::ComputationError(msg) => {
                AppError::ComputationError(format!("{}: {}", prefix, msg))
            }
            other => other,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingInput(msg) => write!(f, "Missing input: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::AuthError(msg) => write!(f, "Authentication error: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::ComputationError(msg) => write!(f, "Computation error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
