use thiserror::Error;

use crate::document::DocumentError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("toml parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("toml write error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("no data to export")]
    NoData,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("not logged in")]
    NotLoggedIn,

    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl AppError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        AppError::NotFound { kind, id: id.into() }
    }

    /// Translation key of the message shown to the user for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::NotFound { kind: "ticket", .. } => "Ticket not found",
            AppError::NotFound { .. } => "Record not found",
            AppError::NoData => "No data to export",
            AppError::InvalidInput(_) => "Invalid input",
            AppError::Cancelled => "Operation cancelled",
            AppError::PasswordMismatch => "Passwords do not match",
            AppError::InvalidCredentials => "Invalid credentials",
            AppError::NotLoggedIn => "Please log in first",
            AppError::Document(_) => "Failed to generate PDF",
            AppError::Io(_) | AppError::Json(_) | AppError::TomlDe(_) | AppError::TomlSer(_) => {
                "Operation failed"
            }
        }
    }
}

impl From<inquire::InquireError> for AppError {
    fn from(err: inquire::InquireError) -> Self {
        match err {
            inquire::InquireError::OperationCanceled
            | inquire::InquireError::OperationInterrupted => AppError::Cancelled,
            inquire::InquireError::IO(e) => AppError::Io(e),
            other => AppError::InvalidInput(other.to_string()),
        }
    }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
