/// Message shown when the backend gives no usable explanation.
pub const GENERIC_FAILURE: &str = "Failed to get recommendations";

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Text for the error banner.
    ///
    /// Rejections carry the backend's own message; every other failure maps to
    /// the generic one so the banner is never empty.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Rejected { message, .. } if !message.trim().is_empty() => message.clone(),
            AppError::InvalidInput(msg) => msg.clone(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
