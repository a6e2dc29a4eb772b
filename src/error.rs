use thiserror::Error;

pub type Result<T> = std::result::Result<T, PurchaseError>;

#[derive(Error, Debug)]
pub enum PurchaseError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Encoding error: {0}")]
    EncodingError(String),
    #[error("Submission error: {0}")]
    SubmissionError(String),
    #[error("Notification error: {0}")]
    NotificationError(String),
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Config error: {0}")]
    ConfigError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
