use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),
    #[error("Unknown plan: {0}")]
    UnknownPlan(String),
    #[error("Selection error: {0}")]
    SelectionError(String),
    #[error("Cart is empty")]
    EmptyCart,
    #[error("A payment is already being processed")]
    PaymentInProgress,
    #[error("Payment declined: {0}")]
    PaymentDeclined(String),
    #[error("Assistant backend error: {0}")]
    AssistantError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
