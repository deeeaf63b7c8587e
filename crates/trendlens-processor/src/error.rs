use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("sentiment analysis error: {0}")]
    Sentiment(String),

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}
