use thiserror::Error;

/// Failures of a single suggestions refresh.
#[derive(Debug, Error)]
pub enum SuggestionsError {
    #[error("failed to send suggestions request: {0}")]
    Http(#[from] reqwest::Error),

    #[error("suggestions endpoint returned error: {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to parse suggestions response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SuggestionsError>;
