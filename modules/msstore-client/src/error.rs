use thiserror::Error;

pub type Result<T> = std::result::Result<T, MsStoreError>;

#[derive(Debug, Error)]
pub enum MsStoreError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for MsStoreError {
    fn from(err: reqwest::Error) -> Self {
        MsStoreError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for MsStoreError {
    fn from(err: serde_json::Error) -> Self {
        MsStoreError::Parse(err.to_string())
    }
}
