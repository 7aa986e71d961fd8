use thiserror::Error;

pub type Result<T> = std::result::Result<T, Lemon8Error>;

#[derive(Debug, Error)]
pub enum Lemon8Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for Lemon8Error {
    fn from(err: reqwest::Error) -> Self {
        Lemon8Error::Network(err.to_string())
    }
}

impl From<serde_json::Error> for Lemon8Error {
    fn from(err: serde_json::Error) -> Self {
        Lemon8Error::Parse(err.to_string())
    }
}
