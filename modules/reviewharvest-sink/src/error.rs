use thiserror::Error;

pub type Result<T> = std::result::Result<T, SinkError>;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Disk write error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Object storage error: {0}")]
    ObjectStore(#[from] object_store::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
