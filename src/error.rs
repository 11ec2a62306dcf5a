use thiserror::Error;

/// Application-wide error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Not a replica set deployment: {0}")]
    NotReplicaSet(String),

    #[error("Not a sharded cluster: {0}")]
    NotSharded(String),
}

/// Convenience Result type using our Error
pub type Result<T> = std::result::Result<T, Error>;
