//! Error types for larder-store.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Persistence medium missing or inaccessible
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Stored document could not be decoded
    #[error("Invalid stored data: {0}")]
    InvalidData(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
