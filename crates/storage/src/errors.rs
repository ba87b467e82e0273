use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Corrupt credential file '{0}': {1}")]
    CorruptFile(String, String),

    #[error("Failed to encode credentials: {0}")]
    EncodeError(String),
}
