use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session already initialized")]
    AlreadyInitialized,

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Credential storage error: {0}")]
    StorageError(#[from] quill_storage::StorageError),
}
