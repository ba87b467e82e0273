use crate::StorageError;
use quill_models::User;
use serde::{Deserialize, Serialize};

/// What survives between runs: the bearer token and the user it belongs to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Persistent credential storage shared by the session and the HTTP layer
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    /// Reads whatever is stored; missing storage is an empty value
    async fn load(&self) -> Result<StoredCredentials, StorageError>;

    /// Replaces the stored credentials
    async fn save(&self, credentials: &StoredCredentials) -> Result<(), StorageError>;

    /// Removes token and user
    async fn clear(&self) -> Result<(), StorageError>;

    /// Check if credentials outlive the process
    fn is_persistent(&self) -> bool;
}
