use crate::backend::{CredentialStore, StoredCredentials};
use crate::StorageError;
use parking_lot::Mutex;

/// Process-local store, nothing survives a restart
#[derive(Default)]
pub struct MemoryStore {
    credentials: Mutex<StoredCredentials>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: StoredCredentials) -> Self {
        Self {
            credentials: Mutex::new(credentials),
        }
    }
}

#[async_trait::async_trait]
impl CredentialStore for MemoryStore {
    async fn load(&self) -> Result<StoredCredentials, StorageError> {
        Ok(self.credentials.lock().clone())
    }

    async fn save(&self, credentials: &StoredCredentials) -> Result<(), StorageError> {
        *self.credentials.lock() = credentials.clone();
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        *self.credentials.lock() = StoredCredentials::default();
        Ok(())
    }

    fn is_persistent(&self) -> bool {
        false
    }
}
