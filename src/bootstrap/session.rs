use quill_config::Config;
use quill_events::EventBus;
use quill_session::Session;
use quill_storage::{CredentialStore, FileStore};
use anyhow::Result;
use std::sync::Arc;

/// Restores the persisted session once at startup
pub async fn initialize(config: &Config, events: &Arc<EventBus>) -> Result<Arc<Session>> {
    let store: Arc<dyn CredentialStore> = Arc::new(FileStore::new(&config.session.credentials_path));
    tracing::debug!(
        "Credential store: {} (persistent: {})",
        config.session.credentials_path,
        store.is_persistent()
    );

    let session = Session::new(store, Arc::clone(events), config.session.login_routes.clone());
    session.initialize().await?;

    Ok(session)
}
