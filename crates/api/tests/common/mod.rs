#![allow(dead_code)]

use quill_api::AdminClient;
use quill_config::Config;
use quill_events::EventBus;
use quill_models::{Role, User};
use quill_session::Session;
use quill_storage::{MemoryStore, StoredCredentials};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::MockServer;

pub const TOKEN: &str = "test-token";

pub struct Harness {
    pub server: MockServer,
    pub client: AdminClient,
    pub session: Arc<Session>,
    pub store: Arc<MemoryStore>,
    pub events: Arc<EventBus>,
}

pub fn user() -> User {
    User {
        id: 1,
        username: "ada".to_string(),
        email: "ada@example.com".to_string(),
        role: Role::Admin,
        avatar: None,
        nickname: None,
        bio: None,
    }
}

pub fn config_for(base_url: &str) -> Config {
    let mut config = Config::default();
    config.api.base_url = base_url.to_string();
    config.api.base_path = "/api".to_string();
    config
}

/// Mock backend plus a client whose session is signed in and sitting on an
/// admin screen
pub async fn signed_in() -> Harness {
    harness(Some(StoredCredentials {
        token: Some(TOKEN.to_string()),
        user: Some(user()),
    }))
    .await
}

pub async fn anonymous() -> Harness {
    harness(None).await
}

async fn harness(credentials: Option<StoredCredentials>) -> Harness {
    let server = MockServer::start().await;
    let config = config_for(&server.uri());

    let events = EventBus::new(true);
    let store = Arc::new(MemoryStore::with_credentials(credentials.unwrap_or_default()));
    let session = Session::new(store.clone(), Arc::clone(&events), config.session.login_routes.clone());
    session.initialize().await.unwrap();
    session.navigate("/admin/files");

    let client = AdminClient::new(&config, Arc::clone(&session), Arc::clone(&events)).unwrap();

    Harness {
        server,
        client,
        session,
        store,
        events,
    }
}

pub fn resource(id: i64, name: &str, file_path: &str, mime_type: &str) -> Value {
    json!({
        "id": id,
        "filename": format!("{}-{}", id, name),
        "original_name": name,
        "file_path": file_path,
        "mime_type": mime_type,
        "size": 1024,
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z"
    })
}
