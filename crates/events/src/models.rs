use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppEvent {
    // Application lifecycle
    Starting,

    // Configuration
    ConfigLoading { path: String },
    ConfigLoaded { api_url: String },
    ConfigCreated { path: String },
    ConfigMigrated { added_fields: Vec<String> },

    // Session
    SessionRestored { username: String },
    SessionAnonymous,
    LoggedIn { username: String },
    LoggedOut,
    SessionExpired { redirect: String },
    ProfileUpdated { username: String },
    PasswordChanged,

    // HTTP notifications
    Forbidden { path: String },
    NotFound { path: String },
    ServerError { status: u16, message: String },
    RequestFailed { status: u16, message: String },
    ConnectionFailed { path: String },

    // Resources
    UploadCompleted { name: String, url: String },
    UploadFailed { name: String, error: String },
    FileUpdated { id: i64 },
    FileDeleted { id: i64 },
    CacheInvalidated { resource: String },

    // Posts and categories
    EntrySaved { resource: String, id: i64 },
    EntryDeleted { resource: String, id: i64 },
}

/// Notification sink for everything the user should see.
///
/// Events are printed unless the bus is silent and are always broadcast to
/// subscribers.
pub struct EventBus {
    pub(super) silent_mode: bool,
    pub(super) sender: broadcast::Sender<AppEvent>,
}
