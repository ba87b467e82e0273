// Re-export all public APIs from the workspace crates

pub use quill_models::*;
pub use quill_events::*;
pub use quill_utils::*;
pub use quill_filesystem::*;
pub use quill_config::*;
pub use quill_resolver::*;
pub use quill_storage::*;
pub use quill_session::*;
pub use quill_cache::*;
pub use quill_api::*;

/// Prelude module for convenient imports
pub mod prelude {
    // Core models
    pub use quill_models::{
        Category, FileResource, FilePage, FileQuery, LocalFile, Post, PostQuery, UploadConfig, UploadedFile, User,
        UserPatch, Role,
    };

    // Events
    pub use quill_events::{AppEvent, EventBus};

    // Configuration
    pub use quill_config::Config;

    // URL resolution
    pub use quill_resolver::UrlNormalizer;

    // Session
    pub use quill_session::{Session, SessionState};
    pub use quill_storage::{CredentialStore, FileStore, MemoryStore};

    // Client
    pub use quill_api::{
        AdminClient, ApiError, CategoriesApi, PostsApi, ResourcePicker, UploadClient, UsersApi, ValidationError,
    };

    // Filesystem
    pub use quill_filesystem::FileSystem;
}
