use parking_lot::RwLock;
use quill_events::EventBus;
use quill_models::User;
use quill_storage::CredentialStore;
use std::sync::Arc;

/// Lifecycle of the signed-in identity.
///
/// `Uninitialized` is left exactly once, by `Session::initialize`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Authenticated { token: String, user: User },
    Anonymous,
}

/// Explicitly constructed session context handed to the HTTP layer and
/// route guards
pub struct Session {
    pub(super) store: Arc<dyn CredentialStore>,
    pub(super) events: Arc<EventBus>,
    pub(super) state: RwLock<SessionState>,
    pub(super) login_routes: Vec<String>,
    pub(super) current_route: RwLock<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectToLogin { from: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub key: &'static str,
    pub label: &'static str,
}
