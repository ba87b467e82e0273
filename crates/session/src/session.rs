use super::errors::SessionError;
use super::models::{Session, SessionState};
use parking_lot::RwLock;
use quill_events::{AppEvent, EventBus};
use quill_models::{Role, User, UserPatch};
use quill_storage::{CredentialStore, StoredCredentials};
use std::sync::Arc;

type Result<T> = std::result::Result<T, SessionError>;

const FALLBACK_LOGIN_ROUTE: &str = "/";

impl Session {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        events: Arc<EventBus>,
        login_routes: Vec<String>,
    ) -> Arc<Self> {
        let login_routes = if login_routes.is_empty() {
            vec![FALLBACK_LOGIN_ROUTE.to_string()]
        } else {
            login_routes
        };

        Arc::new(Self {
            store,
            events,
            state: RwLock::new(SessionState::Uninitialized),
            current_route: RwLock::new(login_routes[0].clone()),
            login_routes,
        })
    }

    /// Restores the stored identity. Token and user must both be present,
    /// otherwise storage is wiped and the session starts anonymous.
    pub async fn initialize(&self) -> Result<SessionState> {
        if *self.state.read() != SessionState::Uninitialized {
            return Err(SessionError::AlreadyInitialized);
        }

        let next = match self.store.load().await {
            Ok(StoredCredentials {
                token: Some(token),
                user: Some(user),
            }) if !token.is_empty() => SessionState::Authenticated { token, user },
            Ok(_) => {
                if let Err(e) = self.store.clear().await {
                    tracing::warn!("Failed to clear incomplete credentials: {}", e);
                }
                SessionState::Anonymous
            }
            Err(e) => {
                tracing::warn!("Failed to restore session: {}", e);
                SessionState::Anonymous
            }
        };

        {
            let mut state = self.state.write();
            if *state != SessionState::Uninitialized {
                return Err(SessionError::AlreadyInitialized);
            }
            *state = next.clone();
        }

        match &next {
            SessionState::Authenticated { user, .. } => {
                self.events.emit(AppEvent::SessionRestored {
                    username: user.username.clone(),
                });
            }
            _ => self.events.emit(AppEvent::SessionAnonymous),
        }

        Ok(next)
    }

    pub async fn login(&self, token: String, user: User) -> Result<()> {
        self.store
            .save(&StoredCredentials {
                token: Some(token.clone()),
                user: Some(user.clone()),
            })
            .await?;

        let username = user.username.clone();
        *self.state.write() = SessionState::Authenticated { token, user };
        self.events.emit(AppEvent::LoggedIn { username });
        Ok(())
    }

    pub async fn logout(&self) -> Result<()> {
        self.store.clear().await?;
        *self.state.write() = SessionState::Anonymous;
        self.navigate(self.login_route());
        self.events.emit(AppEvent::LoggedOut);
        Ok(())
    }

    /// Reacts to a rejected credential. Returns `false` when already on an
    /// entry screen, where nothing is cleared and no redirect happens.
    pub async fn expire(&self) -> bool {
        if self.on_login_route() {
            tracing::debug!("Credential rejected on login screen, keeping state");
            return false;
        }

        if let Err(e) = self.store.clear().await {
            tracing::warn!("Failed to clear rejected credential: {}", e);
        }
        *self.state.write() = SessionState::Anonymous;

        let redirect = self.login_route().to_string();
        self.navigate(&redirect);
        self.events.emit(AppEvent::SessionExpired { redirect });
        true
    }

    /// Replaces the signed-in user (profile refresh)
    pub async fn set_user(&self, user: User) -> Result<()> {
        let token = self.token().ok_or(SessionError::NotAuthenticated)?;
        self.login_quietly(token, user).await
    }

    /// Merges profile fields into the signed-in user
    pub async fn update_user(&self, patch: UserPatch) -> Result<User> {
        let (token, mut user) = match self.state() {
            SessionState::Authenticated { token, user } => (token, user),
            _ => return Err(SessionError::NotAuthenticated),
        };

        if let Some(email) = patch.email {
            user.email = email;
        }
        if patch.avatar.is_some() {
            user.avatar = patch.avatar;
        }
        if patch.nickname.is_some() {
            user.nickname = patch.nickname;
        }
        if patch.bio.is_some() {
            user.bio = patch.bio;
        }

        self.login_quietly(token, user.clone()).await?;
        Ok(user)
    }

    async fn login_quietly(&self, token: String, user: User) -> Result<()> {
        self.store
            .save(&StoredCredentials {
                token: Some(token.clone()),
                user: Some(user.clone()),
            })
            .await?;
        *self.state.write() = SessionState::Authenticated { token, user };
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.state.read().clone()
    }

    pub fn is_initialized(&self) -> bool {
        *self.state.read() != SessionState::Uninitialized
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.state.read(), SessionState::Authenticated { .. })
    }

    /// Bearer token for outgoing requests, if any
    pub fn token(&self) -> Option<String> {
        match &*self.state.read() {
            SessionState::Authenticated { token, .. } => Some(token.clone()),
            _ => None,
        }
    }

    pub fn user(&self) -> Option<User> {
        match &*self.state.read() {
            SessionState::Authenticated { user, .. } => Some(user.clone()),
            _ => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user().map(|u| u.role)
    }

    pub fn current_route(&self) -> String {
        self.current_route.read().clone()
    }

    pub fn navigate(&self, route: &str) {
        *self.current_route.write() = route.to_string();
    }

    pub fn login_route(&self) -> &str {
        &self.login_routes[0]
    }

    pub fn is_login_route(&self, route: &str) -> bool {
        self.login_routes.iter().any(|r| r == route)
    }

    pub fn on_login_route(&self) -> bool {
        self.is_login_route(&self.current_route())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_storage::MemoryStore;

    fn user(role: Role) -> User {
        User {
            id: 1,
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            role,
            avatar: None,
            nickname: None,
            bio: None,
        }
    }

    fn session_with(credentials: StoredCredentials) -> (Arc<Session>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::with_credentials(credentials));
        let session = Session::new(
            store.clone(),
            EventBus::new(true),
            vec!["/".to_string(), "/login".to_string()],
        );
        (session, store)
    }

    #[tokio::test]
    async fn test_initialize_restores_complete_credentials() {
        let (session, _) = session_with(StoredCredentials {
            token: Some("tok".to_string()),
            user: Some(user(Role::Admin)),
        });

        assert_eq!(session.state(), SessionState::Uninitialized);
        let state = session.initialize().await.unwrap();

        assert!(matches!(state, SessionState::Authenticated { .. }));
        assert_eq!(session.token().as_deref(), Some("tok"));
        assert_eq!(session.role(), Some(Role::Admin));
    }

    #[tokio::test]
    async fn test_initialize_clears_token_without_user() {
        let (session, store) = session_with(StoredCredentials {
            token: Some("tok".to_string()),
            user: None,
        });

        assert_eq!(session.initialize().await.unwrap(), SessionState::Anonymous);
        assert_eq!(store.load().await.unwrap(), StoredCredentials::default());
        assert_eq!(session.token(), None);
    }

    #[tokio::test]
    async fn test_initialize_runs_once() {
        let (session, _) = session_with(StoredCredentials::default());
        session.initialize().await.unwrap();
        assert!(matches!(
            session.initialize().await,
            Err(SessionError::AlreadyInitialized)
        ));
    }

    #[tokio::test]
    async fn test_login_then_logout() {
        let (session, store) = session_with(StoredCredentials::default());
        session.initialize().await.unwrap();

        session.login("tok".to_string(), user(Role::User)).await.unwrap();
        assert!(session.is_authenticated());
        assert_eq!(store.load().await.unwrap().token.as_deref(), Some("tok"));

        session.logout().await.unwrap();
        assert_eq!(session.state(), SessionState::Anonymous);
        assert_eq!(store.load().await.unwrap(), StoredCredentials::default());
    }

    #[tokio::test]
    async fn test_expire_clears_and_redirects() {
        let (session, store) = session_with(StoredCredentials {
            token: Some("tok".to_string()),
            user: Some(user(Role::User)),
        });
        session.initialize().await.unwrap();
        session.navigate("/admin/posts");
        let mut events = session.events.subscribe();

        assert!(session.expire().await);

        assert_eq!(session.token(), None);
        assert_eq!(session.current_route(), "/");
        assert_eq!(store.load().await.unwrap().token, None);
        assert_eq!(
            events.try_recv().unwrap(),
            AppEvent::SessionExpired { redirect: "/".to_string() }
        );
    }

    #[tokio::test]
    async fn test_expire_on_login_route_is_ignored() {
        let (session, _) = session_with(StoredCredentials {
            token: Some("tok".to_string()),
            user: Some(user(Role::User)),
        });
        session.initialize().await.unwrap();
        session.navigate("/login");

        assert!(!session.expire().await);
        assert_eq!(session.token().as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_update_user_merges_fields() {
        let (session, store) = session_with(StoredCredentials::default());
        session.initialize().await.unwrap();
        assert!(matches!(
            session.update_user(UserPatch::default()).await,
            Err(SessionError::NotAuthenticated)
        ));

        session.login("tok".to_string(), user(Role::User)).await.unwrap();
        let updated = session
            .update_user(UserPatch {
                nickname: Some("Countess".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(updated.nickname.as_deref(), Some("Countess"));
        assert_eq!(updated.email, "ada@example.com");
        assert_eq!(
            store.load().await.unwrap().user.and_then(|u| u.nickname).as_deref(),
            Some("Countess")
        );
    }
}
