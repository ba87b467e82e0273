use super::models::{RouteDecision, Session};

const PROTECTED_PREFIX: &str = "/admin";

impl Session {
    /// Gate for protected screens: anything under `/admin` needs a token
    pub fn guard(&self, route: &str) -> RouteDecision {
        let protected = route == PROTECTED_PREFIX
            || route.starts_with(&format!("{}/", PROTECTED_PREFIX));

        if protected && self.token().is_none() {
            tracing::debug!("Route {} requires sign-in", route);
            self.navigate(self.login_route());
            return RouteDecision::RedirectToLogin {
                from: route.to_string(),
            };
        }

        self.navigate(route);
        RouteDecision::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_events::EventBus;
    use quill_models::{Role, User};
    use quill_storage::MemoryStore;
    use std::sync::Arc;

    fn session() -> Arc<Session> {
        Session::new(Arc::new(MemoryStore::new()), EventBus::new(true), vec!["/".to_string()])
    }

    #[tokio::test]
    async fn test_anonymous_redirected_from_admin() {
        let session = session();
        session.initialize().await.unwrap();

        assert_eq!(
            session.guard("/admin/resources"),
            RouteDecision::RedirectToLogin { from: "/admin/resources".to_string() }
        );
        assert_eq!(session.current_route(), "/");
        assert_eq!(session.guard("/login"), RouteDecision::Allow);
    }

    #[tokio::test]
    async fn test_authenticated_allowed() {
        let session = session();
        session.initialize().await.unwrap();
        session
            .login(
                "tok".to_string(),
                User {
                    id: 1,
                    username: "ada".to_string(),
                    email: String::new(),
                    role: Role::User,
                    avatar: None,
                    nickname: None,
                    bio: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(session.guard("/admin/posts"), RouteDecision::Allow);
        assert_eq!(session.current_route(), "/admin/posts");
        // Prefix must end at a segment boundary
        assert_eq!(session.guard("/administrator"), RouteDecision::Allow);
    }
}
