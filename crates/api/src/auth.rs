use crate::errors::ApiError;
use crate::http::HttpClient;
use quill_models::{AuthResponse, LoginRequest, RegisterRequest, User};
use serde_json::Value;
use std::sync::Arc;

type Result<T> = std::result::Result<T, ApiError>;

pub struct AuthApi {
    http: Arc<HttpClient>,
}

impl AuthApi {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Signs in and stores the credential in the session
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let body = self.http.post_json("/auth/login", &request).await?;
        self.start_session(body).await
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<User> {
        let request = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let body = self.http.post_json("/auth/register", &request).await?;
        self.start_session(body).await
    }

    /// Refreshes the signed-in user from the backend
    pub async fn profile(&self) -> Result<User> {
        let body = self.http.get("/auth/profile").await?;
        let user: User = serde_json::from_value(body)?;
        self.http.session().set_user(user.clone()).await?;
        Ok(user)
    }

    pub async fn logout(&self) -> Result<()> {
        self.http.session().logout().await?;
        Ok(())
    }

    async fn start_session(&self, body: Value) -> Result<User> {
        let auth: AuthResponse = serde_json::from_value(body)?;
        self.http
            .session()
            .login(auth.access_token, auth.user.clone())
            .await?;
        Ok(auth.user)
    }
}
