use crate::errors::ApiError;
use crate::http::HttpClient;
use quill_events::AppEvent;
use quill_models::{ChangePasswordRequest, User, UserPatch};
use std::sync::Arc;

type Result<T> = std::result::Result<T, ApiError>;

/// Profile screen calls: profile fields, avatar and password
pub struct UsersApi {
    http: Arc<HttpClient>,
}

impl UsersApi {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Sends the changed fields and merges them into the signed-in user
    pub async fn update_profile(&self, patch: UserPatch) -> Result<User> {
        self.http.patch_json("/users/profile", &patch).await?;

        let user = self.http.session().update_user(patch).await?;
        self.http.events().emit(AppEvent::ProfileUpdated {
            username: user.username.clone(),
        });
        Ok(user)
    }

    /// Points the profile at an uploaded image (normalized URL)
    pub async fn set_avatar(&self, url: &str) -> Result<User> {
        self.update_profile(UserPatch::avatar(url)).await
    }

    pub async fn change_password(&self, old_password: &str, new_password: &str) -> Result<()> {
        let request = ChangePasswordRequest {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        };
        self.http.post_json("/users/change-password", &request).await?;
        self.http.events().emit(AppEvent::PasswordChanged);
        Ok(())
    }
}
