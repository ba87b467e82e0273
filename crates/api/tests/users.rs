mod common;

use common::{signed_in, TOKEN};
use quill_events::AppEvent;
use quill_models::{LocalFile, UserPatch};
use quill_storage::CredentialStore;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_profile_update_merges_into_session() {
    let h = signed_in().await;

    Mock::given(method("PATCH"))
        .and(path("/api/users/profile"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .and(body_json(json!({"nickname": "Countess", "bio": "Engines"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "username": "ada"})))
        .expect(1)
        .mount(&h.server)
        .await;

    let mut events = h.events.subscribe();
    let patch = UserPatch {
        nickname: Some("Countess".to_string()),
        bio: Some("Engines".to_string()),
        ..Default::default()
    };
    let user = h.client.users().update_profile(patch).await.unwrap();

    assert_eq!(user.nickname.as_deref(), Some("Countess"));
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(h.session.user().unwrap().bio.as_deref(), Some("Engines"));

    let stored = h.store.load().await.unwrap();
    assert_eq!(stored.user.unwrap().nickname.as_deref(), Some("Countess"));
    assert_eq!(stored.token.as_deref(), Some(TOKEN));

    assert_eq!(
        events.try_recv().unwrap(),
        AppEvent::ProfileUpdated { username: "ada".to_string() }
    );
}

#[tokio::test]
async fn test_rejected_profile_update_keeps_user() {
    let h = signed_in().await;

    Mock::given(method("PATCH"))
        .and(path("/api/users/profile"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "Email already taken"})))
        .mount(&h.server)
        .await;

    let patch = UserPatch {
        email: Some("taken@example.com".to_string()),
        ..Default::default()
    };
    let err = h.client.users().update_profile(patch).await.unwrap_err();

    assert_eq!(err.to_string(), "Email already taken");
    assert_eq!(h.session.user().unwrap().email, "ada@example.com");
}

#[tokio::test]
async fn test_avatar_upload_then_profile_points_at_proxy_url() {
    let h = signed_in().await;

    Mock::given(method("POST"))
        .and(path("/api/files/upload/image"))
        .and(body_string_contains("blog-avatars"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"url": "http://localhost:9000/blog-avatars/me.png"})),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/api/users/profile"))
        .and(body_json(json!({"avatar": "/api/files/proxy/blog-avatars/me.png"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&h.server)
        .await;

    let config = h.client.upload_settings().avatar_config();
    let file = LocalFile::new("me.png", "image/png", vec![1u8; 16]);
    let uploaded = h.client.uploads().upload(&file, &config).await.unwrap();
    let user = h.client.users().set_avatar(&uploaded.url).await.unwrap();

    assert_eq!(user.avatar.as_deref(), Some("/api/files/proxy/blog-avatars/me.png"));
}

#[tokio::test]
async fn test_avatar_preset_rejects_gif_without_request() {
    let h = signed_in().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&h.server)
        .await;

    let config = h.client.upload_settings().avatar_config();
    let gif = LocalFile::new("me.gif", "image/gif", vec![1u8; 16]);

    assert!(h.client.uploads().upload(&gif, &config).await.is_err());
    assert!(h.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_change_password_sends_both_values() {
    let h = signed_in().await;

    Mock::given(method("POST"))
        .and(path("/api/users/change-password"))
        .and(body_json(json!({"oldPassword": "old", "newPassword": "new"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&h.server)
        .await;

    let mut events = h.events.subscribe();
    h.client.users().change_password("old", "new").await.unwrap();

    assert_eq!(events.try_recv().unwrap(), AppEvent::PasswordChanged);
    assert!(h.session.is_authenticated());
}
