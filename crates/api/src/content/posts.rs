use super::parser::{parse_entries, parse_entry};
use crate::errors::ApiError;
use crate::http::HttpClient;
use quill_cache::{QueryCache, QueryKey};
use quill_events::AppEvent;
use quill_models::{Post, PostDraft, PostQuery};
use std::sync::Arc;

type Result<T> = std::result::Result<T, ApiError>;

pub const POSTS_RESOURCE: &str = "posts";

pub struct PostsApi {
    http: Arc<HttpClient>,
    cache: Arc<QueryCache<Vec<Post>>>,
}

impl PostsApi {
    pub fn new(http: Arc<HttpClient>, cache: Arc<QueryCache<Vec<Post>>>) -> Self {
        Self { http, cache }
    }

    pub async fn list(&self, query: &PostQuery) -> Result<Vec<Post>> {
        let key = QueryKey::new(POSTS_RESOURCE, serde_json::to_string(query)?);
        let http = Arc::clone(&self.http);

        self.cache
            .get_or_fetch(key, || async move {
                let body = http.get_with_query("/posts", query).await?;
                Ok::<_, ApiError>(parse_entries(&body))
            })
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Post> {
        let body = self.http.get(&format!("/posts/{}", id)).await?;
        parse_entry(&body)
    }

    pub async fn create(&self, draft: &PostDraft) -> Result<Post> {
        let body = self.http.post_json("/posts", draft).await?;
        let post: Post = parse_entry(&body)?;
        self.saved(post.id).await;
        Ok(post)
    }

    pub async fn update(&self, id: i64, draft: &PostDraft) -> Result<Post> {
        let body = self.http.patch_json(&format!("/posts/{}", id), draft).await?;
        self.saved(id).await;
        parse_entry(&body)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.http.delete(&format!("/posts/{}", id)).await?;
        self.cache.invalidate_resource(POSTS_RESOURCE).await;
        self.http.events().emit(AppEvent::EntryDeleted {
            resource: POSTS_RESOURCE.to_string(),
            id,
        });
        Ok(())
    }

    async fn saved(&self, id: i64) {
        self.cache.invalidate_resource(POSTS_RESOURCE).await;
        self.http.events().emit(AppEvent::EntrySaved {
            resource: POSTS_RESOURCE.to_string(),
            id,
        });
    }
}
