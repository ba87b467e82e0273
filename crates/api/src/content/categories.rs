use super::parser::{parse_entries, parse_entry};
use crate::errors::ApiError;
use crate::http::HttpClient;
use quill_cache::{QueryCache, QueryKey};
use quill_events::AppEvent;
use quill_models::{Category, CategoryDraft};
use std::sync::Arc;

type Result<T> = std::result::Result<T, ApiError>;

pub const CATEGORIES_RESOURCE: &str = "categories";

pub struct CategoriesApi {
    http: Arc<HttpClient>,
    cache: Arc<QueryCache<Vec<Category>>>,
}

impl CategoriesApi {
    pub fn new(http: Arc<HttpClient>, cache: Arc<QueryCache<Vec<Category>>>) -> Self {
        Self { http, cache }
    }

    /// The category list takes no filters, so one key covers it
    pub async fn list(&self) -> Result<Vec<Category>> {
        let http = Arc::clone(&self.http);

        self.cache
            .get_or_fetch(QueryKey::new(CATEGORIES_RESOURCE, ""), || async move {
                let body = http.get("/categories").await?;
                Ok::<_, ApiError>(parse_entries(&body))
            })
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Category> {
        let body = self.http.get(&format!("/categories/{}", id)).await?;
        parse_entry(&body)
    }

    pub async fn create(&self, draft: &CategoryDraft) -> Result<Category> {
        let body = self.http.post_json("/categories", draft).await?;
        let category: Category = parse_entry(&body)?;
        self.saved(category.id).await;
        Ok(category)
    }

    /// Partial update; unset fields are left out of the body
    pub async fn update(&self, id: i64, draft: &CategoryDraft) -> Result<Category> {
        let body = self.http.put_json(&format!("/categories/{}", id), draft).await?;
        self.saved(id).await;
        parse_entry(&body)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.http.delete(&format!("/categories/{}", id)).await?;
        self.cache.invalidate_resource(CATEGORIES_RESOURCE).await;
        self.http.events().emit(AppEvent::EntryDeleted {
            resource: CATEGORIES_RESOURCE.to_string(),
            id,
        });
        Ok(())
    }

    async fn saved(&self, id: i64) {
        self.cache.invalidate_resource(CATEGORIES_RESOURCE).await;
        self.http.events().emit(AppEvent::EntrySaved {
            resource: CATEGORIES_RESOURCE.to_string(),
            id,
        });
    }
}
