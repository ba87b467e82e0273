use super::parser::{parse_file_page, parse_file_resource};
use crate::errors::ApiError;
use crate::http::HttpClient;
use bytes::Bytes;
use quill_cache::{QueryCache, QueryKey};
use quill_events::AppEvent;
use quill_models::{FilePage, FileQuery, FileResource, FileUpdate};
use std::sync::Arc;

type Result<T> = std::result::Result<T, ApiError>;

/// Cache resource name shared by every query and mutation on `/files`
pub const FILES_RESOURCE: &str = "files";

const IMAGE_MIME_PREFIX: &str = "image/";

pub struct FilesApi {
    http: Arc<HttpClient>,
    cache: Arc<QueryCache<FilePage>>,
}

impl FilesApi {
    pub fn new(http: Arc<HttpClient>, cache: Arc<QueryCache<FilePage>>) -> Self {
        Self { http, cache }
    }

    pub async fn list(&self, query: &FileQuery) -> Result<FilePage> {
        let key = QueryKey::new(FILES_RESOURCE, serde_json::to_string(query)?);
        let http = Arc::clone(&self.http);

        self.cache
            .get_or_fetch(key, || async move {
                let body = http.get_with_query("/files", query).await?;
                Ok::<_, ApiError>(parse_file_page(&body))
            })
            .await
    }

    /// Image-only listing; a search term widens it back to every type
    pub async fn images(&self, query: &FileQuery) -> Result<FilePage> {
        let mime_type = match query.search {
            Some(_) => None,
            None => Some(IMAGE_MIME_PREFIX),
        };
        self.list(&query.clone().with_mime_type(mime_type)).await
    }

    pub async fn get(&self, id: i64) -> Result<FileResource> {
        let body = self.http.get(&format!("/files/{}", id)).await?;
        parse_file_resource(&body)
    }

    pub async fn update(&self, id: i64, update: &FileUpdate) -> Result<FileResource> {
        let body = self.http.patch_json(&format!("/files/{}", id), update).await?;
        self.invalidate().await;
        self.http.events().emit(AppEvent::FileUpdated { id });
        parse_file_resource(&body)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.http.delete(&format!("/files/{}", id)).await?;
        self.invalidate().await;
        self.http.events().emit(AppEvent::FileDeleted { id });
        Ok(())
    }

    /// Downloads through the proxy route of a normalized URL
    pub async fn fetch(&self, normalized_url: &str) -> Result<Bytes> {
        self.http.get_bytes(normalized_url).await
    }

    pub async fn invalidate(&self) {
        self.cache.invalidate_resource(FILES_RESOURCE).await;
    }
}
