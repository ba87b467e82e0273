use crate::errors::ApiError;
use crate::files::FilesApi;
use quill_models::{FilePage, FileQuery, FileResource};
use quill_resolver::{with_cache_buster, UrlNormalizer};
use std::sync::Arc;

type Result<T> = std::result::Result<T, ApiError>;

const UNRESOLVED_MARKER: &str = "undefined";

/// Paged browsing of stored resources and Markdown insertion into editor text
pub struct ResourcePicker {
    files: Arc<FilesApi>,
    normalizer: Arc<UrlNormalizer>,
    page_size: u32,
}

impl ResourcePicker {
    pub fn new(files: Arc<FilesApi>, normalizer: Arc<UrlNormalizer>, page_size: u32) -> Self {
        Self {
            files,
            normalizer,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// 1-indexed. A blank search term means no filter.
    pub async fn list(&self, page: u32, search: Option<&str>) -> Result<FilePage> {
        let query = FileQuery::new(page.max(1), self.page_size).with_search(search);
        self.files.list(&query).await
    }

    pub fn url_for(&self, resource: &FileResource) -> String {
        self.normalizer.normalize(&resource.file_path)
    }

    /// `![name](url)` for images, `[name](url)` for everything else
    pub fn fragment(&self, resource: &FileResource) -> String {
        let url = self.url_for(resource);
        let name = resource.display_name();

        if resource.is_image() {
            format!("![{}]({})", name, url)
        } else {
            format!("[{}]({})", name, url)
        }
    }

    /// Appends the fragment after a blank line; existing text is never replaced
    pub fn insert(&self, content: &str, resource: &FileResource) -> String {
        let fragment = self.fragment(resource);
        if content.is_empty() {
            fragment
        } else {
            format!("{}\n\n{}", content, fragment)
        }
    }

    pub fn copy_link(&self, resource: &FileResource) -> Result<String> {
        if resource.file_path.contains(UNRESOLVED_MARKER) {
            return Err(ApiError::InvalidReference(resource.file_path.clone()));
        }
        Ok(self.url_for(resource))
    }

    pub fn preview_url(&self, resource: &FileResource) -> String {
        with_cache_buster(&self.url_for(resource))
    }
}
