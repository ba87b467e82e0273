use super::validator::validate;
use crate::errors::{ApiError, ValidationError};
use crate::files::{parse_upload_response, FilesApi};
use crate::http::HttpClient;
use futures::future::join_all;
use quill_events::AppEvent;
use quill_models::{LocalFile, UploadConfig, UploadedFile};
use quill_resolver::UrlNormalizer;
use reqwest::multipart::{Form, Part};
use std::sync::Arc;

type Result<T> = std::result::Result<T, ApiError>;

const FALLBACK_MIME: &str = "application/octet-stream";

pub struct UploadClient {
    http: Arc<HttpClient>,
    files: Arc<FilesApi>,
    normalizer: Arc<UrlNormalizer>,
}

impl UploadClient {
    pub fn new(http: Arc<HttpClient>, files: Arc<FilesApi>, normalizer: Arc<UrlNormalizer>) -> Self {
        Self {
            http,
            files,
            normalizer,
        }
    }

    /// Validates, submits one multipart request and returns the normalized URL.
    /// A validation failure never reaches the network.
    pub async fn upload(&self, file: &LocalFile, config: &UploadConfig) -> Result<UploadedFile> {
        let uploaded = self.upload_one(file, config).await?;
        self.files.invalidate().await;
        Ok(uploaded)
    }

    /// Concurrent uploads with results in input order. One failure does not
    /// stop the others.
    pub async fn upload_many(&self, files: &[LocalFile], config: &UploadConfig) -> Vec<Result<UploadedFile>> {
        let results = join_all(files.iter().map(|file| self.upload_one(file, config))).await;

        if results.iter().any(|r| r.is_ok()) {
            self.files.invalidate().await;
        }
        results
    }

    async fn upload_one(&self, file: &LocalFile, config: &UploadConfig) -> Result<UploadedFile> {
        let result = self.submit(file, config).await;

        match &result {
            Ok(uploaded) => {
                tracing::info!("Uploaded {} -> {}", file.name, uploaded.url);
                self.http.events().emit(AppEvent::UploadCompleted {
                    name: file.name.clone(),
                    url: uploaded.url.clone(),
                });
            }
            Err(e) => {
                tracing::error!("Upload of {} failed: {}", file.name, e);
                self.http.events().emit(AppEvent::UploadFailed {
                    name: file.name.clone(),
                    error: e.to_string(),
                });
            }
        }

        result
    }

    async fn submit(&self, file: &LocalFile, config: &UploadConfig) -> Result<UploadedFile> {
        validate(file, config)?;

        let mime_type = if file.mime_type.is_empty() {
            FALLBACK_MIME
        } else {
            file.mime_type.as_str()
        };
        let part = Part::bytes(file.data.to_vec())
            .file_name(file.name.clone())
            .mime_str(mime_type)
            .map_err(|_| ValidationError::MalformedType {
                mime_type: mime_type.to_string(),
            })?;

        let mut form = Form::new().part("file", part);
        if let Some(bucket) = &config.bucket {
            form = form.text("bucket", bucket.clone());
        }

        let body = self.http.post_multipart(config.endpoint.path(), form).await?;
        let response = parse_upload_response(&body)?;

        Ok(UploadedFile {
            url: self.normalizer.normalize(&response.raw_reference),
            raw_reference: response.raw_reference,
            file_path: response.file_path,
            original_name: response.original_name,
            mime_type: response.mime_type,
            size: response.size,
        })
    }
}
