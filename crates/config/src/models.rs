use quill_models::{UploadConfig, UploadEndpoint, ANDROID_PACKAGE_MIME};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub api: ApiSettings,
    #[serde(default = "super::defaults::storage_settings")]
    pub storage: StorageSettings,
    #[serde(default = "super::defaults::upload_settings")]
    pub upload: UploadSettings,
    #[serde(default = "super::defaults::picker_settings")]
    pub picker: PickerSettings,
    #[serde(default = "super::defaults::cache_settings")]
    pub cache: CacheSettings,
    #[serde(default = "super::defaults::session_settings")]
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Origin the backend is reached at (`http://localhost:3000`)
    pub base_url: String,
    /// Path prefix every API route lives under (`/api`)
    #[serde(default = "super::defaults::api_base_path")]
    pub base_path: String,
    #[serde(default = "super::defaults::timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiSettings {
    /// Absolute root for API requests (`http://localhost:3000/api`)
    pub fn api_root(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.base_path.trim_end_matches('/')
        )
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Substrings that mark a direct object-storage URL (`localhost:9000`)
    #[serde(default = "super::defaults::direct_hosts")]
    pub direct_hosts: Vec<String>,
    /// Object-storage base reference, only used to detect direct URLs
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "super::defaults::buckets")]
    pub buckets: Vec<String>,
    #[serde(default = "super::defaults::default_image")]
    pub default_image: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadSettings {
    #[serde(default = "super::defaults::max_size_bytes")]
    pub max_size_bytes: u64,
    #[serde(default = "super::defaults::allowed_types")]
    pub allowed_types: Vec<String>,
    #[serde(default = "super::defaults::upload_bucket")]
    pub bucket: String,
    #[serde(default = "super::defaults::resource_max_size_bytes")]
    pub resource_max_size_bytes: u64,
}

impl UploadSettings {
    /// Editor preset: images only, image endpoint, default bucket
    pub fn image_config(&self) -> UploadConfig {
        UploadConfig {
            max_size_bytes: self.max_size_bytes,
            allowed_mime_types: self.allowed_types.clone(),
            bucket: (!self.bucket.is_empty()).then(|| self.bucket.clone()),
            endpoint: UploadEndpoint::Image,
        }
    }

    /// Profile preset: small JPEG or PNG into the avatars bucket
    pub fn avatar_config(&self) -> UploadConfig {
        UploadConfig {
            max_size_bytes: super::defaults::max_size_bytes(),
            allowed_mime_types: vec!["image/jpeg".to_string(), "image/png".to_string()],
            bucket: Some(super::defaults::avatar_bucket()),
            endpoint: UploadEndpoint::Image,
        }
    }

    /// Resource manager preset: any image or an Android package, generic endpoint
    pub fn resource_config(&self) -> UploadConfig {
        UploadConfig {
            max_size_bytes: self.resource_max_size_bytes,
            allowed_mime_types: vec!["image/".to_string(), ANDROID_PACKAGE_MIME.to_string()],
            bucket: None,
            endpoint: UploadEndpoint::File,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PickerSettings {
    #[serde(default = "super::defaults::page_size")]
    pub page_size: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheSettings {
    #[serde(default = "super::defaults::cache_enabled")]
    pub enabled: bool,
    #[serde(default = "super::defaults::cache_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "super::defaults::cache_max_entries")]
    pub max_entries: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionSettings {
    #[serde(default = "super::defaults::credentials_path")]
    pub credentials_path: String,
    #[serde(default = "super::defaults::login_routes")]
    pub login_routes: Vec<String>,
}
