use super::defaults::DEFAULT_CONFIG_TEMPLATE;
use super::errors::ConfigError;
use super::migration::migrate_config_if_needed;
use super::models::Config;
use std::path::Path;
use std::sync::Arc;

pub const ENV_API_URL: &str = "QUILL_API_URL";
pub const ENV_API_BASE: &str = "QUILL_API_BASE";
pub const ENV_STORAGE_URL: &str = "QUILL_STORAGE_URL";

impl Config {
    /// Loads configuration from a file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Self::from_file_with_events(path, None).await
    }

    /// Loads configuration from a file with optional event bus for notifications
    pub async fn from_file_with_events<P: AsRef<Path>>(
        path: P,
        events: Option<&Arc<quill_events::EventBus>>,
    ) -> anyhow::Result<Self> {
        let path = path.as_ref();

        // Create default config if it doesn't exist
        if !path.exists() {
            create_default_config(path).await?;
        }

        migrate_config_if_needed(path, events).await?;

        let content = tokio::fs::read_to_string(path).await?;
        let mut config = Self::from_toml(&content)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Applies environment-style overrides; `lookup` returns the value for a key
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            tracing::debug!("{} overrides api.base_url", ENV_API_URL);
            self.api.base_url = url;
        }
        if let Some(base) = lookup(ENV_API_BASE) {
            tracing::debug!("{} overrides api.base_path", ENV_API_BASE);
            self.api.base_path = base;
        }
        if let Some(storage) = lookup(ENV_STORAGE_URL) {
            tracing::debug!("{} overrides storage.base_url", ENV_STORAGE_URL);
            self.storage.base_url = storage;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.api.base_path.is_empty() && !self.api.base_path.starts_with('/') {
            return Err(ConfigError::InvalidConfig(format!(
                "api.base_path must start with '/': {}",
                self.api.base_path
            )));
        }
        if self.storage.buckets.iter().all(|b| b.trim().is_empty()) {
            return Err(ConfigError::InvalidConfig(
                "storage.buckets must name at least one bucket".to_string(),
            ));
        }
        if self.picker.page_size == 0 {
            return Err(ConfigError::InvalidConfig(
                "picker.page_size must be greater than 0".to_string(),
            ));
        }
        if self.upload.max_size_bytes == 0 {
            return Err(ConfigError::InvalidConfig(
                "upload.max_size_bytes must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: super::defaults::api_settings(),
            storage: super::defaults::storage_settings(),
            upload: super::defaults::upload_settings(),
            picker: super::defaults::picker_settings(),
            cache: super::defaults::cache_settings(),
            session: super::defaults::session_settings(),
        }
    }
}

/// Creates a default configuration file
async fn create_default_config<P: AsRef<Path>>(path: P) -> anyhow::Result<()> {
    tokio::fs::write(path, DEFAULT_CONFIG_TEMPLATE).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_parses() {
        let config = Config::from_toml(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.api.base_path, "/api");
        assert_eq!(config.api.api_root(), "http://localhost:3000/api");
        assert_eq!(config.storage.buckets, vec!["blog-images", "blog-avatars"]);
        assert_eq!(config.upload.max_size_bytes, 2 * 1024 * 1024);
        assert_eq!(config.picker.page_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = Config::from_toml("[api]\nbase_url = \"http://example.com\"\n").unwrap();
        assert_eq!(config.storage.default_image, "/assets/default-image.png");
        assert_eq!(config.session.login_routes, vec!["/", "/login"]);
        assert_eq!(config.upload.image_config().bucket.as_deref(), Some("blog-images"));
    }

    #[test]
    fn test_overrides_replace_values() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            ENV_API_URL => Some("https://blog.example.com".to_string()),
            ENV_STORAGE_URL => Some("minio.internal:9000".to_string()),
            _ => None,
        });

        assert_eq!(config.api.base_url, "https://blog.example.com");
        assert_eq!(config.api.base_path, "/api");
        assert_eq!(config.storage.base_url, "minio.internal:9000");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.api.base_path = "api".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidConfig(_))));

        let mut config = Config::default();
        config.storage.buckets.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.picker.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn test_from_file_creates_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quill.toml");

        let config = Config::from_file(&path).await.unwrap();

        assert!(path.exists());
        assert_eq!(config.cache.ttl_secs, 300);
    }
}
