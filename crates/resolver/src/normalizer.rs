use quill_config::Config;
use quill_utils::{has_scheme, join_url, starts_with_segment, trim_base};

/// Maps any stored-object reference to the API proxy route the client is
/// allowed to fetch from.
///
/// Total and idempotent: `normalize(normalize(x)) == normalize(x)`.
#[derive(Debug, Clone)]
pub struct UrlNormalizer {
    api_base: String,
    proxy_prefix: String,
    direct_hosts: Vec<String>,
    storage_base: Option<String>,
    buckets: Vec<String>,
    default_image: String,
}

impl UrlNormalizer {
    pub fn new(
        api_base: &str,
        direct_hosts: Vec<String>,
        storage_base: &str,
        buckets: Vec<String>,
        default_image: &str,
    ) -> Self {
        let api_base = trim_base(api_base);
        let storage_base = trim_base(storage_base);

        Self {
            proxy_prefix: format!("{}/files/proxy/", api_base),
            api_base,
            direct_hosts: direct_hosts
                .into_iter()
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty())
                .collect(),
            storage_base: (!storage_base.is_empty()).then_some(storage_base),
            buckets: buckets
                .into_iter()
                .map(|b| b.trim().to_string())
                .filter(|b| !b.is_empty())
                .collect(),
            default_image: default_image.trim().to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.api.base_path,
            config.storage.direct_hosts.clone(),
            &config.storage.base_url,
            config.storage.buckets.clone(),
            &config.storage.default_image,
        )
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn default_image(&self) -> &str {
        &self.default_image
    }

    /// Canonical proxy URL for an object inside a bucket
    pub fn proxy_url(&self, bucket: &str, object_path: &str) -> String {
        format!("{}{}/{}", self.proxy_prefix, bucket, object_path.trim_start_matches('/'))
    }

    pub fn is_proxied(&self, url: &str) -> bool {
        url.contains(&self.proxy_prefix)
    }

    pub fn normalize(&self, raw: &str) -> String {
        let raw = raw.trim();

        if raw.is_empty() || raw == self.default_image {
            return self.default_image.clone();
        }

        if self.is_proxied(raw) {
            return raw.to_string();
        }

        if self.is_direct_storage(raw) {
            if let Some(proxied) = self.rewrite_direct(raw) {
                tracing::debug!("Rewrote direct storage URL {} -> {}", raw, proxied);
                return proxied;
            }
        }

        if !has_scheme(raw) && !starts_with_segment(raw, &self.api_base) {
            return join_url(&self.api_base, raw);
        }

        raw.to_string()
    }

    fn is_direct_storage(&self, raw: &str) -> bool {
        self.direct_hosts.iter().any(|host| raw.contains(host.as_str()))
            || self
                .storage_base
                .as_deref()
                .is_some_and(|base| raw.contains(base))
    }

    /// Finds the first recognised bucket segment and keeps everything after it
    fn rewrite_direct(&self, raw: &str) -> Option<String> {
        let segments: Vec<&str> = raw.split('/').collect();
        let bucket_index = segments
            .iter()
            .position(|segment| self.buckets.iter().any(|b| b == segment))?;

        let bucket = segments[bucket_index];
        let object_path = segments[bucket_index + 1..].join("/");
        Some(self.proxy_url(bucket, &object_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_IMAGE: &str = "/assets/default-image.png";

    fn normalizer() -> UrlNormalizer {
        UrlNormalizer::new(
            "/api",
            vec!["localhost:9000".to_string(), "host:9000".to_string()],
            "",
            vec!["blog-images".to_string(), "blog-avatars".to_string()],
            DEFAULT_IMAGE,
        )
    }

    #[test]
    fn test_blank_input_yields_placeholder() {
        let n = normalizer();
        assert_eq!(n.normalize(""), DEFAULT_IMAGE);
        assert_eq!(n.normalize("   "), DEFAULT_IMAGE);
        assert_eq!(n.normalize(DEFAULT_IMAGE), DEFAULT_IMAGE);
    }

    #[test]
    fn test_direct_storage_rewritten_to_proxy() {
        let n = normalizer();
        assert_eq!(
            n.normalize("http://host:9000/blog-images/a/b.png"),
            "/api/files/proxy/blog-images/a/b.png"
        );
        assert_eq!(
            n.normalize("http://localhost:9000/blog-avatars/u1.jpg"),
            "/api/files/proxy/blog-avatars/u1.jpg"
        );
    }

    #[test]
    fn test_storage_base_marks_direct_urls() {
        let n = UrlNormalizer::new(
            "/api",
            Vec::new(),
            "https://minio.example.com/",
            vec!["blog-images".to_string()],
            DEFAULT_IMAGE,
        );
        assert_eq!(
            n.normalize("https://minio.example.com/blog-images/x.png"),
            "/api/files/proxy/blog-images/x.png"
        );
    }

    #[test]
    fn test_direct_storage_without_bucket_falls_through() {
        let n = normalizer();
        // Absolute with unknown bucket: unchanged
        assert_eq!(
            n.normalize("http://localhost:9000/other/x.png"),
            "http://localhost:9000/other/x.png"
        );
        // Relative with marker but no bucket: prefixed like any bare path
        assert_eq!(
            n.normalize("localhost:9000/other/x.png"),
            "/api/localhost:9000/other/x.png"
        );
    }

    #[test]
    fn test_proxied_passthrough() {
        let n = normalizer();
        let proxied = "/api/files/proxy/blog-images/x.png";
        assert_eq!(n.normalize(proxied), proxied);
    }

    #[test]
    fn test_relative_paths_prefixed_once() {
        let n = normalizer();
        assert_eq!(n.normalize("images/x.png"), "/api/images/x.png");
        assert_eq!(n.normalize("/images/x.png"), "/api/images/x.png");
        assert_eq!(n.normalize("/api/images/x.png"), "/api/images/x.png");
        assert_eq!(n.normalize("/apiary/x.png"), "/api/apiary/x.png");
    }

    #[test]
    fn test_foreign_absolute_urls_unchanged() {
        let n = normalizer();
        assert_eq!(n.normalize("https://cdn.example.com/x.png"), "https://cdn.example.com/x.png");
        assert_eq!(n.normalize("data:image/png;base64,AAAA"), "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let n = normalizer();
        let inputs = [
            "",
            "   ",
            DEFAULT_IMAGE,
            "images/x.png",
            "/images/x.png",
            " images/x.png ",
            "x.png",
            "/api",
            "/api/",
            "/api/files/proxy/blog-images/x.png",
            "http://host:9000/blog-images/a/b.png",
            "http://localhost:9000/blog-avatars/",
            "http://localhost:9000/blog-images",
            "http://localhost:9000/unknown/x.png",
            "localhost:9000/blog-images/x.png",
            "localhost:9000/x.png",
            "https://cdn.example.com/blog-images/x.png",
            "blog-images/x.png",
            "/apiary/blog-images/x.png",
            "data:image/png;base64,AAAA",
            "?t=1",
        ];

        for input in inputs {
            let once = n.normalize(input);
            let twice = n.normalize(&once);
            assert_eq!(once, twice, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_buckets_are_configurable() {
        let n = UrlNormalizer::new(
            "/api",
            vec!["localhost:9000".to_string()],
            "",
            vec!["portfolio".to_string()],
            DEFAULT_IMAGE,
        );
        assert_eq!(
            n.normalize("http://localhost:9000/portfolio/shot.png"),
            "/api/files/proxy/portfolio/shot.png"
        );
    }
}
