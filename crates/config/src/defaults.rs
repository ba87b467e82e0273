/// Default values for configuration fields

pub fn api_base_path() -> String {
    "/api".to_string()
}

pub fn timeout_secs() -> u64 {
    10
}

pub fn api_settings() -> super::models::ApiSettings {
    super::models::ApiSettings {
        base_url: "http://localhost:3000".to_string(),
        base_path: api_base_path(),
        timeout_secs: timeout_secs(),
    }
}

// Storage defaults
pub fn direct_hosts() -> Vec<String> {
    vec!["localhost:9000".to_string()]
}

pub fn buckets() -> Vec<String> {
    vec!["blog-images".to_string(), "blog-avatars".to_string()]
}

pub fn default_image() -> String {
    "/assets/default-image.png".to_string()
}

pub fn storage_settings() -> super::models::StorageSettings {
    super::models::StorageSettings {
        direct_hosts: direct_hosts(),
        base_url: String::new(),
        buckets: buckets(),
        default_image: default_image(),
    }
}

// Upload defaults
pub fn max_size_bytes() -> u64 {
    2 * 1024 * 1024
}

pub fn allowed_types() -> Vec<String> {
    ["image/jpeg", "image/png", "image/gif", "image/webp"]
        .iter()
        .map(|t| t.to_string())
        .collect()
}

pub fn upload_bucket() -> String {
    "blog-images".to_string()
}

pub fn avatar_bucket() -> String {
    "blog-avatars".to_string()
}

pub fn resource_max_size_bytes() -> u64 {
    100 * 1024 * 1024
}

pub fn upload_settings() -> super::models::UploadSettings {
    super::models::UploadSettings {
        max_size_bytes: max_size_bytes(),
        allowed_types: allowed_types(),
        bucket: upload_bucket(),
        resource_max_size_bytes: resource_max_size_bytes(),
    }
}

pub fn page_size() -> u32 {
    10
}

pub fn picker_settings() -> super::models::PickerSettings {
    super::models::PickerSettings {
        page_size: page_size(),
    }
}

// Cache defaults
pub fn cache_enabled() -> bool {
    true
}

pub fn cache_ttl_secs() -> u64 {
    300
}

pub fn cache_max_entries() -> u64 {
    256
}

pub fn cache_settings() -> super::models::CacheSettings {
    super::models::CacheSettings {
        enabled: cache_enabled(),
        ttl_secs: cache_ttl_secs(),
        max_entries: cache_max_entries(),
    }
}

// Session defaults
pub fn credentials_path() -> String {
    "session.json".to_string()
}

pub fn login_routes() -> Vec<String> {
    vec!["/".to_string(), "/login".to_string()]
}

pub fn session_settings() -> super::models::SessionSettings {
    super::models::SessionSettings {
        credentials_path: credentials_path(),
        login_routes: login_routes(),
    }
}

pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# ===============================================================================
# Quill Admin Configuration
# ===============================================================================

[api]
base_url = "http://localhost:3000"   # Backend origin
base_path = "/api"                   # Prefix of every API route
timeout_secs = 10                    # Request timeout in seconds

# ===============================================================================
# OBJECT STORAGE
# ===============================================================================
# Only used to recognise direct storage links so they can be rewritten to the
# API proxy route ({base_path}/files/proxy/{bucket}/{object}).
[storage]
direct_hosts = ["localhost:9000"]    # Substrings marking a direct storage URL
base_url = ""                        # Storage base reference (optional)
buckets = ["blog-images", "blog-avatars"]
default_image = "/assets/default-image.png"  # Placeholder for empty references

# ===============================================================================
# UPLOADS
# ===============================================================================
[upload]
max_size_bytes = 2097152             # Editor image limit (2 MB)
allowed_types = ["image/jpeg", "image/png", "image/gif", "image/webp"]
bucket = "blog-images"               # Bucket hint sent with editor uploads
resource_max_size_bytes = 104857600  # Resource manager limit (100 MB)

[picker]
page_size = 10                       # Rows per resource picker page

# ===============================================================================
# QUERY CACHE
# ===============================================================================
[cache]
enabled = true                       # Reuse list results until a mutation
ttl_secs = 300                       # Entry lifetime in seconds
max_entries = 256                    # Max cached query results

# ===============================================================================
# SESSION
# ===============================================================================
[session]
credentials_path = "session.json"    # Where the bearer token is persisted
login_routes = ["/", "/login"]       # Entry screens (no redirect on 401 there)
"#;
