/// Joins a base and a path with exactly one `/` between them
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return base.to_string();
    }
    format!("{}/{}", base, path)
}

/// Strips trailing slashes, keeping an empty base empty
pub fn trim_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}

/// `true` when `value` carries a URL scheme (`http://`, `data:`, ...)
pub fn has_scheme(value: &str) -> bool {
    let Some((scheme, rest)) = value.split_once(':') else {
        return false;
    };

    let valid_scheme = scheme
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    valid_scheme && (rest.starts_with("//") || matches!(scheme, "data" | "blob" | "mailto"))
}

/// `true` when `path` equals `prefix` or continues it at a segment boundary
pub fn starts_with_segment(path: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return false;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("/api", "files"), "/api/files");
        assert_eq!(join_url("/api/", "/files"), "/api/files");
        assert_eq!(join_url("http://host", "/api"), "http://host/api");
    }

    #[test]
    fn test_has_scheme() {
        assert!(has_scheme("http://host/x.png"));
        assert!(has_scheme("https://host"));
        assert!(has_scheme("data:image/png;base64,AAAA"));
        assert!(!has_scheme("images/x.png"));
        assert!(!has_scheme("/api/files"));
        assert!(!has_scheme("localhost:9000/blog-images/x.png"));
    }

    #[test]
    fn test_starts_with_segment() {
        assert!(starts_with_segment("/api/files", "/api"));
        assert!(starts_with_segment("/api", "/api"));
        assert!(!starts_with_segment("/apiary/x.png", "/api"));
        assert!(!starts_with_segment("/api", ""));
    }
}
