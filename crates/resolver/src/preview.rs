use chrono::Utc;

/// Appends a `t=<millis>` parameter so previews bypass cached copies
pub fn with_cache_buster(url: &str) -> String {
    with_timestamp(url, Utc::now().timestamp_millis())
}

fn with_timestamp(url: &str, millis: i64) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}t={}", url, separator, millis)
}
