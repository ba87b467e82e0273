use crate::errors::ApiError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Post and category lists arrive as a bare array, or as `items` / `data`
/// (itself possibly `{items}`). Malformed entries are skipped.
pub fn parse_entries<T: DeserializeOwned>(body: &Value) -> Vec<T> {
    let entries = body
        .as_array()
        .or_else(|| body.get("items").and_then(Value::as_array))
        .or_else(|| body.get("data").and_then(Value::as_array))
        .or_else(|| {
            body.get("data")
                .and_then(|d| d.get("items"))
                .and_then(Value::as_array)
        });

    let Some(entries) = entries else {
        tracing::warn!("List response is not an array and has no items");
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match serde_json::from_value(entry.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("Skipping malformed entry: {}", e);
                None
            }
        })
        .collect()
}

/// Single entry, bare or wrapped in `data`
pub fn parse_entry<T: DeserializeOwned>(body: &Value) -> Result<T, ApiError> {
    let target = match body.get("data") {
        Some(data) if data.is_object() => data,
        _ => body,
    };
    Ok(serde_json::from_value(target.clone())?)
}
