use crate::errors::ApiError;
use quill_models::{FilePage, FileResource};
use serde_json::Value;

/// Reconciles the two list shapes the backend produces into one page:
/// `{items, meta: {total}}` or `{data: {items, meta: {total}}}`.
/// Anything else degrades to an empty page.
pub fn parse_file_page(body: &Value) -> FilePage {
    let (items, meta) = match body.get("items").and_then(Value::as_array) {
        Some(items) => (items, body.get("meta")),
        None => {
            let data = body.get("data");
            match data.and_then(|d| d.get("items")).and_then(Value::as_array) {
                Some(items) => (items, data.and_then(|d| d.get("meta"))),
                None => {
                    tracing::warn!("File list response has neither items nor data.items");
                    return FilePage::default();
                }
            }
        }
    };

    let items: Vec<FileResource> = items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(resource) => Some(resource),
            Err(e) => {
                tracing::warn!("Skipping malformed file entry: {}", e);
                None
            }
        })
        .collect();

    let total = meta
        .and_then(|m| m.get("total"))
        .and_then(Value::as_u64)
        .unwrap_or(items.len() as u64);

    FilePage { items, total }
}

/// Single resource, bare or wrapped in `data`
pub fn parse_file_resource(body: &Value) -> Result<FileResource, ApiError> {
    let target = match body.get("data") {
        Some(data) if data.is_object() => data,
        _ => body,
    };
    Ok(serde_json::from_value(target.clone())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_top_level_shape() {
        let page = parse_file_page(&json!({
            "items": [{"id": 1, "original_name": "a.png"}, {"id": 2}],
            "meta": {"total": 12}
        }));
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 12);
    }

    #[test]
    fn test_nested_shape() {
        let page = parse_file_page(&json!({
            "data": {"items": [{"id": 5}], "meta": {"total": 1}}
        }));
        assert_eq!(page.items[0].id, 5);
        assert_eq!(page.total, 1);
    }

    #[test]
    fn test_total_falls_back_to_item_count() {
        let page = parse_file_page(&json!({"items": [{"id": 1}, {"id": 2}, {"id": 3}]}));
        assert_eq!(page.total, 3);
    }

    #[test]
    fn test_unknown_shape_is_empty() {
        assert_eq!(parse_file_page(&json!({"rows": [{"id": 1}]})), FilePage::default());
        assert_eq!(parse_file_page(&json!("nope")), FilePage::default());
        assert_eq!(parse_file_page(&Value::Null), FilePage::default());
    }

    #[test]
    fn test_malformed_entries_skipped() {
        let page = parse_file_page(&json!({"items": [{"id": "x"}, {"id": 4}]}));
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, 4);
    }

    #[test]
    fn test_single_resource_shapes() {
        assert_eq!(parse_file_resource(&json!({"id": 9})).unwrap().id, 9);
        assert_eq!(parse_file_resource(&json!({"data": {"id": 10}})).unwrap().id, 10);
        assert!(matches!(parse_file_resource(&json!({"ok": true})), Err(ApiError::Decode(_))));
    }
}
