//! Last-resort reference scan for upload responses that match none of the
//! documented shapes. Every hit is logged so backend drift stays visible.

use serde_json::{Map, Value};

const PREFERRED_KEYS: [&str; 4] = ["url", "path", "file_path", "filePath"];

pub(super) fn find_reference(body: &Value) -> Option<String> {
    let found = match body {
        Value::Object(map) => scan_object(map),
        Value::Array(values) => values.iter().find_map(find_reference),
        _ => None,
    };

    if let Some(reference) = &found {
        tracing::warn!("Upload response matched no known shape, scanned out reference {}", reference);
    }
    found
}

fn scan_object(map: &Map<String, Value>) -> Option<String> {
    for key in PREFERRED_KEYS {
        if let Some(value) = map.get(key).and_then(Value::as_str) {
            if !value.trim().is_empty() {
                return Some(value.to_string());
            }
        }
    }

    for value in map.values() {
        if let Some(value) = value.as_str() {
            if looks_like_reference(value) {
                return Some(value.to_string());
            }
        }
    }

    map.values().find_map(|value| match value {
        Value::Object(inner) => scan_object(inner),
        Value::Array(values) => values.iter().find_map(|v| v.as_object().and_then(scan_object)),
        _ => None,
    })
}

fn looks_like_reference(value: &str) -> bool {
    value.contains('/') || value.starts_with("http")
}
