use super::fallback;
use crate::errors::ApiError;
use serde_json::Value;

/// Upload response reduced to the reference plus whatever metadata it carried
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadResponse {
    pub raw_reference: String,
    pub file_path: Option<String>,
    pub original_name: Option<String>,
    pub mime_type: Option<String>,
    pub size: Option<u64>,
}

fn text(object: Option<&Value>, key: &str) -> Option<String> {
    object
        .and_then(|o| o.get(key))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Accepts integer sizes and the numeric strings some backends send.
fn size(object: Option<&Value>) -> Option<u64> {
    match object.and_then(|o| o.get("size"))? {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Typed extraction first: bare string, `url`, `file_path`, `file.file_path`.
/// Only when all of those are absent does the field scan run. Each field is
/// read on its own, so a metadata field of the wrong type never hides the
/// reference.
pub fn parse_upload_response(body: &Value) -> Result<UploadResponse, ApiError> {
    if let Value::String(reference) = body {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(ApiError::MissingUrl);
        }
        return Ok(UploadResponse {
            raw_reference: reference.to_string(),
            ..Default::default()
        });
    }

    let top = body.as_object().map(|_| body);
    let nested = top.and_then(|b| b.get("file")).filter(|f| f.is_object());

    let url = text(top, "url");
    let file_path = text(top, "file_path").or_else(|| text(nested, "file_path"));

    let raw_reference = match url.or_else(|| file_path.clone()) {
        Some(reference) => reference,
        None => fallback::find_reference(body).ok_or(ApiError::MissingUrl)?,
    };

    Ok(UploadResponse {
        raw_reference,
        file_path,
        original_name: text(top, "original_name").or_else(|| text(nested, "original_name")),
        mime_type: text(top, "mime_type").or_else(|| text(nested, "mime_type")),
        size: size(top).or_else(|| size(nested)),
    })
}
