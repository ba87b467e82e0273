use crate::errors::ValidationError;
use quill_models::{LocalFile, UploadConfig, ANDROID_PACKAGE_MIME};

/// Pure pre-flight check, run before any bytes leave the machine.
///
/// An empty allow-list accepts every type. Entries ending in `/` match a
/// whole family (`image/`). When the list admits Android packages, a `.apk`
/// file is accepted whatever type the picker reported for it.
pub fn validate(file: &LocalFile, config: &UploadConfig) -> Result<(), ValidationError> {
    if file.size() > config.max_size_bytes {
        return Err(ValidationError::TooLarge {
            size: file.size(),
            limit: config.max_size_bytes,
        });
    }

    if !mime_allowed(&file.mime_type, &config.allowed_mime_types) && !package_allowed(file, config) {
        return Err(ValidationError::UnsupportedType {
            mime_type: file.mime_type.clone(),
            allowed: config.allowed_mime_types.clone(),
        });
    }

    Ok(())
}

fn package_allowed(file: &LocalFile, config: &UploadConfig) -> bool {
    file.is_android_package() && mime_allowed(ANDROID_PACKAGE_MIME, &config.allowed_mime_types)
}

fn mime_allowed(mime_type: &str, allowed: &[String]) -> bool {
    if allowed.is_empty() {
        return true;
    }

    let mime_type = mime_type.to_ascii_lowercase();
    allowed.iter().any(|entry| {
        let entry = entry.to_ascii_lowercase();
        if entry.ends_with('/') {
            mime_type.starts_with(&entry)
        } else {
            mime_type == entry
        }
    })
}
