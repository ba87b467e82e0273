use quill_session::SessionError;
use quill_utils::megabytes;
use thiserror::Error;

/// Local, pre-network rejection of a candidate upload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("File is {} MB, the limit is {} MB", megabytes(*size), megabytes(*limit))]
    TooLarge { size: u64, limit: u64 },

    #[error("Unsupported file type '{mime_type}', allowed types: {}", allowed.join(", "))]
    UnsupportedType {
        mime_type: String,
        allowed: Vec<String>,
    },

    #[error("Malformed file type '{mime_type}'")]
    MalformedType { mime_type: String },
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Upload response did not contain a file reference")]
    MissingUrl,

    /// Network or backend failure. `status` is `None` when no response arrived.
    #[error("{message}")]
    Transport { status: Option<u16>, message: String },

    #[error("Invalid file reference: {0}")]
    InvalidReference(String),

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_large_message_shows_megabytes() {
        let err = ValidationError::TooLarge {
            size: 3 * 1024 * 1024,
            limit: 2 * 1024 * 1024,
        };
        assert_eq!(err.to_string(), "File is 3 MB, the limit is 2 MB");
    }

    #[test]
    fn test_unsupported_type_lists_every_allowed_type() {
        let err = ValidationError::UnsupportedType {
            mime_type: "text/plain".to_string(),
            allowed: vec!["image/png".to_string(), "image/jpeg".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("text/plain"));
        assert!(message.contains("image/png"));
        assert!(message.contains("image/jpeg"));
    }
}
