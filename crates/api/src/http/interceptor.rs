use super::client::HttpClient;
use crate::errors::ApiError;
use quill_events::AppEvent;
use serde_json::Value;

impl HttpClient {
    /// Maps a non-success response to an error and raises the matching notification.
    /// A 401 expires the session unless it is already on a login screen.
    pub(super) async fn reject(&self, status: u16, route: &str, body: &Value) -> ApiError {
        let message = backend_message(body)
            .unwrap_or_else(|| format!("request failed with status {}", status));

        tracing::warn!("Request {} failed ({}): {}", route, status, message);

        match status {
            401 => {
                self.session.expire().await;
            }
            403 => self.events.emit(AppEvent::Forbidden {
                path: route.to_string(),
            }),
            404 => self.events.emit(AppEvent::NotFound {
                path: route.to_string(),
            }),
            500..=599 => self.events.emit(AppEvent::ServerError {
                status,
                message: message.clone(),
            }),
            _ => self.events.emit(AppEvent::RequestFailed {
                status,
                message: message.clone(),
            }),
        }

        ApiError::Transport {
            status: Some(status),
            message,
        }
    }

    pub(super) fn connection_failed(&self, err: reqwest::Error, route: &str) -> ApiError {
        tracing::error!("No response from {}: {}", route, err);
        self.events.emit(AppEvent::ConnectionFailed {
            path: route.to_string(),
        });

        ApiError::Transport {
            status: None,
            message: err.to_string(),
        }
    }
}

/// Backend-supplied error text: `message` (string or list) or `error`
pub fn backend_message(body: &Value) -> Option<String> {
    if let Value::String(text) = body {
        let text = text.trim();
        return (!text.is_empty()).then(|| text.to_string());
    }

    match body.get("message") {
        Some(Value::String(message)) if !message.is_empty() => return Some(message.clone()),
        Some(Value::Array(parts)) => {
            let parts: Vec<&str> = parts.iter().filter_map(Value::as_str).collect();
            if !parts.is_empty() {
                return Some(parts.join(", "));
            }
        }
        _ => {}
    }

    body.get("error")
        .and_then(Value::as_str)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
}
