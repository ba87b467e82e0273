use crate::errors::ApiError;
use bytes::Bytes;
use quill_config::ApiSettings;
use quill_events::EventBus;
use quill_session::Session;
use quill_utils::{has_scheme, join_url, trim_base};
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

type Result<T> = std::result::Result<T, ApiError>;

/// Shared HTTP layer: resolves routes against the API root, attaches the
/// session's bearer token and routes failures through the interceptor.
pub struct HttpClient {
    client: reqwest::Client,
    origin: String,
    base_path: String,
    pub(super) session: Arc<Session>,
    pub(super) events: Arc<EventBus>,
}

impl HttpClient {
    pub fn new(api: &ApiSettings, session: Arc<Session>, events: Arc<EventBus>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            origin: trim_base(&api.base_url),
            base_path: trim_base(&api.base_path),
            session,
            events,
        })
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    /// Absolute URL of an API route (`/files` → `http://host/api/files`)
    pub fn endpoint(&self, route: &str) -> String {
        join_url(&format!("{}{}", self.origin, self.base_path), route)
    }

    /// Absolute URL of a normalized reference (`/api/files/proxy/..`)
    pub fn resolve(&self, url: &str) -> String {
        if has_scheme(url) {
            url.to_string()
        } else {
            join_url(&self.origin, url)
        }
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get(&self, route: &str) -> Result<Value> {
        let builder = self.request(Method::GET, &self.endpoint(route));
        self.send_for_body(builder, route).await
    }

    pub async fn get_with_query<Q: Serialize + ?Sized>(&self, route: &str, query: &Q) -> Result<Value> {
        let builder = self.request(Method::GET, &self.endpoint(route)).query(query);
        self.send_for_body(builder, route).await
    }

    pub async fn post_json<B: Serialize + ?Sized>(&self, route: &str, body: &B) -> Result<Value> {
        let builder = self.request(Method::POST, &self.endpoint(route)).json(body);
        self.send_for_body(builder, route).await
    }

    pub async fn patch_json<B: Serialize + ?Sized>(&self, route: &str, body: &B) -> Result<Value> {
        let builder = self.request(Method::PATCH, &self.endpoint(route)).json(body);
        self.send_for_body(builder, route).await
    }

    pub async fn put_json<B: Serialize + ?Sized>(&self, route: &str, body: &B) -> Result<Value> {
        let builder = self.request(Method::PUT, &self.endpoint(route)).json(body);
        self.send_for_body(builder, route).await
    }

    pub async fn delete(&self, route: &str) -> Result<Value> {
        let builder = self.request(Method::DELETE, &self.endpoint(route));
        self.send_for_body(builder, route).await
    }

    pub async fn post_multipart(&self, route: &str, form: Form) -> Result<Value> {
        let builder = self.request(Method::POST, &self.endpoint(route)).multipart(form);
        self.send_for_body(builder, route).await
    }

    /// Raw download of an already-normalized reference
    pub async fn get_bytes(&self, url: &str) -> Result<Bytes> {
        let resolved = self.resolve(url);
        let response = self.send(self.request(Method::GET, &resolved), url).await?;
        Ok(response.bytes().await?)
    }

    async fn send_for_body(&self, builder: RequestBuilder, route: &str) -> Result<Value> {
        let response = self.send(builder, route).await?;
        let text = response.text().await?;
        Ok(parse_body(&text))
    }

    async fn send(&self, builder: RequestBuilder, route: &str) -> Result<Response> {
        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => return Err(self.connection_failed(e, route)),
        };

        let status = response.status();
        tracing::debug!("{} -> {}", route, status);

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.map(|t| parse_body(&t)).unwrap_or(Value::Null);
        Err(self.reject(status.as_u16(), route, &body).await)
    }
}

/// JSON when it parses, the raw text otherwise, `Null` for an empty body
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_storage::MemoryStore;

    fn client(base_url: &str, base_path: &str) -> HttpClient {
        let events = EventBus::new(true);
        let session = Session::new(Arc::new(MemoryStore::new()), Arc::clone(&events), vec![]);
        let api = ApiSettings {
            base_url: base_url.to_string(),
            base_path: base_path.to_string(),
            timeout_secs: 5,
        };
        HttpClient::new(&api, session, events).unwrap()
    }

    #[test]
    fn test_endpoint_joins_root_and_route() {
        let http = client("http://localhost:3000/", "/api");
        assert_eq!(http.endpoint("/files"), "http://localhost:3000/api/files");
        assert_eq!(http.endpoint("files/7"), "http://localhost:3000/api/files/7");
    }

    #[test]
    fn test_resolve_normalized_reference() {
        let http = client("http://localhost:3000", "/api");
        assert_eq!(
            http.resolve("/api/files/proxy/blog-images/x.png"),
            "http://localhost:3000/api/files/proxy/blog-images/x.png"
        );
        assert_eq!(http.resolve("https://cdn.example.com/x.png"), "https://cdn.example.com/x.png");
    }

    #[test]
    fn test_parse_body_variants() {
        assert_eq!(parse_body(""), Value::Null);
        assert_eq!(parse_body("/uploads/x.png"), Value::String("/uploads/x.png".to_string()));
        assert_eq!(parse_body(r#""quoted""#), Value::String("quoted".to_string()));
        assert_eq!(parse_body(r#"{"url":"u"}"#)["url"], "u");
    }
}
