/*
[INPUT]:  HTTP configuration (base URL, timeouts, auth mode) and a transport
[OUTPUT]: Configured governance client with JSON/text/void send helpers
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing response interpretation
*/

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::http::transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport};
use crate::http::{GovernanceError, Result};

/// Default backend origin
const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Header carrying the tenant identifier
pub const TENANT_HEADER: &str = "X-Tenant-ID";

/// Header carrying a per-request correlation id
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

const JSON_CONTENT_TYPE: &str = "application/json";

/// Longest plain-text error body surfaced as an error message
const MAX_TEXT_ERROR_LEN: usize = 200;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub tenant_header: String,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            tenant_header: TENANT_HEADER.to_string(),
            user_agent: concat!("idgov-adapter/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Credentials for token-authenticated (server-side) calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub tenant_id: Option<String>,
}

impl Credentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            tenant_id: None,
        }
    }

    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }
}

/// How requests are authenticated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthMode {
    /// No auth headers
    #[default]
    Anonymous,
    /// `Authorization: Bearer` plus optional tenant header
    Bearer(Credentials),
    /// Same-origin BFF proxy; the session cookie carries auth
    Session { cookie: Option<String> },
}

/// A request ready to send, labelled with the operation it performs
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    request: ApiRequest,
    operation: &'static str,
}

impl PreparedRequest {
    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.request.body = Some(serde_json::to_vec(body)?);
        self.request.set_header("Content-Type", JSON_CONTENT_TYPE);
        Ok(self)
    }

    /// Override the `Accept` header
    pub fn accept(mut self, mime: &str) -> Self {
        self.request.set_header("Accept", mime);
        self
    }

    pub fn request(&self) -> &ApiRequest {
        &self.request
    }
}

/// Main HTTP client for the governance API
#[derive(Debug, Clone)]
pub struct GovernanceClient {
    transport: Arc<dyn Transport>,
    auth: AuthMode,
    config: ClientConfig,
}

impl GovernanceClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client with default settings against another origin
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Self::with_config(ClientConfig {
            base_url: base_url.to_string(),
            ..ClientConfig::default()
        })
    }

    /// Create a client over a caller-supplied transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            auth: AuthMode::Anonymous,
            config,
        }
    }

    /// Builder-style auth selection
    pub fn with_auth(mut self, auth: AuthMode) -> Self {
        self.auth = auth;
        self
    }

    pub fn set_auth(&mut self, auth: AuthMode) {
        self.auth = auth;
    }

    pub fn auth(&self) -> &AuthMode {
        &self.auth
    }

    /// Switch to bearer auth with the given credentials
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.auth = AuthMode::Bearer(credentials);
    }

    /// Get credentials if bearer auth is configured
    pub fn credentials(&self) -> Option<&Credentials> {
        match &self.auth {
            AuthMode::Bearer(credentials) => Some(credentials),
            _ => None,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL for a relative endpoint
    pub fn url_for(&self, endpoint: &str) -> Result<Url> {
        let base = self.config.base_url.trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{endpoint}"))?)
    }

    /// Start a request for `endpoint`, labelled for error messages
    pub(crate) fn request(
        &self,
        method: Method,
        endpoint: &str,
        operation: &'static str,
    ) -> PreparedRequest {
        let mut request = ApiRequest::new(method, endpoint);
        request.set_header("Accept", JSON_CONTENT_TYPE);
        PreparedRequest { request, operation }
    }

    /// Send and parse the JSON body. An empty body parses as `null`.
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, prepared: PreparedRequest) -> Result<T> {
        let response = self.dispatch(prepared).await?;
        if response.is_empty() {
            return Ok(serde_json::from_value(serde_json::Value::Null)?);
        }
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// Send an action call. An empty 2xx body (204 included) is `None`.
    pub(crate) async fn send_action<T: DeserializeOwned>(
        &self,
        prepared: PreparedRequest,
    ) -> Result<Option<T>> {
        let response = self.dispatch(prepared).await?;
        if response.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&response.body)?))
    }

    /// Send and discard the body
    pub(crate) async fn send_empty(&self, prepared: PreparedRequest) -> Result<()> {
        self.dispatch(prepared).await?;
        Ok(())
    }

    /// Send and return the body as UTF-8 text
    pub(crate) async fn send_text(&self, prepared: PreparedRequest) -> Result<String> {
        let response = self.dispatch(prepared).await?;
        String::from_utf8(response.body)
            .map_err(|err| GovernanceError::InvalidResponse(format!("body is not UTF-8: {err}")))
    }

    /// Send and parse the JSON body, mapping 404 to `None`
    pub(crate) async fn send_optional_json<T: DeserializeOwned>(
        &self,
        prepared: PreparedRequest,
    ) -> Result<Option<T>> {
        match self.send_json(prepared).await {
            Ok(value) => Ok(value),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn dispatch(&self, prepared: PreparedRequest) -> Result<ApiResponse> {
        let PreparedRequest {
            mut request,
            operation,
        } = prepared;
        self.apply_auth(&mut request);
        let request_id = Uuid::new_v4().to_string();
        request.set_header(REQUEST_ID_HEADER, request_id.clone());

        let method = request.method.clone();
        let path = request.path.clone();
        debug!(%method, %path, %request_id, operation, "sending request");

        let response = self.transport.execute(request).await?;
        if response.is_success() {
            return Ok(response);
        }

        let status = response.status;
        let message = server_message(&response.body)
            .unwrap_or_else(|| format!("Failed to {operation}: {}", status.as_u16()));
        warn!(%method, %path, %request_id, status = status.as_u16(), %message, "request failed");
        Err(GovernanceError::api_error(status, message))
    }

    fn apply_auth(&self, request: &mut ApiRequest) {
        match &self.auth {
            AuthMode::Anonymous => {}
            AuthMode::Bearer(credentials) => {
                request.set_header("Authorization", format!("Bearer {}", credentials.token));
                if let Some(tenant_id) = &credentials.tenant_id {
                    request.set_header(&self.config.tenant_header, tenant_id.clone());
                }
            }
            AuthMode::Session { cookie } => {
                if let Some(cookie) = cookie {
                    request.set_header("Cookie", cookie.clone());
                }
            }
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// Recognises `{"error": ".."}`, `{"error": {"message": ".."}}`,
/// `{"message": ".."}` and `{"detail": ".."}`, plus short plain-text bodies.
fn server_message(body: &[u8]) -> Option<String> {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        let candidates = [
            value.get("error").and_then(|error| error.as_str()),
            value
                .get("error")
                .and_then(|error| error.get("message"))
                .and_then(|message| message.as_str()),
            value.get("message").and_then(|message| message.as_str()),
            value.get("detail").and_then(|detail| detail.as_str()),
        ];
        return candidates
            .into_iter()
            .flatten()
            .find(|message| !message.trim().is_empty())
            .map(str::to_string);
    }

    let text = std::str::from_utf8(body).ok()?.trim();
    if text.is_empty() || text.starts_with('<') || text.len() > MAX_TEXT_ERROR_LEN {
        return None;
    }
    Some(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GovernanceClient {
        GovernanceClient::with_base_url(&server.uri()).expect("client init")
    }

    #[test]
    fn test_server_message_shapes() {
        assert_eq!(
            server_message(br#"{"error":"pool is full"}"#).as_deref(),
            Some("pool is full")
        );
        assert_eq!(
            server_message(br#"{"error":{"code":"E1","message":"nested"}}"#).as_deref(),
            Some("nested")
        );
        assert_eq!(
            server_message(br#"{"detail":"not allowed"}"#).as_deref(),
            Some("not allowed")
        );
        assert_eq!(server_message(br#"{"code":42}"#), None);
        assert_eq!(server_message(b"upstream timeout").as_deref(), Some("upstream timeout"));
        assert_eq!(server_message(b"<html>oops</html>"), None);
        assert_eq!(server_message(b""), None);
    }

    #[test]
    fn test_url_for() {
        let client = GovernanceClient::with_base_url("https://gov.example.com/").unwrap();
        assert_eq!(
            client.url_for("/api/admin/siem/export?format=csv").unwrap().as_str(),
            "https://gov.example.com/api/admin/siem/export?format=csv"
        );
    }

    #[tokio::test]
    async fn test_bearer_headers_attached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ping"))
            .and(header("authorization", "Bearer tok-1"))
            .and(header("x-tenant-id", "tenant-a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).with_auth(AuthMode::Bearer(
            Credentials::new("tok-1").with_tenant("tenant-a"),
        ));
        let body: serde_json::Value = client
            .send_json(client.request(Method::GET, "/api/ping", "ping"))
            .await
            .expect("ping failed");
        assert_eq!(body, serde_json::json!({"ok": true}));
    }

    #[tokio::test]
    async fn test_session_mode_sends_cookie_only() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ping"))
            .and(header("cookie", "session=abc"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).with_auth(AuthMode::Session {
            cookie: Some("session=abc".to_string()),
        });
        client
            .send_empty(client.request(Method::GET, "/api/ping", "ping"))
            .await
            .expect("ping failed");

        let received = server.received_requests().await.expect("recording enabled");
        assert!(received[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_empty_body_parses_as_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/noop"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let value: Option<serde_json::Value> = client
            .send_json(client.request(Method::POST, "/api/noop", "noop"))
            .await
            .expect("noop failed");
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_error_uses_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/thing"))
            .respond_with(
                ResponseTemplate::new(409).set_body_json(serde_json::json!({"message": "in use"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .send_empty(client.request(Method::DELETE, "/api/thing", "delete thing"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.to_string(), "in use");
    }

    #[tokio::test]
    async fn test_error_falls_back_to_operation_label() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/thing"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .send_empty(client.request(Method::GET, "/api/thing", "fetch thing"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch thing: 502");
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_optional_json_maps_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/maybe"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let value: Option<serde_json::Value> = client
            .send_optional_json(client.request(Method::GET, "/api/maybe", "fetch maybe"))
            .await
            .expect("404 should map to None");
        assert!(value.is_none());
    }
}
