/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for idgov-adapter tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use idgov_adapter::{
    ApiRequest, ApiResponse, AuthMode, ClientConfig, Credentials, GovernanceClient, Result,
    Transport,
};
use reqwest::StatusCode;
use wiremock::MockServer;

pub const TIMESTAMP: &str = "2026-01-15T10:30:00Z";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Unsigned JWT carrying `claims`
pub fn jwt_with_claims(claims: serde_json::Value) -> String {
    let header = serde_json::json!({"alg": "RS256", "typ": "JWT"});
    let header_b64 = URL_SAFE_NO_PAD.encode(header.to_string());
    let payload_b64 = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header_b64}.{payload_b64}.test-signature")
}

/// Mock bearer token for a connector admin in `tenant-1`
pub fn mock_token() -> String {
    jwt_with_claims(serde_json::json!({
        "sub": "user-1",
        "tid": "tenant-1",
        "roles": ["connector_admin"],
        "exp": 4102444800i64
    }))
}

/// Bearer-authenticated client pointed at a mock server
pub fn client_for(server: &MockServer) -> GovernanceClient {
    GovernanceClient::with_base_url(&server.uri())
        .expect("client init")
        .with_auth(AuthMode::Bearer(
            Credentials::new(mock_token()).with_tenant("tenant-1"),
        ))
}

/// Transport that records every request and replays queued responses.
///
/// Once the queue is empty it answers `200 {}`.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<ApiRequest>>,
    responses: Mutex<VecDeque<ApiResponse>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_response(&self, response: ApiResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn push_json(&self, status: u16, body: serde_json::Value) {
        let status = StatusCode::from_u16(status).expect("valid status");
        self.push_response(ApiResponse::json(status, &body));
    }

    pub fn push_status(&self, status: u16) {
        let status = StatusCode::from_u16(status).expect("valid status");
        self.push_response(ApiResponse::new(status, Vec::new()));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request recorded")
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        let queued = self.responses.lock().unwrap().pop_front();
        Ok(queued.unwrap_or_else(|| ApiResponse::json(StatusCode::OK, &serde_json::json!({}))))
    }
}

/// Client over a recording transport, in BFF session mode
pub fn recording_client() -> (Arc<RecordingTransport>, GovernanceClient) {
    let transport = RecordingTransport::new();
    let client = GovernanceClient::with_transport(ClientConfig::default(), transport.clone())
        .with_auth(AuthMode::Session { cookie: None });
    (transport, client)
}
