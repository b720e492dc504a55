/*
[INPUT]:  wiremock server
[OUTPUT]: Clients wired to mock servers for unit tests
[POS]:    Test infrastructure - shared by in-crate test modules
[UPDATE]: When test wiring changes
*/

use wiremock::MockServer;

use crate::http::{AuthMode, Credentials, GovernanceClient};

pub(crate) const TIMESTAMP: &str = "2026-01-15T10:30:00Z";

/// Start a mock server and a bearer-authenticated client pointed at it
pub(crate) async fn mock_client() -> (MockServer, GovernanceClient) {
    let server = MockServer::start().await;
    let client = GovernanceClient::with_base_url(&server.uri())
        .expect("client init")
        .with_auth(AuthMode::Bearer(
            Credentials::new("test-token").with_tenant("tenant-1"),
        ));
    (server, client)
}

/// Body of the only request the server received, as JSON
pub(crate) async fn single_request_body(server: &MockServer) -> Option<serde_json::Value> {
    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1, "expected exactly one request");
    if requests[0].body.is_empty() {
        None
    } else {
        Some(serde_json::from_slice(&requests[0].body).expect("json body"))
    }
}
