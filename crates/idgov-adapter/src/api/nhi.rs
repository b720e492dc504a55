/*
[INPUT]:  NHI identifiers, filters and payloads
[OUTPUT]: Non-human identities and discovery findings
[POS]:    API layer - non-human identity endpoints
[UPDATE]: When adding NHI endpoints or changing payloads
*/

use reqwest::Method;

use crate::http::{GovernanceClient, Result, build_query, encode_segment};
use crate::types::{
    ClaimDiscoveryRequest, CreateNhi, DiscoveryFilter, DiscoveryScan, NhiDiscovery, NhiFilter,
    NonHumanIdentity, Paginated, TriggerDiscoveryRequest, UpdateNhi,
};

const NHI_PATH: &str = "/api/nhi";
const FINDINGS_PATH: &str = "/api/nhi/discovery/findings";

fn nhi_path(id: &str) -> String {
    format!("{NHI_PATH}/{}", encode_segment(id))
}

fn finding_path(id: &str) -> String {
    format!("{FINDINGS_PATH}/{}", encode_segment(id))
}

impl GovernanceClient {
    // ==================== Identities ====================

    /// GET /api/nhi?nhi_type=&lifecycle_state=&owner_id=&search=&limit=&offset=
    pub async fn list_nhi(&self, filter: &NhiFilter) -> Result<Paginated<NonHumanIdentity>> {
        let endpoint = format!("{NHI_PATH}{}", build_query(filter)?);
        let request = self.request(Method::GET, &endpoint, "fetch non-human identities");
        self.send_json(request).await
    }

    pub async fn get_nhi(&self, id: &str) -> Result<NonHumanIdentity> {
        let request = self.request(Method::GET, &nhi_path(id), "fetch non-human identity");
        self.send_json(request).await
    }

    pub async fn create_nhi(&self, body: &CreateNhi) -> Result<NonHumanIdentity> {
        let request = self
            .request(Method::POST, NHI_PATH, "create non-human identity")
            .json(body)?;
        self.send_json(request).await
    }

    /// PATCH /api/nhi/{id}
    pub async fn update_nhi(&self, id: &str, body: &UpdateNhi) -> Result<NonHumanIdentity> {
        let request = self
            .request(Method::PATCH, &nhi_path(id), "update non-human identity")
            .json(body)?;
        self.send_json(request).await
    }

    pub async fn delete_nhi(&self, id: &str) -> Result<()> {
        let request = self.request(Method::DELETE, &nhi_path(id), "delete non-human identity");
        self.send_empty(request).await
    }

    /// POST /api/nhi/{id}/suspend
    pub async fn suspend_nhi(&self, id: &str) -> Result<Option<NonHumanIdentity>> {
        self.nhi_transition(id, "suspend", "suspend non-human identity")
            .await
    }

    /// POST /api/nhi/{id}/reactivate
    pub async fn reactivate_nhi(&self, id: &str) -> Result<Option<NonHumanIdentity>> {
        self.nhi_transition(id, "reactivate", "reactivate non-human identity")
            .await
    }

    /// POST /api/nhi/{id}/archive
    pub async fn archive_nhi(&self, id: &str) -> Result<Option<NonHumanIdentity>> {
        self.nhi_transition(id, "archive", "archive non-human identity")
            .await
    }

    async fn nhi_transition(
        &self,
        id: &str,
        verb: &str,
        operation: &'static str,
    ) -> Result<Option<NonHumanIdentity>> {
        let endpoint = format!("{}/{verb}", nhi_path(id));
        let request = self.request(Method::POST, &endpoint, operation);
        self.send_action(request).await
    }

    // ==================== Discovery ====================

    /// GET /api/nhi/discovery/findings?source=&status=&limit=&offset=
    pub async fn list_nhi_discoveries(
        &self,
        filter: &DiscoveryFilter,
    ) -> Result<Paginated<NhiDiscovery>> {
        let endpoint = format!("{FINDINGS_PATH}{}", build_query(filter)?);
        let request = self.request(Method::GET, &endpoint, "fetch discovery findings");
        self.send_json(request).await
    }

    /// Scan the given sources (all configured sources when empty)
    ///
    /// POST /api/nhi/discovery/scans
    pub async fn trigger_nhi_discovery(
        &self,
        body: &TriggerDiscoveryRequest,
    ) -> Result<DiscoveryScan> {
        let endpoint = format!("{NHI_PATH}/discovery/scans");
        let request = self
            .request(Method::POST, &endpoint, "trigger discovery scan")
            .json(body)?;
        self.send_json(request).await
    }

    /// Turn a finding into a managed identity
    ///
    /// POST /api/nhi/discovery/findings/{id}/claim
    pub async fn claim_nhi_discovery(
        &self,
        id: &str,
        body: &ClaimDiscoveryRequest,
    ) -> Result<Option<NonHumanIdentity>> {
        let endpoint = format!("{}/claim", finding_path(id));
        let request = self
            .request(Method::POST, &endpoint, "claim discovery finding")
            .json(body)?;
        self.send_action(request).await
    }

    /// POST /api/nhi/discovery/findings/{id}/dismiss
    pub async fn dismiss_nhi_discovery(&self, id: &str) -> Result<Option<NhiDiscovery>> {
        let endpoint = format!("{}/dismiss", finding_path(id));
        let request = self.request(Method::POST, &endpoint, "dismiss discovery finding");
        self.send_action(request).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{TIMESTAMP, mock_client, single_request_body};
    use crate::types::{
        ClaimDiscoveryRequest, DiscoveryStatus, JobStatus, NhiFilter, NhiLifecycleState, NhiType,
        TriggerDiscoveryRequest, UpdateNhi,
    };
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    fn nhi_json(state: &str) -> serde_json::Value {
        json!({
            "id": "nhi-1",
            "name": "ci-deployer",
            "nhi_type": "service_account",
            "owner_id": "user-1",
            "lifecycle_state": state,
            "risk_score": 42.0,
            "created_at": TIMESTAMP,
            "updated_at": TIMESTAMP
        })
    }

    #[tokio::test]
    async fn test_list_nhi_filters() {
        let (server, client) = mock_client().await;
        Mock::given(method("GET"))
            .and(path("/api/nhi"))
            .and(query_param("nhi_type", "service_account"))
            .and(query_param("search", "ci deployer"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [nhi_json("active")],
                "total": 1,
                "limit": 20,
                "offset": 0
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client
            .list_nhi(&NhiFilter {
                nhi_type: Some(NhiType::ServiceAccount),
                search: Some("ci deployer".to_string()),
                ..Default::default()
            })
            .await
            .expect("list failed");
        assert_eq!(page.items[0].lifecycle_state, NhiLifecycleState::Active);
    }

    #[tokio::test]
    async fn test_update_is_patch() {
        let (server, client) = mock_client().await;
        Mock::given(method("PATCH"))
            .and(path("/api/nhi/nhi-1"))
            .and(body_json(json!({"owner_id": "user-2"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(nhi_json("active")))
            .expect(1)
            .mount(&server)
            .await;

        client
            .update_nhi(
                "nhi-1",
                &UpdateNhi {
                    owner_id: Some("user-2".to_string()),
                    ..Default::default()
                },
            )
            .await
            .expect("update failed");
    }

    #[tokio::test]
    async fn test_lifecycle_transitions() {
        let (server, client) = mock_client().await;
        for (verb, state) in [
            ("suspend", "suspended"),
            ("reactivate", "active"),
            ("archive", "archived"),
        ] {
            Mock::given(method("POST"))
                .and(path(format!("/api/nhi/nhi-1/{verb}")))
                .respond_with(ResponseTemplate::new(200).set_body_json(nhi_json(state)))
                .expect(1)
                .mount(&server)
                .await;
        }

        let suspended = client
            .suspend_nhi("nhi-1")
            .await
            .expect("suspend failed")
            .expect("empty response body");
        assert_eq!(suspended.lifecycle_state, NhiLifecycleState::Suspended);
        let active = client
            .reactivate_nhi("nhi-1")
            .await
            .expect("reactivate failed")
            .expect("empty response body");
        assert_eq!(active.lifecycle_state, NhiLifecycleState::Active);
        let archived = client
            .archive_nhi("nhi-1")
            .await
            .expect("archive failed")
            .expect("empty response body");
        assert_eq!(archived.lifecycle_state, NhiLifecycleState::Archived);
    }

    #[tokio::test]
    async fn test_transition_error_uses_label() {
        let (server, client) = mock_client().await;
        Mock::given(method("POST"))
            .and(path("/api/nhi/nhi-1/suspend"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client.suspend_nhi("nhi-1").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to suspend non-human identity: 500");
    }

    #[tokio::test]
    async fn test_discovery_scan_with_default_body() {
        let (server, client) = mock_client().await;
        Mock::given(method("POST"))
            .and(path("/api/nhi/discovery/scans"))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "id": "scan-1",
                "status": "pending"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let scan = client
            .trigger_nhi_discovery(&TriggerDiscoveryRequest::default())
            .await
            .expect("scan failed");
        assert_eq!(scan.status, JobStatus::Pending);
        assert_eq!(single_request_body(&server).await, Some(json!({})));
    }

    #[tokio::test]
    async fn test_claim_and_dismiss_findings() {
        let (server, client) = mock_client().await;
        Mock::given(method("POST"))
            .and(path("/api/nhi/discovery/findings/f-1/claim"))
            .and(body_json(json!({"owner_id": "user-1", "nhi_type": "agent"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(nhi_json("active")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/nhi/discovery/findings/f-2/dismiss"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "f-2",
                "source": "aws_iam",
                "external_id": "arn:aws:iam::1:user/bot",
                "display_name": "bot",
                "status": "dismissed",
                "discovered_at": TIMESTAMP
            })))
            .expect(1)
            .mount(&server)
            .await;

        let claimed = client
            .claim_nhi_discovery(
                "f-1",
                &ClaimDiscoveryRequest {
                    owner_id: "user-1".to_string(),
                    name: None,
                    nhi_type: Some(NhiType::Agent),
                },
            )
            .await
            .expect("claim failed")
            .expect("empty response body");
        assert_eq!(claimed.id, "nhi-1");

        let dismissed = client
            .dismiss_nhi_discovery("f-2")
            .await
            .expect("dismiss failed")
            .expect("empty response body");
        assert_eq!(dismissed.status, DiscoveryStatus::Dismissed);
    }
}
