/*
[INPUT]:  Access request identifiers, filters and decision payloads
[OUTPUT]: Access request records
[POS]:    API layer - governance access request endpoints
[UPDATE]: When adding access request endpoints or changing payloads
*/

use reqwest::Method;

use crate::http::{GovernanceClient, Result, build_query, encode_segment};
use crate::types::{
    AccessRequest, AccessRequestFilter, CreateAccessRequest, DecisionRequest, Paginated,
};

const ACCESS_REQUESTS_PATH: &str = "/api/governance/access-requests";

fn access_request_path(id: &str) -> String {
    format!("{ACCESS_REQUESTS_PATH}/{}", encode_segment(id))
}

impl GovernanceClient {
    /// GET /api/governance/access-requests?status=&requester_id=&entitlement_id=&limit=&offset=
    pub async fn list_access_requests(
        &self,
        filter: &AccessRequestFilter,
    ) -> Result<Paginated<AccessRequest>> {
        let endpoint = format!("{ACCESS_REQUESTS_PATH}{}", build_query(filter)?);
        let request = self.request(Method::GET, &endpoint, "fetch access requests");
        self.send_json(request).await
    }

    /// GET /api/governance/access-requests/{id}
    pub async fn get_access_request(&self, id: &str) -> Result<AccessRequest> {
        let request = self.request(
            Method::GET,
            &access_request_path(id),
            "fetch access request",
        );
        self.send_json(request).await
    }

    /// POST /api/governance/access-requests
    pub async fn create_access_request(&self, body: &CreateAccessRequest) -> Result<AccessRequest> {
        let request = self
            .request(Method::POST, ACCESS_REQUESTS_PATH, "create access request")
            .json(body)?;
        self.send_json(request).await
    }

    /// Withdraw a pending request
    ///
    /// POST /api/governance/access-requests/{id}/cancel
    pub async fn cancel_access_request(&self, id: &str) -> Result<Option<AccessRequest>> {
        let endpoint = format!("{}/cancel", access_request_path(id));
        let request = self.request(Method::POST, &endpoint, "cancel access request");
        self.send_action(request).await
    }

    /// POST /api/governance/access-requests/{id}/approve
    pub async fn approve_access_request(
        &self,
        id: &str,
        body: &DecisionRequest,
    ) -> Result<Option<AccessRequest>> {
        let endpoint = format!("{}/approve", access_request_path(id));
        let request = self
            .request(Method::POST, &endpoint, "approve access request")
            .json(body)?;
        self.send_action(request).await
    }

    /// POST /api/governance/access-requests/{id}/reject
    pub async fn reject_access_request(
        &self,
        id: &str,
        body: &DecisionRequest,
    ) -> Result<Option<AccessRequest>> {
        let endpoint = format!("{}/reject", access_request_path(id));
        let request = self
            .request(Method::POST, &endpoint, "reject access request")
            .json(body)?;
        self.send_action(request).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{TIMESTAMP, mock_client};
    use crate::types::{AccessRequestFilter, AccessRequestStatus, DecisionRequest};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    fn request_json(status: &str) -> serde_json::Value {
        json!({
            "id": "ar-1",
            "requester_id": "user-1",
            "entitlement_id": "ent-5",
            "entitlement_name": "Finance Read",
            "justification": "quarter close",
            "status": status,
            "created_at": TIMESTAMP,
            "updated_at": TIMESTAMP
        })
    }

    #[tokio::test]
    async fn test_list_access_requests_by_status() {
        let (server, client) = mock_client().await;
        Mock::given(method("GET"))
            .and(path("/api/governance/access-requests"))
            .and(query_param("status", "pending"))
            .and(query_param("offset", "40"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [request_json("pending")],
                "total": 41,
                "limit": 20,
                "offset": 40
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client
            .list_access_requests(&AccessRequestFilter {
                status: Some(AccessRequestStatus::Pending),
                offset: Some(40),
                ..Default::default()
            })
            .await
            .expect("list_access_requests failed");
        assert_eq!(page.total, 41);
        assert_eq!(page.items[0].status, AccessRequestStatus::Pending);
    }

    #[tokio::test]
    async fn test_approve_and_reject() {
        let (server, client) = mock_client().await;
        Mock::given(method("POST"))
            .and(path("/api/governance/access-requests/ar-1/approve"))
            .and(body_json(json!({"comments": "ok"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(request_json("approved")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/governance/access-requests/ar-2/reject"))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(200).set_body_json(request_json("rejected")))
            .expect(1)
            .mount(&server)
            .await;

        let approved = client
            .approve_access_request(
                "ar-1",
                &DecisionRequest {
                    comments: Some("ok".to_string()),
                },
            )
            .await
            .expect("approve failed")
            .expect("empty response body");
        assert_eq!(approved.status, AccessRequestStatus::Approved);

        let rejected = client
            .reject_access_request("ar-2", &DecisionRequest::default())
            .await
            .expect("reject failed")
            .expect("empty response body");
        assert_eq!(rejected.status, AccessRequestStatus::Rejected);
    }

    #[tokio::test]
    async fn test_cancel_accepts_canceled_spelling() {
        let (server, client) = mock_client().await;
        Mock::given(method("POST"))
            .and(path("/api/governance/access-requests/ar-1/cancel"))
            .respond_with(ResponseTemplate::new(200).set_body_json(request_json("canceled")))
            .expect(1)
            .mount(&server)
            .await;

        let cancelled = client
            .cancel_access_request("ar-1")
            .await
            .expect("cancel failed")
            .expect("empty response body");
        assert_eq!(cancelled.status, AccessRequestStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_get_missing_request_is_not_found() {
        let (server, client) = mock_client().await;
        Mock::given(method("GET"))
            .and(path("/api/governance/access-requests/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client.get_access_request("missing").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Failed to fetch access request: 404");
    }
}
