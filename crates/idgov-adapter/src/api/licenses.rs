/*
[INPUT]:  License pool/assignment identifiers, filters and payloads
[OUTPUT]: License pools and assignments
[POS]:    API layer - governance license endpoints
[UPDATE]: When adding license endpoints or changing payloads
*/

use reqwest::Method;

use crate::http::{GovernanceClient, Result, build_query, encode_segment};
use crate::types::{
    AssignLicenseRequest, CreateLicensePool, LicenseAssignment, LicensePool, LicensePoolFilter,
    PageParams, Paginated, UpdateLicensePool,
};

const POOLS_PATH: &str = "/api/governance/licenses/pools";

fn pool_path(id: &str) -> String {
    format!("{POOLS_PATH}/{}", encode_segment(id))
}

impl GovernanceClient {
    pub async fn list_license_pools(
        &self,
        filter: &LicensePoolFilter,
    ) -> Result<Paginated<LicensePool>> {
        let endpoint = format!("{POOLS_PATH}{}", build_query(filter)?);
        let request = self.request(Method::GET, &endpoint, "fetch license pools");
        self.send_json(request).await
    }

    pub async fn get_license_pool(&self, id: &str) -> Result<LicensePool> {
        let request = self.request(Method::GET, &pool_path(id), "fetch license pool");
        self.send_json(request).await
    }

    pub async fn create_license_pool(&self, body: &CreateLicensePool) -> Result<LicensePool> {
        let request = self
            .request(Method::POST, POOLS_PATH, "create license pool")
            .json(body)?;
        self.send_json(request).await
    }

    pub async fn update_license_pool(
        &self,
        id: &str,
        body: &UpdateLicensePool,
    ) -> Result<LicensePool> {
        let request = self
            .request(Method::PUT, &pool_path(id), "update license pool")
            .json(body)?;
        self.send_json(request).await
    }

    pub async fn delete_license_pool(&self, id: &str) -> Result<()> {
        let request = self.request(Method::DELETE, &pool_path(id), "delete license pool");
        self.send_empty(request).await
    }

    /// POST /api/governance/licenses/pools/{id}/archive
    pub async fn archive_license_pool(&self, id: &str) -> Result<Option<LicensePool>> {
        let endpoint = format!("{}/archive", pool_path(id));
        let request = self.request(Method::POST, &endpoint, "archive license pool");
        self.send_action(request).await
    }

    /// GET /api/governance/licenses/pools/{pool_id}/assignments?limit=&offset=
    pub async fn list_license_assignments(
        &self,
        pool_id: &str,
        page: &PageParams,
    ) -> Result<Paginated<LicenseAssignment>> {
        let endpoint = format!("{}/assignments{}", pool_path(pool_id), build_query(page)?);
        let request = self.request(Method::GET, &endpoint, "fetch license assignments");
        self.send_json(request).await
    }

    /// POST /api/governance/licenses/pools/{pool_id}/assignments
    pub async fn assign_license(
        &self,
        pool_id: &str,
        body: &AssignLicenseRequest,
    ) -> Result<LicenseAssignment> {
        let endpoint = format!("{}/assignments", pool_path(pool_id));
        let request = self
            .request(Method::POST, &endpoint, "assign license")
            .json(body)?;
        self.send_json(request).await
    }

    /// DELETE /api/governance/licenses/pools/{pool_id}/assignments/{assignment_id}
    pub async fn revoke_license_assignment(
        &self,
        pool_id: &str,
        assignment_id: &str,
    ) -> Result<()> {
        let endpoint = format!(
            "{}/assignments/{}",
            pool_path(pool_id),
            encode_segment(assignment_id)
        );
        let request = self.request(Method::DELETE, &endpoint, "revoke license assignment");
        self.send_empty(request).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{TIMESTAMP, mock_client};
    use crate::types::{AssignLicenseRequest, LicensePoolStatus, LicenseType, PageParams};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    #[tokio::test]
    async fn test_archive_pool() {
        let (server, client) = mock_client().await;
        Mock::given(method("POST"))
            .and(path("/api/governance/licenses/pools/pool-1/archive"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "pool-1",
                "name": "Office E3",
                "vendor": "Microsoft",
                "total_capacity": 100,
                "allocated_count": 120,
                "license_type": "named",
                "status": "archived",
                "created_at": TIMESTAMP,
                "updated_at": TIMESTAMP
            })))
            .expect(1)
            .mount(&server)
            .await;

        let pool = client
            .archive_license_pool("pool-1")
            .await
            .expect("archive failed")
            .expect("empty response body");
        assert_eq!(pool.status, LicensePoolStatus::Archived);
        assert_eq!(pool.license_type, LicenseType::Named);
        assert_eq!(pool.available(), 0);
    }

    #[tokio::test]
    async fn test_assignments_roundtrip() {
        let (server, client) = mock_client().await;
        Mock::given(method("GET"))
            .and(path("/api/governance/licenses/pools/pool-1/assignments"))
            .and(query_param("limit", "10"))
            .and(query_param("offset", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [],
                "total": 0,
                "limit": 10,
                "offset": 0
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/governance/licenses/pools/pool-1/assignments"))
            .and(body_json(json!({"user_id": "user-3"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "asg-1",
                "pool_id": "pool-1",
                "user_id": "user-3",
                "assigned_at": TIMESTAMP
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/governance/licenses/pools/pool-1/assignments/asg-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let page = client
            .list_license_assignments("pool-1", &PageParams::new(10, 0))
            .await
            .expect("list failed");
        assert!(page.items.is_empty());

        let assignment = client
            .assign_license(
                "pool-1",
                &AssignLicenseRequest {
                    user_id: "user-3".to_string(),
                    notes: None,
                },
            )
            .await
            .expect("assign failed");
        client
            .revoke_license_assignment("pool-1", &assignment.id)
            .await
            .expect("revoke failed");
    }
}
