/*
[INPUT]:  SCIM target identifiers, filters and payloads
[OUTPUT]: Outbound SCIM targets, health checks, sync runs and provisioning log
[POS]:    API layer - admin SCIM target endpoints
[UPDATE]: When adding SCIM target endpoints or changing payloads
*/

use reqwest::Method;

use crate::http::{GovernanceClient, Result, build_query, encode_segment};
use crate::types::{
    CreateScimTarget, PageParams, Paginated, ProvisioningLogEntry, ProvisioningLogFilter,
    ScimHealthCheck, ScimSyncRun, ScimTarget, UpdateScimTarget,
};

const SCIM_TARGETS_PATH: &str = "/api/admin/scim-targets";

fn scim_target_path(id: &str) -> String {
    format!("{SCIM_TARGETS_PATH}/{}", encode_segment(id))
}

impl GovernanceClient {
    pub async fn list_scim_targets(&self, page: &PageParams) -> Result<Paginated<ScimTarget>> {
        let endpoint = format!("{SCIM_TARGETS_PATH}{}", build_query(page)?);
        let request = self.request(Method::GET, &endpoint, "fetch SCIM targets");
        self.send_json(request).await
    }

    pub async fn get_scim_target(&self, id: &str) -> Result<ScimTarget> {
        let request = self.request(Method::GET, &scim_target_path(id), "fetch SCIM target");
        self.send_json(request).await
    }

    pub async fn create_scim_target(&self, body: &CreateScimTarget) -> Result<ScimTarget> {
        let request = self
            .request(Method::POST, SCIM_TARGETS_PATH, "create SCIM target")
            .json(body)?;
        self.send_json(request).await
    }

    pub async fn update_scim_target(
        &self,
        id: &str,
        body: &UpdateScimTarget,
    ) -> Result<ScimTarget> {
        let request = self
            .request(Method::PUT, &scim_target_path(id), "update SCIM target")
            .json(body)?;
        self.send_json(request).await
    }

    pub async fn delete_scim_target(&self, id: &str) -> Result<()> {
        let request = self.request(Method::DELETE, &scim_target_path(id), "delete SCIM target");
        self.send_empty(request).await
    }

    /// POST /api/admin/scim-targets/{id}/health-check
    pub async fn check_scim_target_health(&self, id: &str) -> Result<Option<ScimHealthCheck>> {
        let endpoint = format!("{}/health-check", scim_target_path(id));
        let request = self.request(Method::POST, &endpoint, "check SCIM target health");
        self.send_action(request).await
    }

    /// Push every in-scope user and group to the target
    ///
    /// POST /api/admin/scim-targets/{id}/sync
    pub async fn sync_scim_target(&self, id: &str) -> Result<Option<ScimSyncRun>> {
        let endpoint = format!("{}/sync", scim_target_path(id));
        let request = self.request(Method::POST, &endpoint, "sync SCIM target");
        self.send_action(request).await
    }

    /// GET /api/admin/scim-targets/{id}/sync-runs?limit=&offset=
    pub async fn list_scim_sync_runs(
        &self,
        id: &str,
        page: &PageParams,
    ) -> Result<Paginated<ScimSyncRun>> {
        let endpoint = format!("{}/sync-runs{}", scim_target_path(id), build_query(page)?);
        let request = self.request(Method::GET, &endpoint, "fetch SCIM sync runs");
        self.send_json(request).await
    }

    /// GET /api/admin/scim-targets/{id}/log?resource_type=&status=&operation_type=&limit=&offset=
    pub async fn list_scim_provisioning_log(
        &self,
        id: &str,
        filter: &ProvisioningLogFilter,
    ) -> Result<Paginated<ProvisioningLogEntry>> {
        let endpoint = format!("{}/log{}", scim_target_path(id), build_query(filter)?);
        let request = self.request(Method::GET, &endpoint, "fetch SCIM provisioning log");
        self.send_json(request).await
    }

    /// POST /api/admin/scim-targets/{id}/log/{log_id}/retry
    pub async fn retry_scim_operation(
        &self,
        id: &str,
        log_id: &str,
    ) -> Result<Option<ProvisioningLogEntry>> {
        let endpoint = format!(
            "{}/log/{}/retry",
            scim_target_path(id),
            encode_segment(log_id)
        );
        let request = self.request(Method::POST, &endpoint, "retry SCIM operation");
        self.send_action(request).await
    }
}
