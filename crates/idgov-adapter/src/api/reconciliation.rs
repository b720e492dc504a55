/*
[INPUT]:  Connector id, run/discrepancy identifiers, filters and payloads
[OUTPUT]: Reconciliation runs, discrepancies, remediation results and schedules
[POS]:    API layer - per-connector reconciliation endpoints
[UPDATE]: When adding reconciliation endpoints or changing payloads
*/

use reqwest::Method;

use crate::http::{GovernanceClient, Result, build_query, encode_segment};
use crate::types::{
    Discrepancy, DiscrepancyFilter, PageParams, Paginated, ReconciliationRun,
    ReconciliationSchedule, RemediateRequest, RemediationResult, TriggerReconciliationRequest,
    UpsertScheduleRequest,
};

fn reconciliation_path(connector_id: &str) -> String {
    format!(
        "/api/connectors/{}/reconciliation",
        encode_segment(connector_id)
    )
}

fn run_path(connector_id: &str, run_id: &str) -> String {
    format!(
        "{}/runs/{}",
        reconciliation_path(connector_id),
        encode_segment(run_id)
    )
}

impl GovernanceClient {
    // ==================== Runs ====================

    /// POST /api/connectors/{connector_id}/reconciliation/runs
    pub async fn trigger_reconciliation(
        &self,
        connector_id: &str,
        body: &TriggerReconciliationRequest,
    ) -> Result<ReconciliationRun> {
        let endpoint = format!("{}/runs", reconciliation_path(connector_id));
        let request = self
            .request(Method::POST, &endpoint, "trigger reconciliation")
            .json(body)?;
        self.send_json(request).await
    }

    /// GET /api/connectors/{connector_id}/reconciliation/runs?limit=&offset=
    pub async fn list_reconciliation_runs(
        &self,
        connector_id: &str,
        page: &PageParams,
    ) -> Result<Paginated<ReconciliationRun>> {
        let endpoint = format!(
            "{}/runs{}",
            reconciliation_path(connector_id),
            build_query(page)?
        );
        let request = self.request(Method::GET, &endpoint, "fetch reconciliation runs");
        self.send_json(request).await
    }

    pub async fn get_reconciliation_run(
        &self,
        connector_id: &str,
        run_id: &str,
    ) -> Result<ReconciliationRun> {
        let endpoint = run_path(connector_id, run_id);
        let request = self.request(Method::GET, &endpoint, "fetch reconciliation run");
        self.send_json(request).await
    }

    pub async fn cancel_reconciliation_run(
        &self,
        connector_id: &str,
        run_id: &str,
    ) -> Result<Option<ReconciliationRun>> {
        let endpoint = format!("{}/cancel", run_path(connector_id, run_id));
        let request = self.request(Method::POST, &endpoint, "cancel reconciliation run");
        self.send_action(request).await
    }

    /// Continue a run from its last checkpoint
    pub async fn resume_reconciliation_run(
        &self,
        connector_id: &str,
        run_id: &str,
    ) -> Result<Option<ReconciliationRun>> {
        let endpoint = format!("{}/resume", run_path(connector_id, run_id));
        let request = self.request(Method::POST, &endpoint, "resume reconciliation run");
        self.send_action(request).await
    }

    // ==================== Discrepancies ====================

    /// GET /api/connectors/{connector_id}/reconciliation/discrepancies?run_id=&discrepancy_type=&status=&limit=&offset=
    pub async fn list_discrepancies(
        &self,
        connector_id: &str,
        filter: &DiscrepancyFilter,
    ) -> Result<Paginated<Discrepancy>> {
        let endpoint = format!(
            "{}/discrepancies{}",
            reconciliation_path(connector_id),
            build_query(filter)?
        );
        let request = self.request(Method::GET, &endpoint, "fetch discrepancies");
        self.send_json(request).await
    }

    /// POST /api/connectors/{connector_id}/reconciliation/discrepancies/{id}/remediate
    pub async fn remediate_discrepancy(
        &self,
        connector_id: &str,
        discrepancy_id: &str,
        body: &RemediateRequest,
    ) -> Result<Option<RemediationResult>> {
        let endpoint = format!(
            "{}/discrepancies/{}/remediate",
            reconciliation_path(connector_id),
            encode_segment(discrepancy_id)
        );
        let request = self
            .request(Method::POST, &endpoint, "remediate discrepancy")
            .json(body)?;
        self.send_action(request).await
    }

    // ==================== Schedule ====================

    /// The connector's schedule, or `None` when none is configured
    ///
    /// GET /api/connectors/{connector_id}/reconciliation/schedule
    pub async fn get_reconciliation_schedule(
        &self,
        connector_id: &str,
    ) -> Result<Option<ReconciliationSchedule>> {
        let endpoint = format!("{}/schedule", reconciliation_path(connector_id));
        let request = self.request(Method::GET, &endpoint, "fetch reconciliation schedule");
        self.send_optional_json(request).await
    }

    /// PUT /api/connectors/{connector_id}/reconciliation/schedule
    pub async fn upsert_reconciliation_schedule(
        &self,
        connector_id: &str,
        body: &UpsertScheduleRequest,
    ) -> Result<ReconciliationSchedule> {
        let endpoint = format!("{}/schedule", reconciliation_path(connector_id));
        let request = self
            .request(Method::PUT, &endpoint, "update reconciliation schedule")
            .json(body)?;
        self.send_json(request).await
    }

    pub async fn delete_reconciliation_schedule(&self, connector_id: &str) -> Result<()> {
        let endpoint = format!("{}/schedule", reconciliation_path(connector_id));
        let request = self.request(Method::DELETE, &endpoint, "delete reconciliation schedule");
        self.send_empty(request).await
    }
}
