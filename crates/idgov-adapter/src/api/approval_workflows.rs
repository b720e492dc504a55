/*
[INPUT]:  Workflow identifiers, filters and payloads
[OUTPUT]: Approval workflow records
[POS]:    API layer - governance approval workflow endpoints
[UPDATE]: When adding workflow endpoints or changing payloads
*/

use reqwest::Method;

use crate::http::{GovernanceClient, Result, build_query, encode_segment};
use crate::types::{
    ApprovalWorkflow, ApprovalWorkflowFilter, CreateApprovalWorkflow, Paginated,
    UpdateApprovalWorkflow,
};

const WORKFLOWS_PATH: &str = "/api/governance/approval-workflows";

fn workflow_path(id: &str) -> String {
    format!("{WORKFLOWS_PATH}/{}", encode_segment(id))
}

impl GovernanceClient {
    pub async fn list_approval_workflows(
        &self,
        filter: &ApprovalWorkflowFilter,
    ) -> Result<Paginated<ApprovalWorkflow>> {
        let endpoint = format!("{WORKFLOWS_PATH}{}", build_query(filter)?);
        let request = self.request(Method::GET, &endpoint, "fetch approval workflows");
        self.send_json(request).await
    }

    pub async fn get_approval_workflow(&self, id: &str) -> Result<ApprovalWorkflow> {
        let request = self.request(Method::GET, &workflow_path(id), "fetch approval workflow");
        self.send_json(request).await
    }

    pub async fn create_approval_workflow(
        &self,
        body: &CreateApprovalWorkflow,
    ) -> Result<ApprovalWorkflow> {
        let request = self
            .request(Method::POST, WORKFLOWS_PATH, "create approval workflow")
            .json(body)?;
        self.send_json(request).await
    }

    /// PUT /api/governance/approval-workflows/{id}
    pub async fn update_approval_workflow(
        &self,
        id: &str,
        body: &UpdateApprovalWorkflow,
    ) -> Result<ApprovalWorkflow> {
        let request = self
            .request(Method::PUT, &workflow_path(id), "update approval workflow")
            .json(body)?;
        self.send_json(request).await
    }

    pub async fn delete_approval_workflow(&self, id: &str) -> Result<()> {
        let request = self.request(
            Method::DELETE,
            &workflow_path(id),
            "delete approval workflow",
        );
        self.send_empty(request).await
    }

    /// Make this the workflow used when an entitlement names none
    ///
    /// POST /api/governance/approval-workflows/{id}/set-default
    pub async fn set_default_approval_workflow(
        &self,
        id: &str,
    ) -> Result<Option<ApprovalWorkflow>> {
        let endpoint = format!("{}/set-default", workflow_path(id));
        let request = self.request(Method::POST, &endpoint, "set default approval workflow");
        self.send_action(request).await
    }
}
