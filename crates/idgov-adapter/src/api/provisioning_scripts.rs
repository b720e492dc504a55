/*
[INPUT]:  Script identifiers, versions, filters and payloads
[OUTPUT]: Provisioning scripts, versions, validation and dry-run results
[POS]:    API layer - provisioning script endpoints
[UPDATE]: When adding script endpoints or changing payloads
*/

use reqwest::Method;

use crate::http::{GovernanceClient, Result, build_query, encode_segment};
use crate::types::{
    CreateProvisioningScript, CreateScriptVersion, DryRunRequest, DryRunResult, Paginated,
    ProvisioningScript, ScriptFilter, ScriptValidation, ScriptVersion, UpdateProvisioningScript,
    ValidateScriptRequest,
};

const SCRIPTS_PATH: &str = "/api/provisioning-scripts";

fn script_path(id: &str) -> String {
    format!("{SCRIPTS_PATH}/{}", encode_segment(id))
}

impl GovernanceClient {
    /// GET /api/provisioning-scripts?status=&connector_id=&hook=&limit=&offset=
    pub async fn list_provisioning_scripts(
        &self,
        filter: &ScriptFilter,
    ) -> Result<Paginated<ProvisioningScript>> {
        let endpoint = format!("{SCRIPTS_PATH}{}", build_query(filter)?);
        let request = self.request(Method::GET, &endpoint, "fetch provisioning scripts");
        self.send_json(request).await
    }

    pub async fn get_provisioning_script(&self, id: &str) -> Result<ProvisioningScript> {
        let request = self.request(Method::GET, &script_path(id), "fetch provisioning script");
        self.send_json(request).await
    }

    pub async fn create_provisioning_script(
        &self,
        body: &CreateProvisioningScript,
    ) -> Result<ProvisioningScript> {
        let request = self
            .request(Method::POST, SCRIPTS_PATH, "create provisioning script")
            .json(body)?;
        self.send_json(request).await
    }

    pub async fn update_provisioning_script(
        &self,
        id: &str,
        body: &UpdateProvisioningScript,
    ) -> Result<ProvisioningScript> {
        let request = self
            .request(Method::PUT, &script_path(id), "update provisioning script")
            .json(body)?;
        self.send_json(request).await
    }

    pub async fn delete_provisioning_script(&self, id: &str) -> Result<()> {
        let request = self.request(
            Method::DELETE,
            &script_path(id),
            "delete provisioning script",
        );
        self.send_empty(request).await
    }

    // ==================== Versions ====================

    /// GET /api/provisioning-scripts/{id}/versions
    pub async fn list_script_versions(&self, id: &str) -> Result<Vec<ScriptVersion>> {
        let endpoint = format!("{}/versions", script_path(id));
        let request = self.request(Method::GET, &endpoint, "fetch script versions");
        self.send_json(request).await
    }

    /// POST /api/provisioning-scripts/{id}/versions
    pub async fn create_script_version(
        &self,
        id: &str,
        body: &CreateScriptVersion,
    ) -> Result<ScriptVersion> {
        let endpoint = format!("{}/versions", script_path(id));
        let request = self
            .request(Method::POST, &endpoint, "create script version")
            .json(body)?;
        self.send_json(request).await
    }

    /// POST /api/provisioning-scripts/{id}/versions/{version}/activate
    pub async fn activate_script_version(
        &self,
        id: &str,
        version: u32,
    ) -> Result<Option<ProvisioningScript>> {
        let endpoint = format!("{}/versions/{version}/activate", script_path(id));
        let request = self.request(Method::POST, &endpoint, "activate script version");
        self.send_action(request).await
    }

    // ==================== Testing ====================

    /// Compile-check a script body without saving it
    ///
    /// POST /api/provisioning-scripts/validate
    pub async fn validate_script(
        &self,
        body: &ValidateScriptRequest,
    ) -> Result<Option<ScriptValidation>> {
        let endpoint = format!("{SCRIPTS_PATH}/validate");
        let request = self
            .request(Method::POST, &endpoint, "validate script")
            .json(body)?;
        self.send_action(request).await
    }

    /// POST /api/provisioning-scripts/{id}/dry-run
    pub async fn dry_run_script(
        &self,
        id: &str,
        body: &DryRunRequest,
    ) -> Result<Option<DryRunResult>> {
        let endpoint = format!("{}/dry-run", script_path(id));
        let request = self
            .request(Method::POST, &endpoint, "dry run script")
            .json(body)?;
        self.send_action(request).await
    }
}
