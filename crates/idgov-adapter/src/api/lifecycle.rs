/*
[INPUT]:  Lifecycle config identifiers and payloads
[OUTPUT]: Lifecycle configurations (states and transitions)
[POS]:    API layer - governance lifecycle endpoints
[UPDATE]: When adding lifecycle endpoints or changing payloads
*/

use reqwest::Method;

use crate::http::{GovernanceClient, Result, build_query, encode_segment};
use crate::types::{
    CreateLifecycleConfig, LifecycleConfig, PageParams, Paginated, UpdateLifecycleConfig,
};

const LIFECYCLE_CONFIGS_PATH: &str = "/api/governance/lifecycle/configs";

fn config_path(id: &str) -> String {
    format!("{LIFECYCLE_CONFIGS_PATH}/{}", encode_segment(id))
}

impl GovernanceClient {
    pub async fn list_lifecycle_configs(
        &self,
        page: &PageParams,
    ) -> Result<Paginated<LifecycleConfig>> {
        let endpoint = format!("{LIFECYCLE_CONFIGS_PATH}{}", build_query(page)?);
        let request = self.request(Method::GET, &endpoint, "fetch lifecycle configs");
        self.send_json(request).await
    }

    pub async fn get_lifecycle_config(&self, id: &str) -> Result<LifecycleConfig> {
        let request = self.request(Method::GET, &config_path(id), "fetch lifecycle config");
        self.send_json(request).await
    }

    pub async fn create_lifecycle_config(
        &self,
        body: &CreateLifecycleConfig,
    ) -> Result<LifecycleConfig> {
        let request = self
            .request(Method::POST, LIFECYCLE_CONFIGS_PATH, "create lifecycle config")
            .json(body)?;
        self.send_json(request).await
    }

    pub async fn update_lifecycle_config(
        &self,
        id: &str,
        body: &UpdateLifecycleConfig,
    ) -> Result<LifecycleConfig> {
        let request = self
            .request(Method::PUT, &config_path(id), "update lifecycle config")
            .json(body)?;
        self.send_json(request).await
    }

    pub async fn delete_lifecycle_config(&self, id: &str) -> Result<()> {
        let request = self.request(Method::DELETE, &config_path(id), "delete lifecycle config");
        self.send_empty(request).await
    }

    /// POST /api/governance/lifecycle/configs/{id}/enable
    pub async fn enable_lifecycle_config(&self, id: &str) -> Result<Option<LifecycleConfig>> {
        let endpoint = format!("{}/enable", config_path(id));
        let request = self.request(Method::POST, &endpoint, "enable lifecycle config");
        self.send_action(request).await
    }

    /// POST /api/governance/lifecycle/configs/{id}/disable
    pub async fn disable_lifecycle_config(&self, id: &str) -> Result<Option<LifecycleConfig>> {
        let endpoint = format!("{}/disable", config_path(id));
        let request = self.request(Method::POST, &endpoint, "disable lifecycle config");
        self.send_action(request).await
    }
}
