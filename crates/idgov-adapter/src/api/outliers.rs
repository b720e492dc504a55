/*
[INPUT]:  Outlier config, analysis/result/alert identifiers and filters
[OUTPUT]: Outlier detection configuration, runs, scores and alerts
[POS]:    API layer - governance outlier detection endpoints
[UPDATE]: When adding outlier endpoints or changing payloads
*/

use reqwest::Method;

use crate::http::{GovernanceClient, Result, build_query, encode_segment};
use crate::types::{
    DispositionRequest, OutlierAlert, OutlierAlertFilter, OutlierAnalysis, OutlierConfig,
    OutlierDisposition, OutlierResult, OutlierResultFilter, PageParams, Paginated,
    UpdateOutlierConfig,
};

const OUTLIERS_PATH: &str = "/api/governance/outliers";

fn outliers_path(resource: &str, id: &str) -> String {
    format!("{OUTLIERS_PATH}/{resource}/{}", encode_segment(id))
}

impl GovernanceClient {
    // ==================== Configuration ====================

    /// GET /api/governance/outliers/config
    pub async fn get_outlier_config(&self) -> Result<OutlierConfig> {
        let endpoint = format!("{OUTLIERS_PATH}/config");
        let request = self.request(Method::GET, &endpoint, "fetch outlier config");
        self.send_json(request).await
    }

    /// PUT /api/governance/outliers/config
    pub async fn update_outlier_config(&self, body: &UpdateOutlierConfig) -> Result<OutlierConfig> {
        let endpoint = format!("{OUTLIERS_PATH}/config");
        let request = self
            .request(Method::PUT, &endpoint, "update outlier config")
            .json(body)?;
        self.send_json(request).await
    }

    // ==================== Analyses ====================

    /// Start a scoring run over the current peer groups
    ///
    /// POST /api/governance/outliers/analyses
    pub async fn trigger_outlier_analysis(&self) -> Result<OutlierAnalysis> {
        let endpoint = format!("{OUTLIERS_PATH}/analyses");
        let request = self.request(Method::POST, &endpoint, "trigger outlier analysis");
        self.send_json(request).await
    }

    pub async fn list_outlier_analyses(
        &self,
        page: &PageParams,
    ) -> Result<Paginated<OutlierAnalysis>> {
        let endpoint = format!("{OUTLIERS_PATH}/analyses{}", build_query(page)?);
        let request = self.request(Method::GET, &endpoint, "fetch outlier analyses");
        self.send_json(request).await
    }

    /// POST /api/governance/outliers/analyses/{id}/cancel
    pub async fn cancel_outlier_analysis(&self, id: &str) -> Result<Option<OutlierAnalysis>> {
        let endpoint = format!("{}/cancel", outliers_path("analyses", id));
        let request = self.request(Method::POST, &endpoint, "cancel outlier analysis");
        self.send_action(request).await
    }

    // ==================== Results ====================

    pub async fn list_outlier_results(
        &self,
        filter: &OutlierResultFilter,
    ) -> Result<Paginated<OutlierResult>> {
        let endpoint = format!("{OUTLIERS_PATH}/results{}", build_query(filter)?);
        let request = self.request(Method::GET, &endpoint, "fetch outlier results");
        self.send_json(request).await
    }

    pub async fn get_outlier_result(&self, id: &str) -> Result<OutlierResult> {
        let endpoint = outliers_path("results", id);
        let request = self.request(Method::GET, &endpoint, "fetch outlier result");
        self.send_json(request).await
    }

    /// POST /api/governance/outliers/results/{id}/disposition
    pub async fn set_outlier_disposition(
        &self,
        id: &str,
        body: &DispositionRequest,
    ) -> Result<Option<OutlierDisposition>> {
        let endpoint = format!("{}/disposition", outliers_path("results", id));
        let request = self
            .request(Method::POST, &endpoint, "set outlier disposition")
            .json(body)?;
        self.send_action(request).await
    }

    // ==================== Alerts ====================

    pub async fn list_outlier_alerts(
        &self,
        filter: &OutlierAlertFilter,
    ) -> Result<Paginated<OutlierAlert>> {
        let endpoint = format!("{OUTLIERS_PATH}/alerts{}", build_query(filter)?);
        let request = self.request(Method::GET, &endpoint, "fetch outlier alerts");
        self.send_json(request).await
    }

    /// POST /api/governance/outliers/alerts/{id}/read
    pub async fn mark_outlier_alert_read(&self, id: &str) -> Result<Option<OutlierAlert>> {
        let endpoint = format!("{}/read", outliers_path("alerts", id));
        let request = self.request(Method::POST, &endpoint, "mark outlier alert read");
        self.send_action(request).await
    }

    /// POST /api/governance/outliers/alerts/{id}/dismiss
    pub async fn dismiss_outlier_alert(&self, id: &str) -> Result<Option<OutlierAlert>> {
        let endpoint = format!("{}/dismiss", outliers_path("alerts", id));
        let request = self.request(Method::POST, &endpoint, "dismiss outlier alert");
        self.send_action(request).await
    }
}
