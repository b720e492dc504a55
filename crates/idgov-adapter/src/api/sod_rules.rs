/*
[INPUT]:  SoD rule identifiers, filters and payloads
[OUTPUT]: Separation-of-duties rules and detected violations
[POS]:    API layer - governance SoD endpoints
[UPDATE]: When adding SoD endpoints or changing payloads
*/

use reqwest::Method;

use crate::http::{GovernanceClient, Result, build_query, encode_segment};
use crate::types::{
    CreateSodRule, Paginated, SodRule, SodRuleFilter, SodViolation, SodViolationFilter,
    UpdateSodRule,
};

const SOD_RULES_PATH: &str = "/api/governance/sod-rules";
const SOD_VIOLATIONS_PATH: &str = "/api/governance/sod-violations";

fn sod_rule_path(id: &str) -> String {
    format!("{SOD_RULES_PATH}/{}", encode_segment(id))
}

impl GovernanceClient {
    /// GET /api/governance/sod-rules?severity=&is_enabled=&entitlement_id=&limit=&offset=
    pub async fn list_sod_rules(&self, filter: &SodRuleFilter) -> Result<Paginated<SodRule>> {
        let endpoint = format!("{SOD_RULES_PATH}{}", build_query(filter)?);
        let request = self.request(Method::GET, &endpoint, "fetch SoD rules");
        self.send_json(request).await
    }

    pub async fn get_sod_rule(&self, id: &str) -> Result<SodRule> {
        let request = self.request(Method::GET, &sod_rule_path(id), "fetch SoD rule");
        self.send_json(request).await
    }

    pub async fn create_sod_rule(&self, body: &CreateSodRule) -> Result<SodRule> {
        let request = self
            .request(Method::POST, SOD_RULES_PATH, "create SoD rule")
            .json(body)?;
        self.send_json(request).await
    }

    pub async fn update_sod_rule(&self, id: &str, body: &UpdateSodRule) -> Result<SodRule> {
        let request = self
            .request(Method::PUT, &sod_rule_path(id), "update SoD rule")
            .json(body)?;
        self.send_json(request).await
    }

    pub async fn delete_sod_rule(&self, id: &str) -> Result<()> {
        let request = self.request(Method::DELETE, &sod_rule_path(id), "delete SoD rule");
        self.send_empty(request).await
    }

    pub async fn enable_sod_rule(&self, id: &str) -> Result<Option<SodRule>> {
        let endpoint = format!("{}/enable", sod_rule_path(id));
        let request = self.request(Method::POST, &endpoint, "enable SoD rule");
        self.send_action(request).await
    }

    pub async fn disable_sod_rule(&self, id: &str) -> Result<Option<SodRule>> {
        let endpoint = format!("{}/disable", sod_rule_path(id));
        let request = self.request(Method::POST, &endpoint, "disable SoD rule");
        self.send_action(request).await
    }

    /// GET /api/governance/sod-violations?rule_id=&user_id=&status=&limit=&offset=
    pub async fn list_sod_violations(
        &self,
        filter: &SodViolationFilter,
    ) -> Result<Paginated<SodViolation>> {
        let endpoint = format!("{SOD_VIOLATIONS_PATH}{}", build_query(filter)?);
        let request = self.request(Method::GET, &endpoint, "fetch SoD violations");
        self.send_json(request).await
    }
}
