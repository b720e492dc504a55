/*
[INPUT]:  Connector id, correlation rule/case identifiers, filters and payloads
[OUTPUT]: Correlation rules, cases and evaluation jobs
[POS]:    API layer - per-connector correlation endpoints
[UPDATE]: When adding correlation endpoints or changing payloads
*/

use reqwest::Method;

use crate::http::{GovernanceClient, Result, build_query, encode_segment};
use crate::types::{
    CorrelationCase, CorrelationCaseFilter, CorrelationJob, CorrelationRule,
    CorrelationRuleFilter, CreateCorrelationRule, Paginated, ResolveCaseRequest,
    UpdateCorrelationRule,
};

fn correlation_path(connector_id: &str) -> String {
    format!("/api/connectors/{}/correlation", encode_segment(connector_id))
}

fn rule_path(connector_id: &str, rule_id: &str) -> String {
    format!(
        "{}/rules/{}",
        correlation_path(connector_id),
        encode_segment(rule_id)
    )
}

impl GovernanceClient {
    /// List correlation rules for a connector
    ///
    /// GET /api/connectors/{connector_id}/correlation/rules?match_type=&is_active=&tier=&limit=&offset=
    pub async fn fetch_correlation_rules(
        &self,
        connector_id: &str,
        filter: &CorrelationRuleFilter,
    ) -> Result<Paginated<CorrelationRule>> {
        let endpoint = format!(
            "{}/rules{}",
            correlation_path(connector_id),
            build_query(filter)?
        );
        let request = self.request(Method::GET, &endpoint, "fetch correlation rules");
        self.send_json(request).await
    }

    /// GET /api/connectors/{connector_id}/correlation/rules/{rule_id}
    pub async fn get_correlation_rule(
        &self,
        connector_id: &str,
        rule_id: &str,
    ) -> Result<CorrelationRule> {
        let endpoint = rule_path(connector_id, rule_id);
        let request = self.request(Method::GET, &endpoint, "fetch correlation rule");
        self.send_json(request).await
    }

    /// POST /api/connectors/{connector_id}/correlation/rules
    pub async fn create_correlation_rule(
        &self,
        connector_id: &str,
        body: &CreateCorrelationRule,
    ) -> Result<CorrelationRule> {
        let endpoint = format!("{}/rules", correlation_path(connector_id));
        let request = self
            .request(Method::POST, &endpoint, "create correlation rule")
            .json(body)?;
        self.send_json(request).await
    }

    /// PATCH /api/connectors/{connector_id}/correlation/rules/{rule_id}
    pub async fn update_correlation_rule(
        &self,
        connector_id: &str,
        rule_id: &str,
        body: &UpdateCorrelationRule,
    ) -> Result<CorrelationRule> {
        let endpoint = rule_path(connector_id, rule_id);
        let request = self
            .request(Method::PATCH, &endpoint, "update correlation rule")
            .json(body)?;
        self.send_json(request).await
    }

    /// DELETE /api/connectors/{connector_id}/correlation/rules/{rule_id}
    pub async fn delete_correlation_rule(&self, connector_id: &str, rule_id: &str) -> Result<()> {
        let endpoint = rule_path(connector_id, rule_id);
        let request = self.request(Method::DELETE, &endpoint, "delete correlation rule");
        self.send_empty(request).await
    }

    /// Queue a correlation pass over the connector's uncorrelated accounts
    ///
    /// POST /api/connectors/{connector_id}/correlation/evaluate
    pub async fn evaluate_correlation(&self, connector_id: &str) -> Result<Option<CorrelationJob>> {
        let endpoint = format!("{}/evaluate", correlation_path(connector_id));
        let request = self.request(Method::POST, &endpoint, "evaluate correlation");
        self.send_action(request).await
    }

    /// GET /api/connectors/{connector_id}/correlation/cases?status=&limit=&offset=
    pub async fn list_correlation_cases(
        &self,
        connector_id: &str,
        filter: &CorrelationCaseFilter,
    ) -> Result<Paginated<CorrelationCase>> {
        let endpoint = format!(
            "{}/cases{}",
            correlation_path(connector_id),
            build_query(filter)?
        );
        let request = self.request(Method::GET, &endpoint, "fetch correlation cases");
        self.send_json(request).await
    }

    /// POST /api/connectors/{connector_id}/correlation/cases/{case_id}/resolve
    pub async fn resolve_correlation_case(
        &self,
        connector_id: &str,
        case_id: &str,
        body: &ResolveCaseRequest,
    ) -> Result<Option<CorrelationCase>> {
        let endpoint = format!(
            "{}/cases/{}/resolve",
            correlation_path(connector_id),
            encode_segment(case_id)
        );
        let request = self
            .request(Method::POST, &endpoint, "resolve correlation case")
            .json(body)?;
        self.send_action(request).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{TIMESTAMP, mock_client, single_request_body};
    use crate::types::{
        CaseResolution, CaseStatus, CorrelationRuleFilter, CreateCorrelationRule, JobStatus,
        MatchType, ResolveCaseRequest,
    };
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    fn rule_json() -> serde_json::Value {
        json!({
            "id": "rule-1",
            "connector_id": "conn-1",
            "name": "Email match",
            "source_attribute": "mail",
            "target_attribute": "email",
            "match_type": "exact",
            "tier": 1,
            "is_active": true,
            "created_at": TIMESTAMP,
            "updated_at": TIMESTAMP
        })
    }

    #[tokio::test]
    async fn test_fetch_rules_without_filters_has_no_query() {
        let (server, client) = mock_client().await;
        Mock::given(method("GET"))
            .and(path("/api/connectors/conn-1/correlation/rules"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [rule_json()],
                "total": 1,
                "limit": 50,
                "offset": 0
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client
            .fetch_correlation_rules("conn-1", &CorrelationRuleFilter::default())
            .await
            .expect("fetch_correlation_rules failed");
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].match_type, MatchType::Exact);

        let requests = server.received_requests().await.expect("recording enabled");
        assert_eq!(requests[0].url.query(), None);
    }

    #[tokio::test]
    async fn test_create_rule_body_matches_input() {
        let (server, client) = mock_client().await;
        let body = CreateCorrelationRule {
            name: "Email match".to_string(),
            source_attribute: "mail".to_string(),
            target_attribute: "email".to_string(),
            match_type: MatchType::Fuzzy,
            algorithm: Some("jaro_winkler".to_string()),
            threshold: Some(0.9),
            weight: None,
            tier: Some(2),
            is_active: None,
        };
        Mock::given(method("POST"))
            .and(path("/api/connectors/conn-1/correlation/rules"))
            .respond_with(ResponseTemplate::new(201).set_body_json(rule_json()))
            .expect(1)
            .mount(&server)
            .await;

        client
            .create_correlation_rule("conn-1", &body)
            .await
            .expect("create_correlation_rule failed");

        let sent = single_request_body(&server).await.expect("body");
        assert_eq!(sent, serde_json::to_value(&body).unwrap());
        assert!(sent.get("weight").is_none());
    }

    #[tokio::test]
    async fn test_evaluate_and_resolve_case() {
        let (server, client) = mock_client().await;
        Mock::given(method("POST"))
            .and(path("/api/connectors/conn-1/correlation/evaluate"))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "job_id": "job-9",
                "status": "queued"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/connectors/conn-1/correlation/cases/case-4/resolve"))
            .and(body_json(json!({"resolution": "link", "identity_id": "id-7"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "case-4",
                "connector_id": "conn-1",
                "account_id": "acct-3",
                "status": "resolved",
                "candidates": [{"identity_id": "id-7", "confidence": 0.97}],
                "created_at": TIMESTAMP
            })))
            .expect(1)
            .mount(&server)
            .await;

        let job = client
            .evaluate_correlation("conn-1")
            .await
            .expect("evaluate failed")
            .expect("empty response body");
        assert_eq!(job.status, JobStatus::Pending);

        let resolved = client
            .resolve_correlation_case(
                "conn-1",
                "case-4",
                &ResolveCaseRequest {
                    resolution: CaseResolution::Link,
                    identity_id: Some("id-7".to_string()),
                    notes: None,
                },
            )
            .await
            .expect("resolve failed")
            .expect("empty response body");
        assert_eq!(resolved.status, CaseStatus::Resolved);
        assert!(resolved.candidates[0].matched_rules.is_empty());
    }
}
