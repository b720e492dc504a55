/*
[INPUT]:  Connector identifiers, filters and payloads
[OUTPUT]: Connector records, health and connection-test results
[POS]:    API layer - connector endpoints
[UPDATE]: When adding connector endpoints or changing payloads
*/

use reqwest::Method;

use crate::http::{GovernanceClient, Result, build_query, encode_segment};
use crate::types::{
    ConnectionTestResult, Connector, ConnectorFilter, ConnectorHealth, ConnectorSummary,
    CreateConnector, Paginated, UpdateConnector,
};

const CONNECTORS_PATH: &str = "/api/connectors";

fn connector_path(id: &str) -> String {
    format!("{CONNECTORS_PATH}/{}", encode_segment(id))
}

impl GovernanceClient {
    /// List connectors
    ///
    /// GET /api/connectors?connector_type=&status=&search=&limit=&offset=
    pub async fn list_connectors(
        &self,
        filter: &ConnectorFilter,
    ) -> Result<Paginated<ConnectorSummary>> {
        let endpoint = format!("{CONNECTORS_PATH}{}", build_query(filter)?);
        let request = self.request(Method::GET, &endpoint, "fetch connectors");
        self.send_json(request).await
    }

    /// GET /api/connectors/{id}
    pub async fn get_connector(&self, id: &str) -> Result<Connector> {
        let request = self.request(Method::GET, &connector_path(id), "fetch connector");
        self.send_json(request).await
    }

    /// POST /api/connectors
    pub async fn create_connector(&self, body: &CreateConnector) -> Result<Connector> {
        let request = self
            .request(Method::POST, CONNECTORS_PATH, "create connector")
            .json(body)?;
        self.send_json(request).await
    }

    /// PATCH /api/connectors/{id}
    pub async fn update_connector(&self, id: &str, body: &UpdateConnector) -> Result<Connector> {
        let request = self
            .request(Method::PATCH, &connector_path(id), "update connector")
            .json(body)?;
        self.send_json(request).await
    }

    /// DELETE /api/connectors/{id}
    pub async fn delete_connector(&self, id: &str) -> Result<()> {
        let request = self.request(Method::DELETE, &connector_path(id), "delete connector");
        self.send_empty(request).await
    }

    /// POST /api/connectors/{id}/activate
    pub async fn activate_connector(&self, id: &str) -> Result<Option<Connector>> {
        let endpoint = format!("{}/activate", connector_path(id));
        let request = self.request(Method::POST, &endpoint, "activate connector");
        self.send_action(request).await
    }

    /// POST /api/connectors/{id}/deactivate
    pub async fn deactivate_connector(&self, id: &str) -> Result<Option<Connector>> {
        let endpoint = format!("{}/deactivate", connector_path(id));
        let request = self.request(Method::POST, &endpoint, "deactivate connector");
        self.send_action(request).await
    }

    /// Ask the backend to open a connection to the target system
    ///
    /// POST /api/connectors/{id}/test
    pub async fn test_connector(&self, id: &str) -> Result<Option<ConnectionTestResult>> {
        let endpoint = format!("{}/test", connector_path(id));
        let request = self.request(Method::POST, &endpoint, "test connector");
        self.send_action(request).await
    }

    /// GET /api/connectors/{id}/health
    pub async fn get_connector_health(&self, id: &str) -> Result<ConnectorHealth> {
        let endpoint = format!("{}/health", connector_path(id));
        let request = self.request(Method::GET, &endpoint, "fetch connector health");
        self.send_json(request).await
    }
}
