/*
[INPUT]:  SIEM destination identifiers, payloads and audit export filters
[OUTPUT]: SIEM destinations, delivery tests, dead letters and audit CSV
[POS]:    API layer - admin SIEM export endpoints
[UPDATE]: When adding SIEM endpoints or changing payloads
*/

use reqwest::Method;
use url::Url;

use crate::http::{GovernanceClient, Result, build_query, encode_segment};
use crate::types::{
    AuditExportFilter, CreateSiemDestination, DataPage, DeadLetterEvent, PageParams, Paginated,
    RedeliveryResult, SiemDestination, SiemTestResult, UpdateSiemDestination,
};

const DESTINATIONS_PATH: &str = "/api/admin/siem/destinations";
const AUDIT_EXPORT_PATH: &str = "/api/admin/siem/export";

fn destination_path(id: &str) -> String {
    format!("{DESTINATIONS_PATH}/{}", encode_segment(id))
}

impl GovernanceClient {
    pub async fn list_siem_destinations(
        &self,
        page: &PageParams,
    ) -> Result<Paginated<SiemDestination>> {
        let endpoint = format!("{DESTINATIONS_PATH}{}", build_query(page)?);
        let request = self.request(Method::GET, &endpoint, "fetch SIEM destinations");
        self.send_json(request).await
    }

    pub async fn get_siem_destination(&self, id: &str) -> Result<SiemDestination> {
        let request = self.request(
            Method::GET,
            &destination_path(id),
            "fetch SIEM destination",
        );
        self.send_json(request).await
    }

    pub async fn create_siem_destination(
        &self,
        body: &CreateSiemDestination,
    ) -> Result<SiemDestination> {
        let request = self
            .request(Method::POST, DESTINATIONS_PATH, "create SIEM destination")
            .json(body)?;
        self.send_json(request).await
    }

    pub async fn update_siem_destination(
        &self,
        id: &str,
        body: &UpdateSiemDestination,
    ) -> Result<SiemDestination> {
        let request = self
            .request(Method::PUT, &destination_path(id), "update SIEM destination")
            .json(body)?;
        self.send_json(request).await
    }

    pub async fn delete_siem_destination(&self, id: &str) -> Result<()> {
        let request = self.request(
            Method::DELETE,
            &destination_path(id),
            "delete SIEM destination",
        );
        self.send_empty(request).await
    }

    /// Send a synthetic event to the destination
    ///
    /// POST /api/admin/siem/destinations/{id}/test
    pub async fn test_siem_destination(&self, id: &str) -> Result<Option<SiemTestResult>> {
        let endpoint = format!("{}/test", destination_path(id));
        let request = self.request(Method::POST, &endpoint, "test SIEM destination");
        self.send_action(request).await
    }

    /// GET /api/admin/siem/destinations/{id}/dead-letter?limit=&offset=
    pub async fn list_siem_dead_letters(
        &self,
        id: &str,
        page: &PageParams,
    ) -> Result<DataPage<DeadLetterEvent>> {
        let endpoint = format!("{}/dead-letter{}", destination_path(id), build_query(page)?);
        let request = self.request(Method::GET, &endpoint, "fetch dead letter events");
        self.send_json(request).await
    }

    /// POST /api/admin/siem/destinations/{id}/dead-letter/redeliver
    pub async fn redeliver_siem_dead_letters(&self, id: &str) -> Result<Option<RedeliveryResult>> {
        let endpoint = format!("{}/dead-letter/redeliver", destination_path(id));
        let request = self.request(Method::POST, &endpoint, "redeliver dead letter events");
        self.send_action(request).await
    }

    /// Download the audit trail as CSV text
    ///
    /// GET /api/admin/siem/export?from=&to=&event_type=&actor_id=
    pub async fn export_audit_csv(&self, filter: &AuditExportFilter) -> Result<String> {
        let endpoint = format!("{AUDIT_EXPORT_PATH}{}", build_query(filter)?);
        let request = self
            .request(Method::GET, &endpoint, "export audit log")
            .accept("text/csv");
        self.send_text(request).await
    }

    /// Absolute export URL for handing the download to a browser
    pub fn audit_export_url(&self, filter: &AuditExportFilter) -> Result<Url> {
        self.url_for(&format!("{AUDIT_EXPORT_PATH}{}", build_query(filter)?))
    }
}
