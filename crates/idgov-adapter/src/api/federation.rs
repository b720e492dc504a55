/*
[INPUT]:  Identity provider identifiers and payloads
[OUTPUT]: Federated identity providers and the service provider SAML metadata
[POS]:    API layer - federation endpoints
[UPDATE]: When adding federation endpoints or changing payloads
*/

use reqwest::Method;

use crate::http::{GovernanceClient, Result, build_query, encode_segment};
use crate::types::{
    CreateIdentityProvider, IdentityProvider, PageParams, Paginated, UpdateIdentityProvider,
};

const IDENTITY_PROVIDERS_PATH: &str = "/api/federation/identity-providers";
const SAML_METADATA_PATH: &str = "/api/federation/saml/metadata";
const SAML_METADATA_MIME: &str = "application/samlmetadata+xml";

fn identity_provider_path(id: &str) -> String {
    format!("{IDENTITY_PROVIDERS_PATH}/{}", encode_segment(id))
}

impl GovernanceClient {
    pub async fn list_identity_providers(
        &self,
        page: &PageParams,
    ) -> Result<Paginated<IdentityProvider>> {
        let endpoint = format!("{IDENTITY_PROVIDERS_PATH}{}", build_query(page)?);
        let request = self.request(Method::GET, &endpoint, "fetch identity providers");
        self.send_json(request).await
    }

    pub async fn get_identity_provider(&self, id: &str) -> Result<IdentityProvider> {
        let request = self.request(
            Method::GET,
            &identity_provider_path(id),
            "fetch identity provider",
        );
        self.send_json(request).await
    }

    pub async fn create_identity_provider(
        &self,
        body: &CreateIdentityProvider,
    ) -> Result<IdentityProvider> {
        let request = self
            .request(
                Method::POST,
                IDENTITY_PROVIDERS_PATH,
                "create identity provider",
            )
            .json(body)?;
        self.send_json(request).await
    }

    pub async fn update_identity_provider(
        &self,
        id: &str,
        body: &UpdateIdentityProvider,
    ) -> Result<IdentityProvider> {
        let request = self
            .request(
                Method::PUT,
                &identity_provider_path(id),
                "update identity provider",
            )
            .json(body)?;
        self.send_json(request).await
    }

    pub async fn delete_identity_provider(&self, id: &str) -> Result<()> {
        let request = self.request(
            Method::DELETE,
            &identity_provider_path(id),
            "delete identity provider",
        );
        self.send_empty(request).await
    }

    pub async fn enable_identity_provider(&self, id: &str) -> Result<Option<IdentityProvider>> {
        let endpoint = format!("{}/enable", identity_provider_path(id));
        let request = self.request(Method::POST, &endpoint, "enable identity provider");
        self.send_action(request).await
    }

    pub async fn disable_identity_provider(&self, id: &str) -> Result<Option<IdentityProvider>> {
        let endpoint = format!("{}/disable", identity_provider_path(id));
        let request = self.request(Method::POST, &endpoint, "disable identity provider");
        self.send_action(request).await
    }

    /// Service provider metadata XML, for registering this tenant with an IdP
    ///
    /// GET /api/federation/saml/metadata
    pub async fn get_saml_metadata(&self) -> Result<String> {
        let request = self
            .request(Method::GET, SAML_METADATA_PATH, "fetch SAML metadata")
            .accept(SAML_METADATA_MIME);
        self.send_text(request).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{TIMESTAMP, mock_client};
    use crate::types::{CreateIdentityProvider, IdpProtocol};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, ResponseTemplate};

    fn idp_json(enabled: bool) -> serde_json::Value {
        json!({
            "id": "idp-1",
            "name": "Okta",
            "protocol": "oidc",
            "issuer": "https://example.okta.com",
            "is_enabled": enabled,
            "domains": ["example.com"],
            "created_at": TIMESTAMP,
            "updated_at": TIMESTAMP
        })
    }

    #[tokio::test]
    async fn test_create_and_enable_provider() {
        let (server, client) = mock_client().await;
        Mock::given(method("POST"))
            .and(path("/api/federation/identity-providers"))
            .and(body_json(json!({
                "name": "Okta",
                "protocol": "oidc",
                "issuer": "https://example.okta.com",
                "client_id": "abc"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(idp_json(false)))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/federation/identity-providers/idp-1/enable"))
            .respond_with(ResponseTemplate::new(200).set_body_json(idp_json(true)))
            .expect(1)
            .mount(&server)
            .await;

        let created = client
            .create_identity_provider(&CreateIdentityProvider {
                name: "Okta".to_string(),
                protocol: IdpProtocol::Oidc,
                issuer: "https://example.okta.com".to_string(),
                metadata_url: None,
                client_id: Some("abc".to_string()),
                client_secret: None,
                domains: None,
            })
            .await
            .expect("create failed");
        assert!(!created.is_enabled);

        let enabled = client
            .enable_identity_provider(&created.id)
            .await
            .expect("enable failed")
            .expect("empty response body");
        assert!(enabled.is_enabled);
    }

    #[tokio::test]
    async fn test_saml_metadata_is_text() {
        let (server, client) = mock_client().await;
        let xml = r#"<?xml version="1.0"?><EntityDescriptor entityID="idgov"/>"#;
        Mock::given(method("GET"))
            .and(path("/api/federation/saml/metadata"))
            .and(header("accept", "application/samlmetadata+xml"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/samlmetadata+xml")
                    .set_body_string(xml),
            )
            .expect(1)
            .mount(&server)
            .await;

        let metadata = client.get_saml_metadata().await.expect("metadata failed");
        assert_eq!(metadata, xml);
    }

    #[tokio::test]
    async fn test_saml_metadata_html_error_uses_label() {
        let (server, client) = mock_client().await;
        Mock::given(method("GET"))
            .and(path("/api/federation/saml/metadata"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let err = client.get_saml_metadata().await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch SAML metadata: 502");
    }
}
