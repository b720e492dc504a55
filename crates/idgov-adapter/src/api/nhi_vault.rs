/*
[INPUT]:  NHI id, secret/lease identifiers and payloads
[OUTPUT]: Vault secret metadata and leases
[POS]:    API layer - per-NHI credential vault endpoints
[UPDATE]: When adding vault endpoints or changing payloads
*/

use reqwest::Method;

use crate::http::{GovernanceClient, Result, encode_segment};
use crate::types::{RotateSecretRequest, StoreSecretRequest, VaultLease, VaultSecret};

fn vault_path(nhi_id: &str) -> String {
    format!("/api/nhi/{}/vault", encode_segment(nhi_id))
}

fn secret_path(nhi_id: &str, secret_id: &str) -> String {
    format!("{}/secrets/{}", vault_path(nhi_id), encode_segment(secret_id))
}

impl GovernanceClient {
    /// GET /api/nhi/{nhi_id}/vault/secrets
    pub async fn list_vault_secrets(&self, nhi_id: &str) -> Result<Vec<VaultSecret>> {
        let endpoint = format!("{}/secrets", vault_path(nhi_id));
        let request = self.request(Method::GET, &endpoint, "fetch vault secrets");
        self.send_json(request).await
    }

    /// POST /api/nhi/{nhi_id}/vault/secrets
    pub async fn store_vault_secret(
        &self,
        nhi_id: &str,
        body: &StoreSecretRequest,
    ) -> Result<VaultSecret> {
        let endpoint = format!("{}/secrets", vault_path(nhi_id));
        let request = self
            .request(Method::POST, &endpoint, "store vault secret")
            .json(body)?;
        self.send_json(request).await
    }

    /// POST /api/nhi/{nhi_id}/vault/secrets/{secret_id}/rotate
    pub async fn rotate_vault_secret(
        &self,
        nhi_id: &str,
        secret_id: &str,
        body: &RotateSecretRequest,
    ) -> Result<Option<VaultSecret>> {
        let endpoint = format!("{}/rotate", secret_path(nhi_id, secret_id));
        let request = self
            .request(Method::POST, &endpoint, "rotate vault secret")
            .json(body)?;
        self.send_action(request).await
    }

    pub async fn delete_vault_secret(&self, nhi_id: &str, secret_id: &str) -> Result<()> {
        let endpoint = secret_path(nhi_id, secret_id);
        let request = self.request(Method::DELETE, &endpoint, "delete vault secret");
        self.send_empty(request).await
    }

    /// GET /api/nhi/{nhi_id}/vault/leases
    pub async fn list_vault_leases(&self, nhi_id: &str) -> Result<Vec<VaultLease>> {
        let endpoint = format!("{}/leases", vault_path(nhi_id));
        let request = self.request(Method::GET, &endpoint, "fetch vault leases");
        self.send_json(request).await
    }

    /// POST /api/nhi/{nhi_id}/vault/leases/{lease_id}/revoke
    pub async fn revoke_vault_lease(&self, nhi_id: &str, lease_id: &str) -> Result<()> {
        let endpoint = format!(
            "{}/leases/{}/revoke",
            vault_path(nhi_id),
            encode_segment(lease_id)
        );
        let request = self.request(Method::POST, &endpoint, "revoke vault lease");
        self.send_empty(request).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{TIMESTAMP, mock_client, single_request_body};
    use crate::types::{RotateSecretRequest, SecretType, StoreSecretRequest};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    fn secret_json(version: u32) -> serde_json::Value {
        json!({
            "id": "sec-1",
            "nhi_id": "nhi-1",
            "name": "deploy-key",
            "secret_type": "ssh_key",
            "version": version,
            "created_at": TIMESTAMP
        })
    }

    #[tokio::test]
    async fn test_store_and_rotate_secret() {
        let (server, client) = mock_client().await;
        Mock::given(method("POST"))
            .and(path("/api/nhi/nhi-1/vault/secrets"))
            .and(body_json(json!({
                "name": "deploy-key",
                "secret_type": "ssh_key",
                "value": "-----BEGIN KEY-----",
                "rotation_interval_days": 90
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(secret_json(1)))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/nhi/nhi-1/vault/secrets/sec-1/rotate"))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(200).set_body_json(secret_json(2)))
            .expect(1)
            .mount(&server)
            .await;

        let stored = client
            .store_vault_secret(
                "nhi-1",
                &StoreSecretRequest {
                    name: "deploy-key".to_string(),
                    secret_type: SecretType::SshKey,
                    value: "-----BEGIN KEY-----".to_string(),
                    rotation_interval_days: Some(90),
                    expires_at: None,
                },
            )
            .await
            .expect("store failed");
        assert_eq!(stored.version, 1);

        let rotated = client
            .rotate_vault_secret("nhi-1", "sec-1", &RotateSecretRequest::default())
            .await
            .expect("rotate failed")
            .expect("empty response body");
        assert_eq!(rotated.version, 2);
    }

    #[tokio::test]
    async fn test_leases_and_revoke() {
        let (server, client) = mock_client().await;
        Mock::given(method("GET"))
            .and(path("/api/nhi/nhi-1/vault/leases"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": "lease-1",
                "secret_id": "sec-1",
                "nhi_id": "nhi-1",
                "lessee": "ci-runner",
                "expires_at": TIMESTAMP,
                "created_at": TIMESTAMP
            }])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/nhi/nhi-1/vault/leases/lease-1/revoke"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let leases = client.list_vault_leases("nhi-1").await.expect("leases failed");
        assert!(!leases[0].revoked);
        client
            .revoke_vault_lease("nhi-1", "lease-1")
            .await
            .expect("revoke failed");
    }

    #[tokio::test]
    async fn test_unauthorized_surfaces_as_error() {
        let (server, client) = mock_client().await;
        Mock::given(method("GET"))
            .and(path("/api/nhi/nhi-1/vault/secrets"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client.list_vault_secrets("nhi-1").await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn test_delete_secret_sends_no_body() {
        let (server, client) = mock_client().await;
        Mock::given(method("DELETE"))
            .and(path("/api/nhi/nhi-1/vault/secrets/sec-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client
            .delete_vault_secret("nhi-1", "sec-1")
            .await
            .expect("delete failed");
        assert_eq!(single_request_body(&server).await, None);
    }
}
