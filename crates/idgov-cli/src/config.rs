/*
[INPUT]:  YAML configuration file and IDGOV_* environment variables
[OUTPUT]: Parsed CLI configuration and a ready GovernanceClient
[POS]:    Configuration layer - backend connection and auth
[UPDATE]: When adding new configuration options
*/

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use config::{Config, Environment, File, FileFormat};
use idgov_adapter::{AuthMode, ClientConfig, Credentials, GovernanceClient};
use serde::{Deserialize, Serialize};

/// Prefix for environment overrides, e.g. `IDGOV_AUTH__TOKEN`
const ENV_PREFIX: &str = "IDGOV";

/// Top-level CLI configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CliConfig {
    /// Backend origin
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub auth: AuthConfig,
    /// Whole-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// How the CLI authenticates.
///
/// A token wins over a cookie; with neither the client is anonymous.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AuthConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    /// Session cookie for BFF-style access
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auth: AuthConfig::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    ClientConfig::default().base_url
}

fn default_timeout_secs() -> u64 {
    30
}

impl AuthConfig {
    pub fn auth_mode(&self) -> AuthMode {
        match (&self.token, &self.cookie) {
            (Some(token), _) => {
                let mut credentials = Credentials::new(token.clone());
                if let Some(tenant_id) = &self.tenant_id {
                    credentials = credentials.with_tenant(tenant_id.clone());
                }
                AuthMode::Bearer(credentials)
            }
            (None, Some(cookie)) => AuthMode::Session {
                cookie: Some(cookie.clone()),
            },
            (None, None) => AuthMode::Anonymous,
        }
    }
}

impl CliConfig {
    /// Load from an optional YAML file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Yaml));
        }
        let config: Self = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context("read configuration sources")?
            .try_deserialize()
            .context("parse configuration")?;
        config.validate().context("invalid configuration")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(anyhow!("timeout_secs must be greater than 0"));
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            ..ClientConfig::default()
        }
    }

    pub fn build_client(&self) -> Result<GovernanceClient> {
        let client = GovernanceClient::with_config(self.client_config())
            .with_context(|| format!("invalid backend URL {}", self.base_url))?;
        Ok(client.with_auth(self.auth.auth_mode()))
    }

    /// Template written by `init`
    pub fn template() -> Self {
        Self {
            auth: AuthConfig {
                token: Some("<bearer token>".to_string()),
                tenant_id: Some("<tenant id>".to_string()),
                cookie: None,
            },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_with_defaults() {
        let config: CliConfig = serde_yaml::from_str("base_url: https://gov.example.com\n").unwrap();
        assert_eq!(config.base_url, "https://gov.example.com");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.auth.auth_mode(), AuthMode::Anonymous);
    }

    #[test]
    fn test_token_wins_over_cookie() {
        let auth = AuthConfig {
            token: Some("t".to_string()),
            tenant_id: Some("tenant-1".to_string()),
            cookie: Some("sid=1".to_string()),
        };
        assert_eq!(
            auth.auth_mode(),
            AuthMode::Bearer(Credentials::new("t").with_tenant("tenant-1"))
        );

        let auth = AuthConfig {
            cookie: Some("sid=1".to_string()),
            ..AuthConfig::default()
        };
        assert_eq!(
            auth.auth_mode(),
            AuthMode::Session {
                cookie: Some("sid=1".to_string())
            }
        );
    }

    #[test]
    fn test_template_roundtrips_through_yaml() {
        let yaml = serde_yaml::to_string(&CliConfig::template()).unwrap();
        assert!(!yaml.contains("cookie"));
        let parsed: CliConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, CliConfig::template());
    }

    #[test]
    fn test_load_fixture() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/config.yaml");
        let config = CliConfig::load(Some(&path)).unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.client_config().timeout, Duration::from_secs(5));
        assert!(config.build_client().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config: CliConfig = serde_yaml::from_str("timeout_secs: 0\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));

        let path = std::env::temp_dir()
            .join(format!("idgov-zero-timeout-{}.yaml", std::process::id()));
        std::fs::write(&path, "base_url: https://gov.example.com\ntimeout_secs: 0\n").unwrap();
        let result = CliConfig::load(Some(&path));
        std::fs::remove_file(&path).unwrap();
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "invalid configuration");
        assert!(format!("{err:#}").contains("timeout_secs must be greater than 0"));
    }
}
