/*
[INPUT]:  Parsed subcommands and a configured GovernanceClient
[OUTPUT]: Pretty JSON (or raw text) on the given writer, files for exports
[POS]:    Command layer - maps CLI subcommands onto adapter calls and route handlers
[UPDATE]: When adding subcommands or changing output shape
*/

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::Subcommand;
use idgov_adapter::routes::connector_detail::{self, CONNECTORS_LIST_PATH};
use idgov_adapter::{
    AccessRequestFilter, AccessRequestStatus, ActionOutcome, AuditExportFilter, ConnectorFilter,
    CorrelationRuleFilter, CurrentUser, DecisionRequest, GovernanceClient, Session, TokenClaims,
    decode_claims,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::CliConfig;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Write a configuration template
    Init {
        #[arg(long, value_name = "PATH", default_value = "idgov.yaml")]
        output: PathBuf,
    },
    /// Inspect and manage connectors
    #[command(subcommand)]
    Connectors(ConnectorCommand),
    /// List correlation rules of a connector
    CorrelationRules {
        #[arg(long = "connector", value_name = "ID")]
        connector_id: String,
        #[arg(long)]
        active: Option<bool>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Review access requests
    #[command(subcommand)]
    AccessRequests(AccessRequestCommand),
    /// Print the service provider SAML metadata document
    SamlMetadata,
    /// Download the audit log as CSV
    AuditExport {
        #[arg(long, value_name = "PATH")]
        output: PathBuf,
        /// RFC 3339 lower bound
        #[arg(long)]
        from: Option<DateTime<Utc>>,
        #[arg(long)]
        to: Option<DateTime<Utc>>,
        #[arg(long)]
        event_type: Option<String>,
    },
    /// Show the caller as the backend sees them
    Whoami,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ConnectorCommand {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Connector plus health, as the detail page loads it
    Get { id: String },
    Health { id: String },
    Activate { id: String },
    Deactivate { id: String },
    Delete { id: String },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum AccessRequestCommand {
    List {
        /// pending, approved, rejected, ...
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
    Approve {
        id: String,
        #[arg(long)]
        comments: Option<String>,
    },
    Reject {
        id: String,
        #[arg(long)]
        comments: Option<String>,
    },
}

#[derive(Debug, Serialize)]
struct WhoAmI {
    user: CurrentUser,
    #[serde(skip_serializing_if = "Option::is_none")]
    claims: Option<TokenClaims>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expired: Option<bool>,
}

#[derive(Debug, Serialize)]
struct ExportSummary<'a> {
    path: &'a Path,
    bytes: usize,
}

/// Write the configuration template to `output`
pub fn run_init(output: &Path) -> Result<()> {
    let yaml =
        serde_yaml::to_string(&CliConfig::template()).context("failed to serialize config to YAML")?;
    std::fs::write(output, yaml)
        .with_context(|| format!("failed to write config to {}", output.display()))?;
    info!(path = %output.display(), "configuration template written");
    Ok(())
}

/// Run one subcommand against the backend
pub async fn execute(
    client: &GovernanceClient,
    command: &Command,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Command::Init { output } => run_init(output),
        Command::Connectors(command) => connectors(client, command, out).await,
        Command::CorrelationRules {
            connector_id,
            active,
            limit,
            offset,
        } => {
            let filter = CorrelationRuleFilter {
                is_active: *active,
                limit: *limit,
                offset: *offset,
                ..Default::default()
            };
            let rules = client
                .fetch_correlation_rules(connector_id, &filter)
                .await
                .context("fetch correlation rules")?;
            write_json(out, &rules)
        }
        Command::AccessRequests(command) => access_requests(client, command, out).await,
        Command::SamlMetadata => {
            let metadata = client
                .get_saml_metadata()
                .await
                .context("fetch SAML metadata")?;
            writeln!(out, "{metadata}")?;
            Ok(())
        }
        Command::AuditExport {
            output,
            from,
            to,
            event_type,
        } => {
            let filter = AuditExportFilter {
                from: *from,
                to: *to,
                event_type: event_type.clone(),
                actor_id: None,
            };
            let csv = client
                .export_audit_csv(&filter)
                .await
                .context("export audit log")?;
            std::fs::write(output, &csv)
                .with_context(|| format!("failed to write export to {}", output.display()))?;
            write_json(
                out,
                &ExportSummary {
                    path: output,
                    bytes: csv.len(),
                },
            )
        }
        Command::Whoami => whoami(client, out).await,
    }
}

async fn connectors(
    client: &GovernanceClient,
    command: &ConnectorCommand,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        ConnectorCommand::List {
            search,
            limit,
            offset,
        } => {
            let filter = ConnectorFilter {
                search: search.clone(),
                limit: *limit,
                offset: *offset,
                ..Default::default()
            };
            let page = client
                .list_connectors(&filter)
                .await
                .context("list connectors")?;
            write_json(out, &page)
        }
        ConnectorCommand::Health { id } => {
            let health = client
                .get_connector_health(id)
                .await
                .context("fetch connector health")?;
            write_json(out, &health)
        }
        ConnectorCommand::Get { id } => {
            let session = resolve_session(client).await?;
            let page = connector_detail::load(client, session.as_ref(), id)
                .await
                .context("load connector")?;
            write_json(out, &page)
        }
        ConnectorCommand::Activate { id } => {
            let session = resolve_session(client).await?;
            let outcome = connector_detail::activate(client, session.as_ref(), id).await;
            finish_action(outcome, None, out)
        }
        ConnectorCommand::Deactivate { id } => {
            let session = resolve_session(client).await?;
            let outcome = connector_detail::deactivate(client, session.as_ref(), id).await;
            finish_action(outcome, None, out)
        }
        ConnectorCommand::Delete { id } => {
            let session = resolve_session(client).await?;
            let outcome = connector_detail::delete(client, session.as_ref(), id).await;
            finish_action(outcome, Some(CONNECTORS_LIST_PATH), out)
        }
    }
}

async fn access_requests(
    client: &GovernanceClient,
    command: &AccessRequestCommand,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        AccessRequestCommand::List {
            status,
            limit,
            offset,
        } => {
            let status = status.as_deref().map(parse_status).transpose()?;
            let filter = AccessRequestFilter {
                status,
                limit: *limit,
                offset: *offset,
                ..Default::default()
            };
            let page = client
                .list_access_requests(&filter)
                .await
                .context("list access requests")?;
            write_json(out, &page)
        }
        AccessRequestCommand::Approve { id, comments } => {
            let body = DecisionRequest {
                comments: comments.clone(),
            };
            let request = client
                .approve_access_request(id, &body)
                .await
                .context("approve access request")?;
            write_json(out, &request)
        }
        AccessRequestCommand::Reject { id, comments } => {
            let body = DecisionRequest {
                comments: comments.clone(),
            };
            let request = client
                .reject_access_request(id, &body)
                .await
                .context("reject access request")?;
            write_json(out, &request)
        }
    }
}

async fn whoami(client: &GovernanceClient, out: &mut dyn Write) -> Result<()> {
    let user = client
        .get_current_user()
        .await
        .context("fetch current user")?;

    let claims = client
        .credentials()
        .and_then(|credentials| match decode_claims(&credentials.token) {
            Ok(claims) => Some(claims),
            Err(err) => {
                warn!(error = %err, "bearer token is not a readable JWT");
                None
            }
        });
    let expired = claims
        .as_ref()
        .map(|claims| claims.is_expired_at(Utc::now()));

    write_json(
        out,
        &WhoAmI {
            user,
            claims,
            expired,
        },
    )
}

/// The caller's session, or `None` when the backend rejects the credentials
async fn resolve_session(client: &GovernanceClient) -> Result<Option<Session>> {
    match client.get_current_user().await {
        Ok(user) => Ok(Some(Session::from_current_user(&user))),
        Err(err) if err.is_unauthorized() => {
            warn!("backend rejected the configured credentials");
            Ok(None)
        }
        Err(err) => Err(err).context("resolve current user"),
    }
}

/// Print the outcome; anything but success (or the expected redirect) is an error
fn finish_action<T: Serialize>(
    outcome: ActionOutcome<T>,
    expected_redirect: Option<&str>,
    out: &mut dyn Write,
) -> Result<()> {
    write_json(out, &outcome)?;
    match outcome {
        ActionOutcome::Success(_) => Ok(()),
        ActionOutcome::Redirect { location } if Some(location.as_str()) == expected_redirect => {
            Ok(())
        }
        ActionOutcome::Redirect { location } => bail!("redirected to {location}"),
        ActionOutcome::Fail { status, error } => bail!("{status}: {error}"),
    }
}

fn parse_status(value: &str) -> Result<AccessRequestStatus> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .with_context(|| format!("unknown access request status: {value}"))
}

fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize output")?;
    writeln!(out, "{json}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use idgov_adapter::{AuthMode, Credentials};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TIMESTAMP: &str = "2026-01-15T10:30:00Z";

    fn client_for(server: &MockServer) -> GovernanceClient {
        GovernanceClient::with_base_url(&server.uri())
            .unwrap()
            .with_auth(AuthMode::Bearer(Credentials::new("opaque-token")))
    }

    async fn mount_me(server: &MockServer, roles: &[&str]) {
        Mock::given(method("GET"))
            .and(path("/api/admin/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "user-1",
                "email": "admin@example.com",
                "roles": roles
            })))
            .mount(server)
            .await;
    }

    fn connector_json(status: &str) -> serde_json::Value {
        json!({
            "id": "conn-1",
            "name": "Corporate LDAP",
            "connector_type": "ldap",
            "status": status,
            "created_at": TIMESTAMP,
            "updated_at": TIMESTAMP
        })
    }

    async fn run(client: &GovernanceClient, command: Command) -> (Result<()>, serde_json::Value) {
        let mut out = Vec::new();
        let result = execute(client, &command, &mut out).await;
        let value = serde_json::from_slice(&out).unwrap_or(serde_json::Value::Null);
        (result, value)
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("pending").unwrap(), AccessRequestStatus::Pending);
        assert_eq!(parse_status("canceled").unwrap(), AccessRequestStatus::Cancelled);
        assert!(parse_status("bogus").is_err());
    }

    #[tokio::test]
    async fn test_correlation_rules_command() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/connectors/conn-1/correlation/rules"))
            .and(query_param("is_active", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [],
                "total": 0,
                "limit": 50,
                "offset": 0
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (result, output) = run(
            &client_for(&server),
            Command::CorrelationRules {
                connector_id: "conn-1".to_string(),
                active: Some(true),
                limit: None,
                offset: None,
            },
        )
        .await;
        assert!(result.is_ok());
        assert_eq!(output["total"], 0);
    }

    #[tokio::test]
    async fn test_connector_get_goes_through_route_gate() {
        let server = MockServer::start().await;
        mount_me(&server, &["connector_admin"]).await;
        Mock::given(method("GET"))
            .and(path("/api/connectors/conn-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(connector_json("active")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/connectors/conn-1/health"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let (result, output) = run(
            &client_for(&server),
            Command::Connectors(ConnectorCommand::Get {
                id: "conn-1".to_string(),
            }),
        )
        .await;
        assert!(result.is_ok());
        assert_eq!(output["connector"]["name"], "Corporate LDAP");
        assert!(output["health"].is_null());
    }

    #[tokio::test]
    async fn test_connector_action_denied_for_auditor() {
        let server = MockServer::start().await;
        mount_me(&server, &["auditor"]).await;

        let (result, output) = run(
            &client_for(&server),
            Command::Connectors(ConnectorCommand::Delete {
                id: "conn-1".to_string(),
            }),
        )
        .await;
        assert_eq!(result.unwrap_err().to_string(), "redirected to /dashboard");
        assert_eq!(output, json!({"type": "redirect", "location": "/dashboard"}));
    }

    #[tokio::test]
    async fn test_connector_delete_succeeds() {
        let server = MockServer::start().await;
        mount_me(&server, &["admin"]).await;
        Mock::given(method("DELETE"))
            .and(path("/api/connectors/conn-1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let (result, output) = run(
            &client_for(&server),
            Command::Connectors(ConnectorCommand::Delete {
                id: "conn-1".to_string(),
            }),
        )
        .await;
        assert!(result.is_ok());
        assert_eq!(output["location"], "/connectors");
    }

    #[tokio::test]
    async fn test_rejected_credentials_redirect_to_login() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/admin/users/me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let (result, _) = run(
            &client_for(&server),
            Command::Connectors(ConnectorCommand::Activate {
                id: "conn-1".to_string(),
            }),
        )
        .await;
        assert_eq!(result.unwrap_err().to_string(), "redirected to /login");
    }

    #[tokio::test]
    async fn test_whoami_with_opaque_token() {
        let server = MockServer::start().await;
        mount_me(&server, &["admin"]).await;

        let (result, output) = run(&client_for(&server), Command::Whoami).await;
        assert!(result.is_ok());
        assert_eq!(output["user"]["email"], "admin@example.com");
        assert!(output.get("claims").is_none());
    }

    #[tokio::test]
    async fn test_audit_export_writes_file() {
        let server = MockServer::start().await;
        let csv = "timestamp,event_type\n2026-01-15T10:30:00Z,user.login\n";
        Mock::given(method("GET"))
            .and(path("/api/admin/siem/export"))
            .and(query_param("event_type", "user.login"))
            .respond_with(ResponseTemplate::new(200).set_body_string(csv))
            .expect(1)
            .mount(&server)
            .await;

        let output_path =
            std::env::temp_dir().join(format!("idgov-audit-{}.csv", std::process::id()));
        let (result, output) = run(
            &client_for(&server),
            Command::AuditExport {
                output: output_path.clone(),
                from: None,
                to: None,
                event_type: Some("user.login".to_string()),
            },
        )
        .await;
        assert!(result.is_ok());
        assert_eq!(output["bytes"], csv.len());
        assert_eq!(std::fs::read_to_string(&output_path).unwrap(), csv);
        let _ = std::fs::remove_file(&output_path);
    }

    #[tokio::test]
    async fn test_access_request_approve_surfaces_conflict() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/governance/access-requests/ar-1/approve"))
            .respond_with(
                ResponseTemplate::new(409).set_body_json(json!({"error": "already decided"})),
            )
            .mount(&server)
            .await;

        let (result, _) = run(
            &client_for(&server),
            Command::AccessRequests(AccessRequestCommand::Approve {
                id: "ar-1".to_string(),
                comments: None,
            }),
        )
        .await;
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "approve access request");
        assert_eq!(err.root_cause().to_string(), "already decided");
    }
}
