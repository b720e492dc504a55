/*
[INPUT]:  GovernanceClient, caller session and connector id
[OUTPUT]: Connector detail page data and activate/deactivate/delete outcomes
[POS]:    Route layer - the connector detail page
[UPDATE]: When the page needs more data or gains actions
*/

use serde::Serialize;
use tracing::{info, warn};

use crate::http::GovernanceClient;
use crate::types::{Connector, ConnectorHealth};

use super::{ActionOutcome, RouteError, Role, Session, require_role};

/// Roles allowed to view and manage connectors
pub const CONNECTOR_ROLES: [Role; 3] = [Role::SuperAdmin, Role::Admin, Role::ConnectorAdmin];

/// Where a deleted connector's page sends the caller
pub const CONNECTORS_LIST_PATH: &str = "/connectors";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectorDetailPage {
    pub connector: Connector,
    /// `None` when the health endpoint failed
    pub health: Option<ConnectorHealth>,
}

/// Load the connector and its health concurrently.
///
/// Health is best-effort: its failure is logged and the page renders without it.
pub async fn load(
    client: &GovernanceClient,
    session: Option<&Session>,
    id: &str,
) -> Result<ConnectorDetailPage, RouteError> {
    require_role(session, &CONNECTOR_ROLES)?;

    let (connector, health) =
        tokio::join!(client.get_connector(id), client.get_connector_health(id));

    let connector = connector?;
    let health = match health {
        Ok(health) => Some(health),
        Err(err) => {
            warn!(connector_id = %id, error = %err, "connector health unavailable");
            None
        }
    };

    Ok(ConnectorDetailPage { connector, health })
}

/// Activate; the backend may answer with the updated connector or an empty 204
pub async fn activate(
    client: &GovernanceClient,
    session: Option<&Session>,
    id: &str,
) -> ActionOutcome<Option<Connector>> {
    if let Err(err) = require_role(session, &CONNECTOR_ROLES) {
        return err.into();
    }
    match client.activate_connector(id).await {
        Ok(connector) => {
            info!(connector_id = %id, "connector activated");
            ActionOutcome::success("Connector activated", connector)
        }
        Err(err) => err.into(),
    }
}

pub async fn deactivate(
    client: &GovernanceClient,
    session: Option<&Session>,
    id: &str,
) -> ActionOutcome<Option<Connector>> {
    if let Err(err) = require_role(session, &CONNECTOR_ROLES) {
        return err.into();
    }
    match client.deactivate_connector(id).await {
        Ok(connector) => {
            info!(connector_id = %id, "connector deactivated");
            ActionOutcome::success("Connector deactivated", connector)
        }
        Err(err) => err.into(),
    }
}

/// Delete, then send the caller back to the connector list
pub async fn delete(
    client: &GovernanceClient,
    session: Option<&Session>,
    id: &str,
) -> ActionOutcome<()> {
    if let Err(err) = require_role(session, &CONNECTOR_ROLES) {
        return err.into();
    }
    match client.delete_connector(id).await {
        Ok(()) => {
            info!(connector_id = %id, "connector deleted");
            ActionOutcome::redirect(CONNECTORS_LIST_PATH)
        }
        Err(err) => err.into(),
    }
}
