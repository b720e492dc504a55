/*
[INPUT]:  Current-user records or bearer token claims
[OUTPUT]: Route session with parsed roles, plus the role gate
[POS]:    Route layer - who is calling and may they proceed
[UPDATE]: When roles are added or gating rules change
*/

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::auth::TokenClaims;
use crate::types::CurrentUser;

use super::{LOGIN_PATH, RouteError};

/// Where a signed-in user without the required role is sent
pub const DASHBOARD_PATH: &str = "/dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    ConnectorAdmin,
    Auditor,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::ConnectorAdmin => "connector_admin",
            Role::Auditor => "auditor",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    /// Accepts `super_admin`, `super-admin`, `SuperAdmin` and friends
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "superadmin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "connectoradmin" => Ok(Role::ConnectorAdmin),
            "auditor" => Ok(Role::Auditor),
            "user" => Ok(Role::User),
            _ => Err(format!("Unknown role: {s}")),
        }
    }
}

/// The authenticated caller of a route handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub roles: Vec<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

impl Session {
    pub fn new(user_id: impl Into<String>, roles: Vec<Role>) -> Self {
        Self {
            user_id: user_id.into(),
            roles,
            tenant_id: None,
        }
    }

    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    pub fn from_current_user(user: &CurrentUser) -> Self {
        Self {
            user_id: user.id.clone(),
            roles: parse_roles(&user.roles),
            tenant_id: user.tenant_id.clone(),
        }
    }

    pub fn from_claims(claims: &TokenClaims) -> Self {
        Self {
            user_id: claims.sub.clone(),
            roles: parse_roles(&claims.roles),
            tenant_id: claims.tenant_id.clone(),
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn has_any_role(&self, allowed: &[Role]) -> bool {
        allowed.iter().any(|role| self.has_role(*role))
    }
}

/// Unknown role names are dropped
fn parse_roles(names: &[String]) -> Vec<Role> {
    let mut roles = Vec::with_capacity(names.len());
    for role in names.iter().filter_map(|name| name.parse::<Role>().ok()) {
        if !roles.contains(&role) {
            roles.push(role);
        }
    }
    roles
}

/// Gate a route on the caller holding one of `allowed`.
///
/// No session redirects to the login page; a session without a matching
/// role redirects to the dashboard.
pub fn require_role<'a>(
    session: Option<&'a Session>,
    allowed: &[Role],
) -> Result<&'a Session, RouteError> {
    let session = session.ok_or_else(|| RouteError::redirect(LOGIN_PATH))?;
    if session.has_any_role(allowed) {
        Ok(session)
    } else {
        Err(RouteError::redirect(DASHBOARD_PATH))
    }
}
