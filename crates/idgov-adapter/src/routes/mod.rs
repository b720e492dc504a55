/*
[INPUT]:  Sessions, GovernanceClient and route parameters
[OUTPUT]: Page load data, action outcomes and route errors
[POS]:    Route layer - role gating and error mapping around client calls
[UPDATE]: When adding route handlers or changing error mapping
*/

pub mod connector_detail;
pub mod session;

use serde::Serialize;
use thiserror::Error;

use crate::http::GovernanceError;

pub use session::{DASHBOARD_PATH, Role, Session, require_role};

/// Where unauthenticated callers are sent
pub const LOGIN_PATH: &str = "/login";

/// Failure of a page load
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("redirect to {location}")]
    Redirect { location: String },

    #[error("{status}: {message}")]
    Http { status: u16, message: String },
}

impl RouteError {
    pub fn redirect(location: impl Into<String>) -> Self {
        RouteError::Redirect {
            location: location.into(),
        }
    }
}

impl From<GovernanceError> for RouteError {
    /// 401 sends the caller to the login page; anything else keeps its
    /// status, or 500 when there is none
    fn from(err: GovernanceError) -> Self {
        if err.is_unauthorized() {
            return RouteError::redirect(LOGIN_PATH);
        }
        RouteError::Http {
            status: err.status().unwrap_or(500),
            message: err.to_string(),
        }
    }
}

/// Payload of a successful form action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionData<T> {
    pub message: String,
    pub data: T,
}

/// Result of a form action
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionOutcome<T> {
    Success(ActionData<T>),
    Redirect { location: String },
    Fail { status: u16, error: String },
}

impl<T> ActionOutcome<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        ActionOutcome::Success(ActionData {
            message: message.into(),
            data,
        })
    }

    pub fn redirect(location: impl Into<String>) -> Self {
        ActionOutcome::Redirect {
            location: location.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ActionOutcome::Success(_))
    }
}

impl<T> From<GovernanceError> for ActionOutcome<T> {
    fn from(err: GovernanceError) -> Self {
        if err.is_unauthorized() {
            return ActionOutcome::redirect(LOGIN_PATH);
        }
        ActionOutcome::Fail {
            status: err.status().unwrap_or(500),
            error: err.to_string(),
        }
    }
}

impl<T> From<RouteError> for ActionOutcome<T> {
    fn from(err: RouteError) -> Self {
        match err {
            RouteError::Redirect { location } => ActionOutcome::Redirect { location },
            RouteError::Http { status, message } => ActionOutcome::Fail {
                status,
                error: message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_route_error_from_governance_error() {
        let not_found = GovernanceError::api_error(StatusCode::NOT_FOUND, "Failed to fetch connector: 404");
        assert_eq!(
            RouteError::from(not_found),
            RouteError::Http {
                status: 404,
                message: "Failed to fetch connector: 404".to_string(),
            }
        );

        let expired = GovernanceError::api_error(StatusCode::UNAUTHORIZED, "expired");
        assert_eq!(RouteError::from(expired), RouteError::redirect("/login"));

        let transport = GovernanceError::Transport("connection refused".to_string());
        assert!(matches!(
            RouteError::from(transport),
            RouteError::Http { status: 500, .. }
        ));
    }

    #[test]
    fn test_action_outcome_serializes_tagged() {
        let outcome: ActionOutcome<()> = ActionOutcome::Fail {
            status: 409,
            error: "busy".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({"type": "fail", "status": 409, "error": "busy"})
        );
    }
}
