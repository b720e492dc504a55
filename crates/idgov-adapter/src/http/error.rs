/*
[INPUT]:  Error sources (transport, non-2xx responses, serialization, query building)
[OUTPUT]: Structured error type with status accessors and classification hints
[POS]:    Error handling layer - unified error type for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the governance adapter
#[derive(Error, Debug)]
pub enum GovernanceError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success response
    ///
    /// The message is the server-supplied one when the body carried it,
    /// otherwise `Failed to <operation>: <status>`.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// API returned 401
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Query parameters could not be flattened into a query string
    #[error("Invalid query parameters: {0}")]
    InvalidQuery(String),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Bearer token could not be decoded into claims
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Custom transport failed
    #[error("Transport error: {0}")]
    Transport(String),
}

impl GovernanceError {
    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            GovernanceError::Api { status, .. } => Some(*status),
            GovernanceError::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED.as_u16()),
            GovernanceError::Http(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Check if the server reported 404
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND.as_u16())
    }

    /// Check if the server rejected the credentials
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, GovernanceError::Unauthorized { .. })
    }

    /// Check if the error is a 4xx response
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|status| (400..500).contains(&status))
    }

    /// Check if repeating the call could succeed.
    ///
    /// Only a hint for callers; the adapter itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            GovernanceError::Http(err) => err.is_timeout() || err.is_connect(),
            GovernanceError::Transport(_) => true,
            GovernanceError::Api { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS.as_u16() || *status >= 500
            }
            _ => false,
        }
    }

    /// Create an error from a status code and message, routing 401 to `Unauthorized`
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        if status == StatusCode::UNAUTHORIZED {
            GovernanceError::Unauthorized {
                message: message.into(),
            }
        } else {
            GovernanceError::Api {
                status: status.as_u16(),
                message: message.into(),
            }
        }
    }
}

/// Result type alias for governance operations
pub type Result<T> = std::result::Result<T, GovernanceError>;
