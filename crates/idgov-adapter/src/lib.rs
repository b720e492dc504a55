/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public identity-governance adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod api;
pub mod auth;
pub mod http;
pub mod routes;
pub mod types;

#[cfg(test)]
mod test_support;

// Re-export commonly used types from auth
pub use auth::{TokenClaims, decode_claims};

// Re-export commonly used types from http
pub use http::{
    ApiRequest,
    ApiResponse,
    AuthMode,
    ClientConfig,
    Credentials,
    GovernanceClient,
    GovernanceError,
    QueryBuilder,
    QueryValue,
    Result,
    Transport,
    build_query,
};

// Re-export route handler types
pub use routes::{ActionData, ActionOutcome, Role, RouteError, Session, require_role};

// Re-export all types
pub use types::*;
