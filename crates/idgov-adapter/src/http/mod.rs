/*
[INPUT]:  HTTP client configuration, auth mode and transport
[OUTPUT]: Request building, dispatch and response interpretation
[POS]:    HTTP layer - REST API communication
[UPDATE]: When changing client behavior or the transport seam
*/

pub mod client;
pub mod error;
pub mod query;
pub mod transport;

pub use error::{GovernanceError, Result};
pub use query::{QueryBuilder, QueryValue, build_query, encode_segment};
pub use transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport};

pub use client::{
    AuthMode, ClientConfig, Credentials, GovernanceClient, PreparedRequest, REQUEST_ID_HEADER,
    TENANT_HEADER,
};
