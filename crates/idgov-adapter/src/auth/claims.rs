/*
[INPUT]:  Bearer token (JWT) strings
[OUTPUT]: Decoded, unverified token claims
[POS]:    Auth layer - reads identity hints out of a bearer token
[UPDATE]: When the backend adds or renames token claims
*/

use base64::{
    Engine as _,
    engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::http::{GovernanceError, Result};

/// Claims carried in the payload segment of a backend-issued JWT
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawClaims")]
pub struct TokenClaims {
    pub sub: String,
    /// `tenant_id`, or the short `tid` claim when that is absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    /// Expiry as seconds since the epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Payload as issued; some tokens carry `tid`, some `tenant_id`, some both
#[derive(Deserialize)]
struct RawClaims {
    sub: String,
    #[serde(default)]
    tenant_id: Option<String>,
    #[serde(default)]
    tid: Option<String>,
    #[serde(default)]
    roles: Vec<String>,
    #[serde(default)]
    exp: Option<i64>,
}

impl From<RawClaims> for TokenClaims {
    fn from(raw: RawClaims) -> Self {
        Self {
            sub: raw.sub,
            tenant_id: raw.tenant_id.or(raw.tid),
            roles: raw.roles,
            exp: raw.exp,
        }
    }
}

impl TokenClaims {
    /// Tokens without `exp` never expire client-side
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp.is_some_and(|exp| now.timestamp() >= exp)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }
}

/// Decode the payload of `token` without checking its signature.
///
/// Only the backend can verify the token; this is for routing and display.
pub fn decode_claims(token: &str) -> Result<TokenClaims> {
    let token = token.trim();
    let token = token.strip_prefix("Bearer ").unwrap_or(token);
    let payload_b64 = token
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| GovernanceError::InvalidToken("token is not a JWT".to_string()))?;

    let payload_bytes = URL_SAFE_NO_PAD
        .decode(payload_b64)
        .or_else(|_| URL_SAFE.decode(payload_b64))
        .map_err(|e| GovernanceError::InvalidToken(format!("invalid payload base64: {e}")))?;

    serde_json::from_slice(&payload_bytes)
        .map_err(|e| GovernanceError::InvalidToken(format!("invalid claims: {e}")))
}
