/*
[INPUT]:  Bearer tokens
[OUTPUT]: Token claims for building route sessions
[POS]:    Auth layer - token inspection only; verification is the backend's job
[UPDATE]: When token handling changes
*/

pub mod claims;

pub use claims::{TokenClaims, decode_claims};
