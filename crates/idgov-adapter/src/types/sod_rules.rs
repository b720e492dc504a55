/*
[INPUT]:  Separation-of-duties API schema
[OUTPUT]: SoD rule and violation DTOs
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::Severity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SodRule {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub first_entitlement_id: String,
    pub second_entitlement_id: String,
    pub severity: Severity,
    pub is_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_rationale: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SodRuleFilter {
    pub severity: Option<Severity>,
    pub is_enabled: Option<bool>,
    pub entitlement_id: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSodRule {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub first_entitlement_id: String,
    pub second_entitlement_id: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_rationale: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateSodRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_rationale: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationStatus {
    Active,
    Exempted,
    Remediated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SodViolation {
    pub id: String,
    pub rule_id: String,
    pub user_id: String,
    pub status: ViolationStatus,
    pub detected_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remediated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SodViolationFilter {
    pub rule_id: Option<String>,
    pub user_id: Option<String>,
    pub status: Option<ViolationStatus>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}
