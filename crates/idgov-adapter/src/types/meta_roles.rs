/*
[INPUT]:  Meta-role API schema
[OUTPUT]: Meta-role DTOs, simulation results and inheritance records
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetaRoleStatus {
    Active,
    Disabled,
}

/// One matching criterion, e.g. `department eq "finance"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaRoleCriterion {
    pub field: String,
    pub operator: String,
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaRole {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: i32,
    pub status: MetaRoleStatus,
    #[serde(default)]
    pub criteria: Vec<MetaRoleCriterion>,
    #[serde(default)]
    pub entitlement_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetaRoleFilter {
    pub status: Option<MetaRoleStatus>,
    pub name: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMetaRole {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    pub criteria: Vec<MetaRoleCriterion>,
    pub entitlement_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateMetaRole {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Vec<MetaRoleCriterion>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entitlement_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaRoleSimulation {
    pub meta_role_id: String,
    pub matching_roles: u32,
    #[serde(default)]
    pub roles_to_add: Vec<String>,
    #[serde(default)]
    pub roles_to_remove: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaRoleInheritance {
    pub id: String,
    pub meta_role_id: String,
    pub child_role_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_role_name: Option<String>,
    pub matched_at: DateTime<Utc>,
}
