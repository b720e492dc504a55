/*
[INPUT]:  Peer group API schema
[OUTPUT]: Peer group, membership and refresh DTOs
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeerGroupType {
    Department,
    Location,
    Role,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerGroup {
    pub id: String,
    pub name: String,
    pub group_type: PeerGroupType,
    pub attribute_key: String,
    pub attribute_value: String,
    #[serde(default)]
    pub user_count: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PeerGroupFilter {
    pub group_type: Option<PeerGroupType>,
    pub min_size: Option<u32>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePeerGroup {
    pub name: String,
    pub group_type: PeerGroupType,
    pub attribute_key: String,
    pub attribute_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerGroupMember {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerGroupRefresh {
    pub group_id: String,
    pub user_count: u32,
    pub refreshed_at: DateTime<Utc>,
}
