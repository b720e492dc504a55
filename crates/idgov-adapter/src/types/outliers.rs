/*
[INPUT]:  Outlier detection API schema
[OUTPUT]: Outlier config, analysis, result, disposition and alert DTOs
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{JobStatus, Severity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierConfig {
    pub confidence_threshold: f64,
    pub frequency_threshold: f64,
    pub min_peer_group_size: u32,
    #[serde(default)]
    pub scoring_weights: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_cron: Option<String>,
    #[serde(default)]
    pub is_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateOutlierConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_peer_group_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoring_weights: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_cron: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierAnalysis {
    pub id: String,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggered_by: Option<String>,
    #[serde(default)]
    pub users_analyzed: u32,
    #[serde(default)]
    pub outliers_detected: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlierClassification {
    Normal,
    Outlier,
    Unclassifiable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierResult {
    pub id: String,
    pub analysis_id: String,
    pub user_id: String,
    pub overall_score: f64,
    pub classification: OutlierClassification,
    #[serde(default)]
    pub factor_breakdown: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutlierResultFilter {
    pub analysis_id: Option<String>,
    pub user_id: Option<String>,
    pub classification: Option<OutlierClassification>,
    pub min_score: Option<f64>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispositionStatus {
    New,
    Legitimate,
    RequiresRemediation,
    UnderInvestigation,
    Remediated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispositionRequest {
    pub status: DispositionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierDisposition {
    pub id: String,
    pub result_id: String,
    pub status: DispositionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlierAlertType {
    NewOutlier,
    ScoreIncrease,
    RepeatedOutlier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierAlert {
    pub id: String,
    pub result_id: String,
    pub user_id: String,
    pub alert_type: OutlierAlertType,
    pub severity: Severity,
    pub score: f64,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub is_dismissed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutlierAlertFilter {
    pub severity: Option<Severity>,
    pub is_read: Option<bool>,
    pub is_dismissed: Option<bool>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}
