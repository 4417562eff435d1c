use chrono::{DateTime, Duration, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

/// How long an incident is kept after creation unless `expires_at` is set explicitly.
pub const INCIDENT_RETENTION_DAYS: i64 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum IncidentStatus {
    Open,
    Acknowledged,
    Investigating,
    Resolved,
    Suppressed,
    Closed,
}

/// Document stored in the `incidents` collection.
///
/// Field names on the wire are camelCase and match the indexed attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Unique across the collection
    pub alert_id: String,
    pub correlation_id: Option<String>,
    pub service_name: String,
    pub hostname: Option<String>,
    pub severity: Severity,
    pub status: IncidentStatus,
    pub title: String,
    pub description: String,
    pub anomaly_score: f64,
    #[serde(default)]
    pub anomaly_reasons: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub assignee: Option<String>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
    /// The TTL monitor deletes the document once this is in the past
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub expires_at: DateTime<Utc>,
}

impl Incident {
    /// A freshly opened incident created now.
    pub fn new(alert_id: impl Into<String>, service_name: impl Into<String>, severity: Severity) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            alert_id: alert_id.into(),
            correlation_id: None,
            service_name: service_name.into(),
            hostname: None,
            severity,
            status: IncidentStatus::Open,
            title: String::new(),
            description: String::new(),
            anomaly_score: 0.0,
            anomaly_reasons: Vec::new(),
            tags: Vec::new(),
            assignee: None,
            created_at: now,
            updated_at: now,
            expires_at: now + Duration::days(INCIDENT_RETENTION_DAYS),
        }
    }

    pub fn with_text(mut self, title: impl Into<String>, description: impl Into<String>, reasons: Vec<String>) -> Self {
        self.title = title.into();
        self.description = description.into();
        self.anomaly_reasons = reasons;
        self
    }

    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = expires_at;
        self
    }
}
