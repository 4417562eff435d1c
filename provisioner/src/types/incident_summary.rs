use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use serde::{Deserialize, Serialize};

/// How long a summary is kept after creation unless `expires_at` is set explicitly.
pub const SUMMARY_RETENTION_DAYS: i64 = 180;

/// Document stored in the `incident_summaries` collection: counts for one
/// service over `[window_start, window_end)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentSummary {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub window_start: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub window_end: DateTime<Utc>,
    pub service_name: String,
    pub total_incidents: i64,
    pub critical_incidents: i64,
    pub high_incidents: i64,
    pub medium_incidents: i64,
    pub low_incidents: i64,
    pub info_incidents: i64,
    pub resolved_incidents: i64,
    pub open_incidents: i64,
    pub average_anomaly_score: f64,
    /// Minutes
    pub average_time_to_resolve: f64,
    /// Minutes
    pub average_time_to_acknowledge: f64,
    #[serde(default)]
    pub incidents_by_host: HashMap<String, i64>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub expires_at: DateTime<Utc>,
}

impl IncidentSummary {
    /// An empty summary for `service_name` over the given window.
    pub fn new(service_name: impl Into<String>, window_start: DateTime<Utc>, window_end: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            window_start,
            window_end,
            service_name: service_name.into(),
            total_incidents: 0,
            critical_incidents: 0,
            high_incidents: 0,
            medium_incidents: 0,
            low_incidents: 0,
            info_incidents: 0,
            resolved_incidents: 0,
            open_incidents: 0,
            average_anomaly_score: 0.0,
            average_time_to_resolve: 0.0,
            average_time_to_acknowledge: 0.0,
            incidents_by_host: HashMap::new(),
            created_at: now,
            expires_at: now + Duration::days(SUMMARY_RETENTION_DAYS),
        }
    }

    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = expires_at;
        self
    }
}
