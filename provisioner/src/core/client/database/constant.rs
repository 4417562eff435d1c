use std::time::Duration;

/// Database the provisioner targets unless told otherwise.
pub const DEFAULT_DATABASE_NAME: &str = "incident_tracker";

/// Collection name for incidents
///
/// One document per alert, keyed by the unique `alertId`.
pub const INCIDENTS_COLLECTION: &str = "incidents";

/// Collection name for incident summaries
///
/// Windowed aggregates per service, bounded by `windowStart` and `windowEnd`.
pub const INCIDENT_SUMMARIES_COLLECTION: &str = "incident_summaries";

/// TTL offset for `expiresAt` fields: the stored timestamp is the expiry time.
pub const EXPIRE_AT_TIMESTAMP: Duration = Duration::from_secs(0);

/// Server error codes the provisioner inspects.
pub mod error_code {
    pub const NAMESPACE_EXISTS: i32 = 48;
    pub const INDEX_OPTIONS_CONFLICT: i32 = 85;
    pub const INDEX_KEY_SPECS_CONFLICT: i32 = 86;
    pub const DUPLICATE_KEY: i32 = 11000;
}
