//! Indexes on the `incident_summaries` collection.

use super::IndexSpec;
use crate::core::client::database::constant::{EXPIRE_AT_TIMESTAMP, INCIDENT_SUMMARIES_COLLECTION};

pub fn index_specs() -> Vec<IndexSpec> {
    vec![
        IndexSpec::ascending(INCIDENT_SUMMARIES_COLLECTION, "windowStart"),
        IndexSpec::ascending(INCIDENT_SUMMARIES_COLLECTION, "windowEnd"),
        IndexSpec::ascending(INCIDENT_SUMMARIES_COLLECTION, "serviceName"),
        IndexSpec::compound(INCIDENT_SUMMARIES_COLLECTION, &["serviceName", "windowStart"]),
        IndexSpec::ttl(INCIDENT_SUMMARIES_COLLECTION, "expiresAt", EXPIRE_AT_TIMESTAMP),
    ]
}
