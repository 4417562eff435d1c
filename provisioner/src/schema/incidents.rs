//! Indexes on the `incidents` collection.
//!
//! - `{ alertId: 1 }` unique
//! - `{ serviceName: 1 }`, `{ severity: 1 }`, `{ status: 1 }`, `{ createdAt: 1 }`,
//!   `{ hostname: 1 }`, `{ anomalyScore: 1 }`, `{ correlationId: 1 }`
//! - `{ expiresAt: 1 }` TTL, expires at the stored timestamp
//! - `{ title: "text", description: "text", anomalyReasons: "text" }` as a single index
//! - `{ serviceName: 1, createdAt: 1 }`, `{ serviceName: 1, status: 1 }`, `{ severity: 1, createdAt: 1 }`

use super::IndexSpec;
use crate::core::client::database::constant::{EXPIRE_AT_TIMESTAMP, INCIDENTS_COLLECTION};

const SINGLE_FIELD: [&str; 7] =
    ["serviceName", "severity", "status", "createdAt", "hostname", "anomalyScore", "correlationId"];

const TEXT_FIELDS: [&str; 3] = ["title", "description", "anomalyReasons"];

const COMPOUND: [[&str; 2]; 3] = [["serviceName", "createdAt"], ["serviceName", "status"], ["severity", "createdAt"]];

pub fn index_specs() -> Vec<IndexSpec> {
    let mut specs = vec![IndexSpec::ascending(INCIDENTS_COLLECTION, "alertId").unique()];
    specs.extend(SINGLE_FIELD.iter().map(|field| IndexSpec::ascending(INCIDENTS_COLLECTION, field)));
    specs.push(IndexSpec::ttl(INCIDENTS_COLLECTION, "expiresAt", EXPIRE_AT_TIMESTAMP));
    specs.push(IndexSpec::text(INCIDENTS_COLLECTION, &TEXT_FIELDS));
    specs.extend(COMPOUND.iter().map(|fields| IndexSpec::compound(INCIDENTS_COLLECTION, fields)));
    specs
}
