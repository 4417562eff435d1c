//! Schema provisioner for the `incident_tracker` MongoDB database.
//!
//! Creates the `incidents` and `incident_summaries` collections and every index
//! the incident tracker relies on (a unique `alertId`, a combined text index,
//! compound indexes and `expiresAt` TTL indexes). Each step is idempotent, so
//! the provisioner can run on every deployment.

pub mod cli;
pub mod core;
pub mod error;
pub mod schema;
pub mod setup;
pub mod types;
pub mod utils;


// Re-export commonly used item
pub use error::{ProvisionerError, ProvisionerResult};
