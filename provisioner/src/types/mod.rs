pub mod incident;
pub mod incident_summary;
pub mod params;

pub use incident::{Incident, IncidentStatus, Severity};
pub use incident_summary::IncidentSummary;
