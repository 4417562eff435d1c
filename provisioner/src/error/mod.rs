use thiserror::Error;

use crate::core::client::database::DatabaseError;
use crate::setup::verify::SchemaDrift;

/// Result type for provisioner operations
pub type ProvisionerResult<T> = Result<T, ProvisionerError>;

/// Error types for the provisioner
#[derive(Error, Debug)]
pub enum ProvisionerError {
    /// An administrative call failed; the database error is kept verbatim.
    #[error("Provisioning failed while running `{operation}` on `{target}`: {source}")]
    ProvisioningFailure {
        operation: &'static str,
        target: String,
        #[source]
        source: DatabaseError,
    },

    /// The live schema does not match the declared one
    #[error("Schema drift detected: {} difference(s)", .0.len())]
    SchemaDrift(Vec<SchemaDrift>),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to render plan: {0}")]
    PlanRenderError(#[from] serde_json::Error),
}

impl ProvisionerError {
    pub(crate) fn failure(operation: &'static str, target: impl Into<String>) -> impl FnOnce(DatabaseError) -> Self {
        let target = target.into();
        move |source| ProvisionerError::ProvisioningFailure { operation, target, source }
    }

    /// Underlying database error for provisioning failures.
    pub fn database_error(&self) -> Option<&DatabaseError> {
        match self {
            ProvisionerError::ProvisioningFailure { source, .. } => Some(source),
            _ => None,
        }
    }
}
