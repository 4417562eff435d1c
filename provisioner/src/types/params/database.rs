use std::time::Duration;

use crate::cli::database::mongodb::MongoDBCliArgs;
use crate::{ProvisionerError, ProvisionerResult};

const URI_SCHEMES: [&str; 2] = ["mongodb://", "mongodb+srv://"];

/// Characters MongoDB rejects in database names.
const FORBIDDEN_NAME_CHARS: [char; 7] = ['/', '\\', '.', ' ', '"', '$', '\0'];

/// Longest database name the server accepts, in bytes.
const MAX_DATABASE_NAME_LEN: usize = 63;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoDBParams {
    pub connection_url: String,
    pub database_name: String,
    pub connect_timeout: Duration,
    pub server_selection_timeout: Duration,
    pub app_name: String,
}

impl TryFrom<MongoDBCliArgs> for MongoDBParams {
    type Error = ProvisionerError;

    fn try_from(args: MongoDBCliArgs) -> ProvisionerResult<Self> {
        if !URI_SCHEMES.iter().any(|scheme| args.mongodb_connection_url.starts_with(scheme)) {
            return Err(ProvisionerError::ConfigError(format!(
                "MongoDB connection URL must start with one of {URI_SCHEMES:?}"
            )));
        }
        validate_database_name(&args.mongodb_database_name)?;

        Ok(Self {
            connection_url: args.mongodb_connection_url,
            database_name: args.mongodb_database_name,
            connect_timeout: Duration::from_secs(args.mongodb_connect_timeout_secs),
            server_selection_timeout: Duration::from_secs(args.mongodb_server_selection_timeout_secs),
            app_name: args.mongodb_app_name,
        })
    }
}

fn validate_database_name(name: &str) -> ProvisionerResult<()> {
    if name.is_empty() {
        return Err(ProvisionerError::ConfigError("Database name must not be empty".to_string()));
    }
    if name.len() > MAX_DATABASE_NAME_LEN {
        return Err(ProvisionerError::ConfigError(format!(
            "Database name `{name}` is longer than {MAX_DATABASE_NAME_LEN} bytes"
        )));
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c)) {
        return Err(ProvisionerError::ConfigError(format!("Database name `{name}` contains forbidden character {c:?}")));
    }
    Ok(())
}
