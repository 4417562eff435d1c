use clap::Args;

use crate::core::client::database::constant::DEFAULT_DATABASE_NAME;

/// Parameters used to connect to MongoDB.
#[derive(Debug, Clone, Args)]
#[group()]
pub struct MongoDBCliArgs {
    /// The connection string to the MongoDB server.
    #[arg(
        env = "INCIDENT_PROVISIONER_MONGODB_CONNECTION_URL",
        long,
        default_value = "mongodb://localhost:27017"
    )]
    pub mongodb_connection_url: String,

    /// The name of the database to provision.
    #[arg(env = "INCIDENT_PROVISIONER_DATABASE_NAME", long, default_value = DEFAULT_DATABASE_NAME)]
    pub mongodb_database_name: String,

    /// Seconds to wait for a connection to be established.
    #[arg(env = "INCIDENT_PROVISIONER_MONGODB_CONNECT_TIMEOUT_SECS", long, default_value_t = 10)]
    pub mongodb_connect_timeout_secs: u64,

    /// Seconds to wait for a suitable server before giving up.
    #[arg(env = "INCIDENT_PROVISIONER_MONGODB_SERVER_SELECTION_TIMEOUT_SECS", long, default_value_t = 10)]
    pub mongodb_server_selection_timeout_secs: u64,

    /// Application name reported to the server.
    #[arg(env = "INCIDENT_PROVISIONER_MONGODB_APP_NAME", long, default_value = "incident-provisioner")]
    pub mongodb_app_name: String,
}
