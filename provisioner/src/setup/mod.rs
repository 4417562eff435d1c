use tracing::{debug, info, instrument};

use crate::cli::{ProvisionCmd, VerifyCmd};
use crate::core::client::database::{CollectionCreation, MongoClient, SchemaAdmin};
use crate::schema::{self, CollectionSpec};
use crate::types::params::MongoDBParams;
use crate::{ProvisionerError, ProvisionerResult};

pub mod plan;
pub mod verify;

pub use verify::{verify, SchemaDrift, VerifyReport};

/// What a provisioning run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionReport {
    /// Collections this run created; existing ones are not listed
    pub collections_created: Vec<String>,
    /// Index names the server reported per collection
    pub indexes: Vec<(String, Vec<String>)>,
}

/// `provision` command: connect and create every collection and index.
pub async fn run_provision(cmd: &ProvisionCmd) -> ProvisionerResult<ProvisionReport> {
    let params = MongoDBParams::try_from(cmd.mongodb_args.clone())?;
    let client = connect(&params).await?;
    provision(&client, &params.database_name).await
}

/// `verify` command: connect and fail with [`ProvisionerError::SchemaDrift`] when
/// the live schema differs from the declared one.
pub async fn run_verify(cmd: &VerifyCmd) -> ProvisionerResult<VerifyReport> {
    let params = MongoDBParams::try_from(cmd.mongodb_args.clone())?;
    let client = connect(&params).await?;
    verify(&client, &params.database_name).await?.into_result()
}

pub async fn connect(params: &MongoDBParams) -> ProvisionerResult<MongoClient> {
    info!(database = %params.database_name, app_name = %params.app_name, "Connecting to MongoDB");
    MongoClient::new(params).await.map_err(ProvisionerError::failure("connect", params.database_name.as_str()))
}

/// Ensure both collections and all their indexes exist in `database_name`.
///
/// Stops at the first failing call and returns it as
/// [`ProvisionerError::ProvisioningFailure`]. Re-running against an already
/// provisioned database changes nothing.
#[instrument(skip(admin))]
pub async fn provision<A>(admin: &A, database_name: &str) -> ProvisionerResult<ProvisionReport>
where
    A: SchemaAdmin + ?Sized,
{
    admin.ping().await.map_err(ProvisionerError::failure("ping", database_name))?;

    let collections = schema::collections();
    let mut report = ProvisionReport::default();

    let existing =
        admin.list_collection_names().await.map_err(ProvisionerError::failure("listCollections", database_name))?;
    for collection in &collections {
        if existing.iter().any(|name| name == collection.name) {
            debug!(collection = collection.name, "Collection already exists");
            continue;
        }
        match admin
            .create_collection(collection.name)
            .await
            .map_err(ProvisionerError::failure("createCollection", collection.name))?
        {
            CollectionCreation::Created => {
                info!(collection = collection.name, "Created collection");
                report.collections_created.push(collection.name.to_string());
            }
            CollectionCreation::AlreadyExists => {
                debug!(collection = collection.name, "Collection was created concurrently");
            }
        }
    }

    for collection in &collections {
        let names = ensure_indexes(admin, collection).await?;
        report.indexes.push((collection.name.to_string(), names));
    }

    info!("MongoDB {} database initialized successfully", database_name);
    Ok(report)
}

async fn ensure_indexes<A>(admin: &A, collection: &CollectionSpec) -> ProvisionerResult<Vec<String>>
where
    A: SchemaAdmin + ?Sized,
{
    for index in &collection.indexes {
        debug!(collection = collection.name, index = %index.name(), "Declaring index");
    }
    let names = admin
        .create_indexes(collection.name, collection.index_models())
        .await
        .map_err(ProvisionerError::failure("createIndexes", collection.name))?;
    info!(collection = collection.name, count = names.len(), "Indexes ensured");
    Ok(names)
}
