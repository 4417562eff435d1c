use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::error::ErrorKind;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use tracing::debug;

use super::{CollectionCreation, DatabaseError, SchemaAdmin};
use crate::types::params::database::MongoDBParams;

/// MongoDB connection bound to the database being provisioned.
pub struct MongoClient {
    client: Client,
    database: Database,
}

impl MongoClient {
    /// Create a new MongoClient connection
    pub async fn new(params: &MongoDBParams) -> Result<Self, DatabaseError> {
        let mut options = ClientOptions::parse(&params.connection_url).await?;
        options.app_name = Some(params.app_name.clone());
        options.connect_timeout = Some(params.connect_timeout);
        options.server_selection_timeout = Some(params.server_selection_timeout);

        let client = Client::with_options(options)?;
        let database = client.database(&params.database_name);
        debug!(database = %params.database_name, "MongoDB client created");
        Ok(Self { client, database })
    }

    /// Get a typed collection
    pub fn collection<T>(&self, name: &str) -> Collection<T> {
        self.database.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Get the underlying MongoDB client (for advanced usage)
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Drop the selected database with everything in it.
    pub async fn drop_database(&self) -> Result<(), DatabaseError> {
        self.database.drop(None).await?;
        Ok(())
    }
}

#[async_trait]
impl SchemaAdmin for MongoClient {
    async fn ping(&self) -> Result<(), DatabaseError> {
        match self.database.run_command(doc! { "ping": 1 }, None).await {
            Ok(_) => Ok(()),
            Err(err) if matches!(*err.kind, ErrorKind::ServerSelection { .. }) => {
                Err(DatabaseError::ConnectionFailed(err.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, DatabaseError> {
        Ok(self.database.list_collection_names(None).await?)
    }

    async fn create_collection(&self, name: &str) -> Result<CollectionCreation, DatabaseError> {
        match self.database.create_collection(name, None).await {
            Ok(()) => Ok(CollectionCreation::Created),
            Err(err) => {
                let err = DatabaseError::from(err);
                if err.is_namespace_exists() {
                    Ok(CollectionCreation::AlreadyExists)
                } else {
                    Err(err)
                }
            }
        }
    }

    async fn create_indexes(&self, collection: &str, indexes: Vec<IndexModel>) -> Result<Vec<String>, DatabaseError> {
        let result = self.collection::<Document>(collection).create_indexes(indexes, None).await?;
        Ok(result.index_names)
    }

    async fn list_indexes(&self, collection: &str) -> Result<Vec<IndexModel>, DatabaseError> {
        let cursor = self.collection::<Document>(collection).list_indexes(None).await?;
        Ok(cursor.try_collect().await?)
    }
}
