pub mod constant;
pub mod error;
pub mod mongo_client;

use async_trait::async_trait;
use mongodb::IndexModel;

pub use error::DatabaseError;
pub use mongo_client::MongoClient;

/// Outcome of a create-collection call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionCreation {
    Created,
    /// The server already had the collection, e.g. created by a concurrent run.
    AlreadyExists,
}

/// Administrative operations the provisioner needs from a database server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SchemaAdmin: Send + Sync {
    /// ping - Check that the server is reachable
    async fn ping(&self) -> Result<(), DatabaseError>;

    /// list_collection_names - Names of every collection in the selected database
    async fn list_collection_names(&self) -> Result<Vec<String>, DatabaseError>;

    /// create_collection - Create a collection, reporting an existing one instead of failing
    async fn create_collection(&self, name: &str) -> Result<CollectionCreation, DatabaseError>;

    /// create_indexes - Create indexes on a collection, returning the index names
    async fn create_indexes(&self, collection: &str, indexes: Vec<IndexModel>) -> Result<Vec<String>, DatabaseError>;

    /// list_indexes - Indexes currently defined on a collection
    async fn list_indexes(&self, collection: &str) -> Result<Vec<IndexModel>, DatabaseError>;
}
