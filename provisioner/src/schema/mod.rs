//! Declarative description of the `incident_tracker` schema.
//!
//! Every collection and index the provisioner manages is listed here as plain
//! data. The provisioner, the verifier and the `plan` command all iterate the
//! same table, so adding an index is a one-line change in the collection's
//! module.

pub mod incident_summaries;
pub mod incidents;

use mongodb::bson::{Bson, Document};
use mongodb::options::IndexOptions;
use mongodb::IndexModel;
use serde::Serialize;
use std::time::Duration;

use crate::core::client::database::constant::{INCIDENTS_COLLECTION, INCIDENT_SUMMARIES_COLLECTION};

/// Direction or type marker for one field of an index key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
pub enum IndexKey {
    #[strum(serialize = "1")]
    Ascending,
    #[strum(serialize = "text")]
    Text,
}

impl IndexKey {
    /// Value stored in the index key document.
    pub fn to_bson(self) -> Bson {
        match self {
            IndexKey::Ascending => Bson::Int32(1),
            IndexKey::Text => Bson::String("text".to_string()),
        }
    }
}

/// One index on one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexSpec {
    pub collection: &'static str,
    pub keys: Vec<(&'static str, IndexKey)>,
    pub unique: bool,
    #[serde(serialize_with = "serialize_expire_after")]
    pub expire_after: Option<Duration>,
}

impl IndexSpec {
    /// Single ascending field.
    pub fn ascending(collection: &'static str, field: &'static str) -> Self {
        Self::compound(collection, &[field])
    }

    /// Ordered ascending fields.
    pub fn compound(collection: &'static str, fields: &[&'static str]) -> Self {
        Self {
            collection,
            keys: fields.iter().map(|field| (*field, IndexKey::Ascending)).collect(),
            unique: false,
            expire_after: None,
        }
    }

    /// One combined text index over all `fields`.
    pub fn text(collection: &'static str, fields: &[&'static str]) -> Self {
        Self {
            collection,
            keys: fields.iter().map(|field| (*field, IndexKey::Text)).collect(),
            unique: false,
            expire_after: None,
        }
    }

    /// Documents expire once `field` is older than `after`.
    pub fn ttl(collection: &'static str, field: &'static str, after: Duration) -> Self {
        Self { expire_after: Some(after), ..Self::ascending(collection, field) }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn is_text(&self) -> bool {
        self.keys.iter().any(|(_, key)| *key == IndexKey::Text)
    }

    /// Default index name, e.g. `serviceName_1_createdAt_1` or
    /// `title_text_description_text_anomalyReasons_text`.
    pub fn name(&self) -> String {
        self.keys.iter().map(|(field, key)| format!("{field}_{key}")).collect::<Vec<_>>().join("_")
    }

    /// Fields covered by the index, in key order.
    pub fn fields(&self) -> Vec<&'static str> {
        self.keys.iter().map(|(field, _)| *field).collect()
    }

    pub fn key_document(&self) -> Document {
        let mut keys = Document::new();
        for (field, key) in &self.keys {
            keys.insert(*field, key.to_bson());
        }
        keys
    }

    /// Driver model for `createIndexes`, always carrying [`IndexSpec::name`].
    ///
    /// The driver derives a missing name from the BSON display of each key
    /// value, which quotes string values (`title_"text"_...`).
    pub fn to_index_model(&self) -> IndexModel {
        let options = IndexOptions::builder()
            .name(self.name())
            .unique(self.unique.then_some(true))
            .expire_after(self.expire_after)
            .build();
        IndexModel::builder().keys(self.key_document()).options(options).build()
    }
}

fn serialize_expire_after<S: serde::Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(duration) => serializer.serialize_some(&duration.as_secs()),
        None => serializer.serialize_none(),
    }
}

/// A collection with its full index list.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionSpec {
    pub name: &'static str,
    pub indexes: Vec<IndexSpec>,
}

impl CollectionSpec {
    pub fn index_models(&self) -> Vec<IndexModel> {
        self.indexes.iter().map(IndexSpec::to_index_model).collect()
    }
}

/// Every collection in creation order.
pub fn collections() -> Vec<CollectionSpec> {
    vec![
        CollectionSpec { name: INCIDENTS_COLLECTION, indexes: incidents::index_specs() },
        CollectionSpec { name: INCIDENT_SUMMARIES_COLLECTION, indexes: incident_summaries::index_specs() },
    ]
}
