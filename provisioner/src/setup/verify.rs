//! Comparison of the live schema with the declared one.

use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

use mongodb::bson::{Bson, Document};
use mongodb::IndexModel;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::core::client::database::SchemaAdmin;
use crate::schema::{self, IndexKey, IndexSpec};
use crate::{ProvisionerError, ProvisionerResult};

/// Name of the index the server maintains on `_id`.
const ID_INDEX_NAME: &str = "_id_";

/// Key the server stores in place of the fields of a text index.
const TEXT_INDEX_KEY: &str = "_fts";

/// One difference between the declared and the live schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaDrift {
    MissingCollection { collection: String },
    MissingIndex { collection: String, index: String },
    OptionsMismatch { collection: String, index: String, expected: String, found: String },
}

impl fmt::Display for SchemaDrift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaDrift::MissingCollection { collection } => write!(f, "collection `{collection}` is missing"),
            SchemaDrift::MissingIndex { collection, index } => {
                write!(f, "index `{index}` is missing on `{collection}`")
            }
            SchemaDrift::OptionsMismatch { collection, index, expected, found } => {
                write!(f, "index `{index}` on `{collection}` has {found}, expected {expected}")
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    pub drift: Vec<SchemaDrift>,
    /// Indexes present on a managed collection that are not declared (`_id_` excluded)
    pub extra_indexes: Vec<(String, String)>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.drift.is_empty()
    }

    pub fn into_result(self) -> ProvisionerResult<Self> {
        if self.is_clean() {
            Ok(self)
        } else {
            Err(ProvisionerError::SchemaDrift(self.drift))
        }
    }
}

/// List collections and indexes of `database_name` and report how they differ
/// from [`schema::collections`].
#[instrument(skip(admin))]
pub async fn verify<A>(admin: &A, database_name: &str) -> ProvisionerResult<VerifyReport>
where
    A: SchemaAdmin + ?Sized,
{
    admin.ping().await.map_err(ProvisionerError::failure("ping", database_name))?;
    let existing =
        admin.list_collection_names().await.map_err(ProvisionerError::failure("listCollections", database_name))?;

    let mut report = VerifyReport::default();
    for collection in schema::collections() {
        if !existing.iter().any(|name| name == collection.name) {
            report.drift.push(SchemaDrift::MissingCollection { collection: collection.name.to_string() });
            continue;
        }

        let live = admin
            .list_indexes(collection.name)
            .await
            .map_err(ProvisionerError::failure("listIndexes", collection.name))?;

        let mut matched = BTreeSet::new();
        for spec in &collection.indexes {
            match live.iter().position(|model| keys_match(spec, &model.keys)) {
                Some(position) => {
                    matched.insert(position);
                    if let Some(drift) = compare_options(spec, &live[position]) {
                        report.drift.push(drift);
                    }
                }
                None => report
                    .drift
                    .push(SchemaDrift::MissingIndex { collection: collection.name.to_string(), index: spec.name() }),
            }
        }

        for (position, model) in live.iter().enumerate() {
            let name = index_name(model);
            if matched.contains(&position) || name == ID_INDEX_NAME {
                continue;
            }
            info!(collection = collection.name, index = %name, "Index is not managed by the provisioner");
            report.extra_indexes.push((collection.name.to_string(), name));
        }
    }

    if report.is_clean() {
        info!("MongoDB {} schema matches the declared collections and indexes", database_name);
    } else {
        for drift in &report.drift {
            warn!(%drift, "Schema drift");
        }
    }
    Ok(report)
}

fn index_name(model: &IndexModel) -> String {
    model.options.as_ref().and_then(|options| options.name.clone()).unwrap_or_default()
}

/// Whether `live` is the key document the server stores for `spec`.
///
/// Text indexes are stored as `{ _fts: "text", _ftsx: 1 }` with the fields in
/// `weights`, so only the marker is checked here.
fn keys_match(spec: &IndexSpec, live: &Document) -> bool {
    if spec.is_text() {
        return matches!(live.get(TEXT_INDEX_KEY), Some(Bson::String(kind)) if kind == "text");
    }
    live.len() == spec.keys.len()
        && live.iter().zip(&spec.keys).all(|((live_field, live_value), (field, key))| {
            live_field == field && key_value_matches(*key, live_value)
        })
}

fn key_value_matches(key: IndexKey, value: &Bson) -> bool {
    match (key, value) {
        (IndexKey::Ascending, Bson::Int32(v)) => *v == 1,
        (IndexKey::Ascending, Bson::Int64(v)) => *v == 1,
        (IndexKey::Ascending, Bson::Double(v)) => *v == 1.0,
        (IndexKey::Text, Bson::String(v)) => v == "text",
        _ => false,
    }
}

fn compare_options(spec: &IndexSpec, live: &IndexModel) -> Option<SchemaDrift> {
    let options = live.options.clone().unwrap_or_default();
    let mismatch = |expected: String, found: String| SchemaDrift::OptionsMismatch {
        collection: spec.collection.to_string(),
        index: spec.name(),
        expected,
        found,
    };

    let unique = options.unique.unwrap_or(false);
    if unique != spec.unique {
        return Some(mismatch(format!("unique: {}", spec.unique), format!("unique: {unique}")));
    }

    if options.expire_after != spec.expire_after {
        return Some(mismatch(describe_ttl(spec.expire_after), describe_ttl(options.expire_after)));
    }

    if spec.is_text() {
        let expected: BTreeSet<&str> = spec.fields().into_iter().collect();
        let found: BTreeSet<&str> =
            options.weights.as_ref().map(|weights| weights.keys().map(String::as_str).collect()).unwrap_or_default();
        if expected != found {
            return Some(mismatch(format!("text fields {expected:?}"), format!("text fields {found:?}")));
        }
    }

    None
}

fn describe_ttl(expire_after: Option<Duration>) -> String {
    match expire_after {
        Some(duration) => format!("expireAfterSeconds: {}", duration.as_secs()),
        None => "no TTL".to_string(),
    }
}
