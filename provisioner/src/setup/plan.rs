use serde::Serialize;

use crate::schema::{self, CollectionSpec, IndexSpec};
use crate::ProvisionerResult;

#[derive(Debug, Serialize)]
struct PlannedIndex<'a> {
    name: String,
    #[serde(flatten)]
    spec: &'a IndexSpec,
}

#[derive(Debug, Serialize)]
struct PlannedCollection<'a> {
    name: &'a str,
    indexes: Vec<PlannedIndex<'a>>,
}

/// Human or JSON rendering of every declared collection and index.
pub fn render_plan(json: bool) -> ProvisionerResult<String> {
    let collections = schema::collections();
    if json {
        let planned: Vec<PlannedCollection<'_>> = collections.iter().map(planned_collection).collect();
        return Ok(serde_json::to_string_pretty(&planned)?);
    }

    let mut out = String::new();
    for collection in &collections {
        out.push_str(&format!("{}\n", collection.name));
        for index in &collection.indexes {
            out.push_str(&format!("  {:<48} {}{}\n", index.name(), index.key_document(), describe_options(index)));
        }
    }
    Ok(out)
}

fn planned_collection(collection: &CollectionSpec) -> PlannedCollection<'_> {
    PlannedCollection {
        name: collection.name,
        indexes: collection.indexes.iter().map(|spec| PlannedIndex { name: spec.name(), spec }).collect(),
    }
}

fn describe_options(index: &IndexSpec) -> String {
    let mut options = Vec::new();
    if index.unique {
        options.push("unique: true".to_string());
    }
    if let Some(expire_after) = index.expire_after {
        options.push(format!("expireAfterSeconds: {}", expire_after.as_secs()));
    }
    if options.is_empty() {
        String::new()
    } else {
        format!(" {{ {} }}", options.join(", "))
    }
}
