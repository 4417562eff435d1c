use std::collections::HashMap;

use assert_matches::assert_matches;
use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::IndexModel;
use rstest::*;

use crate::core::client::database::MockSchemaAdmin;
use crate::schema::{self, IndexSpec};
use crate::setup::verify::{verify, SchemaDrift};
use crate::tests::common::{id_index, server_view, ttl};
use crate::ProvisionerError;

const DATABASE: &str = "incident_tracker";

/// Live indexes per collection, as a fully provisioned server reports them.
fn provisioned_indexes() -> HashMap<&'static str, Vec<IndexModel>> {
    schema::collections()
        .into_iter()
        .map(|collection| {
            let mut live = vec![id_index()];
            live.extend(collection.indexes.iter().map(server_view));
            (collection.name, live)
        })
        .collect()
}

fn admin_with(collections: Vec<&'static str>, indexes: HashMap<&'static str, Vec<IndexModel>>) -> MockSchemaAdmin {
    let mut admin = MockSchemaAdmin::new();
    admin.expect_ping().returning(|| Ok(()));
    admin.expect_list_collection_names().returning(move || Ok(collections.iter().map(|c| c.to_string()).collect()));
    admin
        .expect_list_indexes()
        .returning(move |collection: &str| Ok(indexes.get(collection).cloned().unwrap_or_default()));
    admin
}

fn replace_index(live: &mut [IndexModel], name: &str, replacement: IndexModel) {
    let position = live
        .iter()
        .position(|model| model.options.as_ref().and_then(|o| o.name.as_deref()) == Some(name))
        .expect("index present");
    live[position] = replacement;
}

#[rstest]
#[tokio::test]
async fn verify_accepts_provisioned_schema() {
    let admin = admin_with(vec!["incidents", "incident_summaries"], provisioned_indexes());

    let report = verify(&admin, DATABASE).await.unwrap();

    assert!(report.is_clean(), "unexpected drift: {:?}", report.drift);
    assert!(report.extra_indexes.is_empty());
}

#[rstest]
#[tokio::test]
async fn verify_reports_missing_collection() {
    let admin = admin_with(vec!["incidents"], provisioned_indexes());

    let report = verify(&admin, DATABASE).await.unwrap();

    assert_eq!(report.drift, vec![SchemaDrift::MissingCollection { collection: "incident_summaries".to_string() }]);
}

#[rstest]
#[tokio::test]
async fn verify_reports_missing_index() {
    let mut indexes = provisioned_indexes();
    indexes
        .get_mut("incidents")
        .unwrap()
        .retain(|model| model.options.as_ref().and_then(|o| o.name.as_deref()) != Some("serviceName_1_status_1"));
    let admin = admin_with(vec!["incidents", "incident_summaries"], indexes);

    let report = verify(&admin, DATABASE).await.unwrap();

    assert_eq!(
        report.drift,
        vec![SchemaDrift::MissingIndex {
            collection: "incidents".to_string(),
            index: "serviceName_1_status_1".to_string()
        }]
    );
}

/// Field order matters for compound indexes.
#[rstest]
#[tokio::test]
async fn verify_rejects_reordered_compound_index() {
    let mut indexes = provisioned_indexes();
    let reordered = IndexModel::builder()
        .keys(doc! { "windowStart": 1, "serviceName": 1 })
        .options(IndexOptions::builder().name("windowStart_1_serviceName_1".to_string()).build())
        .build();
    replace_index(indexes.get_mut("incident_summaries").unwrap(), "serviceName_1_windowStart_1", reordered);
    let admin = admin_with(vec!["incidents", "incident_summaries"], indexes);

    let report = verify(&admin, DATABASE).await.unwrap();

    assert_eq!(
        report.drift,
        vec![SchemaDrift::MissingIndex {
            collection: "incident_summaries".to_string(),
            index: "serviceName_1_windowStart_1".to_string()
        }]
    );
    assert_eq!(report.extra_indexes, vec![("incident_summaries".to_string(), "windowStart_1_serviceName_1".to_string())]);
}

#[rstest]
#[tokio::test]
async fn verify_reports_ttl_mismatch() {
    let mut indexes = provisioned_indexes();
    let mut spec = IndexSpec::ttl("incidents", "expiresAt", std::time::Duration::ZERO);
    spec.expire_after = ttl(7_776_000);
    replace_index(indexes.get_mut("incidents").unwrap(), "expiresAt_1", server_view(&spec));
    let admin = admin_with(vec!["incidents", "incident_summaries"], indexes);

    let report = verify(&admin, DATABASE).await.unwrap();

    assert_eq!(report.drift.len(), 1);
    assert_matches!(
        &report.drift[0],
        SchemaDrift::OptionsMismatch { index, expected, found, .. }
            if index == "expiresAt_1" && expected == "expireAfterSeconds: 0" && found == "expireAfterSeconds: 7776000"
    );
}

#[rstest]
#[tokio::test]
async fn verify_reports_alert_id_without_uniqueness() {
    let mut indexes = provisioned_indexes();
    replace_index(
        indexes.get_mut("incidents").unwrap(),
        "alertId_1",
        server_view(&IndexSpec::ascending("incidents", "alertId")),
    );
    let admin = admin_with(vec!["incidents", "incident_summaries"], indexes);

    let report = verify(&admin, DATABASE).await.unwrap();

    assert_matches!(
        report.drift.as_slice(),
        [SchemaDrift::OptionsMismatch { index, expected, .. }] if index == "alertId_1" && expected == "unique: true"
    );
}

/// Three separate text fields in one index; an index over fewer fields is drift.
#[rstest]
#[tokio::test]
async fn verify_compares_text_index_fields() {
    let mut indexes = provisioned_indexes();
    let narrow = server_view(&IndexSpec::text("incidents", &["title", "description"]));
    replace_index(indexes.get_mut("incidents").unwrap(), "title_text_description_text_anomalyReasons_text", narrow);
    let admin = admin_with(vec!["incidents", "incident_summaries"], indexes);

    let report = verify(&admin, DATABASE).await.unwrap();

    assert_matches!(
        report.drift.as_slice(),
        [SchemaDrift::OptionsMismatch { index, .. }] if index == "title_text_description_text_anomalyReasons_text"
    );
}

/// Indexes created by a shell store numeric keys as doubles.
#[rstest]
#[tokio::test]
async fn verify_accepts_double_key_values() {
    let mut indexes = provisioned_indexes();
    let from_shell = IndexModel::builder()
        .keys(doc! { "serviceName": 1.0, "createdAt": 1.0 })
        .options(IndexOptions::builder().name("serviceName_1_createdAt_1".to_string()).build())
        .build();
    replace_index(indexes.get_mut("incidents").unwrap(), "serviceName_1_createdAt_1", from_shell);
    let admin = admin_with(vec!["incidents", "incident_summaries"], indexes);

    let report = verify(&admin, DATABASE).await.unwrap();

    assert!(report.is_clean(), "unexpected drift: {:?}", report.drift);
}

#[rstest]
#[tokio::test]
async fn verify_lists_unmanaged_indexes_without_failing() {
    let mut indexes = provisioned_indexes();
    indexes.get_mut("incidents").unwrap().push(
        IndexModel::builder()
            .keys(doc! { "assignee": 1 })
            .options(IndexOptions::builder().name("assignee_1".to_string()).build())
            .build(),
    );
    let admin = admin_with(vec!["incidents", "incident_summaries"], indexes);

    let report = verify(&admin, DATABASE).await.unwrap();

    assert!(report.is_clean());
    assert_eq!(report.extra_indexes, vec![("incidents".to_string(), "assignee_1".to_string())]);
}

#[rstest]
#[tokio::test]
async fn drift_becomes_an_error() {
    let admin = admin_with(vec![], HashMap::new());

    let report = verify(&admin, DATABASE).await.unwrap();
    let err = report.into_result().unwrap_err();

    assert_matches!(&err, ProvisionerError::SchemaDrift(drift) if drift.len() == 2);
    assert_eq!(err.to_string(), "Schema drift detected: 2 difference(s)");
}

#[rstest]
fn drift_is_readable() {
    let drift = SchemaDrift::MissingIndex { collection: "incidents".to_string(), index: "alertId_1".to_string() };
    assert_eq!(drift.to_string(), "index `alertId_1` is missing on `incidents`");
}
