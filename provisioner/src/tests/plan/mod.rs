use rstest::*;
use serde_json::Value;

use crate::setup::plan::render_plan;

#[rstest]
fn text_plan_lists_every_index() {
    let plan = render_plan(false).unwrap();

    assert!(plan.starts_with("incidents\n"));
    assert!(plan.contains("\nincident_summaries\n"));
    assert_eq!(plan.lines().filter(|line| line.starts_with("  ")).count(), 18);
    assert!(plan.contains("{ unique: true }"));
    assert_eq!(plan.matches("expireAfterSeconds: 0").count(), 2);
}

#[rstest]
fn json_plan_describes_options() {
    let plan: Value = serde_json::from_str(&render_plan(true).unwrap()).unwrap();

    let collections = plan.as_array().unwrap();
    assert_eq!(collections.len(), 2);
    assert_eq!(collections[0]["name"], "incidents");
    assert_eq!(collections[0]["indexes"].as_array().unwrap().len(), 13);
    assert_eq!(collections[1]["indexes"].as_array().unwrap().len(), 5);

    let alert_id = &collections[0]["indexes"][0];
    assert_eq!(alert_id["name"], "alertId_1");
    assert_eq!(alert_id["unique"], true);
    assert_eq!(alert_id["expire_after"], Value::Null);

    let ttl = &collections[1]["indexes"][4];
    assert_eq!(ttl["name"], "expiresAt_1");
    assert_eq!(ttl["expire_after"], 0);
}
