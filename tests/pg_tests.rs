//! The same request contract against the PostgreSQL store. Skipped unless
//! `DATABASE_URL` points at a server the tests may create databases on.

mod common;

use std::time::Duration;

use serde_json::json;

#[tokio::test]
async fn issue_lifecycle_on_postgres() {
    let Some(app) = common::spawn_pg_app().await else {
        return;
    };

    let created = app
        .create_issue(
            "pgtest",
            &json!({
                "issue_title": "Stored",
                "issue_text": "In postgres",
                "created_by": "Tester",
                "status_text": "New",
            }),
        )
        .await;
    let id = created["_id"].as_str().unwrap().to_string();
    assert_eq!(created["open"], true);
    assert_eq!(created["assigned_to"], "");
    assert!(created.get("project").is_none());

    let missing = app
        .create_issue("pgtest", &json!({ "issue_title": "Stored" }))
        .await;
    assert_eq!(missing, json!({ "error": "required field(s) missing" }));

    let listed = app
        .list_issues("pgtest", &[("status_text", "New"), ("open", "true")])
        .await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["_id"], id.as_str());
    assert_eq!(app.list_issues("elsewhere", &[]).await, json!([]));

    tokio::time::sleep(Duration::from_millis(10)).await;

    let updated = app
        .update_issue("pgtest", &json!({ "_id": id, "assigned_to": "Dev", "open": false }))
        .await;
    assert_eq!(updated, json!({ "result": "successfully updated", "_id": id }));

    let after = app.list_issues("pgtest", &[("_id", id.as_str())]).await[0].clone();
    assert_eq!(after["assigned_to"], "Dev");
    assert_eq!(after["open"], false);
    assert_ne!(after["updated_on"], created["updated_on"]);

    let foreign = app
        .update_issue("elsewhere", &json!({ "_id": id, "assigned_to": "Nope" }))
        .await;
    assert_eq!(foreign, json!({ "error": "could not update", "_id": id }));

    let deleted = app.delete_issue("pgtest", Some(&json!({ "_id": id }))).await;
    assert_eq!(deleted, json!({ "result": "successfully deleted", "_id": id }));

    let again = app.delete_issue("pgtest", Some(&json!({ "_id": id }))).await;
    assert_eq!(again, json!({ "error": "could not delete", "_id": id }));

    common::cleanup(app).await;
}

#[tokio::test]
async fn created_on_round_trips_as_a_filter_on_postgres() {
    let Some(app) = common::spawn_pg_app().await else {
        return;
    };

    let created = app
        .create_issue(
            "pgtest",
            &json!({ "issue_title": "Dated", "issue_text": "Text", "created_by": "Tester" }),
        )
        .await;
    let created_on = created["created_on"].as_str().unwrap().to_string();

    let listed = app
        .list_issues("pgtest", &[("created_on", created_on.as_str())])
        .await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    common::cleanup(app).await;
}
