use crate::fixtures::test_app::TestApp;
use dealdesk_db::entities::{activity, deal};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::{Value, json};

#[tokio::test]
async fn health_works() {
    let app = TestApp::spawn().await;

    let resp = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn create_lists_once_and_journals_once() {
    let app = TestApp::spawn().await;

    let created = app
        .create_deal(json!({
            "companyName": "Acme",
            "value": 2500.0,
            "probability": 60,
            "currentStage": "lead",
            "assignedTo": "alice",
        }))
        .await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["companyName"], "Acme");
    assert_eq!(created["currentStage"], "lead");

    let resp = app
        .client
        .get(app.url("/api/pipeline/deals"))
        .send()
        .await
        .unwrap();
    let rows: Value = resp.json().await.unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"].as_i64().unwrap(), id);

    let entries = activity::Entity::find()
        .filter(activity::Column::Action.eq(activity::Action::CreateDeal))
        .all(&app.conn)
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].entity_type, "pipeline");
    assert_eq!(entries[0].metadata["dealId"].as_i64().unwrap(), id);
}

#[tokio::test]
async fn create_defaults_value_and_probability_to_zero() {
    let app = TestApp::spawn().await;

    let created = app.create_deal(json!({ "companyName": "Acme" })).await;
    assert_eq!(created["value"], 0.0);
    assert_eq!(created["probability"], 0);
    assert_eq!(created["currentStage"], deal::STAGES[0]);
}

#[tokio::test]
async fn create_rejects_negative_value() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .post(app.url("/api/pipeline/deals"))
        .json(&json!({ "companyName": "Acme", "value": -1.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 422);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["error"], "validation");
}

#[tokio::test]
async fn create_rejects_probability_above_hundred() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .post(app.url("/api/pipeline/deals"))
        .json(&json!({ "companyName": "Acme", "probability": 101 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 422);
}

#[tokio::test]
async fn update_merges_fields_and_records_changed_names() {
    let app = TestApp::spawn().await;
    let created = app
        .create_deal(json!({ "companyName": "Acme", "value": 1000.0 }))
        .await;
    let id = created["id"].as_i64().unwrap();

    let resp = app
        .client
        .put(app.url(&format!("/api/pipeline/deals/{}", id)))
        .json(&json!({ "value": 4000.0, "probability": 75 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["value"], 4000.0);
    assert_eq!(updated["probability"], 75);
    // untouched field survives the merge
    assert_eq!(updated["companyName"], "Acme");

    let entries = activity::Entity::find()
        .filter(activity::Column::Action.eq(activity::Action::UpdateDeal))
        .all(&app.conn)
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    let changed = entries[0].metadata["changedFields"].as_array().unwrap();
    assert!(changed.contains(&json!("value")));
    assert!(changed.contains(&json!("probability")));
}

#[tokio::test]
async fn update_missing_deal_is_not_found() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .put(app.url("/api/pipeline/deals/999"))
        .json(&json!({ "value": 1.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() {
    let app = TestApp::spawn().await;

    let resp = app
        .client
        .put(app.url("/api/pipeline/deals/abc"))
        .json(&json!({ "value": 1.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
}

#[tokio::test]
async fn delete_removes_row_and_journals() {
    let app = TestApp::spawn().await;
    let created = app.create_deal(json!({ "companyName": "Acme" })).await;
    let id = created["id"].as_i64().unwrap();

    let resp = app
        .client
        .delete(app.url(&format!("/api/pipeline/deals/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let json: Value = resp.json().await.unwrap();
    assert_eq!(json["success"], true);

    let resp = app
        .client
        .get(app.url("/api/pipeline/deals"))
        .send()
        .await
        .unwrap();
    let rows: Value = resp.json().await.unwrap();
    assert!(rows.as_array().unwrap().is_empty());

    // the journal entry outlives the deal it references
    let entries = activity::Entity::find()
        .filter(activity::Column::Action.eq(activity::Action::DeleteDeal))
        .all(&app.conn)
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].metadata["dealId"].as_i64().unwrap(), id);
}

#[tokio::test]
async fn failed_delete_appends_nothing() {
    let app = TestApp::spawn().await;
    app.create_deal(json!({ "companyName": "Acme" })).await;

    let before = activity::Entity::find().count(&app.conn).await.unwrap();

    let resp = app
        .client
        .delete(app.url("/api/pipeline/deals/999"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);

    let after = activity::Entity::find().count(&app.conn).await.unwrap();
    assert_eq!(before, after);
}
