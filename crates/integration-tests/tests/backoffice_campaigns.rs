//! Integration tests for campaign roster preview and draft CRUD.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations and seed data
//! - The back-office service running (cargo run -p packdesk-backoffice)
//!
//! No campaign is actually dispatched here; sends would hit the live email
//! provider.
//!
//! Run with: cargo test -p packdesk-integration-tests -- --ignored

use packdesk_integration_tests::base_url;
use reqwest::Client;
use serde_json::{Value, json};

fn client() -> Client {
    Client::builder().build().expect("Failed to create HTTP client")
}

#[tokio::test]
#[ignore = "Requires running back-office service and seeded database"]
async fn test_roster_preview_dedupes_across_sources() {
    let client = client();

    // Subscribers only
    let only_subscribers: Value = client
        .post(format!("{}/campaigns/preview", base_url()))
        .json(&json!({ "include_subscribers": true }))
        .send()
        .await
        .expect("preview")
        .json()
        .await
        .expect("json");
    let subscriber_count = only_subscribers["recipients"].as_u64().expect("count");

    // Adding customers must not double-count shared addresses
    let with_customers: Value = client
        .post(format!("{}/campaigns/preview", base_url()))
        .json(&json!({ "include_subscribers": true, "include_customers": true }))
        .send()
        .await
        .expect("preview")
        .json()
        .await
        .expect("json");
    let combined_count = with_customers["recipients"].as_u64().expect("count");

    // The seed data shares amy@acmefoods.example between the two sources
    assert!(combined_count >= subscriber_count);
    assert!(combined_count < subscriber_count + 2);
}

#[tokio::test]
#[ignore = "Requires running back-office service and database"]
async fn test_send_rejects_missing_content() {
    let resp = client()
        .post(format!("{}/campaigns/send", base_url()))
        .json(&json!({ "subject": "Hello", "content": "   " }))
        .send()
        .await
        .expect("send");
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
#[ignore = "Requires running back-office service and database"]
async fn test_draft_crud() {
    let client = client();
    let base = base_url();

    // Create
    let draft: Value = client
        .post(format!("{base}/drafts"))
        .json(&json!({
            "subject": "Spring pouch lineup",
            "content": "<p>New recyclable films are in.</p>"
        }))
        .send()
        .await
        .expect("create")
        .json()
        .await
        .expect("json");
    let id = draft["id"].as_str().expect("id").to_string();
    assert_eq!(draft["subject"], "Spring pouch lineup");

    // Update
    let resp = client
        .put(format!("{base}/drafts/{id}"))
        .json(&json!({
            "subject": "Spring pouch lineup (v2)",
            "content": "<p>Updated copy.</p>"
        }))
        .send()
        .await
        .expect("update");
    assert_eq!(resp.status(), 200);

    // List shows the update
    let drafts: Vec<Value> = client
        .get(format!("{base}/drafts"))
        .send()
        .await
        .expect("list")
        .json()
        .await
        .expect("json");
    let found = drafts
        .iter()
        .find(|d| d["id"] == json!(id))
        .expect("draft listed");
    assert_eq!(found["subject"], "Spring pouch lineup (v2)");

    // Delete
    let resp = client
        .delete(format!("{base}/drafts/{id}"))
        .send()
        .await
        .expect("delete");
    assert_eq!(resp.status(), 200);

    let resp = client
        .delete(format!("{base}/drafts/{id}"))
        .send()
        .await
        .expect("delete again");
    assert_eq!(resp.status(), 404);
}
