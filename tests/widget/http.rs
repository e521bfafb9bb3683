//! HTTP transport integration tests.
//!
//! Starts an axum server and exercises it with reqwest.

use std::sync::Arc;

use chatbot_instructions::microsvc::{self, Service, ROLES_HEADER, USER_ID_HEADER};
use chatbot_instructions::InMemorySettingsStore;
use serde_json::{json, Value};

use crate::support::{admin, body_of, edit_request, widget};

type Shared = Arc<Service<InMemorySettingsStore>>;

/// Bind to port 0 and return the actual address.
async fn start_server(service: Shared) -> String {
    let app = microsvc::router(service);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn shared() -> Shared {
    Arc::new(Service::new(widget()))
}

#[tokio::test]
async fn health_check() {
    let base = start_server(shared()).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
    let commands = body["commands"].as_array().unwrap();
    assert!(commands.iter().any(|c| c == "save_chatbot_instructions"));
}

#[tokio::test]
async fn save_round_trip() {
    let service = shared();
    let base = start_server(service.clone()).await;
    let client = reqwest::Client::new();
    let request = edit_request(
        service.widget().tokens(),
        &admin(),
        "support",
        "editor",
        "Reply within a day.",
    );

    let resp = client
        .post(format!("{base}/save_chatbot_instructions"))
        .header(USER_ID_HEADER, "admin-1")
        .header(ROLES_HEADER, "administrator")
        .json(&request)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "success": true, "data": "Instructions saved successfully" }));
    assert_eq!(
        body_of(service.widget(), "support").as_deref(),
        Some("Reply within a day.")
    );
}

#[tokio::test]
async fn bad_nonce_is_plain_forbidden() {
    let service = shared();
    let base = start_server(service.clone()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/save_chatbot_instructions"))
        .header(USER_ID_HEADER, "admin-1")
        .header(ROLES_HEADER, "administrator")
        .json(&json!({
            "bot_id": "support",
            "min_role": "editor",
            "instructions": "hijacked",
            "nonce": "forged"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
    assert_eq!(resp.text().await.unwrap(), "Security check failed");
    assert_eq!(
        body_of(service.widget(), "support").as_deref(),
        Some("Answer politely.\nEscalate <b>refunds</b>.")
    );
}

#[tokio::test]
async fn anonymous_save_is_refused_in_envelope() {
    let service = shared();
    let base = start_server(service.clone()).await;
    let client = reqwest::Client::new();
    let anonymous = chatbot_instructions::Requester::anonymous();
    let request = edit_request(service.widget().tokens(), &anonymous, "sales", "editor", "x");

    let resp = client
        .post(format!("{base}/save_chatbot_instructions"))
        .json(&request)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "success": false, "data": "Insufficient permissions" }));
}

#[tokio::test]
async fn invalid_json_body() {
    let base = start_server(shared()).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/save_chatbot_instructions"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn widget_page_for_editor() {
    let base = start_server(shared()).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/widget?name=support&editable=1&min_role=editor"))
        .header(USER_ID_HEADER, "editor-1")
        .header(ROLES_HEADER, "editor")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let html = resp.text().await.unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("editable-instructions"));
    assert!(html.contains("data-nonce=\""));
}

#[tokio::test]
async fn inventory_requires_administrator() {
    let base = start_server(shared()).await;
    let client = reqwest::Client::new();

    let hidden = client
        .get(format!("{base}/inventory"))
        .header(USER_ID_HEADER, "editor-1")
        .header(ROLES_HEADER, "editor")
        .send()
        .await
        .unwrap();
    assert_eq!(hidden.text().await.unwrap(), "");

    let shown = client
        .get(format!("{base}/inventory"))
        .header(USER_ID_HEADER, "admin-1")
        .header(ROLES_HEADER, "administrator")
        .send()
        .await
        .unwrap();
    assert!(shown.text().await.unwrap().contains("<strong>botId:</strong> support"));
}
