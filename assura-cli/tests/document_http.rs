//! `HttpDocumentService` against an in-process axum stub.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use assura_cli::app::App;
use assura_cli::config::Mode;
use assura_cli::document::{DocumentError, DocumentService, Generated, HttpDocumentService};
use assura_cli::page::{AlertLevel, Button, MemoryAlerts};
use assura_types::constants::CONTRACT_ADDRESS;
use assura_types::customer::CustomerRecord;

type Seen = Arc<Mutex<Vec<Value>>>;

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/generate-contract", addr)
}

async fn contract_stub() -> (String, Seen) {
    let seen: Seen = Arc::default();
    let router = Router::new()
        .route(
            "/generate-contract",
            post(|State(seen): State<Seen>, Json(body): Json<Value>| async move {
                seen.lock().unwrap().push(body);
                Json(json!({ "contract": "DOC-1" }))
            }),
        )
        .with_state(seen.clone());
    (serve(router).await, seen)
}

async fn failing_stub() -> String {
    let router = Router::new().route(
        "/generate-contract",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    serve(router).await
}

fn live_app(endpoint: &str) -> (App, MemoryAlerts) {
    let alerts = MemoryAlerts::new();
    let app = App::new(
        Mode::Live,
        None,
        CONTRACT_ADDRESS,
        Arc::new(HttpDocumentService::new(endpoint)),
        Arc::new(alerts.clone()),
    );
    (app, alerts)
}

fn john_doe() -> CustomerRecord {
    CustomerRecord {
        name: "John Doe".to_string(),
        age: Some(30),
        policy_number: None,
        insurance_type: Some("Life Insurance".to_string()),
    }
}

#[tokio::test]
async fn test_document_lands_in_display_area() {
    let (endpoint, seen) = contract_stub().await;
    let (app, alerts) = live_app(&endpoint);

    assert!(app.submit_customer_form(john_doe()).await);
    assert_eq!(app.display(), "DOC-1");
    assert!(app.is_enabled(Button::Claim));
    assert_eq!(
        alerts.messages(),
        vec!["Customer information received", "Recorded on the blockchain"]
    );

    let bodies = seen.lock().unwrap();
    assert_eq!(
        bodies[0],
        json!({
            "customer_data": {
                "name": "John Doe",
                "age": 30,
                "insurance_type": "Life Insurance"
            }
        })
    );
}

#[tokio::test]
async fn test_server_error_leaves_display_unchanged() {
    let endpoint = failing_stub().await;
    let (app, alerts) = live_app(&endpoint);

    assert!(!app.submit_customer_form(john_doe()).await);
    assert_eq!(app.display(), "");
    assert!(!app.is_enabled(Button::Claim));

    let last = alerts.last().unwrap();
    assert_eq!(
        last.message,
        "An error occurred while generating the insurance contract."
    );
    assert_eq!(last.level, AlertLevel::Danger);
}

#[tokio::test]
async fn test_status_and_missing_field_errors() {
    let endpoint = failing_stub().await;
    let err = HttpDocumentService::new(&endpoint)
        .generate(&john_doe())
        .await
        .unwrap_err();
    assert!(matches!(err, DocumentError::Status(500)));

    let router = Router::new().route(
        "/generate-contract",
        post(|| async { Json(json!({ "status": "ok" })) }),
    );
    let endpoint = serve(router).await;
    let err = HttpDocumentService::new(&endpoint)
        .generate(&john_doe())
        .await
        .unwrap_err();
    assert!(matches!(err, DocumentError::MissingField));
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let router = Router::new().route("/generate-contract", post(|| async { "<html>" }));
    let endpoint = serve(router).await;
    let err = HttpDocumentService::new(&endpoint)
        .generate(&john_doe())
        .await
        .unwrap_err();
    assert!(matches!(err, DocumentError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_generated_text_is_verbatim() {
    let text = "INSURANCE CONTRACT\n\nInsured: John Doe\n";
    let router = Router::new().route(
        "/generate-contract",
        post(move || async move { Json(json!({ "contract": text })) }),
    );
    let endpoint = serve(router).await;
    let out = tokio::time::timeout(
        Duration::from_secs(5),
        HttpDocumentService::new(&endpoint).generate(&john_doe()),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(out, Generated::Document(text.to_string()));
}
