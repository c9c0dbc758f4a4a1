//! Routing tests for the content functions server.

use aquagrow_gateway::{ContentGateway, MockBackend};
use aquagrow_site::FunctionsServer;
use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::{Method, Response, StatusCode};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;

fn server_with(backend: MockBackend) -> (FunctionsServer, Arc<MockBackend>) {
    let backend = Arc::new(backend);
    let gateway = Arc::new(ContentGateway::new(backend.clone()));
    let addr = SocketAddr::from(([127, 0, 0, 1], 0));
    (FunctionsServer::new(gateway, addr), backend)
}

async fn body_of(response: Response<http_body_util::Full<Bytes>>) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

async fn json_of(response: Response<http_body_util::Full<Bytes>>) -> Value {
    serde_json::from_slice(&body_of(response).await).unwrap()
}

const TRIAGE: &str =
    r#"{"category": "Partnership", "summary": "Co-op wants to join.", "priority": "Medium"}"#;

fn form(value: Value) -> Bytes {
    Bytes::from(value.to_string())
}

#[tokio::test]
async fn test_health() {
    let (server, _) = server_with(MockBackend::default());
    let response = server.route(&Method::GET, "/health", Bytes::new()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_of(response).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_generate_team_members_adds_photos() {
    let (server, _) = server_with(MockBackend::default().with_response(
        r#"[{"name": "Jane Doe", "role": "Founder", "bio": "Farmer's daughter."}]"#,
    ));

    let response = server
        .route(&Method::GET, "/functions/generateTeamMembers", Bytes::new())
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "application/json"
    );
    let members = json_of(response).await;
    assert_eq!(members[0]["imageUrl"], "https://picsum.photos/seed/816/400/400");
}

#[tokio::test]
async fn test_generate_faqs_failure_is_500() {
    let (server, _) = server_with(MockBackend::default().failing("quota exceeded"));

    let response = server
        .route(&Method::GET, "/functions/generateFaqs", Bytes::new())
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error = json_of(response).await["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("Failed to generate FAQs:"));
    assert!(error.contains("quota exceeded"));
}

#[tokio::test]
async fn test_inquiry_requires_post() {
    let (server, backend) = server_with(MockBackend::default());

    let response = server
        .route(&Method::GET, "/functions/processContactInquiry", Bytes::new())
        .await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body_of(response).await, "Method Not Allowed");
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_inquiry_empty_body() {
    let (server, backend) = server_with(MockBackend::default());

    let response = server
        .route(&Method::POST, "/functions/processContactInquiry", Bytes::new())
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_of(response).await, "Missing request body");
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_inquiry_missing_fields() {
    let (server, backend) = server_with(MockBackend::default().with_response(TRIAGE));

    for body in [
        form(json!({"name": "Amina", "subject": "Joining"})),
        form(json!({"name": "", "subject": "Joining", "message": "Hi"})),
        Bytes::from_static(b"[\"Amina\"]"),
    ] {
        let response = server
            .route(&Method::POST, "/functions/processContactInquiry", body)
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_of(response).await, "Missing required form fields.");
    }
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_inquiry_body_not_json_is_processing_failure() {
    let (server, backend) = server_with(MockBackend::default().with_response(TRIAGE));

    let response = server
        .route(
            &Method::POST,
            "/functions/processContactInquiry",
            Bytes::from_static(b"name=Amina&subject=Joining&message=Hi"),
        )
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error = json_of(response).await["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("Failed to process inquiry:"));
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_generate_functions_answer_any_method() {
    let (server, backend) = server_with(MockBackend::default().with_response(
        r#"[{"question": "Do I keep my land?", "answer": "Yes."}]"#,
    ));

    for method in [Method::GET, Method::POST, Method::PUT] {
        let response = server
            .route(&method, "/functions/generateFaqs", Bytes::new())
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_of(response).await[0]["answer"], "Yes.");
    }
    assert_eq!(backend.call_count(), 3);
}

#[tokio::test]
async fn test_inquiry_triaged() {
    let (server, backend) = server_with(MockBackend::default().with_response(TRIAGE));

    let response = server
        .route(
            &Method::POST,
            "/functions/processContactInquiry",
            form(json!({
                "name": "Kilimo Co-op",
                "email": "info@kilimo.example",
                "subject": "Partnership",
                "message": "We have 40 members interested."
            })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_of(response).await,
        json!({"category": "Partnership", "summary": "Co-op wants to join.", "priority": "Medium"})
    );
    assert_eq!(backend.call_count(), 1);
}

#[tokio::test]
async fn test_inquiry_generation_failure() {
    let (server, _) = server_with(MockBackend::default().with_response("Sure! Here you go."));

    let response = server
        .route(
            &Method::POST,
            "/functions/processContactInquiry",
            form(json!({"name": "A", "subject": "S", "message": "M"})),
        )
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error = json_of(response).await["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("Failed to process inquiry:"));
}

#[tokio::test]
async fn test_unknown_route() {
    let (server, _) = server_with(MockBackend::default());

    for (method, path) in [
        (Method::GET, "/functions/generateRecipes"),
        (Method::POST, "/health"),
        (Method::GET, "/"),
    ] {
        let response = server.route(&method, path, Bytes::new()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
