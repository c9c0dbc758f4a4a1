//! Use-case tests for the content gateway over the mock backend.

use aquagrow_gateway::{
    derive_image_url, ContactInquiry, ContentGateway, GatewayError, LlmError, MockBackend,
    Priority,
};
use std::sync::Arc;

fn gateway_replying(content: &str) -> (ContentGateway, Arc<MockBackend>) {
    let backend = Arc::new(MockBackend::default().with_response(content));
    (ContentGateway::new(backend.clone()), backend)
}

fn inquiry() -> ContactInquiry {
    ContactInquiry {
        name: "Daniel Otieno".to_string(),
        email: "daniel@example.com".to_string(),
        subject: "Investing".to_string(),
        message: "I'd like to fund ten farms in Machakos.".to_string(),
    }
}

#[tokio::test]
async fn test_team_members_get_square_photos() {
    let (gateway, backend) = gateway_replying(
        r#"[
            {"name": "Jane Doe", "role": "Founder & CEO", "bio": "Started it all."},
            {"name": "John Smith", "role": "Lead Agronomist", "bio": "Knows soil."}
        ]"#,
    );

    let members = gateway.team_members().await.unwrap();

    assert_eq!(members.len(), 2);
    assert_eq!(members[0].image_url, derive_image_url("Jane Doe", 400, 400));
    assert_eq!(members[1].image_url, "https://picsum.photos/seed/446/400/400");
    assert_eq!(members[1].role, "Lead Agronomist");

    let request = backend.last_request().await.unwrap();
    assert!(request.prompt_text().contains("list of 4 diverse"));
    assert!(request.result_shape().unwrap().is_array());
}

#[tokio::test]
async fn test_success_stories_expose_farmer_name() {
    let (gateway, _) = gateway_replying(
        r#"[{"name": "Grace Wanjiru", "location": "Kajiado County",
             "quote": "My tomatoes never wilt now.", "story": "Two harvests a year."}]"#,
    );

    let stories = gateway.success_stories().await.unwrap();

    assert_eq!(stories[0].farmer_name, "Grace Wanjiru");
    assert_eq!(
        stories[0].image_url,
        derive_image_url("Grace Wanjiru", 600, 400)
    );
    assert!(stories[0].image_url.ends_with("/600/400"));
}

#[tokio::test]
async fn test_faqs_returned_as_is() {
    let (gateway, _) = gateway_replying(
        r#"[{"question": "Do I keep my land?", "answer": "Yes, always."}]"#,
    );

    let faqs = gateway.faqs().await.unwrap();
    assert_eq!(faqs.len(), 1);
    assert_eq!(faqs[0].answer, "Yes, always.");
}

#[tokio::test]
async fn test_inquiry_triaged() {
    let (gateway, backend) = gateway_replying(
        r#"{"category": "Investor Relations", "summary": "Wants to fund farms.", "priority": "High"}"#,
    );

    let triage = gateway.triage_inquiry(&inquiry()).await.unwrap();

    assert_eq!(triage.priority, Priority::High);
    assert_eq!(triage.category, "Investor Relations");
    assert!(backend
        .last_request()
        .await
        .unwrap()
        .prompt_text()
        .contains("Subject: Investing"));
}

#[tokio::test]
async fn test_incomplete_inquiry_never_reaches_backend() {
    let (gateway, backend) = gateway_replying("{}");

    let err = gateway
        .triage_inquiry(&ContactInquiry {
            message: String::new(),
            ..inquiry()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::InvalidInquiry(ref missing) if missing == "message"));
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_backend_failure_surfaces_cause() {
    let backend = Arc::new(MockBackend::default().failing("API key not valid"));
    let gateway = ContentGateway::new(backend);

    let err = gateway.faqs().await.unwrap_err();

    match &err {
        GatewayError::GenerationFailed { source } => {
            assert!(matches!(source, LlmError::RequestFailed(_)));
        }
        other => panic!("expected GenerationFailed, got {:?}", other),
    }
    assert!(err.to_string().contains("API key not valid"));
}

#[tokio::test]
async fn test_prose_reply_is_non_json() {
    let (gateway, _) = gateway_replying("I'm sorry, I can't help with that.");
    assert!(matches!(
        gateway.faqs().await,
        Err(GatewayError::NonJson { .. })
    ));
}

#[tokio::test]
async fn test_shape_mismatch_rejected() {
    let (gateway, _) = gateway_replying(
        r#"{"category": "Spam", "summary": "Buy now.", "priority": "Critical"}"#,
    );

    match gateway.triage_inquiry(&inquiry()).await {
        Err(GatewayError::ShapeMismatch { path, .. }) => assert_eq!(path, "$.priority"),
        other => panic!("expected ShapeMismatch, got {:?}", other),
    }
}

#[tokio::test]
async fn test_object_where_array_expected() {
    let (gateway, _) = gateway_replying(r#"{"question": "q", "answer": "a"}"#);
    assert!(matches!(
        gateway.faqs().await,
        Err(GatewayError::ShapeMismatch { .. })
    ));
}

#[tokio::test]
async fn test_each_call_hits_backend_once() {
    let backend = Arc::new(
        MockBackend::default()
            .with_scripted(["not json", r#"[{"question": "q", "answer": "a"}]"#]),
    );
    let gateway = ContentGateway::new(backend.clone());

    assert!(gateway.faqs().await.is_err());
    assert_eq!(backend.call_count(), 1);

    assert_eq!(gateway.faqs().await.unwrap().len(), 1);
    assert_eq!(backend.call_count(), 2);
}
