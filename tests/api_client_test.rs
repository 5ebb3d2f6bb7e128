//! HTTP contract tests for the patient service client

use intake::adapters::{Navigator, PatientApiClient, PatientTransport, Route, StaticCredential};
use intake::config::{secret_string, ApiConfig};
use intake::core::submission::SubmissionController;
use intake::domain::{PatientDraft, PatientField, TransportError, GENERIC_SUBMISSION_FAILURE};
use mockito::Matcher;
use serde_json::json;
use std::sync::Arc;

fn client_for(server: &mockito::ServerGuard) -> PatientApiClient {
    let config = ApiConfig {
        base_url: server.url(),
        ..Default::default()
    };
    PatientApiClient::new(&config).unwrap()
}

fn jane() -> PatientDraft {
    PatientDraft::new()
        .with(PatientField::FirstName, "Jane")
        .with(PatientField::LastName, "Doe")
        .with(PatientField::Email, "j@x.com")
        .with(PatientField::Phone, "555-0100")
        .with(PatientField::Gender, "female")
        .with(PatientField::DateOfBirth, "1990-01-01")
}

struct NoNavigation;

impl Navigator for NoNavigation {
    fn navigate(&self, _route: &Route) {}
}

#[tokio::test]
async fn test_posts_json_with_bearer_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/patients")
        .match_header("authorization", "Bearer abc")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "gender": "female",
            "bloodGroup": ""
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "p-1"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let token = secret_string("abc".to_string());
    let response = client.create_patient(&jane(), Some(&token)).await.unwrap();

    assert_eq!(response, json!({"id": "p-1"}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_payload_carries_every_field() {
    let mut server = mockito::Server::new_async().await;
    let every_key = PatientField::ALL
        .iter()
        .map(|field| Matcher::Regex(format!("\"{}\":", field.as_str())))
        .collect();

    let mock = server
        .mock("POST", "/api/patients")
        .match_body(Matcher::AllOf(every_key))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = client_for(&server);
    client.create_patient(&jane(), None).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_credential_sends_empty_bearer_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/patients")
        .match_header("authorization", Matcher::Regex("^Bearer ?$".to_string()))
        .with_status(201)
        .with_body("{}")
        .create_async()
        .await;

    let client = client_for(&server);
    client.create_patient(&jane(), None).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_rejection_carries_service_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/patients")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Email already registered"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let error = client.create_patient(&jane(), None).await.unwrap_err();

    assert_eq!(
        error,
        TransportError::Rejected {
            status: 400,
            message: Some("Email already registered".to_string()),
        }
    );
    assert_eq!(
        error.user_message().as_deref(),
        Some("Email already registered")
    );
}

#[tokio::test]
async fn test_rejection_without_json_has_no_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/patients")
        .with_status(500)
        .with_body("<html>Internal Server Error</html>")
        .create_async()
        .await;

    let client = client_for(&server);
    let error = client.create_patient(&jane(), None).await.unwrap_err();

    assert_eq!(error.status(), Some(500));
    assert_eq!(error.user_message(), None);
}

#[tokio::test]
async fn test_success_with_non_json_body_is_invalid_response() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/patients")
        .with_status(201)
        .with_body("created")
        .create_async()
        .await;

    let client = client_for(&server);
    let error = client.create_patient(&jane(), None).await.unwrap_err();

    assert!(matches!(error, TransportError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_unreachable_service_is_connection_failure() {
    let config = ApiConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        ..Default::default()
    };
    let client = PatientApiClient::new(&config).unwrap();

    let error = client.create_patient(&jane(), None).await.unwrap_err();

    assert!(
        matches!(
            error,
            TransportError::ConnectionFailed(_) | TransportError::Timeout(_)
        ),
        "got {error:?}"
    );
}

#[tokio::test]
async fn test_controller_shows_generic_text_for_server_error() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/patients")
        .match_header("authorization", "Bearer abc")
        .with_status(500)
        .with_body("upstream exploded")
        .expect(1)
        .create_async()
        .await;

    let controller = SubmissionController::new(
        Arc::new(client_for(&server)),
        Arc::new(StaticCredential::new("abc")),
        Arc::new(NoNavigation),
    );
    for field in [
        PatientField::FirstName,
        PatientField::LastName,
        PatientField::Email,
        PatientField::Phone,
        PatientField::Gender,
        PatientField::DateOfBirth,
    ] {
        controller.update(field, jane().get(field).to_string());
    }

    let outcome = controller.submit().await;

    assert!(!outcome.is_success());
    assert_eq!(controller.error().as_deref(), Some(GENERIC_SUBMISSION_FAILURE));
    assert_eq!(controller.draft(), jane());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_controller_success_against_service() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/patients")
        .match_body(Matcher::PartialJson(json!({"email": "j@x.com"})))
        .with_status(201)
        .with_body(r#"{"id": 42}"#)
        .expect(1)
        .create_async()
        .await;

    let controller = SubmissionController::new(
        Arc::new(client_for(&server)),
        Arc::new(StaticCredential::new("abc")),
        Arc::new(NoNavigation),
    );
    for (field, value) in jane().iter() {
        controller.update(field, value.to_string());
    }

    let outcome = controller.submit().await;

    assert!(outcome.is_success());
    assert_eq!(
        controller.success().as_deref(),
        Some("Patient Jane Doe added successfully!")
    );
    assert!(controller.draft().is_empty());
    controller.teardown();
    mock.assert_async().await;
}
