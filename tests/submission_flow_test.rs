//! End-to-end tests of the submission lifecycle against in-memory collaborators

use async_trait::async_trait;
use intake::adapters::{
    CredentialProvider, CredentialStore, Navigator, PatientTransport, Route, StaticCredential,
    StoredCredential,
};
use intake::config::SecretString;
use intake::core::submission::{SubmissionController, SubmissionState, SubmitOutcome};
use intake::domain::{
    PatientDraft, PatientField, TransportError, ValidationError, GENERIC_SUBMISSION_FAILURE,
};
use secrecy::ExposeSecret;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use test_case::test_case;

/// Transport that records every call and replies with a fixed result
struct RecordingTransport {
    reply: Result<serde_json::Value, TransportError>,
    latency: Duration,
    calls: Mutex<Vec<(PatientDraft, Option<String>)>>,
}

impl RecordingTransport {
    fn replying(reply: Result<serde_json::Value, TransportError>) -> Arc<Self> {
        Self::slow(reply, Duration::ZERO)
    }

    fn slow(reply: Result<serde_json::Value, TransportError>, latency: Duration) -> Arc<Self> {
        Arc::new(Self {
            reply,
            latency,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<(PatientDraft, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PatientTransport for RecordingTransport {
    async fn create_patient(
        &self,
        draft: &PatientDraft,
        credential: Option<&SecretString>,
    ) -> Result<serde_json::Value, TransportError> {
        self.calls.lock().unwrap().push((
            draft.clone(),
            credential.map(|c| c.expose_secret().as_str().to_string()),
        ));
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.reply.clone()
    }

    fn endpoint(&self) -> &str {
        "memory://api/patients"
    }
}

#[derive(Default)]
struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &Route) {
        self.routes.lock().unwrap().push(route.clone());
    }
}

fn controller_with(
    transport: Arc<RecordingTransport>,
    credentials: Arc<dyn CredentialProvider>,
    navigator: Arc<RecordingNavigator>,
) -> SubmissionController {
    SubmissionController::new(transport, credentials, navigator)
}

fn jane() -> Vec<(PatientField, &'static str)> {
    vec![
        (PatientField::FirstName, "Jane"),
        (PatientField::LastName, "Doe"),
        (PatientField::Email, "j@x.com"),
        (PatientField::Phone, "555-0100"),
        (PatientField::Gender, "female"),
        (PatientField::DateOfBirth, "1990-01-01"),
    ]
}

fn fill(controller: &SubmissionController, values: &[(PatientField, &str)]) {
    for (field, value) in values {
        controller.update(*field, *value);
    }
}

/// Lets spawned tasks run on the paused test clock
async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

#[test_case(PatientField::FirstName, "First name is required")]
#[test_case(PatientField::LastName, "Last name is required")]
#[test_case(PatientField::Email, "Email is required")]
#[test_case(PatientField::Phone, "Phone number is required")]
#[test_case(PatientField::Gender, "Gender is required")]
#[test_case(PatientField::DateOfBirth, "Date of birth is required")]
#[tokio::test]
async fn test_missing_required_field_is_reported_without_transport_call(
    missing: PatientField,
    expected: &str,
) {
    let transport = RecordingTransport::replying(Ok(json!({})));
    let navigator = Arc::new(RecordingNavigator::default());
    let controller = controller_with(
        transport.clone(),
        Arc::new(StaticCredential::new("abc")),
        navigator.clone(),
    );

    let values: Vec<_> = jane().into_iter().filter(|(f, _)| *f != missing).collect();
    fill(&controller, &values);
    let before = controller.draft();

    let outcome = controller.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
    assert!(!outcome.reached_transport());
    assert_eq!(controller.error().as_deref(), Some(expected));
    assert_eq!(controller.state(), SubmissionState::Idle);
    assert_eq!(controller.draft(), before);
    assert!(transport.calls().is_empty());
    assert!(navigator.routes().is_empty());
}

#[tokio::test]
async fn test_whitespace_only_name_is_rejected() {
    let transport = RecordingTransport::replying(Ok(json!({})));
    let controller = controller_with(
        transport.clone(),
        Arc::new(StaticCredential::new("abc")),
        Arc::new(RecordingNavigator::default()),
    );
    fill(&controller, &jane());
    controller.update(PatientField::FirstName, "   ");

    let outcome = controller.submit().await;

    assert!(matches!(
        outcome,
        SubmitOutcome::Rejected(ValidationError::FirstNameRequired)
    ));
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_first_failing_rule_wins() {
    let controller = controller_with(
        RecordingTransport::replying(Ok(json!({}))),
        Arc::new(StaticCredential::none()),
        Arc::new(RecordingNavigator::default()),
    );
    controller.update(PatientField::FirstName, "Jane");

    controller.submit().await;

    assert_eq!(controller.error().as_deref(), Some("Last name is required"));
}

#[tokio::test(start_paused = true)]
async fn test_success_resets_draft_and_navigates_after_delay() {
    let transport = RecordingTransport::replying(Ok(json!({"id": "p-1"})));
    let navigator = Arc::new(RecordingNavigator::default());
    let controller = controller_with(
        transport.clone(),
        Arc::new(StaticCredential::new("abc")),
        navigator.clone(),
    );
    fill(&controller, &jane());
    controller.update(PatientField::City, "Springfield");
    let submitted = controller.draft();

    let outcome = controller.submit().await;

    let receipt = match outcome {
        SubmitOutcome::Succeeded(receipt) => receipt,
        other => panic!("Expected success, got {other:?}"),
    };
    assert_eq!(receipt.message, "Patient Jane Doe added successfully!");
    assert_eq!(receipt.submitted, submitted);
    assert_eq!(receipt.response, json!({"id": "p-1"}));

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, submitted);
    assert_eq!(calls[0].1.as_deref(), Some("abc"));

    assert_eq!(
        controller.success().as_deref(),
        Some("Patient Jane Doe added successfully!")
    );
    assert!(controller.error().is_none());
    assert!(controller.draft().is_empty());
    assert!(!controller.is_loading());

    tokio::time::advance(Duration::from_millis(1999)).await;
    settle().await;
    assert!(navigator.routes().is_empty());
    assert!(controller.navigation_pending());

    tokio::time::advance(Duration::from_millis(1)).await;
    settle().await;
    assert_eq!(navigator.routes(), vec![Route::default()]);
    assert!(!controller.navigation_pending());
}

#[tokio::test(start_paused = true)]
async fn test_failure_keeps_draft_and_never_navigates() {
    let transport = RecordingTransport::replying(Err(TransportError::Rejected {
        status: 409,
        message: Some("Email already registered".to_string()),
    }));
    let navigator = Arc::new(RecordingNavigator::default());
    let controller = controller_with(
        transport.clone(),
        Arc::new(StaticCredential::new("abc")),
        navigator.clone(),
    );
    fill(&controller, &jane());
    let before = controller.draft();

    let outcome = controller.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Failed { .. }));
    assert!(outcome.reached_transport());
    assert_eq!(controller.error().as_deref(), Some("Email already registered"));
    assert_eq!(
        controller.state(),
        SubmissionState::Failed("Email already registered".to_string())
    );
    assert!(controller.success().is_none());
    assert_eq!(controller.draft(), before);

    tokio::time::advance(Duration::from_millis(10_000)).await;
    settle().await;
    assert!(navigator.routes().is_empty());
    assert!(!controller.navigation_pending());
}

#[tokio::test]
async fn test_failure_without_service_message_uses_generic_text() {
    let controller = controller_with(
        RecordingTransport::replying(Err(TransportError::Rejected {
            status: 500,
            message: None,
        })),
        Arc::new(StaticCredential::new("abc")),
        Arc::new(RecordingNavigator::default()),
    );
    fill(&controller, &jane());

    controller.submit().await;

    assert_eq!(controller.error().as_deref(), Some(GENERIC_SUBMISSION_FAILURE));
    assert_eq!(
        controller.error().as_deref(),
        Some("Failed to add patient. Please try again.")
    );
}

#[tokio::test]
async fn test_connection_failure_surfaces_error_text() {
    let controller = controller_with(
        RecordingTransport::replying(Err(TransportError::ConnectionFailed(
            "connection refused".to_string(),
        ))),
        Arc::new(StaticCredential::new("abc")),
        Arc::new(RecordingNavigator::default()),
    );
    fill(&controller, &jane());

    controller.submit().await;

    let error = controller.error().unwrap();
    assert!(error.contains("connection refused"), "got: {error}");
    assert!(!controller.is_loading());
}

#[tokio::test(start_paused = true)]
async fn test_submit_while_in_flight_is_ignored() {
    let transport = RecordingTransport::slow(Ok(json!({})), Duration::from_millis(100));
    let controller = controller_with(
        transport.clone(),
        Arc::new(StaticCredential::new("abc")),
        Arc::new(RecordingNavigator::default()),
    );
    fill(&controller, &jane());

    let (first, second) = tokio::join!(controller.submit(), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(controller.is_loading());
        controller.submit().await
    });

    assert!(first.is_success());
    assert!(matches!(second, SubmitOutcome::Ignored));
    assert_eq!(transport.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_edits_during_flight_do_not_change_submitted_payload() {
    let transport = RecordingTransport::slow(Ok(json!({})), Duration::from_millis(100));
    let controller = controller_with(
        transport.clone(),
        Arc::new(StaticCredential::new("abc")),
        Arc::new(RecordingNavigator::default()),
    );
    fill(&controller, &jane());

    let (outcome, _) = tokio::join!(controller.submit(), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        controller.update(PatientField::FirstName, "Janet");
    });

    assert!(outcome.is_success());
    assert_eq!(transport.calls()[0].0.first_name, "Jane");
    assert_eq!(
        controller.success().as_deref(),
        Some("Patient Jane Doe added successfully!")
    );
}

#[tokio::test]
async fn test_any_edit_clears_displayed_error() {
    let controller = controller_with(
        RecordingTransport::replying(Ok(json!({}))),
        Arc::new(StaticCredential::none()),
        Arc::new(RecordingNavigator::default()),
    );

    for field in PatientField::ALL {
        controller.submit().await;
        assert!(controller.error().is_some());

        controller.update(field, controller.draft().get(field).to_string());
        assert!(controller.error().is_none(), "edit of {field} kept the error");
    }
}

#[tokio::test]
async fn test_resubmit_after_failure_starts_new_attempt() {
    let failing = RecordingTransport::replying(Err(TransportError::Timeout(
        "operation timed out".to_string(),
    )));
    let controller = controller_with(
        failing.clone(),
        Arc::new(StaticCredential::new("abc")),
        Arc::new(RecordingNavigator::default()),
    );
    fill(&controller, &jane());
    controller.submit().await;
    assert!(matches!(controller.state(), SubmissionState::Failed(_)));

    let outcome = controller.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Failed { .. }));
    assert_eq!(failing.calls().len(), 2);
    assert_eq!(failing.calls()[0].0, failing.calls()[1].0);
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn test_cancel_navigates_immediately_without_touching_draft() {
    let transport = RecordingTransport::replying(Ok(json!({})));
    let navigator = Arc::new(RecordingNavigator::default());
    let controller = controller_with(
        transport.clone(),
        Arc::new(StaticCredential::new("abc")),
        navigator.clone(),
    );
    fill(&controller, &jane());
    let before = controller.view();

    controller.cancel();

    assert_eq!(navigator.routes(), vec![Route::default()]);
    assert_eq!(controller.view(), before);
    assert!(transport.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_during_flight_suppresses_late_navigation() {
    let transport = RecordingTransport::slow(Ok(json!({})), Duration::from_millis(100));
    let navigator = Arc::new(RecordingNavigator::default());
    let controller = controller_with(
        transport.clone(),
        Arc::new(StaticCredential::new("abc")),
        navigator.clone(),
    );
    fill(&controller, &jane());

    let (outcome, _) = tokio::join!(controller.submit(), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(controller.is_loading());
        controller.cancel();
    });

    assert!(outcome.is_success());
    assert_eq!(transport.calls().len(), 1);
    assert!(!controller.navigation_pending());

    tokio::time::advance(Duration::from_millis(5000)).await;
    settle().await;
    assert_eq!(navigator.routes(), vec![Route::default()]);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_after_success_replaces_scheduled_navigation() {
    let navigator = Arc::new(RecordingNavigator::default());
    let controller = controller_with(
        RecordingTransport::replying(Ok(json!({}))),
        Arc::new(StaticCredential::new("abc")),
        navigator.clone(),
    );
    fill(&controller, &jane());
    assert!(controller.submit().await.is_success());

    controller.cancel();
    assert_eq!(navigator.routes().len(), 1);

    tokio::time::advance(Duration::from_millis(5000)).await;
    settle().await;
    assert_eq!(navigator.routes().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_controller_suppresses_navigation() {
    let navigator = Arc::new(RecordingNavigator::default());
    let controller = controller_with(
        RecordingTransport::replying(Ok(json!({}))),
        Arc::new(StaticCredential::new("abc")),
        navigator.clone(),
    );
    fill(&controller, &jane());
    assert!(controller.submit().await.is_success());

    drop(controller);
    tokio::time::advance(Duration::from_millis(5000)).await;
    settle().await;

    assert!(navigator.routes().is_empty());
}

#[tokio::test]
async fn test_credential_is_read_at_submit_time() {
    let store = Arc::new(CredentialStore::new());
    let transport = RecordingTransport::replying(Ok(json!({})));
    let controller = controller_with(
        transport.clone(),
        Arc::new(StoredCredential::new(store.clone(), "authToken")),
        Arc::new(RecordingNavigator::default()),
    );
    fill(&controller, &jane());

    store.set("authToken", "late-token");
    controller.submit().await;

    assert_eq!(transport.calls()[0].1.as_deref(), Some("late-token"));
}

#[tokio::test]
async fn test_missing_credential_still_submits() {
    let transport = RecordingTransport::replying(Ok(json!({})));
    let controller = controller_with(
        transport.clone(),
        Arc::new(StoredCredential::new(Arc::new(CredentialStore::new()), "authToken")),
        Arc::new(RecordingNavigator::default()),
    );
    fill(&controller, &jane());

    assert!(controller.submit().await.is_success());
    assert_eq!(transport.calls()[0].1, None);
}

#[tokio::test(start_paused = true)]
async fn test_observers_see_loading_then_outcome() {
    let controller = controller_with(
        RecordingTransport::slow(Ok(json!({})), Duration::from_millis(100)),
        Arc::new(StaticCredential::new("abc")),
        Arc::new(RecordingNavigator::default()),
    );
    fill(&controller, &jane());
    let mut views = controller.subscribe();

    let (_, seen_loading) = tokio::join!(controller.submit(), async {
        views.changed().await.unwrap();
        views.borrow_and_update().is_loading()
    });

    assert!(seen_loading);
    let latest = views.borrow().clone();
    assert!(!latest.is_loading());
    assert_eq!(
        latest.success.as_deref(),
        Some("Patient Jane Doe added successfully!")
    );
}

#[tokio::test(start_paused = true)]
async fn test_cancel_while_idle_does_not_suppress_later_navigation() {
    let navigator = Arc::new(RecordingNavigator::default());
    let controller = controller_with(
        RecordingTransport::replying(Ok(json!({}))),
        Arc::new(StaticCredential::new("abc")),
        navigator.clone(),
    );

    controller.cancel();
    fill(&controller, &jane());
    assert!(controller.submit().await.is_success());

    tokio::time::advance(Duration::from_millis(2000)).await;
    settle().await;

    assert_eq!(navigator.routes(), vec![Route::default(), Route::default()]);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_suppresses_only_the_attempt_in_flight() {
    let transport = RecordingTransport::slow(Ok(json!({})), Duration::from_millis(100));
    let navigator = Arc::new(RecordingNavigator::default());
    let controller = controller_with(
        transport.clone(),
        Arc::new(StaticCredential::new("abc")),
        navigator.clone(),
    );
    fill(&controller, &jane());

    let (first, _) = tokio::join!(controller.submit(), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        controller.cancel();
    });
    assert!(first.is_success());
    assert!(!controller.navigation_pending());
    assert_eq!(navigator.routes().len(), 1);

    fill(&controller, &jane());
    assert!(controller.submit().await.is_success());
    assert!(controller.navigation_pending());

    tokio::time::advance(Duration::from_millis(2000)).await;
    settle().await;

    assert_eq!(transport.calls().len(), 2);
    assert_eq!(navigator.routes().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_wait_for_navigation_returns_once_navigated() {
    let navigator = Arc::new(RecordingNavigator::default());
    let controller = controller_with(
        RecordingTransport::replying(Ok(json!({}))),
        Arc::new(StaticCredential::new("abc")),
        navigator.clone(),
    );
    assert!(!controller.wait_for_navigation().await);

    fill(&controller, &jane());
    assert!(controller.submit().await.is_success());

    assert!(controller.wait_for_navigation().await);
    assert_eq!(navigator.routes(), vec![Route::default()]);
}

#[tokio::test(start_paused = true)]
async fn test_teardown_while_waiting_suppresses_navigation() {
    let navigator = Arc::new(RecordingNavigator::default());
    let controller = controller_with(
        RecordingTransport::replying(Ok(json!({}))),
        Arc::new(StaticCredential::new("abc")),
        navigator.clone(),
    );
    fill(&controller, &jane());
    assert!(controller.submit().await.is_success());

    let (navigated, _) = tokio::join!(controller.wait_for_navigation(), async {
        tokio::time::sleep(Duration::from_millis(500)).await;
        controller.teardown();
    });

    assert!(!navigated);
    tokio::time::advance(Duration::from_millis(5000)).await;
    settle().await;
    assert!(navigator.routes().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_teardown_suppresses_every_later_navigation() {
    let navigator = Arc::new(RecordingNavigator::default());
    let controller = controller_with(
        RecordingTransport::replying(Ok(json!({}))),
        Arc::new(StaticCredential::new("abc")),
        navigator.clone(),
    );

    controller.teardown();
    fill(&controller, &jane());
    assert!(controller.submit().await.is_success());
    assert!(!controller.navigation_pending());

    tokio::time::advance(Duration::from_millis(5000)).await;
    settle().await;
    assert!(navigator.routes().is_empty());
}
