//! Submission controller
//!
//! Owns the draft store, validation and the submit lifecycle. Presentation
//! layers forward edits, submit and cancel intents here and render the
//! [`FormView`] published through [`SubmissionController::subscribe`].

use super::schedule::{wait_for_completion, ScheduledNavigation};
use super::state::{success_message, FormView, SubmissionReceipt, SubmissionState, SubmitOutcome};
use crate::adapters::api::{PatientApiClient, PatientTransport};
use crate::adapters::credentials::{CredentialProvider, CredentialStore, StoredCredential};
use crate::adapters::navigation::{Navigator, Route};
use crate::config::{IntakeConfig, NavigationConfig};
use crate::core::draft::DraftStore;
use crate::core::validation::validate;
use crate::domain::{PatientDraft, PatientField, Result, GENERIC_SUBMISSION_FAILURE};
use crate::logging::duration_ms;
use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use uuid::Uuid;

/// Tunables for a controller instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerSettings {
    /// Delay between a successful submission and navigation
    pub success_delay: Duration,
    /// Where to go after success or cancel
    pub dashboard: Route,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self::from(&NavigationConfig::default())
    }
}

impl From<&NavigationConfig> for ControllerSettings {
    fn from(config: &NavigationConfig) -> Self {
        Self {
            success_delay: config.success_delay(),
            dashboard: Route::dashboard(config),
        }
    }
}

/// Mutable state of one intake session
#[derive(Debug, Default)]
struct Session {
    store: DraftStore,
    state: SubmissionState,
    error: Option<String>,
    success: Option<String>,
    pending_navigation: Option<ScheduledNavigation>,
    /// Attempt currently waiting on the transport
    in_flight: Option<Uuid>,
    /// Attempt that was in flight when the user left the form
    abandoned: Option<Uuid>,
    /// Set by teardown; no completion may navigate afterwards
    torn_down: bool,
}

impl Session {
    /// Whether a completed attempt may schedule the success navigation
    fn may_navigate(&self, attempt_id: Uuid) -> bool {
        !self.torn_down && self.abandoned != Some(attempt_id)
    }
}

impl Session {
    fn view(&self) -> FormView {
        FormView {
            draft: self.store.snapshot(),
            state: self.state.clone(),
            error: self.error.clone(),
            success: self.success.clone(),
        }
    }
}

/// Form state and submission controller for one intake session
///
/// # Example
///
/// ```no_run
/// use intake::adapters::{ConsoleNavigator, PatientApiClient, StaticCredential};
/// use intake::config::ApiConfig;
/// use intake::core::submission::SubmissionController;
/// use intake::domain::PatientField;
/// use std::sync::Arc;
///
/// # async fn example() -> intake::domain::Result<()> {
/// let controller = SubmissionController::new(
///     Arc::new(PatientApiClient::new(&ApiConfig::default())?),
///     Arc::new(StaticCredential::new("token")),
///     Arc::new(ConsoleNavigator),
/// );
///
/// controller.update(PatientField::FirstName, "Jane");
/// let outcome = controller.submit().await;
/// println!("success: {}", outcome.is_success());
/// # Ok(())
/// # }
/// ```
pub struct SubmissionController {
    session: Mutex<Session>,
    view_tx: watch::Sender<FormView>,
    transport: Arc<dyn PatientTransport>,
    credentials: Arc<dyn CredentialProvider>,
    navigator: Arc<dyn Navigator>,
    settings: ControllerSettings,
}

impl SubmissionController {
    /// Creates a controller with an empty draft in the `Idle` state
    pub fn new(
        transport: Arc<dyn PatientTransport>,
        credentials: Arc<dyn CredentialProvider>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (view_tx, _) = watch::channel(FormView::default());
        Self {
            session: Mutex::new(Session::default()),
            view_tx,
            transport,
            credentials,
            navigator,
            settings: ControllerSettings::default(),
        }
    }

    /// Replaces the default settings
    pub fn with_settings(mut self, settings: ControllerSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Wires the HTTP client and the process-wide credential store from
    /// configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &IntakeConfig, navigator: Arc<dyn Navigator>) -> Result<Self> {
        let transport = PatientApiClient::new(&config.api)?;
        let credentials = StoredCredential::from_config(CredentialStore::global(), &config.auth);

        Ok(Self::new(Arc::new(transport), Arc::new(credentials), navigator)
            .with_settings(ControllerSettings::from(&config.navigation)))
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// Applies an edit and clears any displayed error
    pub fn update(&self, field: PatientField, value: impl Into<String>) {
        let mut session = self.lock();
        session.store.update(field, value);
        session.error = None;
        self.publish(&session);
    }

    /// Applies an edit addressed by wire name
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::UnknownField`](crate::domain::IntakeError::UnknownField)
    /// for unknown names; the draft and error slot are left untouched.
    pub fn update_by_name(&self, name: &str, value: impl Into<String>) -> Result<PatientField> {
        let mut session = self.lock();
        let field = session.store.update_by_name(name, value)?;
        session.error = None;
        self.publish(&session);
        Ok(field)
    }

    /// Runs one submission attempt
    ///
    /// Validation failures and transport failures only update the view; this
    /// never panics or returns an error. Calls made while an attempt is in
    /// flight are ignored.
    pub async fn submit(&self) -> SubmitOutcome {
        let attempt_id = Uuid::new_v4();

        let snapshot = {
            let mut session = self.lock();

            if session.state.is_submitting() {
                tracing::debug!(attempt_id = %attempt_id, "Submission already in flight, ignoring");
                return SubmitOutcome::Ignored;
            }

            let snapshot = session.store.snapshot();
            if let Err(error) = validate(&snapshot) {
                tracing::info!(attempt_id = %attempt_id, reason = %error, "Draft failed validation");
                session.error = Some(error.to_string());
                self.publish(&session);
                return SubmitOutcome::Rejected(error);
            }

            session.state = SubmissionState::Submitting;
            session.error = None;
            session.success = None;
            session.in_flight = Some(attempt_id);
            self.publish(&session);
            snapshot
        };

        crate::log_submission_start!(attempt_id, self.transport.endpoint());
        let started = Instant::now();

        let credential = self.credentials.credential();
        let result = self
            .transport
            .create_patient(&snapshot, credential.as_ref())
            .await;

        let mut session = self.lock();
        session.in_flight = None;
        let outcome = match result {
            Ok(response) => {
                let message = success_message(&snapshot);
                session.state = SubmissionState::Succeeded(message.clone());
                session.success = Some(message.clone());
                session.error = None;
                session.store.reset();

                if session.may_navigate(attempt_id) {
                    if let Some(previous) = session.pending_navigation.take() {
                        previous.cancel();
                    }
                    session.pending_navigation = Some(ScheduledNavigation::spawn(
                        self.navigator.clone(),
                        self.settings.dashboard.clone(),
                        self.settings.success_delay,
                    ));
                } else {
                    tracing::info!(
                        attempt_id = %attempt_id,
                        "Submission completed after leaving the form, not navigating"
                    );
                }

                tracing::info!(
                    attempt_id = %attempt_id,
                    duration_ms = duration_ms(started.elapsed()),
                    "Patient submitted"
                );

                SubmitOutcome::Succeeded(SubmissionReceipt {
                    attempt_id,
                    message,
                    submitted: snapshot,
                    response,
                    completed_at: Utc::now(),
                })
            }
            Err(error) => {
                let message = error
                    .user_message()
                    .unwrap_or_else(|| GENERIC_SUBMISSION_FAILURE.to_string());
                session.state = SubmissionState::Failed(message.clone());
                session.error = Some(message.clone());

                crate::log_submission_failure!(attempt_id, error, started.elapsed());

                SubmitOutcome::Failed {
                    attempt_id,
                    error,
                    message,
                }
            }
        };

        self.publish(&session);
        outcome
    }

    /// Leaves the form for the dashboard immediately
    ///
    /// Does not touch the draft and does not abort an in-flight request; a
    /// pending success navigation is suppressed, as is the navigation of the
    /// request in flight at this point. Later attempts navigate as usual.
    pub fn cancel(&self) {
        {
            let mut session = self.lock();
            if let Some(attempt_id) = session.in_flight {
                session.abandoned = Some(attempt_id);
            }
            if let Some(pending) = session.pending_navigation.take() {
                pending.cancel();
            }
            tracing::info!(state = %session.state, "Intake cancelled");
        }
        self.navigator.navigate(&self.settings.dashboard);
    }

    /// Tears the session down without navigating
    ///
    /// Suppresses any scheduled navigation. Dropping the controller has the
    /// same effect.
    pub fn teardown(&self) {
        let mut session = self.lock();
        session.torn_down = true;
        if let Some(pending) = session.pending_navigation.take() {
            pending.cancel();
        }
    }

    /// Waits for a scheduled success navigation, if any, to run
    ///
    /// The schedule stays owned by the session, so `cancel` or `teardown`
    /// still suppress it while a caller is waiting. Returns `true` if the
    /// navigation ran.
    pub async fn wait_for_navigation(&self) -> bool {
        let completion = self
            .lock()
            .pending_navigation
            .as_ref()
            .map(ScheduledNavigation::completion);
        match completion {
            Some(completion) => wait_for_completion(completion).await,
            None => false,
        }
    }

    /// True while a success navigation is scheduled but has not run
    pub fn navigation_pending(&self) -> bool {
        self.lock()
            .pending_navigation
            .as_ref()
            .is_some_and(|pending| !pending.is_finished())
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<FormView> {
        self.view_tx.subscribe()
    }

    /// Current render view
    pub fn view(&self) -> FormView {
        self.lock().view()
    }

    /// Snapshot of the current draft
    pub fn draft(&self) -> PatientDraft {
        self.lock().store.snapshot()
    }

    pub fn state(&self) -> SubmissionState {
        self.lock().state.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn success(&self) -> Option<String> {
        self.lock().success.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().state.is_submitting()
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, session: &Session) {
        self.view_tx.send_replace(session.view());
    }
}
