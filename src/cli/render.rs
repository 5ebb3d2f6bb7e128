//! Terminal rendering of the form view
//!
//! The renderer is a pure subscriber: it watches [`FormView`] changes and
//! prints state transitions. It holds no logic of its own.

use crate::core::submission::{FormView, SubmissionState};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Spawns a task printing view changes until the controller is dropped
pub fn spawn_renderer(mut rx: watch::Receiver<FormView>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut previous = rx.borrow_and_update().clone();
        while rx.changed().await.is_ok() {
            let current = rx.borrow_and_update().clone();
            for line in transition_lines(&previous, &current) {
                println!("{line}");
            }
            previous = current;
        }
    })
}

/// Lines describing what changed between two views
fn transition_lines(previous: &FormView, current: &FormView) -> Vec<String> {
    let mut lines = Vec::new();

    if current.state != previous.state {
        match &current.state {
            SubmissionState::Submitting => lines.push("⏳ Submitting patient...".to_string()),
            SubmissionState::Succeeded(message) => lines.push(format!("✅ {message}")),
            SubmissionState::Idle | SubmissionState::Failed(_) => {}
        }
    }

    if current.error != previous.error {
        if let Some(error) = &current.error {
            lines.push(format!("❌ {error}"));
        }
    }

    lines
}
