// Patient Intake - Patient intake form controller and submission client
// Copyright (c) 2025 Intake Contributors
// Licensed under the MIT License

//! # Patient Intake
//!
//! Client-side controller for a patient intake form: it holds the draft being
//! composed, checks required fields, submits the record to the patient service
//! and drives the pending / error / success lifecycle before navigating back
//! to the dashboard.
//!
//! ## Architecture
//!
//! - [`domain`] - Draft model, choice options and error types
//! - [`core`] - Draft store, validation and the submission controller
//! - [`adapters`] - Transport, credential store and navigation collaborators
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//! - [`cli`] - Command-line frontend
//!
//! Rendering is not part of the library. A frontend subscribes to the
//! controller's [`FormView`](core::submission::FormView) and forwards edits,
//! submit and cancel intents.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use intake::adapters::ConsoleNavigator;
//! use intake::config::load_config;
//! use intake::core::submission::SubmissionController;
//! use intake::domain::PatientField;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("intake.toml")?;
//!     let controller = SubmissionController::from_config(&config, Arc::new(ConsoleNavigator))?;
//!
//!     controller.update(PatientField::FirstName, "Jane");
//!     controller.update(PatientField::LastName, "Doe");
//!     controller.update(PatientField::Email, "jane@example.com");
//!     controller.update(PatientField::Phone, "555-0100");
//!     controller.update(PatientField::Gender, "female");
//!     controller.update(PatientField::DateOfBirth, "1990-01-01");
//!
//!     let outcome = controller.submit().await;
//!     if outcome.is_success() {
//!         controller.wait_for_navigation().await;
//!     } else {
//!         eprintln!("{:?}", controller.error());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Observing State
//!
//! ```rust,no_run
//! # use intake::core::submission::SubmissionController;
//! # async fn example(controller: &SubmissionController) {
//! let mut views = controller.subscribe();
//! while views.changed().await.is_ok() {
//!     let view = views.borrow_and_update().clone();
//!     println!("loading={} error={:?}", view.is_loading(), view.error);
//! }
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
