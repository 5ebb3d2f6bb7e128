//! Submit command implementation
//!
//! Drives one intake session from the terminal: edits come from a JSON draft
//! file and `--set` flags, state changes are rendered by a subscriber task,
//! and the command waits for the post-success navigation before exiting.

use crate::adapters::credentials::CredentialStore;
use crate::adapters::navigation::ConsoleNavigator;
use crate::cli::render::spawn_renderer;
use crate::config::{load_config, load_config_from_str, IntakeConfig};
use crate::core::submission::{SubmissionController, SubmitOutcome};
use crate::domain::{IntakeError, Result};
use clap::Args;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Arguments for the submit command
#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// JSON object of field values keyed by wire name (e.g. "firstName")
    #[arg(short, long)]
    pub draft: Option<PathBuf>,

    /// Field assignment applied after the draft file (repeatable)
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(String, String)>,

    /// Bearer token to store under the configured credential key
    #[arg(long)]
    pub token: Option<String>,

    /// Exit right after the submission instead of waiting for navigation
    #[arg(long)]
    pub no_wait: bool,
}

impl SubmitArgs {
    /// Execute the submit command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_submit_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        if let Some(token) = &self.token {
            CredentialStore::global().set(config.auth.token_key.clone(), token.clone());
        }

        let controller = SubmissionController::from_config(&config, Arc::new(ConsoleNavigator))?;

        let edits = match self.collect_edits() {
            Ok(edits) => edits,
            Err(e) => {
                println!("❌ {e}");
                return Ok(2);
            }
        };
        for (name, value) in edits {
            if let Err(e) = controller.update_by_name(&name, value) {
                println!("❌ {e}");
                return Ok(2);
            }
        }

        let renderer = spawn_renderer(controller.subscribe());

        let outcome = controller.submit().await;
        let exit_code = match &outcome {
            SubmitOutcome::Succeeded(receipt) => {
                tracing::info!(attempt_id = %receipt.attempt_id, "Submission accepted");
                if !self.no_wait {
                    controller.wait_for_navigation().await;
                }
                0
            }
            SubmitOutcome::Rejected(_) | SubmitOutcome::Failed { .. } | SubmitOutcome::Ignored => 1,
        };

        drop(controller);
        if let Err(e) = renderer.await {
            tracing::warn!(error = %e, "Renderer task ended abnormally");
        }

        Ok(exit_code)
    }

    /// Draft file values followed by `--set` assignments, in application order
    fn collect_edits(&self) -> Result<Vec<(String, String)>> {
        let mut edits = Vec::new();

        if let Some(path) = &self.draft {
            let contents = std::fs::read_to_string(path).map_err(|e| {
                IntakeError::Io(format!("Failed to read draft file {}: {e}", path.display()))
            })?;
            let values: BTreeMap<String, String> = serde_json::from_str(&contents)?;
            edits.extend(values);
        }

        edits.extend(self.set.iter().cloned());
        Ok(edits)
    }
}

/// Loads the config file, or defaults plus environment overrides when the
/// file does not exist
fn load_submit_config(config_path: &str) -> Result<IntakeConfig> {
    if Path::new(config_path).exists() {
        load_config(config_path)
    } else {
        tracing::warn!(config_path = %config_path, "Configuration file not found, using defaults");
        load_config_from_str("")
    }
}

fn parse_assignment(raw: &str) -> std::result::Result<(String, String), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    if field.trim().is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((field.trim().to_string(), value.to_string()))
}
