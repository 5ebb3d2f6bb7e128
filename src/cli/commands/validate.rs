//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the intake configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Environment: {:?}", config.environment);
        println!("  Log Level: {}", config.application.log_level);
        println!("  Patient Endpoint: {}", config.api.patients_url());
        println!("  Timeout: {}s", config.api.timeout_seconds);
        println!("  TLS Verify: {}", config.api.tls_verify);
        println!(
            "  Credential Key: {} ({})",
            config.auth.token_key,
            if config.auth.token.is_some() {
                "token configured"
            } else {
                "no token configured"
            }
        );
        println!("  Dashboard Route: {}", config.navigation.dashboard_route);
        println!("  Success Delay: {}ms", config.navigation.success_delay_ms);
        println!();
        Ok(0)
    }
}
