//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "intake.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing intake configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your patient service URL", self.output);
                println!("  2. Export INTAKE_AUTH_TOKEN or pass --token to submit");
                println!("  3. Validate configuration: patient-intake validate-config");
                println!("  4. Submit a patient: patient-intake submit --draft patient.json");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Sample configuration with every section and its defaults
    fn generate_config() -> String {
        r#"# Patient Intake Configuration

# development | staging | production
environment = "development"

[application]
# trace, debug, info, warn, error
log_level = "info"

[api]
base_url = "http://localhost:5000"
patients_path = "/api/patients"
timeout_seconds = 30
# Cannot be disabled in production
tls_verify = true

[auth]
# Key the bearer token is stored under in the credential store
token_key = "authToken"
# Uncomment to seed the token from the environment
# token = "${INTAKE_AUTH_TOKEN}"

[navigation]
dashboard_route = "/dashboard"
# Grace period before leaving the form after a successful submission
success_delay_ms = 2000

[logging]
local_enabled = false
local_path = "./logs"
# daily, hourly, never
local_rotation = "daily"
"#
        .to_string()
    }
}
