//! Configuration management for the intake client.
//!
//! TOML-based configuration with `${VAR}` substitution, `INTAKE_*` environment
//! overrides and validation on load. Every section is optional.
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "development"
//!
//! [application]
//! log_level = "info"
//!
//! [api]
//! base_url = "http://localhost:5000"
//! patients_path = "/api/patients"
//! timeout_seconds = 30
//!
//! [auth]
//! token_key = "authToken"
//! token = "${INTAKE_AUTH_TOKEN}"
//!
//! [navigation]
//! dashboard_route = "/dashboard"
//! success_delay_ms = 2000
//!
//! [logging]
//! local_enabled = false
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use intake::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("intake.toml")?;
//! println!("Patient service: {}", config.api.patients_url());
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_from_str};
pub use schema::{
    ApiConfig, ApplicationConfig, AuthConfig, Environment, IntakeConfig, LoggingConfig,
    NavigationConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
