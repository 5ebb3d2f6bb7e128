//! Configuration schema types
//!
//! This module defines the configuration structure for the intake client.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

/// Main intake configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional and falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Patient service connection
    #[serde(default)]
    pub api: ApiConfig,

    /// Credential lookup
    #[serde(default)]
    pub auth: AuthConfig,

    /// Post-submission navigation
    #[serde(default)]
    pub navigation: NavigationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl IntakeConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.api.validate(&self.environment)?;
        self.auth.validate()?;
        self.navigation.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Patient service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the patient service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the patient creation endpoint
    #[serde(default = "default_patients_path")]
    pub patients_path: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// TLS certificate verification enabled
    ///
    /// **SECURITY WARNING**: Disabling TLS verification exposes the client to
    /// man-in-the-middle attacks. Rejected in production environments.
    #[serde(default = "default_true")]
    pub tls_verify: bool,
}

impl ApiConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("api.base_url cannot be empty".to_string());
        }

        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| format!("api.base_url '{}' is not a valid URL: {e}", self.base_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err("api.base_url must start with http:// or https://".to_string());
        }

        if !self.patients_path.starts_with('/') {
            return Err(format!(
                "api.patients_path must start with '/', got '{}'",
                self.patients_path
            ));
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > 300 {
            return Err(format!(
                "api.timeout_seconds must be between 1 and 300, got {}",
                self.timeout_seconds
            ));
        }

        if *environment == Environment::Production && !self.tls_verify {
            return Err(
                "TLS certificate verification cannot be disabled in production environments. \
                Set 'tls_verify = true' or use environment = \"development\" for local testing."
                    .to_string(),
            );
        }

        Ok(())
    }

    /// Full URL of the patient creation endpoint
    pub fn patients_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.patients_path
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            patients_path: default_patients_path(),
            timeout_seconds: default_timeout_seconds(),
            tls_verify: true,
        }
    }
}

/// Credential configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Key the bearer token is stored under in the credential store
    #[serde(default = "default_token_key")]
    pub token_key: String,

    /// Token to seed the credential store with (optional)
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub token: Option<SecretString>,
}

impl AuthConfig {
    fn validate(&self) -> Result<(), String> {
        if self.token_key.trim().is_empty() {
            return Err("auth.token_key cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_key: default_token_key(),
            token: None,
        }
    }
}

/// Navigation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Route of the dashboard view
    #[serde(default = "default_dashboard_route")]
    pub dashboard_route: String,

    /// Grace period between a successful submission and navigation
    #[serde(default = "default_success_delay_ms")]
    pub success_delay_ms: u64,
}

impl NavigationConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.dashboard_route.starts_with('/') {
            return Err(format!(
                "navigation.dashboard_route must start with '/', got '{}'",
                self.dashboard_route
            ));
        }
        if self.success_delay_ms > 60_000 {
            return Err(format!(
                "navigation.success_delay_ms must be at most 60000, got {}",
                self.success_delay_ms
            ));
        }
        Ok(())
    }

    pub fn success_delay(&self) -> Duration {
        Duration::from_millis(self.success_delay_ms)
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            dashboard_route: default_dashboard_route(),
            success_delay_ms: default_success_delay_ms(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "logging.local_rotation must be one of: {}, got '{}'",
                valid_rotations.join(", "),
                self.local_rotation
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled = true".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_patients_path() -> String {
    "/api/patients".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_token_key() -> String {
    "authToken".to_string()
}

fn default_dashboard_route() -> String {
    "/dashboard".to_string()
}

fn default_success_delay_ms() -> u64 {
    2000
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
