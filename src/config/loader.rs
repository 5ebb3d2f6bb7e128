//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{Environment, IntakeConfig};
use super::secret::secret_string_opt;
use crate::domain::errors::IntakeError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into IntakeConfig
/// 4. Applies environment variable overrides (INTAKE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsing fails, a referenced
/// environment variable is missing, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use intake::config::loader::load_config;
///
/// let config = load_config("intake.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<IntakeConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(IntakeError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        IntakeError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Loads configuration from TOML text, with the same substitution, override and
/// validation steps as [`load_config`]
pub fn load_config_from_str(contents: &str) -> Result<IntakeConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: IntakeConfig = toml::from_str(&contents)
        .map_err(|e| IntakeError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        IntakeError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| IntakeError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(IntakeError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using INTAKE_* prefix
///
/// Environment variables follow the pattern: INTAKE_<SECTION>_<KEY>
/// For example: INTAKE_API_BASE_URL, INTAKE_AUTH_TOKEN
fn apply_env_overrides(config: &mut IntakeConfig) -> Result<()> {
    if let Ok(val) = std::env::var("INTAKE_ENVIRONMENT") {
        config.environment = match val.to_lowercase().as_str() {
            "development" => Environment::Development,
            "staging" => Environment::Staging,
            "production" => Environment::Production,
            other => {
                return Err(IntakeError::Configuration(format!(
                    "Invalid INTAKE_ENVIRONMENT '{other}'. Must be one of: development, staging, production"
                )))
            }
        };
    }

    if let Ok(val) = std::env::var("INTAKE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // API overrides
    if let Ok(val) = std::env::var("INTAKE_API_BASE_URL") {
        config.api.base_url = val;
    }
    if let Ok(val) = std::env::var("INTAKE_API_PATIENTS_PATH") {
        config.api.patients_path = val;
    }
    if let Ok(val) = std::env::var("INTAKE_API_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.api.timeout_seconds = timeout;
        }
    }
    if let Ok(val) = std::env::var("INTAKE_API_TLS_VERIFY") {
        config.api.tls_verify = val.parse().unwrap_or(true);
    }

    // Auth overrides
    if let Ok(val) = std::env::var("INTAKE_AUTH_TOKEN_KEY") {
        config.auth.token_key = val;
    }
    if let Ok(val) = std::env::var("INTAKE_AUTH_TOKEN") {
        config.auth.token = secret_string_opt(Some(val));
    }

    // Navigation overrides
    if let Ok(val) = std::env::var("INTAKE_NAVIGATION_DASHBOARD_ROUTE") {
        config.navigation.dashboard_route = val;
    }
    if let Ok(val) = std::env::var("INTAKE_NAVIGATION_SUCCESS_DELAY_MS") {
        if let Ok(delay) = val.parse() {
            config.navigation.success_delay_ms = delay;
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("INTAKE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("INTAKE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
