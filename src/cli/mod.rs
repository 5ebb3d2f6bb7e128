//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap.

pub mod commands;
pub mod render;

use clap::{Parser, Subcommand};

/// Patient intake client
#[derive(Parser, Debug)]
#[command(name = "patient-intake")]
#[command(version, about, long_about = None)]
#[command(author = "Intake Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "intake.toml", env = "INTAKE_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "INTAKE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a draft and submit it to the patient service
    Submit(commands::submit::SubmitArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// List form fields by section
    Fields(commands::fields::FieldsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_submit() {
        let cli = Cli::parse_from([
            "patient-intake",
            "submit",
            "--draft",
            "jane.json",
            "--set",
            "firstName=Jane",
            "--set",
            "lastName=Doe",
        ]);
        assert_eq!(cli.config, "intake.toml");
        match cli.command {
            Commands::Submit(args) => {
                assert_eq!(args.draft.unwrap().to_string_lossy(), "jane.json");
                assert_eq!(args.set.len(), 2);
                assert!(!args.no_wait);
            }
            other => panic!("Expected submit, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_malformed_assignment() {
        let result = Cli::try_parse_from(["patient-intake", "submit", "--set", "firstName"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["patient-intake", "--config", "custom.toml", "fields"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::Fields(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["patient-intake", "--log-level", "debug", "validate-config"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["patient-intake", "init", "--force"]);
        assert!(matches!(cli.command, Commands::Init(ref args) if args.force));
    }
}
