//! Command-line and environment configuration.

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

use crate::domain::ProgramId;

/// Edit your mentor application for a mentorship program.
#[derive(Parser, Debug)]
#[command(name = "mentor-edit", version)]
pub struct Cli {
    /// Identifier of the program whose application to edit
    pub program_id: String,

    /// Base URL of the mentorship backend API
    #[arg(long, env = "MENTOR_API_URL", default_value = "http://localhost:8000/api")]
    pub api_url: String,

    /// JSON file holding the signed-in session
    #[arg(long = "session", env = "MENTOR_SESSION_FILE", default_value = ".mentor-session.json")]
    pub session_file: PathBuf,

    /// File that receives log output
    #[arg(long, env = "MENTOR_LOG_FILE", default_value = "mentor-edit.log")]
    pub log_file: PathBuf,

    /// Log level or filter directive (RUST_LOG takes precedence)
    #[arg(long, env = "MENTOR_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub program_id: ProgramId,
    pub api_url: Url,
    pub session_file: PathBuf,
    pub telemetry: TelemetryConfig,
}

/// Logging controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_file: PathBuf,
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("program id must not be blank")]
    MissingProgramId,
    #[error("invalid API URL '{value}': {source}")]
    InvalidApiUrl {
        value: String,
        source: url::ParseError,
    },
    #[error("API URL '{0}' must use http or https")]
    UnsupportedScheme(String),
}

impl AppConfig {
    /// Loads `.env` if present, then parses the process arguments.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let program_id = cli.program_id.trim();
        if program_id.is_empty() {
            return Err(ConfigError::MissingProgramId);
        }

        let api_url = Url::parse(&cli.api_url).map_err(|source| ConfigError::InvalidApiUrl {
            value: cli.api_url.clone(),
            source,
        })?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(cli.api_url));
        }

        Ok(Self {
            program_id: ProgramId::new(program_id),
            api_url,
            session_file: cli.session_file,
            telemetry: TelemetryConfig {
                log_file: cli.log_file,
                log_level: cli.log_level,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<AppConfig, ConfigError> {
        let mut argv = vec!["mentor-edit"];
        argv.extend_from_slice(args);
        AppConfig::from_cli(Cli::try_parse_from(argv).expect("arguments parse"))
    }

    #[test]
    fn test_explicit_flags() {
        let config = parse(&[
            "prog-7",
            "--api-url",
            "https://mentors.example.org/api",
            "--session",
            "/tmp/session.json",
            "--log-file",
            "/tmp/editor.log",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(config.program_id, ProgramId::new("prog-7"));
        assert_eq!(config.api_url.as_str(), "https://mentors.example.org/api");
        assert_eq!(config.session_file, PathBuf::from("/tmp/session.json"));
        assert_eq!(config.telemetry.log_file, PathBuf::from("/tmp/editor.log"));
        assert_eq!(config.telemetry.log_level, "debug");
    }

    #[test]
    fn test_program_id_is_required() {
        assert!(Cli::try_parse_from(["mentor-edit"]).is_err());
        assert!(matches!(
            parse(&["   ", "--api-url", "http://localhost/api"]),
            Err(ConfigError::MissingProgramId)
        ));
    }

    #[test]
    fn test_rejects_bad_api_urls() {
        assert!(matches!(
            parse(&["p1", "--api-url", "not a url"]),
            Err(ConfigError::InvalidApiUrl { .. })
        ));
        assert!(matches!(
            parse(&["p1", "--api-url", "ftp://files.example.org"]),
            Err(ConfigError::UnsupportedScheme(_))
        ));
    }
}
