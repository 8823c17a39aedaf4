use crate::workflows::rca::export::ClipboardCommand;
use crate::workflows::rca::{EvaluationSettings, SortDirection, SortPolicy};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub evaluation: EvaluationSettings,
    pub export: ExportConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("RCA_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("RCA_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let sort_policy = match env::var("RCA_SORT_POLICY") {
            Ok(raw) => SortPolicy::parse(&raw).ok_or(ConfigError::InvalidSortPolicy(raw))?,
            Err(_) => SortPolicy::default(),
        };
        let direction = match env::var("RCA_SORT_DIRECTION") {
            Ok(raw) => SortDirection::parse(&raw).ok_or(ConfigError::InvalidSortDirection(raw))?,
            Err(_) => SortDirection::default(),
        };

        let output_dir = env::var("RCA_OUTPUT_DIR").unwrap_or_else(|_| ".".to_string());
        if output_dir.trim().is_empty() {
            return Err(ConfigError::EmptyOutputDir);
        }

        let clipboard_command = env::var("RCA_CLIPBOARD_CMD")
            .ok()
            .and_then(|raw| ClipboardCommand::parse(&raw));

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            evaluation: EvaluationSettings {
                sort_policy,
                direction,
            },
            export: ExportConfig {
                output_dir: PathBuf::from(output_dir),
                clipboard_command,
            },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where export artifacts go.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub clipboard_command: Option<ClipboardCommand>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSortPolicy(String),
    InvalidSortDirection(String),
    EmptyOutputDir,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSortPolicy(value) => write!(
                f,
                "RCA_SORT_POLICY must be 'confirm' or 'allow' (got '{}')",
                value
            ),
            ConfigError::InvalidSortDirection(value) => write!(
                f,
                "RCA_SORT_DIRECTION must be 'desc' or 'asc' (got '{}')",
                value
            ),
            ConfigError::EmptyOutputDir => write!(f, "RCA_OUTPUT_DIR must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {}
