mod csv;
mod delivery;
mod json;
mod markdown;

pub use self::csv::{encode_csv, CSV_HEADER};
pub use delivery::{
    ClipboardCommand, ClipboardSink, Delivery, DeliveryError, ExportSink, FileSink, WriterSink,
};
pub use json::{encode_json, ExportDocument, ExportedCause, ScoringDescriptor};
pub use markdown::encode_markdown;

use super::domain::Candidate;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unable to encode CSV: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("unable to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unable to flush CSV writer: {0}")]
    Flush(String),
    #[error("export produced invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Csv,
    Markdown,
    Json,
}

impl ExportFormat {
    pub const fn ordered() -> [Self; 3] {
        [Self::Markdown, Self::Csv, Self::Json]
    }

    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Csv => "root-cause-evaluation.csv",
            Self::Markdown => "root-cause-evaluation.md",
            Self::Json => "root-cause-evaluation.json",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Markdown => "Markdown table",
            Self::Json => "JSON",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "md" | "markdown" | "roam" => Some(Self::Markdown),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub file_name: &'static str,
    pub contents: String,
}

/// Encodes `candidates` in their current order.
pub fn export(
    format: ExportFormat,
    title: &str,
    candidates: &[Candidate],
) -> Result<ExportArtifact, ExportError> {
    let contents = match format {
        ExportFormat::Csv => encode_csv(candidates)?,
        ExportFormat::Markdown => encode_markdown(title, candidates),
        ExportFormat::Json => encode_json(title, candidates)?,
    };

    info!(
        format = format.label(),
        candidates = candidates.len(),
        bytes = contents.len(),
        "export encoded"
    );

    Ok(ExportArtifact {
        format,
        file_name: format.file_name(),
        contents,
    })
}
