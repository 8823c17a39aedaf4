use crate::infra::OutputFormat;
use crate::interactive::InteractiveWizard;
use crate::render::{render_legend, render_summary};
use clap::Args;
use root_cause::config::{AppConfig, ExportConfig};
use root_cause::error::AppError;
use root_cause::workflows::rca::export::{ClipboardSink, ExportSink, FileSink, WriterSink};
use root_cause::workflows::rca::{
    export, rank, starter_candidates, Candidate, CandidateBoard, CandidateImporter,
    EvaluationReport, EvaluationSession, EvaluationSettings, ExportError, ExportFormat, IdAllocator,
    SortDirection, SortPolicy, Wizard, DEFAULT_TITLE,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct WizardArgs {
    /// Seed the brainstorm with candidates from a CSV export
    #[arg(long)]
    pub(crate) import: Option<PathBuf>,
    /// Seed the brainstorm with the three example root causes
    #[arg(long)]
    pub(crate) starters: bool,
    /// Override RCA_SORT_POLICY (confirm or allow)
    #[arg(long, value_parser = crate::infra::parse_policy)]
    pub(crate) sort_policy: Option<SortPolicy>,
    /// Override RCA_SORT_DIRECTION (desc or asc)
    #[arg(long, value_parser = crate::infra::parse_direction)]
    pub(crate) direction: Option<SortDirection>,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// CSV file in the export layout (Root Cause, Likelihood, Impact, Controllability, Notes)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Sort direction (desc or asc); defaults to RCA_SORT_DIRECTION
    #[arg(long, value_parser = crate::infra::parse_direction)]
    pub(crate) direction: Option<SortDirection>,
    /// Output format: table, csv, md or json
    #[arg(long, default_value = "table", value_parser = crate::infra::parse_output_format)]
    pub(crate) format: OutputFormat,
    /// Title used in the report and encoded exports
    #[arg(long)]
    pub(crate) title: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// CSV file in the export layout
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Directory for CSV and JSON files; defaults to RCA_OUTPUT_DIR
    #[arg(long)]
    pub(crate) output_dir: Option<PathBuf>,
    /// Only produce this format (csv, md or json); all three by default
    #[arg(long, value_parser = crate::infra::parse_export_format)]
    pub(crate) format: Option<ExportFormat>,
    /// Sort direction applied before exporting
    #[arg(long, value_parser = crate::infra::parse_direction)]
    pub(crate) direction: Option<SortDirection>,
    /// Title used in the markdown and JSON exports
    #[arg(long)]
    pub(crate) title: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Sort direction for the demo table
    #[arg(long, value_parser = crate::infra::parse_direction)]
    pub(crate) direction: Option<SortDirection>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct LegendArgs {
    /// Print the legend as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_wizard(config: &AppConfig, args: WizardArgs) -> Result<(), AppError> {
    let settings = EvaluationSettings {
        sort_policy: args.sort_policy.unwrap_or(config.evaluation.sort_policy),
        direction: args.direction.unwrap_or(config.evaluation.direction),
    };

    let mut wizard = Wizard::new(settings);
    let mut ids = IdAllocator::default();
    let mut seeded = Vec::new();
    if args.starters {
        seeded.extend(starter_candidates(&mut ids));
    }
    if let Some(path) = &args.import {
        seeded.extend(CandidateImporter::from_path(path, &mut ids)?);
    }
    if !seeded.is_empty() {
        info!(candidates = seeded.len(), "brainstorm seeded");
        *wizard.board_mut() = CandidateBoard::from_parts(seeded, ids);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console =
        InteractiveWizard::new(stdin.lock(), stdout.lock(), wizard, config.export.clone());
    console.run()
}

pub(crate) fn run_score(config: &AppConfig, args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        input,
        direction,
        format,
        title,
    } = args;

    let direction = direction.unwrap_or(config.evaluation.direction);
    let title = title.unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let ranked = load_ranked(&input, direction)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Table => {
            let incomplete = ranked.iter().any(|candidate| !candidate.is_complete());
            let summary =
                EvaluationReport::build(&title, &ranked, direction, Some(direction), incomplete);
            render_summary(&mut out, &summary)?;
        }
        OutputFormat::Encoded(format) => {
            let artifact = export(format, &title, &ranked)?;
            out.write_all(artifact.contents.as_bytes())?;
        }
    }
    Ok(())
}

pub(crate) fn run_export(config: &AppConfig, args: ExportArgs) -> Result<(), AppError> {
    let ExportArgs {
        input,
        output_dir,
        format,
        direction,
        title,
    } = args;

    let direction = direction.unwrap_or(config.evaluation.direction);
    let title = title.unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let ranked = load_ranked(&input, direction)?;

    let mut export_config = config.export.clone();
    if let Some(dir) = output_dir {
        export_config.output_dir = dir;
    }
    let formats = match format {
        Some(format) => vec![format],
        None => ExportFormat::ordered().to_vec(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    deliver_exports(&mut out, &export_config, &title, &ranked, &formats)
}

pub(crate) fn run_demo(config: &AppConfig, args: DemoArgs) -> Result<(), AppError> {
    let settings = EvaluationSettings {
        sort_policy: config.evaluation.sort_policy,
        direction: args.direction.unwrap_or(config.evaluation.direction),
    };

    let mut ids = IdAllocator::default();
    let candidates = starter_candidates(&mut ids);
    let mut session = EvaluationSession::with_candidates(settings, candidates, ids);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Root cause evaluation demo")?;
    writeln!(out, "Starter candidates are fully rated, so the completion prompt is open.")?;
    if let Some(outcome) = session.confirm_sort() {
        writeln!(out, "Sorted {}.\n", outcome.direction.label())?;
    }

    let summary = EvaluationReport::from_session(DEFAULT_TITLE, &session);
    render_summary(&mut out, &summary)?;
    writeln!(out)?;
    render_legend(&mut out, &EvaluationReport::legend())?;
    Ok(())
}

pub(crate) fn run_legend(args: LegendArgs) -> Result<(), AppError> {
    let legend = EvaluationReport::legend();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        let rendered = serde_json::to_string_pretty(&legend).map_err(ExportError::from)?;
        writeln!(out, "{rendered}")?;
    } else {
        render_legend(&mut out, &legend)?;
    }
    Ok(())
}

/// Markdown goes to the clipboard with the output as fallback; CSV and JSON
/// are saved as files. Delivery failures are reported, not raised.
pub(crate) fn deliver_exports<W: Write>(
    output: &mut W,
    config: &ExportConfig,
    title: &str,
    candidates: &[Candidate],
    formats: &[ExportFormat],
) -> Result<(), AppError> {
    for format in formats {
        let artifact = export(*format, title, candidates)?;
        let delivered = match format {
            ExportFormat::Markdown => {
                ClipboardSink::new(config.clipboard_command.clone(), WriterSink::new(&mut *output))
                    .deliver(&artifact)
            }
            ExportFormat::Csv | ExportFormat::Json => {
                FileSink::new(&config.output_dir).deliver(&artifact)
            }
        };

        match delivered {
            Ok(delivery) => writeln!(output, "{}: {}", format.label(), delivery.notice())?,
            Err(err) => writeln!(output, "{}: export failed ({err})", format.label())?,
        }
    }
    Ok(())
}

fn load_ranked(input: &Path, direction: SortDirection) -> Result<Vec<Candidate>, AppError> {
    let mut ids = IdAllocator::default();
    let candidates = CandidateImporter::from_path(input, &mut ids)?;
    Ok(rank(&candidates, direction))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exports_save_files_and_fall_back_for_markdown() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = ExportConfig {
            output_dir: dir.path().to_path_buf(),
            clipboard_command: None,
        };
        let mut ids = IdAllocator::default();
        let candidates = starter_candidates(&mut ids);

        let mut out = Vec::new();
        deliver_exports(
            &mut out,
            &config,
            "Starter",
            &candidates,
            &ExportFormat::ordered(),
        )
        .expect("exports");
        let text = String::from_utf8(out).expect("utf8");

        assert!(text.starts_with("# Starter\n"));
        assert!(text.contains(
            "Markdown table: Written to output. \
             (clipboard unavailable: no clipboard command configured)"
        ));
        assert!(dir.path().join("root-cause-evaluation.csv").exists());
        assert!(dir.path().join("root-cause-evaluation.json").exists());
    }
}
