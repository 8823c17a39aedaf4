use crate::commands::{
    run_demo, run_export, run_legend, run_score, run_wizard, DemoArgs, ExportArgs, LegendArgs,
    ScoreArgs, WizardArgs,
};
use clap::{Parser, Subcommand};
use root_cause::config::AppConfig;
use root_cause::error::AppError;
use root_cause::telemetry;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "rca",
    about = "Frame a system, brainstorm root causes and rank them by likelihood, impact \
             and controllability",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk through framing, brainstorming and evaluation (default command)
    Wizard(WizardArgs),
    /// Rank candidates from a CSV file and print the result
    Score(ScoreArgs),
    /// Rank candidates from a CSV file and deliver every export format
    Export(ExportArgs),
    /// Rank the example root causes
    Demo(DemoArgs),
    /// Print the rating weights, formula and score bands
    Legend(LegendArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let command = cli
        .command
        .unwrap_or_else(|| Command::Wizard(WizardArgs::default()));
    info!(environment = ?config.environment, "rca starting");

    match command {
        Command::Wizard(args) => run_wizard(&config, args),
        Command::Score(args) => run_score(&config, args),
        Command::Export(args) => run_export(&config, args),
        Command::Demo(args) => run_demo(&config, args),
        Command::Legend(args) => run_legend(args),
    }
}
