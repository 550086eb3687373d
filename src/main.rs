use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use kira_cohortqc::error::{ConfigError, InputError, ReportError};
use kira_cohortqc::input::{DEFAULT_ID_FIELD, load_cohort};
use kira_cohortqc::logging::init_logging;
use kira_cohortqc::model::profile::DimensionProfile;
use kira_cohortqc::pipeline::run_comparison;
use kira_cohortqc::pipeline::stage6_report::{ReportFormat, write_reports};
use kira_cohortqc::report::json::{render_batch_json, render_report_json};
use kira_cohortqc::report::text::render_report_text;

#[derive(Debug, Parser)]
#[command(name = "kira-cohortqc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable info-level logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare a baseline cohort against one or more ablation cohorts
    Compare(CompareArgs),
}

#[derive(Debug, clap::Args)]
struct CompareArgs {
    /// Baseline cohort file (.json, .jsonl, optionally .gz)
    #[arg(long)]
    baseline: PathBuf,

    /// Ablation cohort file; repeat to compare several against the same baseline
    #[arg(long, required = true)]
    ablation: Vec<PathBuf>,

    /// JSON file overriding critical/quality dimensions, wilson_z, yates_correction
    #[arg(long)]
    config: Option<PathBuf>,

    /// Row field holding the case id
    #[arg(long, default_value = DEFAULT_ID_FIELD)]
    id_field: String,

    /// Output directory; reports go to stdout when absent
    #[arg(long)]
    out: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    format: FormatArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Text,
    Json,
    Both,
}

impl From<FormatArg> for ReportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Text => ReportFormat::Text,
            FormatArg::Json => ReportFormat::Json,
            FormatArg::Both => ReportFormat::Both,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("report serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(err) = run(cli.command) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Compare(args) => run_compare(args),
    }
}

fn run_compare(args: CompareArgs) -> Result<(), CliError> {
    let profile = resolve_profile(args.config.as_ref())?;
    let baseline = load_cohort(&args.baseline, None, &args.id_field)?;

    let mut reports = Vec::with_capacity(args.ablation.len());
    for path in &args.ablation {
        let ablation = load_cohort(path, None, &args.id_field)?;
        reports.push(run_comparison(&baseline.cohort, &ablation.cohort, &profile));
    }

    let format = ReportFormat::from(args.format);
    match &args.out {
        Some(out_dir) => {
            let written = write_reports(&reports, out_dir, format)?;
            for path in written {
                info!("wrote {}", path.display());
            }
        }
        None => print_reports(&reports, format)?,
    }
    Ok(())
}

fn resolve_profile(config: Option<&PathBuf>) -> Result<DimensionProfile, ConfigError> {
    match config {
        Some(path) => {
            info!("loading dimension profile from {}", path.display());
            DimensionProfile::from_json_file(path)
        }
        None => Ok(DimensionProfile::default_v1()),
    }
}

fn print_reports(
    reports: &[kira_cohortqc::report::ComparisonReport],
    format: ReportFormat,
) -> Result<(), serde_json::Error> {
    if matches!(format, ReportFormat::Text | ReportFormat::Both) {
        for report in reports {
            println!("{}", render_report_text(report));
        }
    }
    if matches!(format, ReportFormat::Json | ReportFormat::Both) {
        let json = if reports.len() == 1 {
            render_report_json(&reports[0])?
        } else {
            render_batch_json(reports)?
        };
        println!("{json}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
