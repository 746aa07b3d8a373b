use anyhow::Context;
use clap::Parser;
use env_logger::Builder;
use log::{LevelFilter, debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use workflow_log_analyzer::analyzer::LogLoader;
use workflow_log_analyzer::export::{ExportOptions, ExportSnapshot, write_csv};
use workflow_log_analyzer::redact::{Redaction, Redactor};
use workflow_log_analyzer::render::{TableOptions, render_summary, render_table};
use workflow_log_analyzer::{AnalyzerConfig, analyze};

/// Count workflow/workstep occurrences in a log file.
#[derive(Debug, Parser)]
#[command(name = "workflow-log-analyzer", version)]
struct Cli {
    /// Log file to analyze (.log or .txt). Reads stdin when omitted.
    file: Option<PathBuf>,

    /// TOML config file. Defaults to workflow-analyzer.toml next to the log file, if present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Hide entries with fewer occurrences than the configured threshold.
    #[arg(long)]
    hide_rare: bool,

    /// Hide entries with fewer than N occurrences (implies --hide-rare).
    #[arg(long, value_name = "N")]
    min_count: Option<usize>,

    /// Write the CSV export, to PATH or to the configured file name.
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    csv: Option<Option<PathBuf>>,

    /// Print the report as JSON instead of a table.
    #[arg(long)]
    json: bool,

    /// Print the log text with sensitive identifiers scrambled.
    #[arg(long)]
    redact: bool,

    /// Seed for reproducible redaction placeholders.
    #[arg(long)]
    seed: Option<u64>,
}

fn load_config(cli: &Cli) -> anyhow::Result<AnalyzerConfig> {
    if let Some(path) = &cli.config {
        return AnalyzerConfig::load(path).with_context(|| format!("Failed to load config {}", path.display()));
    }

    if let Some(file) = &cli.file {
        let candidate = AnalyzerConfig::config_path_from_log(file);
        if candidate.is_file() {
            debug!("Using config {}", candidate.display());
            return AnalyzerConfig::load(&candidate).with_context(|| format!("Failed to load config {}", candidate.display()));
        }
    }

    Ok(AnalyzerConfig::default())
}

fn main() -> anyhow::Result<()> {
    // Logging setup
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter(Some("workflow_log_analyzer"), LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let loader = match &cli.file {
        Some(path) => LogLoader::open(path).with_context(|| format!("Failed to open log file {}", path.display()))?,
        None => LogLoader::from_reader(std::io::stdin().lock()).context("Failed to read log content from stdin")?,
    };

    let report = analyze(loader.content()).context("Please provide log content to analyze")?;
    info!(
        "Analysis completed: {} matches in {} lines from {}",
        report.total_matches(),
        report.total_lines(),
        loader.source_name()
    );

    let min_occurrences = cli
        .min_count
        .or_else(|| cli.hide_rare.then_some(config.min_occurrences));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if cli.json {
        serde_json::to_writer_pretty(&mut out, &report).context("Failed to write JSON report")?;
        writeln!(out)?;
    } else {
        let options = TableOptions {
            min_occurrences,
            highlight_top: config.highlight_top,
        };
        write!(out, "{}", render_table(&report, options))?;
        writeln!(out)?;
        write!(out, "{}", render_summary(&report))?;
    }

    if let Some(csv_target) = &cli.csv {
        if report.is_empty() {
            info!("No analysis results to export");
        } else {
            let path = csv_target.clone().unwrap_or_else(|| PathBuf::from(&config.csv_file_name));
            let snapshot = ExportSnapshot::new(
                &report,
                ExportOptions {
                    min_occurrences,
                    source_name: loader.source_name().to_string(),
                },
            );
            let file = File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
            write_csv(&snapshot, BufWriter::new(file)).with_context(|| format!("Failed to export {}", path.display()))?;
            info!("CSV file {} written", path.display());
        }
    }

    if cli.redact || config.redact_after_analysis {
        let Redaction { text, replacements } = match cli.seed {
            Some(seed) => Redactor::with_rng(StdRng::seed_from_u64(seed)).scramble(loader.content()),
            None => Redactor::new().scramble(loader.content()),
        };
        info!("Sensitive data scrambled ({} replacements)", replacements);
        writeln!(out)?;
        write!(out, "{}", text)?;
        if !text.ends_with('\n') {
            writeln!(out)?;
        }
    }

    out.flush()?;
    Ok(())
}
