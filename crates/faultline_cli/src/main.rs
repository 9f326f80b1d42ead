//! Faultline CLI - PODEM test pattern generation for combinational netlists.
//!
//! Reads a bench-format netlist, runs SCOAP analysis once, drives every
//! single stuck-at fault through the PODEM engine, and writes the per-fault
//! vectors plus an optional coverage report.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use faultline_cli::driver::FaultCampaign;
use faultline_cli::report;
use faultline_core::prelude::*;

/// Faultline - automatic test pattern generator.
///
/// Produces, for each single stuck-at fault of the netlist, either a
/// primary-input vector that detects it or an UNTESTABLE verdict.
#[derive(Parser)]
#[command(name = "faultline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input netlist in bench format
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Output file for per-fault test vectors
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Optional coverage report file
    #[arg(short, long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Report format (text, json)
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Worker threads for the fault list; each owns a circuit copy
    #[arg(short, long, default_value_t = 1)]
    jobs: usize,

    /// Fill for don't-care vector positions
    #[arg(long, value_enum, default_value = "zero")]
    fill: FillArg,

    /// Seed for the random fill
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Per-fault decision budget; a fault exceeding it is reported ABORTED
    #[arg(long)]
    decision_limit: Option<usize>,

    /// Re-simulate every detected vector against its fault
    #[arg(long)]
    verify: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum FillArg {
    Zero,
    One,
    Random,
}

impl From<FillArg> for FillPolicy {
    fn from(fill: FillArg) -> Self {
        match fill {
            FillArg::Zero => FillPolicy::Zero,
            FillArg::One => FillPolicy::One,
            FillArg::Random => FillPolicy::Random,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let _ = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .try_init();

    let source = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read netlist: {}", cli.input.display()))?;
    let mut circuit = faultline_bench::parse_bench(&source)
        .with_context(|| format!("Failed to parse netlist: {}", cli.input.display()))?;
    info!(
        "Parsed circuit: {} gates, {} inputs, {} outputs",
        circuit.num_gates(),
        circuit.primary_inputs().len(),
        circuit.primary_outputs().len()
    );

    faultline_scoap::annotate(&mut circuit);

    let config = FaultlineConfig {
        podem: PodemConfig {
            decision_limit: cli.decision_limit,
        },
        driver: DriverConfig {
            jobs: cli.jobs.max(1),
            fill: cli.fill.into(),
            seed: cli.seed,
            verify: cli.verify,
        },
    };
    let campaign = FaultCampaign::with_config(config);
    let coverage = campaign.run(&circuit)?;

    std::fs::write(&cli.output, report::render_vectors(&coverage))
        .with_context(|| format!("Failed to write vectors: {}", cli.output.display()))?;

    if let Some(path) = &cli.report {
        let body = match cli.format {
            OutputFormat::Text => report::render_report(&coverage),
            OutputFormat::Json => report::render_json(&coverage)?,
        };
        std::fs::write(path, body)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
    }

    info!(
        "Done: {:.2}% coverage ({}/{}) in {:.4}s",
        coverage.coverage_percent(),
        coverage.detected,
        coverage.total,
        coverage.wall_time.as_secs_f64()
    );
    Ok(())
}
