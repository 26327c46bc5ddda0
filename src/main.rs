//! # glucosense CLI
//!
//! Command-line front end for the glucosense library.
//!
//! ## Usage
//!
//! ```bash
//! # Parse a measurement text file and print derived metrics
//! glucosense parse sweep.txt
//!
//! # Extract (freq, amp) pairs from pasted simulator output
//! glucosense extract pasted.txt
//!
//! # Write a seeded demo state file
//! glucosense demo state.json
//!
//! # Compute metrics from a saved state
//! glucosense metrics state.json --dataset felt_2_ring --field s11_freq
//!
//! # Validate a state file
//! glucosense validate state.json
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use glucosense::config::Config;
use glucosense::metrics;
use glucosense::model::{AntennaParameters, DatasetKey, Substrate, SweepField};
use glucosense::parser;
use glucosense::snapshot::AppState;
use glucosense::store::ModelStore;
use glucosense::validator::validate_store;

/// glucosense - Antenna Glucose Sensing Toolkit
#[derive(Parser)]
#[command(name = "glucosense")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Optional TOML config file with defaults
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a strict measurement text file and print derived metrics
    Parse {
        /// Input text file, one "freq amp" pair per line
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Print records and metrics as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Start glucose reference level in mg/dL
        #[arg(long)]
        start: Option<f64>,

        /// End glucose reference level in mg/dL
        #[arg(long)]
        end: Option<f64>,
    },

    /// Leniently extract (freq, amp) pairs from free-form text
    Extract {
        /// Input text file
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Write a seeded demo state file
    Demo {
        /// Output state JSON path
        #[arg(value_name = "OUTPUT", default_value = "glucosense_state.json")]
        output: PathBuf,
    },

    /// Compute shift/sensitivity/amplitude delta from a saved state
    Metrics {
        /// State JSON file written by `demo` or an export
        #[arg(value_name = "STATE")]
        state: PathBuf,

        /// Dataset bucket, e.g. felt_2_ring
        #[arg(short, long)]
        dataset: String,

        /// Measured field, e.g. s11_freq
        #[arg(short, long)]
        field: String,

        /// Start glucose reference level in mg/dL
        #[arg(long)]
        start: Option<f64>,

        /// End glucose reference level in mg/dL
        #[arg(long)]
        end: Option<f64>,
    },

    /// Validate a state file and print a report
    Validate {
        /// State JSON file
        #[arg(value_name = "STATE")]
        state: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Parse {
            input,
            json,
            start,
            end,
        } => run_parse(&config, input, json, start, end),
        Commands::Extract { input } => run_extract(input),
        Commands::Demo { output } => run_demo(output),
        Commands::Metrics {
            state,
            dataset,
            field,
            start,
            end,
        } => run_metrics(&config, state, &dataset, &field, start, end),
        Commands::Validate { state } => run_validate(state),
    }
}

/// Resolve reference levels from flags, config file, then defaults.
fn reference_levels(config: &Config, start: Option<f64>, end: Option<f64>) -> (f64, f64) {
    let start = start.or(config.metrics.start_glucose).unwrap_or(0.0);
    let end = end
        .or(config.metrics.end_glucose)
        .unwrap_or(parser::GLUCOSE_DOMAIN_MAX);
    (start, end)
}

fn run_parse(
    config: &Config,
    input: PathBuf,
    json: bool,
    start: Option<f64>,
    end: Option<f64>,
) -> Result<()> {
    let text = std::fs::read_to_string(&input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;

    let records = parser::parse(&text)
        .with_context(|| format!("Failed to parse {}", input.display()))?;
    info!("parsed {} record(s) from {}", records.len(), input.display());

    let (start, end) = reference_levels(config, start, end);
    let derived = glucosense::model::RunMetrics::compute(&records, start, end);

    if json {
        #[derive(serde::Serialize)]
        struct Output<'a> {
            records: &'a [parser::MeasurementRecord],
            metrics: glucosense::model::RunMetrics,
        }
        println!(
            "{}",
            serde_json::to_string_pretty(&Output {
                records: &records,
                metrics: derived,
            })?
        );
        return Ok(());
    }

    println!("{:>10} {:>12} {:>12}", "glucose", "freq (GHz)", "amp (dB)");
    for record in &records {
        println!(
            "{:>10.2} {:>12.4} {:>12.2}",
            record.glucose, record.frequency, record.amplitude
        );
    }
    println!();
    println!("Reference span: {start} to {end} mg/dL");
    println!("  Shift:           {}", format_metric(derived.shift, "GHz"));
    println!(
        "  Sensitivity:     {}",
        format_metric(derived.sensitivity, "MHz/mg/dL")
    );
    println!(
        "  Amplitude delta: {}",
        format_metric(derived.amplitude_delta, "dB")
    );

    Ok(())
}

fn run_extract(input: PathBuf) -> Result<()> {
    let text = std::fs::read_to_string(&input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;

    let pairs = parser::extract_pairs(&text);
    info!("extracted {} pair(s) from {}", pairs.len(), input.display());

    for pair in &pairs {
        println!("{:.6} {:.6}", pair.frequency, pair.amplitude);
    }
    Ok(())
}

fn run_demo(output: PathBuf) -> Result<()> {
    let mut store = ModelStore::with_default_runs();

    // A third, deliberately tweaked configuration shows the validated
    // parameter path.
    let run = store.add_run();
    run.name = "Wide Felt".to_string();
    let id = run.id;
    let parameters = AntennaParameters {
        substrate: Substrate::Felt,
        ring_count: 3,
        w1: 5.0,
        ..Default::default()
    };
    if let Some(run) = store.run_mut(id) {
        run.set_parameters(parameters)
            .context("Demo parameters rejected")?;
        run.apply_input("2.45 -10\n2.40 -14\n2.31 -19")
            .context("Demo input rejected")?;
    }

    let json = AppState::capture(&store).to_json()?;
    std::fs::write(&output, json)
        .with_context(|| format!("Failed to write state file: {}", output.display()))?;

    info!("wrote demo state to {}", output.display());
    println!("Wrote demo state: {}", output.display());
    Ok(())
}

fn run_metrics(
    config: &Config,
    state: PathBuf,
    dataset: &str,
    field: &str,
    start: Option<f64>,
    end: Option<f64>,
) -> Result<()> {
    let json = std::fs::read_to_string(&state)
        .with_context(|| format!("Failed to read state file: {}", state.display()))?;
    let app_state = AppState::from_json(&json)
        .with_context(|| format!("Failed to load state from {}", state.display()))?;

    let key = DatasetKey::from_str(dataset)?;
    let field = SweepField::from_str(field)?;

    let mut store = ModelStore::new();
    app_state.apply(&mut store);
    let rows = &store.dataset(key).rows;

    let (start, end) = reference_levels(config, start, end);
    let shift = metrics::shift(rows, field, start, end);
    let sensitivity = metrics::sensitivity(shift, end - start);
    let amplitude_field = match field.port() {
        glucosense::model::Port::S11 => SweepField::S11Amplitude,
        glucosense::model::Port::S21 => SweepField::S21Amplitude,
    };
    let amplitude_delta = metrics::amplitude_delta(rows, amplitude_field, start, end);

    println!("Dataset: {} ({})", key.label(), key);
    println!("Field:   {field}");
    println!("Span:    {start} to {end} mg/dL");
    println!("  Shift:           {}", format_metric(shift, "GHz"));
    println!(
        "  Sensitivity:     {}",
        format_metric(sensitivity, "MHz/mg/dL")
    );
    println!(
        "  Amplitude delta: {}",
        format_metric(amplitude_delta, "dB")
    );

    Ok(())
}

fn run_validate(state: PathBuf) -> Result<()> {
    let json = std::fs::read_to_string(&state)
        .with_context(|| format!("Failed to read state file: {}", state.display()))?;
    let app_state = AppState::from_json(&json)
        .with_context(|| format!("Failed to load state from {}", state.display()))?;

    let mut store = ModelStore::new();
    app_state.apply(&mut store);

    let report = validate_store(&store, state.display().to_string());
    print!("{}", report.format_colored());

    if report.has_failures() {
        anyhow::bail!("validation failed");
    }
    Ok(())
}

/// Render an optional metric, absent values as `N/A`.
fn format_metric(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v:.4} {unit}"),
        None => "N/A".to_string(),
    }
}
