//! Frontline -- warzone tier classification and capture-effort scoring.
//!
//! Loads a warzone snapshot (or generates a synthetic one), runs the tier
//! classifier and the capture-effort scorer, and prints a report to stdout.
//! Diagnostics go to stderr through `tracing`; `RUST_LOG` overrides the level.
//!
//! Usage:
//!   frontline [OPTIONS]
//!
//! Options:
//!   --snapshot FILE  Warzone snapshot JSON to analyse
//!   --synthetic N    Analyse a generated warzone with N territories (default: 60)
//!   --seed N         Seed for --synthetic, 0 for entropy (default: 1)
//!   --config FILE    Analysis config JSON (default: built-in Amarr/Minmatar)
//!   --json           Print the report as JSON
//!   --explain        Include per-territory tier explanations
//!   --audit          Include a consistency audit of the tiers
//!   --quiet          Only log warnings and errors

use std::env;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use tracing::info;
use tracing_subscriber::EnvFilter;

use frontline::analysis::analyze;
use frontline::classify::{audit, explain};
use frontline::config::{AnalysisConfig, ConfigError};
use frontline::map::GraphError;
use frontline::report::WarzoneReport;
use frontline::snapshot::{load_snapshot, SnapshotError};
use frontline::synth::SyntheticWarzone;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("failed to generate warzone: {0}")]
    Synthetic(#[from] GraphError),

    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Default)]
struct Options {
    snapshot: Option<PathBuf>,
    synthetic: Option<usize>,
    seed: u64,
    config: Option<PathBuf>,
    json: bool,
    explain: bool,
    audit: bool,
    quiet: bool,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<Options, CliError> {
    let mut opts = Options {
        seed: 1,
        ..Options::default()
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--snapshot" => opts.snapshot = Some(PathBuf::from(value(args, &mut i)?)),
            "--synthetic" => opts.synthetic = Some(parse_value(args, &mut i)?),
            "--seed" => opts.seed = parse_value(args, &mut i)?,
            "--config" => opts.config = Some(PathBuf::from(value(args, &mut i)?)),
            "--json" => opts.json = true,
            "--explain" => opts.explain = true,
            "--audit" => opts.audit = true,
            "--quiet" => opts.quiet = true,
            "--help" | "-h" => opts.help = true,
            other => return Err(CliError::Usage(format!("unknown argument: {other}"))),
        }
        i += 1;
    }

    if opts.snapshot.is_some() && opts.synthetic.is_some() {
        return Err(CliError::Usage(
            "--snapshot and --synthetic are mutually exclusive".to_string(),
        ));
    }
    Ok(opts)
}

fn value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str, CliError> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| CliError::Usage(format!("{flag} requires a value")))
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: &mut usize) -> Result<T, CliError> {
    let flag = args[*i].clone();
    let raw = value(args, i)?;
    raw.parse()
        .map_err(|_| CliError::Usage(format!("invalid {flag} value: {raw}")))
}

fn init_logging(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(opts: &Options) -> Result<(), CliError> {
    let config = match &opts.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };

    let warzone = match &opts.snapshot {
        Some(path) => load_snapshot(path)?.into_warzone((config.defender, config.attacker))?,
        None => {
            let synth = SyntheticWarzone {
                defender: config.defender,
                attacker: config.attacker,
                reference_name: config
                    .reference_name
                    .clone()
                    .unwrap_or_else(|| SyntheticWarzone::default().reference_name),
                ..SyntheticWarzone::with_size(opts.seed, opts.synthetic.unwrap_or(60))
            };
            synth.generate()?
        }
    };
    info!(warzone = %warzone.name, territories = warzone.graph.len(), "loaded warzone");

    let analysed = analyze(warzone, &config);

    let mut report = WarzoneReport::new(&analysed);
    if opts.explain {
        report = report.with_explanations(explain(&analysed.graph, &config.permanent_frontlines));
    }
    if opts.audit {
        report = report.with_anomalies(audit(&analysed.graph, &config.permanent_frontlines));
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if opts.json {
        report.write_json(&mut out)?;
    } else {
        report.write_text(&mut out)?;
    }
    out.flush()?;
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let opts = match parse_args(&args) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("error: {e}");
            print_usage();
            process::exit(2);
        }
    };
    if opts.help {
        print_usage();
        return;
    }

    init_logging(opts.quiet);

    if let Err(e) = run(&opts) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage: frontline [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --snapshot FILE  Warzone snapshot JSON to analyse");
    eprintln!("  --synthetic N    Analyse a generated warzone with N territories (default: 60)");
    eprintln!("  --seed N         Seed for --synthetic, 0 for entropy (default: 1)");
    eprintln!("  --config FILE    Analysis config JSON (default: built-in Amarr/Minmatar)");
    eprintln!("  --json           Print the report as JSON");
    eprintln!("  --explain        Include per-territory tier explanations");
    eprintln!("  --audit          Include a consistency audit of the tiers");
    eprintln!("  --quiet          Only log warnings and errors");
}
