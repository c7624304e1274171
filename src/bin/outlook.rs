//! # outlook
//!
//! Command-line front end: forecast a date from a saved NASA POWER payload.

use chrono::{Datelike, Utc};
use clap::{Parser, ValueEnum};
use climate_outlook::{Debouncer, FileProvider, OutlookSession, Result};
use seasonal_forecast::export::{write_csv, write_json, ExportContext};
use seasonal_forecast::{Location, OutlookConfig, TargetDate};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant, SystemTime};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const WATCH_POLL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Csv,
    Json,
}

#[derive(Parser)]
#[command(name = "outlook")]
#[command(about = "Seasonal climate outlook from historical daily observations", long_about = None)]
struct Cli {
    /// Saved provider payload (.json NASA POWER response or wide .csv)
    #[arg(short, long)]
    input: PathBuf,

    /// Target date (YYYY-MM-DD)
    #[arg(short, long)]
    date: String,

    /// Latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// Report format
    #[arg(short, long, value_enum, default_value = "json")]
    format: ReportFormat,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Year the reference period is counted back from (defaults to this year)
    #[arg(long, allow_hyphen_values = true)]
    current_year: Option<i32>,

    /// Keep running and rewrite the report whenever the input file changes
    #[arg(long)]
    watch: bool,

    /// Quiet period after an input change before recomputing, in milliseconds
    #[arg(long, default_value = "500")]
    settle_ms: u64,
}

/// Inputs of one forecast request
#[derive(Debug, Clone, Copy)]
struct Request {
    location: Location,
    target: TargetDate,
    current_year: i32,
}

fn load_config(path: Option<&PathBuf>) -> Result<OutlookConfig> {
    let config = match path {
        Some(path) => OutlookConfig::from_file(path)?.with_env_overrides(|key| std::env::var(key).ok())?,
        None => OutlookConfig::from_env()?,
    };
    Ok(config)
}

fn modified(path: &Path) -> Result<SystemTime> {
    Ok(fs::metadata(path)?.modified()?)
}

fn write_report(cli: &Cli, session: &OutlookSession<FileProvider>, request: Request) -> Result<()> {
    let Some(report) = session.run(request.location, request.target, request.current_year)? else {
        info!("Superseded request, nothing written");
        return Ok(());
    };

    info!(
        date = %report.target,
        variables = report.predictions.len(),
        "Forecast complete"
    );

    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };

    let ctx = ExportContext::new(request.location, Utc::now(), session.config());
    match cli.format {
        ReportFormat::Csv => write_csv(&report, &ctx, &mut writer)?,
        ReportFormat::Json => {
            write_json(&report, &ctx, &mut writer)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;

    if let Some(path) = &cli.output {
        info!(path = %path.display(), "Report written");
    }
    Ok(())
}

fn watch(cli: &Cli, session: &OutlookSession<FileProvider>, request: Request) -> Result<()> {
    let mut debouncer = Debouncer::new(Duration::from_millis(cli.settle_ms));
    let mut last_modified = modified(&cli.input)?;
    info!(path = %cli.input.display(), "Watching input for changes");

    loop {
        thread::sleep(WATCH_POLL);

        match modified(&cli.input) {
            Ok(stamp) if stamp != last_modified => {
                last_modified = stamp;
                debouncer.touch(Instant::now());
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "Cannot read input metadata"),
        }

        if debouncer.take_ready(Instant::now()) {
            if let Err(e) = write_report(cli, session, request) {
                warn!(error = %e, "Recompute failed");
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_ref())?;
    let request = Request {
        location: Location::new(cli.lat, cli.lon)?,
        target: TargetDate::parse(&cli.date)?,
        current_year: cli.current_year.unwrap_or_else(|| Utc::now().year()),
    };

    let provider = FileProvider::from_path(&cli.input, config.fill_value)?;
    let session = OutlookSession::new(provider, config)?;

    write_report(&cli, &session, request)?;

    if cli.watch {
        watch(&cli, &session, request)?;
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
