//! CLI entry point for the bikeshare statistics tool.
//!
//! Provides an interactive explorer and a one-shot report over the trip data
//! of chicago, new york city and washington.

use anyhow::Result;
use bikeshare_stats::analyzers::{station_stats, time_stats, trip_duration_stats, user_stats};
use bikeshare_stats::{
    city::City,
    filter::Filter,
    loader::load,
    output::{self, CityReport, to_json},
    session::Session,
    trip::TripTable,
};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_stats")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    /// (or their .csv.gz forms). Defaults to $BIKESHARE_DATA_DIR, then ".".
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask for a city and filters, then walk through the statistics interactively
    Explore,
    /// Print every statistic for one city and filter without prompting
    Report {
        /// chicago, "new york city" or washington
        #[arg(short, long)]
        city: String,

        /// all, or a month from january to june
        #[arg(short, long, default_value = "all")]
        month: String,

        /// all, or a weekday name
        #[arg(short, long, default_value = "all")]
        day: String,

        /// Emit the reports as JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bikeshare_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", "warn"));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(env_filter("RUST_LOG_JSON", "debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let data_dir = cli.data_dir.unwrap_or_else(|| {
        std::env::var("BIKESHARE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."))
    });
    info!(data_dir = %data_dir.display(), "Using trip data directory");

    match cli.command {
        Commands::Explore => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            Session::new(stdin.lock(), stdout.lock(), data_dir).run()?;
        }
        Commands::Report {
            city,
            month,
            day,
            json,
        } => {
            let city: City = city.parse()?;
            let filter = Filter::parse(&month, &day)?;
            let table = load(&data_dir, city, &filter)?;

            if json {
                let report = CityReport::build(city, &filter, &table)?;
                println!("{}", to_json(&report)?);
            } else {
                print_reports(&table)?;
            }
        }
    }

    Ok(())
}

/// Prints all four text reports. An empty table is reported once instead.
fn print_reports(table: &TripTable) -> Result<()> {
    if table.is_empty() {
        warn!("No trips matched the filters");
        println!("No trips match the selected filters.");
        return Ok(());
    }

    let started = Instant::now();
    let time = time_stats(table)?;
    print!("{}", output::render_time(&time, started.elapsed()));

    let started = Instant::now();
    let stations = station_stats(table)?;
    print!("{}", output::render_stations(&stations, started.elapsed()));

    let started = Instant::now();
    let durations = trip_duration_stats(table);
    print!("{}", output::render_durations(&durations, started.elapsed()));

    let started = Instant::now();
    let users = user_stats(table)?;
    print!("{}", output::render_users(&users, started.elapsed()));

    Ok(())
}

/// Reads directives from `var`, or uses `default` when it is unset or invalid.
fn env_filter(var: &str, default: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new(default))
}
