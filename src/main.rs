//! CLI entry point for the vacancy statistics tool.
//!
//! Reads a vacancy CSV export, prints salary and volume dynamics by year
//! (overall and for one profession) and by city, and writes the report tables.

use anyhow::{Context, Result};
use clap::Parser;
use std::ffi::OsStr;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use vacancy_stats::{
    analyze_file,
    config::{DEFAULT_FIRST_YEAR, DEFAULT_LAST_YEAR, DEFAULT_TOP_N},
    output::{print_pretty, render_summary, write_area_table, write_json, write_year_table},
    ExchangeTable, ReportConfig,
};

#[derive(Parser)]
#[command(name = "vacancy_stats")]
#[command(about = "Salary and vacancy statistics by year and city", long_about = None)]
struct Cli {
    /// Vacancy CSV file (prompted for when omitted)
    #[arg(value_name = "FILE")]
    file: Option<String>,

    /// Profession substring matched against vacancy titles (prompted for when omitted)
    #[arg(value_name = "PROFESSION")]
    profession: Option<String>,

    /// Directory for the generated report files
    #[arg(short, long, default_value = ".")]
    output_dir: String,

    /// JSON file with currency rates overriding the built-in table
    #[arg(long, value_name = "PATH")]
    rates: Option<String>,

    /// First reported year
    #[arg(long, default_value_t = DEFAULT_FIRST_YEAR)]
    first_year: i32,

    /// Last reported year
    #[arg(long, default_value_t = DEFAULT_LAST_YEAR)]
    last_year: i32,

    /// Number of cities in each ranking
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    top: usize,

    /// Also write report.json
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/vacancy_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("vacancy_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let file = match cli.file {
        Some(file) => file,
        None => prompt("Введите название файла: ")?,
    };
    let profession = match cli.profession {
        Some(profession) => profession,
        None => prompt("Введите название профессии: ")?,
    };

    let rates = match &cli.rates {
        Some(path) => {
            let rates = ExchangeTable::load(path)
                .with_context(|| format!("failed to load exchange rates from {path}"))?;
            info!(path = %path, codes = ?rates.codes().collect::<Vec<_>>(), "Exchange rates loaded");
            rates
        }
        None => ExchangeTable::default(),
    };
    let config = ReportConfig::new(cli.first_year, cli.last_year, cli.top)?;

    let stats = analyze_file(&file, &profession, &rates, &config)
        .with_context(|| format!("failed to analyze {file}"))?;

    print_pretty(&stats);
    println!("{}", render_summary(&stats));

    std::fs::create_dir_all(&cli.output_dir)?;
    write_year_table(
        &format!("{}/years.csv", cli.output_dir),
        &profession,
        &stats,
    )?;
    write_area_table(&format!("{}/cities.csv", cli.output_dir), &stats)?;
    if cli.json {
        write_json(
            &format!("{}/report.json", cli.output_dir),
            &profession,
            &stats,
        )?;
    }

    info!(output_dir = %cli.output_dir, "Report complete");
    Ok(())
}

/// Asks for a value on stdin, mirroring the interactive startup of the tool.
fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
