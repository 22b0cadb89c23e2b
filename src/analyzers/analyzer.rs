use std::fs::File;
use std::io::Read;

use tracing::info;

use crate::analyzers::types::DerivedStats;
use crate::config::ReportConfig;
use crate::currency::ExchangeTable;
use crate::error::Result;
use crate::parser::VacancyReader;
use crate::stats::VacancyStats;

/// Reads a vacancy CSV file, aggregates it and derives the report statistics.
#[tracing::instrument(skip(rates, config))]
pub fn analyze_file(
    path: &str,
    profession: &str,
    rates: &ExchangeTable,
    config: &ReportConfig,
) -> Result<DerivedStats> {
    let file = File::open(path)?;
    analyze_reader(file, profession, rates, config)
}

/// Same as [`analyze_file`] over any CSV source.
pub fn analyze_reader<R: Read>(
    reader: R,
    profession: &str,
    rates: &ExchangeTable,
    config: &ReportConfig,
) -> Result<DerivedStats> {
    let mut reader = VacancyReader::new(reader)?;
    let stats = ingest(&mut reader, profession, rates)?;

    info!(
        accepted = stats.total_accepted(),
        skipped = stats.skipped(),
        areas = stats.areas().len(),
        "Vacancies ingested"
    );

    stats.finalize(config)
}

/// Folds every row of `reader` into a fresh engine, stopping at the first
/// fatal error.
pub fn ingest<R: Read>(
    reader: &mut VacancyReader<R>,
    profession: &str,
    rates: &ExchangeTable,
) -> Result<VacancyStats> {
    let mut stats = VacancyStats::new(profession, rates.clone());
    for row in reader.rows() {
        stats.ingest_row(&row?)?;
    }
    Ok(stats)
}
