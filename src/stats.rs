use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::debug;

use crate::analyzers::finalize::finalize;
use crate::analyzers::types::DerivedStats;
use crate::analyzers::utility::floor_div;
use crate::config::ReportConfig;
use crate::currency::ExchangeTable;
use crate::error::{Result, StatsError};
use crate::record::{RawRow, Record, RecordError};

/// Running salary sum and posting count.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub sum: i64,
    pub count: u64,
}

impl Bucket {
    /// The bucket with one more salary added, or `None` if the sum overflows.
    fn with(self, salary: i64) -> Option<Bucket> {
        Some(Bucket {
            sum: self.sum.checked_add(salary)?,
            count: self.count + 1,
        })
    }

    fn combined(self, other: Bucket) -> Option<Bucket> {
        Some(Bucket {
            sum: self.sum.checked_add(other.sum)?,
            count: self.count + other.count,
        })
    }

    /// Floor of `sum / count`, or `None` for an empty bucket.
    pub fn average(&self) -> Option<i64> {
        (self.count > 0).then(|| floor_div(self.sum, self.count))
    }
}

/// Per-year aggregates over all records and over profession matches only.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearBucket {
    pub all: Bucket,
    pub filtered: Bucket,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaBucket {
    pub name: String,
    /// Position at which the area was first ingested; breaks ranking ties.
    pub first_seen: usize,
    pub bucket: Bucket,
}

/// Accumulates normalized salaries by year and by area.
///
/// Ingestion only ever adds to the buckets. [`VacancyStats::finalize`]
/// consumes the engine, so nothing can be ingested after the statistics have
/// been derived.
#[derive(Debug, Clone)]
pub struct VacancyStats {
    profession: String,
    rates: ExchangeTable,
    years: BTreeMap<i32, YearBucket>,
    areas: Vec<AreaBucket>,
    area_index: HashMap<String, usize>,
    total_accepted: u64,
    skipped: u64,
}

impl VacancyStats {
    pub fn new(profession: impl Into<String>, rates: ExchangeTable) -> Self {
        Self {
            profession: profession.into(),
            rates,
            years: BTreeMap::new(),
            areas: Vec::new(),
            area_index: HashMap::new(),
            total_accepted: 0,
            skipped: 0,
        }
    }

    /// Adds one record and returns its normalized salary.
    ///
    /// Normalization and every updated sum are computed before any bucket is
    /// touched, so a record that fails (unknown currency, overflowing sum)
    /// leaves the engine unchanged.
    pub fn ingest(&mut self, record: &Record) -> Result<i64> {
        let line = record.line;
        let salary = self.rates.normalize(
            record.salary_min,
            record.salary_max,
            &record.currency_code,
            line,
        )?;
        let overflow = || StatsError::SalaryOverflow { line };

        let mut year = self
            .years
            .get(&record.published_year)
            .copied()
            .unwrap_or_default();
        year.all = year.all.with(salary).ok_or_else(overflow)?;
        if record.title.contains(self.profession.as_str()) {
            year.filtered = year.filtered.with(salary).ok_or_else(overflow)?;
        }
        let area = self
            .area(&record.area)
            .map(|area| area.bucket)
            .unwrap_or_default()
            .with(salary)
            .ok_or_else(overflow)?;

        self.years.insert(record.published_year, year);
        let idx = self.area_slot(&record.area);
        self.areas[idx].bucket = area;

        self.total_accepted += 1;
        Ok(salary)
    }

    /// Validates and ingests a raw row.
    ///
    /// Returns `Ok(false)` when the row has an empty required field and was
    /// skipped. Unparsable fields and unknown currencies are fatal.
    pub fn ingest_row(&mut self, row: &RawRow) -> Result<bool> {
        match Record::from_row(row) {
            Ok(record) => {
                self.ingest(&record)?;
                Ok(true)
            }
            Err(err @ RecordError::Missing { .. }) => {
                self.skipped += 1;
                debug!(line = row.line, reason = %err, "Skipping malformed row");
                Ok(false)
            }
            Err(RecordError::Invalid { field, value }) => Err(StatsError::InvalidField {
                field,
                value,
                line: row.line,
            }),
        }
    }

    /// Folds in the buckets of an engine that ingested a disjoint shard.
    ///
    /// Areas first seen in `other` rank after every area already known here,
    /// in `other`'s own first-seen order.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::SalaryOverflow`] (line 0) if a combined sum does
    /// not fit; `self` is left partially merged and should be discarded.
    pub fn merge(&mut self, other: VacancyStats) -> Result<()> {
        let overflow = || StatsError::SalaryOverflow { line: 0 };

        for (year, bucket) in other.years {
            let entry = self.years.entry(year).or_default();
            entry.all = entry.all.combined(bucket.all).ok_or_else(overflow)?;
            entry.filtered = entry
                .filtered
                .combined(bucket.filtered)
                .ok_or_else(overflow)?;
        }

        for area in other.areas {
            let idx = self.area_slot(&area.name);
            let slot = &mut self.areas[idx].bucket;
            *slot = slot.combined(area.bucket).ok_or_else(overflow)?;
        }

        self.total_accepted += other.total_accepted;
        self.skipped += other.skipped;
        Ok(())
    }

    pub fn finalize(self, config: &ReportConfig) -> Result<DerivedStats> {
        finalize(&self, config)
    }

    fn area_slot(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.area_index.get(name) {
            return idx;
        }

        let idx = self.areas.len();
        self.areas.push(AreaBucket {
            name: name.to_string(),
            first_seen: idx,
            bucket: Bucket::default(),
        });
        self.area_index.insert(name.to_string(), idx);
        idx
    }

    pub fn profession(&self) -> &str {
        &self.profession
    }

    pub fn total_accepted(&self) -> u64 {
        self.total_accepted
    }

    /// Rows dropped because a required field was empty.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    pub fn year(&self, year: i32) -> Option<&YearBucket> {
        self.years.get(&year)
    }

    pub fn years(&self) -> impl Iterator<Item = (i32, &YearBucket)> {
        self.years.iter().map(|(year, bucket)| (*year, bucket))
    }

    pub fn area(&self, name: &str) -> Option<&AreaBucket> {
        self.area_index.get(name).map(|&idx| &self.areas[idx])
    }

    /// Areas in first-seen order.
    pub fn areas(&self) -> &[AreaBucket] {
        &self.areas
    }
}
