//! CSV reader for vacancy exports.
//!
//! Columns are located by header name, so the six required fields may appear
//! in any order alongside unrelated columns.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord};

use crate::error::{Result, StatsError};
use crate::record::RawRow;

const REQUIRED_COLUMNS: [&str; 6] = [
    "name",
    "salary_from",
    "salary_to",
    "salary_currency",
    "area_name",
    "published_at",
];

/// Column indices of the required fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Schema {
    name: usize,
    salary_from: usize,
    salary_to: usize,
    salary_currency: usize,
    area_name: usize,
    published_at: usize,
}

impl Schema {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let mut idx = [0usize; 6];
        for (slot, column) in idx.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h == column)
                .ok_or(StatsError::MissingColumn(column))?;
        }

        Ok(Self {
            name: idx[0],
            salary_from: idx[1],
            salary_to: idx[2],
            salary_currency: idx[3],
            area_name: idx[4],
            published_at: idx[5],
        })
    }

    fn row(&self, record: &StringRecord, line: u64) -> RawRow {
        let field = |i: usize| record.get(i).unwrap_or_default().to_string();
        RawRow {
            line,
            name: field(self.name),
            salary_from: field(self.salary_from),
            salary_to: field(self.salary_to),
            salary_currency: field(self.salary_currency),
            area_name: field(self.area_name),
            published_at: field(self.published_at),
        }
    }
}

/// Streams [`RawRow`]s out of a CSV source.
pub struct VacancyReader<R> {
    inner: csv::Reader<R>,
    schema: Schema,
}

impl<R: Read> VacancyReader<R> {
    /// # Errors
    ///
    /// Returns [`StatsError::MissingColumn`] if a required header is absent.
    pub fn new(reader: R) -> Result<Self> {
        let mut inner = ReaderBuilder::new().flexible(true).from_reader(reader);
        let schema = Schema::from_headers(inner.headers()?)?;
        Ok(Self { inner, schema })
    }

    pub fn rows(&mut self) -> impl Iterator<Item = Result<RawRow>> + '_ {
        let schema = self.schema;
        self.inner.records().map(move |result| {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            Ok(schema.row(&record, line))
        })
    }
}
