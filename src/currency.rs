//! Exchange-rate lookup and salary normalization into roubles.

use std::collections::BTreeMap;

use crate::error::{Result, StatsError};

/// Built-in conversion rates into the reporting currency (RUR).
static DEFAULT_RATES: &[(&str, f64)] = &[
    ("AZN", 35.68),
    ("BYR", 23.91),
    ("EUR", 59.90),
    ("GEL", 21.74),
    ("KGS", 0.76),
    ("KZT", 0.13),
    ("RUR", 1.0),
    ("UAH", 1.64),
    ("USD", 60.66),
    ("UZS", 0.0055),
];

/// Immutable mapping from currency code to its rate into the reporting currency.
///
/// A JSON override is a plain object:
/// ```json
/// { "RUR": 1, "USD": 92.5 }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeTable {
    rates: BTreeMap<String, f64>,
}

impl Default for ExchangeTable {
    fn default() -> Self {
        Self {
            rates: DEFAULT_RATES
                .iter()
                .map(|(code, rate)| (code.to_string(), *rate))
                .collect(),
        }
    }
}

impl ExchangeTable {
    /// Builds a table from `(code, rate)` pairs, rejecting non-positive rates.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut rates = BTreeMap::new();
        for (code, rate) in pairs {
            let code = code.into();
            if !(rate.is_finite() && rate > 0.0) {
                return Err(StatsError::InvalidRate { code });
            }
            rates.insert(code, rate);
        }
        Ok(Self { rates })
    }

    /// Loads the table from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let entries: BTreeMap<String, f64> = serde_json::from_str(&content)?;
        Self::from_pairs(entries)
    }

    /// Returns the rate for `code`, or `None` if the code is unknown.
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    /// Midpoint of the salary bounds in the reporting currency, floored.
    ///
    /// `line` is only used to identify the offending record on failure.
    pub fn normalize(&self, salary_min: i64, salary_max: i64, code: &str, line: u64) -> Result<i64> {
        let rate = self
            .rate(code)
            .ok_or_else(|| StatsError::UnknownCurrency {
                code: code.to_string(),
                line,
            })?;

        let overflow = || StatsError::SalaryOverflow { line };
        let bounds = salary_max.checked_add(salary_min).ok_or_else(overflow)?;
        let salary = (bounds as f64 * rate / 2.0).floor();
        if salary.abs() >= i64::MAX as f64 {
            return Err(overflow());
        }
        Ok(salary as i64)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }
}
