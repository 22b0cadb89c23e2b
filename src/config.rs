//! Report configuration.

use std::ops::RangeInclusive;

use crate::error::{Result, StatsError};

pub const DEFAULT_FIRST_YEAR: i32 = 2007;
pub const DEFAULT_LAST_YEAR: i32 = 2022;
pub const DEFAULT_TOP_N: usize = 10;

/// Parameters of the finalization step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportConfig {
    /// First year reported, inclusive.
    pub first_year: i32,
    /// Last year reported, inclusive. Also the key of the empty-map sentinel.
    pub last_year: i32,
    /// Maximum length of each area ranking.
    pub top_n: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            first_year: DEFAULT_FIRST_YEAR,
            last_year: DEFAULT_LAST_YEAR,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl ReportConfig {
    pub fn new(first_year: i32, last_year: i32, top_n: usize) -> Result<Self> {
        let config = Self {
            first_year,
            last_year,
            top_n,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.first_year > self.last_year {
            return Err(StatsError::InvalidConfig(format!(
                "first year {} is after last year {}",
                self.first_year, self.last_year
            )));
        }
        if self.top_n == 0 {
            return Err(StatsError::InvalidConfig(
                "top-N must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.first_year..=self.last_year
    }
}
