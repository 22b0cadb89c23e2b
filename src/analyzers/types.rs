//! Data types produced by the finalization step.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::analyzers::utility::display_percent;

/// Average salary of one area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaSalary {
    pub area: String,
    pub salary: i64,
}

/// Fraction (0–1, four decimals) of all accepted vacancies posted in one area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaShare {
    pub area: String,
    pub share: f64,
}

impl AreaShare {
    pub fn display_percent(&self) -> String {
        display_percent(self.share)
    }
}

/// Finalized statistics handed to the report emitters.
///
/// Year maps are keyed in ascending order; area rankings are sorted
/// descending with first-seen areas winning ties.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedStats {
    pub total_accepted: u64,
    pub salary_by_year: BTreeMap<i32, i64>,
    pub count_by_year: BTreeMap<i32, u64>,
    pub filtered_salary_by_year: BTreeMap<i32, i64>,
    pub filtered_count_by_year: BTreeMap<i32, u64>,
    pub top_areas_by_salary: Vec<AreaSalary>,
    pub top_areas_by_share: Vec<AreaShare>,
}
