use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::analyzers::types::{AreaSalary, AreaShare, DerivedStats};
use crate::analyzers::utility::round_share;
use crate::config::ReportConfig;
use crate::error::{Result, StatsError};
use crate::stats::{AreaBucket, VacancyStats};

/// Minimum posting count for an area to be ranked: 1% of all accepted
/// vacancies, rounded down.
pub fn significance_threshold(total_accepted: u64) -> u64 {
    total_accepted / 100
}

/// Converts the accumulated buckets into [`DerivedStats`].
///
/// Computes per-year averages and counts within the configured range, then
/// ranks significant areas by average salary and by share of postings.
///
/// # Errors
///
/// Returns [`StatsError::EmptyDataset`] when no record was accepted.
pub fn finalize(stats: &VacancyStats, config: &ReportConfig) -> Result<DerivedStats> {
    config.validate()?;

    let total = stats.total_accepted();
    if total == 0 {
        return Err(StatsError::EmptyDataset);
    }

    let mut salary_by_year = BTreeMap::new();
    let mut count_by_year = BTreeMap::new();
    let mut filtered_salary_by_year = BTreeMap::new();
    let mut filtered_count_by_year = BTreeMap::new();

    for year in config.years() {
        let Some(bucket) = stats.year(year) else {
            continue;
        };

        if let Some(avg) = bucket.all.average() {
            salary_by_year.insert(year, avg);
            count_by_year.insert(year, bucket.all.count);
        }
        if let Some(avg) = bucket.filtered.average() {
            filtered_salary_by_year.insert(year, avg);
            filtered_count_by_year.insert(year, bucket.filtered.count);
        }
    }

    // Downstream consumers expect at least one entry in the filtered maps.
    if filtered_salary_by_year.is_empty() {
        warn!(
            profession = stats.profession(),
            sentinel_year = config.last_year,
            "No vacancies matched the profession, reporting a zero placeholder"
        );
        filtered_salary_by_year.insert(config.last_year, 0);
        filtered_count_by_year.insert(config.last_year, 0);
    }

    let threshold = significance_threshold(total);
    let significant: Vec<&AreaBucket> = stats
        .areas()
        .iter()
        .filter(|area| area.bucket.count >= threshold)
        .collect();

    debug!(
        total,
        threshold,
        areas = stats.areas().len(),
        significant = significant.len(),
        "Ranking areas"
    );

    Ok(DerivedStats {
        total_accepted: total,
        salary_by_year,
        count_by_year,
        filtered_salary_by_year,
        filtered_count_by_year,
        top_areas_by_salary: rank_by_salary(&significant, config.top_n),
        top_areas_by_share: rank_by_share(&significant, total, config.top_n),
    })
}

fn rank_by_salary(areas: &[&AreaBucket], top_n: usize) -> Vec<AreaSalary> {
    let mut ranked: Vec<(&AreaBucket, i64)> = areas
        .iter()
        .filter_map(|area| area.bucket.average().map(|avg| (*area, avg)))
        .collect();
    ranked.sort_by(|(a, a_avg), (b, b_avg)| {
        b_avg.cmp(a_avg).then(a.first_seen.cmp(&b.first_seen))
    });

    ranked
        .into_iter()
        .take(top_n)
        .map(|(area, salary)| AreaSalary {
            area: area.name.clone(),
            salary,
        })
        .collect()
}

/// Orders by raw count, which orders the unrounded shares identically.
fn rank_by_share(areas: &[&AreaBucket], total: u64, top_n: usize) -> Vec<AreaShare> {
    let mut ranked = areas.to_vec();
    ranked.sort_by(|a, b| {
        b.bucket
            .count
            .cmp(&a.bucket.count)
            .then(a.first_seen.cmp(&b.first_seen))
    });

    ranked
        .into_iter()
        .take(top_n)
        .map(|area| AreaShare {
            area: area.name.clone(),
            share: round_share(area.bucket.count, total),
        })
        .collect()
}
