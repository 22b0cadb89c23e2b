//! Report output for derived statistics.
//!
//! Supports the console summary, CSV tables mirroring the year and city
//! sheets, and a JSON document.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs::File;

use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::types::DerivedStats;
use crate::error::Result;

/// Logs derived statistics using Rust's debug pretty-print format.
pub fn print_pretty(stats: &DerivedStats) {
    debug!("{:#?}", stats);
}

/// The six summary lines printed after a run.
pub fn render_summary(stats: &DerivedStats) -> String {
    let salaries = stats
        .top_areas_by_salary
        .iter()
        .map(|a| (py_str(&a.area), a.salary.to_string()));
    let shares = stats
        .top_areas_by_share
        .iter()
        .map(|a| (py_str(&a.area), format!("{:?}", a.share)));

    [
        format!("Динамика уровня зарплат по годам: {}", year_map(&stats.salary_by_year)),
        format!("Динамика количества вакансий по годам: {}", year_map(&stats.count_by_year)),
        format!(
            "Динамика уровня зарплат по годам для выбранной профессии: {}",
            year_map(&stats.filtered_salary_by_year)
        ),
        format!(
            "Динамика количества вакансий по годам для выбранной профессии: {}",
            year_map(&stats.filtered_count_by_year)
        ),
        format!("Уровень зарплат по городам (в порядке убывания): {}", dict(salaries)),
        format!("Доля вакансий по городам (в порядке убывания): {}", dict(shares)),
    ]
    .join("\n")
}

/// Writes the per-year table: overall and profession averages and counts.
///
/// Years without a profession match get 0 in the profession columns.
pub fn write_year_table(path: &str, profession: &str, stats: &DerivedStats) -> Result<()> {
    let mut writer = WriterBuilder::new().from_path(path)?;

    writer.write_record([
        "Год".to_string(),
        "Средняя зарплата".to_string(),
        format!("Средняя зарплата - {profession}"),
        "Количество вакансий".to_string(),
        format!("Количество вакансий - {profession}"),
    ])?;

    for (year, salary) in &stats.salary_by_year {
        let count = stats.count_by_year.get(year).copied().unwrap_or_default();
        let filtered_salary = stats
            .filtered_salary_by_year
            .get(year)
            .copied()
            .unwrap_or_default();
        let filtered_count = stats
            .filtered_count_by_year
            .get(year)
            .copied()
            .unwrap_or_default();

        writer.write_record([
            year.to_string(),
            salary.to_string(),
            filtered_salary.to_string(),
            count.to_string(),
            filtered_count.to_string(),
        ])?;
    }

    writer.flush()?;
    info!(path, rows = stats.salary_by_year.len(), "Year table written");
    Ok(())
}

/// Writes the city table: salary ranking and share ranking side by side,
/// separated by an empty column.
pub fn write_area_table(path: &str, stats: &DerivedStats) -> Result<()> {
    let mut writer = WriterBuilder::new().from_path(path)?;

    writer.write_record(["Город", "Уровень зарплат", "", "Город", "Доля вакансий"])?;

    let rows = stats
        .top_areas_by_salary
        .len()
        .max(stats.top_areas_by_share.len());
    for i in 0..rows {
        let (salary_area, salary) = stats
            .top_areas_by_salary
            .get(i)
            .map(|a| (a.area.clone(), a.salary.to_string()))
            .unwrap_or_default();
        let (share_area, share) = stats
            .top_areas_by_share
            .get(i)
            .map(|a| (a.area.clone(), a.display_percent()))
            .unwrap_or_default();

        writer.write_record([salary_area, salary, String::new(), share_area, share])?;
    }

    writer.flush()?;
    info!(path, rows, "Area table written");
    Ok(())
}

#[derive(Serialize)]
struct ReportDocument<'a> {
    generated_at: DateTime<Utc>,
    profession: &'a str,
    stats: &'a DerivedStats,
}

/// Writes the statistics as pretty-printed JSON.
pub fn write_json(path: &str, profession: &str, stats: &DerivedStats) -> Result<()> {
    let document = ReportDocument {
        generated_at: Utc::now(),
        profession,
        stats,
    };
    serde_json::to_writer_pretty(File::create(path)?, &document)?;
    info!(path, "JSON report written");
    Ok(())
}

fn year_map<V: Display>(map: &BTreeMap<i32, V>) -> String {
    dict(map.iter().map(|(year, value)| (year.to_string(), value.to_string())))
}

fn dict(entries: impl Iterator<Item = (String, String)>) -> String {
    let body: Vec<String> = entries.map(|(k, v)| format!("{k}: {v}")).collect();
    format!("{{{}}}", body.join(", "))
}

/// Quotes a string the way a Python `repr` would.
fn py_str(s: &str) -> String {
    if s.contains('\'') && !s.contains('"') {
        format!("\"{}\"", s.replace('\\', "\\\\"))
    } else {
        format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::{AreaSalary, AreaShare};
    use std::env;
    use std::fs;
    use std::path::Path;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample() -> DerivedStats {
        DerivedStats {
            total_accepted: 2,
            salary_by_year: BTreeMap::from([(2020, 1500), (2021, 4000)]),
            count_by_year: BTreeMap::from([(2020, 1), (2021, 1)]),
            filtered_salary_by_year: BTreeMap::from([(2021, 4000)]),
            filtered_count_by_year: BTreeMap::from([(2021, 1)]),
            top_areas_by_salary: vec![
                AreaSalary {
                    area: "Moscow".to_string(),
                    salary: 2750,
                },
                AreaSalary {
                    area: "Saint Petersburg".to_string(),
                    salary: 2000,
                },
            ],
            top_areas_by_share: vec![AreaShare {
                area: "Moscow".to_string(),
                share: 0.07,
            }],
        }
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&sample());
    }

    #[test]
    fn test_render_summary() {
        let summary = render_summary(&sample());
        let lines: Vec<_> = summary.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(
            lines[0],
            "Динамика уровня зарплат по годам: {2020: 1500, 2021: 4000}"
        );
        assert_eq!(
            lines[3],
            "Динамика количества вакансий по годам для выбранной профессии: {2021: 1}"
        );
        assert_eq!(
            lines[4],
            "Уровень зарплат по городам (в порядке убывания): {'Moscow': 2750, 'Saint Petersburg': 2000}"
        );
        assert_eq!(
            lines[5],
            "Доля вакансий по городам (в порядке убывания): {'Moscow': 0.07}"
        );
    }

    #[test]
    fn test_py_str() {
        assert_eq!(py_str("Moscow"), "'Moscow'");
        assert_eq!(py_str("Saint' Louis"), "\"Saint' Louis\"");
    }

    #[test]
    fn test_write_year_table() {
        let path = temp_path("vacancy_stats_test_years.csv");
        let _ = fs::remove_file(&path);

        write_year_table(&path, "Senior", &sample()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Год,Средняя зарплата,Средняя зарплата - Senior,Количество вакансий,Количество вакансий - Senior"
        );
        assert_eq!(lines[1], "2020,1500,0,1,0");
        assert_eq!(lines[2], "2021,4000,4000,1,1");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_area_table() {
        let path = temp_path("vacancy_stats_test_areas.csv");
        let _ = fs::remove_file(&path);

        write_area_table(&path, &sample()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Moscow,2750,,Moscow,7.0%");
        assert_eq!(lines[2], "Saint Petersburg,2000,,,");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_json() {
        let path = temp_path("vacancy_stats_test_report.json");
        let _ = fs::remove_file(&path);

        write_json(&path, "Senior", &sample()).unwrap();
        assert!(Path::new(&path).exists());

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["profession"], "Senior");
        assert_eq!(value["stats"]["salary_by_year"]["2021"], 4000);
        assert_eq!(value["stats"]["top_areas_by_share"][0]["area"], "Moscow");

        fs::remove_file(&path).unwrap();
    }
}
