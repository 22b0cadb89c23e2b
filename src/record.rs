//! Typed vacancy records and their construction from raw rows.

use thiserror::Error;

/// One data row with the six required fields resolved by header name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub line: u64,
    pub name: String,
    pub salary_from: String,
    pub salary_to: String,
    pub salary_currency: String,
    pub area_name: String,
    pub published_at: String,
}

/// A well-formed vacancy posting.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub title: String,
    pub salary_min: i64,
    pub salary_max: i64,
    pub currency_code: String,
    pub area: String,
    pub published_year: i32,
    /// Source line, zero when the record was not read from a file.
    pub line: u64,
}

/// Why a row could not become a [`Record`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A required field is empty. The row is skipped.
    #[error("required field `{field}` is empty")]
    Missing { field: &'static str },
    /// A field is present but unparsable or out of range. This aborts the run.
    #[error("invalid {field} value `{value}`")]
    Invalid { field: &'static str, value: String },
}

impl Record {
    pub fn new(
        title: impl Into<String>,
        salary_min: i64,
        salary_max: i64,
        currency_code: impl Into<String>,
        area: impl Into<String>,
        published_year: i32,
    ) -> Self {
        Self {
            title: title.into(),
            salary_min,
            salary_max,
            currency_code: currency_code.into(),
            area: area.into(),
            published_year,
            line: 0,
        }
    }

    pub fn at_line(mut self, line: u64) -> Self {
        self.line = line;
        self
    }

    /// Validates a raw row and converts its fields.
    ///
    /// Every field is checked for emptiness before any parsing happens, so a
    /// row with both an empty field and a garbled one is skipped, not fatal.
    pub fn from_row(row: &RawRow) -> Result<Self, RecordError> {
        let fields = [
            ("name", &row.name),
            ("salary_from", &row.salary_from),
            ("salary_to", &row.salary_to),
            ("salary_currency", &row.salary_currency),
            ("area_name", &row.area_name),
            ("published_at", &row.published_at),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, value)| value.is_empty()) {
            return Err(RecordError::Missing { field: *field });
        }

        let record = Self::new(
            row.name.clone(),
            parse_salary("salary_from", &row.salary_from)?,
            parse_salary("salary_to", &row.salary_to)?,
            row.salary_currency.clone(),
            row.area_name.clone(),
            parse_year(&row.published_at)?,
        );
        Ok(record.at_line(row.line))
    }
}

/// Parses fractional text and truncates toward zero.
///
/// Values whose magnitude does not fit in an `i64` are rejected instead of
/// saturating.
fn parse_salary(field: &'static str, value: &str) -> Result<i64, RecordError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() < i64::MAX as f64)
        .map(|v| v.trunc() as i64)
        .ok_or_else(|| RecordError::Invalid {
            field,
            value: value.to_string(),
        })
}

/// Takes the integer before the first `-` of a `YYYY-MM-DD...` timestamp.
fn parse_year(value: &str) -> Result<i32, RecordError> {
    let head = value.split('-').next().unwrap_or_default();
    head.trim().parse().map_err(|_| RecordError::Invalid {
        field: "published_at",
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> RawRow {
        RawRow {
            line: 2,
            name: "Senior Engineer".to_string(),
            salary_from: "3000.0".to_string(),
            salary_to: "5000.9".to_string(),
            salary_currency: "RUR".to_string(),
            area_name: "Moscow".to_string(),
            published_at: "2021-06-15T10:00:00+0300".to_string(),
        }
    }

    #[test]
    fn test_from_row_valid() {
        let record = Record::from_row(&row()).unwrap();
        assert_eq!(record.title, "Senior Engineer");
        assert_eq!(record.salary_min, 3000);
        assert_eq!(record.salary_max, 5000);
        assert_eq!(record.currency_code, "RUR");
        assert_eq!(record.area, "Moscow");
        assert_eq!(record.published_year, 2021);
        assert_eq!(record.line, 2);
    }

    #[test]
    fn test_from_row_missing_field() {
        let mut r = row();
        r.area_name.clear();
        assert_eq!(
            Record::from_row(&r),
            Err(RecordError::Missing { field: "area_name" })
        );
    }

    #[test]
    fn test_missing_wins_over_invalid() {
        let mut r = row();
        r.salary_from = "abc".to_string();
        r.published_at.clear();
        assert!(matches!(
            Record::from_row(&r),
            Err(RecordError::Missing { field: "published_at" })
        ));
    }

    #[test]
    fn test_from_row_invalid_salary() {
        let mut r = row();
        r.salary_to = "lots".to_string();
        let err = Record::from_row(&r).unwrap_err();
        assert_eq!(
            err,
            RecordError::Invalid {
                field: "salary_to",
                value: "lots".to_string()
            }
        );
    }

    #[test]
    fn test_salary_truncates_toward_zero() {
        assert_eq!(parse_salary("salary_from", "1999.99"), Ok(1999));
        assert_eq!(parse_salary("salary_from", "-10.5"), Ok(-10));
        assert!(parse_salary("salary_from", "inf").is_err());
    }

    #[test]
    fn test_salary_out_of_range_is_invalid() {
        assert_eq!(
            parse_salary("salary_to", "1e19"),
            Err(RecordError::Invalid {
                field: "salary_to",
                value: "1e19".to_string()
            })
        );
        assert!(parse_salary("salary_to", "-1e19").is_err());
        assert_eq!(parse_salary("salary_to", "4e18"), Ok(4_000_000_000_000_000_000));
    }

    #[test]
    fn test_record_error_display() {
        assert_eq!(
            RecordError::Missing { field: "area_name" }.to_string(),
            "required field `area_name` is empty"
        );
        assert_eq!(
            RecordError::Invalid {
                field: "salary_from",
                value: "abc".to_string()
            }
            .to_string(),
            "invalid salary_from value `abc`"
        );
    }

    #[test]
    fn test_year_parsing() {
        assert_eq!(parse_year("2007-12-03T17:34:36+0300"), Ok(2007));
        assert_eq!(parse_year("2022"), Ok(2022));
        assert!(parse_year("June 2020").is_err());
    }
}
