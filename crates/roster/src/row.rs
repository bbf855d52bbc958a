//! Validation of a single roster row.
//!
//! Pure and log-free: the loader decides what to report. Rejections are
//! recoverable, the loader drops the row and keeps going.

use chrono::NaiveDate;
use csv::StringRecord;
use thiserror::Error;

use zivijo_common::types::{MENTION_PREFIX, RosterRecord};
use zivijo_common::{AppError, Result};

pub const COL_EMAIL: &str = "email";
pub const COL_USER_ID: &str = "user_id";
pub const COL_BIRTH_DATE: &str = "iso-birth-date";
pub const COL_NAME_DATE: &str = "iso-name-date";

/// Format of both date columns.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a row was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("Failed to parse birth date {value} for user {user_id}")]
    InvalidBirthDate { value: String, user_id: String },

    #[error("Failed to parse name date {value} for user {user_id}")]
    InvalidNameDate { value: String, user_id: String },

    #[error("User ID is missing for user with email {email:?}")]
    MissingUserId { email: String },
}

/// A row that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub record: RosterRecord,
    /// The raw user id lacked `@` and had it prepended.
    pub prefixed: bool,
}

/// Positions of the required columns, resolved from the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    email: usize,
    user_id: usize,
    birth_date: usize,
    name_date: usize,
}

impl Columns {
    /// Look the required columns up by name. Order and extra columns don't matter.
    pub fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| AppError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            email: find(COL_EMAIL)?,
            user_id: find(COL_USER_ID)?,
            birth_date: find(COL_BIRTH_DATE)?,
            name_date: find(COL_NAME_DATE)?,
        })
    }
}

/// Validate and normalize one data row.
///
/// Checks run in a fixed order: birth date, name date, user id. The first
/// failure wins, and a bad date in either column rejects the whole row.
pub fn parse_row(row: &StringRecord, columns: &Columns) -> std::result::Result<ParsedRow, RowError> {
    let field = |idx: usize| row.get(idx).map(str::trim).unwrap_or("");

    let user_id = field(columns.user_id);

    let birth_date = parse_optional_date(field(columns.birth_date)).map_err(|value| {
        RowError::InvalidBirthDate {
            value,
            user_id: user_id.to_string(),
        }
    })?;

    let name_date = parse_optional_date(field(columns.name_date)).map_err(|value| {
        RowError::InvalidNameDate {
            value,
            user_id: user_id.to_string(),
        }
    })?;

    if user_id.is_empty() {
        return Err(RowError::MissingUserId {
            email: field(columns.email).to_string(),
        });
    }

    let prefixed = !user_id.starts_with(MENTION_PREFIX);
    let user_id = if prefixed {
        format!("{MENTION_PREFIX}{user_id}")
    } else {
        user_id.to_string()
    };

    Ok(ParsedRow {
        record: RosterRecord {
            email: field(columns.email).to_string(),
            user_id,
            birth_date,
            name_date,
        },
        prefixed,
    })
}

/// Empty means "no date"; anything else must be `YYYY-MM-DD`.
/// On failure the offending value is handed back.
fn parse_optional_date(value: &str) -> std::result::Result<Option<NaiveDate>, String> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT)
        .map(Some)
        .map_err(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> StringRecord {
        StringRecord::from(vec!["email", "user_id", "iso-birth-date", "iso-name-date"])
    }

    fn parse(fields: [&str; 4]) -> std::result::Result<ParsedRow, RowError> {
        let columns = Columns::from_headers(&headers()).unwrap();
        parse_row(&StringRecord::from(fields.to_vec()), &columns)
    }

    #[test]
    fn test_columns_resolved_by_name() {
        let shuffled = StringRecord::from(vec![
            "iso-name-date",
            "team",
            "user_id",
            "email",
            "iso-birth-date",
        ]);
        let columns = Columns::from_headers(&shuffled).unwrap();
        let row = StringRecord::from(vec!["2022-02-02", "core", "@ana", "ana@x.com", "1990-05-06"]);
        let parsed = parse_row(&row, &columns).unwrap();
        assert_eq!(parsed.record.email, "ana@x.com");
        assert_eq!(parsed.record.user_id, "@ana");
        assert_eq!(parsed.record.birth_date, NaiveDate::from_ymd_opt(1990, 5, 6));
        assert_eq!(parsed.record.name_date, NaiveDate::from_ymd_opt(2022, 2, 2));
    }

    #[test]
    fn test_missing_column_reported_by_name() {
        let headers = StringRecord::from(vec!["email", "user_id", "iso-birth-date"]);
        let err = Columns::from_headers(&headers).unwrap_err();
        assert!(matches!(err, AppError::MissingColumn(name) if name == "iso-name-date"));
    }

    #[test]
    fn test_valid_row() {
        let parsed = parse(["u1@email.com", "@user_1_id", "2022-01-01", "2022-01-02"]).unwrap();
        assert!(!parsed.prefixed);
        assert_eq!(parsed.record.birth_date, NaiveDate::from_ymd_opt(2022, 1, 1));
        assert_eq!(parsed.record.name_date, NaiveDate::from_ymd_opt(2022, 1, 2));
    }

    #[test]
    fn test_empty_dates_are_none() {
        let parsed = parse(["u1@email.com", "@user_1_id", "", ""]).unwrap();
        assert_eq!(parsed.record.birth_date, None);
        assert_eq!(parsed.record.name_date, None);
    }

    #[test]
    fn test_invalid_birth_date_rejected() {
        let err = parse(["u1@email.com", "@user_1_id", "2022-01-32", "2022-01-02"]).unwrap_err();
        assert_eq!(
            err,
            RowError::InvalidBirthDate {
                value: "2022-01-32".to_string(),
                user_id: "@user_1_id".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_name_date_rejected() {
        let err = parse(["u1@email.com", "@user_1_id", "2022-01-01", "01/02/2022"]).unwrap_err();
        assert!(matches!(err, RowError::InvalidNameDate { value, .. } if value == "01/02/2022"));
    }

    #[test]
    fn test_bad_date_checked_before_user_id() {
        let err = parse(["u1@email.com", "", "nope", ""]).unwrap_err();
        assert!(matches!(err, RowError::InvalidBirthDate { .. }));
    }

    #[test]
    fn test_missing_user_id_rejected() {
        let err = parse(["u1@email.com", "", "2022-01-01", ""]).unwrap_err();
        assert_eq!(
            err,
            RowError::MissingUserId {
                email: "u1@email.com".to_string()
            }
        );
    }

    #[test]
    fn test_user_id_gets_prefix() {
        let parsed = parse(["u1@email.com", "user_1_id", "2022-01-01", ""]).unwrap();
        assert!(parsed.prefixed);
        assert_eq!(parsed.record.user_id, "@user_1_id");
    }

    #[test]
    fn test_short_row_treated_as_empty_fields() {
        let columns = Columns::from_headers(&headers()).unwrap();
        let row = StringRecord::from(vec!["u1@email.com", "@user_1_id"]);
        let parsed = parse_row(&row, &columns).unwrap();
        assert_eq!(parsed.record.birth_date, None);
        assert_eq!(parsed.record.name_date, None);
    }
}
