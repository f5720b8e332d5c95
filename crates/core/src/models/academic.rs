use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Name given to the term created when an academic year has none active.
pub const DEFAULT_TERM_NAME: &str = "Term 1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicYear {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    pub id: i64,
    pub academic_year_id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAcademicYear {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub active: bool,
}

impl NewAcademicYear {
    /// An active year named after the calendar year of `today`, running Jan 1 to Dec 31.
    pub fn calendar_year(today: NaiveDate) -> Self {
        let year = today.year();
        Self {
            name: year.to_string(),
            start_date: today.with_ordinal(1).unwrap_or(today),
            end_date: NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(today),
            active: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTerm {
    pub academic_year_id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub active: bool,
}

impl NewTerm {
    /// The default active term covering the whole of `year`.
    pub fn spanning(year: &AcademicYear) -> Self {
        Self {
            academic_year_id: year.id,
            name: DEFAULT_TERM_NAME.to_string(),
            start_date: year.start_date,
            end_date: year.end_date,
            active: true,
        }
    }
}

/// The academic year and term that slot operations default to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveTerm {
    pub academic_year_id: i64,
    pub term_id: i64,
}
