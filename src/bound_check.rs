use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use time::Date;

use crate::date_ext::DateExt;
use crate::reader::Readers;
use crate::timer::timed;
use crate::{DateBoundError, Result};

/// Organisational scope of a query. Each division reads through its own
/// credentials
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Division {
    #[default]
    Ccg,
    Lsg,
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Division::Ccg => write!(f, "CCG"),
            Division::Lsg => write!(f, "LSG"),
        }
    }
}

impl FromStr for Division {
    type Err = DateBoundError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "CCG" => Ok(Division::Ccg),
            "LSG" => Ok(Division::Lsg),
            _ => Err(DateBoundError::InvalidDivision(s.to_string())),
        }
    }
}

/// How a table stores its date column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DateFormat {
    /// A SQL date or timestamp, cast and rendered as `YYYYMMDD` in the query
    #[default]
    Date,
    /// Already `YYYYMMDD`, compared raw
    Yyyymmdd,
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateFormat::Date => write!(f, "DATE"),
            DateFormat::Yyyymmdd => write!(f, "YYYYMMDD"),
        }
    }
}

impl FromStr for DateFormat {
    type Err = DateBoundError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "DATE" => Ok(DateFormat::Date),
            "YYYYMMDD" => Ok(DateFormat::Yyyymmdd),
            _ => Err(DateBoundError::InvalidDateFormat(s.to_string())),
        }
    }
}

/// # BoundCheckRequest
///
/// Which table and date column to inspect, the requested window and where
/// to run the query. `date_format` defaults to [`DateFormat::Date`] and
/// `division` to [`Division::Ccg`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundCheckRequest {
    pub table: String,
    pub column: String,
    pub start_date: String,
    pub end_date: String,
    pub env: String,
    pub date_format: DateFormat,
    pub division: Division,
}

impl BoundCheckRequest {
    pub fn new(
        table: impl Into<String>,
        column: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        env: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            env: env.into(),
            date_format: DateFormat::default(),
            division: Division::default(),
        }
    }

    pub fn date_format(mut self, date_format: DateFormat) -> Self {
        self.date_format = date_format;
        self
    }

    pub fn division(mut self, division: Division) -> Self {
        self.division = division;
        self
    }
}

/// Outcome of a passing bound check, with the dates observed in the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundCheck {
    pub check_max: bool,
    pub check_min: bool,
    pub max_date: String,
    pub min_date: String,
}

impl From<BoundCheck> for (bool, bool, String, String) {
    fn from(c: BoundCheck) -> Self {
        (c.check_max, c.check_min, c.max_date, c.min_date)
    }
}

/// Query selecting the latest and earliest value of `column` in `table` as
/// `max_date` and `min_date`
pub fn build_query(table: &str, column: &str, date_format: DateFormat) -> String {
    match date_format {
        DateFormat::Date => format!(
            "SELECT TO_CHAR(CAST(MAX({column}) AS DATE),'YYYYMMDD') AS max_date, \
             TO_CHAR(CAST(MIN({column}) AS DATE),'YYYYMMDD') AS min_date \
             FROM {table}"
        ),
        DateFormat::Yyyymmdd => format!(
            "SELECT MAX({column}) AS max_date, MIN({column}) AS min_date FROM {table}"
        ),
    }
}

/// Check that `request.table` holds data covering the whole requested window.
///
/// Fails with [`DateBoundError::EndDateTooLate`] when the latest date in the
/// table is before `end_date`, otherwise with
/// [`DateBoundError::StartDateTooEarly`] when the earliest date is after
/// `start_date`. Only one violation is reported and the end date is checked
/// first. Read failures are returned unchanged as [`DateBoundError::Read`].
pub fn check_bounds(readers: &Readers, request: &BoundCheckRequest) -> Result<BoundCheck> {
    Date::parse_yyyymmdd(&request.start_date)?;
    Date::parse_yyyymmdd(&request.end_date)?;

    let query = build_query(&request.table, &request.column, request.date_format);
    debug!("bound date check on {} via {}: {}", request.table, request.division, query);

    let result = readers
        .for_division(request.division)
        .read(&query, &request.env, None, false)
        .map_err(DateBoundError::Read)?;

    let max_date = result.first_row_value("max_date")?.to_string();
    let min_date = result.first_row_value("min_date")?.to_string();

    // YYYYMMDD strings order the same way as the dates they encode
    let check_max = max_date.as_str() >= request.end_date.as_str();
    let check_min = min_date.as_str() <= request.start_date.as_str();

    if !check_max {
        return Err(DateBoundError::EndDateTooLate {
            max_date,
            end_date: request.end_date.clone(),
            table: request.table.clone(),
        });
    }
    if !check_min {
        return Err(DateBoundError::StartDateTooEarly {
            min_date,
            start_date: request.start_date.clone(),
            table: request.table.clone(),
        });
    }

    info!("Data table is complete within date range.");
    Ok(BoundCheck {
        check_max,
        check_min,
        max_date,
        min_date,
    })
}

/// [`check_bounds`], logging how long it took
pub fn check_bounds_timed(readers: &Readers, request: &BoundCheckRequest) -> Result<BoundCheck> {
    timed("check_bounds", || check_bounds(readers, request))
}
