use thiserror::Error;

use crate::reader::ReadError;

pub type Result<T> = std::result::Result<T, DateBoundError>;

#[derive(Debug, Error)]
pub enum DateBoundError {
    #[error("`{input}` is not a date in YYYYMMDD format")]
    DateParse {
        input: String,
        #[source]
        source: Option<time::error::Parse>,
    },
    #[error("Operation creates a date out of range")]
    DateOutOfRange,
    #[error(
        "max_date = {max_date} while end_date = {end_date}. Max date < end_date. \
         Check the validity of {table}."
    )]
    EndDateTooLate {
        max_date: String,
        end_date: String,
        table: String,
    },
    #[error(
        "min_date = {min_date} while start_date = {start_date}. min date > Start date. \
         Check the validity of {table}."
    )]
    StartDateTooEarly {
        min_date: String,
        start_date: String,
        table: String,
    },
    #[error("Unknown division `{0}`, expected CCG or LSG")]
    InvalidDivision(String),
    #[error("Unknown date format `{0}`, expected DATE or YYYYMMDD")]
    InvalidDateFormat(String),
    #[error("Warehouse read failed: {0}")]
    Read(#[source] ReadError),
    #[error("Query returned no rows")]
    EmptyResult,
    #[error("Query result has no column `{0}`")]
    MissingColumn(String),
    #[error("Column `{0}` is NULL, the table may be empty")]
    NullValue(String),
}

impl DateBoundError {
    pub(crate) fn date_parse(input: &str, source: Option<time::error::Parse>) -> Self {
        DateBoundError::DateParse {
            input: input.to_string(),
            source,
        }
    }
}
