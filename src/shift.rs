use time::Date;

use crate::date_ext::{today, DateExt};
use crate::Result;

/// Shift `start_date` by `period` days.
///
/// `start_date` must be an 8-digit `YYYYMMDD` string, or empty to start from
/// today. `period` may be negative. Returns the normalised start together with
/// the shifted date, both as `YYYYMMDD`, so the resolved "today" is echoed back
/// when no start was given.
///
/// ```
/// let (start, end) = datebound::shift(-7, "20230301").unwrap();
/// assert_eq!(start, "20230301");
/// assert_eq!(end, "20230222");
/// ```
pub fn shift(period: i64, start_date: &str) -> Result<(String, String)> {
    let start = if start_date.is_empty() {
        today()
    } else {
        Date::parse_yyyymmdd(start_date)?
    };
    let end = shift_date(period, start)?;
    Ok((start.to_yyyymmdd(), end.to_yyyymmdd()))
}

/// `shift` starting from today's date
pub fn shift_from_today(period: i64) -> Result<(String, String)> {
    shift(period, "")
}

pub fn shift_date(period: i64, start: Date) -> Result<Date> {
    start.add_days(period)
}
