use time::{macros::format_description, Date, Duration, OffsetDateTime};

use crate::{DateBoundError, Result};

/// Conversions between [`time::Date`] and the 8-digit `YYYYMMDD` strings
/// that warehouse tables and callers exchange.
///
/// Zero-padded `YYYYMMDD` strings sort in the same order as the dates they
/// represent, which is what lets the bound check compare them as plain
/// strings.
pub trait DateExt: Sized {
    /// Parse exactly 8 ASCII digits as a calendar date
    fn parse_yyyymmdd(s: &str) -> Result<Self>;

    fn to_yyyymmdd(&self) -> String;

    /// Add a signed number of days. Results that cannot be written as
    /// 8 digits are out of range
    fn add_days(&self, days: i64) -> Result<Self>;
}

impl DateExt for Date {
    fn parse_yyyymmdd(s: &str) -> Result<Self> {
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DateBoundError::date_parse(s, None));
        }
        Date::parse(s, format_description!("[year][month][day]"))
            .map_err(|e| DateBoundError::date_parse(s, Some(e)))
    }

    fn to_yyyymmdd(&self) -> String {
        format!("{:04}{:02}{:02}", self.year(), self.month() as u8, self.day())
    }

    fn add_days(&self, days: i64) -> Result<Self> {
        let dur = days
            .checked_mul(86_400)
            .map(Duration::seconds)
            .ok_or(DateBoundError::DateOutOfRange)?;
        let date = self
            .checked_add(dur)
            .ok_or(DateBoundError::DateOutOfRange)?;
        if !(0..=9999).contains(&date.year()) {
            return Err(DateBoundError::DateOutOfRange);
        }
        Ok(date)
    }
}

/// Today's date from the system clock, in local time when the offset can be
/// determined and UTC otherwise
pub fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    #[test]
    fn parse_and_format() {
        let d = Date::parse_yyyymmdd("20230601").unwrap();
        assert_eq!(d, Date::from_calendar_date(2023, Month::June, 1).unwrap());
        assert_eq!(d.to_yyyymmdd(), "20230601");

        let early = Date::from_calendar_date(987, Month::March, 4).unwrap();
        assert_eq!(early.to_yyyymmdd(), "09870304");
    }

    #[test]
    fn rejects_malformed_strings() {
        for bad in [
            "2021-01-01",
            "2021011",
            "202101011",
            "",
            "+2021010",
            "2021O101",
            "20230230",
            "20231301",
            "20230100",
        ] {
            let err = Date::parse_yyyymmdd(bad).unwrap_err();
            assert!(
                matches!(err, DateBoundError::DateParse { ref input, .. } if input == bad),
                "{bad} gave {err}"
            );
        }
    }

    #[test]
    fn leap_day_parses() {
        assert!(Date::parse_yyyymmdd("20240229").is_ok());
        assert!(Date::parse_yyyymmdd("20230229").is_err());
    }

    #[test]
    fn add_days_crosses_months_and_years() {
        let d = Date::parse_yyyymmdd("20231230").unwrap();
        assert_eq!(d.add_days(3).unwrap().to_yyyymmdd(), "20240102");
        assert_eq!(d.add_days(-365).unwrap().to_yyyymmdd(), "20221230");
        assert_eq!(d.add_days(0).unwrap(), d);
    }

    #[test]
    fn add_days_out_of_range() {
        let d = Date::parse_yyyymmdd("99991231").unwrap();
        assert!(matches!(d.add_days(1), Err(DateBoundError::DateOutOfRange)));
        assert!(matches!(
            d.add_days(i64::MAX),
            Err(DateBoundError::DateOutOfRange)
        ));
        let d = Date::parse_yyyymmdd("00000101").unwrap();
        assert!(matches!(d.add_days(-1), Err(DateBoundError::DateOutOfRange)));
    }

    #[test]
    fn today_is_eight_digits() {
        let s = today().to_yyyymmdd();
        assert_eq!(s.len(), 8);
        assert!(s.bytes().all(|b| b.is_ascii_digit()));
    }
}
