use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::error::{HestonNnError, Result};

/// Builds a date, reporting impossible day/month/year combinations as errors.
pub fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| HestonNnError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
}

/// `date + days`, failing only when the result leaves chrono's range.
pub fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate> {
    Duration::try_days(days)
        .and_then(|d| date.checked_add_signed(d))
        .ok_or_else(|| HestonNnError::InvalidDate(format!("{date} + {days} days")))
}

fn serial_epoch() -> NaiveDate {
    // 1899-12-30 is always representable.
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or(NaiveDate::MIN)
}

/// Spreadsheet-style serial day number (1900-01-01 is 2, 2019-01-01 is 43466).
pub fn serial_number(date: NaiveDate) -> i64 {
    (date - serial_epoch()).num_days()
}

pub fn from_serial_number(serial: i64) -> Result<NaiveDate> {
    add_days(serial_epoch(), serial)
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_numbers_match_the_spreadsheet_convention() {
        let d = ymd(2019, 1, 1).unwrap();
        assert_eq!(serial_number(d), 43466);
        assert_eq!(from_serial_number(43466).unwrap(), d);
    }

    #[test]
    fn add_days_crosses_leap_years() {
        let d = ymd(2019, 1, 1).unwrap();
        assert_eq!(add_days(d, 365).unwrap(), ymd(2020, 1, 1).unwrap());
        assert_eq!(add_days(ymd(2020, 1, 1).unwrap(), 365).unwrap(), ymd(2020, 12, 31).unwrap());
        assert_eq!(add_days(d, -1).unwrap(), ymd(2018, 12, 31).unwrap());
    }

    #[test]
    fn out_of_range_is_an_error() {
        assert!(ymd(2019, 2, 30).is_err());
        assert!(add_days(ymd(2019, 1, 1).unwrap(), i64::MAX / 2).is_err());
    }
}
