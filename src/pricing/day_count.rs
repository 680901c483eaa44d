use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Deserialize};

/// Converts a pair of dates into a year fraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayCounter {
    #[default]
    Actual365Fixed,
    Actual360,
    /// 30/360 US bond basis.
    Thirty360,
}

impl DayCounter {
    pub fn day_count(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        match self {
            DayCounter::Actual365Fixed | DayCounter::Actual360 => (end - start).num_days(),
            DayCounter::Thirty360 => {
                let d1 = start.day().min(30) as i64;
                let d2 = if end.day() == 31 && d1 == 30 { 30 } else { end.day() as i64 };
                360 * (end.year() - start.year()) as i64
                    + 30 * (end.month() as i64 - start.month() as i64)
                    + (d2 - d1)
            }
        }
    }

    pub fn year_fraction(&self, start: NaiveDate, end: NaiveDate) -> f64 {
        let days = self.day_count(start, end) as f64;
        match self {
            DayCounter::Actual365Fixed => days / 365.0,
            DayCounter::Actual360 | DayCounter::Thirty360 => days / 360.0,
        }
    }
}
