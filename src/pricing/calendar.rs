use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::pricing::dates::{add_days, is_weekend};

/// Business-day calendar.
///
/// The analytic price does not depend on the calendar; it is used to adjust
/// dates and to flag maturities that fall on a holiday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Calendar {
    /// US settlement calendar: weekends and federal holidays.
    #[default]
    UnitedStates,
    /// Every day is a business day.
    NullCalendar,
}

impl Calendar {
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        match self {
            Calendar::NullCalendar => true,
            Calendar::UnitedStates => !is_weekend(date) && !is_us_settlement_holiday(date),
        }
    }

    /// Moves `date` forward to the first business day on or after it.
    pub fn adjust(&self, date: NaiveDate) -> Result<NaiveDate> {
        let mut d = date;
        while !self.is_business_day(d) {
            d = add_days(d, 1)?;
        }
        Ok(d)
    }
}

/// Holiday observed on `day`/`month`, shifted to Monday when it falls on a
/// Sunday and to Friday when it falls on a Saturday.
fn observed(d: u32, m: u32, w: Weekday, day: u32, month: u32) -> bool {
    m == month
        && (d == day
            || (d == day + 1 && w == Weekday::Mon)
            || (d + 1 == day && w == Weekday::Fri))
}

fn is_us_settlement_holiday(date: NaiveDate) -> bool {
    let (y, m, d, w) = (date.year(), date.month(), date.day(), date.weekday());

    let new_year = (m == 1 && (d == 1 || (d == 2 && w == Weekday::Mon)))
        || (m == 12 && d == 31 && w == Weekday::Fri);
    let mlk = y >= 1983 && m == 1 && (15..=21).contains(&d) && w == Weekday::Mon;
    let washington = m == 2 && (15..=21).contains(&d) && w == Weekday::Mon;
    let memorial = m == 5 && d >= 25 && w == Weekday::Mon;
    let juneteenth = y >= 2022 && observed(d, m, w, 19, 6);
    let independence = observed(d, m, w, 4, 7);
    let labor = m == 9 && d <= 7 && w == Weekday::Mon;
    let columbus = m == 10 && (8..=14).contains(&d) && w == Weekday::Mon;
    let veterans = observed(d, m, w, 11, 11);
    let thanksgiving = m == 11 && (22..=28).contains(&d) && w == Weekday::Thu;
    let christmas = observed(d, m, w, 25, 12);

    new_year || mlk || washington || memorial || juneteenth || independence
        || labor || columbus || veterans || thanksgiving || christmas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::dates::ymd;

    #[test]
    fn us_holidays_2019() {
        let cal = Calendar::UnitedStates;
        for (m, d) in [(1, 1), (1, 21), (2, 18), (5, 27), (7, 4), (9, 2), (10, 14), (11, 11), (11, 28), (12, 25)] {
            assert!(!cal.is_business_day(ymd(2019, m, d).unwrap()), "2019-{m}-{d}");
        }
        assert!(cal.is_business_day(ymd(2019, 1, 2).unwrap()));
        assert!(cal.is_business_day(ymd(2019, 6, 19).unwrap()));
    }

    #[test]
    fn weekend_holidays_move() {
        let cal = Calendar::UnitedStates;
        // 2021-07-04 was a Sunday; observed Monday the 5th.
        assert!(!cal.is_business_day(ymd(2021, 7, 5).unwrap()));
        // 2022-01-01 was a Saturday; observed Friday 2021-12-31.
        assert!(!cal.is_business_day(ymd(2021, 12, 31).unwrap()));
        // Juneteenth 2022 was a Sunday.
        assert!(!cal.is_business_day(ymd(2022, 6, 20).unwrap()));
    }

    #[test]
    fn adjust_rolls_forward() {
        let cal = Calendar::UnitedStates;
        // Saturday 2019-12-28 rolls to Monday the 30th.
        assert_eq!(cal.adjust(ymd(2019, 12, 28).unwrap()).unwrap(), ymd(2019, 12, 30).unwrap());
        // New Year's Day rolls to the 2nd.
        assert_eq!(cal.adjust(ymd(2020, 1, 1).unwrap()).unwrap(), ymd(2020, 1, 2).unwrap());
        let sat = ymd(2019, 12, 28).unwrap();
        assert_eq!(Calendar::NullCalendar.adjust(sat).unwrap(), sat);
    }
}
