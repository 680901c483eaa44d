use chrono::NaiveDate;
use serde::{Serialize, Deserialize};

use crate::pricing::calendar::Calendar;
use crate::pricing::day_count::DayCounter;

/// Everything a pricing call needs besides the contract and model parameters.
///
/// The valuation date travels with each call instead of living in shared
/// state, so calls with different dates can run side by side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingContext {
    pub valuation_date: NaiveDate,
    pub day_counter: DayCounter,
    pub calendar: Calendar,
    /// Continuously-compounded risk-free rate.
    pub rf_rate: f64,
    /// Continuously-compounded dividend yield.
    pub dv_rate: f64,
}

impl PricingContext {
    /// Zero rates, Actual/365 Fixed, US calendar.
    pub fn new(valuation_date: NaiveDate) -> Self {
        PricingContext {
            valuation_date,
            day_counter: DayCounter::default(),
            calendar: Calendar::default(),
            rf_rate: 0.0,
            dv_rate: 0.0,
        }
    }

    pub fn with_rates(mut self, rf_rate: f64, dv_rate: f64) -> Self {
        self.rf_rate = rf_rate;
        self.dv_rate = dv_rate;
        self
    }

    pub fn with_day_counter(mut self, day_counter: DayCounter) -> Self {
        self.day_counter = day_counter;
        self
    }

    pub fn with_calendar(mut self, calendar: Calendar) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn with_valuation_date(mut self, valuation_date: NaiveDate) -> Self {
        self.valuation_date = valuation_date;
        self
    }

    /// Flat risk-free curve anchored at the valuation date.
    pub fn risk_free_curve(&self) -> FlatForward {
        FlatForward::new(self.valuation_date, self.rf_rate, self.day_counter)
    }

    /// Flat dividend curve anchored at the valuation date.
    pub fn dividend_curve(&self) -> FlatForward {
        FlatForward::new(self.valuation_date, self.dv_rate, self.day_counter)
    }
}

/// Constant continuously-compounded rate curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatForward {
    pub reference_date: NaiveDate,
    pub rate: f64,
    pub day_counter: DayCounter,
}

impl FlatForward {
    pub fn new(reference_date: NaiveDate, rate: f64, day_counter: DayCounter) -> Self {
        FlatForward { reference_date, rate, day_counter }
    }

    pub fn time_from_reference(&self, date: NaiveDate) -> f64 {
        self.day_counter.year_fraction(self.reference_date, date)
    }

    pub fn discount(&self, date: NaiveDate) -> f64 {
        self.discount_at(self.time_from_reference(date))
    }

    pub fn discount_at(&self, t: f64) -> f64 {
        (-self.rate * t).exp()
    }
}
