use chrono::NaiveDate;
use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionType {
    #[default]
    Call,
    Put,
}

/// Pays `max(S - K, 0)` for calls and `max(K - S, 0)` for puts at exercise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlainVanillaPayoff {
    pub option_type: OptionType,
    pub strike: f64,
}

impl PlainVanillaPayoff {
    pub fn new(option_type: OptionType, strike: f64) -> Self {
        PlainVanillaPayoff { option_type, strike }
    }
}

/// Exercise allowed on the maturity date only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EuropeanExercise {
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VanillaOption {
    pub payoff: PlainVanillaPayoff,
    pub exercise: EuropeanExercise,
}

impl VanillaOption {
    pub fn new(payoff: PlainVanillaPayoff, exercise: EuropeanExercise) -> Self {
        VanillaOption { payoff, exercise }
    }

    /// An option whose exercise date is on or before `evaluation_date` has no value left.
    pub fn is_expired(&self, evaluation_date: NaiveDate) -> bool {
        self.exercise.date <= evaluation_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::dates::ymd;

    #[test]
    fn expiry_includes_the_evaluation_date() {
        let d = ymd(2019, 1, 1).unwrap();
        let option = VanillaOption::new(
            PlainVanillaPayoff::new(OptionType::Call, 1.0),
            EuropeanExercise { date: d },
        );
        assert!(option.is_expired(d));
        assert!(!option.is_expired(ymd(2018, 12, 31).unwrap()));
    }
}
