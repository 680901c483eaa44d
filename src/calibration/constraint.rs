use std::fmt;

use crate::error::{HestonNnError, Result};

/// A scalar inequality `lower <= fun(x) <= upper` for a constrained optimizer.
#[derive(Clone, Copy)]
pub struct NonlinearConstraint {
    pub lower: f64,
    pub upper: f64,
    pub fun: fn(&[f64]) -> Result<f64>,
}

impl NonlinearConstraint {
    pub fn new(fun: fn(&[f64]) -> Result<f64>, lower: f64, upper: f64) -> Self {
        NonlinearConstraint { lower, upper, fun }
    }

    pub fn evaluate(&self, x: &[f64]) -> Result<f64> {
        (self.fun)(x)
    }

    pub fn is_satisfied(&self, x: &[f64]) -> Result<bool> {
        let value = self.evaluate(x)?;
        Ok(value >= self.lower && value <= self.upper)
    }
}

impl fmt::Debug for NonlinearConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NonlinearConstraint")
            .field("lower", &self.lower)
            .field("upper", &self.upper)
            .finish_non_exhaustive()
    }
}

/// Feller value `2 * kappa * v_bar - sigma^2` of a calibration vector
/// `[v0, kappa, v_bar, sigma, ..]`; only positions 1 to 3 are read.
pub fn feller(x: &[f64]) -> Result<f64> {
    match x {
        [_, kappa, v_bar, sigma, ..] => Ok(2.0 * kappa * v_bar - sigma * sigma),
        _ => Err(HestonNnError::shape("at least 4 values", format!("{} values", x.len()))),
    }
}

/// `feller(x) >= 0`, unbounded above.
pub fn feller_constraint() -> NonlinearConstraint {
    NonlinearConstraint::new(feller, 0.0, f64::INFINITY)
}
