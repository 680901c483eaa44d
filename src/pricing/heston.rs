//! Heston model parameters.
//!
//! ```text
//! dS = (r - q) S dt + sqrt(v) S dW1
//! dv = kappa (v_bar - v) dt + sigma sqrt(v) dW2,   dW1 dW2 = rho dt
//! ```

use serde::{Serialize, Deserialize};

use crate::error::{HestonNnError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HestonParams {
    /// Initial variance.
    pub v0: f64,
    /// Mean-reversion speed.
    pub kappa: f64,
    /// Long-run variance.
    pub v_bar: f64,
    /// Volatility of variance.
    pub sigma: f64,
    /// Spot/variance correlation.
    pub rho: f64,
}

impl HestonParams {
    /// Number of entries in a calibration vector.
    pub const LEN: usize = 5;

    pub fn new(v0: f64, kappa: f64, v_bar: f64, sigma: f64, rho: f64) -> Self {
        HestonParams { v0, kappa, v_bar, sigma, rho }
    }

    /// Reads a calibration vector ordered `[v0, kappa, v_bar, sigma, rho]`.
    pub fn from_slice(x: &[f64]) -> Result<Self> {
        match x {
            [v0, kappa, v_bar, sigma, rho] => Ok(HestonParams::new(*v0, *kappa, *v_bar, *sigma, *rho)),
            _ => Err(HestonNnError::shape(
                format!("{} values", Self::LEN),
                format!("{} values", x.len()),
            )),
        }
    }

    pub fn to_vec(&self) -> Vec<f64> {
        vec![self.v0, self.kappa, self.v_bar, self.sigma, self.rho]
    }

    /// `2 kappa v_bar - sigma^2`; non-negative when the variance process stays
    /// strictly positive.
    pub fn feller(&self) -> f64 {
        2.0 * self.kappa * self.v_bar - self.sigma * self.sigma
    }

    pub fn satisfies_feller(&self) -> bool {
        self.feller() >= 0.0
    }

    /// Rejects values the analytic engine cannot work with. Feller is not checked.
    pub fn validate(&self) -> Result<()> {
        let values = [self.v0, self.kappa, self.v_bar, self.sigma, self.rho];
        if values.iter().any(|x| !x.is_finite()) {
            return Err(HestonNnError::InvalidParameter(format!("non-finite Heston parameter in {self:?}")));
        }
        if self.v0 < 0.0 {
            return Err(HestonNnError::InvalidParameter(format!("v0 must be non-negative, got {}", self.v0)));
        }
        if self.sigma <= 0.0 {
            return Err(HestonNnError::InvalidParameter(format!("sigma must be positive, got {}", self.sigma)));
        }
        if !(-1.0..=1.0).contains(&self.rho) {
            return Err(HestonNnError::InvalidParameter(format!("rho must be in [-1, 1], got {}", self.rho)));
        }
        Ok(())
    }
}
