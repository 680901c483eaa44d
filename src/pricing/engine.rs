//! Analytic (characteristic-function) pricing of European options under Heston.
//!
//! The call price uses Lewis' single-integral representation
//!
//! ```text
//! C = DF * ( F - sqrt(F K) / pi * Int_0^inf Re[ e^{i u k} phi(u - i/2) ] / (u^2 + 1/4) du )
//! ```
//!
//! with `k = ln(F / K)` and `phi` the characteristic function of `ln(S_T / F)`.
//! Puts follow from put-call parity.

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::error::{HestonNnError, Result};
use crate::pricing::context::FlatForward;
use crate::pricing::heston::HestonParams;
use crate::pricing::option::{OptionType, VanillaOption};

/// Spot, curves and model parameters of the Heston dynamics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HestonProcess {
    pub spot: f64,
    pub risk_free: FlatForward,
    pub dividend: FlatForward,
    pub params: HestonParams,
}

impl HestonProcess {
    pub fn new(spot: f64, risk_free: FlatForward, dividend: FlatForward, params: HestonParams) -> Result<Self> {
        if !(spot.is_finite() && spot > 0.0) {
            return Err(HestonNnError::InvalidParameter(format!("spot must be positive, got {spot}")));
        }
        if !(risk_free.rate.is_finite() && dividend.rate.is_finite()) {
            return Err(HestonNnError::InvalidParameter(format!(
                "rates must be finite, got rf={} dv={}",
                risk_free.rate, dividend.rate
            )));
        }
        params.validate()?;
        Ok(HestonProcess { spot, risk_free, dividend, params })
    }

    /// Characteristic function of `ln(S_t / F_t)` at a complex argument.
    ///
    /// Uses the rotation-count-free ("little trap") form, where `g` is built
    /// from `xi - d` so the complex logarithm stays on its principal branch.
    pub fn characteristic_function(&self, z: Complex64, t: f64) -> Complex64 {
        let HestonParams { v0, kappa, v_bar, sigma, rho } = self.params;
        let i = Complex64::i();
        let sigma2 = sigma * sigma;

        let xi = kappa - sigma * rho * i * z;
        let d = (xi * xi + sigma2 * (z * z + i * z)).sqrt();
        let g = (xi - d) / (xi + d);
        let e = (-d * t).exp();

        let c = kappa * v_bar / sigma2 * ((xi - d) * t - 2.0 * ((1.0 - g * e) / (1.0 - g)).ln());
        let dv = (xi - d) / sigma2 * (1.0 - e) / (1.0 - g * e);

        (c + dv * v0).exp()
    }
}

/// Closed-form Heston engine bound to one process.
///
/// The Lewis integral is evaluated panel by panel with composite Simpson's
/// rule until the remaining tail is bounded by `tolerance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticHestonEngine {
    process: HestonProcess,
    /// Width of each integration panel in frequency space.
    pub panel_width: f64,
    /// Largest Simpson step; shrinks further for far-from-the-money strikes.
    pub max_step: f64,
    /// Upper limit of the frequency domain.
    pub max_frequency: f64,
    /// Bound on the neglected tail of the integral.
    pub tolerance: f64,
}

impl AnalyticHestonEngine {
    pub fn new(process: HestonProcess) -> Self {
        AnalyticHestonEngine {
            process,
            panel_width: 10.0,
            max_step: 0.01,
            max_frequency: 1.0e4,
            tolerance: 1.0e-12,
        }
    }

    pub fn process(&self) -> &HestonProcess {
        &self.process
    }

    /// Net present value at the curves' reference date. Expired options are worth 0.
    pub fn npv(&self, option: &VanillaOption) -> Result<f64> {
        let process = &self.process;
        let valuation_date = process.risk_free.reference_date;
        if option.is_expired(valuation_date) {
            tracing::debug!(%valuation_date, maturity = %option.exercise.date, "option expired");
            return Ok(0.0);
        }

        let strike = option.payoff.strike;
        if !(strike.is_finite() && strike > 0.0) {
            return Err(HestonNnError::InvalidParameter(format!("strike must be positive, got {strike}")));
        }

        let t = process.risk_free.time_from_reference(option.exercise.date);
        let df = process.risk_free.discount_at(t);
        let forward = process.spot * process.dividend.discount_at(t) / df;
        if !(df.is_finite() && df > 0.0 && forward.is_finite() && forward > 0.0) {
            return Err(HestonNnError::InvalidParameter(format!(
                "rates give no usable forward at t={t}: df={df}, forward={forward}"
            )));
        }
        let k = (forward / strike).ln();
        if !k.is_finite() {
            return Err(HestonNnError::InvalidParameter(format!(
                "log-moneyness ln({forward}/{strike}) is not finite"
            )));
        }

        let integral = self.lewis_integral(t, k)?;
        if !integral.is_finite() {
            return Err(HestonNnError::Numerical(format!(
                "Heston integral diverged for t={t}, k={k}, params={:?}",
                process.params
            )));
        }

        // Quadrature error can leave a deep out-of-the-money price just below zero.
        let call = df * (forward - (forward * strike).sqrt() / PI * integral);
        let price = match option.payoff.option_type {
            OptionType::Call => call,
            OptionType::Put => call - df * (forward - strike),
        };
        Ok(price.max(0.0))
    }

    fn integrand(&self, u: f64, t: f64, k: f64) -> f64 {
        let phi = self.process.characteristic_function(Complex64::new(u, -0.5), t);
        (Complex64::new(0.0, u * k).exp() * phi).re / (u * u + 0.25)
    }

    fn lewis_integral(&self, t: f64, k: f64) -> Result<f64> {
        let step = self.max_step.min(0.25 / k.abs());
        if !(step.is_finite() && step > 0.0) {
            return Err(HestonNnError::Numerical(format!("no usable Simpson step for k={k}")));
        }
        let mut n = (self.panel_width / step).ceil() as usize;
        n += n % 2;
        let n = n.max(2);
        let h = self.panel_width / n as f64;

        let mut total = 0.0;
        let mut a = 0.0;
        let mut converged = false;
        while a < self.max_frequency {
            let b = a + self.panel_width;
            let mut sum = self.integrand(a, t, k) + self.integrand(b, t, k);
            for j in 1..n {
                let w = if j % 2 == 1 { 4.0 } else { 2.0 };
                sum += w * self.integrand(a + j as f64 * h, t, k);
            }
            total += sum * h / 3.0;
            a = b;

            let envelope = self.process.characteristic_function(Complex64::new(a, -0.5), t).norm();
            if !envelope.is_finite() {
                return Ok(f64::NAN);
            }
            if envelope / a < self.tolerance {
                converged = true;
                break;
            }
        }

        if !converged {
            tracing::warn!(t, k, max_frequency = self.max_frequency, "Heston integral tail not bounded");
            return Err(HestonNnError::Numerical(format!(
                "Heston integral did not converge below frequency {} for t={t}, params={:?}",
                self.max_frequency, self.process.params
            )));
        }
        Ok(total)
    }
}
