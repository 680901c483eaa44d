use chrono::NaiveDate;
use serde::{Serialize, Deserialize};

use crate::error::{HestonNnError, Result};
use crate::math::matrix::Matrix;
use crate::pricing::context::PricingContext;
use crate::pricing::dates::{add_days, serial_number, ymd};
use crate::pricing::heston::HestonParams;
use crate::pricing::option::OptionType;
use crate::pricing::pricer::heston_price;

/// Columns in one network parameter row.
pub const NN_COLUMNS: usize = 9;

/// Strike shared by every converted row; spots are quoted relative to it.
pub const NORMALIZED_STRIKE: f64 = 1.0;

/// Valuation date shared by every converted row.
pub fn reference_valuation_date() -> Result<NaiveDate> {
    ymd(2019, 1, 1)
}

/// Named view of one network output row.
///
/// Column order: `[spot, maturity_years, v0, kappa, v_bar, sigma, rho, rf_rate, dv_rate]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NnParameterRow {
    pub spot: f64,
    pub maturity_years: f64,
    pub v0: f64,
    pub kappa: f64,
    pub v_bar: f64,
    pub sigma: f64,
    pub rho: f64,
    pub rf_rate: f64,
    pub dv_rate: f64,
}

impl NnParameterRow {
    pub fn from_slice(row: &[f64]) -> Result<Self> {
        match *row {
            [spot, maturity_years, v0, kappa, v_bar, sigma, rho, rf_rate, dv_rate] => Ok(NnParameterRow {
                spot, maturity_years, v0, kappa, v_bar, sigma, rho, rf_rate, dv_rate,
            }),
            _ => Err(HestonNnError::shape(
                format!("{NN_COLUMNS} columns"),
                format!("{} columns", row.len()),
            )),
        }
    }

    pub fn heston(&self) -> HestonParams {
        HestonParams::new(self.v0, self.kappa, self.v_bar, self.sigma, self.rho)
    }

    /// Whole days to maturity, `round(maturity_years * 365)` with ties to even.
    pub fn maturity_days(&self) -> i64 {
        (self.maturity_years * 365.0).round_ties_even() as i64
    }

    /// Converts to pricing inputs with strike 1 and the shared valuation date.
    pub fn to_pricing_input(&self, valuation_date: NaiveDate) -> Result<PricingInput> {
        if !self.maturity_years.is_finite() {
            return Err(HestonNnError::InvalidDate(format!(
                "maturity of {} years", self.maturity_years
            )));
        }
        Ok(PricingInput {
            spot: self.spot,
            strike: NORMALIZED_STRIKE,
            valuation_date,
            maturity_date: add_days(valuation_date, self.maturity_days())?,
            heston: self.heston(),
            rf_rate: self.rf_rate,
            dv_rate: self.dv_rate,
        })
    }
}

/// Everything `heston_price` needs for one contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingInput {
    pub spot: f64,
    pub strike: f64,
    pub valuation_date: NaiveDate,
    pub maturity_date: NaiveDate,
    pub heston: HestonParams,
    pub rf_rate: f64,
    pub dv_rate: f64,
}

impl PricingInput {
    /// Number of values in `to_flat_row`.
    pub const FLAT_LEN: usize = 11;

    /// `[spot, strike, valuation_date, maturity_date, v0, kappa, v_bar, sigma, rho, rf_rate, dv_rate]`
    /// with both dates as serial day numbers.
    pub fn to_flat_row(&self) -> Vec<f64> {
        let mut row = vec![
            self.spot,
            self.strike,
            serial_number(self.valuation_date) as f64,
            serial_number(self.maturity_date) as f64,
        ];
        row.extend(self.heston.to_vec());
        row.push(self.rf_rate);
        row.push(self.dv_rate);
        row
    }

    /// Context for this row: its own valuation date and rates, with the day
    /// counter and calendar taken from `template`.
    pub fn context(&self, template: &PricingContext) -> PricingContext {
        template
            .with_valuation_date(self.valuation_date)
            .with_rates(self.rf_rate, self.dv_rate)
    }

    pub fn price(&self, template: &PricingContext, option_type: OptionType) -> Result<f64> {
        heston_price(
            &self.context(template),
            self.spot,
            self.strike,
            self.maturity_date,
            &self.heston,
            option_type,
        )
    }
}

/// Reshapes a flat buffer to `(-1, 9)` and converts every row.
pub fn convert_nn_to_pricing_inputs(values: &[f64]) -> Result<Vec<PricingInput>> {
    convert_matrix(&Matrix::from_flat(values, NN_COLUMNS)?)
}

/// Converts an `(N, 9)` matrix of network outputs.
pub fn convert_matrix(batch: &Matrix) -> Result<Vec<PricingInput>> {
    if batch.rows > 0 && batch.cols != NN_COLUMNS {
        return Err(HestonNnError::shape(
            format!("(*, {NN_COLUMNS})"),
            format!("({}, {})", batch.rows, batch.cols),
        ));
    }
    let valuation_date = reference_valuation_date()?;
    batch.data.iter()
        .map(|row| NnParameterRow::from_slice(row)?.to_pricing_input(valuation_date))
        .collect()
}

/// Prices every converted row, stopping at the first failure.
pub fn price_batch(
    inputs: &[PricingInput],
    template: &PricingContext,
    option_type: OptionType,
) -> Result<Vec<f64>> {
    inputs.iter().map(|input| input.price(template, option_type)).collect()
}
