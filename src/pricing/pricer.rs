use chrono::NaiveDate;

use crate::error::Result;
use crate::pricing::context::PricingContext;
use crate::pricing::engine::{AnalyticHestonEngine, HestonProcess};
use crate::pricing::heston::HestonParams;
use crate::pricing::option::{EuropeanExercise, OptionType, PlainVanillaPayoff, VanillaOption};

/// Prices a European option under Heston with the analytic engine.
///
/// The valuation date, rates, day counter and calendar all come from `ctx`;
/// nothing global is read or written, so identical calls return identical
/// bits and calls with different valuation dates may run concurrently.
///
/// Parameters are not checked against the Feller condition.
pub fn heston_price(
    ctx: &PricingContext,
    spot: f64,
    strike: f64,
    maturity_date: NaiveDate,
    heston: &HestonParams,
    option_type: OptionType,
) -> Result<f64> {
    let payoff = PlainVanillaPayoff::new(option_type, strike);
    let exercise = EuropeanExercise { date: maturity_date };
    let option = VanillaOption::new(payoff, exercise);

    if !ctx.calendar.is_business_day(maturity_date) {
        tracing::warn!(%maturity_date, calendar = ?ctx.calendar, "maturity is not a business day");
    }

    let process = HestonProcess::new(spot, ctx.risk_free_curve(), ctx.dividend_curve(), *heston)?;
    let engine = AnalyticHestonEngine::new(process);
    let npv = engine.npv(&option)?;

    tracing::debug!(
        valuation_date = %ctx.valuation_date,
        %maturity_date,
        spot,
        strike,
        ?option_type,
        npv,
        "priced Heston option"
    );
    Ok(npv)
}
