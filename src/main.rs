// Demo binary: builds a network and prices a small batch of converted rows.
// All logic lives in the library (src/lib.rs and its modules).
use heston_nn::calibration::{convert_nn_to_pricing_inputs, feller_constraint, price_batch};
use heston_nn::pricing::{dates::ymd, Calendar, OptionType, PricingContext};
use heston_nn::{ActivationKind, HestonNet, Matrix, NetworkConfig};

fn main() -> heston_nn::Result<()> {
    tracing_subscriber::fmt().compact().init();

    let config = NetworkConfig::new(9, 32, 1, ActivationKind::Softplus);
    let net = HestonNet::new(config)?;
    tracing::info!(parameters = net.num_parameters(), activation = %config.activation, "network ready");

    // spot, maturity (years), v0, kappa, v_bar, sigma, rho, rf_rate, dv_rate
    let rows = [
        0.90, 0.25, 0.04, 1.5, 0.04, 0.3, -0.7, 0.01, 0.0,
        1.00, 0.50, 0.04, 1.5, 0.04, 0.3, -0.7, 0.01, 0.0,
        1.10, 1.00, 0.09, 0.8, 0.05, 0.5, -0.5, 0.02, 0.01,
    ];
    let batch = Matrix::from_flat(&rows, 9)?;
    let outputs = net.forward(&batch)?;

    let inputs = convert_nn_to_pricing_inputs(&rows)?;
    let template = PricingContext::new(ymd(2019, 1, 1)?).with_calendar(Calendar::UnitedStates);
    let prices = price_batch(&inputs, &template, OptionType::Call)?;
    let feller = feller_constraint();

    for ((input, price), out) in inputs.iter().zip(&prices).zip(&outputs.data) {
        println!(
            "S={:.2} T={} settles={} price={:.6} net={:.6} feller_ok={}",
            input.spot,
            input.maturity_date,
            template.calendar.adjust(input.maturity_date)?,
            price,
            out[0],
            feller.is_satisfied(&input.heston.to_vec())?,
        );
    }
    Ok(())
}
