pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod pricing;
pub mod calibration;

// Convenience re-exports
pub use error::{HestonNnError, Result};
pub use math::matrix::Matrix;
pub use activation::activation::{Activation, ActivationKind};
pub use layers::dense::Layer;
pub use network::{HestonNet, NetworkConfig};
pub use pricing::{heston_price, HestonParams, OptionType, PricingContext};
pub use calibration::{convert_nn_to_pricing_inputs, feller_constraint, PricingInput};
