pub mod constraint;
pub mod conversion;

pub use constraint::{feller, feller_constraint, NonlinearConstraint};
pub use conversion::{
    convert_matrix, convert_nn_to_pricing_inputs, price_batch, NnParameterRow, PricingInput,
};
