use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HestonNnError;
use crate::math::matrix::Matrix;

/// Initial slope of every PReLU channel.
pub const PRELU_INIT: f64 = 0.25;

/// Softplus reverts to the identity above this input to avoid overflow in `exp`.
const SOFTPLUS_THRESHOLD: f64 = 20.0;

/// Which activation follows every linear layer of the network.
///
/// Parsed from `"PReLU"`, `"ELU"`, `"Softplus"` or `"ReLU"`; anything else is
/// an `InvalidConfiguration` error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivationKind {
    PReLU,
    #[serde(rename = "ELU")]
    Elu,
    Softplus,
    #[default]
    ReLU,
}

impl ActivationKind {
    pub const ALL: [ActivationKind; 4] = [
        ActivationKind::PReLU,
        ActivationKind::Elu,
        ActivationKind::Softplus,
        ActivationKind::ReLU,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ActivationKind::PReLU => "PReLU",
            ActivationKind::Elu => "ELU",
            ActivationKind::Softplus => "Softplus",
            ActivationKind::ReLU => "ReLU",
        }
    }

    /// Looks up `name`, falling back to `ReLU` with a warning when it is not one
    /// of the four known names. Use `str::parse` to reject unknown names instead.
    pub fn from_name_or_default(name: &str) -> ActivationKind {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(activation = name, fallback = %ActivationKind::default(), "unknown activation");
            ActivationKind::default()
        })
    }

    /// Creates an activation instance for a layer with `width` output channels.
    pub fn instantiate(&self, width: usize) -> Activation {
        match self {
            ActivationKind::PReLU => Activation::PReLU { slopes: vec![PRELU_INIT; width] },
            ActivationKind::Elu => Activation::Elu,
            ActivationKind::Softplus => Activation::Softplus,
            ActivationKind::ReLU => Activation::ReLU,
        }
    }
}

impl fmt::Display for ActivationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActivationKind {
    type Err = HestonNnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivationKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| HestonNnError::InvalidConfiguration(format!(
                "unknown activation {s:?}; expected one of PReLU, ELU, Softplus, ReLU"
            )))
    }
}

/// A concrete activation attached to one layer.
///
/// Only `PReLU` carries state: one learned slope per output channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Activation {
    PReLU { slopes: Vec<f64> },
    Elu,
    Softplus,
    ReLU,
}

impl Activation {
    /// Element-wise activation for column (channel) `channel`.
    pub fn function(&self, channel: usize, x: f64) -> f64 {
        match self {
            Activation::PReLU { slopes } => if x >= 0.0 { x } else { slopes[channel] * x },
            Activation::Elu => if x > 0.0 { x } else { x.exp_m1() },
            Activation::Softplus => {
                if x > SOFTPLUS_THRESHOLD { x } else { x.exp().ln_1p() }
            }
            Activation::ReLU => if x > 0.0 { x } else { 0.0 },
        }
    }

    /// Applies the activation to a `(batch, width)` pre-activation matrix.
    pub fn apply(&self, z: &Matrix) -> Matrix {
        z.map_columns(|channel, x| self.function(channel, x))
    }

    pub fn kind(&self) -> ActivationKind {
        match self {
            Activation::PReLU { .. } => ActivationKind::PReLU,
            Activation::Elu => ActivationKind::Elu,
            Activation::Softplus => ActivationKind::Softplus,
            Activation::ReLU => ActivationKind::ReLU,
        }
    }

    /// Number of learnable scalars.
    pub fn num_parameters(&self) -> usize {
        match self {
            Activation::PReLU { slopes } => slopes.len(),
            _ => 0,
        }
    }
}
