use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activation::activation::Activation;
use crate::error::{HestonNnError, Result};
use crate::math::matrix::Matrix;

/// A fully-connected layer followed by its own activation instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer{
    pub size: usize,
    pub input_size: usize,
    pub weights: Matrix,  // (input_size, size)
    pub biases: Matrix,   // (1, size)
    pub activator: Activation
}

impl Layer {
    /// Weights and biases are drawn from U(-1/sqrt(input_size), 1/sqrt(input_size)).
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        input_size: usize,
        activation: Activation,
        rng: &mut R,
    ) -> Layer {
        let bound = 1.0 / (input_size as f64).sqrt();
        let weights = Matrix::uniform(input_size, size, bound, &mut *rng);
        let biases = Matrix::uniform(1, size, bound, rng);

        Layer {
            size,
            input_size,
            weights,
            biases,
            activator: activation
        }
    }

    /// Checks that weights, biases and PReLU slopes agree with `input_size` and `size`.
    ///
    /// Layers built by `new` always pass; deserialized or hand-assembled ones may not.
    pub fn validate(&self) -> Result<()> {
        let check = |what: &str, m: &Matrix, rows: usize, cols: usize| {
            if m.is_consistent() && m.shape() == (rows, cols) {
                Ok(())
            } else {
                Err(HestonNnError::shape(
                    format!("{what} of shape ({rows}, {cols})"),
                    format!("({}, {}) holding {} rows", m.rows, m.cols, m.data.len()),
                ))
            }
        };
        check("weights", &self.weights, self.input_size, self.size)?;
        check("biases", &self.biases, 1, self.size)?;
        if let Activation::PReLU { slopes } = &self.activator {
            if slopes.len() != self.size {
                return Err(HestonNnError::shape(
                    format!("{} PReLU slopes", self.size),
                    format!("{} slopes", slopes.len()),
                ));
            }
        }
        Ok(())
    }

    /// Computes `activation(x W + b)` for a `(batch, input_size)` input.
    pub fn feed_from(&self, input: &Matrix) -> Result<Matrix> {
        self.validate()?;
        if !input.is_consistent() || input.cols != self.input_size {
            return Err(HestonNnError::shape(
                format!("(*, {})", self.input_size),
                format!("({}, {})", input.rows, input.cols),
            ));
        }
        let z = input * &self.weights + self.biases.clone();
        Ok(self.activator.apply(&z))
    }

    pub fn num_parameters(&self) -> usize {
        self.input_size * self.size + self.size + self.activator.num_parameters()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::ActivationKind;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn identity_weights_pass_input_through_relu() {
        let layer = Layer {
            size: 2,
            input_size: 2,
            weights: Matrix::from_data(vec![vec![1.0, 0.0], vec![0.0, 1.0]]),
            biases: Matrix::from_data(vec![vec![0.5, -0.5]]),
            activator: Activation::ReLU,
        };
        let out = layer.feed_from(&Matrix::from_data(vec![vec![1.0, 0.25]])).unwrap();
        assert_eq!(out.data, vec![vec![1.5, 0.0]]);
    }

    #[test]
    fn wrong_input_width_is_a_shape_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let layer = Layer::new(4, 3, ActivationKind::ReLU.instantiate(4), &mut rng);
        let err = layer.feed_from(&Matrix::zeros(2, 5)).unwrap_err();
        assert!(matches!(err, HestonNnError::ShapeMismatch { .. }));
    }

    #[test]
    fn inconsistent_parameters_are_a_shape_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let input = Matrix::zeros(2, 3);

        let mut short_slopes = Layer::new(4, 3, ActivationKind::PReLU.instantiate(4), &mut rng);
        short_slopes.activator = Activation::PReLU { slopes: vec![0.25; 2] };
        assert!(matches!(short_slopes.feed_from(&input), Err(HestonNnError::ShapeMismatch { .. })));

        let mut wrong_weights = Layer::new(4, 3, Activation::ReLU, &mut rng);
        wrong_weights.weights = Matrix::zeros(3, 5);
        assert!(matches!(wrong_weights.feed_from(&input), Err(HestonNnError::ShapeMismatch { .. })));

        let json = r#"{"size": 2, "input_size": 3,
            "weights": {"rows": 3, "cols": 2, "data": [[1.0, 2.0]]},
            "biases": {"rows": 1, "cols": 2, "data": [[0.0, 0.0]]},
            "activator": "ReLU"}"#;
        let loaded: Layer = serde_json::from_str(json).unwrap();
        assert!(matches!(loaded.feed_from(&input), Err(HestonNnError::ShapeMismatch { .. })));
    }

    #[test]
    fn parameter_count_includes_prelu_slopes() {
        let mut rng = StdRng::seed_from_u64(1);
        let layer = Layer::new(4, 3, ActivationKind::PReLU.instantiate(4), &mut rng);
        assert_eq!(layer.num_parameters(), 3 * 4 + 4 + 4);
    }
}
