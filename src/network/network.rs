use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::layers::dense::Layer;
use crate::math::matrix::Matrix;
use crate::network::config::NetworkConfig;

/// Five fully-connected layers (four hidden of equal width, one output), each
/// followed by the configured activation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HestonNet {
    config: NetworkConfig,
    pub layers: Vec<Layer>,
}

impl HestonNet {
    /// Builds a network with weights drawn from the thread-local RNG.
    pub fn new(config: NetworkConfig) -> Result<HestonNet> {
        HestonNet::with_rng(config, &mut rand::thread_rng())
    }

    /// Builds a network with weights drawn from `rng`, for reproducible setups.
    pub fn with_rng<R: Rng + ?Sized>(config: NetworkConfig, rng: &mut R) -> Result<HestonNet> {
        config.validate()?;
        let layers = config.layer_shapes().into_iter()
            .map(|(size, input_size)| {
                Layer::new(size, input_size, config.activation.instantiate(size), &mut *rng)
            })
            .collect();
        let net = HestonNet { config, layers };
        tracing::debug!(
            n_input = config.n_input,
            n_hidden = config.n_hidden,
            n_output = config.n_output,
            activation = %config.activation,
            parameters = net.num_parameters(),
            "built network"
        );
        Ok(net)
    }

    /// Builds a network from an activation name; unknown names are an error.
    pub fn build(n_input: usize, n_hidden: usize, n_output: usize, activation: &str) -> Result<HestonNet> {
        HestonNet::new(NetworkConfig::parse(n_input, n_hidden, n_output, activation)?)
    }

    /// Builds a network from an activation name; unknown names fall back to `ReLU`.
    pub fn build_lenient(n_input: usize, n_hidden: usize, n_output: usize, activation: &str) -> Result<HestonNet> {
        HestonNet::new(NetworkConfig::parse_lenient(n_input, n_hidden, n_output, activation)?)
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Forward pass over a `(batch, n_input)` matrix; returns `(batch, n_output)`.
    pub fn forward(&self, input: &Matrix) -> Result<Matrix> {
        let mut current = input.clone();
        for layer in &self.layers {
            current = layer.feed_from(&current)?;
        }
        Ok(current)
    }

    /// Forward pass for a single sample.
    pub fn predict(&self, input: Vec<f64>) -> Result<Vec<f64>> {
        let mut out = self.forward(&Matrix::from_data(vec![input]))?;
        Ok(out.data.swap_remove(0))
    }

    pub fn num_parameters(&self) -> usize {
        self.layers.iter().map(Layer::num_parameters).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::activation::{Activation, ActivationKind};
    use crate::error::HestonNnError;
    use rand::{rngs::StdRng, SeedableRng};

    fn seeded(config: NetworkConfig, seed: u64) -> HestonNet {
        HestonNet::with_rng(config, &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn forward_shape_for_every_activation() {
        for kind in ActivationKind::ALL {
            let net = seeded(NetworkConfig::new(9, 12, 4, kind), 3);
            let out = net.forward(&Matrix::zeros(5, 9)).unwrap();
            assert_eq!(out.shape(), (5, 4), "{kind}");
        }
    }

    #[test]
    fn has_five_layers_with_configured_widths() {
        let net = seeded(NetworkConfig::new(9, 12, 4, ActivationKind::ReLU), 3);
        let sizes: Vec<(usize, usize)> = net.layers.iter().map(|l| (l.input_size, l.size)).collect();
        assert_eq!(sizes, vec![(9, 12), (12, 12), (12, 12), (12, 12), (12, 4)]);
    }

    #[test]
    fn prelu_layers_own_their_slopes() {
        let net = seeded(NetworkConfig::new(3, 6, 2, ActivationKind::PReLU), 3);
        let widths: Vec<usize> = net.layers.iter().map(|l| match &l.activator {
            Activation::PReLU { slopes } => slopes.len(),
            other => panic!("unexpected activation {other:?}"),
        }).collect();
        assert_eq!(widths, vec![6, 6, 6, 6, 2]);
        // 3*6+6 + 3*(6*6+6) + 6*2+2, plus 4*6+2 slopes
        assert_eq!(net.num_parameters(), 24 + 126 + 14 + 26);
    }

    #[test]
    fn wrong_input_width_is_rejected() {
        let net = seeded(NetworkConfig::new(9, 8, 1, ActivationKind::Elu), 3);
        let err = net.forward(&Matrix::zeros(2, 7)).unwrap_err();
        assert!(matches!(err, HestonNnError::ShapeMismatch { .. }));
    }

    #[test]
    fn relu_and_softplus_outputs_are_non_negative() {
        let input = Matrix::from_data(vec![vec![-3.0, 1.0, 2.0], vec![0.5, -0.5, 8.0]]);
        for kind in [ActivationKind::ReLU, ActivationKind::Softplus] {
            let net = seeded(NetworkConfig::new(3, 8, 2, kind), 11);
            let out = net.forward(&input).unwrap();
            assert!(out.data.iter().flatten().all(|&x| x >= 0.0), "{kind}");
        }
    }

    #[test]
    fn predict_matches_batched_forward() {
        let net = seeded(NetworkConfig::new(2, 4, 3, ActivationKind::Softplus), 5);
        let batch = net.forward(&Matrix::from_data(vec![vec![0.1, 0.2], vec![0.3, 0.4]])).unwrap();
        let single = net.predict(vec![0.3, 0.4]).unwrap();
        assert_eq!(single, batch.data[1]);
    }

    #[test]
    fn lenient_build_treats_unknown_names_as_relu() {
        let net = HestonNet::build_lenient(4, 6, 2, "Tanh").unwrap();
        assert_eq!(net.config().activation, ActivationKind::ReLU);
        assert!(net.layers.iter().all(|l| l.activator == Activation::ReLU));

        let unknown = seeded(NetworkConfig::parse_lenient(4, 6, 2, "Tanh").unwrap(), 9);
        let relu = seeded(NetworkConfig::parse_lenient(4, 6, 2, "ReLU").unwrap(), 9);
        let x = Matrix::from_data(vec![vec![0.5, -1.5, 2.0, -0.25], vec![-3.0, 0.0, 1.0, 4.0]]);
        assert_eq!(unknown.forward(&x).unwrap(), relu.forward(&x).unwrap());
    }

    #[test]
    fn build_rejects_unknown_activation() {
        let err = HestonNet::build(9, 8, 1, "LeakyReLU").unwrap_err();
        assert!(matches!(err, HestonNnError::InvalidConfiguration(_)));
    }
}
