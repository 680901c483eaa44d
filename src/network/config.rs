use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationKind;
use crate::error::{HestonNnError, Result};

/// Architecture of a `HestonNet`.
///
/// Fields:
/// - `n_input`: width of each input sample
/// - `n_hidden`: width shared by the four hidden layers
/// - `n_output`: width of each output sample
/// - `activation`: activation kind applied after every linear layer
///   (defaults to `ReLU` when omitted from JSON)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub n_input: usize,
    pub n_hidden: usize,
    pub n_output: usize,
    #[serde(default)]
    pub activation: ActivationKind,
}

impl NetworkConfig {
    pub fn new(n_input: usize, n_hidden: usize, n_output: usize, activation: ActivationKind) -> Self {
        NetworkConfig { n_input, n_hidden, n_output, activation }
    }

    /// Builds a config from an activation name, rejecting unknown names.
    pub fn parse(n_input: usize, n_hidden: usize, n_output: usize, activation: &str) -> Result<Self> {
        let config = NetworkConfig::new(n_input, n_hidden, n_output, activation.parse()?);
        config.validate()?;
        Ok(config)
    }

    /// Like `parse`, but an unknown activation name falls back to `ReLU`.
    pub fn parse_lenient(n_input: usize, n_hidden: usize, n_output: usize, activation: &str) -> Result<Self> {
        let config = NetworkConfig::new(
            n_input,
            n_hidden,
            n_output,
            ActivationKind::from_name_or_default(activation),
        );
        config.validate()?;
        Ok(config)
    }

    /// All widths must be non-zero.
    pub fn validate(&self) -> Result<()> {
        for (name, width) in [
            ("n_input", self.n_input),
            ("n_hidden", self.n_hidden),
            ("n_output", self.n_output),
        ] {
            if width == 0 {
                return Err(HestonNnError::InvalidConfiguration(format!("{name} must be at least 1")));
            }
        }
        Ok(())
    }

    /// `(size, input_size)` of each of the five linear layers, input to output.
    pub fn layer_shapes(&self) -> [(usize, usize); 5] {
        [
            (self.n_hidden, self.n_input),
            (self.n_hidden, self.n_hidden),
            (self.n_hidden, self.n_hidden),
            (self.n_hidden, self.n_hidden),
            (self.n_output, self.n_hidden),
        ]
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Reads and validates a config written by `save_json` (or by hand).
    pub fn load_json(path: &str) -> Result<NetworkConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: NetworkConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_width_is_invalid() {
        let err = NetworkConfig::new(9, 0, 1, ActivationKind::ReLU).validate().unwrap_err();
        assert!(matches!(err, HestonNnError::InvalidConfiguration(_)));
    }

    #[test]
    fn parse_rejects_unknown_activation() {
        assert!(NetworkConfig::parse(9, 32, 1, "Swish").is_err());
        let config = NetworkConfig::parse(9, 32, 1, "Softplus").unwrap();
        assert_eq!(config.activation, ActivationKind::Softplus);
    }

    #[test]
    fn missing_activation_defaults_to_relu() {
        let config: NetworkConfig =
            serde_json::from_str(r#"{"n_input": 9, "n_hidden": 16, "n_output": 1}"#).unwrap();
        assert_eq!(config.activation, ActivationKind::ReLU);
    }

    #[test]
    fn unknown_activation_in_json_fails_to_load() {
        let res: std::result::Result<NetworkConfig, _> = serde_json::from_str(
            r#"{"n_input": 9, "n_hidden": 16, "n_output": 1, "activation": "Tanh"}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn json_file_round_trip() {
        let path = std::env::temp_dir().join(format!("heston-nn-config-{}.json", std::process::id()));
        let path = path.to_str().unwrap();
        let config = NetworkConfig::new(9, 64, 1, ActivationKind::PReLU);
        config.save_json(path).unwrap();
        let loaded = NetworkConfig::load_json(path).unwrap();
        std::fs::remove_file(path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn layer_shapes_chain() {
        let shapes = NetworkConfig::new(9, 16, 3, ActivationKind::ReLU).layer_shapes();
        assert_eq!(shapes[0], (16, 9));
        assert_eq!(shapes[4], (3, 16));
        for pair in shapes.windows(2) {
            assert_eq!(pair[0].0, pair[1].1);
        }
    }
}
