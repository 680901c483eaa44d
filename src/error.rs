use thiserror::Error;

/// Every failure the crate can report.
#[derive(Debug, Error)]
pub enum HestonNnError {
    /// A network or activation configuration that cannot be built.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An array or batch whose shape does not match what the operation expects.
    #[error("shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: String, found: String },

    /// A model or market parameter the pricing engine cannot work with.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// The pricing integral did not produce a finite value.
    #[error("numerical failure: {0}")]
    Numerical(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl HestonNnError {
    pub(crate) fn shape(expected: impl Into<String>, found: impl Into<String>) -> Self {
        HestonNnError::ShapeMismatch { expected: expected.into(), found: found.into() }
    }
}

pub type Result<T> = std::result::Result<T, HestonNnError>;
