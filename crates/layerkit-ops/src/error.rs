//! Error types for image operations.

use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Images have incompatible sizes.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    /// Images have incompatible channel layouts.
    #[error("channel mismatch: expected {expected}, got {got}")]
    ChannelMismatch {
        /// Channel count of the first input
        expected: usize,
        /// Channel count of the second input
        got: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Operation not supported for this format.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// Buffer construction failed.
    #[error(transparent)]
    Core(#[from] layerkit_core::Error),

    /// Look-up table failure.
    #[error(transparent)]
    Lut(#[from] layerkit_lut::LutError),
}

impl OpsError {
    /// Size mismatch between two `(width, height)` pairs.
    pub(crate) fn size_mismatch(a: (u32, u32), b: (u32, u32)) -> Self {
        Self::SizeMismatch(format!("{}x{} vs {}x{}", a.0, a.1, b.0, b.1))
    }
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;
