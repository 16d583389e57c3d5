//! Resource discovery errors.

use thiserror::Error;

/// Result type for resource lookups.
pub type ResourceResult<T> = Result<T, ResourceError>;

/// Errors raised while locating or loading resources.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Reading a file or directory failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A directory produced an invalid search pattern.
    #[error("invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// A LUT file failed to parse.
    #[error(transparent)]
    Lut(#[from] layerkit_lut::LutError),

    /// No resource is registered under this name.
    #[error("unknown resource '{0}'")]
    NotFound(String),
}
