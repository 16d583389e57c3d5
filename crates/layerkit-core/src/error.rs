//! Error types for layerkit-core operations.
//!
//! The [`Error`] enum covers the failure modes of buffer construction,
//! pixel access and color parsing:
//! - Buffer length checks ([`Error::InvalidDimensions`])
//! - Paired-buffer checks ([`Error::DimensionMismatch`], [`Error::ChannelMismatch`])
//! - Channel layout checks ([`Error::UnsupportedChannels`])
//! - Color strings ([`Error::InvalidColor`])
//!
//! # Usage
//!
//! ```rust
//! use layerkit_core::{Error, Result};
//!
//! fn check(x: u32, y: u32, width: u32, height: u32) -> Result<()> {
//!     if x >= width || y >= height {
//!         return Err(Error::out_of_bounds(x, y, width, height));
//!     }
//!     Ok(())
//! }
//! assert!(check(3, 3, 2, 2).is_err());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by core buffer and color operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Pixel coordinates are outside image bounds.
    #[error("pixel ({x}, {y}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: u32,
        /// Y coordinate that was out of bounds
        y: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Two buffers that must share a size do not.
    ///
    /// Blending and mask arithmetic fail fast with this error instead of
    /// cropping to the common area.
    #[error("dimension mismatch: {a_width}x{a_height} vs {b_width}x{b_height}")]
    DimensionMismatch {
        /// First buffer width
        a_width: u32,
        /// First buffer height
        a_height: u32,
        /// Second buffer width
        b_width: u32,
        /// Second buffer height
        b_height: u32,
    },

    /// Channel count mismatch between two buffers.
    #[error("channel mismatch: expected {expected}, got {got}")]
    ChannelMismatch {
        /// Expected channel count
        expected: usize,
        /// Actual channel count
        got: usize,
    },

    /// Channel count outside of the supported L/RGB/RGBA layouts.
    #[error("unsupported channel count: {0} (expected 1, 3 or 4)")]
    UnsupportedChannels(usize),

    /// Invalid buffer dimensions or data length.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// A color string could not be parsed.
    #[error("invalid color '{0}': expected #RRGGBB")]
    InvalidColor(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(a: (u32, u32), b: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            a_width: a.0,
            a_height: a.1,
            b_width: b.0,
            b_height: b.1,
        }
    }

    /// Creates an [`Error::ChannelMismatch`] error.
    #[inline]
    pub fn channel_mismatch(expected: usize, got: usize) -> Self {
        Self::ChannelMismatch { expected, got }
    }

    /// Creates an [`Error::InvalidColor`] error.
    #[inline]
    pub fn invalid_color(text: impl Into<String>) -> Self {
        Self::InvalidColor(text.into())
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }

    /// Returns `true` if two buffers disagreed on size or layout.
    #[inline]
    pub fn is_mismatch(&self) -> bool {
        matches!(
            self,
            Self::DimensionMismatch { .. } | Self::ChannelMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds() {
        let err = Error::out_of_bounds(100, 50, 80, 60);
        let msg = err.to_string();
        assert!(msg.contains("100"));
        assert!(msg.contains("80x60"));
        assert!(err.is_bounds_error());
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = Error::dimension_mismatch((100, 100), (200, 50));
        let msg = err.to_string();
        assert!(msg.contains("100x100"));
        assert!(msg.contains("200x50"));
        assert!(err.is_mismatch());
    }

    #[test]
    fn test_invalid_color() {
        let err = Error::invalid_color("#12");
        assert!(err.to_string().contains("#12"));
        assert!(!err.is_mismatch());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
