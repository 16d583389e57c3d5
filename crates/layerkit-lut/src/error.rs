//! LUT error types.

use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur during LUT operations.
#[derive(Debug, Error)]
pub enum LutError {
    /// A data line could not be read as numbers.
    #[error("parse error at line {line}: {msg}")]
    Parse {
        /// 1-based line number in the source text
        line: usize,
        /// What was wrong with the line
        msg: String,
    },

    /// A pixel addressed an entry past the end of the table.
    ///
    /// Raised for tables with fewer than 33³ entries.
    #[error("LUT index {index} out of range (table has {len} entries)")]
    IndexOutOfRange {
        /// Computed flat index
        index: usize,
        /// Number of entries in the table
        len: usize,
    },

    /// The image layout cannot be graded.
    #[error("unsupported channel count: {0}")]
    UnsupportedChannels(usize),

    /// Buffer construction failed.
    #[error(transparent)]
    Core(#[from] layerkit_core::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LutError {
    /// Creates a [`LutError::Parse`] error.
    #[inline]
    pub fn parse(line: usize, msg: impl Into<String>) -> Self {
        Self::Parse {
            line,
            msg: msg.into(),
        }
    }
}
