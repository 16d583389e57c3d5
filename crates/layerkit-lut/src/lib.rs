//! # layerkit-lut
//!
//! Look-up tables used by the layerkit color tools.
//!
//! # LUT Types
//!
//! - [`CubeLut`] - `.cube` color grade on a 33×33×33 lattice
//! - [`Lut1D`] - 256-entry per-channel tone curve (gamma)
//!
//! # Usage
//!
//! ```rust
//! use layerkit_core::{Image, Rgb};
//! use layerkit_lut::{CubeLut, Lut1D};
//!
//! let img = Image::solid(4, 4, Rgb([255, 0, 0]));
//!
//! let graded = CubeLut::identity().apply(&img).unwrap();
//! assert_eq!(graded.pixel(0, 0), &[255, 0, 0]);
//!
//! let brighter = Lut1D::gamma(0.5).apply_image(&img);
//! assert_eq!(brighter.dimensions(), (4, 4));
//! ```
//!
//! # Lookup
//!
//! Cube tables use nearest-lattice lookup (no interpolation); tone curves are
//! exact per 8-bit value.
//!
//! # Dependencies
//!
//! - `layerkit-core` - Image buffers
//! - `thiserror` - Error handling
//! - `tracing` - Load/apply diagnostics
//!
//! # Used By
//!
//! - `layerkit-ops` - gamma correction
//! - `layerkit-resources` - LUT loading by name

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod lut1d;
pub mod cube;

pub use cube::{parse_cube, read_cube, CubeLut};
pub use error::{LutError, LutResult};
pub use lut1d::Lut1D;
