//! # layerkit-core
//!
//! Core types shared by every layerkit crate.
//!
//! - [`Image`] - 8-bit interleaved L/RGB/RGBA buffer
//! - [`Mask`] - single-channel 8-bit selection (exact inversion)
//! - [`Rgb`] - color value with `#RRGGBB` encoding
//! - [`Rect`] - pixel rectangle used by crops and mask searches
//! - [`numeric`] - step interpolation and seeded random partitions
//!
//! ## Crate Structure
//!
//! ```text
//! layerkit-core (this crate)
//!    ^
//!    |
//!    +-- layerkit-lut (cube tables, gamma curves)
//!    +-- layerkit-ops (blend, geometry, color and mask tools)
//!    +-- layerkit-resources (LUT/font discovery)
//! ```
//!
//! Every operation in the workspace is a pure function: it borrows its
//! inputs and returns a freshly allocated buffer.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod color;
pub mod error;
pub mod image;
pub mod numeric;
pub mod rect;

pub use color::{rgb_to_hsv, hsv_to_rgb, Rgb};
pub use error::*;
pub use image::{Image, Mask};
pub use rect::Rect;

/// Prelude module for convenient imports.
///
/// ```
/// use layerkit_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgb;
    pub use crate::error::{Error, Result};
    pub use crate::image::{Image, Mask};
    pub use crate::numeric::{random_numbers, step_color, step_value};
    pub use crate::rect::Rect;
}
