//! # layerkit-ops
//!
//! Image operations for layer-based editing.
//!
//! Every function borrows its inputs and returns a new buffer; nothing is
//! modified in place except by [`transform::paste`].
//!
//! # Modules
//!
//! - [`blend`] - Photoshop-style blend modes with opacity
//! - [`resize`] - Image scaling, resampling and aspect fitting
//! - [`transform`] - Crop, flips, rotation, shift
//! - [`gradient`] - Angled two-color gradients
//! - [`filter`] - Convolution, blur, morphology, edge-preserving filters
//! - [`color`] - Tone analysis, LUT/gamma grading, color transfer, color maps
//! - [`channels`] - Channel split/merge in RGB, YCbCr, Lab and HSV
//! - [`mask`] - Mask growth, arithmetic and rectangle searches
//! - [`draw`] - Rectangles and borders
//!
//! # Example
//!
//! ```rust
//! use layerkit_core::{Image, Rgb};
//! use layerkit_ops::{blend, BlendMode, Filter};
//! use layerkit_ops::resize::resize;
//!
//! let bg = Image::solid(64, 64, Rgb([40, 40, 40]));
//! let fg = Image::solid(64, 64, Rgb([200, 120, 0]));
//!
//! let mixed = blend::blend(&bg, &fg, BlendMode::Screen, 80).unwrap();
//! let small = resize(&mixed, 32, 32, Filter::Lanczos3).unwrap();
//! assert_eq!(small.dimensions(), (32, 32));
//! ```
//!
//! # Common Operations
//!
//! ## Fit a layer to a canvas
//!
//! ```rust,ignore
//! use layerkit_ops::resize::{fit_resize, FitMode};
//!
//! let fitted = fit_resize(&layer, 1024, 1024, FitMode::Letterbox, Filter::Lanczos3)?;
//! ```
//!
//! ## Rotate with alpha
//!
//! ```rust,ignore
//! use layerkit_ops::transform::{rotate_with_alpha, RotateMethod};
//!
//! let layer = rotate_with_alpha(&image, 30.0, &mask, RotateMethod::Lanczos, 2)?;
//! let rgba = layer.composite;
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - Row loops run on the Rayon thread pool
//!
//! # Dependencies
//!
//! - `layerkit-core` - Image, Mask, Rgb, Rect
//! - `layerkit-lut` - Cube tables and gamma curves
//! - `glam` - Affine math for rotation
//! - `rayon` - Row parallelism (optional)
//! - `tracing` - Operation diagnostics

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod blend;
pub mod channels;
pub mod color;
pub mod draw;
pub mod filter;
pub mod gradient;
pub mod mask;
pub mod parallel;
pub mod resize;
pub mod transform;

pub use blend::BlendMode;
pub use color::ColorMap;
pub use error::{OpsError, OpsResult};
pub use resize::{FitMode, Filter};
pub use transform::{RotateMethod, ShiftMode};
