//! Layer blend modes.
//!
//! Photoshop-style per-channel blend formulas between a background `a` and a
//! layer `b`, both normalized to `[0, 1]`.
//!
//! # Modes
//!
//! | group     | modes |
//! |-----------|-------|
//! | basic     | normal, multiply, screen, add, subtract, difference, darker, lighter |
//! | burn      | color_burn, linear_burn |
//! | dodge     | color_dodge, linear_dodge |
//! | contrast  | overlay, soft_light, hard_light, vivid_light, pin_light, linear_light, hard_mix |
//!
//! Divisions use an epsilon of `0.001` instead of a zero check, so results
//! near `a = 0` (burn) or `a = 1` (dodge) are finite but approximate.
//!
//! # Example
//!
//! ```rust
//! use layerkit_ops::blend::{blend_pixel, BlendMode};
//!
//! let v = blend_pixel(0.8, 0.2, BlendMode::Multiply);
//! assert!((v - 0.16).abs() < 1e-6);
//! ```

use crate::parallel::for_each_row;
use crate::{OpsError, OpsResult};
use layerkit_core::image::{u8_to_unit, unit_to_u8};
use layerkit_core::Image;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

const EPS: f32 = 0.001;

/// Blend mode for compositing a layer onto a background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// The layer replaces the background.
    #[default]
    Normal,
    /// `a * b`.
    Multiply,
    /// `1 - (1 - a)(1 - b)`.
    Screen,
    /// `min(a + b, 1)`.
    Add,
    /// `max(a - b, 0)`.
    Subtract,
    /// `|a - b|`.
    Difference,
    /// Per-channel minimum.
    Darker,
    /// Per-channel maximum.
    Lighter,
    /// Darkens the layer by the background.
    ColorBurn,
    /// Brightens the layer by the background.
    ColorDodge,
    /// `a + b - 1`, floored at 0.
    LinearBurn,
    /// `a + b`, capped at 1.
    LinearDodge,
    /// Multiply or screen, chosen by the layer.
    Overlay,
    /// Gentle contrast, chosen by the background.
    SoftLight,
    /// Multiply or screen, chosen by the background.
    HardLight,
    /// Color burn or dodge, chosen by the background.
    VividLight,
    /// Replaces values outside a band around the background.
    PinLight,
    /// `b + 2a - 1`, clamped.
    LinearLight,
    /// Thresholds `a + b` at 1.
    HardMix,
}

impl BlendMode {
    /// Every mode, in menu order.
    pub const ALL: [BlendMode; 19] = [
        BlendMode::Normal,
        BlendMode::Multiply,
        BlendMode::Screen,
        BlendMode::Add,
        BlendMode::Subtract,
        BlendMode::Difference,
        BlendMode::Darker,
        BlendMode::Lighter,
        BlendMode::ColorBurn,
        BlendMode::ColorDodge,
        BlendMode::LinearBurn,
        BlendMode::LinearDodge,
        BlendMode::Overlay,
        BlendMode::SoftLight,
        BlendMode::HardLight,
        BlendMode::VividLight,
        BlendMode::PinLight,
        BlendMode::LinearLight,
        BlendMode::HardMix,
    ];

    /// Snake-case name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            BlendMode::Normal => "normal",
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
            BlendMode::Add => "add",
            BlendMode::Subtract => "subtract",
            BlendMode::Difference => "difference",
            BlendMode::Darker => "darker",
            BlendMode::Lighter => "lighter",
            BlendMode::ColorBurn => "color_burn",
            BlendMode::ColorDodge => "color_dodge",
            BlendMode::LinearBurn => "linear_burn",
            BlendMode::LinearDodge => "linear_dodge",
            BlendMode::Overlay => "overlay",
            BlendMode::SoftLight => "soft_light",
            BlendMode::HardLight => "hard_light",
            BlendMode::VividLight => "vivid_light",
            BlendMode::PinLight => "pin_light",
            BlendMode::LinearLight => "linear_light",
            BlendMode::HardMix => "hard_mix",
        }
    }
}

impl FromStr for BlendMode {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        let key = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        let mode = match key.as_str() {
            // "multply" is the spelling saved in older pipelines.
            "multply" => BlendMode::Multiply,
            "lighten" => BlendMode::Lighter,
            "darken" => BlendMode::Darker,
            other => BlendMode::ALL
                .into_iter()
                .find(|m| m.name() == other)
                .ok_or_else(|| OpsError::InvalidParameter(format!("unknown blend mode '{}'", s)))?,
        };
        Ok(mode)
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Blends one normalized channel value.
///
/// `a` is the background, `b` the layer. The result is clamped to `[0, 1]`.
#[inline]
pub fn blend_pixel(a: f32, b: f32, mode: BlendMode) -> f32 {
    let v = match mode {
        BlendMode::Normal => b,
        BlendMode::Multiply => a * b,
        BlendMode::Screen => 1.0 - (1.0 - a) * (1.0 - b),
        BlendMode::Add => (a + b).min(1.0),
        BlendMode::Subtract => (a - b).max(0.0),
        BlendMode::Difference => (a - b).abs(),
        BlendMode::Darker => a.min(b),
        BlendMode::Lighter => a.max(b),
        BlendMode::ColorBurn => 1.0 - (1.0 - b) / (a + EPS),
        BlendMode::ColorDodge => b / (1.0 - a + EPS),
        BlendMode::LinearBurn => a + b - 1.0,
        BlendMode::LinearDodge => a + b,
        BlendMode::Overlay => {
            if b < 0.5 {
                2.0 * a * b
            } else {
                1.0 - 2.0 * (1.0 - a) * (1.0 - b)
            }
        }
        BlendMode::SoftLight => {
            if a < 0.5 {
                (2.0 * a - 1.0) * (b - b * b) + b
            } else {
                (2.0 * a - 1.0) * (b.sqrt() - b) + b
            }
        }
        BlendMode::HardLight => {
            if a < 0.5 {
                2.0 * a * b
            } else {
                1.0 - 2.0 * (1.0 - a) * (1.0 - b)
            }
        }
        BlendMode::VividLight => {
            if a < 0.5 {
                (1.0 - (1.0 - b) / (2.0 * a + EPS)).max(0.0)
            } else {
                (b / (2.0 * (1.0 - a) + EPS)).min(1.0)
            }
        }
        BlendMode::PinLight => {
            if b < 2.0 * a - 1.0 {
                2.0 * a - 1.0
            } else if b > 2.0 * a {
                2.0 * a
            } else {
                b
            }
        }
        BlendMode::LinearLight => b + 2.0 * a - 1.0,
        BlendMode::HardMix => {
            if a + b > 1.0 {
                1.0
            } else {
                0.0
            }
        }
    };
    v.clamp(0.0, 1.0)
}

/// Blends normalized interleaved buffers.
///
/// Color channels are blended, a fourth (alpha) channel is copied from the
/// background. `opacity` is a fraction in `[0, 1]`.
///
/// # Example
///
/// ```rust
/// use layerkit_ops::blend::{blend_f32, BlendMode};
///
/// let bg = vec![0.5f32; 4 * 4 * 3];
/// let layer = vec![1.0f32; 4 * 4 * 3];
/// let out = blend_f32(&bg, &layer, 4, 4, 3, BlendMode::Screen, 1.0).unwrap();
/// assert!((out[0] - 1.0).abs() < 1e-6);
/// ```
pub fn blend_f32(
    background: &[f32],
    layer: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    mode: BlendMode,
    opacity: f32,
) -> OpsResult<Vec<f32>> {
    trace!(width, height, channels, %mode, opacity, "blend_f32");

    let expected = width * height * channels;
    if background.len() != expected || layer.len() != expected {
        return Err(OpsError::SizeMismatch(format!(
            "expected {} samples, got background={}, layer={}",
            expected,
            background.len(),
            layer.len()
        )));
    }
    if !(0.0..=1.0).contains(&opacity) {
        return Err(OpsError::InvalidParameter(format!(
            "opacity {} outside [0, 1]",
            opacity
        )));
    }

    let color = if channels == 4 { 3 } else { channels };
    let row_len = width * channels;
    let mut dst = vec![0.0f32; expected];

    for_each_row(&mut dst, row_len, |y, row| {
        let off = y * row_len;
        for (i, out) in row.iter_mut().enumerate() {
            let a = background[off + i];
            *out = if i % channels >= color {
                a
            } else {
                let v = blend_pixel(a, layer[off + i], mode);
                opacity * v + (1.0 - opacity) * a
            };
        }
    });

    Ok(dst)
}

/// Blends `layer` onto `background`.
///
/// `opacity` is a percentage: 0 returns the background, 100 the full blend,
/// anything between moves the blended 8-bit value towards the background by
/// `1 - opacity` and truncates.
///
/// # Errors
///
/// - [`OpsError::SizeMismatch`] if the images differ in size
/// - [`OpsError::ChannelMismatch`] if they differ in layout
/// - [`OpsError::InvalidParameter`] if `opacity > 100`
///
/// # Example
///
/// ```rust
/// use layerkit_core::{Image, Rgb};
/// use layerkit_ops::blend::{blend, BlendMode};
///
/// let img = Image::solid(8, 8, Rgb([200, 100, 50]));
/// let out = blend(&img, &img, BlendMode::Normal, 100).unwrap();
/// assert_eq!(out, img);
/// ```
pub fn blend(background: &Image, layer: &Image, mode: BlendMode, opacity: u32) -> OpsResult<Image> {
    if !background.same_size(layer) {
        return Err(OpsError::size_mismatch(background.dimensions(), layer.dimensions()));
    }
    if background.channels() != layer.channels() {
        return Err(OpsError::ChannelMismatch {
            expected: background.channels(),
            got: layer.channels(),
        });
    }
    if opacity > 100 {
        return Err(OpsError::InvalidParameter(format!(
            "opacity {} outside 0..=100",
            opacity
        )));
    }

    debug!(
        width = background.width(),
        height = background.height(),
        %mode,
        opacity,
        "Blending layer"
    );

    if opacity == 0 {
        return Ok(background.clone());
    }

    let channels = background.channels();
    let color = background.layout().color_channels();
    let row_len = background.width() as usize * channels;
    let back = 1.0 - opacity as f32 / 100.0;
    let bg = background.as_slice();
    let ly = layer.as_slice();
    let mut dst = vec![0u8; bg.len()];

    for_each_row(&mut dst, row_len, |y, row| {
        let off = y * row_len;
        for (i, out) in row.iter_mut().enumerate() {
            let a = bg[off + i];
            if i % channels >= color {
                *out = a;
                continue;
            }
            let mixed = unit_to_u8(blend_pixel(u8_to_unit(a), u8_to_unit(ly[off + i]), mode));
            *out = if opacity == 100 {
                mixed
            } else {
                (mixed as f32 + back * (a as f32 - mixed as f32)) as u8
            };
        }
    });

    Ok(Image::from_data(
        background.width(),
        background.height(),
        background.layout(),
        dst,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use layerkit_core::image::Layout;
    use layerkit_core::Rgb;

    fn ramp(width: u32, height: u32) -> Image {
        let mut data = Vec::new();
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[(x * 37 % 256) as u8, (y * 53 % 256) as u8, ((x + y) * 11 % 256) as u8]);
            }
        }
        Image::from_data(width, height, Layout::Rgb, data).unwrap()
    }

    #[test]
    fn test_mode_names_roundtrip() {
        for mode in BlendMode::ALL {
            assert_eq!(mode.name().parse::<BlendMode>().unwrap(), mode);
        }
        assert_eq!("multply".parse::<BlendMode>().unwrap(), BlendMode::Multiply);
        assert_eq!("Lighten".parse::<BlendMode>().unwrap(), BlendMode::Lighter);
        assert_eq!("darken".parse::<BlendMode>().unwrap(), BlendMode::Darker);
        assert!(matches!(
            "dissolve".parse::<BlendMode>(),
            Err(OpsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_basic_formulas() {
        assert_abs_diff_eq!(blend_pixel(0.5, 0.5, BlendMode::Screen), 0.75);
        assert_abs_diff_eq!(blend_pixel(0.7, 0.6, BlendMode::Add), 1.0);
        assert_abs_diff_eq!(blend_pixel(0.3, 0.6, BlendMode::Subtract), 0.0);
        assert_abs_diff_eq!(blend_pixel(0.3, 0.6, BlendMode::Difference), 0.3, epsilon = 1e-6);
        assert_abs_diff_eq!(blend_pixel(0.3, 0.6, BlendMode::Darker), 0.3);
        assert_abs_diff_eq!(blend_pixel(0.3, 0.6, BlendMode::Lighter), 0.6);
        assert_abs_diff_eq!(blend_pixel(0.6, 0.7, BlendMode::HardMix), 1.0);
        assert_abs_diff_eq!(blend_pixel(0.2, 0.7, BlendMode::HardMix), 0.0);
    }

    #[test]
    fn test_epsilon_guards() {
        // Burn on black background stays finite and clamps to 0.
        assert_abs_diff_eq!(blend_pixel(0.0, 0.5, BlendMode::ColorBurn), 0.0);
        // Dodge on white background: 0.5 / 0.001 clamps to 1.
        assert_abs_diff_eq!(blend_pixel(1.0, 0.5, BlendMode::ColorDodge), 1.0);
        let v = blend_pixel(0.5, 0.5, BlendMode::ColorDodge);
        assert_abs_diff_eq!(v, 0.5 / 0.501, epsilon = 1e-6);
    }

    #[test]
    fn test_piecewise_branches() {
        // Overlay switches on the layer value.
        assert_abs_diff_eq!(blend_pixel(0.4, 0.25, BlendMode::Overlay), 0.2, epsilon = 1e-6);
        // Hard light switches on the background value.
        assert_abs_diff_eq!(blend_pixel(0.25, 0.4, BlendMode::HardLight), 0.2, epsilon = 1e-6);
        // Pin light bands.
        assert_abs_diff_eq!(blend_pixel(0.9, 0.1, BlendMode::PinLight), 0.8, epsilon = 1e-6);
        assert_abs_diff_eq!(blend_pixel(0.1, 0.9, BlendMode::PinLight), 0.2, epsilon = 1e-6);
        assert_abs_diff_eq!(blend_pixel(0.5, 0.5, BlendMode::PinLight), 0.5);
        // Soft light with mid-grey background leaves the layer unchanged.
        assert_abs_diff_eq!(blend_pixel(0.5, 0.3, BlendMode::SoftLight), 0.3, epsilon = 1e-6);
        assert_abs_diff_eq!(blend_pixel(0.75, 0.0, BlendMode::LinearLight), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_all_modes_in_range() {
        for mode in BlendMode::ALL {
            for i in 0..=10 {
                for j in 0..=10 {
                    let v = blend_pixel(i as f32 / 10.0, j as f32 / 10.0, mode);
                    assert!((0.0..=1.0).contains(&v), "{mode} produced {v}");
                }
            }
        }
    }

    #[test]
    fn test_normal_self_blend_identity() {
        let img = ramp(17, 9);
        for opacity in [1, 50, 100] {
            assert_eq!(blend(&img, &img, BlendMode::Normal, opacity).unwrap(), img);
        }
    }

    #[test]
    fn test_opacity_zero_returns_background() {
        let bg = Image::solid(4, 4, Rgb([10, 20, 30]));
        let layer = Image::solid(4, 4, Rgb([250, 250, 250]));
        assert_eq!(blend(&bg, &layer, BlendMode::Screen, 0).unwrap(), bg);
    }

    #[test]
    fn test_opacity_interpolates() {
        let bg = Image::solid(2, 2, Rgb([0, 0, 0]));
        let layer = Image::solid(2, 2, Rgb([200, 200, 200]));
        let out = blend(&bg, &layer, BlendMode::Normal, 50).unwrap();
        assert_eq!(out.pixel(0, 0), &[100, 100, 100]);
    }

    #[test]
    fn test_partial_opacity_truncates() {
        // 201 + 0.5 * (0 - 201) = 100.5 and 0 + 0.67 * 255 = 170.85
        let bg = Image::from_data(2, 1, Layout::L, vec![0, 255]).unwrap();
        let layer = Image::from_data(2, 1, Layout::L, vec![201, 0]).unwrap();
        assert_eq!(blend(&bg, &layer, BlendMode::Normal, 50).unwrap().as_slice(), &[100, 127]);
        assert_eq!(blend(&bg, &layer, BlendMode::Normal, 33).unwrap().as_slice(), &[66, 170]);
    }

    #[test]
    fn test_alpha_from_background() {
        let bg = Image::filled(2, 2, Layout::Rgba, &[100, 100, 100, 40]).unwrap();
        let layer = Image::filled(2, 2, Layout::Rgba, &[255, 255, 255, 255]).unwrap();
        let out = blend(&bg, &layer, BlendMode::Multiply, 100).unwrap();
        assert_eq!(out.pixel(1, 1), &[100, 100, 100, 40]);
    }

    #[test]
    fn test_mismatch_errors() {
        let a = Image::solid(4, 4, Rgb::BLACK);
        let b = Image::solid(4, 5, Rgb::BLACK);
        assert!(matches!(
            blend(&a, &b, BlendMode::Normal, 100),
            Err(OpsError::SizeMismatch(_))
        ));
        let c = a.to_rgba();
        assert!(matches!(
            blend(&a, &c, BlendMode::Normal, 100),
            Err(OpsError::ChannelMismatch { expected: 3, got: 4 })
        ));
        assert!(matches!(
            blend(&a, &a, BlendMode::Normal, 101),
            Err(OpsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_blend_f32_matches_pixel() {
        let bg = vec![0.2f32, 0.4, 0.6, 1.0];
        let layer = vec![0.5f32, 0.5, 0.5, 0.0];
        let out = blend_f32(&bg, &layer, 1, 1, 4, BlendMode::Multiply, 1.0).unwrap();
        assert_abs_diff_eq!(out[0], 0.1, epsilon = 1e-6);
        assert_abs_diff_eq!(out[3], 1.0);
        assert!(blend_f32(&bg, &layer[..3], 1, 1, 4, BlendMode::Multiply, 1.0).is_err());
    }
}
