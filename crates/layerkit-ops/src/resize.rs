//! Image resize and resampling operations.
//!
//! Provides image scaling using separable two-pass filtering, plus the
//! aspect-aware [`fit_resize`] used to conform layers to a canvas.
//!
//! # Filters
//!
//! - [`Filter::Nearest`] - Point sampling (blocky)
//! - [`Filter::Box`] - Area average
//! - [`Filter::Bilinear`] - Triangle filter (smooth but blurry)
//! - [`Filter::Hamming`] - Windowed sinc, radius 1
//! - [`Filter::Bicubic`] - Mitchell-Netravali cubic
//! - [`Filter::Lanczos3`] - Windowed sinc, radius 3 (best for downscaling)
//!
//! # Example
//!
//! ```rust
//! use layerkit_ops::resize::{resize_f32, Filter};
//!
//! let src: Vec<f32> = vec![0.0; 64 * 64 * 4]; // 64x64 RGBA
//! let dst = resize_f32(&src, 64, 64, 4, 128, 128, Filter::Lanczos3).unwrap();
//! assert_eq!(dst.len(), 128 * 128 * 4);
//! ```

use crate::parallel::for_each_row;
use crate::transform::{crop, paste};
use crate::{OpsError, OpsResult};
use layerkit_core::{Image, Rect};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// Resampling filter for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    /// Nearest-neighbor (fastest, no interpolation).
    Nearest,
    /// Box (area average when downscaling).
    Box,
    /// Bilinear interpolation (smooth, fast).
    Bilinear,
    /// Hamming-windowed sinc.
    Hamming,
    /// Bicubic interpolation (sharper than bilinear).
    Bicubic,
    /// Lanczos-3 (high quality, best for downscaling).
    #[default]
    Lanczos3,
}

impl Filter {
    /// Every filter, from cheapest to most expensive.
    pub const ALL: [Filter; 6] = [
        Filter::Nearest,
        Filter::Box,
        Filter::Bilinear,
        Filter::Hamming,
        Filter::Bicubic,
        Filter::Lanczos3,
    ];

    /// Returns the support radius for this filter.
    #[inline]
    pub fn support(&self) -> f32 {
        match self {
            Filter::Nearest | Filter::Box => 0.5,
            Filter::Bilinear | Filter::Hamming => 1.0,
            Filter::Bicubic => 2.0,
            Filter::Lanczos3 => 3.0,
        }
    }

    /// Evaluates the filter kernel at position x.
    #[inline]
    pub fn weight(&self, x: f32) -> f32 {
        match self {
            Filter::Nearest | Filter::Box => box_weight(x),
            Filter::Bilinear => bilinear_weight(x),
            Filter::Hamming => hamming_weight(x),
            Filter::Bicubic => bicubic_weight(x),
            Filter::Lanczos3 => lanczos_weight(x, 3.0),
        }
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Filter::Nearest => "nearest",
            Filter::Box => "box",
            Filter::Bilinear => "bilinear",
            Filter::Hamming => "hamming",
            Filter::Bicubic => "bicubic",
            Filter::Lanczos3 => "lanczos",
        }
    }
}

impl FromStr for Filter {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(Filter::Nearest),
            "box" => Ok(Filter::Box),
            "bilinear" | "linear" => Ok(Filter::Bilinear),
            "hamming" => Ok(Filter::Hamming),
            "bicubic" | "cubic" => Ok(Filter::Bicubic),
            "lanczos" | "lanczos3" => Ok(Filter::Lanczos3),
            _ => Err(OpsError::InvalidParameter(format!("unknown filter '{}'", s))),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Box weight function, half-open so ties pick exactly one sample.
#[inline]
fn box_weight(x: f32) -> f32 {
    if (-0.5..0.5).contains(&x) { 1.0 } else { 0.0 }
}

/// Bilinear (triangle) weight function.
#[inline]
fn bilinear_weight(x: f32) -> f32 {
    let ax = x.abs();
    if ax < 1.0 { 1.0 - ax } else { 0.0 }
}

#[inline]
fn hamming_weight(x: f32) -> f32 {
    let ax = x.abs();
    if ax < 1e-8 {
        1.0
    } else if ax < 1.0 {
        let pi_x = std::f32::consts::PI * ax;
        (pi_x.sin() / pi_x) * (0.54 + 0.46 * pi_x.cos())
    } else {
        0.0
    }
}

/// Bicubic (Mitchell-Netravali) weight function.
#[inline]
fn bicubic_weight(x: f32) -> f32 {
    // Mitchell-Netravali with B=1/3, C=1/3
    const B: f32 = 1.0 / 3.0;
    const C: f32 = 1.0 / 3.0;

    let ax = x.abs();
    if ax < 1.0 {
        ((12.0 - 9.0 * B - 6.0 * C) * ax * ax * ax
            + (-18.0 + 12.0 * B + 6.0 * C) * ax * ax
            + (6.0 - 2.0 * B))
            / 6.0
    } else if ax < 2.0 {
        ((-B - 6.0 * C) * ax * ax * ax
            + (6.0 * B + 30.0 * C) * ax * ax
            + (-12.0 * B - 48.0 * C) * ax
            + (8.0 * B + 24.0 * C))
            / 6.0
    } else {
        0.0
    }
}

/// Lanczos weight function.
#[inline]
fn lanczos_weight(x: f32, a: f32) -> f32 {
    let ax = x.abs();
    if ax < 1e-8 {
        1.0
    } else if ax < a {
        let pi_x = std::f32::consts::PI * ax;
        let pi_x_a = pi_x / a;
        (pi_x.sin() / pi_x) * (pi_x_a.sin() / pi_x_a)
    } else {
        0.0
    }
}

/// Source span and normalized weights for one destination sample.
struct Contrib {
    start: usize,
    weights: Vec<f32>,
}

fn contributions(src_len: usize, dst_len: usize, filter: Filter) -> Vec<Contrib> {
    let scale = src_len as f32 / dst_len as f32;

    if filter == Filter::Nearest {
        return (0..dst_len)
            .map(|x| Contrib {
                start: (((x as f32 + 0.5) * scale) as usize).min(src_len - 1),
                weights: vec![1.0],
            })
            .collect();
    }

    let fscale = scale.max(1.0);
    let support = filter.support() * fscale;

    (0..dst_len)
        .map(|x| {
            // Map destination x to source x
            let center = (x as f32 + 0.5) * scale - 0.5;
            let left = ((center - support).floor() as isize).max(0) as usize;
            let right = ((center + support).ceil().max(0.0) as usize).min(src_len - 1);

            let mut weights: Vec<f32> = (left..=right)
                .map(|sx| filter.weight((sx as f32 - center) / fscale))
                .collect();
            let sum: f32 = weights.iter().sum();

            if sum.abs() > 1e-8 {
                for w in &mut weights {
                    *w /= sum;
                }
                Contrib { start: left, weights }
            } else {
                let nearest = (center.round().max(0.0) as usize).min(src_len - 1);
                Contrib {
                    start: nearest,
                    weights: vec![1.0],
                }
            }
        })
        .collect()
}

/// Resizes f32 image data.
///
/// # Arguments
///
/// * `src` - Source pixel data
/// * `src_w` - Source width
/// * `src_h` - Source height
/// * `channels` - Number of interleaved channels
/// * `dst_w` - Destination width
/// * `dst_h` - Destination height
/// * `filter` - Resampling filter
///
/// # Example
///
/// ```rust
/// use layerkit_ops::resize::{resize_f32, Filter};
///
/// let src = vec![0.5f32; 16 * 16 * 4];
/// let dst = resize_f32(&src, 16, 16, 4, 32, 32, Filter::Bilinear).unwrap();
/// assert_eq!(dst.len(), 32 * 32 * 4);
/// ```
pub fn resize_f32(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_w: usize,
    dst_h: usize,
    filter: Filter,
) -> OpsResult<Vec<f32>> {
    trace!(src_w, src_h, dst_w, dst_h, channels, %filter, "resize_f32");

    // Validate inputs
    let expected = src_w * src_h * channels;
    if src.len() != expected {
        return Err(OpsError::InvalidDimensions(format!(
            "expected {} samples, got {}",
            expected,
            src.len()
        )));
    }
    if src_w == 0 || src_h == 0 {
        return Err(OpsError::InvalidDimensions("source size must be > 0".into()));
    }
    if dst_w == 0 || dst_h == 0 {
        return Err(OpsError::InvalidDimensions(
            "destination size must be > 0".into(),
        ));
    }

    // Two-pass separable resize: horizontal then vertical
    let temp = resize_horizontal(src, src_w, src_h, channels, dst_w, filter);
    let result = resize_vertical(&temp, dst_w, src_h, channels, dst_h, filter);

    Ok(result)
}

/// Horizontal resize pass.
fn resize_horizontal(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_w: usize,
    filter: Filter,
) -> Vec<f32> {
    let contribs = contributions(src_w, dst_w, filter);
    let mut dst = vec![0.0f32; dst_w * src_h * channels];

    for_each_row(&mut dst, dst_w * channels, |y, row| {
        let src_row = &src[y * src_w * channels..(y + 1) * src_w * channels];
        for (x, contrib) in contribs.iter().enumerate() {
            let out = &mut row[x * channels..(x + 1) * channels];
            for (k, &w) in contrib.weights.iter().enumerate() {
                let idx = (contrib.start + k) * channels;
                for c in 0..channels {
                    out[c] += src_row[idx + c] * w;
                }
            }
        }
    });

    dst
}

/// Vertical resize pass.
fn resize_vertical(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_h: usize,
    filter: Filter,
) -> Vec<f32> {
    let contribs = contributions(src_h, dst_h, filter);
    let row_len = src_w * channels;
    let mut dst = vec![0.0f32; row_len * dst_h];

    for_each_row(&mut dst, row_len, |y, row| {
        let contrib = &contribs[y];
        for (k, &w) in contrib.weights.iter().enumerate() {
            let src_row = &src[(contrib.start + k) * row_len..(contrib.start + k + 1) * row_len];
            for (out, &v) in row.iter_mut().zip(src_row) {
                *out += v * w;
            }
        }
    });

    dst
}

/// Resizes an image.
///
/// Resizing to the current size returns an unchanged copy.
///
/// # Example
///
/// ```rust
/// use layerkit_core::{Image, Rgb};
/// use layerkit_ops::resize::{resize, Filter};
///
/// let img = Image::solid(40, 20, Rgb([10, 200, 30]));
/// let out = resize(&img, 20, 10, Filter::Lanczos3).unwrap();
/// assert_eq!(out.dimensions(), (20, 10));
/// assert_eq!(out.pixel(5, 5), &[10, 200, 30]);
/// ```
pub fn resize(image: &Image, width: u32, height: u32, filter: Filter) -> OpsResult<Image> {
    if image.dimensions() == (width, height) && width > 0 && height > 0 {
        return Ok(image.clone());
    }
    debug!(
        from_w = image.width(),
        from_h = image.height(),
        to_w = width,
        to_h = height,
        %filter,
        "Resizing image"
    );
    let data = resize_f32(
        &image.to_f32(),
        image.width() as usize,
        image.height() as usize,
        image.channels(),
        width as usize,
        height as usize,
        filter,
    )?;
    Ok(Image::from_f32(width, height, image.layout(), &data)?)
}

/// How an image is conformed to a target size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FitMode {
    /// Scale both axes independently.
    Stretch,
    /// Scale to fit inside the target and pad with black bars.
    #[default]
    Letterbox,
    /// Crop the excess of the longer axis, then scale.
    Crop,
}

impl FromStr for FitMode {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stretch" | "fill" => Ok(FitMode::Stretch),
            "letterbox" => Ok(FitMode::Letterbox),
            "crop" => Ok(FitMode::Crop),
            _ => Err(OpsError::InvalidParameter(format!("unknown fit mode '{}'", s))),
        }
    }
}

/// Fits `image` into `target_w` x `target_h`.
///
/// - `Letterbox`: the scaled size truncates toward zero on the shorter axis
///   and the result is centered on a zero-filled (black) canvas.
/// - `Crop`: a centered window with the target aspect is cut out of the
///   source before scaling.
/// - `Stretch`: plain [`resize`].
///
/// # Errors
///
/// [`OpsError::InvalidDimensions`] for a zero target or an empty source.
///
/// # Example
///
/// ```rust
/// use layerkit_core::{Image, Rgb};
/// use layerkit_ops::resize::{fit_resize, Filter, FitMode};
///
/// let wide = Image::solid(200, 100, Rgb::WHITE);
/// let boxed = fit_resize(&wide, 100, 100, FitMode::Letterbox, Filter::Bilinear).unwrap();
/// assert_eq!(boxed.pixel(50, 0), &[0, 0, 0]);
/// assert_eq!(boxed.pixel(50, 50), &[255, 255, 255]);
/// ```
pub fn fit_resize(
    image: &Image,
    target_w: u32,
    target_h: u32,
    mode: FitMode,
    filter: Filter,
) -> OpsResult<Image> {
    if target_w == 0 || target_h == 0 {
        return Err(OpsError::InvalidDimensions(format!(
            "target size {}x{} must be > 0",
            target_w, target_h
        )));
    }
    let (src_w, src_h) = image.dimensions();
    if src_w == 0 || src_h == 0 {
        return Err(OpsError::InvalidDimensions("source image is empty".into()));
    }

    let src_aspect = src_w as f64 / src_h as f64;
    let target_aspect = target_w as f64 / target_h as f64;
    trace!(src_w, src_h, target_w, target_h, ?mode, "fit_resize");

    match mode {
        FitMode::Letterbox => {
            let (fit_w, fit_h) = if src_aspect > target_aspect {
                let h = (target_w as f64 / src_w as f64 * src_h as f64) as u32;
                (target_w, h.max(1))
            } else {
                let w = (target_h as f64 / src_h as f64 * src_w as f64) as u32;
                (w.max(1), target_h)
            };
            let fitted = resize(image, fit_w, fit_h, filter)?;
            let mut canvas = Image::new(target_w, target_h, image.layout());
            paste(
                &mut canvas,
                &fitted,
                ((target_w - fit_w) / 2) as i64,
                ((target_h - fit_h) / 2) as i64,
            );
            Ok(canvas)
        }
        FitMode::Crop => {
            let window = if src_aspect > target_aspect {
                let w = ((src_h as f64 * target_w as f64 / target_h as f64) as u32).clamp(1, src_w);
                Rect::new((src_w - w) / 2, 0, w, src_h)
            } else {
                let h = ((src_w as f64 * target_h as f64 / target_w as f64) as u32).clamp(1, src_h);
                Rect::new(0, (src_h - h) / 2, src_w, h)
            };
            let cropped = crop(image, window)?;
            resize(&cropped, target_w, target_h, filter)
        }
        FitMode::Stretch => resize(image, target_w, target_h, filter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layerkit_core::image::Layout;
    use layerkit_core::Rgb;

    #[test]
    fn test_filter_weights() {
        // Nearest at center
        assert!((Filter::Nearest.weight(0.0) - 1.0).abs() < 0.01);
        assert!((Filter::Nearest.weight(0.6) - 0.0).abs() < 0.01);
        assert_eq!(Filter::Box.weight(-0.5), 1.0);
        assert_eq!(Filter::Box.weight(0.5), 0.0);

        // Bilinear at center
        assert!((Filter::Bilinear.weight(0.0) - 1.0).abs() < 0.01);
        assert!((Filter::Bilinear.weight(0.5) - 0.5).abs() < 0.01);

        assert!((Filter::Hamming.weight(0.0) - 1.0).abs() < 0.01);
        assert_eq!(Filter::Hamming.weight(1.0), 0.0);

        // Lanczos at center
        assert!((Filter::Lanczos3.weight(0.0) - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_filter_names() {
        for f in Filter::ALL {
            assert_eq!(f.name().parse::<Filter>().unwrap(), f);
        }
        assert!("gaussian".parse::<Filter>().is_err());
    }

    #[test]
    fn test_resize_upscale_constant() {
        let src = vec![0.5f32; 4 * 4 * 4]; // 4x4 RGBA
        for filter in Filter::ALL {
            let dst = resize_f32(&src, 4, 4, 4, 10, 10, filter).unwrap();
            assert_eq!(dst.len(), 10 * 10 * 4);
            // Constant image should stay constant
            for v in dst {
                assert!((v - 0.5).abs() < 0.001, "{filter}: {v}");
            }
        }
    }

    #[test]
    fn test_resize_downscale_constant() {
        let src = vec![0.25f32; 64 * 64 * 3]; // 64x64 RGB
        let dst = resize_f32(&src, 64, 64, 3, 16, 16, Filter::Lanczos3).unwrap();
        assert_eq!(dst.len(), 16 * 16 * 3);
        for v in dst {
            assert!((v - 0.25).abs() < 0.001);
        }
    }

    #[test]
    fn test_nearest_picks_source_pixels() {
        let src = vec![0.0f32, 1.0];
        let dst = resize_f32(&src, 2, 1, 1, 5, 1, Filter::Nearest).unwrap();
        assert_eq!(dst, vec![0.0, 0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_resize_rejects_zero() {
        let src = vec![0.0f32; 4];
        assert!(resize_f32(&src, 2, 2, 1, 0, 2, Filter::Bilinear).is_err());
        assert!(resize_f32(&src, 2, 2, 1, 2, 2, Filter::Bilinear).is_ok());
        assert!(resize_f32(&src[..3], 2, 2, 1, 2, 2, Filter::Bilinear).is_err());
    }

    #[test]
    fn test_resize_same_size_is_copy() {
        let img = Image::from_data(3, 1, Layout::L, vec![0, 255, 0]).unwrap();
        assert_eq!(resize(&img, 3, 1, Filter::Bicubic).unwrap(), img);
    }

    #[test]
    fn test_letterbox_bars() {
        let img = Image::solid(200, 100, Rgb::WHITE);
        let out = fit_resize(&img, 100, 100, FitMode::Letterbox, Filter::Lanczos3).unwrap();
        assert_eq!(out.dimensions(), (100, 100));
        for x in [0, 50, 99] {
            for y in 0..25 {
                assert_eq!(out.pixel(x, y), &[0, 0, 0]);
                assert_eq!(out.pixel(x, 99 - y), &[0, 0, 0]);
            }
            for y in 25..75 {
                assert_eq!(out.pixel(x, y), &[255, 255, 255]);
            }
        }
    }

    #[test]
    fn test_letterbox_tall() {
        let img = Image::solid(50, 100, Rgb::WHITE);
        let out = fit_resize(&img, 100, 100, FitMode::Letterbox, Filter::Bilinear).unwrap();
        assert_eq!(out.pixel(10, 50), &[0, 0, 0]);
        assert_eq!(out.pixel(50, 50), &[255, 255, 255]);
        assert_eq!(out.pixel(80, 50), &[0, 0, 0]);
    }

    #[test]
    fn test_crop_fit_takes_center() {
        // Left third red, middle green, right third blue.
        let mut img = Image::new(300, 100, Layout::Rgb);
        for y in 0..100 {
            for x in 0..300 {
                let px = match x / 100 {
                    0 => [255, 0, 0],
                    1 => [0, 255, 0],
                    _ => [0, 0, 255],
                };
                img.set_pixel(x, y, &px).unwrap();
            }
        }
        let out = fit_resize(&img, 50, 50, FitMode::Crop, Filter::Box).unwrap();
        assert_eq!(out.dimensions(), (50, 50));
        assert_eq!(out.pixel(25, 25), &[0, 255, 0]);
    }

    #[test]
    fn test_stretch_and_errors() {
        let img = Image::solid(10, 10, Rgb([1, 2, 3]));
        let out = fit_resize(&img, 30, 5, FitMode::Stretch, Filter::Bilinear).unwrap();
        assert_eq!(out.dimensions(), (30, 5));
        assert!(matches!(
            fit_resize(&img, 0, 5, FitMode::Crop, Filter::Bilinear),
            Err(OpsError::InvalidDimensions(_))
        ));
        assert_eq!("letterbox".parse::<FitMode>().unwrap(), FitMode::Letterbox);
    }
}
