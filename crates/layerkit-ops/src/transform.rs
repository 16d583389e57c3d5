//! Geometric transformation operations.
//!
//! Provides crop, flip, rotate, shift, and other spatial transforms.
//!
//! # Operations
//!
//! - [`crop`] - Extract region of interest
//! - [`paste`] - Clipped copy of one image onto another
//! - [`flip_h`] / [`flip_v`] - Mirrors
//! - [`rotate_90_cw`] / [`rotate_90_ccw`] / [`rotate_180`] - Exact quarter turns
//! - [`rotate_expand`] - Arbitrary rotation on an enlarged canvas
//! - [`rotate_with_alpha`] - Rotate a layer and its mask together
//! - [`shift`] - Offset with wrap-around or background fill
//! - [`pad`] - Add border padding
//!
//! # Example
//!
//! ```rust
//! use layerkit_core::{Image, Rect, Rgb};
//! use layerkit_ops::transform::{crop, flip_h};
//!
//! let src = Image::solid(64, 64, Rgb([20, 40, 60]));
//!
//! // Flip horizontally
//! let flipped = flip_h(&src);
//!
//! // Crop center region
//! let cropped = crop(&flipped, Rect::new(16, 16, 32, 32)).unwrap();
//! assert_eq!(cropped.dimensions(), (32, 32));
//! ```

use crate::resize::{resize, Filter};
use crate::{OpsError, OpsResult};
use glam::{DAffine2, DVec2};
use layerkit_core::image::Layout;
use layerkit_core::{Image, Mask, Rect, Rgb};
use std::str::FromStr;
use tracing::{debug, trace};

/// Builds an image of the same layout from raw bytes whose length is
/// known to be consistent.
fn rebuild(width: u32, height: u32, layout: Layout, data: Vec<u8>) -> Image {
    let mut out = Image::new(width, height, layout);
    out.as_mut_slice().copy_from_slice(&data);
    out
}

/// Crops a region from the image.
///
/// # Errors
///
/// [`OpsError::InvalidDimensions`] if the region leaves the image.
///
/// # Example
///
/// ```rust
/// use layerkit_core::{Image, Rect, Rgb};
/// use layerkit_ops::transform::crop;
///
/// let src = Image::solid(64, 64, Rgb::WHITE);
/// let cropped = crop(&src, Rect::new(10, 10, 20, 20)).unwrap();
/// assert_eq!(cropped.as_slice().len(), 20 * 20 * 3);
/// ```
pub fn crop(image: &Image, region: Rect) -> OpsResult<Image> {
    let (src_w, src_h) = image.dimensions();
    // Validate bounds
    if region.x as u64 + region.width as u64 > src_w as u64
        || region.y as u64 + region.height as u64 > src_h as u64
    {
        return Err(OpsError::InvalidDimensions(format!(
            "crop region ({}, {}, {}x{}) exceeds image bounds {}x{}",
            region.x, region.y, region.width, region.height, src_w, src_h
        )));
    }

    let ch = image.channels();
    let src = image.as_slice();
    let row_len = region.width as usize * ch;
    let mut data = Vec::with_capacity(row_len * region.height as usize);

    for row in region.y..region.bottom() {
        let start = (row as usize * src_w as usize + region.x as usize) * ch;
        data.extend_from_slice(&src[start..start + row_len]);
    }

    Ok(rebuild(region.width, region.height, image.layout(), data))
}

/// Copies `src` onto `dst` with its top-left corner at `(x, y)`.
///
/// The source is converted to the destination layout; parts falling
/// outside `dst` are clipped.
///
/// ```rust
/// use layerkit_core::{Image, Rgb};
/// use layerkit_ops::transform::paste;
///
/// let mut canvas = Image::solid(4, 4, Rgb::BLACK);
/// paste(&mut canvas, &Image::solid(2, 2, Rgb::WHITE), 3, -1);
/// assert_eq!(canvas.pixel(3, 0), &[255, 255, 255]);
/// assert_eq!(canvas.pixel(3, 1), &[0, 0, 0]);
/// ```
pub fn paste(dst: &mut Image, src: &Image, x: i64, y: i64) {
    let src = src.to_layout(dst.layout());
    let (dw, dh) = (dst.width() as i64, dst.height() as i64);
    let (sw, sh) = (src.width() as i64, src.height() as i64);

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + sw).min(dw);
    let y1 = (y + sh).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let ch = dst.channels();
    let span = (x1 - x0) as usize * ch;
    let src_data = src.as_slice();
    let dst_data = dst.as_mut_slice();
    for dy in y0..y1 {
        let sy = dy - y;
        let s = ((sy * sw + (x0 - x)) as usize) * ch;
        let d = ((dy * dw + x0) as usize) * ch;
        dst_data[d..d + span].copy_from_slice(&src_data[s..s + span]);
    }
}

/// Flips image horizontally (mirror left-right).
///
/// # Example
///
/// ```rust
/// use layerkit_core::{Image, image::Layout};
/// use layerkit_ops::transform::flip_h;
///
/// let src = Image::from_data(2, 1, Layout::L, vec![1, 2]).unwrap();
/// assert_eq!(flip_h(&src).as_slice(), &[2, 1]);
/// ```
pub fn flip_h(image: &Image) -> Image {
    let (width, height) = (image.width() as usize, image.height() as usize);
    let ch = image.channels();
    let src = image.as_slice();
    let mut data = vec![0u8; src.len()];

    for y in 0..height {
        for x in 0..width {
            let src_idx = (y * width + x) * ch;
            let dst_idx = (y * width + (width - 1 - x)) * ch;
            data[dst_idx..dst_idx + ch].copy_from_slice(&src[src_idx..src_idx + ch]);
        }
    }

    rebuild(image.width(), image.height(), image.layout(), data)
}

/// Flips image vertically (mirror top-bottom).
pub fn flip_v(image: &Image) -> Image {
    let row_len = image.width() as usize * image.channels();
    let mut data = Vec::with_capacity(image.as_slice().len());
    if row_len > 0 {
        for row in image.as_slice().chunks_exact(row_len).rev() {
            data.extend_from_slice(row);
        }
    }
    rebuild(image.width(), image.height(), image.layout(), data)
}

/// Rotates image 90 degrees clockwise.
///
/// Output dimensions are swapped: (height, width).
pub fn rotate_90_cw(image: &Image) -> Image {
    let (width, height) = (image.width() as usize, image.height() as usize);
    let ch = image.channels();
    let src = image.as_slice();
    let mut data = vec![0u8; src.len()];

    for y in 0..height {
        for x in 0..width {
            let src_idx = (y * width + x) * ch;
            // New position: (height - 1 - y, x) in (new_w=height, new_h=width)
            let new_x = height - 1 - y;
            let new_y = x;
            let dst_idx = (new_y * height + new_x) * ch;
            data[dst_idx..dst_idx + ch].copy_from_slice(&src[src_idx..src_idx + ch]);
        }
    }

    rebuild(image.height(), image.width(), image.layout(), data)
}

/// Rotates image 90 degrees counter-clockwise.
pub fn rotate_90_ccw(image: &Image) -> Image {
    let (width, height) = (image.width() as usize, image.height() as usize);
    let ch = image.channels();
    let src = image.as_slice();
    let mut data = vec![0u8; src.len()];

    for y in 0..height {
        for x in 0..width {
            let src_idx = (y * width + x) * ch;
            let new_x = y;
            let new_y = width - 1 - x;
            let dst_idx = (new_y * height + new_x) * ch;
            data[dst_idx..dst_idx + ch].copy_from_slice(&src[src_idx..src_idx + ch]);
        }
    }

    rebuild(image.height(), image.width(), image.layout(), data)
}

/// Rotates image 180 degrees.
pub fn rotate_180(image: &Image) -> Image {
    let ch = image.channels().max(1);
    let mut data = Vec::with_capacity(image.as_slice().len());
    for px in image.as_slice().chunks_exact(ch).rev() {
        data.extend_from_slice(px);
    }
    rebuild(image.width(), image.height(), image.layout(), data)
}

/// Adds padding around the image.
///
/// Padding pixels take `fill` (opaque for RGBA images).
///
/// ```rust
/// use layerkit_core::{Image, Rgb};
/// use layerkit_ops::transform::pad;
///
/// let out = pad(&Image::solid(2, 2, Rgb::BLACK), 1, 2, 3, 4, Rgb::WHITE);
/// assert_eq!(out.dimensions(), (8, 6));
/// assert_eq!(out.pixel(0, 0), &[255, 255, 255]);
/// assert_eq!(out.pixel(4, 1), &[0, 0, 0]);
/// ```
pub fn pad(image: &Image, top: u32, right: u32, bottom: u32, left: u32, fill: Rgb) -> Image {
    let new_w = image.width() + left + right;
    let new_h = image.height() + top + bottom;
    let mut canvas = Image::new(new_w, new_h, image.layout());
    let px = fill.to_pixel(image.channels());
    for chunk in canvas.as_mut_slice().chunks_exact_mut(px.len()) {
        chunk.copy_from_slice(&px);
    }
    paste(&mut canvas, image, left as i64, top as i64);
    canvas
}

/// Interpolation used when resampling a rotated image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sampler {
    /// Pick the covering source pixel.
    Nearest,
    /// 2x2 linear interpolation.
    Bilinear,
    /// 4x4 cubic convolution (a = -0.5).
    Bicubic,
}

/// Named rotation quality preset.
///
/// Each preset pairs a resize [`Filter`] (used for supersampling) with a
/// rotation [`Sampler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RotateMethod {
    /// Lanczos resize, bicubic rotation.
    #[default]
    Lanczos,
    /// Bicubic resize and rotation.
    Bicubic,
    /// Hamming resize, bilinear rotation.
    Hamming,
    /// Bilinear resize and rotation.
    Bilinear,
    /// Box resize, nearest rotation.
    Box,
    /// Nearest resize and rotation.
    Nearest,
}

impl RotateMethod {
    /// `(resize filter, rotation sampler)` for this preset.
    pub const fn filters(self) -> (Filter, Sampler) {
        match self {
            RotateMethod::Lanczos => (Filter::Lanczos3, Sampler::Bicubic),
            RotateMethod::Bicubic => (Filter::Bicubic, Sampler::Bicubic),
            RotateMethod::Hamming => (Filter::Hamming, Sampler::Bilinear),
            RotateMethod::Bilinear => (Filter::Bilinear, Sampler::Bilinear),
            RotateMethod::Box => (Filter::Box, Sampler::Nearest),
            RotateMethod::Nearest => (Filter::Nearest, Sampler::Nearest),
        }
    }
}

impl FromStr for RotateMethod {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lanczos" => Ok(RotateMethod::Lanczos),
            "bicubic" => Ok(RotateMethod::Bicubic),
            "hamming" => Ok(RotateMethod::Hamming),
            "bilinear" => Ok(RotateMethod::Bilinear),
            "box" => Ok(RotateMethod::Box),
            "nearest" => Ok(RotateMethod::Nearest),
            _ => Err(OpsError::InvalidParameter(format!(
                "unknown rotate method '{}'",
                s
            ))),
        }
    }
}

fn round15(v: f64) -> f64 {
    (v * 1e15).round() / 1e15
}

/// Rotates `angle` degrees counter-clockwise on an expanded canvas.
///
/// The canvas grows to hold every corner of the rotated image
/// (`ceil(max) - floor(min)` on each axis); uncovered pixels are zero.
/// Multiples of 90 degrees use the exact quarter-turn transforms. With
/// `ssaa > 1` the image is upscaled by `ssaa`, rotated, then downscaled by
/// integer division of the rotated size.
///
/// # Example
///
/// ```rust
/// use layerkit_core::{Image, Rgb};
/// use layerkit_ops::transform::{rotate_expand, RotateMethod};
///
/// let img = Image::solid(10, 10, Rgb::WHITE);
/// let out = rotate_expand(&img, 45.0, 0, RotateMethod::Bilinear).unwrap();
/// assert_eq!(out.dimensions(), (16, 16));
/// assert_eq!(out.pixel(0, 0), &[0, 0, 0]);
/// assert_eq!(out.pixel(8, 8), &[255, 255, 255]);
/// ```
pub fn rotate_expand(image: &Image, angle: f64, ssaa: u32, method: RotateMethod) -> OpsResult<Image> {
    let angle = angle.rem_euclid(360.0);
    trace!(angle, ssaa, ?method, "rotate_expand");

    if angle == 0.0 {
        return Ok(image.clone());
    }
    if angle == 90.0 {
        return Ok(rotate_90_ccw(image));
    }
    if angle == 180.0 {
        return Ok(rotate_180(image));
    }
    if angle == 270.0 {
        return Ok(rotate_90_cw(image));
    }
    if image.is_empty() {
        return Err(OpsError::InvalidDimensions("cannot rotate an empty image".into()));
    }

    let (filter, sampler) = method.filters();
    if ssaa > 1 {
        debug!(ssaa, "Supersampled rotation");
        let up = resize(image, image.width() * ssaa, image.height() * ssaa, filter)?;
        let rotated = rotate_affine(&up, angle, sampler);
        let w = (rotated.width() / ssaa).max(1);
        let h = (rotated.height() / ssaa).max(1);
        resize(&rotated, w, h, filter)
    } else {
        Ok(rotate_affine(image, angle, sampler))
    }
}

/// Inverse-mapped rotation; `angle` in degrees, counter-clockwise.
fn rotate_affine(image: &Image, angle: f64, sampler: Sampler) -> Image {
    let (w, h) = (image.width() as f64, image.height() as f64);
    let theta = -angle.to_radians();
    let (cos, sin) = (round15(theta.cos()), round15(theta.sin()));

    // Output -> input mapping about the image center.
    let center = DVec2::new(w / 2.0, h / 2.0);
    let linear = DAffine2::from_cols_array(&[cos, -sin, sin, cos, 0.0, 0.0]);
    let mut inverse = DAffine2::from_translation(center) * linear * DAffine2::from_translation(-center);

    let corners = [
        DVec2::new(0.0, 0.0),
        DVec2::new(w, 0.0),
        DVec2::new(w, h),
        DVec2::new(0.0, h),
    ]
    .map(|p| inverse.transform_point2(p));
    let (mut min, mut max) = (corners[0], corners[0]);
    for p in &corners[1..] {
        min = min.min(*p);
        max = max.max(*p);
    }
    let new_w = (max.x.ceil() - min.x.floor()) as u32;
    let new_h = (max.y.ceil() - min.y.floor()) as u32;

    let offset = DVec2::new(-(new_w as f64 - w) / 2.0, -(new_h as f64 - h) / 2.0);
    inverse.translation = inverse.transform_point2(offset);
    trace!(new_w, new_h, ?sampler, "rotate_affine");

    let ch = image.channels();
    let mut out = Image::new(new_w, new_h, image.layout());
    let mut px = vec![0u8; ch];
    let row_len = new_w as usize * ch;
    for y in 0..new_h as usize {
        let row = &mut out.as_mut_slice()[y * row_len..(y + 1) * row_len];
        for x in 0..new_w as usize {
            let src = inverse.transform_point2(DVec2::new(x as f64 + 0.5, y as f64 + 0.5));
            if sample(image, src, sampler, &mut px) {
                row[x * ch..(x + 1) * ch].copy_from_slice(&px);
            }
        }
    }
    out
}

/// Samples `image` at continuous position `p`. Returns `false` outside.
fn sample(image: &Image, p: DVec2, sampler: Sampler, out: &mut [u8]) -> bool {
    let (w, h) = (image.width() as i64, image.height() as i64);
    if p.x < 0.0 || p.y < 0.0 || p.x >= w as f64 || p.y >= h as f64 {
        return false;
    }
    let ch = image.channels();
    let data = image.as_slice();
    let at = |x: i64, y: i64, c: usize| -> f64 {
        let x = x.clamp(0, w - 1) as usize;
        let y = y.clamp(0, h - 1) as usize;
        data[(y * w as usize + x) * ch + c] as f64
    };

    match sampler {
        Sampler::Nearest => {
            let (x, y) = (p.x as i64, p.y as i64);
            for (c, o) in out.iter_mut().enumerate() {
                *o = at(x, y, c) as u8;
            }
        }
        Sampler::Bilinear => {
            let q = p - DVec2::splat(0.5);
            let (x, y) = (q.x.floor() as i64, q.y.floor() as i64);
            let (dx, dy) = (q.x - x as f64, q.y - y as f64);
            for (c, o) in out.iter_mut().enumerate() {
                let top = at(x, y, c) + (at(x + 1, y, c) - at(x, y, c)) * dx;
                let bottom = at(x, y + 1, c) + (at(x + 1, y + 1, c) - at(x, y + 1, c)) * dx;
                *o = (top + (bottom - top) * dy).round().clamp(0.0, 255.0) as u8;
            }
        }
        Sampler::Bicubic => {
            let q = p - DVec2::splat(0.5);
            let (x, y) = (q.x.floor() as i64, q.y.floor() as i64);
            let wx = cubic_weights(q.x - x as f64);
            let wy = cubic_weights(q.y - y as f64);
            for (c, o) in out.iter_mut().enumerate() {
                let mut acc = 0.0;
                for (j, wyj) in wy.iter().enumerate() {
                    let mut row = 0.0;
                    for (i, wxi) in wx.iter().enumerate() {
                        row += at(x - 1 + i as i64, y - 1 + j as i64, c) * wxi;
                    }
                    acc += row * wyj;
                }
                *o = acc.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
    true
}

/// Keys cubic convolution weights for taps at -1, 0, 1, 2.
fn cubic_weights(t: f64) -> [f64; 4] {
    const A: f64 = -0.5;
    let near = |d: f64| ((A + 2.0) * d - (A + 3.0)) * d * d + 1.0;
    let far = |d: f64| ((A * d - 5.0 * A) * d + 8.0 * A) * d - 4.0 * A;
    [far(t + 1.0), near(t), near(1.0 - t), far(2.0 - t)]
}

/// A rotated layer: color, mask, and their combination.
#[derive(Debug, Clone)]
pub struct RotatedLayer {
    /// Rotated color image (RGB).
    pub image: Image,
    /// Rotated mask.
    pub alpha: Mask,
    /// `image` with `alpha` attached (RGBA).
    pub composite: Image,
}

/// Rotates an image and its mask with identical geometry.
///
/// # Errors
///
/// [`OpsError::SizeMismatch`] when `alpha` doesn't match the image size.
pub fn rotate_with_alpha(
    image: &Image,
    angle: f64,
    alpha: &Mask,
    method: RotateMethod,
    ssaa: u32,
) -> OpsResult<RotatedLayer> {
    if image.dimensions() != alpha.dimensions() {
        return Err(OpsError::size_mismatch(image.dimensions(), alpha.dimensions()));
    }
    let image = rotate_expand(&image.to_rgb(), angle, ssaa, method)?;
    let alpha = Mask::from_image(&rotate_expand(&alpha.to_image(), angle, ssaa, method)?);
    let composite = image.with_alpha(&alpha)?;
    Ok(RotatedLayer {
        image,
        alpha,
        composite,
    })
}

/// How [`shift`] treats pixels moved in from outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShiftMode {
    /// Wrap around the opposite edge.
    #[default]
    Cyclic,
    /// Fill with the background color.
    Clipped,
}

/// Offsets the image content.
///
/// Output pixel `(x, y)` is taken from source `(x + dx, y + dy)`, so
/// positive offsets move the content up and to the left.
///
/// ```rust
/// use layerkit_core::{Image, image::Layout, Rgb};
/// use layerkit_ops::transform::{shift, ShiftMode};
///
/// let img = Image::from_data(3, 1, Layout::L, vec![1, 2, 3]).unwrap();
/// let wrapped = shift(&img, 1, 0, Rgb::BLACK, ShiftMode::Cyclic);
/// assert_eq!(wrapped.as_slice(), &[2, 3, 1]);
/// let clipped = shift(&img, 1, 0, Rgb::BLACK, ShiftMode::Clipped);
/// assert_eq!(clipped.as_slice(), &[2, 3, 0]);
/// ```
pub fn shift(image: &Image, dx: i64, dy: i64, background: Rgb, mode: ShiftMode) -> Image {
    trace!(dx, dy, ?mode, "shift");
    let (w, h) = (image.width() as i64, image.height() as i64);
    let ch = image.channels();
    let bg = background.to_pixel(ch);
    let src = image.as_slice();
    let mut out = Image::new(image.width(), image.height(), image.layout());
    let dst = out.as_mut_slice();

    for y in 0..h {
        for x in 0..w {
            let (sx, sy) = match mode {
                ShiftMode::Cyclic => ((x + dx).rem_euclid(w), (y + dy).rem_euclid(h)),
                ShiftMode::Clipped => (x + dx, y + dy),
            };
            let d = ((y * w + x) as usize) * ch;
            if (0..w).contains(&sx) && (0..h).contains(&sy) {
                let s = ((sy * w + sx) as usize) * ch;
                dst[d..d + ch].copy_from_slice(&src[s..s + ch]);
            } else {
                dst[d..d + ch].copy_from_slice(&bg);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(width: u32, height: u32) -> Image {
        let data = (0..width * height).map(|i| (i % 256) as u8).collect();
        Image::from_data(width, height, Layout::L, data).unwrap()
    }

    #[test]
    fn test_crop() {
        let src = ramp(4, 4);
        let out = crop(&src, Rect::new(1, 1, 2, 2)).unwrap();
        assert_eq!(out.as_slice(), &[5, 6, 9, 10]);
        assert!(crop(&src, Rect::new(3, 3, 2, 2)).is_err());
    }

    #[test]
    fn test_flip_h() {
        // 2x1 image: [A, B] -> [B, A]
        let src = Image::from_data(2, 1, Layout::Rgb, vec![1, 0, 0, 0, 1, 0]).unwrap();
        let dst = flip_h(&src);
        assert_eq!(dst.as_slice(), &[0, 1, 0, 1, 0, 0]);
    }

    #[test]
    fn test_flip_v() {
        let dst = flip_v(&ramp(2, 2));
        assert_eq!(dst.as_slice(), &[2, 3, 0, 1]);
    }

    #[test]
    fn test_quarter_turns() {
        // [0 1 2]
        // [3 4 5]
        let src = ramp(3, 2);
        let cw = rotate_90_cw(&src);
        assert_eq!(cw.dimensions(), (2, 3));
        assert_eq!(cw.as_slice(), &[3, 0, 4, 1, 5, 2]);
        let ccw = rotate_90_ccw(&src);
        assert_eq!(ccw.as_slice(), &[2, 5, 1, 4, 0, 3]);
        assert_eq!(rotate_90_cw(&ccw), src);
        assert_eq!(rotate_180(&src).as_slice(), &[5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_rotate_identity_angles() {
        let src = ramp(5, 3);
        for angle in [0.0, 360.0, -360.0, 720.0] {
            assert_eq!(rotate_expand(&src, angle, 0, RotateMethod::Lanczos).unwrap(), src);
        }
    }

    #[test]
    fn test_rotate_exact_quarters() {
        let src = ramp(5, 3);
        let m = RotateMethod::Bicubic;
        assert_eq!(rotate_expand(&src, 90.0, 4, m).unwrap(), rotate_90_ccw(&src));
        assert_eq!(rotate_expand(&src, 180.0, 0, m).unwrap(), rotate_180(&src));
        assert_eq!(rotate_expand(&src, 270.0, 0, m).unwrap(), rotate_90_cw(&src));
        assert_eq!(rotate_expand(&src, -90.0, 0, m).unwrap(), rotate_90_cw(&src));
    }

    #[test]
    fn test_rotate_expands_canvas() {
        let src = Image::solid(100, 50, Rgb::WHITE);
        let out = rotate_expand(&src, 30.0, 0, RotateMethod::Nearest).unwrap();
        // |100 cos30| + |50 sin30| = 111.6, |100 sin30| + |50 cos30| = 93.3
        assert!(out.width() >= 112 && out.width() <= 113);
        assert!(out.height() >= 94 && out.height() <= 95);
        assert_eq!(out.pixel(0, 0), &[0, 0, 0]);
        let (cx, cy) = (out.width() / 2, out.height() / 2);
        assert_eq!(out.pixel(cx, cy), &[255, 255, 255]);
    }

    #[test]
    fn test_rotate_ssaa_size() {
        let src = Image::solid(10, 10, Rgb::WHITE);
        let plain = rotate_expand(&src, 45.0, 0, RotateMethod::Bilinear).unwrap();
        let ssaa = rotate_expand(&src, 45.0, 2, RotateMethod::Bilinear).unwrap();
        assert_eq!(plain.dimensions(), (16, 16));
        // 20x20 rotated -> 30x30, halved -> 15x15
        assert_eq!(ssaa.dimensions(), (15, 15));
    }

    #[test]
    fn test_rotate_with_alpha() {
        let img = Image::solid(8, 4, Rgb([200, 10, 10]));
        let alpha = Mask::filled(8, 4, Mask::MAX);
        let layer = rotate_with_alpha(&img, 90.0, &alpha, RotateMethod::Lanczos, 0).unwrap();
        assert_eq!(layer.image.dimensions(), (4, 8));
        assert_eq!(layer.alpha.dimensions(), (4, 8));
        assert_eq!(layer.composite.pixel(1, 1), &[200, 10, 10, 255]);

        let wrong = Mask::new(3, 3);
        assert!(rotate_with_alpha(&img, 10.0, &wrong, RotateMethod::Lanczos, 0).is_err());
    }

    #[test]
    fn test_shift_modes() {
        let src = ramp(3, 3);
        let cyc = shift(&src, -1, 1, Rgb::BLACK, ShiftMode::Cyclic);
        assert_eq!(cyc.as_slice(), &[5, 3, 4, 8, 6, 7, 2, 0, 1]);

        let clipped = shift(&src, 1, 1, Rgb::WHITE, ShiftMode::Clipped);
        assert_eq!(clipped.as_slice(), &[4, 5, 255, 7, 8, 255, 255, 255, 255]);

        // Row and column zero of the source stay reachable.
        let back = shift(&src, -1, -1, Rgb::BLACK, ShiftMode::Clipped);
        assert_eq!(back.pixel(1, 1), &[0]);
    }

    #[test]
    fn test_rotate_method_table() {
        assert_eq!(
            "lanczos".parse::<RotateMethod>().unwrap().filters(),
            (Filter::Lanczos3, Sampler::Bicubic)
        );
        assert_eq!(RotateMethod::Box.filters(), (Filter::Box, Sampler::Nearest));
        assert!("spline".parse::<RotateMethod>().is_err());
    }
}
