//! Two-color gradients.
//!
//! [`create_gradient`] builds a plain vertical ramp; [`gradient`] turns it
//! into an arbitrarily angled fill by rotating an oversized band canvas and
//! cropping its center.

use crate::resize::{resize, Filter};
use crate::transform::{crop, paste, rotate_expand, RotateMethod};
use crate::{OpsError, OpsResult};
use layerkit_core::{Image, Rect, Rgb};
use tracing::trace;

/// Vertical ramp from `start` (top) to `end` (bottom).
///
/// Row `i` holds `start * (h - i) / h + end * i / h`, truncated per channel.
///
/// ```rust
/// use layerkit_core::Rgb;
/// use layerkit_ops::gradient::create_gradient;
///
/// let g = create_gradient(Rgb::BLACK, Rgb::WHITE, 1, 4);
/// assert_eq!(g.pixel(0, 0), &[0, 0, 0]);
/// assert_eq!(g.pixel(0, 2), &[127, 127, 127]);
/// ```
pub fn create_gradient(start: Rgb, end: Rgb, width: u32, height: u32) -> Image {
    let mut img = Image::solid(width, height, start);
    let row_len = width as usize * 3;
    let h = height as f64;

    for (i, row) in img.as_mut_slice().chunks_exact_mut(row_len.max(1)).enumerate() {
        let i = i as f64;
        let mut px = [0u8; 3];
        for c in 0..3 {
            let v = start.0[c] as f64 * (h - i) / h + end.0[c] as f64 * i / h;
            px[c] = v as u8;
        }
        for chunk in row.chunks_exact_mut(3) {
            chunk.copy_from_slice(&px);
        }
    }
    img
}

/// Gradient fill of `width` x `height` running at `angle` degrees.
///
/// At angle 0 the ramp runs from `start` at the top to `end` at the bottom;
/// positive angles turn it counter-clockwise.
///
/// # Errors
///
/// [`OpsError::InvalidDimensions`] when `(width + height) / 4` is zero.
///
/// ```rust
/// use layerkit_core::Rgb;
/// use layerkit_ops::gradient::gradient;
///
/// let g = gradient(Rgb::BLACK, Rgb::WHITE, 64, 64, 0.0).unwrap();
/// assert_eq!(g.dimensions(), (64, 64));
/// assert!(g.pixel(32, 2)[0] < g.pixel(32, 61)[0]);
/// ```
pub fn gradient(start: Rgb, end: Rgb, width: u32, height: u32, angle: f64) -> OpsResult<Image> {
    let radius = (width + height) / 4;
    if radius == 0 {
        return Err(OpsError::InvalidDimensions(format!(
            "gradient size {}x{} is too small",
            width, height
        )));
    }
    trace!(width, height, angle, radius, "gradient");

    // Solid start band, ramp, solid end band.
    let mut bands = Image::solid(radius, radius * 3, start);
    paste(&mut bands, &create_gradient(start, end, radius, radius), 0, radius as i64);
    paste(&mut bands, &Image::solid(radius, radius, end), 0, (radius * 2) as i64);

    let square = resize(&bands, radius * 3, radius * 3, Filter::Bicubic)?;
    let rotated = rotate_expand(&square, angle, 0, RotateMethod::Lanczos)?;

    let center = rotated.width() / 2;
    let (half_w, half_h) = (width / 3, height / 3);
    let window = Rect::new(
        center.saturating_sub(half_w),
        center.saturating_sub(half_h),
        (half_w * 2).max(1),
        (half_h * 2).max(1),
    );
    let window = window
        .intersect(&Rect::from_size(rotated.width(), rotated.height()))
        .unwrap_or_else(|| Rect::new(center, center, 1, 1));
    let cut = crop(&rotated, window)?;
    resize(&cut, width, height, Filter::Bicubic)
}
