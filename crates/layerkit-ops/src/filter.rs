//! Image filtering and convolution operations.
//!
//! Provides blur, morphology and edge-preserving smoothing.
//!
//! # Kernels
//!
//! - [`Kernel::new`] - Arbitrary odd-sized weights
//! - [`Kernel::motion`] - Rotated line for directional blur
//!
//! # Filters
//!
//! - [`convolve`] - Generic 2D correlation with clamped edges
//! - [`gaussian_blur`] / [`gaussian_blur_mask`] - Separable gaussian
//! - [`motion_blur`] - Directional smear with contrast stretch
//! - [`dilate`] / [`erode`] - Grey morphology with a [`Footprint`]
//! - [`bilateral`] - Edge-preserving smoothing
//! - [`recursive_filter`] - Domain-transform edge-preserving filter
//! - [`gradient_magnitude`] - Sobel magnitude summed over channels
//!
//! # Example
//!
//! ```rust
//! use layerkit_ops::filter::{convolve, Kernel};
//!
//! let src = vec![0.5f32; 16 * 16 * 3];
//! let kernel = Kernel::new(vec![1.0 / 9.0; 9], 3, 3).unwrap();
//! let blurred = convolve(&src, 16, 16, 3, &kernel).unwrap();
//! assert_eq!(blurred.len(), src.len());
//! ```

use crate::color::map_color;
use crate::parallel::for_each_row;
use crate::{OpsError, OpsResult};
use layerkit_core::{Image, Mask};
use tracing::{debug, trace};

/// Convolution kernel for image filtering.
///
/// The anchor is `(width / 2, height / 2)`, also for even sizes.
#[derive(Debug, Clone)]
pub struct Kernel {
    /// Kernel weights.
    pub data: Vec<f32>,
    /// Kernel width.
    pub width: usize,
    /// Kernel height.
    pub height: usize,
}

impl Kernel {
    /// Creates a new kernel from data.
    ///
    /// Width and height must be odd numbers.
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> OpsResult<Self> {
        if width % 2 == 0 || height % 2 == 0 {
            return Err(OpsError::InvalidParameter(
                "kernel dimensions must be odd".into(),
            ));
        }
        if data.len() != width * height {
            return Err(OpsError::InvalidParameter(format!(
                "kernel data size {} doesn't match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self { data, width, height })
    }

    /// Line kernel for motion blur.
    ///
    /// A `5 * blur` square holding the main diagonal is rotated by
    /// `angle + 45` degrees about `(blur / 2, blur / 2)` with bilinear
    /// resampling, then divided by `blur`. Returns `None` for `blur == 0`.
    ///
    /// ```rust
    /// use layerkit_ops::filter::Kernel;
    ///
    /// let k = Kernel::motion(2, 0.0).unwrap();
    /// assert_eq!((k.width, k.height), (10, 10));
    /// assert!(Kernel::motion(0, 30.0).is_none());
    /// ```
    pub fn motion(blur: u32, angle: f64) -> Option<Self> {
        if blur == 0 {
            return None;
        }
        let n = 5 * blur as usize;
        let c = blur as f64 / 2.0;
        let theta = (angle + 45.0).to_radians();
        let (alpha, beta) = (theta.cos(), theta.sin());
        // Forward rotation translation; the sampler walks the inverse.
        let tx = (1.0 - alpha) * c - beta * c;
        let ty = beta * c + (1.0 - alpha) * c;

        let diag = |i: i64, j: i64| -> f64 {
            if i == j && (0..n as i64).contains(&i) { 1.0 } else { 0.0 }
        };

        let mut data = Vec::with_capacity(n * n);
        for y in 0..n {
            for x in 0..n {
                let (px, py) = (x as f64 - tx, y as f64 - ty);
                let sx = alpha * px - beta * py;
                let sy = beta * px + alpha * py;
                let (x0, y0) = (sx.floor() as i64, sy.floor() as i64);
                let (fx, fy) = (sx - x0 as f64, sy - y0 as f64);
                let v = diag(x0, y0) * (1.0 - fx) * (1.0 - fy)
                    + diag(x0 + 1, y0) * fx * (1.0 - fy)
                    + diag(x0, y0 + 1) * (1.0 - fx) * fy
                    + diag(x0 + 1, y0 + 1) * fx * fy;
                data.push((v / blur as f64) as f32);
            }
        }
        Some(Self { data, width: n, height: n })
    }

    /// Returns the kernel radius (half-size).
    #[inline]
    pub fn radius(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }
}

fn check_len(src: &[f32], width: usize, height: usize, channels: usize) -> OpsResult<()> {
    let expected = width * height * channels;
    if src.len() != expected {
        return Err(OpsError::InvalidDimensions(format!(
            "expected {} samples, got {}",
            expected,
            src.len()
        )));
    }
    Ok(())
}

#[inline]
fn clamp_coord(v: isize, len: usize) -> usize {
    v.clamp(0, len as isize - 1) as usize
}

/// Applies convolution filter to image.
///
/// # Arguments
///
/// * `src` - Source pixel data
/// * `width` - Image width
/// * `height` - Image height
/// * `channels` - Number of channels
/// * `kernel` - Convolution kernel
///
/// # Returns
///
/// Filtered image as Vec<f32>.
///
/// # Example
///
/// ```rust
/// use layerkit_ops::filter::{convolve, Kernel};
///
/// let src = vec![0.5f32; 8 * 8 * 3];
/// let kernel = Kernel::motion(1, 30.0).unwrap();
/// let result = convolve(&src, 8, 8, 3, &kernel).unwrap();
/// assert_eq!(result.len(), 8 * 8 * 3);
/// ```
pub fn convolve(
    src: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    kernel: &Kernel,
) -> OpsResult<Vec<f32>> {
    trace!(width, height, channels, kernel_w = kernel.width, kernel_h = kernel.height, "convolve");
    check_len(src, width, height, channels)?;

    let mut dst = vec![0.0f32; src.len()];
    let (rx, ry) = kernel.radius();

    for_each_row(&mut dst, width * channels, |y, row| {
        for x in 0..width {
            let out = &mut row[x * channels..(x + 1) * channels];
            for ky in 0..kernel.height {
                // Source coordinates with edge clamping
                let sy = clamp_coord(y as isize + ky as isize - ry as isize, height);
                for kx in 0..kernel.width {
                    let kw = kernel.data[ky * kernel.width + kx];
                    if kw == 0.0 {
                        continue;
                    }
                    let sx = clamp_coord(x as isize + kx as isize - rx as isize, width);
                    let src_idx = (sy * width + sx) * channels;
                    for c in 0..channels {
                        out[c] += src[src_idx + c] * kw;
                    }
                }
            }
        }
    });

    Ok(dst)
}

/// Normalized 1D gaussian taps, radius `ceil(3 * sigma)`.
fn gaussian_taps(sigma: f32) -> Vec<f32> {
    let radius = (3.0 * sigma).ceil().max(1.0) as isize;
    let sigma2 = 2.0 * sigma * sigma;
    let mut taps: Vec<f32> = (-radius..=radius)
        .map(|i| (-((i * i) as f32) / sigma2).exp())
        .collect();
    let sum: f32 = taps.iter().sum();
    for t in &mut taps {
        *t /= sum;
    }
    taps
}

/// Separable gaussian blur of raw samples.
///
/// `sigma <= 0` returns the input unchanged.
pub fn gaussian_blur_f32(
    src: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    sigma: f32,
) -> OpsResult<Vec<f32>> {
    check_len(src, width, height, channels)?;
    if sigma <= 0.0 || src.is_empty() {
        return Ok(src.to_vec());
    }
    trace!(width, height, channels, sigma, "gaussian_blur_f32");

    let taps = gaussian_taps(sigma);
    let r = (taps.len() / 2) as isize;
    let row_len = width * channels;

    let mut tmp = vec![0.0f32; src.len()];
    for_each_row(&mut tmp, row_len, |y, row| {
        let src_row = &src[y * row_len..(y + 1) * row_len];
        for x in 0..width {
            for (k, &t) in taps.iter().enumerate() {
                let sx = clamp_coord(x as isize + k as isize - r, width);
                for c in 0..channels {
                    row[x * channels + c] += src_row[sx * channels + c] * t;
                }
            }
        }
    });

    let mut dst = vec![0.0f32; src.len()];
    for_each_row(&mut dst, row_len, |y, row| {
        for (k, &t) in taps.iter().enumerate() {
            let sy = clamp_coord(y as isize + k as isize - r, height);
            let src_row = &tmp[sy * row_len..(sy + 1) * row_len];
            for (o, &v) in row.iter_mut().zip(src_row) {
                *o += v * t;
            }
        }
    });

    Ok(dst)
}

/// Gaussian blur of every channel of an image.
///
/// ```rust
/// use layerkit_core::{Image, Rgb};
/// use layerkit_ops::filter::gaussian_blur;
///
/// let img = Image::solid(16, 16, Rgb([90, 90, 90]));
/// assert_eq!(gaussian_blur(&img, 2.0).unwrap(), img);
/// ```
pub fn gaussian_blur(image: &Image, sigma: f32) -> OpsResult<Image> {
    let data = gaussian_blur_f32(
        &image.to_f32(),
        image.width() as usize,
        image.height() as usize,
        image.channels(),
        sigma,
    )?;
    Ok(Image::from_f32(image.width(), image.height(), image.layout(), &data)?)
}

/// Gaussian blur of a mask, quantized back to 8-bit levels.
pub fn gaussian_blur_mask(mask: &Mask, sigma: f32) -> OpsResult<Mask> {
    let data = gaussian_blur_f32(
        &mask.to_unit(),
        mask.width() as usize,
        mask.height() as usize,
        1,
        sigma,
    )?;
    Ok(Mask::from_unit(mask.width(), mask.height(), &data)?)
}

/// Directional blur along `angle` degrees with strength `blur`.
///
/// The result is contrast-stretched so its darkest sample maps to 0 and its
/// brightest to 255. Alpha is left untouched; `blur == 0` is a no-op.
pub fn motion_blur(image: &Image, angle: f64, blur: u32) -> OpsResult<Image> {
    let Some(kernel) = Kernel::motion(blur, angle) else {
        return Ok(image.clone());
    };
    debug!(angle, blur, size = kernel.width, "Motion blur");

    map_color(image, |color| {
        let (w, h, ch) = (color.width() as usize, color.height() as usize, color.channels());
        let mut data = convolve(&color.to_f32(), w, h, ch, &kernel)?;

        let (min, max) = data
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if max - min > f32::EPSILON {
            for v in &mut data {
                *v = (*v - min) / (max - min);
            }
        }
        Ok(Image::from_f32(color.width(), color.height(), color.layout(), &data)?)
    })
}

/// Shape of the structuring element used by [`dilate`] and [`erode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Footprint {
    /// Plus shape: the center row and column.
    #[default]
    Cross,
    /// Full `(2r + 1)` square.
    Square,
}

impl Footprint {
    #[inline]
    fn covers(self, dx: isize, dy: isize) -> bool {
        match self {
            Footprint::Cross => dx == 0 || dy == 0,
            Footprint::Square => true,
        }
    }
}

/// Morphological dilation - expands bright regions.
///
/// # Arguments
///
/// * `src` - Source pixel data
/// * `width` - Image width
/// * `height` - Image height
/// * `channels` - Number of channels
/// * `radius` - Structuring element radius
/// * `footprint` - Structuring element shape
///
/// # Example
///
/// ```rust
/// use layerkit_ops::filter::{dilate, Footprint};
///
/// let mut src = vec![0.0f32; 5 * 5];
/// src[12] = 1.0;
/// let result = dilate(&src, 5, 5, 1, 1, Footprint::Cross).unwrap();
/// assert_eq!(result.iter().filter(|&&v| v == 1.0).count(), 5);
/// ```
pub fn dilate(
    src: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    radius: usize,
    footprint: Footprint,
) -> OpsResult<Vec<f32>> {
    morphology_op(src, width, height, channels, radius, footprint, true)
}

/// Morphological erosion - shrinks bright regions.
///
/// See [`dilate`] for the arguments.
pub fn erode(
    src: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    radius: usize,
    footprint: Footprint,
) -> OpsResult<Vec<f32>> {
    morphology_op(src, width, height, channels, radius, footprint, false)
}

/// Internal morphology operation.
fn morphology_op(
    src: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    radius: usize,
    footprint: Footprint,
    is_dilate: bool,
) -> OpsResult<Vec<f32>> {
    check_len(src, width, height, channels)?;

    let mut dst = vec![0.0f32; src.len()];
    let r = radius as isize;

    for_each_row(&mut dst, width * channels, |y, row| {
        for x in 0..width {
            for c in 0..channels {
                let mut val = if is_dilate { f32::MIN } else { f32::MAX };

                for dy in -r..=r {
                    let sy = clamp_coord(y as isize + dy, height);
                    for dx in -r..=r {
                        if !footprint.covers(dx, dy) {
                            continue;
                        }
                        let sx = clamp_coord(x as isize + dx, width);
                        let v = src[(sy * width + sx) * channels + c];
                        val = if is_dilate { val.max(v) } else { val.min(v) };
                    }
                }

                row[x * channels + c] = val;
            }
        }
    });

    Ok(dst)
}

/// Bilateral filter on samples in `[0, 1]`.
///
/// Color distance is the sum of absolute channel differences in 8-bit
/// units. `d <= 0` derives the radius from `sigma_space`; non-positive
/// sigmas fall back to 1.
pub fn bilateral(
    src: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    d: i32,
    sigma_color: f32,
    sigma_space: f32,
) -> OpsResult<Vec<f32>> {
    check_len(src, width, height, channels)?;
    let sigma_color = if sigma_color <= 0.0 { 1.0 } else { sigma_color };
    let sigma_space = if sigma_space <= 0.0 { 1.0 } else { sigma_space };
    let radius = if d <= 0 {
        (sigma_space * 1.5).round() as isize
    } else {
        (d / 2) as isize
    };
    let radius = radius.max(1);
    trace!(width, height, radius, sigma_color, sigma_space, "bilateral");

    let color_coeff = -0.5 / (sigma_color * sigma_color);
    let space_coeff = -0.5 / (sigma_space * sigma_space);
    let mut offsets = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let r2 = (dx * dx + dy * dy) as f32;
            if r2 <= (radius * radius) as f32 {
                offsets.push((dx, dy, (r2 * space_coeff).exp()));
            }
        }
    }

    let mut dst = vec![0.0f32; src.len()];
    for_each_row(&mut dst, width * channels, |y, row| {
        let mut acc = vec![0.0f32; channels];
        for x in 0..width {
            let center = &src[(y * width + x) * channels..(y * width + x + 1) * channels];
            acc.fill(0.0);
            let mut wsum = 0.0f32;
            for &(dx, dy, ws) in &offsets {
                let sx = clamp_coord(x as isize + dx, width);
                let sy = clamp_coord(y as isize + dy, height);
                let px = &src[(sy * width + sx) * channels..(sy * width + sx + 1) * channels];
                let dist: f32 = px.iter().zip(center).map(|(a, b)| (a - b).abs() * 255.0).sum();
                let w = ws * (dist * dist * color_coeff).exp();
                for (a, &v) in acc.iter_mut().zip(px) {
                    *a += v * w;
                }
                wsum += w;
            }
            for (o, a) in row[x * channels..(x + 1) * channels].iter_mut().zip(&acc) {
                *o = a / wsum;
            }
        }
    });

    Ok(dst)
}

/// Domain-transform recursive edge-preserving filter.
///
/// Three horizontal/vertical iterations with shrinking sigma. `sigma_s` is
/// the spatial extent in pixels, `sigma_r` the range extent on samples in
/// `[0, 1]`.
pub fn recursive_filter(
    src: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    sigma_s: f32,
    sigma_r: f32,
) -> OpsResult<Vec<f32>> {
    check_len(src, width, height, channels)?;
    if sigma_s <= 0.0 || sigma_r <= 0.0 {
        return Err(OpsError::InvalidParameter(format!(
            "sigma_s {} and sigma_r {} must be > 0",
            sigma_s, sigma_r
        )));
    }
    trace!(width, height, sigma_s, sigma_r, "recursive_filter");
    let ratio = sigma_s / sigma_r;
    let at = |x: usize, y: usize| &src[(y * width + x) * channels..(y * width + x + 1) * channels];
    let diff = |a: &[f32], b: &[f32]| -> f32 { a.iter().zip(b).map(|(p, q)| (p - q).abs()).sum() };

    // Domain derivatives: dh[x] couples x-1 and x, dv[y] couples y-1 and y.
    let mut dh = vec![1.0f32; width * height];
    let mut dv = vec![1.0f32; width * height];
    for y in 0..height {
        for x in 0..width {
            if x > 0 {
                dh[y * width + x] += ratio * diff(at(x, y), at(x - 1, y));
            }
            if y > 0 {
                dv[y * width + x] += ratio * diff(at(x, y), at(x, y - 1));
            }
        }
    }

    const ITERATIONS: i32 = 3;
    let mut out = src.to_vec();
    let row_len = width * channels;
    for i in 0..ITERATIONS {
        let sigma_i = sigma_s * 3f32.sqrt() * 2f32.powi(ITERATIONS - i - 1)
            / (4f32.powi(ITERATIONS) - 1.0).sqrt();
        let a = (-(2f32.sqrt()) / sigma_i).exp();

        for_each_row(&mut out, row_len, |y, row| {
            let d = &dh[y * width..(y + 1) * width];
            for x in 1..width {
                let v = a.powf(d[x]);
                for c in 0..channels {
                    let prev = row[(x - 1) * channels + c];
                    let cur = &mut row[x * channels + c];
                    *cur += v * (prev - *cur);
                }
            }
            for x in (0..width.saturating_sub(1)).rev() {
                let v = a.powf(d[x + 1]);
                for c in 0..channels {
                    let next = row[(x + 1) * channels + c];
                    let cur = &mut row[x * channels + c];
                    *cur += v * (next - *cur);
                }
            }
        });

        for y in 1..height {
            let (before, rest) = out.split_at_mut(y * row_len);
            let prev = &before[(y - 1) * row_len..];
            for (x, (cur, &p)) in rest[..row_len].iter_mut().zip(prev).enumerate() {
                let v = a.powf(dv[y * width + x / channels]);
                *cur += v * (p - *cur);
            }
        }
        for y in (0..height.saturating_sub(1)).rev() {
            let (head, after) = out.split_at_mut((y + 1) * row_len);
            let cur_row = &mut head[y * row_len..];
            for (x, (cur, &n)) in cur_row.iter_mut().zip(&after[..row_len]).enumerate() {
                let v = a.powf(dv[(y + 1) * width + x / channels]);
                *cur += v * (n - *cur);
            }
        }
    }

    Ok(out)
}

/// Sobel gradient magnitude, summed over channels.
///
/// Returns one sample per pixel.
pub fn gradient_magnitude(
    src: &[f32],
    width: usize,
    height: usize,
    channels: usize,
) -> OpsResult<Vec<f32>> {
    check_len(src, width, height, channels)?;
    let mut mag = vec![0.0f32; width * height];
    for_each_row(&mut mag, width, |y, row| {
        let s = |x: isize, dy: isize, c: usize| {
            let sx = clamp_coord(x, width);
            let sy = clamp_coord(y as isize + dy, height);
            src[(sy * width + sx) * channels + c]
        };
        for (x, m) in row.iter_mut().enumerate() {
            let x = x as isize;
            for c in 0..channels {
                let gx = (s(x + 1, -1, c) + 2.0 * s(x + 1, 0, c) + s(x + 1, 1, c))
                    - (s(x - 1, -1, c) + 2.0 * s(x - 1, 0, c) + s(x - 1, 1, c));
                let gy = (s(x - 1, 1, c) + 2.0 * s(x, 1, c) + s(x + 1, 1, c))
                    - (s(x - 1, -1, c) + 2.0 * s(x, -1, c) + s(x + 1, -1, c));
                *m += (gx * gx + gy * gy).sqrt();
            }
        }
    });
    Ok(mag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use layerkit_core::image::Layout;
    use layerkit_core::Rgb;

    #[test]
    fn test_convolve_correlates_with_clamped_edges() {
        // Weight on the right neighbour shifts the row left; the last sample repeats.
        let kernel = Kernel::new(vec![0.0, 0.0, 1.0], 3, 1).unwrap();
        let out = convolve(&[1.0, 2.0, 3.0, 4.0], 4, 1, 1, &kernel).unwrap();
        assert_eq!(out, vec![2.0, 3.0, 4.0, 4.0]);
    }

    #[test]
    fn test_kernel_new_validates() {
        assert!(Kernel::new(vec![1.0; 4], 2, 2).is_err());
        assert!(Kernel::new(vec![1.0; 8], 3, 3).is_err());
        assert!(Kernel::new(vec![1.0; 9], 3, 3).is_ok());
    }

    #[test]
    fn test_convolve_constant() {
        let src = vec![0.5f32; 8 * 8 * 3];
        let kernel = Kernel::new(vec![1.0 / 9.0; 9], 3, 3).unwrap();
        let result = convolve(&src, 8, 8, 3, &kernel).unwrap();

        // Constant image should stay constant
        for v in result {
            assert!((v - 0.5).abs() < 0.01);
        }
    }

    #[test]
    fn test_gaussian_blur_spreads_impulse() {
        let mut src = vec![0.0f32; 9 * 9];
        src[4 * 9 + 4] = 1.0;
        let out = gaussian_blur_f32(&src, 9, 9, 1, 1.0).unwrap();
        let sum: f32 = out.iter().sum();
        assert!((sum - 1.0).abs() < 0.01);
        assert!(out[4 * 9 + 4] < 1.0);
        assert!(out[4 * 9 + 5] > 0.0);
        assert!((out[4 * 9 + 3] - out[4 * 9 + 5]).abs() < 1e-6);
    }

    #[test]
    fn test_gaussian_blur_zero_sigma() {
        let mask = Mask::from_data(2, 1, vec![0, 255]).unwrap();
        assert_eq!(gaussian_blur_mask(&mask, 0.0).unwrap(), mask);
    }

    #[test]
    fn test_motion_kernel_is_line() {
        let k = Kernel::motion(2, -45.0).unwrap();
        // -45 + 45 = no rotation: the diagonal survives, scaled by 1/blur.
        assert!((k.data[0] - 0.5).abs() < 1e-5);
        assert!((k.data[3 * 10 + 3] - 0.5).abs() < 1e-5);
        assert!(k.data[1].abs() < 1e-5);
    }

    #[test]
    fn test_motion_blur_stretches_contrast() {
        let mut img = Image::new(12, 12, Layout::Rgb);
        for y in 0..12 {
            for x in 6..12 {
                img.set_pixel(x, y, &[200, 200, 200]).unwrap();
            }
        }
        let out = motion_blur(&img, 0.0, 1).unwrap();
        assert_eq!(out.dimensions(), (12, 12));
        let max = out.as_slice().iter().copied().max().unwrap();
        let min = out.as_slice().iter().copied().min().unwrap();
        assert_eq!(max, 255);
        assert_eq!(min, 0);
        assert_eq!(motion_blur(&img, 30.0, 0).unwrap(), img);
    }

    #[test]
    fn test_dilate_erode_footprints() {
        let mut src = vec![0.0f32; 5 * 5];
        src[12] = 1.0;
        let cross = dilate(&src, 5, 5, 1, 1, Footprint::Cross).unwrap();
        assert_eq!(cross[6], 0.0);
        assert_eq!(cross[7], 1.0);
        let square = dilate(&src, 5, 5, 1, 1, Footprint::Square).unwrap();
        assert_eq!(square.iter().filter(|&&v| v == 1.0).count(), 9);

        let eroded = erode(&square, 5, 5, 1, 1, Footprint::Square).unwrap();
        assert_eq!(eroded, src);
    }

    #[test]
    fn test_bilateral_keeps_edges() {
        // Hard vertical edge between 0 and 1.
        let (w, h) = (10, 4);
        let src: Vec<f32> = (0..w * h).map(|i| if i % w < 5 { 0.0 } else { 1.0 }).collect();
        let out = bilateral(&src, w, h, 1, 5, 10.0, 3.0).unwrap();
        assert!(out[4] < 0.01);
        assert!(out[5] > 0.99);
    }

    #[test]
    fn test_recursive_filter_smooths_noise_not_edges() {
        let (w, h) = (16, 4);
        let src: Vec<f32> = (0..w * h)
            .map(|i| {
                let base = if i % w < 8 { 0.1 } else { 0.9 };
                base + if i % 2 == 0 { 0.02 } else { -0.02 }
            })
            .collect();
        let out = recursive_filter(&src, w, h, 1, 10.0, 0.2).unwrap();
        assert!((out[2] - 0.1).abs() < 0.02);
        assert!((out[12] - 0.9).abs() < 0.02);
        assert!(recursive_filter(&src, w, h, 1, 0.0, 0.2).is_err());
    }

    #[test]
    fn test_gradient_magnitude() {
        let flat = vec![0.3f32; 6 * 6 * 3];
        assert!(gradient_magnitude(&flat, 6, 6, 3).unwrap().iter().all(|&m| m == 0.0));

        let img = Image::solid(6, 6, Rgb::WHITE);
        let mut data = img.to_f32();
        data[..3 * 6 * 3].fill(0.0);
        let mag = gradient_magnitude(&data, 6, 6, 3).unwrap();
        assert!(mag[2 * 6 + 2] > 0.0);
        assert_eq!(mag[5 * 6 + 2], 0.0);
    }
}
