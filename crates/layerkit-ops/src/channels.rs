//! Channel split/merge across color spaces.
//!
//! Every space is encoded in 8 bits per channel:
//!
//! | Mode    | Channels | Encoding                                   |
//! |---------|----------|--------------------------------------------|
//! | `RGBA`  | R G B A  | as stored                                  |
//! | `RGB`   | R G B    | as stored                                  |
//! | `YCbCr` | Y Cb Cr  | full-range JPEG (BT.601)                   |
//! | `LAB`   | L a b    | D65, `L * 255 / 100`, `a + 128`, `b + 128` |
//! | `HSV`   | H S V    | each component scaled to 0..255            |
//!
//! [`channel_split`] always returns four `L` images; modes with three
//! components fill the fourth with black.

use crate::{OpsError, OpsResult};
use layerkit_core::image::Layout;
use layerkit_core::{hsv_to_rgb, rgb_to_hsv, Image};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// Color space used by [`channel_split`] and [`channel_merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChannelMode {
    /// Red, green, blue, alpha.
    #[default]
    Rgba,
    /// Red, green, blue.
    Rgb,
    /// Luma and blue/red chroma differences.
    YCbCr,
    /// CIE L*a*b*.
    Lab,
    /// Hue, saturation, value.
    Hsv,
}

impl ChannelMode {
    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            ChannelMode::Rgba => "RGBA",
            ChannelMode::Rgb => "RGB",
            ChannelMode::YCbCr => "YCbCr",
            ChannelMode::Lab => "LAB",
            ChannelMode::Hsv => "HSV",
        }
    }
}

impl FromStr for ChannelMode {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rgba" => Ok(ChannelMode::Rgba),
            "rgb" => Ok(ChannelMode::Rgb),
            "ycbcr" => Ok(ChannelMode::YCbCr),
            "lab" => Ok(ChannelMode::Lab),
            "hsv" => Ok(ChannelMode::Hsv),
            _ => Err(OpsError::InvalidParameter(format!(
                "unknown channel mode '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[inline]
fn to_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// RGB to full-range YCbCr.
pub fn rgb_to_ycbcr([r, g, b]: [u8; 3]) -> [u8; 3] {
    let (r, g, b) = (r as f32, g as f32, b as f32);
    [
        to_u8(0.299 * r + 0.587 * g + 0.114 * b),
        to_u8(128.0 - 0.168736 * r - 0.331264 * g + 0.5 * b),
        to_u8(128.0 + 0.5 * r - 0.418688 * g - 0.081312 * b),
    ]
}

/// Full-range YCbCr to RGB.
pub fn ycbcr_to_rgb([y, cb, cr]: [u8; 3]) -> [u8; 3] {
    let (y, cb, cr) = (y as f32, cb as f32 - 128.0, cr as f32 - 128.0);
    [
        to_u8(y + 1.402 * cr),
        to_u8(y - 0.344136 * cb - 0.714136 * cr),
        to_u8(y + 1.772 * cb),
    ]
}

// sRGB D65 primaries, reference white normalized into the matrices.
const XN: f32 = 0.950456;
const ZN: f32 = 1.088754;
const RGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.412453, 0.357580, 0.180423],
    [0.212671, 0.715160, 0.072169],
    [0.019334, 0.119193, 0.950227],
];
const XYZ_TO_RGB: [[f32; 3]; 3] = [
    [3.240479, -1.53715, -0.498535],
    [-0.969256, 1.875991, 0.041556],
    [0.055648, -0.204043, 1.057311],
];
const LAB_EPS: f32 = 0.008856;
const LAB_KAPPA: f32 = 903.3;

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
}

fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.0031308 { c * 12.92 } else { 1.055 * c.powf(1.0 / 2.4) - 0.055 }
}

fn mul3(m: &[[f32; 3]; 3], v: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// RGB to 8-bit Lab (`L * 255 / 100`, `a + 128`, `b + 128`).
///
/// ```rust
/// use layerkit_ops::channels::rgb_to_lab;
///
/// assert_eq!(rgb_to_lab([255, 255, 255]), [255, 128, 128]);
/// assert_eq!(rgb_to_lab([0, 0, 0]), [0, 128, 128]);
/// ```
pub fn rgb_to_lab(rgb: [u8; 3]) -> [u8; 3] {
    let lin = rgb.map(|c| srgb_to_linear(c as f32 / 255.0));
    let [x, y, z] = mul3(&RGB_TO_XYZ, lin);
    let f = |t: f32| if t > LAB_EPS { t.cbrt() } else { 7.787 * t + 16.0 / 116.0 };
    let (fx, fy, fz) = (f(x / XN), f(y), f(z / ZN));
    let l = if y > LAB_EPS { 116.0 * fy - 16.0 } else { LAB_KAPPA * y };
    [
        to_u8(l * 255.0 / 100.0),
        to_u8(500.0 * (fx - fy) + 128.0),
        to_u8(200.0 * (fy - fz) + 128.0),
    ]
}

/// 8-bit Lab back to RGB.
pub fn lab_to_rgb([l, a, b]: [u8; 3]) -> [u8; 3] {
    let l = l as f32 * 100.0 / 255.0;
    let (a, b) = (a as f32 - 128.0, b as f32 - 128.0);

    let (y, fy) = if l <= LAB_EPS * LAB_KAPPA {
        let y = l / LAB_KAPPA;
        (y, 7.787 * y + 16.0 / 116.0)
    } else {
        let fy = (l + 16.0) / 116.0;
        (fy * fy * fy, fy)
    };
    let inv = |t: f32| {
        if t > LAB_EPS.cbrt() { t * t * t } else { (t - 16.0 / 116.0) / 7.787 }
    };
    let x = inv(a / 500.0 + fy) * XN;
    let z = inv(fy - b / 200.0) * ZN;

    mul3(&XYZ_TO_RGB, [x, y, z]).map(|c| to_u8(linear_to_srgb(c.clamp(0.0, 1.0)) * 255.0))
}

/// RGB to HSV with every component in 0..255.
pub fn rgb_to_hsv8([r, g, b]: [u8; 3]) -> [u8; 3] {
    rgb_to_hsv(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0).map(|v| to_u8(v * 255.0))
}

/// HSV in 0..255 back to RGB.
pub fn hsv8_to_rgb([h, s, v]: [u8; 3]) -> [u8; 3] {
    hsv_to_rgb(h as f32 / 255.0, s as f32 / 255.0, v as f32 / 255.0).map(|c| to_u8(c * 255.0))
}

fn convert_pixels(rgb: &Image, f: fn([u8; 3]) -> [u8; 3]) -> Image {
    let mut out = rgb.clone();
    for px in out.as_mut_slice().chunks_exact_mut(3) {
        px.copy_from_slice(&f([px[0], px[1], px[2]]));
    }
    out
}

/// Converts any image into the 3- or 4-channel encoding of `mode`.
fn encode(image: &Image, mode: ChannelMode) -> Image {
    match mode {
        ChannelMode::Rgba => image.to_rgba(),
        ChannelMode::Rgb => image.to_rgb(),
        ChannelMode::YCbCr => convert_pixels(&image.to_rgb(), rgb_to_ycbcr),
        ChannelMode::Lab => convert_pixels(&image.to_rgb(), rgb_to_lab),
        ChannelMode::Hsv => convert_pixels(&image.to_rgb(), rgb_to_hsv8),
    }
}

/// Splits `image` into four single-channel (`L`) images in `mode`.
///
/// ```rust
/// use layerkit_core::{Image, Rgb};
/// use layerkit_ops::channels::{channel_split, ChannelMode};
///
/// let [r, g, b, fourth] = channel_split(&Image::solid(2, 2, Rgb([10, 20, 30])), ChannelMode::Rgb);
/// assert_eq!(g.pixel(0, 0), &[20]);
/// assert_eq!(fourth.pixel(1, 1), &[0]);
/// # let _ = (r, b);
/// ```
pub fn channel_split(image: &Image, mode: ChannelMode) -> [Image; 4] {
    trace!(%mode, "channel_split");
    let encoded = encode(image, mode);
    let ch = encoded.channels();
    let (w, h) = encoded.dimensions();

    std::array::from_fn(|c| {
        let mut plane = Image::new(w, h, Layout::L);
        if c < ch {
            for (dst, px) in plane.as_mut_slice().iter_mut().zip(encoded.pixels()) {
                *dst = px[c];
            }
        }
        plane
    })
}

/// Merges single-channel images encoded in `mode` back into color.
///
/// Needs at least three channels; each is reduced to luma first. `RGBA`
/// uses the fourth channel as alpha (opaque when absent); every other mode
/// returns RGB and ignores extra channels.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] with fewer than three channels and
/// [`OpsError::SizeMismatch`] when their sizes differ.
pub fn channel_merge(channels: &[Image], mode: ChannelMode) -> OpsResult<Image> {
    if channels.len() < 3 {
        return Err(OpsError::InvalidParameter(format!(
            "merge needs at least 3 channels, got {}",
            channels.len()
        )));
    }
    let dims = channels[0].dimensions();
    if let Some(bad) = channels.iter().find(|c| c.dimensions() != dims) {
        return Err(OpsError::size_mismatch(dims, bad.dimensions()));
    }
    trace!(%mode, count = channels.len(), "channel_merge");

    let planes: Vec<Image> = channels.iter().map(Image::to_luma).collect();
    let count = dims.0 as usize * dims.1 as usize;

    if mode == ChannelMode::Rgba {
        let mut data = Vec::with_capacity(count * 4);
        for i in 0..count {
            let alpha = planes.get(3).map_or(255, |a| a.as_slice()[i]);
            data.extend_from_slice(&[
                planes[0].as_slice()[i],
                planes[1].as_slice()[i],
                planes[2].as_slice()[i],
                alpha,
            ]);
        }
        return Ok(Image::from_data(dims.0, dims.1, Layout::Rgba, data)?);
    }

    let decode: fn([u8; 3]) -> [u8; 3] = match mode {
        ChannelMode::YCbCr => ycbcr_to_rgb,
        ChannelMode::Lab => lab_to_rgb,
        ChannelMode::Hsv => hsv8_to_rgb,
        _ => |px| px,
    };
    let mut data = Vec::with_capacity(count * 3);
    for i in 0..count {
        data.extend_from_slice(&decode([
            planes[0].as_slice()[i],
            planes[1].as_slice()[i],
            planes[2].as_slice()[i],
        ]));
    }
    Ok(Image::from_data(dims.0, dims.1, Layout::Rgb, data)?)
}

/// Converts an image to RGB and then to 8-bit Lab, stored in an RGB buffer.
pub fn to_lab(image: &Image) -> Image {
    encode(image, ChannelMode::Lab)
}

/// Decodes an 8-bit Lab buffer (as produced by [`to_lab`]) to RGB.
pub fn from_lab(lab: &Image) -> Image {
    convert_pixels(&lab.to_rgb(), lab_to_rgb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use layerkit_core::Rgb;

    fn close(a: [u8; 3], b: [u8; 3], tol: i32) -> bool {
        a.iter().zip(&b).all(|(&x, &y)| (x as i32 - y as i32).abs() <= tol)
    }

    #[test]
    fn test_ycbcr_reference_values() {
        assert_eq!(rgb_to_ycbcr([255, 255, 255]), [255, 128, 128]);
        assert_eq!(rgb_to_ycbcr([255, 0, 0]), [76, 85, 255]);
        assert!(close(ycbcr_to_rgb([76, 85, 255]), [255, 0, 0], 1));
    }

    #[test]
    fn test_lab_reference_values() {
        // sRGB red: L 53.24, a 80.09, b 67.20
        let lab = rgb_to_lab([255, 0, 0]);
        assert!(close(lab, [136, 208, 195], 1), "{lab:?}");
        assert!(close(lab_to_rgb(lab), [255, 0, 0], 2));
        let grey = rgb_to_lab([128, 128, 128]);
        assert_eq!(grey[1], 128);
        assert_eq!(grey[2], 128);
    }

    #[test]
    fn test_hsv8() {
        assert_eq!(rgb_to_hsv8([255, 0, 0]), [0, 255, 255]);
        assert_eq!(rgb_to_hsv8([0, 0, 0]), [0, 0, 0]);
        assert!(close(hsv8_to_rgb(rgb_to_hsv8([30, 120, 200])), [30, 120, 200], 2));
    }

    #[test]
    fn test_split_rgba_keeps_alpha() {
        let img = Image::from_data(1, 1, Layout::Rgba, vec![1, 2, 3, 4]).unwrap();
        let planes = channel_split(&img, ChannelMode::Rgba);
        let values: Vec<u8> = planes.iter().map(|p| p.as_slice()[0]).collect();
        assert_eq!(values, vec![1, 2, 3, 4]);

        // Non-RGBA modes leave the fourth plane black.
        let planes = channel_split(&img, ChannelMode::YCbCr);
        assert_eq!(planes[3].as_slice(), &[0]);
    }

    #[test]
    fn test_merge_modes() {
        let img = Image::solid(3, 2, Rgb([200, 100, 50]));
        let [a, b, c, _] = channel_split(&img, ChannelMode::Rgb);

        let rgba = channel_merge(&[a.clone(), b.clone(), c.clone()], ChannelMode::Rgba).unwrap();
        assert_eq!(rgba.pixel(2, 1), &[200, 100, 50, 255]);

        let rgb = channel_merge(&[a.clone(), b.clone(), c.clone()], ChannelMode::Rgb).unwrap();
        assert_eq!(rgb.layout(), Layout::Rgb);

        for mode in [ChannelMode::YCbCr, ChannelMode::Lab, ChannelMode::Hsv] {
            let planes = channel_split(&img, mode);
            let back = channel_merge(&planes, mode).unwrap();
            let px = back.pixel(0, 0);
            assert!(close([px[0], px[1], px[2]], [200, 100, 50], 3), "{mode}: {px:?}");
        }
    }

    #[test]
    fn test_merge_errors() {
        let a = Image::new(2, 2, Layout::L);
        let small = Image::new(1, 2, Layout::L);
        assert!(matches!(
            channel_merge(&[a.clone(), a.clone()], ChannelMode::Rgb),
            Err(OpsError::InvalidParameter(_))
        ));
        assert!(matches!(
            channel_merge(&[a.clone(), a, small], ChannelMode::Rgb),
            Err(OpsError::SizeMismatch(_))
        ));
    }
}
