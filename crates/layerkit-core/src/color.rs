//! Color values and conversions.
//!
//! [`Rgb`] is the color value passed around by every tool that takes a fill,
//! gradient stop or background color. It parses from and formats to the
//! `#RRGGBB` encoding used by the pipeline editor's color widgets.
//!
//! ```rust
//! use layerkit_core::Rgb;
//!
//! let c: Rgb = "#FF8000".parse().unwrap();
//! assert_eq!(c, Rgb([255, 128, 0]));
//! assert_eq!(c.to_hex(), "#FF8000");
//! ```

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// Black.
    pub const BLACK: Rgb = Rgb([0, 0, 0]);
    /// White.
    pub const WHITE: Rgb = Rgb([255, 255, 255]);

    /// Creates a color from its channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        self.0[0]
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        self.0[1]
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        self.0[2]
    }

    /// Parses `#RRGGBB` (the leading `#` is optional, digits are case-insensitive).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidColor`] for anything that is not six hex digits.
    pub fn from_hex(text: &str) -> Result<Self> {
        let digits = text.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        // `from_str_radix` alone accepts a leading `+`.
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::invalid_color(text));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| Error::invalid_color(text))
        };
        Ok(Self([channel(0)?, channel(2)?, channel(4)?]))
    }

    /// Formats as uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0[0], self.0[1], self.0[2])
    }

    /// HSV components, each in `[0, 1]`.
    pub fn to_hsv(self) -> [f32; 3] {
        rgb_to_hsv(
            self.0[0] as f32 / 255.0,
            self.0[1] as f32 / 255.0,
            self.0[2] as f32 / 255.0,
        )
    }

    /// HSV components scaled by 360 and truncated.
    ///
    /// Every component (not only hue) is scaled, which is what the pipeline
    /// editor's HSV readout nodes display.
    pub fn hsv_degrees(self) -> [i32; 3] {
        let [h, s, v] = self.to_hsv();
        [(h * 360.0) as i32, (s * 360.0) as i32, (v * 360.0) as i32]
    }

    /// Builds a color from HSV components in `[0, 1]`.
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        let [r, g, b] = hsv_to_rgb(h, s, v);
        Self([
            crate::image::unit_to_u8(r),
            crate::image::unit_to_u8(g),
            crate::image::unit_to_u8(b),
        ])
    }

    /// 8-bit luma (ITU-R 601 integer weights).
    #[inline]
    pub fn luma(self) -> u8 {
        crate::image::luma_u8(self.0[0], self.0[1], self.0[2])
    }

    /// Pixel of the given channel count: luma, RGB, or opaque RGBA.
    pub fn to_pixel(self, channels: usize) -> Vec<u8> {
        match channels {
            1 => vec![self.luma()],
            4 => vec![self.0[0], self.0[1], self.0[2], 255],
            _ => self.0.to_vec(),
        }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(v: [u8; 3]) -> Self {
        Self(v)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Converts RGB in `[0, 1]` to HSV in `[0, 1]`.
///
/// Hue wraps to `[0, 1)`; gray inputs have zero hue and saturation.
pub fn rgb_to_hsv(r: f32, g: f32, b: f32) -> [f32; 3] {
    let maxc = r.max(g).max(b);
    let minc = r.min(g).min(b);
    let v = maxc;
    if maxc == minc {
        return [0.0, 0.0, v];
    }
    let range = maxc - minc;
    let s = range / maxc;
    let rc = (maxc - r) / range;
    let gc = (maxc - g) / range;
    let bc = (maxc - b) / range;
    let h = if r == maxc {
        bc - gc
    } else if g == maxc {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    [(h / 6.0).rem_euclid(1.0), s, v]
}

/// Converts HSV in `[0, 1]` to RGB in `[0, 1]`.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let c = v * s;
    let h_prime = h.rem_euclid(1.0) * 6.0;
    let x = c * (1.0 - ((h_prime % 2.0) - 1.0).abs());

    let (r1, g1, b1) = if h_prime < 1.0 {
        (c, x, 0.0)
    } else if h_prime < 2.0 {
        (x, c, 0.0)
    } else if h_prime < 3.0 {
        (0.0, c, x)
    } else if h_prime < 4.0 {
        (0.0, x, c)
    } else if h_prime < 5.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    let m = v - c;
    [r1 + m, g1 + m, b1 + m]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_hex_format() {
        assert_eq!(Rgb([0, 0, 0]).to_hex(), "#000000");
        assert_eq!(Rgb([255, 10, 171]).to_hex(), "#FF0AAB");
    }

    #[test]
    fn test_hex_parse() {
        assert_eq!(Rgb::from_hex("#ff0aab").unwrap(), Rgb([255, 10, 171]));
        assert_eq!(Rgb::from_hex("102030").unwrap(), Rgb([16, 32, 48]));
        assert!(Rgb::from_hex("#12345").is_err());
        assert!(Rgb::from_hex("#GG0000").is_err());
        assert!(Rgb::from_hex("#ééé").is_err());
        assert!(Rgb::from_hex("#+1+2+3").is_err());
        assert!(Rgb::from_hex("+1+2+3").is_err());
    }

    #[test]
    fn test_hex_roundtrip_all_channel_values() {
        for v in 0..=255u8 {
            for c in [Rgb([v, 0, 0]), Rgb([0, v, 0]), Rgb([0, 0, v]), Rgb([v, 255 - v, v / 2])] {
                assert_eq!(Rgb::from_hex(&c.to_hex()).unwrap(), c);
            }
        }
    }

    #[test]
    fn test_hsv_primaries() {
        let [h, s, v] = Rgb([255, 0, 0]).to_hsv();
        assert_abs_diff_eq!(h, 0.0);
        assert_abs_diff_eq!(s, 1.0);
        assert_abs_diff_eq!(v, 1.0);

        let [h, _, _] = Rgb([0, 0, 255]).to_hsv();
        assert_abs_diff_eq!(h, 2.0 / 3.0, epsilon = 1e-6);

        assert_eq!(Rgb([128, 128, 128]).to_hsv()[1], 0.0);
    }

    #[test]
    fn test_hsv_degrees() {
        assert_eq!(Rgb([0, 255, 0]).hsv_degrees(), [120, 360, 360]);
    }

    #[test]
    fn test_hsv_roundtrip() {
        for c in [Rgb([12, 200, 99]), Rgb([250, 3, 180]), Rgb([77, 77, 77])] {
            let [h, s, v] = c.to_hsv();
            assert_eq!(Rgb::from_hsv(h, s, v), c);
        }
    }
}
