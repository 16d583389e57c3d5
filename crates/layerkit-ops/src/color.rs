//! Color analysis and grading.
//!
//! # Analysis
//!
//! - [`dominant_tone`] - Most saturated frequent color, ignoring highlights
//! - [`average_color`] / [`average_brightness`]
//!
//! # Grading
//!
//! - [`gamma_correct`] / [`apply_lut`] - Table lookups from `layerkit-lut`
//! - [`color_transfer`] - Lab statistics matching against a reference
//! - [`watercolor`] / [`beautify`] - Edge-preserving stylization
//! - [`gray_offset`] / [`hue_offset`] / [`gray_threshold`] - `L` tools
//! - [`colormap`] - False color through a [`ColorMap`] palette
//!
//! Grading functions keep an RGBA input's alpha untouched.

use crate::channels::{from_lab, to_lab};
use crate::filter::{bilateral, gradient_magnitude, recursive_filter};
use crate::{OpsError, OpsResult};
use layerkit_core::image::{unit_to_u8, Layout};
use layerkit_core::{hsv_to_rgb, rgb_to_hsv, Image, Rgb};
use layerkit_lut::{CubeLut, Lut1D};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// Runs `f` on the color part of `image`, reattaching alpha afterwards.
pub(crate) fn map_color<F>(image: &Image, f: F) -> OpsResult<Image>
where
    F: FnOnce(&Image) -> OpsResult<Image>,
{
    if image.layout() == Layout::Rgba {
        let alpha = image.alpha();
        let color = f(&image.to_rgb())?;
        Ok(color.with_alpha(&alpha)?)
    } else {
        f(image)
    }
}

/// Studio-swing luma in `[0, 1]` used to skip highlights.
#[inline]
fn tone_luma([r, g, b]: [u8; 3]) -> f32 {
    let y = ((r as u32 * 2104 + g as u32 * 4130 + b as u32 * 802 + 4096 + 131072) >> 13).min(235);
    (y as f32 - 16.0) / (235.0 - 16.0)
}

/// Picks the color that best represents the image tone.
///
/// Every distinct color scores `(saturation + 0.1) * count`; colors with
/// luma above 0.9 are skipped. Returns `None` when nothing scores above
/// the floor (for example an all-white image).
///
/// ```rust
/// use layerkit_core::{Image, Rgb};
/// use layerkit_ops::color::dominant_tone;
///
/// let img = Image::solid(4, 4, Rgb([200, 30, 30]));
/// assert_eq!(dominant_tone(&img), Some(Rgb([200, 30, 30])));
/// assert_eq!(dominant_tone(&Image::solid(4, 4, Rgb::WHITE)), None);
/// ```
pub fn dominant_tone(image: &Image) -> Option<Rgb> {
    let rgb = image.to_rgb();
    let mut counts: BTreeMap<[u8; 3], u64> = BTreeMap::new();
    for px in rgb.pixels() {
        *counts.entry([px[0], px[1], px[2]]).or_default() += 1;
    }
    trace!(colors = counts.len(), "dominant_tone");

    let mut best = None;
    let mut max_score = 0.0001f64;
    for (color, count) in counts {
        if tone_luma(color) > 0.9 {
            continue;
        }
        let [r, g, b] = color.map(|c| c as f32 / 255.0);
        let saturation = rgb_to_hsv(r, g, b)[1] as f64;
        let score = (saturation + 0.1) * count as f64;
        if score > max_score {
            max_score = score;
            best = Some(Rgb(color));
        }
    }
    best
}

/// Per-channel mean, rounded down. Black for an empty image.
pub fn average_color(image: &Image) -> Rgb {
    let rgb = image.to_rgb();
    let n = rgb.pixel_count() as u64;
    if n == 0 {
        return Rgb::BLACK;
    }
    let mut totals = [0u64; 3];
    for px in rgb.pixels() {
        for (t, &v) in totals.iter_mut().zip(px) {
            *t += v as u64;
        }
    }
    Rgb(totals.map(|t| (t / n) as u8))
}

/// Mean luma over pixels brighter than 1, truncated.
///
/// Returns `None` when every pixel is (nearly) black.
pub fn average_brightness(image: &Image) -> Option<u8> {
    let luma = image.to_luma();
    let (total, count) = luma
        .as_slice()
        .iter()
        .filter(|&&v| v > 1)
        .fold((0u64, 0u64), |(t, c), &v| (t + v as u64, c + 1));
    if count == 0 {
        None
    } else {
        Some((total as f64 / count as f64) as u8)
    }
}

/// Applies `round(255 * (x / 255) ^ gamma)` to the color channels.
pub fn gamma_correct(image: &Image, gamma: f32) -> Image {
    debug!(gamma, "Gamma correction");
    Lut1D::gamma(gamma).apply_image(image)
}

/// Grades `image` through a `.cube` table.
pub fn apply_lut(image: &Image, lut: &CubeLut) -> OpsResult<Image> {
    debug!(entries = lut.len(), "Applying cube LUT");
    Ok(lut.apply(image)?)
}

/// Per-channel mean and population standard deviation, both rounded to
/// two decimals.
fn channel_stats(lab: &Image) -> [(f64, f64); 3] {
    let n = lab.pixel_count().max(1) as f64;
    let mut sum = [0f64; 3];
    let mut sq = [0f64; 3];
    for px in lab.pixels() {
        for c in 0..3 {
            let v = px[c] as f64;
            sum[c] += v;
            sq[c] += v * v;
        }
    }
    let round2 = |v: f64| (v * 100.0).round() / 100.0;
    std::array::from_fn(|c| {
        let mean = sum[c] / n;
        let var = (sq[c] / n - mean * mean).max(0.0);
        (round2(mean), round2(var.sqrt()))
    })
}

/// Matches the Lab mean and spread of `image` to those of `reference`.
///
/// A channel without spread in `image` is only shifted.
///
/// ```rust
/// use layerkit_core::{Image, Rgb};
/// use layerkit_ops::color::color_transfer;
///
/// let src = Image::solid(4, 4, Rgb([40, 40, 40]));
/// let reference = Image::solid(4, 4, Rgb([200, 200, 200]));
/// let out = color_transfer(&src, &reference).unwrap();
/// assert!(out.pixel(0, 0)[0] > 190);
/// ```
pub fn color_transfer(image: &Image, reference: &Image) -> OpsResult<Image> {
    let ref_stats = channel_stats(&to_lab(reference));
    map_color(image, |color| {
        let mut lab = to_lab(color);
        let stats = channel_stats(&lab);
        debug!(?stats, ?ref_stats, "Color transfer");

        for px in lab.as_mut_slice().chunks_exact_mut(3) {
            for c in 0..3 {
                let (mean, std) = stats[c];
                let (ref_mean, ref_std) = ref_stats[c];
                let ratio = if std == 0.0 { 1.0 } else { ref_std / std };
                let v = ((px[c] as f64 - mean) * ratio + ref_mean).clamp(0.0, 255.0);
                px[c] = v.round_ties_even() as u8;
            }
        }
        Ok(from_lab(&lab))
    })
}

/// Watercolor stylization; `level` around 50 is moderate.
///
/// Smooths with the domain-transform filter and darkens along edges of the
/// smoothed result.
pub fn watercolor(image: &Image, level: u32) -> OpsResult<Image> {
    let factor = (level as f32 / 128.0).powi(2);
    let span = (image.width() + image.height()) as f32;
    let sigma_s = (((span / 5.0 * factor) as u32) + 1).min(200) as f32;
    let sigma_r = (sigma_s / 32.0 * factor + 0.002).min(1.0);
    debug!(level, sigma_s, sigma_r, "Watercolor");

    map_color(image, |color| {
        let (w, h, ch) = (color.width() as usize, color.height() as usize, color.channels());
        let mut smooth = recursive_filter(&color.to_f32(), w, h, ch, sigma_s, sigma_r)?;
        let mut mag = gradient_magnitude(&smooth, w, h, ch)?;

        let (min, max) = mag
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if max - min > f32::EPSILON {
            for m in &mut mag {
                *m = (*m - min) / (max - min);
            }
        } else {
            mag.fill(0.0);
        }

        for (px, m) in smooth.chunks_exact_mut(ch).zip(&mag) {
            for v in px {
                *v *= 1.0 - m;
            }
        }
        Ok(Image::from_f32(color.width(), color.height(), color.layout(), &smooth)?)
    })
}

/// Skin-smoothing bilateral filter; strength grows with `level` squared.
pub fn beautify(image: &Image, level: u32) -> OpsResult<Image> {
    let factor = (level as f32 / 50.0).powi(2);
    let span = (image.width() + image.height()) as f32;
    let d = (span / 256.0 * factor) as i32;
    let sigma_color = ((span / 256.0 * factor) as i32) as f32;
    let sigma_space = ((span / 160.0 * factor) as i32) as f32;
    debug!(level, d, sigma_color, sigma_space, "Beautify");

    map_color(image, |color| {
        let (w, h, ch) = (color.width() as usize, color.height() as usize, color.channels());
        let data = bilateral(&color.to_f32(), w, h, ch, d, sigma_color, sigma_space)?;
        Ok(Image::from_f32(color.width(), color.height(), color.layout(), &data)?)
    })
}

fn map_luma(image: &Image, f: impl Fn(u8) -> u8) -> Image {
    let mut luma = image.to_luma();
    for v in luma.as_mut_slice() {
        *v = f(*v);
    }
    luma
}

/// Adds `offset` to the luma, saturating at 0 and 255.
pub fn gray_offset(image: &Image, offset: i32) -> Image {
    map_luma(image, |v| (v as i32 + offset).clamp(0, 255) as u8)
}

/// Adds `offset` to the luma, wrapping modulo 256.
///
/// ```rust
/// use layerkit_core::{Image, image::Layout};
/// use layerkit_ops::color::hue_offset;
///
/// let img = Image::from_data(2, 1, Layout::L, vec![250, 3]).unwrap();
/// assert_eq!(hue_offset(&img, 10).as_slice(), &[4, 13]);
/// ```
pub fn hue_offset(image: &Image, offset: i32) -> Image {
    map_luma(image, |v| (v as i32 + offset).rem_euclid(256) as u8)
}

/// Otsu's threshold over the luma histogram.
fn otsu_threshold(luma: &[u8]) -> u8 {
    let mut hist = [0u64; 256];
    for &v in luma {
        hist[v as usize] += 1;
    }
    let total = luma.len().max(1) as f64;
    let mu: f64 = hist.iter().enumerate().map(|(i, &n)| i as f64 * n as f64).sum::<f64>() / total;

    let (mut q1, mut mu1) = (0.0f64, 0.0f64);
    let (mut best, mut max_sigma) = (0u8, 0.0f64);
    for (i, &n) in hist.iter().enumerate() {
        let p = n as f64 / total;
        let q1_prev = q1;
        q1 += p;
        let q2 = 1.0 - q1;
        if q1.min(q2) < f64::EPSILON || q1.max(q2) > 1.0 - f64::EPSILON {
            continue;
        }
        mu1 = (mu1 * q1_prev + i as f64 * p) / q1;
        let mu2 = (mu - q1 * mu1) / q2;
        let sigma = q1 * q2 * (mu1 - mu2) * (mu1 - mu2);
        if sigma > max_sigma {
            max_sigma = sigma;
            best = i as u8;
        }
    }
    best
}

/// Thresholds the luma into an `L` image.
///
/// Without `otsu`, values at or below `thresh` become 0 and the rest are
/// kept. With `otsu`, the threshold is chosen automatically and the result
/// is binary (0/255).
pub fn gray_threshold(image: &Image, thresh: u8, otsu: bool) -> Image {
    let luma = image.to_luma();
    if otsu {
        let t = otsu_threshold(luma.as_slice());
        trace!(threshold = t, "Otsu threshold");
        map_luma(&luma, |v| if v > t { 255 } else { 0 })
    } else {
        map_luma(&luma, |v| if v > thresh { v } else { 0 })
    }
}

type Stops = &'static [(f32, f32)];

const RISE: Stops = &[(0.0, 0.0), (1.0, 1.0)];
const FALL: Stops = &[(0.0, 1.0), (1.0, 0.0)];
const ZERO: Stops = &[(0.0, 0.0), (1.0, 0.0)];
const ONE: Stops = &[(0.0, 1.0), (1.0, 1.0)];

const BONE: [Stops; 3] = [
    &[(0.0, 0.0), (0.746032, 0.652778), (1.0, 1.0)],
    &[(0.0, 0.0), (0.365079, 0.319444), (0.746032, 0.777778), (1.0, 1.0)],
    &[(0.0, 0.0), (0.365079, 0.444444), (1.0, 1.0)],
];
const JET: [Stops; 3] = [
    &[(0.0, 0.0), (0.35, 0.0), (0.66, 1.0), (0.89, 1.0), (1.0, 0.5)],
    &[(0.0, 0.0), (0.125, 0.0), (0.375, 1.0), (0.64, 1.0), (0.91, 0.0), (1.0, 0.0)],
    &[(0.0, 0.5), (0.11, 1.0), (0.34, 1.0), (0.65, 0.0), (1.0, 0.0)],
];
const OCEAN: [Stops; 3] = [
    &[(0.0, 0.0), (0.667, 0.0), (1.0, 1.0)],
    &[(0.0, 0.5), (0.333, 0.0), (1.0, 1.0)],
    RISE,
];
const HOT: [Stops; 3] = [
    &[(0.0, 0.0416), (0.365079, 1.0), (1.0, 1.0)],
    &[(0.0, 0.0), (0.365079, 0.0), (0.746032, 1.0), (1.0, 1.0)],
    &[(0.0, 0.0), (0.746032, 0.0), (1.0, 1.0)],
];

/// Piecewise-linear lookup; `stops` are sorted by position.
fn piecewise(stops: &[(f32, f32)], t: f32) -> f32 {
    let Some(&first) = stops.first() else {
        return 0.0;
    };
    let (mut x0, mut y0) = first;
    for &(x1, y1) in stops {
        if t <= x1 {
            return if x1 > x0 { y0 + (y1 - y0) * (t - x0) / (x1 - x0) } else { y1 };
        }
        (x0, y0) = (x1, y1);
    }
    y0
}

/// False-color palette for [`colormap`].
///
/// Variants are numbered like OpenCV's `COLORMAP_*` constants, so
/// [`ColorMap::from_index`] accepts the same integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorMap {
    /// Red to yellow.
    Autumn,
    /// Black to white through blue-grey.
    Bone,
    /// Dark blue, cyan, yellow, dark red.
    #[default]
    Jet,
    /// Blue to green.
    Winter,
    /// Hue sweep from red to violet.
    Rainbow,
    /// Green-blue to white.
    Ocean,
    /// Green to yellow.
    Summer,
    /// Magenta to yellow.
    Spring,
    /// Cyan to magenta.
    Cool,
    /// Full hue circle.
    Hsv,
    /// Sepia-like pastel.
    Pink,
    /// Black, red, yellow, white.
    Hot,
}

impl ColorMap {
    /// Every palette, in index order.
    pub const ALL: [ColorMap; 12] = [
        ColorMap::Autumn,
        ColorMap::Bone,
        ColorMap::Jet,
        ColorMap::Winter,
        ColorMap::Rainbow,
        ColorMap::Ocean,
        ColorMap::Summer,
        ColorMap::Spring,
        ColorMap::Cool,
        ColorMap::Hsv,
        ColorMap::Pink,
        ColorMap::Hot,
    ];

    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            ColorMap::Autumn => "autumn",
            ColorMap::Bone => "bone",
            ColorMap::Jet => "jet",
            ColorMap::Winter => "winter",
            ColorMap::Rainbow => "rainbow",
            ColorMap::Ocean => "ocean",
            ColorMap::Summer => "summer",
            ColorMap::Spring => "spring",
            ColorMap::Cool => "cool",
            ColorMap::Hsv => "hsv",
            ColorMap::Pink => "pink",
            ColorMap::Hot => "hot",
        }
    }

    /// Palette number.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Palette by number.
    pub fn from_index(index: usize) -> OpsResult<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| OpsError::InvalidParameter(format!("unknown color map index {}", index)))
    }

    /// Channel `c` of the palette at position `t` in `[0, 1]`.
    fn level(self, c: usize, t: f32) -> f32 {
        let stops: [Stops; 3] = match self {
            ColorMap::Autumn => [ONE, RISE, ZERO],
            ColorMap::Bone => BONE,
            ColorMap::Jet => JET,
            ColorMap::Winter => [ZERO, RISE, &[(0.0, 1.0), (1.0, 0.5)]],
            ColorMap::Ocean => OCEAN,
            ColorMap::Summer => [RISE, &[(0.0, 0.5), (1.0, 1.0)], &[(0.0, 0.4), (1.0, 0.4)]],
            ColorMap::Spring => [ONE, RISE, FALL],
            ColorMap::Cool => [RISE, FALL, ONE],
            ColorMap::Hot => HOT,
            ColorMap::Rainbow => return hsv_to_rgb(t * 0.75, 1.0, 1.0)[c],
            ColorMap::Hsv => return hsv_to_rgb(t, 1.0, 1.0)[c],
            ColorMap::Pink => return ((2.0 * t + piecewise(HOT[c], t)) / 3.0).sqrt(),
        };
        piecewise(stops[c], t)
    }

    /// Red, green and blue lookup tables over the 256 gray levels.
    pub fn tables(self) -> [Lut1D; 3] {
        [0, 1, 2].map(|c| Lut1D::from_fn(|v| unit_to_u8(self.level(c, v as f32 / 255.0))))
    }
}

impl FromStr for ColorMap {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        let key = s.trim().to_ascii_lowercase();
        if let Ok(index) = key.parse::<usize>() {
            return Self::from_index(index);
        }
        Self::ALL
            .into_iter()
            .find(|m| m.name() == key)
            .ok_or_else(|| OpsError::InvalidParameter(format!("unknown color map '{}'", s)))
    }
}

impl fmt::Display for ColorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Renders the luma of `image` through a false-color palette.
///
/// Color input is reduced to luma first, so the result is always RGB
/// (RGBA keeps its alpha).
///
/// ```rust
/// use layerkit_core::{Image, image::Layout};
/// use layerkit_ops::color::{colormap, ColorMap};
///
/// let gray = Image::from_data(2, 1, Layout::L, vec![0, 255]).unwrap();
/// let out = colormap(&gray, ColorMap::Autumn).unwrap();
/// assert_eq!(out.as_slice(), &[255, 0, 0, 255, 255, 0]);
/// ```
pub fn colormap(image: &Image, map: ColorMap) -> OpsResult<Image> {
    debug!(%map, "Applying color map");
    let [r, g, b] = map.tables();
    map_color(image, |color| {
        let luma = color.to_luma();
        let mut data = Vec::with_capacity(luma.as_slice().len() * 3);
        for &v in luma.as_slice() {
            data.extend_from_slice(&[r.apply(v), g.apply(v), b.apply(v)]);
        }
        Ok(Image::from_data(color.width(), color.height(), Layout::Rgb, data)?)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_tone(a: [u8; 3], b: [u8; 3], split: u32) -> Image {
        let mut img = Image::new(10, 10, Layout::Rgb);
        for y in 0..10 {
            for x in 0..10 {
                img.set_pixel(x, y, if x < split { &a } else { &b }).unwrap();
            }
        }
        img
    }

    #[test]
    fn test_dominant_tone_prefers_saturation() {
        // 70 grey pixels vs 30 saturated ones: (1.0+0.1)*30 > (0+0.1)*70
        let img = two_tone([90, 90, 90], [0, 0, 200], 7);
        assert_eq!(dominant_tone(&img), Some(Rgb([0, 0, 200])));
    }

    #[test]
    fn test_dominant_tone_skips_highlights() {
        let img = two_tone([250, 250, 250], [30, 30, 30], 9);
        assert_eq!(dominant_tone(&img), Some(Rgb([30, 30, 30])));
    }

    #[test]
    fn test_average_color_floors() {
        let img = two_tone([0, 0, 0], [255, 3, 1], 5);
        assert_eq!(average_color(&img), Rgb([127, 1, 0]));
        assert_eq!(average_color(&Image::new(0, 0, Layout::Rgb)), Rgb::BLACK);
    }

    #[test]
    fn test_average_brightness_ignores_black() {
        let img = two_tone([0, 0, 0], [100, 100, 100], 5);
        assert_eq!(average_brightness(&img), Some(100));
        assert_eq!(average_brightness(&Image::solid(3, 3, Rgb([1, 1, 1]))), None);
    }

    #[test]
    fn test_gamma_identity() {
        let img = two_tone([12, 99, 200], [3, 4, 5], 3);
        assert_eq!(gamma_correct(&img, 1.0), img);
    }

    #[test]
    fn test_apply_identity_lut() {
        let img = two_tone([0, 128, 255], [255, 0, 0], 4);
        let out = apply_lut(&img, &CubeLut::identity()).unwrap();
        assert_eq!(out.pixel(0, 0), &[0, 128, 255]);
        assert_eq!(out.pixel(9, 9), &[255, 0, 0]);
    }

    #[test]
    fn test_color_transfer_self_is_stable() {
        let img = two_tone([200, 60, 40], [30, 90, 160], 5);
        let out = color_transfer(&img, &img).unwrap();
        for (a, b) in out.as_slice().iter().zip(img.as_slice()) {
            assert!((*a as i32 - *b as i32).abs() <= 3);
        }
    }

    #[test]
    fn test_color_transfer_keeps_alpha() {
        let img = Image::solid(2, 2, Rgb([10, 20, 30])).to_rgba();
        let out = color_transfer(&img, &Image::solid(2, 2, Rgb([90, 90, 90]))).unwrap();
        assert_eq!(out.layout(), Layout::Rgba);
        assert_eq!(out.pixel(1, 1)[3], 255);
    }

    #[test]
    fn test_watercolor_and_beautify_preserve_flat() {
        let img = Image::solid(12, 8, Rgb([120, 80, 40]));
        let wc = watercolor(&img, 50).unwrap();
        let bt = beautify(&img, 50).unwrap();
        for px in wc.pixels().chain(bt.pixels()) {
            assert_eq!(px, &[120, 80, 40]);
        }
    }

    #[test]
    fn test_gray_offset_saturates() {
        let img = Image::from_data(3, 1, Layout::L, vec![0, 100, 250]).unwrap();
        assert_eq!(gray_offset(&img, 10).as_slice(), &[10, 110, 255]);
        assert_eq!(gray_offset(&img, -50).as_slice(), &[0, 50, 200]);
        assert_eq!(hue_offset(&img, -50).as_slice(), &[206, 50, 200]);
    }

    #[test]
    fn test_gray_threshold() {
        let img = Image::from_data(4, 1, Layout::L, vec![10, 127, 128, 240]).unwrap();
        assert_eq!(gray_threshold(&img, 127, false).as_slice(), &[0, 0, 128, 240]);

        let bimodal = Image::from_data(6, 1, Layout::L, vec![10, 12, 14, 200, 202, 204]).unwrap();
        assert_eq!(gray_threshold(&bimodal, 0, true).as_slice(), &[0, 0, 0, 255, 255, 255]);
    }

    #[test]
    fn test_colormap_palette_ends() {
        let gray = Image::from_data(3, 1, Layout::L, vec![0, 128, 255]).unwrap();
        let jet = colormap(&gray, ColorMap::Jet).unwrap();
        assert_eq!(jet.layout(), Layout::Rgb);
        assert_eq!(jet.pixel(0, 0), &[0, 0, 128]);
        assert_eq!(jet.pixel(2, 0), &[128, 0, 0]);

        let winter = colormap(&gray, ColorMap::Winter).unwrap();
        assert_eq!(winter.pixel(1, 0), &[0, 128, 191]);

        let hot = colormap(&gray, ColorMap::Hot).unwrap();
        assert_eq!(hot.pixel(0, 0), &[11, 0, 0]);
        assert_eq!(hot.pixel(2, 0), &[255, 255, 255]);

        let hsv = colormap(&gray, ColorMap::Hsv).unwrap();
        assert_eq!(hsv.pixel(0, 0), &[255, 0, 0]);
        assert_eq!(hsv.pixel(2, 0), &[255, 0, 0]);
    }

    #[test]
    fn test_colormap_uses_luma_and_keeps_alpha() {
        // Pure red has luma 76.
        let red = Image::filled(2, 2, Layout::Rgba, &[255, 0, 0, 90]).unwrap();
        let level = Image::from_data(1, 1, Layout::L, vec![76]).unwrap();
        let expected = colormap(&level, ColorMap::Bone).unwrap();

        let out = colormap(&red, ColorMap::Bone).unwrap();
        assert_eq!(out.layout(), Layout::Rgba);
        assert_eq!(&out.pixel(1, 1)[..3], expected.pixel(0, 0));
        assert_eq!(out.pixel(1, 1)[3], 90);
    }

    #[test]
    fn test_colormap_names_and_indices() {
        for (i, map) in ColorMap::ALL.into_iter().enumerate() {
            assert_eq!(map.index(), i);
            assert_eq!(ColorMap::from_index(i).unwrap(), map);
            assert_eq!(map.to_string().parse::<ColorMap>().unwrap(), map);
        }
        assert_eq!(" JET ".parse::<ColorMap>().unwrap(), ColorMap::Jet);
        assert_eq!("11".parse::<ColorMap>().unwrap(), ColorMap::Hot);
        assert!("viridis".parse::<ColorMap>().is_err());
        assert!(ColorMap::from_index(12).is_err());
    }

    #[test]
    fn test_colormap_tables_monotonic_where_expected() {
        let [r, g, b] = ColorMap::Bone.tables();
        for t in [r, g, b] {
            assert!(t.table().windows(2).all(|w| w[0] <= w[1]));
        }
        let [_, g, _] = ColorMap::Autumn.tables();
        assert_eq!(g.table()[0], 0);
        assert_eq!(g.table()[255], 255);
    }
}
