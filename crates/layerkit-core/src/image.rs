//! Image and mask buffers.
//!
//! - [`Image`] - owned 8-bit buffer in L, RGB or RGBA layout
//! - [`Mask`] - owned single-channel 8-bit selection
//!
//! # Memory Layout
//!
//! Both buffers store pixels in **row-major** order, top-to-bottom, with
//! the origin at the top-left corner. Image channels are interleaved:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//!         ...
//! ```
//!
//! # Format Conversion
//!
//! Operations that need float math go through [`Image::to_f32`] /
//! [`Image::from_f32`], which map `0..=255` to `0.0..=1.0` and back with
//! clipping and rounding.
//!
//! ```rust
//! use layerkit_core::{Image, image::Layout};
//!
//! let img = Image::filled(4, 2, Layout::Rgb, &[255, 128, 0]).unwrap();
//! let floats = img.to_f32();
//! assert_eq!(floats[0], 1.0);
//!
//! let back = Image::from_f32(4, 2, Layout::Rgb, &floats).unwrap();
//! assert_eq!(back, img);
//! ```

use crate::{Error, Result};

/// Channel layout of an [`Image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Single luminance channel.
    L,
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, alpha.
    Rgba,
}

impl Layout {
    /// Number of interleaved channels.
    #[inline]
    pub const fn channels(self) -> usize {
        match self {
            Layout::L => 1,
            Layout::Rgb => 3,
            Layout::Rgba => 4,
        }
    }

    /// Number of color channels (alpha excluded).
    #[inline]
    pub const fn color_channels(self) -> usize {
        match self {
            Layout::L => 1,
            Layout::Rgb | Layout::Rgba => 3,
        }
    }

    /// Returns `true` for [`Layout::Rgba`].
    #[inline]
    pub const fn has_alpha(self) -> bool {
        matches!(self, Layout::Rgba)
    }

    /// Layout for a raw channel count.
    pub fn from_channels(channels: usize) -> Result<Self> {
        match channels {
            1 => Ok(Layout::L),
            3 => Ok(Layout::Rgb),
            4 => Ok(Layout::Rgba),
            n => Err(Error::UnsupportedChannels(n)),
        }
    }
}

/// Converts a normalized sample to 8 bits with clipping and rounding.
#[inline]
pub fn unit_to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Converts an 8-bit sample to `[0, 1]`.
#[inline]
pub fn u8_to_unit(v: u8) -> f32 {
    v as f32 / 255.0
}

/// 8-bit luma of an RGB triple, integer ITU-R 601 weights.
///
/// Matches the `L` conversion of common imaging libraries bit-for-bit.
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}

/// Owned 8-bit image buffer.
///
/// Pixel data is stored contiguously; `data.len()` is always
/// `width * height * layout.channels()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    data: Vec<u8>,
    width: u32,
    height: u32,
    layout: Layout,
}

impl Image {
    /// Creates a zero-filled (black, transparent) image.
    ///
    /// ```rust
    /// use layerkit_core::{Image, image::Layout};
    ///
    /// let img = Image::new(16, 8, Layout::Rgba);
    /// assert_eq!(img.as_slice().len(), 16 * 8 * 4);
    /// ```
    pub fn new(width: u32, height: u32, layout: Layout) -> Self {
        let len = width as usize * height as usize * layout.channels();
        Self {
            data: vec![0; len],
            width,
            height,
            layout,
        }
    }

    /// Creates an image from existing interleaved data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the data length doesn't match.
    pub fn from_data(width: u32, height: u32, layout: Layout, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * layout.channels();
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} samples, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
            layout,
        })
    }

    /// Creates an image where every pixel equals `pixel`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelMismatch`] if `pixel` has the wrong length.
    pub fn filled(width: u32, height: u32, layout: Layout, pixel: &[u8]) -> Result<Self> {
        if pixel.len() != layout.channels() {
            return Err(Error::channel_mismatch(layout.channels(), pixel.len()));
        }
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * pixel.len());
        for _ in 0..count {
            data.extend_from_slice(pixel);
        }
        Ok(Self {
            data,
            width,
            height,
            layout,
        })
    }

    /// Creates an RGB image filled with a single color.
    pub fn solid(width: u32, height: u32, color: crate::Rgb) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * 3);
        for _ in 0..count {
            data.extend_from_slice(&color.0);
        }
        Self {
            data,
            width,
            height,
            layout: Layout::Rgb,
        }
    }

    /// Creates an image from normalized float samples (clipped, rounded).
    pub fn from_f32(width: u32, height: u32, layout: Layout, data: &[f32]) -> Result<Self> {
        let expected = width as usize * height as usize * layout.channels();
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} samples, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data: data.iter().map(|&v| unit_to_u8(v)).collect(),
            width,
            height,
            layout,
        })
    }

    /// Returns the samples normalized to `[0, 1]`.
    pub fn to_f32(&self) -> Vec<f32> {
        self.data.iter().map(|&v| u8_to_unit(v)).collect()
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Channel layout.
    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Number of interleaved channels.
    #[inline]
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the image has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw interleaved samples.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw interleaved samples.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the image, returning its samples.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels()
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the image.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.offset(x, y);
        Some(&self.data[idx..idx + self.channels()])
    }

    /// Returns the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = self.offset(x, y);
        &self.data[idx..idx + self.channels()]
    }

    /// Writes the pixel at `(x, y)` in place.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] for coordinates outside the image and
    /// [`Error::ChannelMismatch`] for a pixel of the wrong length.
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: &[u8]) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        if pixel.len() != self.channels() {
            return Err(Error::channel_mismatch(self.channels(), pixel.len()));
        }
        let idx = self.offset(x, y);
        let ch = self.channels();
        self.data[idx..idx + ch].copy_from_slice(pixel);
        Ok(())
    }

    /// Iterates over pixels as channel slices, row-major.
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(self.channels())
    }

    /// Returns `true` if both images share width and height.
    #[inline]
    pub fn same_size(&self, other: &Image) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// Converts to another channel layout.
    ///
    /// Color to `L` uses [`luma_u8`]; adding alpha makes it opaque;
    /// dropping alpha discards it.
    pub fn to_layout(&self, layout: Layout) -> Image {
        if layout == self.layout {
            return self.clone();
        }
        let mut data = Vec::with_capacity(self.pixel_count() * layout.channels());
        for px in self.pixels() {
            let (r, g, b, a) = match self.layout {
                Layout::L => (px[0], px[0], px[0], 255),
                Layout::Rgb => (px[0], px[1], px[2], 255),
                Layout::Rgba => (px[0], px[1], px[2], px[3]),
            };
            match layout {
                Layout::L => data.push(luma_u8(r, g, b)),
                Layout::Rgb => data.extend_from_slice(&[r, g, b]),
                Layout::Rgba => data.extend_from_slice(&[r, g, b, a]),
            }
        }
        Image {
            data,
            width: self.width,
            height: self.height,
            layout,
        }
    }

    /// Shorthand for `to_layout(Layout::Rgb)`.
    #[inline]
    pub fn to_rgb(&self) -> Image {
        self.to_layout(Layout::Rgb)
    }

    /// Shorthand for `to_layout(Layout::Rgba)`.
    #[inline]
    pub fn to_rgba(&self) -> Image {
        self.to_layout(Layout::Rgba)
    }

    /// Shorthand for `to_layout(Layout::L)`.
    #[inline]
    pub fn to_luma(&self) -> Image {
        self.to_layout(Layout::L)
    }

    /// Combines the color channels with `mask` as alpha into an RGBA image.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if the mask size differs.
    pub fn with_alpha(&self, mask: &Mask) -> Result<Image> {
        if self.dimensions() != mask.dimensions() {
            return Err(Error::dimension_mismatch(self.dimensions(), mask.dimensions()));
        }
        let rgb = self.to_rgb();
        let mut data = Vec::with_capacity(self.pixel_count() * 4);
        for (px, &m) in rgb.pixels().zip(mask.as_slice()) {
            data.extend_from_slice(px);
            data.push(m);
        }
        Ok(Image {
            data,
            width: self.width,
            height: self.height,
            layout: Layout::Rgba,
        })
    }

    /// Extracts the alpha channel as a mask (opaque for images without one).
    pub fn alpha(&self) -> Mask {
        let data = match self.layout {
            Layout::Rgba => self.pixels().map(|px| px[3]).collect(),
            _ => vec![Mask::MAX; self.pixel_count()],
        };
        Mask {
            data,
            width: self.width,
            height: self.height,
        }
    }
}

/// Owned single-channel selection mask stored as 8-bit levels.
///
/// `0` is unselected and [`Mask::MAX`] fully selected. Integer storage keeps
/// inversion and subtraction exact; [`Mask::to_unit`] and
/// [`Mask::from_unit`] give the `[0, 1]` view used by blurs and compositing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Mask {
    /// Fully selected level.
    pub const MAX: u8 = 255;

    /// Creates an empty (all zero) mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, 0)
    }

    /// Creates a mask where every sample equals `level`.
    pub fn filled(width: u32, height: u32, level: u8) -> Self {
        Self {
            data: vec![level; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Creates a mask from raw levels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the data length doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} samples, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Quantizes `[0, 1]` samples (clipped, rounded) into a mask.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the data length doesn't match.
    pub fn from_unit(width: u32, height: u32, data: &[f32]) -> Result<Self> {
        Self::from_data(width, height, data.iter().map(|&v| unit_to_u8(v)).collect())
    }

    /// Samples scaled to `[0, 1]`.
    pub fn to_unit(&self) -> Vec<f32> {
        self.data.iter().map(|&v| u8_to_unit(v)).collect()
    }

    /// Builds a mask from the first channel of an image.
    pub fn from_image(image: &Image) -> Self {
        let data = image.pixels().map(|px| px[0]).collect();
        Self {
            data,
            width: image.width(),
            height: image.height(),
        }
    }

    /// Renders the mask as an 8-bit `L` image.
    pub fn to_image(&self) -> Image {
        Image {
            data: self.data.clone(),
            width: self.width,
            height: self.height,
            layout: Layout::L,
        }
    }

    /// Mask width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw levels.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw levels.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the mask, returning its levels.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Level at `(x, y)`, or `None` outside the mask.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y as usize * self.width as usize + x as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rgb;

    #[test]
    fn test_from_data_length_check() {
        assert!(Image::from_data(2, 2, Layout::Rgb, vec![0; 12]).is_ok());
        let err = Image::from_data(2, 2, Layout::Rgb, vec![0; 11]).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { .. }));
    }

    #[test]
    fn test_filled_and_pixel() {
        let img = Image::filled(3, 2, Layout::Rgba, &[1, 2, 3, 4]).unwrap();
        assert_eq!(img.pixel(2, 1), &[1, 2, 3, 4]);
        assert!(img.get_pixel(3, 0).is_none());
        assert!(Image::filled(3, 2, Layout::Rgb, &[1, 2]).is_err());
    }

    #[test]
    fn test_set_pixel_bounds() {
        let mut img = Image::new(2, 2, Layout::Rgb);
        img.set_pixel(1, 1, &[9, 8, 7]).unwrap();
        assert_eq!(img.pixel(1, 1), &[9, 8, 7]);
        assert!(img.set_pixel(2, 0, &[0, 0, 0]).unwrap_err().is_bounds_error());
    }

    #[test]
    fn test_layout_conversion() {
        let img = Image::solid(2, 1, Rgb([255, 255, 255]));
        let l = img.to_luma();
        assert_eq!(l.as_slice(), &[255, 255]);

        let rgba = img.to_rgba();
        assert_eq!(rgba.pixel(0, 0), &[255, 255, 255, 255]);
        assert_eq!(rgba.to_rgb(), img);
    }

    #[test]
    fn test_luma_weights() {
        assert_eq!(luma_u8(0, 0, 0), 0);
        assert_eq!(luma_u8(255, 0, 0), 76);
        assert_eq!(luma_u8(0, 255, 0), 150);
        assert_eq!(luma_u8(0, 0, 255), 29);
    }

    #[test]
    fn test_with_alpha() {
        let img = Image::solid(2, 2, Rgb([10, 20, 30]));
        let mask = Mask::filled(2, 2, Mask::MAX);
        let rgba = img.with_alpha(&mask).unwrap();
        assert_eq!(rgba.pixel(1, 1), &[10, 20, 30, 255]);
        assert!(img.with_alpha(&Mask::new(3, 2)).is_err());
    }

    #[test]
    fn test_mask_image_roundtrip() {
        let mask = Mask::from_data(2, 1, vec![0, 255]).unwrap();
        let img = mask.to_image();
        assert_eq!(img.as_slice(), &[0, 255]);
        assert_eq!(Mask::from_image(&img), mask);
        assert_eq!(mask.to_unit(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_mask_from_unit_quantizes() {
        let mask = Mask::from_unit(4, 1, &[-0.5, 0.5, 0.999, 2.0]).unwrap();
        assert_eq!(mask.as_slice(), &[0, 128, 255, 255]);
        assert!(Mask::from_unit(2, 2, &[0.0; 3]).is_err());
    }

    #[test]
    fn test_f32_roundtrip() {
        let data: Vec<u8> = (0..=255).collect();
        let img = Image::from_data(256, 1, Layout::L, data).unwrap();
        let back = Image::from_f32(256, 1, Layout::L, &img.to_f32()).unwrap();
        assert_eq!(back, img);
    }
}
