//! `.cube` color grades on a fixed 33-point grid.
//!
//! The loader is deliberately loose: every line that contains an ASCII
//! letter (`TITLE`, `LUT_3D_SIZE`, `DOMAIN_MIN`, ...) is skipped, as are
//! blank lines and `#` comments. All remaining lines are data rows of at
//! least three whitespace-separated numbers, stored scaled to `0..=255`.
//!
//! # Format
//!
//! ```text
//! # Comment
//! TITLE "Warm"
//! LUT_3D_SIZE 33
//! 0.000000 0.000000 0.000000
//! 0.031250 0.000000 0.000000
//! ...
//! ```
//!
//! Rows are addressed red-fastest: `r + g * 33 + b * 33 * 33`, where each
//! coordinate is the channel rescaled to `0..=32` and rounded half to even.
//! The three columns of a row become output red, green and blue.
//!
//! Exponent notation such as `1e-3` contains a letter and is skipped like a
//! keyword line.
//!
//! # Example
//!
//! ```rust,ignore
//! use layerkit_lut::cube;
//!
//! let lut = cube::read_cube("warm.cube")?;
//! let graded = lut.apply(&image)?;
//! ```

use crate::{LutError, LutResult};
use layerkit_core::image::Layout;
use layerkit_core::Image;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, trace};

/// Points per axis of the lattice.
pub const GRID: usize = 33;

/// Entries in a complete table.
pub const FULL_LEN: usize = GRID * GRID * GRID;

/// A parsed `.cube` table, entries scaled to `0..=255`.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeLut {
    entries: Vec<[f32; 3]>,
}

impl CubeLut {
    /// Wraps entries already scaled to `0..=255`.
    pub fn from_entries(entries: Vec<[f32; 3]>) -> Self {
        Self { entries }
    }

    /// Identity grade: every lattice point maps to itself.
    ///
    /// ```rust
    /// use layerkit_lut::CubeLut;
    ///
    /// let lut = CubeLut::identity();
    /// assert!(lut.is_complete());
    /// assert_eq!(lut.apply_pixel([255, 0, 0]).unwrap(), [255, 0, 0]);
    /// ```
    pub fn identity() -> Self {
        let step = 255.0 / (GRID - 1) as f32;
        let mut entries = Vec::with_capacity(FULL_LEN);
        for b in 0..GRID {
            for g in 0..GRID {
                for r in 0..GRID {
                    entries.push([r as f32 * step, g as f32 * step, b as f32 * step]);
                }
            }
        }
        Self { entries }
    }

    /// Table entries in file order.
    #[inline]
    pub fn entries(&self) -> &[[f32; 3]] {
        &self.entries
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if every lattice point has an entry.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.entries.len() >= FULL_LEN
    }

    /// Flat table index addressed by an 8-bit color.
    #[inline]
    pub fn index_of(rgb: [u8; 3]) -> usize {
        let pos = |c: u8| (c as f64 / 255.0 * (GRID - 1) as f64).round_ties_even() as usize;
        pos(rgb[0]) + pos(rgb[1]) * GRID + pos(rgb[2]) * GRID * GRID
    }

    /// Grades one color.
    ///
    /// # Errors
    ///
    /// [`LutError::IndexOutOfRange`] if the table is too short for this color.
    #[inline]
    pub fn apply_pixel(&self, rgb: [u8; 3]) -> LutResult<[u8; 3]> {
        let index = Self::index_of(rgb);
        let entry = self.entries.get(index).ok_or(LutError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })?;
        let out = |v: f32| v.round().clamp(0.0, 255.0) as u8;
        Ok([out(entry[0]), out(entry[1]), out(entry[2])])
    }

    /// Grades interleaved samples with 3 or 4 channels.
    ///
    /// A fourth channel is copied through untouched.
    ///
    /// # Errors
    ///
    /// [`LutError::UnsupportedChannels`] for fewer than 3 channels, or
    /// [`LutError::IndexOutOfRange`] from [`apply_pixel`](Self::apply_pixel).
    pub fn apply_slice(&self, src: &[u8], channels: usize) -> LutResult<Vec<u8>> {
        if !(3..=4).contains(&channels) {
            return Err(LutError::UnsupportedChannels(channels));
        }
        trace!(samples = src.len(), channels, "cube::apply_slice");

        let mut dst = src.to_vec();
        for px in dst.chunks_exact_mut(channels) {
            let graded = self.apply_pixel([px[0], px[1], px[2]])?;
            px[..3].copy_from_slice(&graded);
        }
        Ok(dst)
    }

    /// Grades an image.
    ///
    /// `L` images are expanded to RGB first; RGBA keeps its alpha.
    pub fn apply(&self, image: &Image) -> LutResult<Image> {
        let source = match image.layout() {
            Layout::L => image.to_rgb(),
            _ => image.clone(),
        };
        debug!(
            width = source.width(),
            height = source.height(),
            entries = self.entries.len(),
            "Applying cube LUT"
        );
        let data = self.apply_slice(source.as_slice(), source.channels())?;
        Ok(Image::from_data(source.width(), source.height(), source.layout(), data)?)
    }
}

/// Reads a `.cube` file.
///
/// # Example
///
/// ```rust,ignore
/// let lut = cube::read_cube("grade.cube")?;
/// ```
pub fn read_cube<P: AsRef<Path>>(path: P) -> LutResult<CubeLut> {
    let file = File::open(path.as_ref())?;
    let lut = parse_cube(BufReader::new(file))?;
    debug!(path = %path.as_ref().display(), entries = lut.len(), "Loaded cube LUT");
    Ok(lut)
}

/// Parses `.cube` text from a reader.
pub fn parse_cube<R: BufRead>(reader: R) -> LutResult<CubeLut> {
    let mut entries = Vec::with_capacity(FULL_LEN);

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') || has_letters(line) {
            continue;
        }
        entries.push(parse_row(i + 1, line)?);
    }

    Ok(CubeLut { entries })
}

fn has_letters(line: &str) -> bool {
    line.bytes().any(|b| b.is_ascii_alphabetic())
}

fn parse_row(line_no: usize, line: &str) -> LutResult<[f32; 3]> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 3 {
        return Err(LutError::parse(
            line_no,
            format!("expected 3 values, found {}", parts.len()),
        ));
    }
    let value = |s: &str| {
        s.parse::<f32>()
            .map(|v| v * 255.0)
            .map_err(|_| LutError::parse(line_no, format!("invalid number '{}'", s)))
    };
    Ok([value(parts[0])?, value(parts[1])?, value(parts[2])?])
}
