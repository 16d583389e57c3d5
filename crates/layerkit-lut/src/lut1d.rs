//! 8-bit tone curves.
//!
//! A [`Lut1D`] maps every 8-bit sample value through a 256-entry table,
//! applied identically to each color channel. Alpha is never touched.

use layerkit_core::Image;
use tracing::trace;

/// A 256-entry lookup table over 8-bit samples.
///
/// # Example
///
/// ```rust
/// use layerkit_lut::Lut1D;
///
/// let lut = Lut1D::gamma(2.0);
/// assert_eq!(lut.apply(0), 0);
/// assert_eq!(lut.apply(255), 255);
/// assert_eq!(lut.apply(128), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lut1D {
    table: [u8; 256],
}

impl Lut1D {
    /// Pass-through table.
    pub fn identity() -> Self {
        Self::from_fn(|v| v)
    }

    /// Gamma curve: `round(255 * (x / 255) ^ gamma)`.
    ///
    /// A gamma of 1.0 is the identity table.
    pub fn gamma(gamma: f32) -> Self {
        let gamma = gamma as f64;
        Self::from_fn(|v| {
            let t = v as f64 / 255.0;
            (t.powf(gamma) * 255.0).round().clamp(0.0, 255.0) as u8
        })
    }

    /// Builds a table by evaluating `f` for every input value.
    pub fn from_fn(f: impl Fn(u8) -> u8) -> Self {
        let mut table = [0u8; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = f(i as u8);
        }
        Self { table }
    }

    /// The raw table.
    #[inline]
    pub fn table(&self) -> &[u8; 256] {
        &self.table
    }

    /// Maps one sample.
    #[inline]
    pub fn apply(&self, v: u8) -> u8 {
        self.table[v as usize]
    }

    /// Maps interleaved samples; with 4 channels the last one passes through.
    pub fn apply_slice(&self, src: &[u8], channels: usize) -> Vec<u8> {
        let color = if channels == 4 { 3 } else { channels };
        let mut dst = src.to_vec();
        for px in dst.chunks_exact_mut(channels.max(1)) {
            for v in &mut px[..color] {
                *v = self.table[*v as usize];
            }
        }
        dst
    }

    /// Maps the color channels of an image.
    pub fn apply_image(&self, image: &Image) -> Image {
        trace!(width = image.width(), height = image.height(), "Lut1D::apply_image");
        let mut out = image.clone();
        let data = self.apply_slice(image.as_slice(), image.channels());
        out.as_mut_slice().copy_from_slice(&data);
        out
    }
}

impl Default for Lut1D {
    fn default() -> Self {
        Self::identity()
    }
}
