//! Rectangle outlines and borders.

use crate::transform::pad;
use layerkit_core::{Image, Rect, Rgb};
use tracing::trace;

/// Draws a rectangle on an RGBA copy of `image`.
///
/// The rectangle spans `(x, y)` to `(x + width, y + height)` inclusive. The
/// outline is `line_width` pixels thick, drawn inward; `fill` paints the
/// rest of the interior. Everything outside the image is clipped.
///
/// ```rust
/// use layerkit_core::{Image, Rect, Rgb};
/// use layerkit_ops::draw::draw_rect;
///
/// let out = draw_rect(&Image::solid(8, 8, Rgb::BLACK), Rect::new(1, 1, 4, 4), Rgb::WHITE, 1, None);
/// assert_eq!(out.pixel(1, 3), &[255, 255, 255, 255]);
/// assert_eq!(out.pixel(5, 5), &[255, 255, 255, 255]);
/// assert_eq!(out.pixel(3, 3), &[0, 0, 0, 255]);
/// ```
pub fn draw_rect(image: &Image, rect: Rect, line: Rgb, line_width: u32, fill: Option<Rgb>) -> Image {
    trace!(?rect, line_width, "draw_rect");
    let mut out = image.to_rgba();
    if out.is_empty() {
        return out;
    }
    let (w, h) = out.dimensions();
    let (x0, y0) = (rect.x as u64, rect.y as u64);
    let (x1, y1) = (x0 + rect.width as u64, y0 + rect.height as u64);
    let lw = line_width as u64;

    let line_px = line.to_pixel(4);
    let fill_px = fill.map(|c| c.to_pixel(4));
    let row_len = w as usize * 4;
    let data = out.as_mut_slice();

    for y in y0..=y1.min(h as u64 - 1) {
        for x in x0..=x1.min(w as u64 - 1) {
            let on_line = x - x0 < lw || x1 - x < lw || y - y0 < lw || y1 - y < lw;
            let px = if on_line {
                &line_px
            } else if let Some(f) = &fill_px {
                f
            } else {
                continue;
            };
            let i = y as usize * row_len + x as usize * 4;
            data[i..i + 4].copy_from_slice(px);
        }
    }
    out
}

/// Surrounds the image with a `width` pixel border of `color`.
pub fn draw_border(image: &Image, width: u32, color: Rgb) -> Image {
    pad(image, width, width, width, width, color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use layerkit_core::image::Layout;

    #[test]
    fn test_rect_outline_and_fill() {
        let img = Image::solid(10, 10, Rgb::BLACK);
        let red = Rgb([255, 0, 0]);
        let blue = Rgb([0, 0, 255]);
        let out = draw_rect(&img, Rect::new(2, 2, 5, 5), red, 2, Some(blue));
        assert_eq!(out.layout(), Layout::Rgba);
        assert_eq!(out.pixel(2, 2), &[255, 0, 0, 255]);
        assert_eq!(out.pixel(3, 5), &[255, 0, 0, 255]);
        assert_eq!(out.pixel(7, 7), &[255, 0, 0, 255]);
        assert_eq!(out.pixel(4, 4), &[0, 0, 255, 255]);
        assert_eq!(out.pixel(8, 8), &[0, 0, 0, 255]);
    }

    #[test]
    fn test_rect_clipped() {
        let img = Image::new(4, 4, Layout::Rgba);
        let out = draw_rect(&img, Rect::new(2, 2, 10, 10), Rgb::WHITE, 1, None);
        assert_eq!(out.pixel(2, 3), &[255, 255, 255, 255]);
        assert_eq!(out.pixel(3, 3), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_border() {
        let out = draw_border(&Image::solid(3, 2, Rgb::BLACK), 2, Rgb::WHITE);
        assert_eq!(out.dimensions(), (7, 6));
        assert_eq!(out.pixel(0, 0), &[255, 255, 255]);
        assert_eq!(out.pixel(2, 2), &[0, 0, 0]);
    }
}
