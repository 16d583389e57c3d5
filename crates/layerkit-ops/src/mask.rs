//! Mask tools.
//!
//! Masks are 8-bit [`Mask`] levels; growth and blur work on the `[0, 1]`
//! view and quantize back. The rectangle searches take an
//! [`Image`] instead and binarize its luma at 127 (strictly greater is set).
//!
//! # Operations
//!
//! - [`grow_mask`] - Cross-footprint dilation/erosion plus optional blur
//! - [`invert_mask`] / [`subtract_mask`]
//! - [`min_bounding_rect`] - Largest component bounding box
//! - [`max_inscribed_rect`] - Rectangle spanned by boundary corners
//! - [`remove_background`] - Composite over a solid color

use crate::filter::{dilate, erode, gaussian_blur_mask, Footprint};
use crate::{OpsError, OpsResult};
use layerkit_core::image::Layout;
use layerkit_core::{Image, Mask, Rect, Rgb};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Dilates (`grow > 0`) or erodes (`grow < 0`) `|grow|` times with a cross
/// footprint, then blurs with sigma `blur` (`0` skips the blur).
///
/// ```rust
/// use layerkit_core::Mask;
/// use layerkit_ops::mask::grow_mask;
///
/// let mut m = Mask::new(5, 5);
/// m.as_mut_slice()[12] = Mask::MAX;
/// let grown = grow_mask(&m, 1, 0.0).unwrap();
/// assert_eq!(grown.as_slice().iter().filter(|&&v| v == Mask::MAX).count(), 5);
/// ```
pub fn grow_mask(mask: &Mask, grow: i32, blur: f32) -> OpsResult<Mask> {
    let (w, h) = (mask.width() as usize, mask.height() as usize);
    debug!(grow, blur, "Growing mask");

    let mut data = mask.to_unit();
    for _ in 0..grow.unsigned_abs() {
        data = if grow < 0 {
            erode(&data, w, h, 1, 1, Footprint::Cross)?
        } else {
            dilate(&data, w, h, 1, 1, Footprint::Cross)?
        };
    }
    let grown = Mask::from_unit(mask.width(), mask.height(), &data)?;

    if blur > 0.0 {
        gaussian_blur_mask(&grown, blur)
    } else {
        Ok(grown)
    }
}

/// `MAX - m` for every level; applying it twice gives back `mask`.
pub fn invert_mask(mask: &Mask) -> Mask {
    let mut out = mask.clone();
    for v in out.as_mut_slice() {
        *v = Mask::MAX - *v;
    }
    out
}

/// `a - b`, saturating at zero.
///
/// # Errors
///
/// [`OpsError::SizeMismatch`] when the masks differ in size.
pub fn subtract_mask(a: &Mask, b: &Mask) -> OpsResult<Mask> {
    if a.dimensions() != b.dimensions() {
        return Err(OpsError::size_mismatch(a.dimensions(), b.dimensions()));
    }
    let data = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(x, y)| x.saturating_sub(*y))
        .collect();
    Ok(Mask::from_data(a.width(), a.height(), data)?)
}

/// Binarized luma of an image.
struct Binary {
    width: usize,
    height: usize,
    set: Vec<bool>,
}

impl Binary {
    fn from_image(image: &Image) -> Self {
        let luma = image.to_luma();
        Self {
            width: image.width() as usize,
            height: image.height() as usize,
            set: luma.as_slice().iter().map(|&v| v > 127).collect(),
        }
    }

    #[inline]
    fn get(&self, x: i64, y: i64) -> bool {
        x >= 0
            && y >= 0
            && (x as usize) < self.width
            && (y as usize) < self.height
            && self.set[y as usize * self.width + x as usize]
    }
}

/// One 8-connected component.
#[derive(Debug, Clone, Copy)]
struct Component {
    label: u32,
    /// First pixel in raster order: topmost, then leftmost.
    start: (i64, i64),
    pixels: usize,
    min: (i64, i64),
    max: (i64, i64),
}

impl Component {
    fn bounds(&self) -> Rect {
        Rect::new(
            self.min.0 as u32,
            self.min.1 as u32,
            (self.max.0 - self.min.0 + 1) as u32,
            (self.max.1 - self.min.1 + 1) as u32,
        )
    }
}

const NEIGHBOURS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Labels 8-connected components in raster discovery order (labels from 1).
fn label_components(bin: &Binary) -> (Vec<u32>, Vec<Component>) {
    let mut labels = vec![0u32; bin.set.len()];
    let mut comps = Vec::new();
    let mut queue = VecDeque::new();

    for y in 0..bin.height as i64 {
        for x in 0..bin.width as i64 {
            let idx = y as usize * bin.width + x as usize;
            if !bin.set[idx] || labels[idx] != 0 {
                continue;
            }
            let label = comps.len() as u32 + 1;
            let mut comp = Component {
                label,
                start: (x, y),
                pixels: 0,
                min: (x, y),
                max: (x, y),
            };
            labels[idx] = label;
            queue.push_back((x, y));
            while let Some((cx, cy)) = queue.pop_front() {
                comp.pixels += 1;
                comp.min = (comp.min.0.min(cx), comp.min.1.min(cy));
                comp.max = (comp.max.0.max(cx), comp.max.1.max(cy));
                for (dx, dy) in NEIGHBOURS {
                    let (nx, ny) = (cx + dx, cy + dy);
                    if bin.get(nx, ny) {
                        let n = ny as usize * bin.width + nx as usize;
                        if labels[n] == 0 {
                            labels[n] = label;
                            queue.push_back((nx, ny));
                        }
                    }
                }
            }
            comps.push(comp);
        }
    }
    (labels, comps)
}

/// Bounding box of the component whose box has the largest area.
///
/// Ties keep the component found first in raster order. Returns an empty
/// rectangle when nothing is set.
///
/// ```rust
/// use layerkit_core::{Image, Rect, image::Layout};
/// use layerkit_ops::mask::min_bounding_rect;
///
/// let mut img = Image::new(8, 8, Layout::L);
/// img.set_pixel(2, 3, &[255]).unwrap();
/// img.set_pixel(3, 4, &[255]).unwrap();
/// assert_eq!(min_bounding_rect(&img), Rect::new(2, 3, 2, 2));
/// ```
pub fn min_bounding_rect(image: &Image) -> Rect {
    let bin = Binary::from_image(image);
    let (_, comps) = label_components(&bin);
    trace!(components = comps.len(), "min_bounding_rect");

    let mut best = Rect::default();
    for comp in &comps {
        let rect = comp.bounds();
        if rect.area() > best.area() {
            best = rect;
        }
    }
    best
}

// Clockwise in screen coordinates, starting west.
const RING: [(i64, i64); 8] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
];

fn ring_index(d: (i64, i64)) -> usize {
    RING.iter().position(|&r| r == d).unwrap_or(0)
}

/// Moore-neighbour trace of a component's outer boundary.
fn trace_boundary(labels: &[u32], width: usize, height: usize, comp: &Component) -> Vec<(i64, i64)> {
    let inside = |(x, y): (i64, i64)| {
        x >= 0
            && y >= 0
            && (x as usize) < width
            && (y as usize) < height
            && labels[y as usize * width + x as usize] == comp.label
    };

    let start = comp.start;
    let mut contour = vec![start];
    let mut cur = start;
    // West of the first raster pixel is never set.
    let mut back = 0usize;
    let mut first_next = None;
    let limit = 4 * comp.pixels + 16;

    for _ in 0..limit {
        let found = (1..=8).map(|k| (back + k) % 8).find_map(|d| {
            let n = (cur.0 + RING[d].0, cur.1 + RING[d].1);
            inside(n).then_some((n, d))
        });
        let Some((next, d)) = found else {
            break;
        };
        if cur == start {
            match first_next {
                None => first_next = Some(next),
                Some(f) if f == next => break,
                Some(_) => {}
            }
        }
        let prev = RING[(d + 7) % 8];
        let p = (cur.0 + prev.0, cur.1 + prev.1);
        back = ring_index((p.0 - next.0, p.1 - next.1));
        cur = next;
        contour.push(cur);
    }

    if contour.len() > 1 && contour.last() == contour.first() {
        contour.pop();
    }
    contour
}

/// Drops points lying inside straight runs, keeping direction changes.
fn simplify(points: &[(i64, i64)]) -> Vec<(i64, i64)> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }
    (0..n)
        .filter(|&i| {
            let (p, c, q) = (points[(i + n - 1) % n], points[i], points[(i + 1) % n]);
            (c.0 - p.0, c.1 - p.1) != (q.0 - c.0, q.1 - c.1)
        })
        .map(|i| points[i])
        .collect()
}

/// Largest rectangle with two boundary corners as opposite vertices whose
/// four edges lie inside the mask.
///
/// Works on the boundary of the largest component (by pixel count). Every
/// pair of boundary corners is a candidate; candidates are tried by
/// decreasing area. The search is quadratic in the number of corners.
/// Width and height are coordinate differences, so a single pixel yields
/// a zero-sized rectangle. Returns `None` when nothing is set.
pub fn max_inscribed_rect(image: &Image) -> Option<Rect> {
    let bin = Binary::from_image(image);
    let (labels, comps) = label_components(&bin);
    let mut largest: Option<&Component> = None;
    for comp in &comps {
        if largest.is_none_or(|l| comp.pixels > l.pixels) {
            largest = Some(comp);
        }
    }
    let comp = largest?;

    let corners = simplify(&trace_boundary(&labels, bin.width, bin.height, comp));
    debug!(corners = corners.len(), "Searching inscribed rectangle");

    let mut candidates = Vec::with_capacity(corners.len() * corners.len());
    for &a in &corners {
        for &b in &corners {
            let area = (b.0 - a.0).abs() * (b.1 - a.1).abs();
            candidates.push((a, b, area));
        }
    }
    candidates.sort_by(|x, y| y.2.cmp(&x.2));

    let valid = |(x1, y1): (i64, i64), (x2, y2): (i64, i64)| {
        let (lx, hx) = (x1.min(x2), x1.max(x2));
        let (ly, hy) = (y1.min(y2), y1.max(y2));
        (lx..=hx).all(|x| bin.get(x, y1) && bin.get(x, y2))
            && (ly..=hy).all(|y| bin.get(x1, y) && bin.get(x2, y))
    };

    candidates
        .into_iter()
        .find(|&(a, b, _)| valid(a, b))
        .map(|(a, b, _)| {
            Rect::new(
                a.0.min(b.0) as u32,
                a.1.min(b.1) as u32,
                (b.0 - a.0).unsigned_abs() as u32,
                (b.1 - a.1).unsigned_abs() as u32,
            )
        })
}

/// Composites `image` over a solid `color` using `mask` as alpha (RGB).
///
/// # Errors
///
/// [`OpsError::SizeMismatch`] when the mask size differs.
pub fn remove_background(image: &Image, mask: &Mask, color: Rgb) -> OpsResult<Image> {
    if image.dimensions() != mask.dimensions() {
        return Err(OpsError::size_mismatch(image.dimensions(), mask.dimensions()));
    }
    let rgb = image.to_rgb();
    let mut data = Vec::with_capacity(rgb.pixel_count() * 3);
    for (px, m) in rgb.pixels().zip(mask.to_unit()) {
        for (c, &v) in px.iter().enumerate() {
            let mixed = v as f32 * m + color.0[c] as f32 * (1.0 - m);
            data.push(mixed.round().clamp(0.0, 255.0) as u8);
        }
    }
    Ok(Image::from_data(image.width(), image.height(), Layout::Rgb, data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_image(width: u32, height: u32, on: impl Fn(u32, u32) -> bool) -> Image {
        let mut img = Image::new(width, height, Layout::L);
        for y in 0..height {
            for x in 0..width {
                if on(x, y) {
                    img.set_pixel(x, y, &[255]).unwrap();
                }
            }
        }
        img
    }

    #[test]
    fn test_grow_then_shrink() {
        let mut m = Mask::new(7, 7);
        m.as_mut_slice()[3 * 7 + 3] = Mask::MAX;
        let grown = grow_mask(&m, 2, 0.0).unwrap();
        // Two cross dilations give a diamond of radius 2.
        assert_eq!(grown.as_slice().iter().filter(|&&v| v == Mask::MAX).count(), 13);
        let back = grow_mask(&grown, -2, 0.0).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn test_grow_blur_softens() {
        let mut m = Mask::new(9, 9);
        m.as_mut_slice()[4 * 9 + 4] = Mask::MAX;
        let soft = grow_mask(&m, 0, 1.5).unwrap();
        assert!(soft.get(4, 4).unwrap() < Mask::MAX);
        assert!(soft.get(5, 4).unwrap() > 0);
    }

    #[test]
    fn test_invert_involution() {
        let levels: Vec<u8> = (0..=255).collect();
        let m = Mask::from_data(16, 16, levels).unwrap();
        assert_eq!(invert_mask(&m).get(1, 0), Some(254));
        assert_eq!(invert_mask(&m).get(15, 15), Some(0));
        assert_eq!(invert_mask(&invert_mask(&m)), m);

        // Levels produced from arbitrary floats survive too.
        let q = Mask::from_unit(3, 1, &[1e-10, 0.1, 0.3]).unwrap();
        assert_eq!(invert_mask(&invert_mask(&q)).as_slice(), q.as_slice());
    }

    #[test]
    fn test_subtract_mask() {
        let a = Mask::from_data(3, 1, vec![255, 128, 50]).unwrap();
        let b = Mask::from_data(3, 1, vec![64, 128, 230]).unwrap();
        assert_eq!(subtract_mask(&a, &b).unwrap().as_slice(), &[191, 0, 0]);
        assert!(matches!(
            subtract_mask(&a, &Mask::new(1, 3)),
            Err(OpsError::SizeMismatch(_))
        ));
    }

    #[test]
    fn test_min_bounding_rect_largest() {
        let img = mask_image(12, 12, |x, y| {
            ((1..4).contains(&x) && (1..4).contains(&y)) || ((6..8).contains(&x) && (2..7).contains(&y))
        });
        assert_eq!(min_bounding_rect(&img), Rect::new(6, 2, 2, 5));
        assert_eq!(min_bounding_rect(&Image::new(4, 4, Layout::L)), Rect::default());
    }

    #[test]
    fn test_min_bounding_rect_tie_keeps_first() {
        let img = mask_image(10, 10, |x, y| {
            ((0..2).contains(&x) && (0..2).contains(&y)) || ((6..8).contains(&x) && (6..8).contains(&y))
        });
        assert_eq!(min_bounding_rect(&img), Rect::new(0, 0, 2, 2));
    }

    #[test]
    fn test_inscribed_rect_of_rectangle() {
        let img = mask_image(10, 10, |x, y| (2..=7).contains(&x) && (3..=6).contains(&y));
        assert_eq!(max_inscribed_rect(&img), Some(Rect::new(2, 3, 5, 3)));
    }

    #[test]
    fn test_inscribed_rect_of_l_shape() {
        let img = mask_image(10, 10, |x, y| y <= 3 || x <= 3);
        let rect = max_inscribed_rect(&img).unwrap();
        assert_eq!(rect.area(), 27);
        for x in rect.x..=rect.x + rect.width {
            for y in rect.y..=rect.y + rect.height {
                assert_eq!(img.pixel(x, y), &[255]);
            }
        }
    }

    #[test]
    fn test_inscribed_rect_degenerate() {
        assert_eq!(max_inscribed_rect(&Image::new(5, 5, Layout::L)), None);
        let dot = mask_image(5, 5, |x, y| x == 2 && y == 2);
        assert_eq!(max_inscribed_rect(&dot), Some(Rect::new(2, 2, 0, 0)));
    }

    #[test]
    fn test_trace_visits_corners() {
        let img = mask_image(6, 6, |x, y| (1..=4).contains(&x) && (1..=3).contains(&y));
        let bin = Binary::from_image(&img);
        let (labels, comps) = label_components(&bin);
        let contour = trace_boundary(&labels, 6, 6, &comps[0]);
        // Perimeter of a 4x3 block.
        assert_eq!(contour.len(), 10);
        assert_eq!(simplify(&contour), vec![(1, 1), (4, 1), (4, 3), (1, 3)]);
    }

    #[test]
    fn test_remove_background() {
        let img = Image::solid(2, 1, Rgb([200, 100, 0]));
        let mask = Mask::from_data(2, 1, vec![255, 0]).unwrap();
        let out = remove_background(&img, &mask, Rgb([0, 0, 255])).unwrap();
        assert_eq!(out.pixel(0, 0), &[200, 100, 0]);
        assert_eq!(out.pixel(1, 0), &[0, 0, 255]);
        assert!(remove_background(&img, &Mask::new(1, 1), Rgb::BLACK).is_err());
    }
}
