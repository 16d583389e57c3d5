//! Scalar helpers used by animated and randomized pipeline nodes.
//!
//! - [`step_value`] / [`step_color`] - linear interpolation by step index
//! - [`random_numbers`] - seeded partition of a target sum

use crate::{Result, Rgb};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Value at `step` of `total_step` on the line from `start` to `end`.
///
/// A zero `total_step` is treated as already finished and yields `end`.
///
/// ```rust
/// use layerkit_core::numeric::step_value;
///
/// assert_eq!(step_value(10.0, 20.0, 4, 1), 12.5);
/// ```
pub fn step_value(start: f64, end: f64, total_step: u32, step: u32) -> f64 {
    if total_step == 0 {
        return end;
    }
    let factor = step as f64 / total_step as f64;
    (end - start) * factor + start
}

/// Color at `step` of `total_step` between two `#RRGGBB` colors.
///
/// Channels are interpolated independently and truncated toward zero.
///
/// ```rust
/// use layerkit_core::numeric::step_color;
///
/// assert_eq!(step_color("#000000", "#FF8040", 2, 1).unwrap(), "#7F4020");
/// ```
pub fn step_color(start_hex: &str, end_hex: &str, total_step: u32, step: u32) -> Result<String> {
    let start = Rgb::from_hex(start_hex)?;
    let end = Rgb::from_hex(end_hex)?;
    let channel = |i: usize| {
        step_value(start.0[i] as f64, end.0[i] as f64, total_step, step).clamp(0.0, 255.0) as u8
    };
    Ok(Rgb([channel(0), channel(1), channel(2)]).to_hex())
}

/// Generates `total` integers that sum exactly to `sum_of_numbers`.
///
/// The first `total - 1` values are drawn uniformly from
/// `[floor(-range / 2), floor(range / 2)]` with a generator seeded by `seed`,
/// then shifted by the floor of their sum divided by `total`. The last value
/// absorbs the remainder so the list sums to `sum_of_numbers`.
///
/// Identical arguments always produce an identical list.
///
/// ```rust
/// use layerkit_core::numeric::random_numbers;
///
/// let a = random_numbers(5, 10, 0, 100);
/// assert_eq!(a.len(), 5);
/// assert_eq!(a.iter().sum::<i64>(), 100);
/// assert_eq!(a, random_numbers(5, 10, 0, 100));
/// ```
pub fn random_numbers(total: usize, random_range: i64, seed: u64, sum_of_numbers: i64) -> Vec<i64> {
    if total == 0 {
        return Vec::new();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let a = (-random_range).div_euclid(2);
    let b = random_range.div_euclid(2);
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

    let numbers: Vec<i64> = (0..total - 1).map(|_| rng.gen_range(lo..=hi)).collect();
    let avg = numbers.iter().sum::<i64>().div_euclid(total as i64);

    let mut ret: Vec<i64> = numbers.iter().map(|n| n - avg).collect();
    let partial: i64 = ret.iter().sum();
    ret.push(sum_of_numbers - partial);
    ret
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_value_endpoints() {
        assert_eq!(step_value(3.0, 9.0, 10, 0), 3.0);
        assert_eq!(step_value(3.0, 9.0, 10, 10), 9.0);
        assert_eq!(step_value(3.0, 9.0, 0, 5), 9.0);
    }

    #[test]
    fn test_step_color() {
        assert_eq!(step_color("#102030", "#102030", 5, 3).unwrap(), "#102030");
        assert_eq!(step_color("#000000", "#FFFFFF", 1, 1).unwrap(), "#FFFFFF");
        assert!(step_color("nope", "#FFFFFF", 1, 1).is_err());
    }

    #[test]
    fn test_random_numbers_sum_and_determinism() {
        let first = random_numbers(5, 10, 0, 100);
        let second = random_numbers(5, 10, 0, 100);
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
        assert_eq!(first.iter().sum::<i64>(), 100);
    }

    #[test]
    fn test_random_numbers_range() {
        let values = random_numbers(50, 10, 7, 0);
        // Shift by the floored mean keeps the drawn values within range +/- 5.
        for v in &values[..49] {
            assert!((-10..=10).contains(v), "{v} out of range");
        }
        assert_eq!(values.iter().sum::<i64>(), 0);
    }

    #[test]
    fn test_random_numbers_edge_counts() {
        assert!(random_numbers(0, 10, 1, 5).is_empty());
        assert_eq!(random_numbers(1, 10, 1, 5), vec![5]);
    }

    #[test]
    fn test_random_numbers_seed_changes_output() {
        let a = random_numbers(20, 100, 1, 0);
        let b = random_numbers(20, 100, 2, 0);
        assert_ne!(a, b);
    }
}
