//! Row-parallel iteration.
//!
//! Heavy per-row loops (blend, resize passes, convolution, bilateral) go
//! through [`for_each_row`]. With the default `parallel` feature rows are
//! distributed with Rayon; without it they run in order. Each row is written
//! by exactly one call, so both paths produce identical output.
//!
//! # Example
//!
//! ```rust
//! use layerkit_ops::parallel::for_each_row;
//!
//! let mut dst = vec![0u32; 4 * 3];
//! for_each_row(&mut dst, 4, |y, row| {
//!     for v in row.iter_mut() {
//!         *v = y as u32;
//!     }
//! });
//! assert_eq!(&dst[8..], &[2, 2, 2, 2]);
//! ```

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Calls `f(y, row)` for every `row_len`-sized chunk of `dst`.
pub fn for_each_row<T, F>(dst: &mut [T], row_len: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    if row_len == 0 {
        return;
    }

    #[cfg(feature = "parallel")]
    dst.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));

    #[cfg(not(feature = "parallel"))]
    dst.chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_visited_once() {
        let mut dst = vec![0usize; 7 * 5];
        for_each_row(&mut dst, 7, |y, row| {
            for (x, v) in row.iter_mut().enumerate() {
                *v += y * 7 + x;
            }
        });
        let expected: Vec<usize> = (0..35).collect();
        assert_eq!(dst, expected);
    }

    #[test]
    fn test_empty_row_len() {
        let mut dst = vec![1u8; 4];
        for_each_row(&mut dst, 0, |_, row| row.fill(0));
        assert_eq!(dst, vec![1; 4]);
    }
}
