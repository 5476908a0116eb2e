//! Row-major ⇄ column-major marshaling.
//!
//! Host buffers are row-major; the compute kernels consume column-major.
//! These two functions are the only conversion points in the workspace.
//! The defining invariant, for every valid (r, c):
//!
//! ```text
//! colmajor[c * rows + r] == rowmajor[r * cols + c]
//! ```
//!
//! Both conversions are bijective for fixed rows/cols; composing them is
//! the identity.

use crate::layout::Layout;

/// Copy a row-major matrix into a freshly allocated column-major buffer.
pub fn row_to_col_major(src: &[f32], rows: usize, cols: usize) -> Vec<f32> {
    debug_assert_eq!(src.len(), rows * cols);
    let mut dst = vec![0.0f32; rows * cols];
    for r in 0..rows {
        for c in 0..cols {
            dst[Layout::ColMajor.index(r, c, rows)] = src[Layout::RowMajor.index(r, c, cols)];
        }
    }
    dst
}

/// Copy a column-major matrix into a freshly allocated row-major buffer.
pub fn col_to_row_major(src: &[f32], rows: usize, cols: usize) -> Vec<f32> {
    debug_assert_eq!(src.len(), rows * cols);
    let mut dst = vec![0.0f32; rows * cols];
    for r in 0..rows {
        for c in 0..cols {
            dst[Layout::RowMajor.index(r, c, cols)] = src[Layout::ColMajor.index(r, c, rows)];
        }
    }
    dst
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_to_col_major_2x3() {
        // [[1, 2, 3], [4, 5, 6]]
        let row = vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
        let col = row_to_col_major(&row, 2, 3);
        assert_eq!(col, vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_col_to_row_major_2x3() {
        let col = vec![1.0f32, 4.0, 2.0, 5.0, 3.0, 6.0];
        let row = col_to_row_major(&col, 2, 3);
        assert_eq!(row, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_invariant_holds() {
        let row: Vec<f32> = (0..12).map(|i| i as f32).collect();
        let (rows, cols) = (3, 4);
        let col = row_to_col_major(&row, rows, cols);
        for r in 0..rows {
            for c in 0..cols {
                assert_eq!(col[c * rows + r], row[r * cols + c]);
            }
        }
    }

    #[test]
    fn test_round_trip_is_identity() {
        for &(rows, cols) in &[(1, 1), (1, 7), (7, 1), (3, 5), (4, 4)] {
            let row: Vec<f32> = (0..rows * cols).map(|i| (i as f32) * 0.5 - 3.0).collect();
            let back = col_to_row_major(&row_to_col_major(&row, rows, cols), rows, cols);
            assert_eq!(back, row, "round trip failed for {}x{}", rows, cols);
        }
    }

    #[test]
    fn test_vector_shapes_are_unchanged() {
        // A 1xN or Nx1 matrix has identical flat representations in both layouts.
        let v = vec![1.0f32, 2.0, 3.0, 4.0];
        assert_eq!(row_to_col_major(&v, 1, 4), v);
        assert_eq!(row_to_col_major(&v, 4, 1), v);
    }
}
