//! CBLAS-style layout and routine specifiers.
//!
//! Both row-major and column-major layouts are supported throughout the
//! marlin crates. The discriminant values match the CBLAS API convention.

/// Memory layout for matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Layout {
    /// Row-major (C-style): elements in a row are contiguous.
    RowMajor = 101,
    /// Column-major (Fortran-style): elements in a column are contiguous.
    ColMajor = 102,
}

impl Default for Layout {
    fn default() -> Self {
        Self::RowMajor
    }
}

impl Layout {
    /// Leading dimension stride for an M x N matrix.
    #[inline(always)]
    pub fn leading_dim(self, rows: usize, cols: usize) -> usize {
        match self {
            Layout::RowMajor => cols,
            Layout::ColMajor => rows,
        }
    }

    /// Linear index into a flat array for element (i, j) of an M x N matrix.
    #[inline(always)]
    pub fn index(self, i: usize, j: usize, ld: usize) -> usize {
        match self {
            Layout::RowMajor => i * ld + j,
            Layout::ColMajor => j * ld + i,
        }
    }
}

/// Transpose operation for matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Transpose {
    /// No transpose.
    NoTrans = 111,
    /// Transpose.
    Trans = 112,
}

impl Default for Transpose {
    fn default() -> Self {
        Self::NoTrans
    }
}

/// Which singular-vector factors an SVD routine produces.
///
/// The factor shapes for an M x N input with K = min(M, N):
///
/// | job          | U       | Vt      |
/// |--------------|---------|---------|
/// | `ValuesOnly` | —       | —       |
/// | `Reduced`    | M x K   | K x N   |
/// | `Full`       | M x M   | N x N   |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SvdJob {
    /// Singular values only; U and Vt are not referenced.
    ValuesOnly,
    /// Thin factors: the K leading singular vectors on each side.
    Reduced,
    /// Square orthogonal factors, including the null-space columns.
    Full,
}

impl SvdJob {
    /// Whether U and Vt are produced.
    #[inline]
    pub fn wants_factors(self) -> bool {
        !matches!(self, SvdJob::ValuesOnly)
    }

    /// Number of columns of U for an M x N input, K = min(M, N).
    #[inline]
    pub fn u_cols(self, m: usize, k: usize) -> usize {
        match self {
            SvdJob::ValuesOnly => 0,
            SvdJob::Reduced => k,
            SvdJob::Full => m,
        }
    }

    /// Number of rows of Vt for an M x N input, K = min(M, N).
    #[inline]
    pub fn vt_rows(self, k: usize, n: usize) -> usize {
        match self {
            SvdJob::ValuesOnly => 0,
            SvdJob::Reduced => k,
            SvdJob::Full => n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_dim() {
        assert_eq!(Layout::RowMajor.leading_dim(3, 5), 5);
        assert_eq!(Layout::ColMajor.leading_dim(3, 5), 3);
    }

    #[test]
    fn test_index_row_major() {
        // 2x3 matrix, element (1, 2) is the last one
        assert_eq!(Layout::RowMajor.index(1, 2, 3), 5);
    }

    #[test]
    fn test_index_col_major() {
        // 2x3 matrix, element (1, 2) is the last one
        assert_eq!(Layout::ColMajor.index(1, 2, 2), 5);
    }

    #[test]
    fn test_svd_job_shapes() {
        // 4x3 input, k = 3
        assert_eq!(SvdJob::ValuesOnly.u_cols(4, 3), 0);
        assert_eq!(SvdJob::Reduced.u_cols(4, 3), 3);
        assert_eq!(SvdJob::Full.u_cols(4, 3), 4);
        assert_eq!(SvdJob::Reduced.vt_rows(3, 3), 3);
        assert_eq!(SvdJob::Full.vt_rows(3, 3), 3);
        assert!(!SvdJob::ValuesOnly.wants_factors());
        assert!(SvdJob::Full.wants_factors());
    }
}
