//! Singular value decomposition engine.
//!
//! Drives `sgesdd` through its two-phase protocol, strictly sequentially:
//!
//! 1. validate shape arguments and element count
//! 2. marshal the input column-major and allocate the job-dependent
//!    output buffers
//! 3. probe the routine for its workspace requirement (`lwork == -1`)
//! 4. allocate the scratch buffer at the reported length
//! 5. compute, then convert the factors back to row-major
//!
//! Any nonzero kernel status aborts the call as a fatal error carrying the
//! status code. Every buffer is a scoped `Vec`; all exit paths, including
//! both fatal branches, release them by drop.

use crate::error::{require_len, LinalgError, Result};
use marlin_core::layout::{Layout, SvdJob};
use marlin_core::marshal;
use marlinmath::lapack;

/// Result of a singular value decomposition.
///
/// Factors are row-major; `s` holds min(rows, cols) singular values in
/// descending order.
#[derive(Debug, Clone, PartialEq)]
pub enum SvdResult {
    /// Singular values only (`SvdJob::ValuesOnly`).
    Values(Vec<f32>),
    /// Factors and values: A ≈ U * diag(S) * Vt.
    Factors {
        /// Left singular vectors, rows x k (`Reduced`) or rows x rows (`Full`)
        u: Vec<f32>,
        /// Singular values, length min(rows, cols)
        s: Vec<f32>,
        /// Right singular vectors transposed, k x cols or cols x cols
        vt: Vec<f32>,
    },
}

/// Decompose a row-major rows x cols matrix.
pub fn svd(a: &[f32], rows: usize, cols: usize, job: SvdJob) -> Result<SvdResult> {
    if rows == 0 || cols == 0 {
        return Err(LinalgError::EmptyInput {
            context: "svd".to_string(),
        });
    }
    require_len("svd: input matrix", rows * cols, a.len())?;

    let k = rows.min(cols);
    let u_cols = job.u_cols(rows, k);
    let vt_rows = job.vt_rows(k, cols);

    let a_cm = marshal::row_to_col_major(a, rows, cols);
    let mut s = vec![0.0f32; k];
    let mut u = vec![0.0f32; rows * u_cols];
    let mut vt = vec![0.0f32; vt_rows * cols];
    let mut iwork = vec![0usize; 8 * k];
    let ldu = rows.max(1);
    let ldvt = vt_rows.max(1);

    // Phase one: workspace probe
    let mut query = [0.0f32];
    let info = lapack::sgesdd(
        Layout::ColMajor,
        job,
        rows,
        cols,
        &a_cm,
        rows,
        &mut s,
        &mut u,
        ldu,
        &mut vt,
        ldvt,
        &mut query,
        -1,
        &mut iwork,
    );
    if info != 0 {
        return Err(LinalgError::Kernel {
            routine: "sgesdd",
            info,
        });
    }
    let lwork = query[0] as i64;
    if lwork < 1 {
        return Err(LinalgError::InvalidWorkspace {
            routine: "sgesdd",
            reported: lwork,
        });
    }

    // Phase two: compute with the sized scratch buffer
    let mut work = vec![0.0f32; lwork as usize];
    let info = lapack::sgesdd(
        Layout::ColMajor,
        job,
        rows,
        cols,
        &a_cm,
        rows,
        &mut s,
        &mut u,
        ldu,
        &mut vt,
        ldvt,
        &mut work,
        lwork as isize,
        &mut iwork,
    );
    if info != 0 {
        return Err(LinalgError::Kernel {
            routine: "sgesdd",
            info,
        });
    }

    if !job.wants_factors() {
        return Ok(SvdResult::Values(s));
    }
    Ok(SvdResult::Factors {
        u: marshal::col_to_row_major(&u, rows, u_cols),
        s,
        vt: marshal::col_to_row_major(&vt, vt_rows, cols),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matmul_rm(a: &[f32], b: &[f32], m: usize, p: usize, n: usize) -> Vec<f32> {
        let mut c = vec![0.0f32; m * n];
        for i in 0..m {
            for j in 0..n {
                let mut sum = 0.0f32;
                for kk in 0..p {
                    sum += a[i * p + kk] * b[kk * n + j];
                }
                c[i * n + j] = sum;
            }
        }
        c
    }

    fn assert_reconstructs(a: &[f32], rows: usize, cols: usize, result: &SvdResult) {
        let k = rows.min(cols);
        let (u, s, vt) = match result {
            SvdResult::Factors { u, s, vt } => (u, s, vt),
            SvdResult::Values(_) => panic!("expected factors"),
        };
        let u_cols = u.len() / rows;
        let vt_rows = vt.len() / cols;
        let mut sigma = vec![0.0f32; u_cols * vt_rows];
        for i in 0..k {
            sigma[i * vt_rows + i] = s[i];
        }
        let us = matmul_rm(u, &sigma, rows, u_cols, vt_rows);
        let approx = matmul_rm(&us, vt, rows, vt_rows, cols);
        for i in 0..rows * cols {
            assert!(
                (approx[i] - a[i]).abs() < 1e-3,
                "U * diag(S) * Vt differs from A at {}: {} vs {}",
                i,
                approx[i],
                a[i]
            );
        }
    }

    #[test]
    fn test_values_only_2x2() {
        let a = vec![3.0f32, 0.0, 0.0, -4.0];
        match svd(&a, 2, 2, SvdJob::ValuesOnly).unwrap() {
            SvdResult::Values(s) => {
                assert_eq!(s.len(), 2);
                assert!(s[0] >= s[1]);
                assert!(s.iter().all(|&v| v >= 0.0));
                assert!((s[0] - 4.0).abs() < 1e-4);
                assert!((s[1] - 3.0).abs() < 1e-4);
            }
            SvdResult::Factors { .. } => panic!("ValuesOnly must not produce factors"),
        }
    }

    #[test]
    fn test_full_reconstruction_tall() {
        let a = vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0]; // 3x2
        let result = svd(&a, 3, 2, SvdJob::Full).unwrap();
        if let SvdResult::Factors { u, s, vt } = &result {
            assert_eq!(u.len(), 9);
            assert_eq!(s.len(), 2);
            assert_eq!(vt.len(), 4);
        }
        assert_reconstructs(&a, 3, 2, &result);
    }

    #[test]
    fn test_full_reconstruction_wide() {
        let a = vec![1.0f32, -2.0, 3.0, 4.0, 0.5, -6.0]; // 2x3
        let result = svd(&a, 2, 3, SvdJob::Full).unwrap();
        if let SvdResult::Factors { u, s, vt } = &result {
            assert_eq!(u.len(), 4);
            assert_eq!(s.len(), 2);
            assert_eq!(vt.len(), 9);
        }
        assert_reconstructs(&a, 2, 3, &result);
    }

    #[test]
    fn test_reduced_shapes_and_reconstruction() {
        let a = vec![1.0f32, 0.0, 0.0, 2.0, 3.0, 0.0, 0.0, 4.0]; // 4x2
        let result = svd(&a, 4, 2, SvdJob::Reduced).unwrap();
        if let SvdResult::Factors { u, s, vt } = &result {
            assert_eq!(u.len(), 4 * 2);
            assert_eq!(s.len(), 2);
            assert_eq!(vt.len(), 2 * 2);
        }
        assert_reconstructs(&a, 4, 2, &result);
    }

    #[test]
    fn test_singular_values_descending() {
        let a = vec![
            2.0f32, 1.0, 0.0, -1.0, 3.0, 0.5, 4.0, -2.0, 1.0, 0.0, 1.0, 2.0,
        ]; // 4x3
        match svd(&a, 4, 3, SvdJob::ValuesOnly).unwrap() {
            SvdResult::Values(s) => {
                assert_eq!(s.len(), 3);
                for w in s.windows(2) {
                    assert!(w[0] >= w[1], "not descending: {:?}", s);
                }
            }
            SvdResult::Factors { .. } => unreachable!(),
        }
    }

    #[test]
    fn test_empty_dimensions_rejected() {
        let err = svd(&[], 0, 3, SvdJob::ValuesOnly).unwrap_err();
        assert!(matches!(err, LinalgError::EmptyInput { .. }));
        let err = svd(&[], 3, 0, SvdJob::ValuesOnly).unwrap_err();
        assert!(matches!(err, LinalgError::EmptyInput { .. }));
    }

    #[test]
    fn test_element_count_mismatch_rejected() {
        let a = vec![1.0f32; 5];
        let err = svd(&a, 2, 3, SvdJob::ValuesOnly).unwrap_err();
        assert!(matches!(
            err,
            LinalgError::ShapeMismatch {
                expected: 6,
                actual: 5,
                ..
            }
        ));
    }
}
