//! BLAS Level 3: Matrix-matrix operations.
//!
//! `sgemm` carries the full BLAS contract: C := alpha * op(A) * op(B) +
//! beta * C, with both layouts and independent operand transposition.

use marlin_core::layout::{Layout, Transpose};

// ============================================================================
// SGEMM: Single-precision General Matrix Multiply
// C := alpha * op(A) * op(B) + beta * C
// ============================================================================

/// Single-precision GEMM.
///
/// - `m` - rows of op(A) and C
/// - `n` - columns of op(B) and C
/// - `k` - columns of op(A) and rows of op(B)
/// - `lda`/`ldb`/`ldc` - leading dimensions of the stored operands
// TODO(blocking): this is the straightforward triple loop; a cache-blocked
// panel-packing variant can slot in behind the same signature once the
// bridge's matrix sizes warrant it.
pub fn sgemm(
    layout: Layout,
    trans_a: Transpose,
    trans_b: Transpose,
    m: usize,
    n: usize,
    k: usize,
    alpha: f32,
    a: &[f32],
    lda: usize,
    b: &[f32],
    ldb: usize,
    beta: f32,
    c: &mut [f32],
    ldc: usize,
) {
    // Scale C by beta
    if beta == 0.0 {
        for i in 0..m {
            for j in 0..n {
                c[layout.index(i, j, ldc)] = 0.0;
            }
        }
    } else if beta != 1.0 {
        for i in 0..m {
            for j in 0..n {
                let idx = layout.index(i, j, ldc);
                c[idx] *= beta;
            }
        }
    }

    if alpha == 0.0 || m == 0 || n == 0 || k == 0 {
        return;
    }

    for i in 0..m {
        for j in 0..n {
            let mut sum = 0.0f32;
            for p in 0..k {
                let a_val = match (layout, trans_a) {
                    (Layout::RowMajor, Transpose::NoTrans) => a[i * lda + p],
                    (Layout::RowMajor, Transpose::Trans) => a[p * lda + i],
                    (Layout::ColMajor, Transpose::NoTrans) => a[p * lda + i],
                    (Layout::ColMajor, Transpose::Trans) => a[i * lda + p],
                };
                let b_val = match (layout, trans_b) {
                    (Layout::RowMajor, Transpose::NoTrans) => b[p * ldb + j],
                    (Layout::RowMajor, Transpose::Trans) => b[j * ldb + p],
                    (Layout::ColMajor, Transpose::NoTrans) => b[j * ldb + p],
                    (Layout::ColMajor, Transpose::Trans) => b[p * ldb + j],
                };
                sum += a_val * b_val;
            }
            let idx = layout.index(i, j, ldc);
            c[idx] += alpha * sum;
        }
    }
}
