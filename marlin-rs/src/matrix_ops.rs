//! Matrix operations: element-wise, scalar, and general multiply.
//!
//! All matrices cross the boundary as flat row-major slices of length
//! rows * cols. Element-wise and scalar work rides the VML kernels in
//! place; `matmul` marshals both operands column-major, drives `sgemm`,
//! and converts the result back.

use crate::error::{require_len, require_nonempty, LinalgError, Result};
use marlin_core::layout::{Layout, Transpose};
use marlin_core::marshal;
use marlinblas::{level1, level3};
use marlinmath::vml;

/// Element-wise binary operation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// a + b
    Add,
    /// a - b
    Sub,
    /// a * b (Hadamard product)
    Hadamard,
    /// a / b; every divisor element must be nonzero
    Div,
}

impl BinaryOp {
    fn name(self) -> &'static str {
        match self {
            BinaryOp::Add => "matrix add",
            BinaryOp::Sub => "matrix subtract",
            BinaryOp::Hadamard => "matrix hadamard",
            BinaryOp::Div => "matrix divide",
        }
    }
}

/// Scalar operation selector.
///
/// `Scale` and `MulScalar` are boundary-compatible aliases for the same
/// multiplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarOp {
    /// a * s
    Scale,
    /// a + s
    AddScalar,
    /// a * s
    MulScalar,
    /// a / s; s must be nonzero
    DivScalar,
}

impl ScalarOp {
    fn name(self) -> &'static str {
        match self {
            ScalarOp::Scale => "matrix scale",
            ScalarOp::AddScalar => "matrix add scalar",
            ScalarOp::MulScalar => "matrix multiply scalar",
            ScalarOp::DivScalar => "matrix divide scalar",
        }
    }
}

/// Element-wise binary operation on two rows x cols matrices.
///
/// `Div` reports the index of the first exactly-zero divisor element and
/// produces nothing.
pub fn matrix_binary_op(
    a: &[f32],
    b: &[f32],
    rows: usize,
    cols: usize,
    op: BinaryOp,
) -> Result<Vec<f32>> {
    let size = rows * cols;
    require_nonempty(op.name(), size)?;
    require_len(&format!("{}: matrix A", op.name()), size, a.len())?;
    require_len(&format!("{}: matrix B", op.name()), size, b.len())?;

    let mut out = vec![0.0f32; size];
    match op {
        BinaryOp::Add => vml::vsadd(a, b, &mut out),
        BinaryOp::Sub => vml::vssub(a, b, &mut out),
        BinaryOp::Hadamard => vml::vsmul(a, b, &mut out),
        BinaryOp::Div => {
            if let Some(index) = b.iter().position(|&v| v == 0.0) {
                return Err(LinalgError::ZeroDivisor { index });
            }
            vml::vsdiv(a, b, &mut out);
        }
    }
    Ok(out)
}

/// Scalar operation on a rows x cols matrix.
///
/// `DivScalar` rejects an exactly-zero scalar before any element is
/// processed.
pub fn matrix_scalar_op(
    a: &[f32],
    scalar: f32,
    rows: usize,
    cols: usize,
    op: ScalarOp,
) -> Result<Vec<f32>> {
    if matches!(op, ScalarOp::DivScalar) && scalar == 0.0 {
        return Err(LinalgError::ZeroScalarDivisor);
    }
    let size = rows * cols;
    require_nonempty(op.name(), size)?;
    require_len(op.name(), size, a.len())?;

    match op {
        ScalarOp::Scale | ScalarOp::MulScalar => {
            let mut out = a.to_vec();
            level1::sscal(size, scalar, &mut out, 1);
            Ok(out)
        }
        ScalarOp::AddScalar => {
            let mut out = vec![0.0f32; size];
            vml::vsadds(a, scalar, &mut out);
            Ok(out)
        }
        ScalarOp::DivScalar => {
            let mut out = vec![0.0f32; size];
            vml::vsdivs(a, scalar, &mut out);
            Ok(out)
        }
    }
}

/// General matrix multiply: C = op(A) * op(B), returned row-major with
/// m * k elements.
///
/// op(A) is m x n (the buffer holds n x m when `transpose_a` is set)
/// and op(B) is n x k, correspondingly. Element counts are validated
/// against the stored shape for each transpose combination.
pub fn matmul(
    a: &[f32],
    b: &[f32],
    m: usize,
    n: usize,
    k: usize,
    transpose_a: bool,
    transpose_b: bool,
) -> Result<Vec<f32>> {
    if m == 0 || n == 0 || k == 0 {
        return Err(LinalgError::EmptyInput {
            context: "matmul".to_string(),
        });
    }
    require_len("matmul: matrix A", m * n, a.len())?;
    require_len("matmul: matrix B", n * k, b.len())?;

    // Stored shapes under transposition
    let (a_rows, a_cols) = if transpose_a { (n, m) } else { (m, n) };
    let (b_rows, b_cols) = if transpose_b { (k, n) } else { (n, k) };

    let ma = marshal::row_to_col_major(a, a_rows, a_cols);
    let mb = marshal::row_to_col_major(b, b_rows, b_cols);
    let mut mc = vec![0.0f32; m * k];

    let trans = |t: bool| if t { Transpose::Trans } else { Transpose::NoTrans };
    level3::sgemm(
        Layout::ColMajor,
        trans(transpose_a),
        trans(transpose_b),
        m,
        k,
        n,
        1.0,
        &ma,
        a_rows,
        &mb,
        b_rows,
        0.0,
        &mut mc,
        m,
    );

    Ok(marshal::col_to_row_major(&mc, m, k))
}
