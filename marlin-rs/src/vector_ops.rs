//! Vector operations: dot product, norms, normalization, distances.
//!
//! Dot, norm and normalize compute in `f32` through the Level 1 kernels.
//! Distance metrics accumulate in `f64` and return `f64`; that is the one
//! place double precision is used, and it is used for all four metrics.

use crate::error::{require_len, require_nonempty, LinalgError, Result};
use marlinblas::level1;
use marlinmath::vml;

/// Vector norm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormMethod {
    /// Sum of absolute values.
    L1,
    /// Euclidean length.
    L2,
    /// Maximum absolute value.
    LInf,
}

/// Pairwise distance selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistanceMethod {
    /// Sum of absolute differences.
    L1,
    /// Euclidean distance.
    L2,
    /// Generalized distance (sum |a_i - b_i|^p)^(1/p); requires p >= 1.
    Minkowski(f64),
    /// 1 - cos(a, b); undefined when either vector has zero L2 norm.
    Cosine,
}

/// Inner product of two equal-length vectors.
pub fn dot(a: &[f32], b: &[f32]) -> Result<f32> {
    require_nonempty("dot", a.len())?;
    require_len("dot: operand b", a.len(), b.len())?;
    Ok(level1::sdot(a.len(), a, 1, b, 1))
}

/// Norm of a non-empty vector.
///
/// LInf ties resolve to the first occurrence by index.
pub fn norm(x: &[f32], method: NormMethod) -> Result<f32> {
    require_nonempty("norm", x.len())?;
    Ok(match method {
        NormMethod::L1 => level1::sasum(x.len(), x, 1),
        NormMethod::L2 => level1::snrm2(x.len(), x, 1),
        NormMethod::LInf => x[level1::isamax(x.len(), x, 1)].abs(),
    })
}

/// Divide a vector by its norm.
///
/// Fails when the norm is exactly zero; division is undefined there.
pub fn normalize(x: &[f32], method: NormMethod) -> Result<Vec<f32>> {
    let nrm = norm(x, method)?;
    if nrm == 0.0 {
        return Err(LinalgError::ZeroNorm {
            context: "normalize".to_string(),
        });
    }
    let mut out = vec![0.0f32; x.len()];
    vml::vsdivs(x, nrm, &mut out);
    Ok(out)
}

/// Pairwise distance between two equal-length vectors.
pub fn distance(a: &[f32], b: &[f32], method: DistanceMethod) -> Result<f64> {
    require_nonempty("distance", a.len())?;
    require_len("distance: operand b", a.len(), b.len())?;

    match method {
        DistanceMethod::L1 => {
            let mut sum = 0.0f64;
            for (&x, &y) in a.iter().zip(b) {
                sum += (f64::from(x) - f64::from(y)).abs();
            }
            Ok(sum)
        }
        DistanceMethod::L2 => {
            let mut sum = 0.0f64;
            for (&x, &y) in a.iter().zip(b) {
                let diff = f64::from(x) - f64::from(y);
                sum += diff * diff;
            }
            Ok(sum.sqrt())
        }
        DistanceMethod::Minkowski(p) => {
            if p < 1.0 {
                return Err(LinalgError::InvalidExponent { p });
            }
            let mut sum = 0.0f64;
            for (&x, &y) in a.iter().zip(b) {
                sum += (f64::from(x) - f64::from(y)).abs().powf(p);
            }
            Ok(sum.powf(1.0 / p))
        }
        DistanceMethod::Cosine => {
            let mut dot = 0.0f64;
            let mut na = 0.0f64;
            let mut nb = 0.0f64;
            for (&x, &y) in a.iter().zip(b) {
                let (x, y) = (f64::from(x), f64::from(y));
                dot += x * y;
                na += x * x;
                nb += y * y;
            }
            if na == 0.0 || nb == 0.0 {
                return Err(LinalgError::ZeroNorm {
                    context: "cosine distance".to_string(),
                });
            }
            Ok(1.0 - dot / (na.sqrt() * nb.sqrt()))
        }
    }
}
