//! Error taxonomy for the boundary operations.
//!
//! Two tiers: value errors (invalid shapes, empty inputs, zero divisors,
//! bad exponents) are detected before any kernel is invoked and no partial
//! computation occurs; fatal kernel errors carry the routine's numeric
//! status code and are never retried. Use [`LinalgError::is_fatal`] to
//! distinguish caller mistakes from kernel failures.

use std::fmt;

/// Error type for all boundary operations.
#[derive(Debug, Clone, PartialEq)]
pub enum LinalgError {
    /// Operand element count differs from what the operation requires.
    ShapeMismatch {
        /// Which operand of which operation
        context: String,
        /// Element count the shape arguments imply
        expected: usize,
        /// Element count actually supplied
        actual: usize,
    },

    /// Empty operand or zero dimension where at least one element is required.
    EmptyInput {
        /// Operation name
        context: String,
    },

    /// A zero-norm vector where division by the norm is required.
    ZeroNorm {
        /// Operation name
        context: String,
    },

    /// Element-wise division by an exactly-zero divisor element.
    ZeroDivisor {
        /// Index of the first zero element in the divisor
        index: usize,
    },

    /// Scalar division by exactly zero, rejected before any element is
    /// processed.
    ZeroScalarDivisor,

    /// Minkowski exponent below 1.
    InvalidExponent {
        /// The rejected exponent
        p: f64,
    },

    /// The kernel routine reported a nonzero status code.
    Kernel {
        /// Routine name
        routine: &'static str,
        /// Status code as returned by the routine
        info: i32,
    },

    /// The workspace probe reported an unusable scratch-buffer length.
    InvalidWorkspace {
        /// Routine name
        routine: &'static str,
        /// The reported length
        reported: i64,
    },
}

impl fmt::Display for LinalgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinalgError::ShapeMismatch {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{context}: size mismatch (expected {expected}, got {actual})"
                )
            }
            LinalgError::EmptyInput { context } => {
                write!(f, "{context}: input must not be empty")
            }
            LinalgError::ZeroNorm { context } => {
                write!(f, "{context}: undefined for a zero-norm vector")
            }
            LinalgError::ZeroDivisor { index } => {
                write!(f, "division by zero at element {index}")
            }
            LinalgError::ZeroScalarDivisor => {
                write!(f, "division by zero scalar")
            }
            LinalgError::InvalidExponent { p } => {
                write!(f, "Minkowski distance requires p >= 1 (got {p})")
            }
            LinalgError::Kernel { routine, info } => {
                write!(f, "{routine} failed (info={info})")
            }
            LinalgError::InvalidWorkspace { routine, reported } => {
                write!(f, "{routine} workspace query returned invalid lwork={reported}")
            }
        }
    }
}

impl std::error::Error for LinalgError {}

impl LinalgError {
    /// Whether this is a kernel failure rather than a caller mistake.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LinalgError::Kernel { .. } | LinalgError::InvalidWorkspace { .. }
        )
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, LinalgError>;

/// The operand must contain exactly `expected` elements.
pub(crate) fn require_len(context: &str, expected: usize, actual: usize) -> Result<()> {
    if actual != expected {
        return Err(LinalgError::ShapeMismatch {
            context: context.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

/// The operand must contain at least one element.
pub(crate) fn require_nonempty(context: &str, len: usize) -> Result<()> {
    if len == 0 {
        return Err(LinalgError::EmptyInput {
            context: context.to_string(),
        });
    }
    Ok(())
}
