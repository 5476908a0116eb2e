//! # Marlin
//!
//! `marlin-rs` is the host-facing boundary of the marlin dense
//! linear-algebra bridge. It accepts flat row-major `f32` buffers,
//! validates them before any kernel runs, marshals matrices into the
//! column-major form the kernels consume, and converts results back.
//!
//! Operations:
//!
//! - vectors: [`dot`], [`norm`], [`normalize`], [`distance`]
//! - matrices: [`matrix_binary_op`], [`matrix_scalar_op`], [`matmul`]
//! - decomposition: [`svd`] via the two-phase workspace protocol
//!
//! Every call is synchronous, owns its buffers exclusively, and holds no
//! state across calls. Failures are typed [`LinalgError`] values; value
//! errors surface before any kernel is invoked, kernel failures carry the
//! routine's status code.

pub mod error;
pub mod matrix_ops;
pub mod svd;
pub mod vector_ops;

pub use error::{LinalgError, Result};
pub use matrix_ops::{matmul, matrix_binary_op, matrix_scalar_op, BinaryOp, ScalarOp};
pub use svd::{svd, SvdResult};
pub use vector_ops::{distance, dot, norm, normalize, DistanceMethod, NormMethod};

pub use marlin_core::layout::SvdJob;
