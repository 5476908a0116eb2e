//! # MarlinBLAS
//!
//! BLAS-style kernels over flat `f32` buffers:
//!
//! - **Level 1**: vector-vector routines (`sdot`, `sasum`, `snrm2`,
//!   `isamax`, `sscal`, `saxpy`, `scopy`) with stride parameters.
//! - **Level 3**: general matrix multiply (`sgemm`) supporting both
//!   layouts and operand transposition.
//!
//! All routines are pure functions over caller-provided slices; none hold
//! global or thread-local state, so concurrent invocation is safe.

pub mod level1;
pub mod level3;

pub use level1::{isamax, sasum, saxpy, scopy, sdot, snrm2, sscal};
pub use level3::sgemm;
