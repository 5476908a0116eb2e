//! # Marlin Core
//!
//! Shared substrate for the marlin linear-algebra crates.
//!
//! This crate provides:
//! - **CBLAS layout types**: row-major / column-major layout and transpose
//!   specifiers used by every kernel signature.
//! - **Marshaling**: the single row-major ⇄ column-major conversion point.
//!   All matrix-consuming operations convert through these two functions;
//!   no caller repeats the index arithmetic inline.

pub mod layout;
pub mod marshal;

pub use layout::{Layout, SvdJob, Transpose};
pub use marshal::{col_to_row_major, row_to_col_major};
