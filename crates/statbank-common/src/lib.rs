//! Shared utilities for statbank crates.
//!
//! Polars cell helpers used by validation, rounding and payload building.

pub mod numeric;
pub mod polars;

pub use numeric::fraction_digits;
pub use polars::{any_to_f64, any_to_string, cell_text, is_blank, parse_f64};
