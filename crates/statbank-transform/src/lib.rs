//! Rounding of statistic columns.
//!
//! Statbank stores every statistic with a fixed number of decimals and reads
//! comma-separated decimal text. [`round_dataset`] rewrites each statistic
//! column that has a decimal spec into that text form, rounding half up
//! (ties away from zero). Other columns pass through untouched.

pub mod decimal;
pub mod error;
pub mod rounding;

pub use decimal::{Decimal, round_text};
pub use error::{Result, TransformError};
pub use rounding::round_dataset;
