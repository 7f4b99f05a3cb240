//! Dataset validation against a table description.
//!
//! [`validate`] runs every check category in a fixed order and collects all
//! findings into one [`ValidationReport`]:
//!
//! 1. **Subtable count**: one frame per subtable, named as described
//! 2. **Column count**: frame width equals the declared column count
//! 3. **Categorical codes**: values come from the column's codelist
//! 4. **Suppression codes**: markers are valid, and present where a value is missing
//! 5. **Time format**: time values match the declared pattern
//! 6. **Numeric precision**: statistics carry no more decimals than declared
//!
//! A subtable-count problem stops validation, since frames cannot be paired
//! with subtables. A column-count problem skips the remaining checks for that
//! subtable only. Precision findings are warnings and never block a transfer.
//!
//! Validation is pure: no I/O, and the dataset is never modified.
//!
//! # Example
//!
//! ```ignore
//! let report = statbank_validate::validate(&dataset, &description);
//! for finding in report.errors() {
//!     println!("[{}] {}", finding.category, finding.message);
//! }
//! ```

mod checks;
mod column_reader;

pub use column_reader::ColumnReader;
pub use statbank_model::{Category, Finding, Severity, ValidationReport};

use statbank_model::{Dataset, TableDescription};

/// Validate a dataset against a table description.
pub fn validate(dataset: &Dataset, description: &TableDescription) -> ValidationReport {
    checks::run_all(dataset, description)
}
