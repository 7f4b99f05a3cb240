//! Table description parsing and persistence.
//!
//! [`parse_schema`] turns the raw extraction description returned by the
//! statbank into a [`TableDescription`]. Inconsistent input is rejected
//! here so validation never works from an ambiguous description.
//! [`save_description`] and [`load_description`] keep a parsed description
//! on disk between sessions.

pub mod error;
pub mod parser;
pub mod persist;
pub mod raw;

pub use error::{Result, SchemaError};
pub use parser::{parse_raw, parse_schema};
pub use persist::{
    FORMAT_VERSION, description_from_json, description_to_json, load_description,
    save_description,
};
pub use raw::RawSchema;

pub use statbank_model::TableDescription;
