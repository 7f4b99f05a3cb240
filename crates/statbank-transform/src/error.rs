use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("failed to rebuild subtable {subtable}: {source}")]
    Frame {
        subtable: String,
        #[source]
        source: PolarsError,
    },
}

pub type Result<T> = std::result::Result<T, TransformError>;
