use std::path::PathBuf;

use statbank_model::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("failed to parse description JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed schema: {0}")]
    MalformedSchema(String),

    #[error("unsupported description format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SchemaError {
    pub(crate) fn io(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedSchema(message.into())
    }
}

impl From<ModelError> for SchemaError {
    fn from(err: ModelError) -> Self {
        Self::MalformedSchema(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SchemaError>;
