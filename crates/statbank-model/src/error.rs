use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("expected {expected} subtables, got {found}")]
    SubtableCount { expected: usize, found: usize },
    #[error("inconsistent table description: {0}")]
    Inconsistent(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
