//! Error types for transfers.

use statbank_schema::SchemaError;
use statbank_transform::TransformError;
use thiserror::Error;

/// Errors that can occur while preparing, submitting or polling a transfer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransferError {
    /// Validation found errors and the job does not override the block.
    #[error("transfer of table {table_id} blocked by {errors} validation error(s)")]
    ValidationBlocked { table_id: String, errors: usize },

    /// Credentials missing, not obtainable or rejected by the service.
    #[error("credential error: {0}")]
    Credential(String),

    /// Network or remote failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The job's current state does not allow the requested action.
    #[error("cannot {action} table {table_id} while {state}")]
    InvalidState {
        table_id: String,
        state: String,
        action: &'static str,
    },

    /// A batch member carries credentials different from the first job's.
    #[error("job {index} in the batch uses different credentials than the first job")]
    CredentialMismatch { index: usize },

    #[error("a batch needs at least one job")]
    EmptyBatch,

    /// Batch members must be constructed with the delay flag.
    #[error("job {index} in the batch was not delayed")]
    NotDelayed { index: usize },

    #[error("invalid transfer settings: {0}")]
    InvalidSettings(String),

    #[error("table id must be digits only, got '{0}'")]
    InvalidTableId(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    /// Building the upload body failed.
    #[error("payload error: {0}")]
    Payload(String),

    /// The service's response could not be understood.
    #[error("unexpected response: {0}")]
    Response(String),
}

impl TransferError {
    /// Short explanation suitable for end users.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::ValidationBlocked { .. } => {
                "The data has validation errors. Fix them or override the block to transfer anyway."
            }
            Self::Credential(_) | Self::CredentialMismatch { .. } => {
                "The load user or password was missing or not accepted."
            }
            Self::Transport(_) => {
                "Could not reach the statbank. Check the connection and try again."
            }
            Self::InvalidState { .. } => "The transfer is not in a state that allows this.",
            Self::EmptyBatch | Self::NotDelayed { .. } => {
                "A batch needs one or more transfers created with delay."
            }
            Self::InvalidSettings(_) | Self::InvalidTableId(_) => {
                "The transfer settings are not valid."
            }
            Self::Schema(_) => "The table description could not be read.",
            Self::Transform(_) | Self::Payload(_) => "The data could not be prepared for upload.",
            Self::Response(_) => "The statbank answered with something unexpected.",
        }
    }

    /// Whether retrying the same call may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<csv::Error> for TransferError {
    fn from(err: csv::Error) -> Self {
        Self::Payload(err.to_string())
    }
}

/// Result type alias for transfer operations.
pub type Result<T> = std::result::Result<T, TransferError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = TransferError::Transport("connection refused".to_string());
        assert!(err.user_message().contains("connection"));

        let err = TransferError::ValidationBlocked {
            table_id: "10000".to_string(),
            errors: 2,
        };
        assert!(err.user_message().contains("override"));
        assert_eq!(
            err.to_string(),
            "transfer of table 10000 blocked by 2 validation error(s)"
        );
    }

    #[test]
    fn test_retryable() {
        assert!(TransferError::Transport("timeout".to_string()).is_retryable());
        assert!(!TransferError::Credential("rejected".to_string()).is_retryable());
        assert!(!TransferError::EmptyBatch.is_retryable());
    }
}
