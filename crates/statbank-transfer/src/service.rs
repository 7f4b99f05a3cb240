//! Boundary to the statbank and to whoever supplies the password.
//!
//! Nothing in this crate talks to the network. Callers plug in a
//! [`StatbankService`] (HTTP in production, a fake in tests) and a
//! [`CredentialPrompt`] (terminal, keyring, environment).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::credentials::Credentials;
use crate::error::Result;
use crate::receipt::Receipt;

/// Remote identifier of a submitted upload: the load-job number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobHandle(pub String);

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Processing status reported by the statbank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteStatus {
    Pending,
    Completed,
    Failed(String),
}

/// Everything the loader needs for one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub table_id: String,
    /// Query parameters, in order.
    pub params: Vec<(&'static str, String)>,
    /// Multipart body; see [`crate::payload`].
    pub body: String,
    pub content_type: String,
}

/// Answer to an accepted upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub handle: JobHandle,
    pub status: RemoteStatus,
    pub receipt: Option<Receipt>,
}

impl Submission {
    /// Builds a submission from the loader's response message.
    pub fn from_message(message: &str, status: RemoteStatus) -> Result<Self> {
        let receipt = Receipt::parse(message)?;
        Ok(Self {
            handle: JobHandle(receipt.load_number.clone()),
            status,
            receipt: Some(receipt),
        })
    }
}

/// Remote statbank operations.
///
/// Errors should be [`crate::TransferError::Transport`] for network and
/// server failures and [`crate::TransferError::Credential`] when the
/// credentials are rejected.
pub trait StatbankService {
    /// Raw extraction description JSON for a table.
    fn fetch_description(&self, table_id: &str) -> Result<String>;

    fn submit(&self, request: &SubmitRequest, credentials: &Credentials) -> Result<Submission>;

    /// One status query. Never waits.
    fn poll(&self, handle: &JobHandle) -> Result<RemoteStatus>;
}

/// Source of load-user credentials.
pub trait CredentialPrompt {
    /// Asks for credentials, optionally for a known load user.
    fn prompt(&mut self, load_user: Option<&str>) -> Result<Credentials>;
}
