//! Transfer of datasets to the statbank.
//!
//! A [`TransferJob`] carries one table's data, settings and validation report
//! through a forward-only state machine. A [`TransferOrchestrator`] drives
//! jobs against a [`StatbankService`]:
//!
//! - [`TransferOrchestrator::submit`] validates (unless disabled), rounds the
//!   statistics, builds the multipart body and uploads it
//! - [`TransferOrchestrator::poll`] queries the remote status once
//! - [`TransferOrchestrator::submit_batch`] submits delayed jobs in order under
//!   one credential prompt, isolating per-job failures
//!
//! Submission is blocked when validation reports errors, unless the job was
//! created with `override_block`.

pub mod batch;
pub mod credentials;
pub mod error;
pub mod job;
pub mod orchestrator;
pub mod payload;
pub mod receipt;
pub mod service;
pub mod settings;

pub use batch::{BatchReport, BatchTransfer, JobOutcome};
pub use credentials::Credentials;
pub use error::{Result, TransferError};
pub use job::{FailureKind, JobFailure, JobOptions, JobState, TransferJob};
pub use orchestrator::TransferOrchestrator;
pub use receipt::Receipt;
pub use service::{
    CredentialPrompt, JobHandle, RemoteStatus, StatbankService, SubmitRequest, Submission,
};
pub use settings::{Approve, TransferSettings};
