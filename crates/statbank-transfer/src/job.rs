//! One upload attempt and its state machine.
//!
//! ```text
//! Created ──┬─> Delayed ──┐
//!           └─> Validating ┴─> Submitted ─> Pending ─> Completed
//!                                                  └─> Failed
//! ```
//!
//! States only move forward. `Failed` can be reached from any non-terminal
//! state; `Completed` and `Failed` are terminal.

use std::fmt;

use serde::{Deserialize, Serialize};
use statbank_model::{Dataset, TableDescription, ValidationReport};

use crate::credentials::Credentials;
use crate::error::{Result, TransferError};
use crate::receipt::Receipt;
use crate::service::JobHandle;
use crate::settings::{TransferSettings, check_table_id};

/// What went wrong with a failed job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Transport,
    Credential,
    /// The statbank accepted the upload but reported a failed load.
    Remote,
    /// Preparing the upload failed on this side.
    Local,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl JobFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<&TransferError> for JobFailure {
    fn from(err: &TransferError) -> Self {
        let kind = match err {
            TransferError::Transport(_) => FailureKind::Transport,
            TransferError::Credential(_) | TransferError::CredentialMismatch { .. } => {
                FailureKind::Credential
            }
            _ => FailureKind::Local,
        };
        Self::new(kind, err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobState {
    Created,
    Delayed,
    Validating,
    Submitted,
    Pending,
    Completed,
    Failed(JobFailure),
}

impl JobState {
    /// Position in the lifecycle. Transitions must increase it.
    fn rank(&self) -> u8 {
        match self {
            Self::Created => 0,
            Self::Delayed => 1,
            Self::Validating => 2,
            Self::Submitted => 3,
            Self::Pending => 4,
            Self::Completed | Self::Failed(_) => 5,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Delayed => "delayed",
            Self::Validating => "validating",
            Self::Submitted => "submitted",
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(failure) => write!(f, "failed ({:?}): {}", failure.kind, failure.message),
            other => f.write_str(other.label()),
        }
    }
}

/// Construction options for a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobOptions {
    /// Validate the data before submitting.
    pub validation: bool,
    /// Postpone validation and submission (batch members).
    pub delay: bool,
    /// Submit even when validation reported errors.
    pub override_block: bool,
}

impl Default for JobOptions {
    fn default() -> Self {
        Self {
            validation: true,
            delay: false,
            override_block: false,
        }
    }
}

impl JobOptions {
    pub fn delayed() -> Self {
        Self {
            delay: true,
            ..Self::default()
        }
    }
}

/// One upload of one table.
#[derive(Debug, Clone)]
pub struct TransferJob {
    description: TableDescription,
    dataset: Dataset,
    settings: TransferSettings,
    options: JobOptions,
    credentials: Option<Credentials>,
    state: JobState,
    report: Option<ValidationReport>,
    handle: Option<JobHandle>,
    receipt: Option<Receipt>,
}

impl TransferJob {
    /// Creates a job. Unless delayed or disabled, validation runs now.
    pub fn new(
        description: TableDescription,
        dataset: Dataset,
        mut settings: TransferSettings,
        options: JobOptions,
    ) -> Result<Self> {
        check_table_id(&description.table_id)?;
        settings.validate()?;

        let mut job = Self {
            description,
            dataset,
            settings,
            options,
            credentials: None,
            state: JobState::Created,
            report: None,
            handle: None,
            receipt: None,
        };
        if options.delay {
            job.advance(JobState::Delayed)?;
        } else if options.validation {
            job.run_validation();
            job.advance(JobState::Validating)?;
        }
        tracing::debug!(table_id = %job.table_id(), state = %job.state, "created transfer job");
        Ok(job)
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Result<Self> {
        self.set_credentials(credentials)?;
        Ok(self)
    }

    /// Sets credentials once. Different credentials never replace existing ones.
    pub fn set_credentials(&mut self, credentials: Credentials) -> Result<()> {
        match &self.credentials {
            Some(existing) if *existing != credentials => Err(TransferError::InvalidState {
                table_id: self.table_id().to_string(),
                state: "holding other credentials".to_string(),
                action: "replace credentials of",
            }),
            _ => {
                self.credentials = Some(credentials);
                Ok(())
            }
        }
    }

    pub fn table_id(&self) -> &str {
        &self.description.table_id
    }

    pub fn description(&self) -> &TableDescription {
        &self.description
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn settings(&self) -> &TransferSettings {
        &self.settings
    }

    pub fn options(&self) -> JobOptions {
        self.options
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn state(&self) -> &JobState {
        &self.state
    }

    pub fn report(&self) -> Option<&ValidationReport> {
        self.report.as_ref()
    }

    pub fn handle(&self) -> Option<&JobHandle> {
        self.handle.as_ref()
    }

    pub fn receipt(&self) -> Option<&Receipt> {
        self.receipt.as_ref()
    }

    pub fn is_delayed(&self) -> bool {
        self.state == JobState::Delayed
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Runs validation and stores the report. State is not changed.
    pub fn run_validation(&mut self) -> &ValidationReport {
        let report = statbank_validate::validate(&self.dataset, &self.description);
        self.report.insert(report)
    }

    /// Allows submission despite validation errors. Only before submission.
    pub fn override_block(&mut self) -> Result<()> {
        if self.handle.is_some() || self.state.rank() >= JobState::Submitted.rank() {
            return Err(TransferError::InvalidState {
                table_id: self.table_id().to_string(),
                state: self.state.label().to_string(),
                action: "override the validation block of",
            });
        }
        self.options.override_block = true;
        Ok(())
    }

    pub(crate) fn advance(&mut self, next: JobState) -> Result<()> {
        if self.state.is_terminal() || next.rank() <= self.state.rank() {
            return Err(TransferError::InvalidState {
                table_id: self.table_id().to_string(),
                state: self.state.label().to_string(),
                action: "move forward",
            });
        }
        tracing::info!(
            table_id = %self.description.table_id,
            from = self.state.label(),
            to = next.label(),
            "transfer state changed"
        );
        self.state = next;
        Ok(())
    }

    /// Moves a non-terminal job to `Failed`. Terminal jobs keep their state.
    pub(crate) fn fail(&mut self, failure: JobFailure) {
        if self.state.is_terminal() {
            return;
        }
        tracing::warn!(
            table_id = %self.description.table_id,
            kind = ?failure.kind,
            "{}",
            failure.message
        );
        self.state = JobState::Failed(failure);
    }

    pub(crate) fn record_submission(&mut self, handle: JobHandle, receipt: Option<Receipt>) {
        self.handle = Some(handle);
        self.receipt = receipt;
    }

    pub(crate) fn adopt_credentials(&mut self, credentials: Credentials) {
        if self.credentials.is_none() {
            self.credentials = Some(credentials);
        }
    }
}
