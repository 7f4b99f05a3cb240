//! Batches of delayed jobs sharing one load user.

use serde::{Deserialize, Serialize};

use crate::credentials::Credentials;
use crate::error::{Result, TransferError};
use crate::job::{JobState, TransferJob};

/// Ordered group of delayed jobs submitted under one credential prompt.
///
/// Construction checks every precondition so a bad batch fails before
/// anything is sent.
#[derive(Debug)]
pub struct BatchTransfer {
    jobs: Vec<TransferJob>,
}

impl BatchTransfer {
    /// Checks the jobs and copies the first job's credentials, if any, onto the rest.
    pub fn new(mut jobs: Vec<TransferJob>) -> Result<Self> {
        let Some(first) = jobs.first() else {
            return Err(TransferError::EmptyBatch);
        };
        let shared = first.credentials().cloned();

        for (index, job) in jobs.iter().enumerate() {
            if !job.is_delayed() {
                return Err(TransferError::NotDelayed { index });
            }
            if job.credentials().is_some() && job.credentials() != shared.as_ref() {
                return Err(TransferError::CredentialMismatch { index });
            }
        }
        if let Some(credentials) = shared {
            for job in &mut jobs {
                job.adopt_credentials(credentials.clone());
            }
        }
        Ok(Self { jobs })
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn jobs(&self) -> &[TransferJob] {
        &self.jobs
    }

    /// Load user of the first job, if it has credentials.
    pub fn load_user(&self) -> Option<&str> {
        self.jobs
            .first()
            .and_then(TransferJob::credentials)
            .map(Credentials::username)
    }

    pub(crate) fn into_jobs(self) -> Vec<TransferJob> {
        self.jobs
    }
}

/// Result of one job in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobOutcome {
    pub table_id: String,
    pub state: JobState,
}

impl JobOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self.state, JobState::Failed(_))
    }
}

/// Per-job outcomes in input order, plus the jobs for further polling.
#[derive(Debug)]
pub struct BatchReport {
    pub outcomes: Vec<JobOutcome>,
    pub jobs: Vec<TransferJob>,
}

impl BatchReport {
    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed_count() == 0
    }
}
