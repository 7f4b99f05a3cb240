//! Caller-owned driver for transfers.
//!
//! The orchestrator owns the service connection, the credential prompt and
//! the session credentials. There is no process-wide client state: two
//! orchestrators never share credentials.

use statbank_model::{Dataset, TableDescription, ValidationReport};
use statbank_schema::parse_schema;
use statbank_transform::round_dataset;

use crate::batch::{BatchReport, BatchTransfer, JobOutcome};
use crate::credentials::Credentials;
use crate::error::{Result, TransferError};
use crate::job::{FailureKind, JobFailure, JobOptions, JobState, TransferJob};
use crate::payload;
use crate::service::{CredentialPrompt, RemoteStatus, StatbankService, SubmitRequest};
use crate::settings::{TransferSettings, check_table_id};

pub struct TransferOrchestrator<S, P> {
    service: S,
    prompt: P,
    session: Option<Credentials>,
}

impl<S: StatbankService, P: CredentialPrompt> TransferOrchestrator<S, P> {
    pub fn new(service: S, prompt: P) -> Self {
        Self {
            service,
            prompt,
            session: None,
        }
    }

    /// Uses these credentials for jobs that bring none of their own.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.session = Some(credentials);
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Drops the session credentials; the next submission prompts again.
    pub fn forget_credentials(&mut self) {
        self.session = None;
    }

    /// Fetches and parses the description of a table.
    pub fn fetch_description(&self, table_id: &str) -> Result<TableDescription> {
        check_table_id(table_id)?;
        let raw = self.service.fetch_description(table_id)?;
        let mut description = parse_schema(&raw)?;
        description.load_user = self.session.as_ref().map(|c| c.username().to_string());
        tracing::info!(
            table_id,
            retrieved_at = %description.retrieved_at,
            "fetched table description"
        );
        Ok(description)
    }

    /// Fetches the description and builds a job for `dataset`.
    pub fn prepare(
        &self,
        table_id: &str,
        dataset: Dataset,
        settings: TransferSettings,
        options: JobOptions,
    ) -> Result<TransferJob> {
        let description = self.fetch_description(table_id)?;
        TransferJob::new(description, dataset, settings, options)
    }

    /// Submits one job.
    ///
    /// Fails with [`TransferError::ValidationBlocked`] without touching the
    /// job's state when validation found errors and the block is not
    /// overridden. Credential, payload and transport failures move the job to
    /// `Failed` and are returned as well.
    pub fn submit(&mut self, job: &mut TransferJob) -> Result<()> {
        let span = tracing::info_span!("transfer", table_id = %job.table_id());
        let _guard = span.enter();

        let submittable = matches!(
            job.state(),
            JobState::Created | JobState::Delayed | JobState::Validating
        );
        if job.handle().is_some() || !submittable {
            return Err(TransferError::InvalidState {
                table_id: job.table_id().to_string(),
                state: job.state().label().to_string(),
                action: "submit",
            });
        }

        if job.options().validation {
            self.check_validation(job)?;
        }

        let credentials = match self.resolve_credentials(job) {
            Ok(credentials) => credentials,
            Err(err) => {
                job.fail(JobFailure::from(&err));
                return Err(err);
            }
        };
        job.adopt_credentials(credentials.clone());

        let request = match build_request(job) {
            Ok(request) => request,
            Err(err) => {
                job.fail(JobFailure::from(&err));
                return Err(err);
            }
        };

        match self.service.submit(&request, &credentials) {
            Ok(submission) => {
                tracing::info!(handle = %submission.handle, "upload accepted");
                job.record_submission(submission.handle, submission.receipt);
                job.advance(JobState::Submitted)?;
                apply_status(job, submission.status)
            }
            Err(err) => {
                if matches!(err, TransferError::Credential(_)) {
                    self.forget_rejected(&credentials);
                }
                job.fail(JobFailure::from(&err));
                Err(err)
            }
        }
    }

    /// Queries the remote status once. A no-op for terminal jobs.
    pub fn poll(&mut self, job: &mut TransferJob) -> Result<()> {
        if job.is_terminal() {
            return Ok(());
        }
        let Some(handle) = job.handle().cloned() else {
            return Err(TransferError::InvalidState {
                table_id: job.table_id().to_string(),
                state: job.state().label().to_string(),
                action: "poll",
            });
        };
        match self.service.poll(&handle) {
            Ok(status) => apply_status(job, status),
            Err(err) => {
                job.fail(JobFailure::from(&err));
                Err(err)
            }
        }
    }

    /// Submits every job of a batch, in order, under one credential prompt.
    ///
    /// Per-job failures are recorded in the report and do not stop the
    /// remaining jobs.
    pub fn submit_batch(&mut self, batch: BatchTransfer) -> BatchReport {
        let span = tracing::info_span!("batch", jobs = batch.len());
        let _guard = span.enter();

        let first = batch.jobs().first();
        let load_user = first.and_then(|job| job.description().load_user.clone());
        let shared = match first.and_then(TransferJob::credentials) {
            Some(credentials) => Ok(credentials.clone()),
            None => self.session_or_prompt(load_user.as_deref()),
        };

        let mut jobs = batch.into_jobs();
        let mut outcomes = Vec::with_capacity(jobs.len());
        for job in &mut jobs {
            match &shared {
                Ok(credentials) => {
                    job.adopt_credentials(credentials.clone());
                    if let Err(err) = self.submit(job) {
                        if !job.is_terminal() {
                            job.fail(JobFailure::from(&err));
                        }
                        tracing::warn!(table_id = %job.table_id(), error = %err, "batch job failed");
                    }
                }
                Err(err) => job.fail(JobFailure::new(FailureKind::Credential, err.to_string())),
            }
            outcomes.push(JobOutcome {
                table_id: job.table_id().to_string(),
                state: job.state().clone(),
            });
        }

        let report = BatchReport { outcomes, jobs };
        tracing::info!(
            jobs = report.outcomes.len(),
            failed = report.failed_count(),
            "batch finished"
        );
        report
    }

    fn check_validation(&self, job: &mut TransferJob) -> Result<()> {
        let cached = if job.is_delayed() {
            None
        } else {
            job.report().map(ValidationReport::error_count)
        };
        let errors = match cached {
            Some(errors) => errors,
            None => job.run_validation().error_count(),
        };
        if errors > 0 && !job.options().override_block {
            return Err(TransferError::ValidationBlocked {
                table_id: job.table_id().to_string(),
                errors,
            });
        }
        if errors > 0 {
            tracing::warn!(errors, "validation errors overridden, submitting anyway");
        }
        if job.state() != &JobState::Validating {
            job.advance(JobState::Validating)?;
        }
        Ok(())
    }

    fn resolve_credentials(&mut self, job: &TransferJob) -> Result<Credentials> {
        if let Some(credentials) = job.credentials() {
            return Ok(credentials.clone());
        }
        self.session_or_prompt(job.description().load_user.as_deref())
    }

    /// Drops the session credentials if they are the ones just rejected.
    fn forget_rejected(&mut self, rejected: &Credentials) {
        if self.session.as_ref() == Some(rejected) {
            tracing::warn!(
                load_user = rejected.username(),
                "credentials rejected, prompting again for the next job"
            );
            self.session = None;
        }
    }

    fn session_or_prompt(&mut self, load_user: Option<&str>) -> Result<Credentials> {
        if let Some(credentials) = &self.session {
            return Ok(credentials.clone());
        }
        tracing::debug!("prompting for credentials");
        let credentials = self.prompt.prompt(load_user)?;
        self.session = Some(credentials.clone());
        Ok(credentials)
    }
}

fn build_request(job: &TransferJob) -> Result<SubmitRequest> {
    let rounded = round_dataset(job.dataset(), job.description())?;
    Ok(SubmitRequest {
        table_id: job.table_id().to_string(),
        params: job.settings().query_params(job.table_id()),
        body: payload::build_body(&rounded)?,
        content_type: payload::content_type(),
    })
}

fn apply_status(job: &mut TransferJob, status: RemoteStatus) -> Result<()> {
    match status {
        RemoteStatus::Pending if job.state() == &JobState::Pending => Ok(()),
        RemoteStatus::Pending => job.advance(JobState::Pending),
        RemoteStatus::Completed => job.advance(JobState::Completed),
        RemoteStatus::Failed(message) => {
            job.fail(JobFailure::new(FailureKind::Remote, message));
            Ok(())
        }
    }
}
