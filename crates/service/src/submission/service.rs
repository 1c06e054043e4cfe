use std::sync::Arc;

use common::types::SubmissionList;
use tracing::{info, instrument};

use super::domain::{RecordOutcome, SubmissionInput};
use super::repository::SubmissionRepository;
use crate::errors::ServiceError;

/// Record/list rules, independent of the web framework.
#[derive(Clone)]
pub struct SubmissionService {
    repo: Arc<dyn SubmissionRepository>,
}

impl SubmissionService {
    pub fn new(repo: Arc<dyn SubmissionRepository>) -> Self { Self { repo } }

    /// Store the pair when both fields are present; otherwise reject without touching the store.
    ///
    /// # Examples
    /// ```
    /// use service::submission::{SubmissionService, domain::{RecordOutcome, SubmissionInput}, repository::mock::MemorySubmissionRepository};
    /// use std::sync::Arc;
    /// let svc = SubmissionService::new(Arc::new(MemorySubmissionRepository::default()));
    /// let out = tokio_test::block_on(svc.record(SubmissionInput::new(Some("Ada"), None))).unwrap();
    /// assert_eq!(out, RecordOutcome::Rejected);
    /// ```
    #[instrument(skip(self, input))]
    pub async fn record(&self, input: SubmissionInput) -> Result<RecordOutcome, ServiceError> {
        let Some(submission) = input.complete() else {
            info!(event = "submission_rejected", "name or email missing");
            return Ok(RecordOutcome::Rejected);
        };
        self.repo.insert(&submission).await?;
        info!(event = "submission_recorded", "submission stored");
        Ok(RecordOutcome::Recorded(submission))
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<SubmissionList, ServiceError> {
        let data = self.repo.list().await?;
        info!(count = data.len(), "list submissions");
        Ok(SubmissionList { data })
    }
}
