use async_trait::async_trait;
use common::types::Submission;

use crate::errors::ServiceError;

/// Storage seam for submissions.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn insert(&self, submission: &Submission) -> Result<(), ServiceError>;
    /// Every stored submission, identifiers stripped, in store order.
    async fn list(&self) -> Result<Vec<Submission>, ServiceError>;
}

/// In-memory repositories for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MemorySubmissionRepository {
        rows: Mutex<Vec<Submission>>,
    }

    impl MemorySubmissionRepository {
        pub fn len(&self) -> usize {
            self.rows.lock().map(|rows| rows.len()).unwrap_or_default()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    #[async_trait]
    impl SubmissionRepository for MemorySubmissionRepository {
        async fn insert(&self, submission: &Submission) -> Result<(), ServiceError> {
            let mut rows = self.rows.lock().map_err(|_| ServiceError::Db("memory store poisoned".into()))?;
            rows.push(submission.clone());
            Ok(())
        }

        async fn list(&self) -> Result<Vec<Submission>, ServiceError> {
            let rows = self.rows.lock().map_err(|_| ServiceError::Db("memory store poisoned".into()))?;
            Ok(rows.clone())
        }
    }

    /// Fails every call, standing in for an unreachable database.
    #[derive(Default)]
    pub struct UnavailableSubmissionRepository;

    #[async_trait]
    impl SubmissionRepository for UnavailableSubmissionRepository {
        async fn insert(&self, _submission: &Submission) -> Result<(), ServiceError> {
            Err(ServiceError::Db("connection refused".into()))
        }

        async fn list(&self) -> Result<Vec<Submission>, ServiceError> {
            Err(ServiceError::Db("connection refused".into()))
        }
    }
}
