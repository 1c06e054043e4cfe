use async_trait::async_trait;
use common::types::Submission;
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::submission::repository::SubmissionRepository;

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmSubmissionRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmSubmissionRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl SubmissionRepository for SeaOrmSubmissionRepository {
    async fn insert(&self, submission: &Submission) -> Result<(), ServiceError> {
        models::submission::create(&self.db, &submission.name, &submission.email).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Submission>, ServiceError> {
        let rows = models::submission::list_all(&self.db).await?;
        Ok(rows.into_iter().map(|m| Submission { name: m.name, email: m.email }).collect())
    }
}
