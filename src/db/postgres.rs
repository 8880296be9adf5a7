use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{AssessmentStore, StoreError};
use crate::quiz::{QuizAssessment, QuizResponse, QuizResult};

/// Durable store backed by the `quiz_assessments` table.
pub struct PgAssessmentStore {
    pool: PgPool,
}

impl PgAssessmentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssessmentStore for PgAssessmentStore {
    async fn create(
        &self,
        responses: Vec<QuizResponse>,
        result: QuizResult,
    ) -> Result<QuizAssessment, StoreError> {
        let id = Uuid::new_v4();

        let completed_at: OffsetDateTime = sqlx::query_scalar(
            r#"
            INSERT INTO quiz_assessments (id, responses, result)
            VALUES ($1, $2, $3)
            RETURNING completed_at
            "#,
        )
        .bind(id)
        .bind(Json(&responses))
        .bind(Json(&result))
        .fetch_one(&self.pool)
        .await?;

        Ok(QuizAssessment {
            id,
            responses,
            result,
            completed_at,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
