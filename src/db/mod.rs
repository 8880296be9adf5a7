mod error;
mod memory;
mod postgres;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::quiz::{QuizAssessment, QuizResponse, QuizResult};

pub use error::StoreError;
pub use memory::MemoryAssessmentStore;
pub use postgres::PgAssessmentStore;

/// Create-only persistence for scored submissions.
#[async_trait]
pub trait AssessmentStore: Send + Sync {
    /// Persists a submission under a freshly generated id and timestamp
    async fn create(
        &self,
        responses: Vec<QuizResponse>,
        result: QuizResult,
    ) -> Result<QuizAssessment, StoreError>;

    /// Liveness check for the health endpoint
    async fn ping(&self) -> Result<(), StoreError>;

    fn backend(&self) -> &'static str;
}

/// Picks the Postgres store when a database is configured, memory otherwise
pub async fn init_store(database: Option<&DatabaseConfig>) -> Result<Arc<dyn AssessmentStore>, StoreError> {
    let Some(database) = database else {
        info!("No DATABASE_URL configured, assessments are kept in memory");
        return Ok(Arc::new(MemoryAssessmentStore::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(database.max_connections.unwrap_or(10))
        .min_connections(database.min_connections.unwrap_or(1))
        .connect(&database.url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    info!("Connected to Postgres, migrations applied");
    Ok(Arc::new(PgAssessmentStore::new(pool)))
}
