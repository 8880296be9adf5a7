use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{AssessmentStore, StoreError};
use crate::quiz::{QuizAssessment, QuizResponse, QuizResult};

/// Process-lifetime store; everything is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryAssessmentStore {
    assessments: Mutex<HashMap<Uuid, QuizAssessment>>,
}

impl MemoryAssessmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored assessments; fails once the lock is poisoned
    pub fn len(&self) -> Result<usize, StoreError> {
        self.assessments
            .lock()
            .map(|map| map.len())
            .map_err(|_| StoreError::Poisoned)
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        self.len().map(|len| len == 0)
    }
}

#[async_trait]
impl AssessmentStore for MemoryAssessmentStore {
    async fn create(
        &self,
        responses: Vec<QuizResponse>,
        result: QuizResult,
    ) -> Result<QuizAssessment, StoreError> {
        let mut assessments = self.assessments.lock().map_err(|_| StoreError::Poisoned)?;

        let mut id = Uuid::new_v4();
        while assessments.contains_key(&id) {
            id = Uuid::new_v4();
        }

        let assessment = QuizAssessment {
            id,
            responses,
            result,
            completed_at: OffsetDateTime::now_utc(),
        };
        assessments.insert(id, assessment.clone());

        Ok(assessment)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.assessments
            .lock()
            .map(|_| ())
            .map_err(|_| StoreError::Poisoned)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
