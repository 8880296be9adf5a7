use std::collections::HashSet;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::app_state::AppState;
use crate::error::{AppError, AppResult};
use crate::quiz::{score, Catalog, QuizAssessment, QuizResponse};

/// Validates, scores and records one submission.
///
/// Shared by the JSON API and the server-rendered questionnaire so both
/// produce identical assessments.
pub async fn submit_assessment(
    state: &AppState,
    responses: Vec<QuizResponse>,
) -> AppResult<QuizAssessment> {
    validate_responses(&state.catalog, &responses, state.config.quiz.strict_submissions)?;

    let result = score(state.catalog.items(), &responses)?;
    let assessment = state.store.create(responses, result).await?;

    info!(
        assessment_id = %assessment.id,
        overall_percentage = assessment.result.overall_percentage,
        backend = state.store.backend(),
        "Assessment recorded"
    );

    Ok(assessment)
}

/// Checks a response set against the catalog.
///
/// Empty and duplicate item ids are always rejected. Unknown ids and
/// unanswered items are only rejected in strict mode; otherwise the scorer
/// ignores the former and treats the latter as not deployed.
pub fn validate_responses(
    catalog: &Catalog,
    responses: &[QuizResponse],
    strict: bool,
) -> AppResult<()> {
    let mut seen = HashSet::with_capacity(responses.len());
    let mut unknown = Vec::new();

    for response in responses {
        response.validate()?;

        if !seen.insert(response.item_id.as_str()) {
            return Err(AppError::Validation(format!(
                "Duplicate response for item {}",
                response.item_id
            )));
        }
        if !catalog.contains(&response.item_id) {
            unknown.push(response.item_id.as_str());
        }
    }

    if !unknown.is_empty() {
        if strict {
            return Err(AppError::Validation(format!(
                "Unknown quiz items: {}",
                unknown.join(", ")
            )));
        }
        warn!(unknown = ?unknown, "Ignoring responses for unknown quiz items");
    }

    let answered = seen.len() - unknown.len();
    let missing = catalog.len().saturating_sub(answered);
    if missing > 0 {
        if strict {
            return Err(AppError::Validation(format!(
                "{} of {} quiz items are unanswered",
                missing,
                catalog.len()
            )));
        }
        debug!(missing, "Scoring incomplete submission, unanswered items count as not deployed");
    }

    Ok(())
}
