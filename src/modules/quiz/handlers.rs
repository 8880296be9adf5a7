use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::service::submit_assessment;
use crate::app_state::AppState;
use crate::error::{AppError, AppResult};
use crate::quiz::{render_text_report, report_file_name, QuizAssessment, QuizItem, QuizResponse, QuizResult};

#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    pub items: Vec<QuizItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInfo {
    pub name: &'static str,
    pub summary: &'static str,
    pub item_count: usize,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryInfo>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitAssessmentRequest {
    pub responses: Vec<QuizResponse>,
}

#[derive(Debug, Serialize)]
pub struct AssessmentResponse {
    pub assessment: QuizAssessment,
}

/// Full catalog in display order
pub async fn list_items(State(state): State<AppState>) -> Json<ItemsResponse> {
    Json(ItemsResponse {
        items: state.catalog.items().to_vec(),
    })
}

/// Categories that have items, with summaries, for building a stepper
pub async fn list_categories(State(state): State<AppState>) -> Json<CategoriesResponse> {
    let categories = state
        .catalog
        .categories()
        .into_iter()
        .map(|category| CategoryInfo {
            name: category.name(),
            summary: category.summary(),
            item_count: state.catalog.items_in(category).count(),
        })
        .collect();

    Json(CategoriesResponse { categories })
}

/// Scores and records a submission
pub async fn assess(
    State(state): State<AppState>,
    payload: Result<Json<SubmitAssessmentRequest>, JsonRejection>,
) -> AppResult<Json<AssessmentResponse>> {
    let Json(request) = payload?;
    let assessment = submit_assessment(&state, request.responses).await?;
    Ok(Json(AssessmentResponse { assessment }))
}

/// Renders a result as a downloadable plain-text report
pub async fn download_report(
    payload: Result<Json<QuizResult>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(result) =
        payload.map_err(|rejection| AppError::InvalidReport(rejection.body_text()))?;
    let file_name = report_file_name(OffsetDateTime::now_utc().date());

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        render_text_report(&result),
    ))
}
