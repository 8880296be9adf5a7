use axum::{routing::get, Router};

use super::handlers::{start_assessment, step_assessment};
use crate::app_state::AppState;

/// Server-rendered questionnaire, nested under `/assessment`
pub fn assessment_routes() -> Router<AppState> {
    Router::new().route("/", get(start_assessment).post(step_assessment))
}
