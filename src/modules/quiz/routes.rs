use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{assess, download_report, list_categories, list_items};
use crate::app_state::AppState;

/// JSON API, nested under `/api/quiz`
pub fn quiz_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items))
        .route("/categories", get(list_categories))
        .route("/assess", post(assess))
        .route("/report", post(download_report))
}
