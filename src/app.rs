use axum::{extract::State, middleware, routing::get, Json, Router};
use serde_json::json;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::{
    app_state::AppState,
    middleware::tracing::observability_middleware,
    modules::{
        assessment::{handlers::root, routes::assessment_routes},
        quiz::routes::quiz_routes,
    },
};

pub fn create_router(state: AppState) -> Router {
    let static_dir = state.config.app.static_dir.clone();

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/quiz", quiz_routes())
        .nest("/assessment", assessment_routes())
        .nest_service("/static", tower_http::services::ServeDir::new(static_dir))
        .layer(middleware::from_fn(observability_middleware))
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let store_status = match state.store.ping().await {
        Ok(()) => "healthy",
        Err(e) => {
            tracing::warn!("Assessment store health check failed: {}", e);
            "unhealthy"
        }
    };

    let telemetry_health = crate::telemetry::telemetry_health_check();

    Json(json!({
        "status": "ok",
        "timestamp": OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default(),
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "store": {
                "backend": state.store.backend(),
                "status": store_status,
            },
            "catalog": {
                "items": state.catalog.len(),
            },
            "telemetry": telemetry_health
        }
    }))
}
