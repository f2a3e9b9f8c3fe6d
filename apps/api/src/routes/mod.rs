pub mod health;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::catalog::handlers as catalog_handlers;
use crate::recommend::handlers as recommend_handlers;
use crate::state::AppState;

/// GET /
/// API self-description for people poking at the root.
async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Assessment Recommendation API",
        "endpoints": {
            "GET /api/v1/recommendations": "Get assessment recommendations based on query or URL with optional filtering",
            "GET /api/v1/queries": "Get recent user queries and their recommendations",
            "GET /api/v1/assessments": "List the assessment catalog",
            "GET /api/v1/assessments/:id": "Fetch one assessment by id"
        },
        "filters": {
            "test_types": "Comma-separated list of test types (Cognitive, Personality, Skill, Situational Judgment)",
            "max_duration": "Maximum assessment duration in minutes",
            "remote_testing": "Boolean filter for remote testing support",
            "adaptive_support": "Boolean filter for adaptive testing support"
        },
        "example": "/api/v1/recommendations?query=Java developers&test_types=Cognitive,Skill&max_duration=60&remote_testing=true"
    }))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/recommendations",
            get(recommend_handlers::handle_recommendations),
        )
        .route(
            "/api/v1/queries",
            get(recommend_handlers::handle_recent_queries),
        )
        .route(
            "/api/v1/assessments",
            get(catalog_handlers::handle_list_assessments),
        )
        .route(
            "/api/v1/assessments/:id",
            get(catalog_handlers::handle_get_assessment),
        )
        .with_state(state)
}
