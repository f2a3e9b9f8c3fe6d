//! Axum route handlers for the recommendation API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::errors::AppError;
use crate::models::assessment::{ScoredAssessment, TestType};
use crate::models::query::RecordedQuery;
use crate::recommend::filters::{self, Facets};
use crate::state::AppState;
use crate::store;

/// The orchestrator is asked for more results than callers typically want
/// so facet filtering still leaves a useful list.
const RECOMMENDATION_HEADROOM: usize = 20;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RecommendationParams {
    /// Natural-language query or job description text.
    pub query: Option<String>,
    /// URL to a job description. Mutually preferred over `query` when both
    /// are given.
    pub url: Option<String>,
    /// Comma-separated test type labels, e.g. "Cognitive,Personality".
    pub test_types: Option<String>,
    /// Maximum assessment duration in minutes.
    pub max_duration: Option<u32>,
    pub remote_testing: Option<bool>,
    pub adaptive_support: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<ScoredAssessment>,
}

#[derive(Debug, Deserialize)]
pub struct QueriesParams {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct QueriesResponse {
    pub queries: Vec<RecordedQuery>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/recommendations
///
/// Recommends assessments for a query or job-description URL, with optional
/// facet filters applied on top of the ranked list. An empty result is a
/// 200 with an empty list — "no matches" is an answer, not an error.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendationParams>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let (input, is_url) = match (&params.url, &params.query) {
        (Some(url), _) => {
            if !validate_url(url) {
                return Err(AppError::Validation("Invalid URL format".to_string()));
            }
            (url.clone(), true)
        }
        (None, Some(query)) if !query.trim().is_empty() => (query.clone(), false),
        _ => {
            return Err(AppError::Validation(
                "Either query or url parameter must be provided".to_string(),
            ));
        }
    };

    let candidates = catalog::load_assessments(&state.db, &state.config)
        .await
        .map_err(AppError::Internal)?;

    let recommendations = state
        .recommender
        .recommend(
            &state.db,
            &candidates,
            &input,
            is_url,
            RECOMMENDATION_HEADROOM,
            true,
        )
        .await;

    let facets = Facets {
        test_types: params.test_types.as_deref().map(parse_test_types),
        max_duration: params.max_duration,
        remote_testing: params.remote_testing,
        adaptive_support: params.adaptive_support,
    };
    let recommendations = if facets.is_empty() {
        recommendations
    } else {
        filters::apply(recommendations, &facets)
    };

    Ok(Json(RecommendationResponse { recommendations }))
}

/// GET /api/v1/queries
///
/// Recent logged queries with their ranked recommendation lists.
pub async fn handle_recent_queries(
    State(state): State<AppState>,
    Query(params): Query<QueriesParams>,
) -> Result<Json<QueriesResponse>, AppError> {
    let limit = params.limit.unwrap_or(10).clamp(1, 100);
    let queries = store::recent_queries(&state.db, limit)
        .await
        .map_err(AppError::Internal)?;
    Ok(Json(QueriesResponse { queries }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// A usable job-description URL: parses, is http(s), and has a host.
fn validate_url(url: &str) -> bool {
    match reqwest::Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some()
        }
        Err(_) => false,
    }
}

/// Parses a comma-separated test type filter. Labels that don't name a real
/// test type are dropped — except a literal "Unknown", which filters for
/// unclassified assessments.
fn parse_test_types(raw: &str) -> Vec<TestType> {
    raw.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .filter_map(|label| {
            let parsed = TestType::parse_label(label);
            if parsed == TestType::Unknown && label != "Unknown" {
                None
            } else {
                Some(parsed)
            }
        })
        .collect()
}
