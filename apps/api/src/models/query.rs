use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::assessment::Assessment;

/// One logged recommendation request. `query_kind` is "text" or "url".
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserQueryRow {
    pub id: Uuid,
    pub query_text: String,
    pub query_kind: String,
    pub created_at: DateTime<Utc>,
}

/// A recommendation as read back from the query log, joined with its
/// assessment record. Ranks within one query are a contiguous 1-based
/// sequence matching list order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedRecommendation {
    pub assessment_id: Uuid,
    pub rank: i32,
    pub relevance_score: f64,
    pub assessment: Assessment,
}

/// A logged query with its ordered recommendation list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedQuery {
    pub id: Uuid,
    pub query_text: String,
    pub query_kind: String,
    pub created_at: DateTime<Utc>,
    pub recommendations: Vec<RecordedRecommendation>,
}
