//! Query log and catalog persistence.
//!
//! The write path is one transaction per recommendation request: insert the
//! query row, upsert each assessment on its unique name, insert the ranked
//! triples. Ranks are assigned from list order as a contiguous 1-based
//! sequence. Read paths are plain projections.

use anyhow::Result;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::models::assessment::{Assessment, AssessmentRow, ScoredAssessment, TestType};
use crate::models::query::{RecordedQuery, RecordedRecommendation, UserQueryRow};

/// Persists a query and its ranked recommendation list. Returns the new
/// query id.
pub async fn save_query_and_recommendations(
    pool: &PgPool,
    query_text: &str,
    query_kind: &str,
    results: &[ScoredAssessment],
) -> Result<Uuid> {
    let mut tx = pool.begin().await?;

    let query_id: Uuid = sqlx::query_scalar(
        "INSERT INTO user_queries (query_text, query_kind) VALUES ($1, $2) RETURNING id",
    )
    .bind(query_text)
    .bind(query_kind)
    .fetch_one(&mut *tx)
    .await?;

    for (i, rec) in results.iter().enumerate() {
        let assessment_id = upsert_assessment(&mut tx, &rec.assessment).await?;

        sqlx::query(
            "INSERT INTO query_recommendations (query_id, assessment_id, relevance_score, rank) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(query_id)
        .bind(assessment_id)
        .bind(rec.score)
        .bind((i + 1) as i32)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(
        "Recorded query {query_id} ({query_kind}) with {} recommendations",
        results.len()
    );
    Ok(query_id)
}

/// Upserts an assessment keyed on its unique name and returns the row id.
/// Saving the same recommendation list twice reuses the existing rows
/// instead of inserting duplicates, and the upsert stays correct under
/// concurrent writers.
async fn upsert_assessment(
    tx: &mut Transaction<'_, Postgres>,
    assessment: &Assessment,
) -> Result<Uuid> {
    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO assessments
            (name, url, description, remote_testing, adaptive_support, duration, test_type)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (name) DO UPDATE SET updated_at = now()
        RETURNING id
        "#,
    )
    .bind(&assessment.name)
    .bind(&assessment.url)
    .bind(&assessment.description)
    .bind(&assessment.remote_testing)
    .bind(&assessment.adaptive_support)
    .bind(&assessment.duration)
    .bind(assessment.test_type.as_str())
    .fetch_one(&mut **tx)
    .await?;
    Ok(id)
}

/// Bulk-loads catalog records, skipping names that already exist. Returns
/// the number of rows written.
pub async fn insert_assessments(pool: &PgPool, assessments: &[Assessment]) -> Result<u64> {
    let mut written = 0u64;
    for assessment in assessments {
        let result = sqlx::query(
            r#"
            INSERT INTO assessments
                (name, url, description, remote_testing, adaptive_support, duration, test_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(&assessment.name)
        .bind(&assessment.url)
        .bind(&assessment.description)
        .bind(&assessment.remote_testing)
        .bind(&assessment.adaptive_support)
        .bind(&assessment.duration)
        .bind(assessment.test_type.as_str())
        .execute(pool)
        .await?;
        written += result.rows_affected();
    }
    info!("Loaded {written} assessments into the catalog table");
    Ok(written)
}

pub async fn list_assessments(pool: &PgPool) -> Result<Vec<AssessmentRow>> {
    let rows = sqlx::query_as::<_, AssessmentRow>("SELECT * FROM assessments ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn assessment_by_id(pool: &PgPool, id: Uuid) -> Result<Option<AssessmentRow>> {
    let row = sqlx::query_as::<_, AssessmentRow>("SELECT * FROM assessments WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

#[derive(sqlx::FromRow)]
struct RecommendationJoinRow {
    assessment_id: Uuid,
    rank: i32,
    relevance_score: f64,
    name: String,
    url: String,
    description: String,
    remote_testing: String,
    adaptive_support: String,
    duration: String,
    test_type: String,
}

/// Returns the N most recent queries, each with its ordered recommendation
/// list.
pub async fn recent_queries(pool: &PgPool, limit: i64) -> Result<Vec<RecordedQuery>> {
    let queries = sqlx::query_as::<_, UserQueryRow>(
        "SELECT * FROM user_queries ORDER BY created_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    let mut recorded = Vec::with_capacity(queries.len());
    for query in queries {
        let rows = sqlx::query_as::<_, RecommendationJoinRow>(
            r#"
            SELECT qr.assessment_id, qr.rank, qr.relevance_score,
                   a.name, a.url, a.description, a.remote_testing,
                   a.adaptive_support, a.duration, a.test_type
            FROM query_recommendations qr
            JOIN assessments a ON a.id = qr.assessment_id
            WHERE qr.query_id = $1
            ORDER BY qr.rank
            "#,
        )
        .bind(query.id)
        .fetch_all(pool)
        .await?;

        recorded.push(RecordedQuery {
            id: query.id,
            query_text: query.query_text,
            query_kind: query.query_kind,
            created_at: query.created_at,
            recommendations: rows
                .into_iter()
                .map(|r| RecordedRecommendation {
                    assessment_id: r.assessment_id,
                    rank: r.rank,
                    relevance_score: r.relevance_score,
                    assessment: Assessment {
                        name: r.name,
                        url: r.url,
                        description: r.description,
                        remote_testing: r.remote_testing,
                        adaptive_support: r.adaptive_support,
                        duration: r.duration,
                        test_type: TestType::parse_label(&r.test_type),
                    },
                })
                .collect(),
        });
    }

    Ok(recorded)
}
