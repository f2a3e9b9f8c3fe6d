//! Recommendation pipeline — a strict-priority chain of relevance scorers.
//!
//! The orchestrator walks the chain (LLM direct selection → embedding
//! similarity → keyword heuristic) and returns the first non-empty ranking.
//! At most one strategy's output is ever returned; strategies are never
//! blended. Nothing in here is allowed to fail the caller: any error
//! becomes an empty list.

pub mod embedding;
pub mod filters;
pub mod handlers;
pub mod keyword;
pub mod llm_select;
pub mod metrics;
pub mod prompts;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, error, info, warn};

use crate::duration::extract_constraint;
use crate::fetch;
use crate::llm_client::GeminiClient;
use crate::models::assessment::{Assessment, ScoredAssessment};
use crate::recommend::embedding::EmbeddingScorer;
use crate::recommend::keyword::KeywordScorer;
use crate::recommend::llm_select::LlmSelectScorer;
use crate::store;

/// One ranking strategy. An `Err` or an empty `Ok` both mean "strategy
/// unavailable for this query" and the orchestrator falls through to the
/// next scorer in the chain.
///
/// Implementations must tolerate an empty candidate list (return empty)
/// and candidates with missing optional fields ("Unknown"/"Varies").
#[async_trait]
pub trait RelevanceScorer: Send + Sync {
    fn name(&self) -> &'static str;

    async fn score(
        &self,
        query: &str,
        candidates: &[Assessment],
        constraint: Option<u32>,
        max_results: usize,
    ) -> Result<Vec<ScoredAssessment>>;
}

/// Walks the chain in order and returns the first non-empty ranking,
/// truncated to `max_results`. Scorer errors are logged and skipped.
pub async fn run_chain(
    scorers: &[Arc<dyn RelevanceScorer>],
    query: &str,
    candidates: &[Assessment],
    constraint: Option<u32>,
    max_results: usize,
) -> Vec<ScoredAssessment> {
    for scorer in scorers {
        match scorer.score(query, candidates, constraint, max_results).await {
            Ok(mut ranked) if !ranked.is_empty() => {
                info!(
                    strategy = scorer.name(),
                    results = ranked.len(),
                    "Strategy produced a ranking"
                );
                ranked.truncate(max_results);
                return ranked;
            }
            Ok(_) => {
                debug!(strategy = scorer.name(), "Strategy returned empty, falling through");
            }
            Err(e) => {
                warn!(strategy = scorer.name(), "Strategy failed, falling through: {e}");
            }
        }
    }
    Vec::new()
}

/// Timeout for resolving a job-description URL into text.
const URL_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// The recommendation orchestrator. Holds the ordered scorer chain and the
/// client used to resolve job-description URLs.
pub struct Recommender {
    scorers: Vec<Arc<dyn RelevanceScorer>>,
    fetch_client: reqwest::Client,
}

impl Recommender {
    /// Builds the standard chain. The provider handle is threaded into the
    /// LLM and embedding scorers; when it is `None` both report unavailable
    /// and every request lands on the keyword heuristic.
    pub fn new(llm: Option<GeminiClient>) -> Result<Self> {
        let scorers: Vec<Arc<dyn RelevanceScorer>> = vec![
            Arc::new(LlmSelectScorer::new(llm.clone())),
            Arc::new(EmbeddingScorer::new(llm)),
            Arc::new(KeywordScorer),
        ];
        Self::with_scorers(scorers)
    }

    /// Builds an orchestrator over an explicit chain. Lets tests inject
    /// stub scorers without a provider.
    pub fn with_scorers(scorers: Vec<Arc<dyn RelevanceScorer>>) -> Result<Self> {
        Ok(Self {
            scorers,
            fetch_client: fetch::build_client(URL_FETCH_TIMEOUT)?,
        })
    }

    /// Produces up to `max_results` scored candidates for a query or a
    /// job-description URL. Never errors: recommendation failure of any
    /// kind yields an empty list, logged but not raised.
    pub async fn recommend(
        &self,
        pool: &PgPool,
        candidates: &[Assessment],
        input: &str,
        is_url: bool,
        max_results: usize,
        persist: bool,
    ) -> Vec<ScoredAssessment> {
        match self
            .try_recommend(pool, candidates, input, is_url, max_results, persist)
            .await
        {
            Ok(results) => results,
            Err(e) => {
                error!("Recommendation pipeline failed: {e:?}");
                Vec::new()
            }
        }
    }

    async fn try_recommend(
        &self,
        pool: &PgPool,
        candidates: &[Assessment],
        input: &str,
        is_url: bool,
        max_results: usize,
        persist: bool,
    ) -> Result<Vec<ScoredAssessment>> {
        // 1. Resolve URL input to page text. A failed or empty extraction
        //    short-circuits to an empty recommendation list — no scoring.
        let query = if is_url {
            match fetch::page_text(&self.fetch_client, input).await {
                Ok(text) => text,
                Err(e) => {
                    warn!("Could not extract text from {input}: {e}");
                    return Ok(Vec::new());
                }
            }
        } else {
            input.to_string()
        };

        // 2. Optional duration cap, shared by all strategies.
        let constraint = extract_constraint(&query);
        if let Some(minutes) = constraint {
            debug!("Extracted duration constraint: {minutes} minutes");
        }

        // 3. First non-empty strategy wins.
        let ranked = run_chain(&self.scorers, &query, candidates, constraint, max_results).await;

        if persist && !ranked.is_empty() {
            let kind = if is_url { "url" } else { "text" };
            // A successful computation is never discarded because its log
            // write failed.
            if let Err(e) = store::save_query_and_recommendations(pool, input, kind, &ranked).await
            {
                error!("Failed to persist query log: {e:?}");
            }
        }

        Ok(ranked)
    }
}
