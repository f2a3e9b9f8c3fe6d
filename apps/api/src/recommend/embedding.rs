//! Embedding similarity — ranks candidates by cosine similarity between the
//! query embedding and each candidate's "name + description" embedding.

use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use crate::duration::parse_minutes;
use crate::llm_client::GeminiClient;
use crate::models::assessment::{Assessment, ScoredAssessment};
use crate::recommend::RelevanceScorer;

/// Soft penalty for exceeding the extracted duration constraint. The
/// candidate stays in the ranking, just demoted.
const OVER_DURATION_FACTOR: f64 = 0.5;

pub struct EmbeddingScorer {
    llm: Option<GeminiClient>,
}

impl EmbeddingScorer {
    pub fn new(llm: Option<GeminiClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl RelevanceScorer for EmbeddingScorer {
    fn name(&self) -> &'static str {
        "embedding"
    }

    async fn score(
        &self,
        query: &str,
        candidates: &[Assessment],
        constraint: Option<u32>,
        max_results: usize,
    ) -> Result<Vec<ScoredAssessment>> {
        let Some(llm) = &self.llm else {
            debug!("No embedding provider configured, skipping similarity ranking");
            return Ok(Vec::new());
        };
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = llm.embed(query).await?;

        let mut results: Vec<ScoredAssessment> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let text = format!("{} {}", candidate.name, candidate.description);
            // A per-candidate embedding failure skips that candidate only.
            let candidate_embedding = match llm.embed(&text).await {
                Ok(e) => e,
                Err(e) => {
                    debug!("Embedding failed for '{}': {e}", candidate.name);
                    continue;
                }
            };

            let mut similarity = cosine_similarity(&query_embedding, &candidate_embedding);

            if let Some(cap) = constraint {
                if let Some(minutes) = parse_minutes(&candidate.duration) {
                    if minutes > cap {
                        similarity *= OVER_DURATION_FACTOR;
                    }
                }
            }

            results.push(ScoredAssessment {
                assessment: candidate.clone(),
                score: similarity.clamp(0.0, 1.0),
            });
        }

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(max_results);
        Ok(results)
    }
}

/// Cosine similarity: dot product over the product of L2 norms. Defined as
/// 0.0 when either vector has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| *x as f64 * *y as f64).sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
