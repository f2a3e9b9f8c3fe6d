//! LLM direct selection — asks the model to pick assessments by index.
//!
//! The model sees up to the first 30 candidates and the raw query, and
//! answers with a JSON array of 1-based indices ordered by relevance. The
//! model's order IS the ranking; no re-scoring happens afterwards.

use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::llm_client::GeminiClient;
use crate::models::assessment::{Assessment, ScoredAssessment};
use crate::recommend::prompts::SELECTION_PROMPT_TEMPLATE;
use crate::recommend::RelevanceScorer;

/// How many candidates are serialized into the prompt. Bounded to keep the
/// prompt inside the model's context window.
const CANDIDATE_WINDOW: usize = 30;
/// The model is never asked for more than this many picks.
const SELECTION_CAP: usize = 10;

/// First bracketed JSON array anywhere in the response, fences and prose
/// included.
static INDEX_ARRAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*?\]").expect("static regex"));

pub struct LlmSelectScorer {
    llm: Option<GeminiClient>,
}

impl LlmSelectScorer {
    pub fn new(llm: Option<GeminiClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl RelevanceScorer for LlmSelectScorer {
    fn name(&self) -> &'static str {
        "llm_select"
    }

    async fn score(
        &self,
        query: &str,
        candidates: &[Assessment],
        _constraint: Option<u32>,
        max_results: usize,
    ) -> Result<Vec<ScoredAssessment>> {
        let Some(llm) = &self.llm else {
            debug!("No LLM provider configured, skipping direct selection");
            return Ok(Vec::new());
        };
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let window = &candidates[..candidates.len().min(CANDIDATE_WINDOW)];
        let top_n = max_results.min(SELECTION_CAP);
        let prompt = SELECTION_PROMPT_TEMPLATE
            .replace("{query}", query)
            .replace("{assessments}", &render_candidates(window))
            .replace("{top_n}", &top_n.to_string());

        let response = llm.generate(&prompt).await?;

        let Some(indices) = parse_index_array(&response) else {
            debug!("No parseable index array in LLM response");
            return Ok(Vec::new());
        };

        Ok(select_by_indices(candidates, &indices, max_results))
    }
}

/// Serializes candidates the way the selection prompt expects them:
/// numbered blocks with the fields the model should weigh.
fn render_candidates(candidates: &[Assessment]) -> String {
    candidates
        .iter()
        .enumerate()
        .map(|(i, a)| {
            format!(
                "Assessment {}:\nName: {}\nDescription: {}\nTest Type: {}\nDuration: {}\n\
                 Remote Testing: {}\nAdaptive Support: {}\n",
                i + 1,
                a.name,
                a.description,
                a.test_type,
                a.duration,
                a.remote_testing,
                a.adaptive_support,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extracts the first bracketed JSON array from the response and parses it
/// as integers. Returns `None` when no array is found or it fails to parse.
fn parse_index_array(response: &str) -> Option<Vec<i64>> {
    let found = INDEX_ARRAY_RE.find(response)?;
    serde_json::from_str(found.as_str()).ok()
}

/// Maps 1-based indices to candidates, preserving the model's order.
/// Out-of-range indices are dropped, never wrapped or clamped.
fn select_by_indices(
    candidates: &[Assessment],
    indices: &[i64],
    max_results: usize,
) -> Vec<ScoredAssessment> {
    indices
        .iter()
        .filter(|&&i| i >= 1 && i <= candidates.len() as i64)
        .take(max_results)
        .map(|&i| ScoredAssessment {
            assessment: candidates[(i - 1) as usize].clone(),
            score: 1.0,
        })
        .collect()
}
