/// LLM Client — the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: No other module may call the provider directly.
/// Both scorer backends (direct selection and embedding similarity) go
/// through this client, so "provider unavailable" has exactly one shape.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// Generation model used for direct assessment selection.
pub const GENERATION_MODEL: &str = "gemini-pro";
/// Embedding model used for similarity ranking.
pub const EMBEDDING_MODEL: &str = "embedding-001";
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: String,
    content: Content<'a>,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: EmbeddingValues,
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

/// Reqwest wrapper over the Gemini `generateContent` and `embedContent`
/// endpoints with retry on 429/5xx. Construction requires a key, so holding
/// a `GeminiClient` means the provider IS configured — "no provider" is
/// `Option<GeminiClient>::None` at the call sites, never an empty key.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Generates text for a prompt, returning the first candidate's text.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!(
            "{GEMINI_API_BASE}/{GENERATION_MODEL}:generateContent?key={}",
            self.api_key
        );
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response: GenerateResponse = self.post_with_retry(&url, &body).await?;

        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().find_map(|p| p.text))
            .filter(|t| !t.trim().is_empty())
            .ok_or(LlmError::EmptyContent)?;

        debug!("LLM generate succeeded: {} chars", text.len());
        Ok(text)
    }

    /// Computes an embedding vector for a text.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        let url = format!(
            "{GEMINI_API_BASE}/{EMBEDDING_MODEL}:embedContent?key={}",
            self.api_key
        );
        let body = EmbedRequest {
            model: format!("models/{EMBEDDING_MODEL}"),
            content: Content {
                parts: vec![Part { text }],
            },
        };

        let response: EmbedResponse = self.post_with_retry(&url, &body).await?;

        if response.embedding.values.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(response.embedding.values)
    }

    /// POSTs a JSON body, retrying on 429 and 5xx with exponential backoff.
    async fn post_with_retry<B, T>(&self, url: &str, body: &B) -> Result<T, LlmError>
    where
        B: Serialize,
        T: serde::de::DeserializeOwned,
    {
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.post(url).json(body).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let message = response.text().await.unwrap_or_default();
                warn!("LLM API returned {status}: {message}");
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            return Ok(response.json::<T>().await?);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}
