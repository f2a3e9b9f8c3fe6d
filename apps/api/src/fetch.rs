//! HTTP fetch + HTML-to-text extraction.
//!
//! Used for resolving job-description URLs into scorable text and by the
//! catalog scraper. Every fetch carries an explicit timeout and a desktop
//! User-Agent — the catalog site serves an anti-bot stub to bare clients.

use std::io::Cursor;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::debug;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

/// Rendering width for text extraction. Wide enough that sentences don't
/// wrap mid-phrase and break the regex pattern matching downstream.
const TEXT_WIDTH: usize = 120;

/// Builds a client with the given request timeout.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .context("failed to build HTTP client")
}

/// Fetches a page and returns its raw HTML.
pub async fn fetch_html(client: &Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("request to {url} failed"))?
        .error_for_status()
        .with_context(|| format!("{url} returned an error status"))?;

    let html = response.text().await.context("failed to read body")?;
    debug!("Fetched {url}: {} bytes", html.len());
    Ok(html)
}

/// Converts HTML to readable plain text. Good enough and deterministic,
/// not a full readability engine.
pub fn html_to_text(html: &str) -> String {
    html2text::from_read(Cursor::new(html.as_bytes()), TEXT_WIDTH)
}

/// Fetches a URL and extracts its readable text content. An unreachable or
/// empty page yields an error; callers decide whether that is fatal.
pub async fn page_text(client: &Client, url: &str) -> Result<String> {
    let html = fetch_html(client, url).await?;
    let text = html_to_text(&html);
    let text = text.trim().to_string();
    if text.is_empty() {
        anyhow::bail!("no text content extracted from {url}");
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_to_text_strips_markup() {
        let html = "<html><body><h1>Verify</h1><p>A 30 minute cognitive test.</p></body></html>";
        let text = html_to_text(html);
        assert!(text.contains("Verify"));
        assert!(text.contains("30 minute cognitive test"));
        assert!(!text.contains("<p>"));
    }

    #[test]
    fn test_html_to_text_handles_plain_text_input() {
        let text = html_to_text("just words");
        assert!(text.contains("just words"));
    }

    #[test]
    fn test_build_client_succeeds() {
        assert!(build_client(Duration::from_secs(5)).is_ok());
    }
}
