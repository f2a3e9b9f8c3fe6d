//! Catalog store — the source of candidate assessment records.
//!
//! Sourcing cascade: database rows if any exist, else the JSON cache file,
//! else a live scrape of the catalog site, else the built-in seed list.
//! Whatever a lower tier produces is written back up (cache file and
//! database) so later requests hit the database directly.

pub mod enrich;
pub mod handlers;
pub mod scraper;
pub mod seed;

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::Config;
use crate::models::assessment::Assessment;
use crate::store;

/// Loads the candidate list for a recommendation request.
pub async fn load_assessments(pool: &PgPool, config: &Config) -> Result<Vec<Assessment>> {
    let rows = store::list_assessments(pool).await?;
    if !rows.is_empty() {
        return Ok(rows.into_iter().map(Into::into).collect());
    }

    if let Some(cached) = read_cache(&config.catalog_cache_path) {
        info!(
            "Catalog table empty, loaded {} assessments from {}",
            cached.len(),
            config.catalog_cache_path
        );
        let enriched = enrich::enrich_assessments(cached);
        persist_catalog(pool, &enriched).await;
        return Ok(enriched);
    }

    match scraper::scrape_catalog(&config.catalog_url).await {
        Ok(scraped) if !scraped.is_empty() => {
            info!("Scraped {} assessments from the catalog", scraped.len());
            let enriched = enrich::enrich_assessments(scraped);
            if let Err(e) = write_cache(&config.catalog_cache_path, &enriched) {
                warn!("Could not write catalog cache: {e}");
            }
            persist_catalog(pool, &enriched).await;
            Ok(enriched)
        }
        Ok(_) => {
            warn!("Catalog scrape produced nothing, using seed data");
            let seeded = seed::fallback_assessments();
            persist_catalog(pool, &seeded).await;
            Ok(seeded)
        }
        Err(e) => {
            warn!("Catalog scrape failed ({e}), using seed data");
            let seeded = seed::fallback_assessments();
            persist_catalog(pool, &seeded).await;
            Ok(seeded)
        }
    }
}

/// Best-effort write into the catalog table. A failure here is logged and
/// the in-memory list is still served.
async fn persist_catalog(pool: &PgPool, assessments: &[Assessment]) {
    if let Err(e) = store::insert_assessments(pool, assessments).await {
        warn!("Could not persist catalog to database: {e:?}");
    }
}

fn read_cache(path: &str) -> Option<Vec<Assessment>> {
    let contents = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str::<Vec<Assessment>>(&contents) {
        Ok(assessments) if !assessments.is_empty() => Some(assessments),
        Ok(_) => None,
        Err(e) => {
            warn!("Ignoring unreadable catalog cache {path}: {e}");
            None
        }
    }
}

fn write_cache(path: &str, assessments: &[Assessment]) -> Result<()> {
    let json = serde_json::to_string_pretty(assessments)?;
    std::fs::write(path, json).with_context(|| format!("writing catalog cache to {path}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessment::TestType;

    fn sample() -> Vec<Assessment> {
        vec![Assessment {
            name: "Verify".to_string(),
            url: "https://example.com/verify".to_string(),
            description: "Numerical reasoning".to_string(),
            remote_testing: "Yes".to_string(),
            adaptive_support: "Yes".to_string(),
            duration: "18 minutes".to_string(),
            test_type: TestType::Cognitive,
        }]
    }

    #[test]
    fn test_cache_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let path = path.to_str().unwrap();

        write_cache(path, &sample()).unwrap();
        let loaded = read_cache(path).unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_read_cache_missing_file_is_none() {
        assert!(read_cache("/nonexistent/catalog.json").is_none());
    }

    #[test]
    fn test_read_cache_garbage_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "not json at all").unwrap();
        assert!(read_cache(path.to_str().unwrap()).is_none());
    }

    #[test]
    fn test_read_cache_empty_list_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "[]").unwrap();
        assert!(read_cache(path.to_str().unwrap()).is_none());
    }
}
