//! Catalog scraper — harvests assessment records from the product catalog
//! site.
//!
//! The catalog page is mined for product-looking links; each detail page is
//! fetched (with a politeness delay) and its extracted text pattern-matched
//! for remote-testing, adaptive-support, duration, and test-type signals.
//! Detail failures degrade to defaults and never abort the catalog.

use std::time::Duration;

use anyhow::Result;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

use crate::duration::parse_minutes;
use crate::fetch;
use crate::models::assessment::{Assessment, TestType};

const CATALOG_TIMEOUT: Duration = Duration::from_secs(30);
const DETAIL_TIMEOUT: Duration = Duration::from_secs(20);
/// Delay between detail-page fetches, to stay under rate limits.
const DETAIL_DELAY: Duration = Duration::from_millis(750);

/// Anchor tags with href and inner text, across lines.
static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a[^>]+href\s*=\s*["']([^"']+)["'][^>]*>(.*?)</a>"#).expect("static regex")
});
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("static regex"));

/// Href keywords that mark a link as product-like.
const PRODUCT_LINK_KEYWORDS: &[&str] = &[
    "product",
    "assessment",
    "test",
    "verify",
    "ability",
    "personality",
    "solution",
];

static REMOTE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_all(&[
        r"(?i)remote\s+testing",
        r"(?i)online\s+testing",
        r"(?i)virtual\s+assessment",
        r"(?i)test\s+from\s+anywhere",
        r"(?i)test\s+remotely",
        r"(?i)remote\s+proctoring",
        r"(?i)digital\s+delivery",
    ])
});

static ADAPTIVE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_all(&[
        r"(?i)adaptive\s+testing",
        r"IRT",
        r"(?i)item\s+response\s+theory",
        r"(?i)computer[-\s]adaptive",
        r"(?i)adaptive\s+format",
        r"(?i)adaptive\s+algorithm",
        r"(?i)adapts\s+to\s+candidate",
    ])
});

static TEST_TYPE_RES: LazyLock<Vec<(TestType, Vec<Regex>)>> = LazyLock::new(|| {
    vec![
        (
            TestType::Cognitive,
            compile_all(&[
                r"(?i)cognitive\s+ability",
                r"(?i)reasoning\s+ability",
                r"(?i)intelligence",
                r"(?i)aptitude",
                r"(?i)numerical\s+reasoning",
                r"(?i)verbal\s+reasoning",
                r"(?i)logical\s+reasoning",
                r"(?i)inductive\s+reasoning",
                r"(?i)critical\s+thinking",
                r"(?i)problem[-\s]solving\s+ability",
            ]),
        ),
        (
            TestType::Personality,
            compile_all(&[
                r"(?i)personality",
                r"(?i)behaviou?r(al)?",
                r"(?i)style\s+assessment",
                r"(?i)preference",
                r"(?i)psychological",
                r"(?i)character\s+trait",
                r"(?i)temperament",
                r"(?i)work\s+style",
            ]),
        ),
        (
            TestType::Skill,
            compile_all(&[
                r"(?i)skill\s+assessment",
                r"(?i)coding\s+test",
                r"(?i)programming\s+test",
                r"(?i)technical\s+assessment",
                r"(?i)practical\s+exercise",
                r"(?i)hands[-\s]on",
                r"(?i)competency",
                r"(?i)proficiency",
                r"(?i)excel\s+test",
                r"(?i)language\s+proficiency",
                r"(?i)microsoft\s+office",
            ]),
        ),
        (
            TestType::SituationalJudgment,
            compile_all(&[
                r"(?i)situation(al)?\s+judge?ment",
                r"(?i)scenario[-\s]based",
                r"(?i)case\s+study",
                r"(?i)real[-\s]world\s+scenario",
                r"(?i)decision[-\s]making\s+test",
                r"(?i)workplace\s+scenario",
                r"(?i)job\s+simulation",
            ]),
        ),
    ]
});

fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("static regex"))
        .collect()
}

/// A product link harvested from the catalog page.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductLink {
    pub name: String,
    pub url: String,
}

/// Scrapes the full catalog: harvest links, then enrich each from its
/// detail page.
pub async fn scrape_catalog(catalog_url: &str) -> Result<Vec<Assessment>> {
    let client = fetch::build_client(CATALOG_TIMEOUT)?;
    let html = fetch::fetch_html(&client, catalog_url).await?;
    info!("Fetched catalog page: {} bytes", html.len());

    let links = harvest_product_links(&html, catalog_url);
    info!("Found {} candidate product links", links.len());

    let detail_client = fetch::build_client(DETAIL_TIMEOUT)?;
    let mut assessments: Vec<Assessment> = Vec::with_capacity(links.len());

    for link in links {
        tokio::time::sleep(DETAIL_DELAY).await;

        let assessment = match fetch::page_text(&detail_client, &link.url).await {
            Ok(text) => assessment_from_detail(&link, &text),
            Err(e) => {
                warn!("Detail fetch failed for {}: {e}", link.url);
                assessment_with_defaults(&link)
            }
        };

        if is_duplicate(&assessments, &assessment) {
            debug!("Skipping duplicate assessment: {}", assessment.name);
            continue;
        }
        debug!("Added assessment: {}", assessment.name);
        assessments.push(assessment);
    }

    Ok(assessments)
}

/// Extracts product-looking links from the catalog HTML: anchors whose href
/// contains a product keyword and whose text is a plausible name.
pub fn harvest_product_links(html: &str, base_url: &str) -> Vec<ProductLink> {
    let mut links = Vec::new();

    for caps in ANCHOR_RE.captures_iter(html) {
        let href = caps[1].trim();
        let href_lower = href.to_lowercase();
        if !PRODUCT_LINK_KEYWORDS.iter().any(|kw| href_lower.contains(kw)) {
            continue;
        }

        let name = clean_text(&caps[2]);
        if name.len() < 3 {
            continue;
        }

        let url = resolve_url(href, base_url);
        if url.is_empty() {
            continue;
        }

        let link = ProductLink { name, url };
        if !links.contains(&link) {
            links.push(link);
        }
    }

    links
}

/// Builds an assessment from a harvested link and its detail-page text.
pub fn assessment_from_detail(link: &ProductLink, text: &str) -> Assessment {
    let duration = match parse_minutes(text) {
        Some(minutes) => format!("{minutes} minutes"),
        None => "Varies".to_string(),
    };

    Assessment {
        name: link.name.clone(),
        url: link.url.clone(),
        description: clip(text, 500),
        remote_testing: yes_no(REMOTE_RES.iter().any(|re| re.is_match(text))),
        adaptive_support: yes_no(ADAPTIVE_RES.iter().any(|re| re.is_match(text))),
        duration,
        test_type: detect_test_type(text),
    }
}

fn assessment_with_defaults(link: &ProductLink) -> Assessment {
    Assessment {
        name: link.name.clone(),
        url: link.url.clone(),
        description: String::new(),
        remote_testing: "No".to_string(),
        adaptive_support: "No".to_string(),
        duration: "Varies".to_string(),
        test_type: TestType::Unknown,
    }
}

/// First test type whose pattern set matches the text.
pub fn detect_test_type(text: &str) -> TestType {
    for (test_type, patterns) in TEST_TYPE_RES.iter() {
        if patterns.iter().any(|re| re.is_match(text)) {
            return *test_type;
        }
    }
    TestType::Unknown
}

/// Duplicate if the URL matches or one name contains the other.
fn is_duplicate(existing: &[Assessment], candidate: &Assessment) -> bool {
    let candidate_name = candidate.name.to_lowercase();
    existing.iter().any(|a| {
        if a.url == candidate.url {
            return true;
        }
        let name = a.name.to_lowercase();
        name.contains(&candidate_name) || candidate_name.contains(&name)
    })
}

fn resolve_url(href: &str, base_url: &str) -> String {
    if href.starts_with("http") {
        return href.to_string();
    }
    let origin = match reqwest::Url::parse(base_url) {
        Ok(parsed) => format!(
            "{}://{}",
            parsed.scheme(),
            parsed.host_str().unwrap_or_default()
        ),
        Err(_) => return String::new(),
    };
    if href.starts_with('/') {
        format!("{origin}{href}")
    } else {
        format!("{origin}/{href}")
    }
}

fn clean_text(html_fragment: &str) -> String {
    let stripped = TAG_RE.replace_all(html_fragment, " ");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn clip(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn yes_no(value: bool) -> String {
    if value { "Yes" } else { "No" }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_HTML: &str = r#"
        <html><body>
          <div class="grid">
            <a href="/products/verify-numerical/">Verify - <b>Numerical Reasoning</b></a>
            <a href="/products/opq-personality/">OPQ Personality Questionnaire</a>
            <a href="/about-us/">About Us</a>
            <a href="/products/coding-test/">x</a>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_harvest_keeps_product_links_only() {
        let links = harvest_product_links(CATALOG_HTML, "https://www.example.com/catalog/");
        let names: Vec<&str> = links.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Verify - Numerical Reasoning", "OPQ Personality Questionnaire"]
        );
    }

    #[test]
    fn test_harvest_resolves_relative_urls() {
        let links = harvest_product_links(CATALOG_HTML, "https://www.example.com/catalog/");
        assert_eq!(links[0].url, "https://www.example.com/products/verify-numerical/");
    }

    #[test]
    fn test_harvest_drops_short_names() {
        let links = harvest_product_links(CATALOG_HTML, "https://www.example.com/");
        assert!(links.iter().all(|l| l.name != "x"));
    }

    #[test]
    fn test_harvest_strips_nested_tags_from_names() {
        let links = harvest_product_links(CATALOG_HTML, "https://www.example.com/");
        assert_eq!(links[0].name, "Verify - Numerical Reasoning");
    }

    #[test]
    fn test_detail_extraction_detects_signals() {
        let link = ProductLink {
            name: "Verify".to_string(),
            url: "https://example.com/verify".to_string(),
        };
        let text = "Measures numerical reasoning ability. Supports remote testing \
                    with computer-adaptive item selection. Takes 18 minutes.";
        let a = assessment_from_detail(&link, text);
        assert_eq!(a.remote_testing, "Yes");
        assert_eq!(a.adaptive_support, "Yes");
        assert_eq!(a.duration, "18 minutes");
        assert_eq!(a.test_type, TestType::Cognitive);
    }

    #[test]
    fn test_detail_extraction_defaults_when_silent() {
        let link = ProductLink {
            name: "Mystery".to_string(),
            url: "https://example.com/mystery".to_string(),
        };
        let a = assessment_from_detail(&link, "An assessment of something.");
        assert_eq!(a.remote_testing, "No");
        assert_eq!(a.adaptive_support, "No");
        assert_eq!(a.duration, "Varies");
        assert_eq!(a.test_type, TestType::Unknown);
    }

    #[test]
    fn test_detail_extraction_converts_hours() {
        let link = ProductLink {
            name: "Long Exam".to_string(),
            url: "https://example.com/long".to_string(),
        };
        let a = assessment_from_detail(&link, "A deep-dive taking 2 hours to finish.");
        assert_eq!(a.duration, "120 minutes");
    }

    #[test]
    fn test_detect_test_type_first_match_wins() {
        // Text matching both cognitive and personality patterns classifies
        // as cognitive — the pattern groups are checked in order.
        let text = "cognitive ability and personality insights";
        assert_eq!(detect_test_type(text), TestType::Cognitive);
    }

    #[test]
    fn test_detect_test_type_situational() {
        assert_eq!(
            detect_test_type("a scenario-based judgement exercise"),
            TestType::SituationalJudgment
        );
    }

    #[test]
    fn test_duplicate_by_url_and_name_containment() {
        let existing = vec![assessment_with_defaults(&ProductLink {
            name: "Verify Numerical".to_string(),
            url: "https://example.com/verify".to_string(),
        })];
        let same_url = assessment_with_defaults(&ProductLink {
            name: "Different".to_string(),
            url: "https://example.com/verify".to_string(),
        });
        let contained_name = assessment_with_defaults(&ProductLink {
            name: "Verify".to_string(),
            url: "https://example.com/other".to_string(),
        });
        let fresh = assessment_with_defaults(&ProductLink {
            name: "OPQ".to_string(),
            url: "https://example.com/opq".to_string(),
        });
        assert!(is_duplicate(&existing, &same_url));
        assert!(is_duplicate(&existing, &contained_name));
        assert!(!is_duplicate(&existing, &fresh));
    }

    #[test]
    fn test_resolve_url_passthrough_for_absolute() {
        assert_eq!(
            resolve_url("https://other.com/x", "https://www.example.com/"),
            "https://other.com/x"
        );
    }
}
