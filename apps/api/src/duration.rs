//! The single duration grammar for the whole service.
//!
//! Every place that compares durations — scorers, facet filters, catalog
//! enrichment — parses through here, so "30 minutes", "30 mins", "2 hours"
//! and a bare "30" all mean the same thing everywhere.

use regex::Regex;
use std::sync::LazyLock;

static MINUTES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(?:minute|min)s?").expect("static regex"));
static HOURS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(?:hour|hr)s?").expect("static regex"));
static BARE_INT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)").expect("static regex"));

/// Ordered constraint cues. First match wins; the captured integer is
/// accepted as-is, so a phrase like "within 5 business days" extracts 5 —
/// callers get exactly what the text says.
static CONSTRAINT_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(\d+)\s*min",
        r"(?i)(\d+)\s*minute",
        r"(?i)less than\s*(\d+)",
        r"(?i)within\s*(\d+)",
        r"(?i)under\s*(\d+)",
        r"(?i)max.*?(\d+)\s*min",
        r"(?i)maximum.*?(\d+)\s*min",
        r"(?i)no more than\s*(\d+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static regex"))
    .collect()
});

/// Parses a duration string (or prose containing one) to whole minutes.
///
/// Grammar, in priority order: "N min[ute][s]" → N, "N hour[s]"/"N hr[s]"
/// → N*60, a bare integer → N. Returns `None` for "Varies" and friends.
pub fn parse_minutes(text: &str) -> Option<u32> {
    if let Some(caps) = MINUTES_RE.captures(text) {
        return caps[1].parse().ok();
    }
    if let Some(caps) = HOURS_RE.captures(text) {
        return caps[1].parse::<u32>().ok().map(|h| h * 60);
    }
    BARE_INT_RE
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
}

/// Extracts a maximum-duration constraint (minutes) from a free-text query
/// or job description, if one is present.
pub fn extract_constraint(text: &str) -> Option<u32> {
    for re in CONSTRAINT_RES.iter() {
        if let Some(caps) = re.captures(text) {
            if let Ok(minutes) = caps[1].parse() {
                return Some(minutes);
            }
        }
    }
    None
}
