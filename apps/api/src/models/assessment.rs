use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Category of an assessment, as published in the product catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TestType {
    Cognitive,
    Personality,
    Skill,
    #[serde(rename = "Situational Judgment")]
    SituationalJudgment,
    #[default]
    Unknown,
}

impl TestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestType::Cognitive => "Cognitive",
            TestType::Personality => "Personality",
            TestType::Skill => "Skill",
            TestType::SituationalJudgment => "Situational Judgment",
            TestType::Unknown => "Unknown",
        }
    }

    /// Parses a catalog label. Unrecognized labels map to `Unknown` rather
    /// than erroring — scraped data is messy.
    pub fn parse_label(label: &str) -> Self {
        match label.trim() {
            "Cognitive" => TestType::Cognitive,
            "Personality" => TestType::Personality,
            "Skill" => TestType::Skill,
            "Situational Judgment" | "Situational Judgement" => TestType::SituationalJudgment,
            _ => TestType::Unknown,
        }
    }
}

impl std::fmt::Display for TestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An assessment record as it moves through the ranking pipeline and the API.
/// `remote_testing` and `adaptive_support` are the catalog's literal
/// "Yes"/"No" strings; `duration` is free text, minutes-denominated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_no")]
    pub remote_testing: String,
    #[serde(default = "default_no")]
    pub adaptive_support: String,
    #[serde(default = "default_varies")]
    pub duration: String,
    #[serde(default)]
    pub test_type: TestType,
}

fn default_no() -> String {
    "No".to_string()
}

fn default_varies() -> String {
    "Varies".to_string()
}

impl Assessment {
    /// True when the catalog marks the assessment as remotely deliverable.
    pub fn supports_remote(&self) -> bool {
        self.remote_testing.eq_ignore_ascii_case("yes")
    }
}

/// An assessment plus the relevance score a strategy assigned it for one
/// query. Score-augmented copy — the shared candidate list is never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredAssessment {
    #[serde(flatten)]
    pub assessment: Assessment,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssessmentRow {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub description: String,
    pub remote_testing: String,
    pub adaptive_support: String,
    pub duration: String,
    pub test_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AssessmentRow> for Assessment {
    fn from(row: AssessmentRow) -> Self {
        Assessment {
            name: row.name,
            url: row.url,
            description: row.description,
            remote_testing: row.remote_testing,
            adaptive_support: row.adaptive_support,
            duration: row.duration,
            test_type: TestType::parse_label(&row.test_type),
        }
    }
}
