//! Keyword heuristic — additive signal matching with no external
//! dependency. The last scorer in the chain and the only one that is
//! always available.

use anyhow::Result;
use async_trait::async_trait;

use crate::duration::parse_minutes;
use crate::models::assessment::{Assessment, ScoredAssessment, TestType};
use crate::recommend::RelevanceScorer;

const SKILL_MATCH_BONUS: f64 = 0.2;
const ROLE_MATCH_BONUS: f64 = 0.15;
const TYPE_MATCH_BONUS: f64 = 0.25;
const WITHIN_DURATION_BONUS: f64 = 0.3;
const OVER_DURATION_PENALTY: f64 = 0.1;
const REMOTE_BONUS: f64 = 0.1;

/// Technical skill terms matched between query and candidate text.
const TECH_SKILLS: &[&str] = &[
    "java",
    "python",
    "javascript",
    "js",
    "sql",
    "c#",
    "c++",
    "react",
    "angular",
    "node",
    "excel",
    "data analysis",
    "coding",
];

/// Role terms matched between query and candidate text.
const ROLE_TYPES: &[&str] = &[
    "developer",
    "engineer",
    "analyst",
    "manager",
    "leader",
    "executive",
    "technical",
    "business",
    "data",
    "hr",
    "sales",
    "marketing",
];

/// Query cue words implying a test type preference.
const TEST_TYPE_CUES: &[(TestType, &[&str])] = &[
    (
        TestType::Cognitive,
        &[
            "reasoning",
            "logic",
            "problem solving",
            "analytical",
            "critical thinking",
        ],
    ),
    (
        TestType::Personality,
        &[
            "behavior",
            "attitude",
            "team fit",
            "communication",
            "collaboration",
        ],
    ),
    (
        TestType::Skill,
        &["coding", "technical", "practical", "hands-on"],
    ),
    (
        TestType::SituationalJudgment,
        &["judgment", "scenario", "decision making"],
    ),
];

/// Computes the additive relevance score for one candidate, clamped to
/// [0.0, 1.0].
///
/// Signal groups are independent: each matched technical skill adds 0.2,
/// each matched role term 0.15, a test-type alignment 0.25, the duration
/// check +0.3/−0.1 (only when a constraint exists and the candidate's
/// duration parses), and remote support +0.1 when the query asks for it.
pub fn relevance_score(query: &str, candidate: &Assessment, constraint: Option<u32>) -> f64 {
    let query = query.to_lowercase();
    let name = candidate.name.to_lowercase();
    let description = candidate.description.to_lowercase();

    let mut score = 0.0;

    for skill in TECH_SKILLS {
        if query.contains(skill) && (name.contains(skill) || description.contains(skill)) {
            score += SKILL_MATCH_BONUS;
        }
    }

    for role in ROLE_TYPES {
        if query.contains(role) && (name.contains(role) || description.contains(role)) {
            score += ROLE_MATCH_BONUS;
        }
    }

    for (test_type, cues) in TEST_TYPE_CUES {
        let mentioned = cues.iter().any(|cue| query.contains(cue));
        if mentioned && candidate.test_type == *test_type {
            score += TYPE_MATCH_BONUS;
        }
    }

    if let Some(cap) = constraint {
        if let Some(minutes) = parse_minutes(&candidate.duration) {
            if minutes <= cap {
                score += WITHIN_DURATION_BONUS;
            } else {
                score -= OVER_DURATION_PENALTY;
            }
        }
    }

    if query.contains("remote") && candidate.supports_remote() {
        score += REMOTE_BONUS;
    }

    score.clamp(0.0, 1.0)
}

pub struct KeywordScorer;

#[async_trait]
impl RelevanceScorer for KeywordScorer {
    fn name(&self) -> &'static str {
        "keyword"
    }

    async fn score(
        &self,
        query: &str,
        candidates: &[Assessment],
        constraint: Option<u32>,
        max_results: usize,
    ) -> Result<Vec<ScoredAssessment>> {
        let mut results: Vec<ScoredAssessment> = candidates
            .iter()
            .map(|candidate| ScoredAssessment {
                assessment: candidate.clone(),
                score: relevance_score(query, candidate, constraint),
            })
            .collect();

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));

        // Hard-filter by the duration constraint, but only when that leaves
        // something to return — a too-strict constraint keeps the full
        // ranking rather than producing nothing.
        if let Some(cap) = constraint {
            let filtered: Vec<ScoredAssessment> = results
                .iter()
                .filter(|s| {
                    parse_minutes(&s.assessment.duration)
                        .map(|m| m <= cap)
                        .unwrap_or(false)
                })
                .cloned()
                .collect();
            if !filtered.is_empty() {
                results = filtered;
            }
        }

        results.truncate(max_results);
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(
        name: &str,
        description: &str,
        duration: &str,
        test_type: TestType,
        remote: &str,
    ) -> Assessment {
        Assessment {
            name: name.to_string(),
            url: format!("https://example.com/{}", name.to_lowercase().replace(' ', "-")),
            description: description.to_string(),
            remote_testing: remote.to_string(),
            adaptive_support: "No".to_string(),
            duration: duration.to_string(),
            test_type,
        }
    }

    #[test]
    fn test_no_signals_scores_zero() {
        let c = candidate("OPQ", "Personality questionnaire", "25 minutes", TestType::Personality, "Yes");
        assert_eq!(relevance_score("qwertyuiop", &c, None), 0.0);
    }

    #[test]
    fn test_skill_match_adds_point_two() {
        let c = candidate(
            "Verify for Programmers",
            "Python coding challenges",
            "60 minutes",
            TestType::Skill,
            "Yes",
        );
        let score = relevance_score("python", &c, None);
        assert!((score - SKILL_MATCH_BONUS).abs() < 1e-9);
    }

    #[test]
    fn test_score_monotone_in_matched_signal_groups() {
        let c = candidate(
            "Developer Coding Test",
            "Practical python coding for developers",
            "25 minutes",
            TestType::Skill,
            "Yes",
        );
        let one_signal = relevance_score("python", &c, None);
        let two_signals = relevance_score("python developer", &c, None);
        let three_signals = relevance_score("python developer coding test", &c, None);
        assert!(two_signals > one_signal);
        assert!(three_signals >= two_signals);
    }

    #[test]
    fn test_score_caps_at_one_even_when_sum_exceeds() {
        // Skills: python + coding (+0.4), roles: developer + technical
        // (+0.3), type cue "coding" vs Skill (+0.25), within duration
        // (+0.3), remote (+0.1) — the raw sum is 1.35.
        let c = candidate(
            "Technical Developer Assessment",
            "python coding test for technical developer roles",
            "20 minutes",
            TestType::Skill,
            "Yes",
        );
        let score = relevance_score(
            "remote python coding test for a technical developer, within 30 minutes",
            &c,
            Some(30),
        );
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_over_duration_penalty_never_goes_negative() {
        let c = candidate("Slow Exam", "Marathon exam", "90 minutes", TestType::Unknown, "No");
        let score = relevance_score("anything within 30", &c, Some(30));
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_duration_bonus_only_with_constraint() {
        let c = candidate("Quick Check", "A short screen", "15 minutes", TestType::Unknown, "No");
        assert_eq!(relevance_score("hiring", &c, None), 0.0);
        assert!((relevance_score("hiring", &c, Some(30)) - WITHIN_DURATION_BONUS).abs() < 1e-9);
    }

    #[test]
    fn test_remote_bonus_requires_both_sides() {
        let remote_candidate =
            candidate("Anywhere Test", "Take from home", "30 minutes", TestType::Unknown, "Yes");
        let onsite_candidate =
            candidate("Center Test", "Testing center only", "30 minutes", TestType::Unknown, "No");
        assert!((relevance_score("remote hiring", &remote_candidate, None) - REMOTE_BONUS).abs() < 1e-9);
        assert_eq!(relevance_score("remote hiring", &onsite_candidate, None), 0.0);
        assert_eq!(relevance_score("hiring", &remote_candidate, None), 0.0);
    }

    #[tokio::test]
    async fn test_constraint_filter_drops_over_duration_candidates() {
        let candidates = vec![
            candidate("Twenty", "short", "20 minutes", TestType::Unknown, "No"),
            candidate("FortyFive", "medium", "45 minutes", TestType::Unknown, "No"),
            candidate("Ninety", "long", "90 minutes", TestType::Unknown, "No"),
        ];
        let out = KeywordScorer
            .score("anything within 30", &candidates, Some(30), 10)
            .await
            .unwrap();
        let names: Vec<&str> = out.iter().map(|s| s.assessment.name.as_str()).collect();
        assert_eq!(names, vec!["Twenty"]);
    }

    #[tokio::test]
    async fn test_impossible_constraint_keeps_unfiltered_ranking() {
        let candidates = vec![
            candidate("Twenty", "short", "20 minutes", TestType::Unknown, "No"),
            candidate("FortyFive", "medium", "45 minutes", TestType::Unknown, "No"),
            candidate("Ninety", "long", "90 minutes", TestType::Unknown, "No"),
        ];
        let out = KeywordScorer
            .score("anything within 10", &candidates, Some(10), 10)
            .await
            .unwrap();
        assert_eq!(out.len(), 3);
    }

    #[tokio::test]
    async fn test_empty_candidates_returns_empty() {
        let out = KeywordScorer.score("query", &[], None, 10).await.unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_cognitive_short_candidate_outranks_long_personality() {
        // End-to-end keyword scenario: "need a 30 minute cognitive test for
        // developers" with no provider configured.
        let candidates = vec![
            candidate(
                "Big Five Profile",
                "Personality and behavior inventory",
                "60 minutes",
                TestType::Personality,
                "Yes",
            ),
            candidate(
                "Developer Reasoning Test",
                "Logical reasoning for developer hiring",
                "25 minutes",
                TestType::Cognitive,
                "Yes",
            ),
        ];
        let query = "need a 30 minute cognitive test with reasoning questions for developers";
        let out = KeywordScorer
            .score(query, &candidates, Some(30), 10)
            .await
            .unwrap();
        assert_eq!(out[0].assessment.name, "Developer Reasoning Test");
        // The 60-minute personality test fails the duration filter.
        assert_eq!(out.len(), 1);
    }

    #[tokio::test]
    async fn test_sorted_descending_by_score() {
        let candidates = vec![
            candidate("Nothing Special", "generic", "30 minutes", TestType::Unknown, "No"),
            candidate(
                "Python Test",
                "python exercises",
                "30 minutes",
                TestType::Skill,
                "No",
            ),
        ];
        let out = KeywordScorer
            .score("python screening", &candidates, None, 10)
            .await
            .unwrap();
        assert!(out[0].score >= out[1].score);
        assert_eq!(out[0].assessment.name, "Python Test");
    }
}
