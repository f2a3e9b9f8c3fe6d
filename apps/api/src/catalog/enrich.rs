//! Catalog enrichment — fills fields the scrape (or cache) left missing.
//! Records are enriched, never overwritten: a field that already carries a
//! value is left alone.

use crate::duration::parse_minutes;
use crate::models::assessment::{Assessment, TestType};

const COGNITIVE_TERMS: &[&str] = &["cognitive", "reasoning", "intelligence", "aptitude"];
const PERSONALITY_TERMS: &[&str] = &["personality", "behavior", "behaviour", "preference"];
const SKILL_TERMS: &[&str] = &["skill", "coding", "technical", "programming"];
const SITUATIONAL_TERMS: &[&str] = &["situation", "judgment", "judgement", "scenario"];

/// Infers a test type from free text. First matching family wins.
pub fn infer_test_type(text: &str) -> TestType {
    let text = text.to_lowercase();

    if COGNITIVE_TERMS.iter().any(|t| text.contains(t)) {
        TestType::Cognitive
    } else if PERSONALITY_TERMS.iter().any(|t| text.contains(t)) {
        TestType::Personality
    } else if SKILL_TERMS.iter().any(|t| text.contains(t)) {
        TestType::Skill
    } else if SITUATIONAL_TERMS.iter().any(|t| text.contains(t)) {
        TestType::SituationalJudgment
    } else {
        TestType::Unknown
    }
}

/// Enriches a single record: duration from the description when absent,
/// test type inferred from name + description when unknown, and defaults
/// for empty remote/adaptive flags.
pub fn enrich_assessment(mut assessment: Assessment) -> Assessment {
    if assessment.duration.is_empty() || assessment.duration == "Varies" {
        match parse_minutes(&assessment.description) {
            Some(minutes) => assessment.duration = format!("{minutes} minutes"),
            None => assessment.duration = "Varies".to_string(),
        }
    }

    if assessment.test_type == TestType::Unknown {
        let combined = format!("{} {}", assessment.name, assessment.description);
        assessment.test_type = infer_test_type(&combined);
    }

    // Most modern assessments are delivered remotely; adaptive delivery is
    // the exception.
    if assessment.remote_testing.is_empty() {
        assessment.remote_testing = "Yes".to_string();
    }
    if assessment.adaptive_support.is_empty() {
        assessment.adaptive_support = "No".to_string();
    }

    assessment
}

pub fn enrich_assessments(assessments: Vec<Assessment>) -> Vec<Assessment> {
    assessments.into_iter().map(enrich_assessment).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(name: &str, description: &str) -> Assessment {
        Assessment {
            name: name.to_string(),
            url: format!("https://example.com/{name}"),
            description: description.to_string(),
            remote_testing: String::new(),
            adaptive_support: String::new(),
            duration: String::new(),
            test_type: TestType::Unknown,
        }
    }

    #[test]
    fn test_duration_filled_from_description() {
        let a = enrich_assessment(bare("Verify", "A focused 18 minute reasoning screen"));
        assert_eq!(a.duration, "18 minutes");
    }

    #[test]
    fn test_duration_defaults_to_varies() {
        let a = enrich_assessment(bare("Mystery", "No timing information here"));
        assert_eq!(a.duration, "Varies");
    }

    #[test]
    fn test_existing_duration_untouched() {
        let mut input = bare("Verify", "mentions 45 minutes in prose");
        input.duration = "18 minutes".to_string();
        let a = enrich_assessment(input);
        assert_eq!(a.duration, "18 minutes");
    }

    #[test]
    fn test_test_type_inferred_from_name_and_description() {
        let a = enrich_assessment(bare("Coding Challenge", "hands-on exercises"));
        assert_eq!(a.test_type, TestType::Skill);
    }

    #[test]
    fn test_declared_test_type_untouched() {
        let mut input = bare("Something", "personality questionnaire");
        input.test_type = TestType::Cognitive;
        let a = enrich_assessment(input);
        assert_eq!(a.test_type, TestType::Cognitive);
    }

    #[test]
    fn test_flag_defaults() {
        let a = enrich_assessment(bare("Anything", ""));
        assert_eq!(a.remote_testing, "Yes");
        assert_eq!(a.adaptive_support, "No");
    }

    #[test]
    fn test_infer_test_type_families() {
        assert_eq!(infer_test_type("numerical reasoning"), TestType::Cognitive);
        assert_eq!(infer_test_type("Behaviour preferences"), TestType::Personality);
        assert_eq!(infer_test_type("programming exercises"), TestType::Skill);
        assert_eq!(
            infer_test_type("workplace scenario decisions"),
            TestType::SituationalJudgment
        );
        assert_eq!(infer_test_type("completely unrelated"), TestType::Unknown);
    }

    #[test]
    fn test_infer_test_type_cognitive_wins_ties() {
        // "aptitude" and "personality" both present; cognitive is checked
        // first.
        assert_eq!(
            infer_test_type("an aptitude and personality battery"),
            TestType::Cognitive
        );
    }
}
