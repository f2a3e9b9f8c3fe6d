//! Facet filters applied on top of a recommendation list, after the
//! orchestrator. These never re-rank; they only drop items.

use crate::duration::parse_minutes;
use crate::models::assessment::{ScoredAssessment, TestType};

/// Explicit caller-supplied facets. All optional; `None` means "don't
/// filter on this facet".
#[derive(Debug, Default, Clone)]
pub struct Facets {
    pub test_types: Option<Vec<TestType>>,
    pub max_duration: Option<u32>,
    pub remote_testing: Option<bool>,
    pub adaptive_support: Option<bool>,
}

impl Facets {
    pub fn is_empty(&self) -> bool {
        self.test_types.is_none()
            && self.max_duration.is_none()
            && self.remote_testing.is_none()
            && self.adaptive_support.is_none()
    }
}

/// Applies all requested facets in order. Order preserved; items only drop.
pub fn apply(results: Vec<ScoredAssessment>, facets: &Facets) -> Vec<ScoredAssessment> {
    let mut results = results;

    if let Some(allowed) = &facets.test_types {
        results.retain(|s| allowed.contains(&s.assessment.test_type));
    }

    if let Some(cap) = facets.max_duration {
        // Items with an unparseable duration always pass — "Varies" is not
        // evidence the assessment is too long.
        results.retain(|s| {
            parse_minutes(&s.assessment.duration)
                .map(|minutes| minutes <= cap)
                .unwrap_or(true)
        });
    }

    if let Some(remote) = facets.remote_testing {
        let required = if remote { "Yes" } else { "No" };
        results.retain(|s| s.assessment.remote_testing == required);
    }

    if let Some(adaptive) = facets.adaptive_support {
        let required = if adaptive { "Yes" } else { "No" };
        results.retain(|s| s.assessment.adaptive_support == required);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessment::Assessment;

    fn scored(
        name: &str,
        duration: &str,
        test_type: TestType,
        remote: &str,
        adaptive: &str,
    ) -> ScoredAssessment {
        ScoredAssessment {
            assessment: Assessment {
                name: name.to_string(),
                url: format!("https://example.com/{name}"),
                description: String::new(),
                remote_testing: remote.to_string(),
                adaptive_support: adaptive.to_string(),
                duration: duration.to_string(),
                test_type,
            },
            score: 0.5,
        }
    }

    fn sample() -> Vec<ScoredAssessment> {
        vec![
            scored("cog", "18 minutes", TestType::Cognitive, "Yes", "Yes"),
            scored("pers", "25 minutes", TestType::Personality, "Yes", "No"),
            scored("skill", "60 minutes", TestType::Skill, "No", "No"),
            scored("vague", "Varies", TestType::Unknown, "Yes", "No"),
        ]
    }

    #[test]
    fn test_no_facets_is_identity() {
        let facets = Facets::default();
        assert!(facets.is_empty());
        assert_eq!(apply(sample(), &facets).len(), 4);
    }

    #[test]
    fn test_test_type_membership() {
        let facets = Facets {
            test_types: Some(vec![TestType::Cognitive, TestType::Skill]),
            ..Default::default()
        };
        let names: Vec<String> = apply(sample(), &facets)
            .into_iter()
            .map(|s| s.assessment.name)
            .collect();
        assert_eq!(names, vec!["cog", "skill"]);
    }

    #[test]
    fn test_max_duration_keeps_unparseable() {
        let facets = Facets {
            max_duration: Some(30),
            ..Default::default()
        };
        let names: Vec<String> = apply(sample(), &facets)
            .into_iter()
            .map(|s| s.assessment.name)
            .collect();
        // 60-minute item drops; "Varies" passes through.
        assert_eq!(names, vec!["cog", "pers", "vague"]);
    }

    #[test]
    fn test_remote_testing_exact_match() {
        let yes = Facets {
            remote_testing: Some(true),
            ..Default::default()
        };
        assert_eq!(apply(sample(), &yes).len(), 3);

        let no = Facets {
            remote_testing: Some(false),
            ..Default::default()
        };
        let names: Vec<String> = apply(sample(), &no)
            .into_iter()
            .map(|s| s.assessment.name)
            .collect();
        assert_eq!(names, vec!["skill"]);
    }

    #[test]
    fn test_adaptive_support_exact_match() {
        let facets = Facets {
            adaptive_support: Some(true),
            ..Default::default()
        };
        let names: Vec<String> = apply(sample(), &facets)
            .into_iter()
            .map(|s| s.assessment.name)
            .collect();
        assert_eq!(names, vec!["cog"]);
    }

    #[test]
    fn test_facets_compose() {
        let facets = Facets {
            test_types: Some(vec![TestType::Cognitive, TestType::Personality]),
            max_duration: Some(20),
            remote_testing: Some(true),
            adaptive_support: None,
        };
        let names: Vec<String> = apply(sample(), &facets)
            .into_iter()
            .map(|s| s.assessment.name)
            .collect();
        assert_eq!(names, vec!["cog"]);
    }

    #[test]
    fn test_order_preserved() {
        let facets = Facets {
            remote_testing: Some(true),
            ..Default::default()
        };
        let names: Vec<String> = apply(sample(), &facets)
            .into_iter()
            .map(|s| s.assessment.name)
            .collect();
        assert_eq!(names, vec!["cog", "pers", "vague"]);
    }
}
