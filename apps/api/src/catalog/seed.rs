//! Built-in catalog used when both the cache and the live scrape come up
//! empty. Based on publicly available information about the product line.

use crate::models::assessment::{Assessment, TestType};

fn seed(
    name: &str,
    url: &str,
    description: &str,
    remote_testing: &str,
    adaptive_support: &str,
    duration: &str,
    test_type: TestType,
) -> Assessment {
    Assessment {
        name: name.to_string(),
        url: url.to_string(),
        description: description.to_string(),
        remote_testing: remote_testing.to_string(),
        adaptive_support: adaptive_support.to_string(),
        duration: duration.to_string(),
        test_type,
    }
}

/// The fallback assessment list.
pub fn fallback_assessments() -> Vec<Assessment> {
    vec![
        seed(
            "Verify Interactive - Cognitive Ability",
            "https://www.shl.com/solutions/products/verify-interactive/",
            "Assess critical reasoning through engaging, interactive tasks. Measures verbal, \
             numerical, and inductive reasoning with gamified elements.",
            "Yes",
            "Yes",
            "30 minutes",
            TestType::Cognitive,
        ),
        seed(
            "Verify - Numerical Reasoning",
            "https://www.shl.com/solutions/products/verify/",
            "Measures the ability to make correct decisions or inferences from numerical data. \
             Helps predict performance in roles requiring analysis and interpretation of \
             numerical information.",
            "Yes",
            "Yes",
            "18 minutes",
            TestType::Cognitive,
        ),
        seed(
            "Verify - Verbal Reasoning",
            "https://www.shl.com/solutions/products/verify/",
            "Measures the ability to evaluate the logic of various statements based on passage \
             information. Essential for roles requiring complex verbal information processing.",
            "Yes",
            "Yes",
            "17 minutes",
            TestType::Cognitive,
        ),
        seed(
            "Verify - Inductive Reasoning",
            "https://www.shl.com/solutions/products/verify/",
            "Measures the ability to identify logical patterns and relationships. Useful for \
             roles requiring problem-solving, innovation, and working with complex information.",
            "Yes",
            "Yes",
            "18 minutes",
            TestType::Cognitive,
        ),
        seed(
            "OPQ - Occupational Personality Questionnaire",
            "https://www.shl.com/solutions/products/opq/",
            "Provides an accurate, detailed view of personality to help predict workplace \
             performance and cultural fit. Measures 32 personality characteristics.",
            "Yes",
            "No",
            "25 minutes",
            TestType::Personality,
        ),
        seed(
            "Verify for Programmers",
            "https://www.shl.com/solutions/products/coding-tests/",
            "Measures programming skills through real-world coding challenges. Available for \
             Java, Python, JavaScript, C#, and more.",
            "Yes",
            "No",
            "60 minutes",
            TestType::Skill,
        ),
        seed(
            "Situational Judgement Test",
            "https://www.shl.com/solutions/products/situational-judgement/",
            "Presents realistic workplace scenarios to measure judgment and decision-making \
             ability. Highly customizable to specific roles.",
            "Yes",
            "No",
            "30 minutes",
            TestType::SituationalJudgment,
        ),
        seed(
            "MQ - Motivation Questionnaire",
            "https://www.shl.com/solutions/products/motivation-questionnaire/",
            "Measures 18 key dimensions of motivation to help understand what drives an \
             individual in the workplace. Predicts job satisfaction and engagement.",
            "Yes",
            "No",
            "25 minutes",
            TestType::Personality,
        ),
        seed(
            "Verify for Microsoft Excel",
            "https://www.shl.com/solutions/products/ms-office-tests/",
            "Assesses proficiency in Microsoft Excel through practical tasks. Covers formulas, \
             functions, data manipulation, and analysis.",
            "Yes",
            "No",
            "40 minutes",
            TestType::Skill,
        ),
        seed(
            "ADEPT-15 Personality Assessment",
            "https://www.shl.com/solutions/products/adept-15/",
            "Measures 15 aspects of personality that impact critical work outcomes. Offers a \
             deep, contextual understanding of workplace behaviors.",
            "Yes",
            "Yes",
            "25 minutes",
            TestType::Personality,
        ),
        seed(
            "Executive Assessment",
            "https://www.shl.com/solutions/products/executive-assessment/",
            "Tailored for leadership roles, measures strategic thinking, leading change, and \
             executive presence. Combines cognitive and behavioral measures.",
            "Yes",
            "Yes",
            "90 minutes",
            TestType::Cognitive,
        ),
        seed(
            "SQL Assessment",
            "https://www.shl.com/solutions/products/technical-assessments/",
            "Evaluates SQL proficiency through practical database queries and data manipulation \
             tasks. Tests understanding of SQL syntax, joins, aggregation, and optimization.",
            "Yes",
            "No",
            "45 minutes",
            TestType::Skill,
        ),
    ]
}
