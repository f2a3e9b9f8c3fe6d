// Prompt constants for the LLM direct-selection scorer.

/// Direct-selection prompt template.
/// Replace `{query}`, `{assessments}`, and `{top_n}` before sending.
pub const SELECTION_PROMPT_TEMPLATE: &str = r#"Your task is to recommend the most relevant assessments for the following job requirement or query:

Query: {query}

Available Assessments:
{assessments}

Based on the query, identify the top {top_n} most relevant assessments from the list.
Consider factors such as:
1. Skills and competencies mentioned in the query
2. Time constraints if specified
3. Test type requirements (cognitive, personality, skill-based, etc.)
4. Remote testing needs if mentioned

Provide your recommendations as a JSON array of assessment indices (1-based).
For example: [3, 15, 7, 21, 4] means assessments 3, 15, 7, 21, and 4 are recommended in that order.

Return only the JSON array, no additional text."#;
