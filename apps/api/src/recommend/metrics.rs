#![allow(dead_code)]

//! Offline ranking quality metrics. Pure functions over recommendation
//! name lists and ground-truth relevant sets; no I/O.

use std::collections::HashSet;

/// Recall@K: fraction of the relevant set found in the top K.
/// Returns 0.0 when the relevant set is empty.
pub fn recall_at_k(recommended: &[&str], relevant: &HashSet<&str>, k: usize) -> f64 {
    if relevant.is_empty() {
        return 0.0;
    }
    let hits = recommended
        .iter()
        .take(k)
        .filter(|name| relevant.contains(*name))
        .count();
    hits as f64 / relevant.len() as f64
}

/// Average Precision@K: mean of precision values at each rank where a
/// relevant item appears, normalized by min(|relevant|, K).
pub fn average_precision_at_k(recommended: &[&str], relevant: &HashSet<&str>, k: usize) -> f64 {
    if relevant.is_empty() || recommended.is_empty() {
        return 0.0;
    }

    let mut relevant_seen = 0usize;
    let mut precision_sum = 0.0;

    for (i, name) in recommended.iter().take(k).enumerate() {
        if relevant.contains(name) {
            relevant_seen += 1;
            precision_sum += relevant_seen as f64 / (i + 1) as f64;
        }
    }

    let denominator = relevant.len().min(k);
    if denominator == 0 {
        return 0.0;
    }
    precision_sum / denominator as f64
}

/// Mean Recall@K over a batch of (recommendations, relevant set) pairs.
pub fn mean_recall_at_k(queries: &[(Vec<&str>, HashSet<&str>)], k: usize) -> f64 {
    if queries.is_empty() {
        return 0.0;
    }
    let total: f64 = queries
        .iter()
        .map(|(recommended, relevant)| recall_at_k(recommended, relevant, k))
        .sum();
    total / queries.len() as f64
}

/// Mean Average Precision@K over a batch.
pub fn mean_average_precision_at_k(queries: &[(Vec<&str>, HashSet<&str>)], k: usize) -> f64 {
    if queries.is_empty() {
        return 0.0;
    }
    let total: f64 = queries
        .iter()
        .map(|(recommended, relevant)| average_precision_at_k(recommended, relevant, k))
        .sum();
    total / queries.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relevant(names: &[&'static str]) -> HashSet<&'static str> {
        names.iter().copied().collect()
    }

    #[test]
    fn test_recall_full_overlap_is_one() {
        let recommended = vec!["a", "b", "c"];
        assert_eq!(recall_at_k(&recommended, &relevant(&["a", "b"]), 3), 1.0);
    }

    #[test]
    fn test_recall_partial_overlap() {
        let recommended = vec!["a", "x", "y"];
        assert_eq!(recall_at_k(&recommended, &relevant(&["a", "b"]), 3), 0.5);
    }

    #[test]
    fn test_recall_respects_k_cutoff() {
        let recommended = vec!["x", "y", "a"];
        assert_eq!(recall_at_k(&recommended, &relevant(&["a"]), 2), 0.0);
        assert_eq!(recall_at_k(&recommended, &relevant(&["a"]), 3), 1.0);
    }

    #[test]
    fn test_recall_empty_relevant_is_zero() {
        let recommended = vec!["a"];
        assert_eq!(recall_at_k(&recommended, &HashSet::new(), 3), 0.0);
    }

    #[test]
    fn test_ap_rewards_early_relevant_items() {
        let early = vec!["a", "x", "y"];
        let late = vec!["x", "y", "a"];
        let rel = relevant(&["a"]);
        assert!(
            average_precision_at_k(&early, &rel, 3) > average_precision_at_k(&late, &rel, 3)
        );
    }

    #[test]
    fn test_ap_perfect_ranking_is_one() {
        let recommended = vec!["a", "b"];
        let rel = relevant(&["a", "b"]);
        assert!((average_precision_at_k(&recommended, &rel, 2) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_ap_empty_inputs_are_zero() {
        assert_eq!(average_precision_at_k(&[], &relevant(&["a"]), 3), 0.0);
        assert_eq!(average_precision_at_k(&["a"], &HashSet::new(), 3), 0.0);
    }

    #[test]
    fn test_mean_metrics_average_over_queries() {
        let queries = vec![
            (vec!["a"], relevant(&["a"])),
            (vec!["x"], relevant(&["a"])),
        ];
        assert_eq!(mean_recall_at_k(&queries, 1), 0.5);
        assert_eq!(mean_average_precision_at_k(&queries, 1), 0.5);
    }

    #[test]
    fn test_mean_metrics_empty_batch_is_zero() {
        assert_eq!(mean_recall_at_k(&[], 5), 0.0);
        assert_eq!(mean_average_precision_at_k(&[], 5), 0.0);
    }
}
