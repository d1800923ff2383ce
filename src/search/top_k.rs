//! Partial top-k selection over a score vector

use crate::{Error, Result};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Pick the `k` highest-scoring documents without fully sorting the score
/// vector. `scores` is index-aligned with `doc_ids`.
///
/// Ties at the k-th score are broken arbitrarily: any index set achieving
/// the k-th largest value is a valid selection. A document whose id equals
/// `exclude_id` is dropped from the output with no backfill, so the result
/// may hold fewer than `k` entries.
pub fn select_top_k(
    scores: &[f32],
    k: usize,
    exclude_id: Option<&str>,
    doc_ids: &[String],
) -> Result<HashMap<String, f32>> {
    if k == 0 {
        return Err(Error::InvalidTopK(0));
    }
    debug_assert_eq!(scores.len(), doc_ids.len());

    let mut selected: Vec<usize> = (0..scores.len()).collect();
    if selected.len() > k {
        // O(n) partition: puts the k best indices in [0..k], unordered
        selected.select_nth_unstable_by(k - 1, |&a, &b| {
            scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal)
        });
        selected.truncate(k);
    }

    Ok(selected
        .into_iter()
        .filter(|&i| exclude_id != Some(doc_ids[i].as_str()))
        .map(|i| (doc_ids[i].clone(), scores[i]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_selects_highest_scores() {
        let doc_ids = ids(&["d1", "d2", "d3", "d4"]);
        let scores = [3.0, 0.5, 2.0, 1.0];

        let result = select_top_k(&scores, 2, None, &doc_ids).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result["d1"], 3.0);
        assert_eq!(result["d3"], 2.0);
    }

    #[test]
    fn test_coverage_scores_top_two() {
        // Coverage scores for a 3-document corpus: d1 = 3, d2 = 0, d3 = 2.
        let doc_ids = ids(&["d1", "d2", "d3"]);
        let scores = [3.0, 0.0, 2.0];

        let result = select_top_k(&scores, 2, None, &doc_ids).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result["d1"], 3.0);
        assert_eq!(result["d3"], 2.0);
    }

    #[test]
    fn test_k_zero_is_an_error() {
        let doc_ids = ids(&["d1"]);
        let result = select_top_k(&[1.0], 0, None, &doc_ids);
        assert!(matches!(result, Err(Error::InvalidTopK(0))));
    }

    #[test]
    fn test_k_at_least_document_count_selects_all() {
        let doc_ids = ids(&["d1", "d2", "d3"]);
        let scores = [1.0, 2.0, 3.0];

        for k in [3, 4, 100] {
            let result = select_top_k(&scores, k, None, &doc_ids).unwrap();
            assert_eq!(result.len(), 3);
        }
    }

    #[test]
    fn test_excluded_id_dropped_without_backfill() {
        let doc_ids = ids(&["d1", "d2", "d3", "d4"]);
        let scores = [5.0, 4.0, 3.0, 2.0];

        let result = select_top_k(&scores, 2, Some("d1"), &doc_ids).unwrap();

        // d1 was in the top 2; it is removed and d3 is not pulled in.
        assert_eq!(result.len(), 1);
        assert_eq!(result["d2"], 4.0);
    }

    #[test]
    fn test_excluded_id_outside_top_k_changes_nothing() {
        let doc_ids = ids(&["d1", "d2", "d3", "d4"]);
        let scores = [5.0, 4.0, 3.0, 2.0];

        let result = select_top_k(&scores, 2, Some("d4"), &doc_ids).unwrap();

        assert_eq!(result.len(), 2);
        assert!(result.contains_key("d1") && result.contains_key("d2"));
    }

    #[test]
    fn test_tied_scores_yield_a_valid_value_set() {
        let doc_ids = ids(&["d1", "d2", "d3", "d4"]);
        let scores = [1.0, 1.0, 1.0, 0.0];

        let result = select_top_k(&scores, 2, None, &doc_ids).unwrap();

        // Any two of the three tied documents are acceptable.
        assert_eq!(result.len(), 2);
        for (id, score) in &result {
            assert_ne!(id, "d4");
            assert_eq!(*score, 1.0);
        }
    }
}
