//! Dedup gate between folder scanning and the expensive describe/embed
//! work.

use std::collections::HashSet;

use lumina_core::ImageRecord;

/// Drop candidate paths that already have a *valid* record in the
/// store.
///
/// A path backed by an invalid record (missing description or
/// embedding, typically a partial write) stays in the output, so the
/// next ingest run reprocesses and repairs it. Output preserves the
/// order and multiplicity of `candidate_paths`.
#[must_use]
pub fn filter_existing(candidate_paths: &[String], existing: &[ImageRecord]) -> Vec<String> {
    let processed: HashSet<&str> = existing
        .iter()
        .filter(|record| record.is_valid())
        .map(|record| record.path.as_str())
        .collect();

    let filtered: Vec<String> = candidate_paths
        .iter()
        .filter(|path| !processed.contains(path.as_str()))
        .cloned()
        .collect();

    log::info!(
        "filtered candidates: {} -> {} ({} already indexed)",
        candidate_paths.len(),
        filtered.len(),
        candidate_paths.len() - filtered.len()
    );
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_valid_records_are_excluded() {
        let store = vec![ImageRecord::new("a.jpg", "a red car", vec![1.0, 0.0])];
        let result = filter_existing(&paths(&["a.jpg", "c.jpg"]), &store);
        assert_eq!(result, paths(&["c.jpg"]));
    }

    #[test]
    fn test_invalid_records_stay_eligible() {
        // Partial write: record exists but has no embedding.
        let store = vec![ImageRecord::new("a.jpg", "a red car", vec![])];
        let result = filter_existing(&paths(&["a.jpg", "c.jpg"]), &store);
        assert_eq!(result, paths(&["a.jpg", "c.jpg"]));
    }

    #[test]
    fn test_order_and_multiplicity_preserved() {
        let store = vec![ImageRecord::new("b.jpg", "a blue sky", vec![0.0, 1.0])];
        let result = filter_existing(&paths(&["c.jpg", "a.jpg", "b.jpg", "a.jpg"]), &store);
        assert_eq!(result, paths(&["c.jpg", "a.jpg", "a.jpg"]));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let store = vec![ImageRecord::new("a.jpg", "a red car", vec![1.0, 0.0])];
        let once = filter_existing(&paths(&["a.jpg", "b.jpg", "c.jpg"]), &store);
        let twice = filter_existing(&once, &store);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_store_excludes_nothing() {
        let candidates = paths(&["a.jpg", "b.jpg"]);
        assert_eq!(filter_existing(&candidates, &[]), candidates);
    }
}
