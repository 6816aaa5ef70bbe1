//! Batching of normalized URLs per provider protocol.

use serde::Serialize;

/// How a provider accepts URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BatchMode {
    /// Many URLs per request, up to the given maximum
    Bulk(usize),
    /// Exactly one URL per request
    PerUrl,
}

/// Splits normalized URLs into provider-appropriate batches.
///
/// Chunks sequentially, preserving input order; the last bulk chunk may be
/// smaller than the maximum; no batch is ever empty. An empty input produces
/// zero batches, so an idle provider contributes zero results rather than a
/// failure.
pub fn build_batches(urls: &[String], mode: BatchMode) -> Vec<Vec<String>> {
    if urls.is_empty() {
        return Vec::new();
    }
    let chunk_size = match mode {
        // A zero maximum would make chunks() panic; treat it as one per batch.
        BatchMode::Bulk(max) => max.max(1),
        BatchMode::PerUrl => 1,
    };
    urls.chunks(chunk_size).map(|c| c.to_vec()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(n: usize) -> Vec<String> {
        (0..n)
            .map(|i| format!("https://example.com/page-{i}"))
            .collect()
    }

    #[test]
    fn test_bulk_batching_chunk_count() {
        let batches = build_batches(&urls(25), BatchMode::Bulk(10));
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].len(), 10);
        assert_eq!(batches[1].len(), 10);
        assert_eq!(batches[2].len(), 5);
    }

    #[test]
    fn test_bulk_batching_exact_multiple() {
        let batches = build_batches(&urls(20), BatchMode::Bulk(10));
        assert_eq!(batches.len(), 2);
        assert!(batches.iter().all(|b| b.len() == 10));
    }

    #[test]
    fn test_per_url_batching() {
        let batches = build_batches(&urls(4), BatchMode::PerUrl);
        assert_eq!(batches.len(), 4);
        assert!(batches.iter().all(|b| b.len() == 1));
    }

    #[test]
    fn test_empty_input_produces_zero_batches() {
        assert!(build_batches(&[], BatchMode::Bulk(10)).is_empty());
        assert!(build_batches(&[], BatchMode::PerUrl).is_empty());
    }

    #[test]
    fn test_zero_max_size_does_not_panic() {
        let batches = build_batches(&urls(3), BatchMode::Bulk(0));
        assert_eq!(batches.len(), 3);
    }

    // Property-based tests using proptest
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_bulk_batch_count_is_ceil_n_over_m(n in 0usize..500, m in 1usize..50) {
            let input = urls(n);
            let batches = build_batches(&input, BatchMode::Bulk(m));
            prop_assert_eq!(batches.len(), n.div_ceil(m));
        }

        #[test]
        fn test_concatenated_batches_reproduce_input(n in 0usize..500, m in 1usize..50) {
            let input = urls(n);
            let batches = build_batches(&input, BatchMode::Bulk(m));
            let flattened: Vec<String> = batches.into_iter().flatten().collect();
            prop_assert_eq!(flattened, input);
        }

        #[test]
        fn test_no_batch_exceeds_max_or_is_empty(n in 0usize..500, m in 1usize..50) {
            let input = urls(n);
            for batch in build_batches(&input, BatchMode::Bulk(m)) {
                prop_assert!(!batch.is_empty());
                prop_assert!(batch.len() <= m);
            }
        }
    }
}
