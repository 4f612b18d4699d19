//! Contiguous batch partitioning of predicate index ranges.

use std::ops::Range;

/// Split the index range `[0, total)` into `workers` contiguous batches.
///
/// Every batch holds `⌈total / workers⌉` indices except trailing batches,
/// which may be shorter or empty. Batches never overlap and their union is
/// exactly `[0, total)`. The split is deterministic: identical inputs always
/// yield identical batches. `workers` is clamped to at least 1.
pub fn batches(total: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let batch_size = total.div_ceil(workers);

    (0..workers)
        .map(|worker| {
            let start = (worker * batch_size).min(total);
            let end = (start + batch_size).min(total);
            start..end
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batches_cover_the_range_exactly() {
        for total in [0usize, 1, 5, 16, 17, 100] {
            for workers in [1usize, 2, 3, 7, 16, 64] {
                let split = batches(total, workers);

                assert_eq!(split.len(), workers);
                let mut next = 0;
                for range in &split {
                    assert_eq!(range.start, next.min(total));
                    assert!(range.end <= total);
                    next = range.end.max(next);
                }
                assert_eq!(split.iter().map(Range::len).sum::<usize>(), total);
            }
        }
    }

    #[test]
    fn leading_batches_use_ceil_sizing() {
        let split = batches(10, 4);

        assert_eq!(split, vec![0..3, 3..6, 6..9, 9..10]);
    }

    #[test]
    fn more_workers_than_items_leaves_empty_batches() {
        let split = batches(2, 4);

        assert_eq!(split, vec![0..1, 1..2, 2..2, 2..2]);
    }

    #[test]
    fn zero_workers_is_clamped_to_one() {
        assert_eq!(batches(5, 0), vec![0..5]);
    }

    #[test]
    fn identical_inputs_yield_identical_batches() {
        assert_eq!(batches(37, 5), batches(37, 5));
    }
}
