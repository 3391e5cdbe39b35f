//! Batch Execution
//!
//! Runs independent, index-addressed batches of work (one engine per batch)
//! in parallel via Rayon when the `multithread` feature is enabled, serially
//! otherwise. Results come back in batch order either way.

use core::ops::Range;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Helper for feature-agnostic batch processing.
pub trait BatchProcessor {
    /// Map `f` over every batch index, preserving order.
    fn process_batches<F, R>(self, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send;
}

impl BatchProcessor for Range<usize> {
    fn process_batches<F, R>(self, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        #[cfg(feature = "multithread")]
        {
            use rayon::prelude::*;
            self.into_par_iter().map(f).collect()
        }
        #[cfg(not(feature = "multithread"))]
        {
            self.map(f).collect()
        }
    }
}

/// Split `total` items into batches of at most `batch` items.
///
/// Returns the item range of each batch.
pub fn batch_ranges(total: usize, batch: usize) -> impl Iterator<Item = Range<usize>> {
    let batch = batch.max(1);
    (0..total.div_ceil(batch)).map(move |i| i * batch..((i + 1) * batch).min(total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_is_preserved() {
        let out = (0..100).process_batches(|i| i * i);
        assert_eq!(out.len(), 100);
        assert!(out.iter().enumerate().all(|(i, &v)| v == i * i));
    }

    #[test]
    fn ranges_cover_total() {
        let ranges: Vec<_> = batch_ranges(10, 4).collect();
        assert_eq!(ranges, vec![0..4, 4..8, 8..10]);
        assert_eq!(batch_ranges(0, 4).count(), 0);
    }
}
