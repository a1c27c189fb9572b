//! Cumulative distribution table over weighted records.
//!
//! ```text
//! weights   [2, 1, 1]            (dataset order)
//!    ↓ normalise by total
//! cumulative [0.5, 0.75, 1.0]
//!    ↓ draw d ∈ [0,1)
//! first entry with cumulative > d  →  original index
//! ```

/// One row of the cumulative table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CumulativeEntry {
    /// Running sum of normalised weights, in `(0, 1]`.
    pub cumulative_weight: f64,
    /// Index of the record in the full dataset.
    pub index: usize,
}

/// Normalised cumulative-weight index over a subset of the dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedPool {
    entries: Vec<CumulativeEntry>,
}

impl WeightedPool {
    /// Build the table from `(weight, original_index)` pairs in dataset order.
    ///
    /// An empty input yields an empty pool; callers decide how to fail.
    #[must_use]
    pub fn build<I>(weighted: I) -> Self
    where
        I: IntoIterator<Item = (f64, usize)>,
    {
        let pairs: Vec<(f64, usize)> = weighted.into_iter().collect();
        // Scale by the largest weight first so the total stays finite.
        let max_weight = pairs.iter().map(|(weight, _)| *weight).fold(0.0, f64::max);
        let total_weight: f64 = pairs.iter().map(|(weight, _)| weight / max_weight).sum();
        let mut sum = 0.0;
        let mut entries: Vec<CumulativeEntry> = pairs
            .into_iter()
            .map(|(weight, index)| {
                sum += weight / max_weight / total_weight;
                CumulativeEntry {
                    cumulative_weight: sum,
                    index,
                }
            })
            .collect();
        // Rounding can leave the tail just under 1.0, which would strand draws near 1.
        if let Some(last) = entries.last_mut() {
            last.cumulative_weight = 1.0;
        }
        Self { entries }
    }

    /// Original index for `draw`: the first entry whose cumulative weight is
    /// strictly greater than the draw.
    ///
    /// Returns `None` for an empty pool or a draw outside `[0, 1)`.
    #[must_use]
    pub fn sample(&self, draw: f64) -> Option<usize> {
        if !(0.0..1.0).contains(&draw) {
            return None;
        }
        let position = self
            .entries
            .partition_point(|entry| entry.cumulative_weight <= draw);
        self.entries.get(position).map(|entry| entry.index)
    }

    /// Table rows in dataset order.
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[CumulativeEntry] {
        &self.entries
    }

    /// Number of candidate records.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no record survived filtering.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_normalises_and_ends_at_one() {
        let pool = WeightedPool::build([(2.0, 0), (1.0, 3), (1.0, 7)]);
        let cumulative: Vec<f64> = pool.entries().iter().map(|e| e.cumulative_weight).collect();
        assert_eq!(cumulative, vec![0.5, 0.75, 1.0]);
        let indices: Vec<usize> = pool.entries().iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![0, 3, 7]);
    }

    #[test]
    fn build_empty_yields_empty_pool() {
        let pool = WeightedPool::build(Vec::new());
        assert!(pool.is_empty());
        assert_eq!(pool.sample(0.3), None);
    }

    #[test]
    fn sample_picks_first_entry_strictly_above_draw() {
        let pool = WeightedPool::build([(2.0, 0), (1.0, 3), (1.0, 7)]);
        assert_eq!(pool.sample(0.0), Some(0));
        assert_eq!(pool.sample(0.49), Some(0));
        assert_eq!(pool.sample(0.5), Some(3));
        assert_eq!(pool.sample(0.75), Some(7));
        assert_eq!(pool.sample(0.999_999), Some(7));
    }

    #[test]
    fn sample_rejects_out_of_range_draws() {
        let pool = WeightedPool::build([(1.0, 0)]);
        assert_eq!(pool.sample(1.0), None);
        assert_eq!(pool.sample(-0.1), None);
        assert_eq!(pool.sample(f64::NAN), None);
    }

    #[test]
    fn weights_summing_past_f64_max_stay_normalised() {
        let pool = WeightedPool::build([(1e308, 0), (1e308, 1), (1e308, 2)]);
        let cumulative: Vec<f64> = pool.entries().iter().map(|e| e.cumulative_weight).collect();
        assert!(cumulative.iter().all(|c| *c > 0.0 && *c <= 1.0));
        assert!(cumulative.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(pool.sample(0.1), Some(0));
        assert_eq!(pool.sample(0.5), Some(1));
        assert_eq!(pool.sample(0.9), Some(2));
    }

    #[test]
    fn tail_is_clamped_despite_rounding() {
        let pool = WeightedPool::build((0..10).map(|index| (0.1, index)));
        assert_eq!(pool.entries().last().map(|e| e.cumulative_weight), Some(1.0));
        assert_eq!(pool.sample(0.999_999_999_999), Some(9));
    }
}
