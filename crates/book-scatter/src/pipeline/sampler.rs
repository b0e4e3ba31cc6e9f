//! Deterministic row sampling.

use crate::error::Result;
use polars::prelude::*;
use rand::prelude::*;
use tracing::debug;

/// Uniform sampling without replacement down to a row cap.
///
/// The random source is `StdRng` seeded with a fixed value, so the same
/// input and seed always select the same rows in the same order.
#[derive(Debug, Clone, Copy)]
pub struct RowSampler {
    max_rows: usize,
    seed: u64,
}

impl RowSampler {
    pub fn new(max_rows: usize, seed: u64) -> Self {
        Self { max_rows, seed }
    }

    /// Sample `df` down to at most `max_rows` rows.
    ///
    /// Tables at or under the cap are returned unchanged, in their original order.
    pub fn sample(&self, df: &DataFrame) -> Result<DataFrame> {
        let rows = df.height();
        if rows <= self.max_rows {
            debug!("{} rows within cap of {}, no sampling", rows, self.max_rows);
            return Ok(df.clone());
        }

        let indices: Vec<IdxSize> = self
            .sample_indices(rows)
            .into_iter()
            .map(|i| i as IdxSize)
            .collect();
        let idx = IdxCa::from_vec("idx".into(), indices);

        let sampled = df.take(&idx)?;
        debug!(
            "Sampled {} of {} rows (seed {})",
            sampled.height(),
            rows,
            self.seed
        );
        Ok(sampled)
    }

    /// Row positions selected from a table of `rows` rows.
    ///
    /// Returns `min(rows, max_rows)` distinct positions.
    pub fn sample_indices(&self, rows: usize) -> Vec<usize> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let indices: Vec<usize> = (0..rows).collect();
        indices
            .choose_multiple(&mut rng, self.max_rows.min(rows))
            .copied()
            .collect()
    }
}
