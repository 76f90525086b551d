//! Cumulative positional divergence between two integrators.

use crate::state::Position;

/// Euclidean distance between two positions.
#[inline]
pub fn position_gap(a: &Position, b: &Position) -> f64 {
    (a - b).norm()
}

/// Running sum of per-step position gaps. Non-decreasing by construction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DivergenceAccumulator {
    total: f64,
}

impl DivergenceAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the current gap to the total and return it.
    pub fn record(&mut self, a: &Position, b: &Position) -> f64 {
        let d = position_gap(a, b);
        self.total += d;
        d
    }

    pub fn total(&self) -> f64 {
        self.total
    }
}
