use std::hash::Hash;

use super::graph::DirectedGraph;
use common::error::Error;

/// Trait for graph solvers capable of detecting negative cycles.
pub trait CycleFinder {
    /// Detects a negative cycle reachable from `source`.
    ///
    /// Returns the cycle as a closed vertex sequence (first vertex repeated
    /// at the end), or `Err(Error::NotFound)` if none was certified.
    ///
    /// Implementations may trade exactness for early exit. [`SpfaSolver`]
    /// walks tie-tolerant predecessor lists, so a returned cycle has total
    /// weight `<= 0` and may close through zero-weight edges. It can also
    /// return `NotFound` when the vertex that hit the enqueue bound sits
    /// downstream of the cycle.
    ///
    /// [`SpfaSolver`]: crate::solver::SpfaSolver
    fn find_negative_cycle<V, W>(
        &self,
        graph: &DirectedGraph<V>,
        source: &V,
        weight: W,
    ) -> Result<Vec<V>, Error>
    where
        V: Clone + Eq + Hash,
        W: Fn(&V, &V) -> f64;
}
