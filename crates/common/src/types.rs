use crate::log_rate::weight_to_rate;

/// Type alias for a directed edge: (from, to). Weights are never stored on
/// edges; they are looked up on demand through a weight function.
pub type Edge<V> = (V, V);

/// Type alias for an edge carrying an exchange rate: (from, to, rate)
pub type RateEdge<V> = (V, V, f64);

/// A closed cycle together with the weights of its edges.
///
/// Fields:
/// - `path`: Vertices of the cycle; the first vertex is repeated at the end.
/// - `weights`: Weight of each edge `path[i] -> path[i + 1]`.
/// - `total_weight`: Sum of `weights`; negative for a negative cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedCycle<V> {
    pub path: Vec<V>,
    pub weights: Vec<f64>,
    pub total_weight: f64,
}

impl<V> WeightedCycle<V> {
    /// Builds a cycle summary by evaluating `weight` on every consecutive pair
    /// of `path`.
    pub fn from_path<W>(path: Vec<V>, weight: W) -> Self
    where
        W: Fn(&V, &V) -> f64,
    {
        let weights: Vec<f64> = path.windows(2).map(|pair| weight(&pair[0], &pair[1])).collect();
        let total_weight = weights.iter().sum();
        Self {
            path,
            weights,
            total_weight,
        }
    }

    /// Number of edges on the cycle.
    pub fn hop_count(&self) -> usize {
        self.weights.len()
    }

    /// Returns true if the cycle's total weight is strictly negative.
    pub fn is_negative(&self) -> bool {
        self.total_weight < 0.0
    }

    /// Returns the rate multiplier (∏ rate_i) for the cycle, assuming the
    /// weights are `-ln(rate_i)`.
    ///
    /// Example:
    /// ```text
    /// If original rates are [2.0, 3.0, 4.0] (∏=24.0),
    /// total_weight = -ln(24.0) ≈ -3.178.
    /// product_rate = exp(3.178) = 24.0
    /// ```
    pub fn product_rate(&self) -> f64 {
        weight_to_rate(self.total_weight)
    }

    /// Returns true if the cycle is profitable (product_rate > 1.0).
    pub fn is_profitable(&self) -> bool {
        self.product_rate() > 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_rate::rate_to_weight;

    #[test]
    fn from_path_sums_consecutive_edges() {
        let path = vec!["a", "b", "c", "a"];
        let cycle = WeightedCycle::from_path(path, |from: &&str, to: &&str| match (*from, *to) {
            ("a", "b") => 1.0,
            ("b", "c") => -3.0,
            ("c", "a") => 0.5,
            _ => unreachable!(),
        });

        assert_eq!(cycle.weights, vec![1.0, -3.0, 0.5]);
        assert_eq!(cycle.total_weight, -1.5);
        assert_eq!(cycle.hop_count(), 3);
        assert!(cycle.is_negative());
    }

    #[test]
    fn product_rate_recovers_rates() {
        let rates = [("x", "y", 2.0), ("y", "x", 0.75)];
        let cycle = WeightedCycle::from_path(vec!["x", "y", "x"], |from: &&str, to: &&str| {
            let (_, _, rate) = rates
                .iter()
                .find(|(f, t, _)| f == from && t == to)
                .expect("edge present");
            rate_to_weight(*rate)
        });

        assert!((cycle.product_rate() - 1.5).abs() < 1e-12);
        assert!(cycle.is_profitable());
    }

    #[test]
    fn single_vertex_path_has_no_edges() {
        let cycle = WeightedCycle::from_path(vec![7usize], |_: &usize, _: &usize| 1.0);
        assert_eq!(cycle.hop_count(), 0);
        assert_eq!(cycle.total_weight, 0.0);
        assert!(!cycle.is_negative());
        assert!(!cycle.is_profitable());
    }
}
