use std::collections::HashMap;
use std::path::PathBuf;

use common::log_rate::rate_to_weight;
use common::types::RateEdge;

/// Where the executor reads its edge list from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    /// The built-in three-node triangle.
    Demo,
    /// A CSV file with `from,to,rate` columns.
    Csv(PathBuf),
}

/// Edges of the built-in demo graph: a -> b -> c -> a, with a 1% edge on the way back.
pub fn demo_edges() -> Vec<RateEdge<String>> {
    vec![
        ("a".to_string(), "b".to_string(), 1.0),
        ("b".to_string(), "c".to_string(), 1.0),
        ("c".to_string(), "a".to_string(), 1.01),
    ]
}

/// Exchange rates keyed by directed pair. Later entries for the same pair
/// replace earlier ones.
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: HashMap<(String, String), f64>,
}

impl RateTable {
    pub fn from_edges(edges: &[RateEdge<String>]) -> Self {
        let rates = edges
            .iter()
            .map(|(from, to, rate)| ((from.clone(), to.clone()), *rate))
            .collect();
        Self { rates }
    }

    pub fn rate(&self, from: &str, to: &str) -> Option<f64> {
        self.rates.get(&(from.to_string(), to.to_string())).copied()
    }

    /// Edge weight `-ln(rate)`; pairs without a rate are unusable (`+inf`).
    pub fn weight(&self, from: &String, to: &String) -> f64 {
        self.rate(from, to).map_or(f64::INFINITY, rate_to_weight)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
