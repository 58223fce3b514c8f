use std::sync::Arc;
use tracing::{debug, info, warn};

use super::config::{PathsConfig, SearchConfig};
use super::error::Error;
use super::types::RateTable;
use bf_core::{CycleFinder, DirectedGraph, PathStream, start_from};
use common::error::Error as GraphError;
use common::types::WeightedCycle;

pub struct CycleSearcher<S> {
    solver: S,
    graph: Arc<DirectedGraph<String>>,
    rates: RateTable,
    config: SearchConfig,
}

impl<S> CycleSearcher<S>
where
    S: CycleFinder,
{
    pub fn new(
        graph: Arc<DirectedGraph<String>>,
        rates: RateTable,
        config: SearchConfig,
        solver: S,
    ) -> Self {
        CycleSearcher {
            solver,
            graph,
            rates,
            config,
        }
    }

    /// Runs one negative-cycle search from the configured source.
    ///
    /// `Ok(None)` means the search completed without finding a cycle.
    pub fn search(&self) -> Result<Option<WeightedCycle<String>>, Error> {
        if self.graph.edge_count() == 0 {
            info!("Graph has no edges. Skipping cycle search.");
            return Ok(None);
        }

        debug!(source = %self.config.source, "Starting cycle search.");
        let rates = &self.rates;
        let result = self.solver.find_negative_cycle(
            &self.graph,
            &self.config.source,
            |from: &String, to: &String| rates.weight(from, to),
        );

        let cycle = match result {
            Ok(cycle) => cycle,
            Err(GraphError::NotFound) => {
                info!(source = %self.config.source, "Search complete: no negative cycle reachable.");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let cycle = match &self.config.start_from {
            Some(start) => match start_from(&cycle, start) {
                Ok(rotated) => rotated,
                Err(e) => {
                    warn!(error = %e, "Keeping cycle as reconstructed.");
                    cycle
                }
            },
            None => cycle,
        };

        let weighted = WeightedCycle::from_path(cycle, |from: &String, to: &String| {
            rates.weight(from, to)
        });
        if !weighted.is_negative() {
            warn!(path = ?weighted.path, "Reconstructed cycle closed with zero total weight.");
        }
        info!(
            path = ?weighted.path,
            total_weight = weighted.total_weight,
            rate_product = weighted.product_rate(),
            "Negative cycle found."
        );
        Ok(Some(weighted))
    }
}

/// Enumerates simple paths per `config`, stopping after `max_results` if set.
pub async fn explore_paths(
    graph: Arc<DirectedGraph<String>>,
    config: &PathsConfig,
) -> Result<Vec<Vec<String>>, Error> {
    let limit = config.max_results.unwrap_or(usize::MAX);
    let mut stream = PathStream::spawn(
        graph,
        config.from.clone(),
        config.to.clone(),
        config.cutoff,
    );

    let mut paths = Vec::new();
    while paths.len() < limit {
        match stream.next().await {
            Some(path) => {
                info!(index = paths.len(), path = ?path, "Simple path.");
                paths.push(path);
            }
            None => break,
        }
    }

    let produced = stream
        .cancel()
        .await
        .map_err(|e| Error::ProducerFailed(e.to_string()))?;
    debug!(produced, taken = paths.len(), "Path producer finished.");

    Ok(paths)
}
