use super::graph::{DirectedGraph, NodeId};
use super::traits::CycleFinder;
use common::{
    error::{Error, Result},
    types::WeightedCycle,
};
use std::collections::{HashSet, VecDeque};
use std::hash::Hash;
use tracing::{debug, trace};

/// Which early-exit condition flagged the vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Certificate {
    /// A chain of consecutive relaxations looped back onto an edge it had
    /// already propagated through.
    ChainRoot,
    /// The vertex was enqueued as many times as the graph has source vertices.
    Pigeonhole,
}

/// Evidence left behind by a relaxation run that stopped on a negative cycle.
#[derive(Debug, Clone)]
pub struct NegativeCycleWitness {
    pub flagged: NodeId,
    pub certificate: Certificate,
    /// For every node, the predecessors that achieve its best distance, in
    /// discovery order.
    pub predecessors: Vec<Vec<NodeId>>,
}

impl NegativeCycleWitness {
    pub fn predecessors_of(&self, node: NodeId) -> &[NodeId] {
        self.predecessors.get(node).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Counters collected during one relaxation run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RelaxStats {
    pub dequeued: usize,
    /// Dequeued nodes whose out-edges were skipped because a predecessor was
    /// still queued.
    pub deferred: usize,
    /// Strict improvements, including the one that triggered an early exit.
    pub relaxed: usize,
    pub ties: usize,
}

/// Outcome of [`SpfaSolver::relax`].
#[derive(Debug, Clone)]
pub struct Relaxation {
    pub witness: Option<NegativeCycleWitness>,
    pub stats: RelaxStats,
}

/// One level of the backtracking search over the predecessor graph.
struct Frame {
    node: NodeId,
    remaining: Vec<NodeId>,
}

impl Frame {
    fn new(node: NodeId, predecessors: &[NodeId]) -> Self {
        Self {
            node,
            remaining: predecessors.to_vec(),
        }
    }
}

/// Solver implementing the Shortest Path Faster Algorithm (SPFA) for
/// negative cycle detection, with the chain-root early exit.
#[derive(Debug, Clone, Copy)]
pub struct SpfaSolver {
    /// Enables the chain-root heuristic. The pigeonhole certificate is
    /// always active.
    pub heuristic: bool,
}

impl Default for SpfaSolver {
    fn default() -> Self {
        Self { heuristic: true }
    }
}

impl SpfaSolver {
    pub fn new(heuristic: bool) -> Self {
        Self { heuristic }
    }

    /// Runs queue-based relaxation from `source` until a negative cycle is
    /// certified or the queue drains.
    ///
    /// Every node keeps the full list of predecessors that tie for its best
    /// distance, separately from the single node that last relaxed it. The
    /// latter drives the chain-root heuristic: a chain of relaxations where
    /// each node was last relaxed by its parent inherits the edge that started
    /// the chain, and when a chain tries to relax an endpoint of its own root
    /// edge again it has gone around a negative cycle.
    ///
    /// A dequeued node is skipped while any of its predecessors is still in
    /// the queue. It is not re-enqueued for that; it only runs again if a
    /// later relaxation improves it. When the queued predecessor ends up not
    /// improving it, the node's out-edges are never relaxed in this run.
    ///
    /// # Returns
    /// A [`Relaxation`] whose `witness` is `Some` when a vertex was flagged.
    /// An unknown `source` yields no witness.
    pub fn relax<V, W>(&self, graph: &DirectedGraph<V>, source: &V, weight: W) -> Relaxation
    where
        V: Clone + Eq + Hash,
        W: Fn(&V, &V) -> f64,
    {
        let mut stats = RelaxStats::default();

        let Some(source) = graph.node_id(source) else {
            debug!("Relaxation source is not a vertex of the graph.");
            return Relaxation {
                witness: None,
                stats,
            };
        };

        let num_nodes = graph.node_count();
        let hop_cap = graph.source_count();

        // `None` stands for +inf.
        let mut distance: Vec<Option<f64>> = vec![None; num_nodes];
        let mut predecessors: Vec<Vec<NodeId>> = vec![Vec::new(); num_nodes];
        let mut last_relaxed_from: Vec<Option<NodeId>> = vec![None; num_nodes];
        let mut chain_root: Vec<Option<(NodeId, NodeId)>> = vec![None; num_nodes];
        let mut count = vec![0usize; num_nodes];
        let mut in_queue = vec![false; num_nodes];

        let mut queue = VecDeque::with_capacity(num_nodes);

        distance[source] = Some(0.0);
        queue.push_back(source);
        in_queue[source] = true;

        while let Some(u) = queue.pop_front() {
            in_queue[u] = false;
            stats.dequeued += 1;

            if predecessors[u].iter().any(|&p| in_queue[p]) {
                stats.deferred += 1;
                trace!(node = u, "Deferring node: a predecessor is still queued.");
                continue;
            }

            let Some(distance_u) = distance[u] else {
                continue;
            };

            for &v in graph.successor_ids(u) {
                let candidate = distance_u + weight(graph.vertex(u), graph.vertex(v));

                if candidate < distance[v].unwrap_or(f64::INFINITY) {
                    stats.relaxed += 1;

                    if self.heuristic {
                        if chain_root[u].is_some_and(|(x, y)| x == v || y == v) {
                            predecessors[v].push(u);
                            debug!(node = v, via = u, "Relaxation chain looped onto its root edge.");
                            return flagged(v, Certificate::ChainRoot, predecessors, stats);
                        }
                        chain_root[v] = if last_relaxed_from[v] == Some(u) {
                            chain_root[u]
                        } else {
                            Some((u, v))
                        };
                    }

                    if !in_queue[v] {
                        queue.push_back(v);
                        in_queue[v] = true;
                        count[v] += 1;
                        if count[v] == hop_cap {
                            debug!(node = v, hop_cap, "Enqueue count reached the vertex bound.");
                            return flagged(v, Certificate::Pigeonhole, predecessors, stats);
                        }
                    }

                    distance[v] = Some(candidate);
                    predecessors[v].clear();
                    predecessors[v].push(u);
                    last_relaxed_from[v] = Some(u);
                } else if distance[v] == Some(candidate) {
                    stats.ties += 1;
                    predecessors[v].push(u);
                }
            }
        }

        Relaxation {
            witness: None,
            stats,
        }
    }

    /// Reconstructs a negative cycle through the flagged vertex by walking the
    /// predecessor lists backwards.
    ///
    /// The search is an iterative depth-first backtrack: each frame holds the
    /// predecessors of its node that have not been tried yet, and the search
    /// closes as soon as the top frame lists the flagged vertex among them.
    /// Nodes are never unmarked once seen.
    ///
    /// # Returns
    /// The cycle in forward order, starting and ending at the flagged vertex.
    ///
    /// # Errors
    /// Returns `Error::NotFound` if the predecessor lists hold no cycle through
    /// the flagged vertex and it has no negative self-loop.
    pub fn reconstruct_cycle<V, W>(
        &self,
        graph: &DirectedGraph<V>,
        witness: &NegativeCycleWitness,
        weight: W,
    ) -> Result<Vec<V>>
    where
        V: Clone + Eq + Hash,
        W: Fn(&V, &V) -> f64,
    {
        let target = witness.flagged;
        let mut stack = vec![Frame::new(target, witness.predecessors_of(target))];
        let mut seen = HashSet::from([target]);
        let mut cycle: Vec<NodeId> = Vec::new();

        while let Some(frame) = stack.last_mut() {
            if frame.remaining.contains(&target) {
                cycle.push(frame.node);
                cycle.push(target);
                cycle.reverse();
                return Ok(cycle.into_iter().map(|id| graph.vertex(id).clone()).collect());
            }

            if let Some(candidate) = frame.remaining.pop() {
                let node = frame.node;
                if seen.insert(candidate) {
                    stack.push(Frame::new(candidate, witness.predecessors_of(candidate)));
                    cycle.push(node);
                }
            } else {
                stack.pop();
                if cycle.pop().is_none() {
                    return self_loop_fallback(graph, target, weight);
                }
            }
        }

        Err(Error::NotFound)
    }

    /// Like [`CycleFinder::find_negative_cycle`], but also evaluates the
    /// weight of every edge on the cycle.
    pub fn find_weighted_cycle<V, W>(
        &self,
        graph: &DirectedGraph<V>,
        source: &V,
        weight: W,
    ) -> Result<WeightedCycle<V>>
    where
        V: Clone + Eq + Hash,
        W: Fn(&V, &V) -> f64,
    {
        let path = self.find_negative_cycle(graph, source, &weight)?;
        Ok(WeightedCycle::from_path(path, weight))
    }
}

impl CycleFinder for SpfaSolver {
    fn find_negative_cycle<V, W>(
        &self,
        graph: &DirectedGraph<V>,
        source: &V,
        weight: W,
    ) -> Result<Vec<V>>
    where
        V: Clone + Eq + Hash,
        W: Fn(&V, &V) -> f64,
    {
        let relaxation = self.relax(graph, source, &weight);
        let witness = relaxation.witness.ok_or(Error::NotFound)?;
        self.reconstruct_cycle(graph, &witness, weight)
    }
}

/// Finds one negative cycle reachable from `source`, using the default
/// (heuristic-enabled) solver.
///
/// The result is certified by the relaxation, not verified against it: a
/// tie recorded in a predecessor list can close the walk on a zero-weight
/// cycle ahead of the negative one, and a bound reached downstream of the
/// cycle yields `Error::NotFound`.
pub fn find_negative_cycle<V, W>(graph: &DirectedGraph<V>, source: &V, weight: W) -> Result<Vec<V>>
where
    V: Clone + Eq + Hash,
    W: Fn(&V, &V) -> f64,
{
    SpfaSolver::default().find_negative_cycle(graph, source, weight)
}

fn flagged(
    node: NodeId,
    certificate: Certificate,
    predecessors: Vec<Vec<NodeId>>,
    stats: RelaxStats,
) -> Relaxation {
    Relaxation {
        witness: Some(NegativeCycleWitness {
            flagged: node,
            certificate,
            predecessors,
        }),
        stats,
    }
}

fn self_loop_fallback<V, W>(graph: &DirectedGraph<V>, node: NodeId, weight: W) -> Result<Vec<V>>
where
    W: Fn(&V, &V) -> f64,
    V: Clone,
{
    let vertex = graph.vertex(node);
    if graph.has_edge_ids(node, node) && weight(vertex, vertex) < 0.0 {
        return Ok(vec![vertex.clone(), vertex.clone()]);
    }
    debug!(node, "Predecessor search exhausted without closing a cycle.");
    Err(Error::NotFound)
}
