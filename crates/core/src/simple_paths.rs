use std::hash::Hash;
use std::iter::FusedIterator;

use super::graph::{DirectedGraph, NodeId};

/// Cursor over the successors of one node on the DFS stack.
struct Frame<'g> {
    successors: &'g [NodeId],
    cursor: usize,
}

impl<'g> Frame<'g> {
    fn new(successors: &'g [NodeId]) -> Self {
        Self {
            successors,
            cursor: 0,
        }
    }

    fn next_child(&mut self) -> Option<NodeId> {
        let child = self.successors.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(child)
    }
}

/// Visited nodes in visiting order, with O(1) membership.
struct Visited {
    order: Vec<NodeId>,
    members: Vec<bool>,
}

impl Visited {
    fn new(num_nodes: usize) -> Self {
        Self {
            order: Vec::new(),
            members: vec![false; num_nodes],
        }
    }

    fn add(&mut self, node: NodeId) {
        self.members[node] = true;
        self.order.push(node);
    }

    fn contains(&self, node: NodeId) -> bool {
        self.members[node]
    }

    fn pop(&mut self) {
        if let Some(node) = self.order.pop() {
            self.members[node] = false;
        }
    }

    fn len(&self) -> usize {
        self.order.len()
    }
}

/// Lazy enumeration of the simple paths between two vertices.
///
/// Created by [`all_simple_paths`]. Each call to `next` resumes the
/// depth-first search where the previous path was found; dropping the
/// iterator abandons the search.
pub struct SimplePaths<'g, V> {
    graph: &'g DirectedGraph<V>,
    target: NodeId,
    cutoff: usize,
    stack: Vec<Frame<'g>>,
    visited: Visited,
}

/// Enumerates every simple path from `from` to `to`.
///
/// The search descends while fewer than `cutoff` vertices are on the current
/// path. Once `cutoff` vertices are on it, the last vertex's successors are
/// only checked for a direct hop to `to`, so a yielded path has at most
/// `cutoff + 1` vertices.
///
/// Nothing is yielded when `cutoff` is zero, when `from == to`, or when either
/// vertex is not in the graph.
pub fn all_simple_paths<'g, V>(
    graph: &'g DirectedGraph<V>,
    from: &V,
    to: &V,
    cutoff: usize,
) -> SimplePaths<'g, V>
where
    V: Clone + Eq + Hash,
{
    let mut visited = Visited::new(graph.node_count());
    let mut stack = Vec::new();
    let mut target = 0;

    if let (Some(source), Some(to)) = (graph.node_id(from), graph.node_id(to)) {
        target = to;
        if cutoff > 0 && source != target {
            visited.add(source);
            stack.push(Frame::new(graph.successor_ids(source)));
        }
    }

    SimplePaths {
        graph,
        target,
        cutoff,
        stack,
        visited,
    }
}

impl<V: Clone> SimplePaths<'_, V> {
    fn emit(&self) -> Vec<V> {
        self.visited
            .order
            .iter()
            .chain([&self.target])
            .map(|&id| self.graph.vertex(id).clone())
            .collect()
    }
}

/// Outcome of one [`SimplePaths::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<V> {
    /// The step completed a path.
    Found(Vec<V>),
    /// The step moved the search without completing a path.
    Searching,
    /// The search space is exhausted.
    Exhausted,
}

impl<V: Clone> SimplePaths<'_, V> {
    /// Advances the depth-first search by one edge or one backtrack.
    ///
    /// `next` loops over this until a path is found. Driving the search step
    /// by step lets a caller stop between two steps even when no path is
    /// coming.
    pub fn step(&mut self) -> Step<V> {
        let Some(frame) = self.stack.last_mut() else {
            return Step::Exhausted;
        };

        let Some(child) = frame.next_child() else {
            self.stack.pop();
            self.visited.pop();
            return Step::Searching;
        };

        if self.visited.len() < self.cutoff {
            if self.visited.contains(child) {
                return Step::Searching;
            }
            if child == self.target {
                // No need to descend past the target.
                return Step::Found(self.emit());
            }
            self.visited.add(child);
            self.stack.push(Frame::new(self.graph.successor_ids(child)));
            Step::Searching
        } else {
            // Depth limit reached: look one hop ahead for the target only.
            let hit =
                frame.successors.contains(&self.target) && !self.visited.contains(self.target);
            let path = hit.then(|| self.emit());
            self.stack.pop();
            self.visited.pop();
            path.map_or(Step::Searching, Step::Found)
        }
    }
}

impl<V: Clone> Iterator for SimplePaths<'_, V> {
    type Item = Vec<V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.step() {
                Step::Found(path) => return Some(path),
                Step::Searching => {}
                Step::Exhausted => return None,
            }
        }
    }
}

impl<V: Clone> FusedIterator for SimplePaths<'_, V> {}
