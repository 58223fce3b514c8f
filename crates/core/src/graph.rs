use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use common::types::Edge;

/// Dense index assigned to a vertex when the graph is built.
pub type NodeId = usize;

/// Immutable directed graph in Compressed Sparse Row (CSR) format.
///
/// Vertices are opaque values interned to dense [`NodeId`]s in order of first
/// appearance. Outgoing edges of each node are stored contiguously:
/// - `node_pointers[u]..node_pointers[u+1]` → edges from node `u`
/// - `edge_targets[i]` -> target node of edge `i`
/// - `edge_sources[i]` -> source node of edge `i`
///
/// Parallel edges are collapsed into one adjacency entry, and each node's
/// successors keep the order in which they were first inserted. Weights are
/// not part of the graph; algorithms receive them through a weight function.
#[derive(Debug, Clone)]
pub struct DirectedGraph<V> {
    vertices: Vec<V>,
    ids: HashMap<V, NodeId>,
    node_pointers: Vec<usize>,
    edge_targets: Vec<NodeId>,
    edge_sources: Vec<NodeId>,
    source_count: usize,
}

impl<V> DirectedGraph<V>
where
    V: Clone + Eq + Hash,
{
    /// Builds the graph from a list of `(from, to)` edges.
    ///
    /// Duplicate edges are ignored after their first occurrence. An empty
    /// edge list yields an empty graph.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = Edge<V>>,
    {
        let mut vertices = Vec::new();
        let mut ids = HashMap::new();
        let mut seen = HashSet::new();
        let mut unique_edges: Vec<(NodeId, NodeId)> = Vec::new();

        for (from, to) in edges {
            let u = Self::intern(&mut vertices, &mut ids, from);
            let v = Self::intern(&mut vertices, &mut ids, to);
            if seen.insert((u, v)) {
                unique_edges.push((u, v));
            }
        }

        let (node_pointers, edge_targets, edge_sources) =
            Self::build_csr_from_edges(vertices.len(), &unique_edges);

        let source_count = (0..vertices.len())
            .filter(|&u| node_pointers[u + 1] > node_pointers[u])
            .count();

        Self {
            vertices,
            ids,
            node_pointers,
            edge_targets,
            edge_sources,
            source_count,
        }
    }

    fn intern(vertices: &mut Vec<V>, ids: &mut HashMap<V, NodeId>, vertex: V) -> NodeId {
        if let Some(&id) = ids.get(&vertex) {
            return id;
        }
        let id = vertices.len();
        vertices.push(vertex.clone());
        ids.insert(vertex, id);
        id
    }

    /// Two-pass counting construction of the CSR arrays.
    ///
    /// The fill pass walks `edges` in order, so successors of a node appear in
    /// insertion order.
    fn build_csr_from_edges(
        num_nodes: usize,
        edges: &[(NodeId, NodeId)],
    ) -> (Vec<usize>, Vec<NodeId>, Vec<NodeId>) {
        let m = edges.len();
        let mut node_pointers = vec![0; num_nodes + 1];

        for &(u, _) in edges {
            node_pointers[u + 1] += 1;
        }

        for i in 1..=num_nodes {
            node_pointers[i] += node_pointers[i - 1];
        }

        let mut edge_targets = vec![0; m];
        let mut edge_sources = vec![0; m];

        let mut cursor = node_pointers.clone();

        for &(u, v) in edges {
            let pos = cursor[u];
            edge_targets[pos] = v;
            edge_sources[pos] = u;
            cursor[u] += 1;
        }

        (node_pointers, edge_targets, edge_sources)
    }

    /// Returns the id assigned to `vertex`, if it occurs in the graph.
    pub fn node_id(&self, vertex: &V) -> Option<NodeId> {
        self.ids.get(vertex).copied()
    }

    /// Iterates over the distinct successors of `vertex`; empty if the vertex
    /// is unknown.
    pub fn successors<'g>(&'g self, vertex: &V) -> impl Iterator<Item = &'g V> + use<'g, V> {
        let targets: &[NodeId] = match self.node_id(vertex) {
            Some(u) => self.successor_ids(u),
            None => &[],
        };
        targets.iter().map(move |&v| &self.vertices[v])
    }

    /// Returns true if the edge `from -> to` exists.
    pub fn has_edge(&self, from: &V, to: &V) -> bool {
        match (self.node_id(from), self.node_id(to)) {
            (Some(u), Some(v)) => self.has_edge_ids(u, v),
            _ => false,
        }
    }
}

impl<V> DirectedGraph<V> {
    /// Number of distinct vertices, including vertices that only appear as
    /// edge targets.
    pub fn node_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of vertices that own at least one outgoing edge.
    ///
    /// This is the bound used by the relaxation engine's enqueue counter.
    pub fn source_count(&self) -> usize {
        self.source_count
    }

    /// Number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.edge_targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertices in id order.
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    /// Resolves an id produced by this graph back to its vertex.
    ///
    /// # Panics
    /// Panics if `id` was not produced by this graph.
    pub fn vertex(&self, id: NodeId) -> &V {
        &self.vertices[id]
    }

    /// Successor ids of node `u`, in insertion order.
    pub fn successor_ids(&self, u: NodeId) -> &[NodeId] {
        match (self.node_pointers.get(u), self.node_pointers.get(u + 1)) {
            (Some(&start), Some(&end)) => &self.edge_targets[start..end],
            _ => &[],
        }
    }

    pub fn has_edge_ids(&self, u: NodeId, v: NodeId) -> bool {
        self.successor_ids(u).contains(&v)
    }

    /// Iterates over every distinct edge, grouped by source node.
    pub fn edges(&self) -> impl Iterator<Item = (&V, &V)> + '_ {
        self.edge_sources
            .iter()
            .zip(&self.edge_targets)
            .map(|(&u, &v)| (&self.vertices[u], &self.vertices[v]))
    }
}
