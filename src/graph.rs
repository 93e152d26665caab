//! General graph stored as an adjacency matrix
//!
//! Nodes are mapped to dense indices in insertion order; the edge set is a
//! square matrix indexed by those indices. A cell holds `None` when there is
//! no edge, the unit weight `W::from(1)` for an edge of an unweighted graph,
//! or the edge weight of a weighted graph.
//!
//! # Design
//!
//! - The matrix doubles in both dimensions whenever a new node would not fit,
//!   and is never shrunk.
//! - Removing a node compacts the indices of every later node by one; its row
//!   and column are cut out of the matrix and empty cells are appended so the
//!   matrix keeps its dimension.
//! - `directed`, `oriented` and `weighted` are fixed at construction. An
//!   oriented graph is a directed graph that never holds both `(a, b)` and
//!   `(b, a)`.
//!
//! # Example
//!
//! ```rust
//! use strict_adts::graph::{Graph, GraphConfig};
//! use strict_adts::error::GraphError;
//!
//! let config = GraphConfig::default().directed(true).oriented(true);
//! let mut graph: Graph<i32> = Graph::new(config).unwrap();
//! graph.add_node(1).unwrap();
//! graph.add_node(2).unwrap();
//!
//! graph.add_edge(&1, &2, None).unwrap();
//! assert_eq!(graph.add_edge(&2, &1, None), Err(GraphError::OrientationViolated));
//! assert_eq!(graph.edges_of(&1), Ok(vec![2]));
//! ```

use crate::error::GraphError;
use log::debug;
use rustc_hash::FxHashMap;
use std::fmt;
use std::hash::Hash;

/// Matrix dimension used when no size hint is given
pub const DEFAULT_EDGES_SIZE: usize = 10;

/// Construction flags of a [`Graph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphConfig {
    /// Edges have a direction
    pub directed: bool,
    /// At most one direction per node pair; requires `directed`
    pub oriented: bool,
    /// Every edge carries an explicit weight
    pub weighted: bool,
    /// Initial dimension of the adjacency matrix
    pub initial_edges_size: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            directed: false,
            oriented: false,
            weighted: false,
            initial_edges_size: DEFAULT_EDGES_SIZE,
        }
    }
}

impl GraphConfig {
    /// Sets whether edges have a direction
    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    /// Sets whether a directed edge forbids its reverse
    pub fn oriented(mut self, oriented: bool) -> Self {
        self.oriented = oriented;
        self
    }

    /// Sets whether every edge carries an explicit weight
    pub fn weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    /// Sets the starting dimension of the adjacency matrix
    pub fn initial_edges_size(mut self, size: usize) -> Self {
        self.initial_edges_size = size;
        self
    }

    /// Rejects contradictory flag combinations
    pub fn validate(&self) -> Result<(), GraphError> {
        if self.oriented && !self.directed {
            return Err(GraphError::InvalidConfig(
                "oriented graphs must be directed",
            ));
        }
        Ok(())
    }
}

/// Runtime restriction on the node values a graph accepts
///
/// Only useful for node types that can hold values of several kinds, such as
/// [`Value`](crate::value::Value).
pub struct TypeGuard<N> {
    expected: &'static str,
    accepts: fn(&N) -> bool,
}

impl<N> TypeGuard<N> {
    /// Creates a guard named `expected` that admits the nodes `accepts` returns true for
    pub fn new(expected: &'static str, accepts: fn(&N) -> bool) -> Self {
        TypeGuard { expected, accepts }
    }

    /// Name of the node kind this guard admits
    pub fn expected(&self) -> &'static str {
        self.expected
    }

    /// Checks `node` against the guard
    ///
    /// # Errors
    /// Returns `GraphError::TypeMismatch` if `node` is not admitted.
    pub fn check(&self, node: &N) -> Result<(), GraphError> {
        if (self.accepts)(node) {
            Ok(())
        } else {
            Err(GraphError::TypeMismatch {
                expected: self.expected,
            })
        }
    }
}

impl<N> Clone for TypeGuard<N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N> Copy for TypeGuard<N> {}

impl<N> fmt::Debug for TypeGuard<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeGuard").field(&self.expected).finish()
    }
}

/// An edge as returned by [`Graph::edges`]: `(from, to, weight)`
pub type Edge<N, W> = (N, N, W);

/// A graph over node values `N` with edge weights `W`
pub struct Graph<N, W = f64> {
    config: GraphConfig,
    guard: Option<TypeGuard<N>>,
    /// Node value to dense index
    indices: FxHashMap<N, usize>,
    /// Dense index to node value
    nodes: Vec<N>,
    /// Square adjacency matrix, `edges[from][to]`
    edges: Vec<Vec<Option<W>>>,
}

impl<N, W> Graph<N, W>
where
    N: Eq + Hash + Clone,
    W: Copy + From<u8>,
{
    /// Creates an empty graph accepting any value of type `N`
    ///
    /// # Errors
    /// Returns `GraphError::InvalidConfig` if `oriented` is set without `directed`.
    pub fn new(config: GraphConfig) -> Result<Self, GraphError> {
        config.validate()?;
        let size = config.initial_edges_size;
        Ok(Graph {
            config,
            guard: None,
            indices: FxHashMap::default(),
            nodes: Vec::new(),
            edges: vec![vec![None; size]; size],
        })
    }

    /// Creates an empty graph that rejects nodes failing `guard`
    ///
    /// # Errors
    /// Returns `GraphError::InvalidConfig` if `oriented` is set without `directed`.
    pub fn with_type_guard(config: GraphConfig, guard: TypeGuard<N>) -> Result<Self, GraphError> {
        let mut graph = Self::new(config)?;
        graph.guard = Some(guard);
        Ok(graph)
    }

    /// Returns the flags the graph was built with
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Returns the number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the current dimension of the adjacency matrix
    pub fn capacity(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if `node` is in the graph
    ///
    /// # Errors
    /// Returns `GraphError::TypeMismatch` if the type guard rejects `node`.
    pub fn contains(&self, node: &N) -> Result<bool, GraphError> {
        self.check_type(node)?;
        Ok(self.indices.contains_key(node))
    }

    /// Returns the dense index assigned to `node`
    ///
    /// # Errors
    /// Returns `GraphError::TypeMismatch` or `GraphError::NodeNotFound` for a bad node.
    pub fn index_of(&self, node: &N) -> Result<usize, GraphError> {
        self.check_type(node)?;
        self.indices.get(node).copied().ok_or(GraphError::NodeNotFound)
    }

    /// Adds `node`, returning false if it was already present
    ///
    /// # Errors
    /// Returns `GraphError::TypeMismatch` if the type guard rejects `node`.
    pub fn add_node(&mut self, node: N) -> Result<bool, GraphError> {
        self.check_type(&node)?;
        if self.indices.contains_key(&node) {
            return Ok(false);
        }

        let index = self.nodes.len();
        self.reserve_matrix(index + 1);
        self.indices.insert(node.clone(), index);
        self.nodes.push(node);
        Ok(true)
    }

    /// Removes `node` together with every edge touching it
    ///
    /// # Errors
    /// Returns `GraphError::TypeMismatch` if the type guard rejects `node` and
    /// `GraphError::NodeNotFound` if it is not in the graph.
    pub fn remove_node(&mut self, node: &N) -> Result<N, GraphError> {
        self.check_type(node)?;
        let index = self.indices.remove(node).ok_or(GraphError::NodeNotFound)?;

        let removed = self.nodes.remove(index);
        for other in self.indices.values_mut() {
            if *other > index {
                *other -= 1;
            }
        }

        let size = self.edges.len();
        self.edges.remove(index);
        self.edges.push(vec![None; size]);
        for row in self.edges.iter_mut() {
            row.remove(index);
            row.push(None);
        }

        debug!(
            "removed node at index {}, shifted {} later nodes down",
            index,
            self.nodes.len() - index
        );
        Ok(removed)
    }

    /// Renames `old` to `new`, keeping its index and all its edges
    ///
    /// # Errors
    /// Returns `GraphError::TypeMismatch` if the type guard rejects either
    /// value, `GraphError::NodeNotFound` if `old` is absent and
    /// `GraphError::NodeExists` if `new` is already present.
    pub fn replace_node(&mut self, old: &N, new: N) -> Result<(), GraphError> {
        self.check_type(old)?;
        self.check_type(&new)?;
        if !self.indices.contains_key(old) {
            return Err(GraphError::NodeNotFound);
        }
        if self.indices.contains_key(&new) {
            return Err(GraphError::NodeExists);
        }

        let index = self.indices.remove(old).ok_or(GraphError::NodeNotFound)?;
        self.indices.insert(new.clone(), index);
        self.nodes[index] = new;
        Ok(())
    }

    /// Adds an edge from `from` to `to`, overwriting an existing one
    ///
    /// Weighted graphs need `Some(weight)`; unweighted graphs need `None` and
    /// store the unit weight. Undirected graphs also set the reverse cell.
    ///
    /// # Errors
    /// - `GraphError::TypeMismatch` if the type guard rejects a node
    /// - `GraphError::NodeNotFound` if a node is not in the graph
    /// - `GraphError::MissingWeight` / `GraphError::UnexpectedWeight` if
    ///   `weight` does not match the graph's `weighted` flag
    /// - `GraphError::OrientationViolated` if the graph is oriented and the
    ///   reverse edge exists
    pub fn add_edge(&mut self, from: &N, to: &N, weight: Option<W>) -> Result<(), GraphError> {
        let (i, j) = self.edge_indices(from, to)?;
        let weight = match (self.config.weighted, weight) {
            (true, Some(weight)) => weight,
            (true, None) => return Err(GraphError::MissingWeight),
            (false, None) => W::from(1),
            (false, Some(_)) => return Err(GraphError::UnexpectedWeight),
        };
        if self.config.oriented && i != j && self.edges[j][i].is_some() {
            return Err(GraphError::OrientationViolated);
        }

        self.edges[i][j] = Some(weight);
        if !self.config.directed {
            self.edges[j][i] = Some(weight);
        }
        Ok(())
    }

    /// Removes the edge from `from` to `to`, returning its weight
    ///
    /// # Errors
    /// Returns `GraphError::TypeMismatch` or `GraphError::NodeNotFound` for a
    /// bad node and `GraphError::EdgeNotFound` if there is no such edge.
    pub fn remove_edge(&mut self, from: &N, to: &N) -> Result<W, GraphError> {
        let (i, j) = self.edge_indices(from, to)?;
        let weight = self.edges[i][j].take().ok_or(GraphError::EdgeNotFound)?;
        if !self.config.directed {
            self.edges[j][i] = None;
        }
        Ok(weight)
    }

    /// Returns true if there is an edge from `from` to `to`
    ///
    /// # Errors
    /// Returns `GraphError::TypeMismatch` or `GraphError::NodeNotFound` for a bad node.
    pub fn contains_edge(&self, from: &N, to: &N) -> Result<bool, GraphError> {
        let (i, j) = self.edge_indices(from, to)?;
        Ok(self.edges[i][j].is_some())
    }

    /// Returns the weight of the edge from `from` to `to`
    ///
    /// # Errors
    /// Returns `GraphError::TypeMismatch` or `GraphError::NodeNotFound` for a
    /// bad node and `GraphError::EdgeNotFound` if there is no such edge.
    pub fn get_edge_weight(&self, from: &N, to: &N) -> Result<W, GraphError> {
        let (i, j) = self.edge_indices(from, to)?;
        self.edges[i][j].ok_or(GraphError::EdgeNotFound)
    }

    /// Returns the targets of every edge leaving `node`, in index order
    ///
    /// # Errors
    /// Returns `GraphError::TypeMismatch` or `GraphError::NodeNotFound` for a bad node.
    pub fn edges_of(&self, node: &N) -> Result<Vec<N>, GraphError> {
        let index = self.index_of(node)?;
        Ok(self
            .neighbour_indices(index)
            .map(|target| self.nodes[target].clone())
            .collect())
    }

    /// Number of edges leaving `node`
    ///
    /// # Errors
    /// Returns `GraphError::TypeMismatch` or `GraphError::NodeNotFound` for a bad node.
    pub fn out_degree(&self, node: &N) -> Result<usize, GraphError> {
        let index = self.index_of(node)?;
        Ok(self.neighbour_indices(index).count())
    }

    /// Number of edges reaching `node`
    ///
    /// # Errors
    /// Returns `GraphError::TypeMismatch` or `GraphError::NodeNotFound` for a bad node.
    pub fn in_degree(&self, node: &N) -> Result<usize, GraphError> {
        let index = self.index_of(node)?;
        Ok((0..self.nodes.len())
            .filter(|&from| self.edges[from][index].is_some())
            .count())
    }

    /// Returns a copy of every node, in index order
    pub fn nodes(&self) -> Vec<N> {
        self.nodes.clone()
    }

    /// Returns a copy of every edge as `(from, to, weight)`, row by row
    ///
    /// Undirected graphs list each edge once, from the lower index.
    pub fn edges(&self) -> Vec<Edge<N, W>> {
        let mut edges = Vec::new();
        for from in 0..self.nodes.len() {
            let start = if self.config.directed { 0 } else { from };
            for to in start..self.nodes.len() {
                if let Some(weight) = self.edges[from][to] {
                    edges.push((self.nodes[from].clone(), self.nodes[to].clone(), weight));
                }
            }
        }
        edges
    }

    /// Number of edges, counting an undirected edge once
    pub fn edge_count(&self) -> usize {
        let mut count = 0;
        for from in 0..self.nodes.len() {
            let start = if self.config.directed { 0 } else { from };
            count += (start..self.nodes.len())
                .filter(|&to| self.edges[from][to].is_some())
                .count();
        }
        count
    }

    /// Iterates over the nodes in index order
    pub fn iter(&self) -> std::slice::Iter<'_, N> {
        self.nodes.iter()
    }

    pub(crate) fn node_at(&self, index: usize) -> &N {
        &self.nodes[index]
    }

    pub(crate) fn neighbour_indices(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.edges[index][..self.nodes.len()]
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_some())
            .map(|(target, _)| target)
    }

    fn edge_indices(&self, from: &N, to: &N) -> Result<(usize, usize), GraphError> {
        Ok((self.index_of(from)?, self.index_of(to)?))
    }

    fn check_type(&self, node: &N) -> Result<(), GraphError> {
        match &self.guard {
            Some(guard) => guard.check(node),
            None => Ok(()),
        }
    }

    /// Doubles the matrix until it has room for `count` nodes
    fn reserve_matrix(&mut self, count: usize) {
        let old = self.edges.len();
        if count <= old {
            return;
        }

        let mut size = old.max(1);
        while size < count {
            size *= 2;
        }
        for row in self.edges.iter_mut() {
            row.resize(size, None);
        }
        self.edges.resize_with(size, || vec![None; size]);
        debug!("adjacency matrix grown from {} to {}", old, size);
    }
}

impl<N, W> fmt::Debug for Graph<N, W>
where
    N: fmt::Debug,
    W: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edges: Vec<_> = (0..self.nodes.len())
            .flat_map(|from| {
                (0..self.nodes.len()).filter_map(move |to| {
                    self.edges[from][to]
                        .as_ref()
                        .map(|weight| (&self.nodes[from], &self.nodes[to], weight))
                })
            })
            .collect();
        f.debug_struct("Graph")
            .field("config", &self.config)
            .field("nodes", &self.nodes)
            .field("edges", &edges)
            .finish()
    }
}

impl<'a, N, W> IntoIterator for &'a Graph<N, W>
where
    N: Eq + Hash + Clone,
    W: Copy + From<u8>,
{
    type Item = &'a N;
    type IntoIter = std::slice::Iter<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn undirected() -> Graph<i32> {
        let mut graph = Graph::new(GraphConfig::default()).unwrap();
        for node in 1..=4 {
            graph.add_node(node).unwrap();
        }
        graph
    }

    #[test]
    fn test_oriented_requires_directed() {
        let config = GraphConfig::default().oriented(true);
        let graph: Result<Graph<i32>, _> = Graph::new(config);
        assert!(matches!(graph, Err(GraphError::InvalidConfig(_))));
    }

    #[test]
    fn test_oriented_rejects_reverse_edge() {
        let config = GraphConfig::default().directed(true).oriented(true);
        let mut graph: Graph<i32> = Graph::new(config).unwrap();
        graph.add_node(1).unwrap();
        graph.add_node(2).unwrap();

        graph.add_edge(&1, &2, None).unwrap();
        assert_eq!(graph.add_edge(&2, &1, None), Err(GraphError::OrientationViolated));
        assert_eq!(graph.contains_edge(&2, &1), Ok(false));

        // Self-loops have no separate reverse edge.
        graph.add_edge(&1, &1, None).unwrap();
        graph.add_edge(&1, &1, None).unwrap();
    }

    #[test]
    fn test_undirected_edges_are_symmetric() {
        let mut graph = undirected();
        graph.add_edge(&1, &3, None).unwrap();

        assert_eq!(graph.contains_edge(&3, &1), Ok(true));
        assert_eq!(graph.get_edge_weight(&1, &3), Ok(1.0));
        assert_eq!(graph.edges(), vec![(1, 3, 1.0)]);
        assert_eq!(graph.edge_count(), 1);

        assert_eq!(graph.remove_edge(&3, &1), Ok(1.0));
        assert_eq!(graph.contains_edge(&1, &3), Ok(false));
        assert_eq!(graph.remove_edge(&1, &3), Err(GraphError::EdgeNotFound));
    }

    #[test]
    fn test_directed_edges_one_way() {
        let mut graph: Graph<&str> = Graph::new(GraphConfig::default().directed(true)).unwrap();
        graph.add_node("a").unwrap();
        graph.add_node("b").unwrap();
        graph.add_edge(&"a", &"b", None).unwrap();
        graph.add_edge(&"b", &"a", None).unwrap();
        graph.remove_edge(&"a", &"b").unwrap();

        assert_eq!(graph.edges_of(&"a"), Ok(vec![]));
        assert_eq!(graph.edges_of(&"b"), Ok(vec!["a"]));
        assert_eq!(graph.in_degree(&"a"), Ok(1));
        assert_eq!(graph.out_degree(&"a"), Ok(0));
    }

    #[test]
    fn test_weight_requirements() {
        let mut weighted: Graph<i32, u32> =
            Graph::new(GraphConfig::default().weighted(true)).unwrap();
        weighted.add_node(1).unwrap();
        weighted.add_node(2).unwrap();
        assert_eq!(weighted.add_edge(&1, &2, None), Err(GraphError::MissingWeight));
        weighted.add_edge(&1, &2, Some(7)).unwrap();
        assert_eq!(weighted.get_edge_weight(&2, &1), Ok(7));

        let mut plain = undirected();
        assert_eq!(plain.add_edge(&1, &2, Some(3.0)), Err(GraphError::UnexpectedWeight));
    }

    #[test]
    fn test_missing_nodes() {
        let mut graph = undirected();
        assert_eq!(graph.add_edge(&1, &9, None), Err(GraphError::NodeNotFound));
        assert_eq!(graph.edges_of(&9), Err(GraphError::NodeNotFound));
        assert_eq!(graph.remove_node(&9), Err(GraphError::NodeNotFound));
        assert_eq!(graph.get_edge_weight(&1, &2), Err(GraphError::EdgeNotFound));
    }

    #[test]
    fn test_add_existing_node_is_noop() {
        let mut graph = undirected();
        assert_eq!(graph.add_node(2), Ok(false));
        assert_eq!(graph.len(), 4);
    }

    #[test]
    fn test_matrix_doubles() {
        let config = GraphConfig::default().initial_edges_size(2);
        let mut graph: Graph<i32> = Graph::new(config).unwrap();
        assert_eq!(graph.capacity(), 2);
        for node in 0..5 {
            graph.add_node(node).unwrap();
        }
        assert_eq!(graph.capacity(), 8);
        graph.add_edge(&0, &4, None).unwrap();
        assert_eq!(graph.edges_of(&4), Ok(vec![0]));
    }

    #[test]
    fn test_zero_sized_matrix_grows() {
        let config = GraphConfig::default().initial_edges_size(0);
        let mut graph: Graph<i32> = Graph::new(config).unwrap();
        graph.add_node(1).unwrap();
        assert_eq!(graph.capacity(), 1);
        graph.add_node(2).unwrap();
        assert_eq!(graph.capacity(), 2);
    }

    #[test]
    fn test_remove_node_compacts_indices_and_edges() {
        let mut graph = undirected();
        graph.add_edge(&1, &2, None).unwrap();
        graph.add_edge(&2, &4, None).unwrap();
        graph.add_edge(&3, &4, None).unwrap();
        let capacity = graph.capacity();

        assert_eq!(graph.remove_node(&2), Ok(2));
        assert_eq!(graph.nodes(), vec![1, 3, 4]);
        assert_eq!(graph.index_of(&1), Ok(0));
        assert_eq!(graph.index_of(&3), Ok(1));
        assert_eq!(graph.index_of(&4), Ok(2));
        assert_eq!(graph.index_of(&2), Err(GraphError::NodeNotFound));
        assert_eq!(graph.capacity(), capacity);

        assert_eq!(graph.edges_of(&1), Ok(vec![]));
        assert_eq!(graph.edges_of(&4), Ok(vec![3]));
        assert_eq!(graph.edges(), vec![(3, 4, 1.0)]);
    }

    #[test]
    fn test_replace_node_keeps_edges() {
        let mut graph = undirected();
        graph.add_edge(&1, &2, None).unwrap();

        graph.replace_node(&1, 10).unwrap();
        assert_eq!(graph.contains(&1), Ok(false));
        assert_eq!(graph.contains(&10), Ok(true));
        assert_eq!(graph.index_of(&10), Ok(0));
        assert_eq!(graph.edges_of(&2), Ok(vec![10]));

        assert_eq!(graph.replace_node(&1, 11), Err(GraphError::NodeNotFound));
        assert_eq!(graph.replace_node(&10, 3), Err(GraphError::NodeExists));
    }

    #[test]
    fn test_iteration_in_index_order() {
        let mut graph = undirected();
        graph.remove_node(&1).unwrap();
        graph.add_node(1).unwrap();
        let nodes: Vec<_> = graph.iter().copied().collect();
        assert_eq!(nodes, vec![2, 3, 4, 1]);
        assert_eq!((&graph).into_iter().count(), 4);
    }

    #[test]
    fn test_type_guard_applies_to_queries() {
        let guard = TypeGuard::new("even", |node: &i32| node % 2 == 0);
        let mut graph: Graph<i32> = Graph::with_type_guard(GraphConfig::default(), guard).unwrap();
        graph.add_node(2).unwrap();
        graph.add_node(4).unwrap();
        graph.add_edge(&2, &4, None).unwrap();

        let mismatch = GraphError::TypeMismatch { expected: "even" };
        assert_eq!(graph.contains(&3), Err(mismatch.clone()));
        assert_eq!(graph.index_of(&3), Err(mismatch.clone()));
        assert_eq!(graph.contains_edge(&2, &3), Err(mismatch.clone()));
        assert_eq!(graph.get_edge_weight(&3, &4), Err(mismatch.clone()));
        assert_eq!(graph.edges_of(&5), Err(mismatch));

        assert_eq!(graph.contains(&6), Ok(false));
        assert_eq!(graph.index_of(&6), Err(GraphError::NodeNotFound));
        assert_eq!(graph.contains_edge(&2, &4), Ok(true));
    }
}
