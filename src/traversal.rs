//! Breadth-first and depth-first traversal over a [`Graph`]
//!
//! Both traversals are lazy iterators over node references. The start node
//! comes first, every reachable node is yielded exactly once, and neighbours
//! are explored in index order.

use crate::error::GraphError;
use crate::graph::Graph;
use std::collections::VecDeque;
use std::hash::Hash;

/// Breadth-first traversal from `start`
///
/// # Errors
/// Returns `GraphError::NodeNotFound` if `start` is not in the graph.
///
/// # Example
///
/// ```rust
/// use strict_adts::graph::{Graph, GraphConfig};
/// use strict_adts::traversal::breadth_first;
///
/// let mut graph: Graph<char> = Graph::new(GraphConfig::default()).unwrap();
/// for node in ['a', 'b', 'c', 'd'] {
///     graph.add_node(node).unwrap();
/// }
/// graph.add_edge(&'a', &'c', None).unwrap();
/// graph.add_edge(&'c', &'d', None).unwrap();
/// graph.add_edge(&'a', &'b', None).unwrap();
///
/// let order: Vec<_> = breadth_first(&graph, &'a').unwrap().copied().collect();
/// assert_eq!(order, vec!['a', 'b', 'c', 'd']);
/// ```
pub fn breadth_first<'a, N, W>(
    graph: &'a Graph<N, W>,
    start: &N,
) -> Result<BreadthFirst<'a, N, W>, GraphError>
where
    N: Eq + Hash + Clone,
    W: Copy + From<u8>,
{
    let start = graph.index_of(start)?;
    let mut visited = vec![false; graph.len()];
    visited[start] = true;
    Ok(BreadthFirst {
        graph,
        queue: VecDeque::from([start]),
        visited,
    })
}

/// Depth-first (preorder) traversal from `start`
///
/// # Errors
/// Returns `GraphError::NodeNotFound` if `start` is not in the graph.
pub fn depth_first<'a, N, W>(
    graph: &'a Graph<N, W>,
    start: &N,
) -> Result<DepthFirst<'a, N, W>, GraphError>
where
    N: Eq + Hash + Clone,
    W: Copy + From<u8>,
{
    let start = graph.index_of(start)?;
    Ok(DepthFirst {
        graph,
        stack: vec![start],
        visited: vec![false; graph.len()],
    })
}

/// Iterator returned by [`breadth_first`]
pub struct BreadthFirst<'a, N, W> {
    graph: &'a Graph<N, W>,
    queue: VecDeque<usize>,
    visited: Vec<bool>,
}

impl<'a, N, W> Iterator for BreadthFirst<'a, N, W>
where
    N: Eq + Hash + Clone,
    W: Copy + From<u8>,
{
    type Item = &'a N;

    fn next(&mut self) -> Option<&'a N> {
        let index = self.queue.pop_front()?;
        for next in self.graph.neighbour_indices(index) {
            if !self.visited[next] {
                self.visited[next] = true;
                self.queue.push_back(next);
            }
        }
        Some(self.graph.node_at(index))
    }
}

/// Iterator returned by [`depth_first`]
pub struct DepthFirst<'a, N, W> {
    graph: &'a Graph<N, W>,
    stack: Vec<usize>,
    visited: Vec<bool>,
}

impl<'a, N, W> Iterator for DepthFirst<'a, N, W>
where
    N: Eq + Hash + Clone,
    W: Copy + From<u8>,
{
    type Item = &'a N;

    fn next(&mut self) -> Option<&'a N> {
        while let Some(index) = self.stack.pop() {
            if self.visited[index] {
                continue;
            }
            self.visited[index] = true;

            // pushed in reverse so the lowest index is explored first
            let unvisited: Vec<usize> = self
                .graph
                .neighbour_indices(index)
                .filter(|&next| !self.visited[next])
                .collect();
            self.stack.extend(unvisited.into_iter().rev());
            return Some(self.graph.node_at(index));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphConfig;

    fn chain_with_branch() -> Graph<i32> {
        // 0 - 1 - 2
        //  \
        //   3 - 4      5 (isolated)
        let mut graph = Graph::new(GraphConfig::default()).unwrap();
        for node in 0..6 {
            graph.add_node(node).unwrap();
        }
        for (a, b) in [(0, 1), (1, 2), (0, 3), (3, 4)] {
            graph.add_edge(&a, &b, None).unwrap();
        }
        graph
    }

    #[test]
    fn test_breadth_first_order() {
        let graph = chain_with_branch();
        let order: Vec<_> = breadth_first(&graph, &0).unwrap().copied().collect();
        assert_eq!(order, vec![0, 1, 3, 2, 4]);
    }

    #[test]
    fn test_depth_first_order() {
        let graph = chain_with_branch();
        let order: Vec<_> = depth_first(&graph, &0).unwrap().copied().collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_isolated_start() {
        let graph = chain_with_branch();
        assert_eq!(breadth_first(&graph, &5).unwrap().count(), 1);
        assert_eq!(depth_first(&graph, &5).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_start() {
        let graph = chain_with_branch();
        assert!(matches!(
            breadth_first(&graph, &42),
            Err(GraphError::NodeNotFound)
        ));
        assert!(matches!(depth_first(&graph, &42), Err(GraphError::NodeNotFound)));
    }

    #[test]
    fn test_directed_reachability() {
        let mut graph: Graph<i32> = Graph::new(GraphConfig::default().directed(true)).unwrap();
        for node in 0..3 {
            graph.add_node(node).unwrap();
        }
        graph.add_edge(&1, &0, None).unwrap();
        graph.add_edge(&0, &2, None).unwrap();

        let from_zero: Vec<_> = depth_first(&graph, &0).unwrap().copied().collect();
        assert_eq!(from_zero, vec![0, 2]);
        let from_one: Vec<_> = breadth_first(&graph, &1).unwrap().copied().collect();
        assert_eq!(from_one, vec![1, 0, 2]);
    }
}
