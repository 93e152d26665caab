//! Error families for the containers in this crate
//!
//! Every container has its own error enum with the same general shape:
//! an "empty" case, a "not found" case and, where the container keeps a
//! runtime type discriminant, a type mismatch case. Validation always runs
//! before any mutation, so an `Err` never leaves a container half-updated.

use thiserror::Error;

/// Error type for [`BinaryHeap`](crate::binary_heap::BinaryHeap) operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The operation needs at least one element
    #[error("heap is empty")]
    Empty,
    /// The element to replace or remove is not stored in the heap
    #[error("element not found in heap")]
    ElementNotFound,
}

/// Error type for the priority queue family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// `dequeue` or `peek` on an empty queue
    #[error("priority queue is empty")]
    Empty,
    /// No stored element compares equal to the one requested
    #[error("element not found in priority queue")]
    ElementNotFound,
    /// No element is stored under the requested priority
    #[error("priority not found in priority queue")]
    PriorityNotFound,
}

impl From<HeapError> for QueueError {
    fn from(err: HeapError) -> Self {
        match err {
            HeapError::Empty => QueueError::Empty,
            // The priority heap only ever fails a lookup for a priority.
            HeapError::ElementNotFound => QueueError::PriorityNotFound,
        }
    }
}

/// Error type for [`BinarySearchTree`](crate::bst::BinarySearchTree) operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Deleting from a tree without elements
    #[error("tree is empty")]
    Empty,
    /// The value is not stored in the tree
    #[error("element not found in tree")]
    ElementNotFound,
}

/// Error type for [`Graph`](crate::graph::Graph) operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A node argument was rejected by the graph's type guard
    #[error("node type mismatch: expected {expected}")]
    TypeMismatch {
        /// Name of the type the graph accepts
        expected: &'static str,
    },
    /// The node is not part of the graph
    #[error("node not found in graph")]
    NodeNotFound,
    /// The node is already part of the graph
    #[error("node already exists in graph")]
    NodeExists,
    /// There is no edge between the two nodes
    #[error("edge not found in graph")]
    EdgeNotFound,
    /// The reverse edge already exists in an oriented graph
    #[error("oriented graph already has the reverse edge")]
    OrientationViolated,
    /// Contradictory construction flags
    #[error("invalid graph configuration: {0}")]
    InvalidConfig(&'static str),
    /// A weighted graph received an edge without a weight
    #[error("weighted graph requires an edge weight")]
    MissingWeight,
    /// An unweighted graph received an edge with a weight
    #[error("unweighted graph does not accept edge weights")]
    UnexpectedWeight,
}
