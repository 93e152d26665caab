//! Strictly typed container ADTs for Rust
//!
//! This crate provides a small family of classic containers with explicit
//! error handling and well-defined iteration semantics:
//!
//! - **Binary heap**: array-backed min and max heaps with targeted `replace`
//!   and `remove`, and non-destructive sorted extraction
//! - **Priority queue**: one element per priority, backed by a heap of priorities
//! - **Duplicate priority queue**: several elements per priority, FIFO among equals
//! - **Binary search tree**: unbalanced, arena-backed, with in-order iteration
//! - **Graph**: adjacency matrix supporting directed, oriented and weighted edges,
//!   plus breadth-first and depth-first traversal
//!
//! Every container has its own error type in [`error`]. Element types are
//! fixed by the type parameters; graphs that need heterogeneous nodes use
//! [`value::Value`] with an optional runtime [`graph::TypeGuard`].
//!
//! # Example
//!
//! ```rust
//! use strict_adts::PriorityQueueOps;
//! use strict_adts::binary_heap::MaxBinaryHeap;
//! use strict_adts::duplicate_priority_queue::DuplicatePriorityQueue;
//!
//! let mut heap: MaxBinaryHeap<u32> = [4, 9, 1].into_iter().collect();
//! assert_eq!(heap.get_sorted_elements(), vec![9, 4, 1]);
//! assert_eq!(heap.remove_max(), Ok(9));
//!
//! let mut queue = DuplicatePriorityQueue::new();
//! queue.enqueue("first", 3);
//! queue.enqueue("second", 3);
//! assert_eq!(queue.dequeue(), Ok("first"));
//! ```

pub mod binary_heap;
pub mod bst;
pub mod duplicate_priority_queue;
pub mod error;
pub mod graph;
pub mod priority_queue;
pub mod traits;
pub mod traversal;
pub mod value;

// Re-export the main traits for convenience
pub use traits::{HeapOrder, PriorityQueueOps};
