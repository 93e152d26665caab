//! Common traits for the heap and priority queue containers
//!
//! This module provides the two seams shared by several containers:
//!
//! - [`HeapOrder`]: the ordering policy of a [`BinaryHeap`](crate::binary_heap::BinaryHeap),
//!   either fixed at compile time ([`MinOrder`], [`MaxOrder`]) or chosen at
//!   runtime ([`Direction`])
//! - [`PriorityQueueOps`]: the operations shared by
//!   [`PriorityQueue`](crate::priority_queue::PriorityQueue) and
//!   [`DuplicatePriorityQueue`](crate::duplicate_priority_queue::DuplicatePriorityQueue)
//!
//! Generic code and tests can be written once against these traits and run
//! on every implementation.

use crate::error::QueueError;
use crate::priority_queue::{Comparison, QueueConfig};
use std::fmt;
use std::hash::Hash;

/// Ordering policy for a binary heap
///
/// The element for which `precedes` holds against every other element is the
/// root of the heap: the minimum for [`MinOrder`], the maximum for [`MaxOrder`].
pub trait HeapOrder: Clone + fmt::Debug {
    /// Returns true if `a` must sit strictly above `b` in the heap
    fn precedes<T: Ord>(&self, a: &T, b: &T) -> bool;
}

/// Min-heap ordering: parent ≤ children
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinOrder;

/// Max-heap ordering: parent ≥ children
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaxOrder;

/// Heap ordering chosen at runtime
///
/// The priority queues pick their direction from a construction flag, so
/// their internal heap uses this instead of a marker type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    /// Smallest element at the root
    Min,
    /// Largest element at the root
    #[default]
    Max,
}

impl HeapOrder for MinOrder {
    #[inline]
    fn precedes<T: Ord>(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

impl HeapOrder for MaxOrder {
    #[inline]
    fn precedes<T: Ord>(&self, a: &T, b: &T) -> bool {
        a > b
    }
}

impl HeapOrder for Direction {
    #[inline]
    fn precedes<T: Ord>(&self, a: &T, b: &T) -> bool {
        match self {
            Direction::Min => a < b,
            Direction::Max => a > b,
        }
    }
}

/// Operations shared by the priority queue family
///
/// A queue maps priorities to elements and always hands out the element with
/// the most extreme priority first: the largest by default, the smallest when
/// built with `reverse = true`.
///
/// # Example
///
/// ```rust
/// use strict_adts::PriorityQueueOps;
/// use strict_adts::priority_queue::PriorityQueue;
///
/// let mut queue = PriorityQueue::new();
/// queue.enqueue("word", 2);
/// queue.enqueue("python", 10);
///
/// assert_eq!(queue.dequeue(), Ok("python"));
/// assert_eq!(queue.len(), 1);
/// ```
pub trait PriorityQueueOps<T: PartialEq, P: Ord + Hash + Clone> {
    /// Creates an empty queue from the given configuration
    fn with_config(config: QueueConfig) -> Self
    where
        Self: Sized;

    /// Creates an empty queue handing out the largest priority first
    fn new() -> Self
    where
        Self: Sized,
    {
        Self::with_config(QueueConfig::default())
    }

    /// Returns the number of stored elements
    fn len(&self) -> usize;

    /// Returns true if the queue holds no elements
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stores `item` under `priority`
    fn enqueue(&mut self, item: T, priority: P);

    /// Removes and returns the element with the most extreme priority
    ///
    /// # Errors
    /// Returns `QueueError::Empty` if the queue holds no elements.
    fn dequeue(&mut self) -> Result<T, QueueError>;

    /// Returns the element [`dequeue`](Self::dequeue) would return, without removing it
    ///
    /// # Errors
    /// Returns `QueueError::Empty` if the queue holds no elements.
    fn peek(&self) -> Result<&T, QueueError>;

    /// Returns the element stored under `priority`
    ///
    /// # Errors
    /// Returns `QueueError::PriorityNotFound` if nothing is stored there.
    fn get_element(&self, priority: &P) -> Result<&T, QueueError>;

    /// Returns true if some element is stored under `priority`
    fn contains_priority(&self, priority: &P) -> bool;

    /// Returns true if an element equal to `item` is stored
    fn contains_element(&self, item: &T) -> bool;

    /// Moves `item` to `new_priority` if `comparison` allows it
    ///
    /// Returns whether the priority was changed.
    ///
    /// # Errors
    /// Returns `QueueError::ElementNotFound` if `item` is not stored, whatever
    /// the outcome of the comparison would have been.
    fn replace_priority(
        &mut self,
        item: &T,
        new_priority: P,
        comparison: Comparison,
    ) -> Result<bool, QueueError>;

    /// Removes one occurrence of `item`, returning the priority it was stored under
    ///
    /// # Errors
    /// Returns `QueueError::ElementNotFound` if `item` is not stored.
    fn remove_element(&mut self, item: &T) -> Result<P, QueueError>;

    /// Removes every element
    fn clear(&mut self);
}
