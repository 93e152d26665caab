//! Priority queue with one element per priority
//!
//! The queue keeps a hash map from priority to element and a binary heap of
//! the priorities present, used as an index to find the extreme priority
//! quickly. Each priority maps to exactly one element: enqueuing under a
//! priority that is already in use overwrites the stored element.
//!
//! For a queue that keeps every element enqueued under a shared priority, see
//! [`DuplicatePriorityQueue`](crate::duplicate_priority_queue::DuplicatePriorityQueue).
//!
//! # Example
//!
//! ```rust
//! use strict_adts::PriorityQueueOps;
//! use strict_adts::priority_queue::{Comparison, PriorityQueue};
//!
//! let mut queue = PriorityQueue::new();
//! queue.enqueue("low", 1);
//! queue.enqueue("high", 5);
//!
//! // Only move "low" if that raises its priority.
//! assert_eq!(queue.replace_priority(&"low", 0, Comparison::Greater), Ok(false));
//! assert_eq!(queue.replace_priority(&"low", 9, Comparison::Greater), Ok(true));
//! assert_eq!(queue.dequeue(), Ok("low"));
//! ```

use crate::binary_heap::BinaryHeap;
use crate::error::QueueError;
use crate::traits::{Direction, HeapOrder, PriorityQueueOps};
use rustc_hash::FxHashMap;
use std::fmt;
use std::hash::Hash;

/// Construction options for the priority queue family
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueConfig {
    /// Hand out the smallest priority first instead of the largest
    pub reverse: bool,
}

impl QueueConfig {
    /// Sets the `reverse` flag
    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub(crate) fn direction(&self) -> Direction {
        if self.reverse {
            Direction::Min
        } else {
            Direction::Max
        }
    }
}

/// Guard applied by `replace_priority` before changing a priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Comparison {
    /// Replace whenever the new priority differs from the current one
    #[default]
    Any,
    /// Replace only if the new priority is greater than the current one
    Greater,
    /// Replace only if the new priority is less than the current one
    Less,
}

impl Comparison {
    /// Returns true if moving from `current` to `new` passes this guard
    pub fn allows<P: Ord>(&self, current: &P, new: &P) -> bool {
        match self {
            Comparison::Any => new != current,
            Comparison::Greater => new > current,
            Comparison::Less => new < current,
        }
    }
}

/// Picks the priority that would be dequeued first among `candidates`
pub(crate) fn first_in_order<'a, P: Ord + 'a>(
    direction: &Direction,
    candidates: impl Iterator<Item = &'a P>,
) -> Option<&'a P> {
    candidates.fold(None, |best, p| match best {
        Some(b) if !direction.precedes(p, b) => Some(b),
        _ => Some(p),
    })
}

/// A priority queue holding at most one element per priority
pub struct PriorityQueue<T, P> {
    mapping: FxHashMap<P, T>,
    priorities: BinaryHeap<P, Direction>,
}

impl<T, P: Ord + Hash + Clone> PriorityQueue<T, P> {
    /// Creates an empty queue handing out the smallest priority first
    pub fn reversed() -> Self {
        Self::from_config(QueueConfig::default().reverse(true))
    }

    fn from_config(config: QueueConfig) -> Self {
        Self {
            mapping: FxHashMap::default(),
            priorities: BinaryHeap::with_order(config.direction()),
        }
    }

    /// Returns true if the smallest priority is handed out first
    pub fn is_reversed(&self) -> bool {
        *self.priorities.order() == Direction::Min
    }

    /// Returns the priorities present, in dequeue order
    pub fn priorities(&self) -> Vec<P> {
        self.priorities.get_sorted_elements()
    }

    /// Returns an iterator that dequeues on every step
    pub fn drain(&mut self) -> Drain<'_, T, P> {
        Drain { queue: self }
    }

    fn pop_front(&mut self) -> Result<T, QueueError> {
        let priority = self.priorities.remove_root()?;
        self.mapping
            .remove(&priority)
            .ok_or(QueueError::PriorityNotFound)
    }
}

impl<T: PartialEq, P: Ord + Hash + Clone> PriorityQueue<T, P> {
    fn priority_of(&self, item: &T) -> Option<P> {
        let matching = self
            .mapping
            .iter()
            .filter(|(_, element)| *element == item)
            .map(|(priority, _)| priority);
        first_in_order(self.priorities.order(), matching).cloned()
    }
}

impl<T: PartialEq, P: Ord + Hash + Clone> PriorityQueueOps<T, P> for PriorityQueue<T, P> {
    fn with_config(config: QueueConfig) -> Self {
        Self::from_config(config)
    }

    fn len(&self) -> usize {
        self.mapping.len()
    }

    fn enqueue(&mut self, item: T, priority: P) {
        if !self.mapping.contains_key(&priority) {
            self.priorities.add(priority.clone());
        }
        self.mapping.insert(priority, item);
    }

    fn dequeue(&mut self) -> Result<T, QueueError> {
        self.pop_front()
    }

    fn peek(&self) -> Result<&T, QueueError> {
        let priority = self.priorities.peek()?;
        self.mapping
            .get(priority)
            .ok_or(QueueError::PriorityNotFound)
    }

    fn get_element(&self, priority: &P) -> Result<&T, QueueError> {
        self.mapping
            .get(priority)
            .ok_or(QueueError::PriorityNotFound)
    }

    fn contains_priority(&self, priority: &P) -> bool {
        self.mapping.contains_key(priority)
    }

    fn contains_element(&self, item: &T) -> bool {
        self.mapping.values().any(|element| element == item)
    }

    /// Moves `item` to `new_priority` if `comparison` allows it
    ///
    /// An element already stored under `new_priority` is overwritten, as
    /// with [`enqueue`](PriorityQueueOps::enqueue).
    fn replace_priority(
        &mut self,
        item: &T,
        new_priority: P,
        comparison: Comparison,
    ) -> Result<bool, QueueError> {
        let current = self.priority_of(item).ok_or(QueueError::ElementNotFound)?;
        if !comparison.allows(&current, &new_priority) {
            return Ok(false);
        }

        let element = self
            .mapping
            .remove(&current)
            .ok_or(QueueError::ElementNotFound)?;
        self.priorities.remove(&current)?;
        self.enqueue(element, new_priority);
        Ok(true)
    }

    fn remove_element(&mut self, item: &T) -> Result<P, QueueError> {
        let priority = self.priority_of(item).ok_or(QueueError::ElementNotFound)?;
        self.mapping.remove(&priority);
        self.priorities.remove(&priority)?;
        Ok(priority)
    }

    fn clear(&mut self) {
        self.mapping.clear();
        self.priorities.clear();
    }
}

impl<T, P: Ord + Hash + Clone> Default for PriorityQueue<T, P> {
    fn default() -> Self {
        Self::from_config(QueueConfig::default())
    }
}

impl<T: fmt::Debug, P: fmt::Debug> fmt::Debug for PriorityQueue<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("priorities", &self.priorities)
            .field("mapping", &self.mapping)
            .finish()
    }
}

/// Borrowing iterator returned by [`PriorityQueue::drain`]
pub struct Drain<'a, T, P: Ord + Hash + Clone> {
    queue: &'a mut PriorityQueue<T, P>,
}

impl<T, P: Ord + Hash + Clone> Iterator for Drain<'_, T, P> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.queue.pop_front().ok()
    }
}

/// Owning iterator yielding elements in dequeue order
pub struct IntoIter<T, P: Ord + Hash + Clone> {
    queue: PriorityQueue<T, P>,
}

impl<T, P: Ord + Hash + Clone> Iterator for IntoIter<T, P> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.queue.pop_front().ok()
    }
}

impl<T, P: Ord + Hash + Clone> IntoIterator for PriorityQueue<T, P> {
    type Item = T;
    type IntoIter = IntoIter<T, P>;

    fn into_iter(self) -> IntoIter<T, P> {
        IntoIter { queue: self }
    }
}
