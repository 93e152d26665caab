//! Priority queue allowing several elements per priority
//!
//! Like [`PriorityQueue`](crate::priority_queue::PriorityQueue), this keeps a
//! map from priority to its stored contents and a heap holding each distinct
//! priority once. Enqueuing under a priority already in use does not
//! overwrite: the slot turns into a FIFO sub-queue, so elements sharing a
//! priority come out in the order they went in.
//!
//! A slot holds either a single element or a sub-queue of two or more. As
//! soon as a removal leaves one element in a sub-queue, the slot collapses
//! back to a single element; a slot left empty is dropped together with its
//! heap entry.
//!
//! # Example
//!
//! ```rust
//! use strict_adts::PriorityQueueOps;
//! use strict_adts::duplicate_priority_queue::DuplicatePriorityQueue;
//!
//! let mut queue = DuplicatePriorityQueue::reversed();
//! queue.enqueue(1, 10);
//! queue.enqueue(2, 10);
//!
//! assert_eq!(queue.peek(), Ok(&1));
//! assert_eq!(queue.dequeue(), Ok(1));
//! assert_eq!(queue.peek(), Ok(&2));
//! ```

use crate::binary_heap::BinaryHeap;
use crate::error::QueueError;
use crate::priority_queue::{first_in_order, Comparison, QueueConfig};
use crate::traits::{Direction, PriorityQueueOps};
use log::debug;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;

/// Contents stored under one priority
#[derive(Debug, Clone)]
enum Slot<T> {
    Single(T),
    /// Always holds at least two elements
    Shared(VecDeque<T>),
}

impl<T> Slot<T> {
    fn front(&self) -> Option<&T> {
        match self {
            Slot::Single(element) => Some(element),
            Slot::Shared(queue) => queue.front(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Slot::Single(_) => 1,
            Slot::Shared(queue) => queue.len(),
        }
    }

    fn into_queue(self) -> VecDeque<T> {
        match self {
            Slot::Single(element) => VecDeque::from([element]),
            Slot::Shared(queue) => queue,
        }
    }

    /// Rebuilds a slot after a removal, collapsing or dropping it as needed
    fn from_queue(mut queue: VecDeque<T>) -> Option<Self> {
        match queue.len() {
            0 => None,
            1 => {
                debug!("shared priority slot collapsed to a single element");
                queue.pop_front().map(Slot::Single)
            }
            _ => Some(Slot::Shared(queue)),
        }
    }
}

impl<T: PartialEq> Slot<T> {
    fn contains(&self, item: &T) -> bool {
        match self {
            Slot::Single(element) => element == item,
            Slot::Shared(queue) => queue.contains(item),
        }
    }
}

/// A priority queue keeping every element enqueued under a shared priority
pub struct DuplicatePriorityQueue<T, P> {
    mapping: FxHashMap<P, Slot<T>>,
    priorities: BinaryHeap<P, Direction>,
    /// Total stored elements; `mapping.len()` only counts distinct priorities
    len: usize,
}

impl<T, P: Ord + Hash + Clone> DuplicatePriorityQueue<T, P> {
    /// Creates an empty queue handing out the smallest priority first
    pub fn reversed() -> Self {
        Self::from_config(QueueConfig::default().reverse(true))
    }

    fn from_config(config: QueueConfig) -> Self {
        Self {
            mapping: FxHashMap::default(),
            priorities: BinaryHeap::with_order(config.direction()),
            len: 0,
        }
    }

    /// Returns true if the smallest priority is handed out first
    pub fn is_reversed(&self) -> bool {
        *self.priorities.order() == Direction::Min
    }

    /// Returns true if some priority holds more than one element
    pub fn has_duplicates(&self) -> bool {
        self.len > self.mapping.len()
    }

    /// Returns the number of distinct priorities in use
    pub fn priority_count(&self) -> usize {
        self.mapping.len()
    }

    /// Returns how many elements are stored under `priority`
    pub fn count_at(&self, priority: &P) -> usize {
        self.mapping.get(priority).map_or(0, Slot::len)
    }

    /// Returns the distinct priorities present, in dequeue order
    pub fn priorities(&self) -> Vec<P> {
        self.priorities.get_sorted_elements()
    }

    /// Returns an iterator that dequeues on every step
    pub fn drain(&mut self) -> Drain<'_, T, P> {
        Drain { queue: self }
    }

    fn pop_front(&mut self) -> Result<T, QueueError> {
        let priority = self.priorities.peek()?.clone();
        let slot = self
            .mapping
            .remove(&priority)
            .ok_or(QueueError::PriorityNotFound)?;

        let mut queue = slot.into_queue();
        let head = queue.pop_front().ok_or(QueueError::PriorityNotFound)?;
        match Slot::from_queue(queue) {
            Some(rest) => {
                self.mapping.insert(priority, rest);
            }
            None => {
                self.priorities.remove_root()?;
            }
        }

        self.len -= 1;
        Ok(head)
    }
}

impl<T: PartialEq, P: Ord + Hash + Clone> DuplicatePriorityQueue<T, P> {
    fn priority_of(&self, item: &T) -> Option<P> {
        let matching = self
            .mapping
            .iter()
            .filter(|(_, slot)| slot.contains(item))
            .map(|(priority, _)| priority);
        first_in_order(self.priorities.order(), matching).cloned()
    }

    /// Removes the first occurrence of `item` stored under `priority`
    fn take_from_slot(&mut self, priority: &P, item: &T) -> Result<T, QueueError> {
        let slot = self
            .mapping
            .remove(priority)
            .ok_or(QueueError::ElementNotFound)?;

        let mut queue = slot.into_queue();
        let index = queue.iter().position(|element| element == item);
        let removed = index.and_then(|index| queue.remove(index));

        match Slot::from_queue(queue) {
            Some(rest) => {
                self.mapping.insert(priority.clone(), rest);
            }
            None => {
                self.priorities.remove(priority)?;
            }
        }

        let removed = removed.ok_or(QueueError::ElementNotFound)?;
        self.len -= 1;
        Ok(removed)
    }
}

impl<T: PartialEq, P: Ord + Hash + Clone> PriorityQueueOps<T, P> for DuplicatePriorityQueue<T, P> {
    fn with_config(config: QueueConfig) -> Self {
        Self::from_config(config)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn enqueue(&mut self, item: T, priority: P) {
        match self.mapping.remove(&priority) {
            Some(slot) => {
                let mut queue = slot.into_queue();
                queue.push_back(item);
                self.mapping.insert(priority, Slot::Shared(queue));
            }
            None => {
                self.priorities.add(priority.clone());
                self.mapping.insert(priority, Slot::Single(item));
            }
        }
        self.len += 1;
    }

    fn dequeue(&mut self) -> Result<T, QueueError> {
        self.pop_front()
    }

    fn peek(&self) -> Result<&T, QueueError> {
        let priority = self.priorities.peek()?;
        self.mapping
            .get(priority)
            .and_then(Slot::front)
            .ok_or(QueueError::PriorityNotFound)
    }

    /// Returns the oldest element stored under `priority`
    fn get_element(&self, priority: &P) -> Result<&T, QueueError> {
        self.mapping
            .get(priority)
            .and_then(Slot::front)
            .ok_or(QueueError::PriorityNotFound)
    }

    fn contains_priority(&self, priority: &P) -> bool {
        self.mapping.contains_key(priority)
    }

    fn contains_element(&self, item: &T) -> bool {
        self.mapping.values().any(|slot| slot.contains(item))
    }

    /// Moves one occurrence of `item` to `new_priority` if `comparison` allows it
    ///
    /// The moved element joins the back of the sub-queue at `new_priority`.
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

        let element = self.take_from_slot(&current, item)?;
        self.enqueue(element, new_priority);
        Ok(true)
    }

    fn remove_element(&mut self, item: &T) -> Result<P, QueueError> {
        let priority = self.priority_of(item).ok_or(QueueError::ElementNotFound)?;
        self.take_from_slot(&priority, item)?;
        Ok(priority)
    }

    fn clear(&mut self) {
        self.mapping.clear();
        self.priorities.clear();
        self.len = 0;
    }
}

impl<T, P: Ord + Hash + Clone> Default for DuplicatePriorityQueue<T, P> {
    fn default() -> Self {
        Self::from_config(QueueConfig::default())
    }
}

impl<T: fmt::Debug, P: fmt::Debug> fmt::Debug for DuplicatePriorityQueue<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DuplicatePriorityQueue")
            .field("len", &self.len)
            .field("priorities", &self.priorities)
            .field("mapping", &self.mapping)
            .finish()
    }
}

/// Borrowing iterator returned by [`DuplicatePriorityQueue::drain`]
pub struct Drain<'a, T, P: Ord + Hash + Clone> {
    queue: &'a mut DuplicatePriorityQueue<T, P>,
}

impl<T, P: Ord + Hash + Clone> Iterator for Drain<'_, T, P> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.queue.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len, Some(self.queue.len))
    }
}

/// Owning iterator yielding elements in dequeue order
pub struct IntoIter<T, P: Ord + Hash + Clone> {
    queue: DuplicatePriorityQueue<T, P>,
}

impl<T, P: Ord + Hash + Clone> Iterator for IntoIter<T, P> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.queue.pop_front().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len, Some(self.queue.len))
    }
}

impl<T, P: Ord + Hash + Clone> IntoIterator for DuplicatePriorityQueue<T, P> {
    type Item = T;
    type IntoIter = IntoIter<T, P>;

    fn into_iter(self) -> IntoIter<T, P> {
        IntoIter { queue: self }
    }
}
