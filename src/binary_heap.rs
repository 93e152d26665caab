//! Array-backed binary heap with min and max variants
//!
//! The heap stores its elements in a `Vec` laid out as a complete binary tree:
//! the children of index `i` live at `2i + 1` and `2i + 2`, its parent at
//! `(i - 1) / 2`. The ordering policy is a type parameter, so a single
//! implementation serves [`MinBinaryHeap`], [`MaxBinaryHeap`] and the
//! runtime-directed heaps used by the priority queues.
//!
//! # Time Complexity
//!
//! | Operation             | Complexity |
//! |-----------------------|------------|
//! | `add`                 | O(log n)   |
//! | `peek`                | O(1)       |
//! | `remove_root`         | O(log n)   |
//! | `replace_root`        | O(log n)   |
//! | `replace` / `remove`  | O(n)       |
//! | `get_sorted_elements` | O(n log n) |
//!
//! # Example
//!
//! ```rust
//! use strict_adts::binary_heap::MinBinaryHeap;
//!
//! let mut heap = MinBinaryHeap::new();
//! heap.add(32);
//! heap.add(2);
//! heap.add(43);
//!
//! assert_eq!(heap.peek_min(), Ok(&2));
//! assert_eq!(heap.remove_min(), Ok(2));
//! assert_eq!(heap.peek_min(), Ok(&32));
//! ```

use crate::error::HeapError;
use crate::traits::{HeapOrder, MaxOrder, MinOrder};
use std::fmt;

/// A binary heap ordered by the policy `O`
///
/// Homogeneity is a compile-time property: the heap only ever holds `T`.
pub struct BinaryHeap<T, O = MinOrder> {
    /// The heap data, a complete binary tree in array form
    data: Vec<T>,
    order: O,
}

/// A binary heap with the smallest element at the root
pub type MinBinaryHeap<T> = BinaryHeap<T, MinOrder>;

/// A binary heap with the largest element at the root
pub type MaxBinaryHeap<T> = BinaryHeap<T, MaxOrder>;

impl<T: Ord, O: HeapOrder + Default> BinaryHeap<T, O> {
    /// Creates a new empty heap
    pub fn new() -> Self {
        Self::with_order(O::default())
    }

    /// Creates a new empty heap with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            order: O::default(),
        }
    }
}

impl<T: Ord, O: HeapOrder> BinaryHeap<T, O> {
    /// Creates a new empty heap using an explicit ordering value
    pub fn with_order(order: O) -> Self {
        Self {
            data: Vec::new(),
            order,
        }
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the ordering policy of this heap
    pub fn order(&self) -> &O {
        &self.order
    }

    /// Inserts an element, percolating it up to its place
    pub fn add(&mut self, element: T) {
        self.data.push(element);
        self.percolate_up(self.data.len() - 1);
    }

    /// Returns the root element without removing it
    ///
    /// # Errors
    /// Returns `HeapError::Empty` if the heap has no elements.
    pub fn peek(&self) -> Result<&T, HeapError> {
        self.data.first().ok_or(HeapError::Empty)
    }

    /// Removes and returns the root element
    ///
    /// # Errors
    /// Returns `HeapError::Empty` if the heap has no elements.
    pub fn remove_root(&mut self) -> Result<T, HeapError> {
        if self.data.is_empty() {
            return Err(HeapError::Empty);
        }

        let last_idx = self.data.len() - 1;
        self.data.swap(0, last_idx);
        let root = self.data.pop().ok_or(HeapError::Empty)?;

        if !self.data.is_empty() {
            self.percolate_down(0);
        }

        Ok(root)
    }

    /// Overwrites the root with `element` and returns the previous root
    ///
    /// Equivalent to a `remove_root` followed by an `add`, with a single
    /// percolation.
    ///
    /// # Errors
    /// Returns `HeapError::Empty` if the heap has no elements.
    pub fn replace_root(&mut self, element: T) -> Result<T, HeapError> {
        let root = self.data.first_mut().ok_or(HeapError::Empty)?;
        let old = std::mem::replace(root, element);
        self.percolate_down(0);
        Ok(old)
    }

    /// Replaces the first occurrence of `old` with `new`
    ///
    /// # Errors
    /// Returns `HeapError::ElementNotFound` if `old` is not in the heap.
    pub fn replace(&mut self, old: &T, new: T) -> Result<T, HeapError> {
        let index = self.position(old).ok_or(HeapError::ElementNotFound)?;
        let previous = std::mem::replace(&mut self.data[index], new);
        // The new value may belong above or below the old one; at most one
        // of the two passes moves anything.
        self.percolate_up(index);
        self.percolate_down(index);
        Ok(previous)
    }

    /// Removes the first occurrence of `element`
    ///
    /// # Errors
    /// Returns `HeapError::ElementNotFound` if `element` is not in the heap.
    pub fn remove(&mut self, element: &T) -> Result<T, HeapError> {
        let index = self.position(element).ok_or(HeapError::ElementNotFound)?;
        let removed = self.data.swap_remove(index);
        if index < self.data.len() {
            self.percolate_down(index);
            self.percolate_up(index);
        }
        Ok(removed)
    }

    /// Returns true if an element equal to `item` is in the heap
    pub fn contains(&self, item: &T) -> bool {
        self.data.contains(item)
    }

    /// Removes all elements
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Returns the backing sequence in heap order
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consumes the heap, returning the backing sequence in heap order
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Returns an iterator that removes the root on every step
    ///
    /// Iterating to exhaustion leaves the heap empty.
    pub fn drain(&mut self) -> Drain<'_, T, O> {
        Drain { heap: self }
    }

    /// Checks the heap-order invariant for every parent/child pair
    pub fn is_valid(&self) -> bool {
        (1..self.data.len()).all(|i| {
            let parent = (i - 1) / 2;
            !self.order.precedes(&self.data[i], &self.data[parent])
        })
    }

    fn position(&self, element: &T) -> Option<usize> {
        self.data.iter().position(|e| e == element)
    }

    /// Move element at index up to maintain heap property
    fn percolate_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.order.precedes(&self.data[index], &self.data[parent]) {
                self.data.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Move element at index down to maintain heap property
    fn percolate_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut extreme = index;

            if left < len && self.order.precedes(&self.data[left], &self.data[extreme]) {
                extreme = left;
            }
            if right < len && self.order.precedes(&self.data[right], &self.data[extreme]) {
                extreme = right;
            }

            if extreme != index {
                self.data.swap(index, extreme);
                index = extreme;
            } else {
                break;
            }
        }
    }
}

impl<T: Ord + Clone, O: HeapOrder> BinaryHeap<T, O> {
    /// Returns every element in heap order without changing the heap
    ///
    /// Ascending for a min heap, descending for a max heap.
    pub fn get_sorted_elements(&self) -> Vec<T> {
        let mut scratch = self.clone();
        let mut sorted = Vec::with_capacity(scratch.len());
        while let Ok(element) = scratch.remove_root() {
            sorted.push(element);
        }
        sorted
    }
}

impl<T: Ord> BinaryHeap<T, MinOrder> {
    /// Returns the smallest element without removing it
    ///
    /// # Errors
    /// Returns `HeapError::Empty` if the heap has no elements.
    pub fn peek_min(&self) -> Result<&T, HeapError> {
        self.peek()
    }

    /// Removes and returns the smallest element
    ///
    /// # Errors
    /// Returns `HeapError::Empty` if the heap has no elements.
    pub fn remove_min(&mut self) -> Result<T, HeapError> {
        self.remove_root()
    }
}

impl<T: Ord> BinaryHeap<T, MaxOrder> {
    /// Returns the largest element without removing it
    ///
    /// # Errors
    /// Returns `HeapError::Empty` if the heap has no elements.
    pub fn peek_max(&self) -> Result<&T, HeapError> {
        self.peek()
    }

    /// Removes and returns the largest element
    ///
    /// # Errors
    /// Returns `HeapError::Empty` if the heap has no elements.
    pub fn remove_max(&mut self) -> Result<T, HeapError> {
        self.remove_root()
    }
}

impl<T: Ord, O: HeapOrder + Default> Default for BinaryHeap<T, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, O: Clone> Clone for BinaryHeap<T, O> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            order: self.order.clone(),
        }
    }
}

impl<T: fmt::Debug, O: fmt::Debug> fmt::Debug for BinaryHeap<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryHeap")
            .field("order", &self.order)
            .field("data", &self.data)
            .finish()
    }
}

impl<T: Ord, O: HeapOrder> Extend<T> for BinaryHeap<T, O> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<T: Ord, O: HeapOrder + Default> FromIterator<T> for BinaryHeap<T, O> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

/// Borrowing iterator returned by [`BinaryHeap::drain`]
pub struct Drain<'a, T: Ord, O: HeapOrder> {
    heap: &'a mut BinaryHeap<T, O>,
}

impl<T: Ord, O: HeapOrder> Iterator for Drain<'_, T, O> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.heap.remove_root().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len(), Some(self.heap.len()))
    }
}

impl<T: Ord, O: HeapOrder> ExactSizeIterator for Drain<'_, T, O> {}

/// Owning iterator yielding elements root first
pub struct IntoIter<T: Ord, O: HeapOrder> {
    heap: BinaryHeap<T, O>,
}

impl<T: Ord, O: HeapOrder> Iterator for IntoIter<T, O> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.heap.remove_root().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len(), Some(self.heap.len()))
    }
}

impl<T: Ord, O: HeapOrder> ExactSizeIterator for IntoIter<T, O> {}

impl<T: Ord, O: HeapOrder> IntoIterator for BinaryHeap<T, O> {
    type Item = T;
    type IntoIter = IntoIter<T, O>;

    fn into_iter(self) -> IntoIter<T, O> {
        IntoIter { heap: self }
    }
}
