//! Unbalanced binary search tree with node-splicing deletion
//!
//! Nodes live in a [`SlotMap`] arena and refer to their children and parent by
//! key rather than by pointer, so parent back-links need no shared ownership.
//! The tree holds an optional root key; deleting the last element simply
//! clears it.
//!
//! The tree is intentionally not rebalanced: operations are O(height), which
//! degrades to O(n) for sorted insertion orders.
//!
//! # Example
//!
//! ```rust
//! use strict_adts::bst::BinarySearchTree;
//!
//! let mut tree = BinarySearchTree::with_root(50);
//! assert!(tree.add(30));
//! assert!(tree.add(70));
//! assert!(!tree.add(30)); // duplicates are ignored
//!
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![30, 50, 70]);
//! assert_eq!(tree.delete(&50), Ok(50));
//! assert_eq!(tree.get_root(), Some(&70));
//! ```

use crate::error::TreeError;
use log::debug;
use slotmap::{new_key_type, SlotMap};
use std::cmp::Ordering;
use std::fmt;

new_key_type! {
    /// Arena key of a tree node
    struct NodeKey;
}

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    left: Option<NodeKey>,
    right: Option<NodeKey>,
    /// Non-owning back-link, `None` for the root
    parent: Option<NodeKey>,
}

impl<T> Node<T> {
    fn leaf(value: T, parent: Option<NodeKey>) -> Self {
        Node {
            value,
            left: None,
            right: None,
            parent,
        }
    }
}

/// A binary search tree rejecting duplicate values
#[derive(Clone)]
pub struct BinarySearchTree<T> {
    nodes: SlotMap<NodeKey, Node<T>>,
    root: Option<NodeKey>,
}

impl<T: Ord> BinarySearchTree<T> {
    /// Creates an empty tree
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root: None,
        }
    }

    /// Creates a tree holding `value` as its root
    pub fn with_root(value: T) -> Self {
        let mut tree = Self::new();
        tree.add(value);
        tree
    }

    /// Returns the number of values in the tree
    pub fn get_number_of_elements(&self) -> usize {
        self.nodes.len()
    }

    /// Alias of [`get_number_of_elements`](Self::get_number_of_elements)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree holds no elements
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the value at the root
    pub fn get_root(&self) -> Option<&T> {
        self.root.map(|key| &self.nodes[key].value)
    }

    /// Inserts `value`, returning false if an equal value is already present
    pub fn add(&mut self, value: T) -> bool {
        let Some(mut current) = self.root else {
            self.root = Some(self.nodes.insert(Node::leaf(value, None)));
            return true;
        };

        loop {
            let node = &self.nodes[current];
            let next = match value.cmp(&node.value) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return false,
            };

            match next {
                Some(child) => current = child,
                None => {
                    let goes_left = value < self.nodes[current].value;
                    let key = self.nodes.insert(Node::leaf(value, Some(current)));
                    let parent = &mut self.nodes[current];
                    if goes_left {
                        parent.left = Some(key);
                    } else {
                        parent.right = Some(key);
                    }
                    return true;
                }
            }
        }
    }

    /// Returns true if a value equal to `value` is in the tree
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Removes `value` from the tree and returns it
    ///
    /// A node with two children takes over the value of its in-order
    /// successor, which is spliced out of the right subtree instead.
    ///
    /// # Errors
    /// Returns `TreeError::Empty` if the tree has no values and
    /// `TreeError::ElementNotFound` if `value` is not present.
    pub fn delete(&mut self, value: &T) -> Result<T, TreeError> {
        if self.root.is_none() {
            return Err(TreeError::Empty);
        }
        let key = self.find(value).ok_or(TreeError::ElementNotFound)?;

        let node = &self.nodes[key];
        match (node.left, node.right) {
            (Some(_), Some(right)) => {
                let successor = self.leftmost(right);
                let successor_value = self.splice_out(successor)?;
                Ok(std::mem::replace(
                    &mut self.nodes[key].value,
                    successor_value,
                ))
            }
            _ => self.splice_out(key),
        }
    }

    /// Returns the smallest value
    pub fn get_minimum(&self) -> Option<&T> {
        self.root.map(|root| &self.nodes[self.leftmost(root)].value)
    }

    /// Returns the largest value
    pub fn get_maximum(&self) -> Option<&T> {
        self.root.map(|root| &self.nodes[self.rightmost(root)].value)
    }

    /// Returns the number of nodes on the longest root-to-leaf path
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeKey, usize)> = self.root.map(|k| (k, 1)).into_iter().collect();
        while let Some((key, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[key];
            stack.extend(node.left.map(|k| (k, depth + 1)));
            stack.extend(node.right.map(|k| (k, depth + 1)));
        }
        height
    }

    /// Removes every value
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Returns an in-order iterator over the values
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            tree: self,
            next: self.root.map(|root| self.leftmost(root)),
            remaining: self.nodes.len(),
        }
    }

    fn find(&self, value: &T) -> Option<NodeKey> {
        let mut current = self.root;
        while let Some(key) = current {
            let node = &self.nodes[key];
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(key),
            };
        }
        None
    }

    /// Detaches a node with at most one child, moving the child into its place
    fn splice_out(&mut self, key: NodeKey) -> Result<T, TreeError> {
        let node = &self.nodes[key];
        let child = node.left.or(node.right);
        let parent = node.parent;

        if let Some(child) = child {
            self.nodes[child].parent = parent;
        }

        match parent {
            Some(parent) => {
                let parent = &mut self.nodes[parent];
                if parent.left == Some(key) {
                    parent.left = child;
                } else {
                    parent.right = child;
                }
            }
            None => {
                if child.is_some() {
                    debug!("root replaced by its only child");
                } else {
                    debug!("last node removed, tree is empty");
                }
                self.root = child;
            }
        }

        self.nodes
            .remove(key)
            .map(|node| node.value)
            .ok_or(TreeError::ElementNotFound)
    }

    fn leftmost(&self, mut key: NodeKey) -> NodeKey {
        while let Some(left) = self.nodes[key].left {
            key = left;
        }
        key
    }

    fn rightmost(&self, mut key: NodeKey) -> NodeKey {
        while let Some(right) = self.nodes[key].right {
            key = right;
        }
        key
    }

    /// In-order successor: leftmost of the right subtree, or the first
    /// ancestor reached from a left child
    fn successor(&self, key: NodeKey) -> Option<NodeKey> {
        let node = &self.nodes[key];
        if let Some(right) = node.right {
            return Some(self.leftmost(right));
        }

        let mut current = key;
        let mut parent = node.parent;
        while let Some(p) = parent {
            if self.nodes[p].right != Some(current) {
                break;
            }
            current = p;
            parent = self.nodes[p].parent;
        }
        parent
    }
}

impl<T: Ord> Default for BinarySearchTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + fmt::Debug> fmt::Debug for BinarySearchTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Ord> Extend<T> for BinarySearchTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for BinarySearchTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

/// In-order iterator over a [`BinarySearchTree`]
///
/// Walks parent links instead of keeping a stack.
pub struct Iter<'a, T> {
    tree: &'a BinarySearchTree<T>,
    next: Option<NodeKey>,
    remaining: usize,
}

impl<'a, T: Ord> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let key = self.next?;
        self.next = self.tree.successor(key);
        self.remaining -= 1;
        Some(&self.tree.nodes[key].value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Ord> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T: Ord> IntoIterator for &'a BinarySearchTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
