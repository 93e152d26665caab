//! Property-based tests using proptest
//!
//! These tests generate random sequences of operations and verify
//! that the container invariants are always maintained.

use proptest::prelude::*;
use strict_adts::binary_heap::{MaxBinaryHeap, MinBinaryHeap};
use strict_adts::bst::BinarySearchTree;
use strict_adts::duplicate_priority_queue::DuplicatePriorityQueue;
use strict_adts::graph::{Graph, GraphConfig};
use strict_adts::priority_queue::PriorityQueue;
use strict_adts::PriorityQueueOps;

use std::collections::{BTreeSet, HashMap};

/// Heap operations driven by the generated op codes
#[derive(Debug, Clone)]
enum HeapOp {
    Add(i32),
    RemoveRoot,
    Replace(usize, i32),
    Remove(usize),
    ReplaceRoot(i32),
}

fn heap_op() -> impl Strategy<Value = HeapOp> {
    prop_oneof![
        3 => (-100i32..100).prop_map(HeapOp::Add),
        1 => Just(HeapOp::RemoveRoot),
        1 => (0usize..64, -100i32..100).prop_map(|(i, v)| HeapOp::Replace(i, v)),
        1 => (0usize..64).prop_map(HeapOp::Remove),
        1 => (-100i32..100).prop_map(HeapOp::ReplaceRoot),
    ]
}

/// Applies `ops` to a min heap and a max heap, checking the heap order after
/// every step and the contents against a sorted model
fn test_heap_order_invariant(ops: Vec<HeapOp>) -> Result<(), TestCaseError> {
    let mut min_heap = MinBinaryHeap::new();
    let mut max_heap = MaxBinaryHeap::new();
    let mut model: Vec<i32> = Vec::new();

    for op in ops {
        match op {
            HeapOp::Add(v) => {
                min_heap.add(v);
                max_heap.add(v);
                model.push(v);
            }
            HeapOp::RemoveRoot => {
                model.sort_unstable();
                let expected_min = model.first().copied();
                prop_assert_eq!(min_heap.remove_min().ok(), expected_min);
                if let Some(v) = expected_min {
                    model.remove(0);
                    prop_assert!(max_heap.remove(&v).is_ok());
                }
            }
            HeapOp::Replace(i, v) if !model.is_empty() => {
                let old = model[i % model.len()];
                prop_assert_eq!(min_heap.replace(&old, v), Ok(old));
                prop_assert_eq!(max_heap.replace(&old, v), Ok(old));
                let pos = model.iter().position(|&x| x == old).unwrap();
                model[pos] = v;
            }
            HeapOp::Remove(i) if !model.is_empty() => {
                let target = model.swap_remove(i % model.len());
                prop_assert_eq!(min_heap.remove(&target), Ok(target));
                prop_assert_eq!(max_heap.remove(&target), Ok(target));
            }
            HeapOp::ReplaceRoot(v) if !model.is_empty() => {
                let old_max = max_heap.replace_root(v).unwrap();
                let pos = model.iter().position(|&x| x == old_max).unwrap();
                model[pos] = v;
                prop_assert!(min_heap.replace(&old_max, v).is_ok());
            }
            _ => {}
        }

        prop_assert!(min_heap.is_valid());
        prop_assert!(max_heap.is_valid());
        prop_assert_eq!(min_heap.len(), model.len());
        prop_assert_eq!(max_heap.len(), model.len());
        prop_assert_eq!(min_heap.peek_min().ok(), model.iter().min());
        prop_assert_eq!(max_heap.peek_max().ok(), model.iter().max());
    }

    Ok(())
}

/// Test that sorted extraction is idempotent and leaves the heap untouched
fn test_sorted_idempotence(values: Vec<i32>) -> Result<(), TestCaseError> {
    let heap: MinBinaryHeap<i32> = values.iter().copied().collect();
    let backing = heap.as_slice().to_vec();

    let first = heap.get_sorted_elements();
    let second = heap.get_sorted_elements();

    let mut expected = values.clone();
    expected.sort_unstable();
    prop_assert_eq!(&first, &expected);
    prop_assert_eq!(first, second);
    prop_assert_eq!(heap.len(), values.len());
    prop_assert_eq!(heap.as_slice(), backing.as_slice());
    Ok(())
}

/// Test that the most recent enqueue for each priority wins
fn test_priority_bijection(ops: Vec<(u8, i32)>) -> Result<(), TestCaseError> {
    let mut queue = PriorityQueue::new();
    let mut model: HashMap<u8, i32> = HashMap::new();

    for (priority, item) in ops {
        queue.enqueue(item, priority);
        model.insert(priority, item);

        prop_assert_eq!(queue.len(), model.len());
        for (p, item) in &model {
            prop_assert_eq!(queue.get_element(p), Ok(item));
        }
    }

    let mut expected: Vec<(u8, i32)> = model.into_iter().collect();
    expected.sort_unstable_by(|a, b| b.0.cmp(&a.0));
    for (_, item) in expected {
        prop_assert_eq!(queue.dequeue(), Ok(item));
    }
    prop_assert!(queue.is_empty());
    Ok(())
}

/// Test that the duplicate queue loses nothing and keeps FIFO among equals
fn test_duplicate_queue_fifo(ops: Vec<(u8, i32)>) -> Result<(), TestCaseError> {
    let mut queue = DuplicatePriorityQueue::reversed();
    for (priority, item) in &ops {
        queue.enqueue(*item, *priority);
    }
    prop_assert_eq!(queue.len(), ops.len());

    // Stable sort keeps insertion order within a priority.
    let mut expected = ops.clone();
    expected.sort_by_key(|&(priority, _)| priority);
    let drained: Vec<i32> = queue.drain().collect();
    let expected: Vec<i32> = expected.into_iter().map(|(_, item)| item).collect();
    prop_assert_eq!(drained, expected);
    Ok(())
}

/// Test that in-order traversal is sorted and membership matches a set model
fn test_bst_ordering(ops: Vec<(bool, i16)>) -> Result<(), TestCaseError> {
    let mut tree = BinarySearchTree::new();
    let mut model = BTreeSet::new();

    for (delete, value) in ops {
        if delete {
            let removed = tree.delete(&value);
            prop_assert_eq!(removed.is_ok(), model.remove(&value));
        } else {
            prop_assert_eq!(tree.add(value), model.insert(value));
        }

        let in_order: Vec<i16> = tree.iter().copied().collect();
        let expected: Vec<i16> = model.iter().copied().collect();
        prop_assert_eq!(in_order, expected);
        prop_assert_eq!(tree.len(), model.len());
        prop_assert_eq!(tree.get_minimum(), model.iter().next());
        prop_assert_eq!(tree.get_maximum(), model.iter().next_back());
    }

    for value in -20i16..20 {
        prop_assert_eq!(tree.contains(&value), model.contains(&value));
    }
    Ok(())
}

/// Test that node indices stay contiguous and edges survive compaction
fn test_graph_index_density(ops: Vec<(bool, u8)>) -> Result<(), TestCaseError> {
    let config = GraphConfig::default().directed(true).initial_edges_size(1);
    let mut graph: Graph<u8> = Graph::new(config).unwrap();
    let mut order: Vec<u8> = Vec::new();

    for (remove, node) in ops {
        if remove {
            let removed = graph.remove_node(&node).is_ok();
            let pos = order.iter().position(|&n| n == node);
            prop_assert_eq!(removed, pos.is_some());
            if let Some(pos) = pos {
                order.remove(pos);
            }
        } else if graph.add_node(node).unwrap() {
            // link every new node to its predecessor
            if let Some(&prev) = order.last() {
                graph.add_edge(&prev, &node, None).unwrap();
            }
            order.push(node);
        }

        prop_assert_eq!(graph.nodes(), order.clone());
        prop_assert!(graph.capacity() >= graph.len());
        for (index, node) in order.iter().enumerate() {
            prop_assert_eq!(graph.index_of(node), Ok(index));
        }
        for (from, to, _) in graph.edges() {
            prop_assert!(order.contains(&from));
            prop_assert!(order.contains(&to));
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn heap_order_invariant(ops in prop::collection::vec(heap_op(), 0..150)) {
        test_heap_order_invariant(ops)?;
    }

    #[test]
    fn sorted_elements_idempotent(values in prop::collection::vec(-1000i32..1000, 0..100)) {
        test_sorted_idempotence(values)?;
    }

    #[test]
    fn priority_bijection(ops in prop::collection::vec((0u8..16, -100i32..100), 0..60)) {
        test_priority_bijection(ops)?;
    }

    #[test]
    fn duplicate_queue_fifo(ops in prop::collection::vec((0u8..8, -100i32..100), 0..60)) {
        test_duplicate_queue_fifo(ops)?;
    }

    #[test]
    fn bst_ordering(ops in prop::collection::vec((prop::bool::weighted(0.3), -20i16..20), 0..120)) {
        test_bst_ordering(ops)?;
    }

    #[test]
    fn graph_index_density(ops in prop::collection::vec((prop::bool::weighted(0.3), 0u8..24), 0..80)) {
        test_graph_index_density(ops)?;
    }
}
