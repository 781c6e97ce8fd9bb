//! Key lookup over the built forest.
//!
//! Root selection by the query's leading segment, then a plain FIFO queue
//! scan over the selected subtrees. The queue order is part of the contract:
//! with ambiguous or duplicated keys, the first match in this exact
//! traversal order wins, so this stays a queue walk rather than a map.

use std::collections::VecDeque;

use crate::toc::types::{root_segment, TocNode};

/// Find the node carrying exactly `key`, or `None`.
pub fn find_node<'a>(forest: &'a [TocNode], key: &str) -> Option<&'a TocNode> {
    let root_key = root_segment(key);
    let mut queue: VecDeque<&TocNode> = forest.iter().filter(|n| n.key == root_key).collect();

    while let Some(node) = queue.pop_front() {
        if node.key == key {
            return Some(node);
        }
        queue.extend(node.children.iter());
    }
    None
}
