//! TOC tree construction.
//!
//! Recursively partitions the normalized entry sequence into a forest by key
//! depth: an entry at the target depth opens a sibling node whose subtree
//! window runs until the next entry at the same or shallower depth. Orphaned
//! deeper entries that precede any depth-matching entry are skipped.
//!
//! The recursion is carried on an explicit work stack so pathological
//! documents with very deep numbering cannot exhaust the call stack.

use crate::toc::normalizer::ParseContext;
use crate::toc::types::{TocLink, TocNode};

/// One suspended window of the depth partition.
struct Frame {
    /// Next sequence index to examine
    cursor: usize,
    /// Exclusive end of this window
    end: usize,
    /// Depth this window collects siblings at
    depth: usize,
    /// Completed sibling nodes of this window
    nodes: Vec<TocNode>,
    /// Index of the entry these siblings will attach to; `None` for the root window
    parent: Option<usize>,
}

/// Build the TOC forest from the chained entry sequence.
///
/// End boundaries cascade: a node with children takes the last child's end
/// page and end key; a leaf takes its entry's successor fields. The globally
/// last entry produces an open-ended terminal leaf.
pub fn build_forest(links: &[TocLink], ctx: &ParseContext) -> Vec<TocNode> {
    let depths: Vec<usize> = links.iter().map(TocLink::depth).collect();
    let mut stack = vec![Frame {
        cursor: 0,
        end: links.len(),
        depth: 0,
        nodes: Vec::new(),
        parent: None,
    }];

    loop {
        let frame = stack.last_mut().expect("work stack never empties mid-build");

        if frame.cursor < frame.end {
            let i = frame.cursor;
            if depths[i] == frame.depth {
                // subtree window: everything up to the next entry at this
                // depth or shallower
                let mut j = i + 1;
                while j < frame.end && depths[j] > frame.depth {
                    j += 1;
                }
                frame.cursor = j;
                let depth = frame.depth + 1;
                stack.push(Frame {
                    cursor: i + 1,
                    end: j,
                    depth,
                    nodes: Vec::new(),
                    parent: Some(i),
                });
            } else {
                frame.cursor += 1;
            }
            continue;
        }

        let done = stack.pop().expect("frame just inspected");
        match done.parent {
            Some(i) => {
                let node = finish_node(&links[i], done.nodes, ctx);
                stack
                    .last_mut()
                    .expect("child frames always have a parent frame")
                    .nodes
                    .push(node);
            },
            None => return done.nodes,
        }
    }
}

/// Attach children to an entry's node and assign its end boundary.
fn finish_node(link: &TocLink, children: Vec<TocNode>, ctx: &ParseContext) -> TocNode {
    let (end_page, end_key) = match children.last() {
        Some(last) => (last.end_page, last.end_key.clone()),
        None => (link.next_page, link.next_key.clone()),
    };

    if let Some(end) = end_page {
        if link.target_page > end && ctx.last_key.as_deref() != Some(link.key.as_str()) {
            log::warn!(
                "section {} starts on page {} after its end page {}",
                link.key,
                link.target_page,
                end
            );
        }
    }

    TocNode {
        key: link.key.clone(),
        label: link.label.clone(),
        start_page: link.target_page,
        end_page,
        end_key,
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toc::normalizer::chain_successors;

    fn linked(entries: &[(&str, usize)]) -> (Vec<TocLink>, ParseContext) {
        let mut ctx = ParseContext::new();
        let mut links: Vec<TocLink> = entries
            .iter()
            .map(|(key, page)| TocLink::new(*key, format!("{} Section", key), *page))
            .collect();
        chain_successors(&mut links, &mut ctx);
        (links, ctx)
    }

    fn assert_depth_invariant(node: &TocNode) {
        for child in &node.children {
            assert_eq!(child.depth(), node.depth() + 1);
            assert_depth_invariant(child);
        }
    }

    #[test]
    fn test_flat_forest() {
        let (links, ctx) = linked(&[("1", 3), ("2", 7), ("3", 12)]);
        let forest = build_forest(&links, &ctx);

        assert_eq!(forest.len(), 3);
        assert_eq!(forest[0].end_page, Some(7));
        assert_eq!(forest[0].end_key.as_deref(), Some("2"));
        assert_eq!(forest[2].end_page, None);
        assert_eq!(forest[2].end_key, None);
    }

    #[test]
    fn test_nested_structure_and_depths() {
        let (links, ctx) = linked(&[
            ("1", 3),
            ("1.1", 3),
            ("1.1.1", 4),
            ("1.2", 6),
            ("2", 9),
            ("2.1", 10),
        ]);
        let forest = build_forest(&links, &ctx);

        assert_eq!(forest.len(), 2);
        let one = &forest[0];
        assert_eq!(one.children.len(), 2);
        assert_eq!(one.children[0].children.len(), 1);
        for root in &forest {
            assert_depth_invariant(root);
        }
    }

    #[test]
    fn test_end_boundary_cascades_to_last_descendant() {
        let (links, ctx) = linked(&[("1", 3), ("1.1", 3), ("1.2", 6), ("2", 9)]);
        let forest = build_forest(&links, &ctx);

        let one = &forest[0];
        let last_child = one.children.last().unwrap();
        assert_eq!(one.end_page, last_child.end_page);
        assert_eq!(one.end_key, last_child.end_key);
        assert_eq!(one.end_page, Some(9));
        assert_eq!(one.end_key.as_deref(), Some("2"));
    }

    #[test]
    fn test_terminal_branch_is_open_ended() {
        let (links, ctx) = linked(&[("1", 3), ("2", 7), ("2.1", 8)]);
        let forest = build_forest(&links, &ctx);

        // the open end of the last leaf cascades up to its root
        assert_eq!(forest[1].children[0].end_page, None);
        assert_eq!(forest[1].end_page, None);
        assert_eq!(forest[1].end_key, None);
    }

    #[test]
    fn test_orphaned_deep_entries_skipped() {
        // descendants of a filtered-out root precede the first depth-0 entry
        let (links, ctx) = linked(&[("7.1", 2), ("7.2", 4), ("8", 6), ("8.1", 7)]);
        let forest = build_forest(&links, &ctx);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].key, "8");
        assert_eq!(forest[0].children.len(), 1);
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        let mut entries: Vec<(String, usize)> = Vec::new();
        let mut key = String::from("1");
        entries.push((key.clone(), 0));
        for i in 0..2_000 {
            key.push_str(".1");
            entries.push((key.clone(), i + 1));
        }
        let pairs: Vec<(&str, usize)> = entries.iter().map(|(k, p)| (k.as_str(), *p)).collect();
        let (links, ctx) = linked(&pairs);

        let forest = build_forest(&links, &ctx);
        assert_eq!(forest.len(), 1);

        let mut depth = 0;
        let mut node = &forest[0];
        while let Some(child) = node.children.first() {
            node = child;
            depth += 1;
        }
        assert_eq!(depth, 2_000);
    }
}
