//! Core types for TOC reconstruction.
//!
//! A parse produces a flat sequence of [`TocLink`] entries (ephemeral,
//! discarded after tree construction) which the builder turns into a forest
//! of [`TocNode`]s (the persisted, cacheable shape).

use serde::{Deserialize, Serialize};

/// Depth of a hierarchical key: the number of `.` separators.
///
/// `"8"` has depth 0, `"8.1.7"` has depth 2.
pub fn key_depth(key: &str) -> usize {
    key.bytes().filter(|&b| b == b'.').count()
}

/// Leading segment of a hierarchical key (`"8.1.7"` -> `"8"`).
pub fn root_segment(key: &str) -> &str {
    key.split('.').next().unwrap_or(key)
}

/// A single normalized TOC entry in document discovery order.
///
/// Built once per parse; the successor fields are filled by the chaining
/// pass and bound the entry's section when it ends up a leaf. The globally
/// last entry keeps `None` successors (its section runs to end of document).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocLink {
    /// Hierarchical key, e.g. `"8.1.7"`
    pub key: String,

    /// Matched heading text, normally starting with the key itself
    pub label: String,

    /// Zero-based page the link points at
    pub target_page: usize,

    /// Target page of the next entry in the whole document sequence
    pub next_page: Option<usize>,

    /// Key of the next entry in the whole document sequence
    pub next_key: Option<String>,
}

impl TocLink {
    /// Create an entry with unfilled successor fields.
    pub fn new(key: impl Into<String>, label: impl Into<String>, target_page: usize) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            target_page,
            next_page: None,
            next_key: None,
        }
    }

    /// Depth of this entry's key.
    pub fn depth(&self) -> usize {
        key_depth(&self.key)
    }
}

/// A node of the reconstructed TOC tree.
///
/// Serializes to the cache format verbatim: a forest of these nodes is the
/// whole persisted state of a parse. `end_page == None` marks a terminal
/// node whose section extends to the end of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocNode {
    /// Hierarchical key, e.g. `"8.1.7"`
    pub key: String,

    /// Heading text
    pub label: String,

    /// Zero-based page the section starts on
    pub start_page: usize,

    /// Zero-based page the section ends on; `None` = through end of document
    pub end_page: Option<usize>,

    /// Key of the entry that starts where this section ends
    pub end_key: Option<String>,

    /// Child sections, in original discovery order
    #[serde(default)]
    pub children: Vec<TocNode>,
}

impl TocNode {
    /// Depth of this node's key.
    pub fn depth(&self) -> usize {
        key_depth(&self.key)
    }
}

/// Observational metrics of one parse, exposed for benchmarking/reporting.
///
/// Nothing in the pipeline consumes these.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TocMetrics {
    /// Number of normalized TOC entries, including healed-in roots
    pub headers_count: usize,

    /// Fraction of entries that re-resolve against the built tree, in [0, 1]
    pub coverage_metric: f64,

    /// Number of healed roots whose heading text could not be recovered
    pub untitled_labels_count: usize,

    /// Number of missing sibling keys flagged by the gap detector
    pub gap_count: usize,
}
