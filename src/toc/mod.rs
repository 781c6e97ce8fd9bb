//! Hierarchical table-of-contents reconstruction.
//!
//! Long structured documents (operations manuals, regulations) often carry
//! their table of contents only as a flat, page-ordered set of outline
//! hyperlinks. This module rebuilds the nested section hierarchy from that
//! flat sequence and uses it to extract the exact text body of any section.
//!
//! ## Pipeline
//!
//! 1. [`normalizer`]: raw link annotations become a clean, deduplicated,
//!    successor-chained entry sequence.
//! 2. [`gaps`]: diagnostic scan for skipped sibling numbers.
//! 3. [`builder`]: the sequence is partitioned into a forest by key depth,
//!    with end boundaries cascading from the deepest last descendants.
//! 4. [`validator`]: every entry is re-resolved against the forest,
//!    producing the coverage metric.
//! 5. [`heal`]: one correction pass synthesizes missing root entries and
//!    the tree is rebuilt and revalidated once.
//!
//! [`lookup`], [`overlap`], and [`extract`] serve the consumer side:
//! resolving keys, collapsing overlapping requests, and stitching
//! boundary-exact section text across pages. [`index::TocIndex`] ties it all
//! together as one parse session.

pub mod builder;
pub mod extract;
pub mod gaps;
pub mod heal;
pub mod index;
pub mod lookup;
pub mod normalizer;
pub mod overlap;
pub mod types;
pub mod validator;

pub use builder::build_forest;
pub use extract::node_text;
pub use gaps::find_key_gaps;
pub use heal::{heal_missing_roots, HealOutcome};
pub use index::TocIndex;
pub use lookup::find_node;
pub use normalizer::{normalize_links, ParseContext};
pub use overlap::remove_key_overlaps;
pub use types::{key_depth, TocLink, TocMetrics, TocNode};
pub use validator::{validate_forest, Validation};
