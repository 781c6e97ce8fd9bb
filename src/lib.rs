//! # TOC Oxide
//!
//! Reconstructs a hierarchical table of contents from the flat, page-ordered
//! outline hyperlinks of a long structured document, then extracts the exact
//! text body of any named section with no over- or under-capture across
//! nested subsections.
//!
//! ## Core Features
//!
//! - **Link normalization**: raw link annotations become a deduplicated,
//!   depth-ordered entry sequence with successor chaining
//! - **Tree reconstruction**: dot-separated hierarchical keys (`8.1.7`)
//!   partition the sequence into a nested forest with exact page spans
//! - **Validation + self-healing**: a coverage metric over re-resolved
//!   entries, with a single correction pass that synthesizes missing roots
//! - **Boundary-exact extraction**: section text stitched between start and
//!   end markers, across any number of pages
//! - **Cache format**: the forest serializes to JSON and reloads verbatim,
//!   skipping extraction and validation entirely
//!
//! Document access goes through the narrow [`DocumentSource`] contract, so
//! any backend that can enumerate per-page links and text can drive the
//! pipeline.
//!
//! ## Quick Start
//!
//! ```
//! use toc_oxide::{InMemoryDocument, RawLink, TocIndex};
//!
//! # fn main() -> toc_oxide::Result<()> {
//! let mut doc = InMemoryDocument::new();
//! let row = |key: &str, title: &str, page: usize| {
//!     RawLink::new(page, format!("{key} {title} {} {page}", ".".repeat(40)))
//! };
//! doc.push_page("CONTENTS", vec![row("1", "General", 1), row("2", "Operations", 2)]);
//! doc.push_text_page("front 1 general body");
//! doc.push_text_page(" 2 operations body");
//!
//! let index = TocIndex::build(&doc)?;
//! assert_eq!(index.metrics().coverage_metric, 1.0);
//!
//! let sections = index.extract_text(&doc, &["2"]);
//! assert_eq!(sections[0].as_deref(), Some("operations body\n"));
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of Apache License, Version 2.0 or MIT license at
//! your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Document collaborator contract
pub mod source;

// TOC reconstruction pipeline
pub mod toc;

// Re-exports
pub use error::{Error, Result};
pub use source::{DocumentSource, InMemoryDocument, RawLink};
pub use toc::{TocIndex, TocLink, TocMetrics, TocNode};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        // VERSION is populated from CARGO_PKG_VERSION at compile time
        assert!(VERSION.starts_with("0."));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "toc_oxide");
    }
}
