//! TOC index session.
//!
//! [`TocIndex`] owns one reconstructed forest and its parse metrics. It is
//! either built fresh from a [`DocumentSource`] (normalize → gap check →
//! build → validate → heal once → revalidate) or reconstructed verbatim from
//! a cache blob, never a merge of both.

use crate::error::Result;
use crate::source::DocumentSource;
use crate::toc::builder::build_forest;
use crate::toc::extract::node_text;
use crate::toc::gaps::find_key_gaps;
use crate::toc::heal::heal_missing_roots;
use crate::toc::lookup::find_node;
use crate::toc::normalizer::{chain_successors, normalize_links, ParseContext};
use crate::toc::overlap::remove_key_overlaps;
use crate::toc::types::{TocMetrics, TocNode};
use crate::toc::validator::validate_forest;

/// A reconstructed table of contents with its parse metrics.
#[derive(Debug, Clone)]
pub struct TocIndex {
    forest: Vec<TocNode>,
    metrics: TocMetrics,
}

impl TocIndex {
    /// Run the full reconstruction pipeline over a document.
    ///
    /// Fails only when no TOC entries survive normalization; every other
    /// irregularity is logged and folded into the metrics.
    pub fn build<D: DocumentSource>(doc: &D) -> Result<Self> {
        let mut ctx = ParseContext::new();
        let mut links = normalize_links(doc, &mut ctx);

        let keys: Vec<&str> = links.iter().map(|l| l.key.as_str()).collect();
        let gaps = find_key_gaps(&keys);
        if !gaps.is_empty() {
            log::warn!("found {} link gaps: {:?}", gaps.len(), gaps);
        }
        let gap_count = gaps.len();

        let mut headers_count = links.len();
        log::info!("found {} TOC headers", headers_count);
        for link in &links {
            if !link.label.starts_with(&link.key) {
                log::warn!("inconsistent link: label {:?} does not carry key {}", link.label, link.key);
            }
        }

        log::info!("building TOC tree");
        let mut forest = build_forest(&links, &ctx);
        let mut validation = validate_forest(&forest, &links)?;
        log::info!("TOC coverage metric: {}", validation.coverage);

        let mut untitled_labels_count = 0;
        if !validation.is_complete() {
            log::info!("running post correction");
            let outcome = heal_missing_roots(doc, &mut links, &validation.unresolved, &ctx);
            untitled_labels_count = outcome.untitled;
            headers_count = links.len();
            chain_successors(&mut links, &mut ctx);
            forest = build_forest(&links, &ctx);
            validation = validate_forest(&forest, &links)?;
            log::info!("TOC coverage metric after heal: {}", validation.coverage);
        }

        Ok(Self {
            forest,
            metrics: TocMetrics {
                headers_count,
                coverage_metric: validation.coverage,
                untitled_labels_count,
                gap_count,
            },
        })
    }

    /// Reconstruct an index from a cached forest, trusting it verbatim.
    ///
    /// No link extraction and no re-validation happen; metrics report full
    /// coverage over the cached node count.
    pub fn from_cache(forest: Vec<TocNode>) -> Self {
        let headers_count = count_nodes(&forest);
        Self {
            forest,
            metrics: TocMetrics {
                headers_count,
                coverage_metric: 1.0,
                untitled_labels_count: 0,
                gap_count: 0,
            },
        }
    }

    /// Deserialize an index from a cache blob produced by [`to_cache_json`].
    ///
    /// [`to_cache_json`]: TocIndex::to_cache_json
    pub fn from_cache_json(json: &str) -> Result<Self> {
        let forest: Vec<TocNode> = serde_json::from_str(json)?;
        Ok(Self::from_cache(forest))
    }

    /// Serialize the forest to the cache format.
    pub fn to_cache_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.forest)?)
    }

    /// The root nodes of the forest, in discovery order.
    pub fn roots(&self) -> &[TocNode] {
        &self.forest
    }

    /// Observational parse metrics (benchmark/reporting surface).
    pub fn metrics(&self) -> &TocMetrics {
        &self.metrics
    }

    /// Find the node carrying exactly `key`.
    pub fn find_node(&self, key: &str) -> Option<&TocNode> {
        find_node(&self.forest, key)
    }

    /// Extract the literal text body of one node.
    pub fn node_text<D: DocumentSource>(&self, doc: &D, node: &TocNode) -> Option<String> {
        node_text(doc, node)
    }

    /// Extract the text of a set of sections.
    ///
    /// The requested keys are first collapsed to non-overlapping top-level
    /// keys; the result holds one element per retained key in sorted order,
    /// with `None` for keys that fail lookup or extraction.
    pub fn extract_text<D: DocumentSource, S: AsRef<str>>(
        &self,
        doc: &D,
        keys: &[S],
    ) -> Vec<Option<String>> {
        remove_key_overlaps(keys)
            .iter()
            .map(|key| {
                self.find_node(key)
                    .and_then(|node| self.node_text(doc, node))
            })
            .collect()
    }
}

fn count_nodes(forest: &[TocNode]) -> usize {
    forest
        .iter()
        .map(|node| 1 + count_nodes(&node.children))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::source::{InMemoryDocument, RawLink};

    fn toc_row(key: &str, title: &str, page: usize) -> RawLink {
        let text = format!("{} {} {} {}", key, title, ".".repeat(40), page + 1);
        RawLink::new(page, text)
    }

    fn manual() -> InMemoryDocument {
        let mut doc = InMemoryDocument::new();
        doc.push_page(
            "CONTENTS\n",
            vec![
                toc_row("1", "General", 2),
                toc_row("1.1", "Dimensions", 2),
                toc_row("1.2", "Limitations", 3),
                toc_row("2", "Procedures", 4),
                toc_row("2.1", "Normal", 4),
            ],
        );
        doc.push_text_page("front matter");
        doc.push_text_page(" 1 general body 1.1 dimensions body 1.2 limits start");
        doc.push_text_page("limits continued 2 ");
        doc.push_text_page(" 2 procedures 2.1 normal body to end");
        doc
    }

    #[test]
    fn test_build_full_coverage() {
        let index = TocIndex::build(&manual()).unwrap();
        let metrics = index.metrics();

        assert_eq!(metrics.headers_count, 5);
        assert_eq!(metrics.coverage_metric, 1.0);
        assert_eq!(metrics.untitled_labels_count, 0);
        assert_eq!(metrics.gap_count, 0);
        assert_eq!(index.roots().len(), 2);
    }

    #[test]
    fn test_build_empty_document_errors() {
        let doc = InMemoryDocument::new();
        assert!(matches!(TocIndex::build(&doc), Err(Error::NoTocEntries)));
    }

    #[test]
    fn test_lookup_exact_key() {
        let index = TocIndex::build(&manual()).unwrap();
        assert_eq!(index.find_node("1.2").unwrap().key, "1.2");
        assert!(index.find_node("1.3").is_none());
    }

    #[test]
    fn test_cache_round_trip_preserves_lookup() {
        let index = TocIndex::build(&manual()).unwrap();
        let blob = index.to_cache_json().unwrap();
        let restored = TocIndex::from_cache_json(&blob).unwrap();

        assert_eq!(index.roots(), restored.roots());
        for key in ["1", "1.1", "1.2", "2", "2.1"] {
            assert_eq!(index.find_node(key), restored.find_node(key));
        }
        assert_eq!(restored.metrics().headers_count, 5);
        assert_eq!(restored.metrics().coverage_metric, 1.0);
    }

    #[test]
    fn test_from_cache_json_rejects_garbage() {
        assert!(matches!(
            TocIndex::from_cache_json("not a cache"),
            Err(Error::Cache(_))
        ));
    }

    #[test]
    fn test_extract_text_collapses_overlaps() {
        let doc = manual();
        let index = TocIndex::build(&doc).unwrap();

        let out = index.extract_text(&doc, &["1.1", "1", "1.2", "2.1"]);
        // "1" absorbs its subsections; "2.1" survives
        assert_eq!(out.len(), 2);
        assert!(out[0].is_some());
        assert!(out[1].is_some());
    }

    #[test]
    fn test_extract_text_keeps_placeholder_for_missing_key() {
        let doc = manual();
        let index = TocIndex::build(&doc).unwrap();

        let out = index.extract_text(&doc, &["2.1", "6"]);
        assert_eq!(out.len(), 2);
        assert!(out[0].is_some()); // "2.1"
        assert!(out[1].is_none()); // "6" not in the tree
    }
}
