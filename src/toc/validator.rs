//! Tree completeness validation.
//!
//! Re-resolves every normalized entry against the built forest and reports
//! the coverage ratio plus the entries that failed to resolve. Misses are
//! diagnostics, not errors; the one hard precondition is a non-empty entry
//! set (the ratio divides by the entry count).

use crate::error::{Error, Result};
use crate::toc::lookup::find_node;
use crate::toc::types::{TocLink, TocNode};

/// Outcome of re-resolving the entry sequence against the forest.
#[derive(Debug, Clone)]
pub struct Validation {
    /// Fraction of entries whose key resolved to an exact node, in [0, 1]
    pub coverage: f64,

    /// Entries whose key did not resolve
    pub unresolved: Vec<TocLink>,
}

impl Validation {
    /// True when every entry resolved.
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Look up every entry's key in the forest; exact key match required.
pub fn validate_forest(forest: &[TocNode], links: &[TocLink]) -> Result<Validation> {
    if links.is_empty() {
        return Err(Error::NoTocEntries);
    }

    let mut unresolved = Vec::new();
    for link in links {
        if find_node(forest, &link.key).is_none() {
            log::warn!("TOC entry {} not found in built tree", link.key);
            unresolved.push(link.clone());
        }
    }

    let coverage = 1.0 - unresolved.len() as f64 / links.len() as f64;
    Ok(Validation {
        coverage,
        unresolved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toc::builder::build_forest;
    use crate::toc::normalizer::{chain_successors, ParseContext};

    fn linked(keys: &[&str]) -> Vec<TocLink> {
        let mut ctx = ParseContext::new();
        let mut links: Vec<TocLink> = keys
            .iter()
            .enumerate()
            .map(|(i, key)| TocLink::new(*key, format!("{} Section", key), i))
            .collect();
        chain_successors(&mut links, &mut ctx);
        links
    }

    #[test]
    fn test_complete_forest_has_full_coverage() {
        let links = linked(&["1", "1.1", "1.2", "2"]);
        let ctx = ParseContext::new();
        let forest = build_forest(&links, &ctx);

        let validation = validate_forest(&forest, &links).unwrap();
        assert!(validation.is_complete());
        assert_eq!(validation.coverage, 1.0);
    }

    #[test]
    fn test_orphaned_entries_lower_coverage() {
        // "7.1" and "7.2" have no depth-0 parent and fall out of the tree
        let links = linked(&["7.1", "7.2", "8", "8.1"]);
        let ctx = ParseContext::new();
        let forest = build_forest(&links, &ctx);

        let validation = validate_forest(&forest, &links).unwrap();
        assert_eq!(validation.unresolved.len(), 2);
        assert!((validation.coverage - 0.5).abs() < 1e-9);
        assert!(validation.coverage > 0.0 && validation.coverage < 1.0);
    }

    #[test]
    fn test_empty_entry_set_is_an_error() {
        let err = validate_forest(&[], &[]).unwrap_err();
        assert!(matches!(err, Error::NoTocEntries));
    }
}
