//! Single-pass self-healing of missing root entries.
//!
//! A root heading can be filtered out upstream (duplicate, backward link,
//! garbage row) while its descendants survive; those descendants then fail
//! validation. This pass synthesizes one entry per missing root, inserting
//! it before the first entry whose label carries the root key, and recovers
//! the heading text from the link-bearing pages' raw text when possible.
//!
//! Exactly one pass: entries still unresolved after the rebuild stay
//! unresolved and only lower the coverage metric.

use std::collections::BTreeSet;

use regex::Regex;

use crate::source::DocumentSource;
use crate::toc::normalizer::{filter_heading_chars, trim_dot_leader, ParseContext};
use crate::toc::types::{root_segment, TocLink};

/// What the heal pass did.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealOutcome {
    /// Roots synthesized and inserted into the entry sequence
    pub inserted: usize,

    /// Inserted roots whose heading text could not be recovered
    pub untitled: usize,
}

/// Synthesize an entry for every distinct missing root among the unresolved
/// entries. Roots with no label evidence anywhere in the sequence cannot be
/// healed and are skipped. The caller re-chains, rebuilds, and revalidates.
pub fn heal_missing_roots<D: DocumentSource>(
    doc: &D,
    links: &mut Vec<TocLink>,
    unresolved: &[TocLink],
    ctx: &ParseContext,
) -> HealOutcome {
    let missing_roots: BTreeSet<String> = unresolved
        .iter()
        .map(|link| root_segment(&link.key).to_string())
        .collect();

    let mut outcome = HealOutcome::default();
    for root in &missing_roots {
        let Some(pos) = links.iter().position(|l| l.label.starts_with(root.as_str())) else {
            log::warn!("cannot heal missing root {}: no label evidence", root);
            continue;
        };
        let target_page = links[pos].target_page;
        let label = match recover_label(doc, root, &ctx.toc_pages) {
            Some(label) => label,
            None => {
                log::warn!("no heading text found for healed root {}", root);
                outcome.untitled += 1;
                format!("{} UNTITLED", root)
            },
        };
        log::info!("healing missing root {} at position {}", root, pos);
        links.insert(pos, TocLink::new(root.clone(), label, target_page));
        outcome.inserted += 1;
    }
    outcome
}

/// Best-effort heading recovery from the raw text of the link-bearing pages.
fn recover_label<D: DocumentSource>(
    doc: &D,
    key: &str,
    toc_pages: &BTreeSet<usize>,
) -> Option<String> {
    for &page in toc_pages {
        let text = doc.page_text(page);
        let lines: Vec<&str> = text.split('\n').collect();
        if let Some(found) = basic_search(&lines, key) {
            return Some(trim_dot_leader(&found).to_string());
        }
        if let Some(found) = advanced_search(&lines, key) {
            return Some(trim_dot_leader(&found).to_string());
        }
    }
    None
}

/// A line that is exactly the key (or `key.`), joined with the line below it.
fn basic_search(lines: &[&str], key: &str) -> Option<String> {
    let with_dot = format!("{}.", key);
    let idx = lines
        .iter()
        .rposition(|line| line.trim() == key || line.trim() == with_dot)?;
    if idx == lines.len() - 1 {
        return None;
    }
    Some(format!("{}{}", lines[idx], lines[idx + 1]))
}

/// A line shaped like `<word> <key> <words...>` after character filtering,
/// e.g. "CHAPTER 8 HYDRAULICS". Last match wins.
fn advanced_search(lines: &[&str], key: &str) -> Option<String> {
    let pattern = format!(r"^[A-Za-z]+\s+{}\s+[A-Za-z0-9 ]+", regex::escape(key));
    let re = Regex::new(&pattern).ok()?;

    let transformed: Vec<String> = lines.iter().map(|l| filter_heading_chars(l)).collect();
    transformed
        .iter()
        .rev()
        .find(|line| re.is_match(line))
        .cloned()
}
