//! Link normalization.
//!
//! Turns raw per-page link annotations into a clean, deduplicated,
//! order-preserving sequence of [`TocLink`] entries, then chains each entry
//! to its successor in overall document order. Links that fail any filter
//! are skipped silently (logged at debug level), never surfaced as errors.

use std::collections::{BTreeSet, HashSet};

use lazy_static::lazy_static;
use regex::Regex;

use crate::source::DocumentSource;
use crate::toc::types::TocLink;

/// Raw links shorter than this are incidental in-document links, not TOC rows.
pub const SHORT_LINK_THRESHOLD: usize = 50;

lazy_static! {
    /// Key followed by an alphabetic/space label, e.g. "8.1.7 Hydraulic Pumps".
    static ref KEY_LABEL_PATTERN: Regex =
        Regex::new(r"^((\d+\.?(?:\.\d+)*)[A-Za-z ]+)").unwrap();

    /// Shape of a dot-separated numeric key, e.g. "8", "8.", "8.1.7".
    static ref KEY_SHAPE_PATTERN: Regex = Regex::new(r"\d+\.?(?:\.\d+)*").unwrap();
}

/// Mutable state of one parse session, threaded through the pipeline.
///
/// Holds the duplicate-key set, the pages that carried TOC links (used later
/// by label recovery), the globally last key (exempt from the span
/// diagnostic), and skip counters.
#[derive(Debug, Default)]
pub struct ParseContext {
    /// Keys already emitted in this parse; later occurrences are dropped
    pub seen_keys: HashSet<String>,

    /// Pages that yielded at least one length-passing link
    pub toc_pages: BTreeSet<usize>,

    /// Key of the globally last entry after chaining
    pub last_key: Option<String>,

    /// Number of duplicate keys dropped
    pub duplicates_dropped: usize,
}

impl ParseContext {
    /// Create a fresh parse context.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Collect and normalize every outgoing link of the document, in ascending
/// page order and on-page encounter order, then run the chaining pass.
pub fn normalize_links<D: DocumentSource>(doc: &D, ctx: &mut ParseContext) -> Vec<TocLink> {
    let mut links = Vec::new();
    for page in 0..doc.page_count() {
        for raw in doc.outgoing_links(page) {
            if let Some(link) = parse_link(page, raw.target_page, &raw.text, ctx) {
                links.push(link);
            }
        }
    }
    chain_successors(&mut links, ctx);
    links
}

/// Normalize one raw link annotation, or skip it.
pub fn parse_link(
    source_page: usize,
    target_page: usize,
    raw_text: &str,
    ctx: &mut ParseContext,
) -> Option<TocLink> {
    // backward references are navigation links, not TOC rows
    if target_page < source_page {
        return None;
    }
    if raw_text.chars().count() < SHORT_LINK_THRESHOLD {
        return None;
    }

    let text = filter_heading_chars(raw_text);
    ctx.toc_pages.insert(source_page);

    let (label, key) = split_key_label(text.trim())?;

    if ctx.seen_keys.contains(&key) {
        log::debug!("dropping duplicate TOC key {}", key);
        ctx.duplicates_dropped += 1;
        return None;
    }
    ctx.seen_keys.insert(key.clone());
    Some(TocLink::new(key, label, target_page))
}

/// Set every entry's successor fields to the next entry's target page and
/// key; the last entry keeps `None`. Remembers the last key in the context.
pub fn chain_successors(links: &mut [TocLink], ctx: &mut ParseContext) {
    for i in 0..links.len() {
        if i + 1 < links.len() {
            links[i].next_page = Some(links[i + 1].target_page);
            links[i].next_key = Some(links[i + 1].key.clone());
        }
    }
    ctx.last_key = links.last().map(|l| l.key.clone());
}

/// Characters retained in heading text: ASCII letters, digits, space, `.`.
fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ' ' || c == '.'
}

/// Strip a line to the allowed heading character set.
pub(crate) fn filter_heading_chars(text: &str) -> String {
    text.chars().filter(|&c| is_allowed_char(c)).collect()
}

/// Cut off a dot-leader tail (five or more consecutive dots).
pub fn trim_dot_leader(text: &str) -> &str {
    match text.find(".....") {
        Some(pos) => &text[..pos],
        None => text,
    }
}

/// Split a cleaned link text into `(label, key)`.
///
/// Tried in order: a mixed alphanumeric token (e.g. `B737800`) promotes the
/// first space-delimited word to key candidate; otherwise the text must lead
/// with a dot-separated numeric key followed by an alphabetic label. Returns
/// `None` for garbage rows whose label is nothing but the key.
pub fn split_key_label(text: &str) -> Option<(String, String)> {
    let text = trim_dot_leader(text);

    if has_mixed_alnum_token(text) {
        let key = text.split(' ').next().unwrap_or_default();
        if KEY_SHAPE_PATTERN.is_match(key) {
            return Some((text.to_string(), key.to_string()));
        }
    }

    let caps = KEY_LABEL_PATTERN.captures(text)?;
    let label = caps.get(1)?.as_str();
    let mut key = caps.get(2)?.as_str().to_string();
    if label.trim() == key {
        return None;
    }
    // top-level rows like "3." leave a trailing separator on the key
    if key.ends_with('.') {
        key.pop();
    }
    Some((label.to_string(), key))
}

/// True when the text contains a word mixing letters and digits.
fn has_mixed_alnum_token(text: &str) -> bool {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .any(|tok| tok.bytes().any(|b| b.is_ascii_digit()) && tok.bytes().any(|b| b.is_ascii_alphabetic()))
}
