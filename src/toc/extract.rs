//! Boundary-exact section text extraction.
//!
//! Stitches a node's literal body between its start marker (`" {key} "` in
//! the newline-stripped start page) and its end marker (the leading token of
//! its end key), across however many pages the section spans. Interior pages
//! are appended verbatim; only boundary pages are flattened and split.
//!
//! Only the single-page shape can fail (both markers must occur); terminal
//! and multi-page extraction fall back to whatever the marker split leaves,
//! including the whole boundary page when a marker is absent.

use crate::source::DocumentSource;
use crate::toc::types::TocNode;

/// Extract the literal text body of one resolved node.
pub fn node_text<D: DocumentSource>(doc: &D, node: &TocNode) -> Option<String> {
    let start_marker = format!(" {} ", node.key);

    match node.end_page {
        None => Some(terminal_text(doc, node, &start_marker)),
        Some(end_page) if end_page == node.start_page => {
            single_page_text(doc, node, &start_marker)
        },
        Some(end_page) => Some(multi_page_text(doc, node, &start_marker, end_page)),
    }
}

/// Open-ended section: start page tail, then every remaining page verbatim.
fn terminal_text<D: DocumentSource>(doc: &D, node: &TocNode, start_marker: &str) -> String {
    let mut out = String::new();
    for page in node.start_page..doc.page_count() {
        let text = doc.page_text(page);
        if page == node.start_page {
            let flat = strip_newlines(&text);
            out.push_str(tail_after_last(&flat, start_marker));
            out.push('\n');
            continue;
        }
        out.push_str(&text);
    }
    out
}

/// Section confined to one page: leftmost capture between the two markers.
fn single_page_text<D: DocumentSource>(
    doc: &D,
    node: &TocNode,
    start_marker: &str,
) -> Option<String> {
    let end_marker = end_marker(node)?;
    let flat = strip_newlines(&doc.page_text(node.start_page));

    let body_start = flat.find(start_marker)? + start_marker.len();
    let rest = &flat[body_start..];
    let body_end = rest.find(&end_marker)?;
    Some(rest[..body_end].to_string())
}

/// Section spanning several pages: flattened boundary pages, verbatim middle.
fn multi_page_text<D: DocumentSource>(
    doc: &D,
    node: &TocNode,
    start_marker: &str,
    end_page: usize,
) -> String {
    let end_marker = end_marker(node);
    let mut out = String::new();
    for page in node.start_page..=end_page {
        let text = doc.page_text(page);
        if page == node.start_page {
            let flat = strip_newlines(&text);
            out.push_str(tail_after_last(&flat, start_marker));
            out.push('\n');
            continue;
        }
        if page == end_page {
            let flat = strip_newlines(&text);
            out.push('\n');
            match &end_marker {
                Some(marker) => out.push_str(before_first(&flat, marker)),
                None => out.push_str(&flat),
            }
            continue;
        }
        out.push_str(&text);
    }
    out
}

/// End marker: the end key's leading whitespace-delimited token. Healed end
/// keys can be full recovered labels; only their first token bounds the text.
fn end_marker(node: &TocNode) -> Option<String> {
    let end_key = node.end_key.as_deref()?;
    let token = end_key.split_whitespace().next().unwrap_or(end_key);
    Some(format!(" {} ", token))
}

fn strip_newlines(text: &str) -> String {
    text.replace('\n', "")
}

/// Substring after the last occurrence of `marker`; whole text when absent.
fn tail_after_last<'a>(text: &'a str, marker: &str) -> &'a str {
    match text.rfind(marker) {
        Some(pos) => &text[pos + marker.len()..],
        None => text,
    }
}

/// Substring before the first occurrence of `marker`; whole text when absent.
fn before_first<'a>(text: &'a str, marker: &str) -> &'a str {
    match text.find(marker) {
        Some(pos) => &text[..pos],
        None => text,
    }
}
