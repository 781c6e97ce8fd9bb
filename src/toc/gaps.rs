//! Sibling gap detection.
//!
//! Diagnostic pass over the normalized key sequence that flags skipped
//! sibling numbers (e.g. `1.3` followed by `1.6` flags `1.4` and `1.5`).
//! Reporting only; the tree is never altered.

use crate::toc::types::key_depth;

/// Report every missing sibling key between adjacent same-depth entries.
///
/// Pairs whose trailing segment is not numeric are skipped.
pub fn find_key_gaps<S: AsRef<str>>(keys: &[S]) -> Vec<String> {
    let mut gaps = Vec::new();
    for pair in keys.windows(2) {
        let (a, b) = (pair[0].as_ref(), pair[1].as_ref());
        if key_depth(a) != key_depth(b) {
            continue;
        }
        let (Some(a_last), Some(b_last)) = (trailing_number(a), trailing_number(b)) else {
            continue;
        };
        if b_last.wrapping_sub(a_last) != 1 {
            let prefix = parent_prefix(a);
            for missing in a_last.saturating_add(1)..b_last {
                gaps.push(format!("{}{}", prefix, missing));
            }
        }
    }
    gaps
}

/// Final dot-separated segment parsed as an integer.
fn trailing_number(key: &str) -> Option<u64> {
    key.rsplit('.').next()?.parse().ok()
}

/// Everything up to and including the last separator (`"2.1.4"` -> `"2.1."`).
fn parent_prefix(key: &str) -> &str {
    match key.rfind('.') {
        Some(pos) => &key[..=pos],
        None => "",
    }
}
