//! Key overlap removal.
//!
//! Collapses a requested key set to its top-level members before extraction,
//! so nested requests like `["8", "8.1.7"]` pull the `8` body exactly once.
//!
//! Keys are compared as plain strings: lexicographic sort, then greedy
//! retention of keys that are not a string prefix of anything already
//! retained. The prefix test is not separator-aware, so `"1"` also absorbs
//! `"10"`. That matches the established cache/consumer behavior and is kept
//! as-is.

/// Reduce `keys` to non-overlapping top-level keys, in sorted order.
pub fn remove_key_overlaps<S: AsRef<str>>(keys: &[S]) -> Vec<String> {
    let mut sorted: Vec<String> = keys.iter().map(|k| k.as_ref().to_string()).collect();
    sorted.sort();

    let mut retained: Vec<String> = Vec::new();
    for key in sorted {
        if !retained.iter().any(|kept| key.starts_with(kept.as_str())) {
            retained.push(key);
        }
    }
    retained
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parent_absorbs_descendants() {
        let keys = ["8.1.7", "8.2.3", "8", "8.4"];
        assert_eq!(remove_key_overlaps(&keys), vec!["8"]);
    }

    #[test]
    fn test_sibling_subtrees_survive() {
        let keys = ["1.1.3", "1.1", "1.5.2", "1.5", "1.1.5"];
        assert_eq!(remove_key_overlaps(&keys), vec!["1.1", "1.5"]);
    }

    #[test]
    fn test_mixed_depths_and_roots() {
        let keys = [
            "1.1.3", "1.1", "1.5.2", "1.5", "1.1.5", "2", "7.4.1", "7.4", "7.3.2.2",
        ];
        assert_eq!(
            remove_key_overlaps(&keys),
            vec!["1.1", "1.5", "2", "7.3.2.2", "7.4"]
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(remove_key_overlaps(&["3", "3", "3.1"]), vec!["3"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(remove_key_overlaps::<&str>(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn resolve_is_idempotent(keys in proptest::collection::vec("[0-9]{1,2}(\\.[0-9]{1,2}){0,3}", 0..12)) {
            let once = remove_key_overlaps(&keys);
            let twice = remove_key_overlaps(&once);
            prop_assert_eq!(once, twice);
        }
    }
}
