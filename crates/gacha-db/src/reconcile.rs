//! Catalog-to-store reconciliation.
//!
//! The compiled-in catalog is authoritative: any stored key absent from
//! it is stale and gets deleted on the next sync pass. The computation
//! is a pure set difference so it can be tested without a store.

use std::collections::HashSet;

/// Keys present in the store but absent from the current catalog.
///
/// `desired` must be the freshly upserted key set, otherwise records
/// inserted by the same pass would be reported as stale.
pub fn stale_keys<'a, D, C>(desired: D, current: C) -> Vec<String>
where
    D: IntoIterator<Item = &'a str>,
    C: IntoIterator<Item = String>,
{
    let keep: HashSet<&str> = desired.into_iter().collect();
    current
        .into_iter()
        .filter(|key| !keep.contains(key.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_stale_keys_are_the_difference() {
        let stale = stale_keys(
            ["c1", "c2"],
            strings(&["c1", "c2", "old1", "old2"]),
        );
        assert_eq!(stale, vec!["old1", "old2"]);
    }

    #[test]
    fn test_no_stale_keys_when_catalog_unchanged() {
        let stale = stale_keys(["c1", "c2"], strings(&["c1", "c2"]));
        assert!(stale.is_empty());
    }

    #[test]
    fn test_empty_catalog_marks_everything_stale() {
        let stale = stale_keys(std::iter::empty::<&str>(), strings(&["c1"]));
        assert_eq!(stale, vec!["c1"]);
    }

    #[test]
    fn test_empty_store_has_no_stale_keys() {
        let stale = stale_keys(["c1"], strings(&[]));
        assert!(stale.is_empty());
    }
}
