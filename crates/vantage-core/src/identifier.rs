//! Identifier slugging for the emitted diagram code.
//!
//! Structurizr DSL identifiers are restricted to `[A-Za-z0-9_]`. Element
//! names are free-form, so the dumper derives identifiers by slugging the
//! name and deduplicating collisions with a numeric suffix.

use std::collections::HashSet;

/// Derives a DSL-safe identifier from a free-form element name.
///
/// Lowercases ASCII letters, keeps digits and underscores, and collapses any
/// run of other characters into a single underscore. Never returns an empty
/// string and never starts with a digit; both cases are prefixed with `e`.
pub(crate) fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_sep = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }

    match out.chars().next() {
        None => "e".to_string(),
        Some(first) if first.is_ascii_digit() => format!("e{out}"),
        Some(_) => out,
    }
}

/// Allocates unique identifiers across one dump pass.
#[derive(Debug, Default)]
pub(crate) struct IdentifierSet {
    taken: HashSet<String>,
}

impl IdentifierSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns a unique identifier for `name`, appending `_2`, `_3`, ... on
    /// collision with a previously allocated identifier.
    pub(crate) fn allocate(&mut self, name: &str) -> String {
        let base = slug(name);
        let mut candidate = base.clone();
        let mut counter = 2;

        while !self.taken.insert(candidate.clone()) {
            candidate = format!("{base}_{counter}");
            counter += 1;
        }

        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn slug_lowercases_and_collapses() {
        assert_eq!(slug("Rich Customer"), "rich_customer");
        assert_eq!(slug("Fantastic  Web--App"), "fantastic_web_app");
        assert_eq!(slug("API v2"), "api_v2");
    }

    #[test]
    fn slug_never_empty_or_digit_led() {
        assert_eq!(slug(""), "e");
        assert_eq!(slug("---"), "e");
        assert_eq!(slug("3rd Party"), "e3rd_party");
    }

    #[test]
    fn allocate_deduplicates_collisions() {
        let mut ids = IdentifierSet::new();
        assert_eq!(ids.allocate("Fo o"), "fo_o");
        assert_eq!(ids.allocate("Fo-o"), "fo_o_2");
        assert_eq!(ids.allocate("Fo.o"), "fo_o_3");
    }

    proptest! {
        #[test]
        fn slug_is_always_a_valid_identifier(name in ".*") {
            let s = slug(&name);
            prop_assert!(!s.is_empty());
            prop_assert!(s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
            prop_assert!(!s.chars().next().unwrap().is_ascii_digit());
        }

        #[test]
        fn allocate_never_repeats(names in proptest::collection::vec(".*", 0..20)) {
            let mut ids = IdentifierSet::new();
            let allocated: Vec<_> = names.iter().map(|n| ids.allocate(n)).collect();
            let unique: std::collections::HashSet<_> = allocated.iter().collect();
            prop_assert_eq!(unique.len(), allocated.len());
        }
    }
}
