//! Completion of hand-typed tags against tags already in use.

use std::collections::BTreeSet;

use crate::policy::derive::ORG_PREFIX;

/// Sorted, distinct tags across `tag_lists`. `org/` tags are left out; they
/// are derived, never typed.
pub fn known_tags<'a, I>(tag_lists: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a [String]>,
{
    tag_lists
        .into_iter()
        .flatten()
        .filter(|tag| !tag.starts_with(ORG_PREFIX))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The first of `known` that starts with `raw` ignoring case, else `raw`.
///
/// `known` is sorted, so an exact match wins over its longer extensions.
pub fn complete_tag(raw: &str, known: &[String]) -> String {
    let lower = raw.to_lowercase();
    known
        .iter()
        .find(|tag| tag.to_lowercase().starts_with(&lower))
        .cloned()
        .unwrap_or_else(|| raw.to_string())
}
