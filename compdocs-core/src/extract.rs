//! Export extraction: turns the text of an index module into the sorted set of
//! component names it forwards from local files.
//!
//! Only `export { ... } from './path'` (or `'../path'`) blocks are recognised.
//! Wildcard re-exports, default exports and re-exports from packages are
//! ignored.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

static EXPORT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"export\s*\{([^}]+)\}\s*from\s*['"]\.\.?/"#).expect("export block pattern is valid")
});

/// Companion type declarations end with one of these and are not components.
pub const RESERVED_SUFFIXES: &[&str] = &["Props", "Options"];

/// Returns the documentable export names found in `source`, deduplicated and
/// in case-sensitive lexical order. No match yields an empty list.
pub fn extract_component_names(source: &str) -> Vec<String> {
    let mut names = BTreeSet::new();

    for block in EXPORT_BLOCK.captures_iter(source) {
        let Some(list) = block.get(1) else { continue };
        for item in list.as_str().split(',') {
            if let Some(name) = original_name(item) {
                if is_documentable(name) {
                    names.insert(name.to_string());
                }
            }
        }
    }

    names.into_iter().collect()
}

/// `A as B` documents `A`; the alias does not change identity.
fn original_name(item: &str) -> Option<&str> {
    item.split_whitespace().next()
}

fn is_documentable(name: &str) -> bool {
    let starts_upper = name.chars().next().is_some_and(|c| c.is_ascii_uppercase());
    starts_upper && !RESERVED_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}
