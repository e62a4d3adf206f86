use std::sync::LazyLock;

use regex::Regex;

static CASE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("case boundary pattern is valid"));

/// Kebab-case slug for an export name: `BottomSheet` -> `bottom-sheet`.
///
/// Only the case changes and underscores become hyphens, so distinct names can
/// still collide (`ABC` and `Abc` both map to `abc`). Callers that care must
/// check for that themselves.
pub fn to_slug(name: &str) -> String {
    CASE_BOUNDARY
        .replace_all(name, "$1-$2")
        .replace('_', "-")
        .to_lowercase()
}
