//! Case folding for lookup keys.
//!
//! Classnames, keyvalue names and IO names are all matched
//! case-insensitively. Keys are folded once on insertion and every
//! lookup folds its argument the same way.

/// Returns the folded form of `text` used as a lookup key.
#[must_use]
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Compares two strings after folding.
#[must_use]
pub fn eq_folded(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
