//! Item name normalization.
//!
//! Item names are unique under case-insensitive comparison. `name_key` is the
//! comparison form; `display_name` is the form new items are stored under.

/// Comparison key for an item name: trimmed, inner whitespace collapsed, lowercase.
pub fn name_key(name: &str) -> String {
    collapse(name).to_lowercase()
}

/// Display form for a newly created item: whitespace collapsed, each word
/// capitalized (`"egg  salad"` → `"Egg Salad"`).
///
/// Scripts without case (e.g. Hebrew) pass through unchanged.
pub fn display_name(name: &str) -> String {
    collapse(name)
        .split(' ')
        .map(title_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn collapse(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn title_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
