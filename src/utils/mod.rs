pub mod arabic;

/// Normalize an operator-entered slug into its canonical stored form.
///
/// Lower-case, trim, collapse whitespace runs into single hyphens, then drop
/// everything outside `[A-Za-z0-9_-]`. Normalizing an already-normalized
/// slug yields the same value.
pub fn normalize_slug(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}
