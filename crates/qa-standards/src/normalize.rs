//! Header text normalization.

/// Normalizes header text for comparison by lowercasing and replacing
/// separators with spaces.
///
/// `"Applied_kVp"`, `"applied  kvp"` and `" Applied-KVP "` all normalize to
/// `"applied kvp"`.
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-', '.', '/', '\\'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalizes a section title for marker matching.
pub fn normalize_title(raw: &str) -> String {
    raw.trim().to_uppercase()
}
