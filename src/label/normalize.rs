//! Clean-up of raw OCR output.

use crate::ir::ComponentType;

/// Punctuation stripped from both ends after artifact removal.
const EDGE_PUNCTUATION: &[char] = &['.', ',', '!', '?', '-', '_'];

/// Normalizes raw OCR text.
///
/// - characters other than letters, digits, whitespace and `-_.,!?` are
///   treated as recognition artifacts and removed
/// - whitespace runs collapse to a single space, ends are trimmed
/// - stray punctuation at either end is stripped
/// - the first letter is capitalized
pub fn normalize_text(raw: &str) -> String {
    let kept: String = raw.chars().filter(|c| is_kept(*c)).collect();
    let collapsed = kept.split_whitespace().collect::<Vec<_>>().join(" ");
    let stripped = collapsed.trim_matches(EDGE_PUNCTUATION).trim();
    capitalize_first(stripped)
}

/// Picks the final text for a component: the normalized OCR text, or the
/// type's fallback when nothing usable is left.
pub fn text_or_fallback(normalized: String, component_type: ComponentType) -> (String, bool) {
    if normalized.is_empty() {
        (component_type.fallback_text().to_string(), true)
    } else {
        (normalized, false)
    }
}

fn is_kept(c: char) -> bool {
    c.is_alphanumeric() || c.is_whitespace() || matches!(c, '_' | '-' | '.' | ',' | '!' | '?')
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() => first.to_uppercase().chain(chars).collect(),
        _ => text.to_string(),
    }
}
