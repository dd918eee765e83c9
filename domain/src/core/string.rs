//! String utilities for the domain layer.

/// Shorten text to at most `max_chars` characters for log previews.
///
/// Newlines are flattened so a preview always fits on one log line.
pub fn preview(s: &str, max_chars: usize) -> String {
    let flat = s.replace(['\n', '\r'], " ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let kept: String = flat.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}
