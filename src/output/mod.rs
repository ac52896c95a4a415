// Output formatting — terminal display and JSON report files.

pub mod json;
pub mod terminal;

/// Truncate a string to at most `max_chars` characters, appending "..."
/// if anything was cut.
///
/// Works on character boundaries, not bytes, so multi-byte usernames and
/// error messages never panic a byte slice.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}
