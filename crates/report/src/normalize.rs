//! Provider key normalization.
//!
//! Summary extracts and report templates spell the same provider
//! differently: stray case, padded whitespace, non-breaking spaces pasted
//! from email, zero-width spaces from PDF copies, embedded line breaks from
//! wrapped cells. Matching happens on a normalized key so none of that
//! counts as a difference.

use rollfwd_grid::CellValue;

/// Normalize a raw provider string into its lookup key.
///
/// Character substitutions run first (NBSP to space, zero-width space and CR
/// dropped, LF to space), then the result is trimmed and lowercased. Running
/// substitutions before the trim makes the function idempotent: a trailing
/// zero-width space can no longer decay into a trailing blank that a second
/// pass would remove.
pub fn normalize_provider_name(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\u{00A0}' => cleaned.push(' '),
            '\u{200B}' | '\r' => {}
            '\n' => cleaned.push(' '),
            _ => cleaned.push(ch),
        }
    }
    cleaned.trim().to_lowercase()
}

/// Lookup key for a provider cell. Only text cells key; numbers, booleans
/// and error values yield the empty key, which never matches and never
/// loads. A computed provider cell keys by its cached text.
pub fn provider_key(value: &CellValue) -> String {
    match value {
        CellValue::Text(s) => normalize_provider_name(s),
        _ => String::new(),
    }
}

// ---------------------------------------------------------------------------
