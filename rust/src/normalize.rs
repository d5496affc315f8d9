//! Task name canonicalization.
//!
//! Names are the join key between a task and the dependency lists that refer
//! to it, so every name goes through [`normalize_name`] before any lookup.

/// Canonicalize a task name for comparison.
///
/// Trims surrounding whitespace, collapses internal whitespace runs to a
/// single space and replaces every `=` with `-` (`"A=Foundation"` becomes
/// `"A-Foundation"`). Whitespace touching an `=` is dropped, so
/// `"A = Foundation"` canonicalizes to the same key.
pub fn normalize_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;
    let mut after_equals = false;

    for c in raw.chars() {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if c == '=' {
            pending_space = false;
            after_equals = true;
            out.push('-');
            continue;
        }
        if pending_space && !after_equals {
            out.push(' ');
        }
        pending_space = false;
        after_equals = false;
        out.push(c);
    }
    out
}
