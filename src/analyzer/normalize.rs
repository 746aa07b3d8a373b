//! Canonicalization of captured workflow/workstep text.

/// Characters stripped from the start of a captured span.
const LEADING_WRAPPERS: &[char] = &['\'', '"', '`', '[', '('];

/// Characters stripped from the end of a captured span.
const TRAILING_WRAPPERS: &[char] = &['\'', '"', '`', ']', ')'];

/// Normalize a raw captured span into an aggregation key component.
///
/// Strips leading quote/bracket wrappers and trailing quote/bracket wrappers
/// together with surrounding whitespace, then collapses every internal
/// whitespace run to a single space. Returns an empty string when nothing
/// remains.
///
/// ```
/// use workflow_log_analyzer::analyzer::normalize_text;
///
/// assert_eq!(normalize_text("  ['Order   Intake']  "), "Order Intake");
/// assert_eq!(normalize_text("\"\""), "");
/// ```
pub fn normalize_text(raw: &str) -> String {
    let stripped = raw
        .trim_start_matches(|c: char| c.is_whitespace() || LEADING_WRAPPERS.contains(&c))
        .trim_end_matches(|c: char| c.is_whitespace() || TRAILING_WRAPPERS.contains(&c));

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
