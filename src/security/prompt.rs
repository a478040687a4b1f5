//! Prompt-injection mitigation.
//!
//! Runs in addition to per-title validation, immediately before text is
//! interpolated into a language-model prompt. This stage degrades input
//! rather than rejecting it: the per-field gate has already run, so the
//! output here is always a string, never an error.

use crate::security::validate::is_allowed_char;

/// Instruction-override phrases stripped from text bound for a model
/// prompt. Matched case-insensitively; only the matched span is removed
/// so a title that merely brushes against one of these survives with
/// the dangerous span gone.
const OVERRIDE_PHRASES: &[&str] = &[
    "ignore all previous instructions",
    "ignore previous instructions",
    "disregard previous instructions",
    "disregard the above",
    "new instructions:",
    "you are now",
    "system:",
    "assistant:",
    "forget everything",
];

/// Remove instruction-override spans, repeatedly until none remain.
/// Each removed span is replaced by a single space so the two halves of
/// the remaining text cannot fuse into a new match.
pub fn scrub_overrides(text: &str) -> String {
    let mut out = text.to_string();
    loop {
        // Phrases are pure ASCII, so an ASCII-lowercased shadow keeps
        // byte offsets aligned with `out`.
        let lowered: String = out.chars().map(|c| c.to_ascii_lowercase()).collect();
        let hit = OVERRIDE_PHRASES
            .iter()
            .find_map(|phrase| lowered.find(phrase).map(|pos| (pos, phrase.len())));
        match hit {
            Some((pos, len)) => out.replace_range(pos..pos + len, " "),
            None => break,
        }
    }
    out
}

/// Sanitize one piece of text for prompt interpolation: flatten line
/// breaks, strip override phrases, drop characters outside the title
/// allow-list, and collapse whitespace runs.
pub fn sanitize_one(text: &str) -> String {
    let flattened: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    let scrubbed = scrub_overrides(&flattened);
    let filtered: String = scrubbed.chars().filter(|c| is_allowed_char(*c)).collect();
    collapse_whitespace(&filtered)
}

/// Sanitize a list of titles and join them for prompt interpolation,
/// bounding the combined length. The cap is the token-flood defense and
/// is independent of the per-title length cap enforced at validation.
pub fn sanitize_for_prompt(titles: &[String], max_total_chars: usize) -> String {
    let cleaned: Vec<String> = titles
        .iter()
        .map(|t| sanitize_one(t))
        .filter(|t| !t.is_empty())
        .collect();
    truncate_chars(&cleaned.join(", "), max_total_chars)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect()
    }
}
