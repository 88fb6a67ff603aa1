//! Suggestion support for an interactive input box: find the `#tag` or
//! `@client` being typed at the cursor and splice a chosen suggestion in.
//!
//! Cursor positions are counted in chars, not bytes.

use once_cell::sync::Lazy;
use regex::Regex;

/// How many suggestions an input box shows at once.
pub const SUGGESTION_LIMIT: usize = 6;

static TRAILING_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#([A-Za-z0-9_\x{00C0}-\x{017F}]*)$").unwrap());

static TRAILING_CLIENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@([A-Za-z0-9_\x{00C0}-\x{017F}]*)$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    Tag,
    Client,
}

impl SuggestionKind {
    pub fn sigil(self) -> char {
        match self {
            SuggestionKind::Tag => '#',
            SuggestionKind::Client => '@',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutocompleteQuery {
    pub kind: SuggestionKind,
    /// What has been typed after the sigil so far, possibly empty.
    pub prefix: String,
    /// Char index of the sigil.
    pub start: usize,
}

/// Looks for a tag (first) or client token ending right at `cursor`.
pub fn detect_autocomplete(text: &str, cursor: usize) -> Option<AutocompleteQuery> {
    let before = &text[..byte_offset(text, cursor)];
    [
        (SuggestionKind::Tag, &*TRAILING_TAG),
        (SuggestionKind::Client, &*TRAILING_CLIENT),
    ]
    .into_iter()
    .find_map(|(kind, regex)| {
        let caps = regex.captures(before)?;
        let sigil = caps.get(0)?;
        Some(AutocompleteQuery {
            kind,
            prefix: caps[1].to_string(),
            start: before[..sigil.start()].chars().count(),
        })
    })
}

/// Candidates containing `prefix` (case-insensitive), in their original
/// order, at most `limit` of them.
pub fn filter_suggestions<'a, S: AsRef<str>>(
    candidates: &'a [S],
    prefix: &str,
    limit: usize,
) -> Vec<&'a str> {
    let needle = prefix.to_lowercase();
    candidates
        .iter()
        .map(AsRef::as_ref)
        .filter(|c| c.to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}

/// Replaces the token between the last sigil before `cursor` and `cursor`
/// with `sigil + suggestion + " "`. Returns the new text and the cursor
/// position just after the inserted space.
pub fn insert_suggestion(
    text: &str,
    cursor: usize,
    kind: SuggestionKind,
    suggestion: &str,
) -> (String, usize) {
    let split = byte_offset(text, cursor);
    let (before, after) = text.split_at(split);
    let Some(sigil_at) = before.rfind(kind.sigil()) else {
        return (text.to_string(), cursor);
    };
    let head = &before[..sigil_at];
    let new_text = format!(
        "{head}{}{suggestion} {}",
        kind.sigil(),
        after.trim_start()
    );
    let new_cursor = head.chars().count() + 1 + suggestion.chars().count() + 1;
    (new_text, new_cursor)
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_trailing_tag() {
        let q = detect_autocomplete("Call #wo", 8).unwrap();
        assert_eq!(q.kind, SuggestionKind::Tag);
        assert_eq!(q.prefix, "wo");
        assert_eq!(q.start, 5);
    }

    #[test]
    fn detects_bare_sigil() {
        let q = detect_autocomplete("Call @", 6).unwrap();
        assert_eq!(q.kind, SuggestionKind::Client);
        assert_eq!(q.prefix, "");
    }

    #[test]
    fn only_text_before_cursor_counts() {
        let q = detect_autocomplete("Call #work done", 7).unwrap();
        assert_eq!(q.prefix, "w");
        assert!(detect_autocomplete("Call #work done", 15).is_none());
    }

    #[test]
    fn cursor_counts_chars() {
        let text = "Účet @Šk";
        let q = detect_autocomplete(text, text.chars().count()).unwrap();
        assert_eq!(q.kind, SuggestionKind::Client);
        assert_eq!(q.prefix, "Šk");
        assert_eq!(q.start, 5);
    }

    #[test]
    fn cursor_past_end_is_clamped() {
        let q = detect_autocomplete("#ab", 100).unwrap();
        assert_eq!(q.prefix, "ab");
    }

    #[test]
    fn filter_is_case_insensitive_and_limited() {
        let tags = ["Work", "homework", "play", "networking", "w1", "w2", "w3", "w4"];
        assert_eq!(
            filter_suggestions(&tags, "WORK", SUGGESTION_LIMIT),
            vec!["Work", "homework", "networking"]
        );
        assert_eq!(filter_suggestions(&tags, "w", SUGGESTION_LIMIT).len(), 6);
        assert_eq!(filter_suggestions(&tags, "", 2), vec!["Work", "homework"]);
    }

    #[test]
    fn inserts_suggestion_and_moves_cursor() {
        let (text, cursor) = insert_suggestion("Call #wo", 8, SuggestionKind::Tag, "work");
        assert_eq!(text, "Call #work ");
        assert_eq!(cursor, 11);
    }

    #[test]
    fn insert_keeps_text_after_cursor() {
        let (text, cursor) =
            insert_suggestion("Call @ac   tomorrow", 8, SuggestionKind::Client, "acme");
        assert_eq!(text, "Call @acme tomorrow");
        assert_eq!(cursor, 11);
    }

    #[test]
    fn insert_without_sigil_is_a_no_op() {
        let (text, cursor) = insert_suggestion("Call", 4, SuggestionKind::Tag, "work");
        assert_eq!(text, "Call");
        assert_eq!(cursor, 4);
    }
}
