//! Text normalization and match highlighting.
//!
//! `sanitize_text` is applied identically to the query and to every field
//! value, so matching is case- and whitespace-insensitive.

/// Opening markup placed before each highlighted match.
pub const HIGHLIGHT_OPEN: &str = r#"<span class="search-result">"#;

/// Closing markup placed after each highlighted match.
pub const HIGHLIGHT_CLOSE: &str = "</span>";

/// Lowercase, trim, and collapse runs of whitespace to one space.
///
/// Idempotent: `sanitize_text(&sanitize_text(s)) == sanitize_text(s)`.
#[must_use]
pub fn sanitize_text(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Wrap every occurrence of `query` in `value` with highlight markup.
///
/// Occurrences are found on the sanitized forms of both strings, so any
/// text `search_cards` matched gets highlighted, whitespace runs and case
/// included. The markup wraps the original text of `value`. A query that
/// sanitizes to nothing returns `value` unchanged.
#[must_use]
pub fn highlight_search_field(value: &str, query: &str) -> String {
    let needle: Vec<char> = sanitize_text(query).chars().collect();
    if needle.is_empty() {
        return value.to_string();
    }

    let (folded, spans) = fold_with_spans(value);
    let mut highlighted = String::with_capacity(value.len());
    let mut cursor = 0;
    let mut i = 0;

    while i + needle.len() <= folded.len() {
        if folded[i..i + needle.len()] != needle[..] {
            i += 1;
            continue;
        }
        let start = spans[i].0;
        let end = spans[i + needle.len() - 1].1;
        if start >= cursor {
            highlighted.push_str(&value[cursor..start]);
            highlighted.push_str(HIGHLIGHT_OPEN);
            highlighted.push_str(&value[start..end]);
            highlighted.push_str(HIGHLIGHT_CLOSE);
            cursor = end;
        }
        i += needle.len();
    }
    highlighted.push_str(&value[cursor..]);
    highlighted
}

/// Lowercase `value` and collapse whitespace runs to one space, keeping
/// for every output char the byte range it came from.
fn fold_with_spans(value: &str) -> (Vec<char>, Vec<(usize, usize)>) {
    let mut folded = Vec::with_capacity(value.len());
    let mut spans: Vec<(usize, usize)> = Vec::with_capacity(value.len());

    for (offset, ch) in value.char_indices() {
        let end = offset + ch.len_utf8();
        if ch.is_whitespace() {
            if folded.last() == Some(&' ') {
                if let Some(span) = spans.last_mut() {
                    span.1 = end;
                }
            } else {
                folded.push(' ');
                spans.push((offset, end));
            }
            continue;
        }
        for lower in ch.to_lowercase() {
            folded.push(lower);
            spans.push((offset, end));
        }
    }
    (folded, spans)
}
