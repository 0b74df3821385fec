//! Emphasis rendering — wraps selected tokens in bold markers.

use regex::{Captures, Regex, RegexBuilder};

/// Markdown bold marker placed on both sides of a highlighted token.
pub const DEFAULT_MARKER: &str = "**";

/// Tokens longer than this (in bytes) skip regex compilation and use
/// [`replace_word_bounded`] instead.
const MAX_PATTERN_TOKEN_LEN: usize = 1024;

/// Highlight `tokens` in `text` with the default `**` marker.
pub fn highlight_tokens<S: AsRef<str>>(text: &str, tokens: &[S]) -> String {
    highlight_with_marker(text, tokens, DEFAULT_MARKER)
}

/// Wrap every case-insensitive, word-bounded occurrence of each token in `marker`.
///
/// Tokens are applied longest first (ties keep input order) and each one
/// rescans the text produced by the previous ones, so markers already
/// inserted can sit next to a later match. Matched text keeps its casing.
/// Empty tokens are ignored.
pub fn highlight_with_marker<S: AsRef<str>>(text: &str, tokens: &[S], marker: &str) -> String {
    let mut ordered: Vec<&str> = tokens
        .iter()
        .map(AsRef::as_ref)
        .filter(|t| !t.is_empty())
        .collect();
    ordered.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

    let mut highlighted = text.to_string();
    for token in ordered {
        highlighted = match token_pattern(token) {
            Some(re) => re
                .replace_all(&highlighted, |caps: &Captures| {
                    format!("{marker}{}{marker}", &caps[0])
                })
                .into_owned(),
            None => replace_word_bounded(&highlighted, token, marker),
        };
    }
    highlighted
}

fn token_pattern(token: &str) -> Option<Regex> {
    if token.len() > MAX_PATTERN_TOKEN_LEN {
        return None;
    }
    let pattern = format!(r"\b{}\b", regex::escape(token));
    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(err) => {
            tracing::debug!(token, error = %err, "token pattern not compiled, scanning instead");
            None
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Regex-free equivalent of the `(?i)\b<token>\b` substitution.
///
/// Case is compared on lowercase expansions; a word boundary holds where
/// the word-ness of the neighbouring characters differs.
pub fn replace_word_bounded(text: &str, token: &str, marker: &str) -> String {
    let needle: Vec<char> = token.chars().flat_map(char::to_lowercase).collect();
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let (Some(first), Some(last)) = (token.chars().next(), token.chars().last()) else {
        return text.to_string();
    };

    let mut out = String::with_capacity(text.len() + 2 * marker.len());
    let mut copied = 0;
    let mut i = 0;
    while i < chars.len() {
        let prev_word = i > 0 && is_word_char(chars[i - 1].1);
        if prev_word == is_word_char(first) {
            i += 1;
            continue;
        }
        match match_len(&chars[i..], &needle) {
            Some(len) => {
                let end = i + len;
                let next_word = chars.get(end).is_some_and(|&(_, c)| is_word_char(c));
                if next_word == is_word_char(last) {
                    i += 1;
                    continue;
                }
                let start_byte = chars[i].0;
                let end_byte = chars.get(end).map_or(text.len(), |&(b, _)| b);
                out.push_str(&text[copied..start_byte]);
                out.push_str(marker);
                out.push_str(&text[start_byte..end_byte]);
                out.push_str(marker);
                copied = end_byte;
                i = end;
            }
            None => i += 1,
        }
    }
    out.push_str(&text[copied..]);
    out
}

/// Number of chars at the head of `chars` whose lowercase form spells `needle`.
fn match_len(chars: &[(usize, char)], needle: &[char]) -> Option<usize> {
    let mut pos = 0;
    for (taken, &(_, c)) in chars.iter().enumerate() {
        if pos == needle.len() {
            return Some(taken);
        }
        for lower in c.to_lowercase() {
            if needle.get(pos) != Some(&lower) {
                return None;
            }
            pos += 1;
        }
    }
    (pos == needle.len()).then_some(chars.len())
}
