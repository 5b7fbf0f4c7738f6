//! Quoted-token splitting for list-valued settings

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// A settings value before normalization: either free text from a settings
/// file or a list that is already split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    String(String),
    List(Vec<String>),
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::String(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::String(value)
    }
}

impl From<Vec<String>> for RawValue {
    fn from(value: Vec<String>) -> Self {
        RawValue::List(value)
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::String(text) => f.write_str(text),
            RawValue::List(items) => f.write_str(&join_tokens(items)),
        }
    }
}

/// A quoted group, or failing that, a run of non-whitespace characters
fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r#"['"]([^'"]+)['"]|\S+"#).expect("valid token regex"))
}

/// One match of the token regex, before key-value tightening
struct Piece {
    text: String,
    quoted: bool,
}

/// Normalize a settings value into an ordered list of tokens.
///
/// Lists pass through untouched, except `[""]` which becomes `[]`. Text is
/// split into quoted groups and whitespace-separated runs; `key = value`
/// pairs are tightened to `key=value`. Never fails: unbalanced quotes are
/// kept as ordinary characters of the run they sit in.
pub fn normalize(value: RawValue) -> Vec<String> {
    match value {
        RawValue::List(items) => {
            if items.len() == 1 && items[0].is_empty() {
                Vec::new()
            } else {
                items
            }
        }
        RawValue::String(text) => split_tokens(&text),
    }
}

/// Split free text into normalized tokens
pub fn split_tokens(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let pieces = token_regex().captures_iter(text).map(|caps| match caps.get(1) {
        Some(group) => Piece {
            text: group.as_str().trim().to_string(),
            quoted: true,
        },
        None => Piece {
            text: caps.get(0).map_or("", |m| m.as_str()).to_string(),
            quoted: false,
        },
    });

    join_separated_runs(pieces)
        .iter()
        .map(|piece| normalize_pair(&piece.text))
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Glue `key`, `=`, `value` runs back together when the `=` stood apart.
///
/// Only unquoted runs are joined; a quoted group is always its own token and
/// keeps its inner spacing.
fn join_separated_runs(pieces: impl Iterator<Item = Piece>) -> Vec<Piece> {
    let mut joined: Vec<Piece> = Vec::new();
    for piece in pieces {
        if !piece.quoted {
            if let Some(last) = joined.last_mut() {
                if !last.quoted && (last.text.ends_with('=') || piece.text.starts_with('=')) {
                    last.text.push_str(&piece.text);
                    continue;
                }
            }
        }
        joined.push(piece);
    }
    joined
}

/// Tighten a `key = rest` token; only the first `=` separates.
fn normalize_pair(entry: &str) -> String {
    match entry.split_once('=') {
        Some((key, rest)) => {
            let (key, rest) = (key.trim(), rest.trim());
            if rest.is_empty() {
                key.to_string()
            } else {
                format!("{}={}", key, rest)
            }
        }
        None => entry.trim().to_string(),
    }
}

/// Join tokens back into a single settings line, quoting any token that
/// contains whitespace.
fn join_tokens(tokens: &[String]) -> String {
    tokens
        .iter()
        .map(|token| {
            if token.chars().any(char::is_whitespace) {
                format!("\"{}\"", token)
            } else {
                token.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
