//! Line-oriented `key=value` parser for settings dotfiles
//!
//! Supported format:
//! - Assignments: `key=value`, `key = value`, `key: value` or `key value`
//! - Comments: lines starting with `#` or `!`
//! - Continuations: a line ending in a single `\` joins the next line
//! - Escapes: `\t`, `\n`, `\r`, `\f`, `\uXXXX`, and `\` before any other char

use thiserror::Error;

/// Errors produced while parsing a properties document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertiesError {
    #[error("invalid unicode escape on line {line}: {detail}")]
    InvalidEscape { line: usize, detail: String },
}

/// Parse a properties document into key/value pairs in file order.
/// Duplicate keys are kept; callers apply "later wins".
pub fn parse(text: &str) -> Result<Vec<(String, String)>, PropertiesError> {
    let mut pairs = Vec::new();
    let mut lines = text.lines().enumerate();

    while let Some((index, line)) = lines.next() {
        let start_line = index + 1;
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = String::from(trimmed);
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start()),
                None => break,
            }
        }

        let (key, value) = split_assignment(&logical);
        pairs.push((unescape(key, start_line)?, unescape(value, start_line)?));
    }

    Ok(pairs)
}

/// True when the line ends in an odd number of backslashes
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Split a logical line at the first unescaped separator.
/// Returns the raw (still escaped) key and value.
fn split_assignment(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                break;
            }
            c if c.is_whitespace() => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start();
    // Whitespace may be followed by a real separator: `key = value`
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start();
    }

    (key, rest.trim_end())
}

fn unescape(raw: &str, line: usize) -> Result<String, PropertiesError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = (hex.len() == 4)
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .and_then(char::from_u32)
                    .ok_or_else(|| PropertiesError::InvalidEscape {
                        line,
                        detail: format!("\\u{}", hex),
                    })?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn test_separators() {
        let parsed = parse("a=1\nb = 2\nc: 3\nd 4\n").unwrap();
        assert_eq!(
            parsed,
            vec![pair("a", "1"), pair("b", "2"), pair("c", "3"), pair("d", "4")]
        );
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let parsed = parse("# comment\n\n! also comment\n  key=value  \n").unwrap();
        assert_eq!(parsed, vec![pair("key", "value")]);
    }

    #[test]
    fn test_value_keeps_later_separators() {
        let parsed = parse("url = http://host:8080/a=b").unwrap();
        assert_eq!(parsed, vec![pair("url", "http://host:8080/a=b")]);
    }

    #[test]
    fn test_key_without_value() {
        let parsed = parse("lonely\n").unwrap();
        assert_eq!(parsed, vec![pair("lonely", "")]);
    }

    #[test]
    fn test_quoted_values_are_kept_verbatim() {
        let parsed = parse("keywords = \"a b\" c\n").unwrap();
        assert_eq!(parsed, vec![pair("keywords", "\"a b\" c")]);
    }

    #[test]
    fn test_line_continuation() {
        let parsed = parse("list = one \\\n    two \\\n    three\nnext=1").unwrap();
        assert_eq!(parsed, vec![pair("list", "one two three"), pair("next", "1")]);
    }

    #[test]
    fn test_escaped_backslash_is_not_continuation() {
        let parsed = parse("path = C:\\\\\nnext=1").unwrap();
        assert_eq!(parsed, vec![pair("path", "C:\\"), pair("next", "1")]);
    }

    #[test]
    fn test_escapes() {
        let parsed = parse("my\\ key = tab\\there \\u00e9").unwrap();
        assert_eq!(parsed, vec![pair("my key", "tab\there é")]);
    }

    #[test]
    fn test_invalid_unicode_escape() {
        let err = parse("ok=1\nbad = \\u12G4").unwrap_err();
        assert_eq!(
            err,
            PropertiesError::InvalidEscape {
                line: 2,
                detail: "\\u12G4".to_string()
            }
        );
    }

    #[test]
    fn test_duplicates_kept_in_order() {
        let parsed = parse("a=1\na=2").unwrap();
        assert_eq!(parsed, vec![pair("a", "1"), pair("a", "2")]);
    }
}
