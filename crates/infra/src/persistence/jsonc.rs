// crates/infra/src/persistence/jsonc.rs
//! Permissive JSON: `//` and `/* */` comments and trailing commas.
//!
//! Comments and trailing commas are blanked out with spaces rather than
//! removed, so line and column numbers reported by `serde_json` still point
//! into the original text.

use std::path::Path;

use comment_blocks_ports::json::JsonSource;
use comment_blocks_shared_kernel::{InfraResult, InfrastructureError, JsonIssue, Result};
use serde_json::Value;
use tracing::debug;

use super::FileReader;

/// Reads configuration files from disk as JSONC.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsoncReader;

impl JsonSource for JsoncReader {
    fn read_json(&self, path: &Path) -> Result<Value> {
        let content = FileReader::read_to_string(path)?;
        debug!(path = %path.display(), bytes = content.len(), "reading json");
        Ok(parse_jsonc(path, &content)?)
    }
}

/// Parse `content`, reporting every problem found as a [`JsonIssue`] on `path`.
///
/// A blank document parses to an empty object.
pub fn parse_jsonc(path: &Path, content: &str) -> InfraResult<Value> {
    let (cleaned, mut issues) = blank_comments(content);
    let cleaned = blank_trailing_commas(&cleaned);

    if cleaned.trim().is_empty() && issues.is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }

    match serde_json::from_str::<Value>(&cleaned) {
        Ok(value) if issues.is_empty() => return Ok(value),
        Ok(_) => {}
        Err(err) => {
            let text = err.to_string();
            let message = text.split(" at line ").next().unwrap_or(&text).to_string();
            issues.push((err.line(), err.column(), message));
        }
    }

    Err(InfrastructureError::MalformedJson {
        issues: issues
            .into_iter()
            .map(|(line, column, message)| JsonIssue { path: path.to_path_buf(), line, column, message })
            .collect(),
    })
}

/// Replace or add the top-level member `key` of `content`, leaving comments
/// and layout elsewhere untouched. `None` when `content` holds no object to
/// edit.
pub fn set_member(content: &str, key: &str, value: &Value) -> Option<String> {
    let (cleaned, issues) = blank_comments(content);
    if !issues.is_empty() {
        return None;
    }
    let bytes = cleaned.as_bytes();
    let open = skip_ws(bytes, 0)?;
    if bytes[open] != b'{' {
        return None;
    }
    let quoted = serde_json::to_string(key).ok()?;
    let rendered = serde_json::to_string(value).ok()?;

    let mut at = skip_ws(bytes, open + 1)?;
    let mut last_end = None;
    loop {
        match bytes[at] {
            b'}' => break,
            b',' => at = skip_ws(bytes, at + 1)?,
            b'"' => {
                let key_end = string_end(bytes, at)?;
                let colon = skip_ws(bytes, key_end + 1)?;
                if bytes[colon] != b':' {
                    return None;
                }
                let start = skip_ws(bytes, colon + 1)?;
                let end = value_end(bytes, start)?;
                if cleaned[at..=key_end] == quoted {
                    return Some(format!("{}{rendered}{}", &content[..start], &content[end..]));
                }
                last_end = Some(end);
                at = skip_ws(bytes, end)?;
            }
            _ => return None,
        }
    }

    let member = format!("\n\t{quoted}: {rendered}");
    let (insert_at, text) = match last_end {
        None => (open + 1, format!("{member}\n")),
        Some(end) => match skip_ws(bytes, end) {
            Some(comma) if bytes[comma] == b',' => (comma + 1, member),
            _ => (end, format!(",{member}")),
        },
    };
    Some(format!("{}{text}{}", &content[..insert_at], &content[insert_at..]))
}

fn skip_ws(bytes: &[u8], from: usize) -> Option<usize> {
    (from..bytes.len()).find(|&i| !bytes[i].is_ascii_whitespace())
}

/// Index of the quote closing the string that opens at `start`.
fn string_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut at = start + 1;
    while at < bytes.len() {
        match bytes[at] {
            b'\\' => at += 1,
            b'"' => return Some(at),
            _ => {}
        }
        at += 1;
    }
    None
}

/// End of the value starting at `start`, trailing whitespace excluded.
fn value_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut at = start;
    while at < bytes.len() {
        match bytes[at] {
            b'"' => at = string_end(bytes, at)?,
            b'{' | b'[' => depth += 1,
            b'}' | b']' | b',' if depth == 0 => {
                let mut end = at;
                while end > start && bytes[end - 1].is_ascii_whitespace() {
                    end -= 1;
                }
                return Some(end);
            }
            b'}' | b']' => depth -= 1,
            _ => {}
        }
        at += 1;
    }
    None
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scan {
    Code,
    Str { escaped: bool },
    LineComment,
    BlockComment,
}

fn blank(out: &mut String, ch: char) {
    if ch == '\n' || ch == '\r' {
        out.push(ch);
    } else {
        out.extend(std::iter::repeat_n(' ', ch.len_utf8()));
    }
}

fn blank_comments(content: &str) -> (String, Vec<(usize, usize, String)>) {
    let mut out = String::with_capacity(content.len());
    let mut issues = Vec::new();
    let mut state = Scan::Code;
    let (mut line, mut column) = (1usize, 0usize);
    let mut block_start = (0usize, 0usize);
    let mut chars = content.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\n' {
            line += 1;
            column = 0;
        } else {
            column += ch.len_utf8();
        }

        match state {
            Scan::Code => match (ch, chars.peek()) {
                ('"', _) => {
                    state = Scan::Str { escaped: false };
                    out.push(ch);
                }
                ('/', Some('/')) => {
                    state = Scan::LineComment;
                    blank(&mut out, ch);
                }
                ('/', Some('*')) => {
                    state = Scan::BlockComment;
                    block_start = (line, column);
                    blank(&mut out, ch);
                    chars.next();
                    column += 1;
                    out.push(' ');
                }
                _ => out.push(ch),
            },
            Scan::Str { escaped } => {
                out.push(ch);
                state = match ch {
                    '\\' if !escaped => Scan::Str { escaped: true },
                    '"' if !escaped => Scan::Code,
                    _ => Scan::Str { escaped: false },
                };
            }
            Scan::LineComment => {
                if ch == '\n' {
                    state = Scan::Code;
                }
                blank(&mut out, ch);
            }
            Scan::BlockComment => {
                blank(&mut out, ch);
                if ch == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    column += 1;
                    out.push(' ');
                    state = Scan::Code;
                }
            }
        }
    }

    if state == Scan::BlockComment {
        issues.push((block_start.0, block_start.1, "unterminated block comment".to_string()));
    }
    (out, issues)
}

fn blank_trailing_commas(content: &str) -> String {
    let mut out: Vec<char> = content.chars().collect();
    let mut in_string = false;
    let mut escaped = false;

    for i in 0..out.len() {
        let ch = out[i];
        if in_string {
            match ch {
                '\\' if !escaped => escaped = true,
                '"' if !escaped => in_string = false,
                _ => escaped = false,
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            ',' => {
                let next = out[i + 1..].iter().find(|c| !c.is_whitespace());
                if matches!(next, Some('}' | ']')) {
                    out[i] = ' ';
                }
            }
            _ => {}
        }
    }
    out.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> InfraResult<Value> {
        parse_jsonc(Path::new("lang.json"), content)
    }

    #[test]
    fn comments_and_trailing_commas_are_tolerated() {
        let value = parse(
            r#"{
                // line comment
                "comments": { "lineComment": "//", /* inline */ },
                "brackets": [["{", "}"],],
                "url": "http://example.com/*not a comment*/",
            }"#,
        )
        .expect("parses");
        assert_eq!(value["comments"]["lineComment"], "//");
        assert_eq!(value["url"], "http://example.com/*not a comment*/");
        assert_eq!(value["brackets"][0][1], "}");
    }

    #[test]
    fn escaped_quotes_keep_string_state() {
        let value = parse(r#"{"a": "say \"hi\" // not a comment", "b": 1,}"#).expect("parses");
        assert_eq!(value["a"], "say \"hi\" // not a comment");
        assert_eq!(value["b"], 1);
    }

    #[test]
    fn blank_document_is_an_empty_object() {
        assert_eq!(parse("  // nothing\n").expect("parses"), serde_json::json!({}));
    }

    #[test]
    fn error_position_points_into_original_text() {
        let err = parse("{\n  // note\n  \"a\": 1\n  \"b\": 2\n}").expect_err("missing comma");
        let InfrastructureError::MalformedJson { issues } = err else { panic!("unexpected error") };
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, 4);
        assert_eq!(issues[0].path, Path::new("lang.json"));
        assert!(!issues[0].message.contains(" at line "));
    }

    #[test]
    fn unterminated_block_comment_is_reported_with_parse_error() {
        let err = parse("{\"a\": 1 /* open").expect_err("unterminated");
        let InfrastructureError::MalformedJson { issues } = err else { panic!("unexpected error") };
        assert_eq!(issues[0].message, "unterminated block comment");
        assert_eq!(issues[0].line, 1);
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn set_member_replaces_in_place_keeping_comments() {
        let content = "{\n\t// host settings\n\t\"a\": /* old */ 1, // trailing\n\t\"b\": [1, {\"c\": 2}]\n}\n";
        let edited = set_member(content, "a", &serde_json::json!([3])).expect("edits");
        assert_eq!(edited, "{\n\t// host settings\n\t\"a\": /* old */ [3], // trailing\n\t\"b\": [1, {\"c\": 2}]\n}\n");

        let edited = set_member(content, "b", &Value::Bool(false)).expect("edits");
        assert!(edited.contains("\"b\": false\n}"));
        assert_eq!(parse(&edited).expect("parses")["a"], 1);
    }

    #[test]
    fn set_member_appends_new_keys() {
        let added = set_member("{\n\t// keep\n\t\"a\": 1\n}", "b", &Value::Bool(true)).expect("edits");
        assert_eq!(added, "{\n\t// keep\n\t\"a\": 1,\n\t\"b\": true\n}");

        let after_comma = set_member("{\"a\": 1,}", "b", &Value::Bool(true)).expect("edits");
        assert_eq!(after_comma, "{\"a\": 1,\n\t\"b\": true}");

        let empty = set_member("{}", "b", &Value::Bool(true)).expect("edits");
        assert_eq!(parse(&empty).expect("parses"), serde_json::json!({"b": true}));
    }

    #[test]
    fn set_member_needs_an_object() {
        assert!(set_member("", "a", &Value::Null).is_none());
        assert!(set_member("[1]", "a", &Value::Null).is_none());
        assert!(set_member("{\"a\": 1 /* open", "a", &Value::Null).is_none());
    }
}
