//! Surgical reader and writer for one string-array key in a `.navgator.toml`.
//!
//! The file is hand-edited and may hold comments, unrelated keys and tables
//! this module does not understand. Instead of parsing the whole document and
//! re-serialising it, the writer finds the line range occupied by the key's
//! array and splices a single replacement line in its place. Every line
//! outside that range is emitted exactly as it was read.
//!
//! Comment stripping is lexical: everything from the first `#` on a line is
//! ignored, even inside quotes.

use std::ops::Range;

use crate::parser::quoted;

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// Half-open line range `[start, end)` holding one key's assignment, from the
/// `key =` line through the line with the closing `]`.
///
/// `closed` is false for an array whose `]` never appears; the range then
/// covers the key line alone while the reader keeps collecting to EOF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyLocation {
    pub start: usize,
    pub end: usize,
    pub closed: bool,
}

impl KeyLocation {
    pub fn lines(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Find the line range of `key`'s array in `contents`.
///
/// Returns `None` when no uncommented `key = ...` line exists.
pub fn locate(contents: &str, key: &str) -> Option<KeyLocation> {
    let lines: Vec<&str> = contents.lines().collect();
    locate_lines(&lines, key)
}

fn locate_lines(lines: &[&str], key: &str) -> Option<KeyLocation> {
    let (start, value) = lines
        .iter()
        .enumerate()
        .find_map(|(idx, raw)| assignment_value(strip_comment(raw), key).map(|v| (idx, v)))?;

    if closes_on_key_line(value) {
        return Some(KeyLocation {
            start,
            end: start + 1,
            closed: true,
        });
    }

    // An array that never closes only claims its key line.
    let closing = lines[start + 1..]
        .iter()
        .position(|raw| strip_comment(raw).contains(']'))
        .map(|offset| start + 1 + offset);

    Some(KeyLocation {
        start,
        end: closing.unwrap_or(start) + 1,
        closed: closing.is_some(),
    })
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Read the tags currently stored under `key`.
///
/// Missing keys, empty arrays and malformed arrays all read as a (possibly
/// partial) list; this never fails.
pub fn read_tags(contents: &str, key: &str) -> Vec<String> {
    let mut fragments: Vec<&str> = Vec::new();
    let mut in_array = false;

    for line in contents.lines() {
        let cleaned = strip_comment(line).trim();
        if cleaned.is_empty() {
            continue;
        }

        if in_array {
            fragments.push(cleaned);
            if cleaned.contains(']') {
                break;
            }
            continue;
        }

        let Some(value) = assignment_value(cleaned, key) else {
            continue;
        };
        let value = value.trim();
        fragments.push(value);
        if closes_on_key_line(value) {
            break;
        }
        in_array = true;
    }

    if fragments.is_empty() {
        return Vec::new();
    }
    quoted::extract(&fragments.join(" "))
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Return `contents` with `key`'s array replaced by `tags`.
///
/// The located line range collapses to one `key = [...]` line. When the key
/// is absent the line is appended after the existing content. The result
/// always ends with a newline and uses `\n` line endings.
pub fn write_tags(contents: &str, key: &str, tags: &[String]) -> String {
    let line = format_line(key, tags);
    if contents.trim().is_empty() {
        return format!("{line}\n");
    }

    let lines: Vec<&str> = contents.lines().collect();
    let Some(location) = locate_lines(&lines, key) else {
        let mut out = contents.trim_end().to_string();
        out.push('\n');
        out.push_str(&line);
        out.push('\n');
        return out;
    };

    let mut spliced: Vec<&str> = Vec::with_capacity(lines.len() + 1);
    spliced.extend_from_slice(&lines[..location.start]);
    spliced.push(&line);
    spliced.extend_from_slice(&lines[location.end..]);

    let mut out = spliced.join("\n");
    out.push('\n');
    out
}

/// Format the single-line assignment `key = ["a", "b"]`.
pub fn format_line(key: &str, tags: &[String]) -> String {
    let items = tags
        .iter()
        .map(|tag| format_tag(tag))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{key} = [{items}]")
}

fn format_tag(tag: &str) -> String {
    format!("\"{}\"", tag.replace('"', "\\\""))
}

// ---------------------------------------------------------------------------
// Line helpers
// ---------------------------------------------------------------------------

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(hash) => &line[..hash],
        None => line,
    }
}

/// The right-hand side of `line` when its left-hand side is exactly `key`.
fn assignment_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let eq = line.find('=')?;
    if line[..eq].trim() == key {
        Some(&line[eq + 1..])
    } else {
        None
    }
}

/// A value with no `[` is a plain scalar and ends on its own line.
fn closes_on_key_line(value: &str) -> bool {
    value.contains(']') || !value.contains('[')
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
