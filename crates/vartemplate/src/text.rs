/*
 * text.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Line-oriented text helpers used around expansion.
//!
//! Both helpers follow the conventions of Python's `textwrap` module, which
//! is what multi-line template literals are usually written against:
//!
//! - [`dedent`] removes the margin shared by every line that has content.
//!   Lines made only of spaces and tabs are emptied and do not count
//!   towards the margin.
//! - [`indent_lines`] prefixes every line that is not blank, splitting lines
//!   the way `str.splitlines` does.

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Longest common prefix of two margins (spaces and tabs only).
fn common_margin<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..len]
}

/// Remove the common leading whitespace from every line of `text`.
///
/// Tabs and spaces are not treated as equivalent: `"\tx\n  y"` has no
/// common margin.
pub fn dedent(text: &str) -> String {
    let mut margin: Option<&str> = None;
    for line in text.split('\n') {
        let Some(content) = line.find(|c: char| !is_blank(c)) else {
            continue;
        };
        let indent = &line[..content];
        margin = Some(match margin {
            None => indent,
            Some(m) => common_margin(m, indent),
        });
    }
    let margin = margin.unwrap_or("");

    let mut result = String::with_capacity(text.len());
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            result.push('\n');
        }
        if line.chars().all(is_blank) {
            continue;
        }
        result.push_str(line.strip_prefix(margin).unwrap_or(line));
    }
    result
}

/// Line boundaries recognised by [`indent_lines`], besides `\r\n`.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\x0b'
            | '\x0c'
            | '\x1c'
            | '\x1d'
            | '\x1e'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Split `text` into lines, each keeping its line ending.
fn lines_inclusive(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let end = match rest.find(is_line_break) {
            Some(at) => {
                let brk = rest[at..].chars().next()?;
                let mut end = at + brk.len_utf8();
                if brk == '\r' && rest[end..].starts_with('\n') {
                    end += 1;
                }
                end
            }
            None => rest.len(),
        };
        let (line, tail) = rest.split_at(end);
        rest = tail;
        Some(line)
    })
}

/// Prefix each non-blank line of `text` with `prefix`.
///
/// Lines end at `\n`, `\r\n`, a lone `\r`, or one of the other Unicode line
/// boundaries; endings are preserved. Lines containing only whitespace are
/// left untouched so indentation never introduces trailing whitespace.
pub fn indent_lines(text: &str, prefix: &str) -> String {
    let mut result = String::with_capacity(text.len() + prefix.len());
    for line in lines_inclusive(text) {
        if line.contains(|c: char| !c.is_whitespace() && !is_line_break(c)) {
            result.push_str(prefix);
        }
        result.push_str(line);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dedent_common_margin() {
        assert_eq!(dedent("    a\n      b\n    c"), "a\n  b\nc");
    }

    #[test]
    fn test_dedent_no_margin() {
        assert_eq!(dedent("a\n  b"), "a\n  b");
    }

    #[test]
    fn test_dedent_blank_lines_ignored_and_emptied() {
        assert_eq!(dedent("  a\n \n\n  b\n"), "a\n\n\nb\n");
    }

    #[test]
    fn test_dedent_first_line_empty() {
        assert_eq!(dedent("\n    x\n    y\n"), "\nx\ny\n");
    }

    #[test]
    fn test_dedent_mixed_tabs_and_spaces() {
        assert_eq!(dedent("\tx\n  y"), "\tx\n  y");
        assert_eq!(dedent("\t x\n\t y"), "x\ny");
        assert_eq!(dedent("\t  x\n\t y"), " x\ny");
    }

    #[test]
    fn test_dedent_whitespace_only_text() {
        assert_eq!(dedent("  \n\t"), "\n");
    }

    #[test]
    fn test_indent_lines() {
        assert_eq!(indent_lines("x\ny", "  "), "  x\n  y");
        assert_eq!(indent_lines("x\ny\n", "> "), "> x\n> y\n");
    }

    #[test]
    fn test_indent_lines_skips_blank_lines() {
        assert_eq!(indent_lines("x\n\n \ny", "  "), "  x\n\n \n  y");
    }

    #[test]
    fn test_indent_lines_carriage_returns() {
        assert_eq!(indent_lines("p\rq", "  "), "  p\r  q");
        assert_eq!(indent_lines("a\r\nb\r\n", "  "), "  a\r\n  b\r\n");
        assert_eq!(indent_lines("a\r\n\r\nb", "  "), "  a\r\n\r\n  b");
    }

    #[test]
    fn test_indent_lines_unicode_line_boundaries() {
        assert_eq!(indent_lines("a\u{2028}b\x0cc", "> "), "> a\u{2028}> b\x0c> c");
        assert_eq!(indent_lines("a\n\x1c\nb", "> "), "> a\n\x1c\n> b");
    }

    #[test]
    fn test_indent_lines_empty() {
        assert_eq!(indent_lines("", "  "), "");
    }
}
