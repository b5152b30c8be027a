/*
 * scanner.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Character-level scanner for template text.
//!
//! The scanner is a six-state machine driven one character at a time. Some
//! transitions do not consume their character: they switch state and run the
//! same character again in the new state ([`Step::Retry`]). The column
//! counter only moves when a character is pulled from the input, so a retried
//! character keeps its column.
//!
//! Tokens are produced lazily by the [`Tokens`] iterator, which is single
//! pass and cannot be restarted.

use crate::token::Token;
use std::iter::FusedIterator;
use std::str::CharIndices;

/// Scan `text` for references introduced by `varchar`.
pub fn tokenize(text: &str, varchar: char) -> Tokens<'_> {
    Tokens {
        text,
        chars: text.char_indices(),
        varchar,
        state: ScanState::Default,
        column: 0,
        retry: None,
        finished: false,
    }
}

/// First character of an identifier.
pub fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Subsequent characters of an identifier.
pub fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_indent(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Scanner state. `start` is the byte offset where the pending token began.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Outside any reference.
    Default,
    /// Just saw the varchar.
    Varchar { start: usize },
    /// Accumulating a bare identifier.
    Bare { start: usize },
    /// Just saw `varchar{`.
    BraceOpen { start: usize },
    /// Accumulating a braced identifier.
    Braced { start: usize },
    /// Accumulating leading indentation.
    Indent { start: usize },
}

/// What to do with the current character after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Move on to the next input character.
    Consume,
    /// Run the same character again in the new state.
    Retry,
}

type Transition<'a> = (Option<Token<'a>>, Step);

/// Lazy token stream over a template.
#[derive(Debug)]
pub struct Tokens<'a> {
    text: &'a str,
    chars: CharIndices<'a>,
    varchar: char,
    state: ScanState,
    /// Column of the last character pulled from input; 0 right after `\n`.
    column: usize,
    /// Character to run again before pulling new input.
    retry: Option<(usize, char)>,
    finished: bool,
}

impl<'a> Tokens<'a> {
    fn pull(&mut self) -> Option<(usize, char)> {
        if let Some(pending) = self.retry.take() {
            return Some(pending);
        }
        let (pos, c) = self.chars.next()?;
        if c == '\n' {
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some((pos, c))
    }

    fn transition(&mut self, pos: usize, c: char) -> Transition<'a> {
        match self.state {
            ScanState::Default => self.on_default(pos, c),
            ScanState::Varchar { start } => self.on_varchar(start, pos, c),
            ScanState::Bare { start } => self.on_bare(start, pos, c),
            ScanState::BraceOpen { start } => self.on_brace_open(start, pos, c),
            ScanState::Braced { start } => self.on_braced(start, pos, c),
            ScanState::Indent { start } => self.on_indent(start, pos, c),
        }
    }

    fn on_default(&mut self, pos: usize, c: char) -> Transition<'a> {
        if c == self.varchar {
            self.state = ScanState::Varchar { start: pos };
            (None, Step::Consume)
        } else if self.column == 1 && is_indent(c) {
            self.state = ScanState::Indent { start: pos };
            (None, Step::Consume)
        } else {
            let text = &self.text[pos..pos + c.len_utf8()];
            (Some(Token::Char { text }), Step::Consume)
        }
    }

    fn on_varchar(&mut self, start: usize, pos: usize, c: char) -> Transition<'a> {
        if c == '{' {
            self.state = ScanState::BraceOpen { start };
            (None, Step::Consume)
        } else if is_ident_start(c) {
            self.state = ScanState::Bare { start };
            (None, Step::Consume)
        } else {
            self.state = ScanState::Default;
            let text = &self.text[start..pos];
            (Some(Token::Char { text }), Step::Retry)
        }
    }

    fn on_bare(&mut self, start: usize, pos: usize, c: char) -> Transition<'a> {
        if is_ident_continue(c) {
            return (None, Step::Consume);
        }
        self.state = ScanState::Default;
        (Some(self.bare_ref(start, pos)), Step::Retry)
    }

    fn on_brace_open(&mut self, start: usize, pos: usize, c: char) -> Transition<'a> {
        if is_ident_start(c) {
            self.state = ScanState::Braced { start };
            (None, Step::Consume)
        } else {
            self.state = ScanState::Default;
            let text = &self.text[start..pos];
            (Some(Token::Char { text }), Step::Retry)
        }
    }

    fn on_braced(&mut self, start: usize, pos: usize, c: char) -> Transition<'a> {
        if c == '}' {
            self.state = ScanState::Default;
            let name = &self.text[self.braced_name_start(start)..pos];
            let source = &self.text[start..pos + 1];
            (Some(Token::Ref { name, source }), Step::Consume)
        } else if is_ident_continue(c) {
            (None, Step::Consume)
        } else {
            // Unclosed brace: the offending character is swallowed.
            self.state = ScanState::Default;
            let text = &self.text[start..pos];
            (Some(Token::Char { text }), Step::Consume)
        }
    }

    fn on_indent(&mut self, start: usize, pos: usize, c: char) -> Transition<'a> {
        if is_indent(c) {
            return (None, Step::Consume);
        }
        self.state = ScanState::Default;
        let run = &self.text[start..pos];
        (Some(Token::Indent { run }), Step::Retry)
    }

    fn bare_ref(&self, start: usize, end: usize) -> Token<'a> {
        let name_start = start + self.varchar.len_utf8();
        Token::Ref {
            name: &self.text[name_start..end],
            source: &self.text[start..end],
        }
    }

    fn braced_name_start(&self, start: usize) -> usize {
        start + self.varchar.len_utf8() + '{'.len_utf8()
    }

    /// Flush whatever the state machine holds once input is exhausted.
    fn finish(&mut self) -> Option<Token<'a>> {
        if self.finished {
            return None;
        }
        self.finished = true;
        let end = self.text.len();
        let state = std::mem::replace(&mut self.state, ScanState::Default);
        match state {
            ScanState::Default => None,
            ScanState::Varchar { start }
            | ScanState::BraceOpen { start }
            | ScanState::Braced { start } => Some(Token::Char {
                text: &self.text[start..end],
            }),
            ScanState::Bare { start } => Some(self.bare_ref(start, end)),
            ScanState::Indent { start } => Some(Token::Indent {
                run: &self.text[start..end],
            }),
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            let Some((pos, c)) = self.pull() else {
                return self.finish();
            };
            let (token, step) = self.transition(pos, c);
            if step == Step::Retry {
                self.retry = Some((pos, c));
            }
            if token.is_some() {
                return token;
            }
        }
    }
}

impl FusedIterator for Tokens<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scan(text: &str) -> Vec<Token<'_>> {
        tokenize(text, '&').collect()
    }

    fn chr(text: &str) -> Token<'_> {
        Token::Char { text }
    }

    fn indent(run: &str) -> Token<'_> {
        Token::Indent { run }
    }

    fn reference<'a>(name: &'a str, source: &'a str) -> Token<'a> {
        Token::Ref { name, source }
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(scan("ab"), vec![chr("a"), chr("b")]);
        assert_eq!(scan(""), vec![]);
    }

    #[test]
    fn test_bare_reference() {
        assert_eq!(
            scan("a &name b"),
            vec![
                chr("a"),
                chr(" "),
                reference("name", "&name"),
                chr(" "),
                chr("b"),
            ]
        );
    }

    #[test]
    fn test_bare_reference_stops_at_non_identifier() {
        assert_eq!(
            scan("&v1_x-y"),
            vec![reference("v1_x", "&v1_x"), chr("-"), chr("y")]
        );
    }

    #[test]
    fn test_braced_reference() {
        assert_eq!(
            scan("&{v}s"),
            vec![reference("v", "&{v}"), chr("s")]
        );
        assert_eq!(scan("&{_a9}"), vec![reference("_a9", "&{_a9}")]);
    }

    #[test]
    fn test_adjacent_references() {
        assert_eq!(
            scan("&a&{b}&c"),
            vec![
                reference("a", "&a"),
                reference("b", "&{b}"),
                reference("c", "&c"),
            ]
        );
    }

    #[test]
    fn test_varchar_not_followed_by_identifier() {
        assert_eq!(scan("& x"), vec![chr("&"), chr(" "), chr("x")]);
        assert_eq!(scan("&1"), vec![chr("&"), chr("1")]);
        assert_eq!(scan("&&v"), vec![chr("&"), reference("v", "&v")]);
    }

    #[test]
    fn test_brace_not_followed_by_identifier() {
        assert_eq!(scan("&{1}"), vec![chr("&{"), chr("1"), chr("}")]);
        assert_eq!(scan("&{}"), vec![chr("&{"), chr("}")]);
    }

    #[test]
    fn test_unclosed_brace_drops_offending_character() {
        assert_eq!(scan("&{ab c"), vec![chr("&{ab"), chr("c")]);
        assert_eq!(scan("&{ab\nx"), vec![chr("&{ab"), chr("x")]);
    }

    #[test]
    fn test_end_of_input_flush() {
        assert_eq!(scan("x&"), vec![chr("x"), chr("&")]);
        assert_eq!(scan("&{"), vec![chr("&{")]);
        assert_eq!(scan("&{ab"), vec![chr("&{ab")]);
        assert_eq!(scan("&ab"), vec![reference("ab", "&ab")]);
        assert_eq!(scan("  "), vec![indent("  ")]);
    }

    #[test]
    fn test_leading_indentation() {
        assert_eq!(
            scan(" \t&v\n  x"),
            vec![
                indent(" \t"),
                reference("v", "&v"),
                chr("\n"),
                indent("  "),
                chr("x"),
            ]
        );
    }

    #[test]
    fn test_indentation_only_at_line_start() {
        assert_eq!(scan("a  b"), vec![chr("a"), chr(" "), chr(" "), chr("b")]);
    }

    #[test]
    fn test_retried_character_keeps_column() {
        // The tab after `&` is retried at column 2, so it is not indentation.
        assert_eq!(scan("&\tx"), vec![chr("&"), chr("\t"), chr("x")]);
    }

    #[test]
    fn test_reference_ending_line() {
        assert_eq!(
            scan("&v\n x"),
            vec![reference("v", "&v"), chr("\n"), indent(" "), chr("x")]
        );
    }

    #[test]
    fn test_custom_varchar() {
        let tokens: Vec<_> = tokenize("#v #{v} &v", '#').collect();
        assert_eq!(
            tokens,
            vec![
                reference("v", "#v"),
                chr(" "),
                reference("v", "#{v}"),
                chr(" "),
                chr("&"),
                chr("v"),
            ]
        );
    }

    #[test]
    fn test_multibyte_varchar_and_text() {
        let tokens: Vec<_> = tokenize("é§name §{x}", '§').collect();
        assert_eq!(
            tokens,
            vec![
                chr("é"),
                reference("name", "§name"),
                chr(" "),
                reference("x", "§{x}"),
            ]
        );
    }

    #[test]
    fn test_stream_is_fused() {
        let mut tokens = tokenize("&a", '&');
        assert_eq!(tokens.next(), Some(reference("a", "&a")));
        assert_eq!(tokens.next(), None);
        assert_eq!(tokens.next(), None);
    }
}
