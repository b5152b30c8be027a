/*
 * expander.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Expansion of a token stream into output text.
//!
//! The expander writes each token as soon as it is seen. Three pieces of
//! state carry over between tokens:
//!
//! - the pending indentation captured at the start of a line, written (or
//!   applied to a reference's first piece) by the next emission;
//! - how many pieces the last reference expanded to;
//! - whether the last piece written by a reference ended in a newline.
//!
//! The last two decide whether the template's own newline right after a
//! reference is written. It is dropped when the expansion already ended the
//! line, and when the expansion produced no pieces at all, so that an empty
//! sequence does not leave a blank line behind.

use crate::context::Lookup;
use crate::error::TemplateResult;
use crate::text::indent_lines;
use crate::token::Token;
use crate::value::Pieces;
use std::borrow::Cow;
use std::io::Write;

/// Expand `tokens` against `lookup`, writing output to `sink`.
///
/// Indentation still pending when the tokens run out is written as-is.
pub fn expand<'a, L, W>(
    tokens: impl IntoIterator<Item = Token<'a>>,
    lookup: &L,
    sink: &mut W,
) -> TemplateResult<()>
where
    L: Lookup + ?Sized,
    W: Write + ?Sized,
{
    let mut expander = Expander {
        lookup,
        sink,
        pending_indent: None,
        last_expand_count: None,
        last_expand_nl: false,
    };
    for token in tokens {
        expander.feed(token)?;
    }
    expander.finish()
}

/// Resolve one reference into the pieces to write.
///
/// Unbound names fall back to the reference's source spelling.
pub fn resolve<'v, L>(lookup: &'v L, name: &str, source: &'v str) -> Pieces<'v>
where
    L: Lookup + ?Sized,
{
    match lookup.lookup(name) {
        Some(value) => value.pieces(),
        None => {
            tracing::trace!(name, "unresolved reference, writing it unchanged");
            Pieces::One(Some(Cow::Borrowed(source)))
        }
    }
}

struct Expander<'a, 'r, L: ?Sized, W: ?Sized> {
    lookup: &'r L,
    sink: &'r mut W,
    pending_indent: Option<&'a str>,
    /// `None` until a reference is expanded, and again after any `Char`.
    last_expand_count: Option<usize>,
    last_expand_nl: bool,
}

impl<'a, L, W> Expander<'a, '_, L, W>
where
    L: Lookup + ?Sized,
    W: Write + ?Sized,
{
    fn feed(&mut self, token: Token<'a>) -> TemplateResult<()> {
        match token {
            Token::Indent { run } => {
                self.pending_indent = Some(run);
                Ok(())
            }
            Token::Char { text } => self.write_char(text),
            Token::Ref { name, source } => self.write_ref(name, source),
        }
    }

    fn write_char(&mut self, text: &str) -> TemplateResult<()> {
        if let Some(indent) = self.pending_indent.take() {
            self.write(indent)?;
        }
        let redundant_newline =
            text == "\n" && (self.last_expand_nl || self.last_expand_count == Some(0));
        if !redundant_newline {
            self.write(text)?;
        }
        self.last_expand_count = None;
        self.last_expand_nl = false;
        Ok(())
    }

    fn write_ref(&mut self, name: &str, source: &str) -> TemplateResult<()> {
        // Only the first piece is indented; the indent is gone afterwards
        // even if nothing was written.
        let mut indent = self.pending_indent.take();
        let lookup = self.lookup;
        let mut count = 0;
        for piece in resolve(lookup, name, source) {
            let piece = match indent.take() {
                Some(prefix) => Cow::Owned(indent_lines(&piece, prefix)),
                None => piece,
            };
            self.write(&piece)?;
            self.last_expand_nl = piece.ends_with('\n');
            count += 1;
        }
        self.last_expand_count = Some(count);
        Ok(())
    }

    fn finish(&mut self) -> TemplateResult<()> {
        match self.pending_indent.take() {
            Some(indent) => self.write(indent),
            None => Ok(()),
        }
    }

    fn write(&mut self, text: &str) -> TemplateResult<()> {
        self.sink.write_all(text.as_bytes())?;
        Ok(())
    }
}
