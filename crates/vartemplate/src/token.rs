/*
 * token.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Tokens produced by the scanner.
//!
//! Every token borrows from the template text it was scanned from: literal
//! fallbacks such as `&{name` are always contiguous runs of the source.

use serde::Serialize;

/// One scanned unit of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Token<'a> {
    /// Literal text to emit as-is.
    ///
    /// Usually a single character, but also the literal spelling of a
    /// reference that did not complete (`&`, `&{`, `&{name`).
    Char { text: &'a str },

    /// Run of spaces and tabs captured at the start of a line.
    ///
    /// Not emitted directly: the expander holds it until the next emission.
    Indent { run: &'a str },

    /// A variable reference, bare (`&name`) or braced (`&{name}`).
    Ref {
        /// The identifier.
        name: &'a str,
        /// The original spelling, used when the name is unresolved.
        source: &'a str,
    },
}

impl<'a> Token<'a> {
    /// The token's textual value: the literal text, the indentation run, or
    /// the reference's source spelling.
    pub fn value(&self) -> &'a str {
        match self {
            Token::Char { text } => text,
            Token::Indent { run } => run,
            Token::Ref { source, .. } => source,
        }
    }

    /// The identifier of a `Ref` token.
    pub fn name(&self) -> Option<&'a str> {
        match self {
            Token::Ref { name, .. } => Some(name),
            _ => None,
        }
    }
}
