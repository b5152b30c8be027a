/*
 * engine.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The configured template engine.

use crate::context::Lookup;
use crate::error::{TemplateError, TemplateResult};
use crate::expander::expand;
use crate::scanner::{Tokens, tokenize};
use crate::text::dedent;
use std::io::Write;

/// Reference character used when none is configured.
pub const DEFAULT_VARCHAR: char = '&';

/// A template engine bound to one reference character.
///
/// The engine holds no state between renders; it can be reused freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Engine {
    varchar: char,
}

impl Default for Engine {
    fn default() -> Self {
        Engine {
            varchar: DEFAULT_VARCHAR,
        }
    }
}

impl Engine {
    /// Create an engine for the given reference character.
    ///
    /// Fails unless `varchar` is exactly one character.
    pub fn new(varchar: &str) -> TemplateResult<Self> {
        let mut chars = varchar.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Engine { varchar: c }),
            _ => Err(TemplateError::InvalidVarchar {
                varchar: varchar.to_string(),
            }),
        }
    }

    pub fn with_varchar(varchar: char) -> Self {
        Engine { varchar }
    }

    pub fn varchar(&self) -> char {
        self.varchar
    }

    /// Scan `text` into tokens. No dedenting is applied.
    pub fn tokenize<'a>(&self, text: &'a str) -> Tokens<'a> {
        tokenize(text, self.varchar)
    }

    /// Render `template` against `lookup`, writing to `sink` as it goes.
    ///
    /// Multi-line templates are dedented first.
    pub fn render<L, W>(&self, template: &str, lookup: &L, sink: &mut W) -> TemplateResult<()>
    where
        L: Lookup + ?Sized,
        W: Write + ?Sized,
    {
        let multiline = template.contains('\n');
        tracing::debug!(
            varchar = %self.varchar,
            len = template.len(),
            multiline,
            "Rendering template"
        );
        if multiline {
            let text = dedent(template);
            expand(self.tokenize(&text), lookup, sink)
        } else {
            expand(self.tokenize(template), lookup, sink)
        }
    }

    /// Render `template` against `lookup` into a string.
    pub fn render_to_string<L>(&self, template: &str, lookup: &L) -> TemplateResult<String>
    where
        L: Lookup + ?Sized,
    {
        let mut buf = Vec::with_capacity(template.len());
        self.render(template, lookup, &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_varchar() {
        assert_eq!(Engine::default().varchar(), '&');
        assert_eq!(Engine::new("&").unwrap(), Engine::default());
    }

    #[test]
    fn test_invalid_varchar_rejected() {
        for bad in ["", "&&", "ab"] {
            let err = Engine::new(bad).unwrap_err();
            assert!(matches!(err, TemplateError::InvalidVarchar { .. }));
        }
        assert_eq!(
            Engine::new("##").unwrap_err().to_string(),
            "invalid varchar \"##\": expected exactly one character"
        );
    }

    #[test]
    fn test_multibyte_varchar_accepted() {
        assert_eq!(Engine::new("§").unwrap().varchar(), '§');
    }

    #[test]
    fn test_render_dedents_multiline() {
        let ctx = Context::new().with("v", "x");
        let engine = Engine::default();
        let out = engine
            .render_to_string("\n    a &v\n      b\n", &ctx)
            .unwrap();
        assert_eq!(out, "\na x\n  b\n");
    }

    #[test]
    fn test_single_line_not_dedented() {
        let engine = Engine::default();
        assert_eq!(
            engine.render_to_string("   x", &Context::new()).unwrap(),
            "   x"
        );
    }

    #[test]
    fn test_with_varchar() {
        assert_eq!(Engine::with_varchar('#'), Engine::new("#").unwrap());
        assert_eq!(Engine::with_varchar('{').varchar(), '{');
    }

    #[test]
    fn test_custom_varchar() {
        let ctx = Context::new().with("v", "hello");
        let engine = Engine::new("#").unwrap();
        assert_eq!(
            engine.render_to_string("#v #{v} &v", &ctx).unwrap(),
            "hello hello &v"
        );
    }
}
