/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! One-call rendering entry points.
//!
//! These build an [`Engine`] for the given reference character on every
//! call, so an invalid `varchar` is reported before any text is processed.

use crate::context::Context;
use crate::engine::Engine;
use crate::error::TemplateResult;
use std::io::Write;

/// Render `template` to a string.
///
/// Bindings in `extra` take precedence over those in `context`.
pub fn render_to_string(
    template: &str,
    context: Option<&Context>,
    varchar: &str,
    extra: Context,
) -> TemplateResult<String> {
    let engine = Engine::new(varchar)?;
    let lookup = match context {
        Some(base) => base.merged(extra),
        None => extra,
    };
    engine.render_to_string(template, &lookup)
}

/// Render `template`, writing to `sink` incrementally.
pub fn render_to_sink<W: Write + ?Sized>(
    template: &str,
    context: Option<&Context>,
    varchar: &str,
    sink: &mut W,
) -> TemplateResult<()> {
    let engine = Engine::new(varchar)?;
    let empty = Context::new();
    engine.render(template, context.unwrap_or(&empty), sink)
}

/// Render `template` to standard output.
pub fn render_to_stdout(
    template: &str,
    context: Option<&Context>,
    varchar: &str,
) -> TemplateResult<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render_to_sink(template, context, varchar, &mut out)?;
    out.flush()?;
    Ok(())
}
