//! Tokens command implementation.
//!
//! Dumps the scanner's output for a template, which is mostly useful when
//! working out why a reference did or did not expand.

use std::io::Write;

use anyhow::Result;
use vartemplate::{Engine, Token, dedent};

/// Arguments for the tokens command
#[derive(Debug)]
pub struct TokensArgs {
    /// Template file, or `-` for stdin
    pub template: String,
    /// Reference character
    pub varchar: String,
    /// Skip dedenting
    pub raw: bool,
}

/// Execute the tokens command
pub fn execute(args: TokensArgs) -> Result<()> {
    let engine = Engine::new(&args.varchar)?;
    let template = super::read_template(&args.template)?;
    let text = scan_text(&template, args.raw);
    let tokens: Vec<Token<'_>> = engine.tokenize(&text).collect();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &tokens)?;
    writeln!(out)?;
    Ok(())
}

/// The text the engine would scan when rendering `template`.
fn scan_text(template: &str, raw: bool) -> String {
    if !raw && template.contains('\n') {
        dedent(template)
    } else {
        template.to_string()
    }
}
