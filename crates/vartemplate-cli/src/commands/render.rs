/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Render command implementation
 */

//! Render command implementation.
//!
//! Bindings are layered: the context file first, then `--set` assignments,
//! then `--null` names, each overriding what came before.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context as _, Result};
use tracing::{debug, info};

use vartemplate::scanner::{is_ident_continue, is_ident_start};
use vartemplate::{Context, Engine, Value};

/// Arguments for the render command
#[derive(Debug)]
pub struct RenderArgs {
    /// Template file, or `-` for stdin
    pub template: String,
    /// JSON or YAML context file
    pub context: Option<String>,
    /// `KEY=VALUE` assignments
    pub set: Vec<String>,
    /// Names bound to null
    pub null: Vec<String>,
    /// Reference character
    pub varchar: String,
    /// Output file, `-` or `None` for stdout
    pub output: Option<String>,
}

/// Execute the render command
pub fn execute(args: RenderArgs) -> Result<()> {
    // Validate configuration before touching any input
    let engine = Engine::new(&args.varchar)?;
    let template = super::read_template(&args.template)?;
    let context = build_context(&args)?;
    debug!(bindings = context.len(), "Context ready");

    match args.output.as_deref() {
        Some(path) if path != "-" => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            let mut out = BufWriter::new(file);
            engine
                .render(&template, &context, &mut out)
                .with_context(|| format!("Failed to render {}", args.template))?;
            out.flush()?;
            info!(output = path, "Output written");
        }
        _ => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            engine
                .render(&template, &context, &mut out)
                .with_context(|| format!("Failed to render {}", args.template))?;
            out.flush()?;
        }
    }
    Ok(())
}

fn build_context(args: &RenderArgs) -> Result<Context> {
    let mut context = match &args.context {
        Some(path) => load_context(Path::new(path))?,
        None => Context::new(),
    };
    for assignment in &args.set {
        let (key, value) = parse_assignment(assignment)?;
        context.insert(key, value);
    }
    for key in &args.null {
        check_identifier(key)?;
        context.insert(key.as_str(), Value::Null);
    }
    Ok(context)
}

/// Load bindings from a JSON file, or a YAML file by `.yaml`/`.yml` extension.
pub fn load_context(path: &Path) -> Result<Context> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read context file: {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    );
    let document: serde_json::Value = if is_yaml {
        serde_yaml::from_str(&text)
            .with_context(|| format!("Invalid YAML in {}", path.display()))?
    } else {
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?
    };

    Context::try_from(document).with_context(|| format!("Invalid context file: {}", path.display()))
}

/// Split a `KEY=VALUE` assignment. The value may itself contain `=`.
pub fn parse_assignment(assignment: &str) -> Result<(&str, &str)> {
    let Some((key, value)) = assignment.split_once('=') else {
        anyhow::bail!("Invalid assignment (expected KEY=VALUE): {}", assignment);
    };
    check_identifier(key)?;
    Ok((key, value))
}

fn check_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = chars.next().is_some_and(is_ident_start) && chars.all(is_ident_continue);
    if !valid {
        anyhow::bail!("Invalid variable name: {:?}", name);
    }
    Ok(())
}
