//! Command implementations for the vartemplate CLI
//!
//! Each command module handles the CLI interface and delegates to the
//! vartemplate library for the actual work.

pub mod render;
pub mod tokens;

use anyhow::{Context, Result};
use std::io::Read;

/// Read a template from a file, or from stdin when `path` is `-`.
pub fn read_template(path: &str) -> Result<String> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read template from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read template: {}", path))
}
