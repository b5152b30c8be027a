/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for template configuration and rendering.
//!
//! Unresolved and null references are not errors: they render as their
//! source spelling and as empty text respectively.

use thiserror::Error;

/// Errors that can occur during template operations.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The reference character is not exactly one character long.
    #[error("invalid varchar {varchar:?}: expected exactly one character")]
    InvalidVarchar { varchar: String },

    /// A context document was not a mapping of names to values.
    #[error("Invalid context: expected a mapping, found {found}")]
    InvalidContext { found: String },

    /// I/O error while writing to the output sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// In-memory output was not valid UTF-8.
    #[error("Rendered output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;
