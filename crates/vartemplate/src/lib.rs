/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Indentation-aware variable substitution for text templates.
//!
//! Templates are plain text with references introduced by a configurable
//! character (`&` by default):
//!
//! - Bare references: `&name`
//! - Braced references: `&{name}`, for when the following text could
//!   extend the identifier
//! - Leading indentation: whitespace at the start of a line is applied to
//!   every line of the next reference's expansion
//! - Passthrough: references to unbound names are written unchanged, and a
//!   reference character that does not start a reference is literal text
//!
//! Values can be scalars, sequences (written piece by piece), or thunks
//! computed when the reference is reached. Multi-line templates are dedented
//! before rendering, so they can be written with natural source indentation.
//!
//! # Architecture
//!
//! Rendering is two single-pass stages:
//!
//! 1. The [`scanner`] turns text into a lazy stream of [`Token`]s.
//! 2. The [`expander`] resolves each reference against a [`Lookup`] and
//!    writes to an [`std::io::Write`] sink as tokens arrive.
//!
//! # Example
//!
//! ```
//! use vartemplate::{Context, Engine};
//!
//! let ctx = Context::new()
//!     .with("name", "World")
//!     .with("items", "- a\n- b");
//!
//! let engine = Engine::default();
//! let output = engine.render_to_string("Hello, &name!\n  &items\n", &ctx)?;
//! assert_eq!(output, "Hello, World!\n  - a\n  - b\n");
//! # Ok::<(), vartemplate::TemplateError>(())
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod expander;
pub mod render;
pub mod scanner;
pub mod text;
pub mod token;
pub mod value;

// Re-export main types at crate root
pub use context::{Context, Lookup};
pub use engine::{DEFAULT_VARCHAR, Engine};
pub use error::{TemplateError, TemplateResult};
pub use render::{render_to_sink, render_to_stdout, render_to_string};
pub use scanner::{Tokens, tokenize};
pub use text::{dedent, indent_lines};
pub use token::Token;
pub use value::{Pieces, Sequence, Thunk, Value};
