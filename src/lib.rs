//! `json-example-loader` reads a JSON array from disk and maps every element through a
//! caller-supplied transform, returning the outputs in input order.
//!
//! The primary entrypoints are [`load`] (infallible transforms) and [`try_load`] (transforms that
//! return `Result`). Elements are surfaced as [`types::Element`] (`serde_json::Value`); the
//! transform narrows each one to the shape it expects.
//!
//! ## Quick example
//!
//! ```rust
//! use std::io::Write;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut file = tempfile::NamedTempFile::new()?;
//! write!(file, r#"[{{"a":1}},{{"a":2}}]"#)?;
//!
//! let out = json_example_loader::load(file.path(), |item| item["a"].as_i64().unwrap_or_default() + 1)?;
//! assert_eq!(out, vec![2, 3]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Failure behavior
//!
//! - Missing or unreadable file: [`LoadError::FileAccess`]
//! - Invalid JSON (including empty input and invalid UTF-8): [`LoadError::Parse`]
//! - Valid JSON whose top level is not an array: [`LoadError::NotAnArray`]
//! - A failing transform (via [`try_load`]): the transform's own error, unmodified
//!
//! No partial output is returned on any failure.
//!
//! ## Modules
//!
//! - [`loader`]: load entrypoints, options, observers and parse-only helpers
//! - [`types`]: the element model
//! - [`processing`]: in-order element mapping
//! - [`error`]: error types

pub mod error;
pub mod loader;
pub mod processing;
pub mod types;

pub use error::{LoadError, LoadResult};
pub use loader::{load, load_typed, try_load};
pub use types::{Element, ElementKind};
