//! In-memory element transformations.
//!
//! The processing layer operates on the [`crate::types::Element`]s produced by the loader.
//!
//! - [`map()`]: infallible element mapping
//! - [`try_map()`]: fallible element mapping that reports the failing index
//!
//! ```rust
//! use json_example_loader::processing::{map, try_map};
//! use serde_json::json;
//!
//! let elements = vec![json!({"a": 1}), json!({"a": 2})];
//! let out = map(elements.clone(), |e| e["a"].as_i64().unwrap_or_default() + 1);
//! assert_eq!(out, vec![2, 3]);
//!
//! let failed = try_map(elements, |e| e["b"].as_i64().ok_or("missing b")).unwrap_err();
//! assert_eq!(failed.index, 0);
//! ```

pub mod map;

pub use map::{map, try_map, TransformFailure};
