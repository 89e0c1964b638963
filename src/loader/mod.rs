//! Load entrypoints and implementations.
//!
//! Most callers should use [`load`] / [`try_load`] (from [`unified`]), which:
//!
//! - read the whole file and parse it as a JSON array
//! - apply a caller-supplied transform to every element, in order
//! - optionally report success/failure/alerts to a [`LoadObserver`]
//!
//! Parse-only helpers live under [`json`].

pub mod json;
pub mod observability;
pub mod unified;

pub use observability::{
    CompositeObserver, FileObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats, TracingObserver,
};
pub use unified::{
    load, load_typed, load_with_options, read_elements, try_load, try_load_with_options, LoadFormat,
    LoadOptions, LoadRequest,
};
