//! Load entrypoints.
//!
//! Most callers should use [`load`] (or [`try_load`] when the transform can fail), which read a
//! JSON array from disk and map every element through a caller-supplied transform.
//!
//! - [`load_with_options`] / [`try_load_with_options`] add format selection and observer
//!   reporting via [`LoadOptions`].
//! - [`load_typed`] deserializes every element into a `serde` type instead of calling a closure.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{LoadError, LoadResult};
use crate::processing::{try_map, TransformFailure};
use crate::types::Element;

use super::json;
use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};

/// Supported input layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadFormat {
    /// A single top-level JSON array.
    #[default]
    JsonArray,
    /// Newline-delimited JSON, one element per line.
    Ndjson,
}

impl LoadFormat {
    /// Parse a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Self::JsonArray),
            "ndjson" | "jsonl" => Some(Self::Ndjson),
            _ => None,
        }
    }

    /// Infer a format from a path's extension, falling back to [`LoadFormat::JsonArray`].
    pub fn infer_from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|s| s.to_str())
            .and_then(Self::from_extension)
            .unwrap_or_default()
    }
}

/// Options controlling [`load_with_options`] and [`try_load_with_options`].
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// If `None`, infer the format from the file extension.
    pub format: Option<LoadFormat>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("format", &self.format)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            format: None,
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Read `path` as a JSON array and apply `transform` to every element, in order.
///
/// Returns one output per element. Fails with [`LoadError::FileAccess`] when the file cannot be
/// read, and with a parse error ([`LoadError::Parse`] or [`LoadError::NotAnArray`]) when the
/// content is not a JSON array.
///
/// ```no_run
/// use json_example_loader::load;
///
/// # fn main() -> Result<(), json_example_loader::LoadError> {
/// // examples.json: [{"a":1},{"a":2}]
/// let out = load("examples.json", |item| item["a"].as_i64().unwrap_or_default() + 1)?;
/// assert_eq!(out, vec![2, 3]);
/// # Ok(())
/// # }
/// ```
pub fn load<T, F>(path: impl AsRef<Path>, transform: F) -> LoadResult<Vec<T>>
where
    F: FnMut(Element) -> T,
{
    let elements = json::read_json_array_from_path(path)?;
    Ok(crate::processing::map(elements, transform))
}

/// Like [`load`], for transforms that can fail.
///
/// The first transform error is returned exactly as the transform produced it, and no partial
/// output is returned. Read/parse failures are converted into `E` through `From<LoadError>`.
///
/// ```no_run
/// use json_example_loader::{try_load, LoadError};
///
/// #[derive(Debug, thiserror::Error)]
/// enum AppError {
///     #[error(transparent)]
///     Load(#[from] LoadError),
///     #[error("element has no field 'a'")]
///     MissingA,
/// }
///
/// # fn main() -> Result<(), AppError> {
/// let out: Vec<i64> = try_load("examples.json", |item| item["a"].as_i64().ok_or(AppError::MissingA))?;
/// # Ok(())
/// # }
/// ```
pub fn try_load<T, E, F>(path: impl AsRef<Path>, transform: F) -> Result<Vec<T>, E>
where
    E: From<LoadError>,
    F: FnMut(Element) -> Result<T, E>,
{
    let elements = json::read_json_array_from_path(path)?;
    try_map(elements, transform).map_err(|failure| failure.error)
}

/// Read `path` as a JSON array and deserialize every element into `T`.
///
/// A failing element yields [`LoadError::Decode`] carrying its index.
pub fn load_typed<T>(path: impl AsRef<Path>) -> LoadResult<Vec<T>>
where
    T: DeserializeOwned,
{
    let elements = json::read_json_array_from_path(path)?;
    try_map(elements, serde_json::from_value::<T>).map_err(|TransformFailure { index, error }| {
        LoadError::Decode { index, source: error }
    })
}

/// Read and parse `path` without transforming, using the given format.
pub fn read_elements(path: impl AsRef<Path>, format: LoadFormat) -> LoadResult<Vec<Element>> {
    match format {
        LoadFormat::JsonArray => json::read_json_array_from_path(path),
        LoadFormat::Ndjson => json::read_ndjson_from_path(path),
    }
}

/// [`load`] honoring [`LoadOptions`].
pub fn load_with_options<T, F>(
    path: impl AsRef<Path>,
    mut transform: F,
    options: &LoadOptions,
) -> LoadResult<Vec<T>>
where
    F: FnMut(Element) -> T,
{
    try_load_with_options(path, |e| Ok::<T, LoadError>(transform(e)), options)
}

/// [`try_load`] honoring [`LoadOptions`].
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with element count stats
/// - `on_failure` on read/parse failure, with a computed severity
/// - `on_alert` on read/parse failure when the severity is >= `options.alert_at_or_above`
/// - `on_transform_failure` with the failing element's index when the transform fails
pub fn try_load_with_options<T, E, F>(
    path: impl AsRef<Path>,
    transform: F,
    options: &LoadOptions,
) -> Result<Vec<T>, E>
where
    E: From<LoadError>,
    F: FnMut(Element) -> Result<T, E>,
{
    let path = path.as_ref();
    let format = options
        .format
        .unwrap_or_else(|| LoadFormat::infer_from_path(path));
    let ctx = LoadContext {
        path: path.to_path_buf(),
        format,
    };

    let elements = match read_elements(path, format) {
        Ok(elements) => elements,
        Err(e) => {
            if let Some(obs) = options.observer.as_ref() {
                let sev = LoadSeverity::for_error(&e);
                obs.on_failure(&ctx, sev, &e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, &e);
                }
            }
            return Err(E::from(e));
        }
    };

    match try_map(elements, transform) {
        Ok(out) => {
            if let Some(obs) = options.observer.as_ref() {
                obs.on_success(&ctx, LoadStats { elements: out.len() });
            }
            Ok(out)
        }
        Err(TransformFailure { index, error }) => {
            debug!(path = %path.display(), index, "transform failed");
            if let Some(obs) = options.observer.as_ref() {
                obs.on_transform_failure(&ctx, index);
            }
            Err(error)
        }
    }
}

/// Convenience helper for callers that want an owned request object.
///
/// This can be useful if you want to enqueue load work in a job system.
#[derive(Clone)]
pub struct LoadRequest {
    /// Path to the input file.
    pub path: PathBuf,
    /// Options controlling the load.
    pub options: LoadOptions,
}

impl fmt::Debug for LoadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadRequest")
            .field("path", &self.path)
            .field("options", &self.options)
            .finish()
    }
}

impl LoadRequest {
    /// Create a request with default options.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            options: LoadOptions::default(),
        }
    }

    /// Execute the request by calling [`load_with_options`].
    pub fn run<T, F>(&self, transform: F) -> LoadResult<Vec<T>>
    where
        F: FnMut(Element) -> T,
    {
        load_with_options(&self.path, transform, &self.options)
    }

    /// Execute the request by calling [`try_load_with_options`].
    pub fn try_run<T, E, F>(&self, transform: F) -> Result<Vec<T>, E>
    where
        E: From<LoadError>,
        F: FnMut(Element) -> Result<T, E>,
    {
        try_load_with_options(&self.path, transform, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::LoadFormat;

    #[test]
    fn format_inference_defaults_to_json_array() {
        assert_eq!(LoadFormat::infer_from_path(Path::new("a.json")), LoadFormat::JsonArray);
        assert_eq!(LoadFormat::infer_from_path(Path::new("a.NDJSON")), LoadFormat::Ndjson);
        assert_eq!(LoadFormat::infer_from_path(Path::new("a.jsonl")), LoadFormat::Ndjson);
        assert_eq!(LoadFormat::infer_from_path(Path::new("noext")), LoadFormat::JsonArray);
        assert_eq!(LoadFormat::infer_from_path(Path::new("a.txt")), LoadFormat::JsonArray);
    }
}
