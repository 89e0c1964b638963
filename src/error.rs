use std::path::PathBuf;

use thiserror::Error;

use crate::types::ElementKind;

/// Convenience result type for load operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Error type returned by the read and parse stages of a load.
///
/// Transform failures are not represented here: the fallible `try_*` entrypoints return the
/// caller's own error type unmodified.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input file could not be opened or read (missing, permission denied, ...).
    #[error("file access error ({}): {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input is not valid JSON (also covers empty input and invalid UTF-8).
    #[error("json parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The input is valid JSON but the top-level value is not an array.
    #[error("json parse error: expected a top-level array, found {found}")]
    NotAnArray { found: ElementKind },

    /// A line of NDJSON input is not valid JSON.
    #[error("json parse error: invalid ndjson at line {line}: {source}")]
    NdjsonLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// An element could not be deserialized into the requested type.
    #[error("failed to decode element {index}: {source}")]
    Decode {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// True for failures to open or read the input file.
    pub fn is_file_access(&self) -> bool {
        matches!(self, Self::FileAccess { .. })
    }

    /// True for failures to interpret the file content as a JSON array.
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            Self::Parse(_) | Self::NotAnArray { .. } | Self::NdjsonLine { .. }
        )
    }
}

