//! Reading and parsing of loader input.
//!
//! Supported inputs:
//! - A JSON array of any values: `[{"a":1}, 2, "three", null]`
//! - Newline-delimited JSON (NDJSON): `{"a":1}\n{"a":2}\n`
//!
//! These functions stop at [`Element`]s; applying transforms is the job of
//! [`super::unified`].

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{LoadError, LoadResult};
use crate::types::{Element, ElementKind};

/// Read a file and parse it as a top-level JSON array.
///
/// The file handle is opened and closed inside this call.
pub fn read_json_array_from_path(path: impl AsRef<Path>) -> LoadResult<Vec<Element>> {
    let path = path.as_ref();
    let bytes = read_bytes(path)?;
    let elements = parse_elements_from_slice(&bytes)?;
    debug!(path = %path.display(), elements = elements.len(), "parsed json array");
    Ok(elements)
}

/// Read a file and parse it as NDJSON, one element per non-blank line.
pub fn read_ndjson_from_path(path: impl AsRef<Path>) -> LoadResult<Vec<Element>> {
    let path = path.as_ref();
    let bytes = read_bytes(path)?;
    let elements = parse_ndjson_from_slice(&bytes)?;
    debug!(path = %path.display(), elements = elements.len(), "parsed ndjson");
    Ok(elements)
}

/// Parse an in-memory string as a top-level JSON array.
pub fn parse_elements_from_str(input: &str) -> LoadResult<Vec<Element>> {
    parse_elements_from_slice(input.as_bytes())
}

/// Parse in-memory bytes as a top-level JSON array.
///
/// Invalid UTF-8, empty input and malformed JSON are [`LoadError::Parse`]; valid JSON whose top
/// level is anything but an array is [`LoadError::NotAnArray`]. Nesting depth is not limited and
/// numbers keep their exact textual value, including integers outside the 64-bit range.
pub fn parse_elements_from_slice(input: &[u8]) -> LoadResult<Vec<Element>> {
    match parse_value(input)? {
        Element::Array(items) => Ok(items),
        other => Err(LoadError::NotAnArray {
            found: ElementKind::of(&other),
        }),
    }
}

/// Parse in-memory bytes as NDJSON. Blank lines are skipped.
pub fn parse_ndjson_from_slice(input: &[u8]) -> LoadResult<Vec<Element>> {
    let mut out = Vec::new();
    for (i, line) in input.split(|b| *b == b'\n').enumerate() {
        let line = line.trim_ascii();
        if line.is_empty() {
            continue;
        }
        let v = parse_value(line).map_err(|source| LoadError::NdjsonLine { line: i + 1, source })?;
        out.push(v);
    }
    Ok(out)
}

/// Parse one JSON value with the recursion limit lifted; deep input grows the stack on the heap.
fn parse_value(input: &[u8]) -> Result<Element, serde_json::Error> {
    let mut de = serde_json::Deserializer::from_slice(input);
    de.disable_recursion_limit();
    let value = Element::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

fn read_bytes(path: &Path) -> LoadResult<Vec<u8>> {
    fs::read(path).map_err(|source| LoadError::FileAccess {
        path: path.to_path_buf(),
        source,
    })
}
