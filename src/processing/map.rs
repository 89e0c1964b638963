//! Element mapping.

use crate::types::Element;

/// A transform failure together with the index of the element that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformFailure<E> {
    /// Zero-based index of the failing element.
    pub index: usize,
    /// The error returned by the transform, untouched.
    pub error: E,
}

/// Returns a new `Vec` by applying `transform` to every element, in order.
pub fn map<T, F>(elements: Vec<Element>, transform: F) -> Vec<T>
where
    F: FnMut(Element) -> T,
{
    elements.into_iter().map(transform).collect()
}

/// Fallible variant of [`map()`].
///
/// Stops at the first element whose transform fails; no later element is visited and no partial
/// output is returned.
pub fn try_map<T, E, F>(elements: Vec<Element>, mut transform: F) -> Result<Vec<T>, TransformFailure<E>>
where
    F: FnMut(Element) -> Result<T, E>,
{
    let mut out = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        match transform(element) {
            Ok(v) => out.push(v),
            Err(error) => return Err(TransformFailure { index, error }),
        }
    }
    Ok(out)
}
