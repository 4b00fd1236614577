//! Segmented-path access over `replica-value` trees.
//!
//! This crate is the path collaborator of the replication builder: reading
//! (`get`/`get_mut`), writing with intermediate-container creation (`set`),
//! and deleting (`remove`) at a path given as an explicit list of steps.
//!
//! Write semantics follow the usual path-assignment rules for dynamic
//! trees: missing intermediates are created (an array when the next step
//! looks like an index, an object otherwise), scalar intermediates are
//! displaced by a fresh container, and array assignments pad with `Null` up
//! to the target index. Frozen containers reject every mutation with
//! [`PathError::Frozen`].
//!
//! # Example
//!
//! ```
//! use replica_path::{get, set};
//! use replica_value::Value;
//! use serde_json::json;
//!
//! let mut doc = Value::from(json!({"a": {}}));
//! set(&mut doc, &["a".to_string(), "b".to_string()], Value::from(42))?;
//! assert_eq!(
//!     get(&doc, &["a".to_string(), "b".to_string()]),
//!     Some(&Value::from(42))
//! );
//! # Ok::<(), replica_path::PathError>(())
//! ```

use replica_value::{Array, Object, Value};
use thiserror::Error;

pub mod types;
pub use types::{Path, PathStep};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("cannot mutate frozen container while writing `{path}`")]
    Frozen { path: String },
    #[error("`{step}` is not a valid array index")]
    InvalidIndex { step: String },
    #[error("cannot remove the root value")]
    RootRemoval,
}

/// Render a path for diagnostics and error messages.
///
/// Steps are dot-joined, which is ambiguous for keys that themselves contain
/// a dot; the rendering is only ever used in human-facing text, never parsed
/// back. The empty (root) path renders as `<root>`.
///
/// # Example
///
/// ```
/// use replica_path::format_path;
///
/// assert_eq!(format_path(&[]), "<root>");
/// assert_eq!(format_path(&["a".to_string(), "0".to_string()]), "a.0");
/// ```
pub fn format_path(path: &[PathStep]) -> String {
    if path.is_empty() {
        return "<root>".to_string();
    }
    path.join(".")
}

/// Check if a string represents a valid non-negative array index.
///
/// # Example
///
/// ```
/// use replica_path::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("1.5"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index(""));
/// ```
pub fn is_valid_index(step: &str) -> bool {
    if step.is_empty() {
        return false;
    }
    let bytes = step.as_bytes();
    // Leading zero only allowed for "0" itself
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|b| b.is_ascii_digit())
}

/// Get a reference to the value at `path`.
///
/// Returns `None` when the path addresses nothing: a missing key, an
/// out-of-range or non-numeric array step, `"-"`, or a step into a scalar.
/// The empty path addresses the root.
pub fn get<'a>(value: &'a Value, path: &[PathStep]) -> Option<&'a Value> {
    let mut current = value;
    for step in path {
        match current {
            Value::Array(arr) => {
                // "-" addresses the end of the array; nothing lives there yet
                if step == "-" {
                    return None;
                }
                let index: usize = step.parse().ok()?;
                current = arr.get(index)?;
            }
            Value::Object(obj) => {
                current = obj.get(step)?;
            }
            _ => return None,
        }
    }
    Some(current)
}

/// Get a mutable reference to the value at `path`.
///
/// Same addressing rules as [`get`]. Mutable descent is allowed through
/// frozen containers; the latch only governs container-level writes.
pub fn get_mut<'a>(value: &'a mut Value, path: &[PathStep]) -> Option<&'a mut Value> {
    let mut current = value;
    for step in path {
        match current {
            Value::Array(arr) => {
                if step == "-" {
                    return None;
                }
                let index: usize = step.parse().ok()?;
                current = arr.get_mut(index)?;
            }
            Value::Object(obj) => {
                current = obj.get_mut(step)?;
            }
            _ => return None,
        }
    }
    Some(current)
}

/// Assign `value` at `path`, creating missing intermediate containers.
///
/// Returns the displaced value, if the path previously addressed one. The
/// empty path replaces the root wholesale. A scalar root is left untouched
/// (`Ok(None)`): it has no properties to assign through. Deeper scalar
/// intermediates are displaced by a fresh container chosen by the next
/// step - an array when the step is a valid index or `"-"`, an object
/// otherwise.
///
/// # Errors
///
/// - [`PathError::Frozen`] when any container that would be mutated is
///   frozen.
/// - [`PathError::InvalidIndex`] when a non-index step addresses an array.
pub fn set(root: &mut Value, path: &[PathStep], value: Value) -> Result<Option<Value>, PathError> {
    let (leaf, parent_steps) = match path.split_last() {
        Some(split) => split,
        None => {
            let old = std::mem::replace(root, value);
            return Ok(Some(old));
        }
    };
    if !root.is_container() {
        return Ok(None);
    }

    let mut current = root;
    for (depth, step) in parent_steps.iter().enumerate() {
        current = descend_or_create(current, step, &path[depth + 1], path)?;
    }

    match current {
        Value::Object(obj) => obj
            .insert(leaf.clone(), value)
            .map_err(|_| frozen_error(path)),
        Value::Array(arr) => {
            let index = parse_index(leaf, arr.len())?;
            arr.set(index, value).map_err(|_| frozen_error(path))
        }
        _ => Ok(None),
    }
}

/// Delete the entry addressed by `path`, returning the removed value.
///
/// Deleting is quiet where assignment is eager: an absent parent, a scalar
/// parent, a bad index, or a missing key is `Ok(None)` rather than an
/// error. Removing from a frozen parent is [`PathError::Frozen`]; the root
/// itself cannot be removed.
pub fn remove(root: &mut Value, path: &[PathStep]) -> Result<Option<Value>, PathError> {
    let (leaf, parent_steps) = match path.split_last() {
        Some(split) => split,
        None => return Err(PathError::RootRemoval),
    };
    let parent = match get_mut(root, parent_steps) {
        Some(parent) => parent,
        None => return Ok(None),
    };
    match parent {
        Value::Object(obj) => {
            if !obj.contains_key(leaf) {
                return Ok(None);
            }
            obj.remove(leaf).map_err(|_| frozen_error(path))
        }
        Value::Array(arr) => {
            if leaf == "-" || !is_valid_index(leaf) {
                return Ok(None);
            }
            let index: usize = match leaf.parse() {
                Ok(index) => index,
                Err(_) => return Ok(None),
            };
            if index >= arr.len() {
                return Ok(None);
            }
            arr.remove(index).map_err(|_| frozen_error(path))
        }
        _ => Ok(None),
    }
}

/// Step from `current` into `step`, ensuring the slot holds a container.
///
/// The replacement container kind is chosen by `next`, the step that will be
/// resolved against it.
fn descend_or_create<'a>(
    current: &'a mut Value,
    step: &str,
    next: &str,
    full_path: &[PathStep],
) -> Result<&'a mut Value, PathError> {
    let fresh = || {
        if next == "-" || is_valid_index(next) {
            Value::Array(Array::new())
        } else {
            Value::Object(Object::new())
        }
    };
    match current {
        Value::Object(obj) => {
            if !matches!(obj.get(step), Some(v) if v.is_container()) {
                obj.insert(step, fresh())
                    .map_err(|_| frozen_error(full_path))?;
            }
            obj.get_or_insert_with(step, Value::default)
                .map_err(|_| frozen_error(full_path))
        }
        Value::Array(arr) => {
            let index = parse_index(step, arr.len())?;
            if !matches!(arr.get(index), Some(v) if v.is_container()) {
                arr.set(index, fresh())
                    .map_err(|_| frozen_error(full_path))?;
            }
            arr.get_or_insert_with(index, Value::default)
                .map_err(|_| frozen_error(full_path))
        }
        // The walk only ever steps into slots this function has just
        // ensured are containers, and `set` rejects scalar roots.
        other => Ok(other),
    }
}

fn parse_index(step: &str, len: usize) -> Result<usize, PathError> {
    if step == "-" {
        return Ok(len);
    }
    if !is_valid_index(step) {
        return Err(PathError::InvalidIndex {
            step: step.to_string(),
        });
    }
    step.parse().map_err(|_| PathError::InvalidIndex {
        step: step.to_string(),
    })
}

fn frozen_error(path: &[PathStep]) -> PathError {
    PathError::Frozen {
        path: format_path(path),
    }
}
