//! Recursive freeze and deep-frozen checks over value trees.

use replica_value::Value;

/// Recursively freezes a value graph and returns it.
///
/// The value itself is frozen first; for containers, every non-null child
/// that is not already frozen is then frozen recursively. Scalars freeze
/// vacuously and are never traversed. Freezing an already deep-frozen value
/// is a no-op, so the function is idempotent.
///
/// Because values are owned trees, reference cycles cannot occur and the
/// traversal always terminates.
///
/// # Examples
///
/// ```
/// use replica::{deep_freeze, is_deep_frozen, Value};
/// use serde_json::json;
///
/// let value = deep_freeze(Value::from(json!({"a": {"b": [1, 2]}})));
/// assert!(is_deep_frozen(&value));
/// ```
pub fn deep_freeze(mut value: Value) -> Value {
    freeze_in_place(&mut value);
    value
}

pub(crate) fn freeze_in_place(value: &mut Value) {
    value.freeze();
    match value {
        Value::Array(arr) => {
            for item in arr.iter_mut() {
                if !item.is_null() && !item.is_frozen() {
                    freeze_in_place(item);
                }
            }
        }
        Value::Object(obj) => {
            for (_, child) in obj.iter_mut() {
                if !child.is_null() && !child.is_frozen() {
                    freeze_in_place(child);
                }
            }
        }
        _ => {}
    }
}

/// Checks whether a value graph is deep-frozen.
///
/// Returns `false` if the value itself is not frozen. A frozen container is
/// deep-frozen only if every non-null child is itself deep-frozen. Scalars
/// and `Null` count as deep-frozen leaves.
pub fn is_deep_frozen(value: &Value) -> bool {
    if !value.is_frozen() {
        return false;
    }
    match value {
        Value::Array(arr) => arr
            .iter()
            .filter(|item| !item.is_null())
            .all(is_deep_frozen),
        Value::Object(obj) => obj
            .iter()
            .filter(|(_, child)| !child.is_null())
            .all(|(_, child)| is_deep_frozen(child)),
        _ => true,
    }
}
