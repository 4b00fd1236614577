use crate::value::Value;

/// Creates a deep, thawed clone of a value.
///
/// Every nested array and object is rebuilt, so the clone shares no storage
/// with the original, and every freeze latch is reset: cloning a frozen value
/// yields a mutable copy. This is the clone collaborator the replication
/// builder snapshots its source with.
///
/// Contrast with the derived [`Clone`], which preserves latches.
///
/// # Examples
///
/// ```
/// use replica_value::{thawed_clone, Value};
/// use serde_json::json;
///
/// let mut source = Value::from(json!({"foo": [1, 2, 3]}));
/// source.freeze();
///
/// let copy = thawed_clone(&source);
/// assert_eq!(copy, source);
/// assert!(!copy.is_frozen());
/// ```
pub fn thawed_clone(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Bool(b) => Value::Bool(*b),
        Value::Number(n) => Value::Number(n.clone()),
        Value::String(s) => Value::String(s.clone()),
        Value::Array(arr) => Value::Array(arr.iter().map(thawed_clone).collect()),
        Value::Object(obj) => Value::Object(
            obj.iter()
                .map(|(key, val)| (key.clone(), thawed_clone(val)))
                .collect(),
        ),
    }
}
