use crate::value::Value;

/// Performs a deep structural equality check between two values.
///
/// Freeze latches are ignored: equality sees only the shape and contents of
/// the tree. Object comparison is key-based, so insertion order does not
/// matter. This is also the implementation behind `Value`'s `PartialEq`.
///
/// # Examples
///
/// ```
/// use replica_value::{deep_equal, Value};
/// use serde_json::json;
///
/// let a = Value::from(json!({"foo": [1, 2, 3]}));
/// let b = Value::from(json!({"foo": [1, 2, 3]}));
/// let c = Value::from(json!({"foo": [1, 2, 4]}));
///
/// assert!(deep_equal(&a, &b));
/// assert!(!deep_equal(&a, &c));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,

        (Value::Array(arr_a), Value::Array(arr_b)) => {
            if arr_a.len() != arr_b.len() {
                return false;
            }
            arr_a
                .iter()
                .zip(arr_b.iter())
                .all(|(item_a, item_b)| deep_equal(item_a, item_b))
        }

        (Value::Object(obj_a), Value::Object(obj_b)) => {
            if obj_a.len() != obj_b.len() {
                return false;
            }
            obj_a.iter().all(|(key, val_a)| match obj_b.get(key) {
                Some(val_b) => deep_equal(val_a, val_b),
                None => false,
            })
        }

        // Different types are never equal
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn v(value: serde_json::Value) -> Value {
        Value::from(value)
    }

    #[test]
    fn scalar_equality() {
        assert!(deep_equal(&v(json!(1)), &v(json!(1))));
        assert!(!deep_equal(&v(json!(1)), &v(json!(2))));
        assert!(deep_equal(&v(json!("a")), &v(json!("a"))));
        assert!(deep_equal(&v(json!(null)), &v(json!(null))));
        assert!(!deep_equal(&v(json!(true)), &v(json!(false))));
    }

    #[test]
    fn mixed_types_never_equal() {
        assert!(!deep_equal(&v(json!(0)), &v(json!(null))));
        assert!(!deep_equal(&v(json!(0)), &v(json!(false))));
        assert!(!deep_equal(&v(json!(1)), &v(json!([]))));
        assert!(!deep_equal(&v(json!("")), &v(json!(null))));
        assert!(!deep_equal(&v(json!({})), &v(json!([]))));
    }

    #[test]
    fn array_equality() {
        assert!(deep_equal(&v(json!([])), &v(json!([]))));
        assert!(deep_equal(&v(json!([1, 2, 3])), &v(json!([1, 2, 3]))));
        assert!(!deep_equal(&v(json!([1, 2, 3])), &v(json!([1, 2, 4]))));
        assert!(!deep_equal(&v(json!([1, 2, 3])), &v(json!([1, 2]))));
    }

    #[test]
    fn object_equality_is_order_independent() {
        assert!(deep_equal(
            &v(json!({"a": 1, "b": "2"})),
            &v(json!({"b": "2", "a": 1}))
        ));
        assert!(!deep_equal(
            &v(json!({"a": 1, "b": "2"})),
            &v(json!({"a": 1, "b": "2", "c": []}))
        ));
        assert!(!deep_equal(
            &v(json!({"a": 1, "b": 2})),
            &v(json!({"a": 1, "d": 2}))
        ));
    }

    #[test]
    fn nested_structures() {
        assert!(deep_equal(
            &v(json!({"a": [{"b": "c"}]})),
            &v(json!({"a": [{"b": "c"}]}))
        ));
        assert!(!deep_equal(
            &v(json!([{"a": "a"}, {"b": "b"}])),
            &v(json!([{"a": "a"}, {"b": "c"}]))
        ));
    }
}
