//! The dynamic value tree and its shallow freeze latch.

use indexmap::IndexMap;
use serde_json::Number;
use thiserror::Error;

use crate::equal::deep_equal;

/// Error returned when a container-level mutation hits a frozen container.
///
/// The latch is shallow: it rejects inserting, replacing, or removing entries
/// of the frozen container itself, but descendants keep their own latches and
/// unfrozen descendants stay mutable.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("container is frozen")]
pub struct FrozenError;

/// A dynamic value: scalar leaves plus freezable composite containers.
///
/// Structural equality (`==`) ignores freeze latches; a frozen value and its
/// thawed copy compare equal. The derived [`Clone`] preserves latches, while
/// [`thawed_clone`](crate::thawed_clone) resets them.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Array),
    Object(Object),
}

impl Value {
    /// Returns `true` for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for arrays and objects.
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    /// Returns `true` for objects.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns `true` for arrays.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Borrow the value as a bool, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrow the value as a number, if it is one.
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// The value as an `i64`, if it is an integral number in range.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    /// The value as an `f64`, if it is a number.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(Number::as_f64)
    }

    /// Borrow the value as a string slice, if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the value as an array, if it is one.
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Mutably borrow the value as an array, if it is one.
    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Borrow the value as an object, if it is one.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Mutably borrow the value as an object, if it is one.
    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Name of the value's type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Shallowly latch the value against container-level mutation.
    ///
    /// Freezing a scalar is a no-op: scalars carry no mutable structure, so
    /// they report frozen unconditionally (see [`Value::is_frozen`]). The
    /// latch is one-way; there is no unfreeze.
    ///
    /// # Example
    ///
    /// ```
    /// use replica_value::Value;
    /// use serde_json::json;
    ///
    /// let mut value = Value::from(json!({"a": 1}));
    /// assert!(!value.is_frozen());
    /// value.freeze();
    /// assert!(value.is_frozen());
    /// ```
    pub fn freeze(&mut self) {
        match self {
            Value::Array(arr) => arr.freeze(),
            Value::Object(obj) => obj.freeze(),
            _ => {}
        }
    }

    /// Shallow frozen check.
    ///
    /// Scalars and `Null` are vacuously frozen; containers report their
    /// latch. This checks only the top of the value, not descendants.
    pub fn is_frozen(&self) -> bool {
        match self {
            Value::Array(arr) => arr.is_frozen(),
            Value::Object(obj) => obj.is_frozen(),
            _ => true,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        deep_equal(self, other)
    }
}

/// An ordered sequence of values with a shallow freeze latch.
#[derive(Debug, Clone, Default)]
pub struct Array {
    items: Vec<Value>,
    frozen: bool,
}

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Latch the array against push/replace/remove. One-way.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// Mutable access to an element. Allowed on frozen arrays: the latch is
    /// shallow, so the element's own structure governs its mutability.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.items.iter_mut()
    }

    /// Append a value.
    pub fn push(&mut self, value: Value) -> Result<(), FrozenError> {
        if self.frozen {
            return Err(FrozenError);
        }
        self.items.push(value);
        Ok(())
    }

    /// Assign `value` at `index`, returning the displaced value.
    ///
    /// Indexes past the end pad the gap with `Null`, so the assignment always
    /// lands; `Ok(None)` means nothing was displaced (the slot was new).
    pub fn set(&mut self, index: usize, value: Value) -> Result<Option<Value>, FrozenError> {
        if self.frozen {
            return Err(FrozenError);
        }
        if index < self.items.len() {
            let old = std::mem::replace(&mut self.items[index], value);
            return Ok(Some(old));
        }
        while self.items.len() < index {
            self.items.push(Value::Null);
        }
        self.items.push(value);
        Ok(None)
    }

    /// Remove the element at `index`, shifting the tail left.
    ///
    /// Out-of-range indexes return `Ok(None)`.
    pub fn remove(&mut self, index: usize) -> Result<Option<Value>, FrozenError> {
        if self.frozen {
            return Err(FrozenError);
        }
        if index >= self.items.len() {
            return Ok(None);
        }
        Ok(Some(self.items.remove(index)))
    }

    /// Mutable access to the slot at `index`, appending a default (after
    /// `Null` padding) when the index is past the end. The frozen latch is
    /// checked only when the append is actually needed.
    pub fn get_or_insert_with(
        &mut self,
        index: usize,
        default: impl FnOnce() -> Value,
    ) -> Result<&mut Value, FrozenError> {
        if index >= self.items.len() {
            if self.frozen {
                return Err(FrozenError);
            }
            while self.items.len() < index {
                self.items.push(Value::Null);
            }
            self.items.push(default());
        }
        Ok(&mut self.items[index])
    }
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
            frozen: false,
        }
    }
}

impl IntoIterator for Array {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// An insertion-ordered string-keyed map of values with a shallow freeze
/// latch.
#[derive(Debug, Clone, Default)]
pub struct Object {
    entries: IndexMap<String, Value>,
    frozen: bool,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Latch the object against insert/remove. One-way.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Mutable access to an entry. Allowed on frozen objects: the latch is
    /// shallow, so the entry's own structure governs its mutability.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut Value)> {
        self.entries.iter_mut()
    }

    /// Insert `value` under `key`, returning the displaced value.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: Value,
    ) -> Result<Option<Value>, FrozenError> {
        if self.frozen {
            return Err(FrozenError);
        }
        Ok(self.entries.insert(key.into(), value))
    }

    /// Remove the entry under `key`, preserving the order of the rest.
    pub fn remove(&mut self, key: &str) -> Result<Option<Value>, FrozenError> {
        if self.frozen {
            return Err(FrozenError);
        }
        Ok(self.entries.shift_remove(key))
    }

    /// Mutable access to the entry under `key`, inserting a default when the
    /// key is vacant. The frozen latch is checked only when the insert is
    /// actually needed.
    pub fn get_or_insert_with(
        &mut self,
        key: &str,
        default: impl FnOnce() -> Value,
    ) -> Result<&mut Value, FrozenError> {
        if self.frozen && !self.entries.contains_key(key) {
            return Err(FrozenError);
        }
        Ok(self.entries.entry(key.to_string()).or_insert_with(default))
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        if self.entries.len() != other.entries.len() {
            return false;
        }
        self.entries
            .iter()
            .all(|(key, value)| other.entries.get(key) == Some(value))
    }
}

impl FromIterator<(String, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
            frozen: false,
        }
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
