//! The replication builder: fluent, path-tracked editing of a cloned value.
//!
//! [`ReplicationBuilder::for_object`] deep-clones a source value into a
//! thawed replica and captures the source's shallow frozen state as freeze
//! intent. Navigation ([`property`](ReplicationBuilder::property)) hands out
//! [`PathOperator`]s - cheap immutable values that extend a logical path
//! into the replica - and [`replace_property`](ReplicationBuilder::replace_property)
//! hands out a [`PropertyModifier`] bound to one exact path. Writes and
//! deletes mutate the replica immediately; [`build`](ReplicationBuilder::build)
//! deep-freezes the replica when freeze intent was captured and returns it.
//!
//! The replica and the freeze flag are shared behind one handle, so any
//! operator in a chain can finish the build, and branches explored from the
//! same operator all see the same replica.

use std::cell::RefCell;
use std::rc::Rc;

use replica_path::{self as path, Path, PathStep};
use replica_value::{thawed_clone, Value};

use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::error::ReplicateError;
use crate::freeze::{deep_freeze, is_deep_frozen};

/// State shared by a builder and every operator and modifier derived from
/// it: the live replica plus the freeze intent captured at construction.
#[derive(Debug)]
struct BuilderCore {
    replica: RefCell<Value>,
    freeze: bool,
}

impl BuilderCore {
    fn build(&self) -> Value {
        if self.freeze {
            let thawed = self.replica.take();
            self.replica.replace(deep_freeze(thawed));
        }
        self.replica.borrow().clone()
    }

    /// Extend `base` by `key`, failing when the node at `base` is absent or
    /// null: there is nothing to descend from.
    fn descend(&self, base: &[PathStep], key: String) -> Result<Path, ReplicateError> {
        let exists = {
            let replica = self.replica.borrow();
            matches!(path::get(&replica, base), Some(node) if !node.is_null())
        };
        let mut extended = base.to_vec();
        extended.push(key);
        if !exists {
            return Err(ReplicateError::InvalidPath {
                path: path::format_path(&extended),
            });
        }
        Ok(extended)
    }

    /// Delete the entry at `target` if it is present with a non-null value;
    /// absent and null entries are left as they are.
    fn remove(&self, target: &[PathStep]) -> Result<(), ReplicateError> {
        let present = {
            let replica = self.replica.borrow();
            matches!(path::get(&replica, target), Some(node) if !node.is_null())
        };
        if present {
            let mut replica = self.replica.borrow_mut();
            path::remove(&mut replica, target)?;
        }
        Ok(())
    }
}

/// Replicates a source value and edits the copy, never the source.
///
/// If the source was frozen, the built output is deep-frozen: freeze in,
/// deep freeze out. A source that is frozen only at the root (not deep)
/// still carries freeze intent, but a warning is emitted through the
/// diagnostic sink.
///
/// # Example
///
/// ```
/// use replica::{ReplicationBuilder, Value};
/// use serde_json::json;
///
/// let source = Value::from(json!({"a": {"b": 1}}));
/// let output = ReplicationBuilder::for_object(&source)
///     .property("a")?
///     .replace_property("b")
///     .with(2)?
///     .build();
///
/// assert_eq!(output, Value::from(json!({"a": {"b": 2}})));
/// assert_eq!(source, Value::from(json!({"a": {"b": 1}})));
/// # Ok::<(), replica::ReplicateError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ReplicationBuilder {
    core: Rc<BuilderCore>,
}

impl ReplicationBuilder {
    /// Construct a builder over `source` with the default (`log`-backed)
    /// diagnostic sink.
    pub fn for_object(source: &Value) -> Self {
        Self::for_object_with_sink(source, &LogSink)
    }

    /// Construct a builder over `source`, sending diagnostics to `sink`.
    ///
    /// The replica is cloned eagerly here - the dominant cost of the whole
    /// builder, O(size of source). Freeze intent is the source's *shallow*
    /// frozen state; a frozen root with thawed descendants warns but still
    /// counts as intent to freeze.
    pub fn for_object_with_sink(source: &Value, sink: &dyn DiagnosticSink) -> Self {
        let replica = thawed_clone(source);
        let freeze = source.is_frozen();
        if freeze && !is_deep_frozen(source) {
            sink.warn(
                "source value is frozen but not deep frozen; \
                 freeze whole graphs with `deep_freeze` so the intent covers every descendant",
            );
        }
        Self {
            core: Rc::new(BuilderCore {
                replica: RefCell::new(replica),
                freeze,
            }),
        }
    }

    /// Descend into `key`, returning an operator addressing that node.
    ///
    /// # Errors
    ///
    /// [`ReplicateError::InvalidPath`] when the replica root is null -
    /// there is no node to descend from.
    pub fn property(&self, key: impl Into<String>) -> Result<PathOperator, ReplicateError> {
        let path = self.core.descend(&[], key.into())?;
        Ok(PathOperator {
            core: Rc::clone(&self.core),
            path,
        })
    }

    /// Hand off to a modifier that overwrites or derives the value at
    /// `key`.
    pub fn replace_property(&self, key: impl Into<String>) -> PropertyModifier<ReplicationBuilder> {
        PropertyModifier {
            parent: self.clone(),
            core: Rc::clone(&self.core),
            path: vec![key.into()],
        }
    }

    /// Delete `key` from the replica root if it is present, immediately.
    /// Null-valued entries count as absent and are kept.
    pub fn remove_property(&self, key: impl Into<String>) -> Result<&Self, ReplicateError> {
        self.core.remove(&[key.into()])?;
        Ok(self)
    }

    /// Produce the replica, deep-freezing it first when the source was
    /// frozen. Freezing is idempotent, and `build` may be called again;
    /// every call returns an equal value. After a freezing build, later
    /// writes through this builder fail with the frozen fault.
    pub fn build(&self) -> Value {
        self.core.build()
    }

    #[deprecated(since = "0.1.0", note = "renamed to `property`")]
    pub fn get_child(&self, key: impl Into<String>) -> Result<PathOperator, ReplicateError> {
        self.property(key)
    }

    #[deprecated(since = "0.1.0", note = "renamed to `replace_property`")]
    pub fn modify(&self, key: impl Into<String>) -> PropertyModifier<ReplicationBuilder> {
        self.replace_property(key)
    }

    #[deprecated(since = "0.1.0", note = "renamed to `remove_property`")]
    pub fn delete(&self, key: impl Into<String>) -> Result<&Self, ReplicateError> {
        self.remove_property(key)
    }
}

/// An immutable, chainable navigator over the shared replica.
///
/// Every navigation call returns a new operator with a longer path; the
/// original stays valid, so several branches can be explored from one
/// operator without interference. All authoritative state lives in the
/// replica plus the logical path - operators re-read through their path on
/// demand.
#[derive(Debug, Clone)]
pub struct PathOperator {
    core: Rc<BuilderCore>,
    path: Path,
}

impl PathOperator {
    /// Descend into `key` below this operator's node.
    ///
    /// # Errors
    ///
    /// [`ReplicateError::InvalidPath`] when this operator's node is absent
    /// or null at navigation time.
    pub fn property(&self, key: impl Into<String>) -> Result<PathOperator, ReplicateError> {
        let path = self.core.descend(&self.path, key.into())?;
        Ok(PathOperator {
            core: Rc::clone(&self.core),
            path,
        })
    }

    /// Hand off to a modifier bound to `key` below this operator's node.
    /// The modifier writes against the shared replica, not a local
    /// snapshot.
    pub fn replace_property(&self, key: impl Into<String>) -> PropertyModifier<PathOperator> {
        let mut target = self.path.clone();
        target.push(key.into());
        PropertyModifier {
            parent: self.clone(),
            core: Rc::clone(&self.core),
            path: target,
        }
    }

    /// Delete `key` below this operator's node if it is present,
    /// immediately. Null-valued entries count as absent and are kept.
    pub fn remove_property(&self, key: impl Into<String>) -> Result<&Self, ReplicateError> {
        let mut target = self.path.clone();
        target.push(key.into());
        self.core.remove(&target)?;
        Ok(self)
    }

    /// Finish the build from any depth; returns the whole replica, not the
    /// node this operator addresses.
    pub fn build(&self) -> Value {
        self.core.build()
    }

    /// The logical path from the replica root to this operator's node.
    pub fn path(&self) -> &[PathStep] {
        &self.path
    }

    /// The value currently addressed by this operator, if any.
    pub fn value(&self) -> Option<Value> {
        let replica = self.core.replica.borrow();
        path::get(&replica, &self.path).cloned()
    }

    #[deprecated(since = "0.1.0", note = "renamed to `property`")]
    pub fn get_child(&self, key: impl Into<String>) -> Result<PathOperator, ReplicateError> {
        self.property(key)
    }

    #[deprecated(since = "0.1.0", note = "renamed to `replace_property`")]
    pub fn modify(&self, key: impl Into<String>) -> PropertyModifier<PathOperator> {
        self.replace_property(key)
    }

    #[deprecated(since = "0.1.0", note = "renamed to `remove_property`")]
    pub fn delete(&self, key: impl Into<String>) -> Result<&Self, ReplicateError> {
        self.remove_property(key)
    }
}

/// A terminal fluent object bound to one exact path in the replica.
///
/// `P` is the parent the modifier hands control back to after the write -
/// the builder itself or the operator it was created from.
#[derive(Debug)]
pub struct PropertyModifier<P> {
    parent: P,
    core: Rc<BuilderCore>,
    path: Path,
}

impl<P> PropertyModifier<P> {
    /// Write `value` at this modifier's path, immediately, creating missing
    /// intermediate containers; returns the parent for continued chaining.
    ///
    /// # Errors
    ///
    /// Path-layer faults: a frozen container on the write path (which is
    /// how writes after a freezing `build()` fail) or a non-index step
    /// addressing an array.
    pub fn with(self, value: impl Into<Value>) -> Result<P, ReplicateError> {
        {
            let mut replica = self.core.replica.borrow_mut();
            path::set(&mut replica, &self.path, value.into())?;
        }
        Ok(self.parent)
    }

    /// Read the current value at this modifier's path, apply `transform`
    /// exactly once, and write the result via [`with`](Self::with).
    ///
    /// The transform receives `None` when the path addresses nothing.
    pub fn by(self, transform: impl FnOnce(Option<&Value>) -> Value) -> Result<P, ReplicateError> {
        let value = {
            let replica = self.core.replica.borrow();
            transform(path::get(&replica, &self.path))
        };
        self.with(value)
    }

    /// The logical path this modifier writes to.
    pub fn path(&self) -> &[PathStep] {
        &self.path
    }

    #[deprecated(since = "0.1.0", note = "renamed to `with`")]
    pub fn to(self, value: impl Into<Value>) -> Result<P, ReplicateError> {
        self.with(value)
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
    fn replace_at_root_level() {
        let source = v(json!({"a": 1}));
        let output = ReplicationBuilder::for_object(&source)
            .replace_property("a")
            .with(2)
            .unwrap()
            .build();
        assert_eq!(output, v(json!({"a": 2})));
        assert_eq!(source, v(json!({"a": 1})));
    }

    #[test]
    fn navigation_extends_the_logical_path() {
        let source = v(json!({"a": {"b": {"c": 1}}}));
        let builder = ReplicationBuilder::for_object(&source);
        let operator = builder.property("a").unwrap().property("b").unwrap();
        assert_eq!(operator.path().to_vec(), vec!["a", "b"]);
        assert_eq!(operator.value(), Some(v(json!({"c": 1}))));
    }

    #[test]
    fn descending_from_null_is_an_invalid_path() {
        let source = v(json!({"a": null}));
        let builder = ReplicationBuilder::for_object(&source);
        let operator = builder.property("a").unwrap();
        let err = operator.property("b").unwrap_err();
        assert_eq!(
            err,
            ReplicateError::InvalidPath {
                path: "a.b".to_string()
            }
        );
    }

    #[test]
    fn descending_from_a_missing_node_is_an_invalid_path() {
        let source = v(json!({"a": {}}));
        let builder = ReplicationBuilder::for_object(&source);
        let operator = builder.property("missing").unwrap();
        assert!(operator.property("deeper").is_err());
    }

    #[test]
    fn null_root_cannot_be_descended() {
        let builder = ReplicationBuilder::for_object(&Value::Null);
        assert!(builder.property("a").is_err());
    }

    #[test]
    fn scalar_root_write_is_quietly_ignored() {
        let source = v(json!(5));
        let output = ReplicationBuilder::for_object(&source)
            .replace_property("a")
            .with(1)
            .unwrap()
            .build();
        assert_eq!(output, v(json!(5)));
    }

    #[test]
    fn remove_skips_null_valued_entries() {
        let source = v(json!({"a": null, "b": 1}));
        let builder = ReplicationBuilder::for_object(&source);
        let output = builder
            .remove_property("a")
            .unwrap()
            .remove_property("b")
            .unwrap()
            .build();
        // "a" holds null, which counts as absent; "b" is really deleted.
        assert_eq!(output, v(json!({"a": null})));
    }

    #[test]
    fn operators_are_cheap_immutable_values() {
        let source = v(json!({"a": {"x": 1, "y": 2}}));
        let builder = ReplicationBuilder::for_object(&source);
        let base = builder.property("a").unwrap();

        // Two branches from the same operator; neither disturbs the other.
        let branch_x = base.replace_property("x").with(10).unwrap();
        let branch_y = base.replace_property("y").with(20).unwrap();
        assert_eq!(branch_x.path(), base.path());
        assert_eq!(branch_y.path(), base.path());

        assert_eq!(base.build(), v(json!({"a": {"x": 10, "y": 20}})));
    }

    #[test]
    fn modifier_returns_its_parent() {
        let source = v(json!({"a": {"b": 1, "c": 2}}));
        let output = ReplicationBuilder::for_object(&source)
            .property("a")
            .unwrap()
            .replace_property("b")
            .with(10)
            .unwrap()
            .replace_property("c")
            .with(20)
            .unwrap()
            .build();
        assert_eq!(output, v(json!({"a": {"b": 10, "c": 20}})));
    }
}
