//! replica - an immutable-state replication builder.
//!
//! Hand a source value to [`ReplicationBuilder::for_object`] and it clones
//! the value once into a private replica. Chain navigation into nested
//! properties, overwrite or derive values at the addressed path, delete
//! entries, and call `build()` to take the edited copy out. The source is
//! never touched, and if it was frozen, the output comes back deep-frozen:
//! freeze in, deep freeze out.
//!
//! ```
//! use replica::{deep_freeze, is_deep_frozen, ReplicationBuilder, Value};
//! use serde_json::json;
//!
//! let state = deep_freeze(Value::from(json!({
//!     "session": {"count": 1}
//! })));
//!
//! let next = ReplicationBuilder::for_object(&state)
//!     .property("session")?
//!     .replace_property("count")
//!     .by(|count| Value::from(count.and_then(Value::as_i64).unwrap_or(0) + 1))?
//!     .build();
//!
//! assert_eq!(next, Value::from(json!({"session": {"count": 2}})));
//! assert!(is_deep_frozen(&next));
//! # Ok::<(), replica::ReplicateError>(())
//! ```
//!
//! The value model lives in [`replica_value`] (re-exported as [`value`])
//! and path access in [`replica_path`] (re-exported as [`path`]).

pub mod builder;
pub mod diagnostics;
pub mod error;
pub mod freeze;

pub use builder::{PathOperator, PropertyModifier, ReplicationBuilder};
pub use diagnostics::{DiagnosticSink, LogSink};
pub use error::ReplicateError;
pub use freeze::{deep_freeze, is_deep_frozen};

// Collaborator re-exports
pub use replica_path as path;
pub use replica_path::{format_path, Path, PathError, PathStep};
pub use replica_value as value;
pub use replica_value::{deep_equal, thawed_clone, Array, FrozenError, Object, Value};
