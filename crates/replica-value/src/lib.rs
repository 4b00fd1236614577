//! replica-value - the dynamic value model for replica-rs.
//!
//! A [`Value`] is a tree of scalar leaves (`Null`, `Bool`, `Number`,
//! `String`) and composite containers ([`Array`], [`Object`]). Containers
//! carry a shallow, one-way freeze latch: once frozen, their own entries can
//! no longer be inserted, replaced, or removed, while nested unfrozen
//! containers stay mutable. Scalars report frozen unconditionally, since
//! they carry no mutable structure.
//!
//! The crate also provides the deep [`thawed_clone`] collaborator (clone of
//! a frozen tree is mutable), latch-blind [`deep_equal`], and conversions
//! to and from `serde_json::Value` for fixtures and serialization.

pub mod clone;
pub mod convert;
pub mod equal;
pub mod value;

// Re-exports for convenience
pub use clone::thawed_clone;
pub use equal::deep_equal;
pub use value::{Array, FrozenError, Object, Value};
