//! Type definitions for segmented paths.

/// A single step in a path: an object key, or the decimal rendering of an
/// array index (`"-"` addresses the end of an array on writes).
pub type PathStep = String;

/// A path from a tree's root to a node, as an explicit ordered list of
/// steps. The empty path addresses the root. Paths are never represented as
/// a joined string; see [`format_path`](crate::format_path) for the
/// diagnostics-only rendering.
pub type Path = Vec<PathStep>;
