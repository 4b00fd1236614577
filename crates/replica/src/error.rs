use replica_path::PathError;
use thiserror::Error;

/// Faults surfaced by the replication builder.
///
/// All faults are terminal to the operation that raised them; there is no
/// retry or recovery path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReplicateError {
    /// A navigation step descended from a node that is absent or null.
    /// This is a usage error and surfaces at navigation time, not at build.
    #[error("invalid path `{path}`: parent value is absent or null")]
    InvalidPath { path: String },

    /// A write or delete failed in the path layer. After a freezing
    /// `build()`, further writes fail here with the frozen fault.
    #[error(transparent)]
    Path(#[from] PathError),
}
