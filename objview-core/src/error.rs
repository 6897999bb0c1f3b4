//! Error types for mesh loading and buffer construction.
//!
//! Fallible operations in this crate return `MeshResult<T>`. Unsupported
//! OBJ directives are not errors: the parser logs them and moves on.

use thiserror::Error;

/// Unified error type for the OBJ ingestion pipeline.
#[derive(Debug, Error)]
pub enum MeshError {
    /// A recognized directive had the wrong token arity or a token that
    /// failed numeric parsing. Fatal to the whole load; carries the raw
    /// line so the user can find the offending record.
    #[error("malformed `{directive}` record: {line:?}")]
    MalformedRecord {
        directive: &'static str,
        line: String,
    },

    /// A face referenced a vertex or normal index beyond the collection
    /// bounds, or expects a normal that was never supplied. Fatal to
    /// buffer construction.
    #[error("face {face}: {description}")]
    IndexOutOfRange { face: usize, description: String },

    /// I/O failure while reading the source file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for `Result<T, MeshError>`.
pub type MeshResult<T> = Result<T, MeshError>;
