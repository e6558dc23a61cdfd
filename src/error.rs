//! Unified error types for the `.E3A` codec.
//!
//! One crate-level enum covers the whole taxonomy: container faults, stream
//! sizing, record field translation, name resolution, enumeration lookup, and
//! the integrity defects the validator reports when invoked as a library.

use thiserror::Error;

/// Main error type for `.E3A` operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The archive is malformed or a required stream is missing
    #[error("Container error: {0}")]
    Container(String),

    /// A stream's byte length is not an exact multiple of its record size
    #[error(
        "Stream size error: {stream} is {len} bytes, not a multiple of the \
         {record_size}-byte record size ({remainder} bytes left over)"
    )]
    StreamSize {
        stream: &'static str,
        len: usize,
        record_size: usize,
        remainder: usize,
    },

    /// A record field could not be decoded in a strict context
    #[error("Record decode error in {context}: {reason}")]
    RecordDecode { context: String, reason: String },

    /// A field value could not be represented in the on-disk layout
    #[error("Record encode error in {context}: {reason}")]
    RecordEncode { context: String, reason: String },

    /// A name used by a space has no matching assembly, schedule or window type
    #[error("Unresolved reference: {field} names {name:?}, which does not exist")]
    UnresolvedReference { field: String, name: String },

    /// A human-facing string has no code in the corresponding closed table
    #[error("Unknown value for {field}: {value:?}")]
    UnknownEnum { field: &'static str, value: String },

    /// An integrity defect surfaced as an error (library invocation)
    #[error("Integrity error: {0}")]
    Integrity(String),
}

/// Result type for `.E3A` operations.
pub type Result<T> = std::result::Result<T, Error>;
