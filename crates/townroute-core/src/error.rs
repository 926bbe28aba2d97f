//! Typed errors for road record parsing.

/// Why a single `townA;townB;distance;roadName` line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("expected 4 fields, found {0}")]
    FieldCount(usize),
    #[error("invalid distance: {0:?}")]
    InvalidDistance(String),
    #[error("empty town name")]
    EmptyTown,
    #[error("empty road name")]
    EmptyRoad,
}

/// Errors from bulk loading road records.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: RecordError,
    },
}
