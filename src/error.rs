//! Error type shared by the manager and the finite domain layer.

use std::fmt;

/// Coarse classification of [`Error`] values.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// The domain table is not bound to the manager it was used with.
    State,
    /// A block or variable index is out of bounds.
    Index,
    /// A non-positive size, or a value outside a block's range.
    Range,
    /// Two blocks were required to have equal size or width.
    RangeMismatch,
    /// The manager cannot allocate more variables.
    Memory,
    /// The output sink rejected a write.
    Format,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::State => "state error",
            ErrorKind::Index => "index error",
            ErrorKind::Range => "range error",
            ErrorKind::RangeMismatch => "range mismatch",
            ErrorKind::Memory => "memory error",
            ErrorKind::Format => "format error",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("domain table is bound to BDD manager #{expected}, but was used with manager #{actual}")]
    State { expected: u64, actual: u64 },

    #[error("block index {index} is out of range: {count} blocks defined")]
    BlockIndex { index: usize, count: usize },

    #[error("variable {var} is out of range: {count} variables allocated")]
    VarIndex { var: u32, count: usize },

    #[error("domain size must be positive, got {size}")]
    InvalidSize { size: u64 },

    #[error("value {value} is out of range for block {block} of size {size}")]
    ValueRange { block: usize, value: u64, size: u64 },

    #[error("combined size of blocks {left} and {right} does not fit in 64 bits")]
    SizeOverflow { left: usize, right: usize },

    #[error("blocks {left} and {right} differ in {what}: {left_value} vs {right_value}")]
    Mismatch {
        what: &'static str,
        left: usize,
        right: usize,
        left_value: u64,
        right_value: u64,
    },

    #[error("cannot allocate {requested} more variables: only {available} left")]
    Memory { requested: usize, available: usize },

    #[error("output sink failed: {0}")]
    Format(#[from] fmt::Error),
}

impl Error {
    /// The coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::State { .. } => ErrorKind::State,
            Error::BlockIndex { .. } | Error::VarIndex { .. } => ErrorKind::Index,
            Error::InvalidSize { .. } | Error::ValueRange { .. } | Error::SizeOverflow { .. } => ErrorKind::Range,
            Error::Mismatch { .. } => ErrorKind::RangeMismatch,
            Error::Memory { .. } => ErrorKind::Memory,
            Error::Format(_) => ErrorKind::Format,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
