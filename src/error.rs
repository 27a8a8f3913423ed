//! Error types for NBT decoding, encoding and navigation.

use std::fmt;

use crate::types::{NbtString, TagKind};

/// Errors that abort a decode or encode call.
#[derive(Debug, thiserror::Error)]
pub enum NbtError {
    #[error("unexpected end of data: need {needed} bytes but only {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("unsupported tag kind: {0}")]
    InvalidKind(u8),

    #[error("invalid negative count for {kind}: {count}")]
    NegativeCount { kind: TagKind, count: i32 },

    #[error("unterminated compound tag")]
    UnterminatedCompound,

    #[error("list of End declares {0} elements")]
    EndListNotEmpty(usize),

    #[error("nesting exceeds depth limit of {0}")]
    DepthLimit(usize),

    #[error("string too long to represent: {0} bytes")]
    StringTooLong(usize),

    #[error("list element kind mismatch: expected {expected}, found {found}")]
    ListKindMismatch { expected: TagKind, found: TagKind },

    #[error("{0} cannot be a list element")]
    InvalidListElement(TagKind),

    #[error("End cannot be stored as compound entry '{0}'")]
    EndEntry(NbtString),

    #[error("{kind} with {len} elements exceeds the format's count limit")]
    TooManyElements { kind: TagKind, len: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl NbtError {
    /// Returns `true` for failures caused by the input ending early.
    pub fn is_truncation(&self) -> bool {
        match self {
            Self::Truncated { .. } | Self::UnterminatedCompound => true,
            Self::Io(e) => e.kind() == std::io::ErrorKind::UnexpectedEof,
            _ => false,
        }
    }
}

/// Errors from a single [`Path`](crate::path::Path) navigation step.
///
/// The cursor is left where it was when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("cannot move above root")]
    AboveRoot,

    #[error("no such entry {0:?}")]
    NoSuchEntry(String),

    #[error("no such entry {0}")]
    NoSuchIndex(i64),

    #[error("path component type mismatch: {kind} can't be indexed by {component}")]
    WrongKind {
        kind: TagKind,
        component: ComponentKind,
    },
}

/// The shape of a path component, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Name,
    Index,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Index => write!(f, "index"),
        }
    }
}

/// A non-fatal condition noticed while decoding.
///
/// Decoding continues past these; they are handed back next to the value in
/// [`Decoded`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeWarning {
    /// A compound repeated a name. The later entry replaced the earlier one.
    #[error("duplicate name '{name}' in compound tag")]
    DuplicateKey { name: NbtString },
}

/// A decoded value together with any non-fatal warnings raised while
/// producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub value: T,
    pub warnings: Vec<DecodeWarning>,
}

impl<T> Decoded<T> {
    pub fn new(value: T, warnings: Vec<DecodeWarning>) -> Self {
        Self { value, warnings }
    }

    /// Returns `true` if decoding raised no warnings.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Discards the warnings.
    pub fn into_value(self) -> T {
        self.value
    }
}
