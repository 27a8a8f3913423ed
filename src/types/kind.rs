//! Tag kind discriminants.

use std::fmt;

use crate::error::NbtError;

/// The 13 tag kinds, with their wire discriminant as the enum value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TagKind {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
    LongArray = 12,
}

static NAMES: [&str; 13] = [
    "End",
    "Byte",
    "Short",
    "Int",
    "Long",
    "Float",
    "Double",
    "ByteArray",
    "String",
    "List",
    "Compound",
    "IntArray",
    "LongArray",
];

impl TagKind {
    /// Every kind, in discriminant order.
    pub const ALL: [TagKind; 13] = [
        Self::End,
        Self::Byte,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
        Self::ByteArray,
        Self::String,
        Self::List,
        Self::Compound,
        Self::IntArray,
        Self::LongArray,
    ];

    /// Maps a wire discriminant to its kind.
    pub fn from_u8(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }

    /// The wire discriminant.
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        NAMES[usize::from(self.id())]
    }

    /// Kinds whose children are addressed by zero-based index.
    pub fn is_indexable(self) -> bool {
        matches!(
            self,
            Self::List | Self::ByteArray | Self::IntArray | Self::LongArray
        )
    }
}

impl TryFrom<u8> for TagKind {
    type Error = NbtError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::from_u8(id).ok_or(NbtError::InvalidKind(id))
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
