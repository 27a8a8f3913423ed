//! The tag sum type.

use std::borrow::Cow;
use std::fmt;

use super::{Compound, List, NbtString, TagKind};

/// A single NBT value. Names live outside the tag: in the owning
/// [`Compound`], or in the [`Document`](super::Document) for the root.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Tag {
    #[default]
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(NbtString),
    List(List),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

/// Addresses a child of a tag: a name inside a compound, or a zero-based
/// position inside a list or array.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Name(NbtString),
    Index(usize),
}

impl Tag {
    pub fn kind(&self) -> TagKind {
        match self {
            Self::End => TagKind::End,
            Self::Byte(_) => TagKind::Byte,
            Self::Short(_) => TagKind::Short,
            Self::Int(_) => TagKind::Int,
            Self::Long(_) => TagKind::Long,
            Self::Float(_) => TagKind::Float,
            Self::Double(_) => TagKind::Double,
            Self::ByteArray(_) => TagKind::ByteArray,
            Self::String(_) => TagKind::String,
            Self::List(_) => TagKind::List,
            Self::Compound(_) => TagKind::Compound,
            Self::IntArray(_) => TagKind::IntArray,
            Self::LongArray(_) => TagKind::LongArray,
        }
    }

    /// Number of children: elements for lists and arrays, entries for
    /// compounds, 0 for every other kind (strings included).
    pub fn len(&self) -> usize {
        match self {
            Self::ByteArray(a) => a.len(),
            Self::IntArray(a) => a.len(),
            Self::LongArray(a) => a.len(),
            Self::List(l) => l.len(),
            Self::Compound(c) => c.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up a child.
    ///
    /// Names resolve against compounds, indices against lists and arrays.
    /// Array elements are materialized as scalar tags, hence the `Cow`.
    pub fn element(&self, key: &Key) -> Option<Cow<'_, Tag>> {
        match (self, key) {
            (Self::Compound(c), Key::Name(name)) => c.get(name).map(Cow::Borrowed),
            (Self::List(l), Key::Index(i)) => l.get(*i).map(Cow::Borrowed),
            (Self::ByteArray(a), Key::Index(i)) => a.get(*i).map(|b| Cow::Owned(Self::Byte(*b))),
            (Self::IntArray(a), Key::Index(i)) => a.get(*i).map(|v| Cow::Owned(Self::Int(*v))),
            (Self::LongArray(a), Key::Index(i)) => a.get(*i).map(|v| Cow::Owned(Self::Long(*v))),
            _ => None,
        }
    }

    /// Looks up a compound entry by name.
    pub fn get(&self, name: impl AsRef<[u8]>) -> Option<&Tag> {
        match self {
            Self::Compound(c) => c.get(name),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, name: impl AsRef<[u8]>) -> Option<&mut Tag> {
        match self {
            Self::Compound(c) => c.get_mut(name),
            _ => None,
        }
    }

    pub fn as_end(&self) -> Option<()> {
        match self {
            Self::End => Some(()),
            _ => None,
        }
    }

    pub fn as_byte(&self) -> Option<i8> {
        match self {
            Self::Byte(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_short(&self) -> Option<i16> {
        match self {
            Self::Short(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_long(&self) -> Option<i64> {
        match self {
            Self::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_byte_array(&self) -> Option<&[i8]> {
        match self {
            Self::ByteArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&NbtString> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the string payload as text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.as_string().and_then(NbtString::to_str)
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Self::Compound(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_compound_mut(&mut self) -> Option<&mut Compound> {
        match self {
            Self::Compound(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_int_array(&self) -> Option<&[i32]> {
        match self {
            Self::IntArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_long_array(&self) -> Option<&[i64]> {
        match self {
            Self::LongArray(v) => Some(v),
            _ => None,
        }
    }
}

// -- Key conversions --

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Name(s.into())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::Name(s.into())
    }
}

impl From<NbtString> for Key {
    fn from(s: NbtString) -> Self {
        Self::Name(s)
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name}"),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

// -- Convenience conversions --

impl From<i8> for Tag {
    fn from(v: i8) -> Self {
        Self::Byte(v)
    }
}

impl From<i16> for Tag {
    fn from(v: i16) -> Self {
        Self::Short(v)
    }
}

impl From<i32> for Tag {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<i64> for Tag {
    fn from(v: i64) -> Self {
        Self::Long(v)
    }
}

impl From<f32> for Tag {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<f64> for Tag {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<Vec<i8>> for Tag {
    fn from(v: Vec<i8>) -> Self {
        Self::ByteArray(v)
    }
}

impl From<Vec<i32>> for Tag {
    fn from(v: Vec<i32>) -> Self {
        Self::IntArray(v)
    }
}

impl From<Vec<i64>> for Tag {
    fn from(v: Vec<i64>) -> Self {
        Self::LongArray(v)
    }
}

impl From<NbtString> for Tag {
    fn from(s: NbtString) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Tag {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Tag {
    fn from(s: String) -> Self {
        Self::String(s.into())
    }
}

impl From<List> for Tag {
    fn from(l: List) -> Self {
        Self::List(l)
    }
}

impl From<Compound> for Tag {
    fn from(c: Compound) -> Self {
        Self::Compound(c)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::End => Ok(()),
            Self::Byte(v) => write!(f, "{v}"),
            Self::Short(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "{s}"),
            Self::List(l) => write!(f, "list[{} elements] of {}", l.len(), l.element_kind()),
            Self::ByteArray(_) | Self::Compound(_) | Self::IntArray(_) | Self::LongArray(_) => {
                write!(f, "{} [{} elements]", self.kind(), self.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tag {
        let mut c = Compound::new();
        c.insert("name", "Bananrama");
        c.insert("bytes", vec![1i8, -2, 3]);
        c.insert("scores", List::from(vec![10i32, 20]));
        Tag::Compound(c)
    }

    #[test]
    fn kind_and_len() {
        let tag = sample();
        assert_eq!(tag.kind(), TagKind::Compound);
        assert_eq!(tag.len(), 3);
        assert_eq!(Tag::Int(5).len(), 0);
        assert_eq!(Tag::from("abc").len(), 0);
        assert_eq!(Tag::LongArray(vec![1, 2]).len(), 2);
        assert!(Tag::End.is_empty());
    }

    #[test]
    fn narrowing_accessors() {
        assert_eq!(Tag::Byte(-3).as_byte(), Some(-3));
        assert_eq!(Tag::Byte(-3).as_int(), None);
        assert_eq!(Tag::Double(1.5).as_double(), Some(1.5));
        assert_eq!(Tag::Float(1.5).as_double(), None);
        assert_eq!(Tag::End.as_end(), Some(()));
        assert_eq!(Tag::Int(0).as_end(), None);
        assert_eq!(Tag::from("hi").as_str(), Some("hi"));
        assert!(Tag::IntArray(vec![1]).as_long_array().is_none());
    }

    #[test]
    fn element_by_name_and_index() {
        let tag = sample();
        let name = tag.element(&Key::from("name")).unwrap();
        assert_eq!(name.as_str(), Some("Bananrama"));

        let bytes = tag.get("bytes").unwrap();
        assert_eq!(bytes.element(&Key::Index(1)).unwrap().as_byte(), Some(-2));
        assert!(bytes.element(&Key::Index(3)).is_none());

        let scores = tag.get("scores").unwrap();
        assert_eq!(scores.element(&Key::Index(1)).unwrap().as_int(), Some(20));
    }

    #[test]
    fn element_wrong_key_kind() {
        let tag = sample();
        assert!(tag.element(&Key::Index(0)).is_none());
        let bytes = tag.get("bytes").unwrap();
        assert!(bytes.element(&Key::from("0")).is_none());
        assert!(Tag::Int(1).element(&Key::Index(0)).is_none());
    }

    #[test]
    fn display_summaries() {
        assert_eq!(Tag::Int(42).to_string(), "42");
        assert_eq!(Tag::from("x").to_string(), "x");
        assert_eq!(Tag::End.to_string(), "");
        assert_eq!(
            Tag::List(List::from(vec![1i16, 2])).to_string(),
            "list[2 elements] of Short"
        );
        assert_eq!(sample().to_string(), "Compound [3 elements]");
    }
}
