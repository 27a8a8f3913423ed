//! Homogeneous lists.

use super::{Compound, NbtString, Tag, TagKind};
use crate::error::NbtError;

/// An ordered sequence of tags that all share one element kind.
///
/// The element kind is fixed when the list is built. The one exception is an
/// empty list declared as End, which takes on the kind of the first element
/// pushed into it.
///
/// Elements can be replaced in place through [`get_mut`](Self::get_mut) and
/// [`as_mut_slice`](Self::as_mut_slice) without a kind check, so the encoder
/// verifies every element again before writing it.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    kind: TagKind,
    elements: Vec<Tag>,
}

/// Rust types that map onto a list element kind.
pub trait ListElement: Sized {
    const KIND: TagKind;

    fn into_tag(self) -> Tag;

    fn from_tag(tag: &Tag) -> Option<Self>;
}

macro_rules! list_element {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ListElement for $ty {
                const KIND: TagKind = TagKind::$variant;

                fn into_tag(self) -> Tag {
                    Tag::$variant(self)
                }

                fn from_tag(tag: &Tag) -> Option<Self> {
                    match tag {
                        Tag::$variant(v) => Some(v.clone()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

list_element! {
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    Vec<i8> => ByteArray,
    NbtString => String,
    List => List,
    Compound => Compound,
    Vec<i32> => IntArray,
    Vec<i64> => LongArray,
}

impl List {
    /// An empty list of kind End.
    pub fn empty() -> Self {
        Self {
            kind: TagKind::End,
            elements: Vec::new(),
        }
    }

    /// An empty list declaring `kind` as its element kind.
    pub fn of_kind(kind: TagKind) -> Self {
        Self {
            kind,
            elements: Vec::new(),
        }
    }

    /// Builds a list from untyped tags, verifying that every element has
    /// kind `kind`.
    pub fn new(kind: TagKind, elements: Vec<Tag>) -> Result<Self, NbtError> {
        for element in &elements {
            check_element(kind, element)?;
        }
        Ok(Self { kind, elements })
    }

    /// Builds a list from a typed sequence; the element kind comes from `T`.
    pub fn from_elements<T: ListElement>(elements: Vec<T>) -> Self {
        Self {
            kind: T::KIND,
            elements: elements.into_iter().map(ListElement::into_tag).collect(),
        }
    }

    pub(crate) fn from_parts_unchecked(kind: TagKind, elements: Vec<Tag>) -> Self {
        Self { kind, elements }
    }

    pub fn element_kind(&self) -> TagKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.elements.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Tag> {
        self.elements.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[Tag] {
        &self.elements
    }

    pub fn as_mut_slice(&mut self) -> &mut [Tag] {
        &mut self.elements
    }

    pub fn into_vec(self) -> Vec<Tag> {
        self.elements
    }

    /// Appends `tag`, which must match the element kind. An empty End list
    /// adopts the kind of the first element.
    pub fn push(&mut self, tag: impl Into<Tag>) -> Result<(), NbtError> {
        let tag = tag.into();
        if self.kind == TagKind::End && self.elements.is_empty() {
            if tag.kind() == TagKind::End {
                return Err(NbtError::InvalidListElement(TagKind::End));
            }
            self.kind = tag.kind();
        } else {
            check_element(self.kind, &tag)?;
        }
        self.elements.push(tag);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<Tag> {
        self.elements.pop()
    }

    /// Copies the elements out as `T`, if `T` matches the element kind.
    ///
    /// An empty End list yields an empty vector for any `T`.
    pub fn to_vec<T: ListElement>(&self) -> Option<Vec<T>> {
        if self.elements.is_empty() && self.kind == TagKind::End {
            return Some(Vec::new());
        }
        if self.kind != T::KIND {
            return None;
        }
        self.elements.iter().map(T::from_tag).collect()
    }
}

fn check_element(kind: TagKind, element: &Tag) -> Result<(), NbtError> {
    let found = element.kind();
    if found == TagKind::End {
        return Err(NbtError::InvalidListElement(TagKind::End));
    }
    if found != kind {
        return Err(NbtError::ListKindMismatch {
            expected: kind,
            found,
        });
    }
    Ok(())
}

impl Default for List {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: ListElement> From<Vec<T>> for List {
    fn from(elements: Vec<T>) -> Self {
        Self::from_elements(elements)
    }
}

impl From<Vec<&str>> for List {
    fn from(elements: Vec<&str>) -> Self {
        Self::from_elements(elements.into_iter().map(NbtString::from).collect())
    }
}

impl From<Vec<String>> for List {
    fn from(elements: Vec<String>) -> Self {
        Self::from_elements(elements.into_iter().map(NbtString::from).collect())
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for List {
    type Item = Tag;
    type IntoIter = std::vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}
