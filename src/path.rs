//! Cursor navigation over a loaded tag tree.
//!
//! A [`Path`] keeps the chain of tags from the root to the current position
//! and the key used at each step. Moving down pushes onto both stacks,
//! moving up pops, so no tag needs a parent pointer.
//!
//! ```
//! use nbtr::{Compound, List, Path, Tag};
//!
//! let mut root = Compound::new();
//! root.insert("foo", List::from(vec![1i32, 2]));
//! let root = Tag::Compound(root);
//!
//! let mut path = Path::new(&root);
//! path.descend("foo").unwrap();
//! assert_eq!(path.descend(1).unwrap(), &Tag::Int(2));
//! assert_eq!(path.render(), "foo/1/");
//! ```

use std::borrow::Cow;
use std::fmt;

use crate::error::{ComponentKind, PathError};
use crate::types::{Key, NbtString, Tag, TagKind};

/// The component that moves a path up one level.
pub const PARENT: &str = "..";

/// One navigation step: up to the parent, or down into a child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Parent,
    Child(Key),
}

impl From<&str> for Step {
    fn from(s: &str) -> Self {
        if s == PARENT {
            Self::Parent
        } else {
            Self::Child(Key::from(s))
        }
    }
}

impl From<String> for Step {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<NbtString> for Step {
    fn from(s: NbtString) -> Self {
        if s == PARENT {
            Self::Parent
        } else {
            Self::Child(Key::Name(s))
        }
    }
}

impl From<usize> for Step {
    fn from(i: usize) -> Self {
        Self::Child(Key::Index(i))
    }
}

impl From<Key> for Step {
    fn from(key: Key) -> Self {
        Self::Child(key)
    }
}

/// A position inside one tag tree.
///
/// Borrows the tree for its whole life; array elements reached by index are
/// held as owned scalar tags.
#[derive(Debug, Clone)]
pub struct Path<'a> {
    visited: Vec<Cow<'a, Tag>>,
    components: Vec<Key>,
}

impl<'a> Path<'a> {
    /// A path positioned at `root`.
    pub fn new(root: &'a Tag) -> Self {
        Self {
            visited: vec![Cow::Borrowed(root)],
            components: Vec::new(),
        }
    }

    pub fn root(&self) -> &Tag {
        &self.visited[0]
    }

    /// The tag the path currently points at.
    pub fn current(&self) -> &Tag {
        &self.visited[self.components.len()]
    }

    /// Number of steps below the root.
    pub fn depth(&self) -> usize {
        self.components.len()
    }

    pub fn components(&self) -> &[Key] {
        &self.components
    }

    /// Takes one step and returns the new current tag.
    ///
    /// `".."` (or [`Step::Parent`]) moves up. A name moves into a compound
    /// entry; an index moves into a list or array element. A name made of
    /// digits is accepted as an index for lists and arrays. On error the
    /// path is left unchanged.
    pub fn descend(&mut self, step: impl Into<Step>) -> Result<&Tag, PathError> {
        let key = match step.into() {
            Step::Parent => return self.ascend(),
            Step::Child(key) => key,
        };
        let (child, key) = self.follow(key)?;
        self.visited.push(child);
        self.components.push(key);
        tracing::trace!(path = %self, "descended");
        Ok(self.current())
    }

    /// Moves up one level and returns the new current tag.
    pub fn ascend(&mut self) -> Result<&Tag, PathError> {
        if self.components.pop().is_none() {
            return Err(PathError::AboveRoot);
        }
        self.visited.pop();
        Ok(self.current())
    }

    /// Renders the keys from the root, each followed by `/`; the root
    /// itself renders as `/`.
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn follow(&self, key: Key) -> Result<(Cow<'a, Tag>, Key), PathError> {
        let current = &self.visited[self.components.len()];
        let key = coerce_key(current, key)?;
        let child = match current {
            Cow::Borrowed(tag) => (*tag).element(&key),
            Cow::Owned(tag) => tag.element(&key).map(|c| Cow::Owned(c.into_owned())),
        };
        match child {
            Some(child) => Ok((child, key)),
            None => Err(match key {
                Key::Name(name) => PathError::NoSuchEntry(name.to_string_lossy().into_owned()),
                Key::Index(i) => PathError::NoSuchIndex(i64::try_from(i).unwrap_or(i64::MAX)),
            }),
        }
    }
}

/// Checks that `key` can address children of `tag`, turning a numeric name
/// into an index where the tag is indexable.
fn coerce_key(tag: &Tag, key: Key) -> Result<Key, PathError> {
    let kind = tag.kind();
    match key {
        Key::Name(name) if kind == TagKind::Compound => Ok(Key::Name(name)),
        Key::Name(name) => match name.to_str().and_then(|s| s.parse::<i64>().ok()) {
            Some(i) => match usize::try_from(i) {
                Ok(i) => coerce_key(tag, Key::Index(i)),
                Err(_) if kind.is_indexable() => Err(PathError::NoSuchIndex(i)),
                Err(_) => Err(PathError::WrongKind {
                    kind,
                    component: ComponentKind::Index,
                }),
            },
            None => Err(PathError::WrongKind {
                kind,
                component: ComponentKind::Name,
            }),
        },
        Key::Index(i) if kind.is_indexable() => Ok(Key::Index(i)),
        Key::Index(_) => Err(PathError::WrongKind {
            kind,
            component: ComponentKind::Index,
        }),
    }
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.components.is_empty() {
            return f.write_str("/");
        }
        for key in &self.components {
            write!(f, "{key}/")?;
        }
        Ok(())
    }
}
