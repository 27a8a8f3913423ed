use super::{NbtString, Tag};

/// A whole NBT document: the root tag and the name stored alongside it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub name: NbtString,
    pub root: Tag,
}

impl Document {
    pub fn new(name: impl Into<NbtString>, root: impl Into<Tag>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    pub fn into_parts(self) -> (NbtString, Tag) {
        (self.name, self.root)
    }
}
