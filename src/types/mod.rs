//! NBT value model: tag kinds, tags, lists, compounds and documents.

mod compound;
mod document;
mod kind;
mod list;
mod string;
mod tag;

pub use compound::Compound;
pub use document::Document;
pub use kind::TagKind;
pub use list::{List, ListElement};
pub use string::{MAX_STRING_LEN, NbtString};
pub use tag::{Key, Tag};
