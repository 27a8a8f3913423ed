//! nbtr — A pure-Rust NBT (Named Binary Tag) library.
//!
//! NBT is the compact, self-describing binary tree format used to persist
//! game state. This crate reads and writes it byte-for-byte, exposes a typed
//! value model over the result and lets callers walk loaded documents.
//!
//! # Architecture
//!
//! - **`types`** — Value model (`Tag`, `List`, `Compound`, `NbtString`, `Document`)
//! - **`binary`** — Recursive binary decoding/encoding of tags
//! - **`container`** — Gzip detection and compression around encoded documents
//! - **`codec`** — Whole-document load/store with the `Codec` builder
//! - **`path`** — Cursor navigation through a loaded tree

pub mod binary;
pub mod codec;
pub mod container;
pub mod error;
pub mod path;
pub mod types;

pub use codec::{Codec, load, load_uncompressed, store, store_uncompressed};
pub use error::{DecodeWarning, Decoded, NbtError, PathError};
pub use path::{Path, Step};
pub use types::{Compound, Document, Key, List, NbtString, Tag, TagKind};
