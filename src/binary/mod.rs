//! NBT binary format.
//!
//! Every tag is a one-byte kind discriminant, a length-prefixed name and a
//! kind-specific payload. All multi-byte values are big-endian.

pub mod decode;
pub mod encode;

pub use decode::{DEFAULT_MAX_DEPTH, decode_document};
pub use encode::{encode_document, encode_payload};
