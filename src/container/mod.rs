//! Compression containers around encoded documents.
//!
//! Persisted documents are conventionally gzip-compressed, but raw documents
//! are common too. Reading sniffs the gzip member header to decide; writing
//! uses whichever encoding the caller picks.

pub mod reader;
pub mod writer;

pub use reader::ContainerReader;
pub use writer::ContainerWriter;

/// Length of a gzip member header (RFC 1952 §2.3).
pub const GZIP_HEADER_LEN: usize = 10;

const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];
const GZIP_METHOD_DEFLATE: u8 = 0x08;
const GZIP_RESERVED_FLAGS: u8 = 0xE0;

/// How a document's bytes are wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Gzip,
    Raw,
}

/// Inspects the start of a stream for a gzip member header.
///
/// Anything that is not a complete, well-formed header is treated as raw.
pub fn sniff(prefix: &[u8]) -> Encoding {
    match prefix {
        [m0, m1, method, flags, ..]
            if prefix.len() >= GZIP_HEADER_LEN
                && [*m0, *m1] == GZIP_MAGIC
                && *method == GZIP_METHOD_DEFLATE
                && flags & GZIP_RESERVED_FLAGS == 0 =>
        {
            Encoding::Gzip
        }
        _ => Encoding::Raw,
    }
}
