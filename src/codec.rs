//! Whole-document load and store.

use std::io::{Read, Write};

use bytes::{Buf, Bytes, BytesMut};
use flate2::Compression;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::binary::{DEFAULT_MAX_DEPTH, decode_document, encode_document};
use crate::container::{ContainerReader, ContainerWriter, Encoding};
use crate::error::{Decoded, NbtError};
use crate::types::{Document, Tag};

/// Loads and stores documents with configurable limits.
///
/// ```
/// use nbtr::{Codec, Compound, Tag};
///
/// let mut root = Compound::new();
/// root.insert("foo", "bar");
///
/// let codec = Codec::new().max_depth(64);
/// let mut file = Vec::new();
/// codec.store(&mut file, "top", &Tag::Compound(root.clone())).unwrap();
///
/// let doc = codec.load(&file[..]).unwrap().into_value();
/// assert_eq!(doc.name, "top");
/// assert_eq!(doc.root, Tag::Compound(root));
/// ```
#[derive(Debug, Clone)]
pub struct Codec {
    max_depth: usize,
    compression: Compression,
}

impl Default for Codec {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            compression: Compression::default(),
        }
    }
}

impl Codec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how deeply lists and compounds may nest when decoding.
    pub fn max_depth(mut self, limit: usize) -> Self {
        self.max_depth = limit;
        self
    }

    /// Sets the gzip level used by [`store`](Self::store).
    pub fn compression(mut self, level: Compression) -> Self {
        self.compression = level;
        self
    }

    /// Reads a document, decompressing it first if it is gzipped.
    pub fn load<R: Read>(&self, reader: R) -> Result<Decoded<Document>, NbtError> {
        let (payload, _) = ContainerReader::new(reader).read_payload()?;
        self.decode(payload)
    }

    /// Reads a document that is known to be uncompressed.
    pub fn load_uncompressed<R: Read>(&self, reader: R) -> Result<Decoded<Document>, NbtError> {
        let (payload, _) = ContainerReader::raw(reader).read_payload()?;
        self.decode(payload)
    }

    /// Decodes a document held in memory, detecting compression.
    pub fn decode_slice(&self, data: &[u8]) -> Result<Decoded<Document>, NbtError> {
        self.load(data)
    }

    /// Writes a gzip-compressed document.
    ///
    /// Nothing reaches `writer` if the tree cannot be encoded.
    pub fn store<W: Write>(
        &self,
        writer: W,
        name: impl AsRef<[u8]>,
        tag: &Tag,
    ) -> Result<(), NbtError> {
        let payload = self.encode(name.as_ref(), tag)?;
        ContainerWriter::new(writer, Encoding::Gzip)
            .level(self.compression)
            .write_payload(&payload)
    }

    /// Writes an uncompressed document. Mostly useful for debugging.
    pub fn store_uncompressed<W: Write>(
        &self,
        writer: W,
        name: impl AsRef<[u8]>,
        tag: &Tag,
    ) -> Result<(), NbtError> {
        let payload = self.encode(name.as_ref(), tag)?;
        ContainerWriter::new(writer, Encoding::Raw).write_payload(&payload)
    }

    /// Encodes an uncompressed document into a fresh buffer.
    pub fn encode_to_vec(&self, name: impl AsRef<[u8]>, tag: &Tag) -> Result<Vec<u8>, NbtError> {
        Ok(self.encode(name.as_ref(), tag)?.to_vec())
    }

    /// Async counterpart of [`load`](Self::load).
    pub async fn load_async<R: AsyncRead + Unpin>(
        &self,
        reader: R,
    ) -> Result<Decoded<Document>, NbtError> {
        let (payload, _) = ContainerReader::new(reader).read_payload_async().await?;
        self.decode(payload)
    }

    /// Async counterpart of [`store`](Self::store).
    pub async fn store_async<W: AsyncWrite + Unpin>(
        &self,
        writer: W,
        name: impl AsRef<[u8]>,
        tag: &Tag,
    ) -> Result<(), NbtError> {
        let payload = self.encode(name.as_ref(), tag)?;
        ContainerWriter::new(writer, Encoding::Gzip)
            .level(self.compression)
            .write_payload_async(&payload)
            .await
    }

    fn decode(&self, mut payload: Bytes) -> Result<Decoded<Document>, NbtError> {
        let decoded = decode_document(&mut payload, self.max_depth)?;
        if payload.has_remaining() {
            tracing::debug!(trailing = payload.remaining(), "ignoring bytes after document");
        }
        Ok(decoded)
    }

    fn encode(&self, name: &[u8], tag: &Tag) -> Result<BytesMut, NbtError> {
        let mut buf = BytesMut::new();
        encode_document(&mut buf, name, tag)?;
        Ok(buf)
    }
}

/// Reads a document with the default [`Codec`], detecting compression.
pub fn load<R: Read>(reader: R) -> Result<Decoded<Document>, NbtError> {
    Codec::default().load(reader)
}

/// Reads an uncompressed document with the default [`Codec`].
pub fn load_uncompressed<R: Read>(reader: R) -> Result<Decoded<Document>, NbtError> {
    Codec::default().load_uncompressed(reader)
}

/// Writes a gzip-compressed document with the default [`Codec`].
pub fn store<W: Write>(writer: W, name: impl AsRef<[u8]>, tag: &Tag) -> Result<(), NbtError> {
    Codec::default().store(writer, name, tag)
}

/// Writes an uncompressed document with the default [`Codec`].
pub fn store_uncompressed<W: Write>(
    writer: W,
    name: impl AsRef<[u8]>,
    tag: &Tag,
) -> Result<(), NbtError> {
    Codec::default().store_uncompressed(writer, name, tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::sniff;
    use crate::error::DecodeWarning;
    use crate::types::{Compound, List, NbtString, TagKind};

    fn level() -> Tag {
        let mut player = Compound::new();
        player.insert("Name", "Steve");
        player.insert("Pos", List::from(vec![0.5f64, 70.0, -12.25]));
        player.insert("XpLevel", 30i32);

        let mut root = Compound::new();
        root.insert("Player", player);
        root.insert("RandomSeed", 8_675_309i64);
        root.insert("GameRules", Compound::new());
        root.insert("Sections", List::from(vec![vec![0i64, 1], vec![2i64]]));
        Tag::Compound(root)
    }

    #[test]
    fn compressed_round_trip() {
        let tag = level();
        let mut file = Vec::new();
        store(&mut file, "Data", &tag).unwrap();
        assert_eq!(sniff(&file), Encoding::Gzip);

        let decoded = load(&file[..]).unwrap();
        assert!(decoded.is_clean());
        assert_eq!(decoded.value, Document::new("Data", tag));
    }

    #[test]
    fn compression_is_transparent() {
        let tag = level();
        let mut compressed = Vec::new();
        let mut raw = Vec::new();
        store(&mut compressed, "Data", &tag).unwrap();
        store_uncompressed(&mut raw, "Data", &tag).unwrap();
        assert_ne!(compressed, raw);

        let a = load(&compressed[..]).unwrap().into_value();
        let b = load(&raw[..]).unwrap().into_value();
        let c = load_uncompressed(&raw[..]).unwrap().into_value();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn load_uncompressed_does_not_inflate() {
        let mut compressed = Vec::new();
        store(&mut compressed, "", &Tag::Int(1)).unwrap();
        // A gzip magic byte is not a valid tag kind.
        assert!(matches!(
            load_uncompressed(&compressed[..]),
            Err(NbtError::InvalidKind(0x1F))
        ));
    }

    #[test]
    fn failed_store_writes_nothing() {
        let mut list = List::from(vec!["a", "b"]);
        *list.get_mut(0).unwrap() = Tag::Int(0);
        let mut root = Compound::new();
        root.insert("ok", 1i8);
        root.insert("bad", list);

        let mut out = Vec::new();
        let err = store(&mut out, "", &Tag::Compound(root.clone())).unwrap_err();
        assert!(matches!(
            err,
            NbtError::ListKindMismatch {
                expected: TagKind::String,
                found: TagKind::Int
            }
        ));
        assert!(out.is_empty());

        assert!(store_uncompressed(&mut out, "", &Tag::Compound(root)).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn duplicate_warning_survives_load() {
        let data = [10, 0, 0, 1, 0, 1, b'x', 1, 1, 0, 1, b'x', 2, 0];
        let decoded = load(&data[..]).unwrap();
        assert_eq!(
            decoded.warnings,
            vec![DecodeWarning::DuplicateKey {
                name: NbtString::from("x")
            }]
        );
        assert_eq!(decoded.value.root.get("x"), Some(&Tag::Byte(2)));
    }

    #[test]
    fn max_depth_is_configurable() {
        let inner = List::from(vec![List::from(vec![List::from(vec![1i8])])]);
        let bytes = Codec::new().encode_to_vec("", &Tag::List(inner)).unwrap();

        assert!(Codec::new().max_depth(3).decode_slice(&bytes).is_ok());
        assert!(matches!(
            Codec::new().max_depth(2).decode_slice(&bytes),
            Err(NbtError::DepthLimit(2))
        ));
    }

    #[test]
    fn compression_level_is_applied() {
        let tag = Tag::ByteArray(vec![0; 4096]);
        let mut small = Vec::new();
        let mut stored = Vec::new();
        Codec::new().compression(Compression::best()).store(&mut small, "", &tag).unwrap();
        Codec::new().compression(Compression::none()).store(&mut stored, "", &tag).unwrap();
        assert!(small.len() < stored.len());
        assert_eq!(load(&stored[..]).unwrap().value.root, tag);
    }

    #[test]
    fn end_document_round_trip() {
        let mut out = Vec::new();
        store_uncompressed(&mut out, "", &Tag::End).unwrap();
        assert_eq!(out, vec![0]);
        assert_eq!(load(&out[..]).unwrap().value.root, Tag::End);
    }

    #[test]
    fn truncated_gzip_document() {
        let mut file = Vec::new();
        store(&mut file, "Data", &level()).unwrap();
        file.truncate(file.len() / 2);
        assert!(load(&file[..]).unwrap_err().is_truncation());
    }

    #[test]
    fn padding_after_gzip_document_is_ignored() {
        let mut root = Compound::new();
        root.insert("a", 1i8);
        let tag = Tag::Compound(root);

        let mut file = Vec::new();
        store(&mut file, "", &tag).unwrap();
        file.extend_from_slice(&[0; 4]);

        let doc = load(&file[..]).unwrap().into_value();
        assert_eq!(doc.root, tag);
    }

    #[tokio::test]
    async fn async_round_trip() {
        let tag = level();
        let codec = Codec::new();
        let mut file = Vec::new();
        codec.store_async(&mut file, "Data", &tag).await.unwrap();
        let doc = codec.load_async(&file[..]).await.unwrap().into_value();
        assert_eq!(doc.root, tag);
    }

    #[tokio::test]
    async fn independent_documents_decode_concurrently() {
        let mut handles = Vec::new();
        for i in 0..8i32 {
            handles.push(tokio::spawn(async move {
                let tag = Tag::IntArray(vec![i; 16]);
                let mut file = Vec::new();
                store(&mut file, format!("doc{i}"), &tag).unwrap();
                let doc = Codec::new().load_async(&file[..]).await.unwrap().into_value();
                (doc, tag)
            }));
        }
        for handle in handles {
            let (doc, tag) = handle.await.unwrap();
            assert_eq!(doc.root, tag);
        }
    }
}
