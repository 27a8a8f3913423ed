//! NBT binary decoding: bytes → `Tag`.

use bytes::Buf;

use crate::error::{DecodeWarning, Decoded, NbtError};
use crate::types::{Compound, Document, List, NbtString, Tag, TagKind};

/// Default nesting limit for lists and compounds.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Per-call decoder state: current nesting and collected warnings.
struct DecodeState {
    depth: usize,
    max_depth: usize,
    warnings: Vec<DecodeWarning>,
}

impl DecodeState {
    fn new(max_depth: usize) -> Self {
        Self {
            depth: 0,
            max_depth,
            warnings: Vec::new(),
        }
    }

    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, NbtError>,
    ) -> Result<T, NbtError> {
        if self.depth >= self.max_depth {
            return Err(NbtError::DepthLimit(self.max_depth));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

/// Decodes a document: one discriminant, name and payload.
///
/// A lone End discriminant yields an End root with an empty name. Bytes
/// after the root are left in `buf`.
pub fn decode_document(
    buf: &mut impl Buf,
    max_depth: usize,
) -> Result<Decoded<Document>, NbtError> {
    let mut state = DecodeState::new(max_depth);
    let document = match decode_named(buf, &mut state)? {
        Some((name, root)) => Document { name, root },
        None => Document::default(),
    };
    Ok(Decoded::new(document, state.warnings))
}

/// Decodes a kind byte, then name and payload unless the kind is End.
fn decode_named(
    buf: &mut impl Buf,
    state: &mut DecodeState,
) -> Result<Option<(NbtString, Tag)>, NbtError> {
    let kind = decode_kind(buf)?;
    if kind == TagKind::End {
        return Ok(None);
    }
    let name = decode_string(buf)?;
    let tag = decode_payload(buf, kind, state)?;
    Ok(Some((name, tag)))
}

fn decode_payload(
    buf: &mut impl Buf,
    kind: TagKind,
    state: &mut DecodeState,
) -> Result<Tag, NbtError> {
    match kind {
        TagKind::End => Ok(Tag::End),
        TagKind::Byte => {
            ensure_remaining(buf, 1)?;
            Ok(Tag::Byte(buf.get_i8()))
        }
        TagKind::Short => {
            ensure_remaining(buf, 2)?;
            Ok(Tag::Short(buf.get_i16()))
        }
        TagKind::Int => {
            ensure_remaining(buf, 4)?;
            Ok(Tag::Int(buf.get_i32()))
        }
        TagKind::Long => {
            ensure_remaining(buf, 8)?;
            Ok(Tag::Long(buf.get_i64()))
        }
        TagKind::Float => {
            ensure_remaining(buf, 4)?;
            Ok(Tag::Float(buf.get_f32()))
        }
        TagKind::Double => {
            ensure_remaining(buf, 8)?;
            Ok(Tag::Double(buf.get_f64()))
        }
        TagKind::ByteArray => decode_byte_array(buf).map(Tag::ByteArray),
        TagKind::String => decode_string(buf).map(Tag::String),
        TagKind::List => state.nested(|state| decode_list(buf, state)).map(Tag::List),
        TagKind::Compound => state
            .nested(|state| decode_compound(buf, state))
            .map(Tag::Compound),
        TagKind::IntArray => decode_int_array(buf).map(Tag::IntArray),
        TagKind::LongArray => decode_long_array(buf).map(Tag::LongArray),
    }
}

fn ensure_remaining(buf: &impl Buf, needed: usize) -> Result<(), NbtError> {
    if buf.remaining() < needed {
        Err(NbtError::Truncated {
            needed,
            remaining: buf.remaining(),
        })
    } else {
        Ok(())
    }
}

fn decode_kind(buf: &mut impl Buf) -> Result<TagKind, NbtError> {
    ensure_remaining(buf, 1)?;
    TagKind::try_from(buf.get_u8())
}

/// Reads a 32-bit element count, rejecting negative values.
fn decode_count(buf: &mut impl Buf, kind: TagKind) -> Result<usize, NbtError> {
    ensure_remaining(buf, 4)?;
    let count = buf.get_i32();
    usize::try_from(count).map_err(|_| NbtError::NegativeCount { kind, count })
}

fn decode_string(buf: &mut impl Buf) -> Result<NbtString, NbtError> {
    ensure_remaining(buf, 2)?;
    let len = usize::from(buf.get_u16());
    ensure_remaining(buf, len)?;
    let mut data = vec![0u8; len];
    buf.copy_to_slice(&mut data);
    Ok(NbtString::from_bytes(data))
}

fn decode_byte_array(buf: &mut impl Buf) -> Result<Vec<i8>, NbtError> {
    let count = decode_count(buf, TagKind::ByteArray)?;
    ensure_remaining(buf, count)?;
    Ok((0..count).map(|_| buf.get_i8()).collect())
}

fn decode_int_array(buf: &mut impl Buf) -> Result<Vec<i32>, NbtError> {
    let count = decode_count(buf, TagKind::IntArray)?;
    ensure_remaining(buf, count.saturating_mul(4))?;
    Ok((0..count).map(|_| buf.get_i32()).collect())
}

fn decode_long_array(buf: &mut impl Buf) -> Result<Vec<i64>, NbtError> {
    let count = decode_count(buf, TagKind::LongArray)?;
    ensure_remaining(buf, count.saturating_mul(8))?;
    Ok((0..count).map(|_| buf.get_i64()).collect())
}

fn decode_list(buf: &mut impl Buf, state: &mut DecodeState) -> Result<List, NbtError> {
    let kind = decode_kind(buf)?;
    let count = decode_count(buf, TagKind::List)?;
    if kind == TagKind::End {
        if count != 0 {
            return Err(NbtError::EndListNotEmpty(count));
        }
        return Ok(List::empty());
    }

    // Every element takes at least one byte, so the remaining input bounds
    // the allocation.
    let mut elements = Vec::with_capacity(count.min(buf.remaining()));
    for _ in 0..count {
        elements.push(decode_payload(buf, kind, state)?);
    }
    Ok(List::from_parts_unchecked(kind, elements))
}

fn decode_compound(buf: &mut impl Buf, state: &mut DecodeState) -> Result<Compound, NbtError> {
    let mut compound = Compound::new();
    loop {
        if !buf.has_remaining() {
            return Err(NbtError::UnterminatedCompound);
        }
        let Some((name, tag)) = decode_named(buf, state)? else {
            break;
        };
        if compound.contains_key(&name) {
            tracing::warn!(%name, "duplicate name in compound, later entry wins");
            state
                .warnings
                .push(DecodeWarning::DuplicateKey { name: name.clone() });
        }
        compound.insert(name, tag);
    }
    Ok(compound)
}
