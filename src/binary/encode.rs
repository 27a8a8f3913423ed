//! NBT binary encoding: `Tag` → bytes.

use bytes::{BufMut, BytesMut};

use crate::error::NbtError;
use crate::types::{Compound, List, MAX_STRING_LEN, Tag, TagKind};

/// Encodes a document root under `name`.
///
/// On error `buf` may hold a partial encoding; callers that write to a
/// stream encode into a scratch buffer first.
pub fn encode_document(buf: &mut BytesMut, name: &[u8], tag: &Tag) -> Result<(), NbtError> {
    encode_named(buf, name, tag)
}

/// Writes a discriminant, then name and payload unless the tag is End.
fn encode_named(buf: &mut BytesMut, name: &[u8], tag: &Tag) -> Result<(), NbtError> {
    buf.put_u8(tag.kind().id());
    if let Tag::End = tag {
        return Ok(());
    }
    encode_string(buf, name)?;
    encode_payload(buf, tag)
}

/// Encodes the payload of `tag` with no discriminant or name.
pub fn encode_payload(buf: &mut BytesMut, tag: &Tag) -> Result<(), NbtError> {
    match tag {
        Tag::End => {}
        Tag::Byte(v) => buf.put_i8(*v),
        Tag::Short(v) => buf.put_i16(*v),
        Tag::Int(v) => buf.put_i32(*v),
        Tag::Long(v) => buf.put_i64(*v),
        Tag::Float(v) => buf.put_f32(*v),
        Tag::Double(v) => buf.put_f64(*v),
        Tag::ByteArray(values) => {
            encode_count(buf, TagKind::ByteArray, values.len())?;
            for v in values {
                buf.put_i8(*v);
            }
        }
        Tag::String(s) => encode_string(buf, s.as_bytes())?,
        Tag::List(list) => encode_list(buf, list)?,
        Tag::Compound(compound) => encode_compound(buf, compound)?,
        Tag::IntArray(values) => {
            encode_count(buf, TagKind::IntArray, values.len())?;
            for v in values {
                buf.put_i32(*v);
            }
        }
        Tag::LongArray(values) => {
            encode_count(buf, TagKind::LongArray, values.len())?;
            for v in values {
                buf.put_i64(*v);
            }
        }
    }
    Ok(())
}

/// Encodes a length-prefixed string (length in bytes, at most 32767).
pub fn encode_string(buf: &mut BytesMut, value: &[u8]) -> Result<(), NbtError> {
    if value.len() > MAX_STRING_LEN {
        return Err(NbtError::StringTooLong(value.len()));
    }
    buf.put_u16(value.len() as u16);
    buf.put_slice(value);
    Ok(())
}

fn encode_count(buf: &mut BytesMut, kind: TagKind, len: usize) -> Result<(), NbtError> {
    let count = i32::try_from(len).map_err(|_| NbtError::TooManyElements { kind, len })?;
    buf.put_i32(count);
    Ok(())
}

fn encode_list(buf: &mut BytesMut, list: &List) -> Result<(), NbtError> {
    let kind = list.element_kind();
    buf.put_u8(kind.id());
    encode_count(buf, TagKind::List, list.len())?;
    for element in list {
        // Elements may have been swapped in place since the list was built.
        if element.kind() != kind {
            return Err(NbtError::ListKindMismatch {
                expected: kind,
                found: element.kind(),
            });
        }
        encode_payload(buf, element)?;
    }
    Ok(())
}

fn encode_compound(buf: &mut BytesMut, compound: &Compound) -> Result<(), NbtError> {
    for (name, tag) in compound {
        if let Tag::End = tag {
            return Err(NbtError::EndEntry(name.clone()));
        }
        encode_named(buf, name.as_bytes(), tag)?;
    }
    buf.put_u8(TagKind::End.id());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NbtString;

    fn encode(name: &str, tag: &Tag) -> Result<Vec<u8>, NbtError> {
        let mut buf = BytesMut::new();
        encode_document(&mut buf, name.as_bytes(), tag)?;
        Ok(buf.to_vec())
    }

    #[test]
    fn end_tag_is_one_zero_byte() {
        assert_eq!(encode("", &Tag::End).unwrap(), vec![0]);
        // The name is dropped along with the payload.
        assert_eq!(encode("ignored", &Tag::End).unwrap(), vec![0]);
    }

    #[test]
    fn compound_layout() {
        let mut c = Compound::new();
        c.insert("int", 0xDEADi32);
        assert_eq!(
            encode("", &Tag::Compound(c)).unwrap(),
            vec![10, 0, 0, 3, 0, 3, b'i', b'n', b't', 0, 0, 0xDE, 0xAD, 0]
        );
    }

    #[test]
    fn list_layout() {
        let list = Tag::List(List::from(vec![1i16, -1]));
        assert_eq!(
            encode("l", &list).unwrap(),
            vec![9, 0, 1, b'l', 2, 0, 0, 0, 2, 0, 1, 0xFF, 0xFF]
        );
        let empty = Tag::List(List::empty());
        assert_eq!(encode("", &empty).unwrap(), vec![9, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn array_layout() {
        assert_eq!(
            encode("", &Tag::IntArray(vec![1, -1])).unwrap(),
            vec![11, 0, 0, 0, 0, 0, 2, 0, 0, 0, 1, 0xFF, 0xFF, 0xFF, 0xFF]
        );
        assert_eq!(
            encode("", &Tag::ByteArray(vec![-128, 127])).unwrap(),
            vec![7, 0, 0, 0, 0, 0, 2, 0x80, 0x7F]
        );
    }

    #[test]
    fn scalars_are_big_endian() {
        assert_eq!(
            encode("", &Tag::Long(1)).unwrap(),
            vec![4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]
        );
        assert_eq!(
            encode("", &Tag::Float(1.5)).unwrap(),
            vec![5, 0, 0, 0x3F, 0xC0, 0, 0]
        );
    }

    #[test]
    fn string_length_boundary() {
        let ok = Tag::String(NbtString::from_bytes(vec![b'a'; MAX_STRING_LEN]));
        let bytes = encode("", &ok).unwrap();
        assert_eq!(&bytes[3..5], &[0x7F, 0xFF]);
        assert_eq!(bytes.len(), 5 + MAX_STRING_LEN);

        let too_long = Tag::String(NbtString::from_bytes(vec![b'a'; MAX_STRING_LEN + 1]));
        assert!(matches!(
            encode("", &too_long),
            Err(NbtError::StringTooLong(32768))
        ));
    }

    #[test]
    fn long_names_are_rejected() {
        let name = "n".repeat(MAX_STRING_LEN + 1);
        assert!(matches!(
            encode(&name, &Tag::Int(1)),
            Err(NbtError::StringTooLong(_))
        ));
    }

    #[test]
    fn list_kind_mismatch_after_mutation() {
        let mut list = List::from(vec![1i32, 2, 3]);
        *list.get_mut(2).unwrap() = Tag::Long(3);
        let err = encode("", &Tag::List(list)).unwrap_err();
        assert!(matches!(
            err,
            NbtError::ListKindMismatch {
                expected: TagKind::Int,
                found: TagKind::Long
            }
        ));
    }

    #[test]
    fn end_compound_entry_is_rejected() {
        let mut c = Compound::new();
        c.insert("oops", Tag::End);
        assert!(matches!(
            encode("", &Tag::Compound(c)),
            Err(NbtError::EndEntry(name)) if name == "oops"
        ));
    }
}
