//! Reads a document's bytes out of its container.

use std::io::Read;

use bytes::Bytes;
use flate2::bufread::GzDecoder;
use tokio::io::{AsyncRead, AsyncReadExt};

use super::{Encoding, GZIP_HEADER_LEN, sniff};
use crate::error::NbtError;

/// Reads a whole stream and strips its compression container.
///
/// With detection on, the first [`GZIP_HEADER_LEN`] bytes decide between
/// gzip and raw. With detection off the bytes are returned untouched.
pub struct ContainerReader<R> {
    reader: R,
    detect: bool,
}

impl<R> ContainerReader<R> {
    /// A reader that detects gzip compression.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            detect: true,
        }
    }

    /// A reader that treats the stream as an uncompressed document.
    pub fn raw(reader: R) -> Self {
        Self {
            reader,
            detect: false,
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn unwrap_container(&self, data: Vec<u8>) -> Result<(Bytes, Encoding), NbtError> {
        let encoding = if self.detect {
            sniff(&data[..data.len().min(GZIP_HEADER_LEN)])
        } else {
            Encoding::Raw
        };

        match encoding {
            Encoding::Raw => {
                tracing::debug!(bytes = data.len(), "reading raw document");
                Ok((Bytes::from(data), Encoding::Raw))
            }
            Encoding::Gzip => {
                let mut inflated = Vec::new();
                let mut rest = &data[..];
                // Members are inflated one at a time; anything after the last
                // one that does not start a new gzip header is left alone.
                loop {
                    let mut member = GzDecoder::new(rest);
                    member.read_to_end(&mut inflated)?;
                    rest = member.into_inner();
                    if sniff(rest) != Encoding::Gzip {
                        break;
                    }
                }
                if !rest.is_empty() {
                    tracing::debug!(trailing = rest.len(), "ignoring bytes after gzip stream");
                }
                tracing::debug!(
                    compressed = data.len(),
                    inflated = inflated.len(),
                    "reading gzip document"
                );
                Ok((Bytes::from(inflated), Encoding::Gzip))
            }
        }
    }
}

impl<R: Read> ContainerReader<R> {
    /// Reads to end of stream and returns the uncompressed document bytes
    /// along with the container that held them.
    pub fn read_payload(&mut self) -> Result<(Bytes, Encoding), NbtError> {
        let mut data = Vec::new();
        self.reader.read_to_end(&mut data)?;
        self.unwrap_container(data)
    }
}

impl<R: AsyncRead + Unpin> ContainerReader<R> {
    /// Async counterpart of [`read_payload`](Self::read_payload).
    pub async fn read_payload_async(&mut self) -> Result<(Bytes, Encoding), NbtError> {
        let mut data = Vec::new();
        self.reader.read_to_end(&mut data).await?;
        self.unwrap_container(data)
    }
}
