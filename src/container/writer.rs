//! Writes encoded documents, optionally gzip-compressed.

use std::borrow::Cow;
use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::Encoding;
use crate::error::NbtError;

/// Wraps an encoded document in a container and writes it out in one piece.
pub struct ContainerWriter<W> {
    writer: W,
    encoding: Encoding,
    level: Compression,
}

impl<W> ContainerWriter<W> {
    pub fn new(writer: W, encoding: Encoding) -> Self {
        Self {
            writer,
            encoding,
            level: Compression::default(),
        }
    }

    /// Sets the gzip compression level. Ignored for raw output.
    pub fn level(mut self, level: Compression) -> Self {
        self.level = level;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn wrap<'a>(&self, payload: &'a [u8]) -> Result<Cow<'a, [u8]>, NbtError> {
        match self.encoding {
            Encoding::Raw => Ok(Cow::Borrowed(payload)),
            Encoding::Gzip => {
                let mut encoder = GzEncoder::new(Vec::with_capacity(payload.len() / 2), self.level);
                encoder.write_all(payload)?;
                Ok(Cow::Owned(encoder.finish()?))
            }
        }
    }
}

impl<W: Write> ContainerWriter<W> {
    /// Writes `payload` in the configured container and flushes.
    pub fn write_payload(&mut self, payload: &[u8]) -> Result<(), NbtError> {
        let data = self.wrap(payload)?;
        self.writer.write_all(&data)?;
        self.writer.flush()?;
        tracing::debug!(
            encoding = ?self.encoding,
            payload = payload.len(),
            written = data.len(),
            "wrote document"
        );
        Ok(())
    }
}

impl<W: AsyncWrite + Unpin> ContainerWriter<W> {
    /// Async counterpart of [`write_payload`](Self::write_payload).
    pub async fn write_payload_async(&mut self, payload: &[u8]) -> Result<(), NbtError> {
        let data = self.wrap(payload)?;
        self.writer.write_all(&data).await?;
        self.writer.flush().await?;
        tracing::debug!(
            encoding = ?self.encoding,
            payload = payload.len(),
            written = data.len(),
            "wrote document"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{ContainerReader, sniff};

    #[test]
    fn raw_output_is_verbatim() {
        let mut output = Vec::new();
        ContainerWriter::new(&mut output, Encoding::Raw)
            .write_payload(&[10, 0, 0, 0])
            .unwrap();
        assert_eq!(output, vec![10, 0, 0, 0]);
    }

    #[test]
    fn gzip_output_is_detected_and_inflates() {
        let mut output = Vec::new();
        ContainerWriter::new(&mut output, Encoding::Gzip)
            .level(Compression::best())
            .write_payload(&[10, 0, 0, 0])
            .unwrap();
        assert_eq!(sniff(&output), Encoding::Gzip);

        let (payload, _) = ContainerReader::new(&output[..]).read_payload().unwrap();
        assert_eq!(&payload[..], &[10, 0, 0, 0]);
    }

    #[test]
    fn uncompressed_level_still_produces_gzip() {
        let mut output = Vec::new();
        ContainerWriter::new(&mut output, Encoding::Gzip)
            .level(Compression::none())
            .write_payload(&[0])
            .unwrap();
        assert_eq!(sniff(&output), Encoding::Gzip);
    }

    #[tokio::test]
    async fn async_write() {
        let mut output = Vec::new();
        let mut writer = ContainerWriter::new(&mut output, Encoding::Gzip);
        writer.write_payload_async(&[1, 0, 0, 5]).await.unwrap();

        let (payload, encoding) = ContainerReader::new(&output[..]).read_payload().unwrap();
        assert_eq!(encoding, Encoding::Gzip);
        assert_eq!(&payload[..], &[1, 0, 0, 5]);
    }
}
