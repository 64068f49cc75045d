// Copyright (c) 2021 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::base::write::io::offset::AsyncOffsetWriter;
use crate::base::write::ZipFileWriter;
use crate::codec;
use crate::date::ZipDateTime;
use crate::entry::{path, ZipEntryOptions};
use crate::error::{Result, ZipError};
use crate::spec::attribute::resolve_flags;
use crate::spec::consts::STREAM_CHUNK_SIZE;
use crate::spec::counter::WideCounter;
use crate::spec::record::{self, EntryRecord};

use std::io::ErrorKind;

use crc32fast::Hasher;
use futures_lite::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// An entry writer which streams data of an unknown size from a source into the archive.
///
/// # Note
/// This writer cannot be manually constructed; instead, use [`ZipFileWriter::write_entry_stream()`].
pub(crate) struct EntryStreamWriter<'b, W, R> {
    writer: &'b mut ZipFileWriter<W>,
    entry: ZipEntryOptions,
    source: R,
}

impl<'b, W, R> EntryStreamWriter<'b, W, R>
where
    W: AsyncWrite + Unpin,
    R: AsyncRead + Unpin,
{
    pub(crate) fn from_raw(writer: &'b mut ZipFileWriter<W>, entry: ZipEntryOptions, source: R) -> Self {
        Self { writer, entry, source }
    }

    pub(crate) async fn write(self) -> Result<()> {
        let Self { writer, entry, mut source } = self;

        writer.ensure_writable()?;

        let mode = writer.options.mode();
        let compression = entry.compression.unwrap_or(writer.options.compression);
        let level = entry.level.unwrap_or(writer.options.level);
        let mut codec = codec::from_options(compression, level)?;

        let filename = path::normalize(&entry.filename)?;
        let record = EntryRecord {
            filename: &filename,
            comment: entry.comment.as_deref().unwrap_or_default(),
            compression: codec.compression(),
            is_dir: false,
            flags: resolve_flags(&filename, entry.comment.as_deref(), true),
            date: entry.last_modification_date.unwrap_or_else(ZipDateTime::now),
            external_attribute: writer.options.attributes.file(),
            mode,
        };

        // Building a provisional central record validates the name & comment lengths before any bytes are written.
        let lh_offset = writer.writer.counter();
        let zero = WideCounter::zero(mode);
        record::central_directory_record(&record, 0, &zero, &zero, &lh_offset)?;
        let lfh = record::local_file_header(&record)?;

        tracing::debug!(filename = %filename, offset = lh_offset.get(), ?compression, ?level, "writing stream entry");
        writer.writer.write_all(&lfh).await?;

        let mut hasher = Hasher::new();
        let mut uncompressed = WideCounter::zero(mode);
        let mut compressed = WideCounter::zero(mode);
        let mut buffer = vec![0; STREAM_CHUNK_SIZE];

        loop {
            let read = match source.read(&mut buffer).await {
                Ok(0) => break,
                Ok(read) => read,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(ZipError::UpstreamReadError(err)),
            };

            let chunk = &buffer[..read];
            uncompressed.add(read as u64)?;
            hasher.update(chunk);

            let output = codec.update(chunk)?;
            emit(&mut writer.writer, &output, &mut compressed).await?;
        }

        let output = codec.finish()?;
        emit(&mut writer.writer, &output, &mut compressed).await?;

        let crc = hasher.finalize();
        writer.writer.write_all(&record::data_descriptor(crc, &compressed, &uncompressed)).await?;
        writer.writer.flush().await?;

        tracing::debug!(
            filename = %filename,
            crc,
            compressed = compressed.get(),
            uncompressed = uncompressed.get(),
            "stream entry complete"
        );

        let cdr = record::central_directory_record(&record, crc, &compressed, &uncompressed, &lh_offset)?;
        writer.push_cd_record(cdr);

        Ok(())
    }
}

/// Forwards compressed output to the archive and flushes it, so no more than one chunk is held back.
async fn emit<W>(writer: &mut AsyncOffsetWriter<W>, output: &[u8], compressed: &mut WideCounter) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    if output.is_empty() {
        return Ok(());
    }

    compressed.add(output.len() as u64)?;
    writer.write_all(output).await?;
    writer.flush().await?;

    Ok(())
}
