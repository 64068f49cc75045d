// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::base::write::ZipFileWriter;
use crate::date::ZipDateTime;
use crate::entry::{path, ZipEntryOptions};
use crate::error::Result;
use crate::spec::attribute::resolve_flags;
use crate::spec::compression::Compression;
use crate::spec::counter::WideCounter;
use crate::spec::record::{self, EntryRecord};

use futures_lite::io::{AsyncWrite, AsyncWriteExt};

/// An entry writer for empty directories, which carry no data and so need no data descriptor.
pub(crate) struct EntryDirWriter<'b, W> {
    writer: &'b mut ZipFileWriter<W>,
    entry: ZipEntryOptions,
}

impl<'b, W: AsyncWrite + Unpin> EntryDirWriter<'b, W> {
    pub(crate) fn from_raw(writer: &'b mut ZipFileWriter<W>, entry: ZipEntryOptions) -> Self {
        Self { writer, entry }
    }

    pub(crate) async fn write(self) -> Result<()> {
        let Self { writer, entry } = self;

        writer.ensure_writable()?;

        let mode = writer.options.mode();
        let filename = path::normalize_dir(&entry.filename)?;
        let record = EntryRecord {
            filename: &filename,
            comment: entry.comment.as_deref().unwrap_or_default(),
            compression: Compression::Stored,
            is_dir: true,
            flags: resolve_flags(&filename, entry.comment.as_deref(), false),
            date: entry.last_modification_date.unwrap_or_else(ZipDateTime::now),
            external_attribute: writer.options.attributes.directory(),
            mode,
        };

        let lh_offset = writer.writer.counter();
        let zero = WideCounter::zero(mode);
        let cdr = record::central_directory_record(&record, 0, &zero, &zero, &lh_offset)?;
        let lfh = record::local_file_header(&record)?;

        tracing::debug!(filename = %filename, offset = lh_offset.get(), "writing directory entry");
        writer.writer.write_all(&lfh).await?;
        writer.writer.flush().await?;

        writer.push_cd_record(cdr);

        Ok(())
    }
}
