// Copyright (c) 2021-2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! A module which supports writing ZIP files to forward-only outputs.
//!
//! Every entry is written exactly once and in order: a local file header, the entry's data as it's compressed, and
//! a trailing data descriptor carrying the CRC & sizes which weren't known when the header was written. The output
//! is never seeked, and no more than a single chunk of an entry is held in memory at once.
//!
//! # Example
//! ```no_run
//! # use async_zip_stream::{base::write::ZipFileWriter, ZipEntryBuilder, Compression};
//! # use async_zip_stream::error::ZipError;
//! # use futures_lite::io::Cursor;
//! #
//! # async fn run() -> Result<(), ZipError> {
//! let mut writer = ZipFileWriter::new(Vec::<u8>::new());
//!
//! let source = Cursor::new(b"This is an example file.".to_vec());
//! let opts = ZipEntryBuilder::new(String::from("foo.txt")).compression(Compression::Stored);
//!
//! writer.write_empty_dir("docs").await?;
//! writer.write_entry_stream(opts, source).await?;
//! writer.close().await?;
//!
//! let archive: Vec<u8> = writer.into_inner();
//! #   Ok(())
//! # }
//! ```

pub(crate) mod entry_dir;
pub(crate) mod entry_stream;
pub(crate) mod io;

#[cfg(feature = "tokio")]
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};

use crate::entry::ZipEntryOptions;
use crate::error::{Result, Zip64ErrorCase, ZipError};
use crate::opts::ZipWriterOptions;
use crate::spec::consts::NON_ZIP64_MAX_NUM_FILES;
use crate::spec::counter::WideCounter;
use crate::spec::record;

use entry_dir::EntryDirWriter;
use entry_stream::EntryStreamWriter;
use io::offset::AsyncOffsetWriter;

use futures_lite::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

/// A ZIP file writer which acts over AsyncWrite implementers.
///
/// # Lifecycle
/// The writer is open until [`ZipFileWriter::close()`] succeeds, after which it's finalised: any further attempt to
/// add an entry or to close it again fails with [`ZipError::WriterFinalized`] and writes nothing.
///
/// # Note
/// - [`ZipFileWriter::close()`] must be called before the writer goes out of scope.
/// - Failing writes are not retried. As bytes already written can't be taken back, an archive whose output failed
///   mid-entry should be discarded by the caller.
pub struct ZipFileWriter<W> {
    pub(crate) writer: AsyncOffsetWriter<W>,
    pub(crate) cd_records: Vec<Vec<u8>>,
    pub(crate) options: ZipWriterOptions,
    entries: u64,
    finalized: bool,
}

impl<W: AsyncWrite + Unpin> ZipFileWriter<W> {
    /// Construct a new ZIP file writer with the default options.
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, ZipWriterOptions::default())
    }

    /// Construct a new ZIP file writer with the provided options.
    pub fn with_options(writer: W, options: ZipWriterOptions) -> Self {
        Self {
            writer: AsyncOffsetWriter::new(writer, WideCounter::zero(options.mode())),
            cd_records: Vec::new(),
            options,
            entries: 0,
            finalized: false,
        }
    }

    /// Write a file entry whose data is read from `source` until it's exhausted.
    ///
    /// The data is compressed and forwarded to the output chunk by chunk, flushing after each one, and followed by a
    /// data descriptor. Unsupported compression and invalid options are reported before anything is written.
    pub async fn write_entry_stream<E, R>(&mut self, entry: E, source: R) -> Result<()>
    where
        E: Into<ZipEntryOptions>,
        R: AsyncRead + Unpin,
    {
        EntryStreamWriter::from_raw(self, entry.into(), source).write().await
    }

    /// Write an empty directory entry.
    ///
    /// The entry's filename is suffixed with a trailing slash if it doesn't already have one.
    pub async fn write_empty_dir<E: Into<ZipEntryOptions>>(&mut self, entry: E) -> Result<()> {
        EntryDirWriter::from_raw(self, entry.into()).write().await
    }

    /// Completes the archive.
    ///
    /// This includes:
    /// - Writing all central directory headers, in the order their entries were written.
    /// - Writing the Zip64 end of central directory record & locator, if in Zip64 mode.
    /// - Writing the end of central directory record and the file comment.
    /// - Flushing the inner writer.
    ///
    /// The inner writer isn't closed; use [`ZipFileWriter::into_inner()`] to take it back.
    #[tracing::instrument(skip_all, fields(entries = self.entries))]
    pub async fn close(&mut self) -> Result<()> {
        self.ensure_open()?;

        let mode = self.options.mode();
        let cd_offset = self.writer.offset();
        let cd_size: u64 = self.cd_records.iter().map(|record| record.len() as u64).sum();
        let comment = self.options.comment.as_deref().unwrap_or_default();

        // Everything trailing the central directory is built up front so that invalid values are reported before
        // any of the closing bytes are written.
        let mut trailer = Vec::new();
        if mode.is_enabled() {
            let eocdr_offset = cd_offset + cd_size;
            trailer.extend(record::zip64_end_of_central_directory_record(self.entries, cd_size, cd_offset));
            trailer.extend(record::zip64_end_of_central_directory_locator(eocdr_offset));
        }
        trailer.extend(record::end_of_central_directory_record(self.entries, cd_size, cd_offset, comment, mode)?);

        for record in &self.cd_records {
            self.writer.write_all(record).await?;
        }
        self.writer.write_all(&trailer).await?;
        self.writer.flush().await?;

        tracing::debug!(cd_offset, cd_size, archive_size = self.writer.offset(), "archive finalised");

        self.finalized = true;
        self.cd_records = Vec::new();

        Ok(())
    }

    /// Returns the number of bytes written to the inner writer so far.
    pub fn offset(&self) -> u64 {
        self.writer.offset()
    }

    /// Returns the number of entries written so far.
    pub fn entry_count(&self) -> u64 {
        self.entries
    }

    /// Returns whether the archive is written with Zip64 structures.
    pub fn is_zip64(&self) -> bool {
        self.options.zip64
    }

    /// Returns whether [`ZipFileWriter::close()`] has completed.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Returns a mutable reference to the inner writer.
    ///
    /// Care should be taken when using this inner writer as doing so may invalidate internal state of this writer.
    pub fn inner_mut(&mut self) -> &mut W {
        self.writer.inner_mut()
    }

    /// Consumes this ZIP writer and returns the inner writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    pub(crate) fn ensure_open(&self) -> Result<()> {
        match self.finalized {
            true => Err(ZipError::WriterFinalized),
            false => Ok(()),
        }
    }

    /// Ensures another entry may be added, without changing any state.
    pub(crate) fn ensure_writable(&self) -> Result<()> {
        self.ensure_open()?;

        if !self.options.zip64 && self.entries >= NON_ZIP64_MAX_NUM_FILES as u64 {
            return Err(ZipError::Zip64Needed(Zip64ErrorCase::TooManyFiles));
        }

        Ok(())
    }

    /// Records a completed entry's central directory header.
    pub(crate) fn push_cd_record(&mut self, record: Vec<u8>) {
        self.cd_records.push(record);
        self.entries += 1;
    }
}

#[cfg(feature = "tokio")]
impl<W> ZipFileWriter<Compat<W>>
where
    W: tokio::io::AsyncWrite + Unpin,
{
    /// Construct a new ZIP file writer from a [`tokio`] writer.
    pub fn with_tokio(writer: W) -> ZipFileWriter<Compat<W>> {
        Self::new(writer.compat_write())
    }

    /// Construct a new ZIP file writer from a [`tokio`] writer with the provided options.
    pub fn with_tokio_options(writer: W, options: ZipWriterOptions) -> ZipFileWriter<Compat<W>> {
        Self::with_options(writer.compat_write(), options)
    }
}
