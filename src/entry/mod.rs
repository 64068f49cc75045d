// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

pub mod builder;
pub(crate) mod path;

use crate::date::ZipDateTime;
use crate::entry::builder::ZipEntryBuilder;
use crate::spec::compression::{Compression, CompressionLevel};

/// The per-entry options supplied when adding an entry to an archive.
///
/// Options left unset fall back to the writer's defaults (see [`ZipWriterOptions`]), and a missing modification date
/// falls back to [`ZipDateTime::now()`].
///
/// # Builder pattern
/// Options are immutable once built. To construct them, the [`ZipEntryBuilder`] builder must be used, or a filename
/// may be converted directly via the [`From`] implementations for [`String`] and `&str`.
///
/// [`ZipWriterOptions`]: crate::ZipWriterOptions
#[derive(Debug, Clone)]
pub struct ZipEntryOptions {
    pub(crate) filename: String,
    pub(crate) compression: Option<Compression>,
    pub(crate) level: Option<CompressionLevel>,
    pub(crate) last_modification_date: Option<ZipDateTime>,
    pub(crate) comment: Option<String>,
}

impl From<ZipEntryBuilder> for ZipEntryOptions {
    fn from(builder: ZipEntryBuilder) -> Self {
        builder.0
    }
}

impl From<String> for ZipEntryOptions {
    fn from(filename: String) -> Self {
        ZipEntryOptions::new(filename)
    }
}

impl From<&str> for ZipEntryOptions {
    fn from(filename: &str) -> Self {
        ZipEntryOptions::new(filename.to_string())
    }
}

impl ZipEntryOptions {
    pub(crate) fn new(filename: String) -> Self {
        Self { filename, compression: None, level: None, last_modification_date: None, comment: None }
    }

    /// Returns the entry's filename, as given by the caller.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the entry's compression method, if overridden.
    pub fn compression(&self) -> Option<Compression> {
        self.compression
    }

    /// Returns the entry's compression level, if overridden.
    pub fn level(&self) -> Option<CompressionLevel> {
        self.level
    }

    /// Returns the entry's last modification date, if set.
    pub fn last_modification_date(&self) -> Option<&ZipDateTime> {
        self.last_modification_date.as_ref()
    }

    /// Returns the entry's comment, if set.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}
