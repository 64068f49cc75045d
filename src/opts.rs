// Copyright (c) 2021 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::spec::attribute::AttributePresets;
use crate::spec::compression::{Compression, CompressionLevel};
use crate::spec::counter::Zip64Mode;

/// Options fixed for the lifetime of a [`ZipFileWriter`].
///
/// [`ZipFileWriter`]: crate::base::write::ZipFileWriter
#[derive(Debug, Clone)]
pub struct ZipWriterOptions {
    pub(crate) zip64: bool,
    pub(crate) compression: Compression,
    pub(crate) level: CompressionLevel,
    pub(crate) attributes: AttributePresets,
    pub(crate) comment: Option<String>,
}

impl Default for ZipWriterOptions {
    /// Zip64 enabled, with DEFLATE at [`CompressionLevel::Normal`] when the `deflate` feature is available and
    /// stored entries otherwise.
    fn default() -> Self {
        let compression = match cfg!(feature = "deflate") {
            true => Compression::Deflate,
            false => Compression::Stored,
        };

        Self {
            zip64: true,
            compression,
            level: CompressionLevel::default(),
            attributes: AttributePresets::default(),
            comment: None,
        }
    }
}

impl ZipWriterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the archive is written with Zip64 structures.
    ///
    /// With Zip64 disabled, entries & offsets are bounded to 4 GiB and the archive to 65535 entries; exceeding
    /// those limits is reported as an error rather than corrected.
    pub fn zip64(mut self, zip64: bool) -> Self {
        self.zip64 = zip64;
        self
    }

    /// Sets the compression method used by entries which don't specify their own.
    pub fn compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Sets the compression level used by entries which don't specify their own.
    pub fn level(mut self, level: CompressionLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the external file attributes written for file & directory entries.
    pub fn attributes(mut self, attributes: AttributePresets) -> Self {
        self.attributes = attributes;
        self
    }

    /// Sets the ZIP file comment written within the end of central directory record.
    pub fn comment(mut self, comment: String) -> Self {
        self.comment = Some(comment);
        self
    }

    pub(crate) fn mode(&self) -> Zip64Mode {
        self.zip64.into()
    }
}
