// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::date::ZipDateTime;
use crate::entry::ZipEntryOptions;
use crate::spec::compression::{Compression, CompressionLevel};

/// A builder for [`ZipEntryOptions`].
pub struct ZipEntryBuilder(pub(crate) ZipEntryOptions);

impl From<ZipEntryOptions> for ZipEntryBuilder {
    fn from(options: ZipEntryOptions) -> Self {
        Self(options)
    }
}

impl ZipEntryBuilder {
    /// Constructs a new builder for an entry with the given filename.
    ///
    /// The filename is normalised when the entry is written: backslashes become forward slashes, and leading,
    /// trailing or repeated separators are dropped.
    pub fn new(filename: String) -> Self {
        Self(ZipEntryOptions::new(filename))
    }

    /// Sets the entry's filename.
    pub fn filename(mut self, filename: String) -> Self {
        self.0.filename = filename;
        self
    }

    /// Sets the entry's compression method, overriding the writer's default.
    pub fn compression(mut self, compression: Compression) -> Self {
        self.0.compression = Some(compression);
        self
    }

    /// Sets the entry's compression level, overriding the writer's default.
    ///
    /// This has no effect on [`Compression::Stored`] entries.
    pub fn level(mut self, level: CompressionLevel) -> Self {
        self.0.level = Some(level);
        self
    }

    /// Sets the entry's last modification date.
    pub fn last_modification_date(mut self, date: ZipDateTime) -> Self {
        self.0.last_modification_date = Some(date);
        self
    }

    /// Sets the entry's file comment.
    pub fn comment(mut self, comment: String) -> Self {
        self.0.comment = Some(comment);
        self
    }

    /// Consumes this builder and returns the final [`ZipEntryOptions`].
    ///
    /// This is equivalent to:
    /// ```
    /// # use async_zip_stream::{ZipEntryOptions, ZipEntryBuilder};
    /// #
    /// # let builder = ZipEntryBuilder::new(String::from("foo.bar"));
    /// let options: ZipEntryOptions = builder.into();
    /// ```
    pub fn build(self) -> ZipEntryOptions {
        self.into()
    }
}
