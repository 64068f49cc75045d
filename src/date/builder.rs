// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::ZipDateTime;

/// The range of years representable by the MS-DOS date format.
const MIN_YEAR: i32 = 1980;
const MAX_YEAR: i32 = 2107;

/// A builder for [`ZipDateTime`].
pub struct ZipDateTimeBuilder(pub(crate) ZipDateTime);

impl From<ZipDateTime> for ZipDateTimeBuilder {
    fn from(date: ZipDateTime) -> Self {
        Self(date)
    }
}

impl Default for ZipDateTimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ZipDateTimeBuilder {
    /// Constructs a new builder with all date & time fields zeroed.
    pub fn new() -> Self {
        Self(ZipDateTime { date: 0, time: 0 })
    }

    /// Sets the date and time's year.
    ///
    /// Years outside of 1980-2107 are clamped to that range.
    pub fn year(mut self, year: i32) -> Self {
        let year = (year.clamp(MIN_YEAR, MAX_YEAR) - MIN_YEAR) as u16;
        self.0.date = (self.0.date & !0xFE00) | ((year << 9) & 0xFE00);
        self
    }

    /// Sets the date and time's month.
    pub fn month(mut self, month: u32) -> Self {
        let month = ((month << 5) & 0x1E0) as u16;
        self.0.date = (self.0.date & !0x1E0) | month;
        self
    }

    /// Sets the date and time's day.
    pub fn day(mut self, day: u32) -> Self {
        let day = (day & 0x1F) as u16;
        self.0.date = (self.0.date & !0x1F) | day;
        self
    }

    /// Sets the date and time's hour.
    pub fn hour(mut self, hour: u32) -> Self {
        let hour = ((hour << 11) & 0xF800) as u16;
        self.0.time = (self.0.time & !0xF800) | hour;
        self
    }

    /// Sets the date and time's minute.
    pub fn minute(mut self, minute: u32) -> Self {
        let minute = ((minute << 5) & 0x7E0) as u16;
        self.0.time = (self.0.time & !0x7E0) | minute;
        self
    }

    /// Sets the date and time's second.
    ///
    /// Note that MS-DOS has a maximum granularity of two seconds.
    pub fn second(mut self, second: u32) -> Self {
        let second = ((second >> 1) & 0x1F) as u16;
        self.0.time = (self.0.time & !0x1F) | second;
        self
    }

    /// Consumes this builder and returns a final [`ZipDateTime`].
    ///
    /// This is equivalent to:
    /// ```
    /// # use async_zip_stream::{ZipDateTime, ZipDateTimeBuilder};
    /// #
    /// # let builder = ZipDateTimeBuilder::new().year(2024).month(3).day(2);
    /// let date: ZipDateTime = builder.into();
    /// ```
    pub fn build(self) -> ZipDateTime {
        self.into()
    }
}
