// Copyright (c) 2021 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

/// A compression method supported by this crate.
///
/// [`Compression::Deflate`] is always available: without the `deflate` feature it may only be used with
/// [`CompressionLevel::None`], in which case entries are written as DEFLATE stored blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Stored,
    Deflate,
}

impl From<&Compression> for u16 {
    // Convert a supported compression method into its relevant u16 stored with little endianness.
    // https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#445
    fn from(compression: &Compression) -> u16 {
        match compression {
            Compression::Stored => 0,
            Compression::Deflate => 8,
        }
    }
}

impl From<Compression> for u16 {
    fn from(compression: Compression) -> u16 {
        (&compression).into()
    }
}

/// Level of compression data should be compressed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// No compression at all. Deflate entries are framed as stored blocks.
    None,
    /// Fastest quality of compression, usually produces bigger size.
    Fast,
    /// Default quality of compression.
    #[default]
    Normal,
    /// Best quality of compression, usually produces the smallest size.
    Maximum,
}

impl CompressionLevel {
    /// Returns the zlib-style numeric level (0-9) for this compression level.
    pub fn as_u32(&self) -> u32 {
        match self {
            CompressionLevel::None => 0,
            CompressionLevel::Fast => 1,
            CompressionLevel::Normal => 6,
            CompressionLevel::Maximum => 9,
        }
    }
}
