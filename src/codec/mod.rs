// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! Incremental compression strategies used whilst streaming entry data.
//!
//! A [`Codec`] accepts uncompressed data in chunks of any size and hands back whatever compressed bytes it has
//! produced so far, so that the writer can forward them to the output straight away. The concrete strategy is
//! selected per entry with [`from_options()`].

pub(crate) mod deflate;
pub(crate) mod stored;

use crate::error::Result;
#[cfg(not(feature = "deflate"))]
use crate::error::ZipError;
use crate::spec::compression::{Compression, CompressionLevel};

pub use deflate::DeflateStoredCodec;
#[cfg(feature = "deflate")]
pub use deflate::DeflateCodec;
pub use stored::StoredCodec;

/// An incremental compressor.
pub trait Codec {
    /// Feeds a chunk of uncompressed data, returning any compressed bytes produced by it.
    fn update(&mut self, chunk: &[u8]) -> Result<Vec<u8>>;

    /// Completes the compressed stream, returning any remaining bytes.
    fn finish(&mut self) -> Result<Vec<u8>>;

    /// Returns the compression method recorded within the entry's headers.
    fn compression(&self) -> Compression;
}

/// Constructs the codec for a compression method & level.
///
/// | compression | level          | codec                  |
/// |-------------|----------------|------------------------|
/// | Stored      | any            | [`StoredCodec`]        |
/// | Deflate     | None           | [`DeflateStoredCodec`] |
/// | Deflate     | Fast..Maximum  | `DeflateCodec`         |
///
/// Requesting real DEFLATE compression without the `deflate` feature fails rather than degrading to another codec.
pub fn from_options(compression: Compression, level: CompressionLevel) -> Result<Box<dyn Codec + Send>> {
    match (compression, level) {
        (Compression::Stored, _) => Ok(Box::new(StoredCodec)),
        (Compression::Deflate, CompressionLevel::None) => Ok(Box::new(DeflateStoredCodec::new())),
        #[cfg(feature = "deflate")]
        (Compression::Deflate, level) => Ok(Box::new(DeflateCodec::new(level))),
        #[cfg(not(feature = "deflate"))]
        (Compression::Deflate, level) => Err(ZipError::CompressionNotAvailable(compression, level)),
    }
}

/// Returns whether a codec exists for the compression method & level without constructing it.
pub fn is_available(compression: Compression, level: CompressionLevel) -> bool {
    match (compression, level) {
        (Compression::Stored, _) | (Compression::Deflate, CompressionLevel::None) => true,
        (Compression::Deflate, _) => cfg!(feature = "deflate"),
    }
}
