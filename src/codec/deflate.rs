// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::codec::Codec;
use crate::error::Result;
use crate::spec::compression::Compression;
use crate::spec::consts::DEFLATE_STORED_BLOCK_MAX;

#[cfg(feature = "deflate")]
use crate::spec::compression::CompressionLevel;
#[cfg(feature = "deflate")]
use std::io::Write;

/// A codec which emits a valid DEFLATE stream without compressing anything.
///
/// Every chunk is framed as one or more non-final stored blocks (RFC 1951, section 3.2.4) and the stream is
/// terminated by an empty final stored block. This needs no compressor backend, so DEFLATE entries can be produced
/// even when the `deflate` feature is disabled.
#[derive(Debug, Default)]
pub struct DeflateStoredCodec {
    finished: bool,
}

impl DeflateStoredCodec {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Appends a single stored block holding `data` (at most 65535 bytes) to `buffer`.
pub(crate) fn push_stored_block(buffer: &mut Vec<u8>, data: &[u8], last: bool) {
    debug_assert!(data.len() <= DEFLATE_STORED_BLOCK_MAX);
    let len = data.len() as u16;

    // BFINAL in bit 0, BTYPE of 00 in bits 1-2, then padding up to the byte boundary.
    buffer.push(last as u8);
    buffer.extend_from_slice(&len.to_le_bytes());
    buffer.extend_from_slice(&(!len).to_le_bytes());
    buffer.extend_from_slice(data);
}

impl Codec for DeflateStoredCodec {
    fn update(&mut self, chunk: &[u8]) -> Result<Vec<u8>> {
        let blocks = chunk.len().div_ceil(DEFLATE_STORED_BLOCK_MAX);
        let mut buffer = Vec::with_capacity(chunk.len() + blocks * 5);

        for block in chunk.chunks(DEFLATE_STORED_BLOCK_MAX) {
            push_stored_block(&mut buffer, block, false);
        }

        Ok(buffer)
    }

    fn finish(&mut self) -> Result<Vec<u8>> {
        if self.finished {
            return Ok(Vec::new());
        }

        self.finished = true;
        let mut buffer = Vec::with_capacity(5);
        push_stored_block(&mut buffer, &[], true);
        Ok(buffer)
    }

    fn compression(&self) -> Compression {
        Compression::Deflate
    }
}

/// A codec backed by `flate2`'s raw DEFLATE encoder.
#[cfg(feature = "deflate")]
pub struct DeflateCodec {
    encoder: Option<flate2::write::DeflateEncoder<Vec<u8>>>,
}

#[cfg(feature = "deflate")]
impl DeflateCodec {
    pub fn new(level: CompressionLevel) -> Self {
        let level = flate2::Compression::new(level.as_u32());
        Self { encoder: Some(flate2::write::DeflateEncoder::new(Vec::new(), level)) }
    }
}

#[cfg(feature = "deflate")]
impl Codec for DeflateCodec {
    fn update(&mut self, chunk: &[u8]) -> Result<Vec<u8>> {
        match self.encoder.as_mut() {
            Some(encoder) => {
                encoder.write_all(chunk)?;
                Ok(std::mem::take(encoder.get_mut()))
            }
            None => Ok(Vec::new()),
        }
    }

    fn finish(&mut self) -> Result<Vec<u8>> {
        match self.encoder.take() {
            Some(encoder) => Ok(encoder.finish()?),
            None => Ok(Vec::new()),
        }
    }

    fn compression(&self) -> Compression {
        Compression::Deflate
    }
}
