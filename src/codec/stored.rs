// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::codec::Codec;
use crate::error::Result;
use crate::spec::compression::Compression;

/// A codec which passes data through untouched.
#[derive(Debug, Default)]
pub struct StoredCodec;

impl Codec for StoredCodec {
    fn update(&mut self, chunk: &[u8]) -> Result<Vec<u8>> {
        Ok(chunk.to_vec())
    }

    fn finish(&mut self) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }

    fn compression(&self) -> Compression {
        Compression::Stored
    }
}
