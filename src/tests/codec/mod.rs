// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::codec::{self, Codec, DeflateStoredCodec, StoredCodec};
use crate::spec::compression::{Compression, CompressionLevel};

use std::io::Read;

/// Runs data through a codec in the given chunk size, returning the complete output.
fn encode(codec: &mut dyn Codec, data: &[u8], chunk_size: usize) -> Vec<u8> {
    let mut output = Vec::new();
    for chunk in data.chunks(chunk_size) {
        output.extend(codec.update(chunk).expect("failed to update codec"));
    }
    output.extend(codec.finish().expect("failed to finish codec"));
    output
}

fn inflate(data: &[u8]) -> Vec<u8> {
    let mut output = Vec::new();
    flate2::read::DeflateDecoder::new(data).read_to_end(&mut output).expect("failed to inflate");
    output
}

#[test]
fn stored_is_identity() {
    let mut codec = StoredCodec;
    assert_eq!(codec.update(b"abc").unwrap(), b"abc");
    assert!(codec.finish().unwrap().is_empty());
    assert_eq!(codec.compression(), Compression::Stored);
}

#[test]
fn deflate_stored_empty_stream() {
    let mut codec = DeflateStoredCodec::new();
    assert_eq!(codec.finish().unwrap(), vec![0x01, 0x00, 0x00, 0xFF, 0xFF]);
    assert!(codec.finish().unwrap().is_empty());
    assert_eq!(inflate(&[0x01, 0x00, 0x00, 0xFF, 0xFF]), Vec::<u8>::new());
}

#[test]
fn deflate_stored_block_framing() {
    let mut codec = DeflateStoredCodec::new();
    let output = codec.update(b"abc").unwrap();

    assert_eq!(output, vec![0x00, 0x03, 0x00, 0xFC, 0xFF, b'a', b'b', b'c']);
}

#[test]
fn deflate_stored_splits_large_chunks() {
    let data: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();

    let mut codec = DeflateStoredCodec::new();
    let output = codec.update(&data).unwrap();

    // 200000 bytes need four blocks, the last holding 3395 bytes.
    assert_eq!(output.len(), data.len() + 4 * 5);
    assert_eq!(&output[1..3], &0xFFFFu16.to_le_bytes());
    assert_eq!(output[65_540], 0x00);

    let mut stream = output;
    stream.extend(codec.finish().unwrap());
    assert_eq!(inflate(&stream), data);
}

#[test]
fn deflate_stored_chunking_is_transparent() {
    let data = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt...".repeat(50);

    for chunk_size in [1, 7, 4096, data.len()] {
        let output = encode(&mut DeflateStoredCodec::new(), &data, chunk_size);
        assert_eq!(inflate(&output), data, "chunk size {chunk_size}");
    }
}

#[cfg(feature = "deflate")]
#[test]
fn deflate_compresses() {
    let data = vec![0u8; 2 * 1024 * 1024];

    for level in [CompressionLevel::Fast, CompressionLevel::Normal, CompressionLevel::Maximum] {
        let mut codec = codec::from_options(Compression::Deflate, level).unwrap();
        let output = encode(codec.as_mut(), &data, 1024 * 1024);

        assert!(output.len() < data.len() / 100);
        assert_eq!(inflate(&output), data);
    }
}

#[test]
fn from_options_selection() {
    let codec = codec::from_options(Compression::Stored, CompressionLevel::Maximum).unwrap();
    assert_eq!(codec.compression(), Compression::Stored);

    let mut codec = codec::from_options(Compression::Deflate, CompressionLevel::None).unwrap();
    assert_eq!(codec.update(b"abc").unwrap().len(), 8);

    assert!(codec::is_available(Compression::Stored, CompressionLevel::Normal));
    assert!(codec::is_available(Compression::Deflate, CompressionLevel::None));
    assert_eq!(codec::is_available(Compression::Deflate, CompressionLevel::Normal), cfg!(feature = "deflate"));
}

#[cfg(not(feature = "deflate"))]
#[test]
fn from_options_unavailable() {
    use crate::error::ZipError;

    let result = codec::from_options(Compression::Deflate, CompressionLevel::Normal);
    assert!(matches!(result, Err(ZipError::CompressionNotAvailable(Compression::Deflate, CompressionLevel::Normal))));
}
