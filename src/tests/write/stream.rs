// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::base::write::ZipFileWriter;
use crate::error::ZipError;
use crate::spec::consts::STREAM_CHUNK_SIZE;
use crate::tests::write::{ChunkedSource, Event, EventLog, FailingSink, FailingSource, RecordingSink};
use crate::tests::{init_logger, open_archive};
use crate::{Compression, CompressionLevel, ZipDateTimeBuilder, ZipEntryBuilder, ZipWriterOptions};

use futures_lite::io::Cursor;
use std::io::Read;

fn u16_at(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn u32_at(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes(bytes[at..at + 4].try_into().unwrap())
}

fn stored(filename: &str) -> ZipEntryBuilder {
    ZipEntryBuilder::new(filename.to_string()).compression(Compression::Stored)
}

fn read_entry(zip: &mut zip::ZipArchive<std::io::Cursor<Vec<u8>>>, name: &str) -> Vec<u8> {
    let mut file = zip.by_name(name).expect("entry missing");
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer).expect("failed to read entry");
    buffer
}

/// A directory followed by `a.txt` holding "abc", without Zip64.
#[tokio::test]
async fn small_archive_layout() {
    init_logger();

    let options = ZipWriterOptions::new().zip64(false).compression(Compression::Stored);
    let mut writer = ZipFileWriter::with_options(Vec::new(), options);

    writer.write_empty_dir("docs").await.unwrap();
    writer.write_entry_stream("a.txt", Cursor::new(b"abc".to_vec())).await.unwrap();
    writer.close().await.unwrap();

    assert_eq!(writer.entry_count(), 2);
    assert_eq!(writer.offset(), 213);

    let bytes = writer.into_inner();
    assert_eq!(bytes.len(), 213);

    // Directory header: version 20, no flags, no extra field.
    assert_eq!(u32_at(&bytes, 0), 0x04034b50);
    assert_eq!(u16_at(&bytes, 4), 20);
    assert_eq!(u16_at(&bytes, 6), 0);
    assert_eq!(u16_at(&bytes, 28), 0);
    assert_eq!(&bytes[30..35], b"docs/");

    // File header at 35, data at 70, data descriptor at 73.
    assert_eq!(u32_at(&bytes, 35), 0x04034b50);
    assert_eq!(u16_at(&bytes, 35 + 4), 10);
    assert_eq!(u16_at(&bytes, 35 + 6), 0x0008);
    assert_eq!(&bytes[70..73], b"abc");
    assert_eq!(u32_at(&bytes, 73), 0x08074b50);
    assert_eq!(u32_at(&bytes, 77), 0x352441C2);
    assert_eq!(u32_at(&bytes, 81), 3);
    assert_eq!(u32_at(&bytes, 85), 3);

    // Central directory at 89, with the file's header offset.
    assert_eq!(u32_at(&bytes, 89), 0x02014b50);
    assert_eq!(u32_at(&bytes, 140), 0x02014b50);
    assert_eq!(u32_at(&bytes, 140 + 16), 0x352441C2);
    assert_eq!(u32_at(&bytes, 140 + 42), 35);

    // End of central directory.
    let eocdr = &bytes[191..];
    assert_eq!(u32_at(eocdr, 0), 0x06054b50);
    assert_eq!(u16_at(eocdr, 10), 2);
    assert_eq!(u32_at(eocdr, 12), 102);
    assert_eq!(u32_at(eocdr, 16), 89);

    let mut zip = open_archive(bytes);
    assert_eq!(zip.len(), 2);
    assert!(zip.by_name("docs/").unwrap().is_dir());
    assert_eq!(zip.by_name("a.txt").unwrap().crc32(), 0x352441C2);
    assert_eq!(read_entry(&mut zip, "a.txt"), b"abc");
}

/// The same archive with Zip64 structures.
#[tokio::test]
async fn small_archive_layout_zip64() {
    init_logger();

    let options = ZipWriterOptions::new().compression(Compression::Stored);
    let mut writer = ZipFileWriter::with_options(Vec::new(), options);

    writer.write_empty_dir("docs").await.unwrap();
    writer.write_entry_stream("a.txt", Cursor::new(b"abc".to_vec())).await.unwrap();
    writer.close().await.unwrap();

    let bytes = writer.into_inner();
    assert_eq!(bytes.len(), 393);

    assert_eq!(u16_at(&bytes, 4), 45);
    assert_eq!(u32_at(&bytes, 18), 0xFFFFFFFF);
    assert_eq!(u16_at(&bytes, 28), 20);

    // File header at 55, data at 110, then a 24-byte data descriptor.
    assert_eq!(&bytes[110..113], b"abc");
    assert_eq!(u32_at(&bytes, 113), 0x08074b50);
    assert_eq!(u32_at(&bytes, 117), 0x352441C2);
    assert_eq!(bytes[121..137], [3, 0, 0, 0, 0, 0, 0, 0, 3, 0, 0, 0, 0, 0, 0, 0]);

    // Central directory at 137, Zip64 records at 295 & 351, end of central directory at 371.
    assert_eq!(u32_at(&bytes, 137), 0x02014b50);
    assert_eq!(u32_at(&bytes, 295), 0x06064b50);
    assert_eq!(u32_at(&bytes, 351), 0x07064b50);
    assert_eq!(u32_at(&bytes, 351 + 8), 295);
    assert_eq!(u32_at(&bytes, 371), 0x06054b50);
    assert_eq!(u16_at(&bytes, 371 + 10), 0xFFFF);

    let mut zip = open_archive(bytes);
    assert_eq!(zip.len(), 2);
    assert_eq!(read_entry(&mut zip, "a.txt"), b"abc");
}

#[tokio::test]
async fn empty_archive() {
    let mut writer = ZipFileWriter::with_options(Vec::new(), ZipWriterOptions::new().zip64(false));
    writer.close().await.unwrap();

    let bytes = writer.into_inner();
    assert_eq!(bytes.len(), 22);
    assert_eq!(open_archive(bytes).len(), 0);

    let mut writer = ZipFileWriter::new(Vec::new());
    writer.close().await.unwrap();

    let bytes = writer.into_inner();
    assert_eq!(bytes.len(), 56 + 20 + 22);
    assert_eq!(open_archive(bytes).len(), 0);
}

#[tokio::test]
async fn round_trip_mixed_entries() {
    init_logger();

    let data = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt...".repeat(100);
    let mut writer = ZipFileWriter::new(Vec::new());

    writer.write_empty_dir("docs/").await.unwrap();
    writer.write_entry_stream(stored("docs/stored.txt"), Cursor::new(data.clone())).await.unwrap();

    let entry = ZipEntryBuilder::new("docs/framed.txt".to_string())
        .compression(Compression::Deflate)
        .level(CompressionLevel::None);
    writer.write_entry_stream(entry, Cursor::new(data.clone())).await.unwrap();

    writer.write_entry_stream(stored("empty.txt"), Cursor::new(Vec::new())).await.unwrap();
    let entry = ZipEntryBuilder::new("empty.deflate".to_string())
        .compression(Compression::Deflate)
        .level(CompressionLevel::None);
    writer.write_entry_stream(entry, Cursor::new(Vec::new())).await.unwrap();
    writer.close().await.unwrap();

    let mut zip = open_archive(writer.into_inner());
    assert_eq!(zip.len(), 5);

    let stored_entry = zip.by_name("docs/stored.txt").unwrap();
    assert_eq!(stored_entry.compression(), zip::CompressionMethod::Stored);
    assert_eq!(stored_entry.size(), data.len() as u64);
    assert_eq!(stored_entry.compressed_size(), data.len() as u64);
    drop(stored_entry);

    let framed = zip.by_name("docs/framed.txt").unwrap();
    assert_eq!(framed.compression(), zip::CompressionMethod::Deflated);
    assert_eq!(framed.compressed_size(), data.len() as u64 + 5 + 5);
    drop(framed);

    assert_eq!(read_entry(&mut zip, "docs/stored.txt"), data.as_bytes());
    assert_eq!(read_entry(&mut zip, "docs/framed.txt"), data.as_bytes());
    assert!(read_entry(&mut zip, "empty.txt").is_empty());
    assert!(read_entry(&mut zip, "empty.deflate").is_empty());
}

#[cfg(feature = "deflate")]
#[tokio::test]
async fn deflate_compresses_zeroes() {
    init_logger();

    let log = EventLog::default();
    let mut writer = ZipFileWriter::new(Vec::new());

    let entry = ZipEntryBuilder::new("zeroes.bin".to_string()).compression(Compression::Deflate);
    writer.write_entry_stream(entry, ChunkedSource::new(2, STREAM_CHUNK_SIZE, 0, log)).await.unwrap();
    writer.close().await.unwrap();

    let mut zip = open_archive(writer.into_inner());
    let file = zip.by_name("zeroes.bin").unwrap();
    assert_eq!(file.size(), 2 * STREAM_CHUNK_SIZE as u64);
    assert!(file.compressed_size() < 64 * 1024);
    drop(file);

    let content = read_entry(&mut zip, "zeroes.bin");
    assert_eq!(content.len(), 2 * STREAM_CHUNK_SIZE);
    assert!(content.iter().all(|byte| *byte == 0));
}

#[tokio::test]
async fn offset_tracks_output() {
    let log = EventLog::default();
    let mut writer = ZipFileWriter::new(RecordingSink::new(log.clone()));
    assert_eq!(writer.offset(), 0);

    writer.write_empty_dir("a").await.unwrap();
    assert_eq!(writer.offset(), writer.inner_mut().bytes.len() as u64);

    writer.write_entry_stream(stored("a/b"), ChunkedSource::new(3, 1000, b'x', log.clone())).await.unwrap();
    assert_eq!(writer.offset(), writer.inner_mut().bytes.len() as u64);

    writer.close().await.unwrap();
    assert_eq!(writer.offset(), writer.inner_mut().bytes.len() as u64);

    let written: usize = log
        .lock()
        .unwrap()
        .iter()
        .map(|event| match event {
            Event::Write(size) => *size,
            _ => 0,
        })
        .sum();
    assert_eq!(writer.offset(), written as u64);
}

#[tokio::test]
async fn central_directory_keeps_insertion_order() {
    let names = ["zeta.txt", "alpha/", "mid/file.txt", "Beta.txt"];
    let mut writer = ZipFileWriter::new(Vec::new());

    for name in names {
        match name.ends_with('/') {
            true => writer.write_empty_dir(name).await.unwrap(),
            false => writer.write_entry_stream(stored(name), Cursor::new(name.as_bytes().to_vec())).await.unwrap(),
        }
    }
    writer.close().await.unwrap();

    let mut zip = open_archive(writer.into_inner());
    for (index, name) in names.iter().enumerate() {
        assert_eq!(zip.by_index(index).unwrap().name(), *name);
    }
}

#[tokio::test]
async fn finalized_writer_rejects_everything() {
    let mut writer = ZipFileWriter::new(Vec::new());
    writer.write_entry_stream(stored("a.txt"), Cursor::new(b"abc".to_vec())).await.unwrap();

    assert!(!writer.is_finalized());
    writer.close().await.unwrap();
    assert!(writer.is_finalized());

    let size = writer.offset();

    let result = writer.write_entry_stream(stored("b.txt"), Cursor::new(b"def".to_vec())).await;
    assert!(matches!(result, Err(ZipError::WriterFinalized)));

    let result = writer.write_empty_dir("c").await;
    assert!(matches!(result, Err(ZipError::WriterFinalized)));

    let result = writer.close().await;
    assert!(matches!(result, Err(ZipError::WriterFinalized)));

    assert_eq!(writer.offset(), size);
    assert_eq!(writer.entry_count(), 1);
    assert_eq!(writer.into_inner().len() as u64, size);
}

/// Output for each chunk reaches the sink, flushed, before the next chunk is read.
#[tokio::test]
async fn data_is_streamed_chunk_by_chunk() {
    init_logger();

    let log = EventLog::default();
    let mut writer = ZipFileWriter::new(RecordingSink::new(log.clone()));

    let source = ChunkedSource::new(4, STREAM_CHUNK_SIZE, b'z', log.clone());
    writer.write_entry_stream(stored("big.bin"), source).await.unwrap();

    let events = log.lock().unwrap().clone();
    let reads: Vec<usize> =
        events.iter().enumerate().filter(|(_, event)| matches!(event, Event::Read(_))).map(|(at, _)| at).collect();
    assert_eq!(reads.len(), 5);

    for pair in reads.windows(2) {
        let between = &events[pair[0] + 1..pair[1]];
        assert!(between.contains(&Event::Write(STREAM_CHUNK_SIZE)), "chunk not written before the next read");
        assert_eq!(between.last(), Some(&Event::Flush), "chunk not flushed before the next read");
    }

    assert!(events.iter().all(|event| match event {
        Event::Write(size) => *size <= STREAM_CHUNK_SIZE,
        _ => true,
    }));
}

/// Small reads are forwarded as they arrive rather than being collected into larger writes.
#[tokio::test]
async fn small_reads_are_interleaved_with_writes() {
    let log = EventLog::default();
    let mut writer = ZipFileWriter::new(RecordingSink::new(log.clone()));

    writer.write_entry_stream(stored("small.bin"), ChunkedSource::new(50, 100, b's', log.clone())).await.unwrap();

    let events = log.lock().unwrap().clone();
    let data_events: Vec<Event> =
        events.into_iter().filter(|event| matches!(event, Event::Read(100) | Event::Write(100))).collect();

    assert_eq!(data_events.len(), 100);
    for pair in data_events.chunks(2) {
        assert_eq!(pair, [Event::Read(100), Event::Write(100)]);
    }
}

#[tokio::test]
async fn framed_deflate_writes_are_bounded() {
    let log = EventLog::default();
    let mut writer = ZipFileWriter::new(RecordingSink::new(log.clone()));

    let entry = ZipEntryBuilder::new("big.bin".to_string())
        .compression(Compression::Deflate)
        .level(CompressionLevel::None);
    writer.write_entry_stream(entry, ChunkedSource::new(3, STREAM_CHUNK_SIZE, 1, log.clone())).await.unwrap();
    writer.close().await.unwrap();

    // Each 1 MiB chunk spans 17 stored blocks.
    let bound = STREAM_CHUNK_SIZE + 17 * 5;
    assert!(log.lock().unwrap().iter().all(|event| match event {
        Event::Write(size) => *size <= bound,
        _ => true,
    }));

    let bytes = std::mem::take(&mut writer.inner_mut().bytes);
    let mut zip = open_archive(bytes);
    let content = read_entry(&mut zip, "big.bin");
    assert_eq!(content.len(), 3 * STREAM_CHUNK_SIZE);
    assert!(content.iter().all(|byte| *byte == 1));
}

#[tokio::test]
async fn invalid_entries_write_nothing() {
    let mut writer = ZipFileWriter::new(Vec::new());

    let result = writer.write_entry_stream("", Cursor::new(b"abc".to_vec())).await;
    assert!(matches!(result, Err(ZipError::InvalidFilename(_))));

    let result = writer.write_empty_dir("/./").await;
    assert!(matches!(result, Err(ZipError::InvalidFilename(_))));

    let entry = stored("a.txt").comment("c".repeat(u16::MAX as usize + 1));
    let result = writer.write_entry_stream(entry, Cursor::new(b"abc".to_vec())).await;
    assert!(matches!(result, Err(ZipError::CommentTooLarge)));

    let result = writer.write_entry_stream(stored(&"n".repeat(70_000)), Cursor::new(Vec::new())).await;
    assert!(matches!(result, Err(ZipError::FileNameTooLarge)));

    #[cfg(not(feature = "deflate"))]
    {
        let entry = ZipEntryBuilder::new("a.txt".to_string()).compression(Compression::Deflate);
        let result = writer.write_entry_stream(entry, Cursor::new(b"abc".to_vec())).await;
        assert!(matches!(result, Err(ZipError::CompressionNotAvailable(..))));
    }

    assert_eq!(writer.offset(), 0);
    assert_eq!(writer.entry_count(), 0);
    assert!(writer.into_inner().is_empty());
}

#[tokio::test]
async fn upstream_errors_are_reported() {
    let mut writer = ZipFileWriter::new(Vec::new());
    let result = writer.write_entry_stream(stored("a.txt"), FailingSource).await;
    assert!(matches!(result, Err(ZipError::UpstreamReadError(_))));
    assert_eq!(writer.entry_count(), 0);

    let mut writer = ZipFileWriter::new(FailingSink { capacity: 10 });
    let result = writer.write_entry_stream(stored("a.txt"), Cursor::new(b"abc".to_vec())).await;
    assert!(matches!(result, Err(ZipError::UpstreamWriteError(_))));
    assert_eq!(writer.offset(), 10);
}

#[tokio::test]
async fn paths_are_normalized() {
    let mut writer = ZipFileWriter::new(Vec::new());

    writer.write_empty_dir("\\assets\\img\\").await.unwrap();
    writer.write_entry_stream(stored("/assets//./img\\logo.svg"), Cursor::new(b"<svg/>".to_vec())).await.unwrap();
    writer.close().await.unwrap();

    let mut zip = open_archive(writer.into_inner());
    assert_eq!(zip.by_index(0).unwrap().name(), "assets/img/");
    assert_eq!(zip.by_index(1).unwrap().name(), "assets/img/logo.svg");
}

#[tokio::test]
async fn metadata_is_written() {
    let date = ZipDateTimeBuilder::new().year(2024).month(3).day(2).hour(13).minute(45).second(30).build();
    let options = ZipWriterOptions::new().comment("archive comment".to_string());
    let mut writer = ZipFileWriter::with_options(Vec::new(), options);

    let entry = stored("résumé.txt").last_modification_date(date).comment("entry comment".to_string());
    writer.write_entry_stream(entry, Cursor::new(b"cv".to_vec())).await.unwrap();
    writer.write_empty_dir(ZipEntryBuilder::new("dir".to_string()).last_modification_date(date)).await.unwrap();
    writer.close().await.unwrap();

    let bytes = writer.into_inner();
    assert_eq!(u16_at(&bytes, 6), 0x0808);
    assert_eq!(u16_at(&bytes, 10), date.time);
    assert_eq!(u16_at(&bytes, 12), date.date);

    let mut zip = open_archive(bytes);
    assert_eq!(zip.comment(), b"archive comment");

    let file = zip.by_index(0).unwrap();
    assert_eq!(file.name(), "résumé.txt");
    assert_eq!(file.comment(), "entry comment");
    assert_eq!(file.unix_mode(), Some(0o100644));
    drop(file);

    let dir = zip.by_index(1).unwrap();
    assert!(dir.is_dir());
    assert_eq!(dir.unix_mode(), Some(0o040755));
}

#[tokio::test]
async fn attribute_presets_apply() {
    let options = ZipWriterOptions::new().attributes(crate::AttributePresets::unix(0o600, 0o700));
    let mut writer = ZipFileWriter::with_options(Vec::new(), options);

    writer.write_entry_stream(stored("secret"), Cursor::new(b"s".to_vec())).await.unwrap();
    writer.write_empty_dir("private").await.unwrap();
    writer.close().await.unwrap();

    let mut zip = open_archive(writer.into_inner());
    assert_eq!(zip.by_index(0).unwrap().unix_mode(), Some(0o100600));
    assert_eq!(zip.by_index(1).unwrap().unix_mode(), Some(0o040700));
}

#[tokio::test]
async fn writer_defaults_apply_to_entries() {
    let options = ZipWriterOptions::new().compression(Compression::Deflate).level(CompressionLevel::None);
    let mut writer = ZipFileWriter::with_options(Vec::new(), options);

    writer.write_entry_stream("inherits.txt", Cursor::new(b"abc".to_vec())).await.unwrap();
    writer.write_entry_stream(stored("overrides.txt"), Cursor::new(b"abc".to_vec())).await.unwrap();
    writer.close().await.unwrap();

    let mut zip = open_archive(writer.into_inner());
    let inherits = zip.by_name("inherits.txt").unwrap();
    assert_eq!(inherits.compression(), zip::CompressionMethod::Deflated);
    assert_eq!(inherits.compressed_size(), 3 + 5 + 5);
    drop(inherits);
    assert_eq!(zip.by_name("overrides.txt").unwrap().compression(), zip::CompressionMethod::Stored);
}
