// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! Pure serialisation of the ZIP & Zip64 records emitted by the writer.
//!
//! Each function returns the complete record (signature included) ready to be written to the output.
//! https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#43

use crate::date::ZipDateTime;
use crate::error::{Result, Zip64ErrorCase, ZipError};
use crate::spec::attribute::AttributeCompatibility;
use crate::spec::compression::Compression;
use crate::spec::consts::{
    CDH_LENGTH, CDH_SIGNATURE, DATA_DESCRIPTOR_SIGNATURE, EOCDR_LENGTH, EOCDR_SIGNATURE, LFH_LENGTH, LFH_SIGNATURE,
    NON_ZIP64_MAX_NUM_FILES, NON_ZIP64_MAX_SIZE, SIGNATURE_LENGTH, ZIP64_EOCDL_LENGTH, ZIP64_EOCDL_SIGNATURE,
    ZIP64_EOCDR_LENGTH, ZIP64_EOCDR_SIGNATURE,
};
use crate::spec::counter::{WideCounter, Zip64Mode};
use crate::spec::header::{
    CentralDirectoryRecord, EndOfCentralDirectoryHeader, GeneralPurposeFlag, LocalFileHeader,
    Zip64EndOfCentralDirectoryLocator, Zip64EndOfCentralDirectoryRecord, Zip64ExtendedInformationExtraField,
};
use crate::spec::version::{as_made_by, as_needed_to_extract, ZIP64_VERSION};

/// The resolved header information of a single entry, shared by its local and central records.
#[derive(Debug, Clone, Copy)]
pub struct EntryRecord<'a> {
    pub filename: &'a str,
    pub comment: &'a str,
    pub compression: Compression,
    pub is_dir: bool,
    pub flags: GeneralPurposeFlag,
    pub date: ZipDateTime,
    pub external_attribute: u32,
    pub mode: Zip64Mode,
}

impl EntryRecord<'_> {
    fn version_needed(&self) -> u16 {
        as_needed_to_extract(self.compression, self.is_dir, self.mode)
    }

    fn file_name_length(&self) -> Result<u16> {
        self.filename.len().try_into().map_err(|_| ZipError::FileNameTooLarge)
    }

    fn file_comment_length(&self) -> Result<u16> {
        self.comment.len().try_into().map_err(|_| ZipError::CommentTooLarge)
    }
}

/// Builds a local file header.
///
/// Sizes & the CRC are unknown at this point so they're written as zero. In Zip64 mode the size fields are set to the
/// sentinel and a Zip64 extended information field with zeroed sizes follows the filename. This header is never
/// revisited; readers take the true values from the data descriptor & central directory.
pub fn local_file_header(entry: &EntryRecord<'_>) -> Result<Vec<u8>> {
    let extra_field = match entry.mode {
        Zip64Mode::Enabled => Zip64ExtendedInformationExtraField {
            uncompressed_size: 0,
            compressed_size: 0,
            relative_header_offset: None,
        }
        .as_bytes(),
        Zip64Mode::Disabled => Vec::new(),
    };

    let size = match entry.mode {
        Zip64Mode::Enabled => NON_ZIP64_MAX_SIZE,
        Zip64Mode::Disabled => 0,
    };

    let header = LocalFileHeader {
        version: entry.version_needed(),
        flags: entry.flags,
        compression: entry.compression.into(),
        mod_time: entry.date.time,
        mod_date: entry.date.date,
        crc: 0,
        compressed_size: size,
        uncompressed_size: size,
        file_name_length: entry.file_name_length()?,
        // A single Zip64 field is at most 28 bytes.
        extra_field_length: extra_field.len() as u16,
    };

    let mut bytes = Vec::with_capacity(SIGNATURE_LENGTH + LFH_LENGTH + entry.filename.len() + extra_field.len());
    bytes.extend_from_slice(&LFH_SIGNATURE.to_le_bytes());
    bytes.extend_from_slice(&header.as_slice());
    bytes.extend_from_slice(entry.filename.as_bytes());
    bytes.extend_from_slice(&extra_field);

    Ok(bytes)
}

/// Builds a data descriptor, with 4-byte or 8-byte size fields depending on the counters' mode.
// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#439
pub fn data_descriptor(crc: u32, compressed: &WideCounter, uncompressed: &WideCounter) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(24);

    bytes.extend_from_slice(&DATA_DESCRIPTOR_SIGNATURE.to_le_bytes());
    bytes.extend_from_slice(&crc.to_le_bytes());
    bytes.extend_from_slice(&compressed.to_le_bytes());
    bytes.extend_from_slice(&uncompressed.to_le_bytes());

    bytes
}

/// Builds a central directory file header carrying the entry's final CRC & sizes.
pub fn central_directory_record(
    entry: &EntryRecord<'_>,
    crc: u32,
    compressed: &WideCounter,
    uncompressed: &WideCounter,
    lh_offset: &WideCounter,
) -> Result<Vec<u8>> {
    let extra_field = match entry.mode {
        Zip64Mode::Enabled => Zip64ExtendedInformationExtraField {
            uncompressed_size: uncompressed.get(),
            compressed_size: compressed.get(),
            relative_header_offset: Some(lh_offset.get()),
        }
        .as_bytes(),
        Zip64Mode::Disabled => Vec::new(),
    };

    let v_needed = entry.version_needed();
    let header = CentralDirectoryRecord {
        v_made_by: as_made_by(AttributeCompatibility::Unix, v_needed),
        v_needed,
        flags: entry.flags,
        compression: entry.compression.into(),
        mod_time: entry.date.time,
        mod_date: entry.date.date,
        crc,
        compressed_size: compressed.as_u32_field(),
        uncompressed_size: uncompressed.as_u32_field(),
        file_name_length: entry.file_name_length()?,
        extra_field_length: extra_field.len() as u16,
        file_comment_length: entry.file_comment_length()?,
        disk_start: 0,
        inter_attr: 0,
        exter_attr: entry.external_attribute,
        lh_offset: lh_offset.as_u32_field(),
    };

    let mut bytes = Vec::with_capacity(
        SIGNATURE_LENGTH + CDH_LENGTH + entry.filename.len() + extra_field.len() + entry.comment.len(),
    );
    bytes.extend_from_slice(&CDH_SIGNATURE.to_le_bytes());
    bytes.extend_from_slice(&header.as_slice());
    bytes.extend_from_slice(entry.filename.as_bytes());
    bytes.extend_from_slice(&extra_field);
    bytes.extend_from_slice(entry.comment.as_bytes());

    Ok(bytes)
}

/// Builds a Zip64 end of central directory record.
pub fn zip64_end_of_central_directory_record(entries: u64, cd_size: u64, cd_offset: u64) -> Vec<u8> {
    let record = Zip64EndOfCentralDirectoryRecord {
        size_of_zip64_end_of_cd_record: (ZIP64_EOCDR_LENGTH - 8) as u64,
        version_made_by: as_made_by(AttributeCompatibility::Unix, ZIP64_VERSION),
        version_needed_to_extract: ZIP64_VERSION,
        disk_number: 0,
        disk_number_start_of_cd: 0,
        num_entries_in_directory_on_disk: entries,
        num_entries_in_directory: entries,
        directory_size: cd_size,
        offset_of_start_of_directory: cd_offset,
    };

    let mut bytes = Vec::with_capacity(SIGNATURE_LENGTH + ZIP64_EOCDR_LENGTH);
    bytes.extend_from_slice(&ZIP64_EOCDR_SIGNATURE.to_le_bytes());
    bytes.extend_from_slice(&record.as_slice());
    bytes
}

/// Builds a Zip64 end of central directory locator pointing at the record written at `eocdr_offset`.
pub fn zip64_end_of_central_directory_locator(eocdr_offset: u64) -> Vec<u8> {
    let locator = Zip64EndOfCentralDirectoryLocator {
        number_of_disk_with_start_of_zip64_end_of_central_directory: 0,
        relative_offset: eocdr_offset,
        total_number_of_disks: 1,
    };

    let mut bytes = Vec::with_capacity(SIGNATURE_LENGTH + ZIP64_EOCDL_LENGTH);
    bytes.extend_from_slice(&ZIP64_EOCDL_SIGNATURE.to_le_bytes());
    bytes.extend_from_slice(&locator.as_slice());
    bytes
}

/// Builds the end of central directory record.
///
/// In Zip64 mode the count, size & offset fields hold their sentinels and readers resolve them through the Zip64
/// records. Otherwise values which don't fit are rejected.
pub fn end_of_central_directory_record(
    entries: u64,
    cd_size: u64,
    cd_offset: u64,
    comment: &str,
    mode: Zip64Mode,
) -> Result<Vec<u8>> {
    let (num_of_entries, size_cent_dir, cent_dir_offset) = match mode {
        Zip64Mode::Enabled => (NON_ZIP64_MAX_NUM_FILES, NON_ZIP64_MAX_SIZE, NON_ZIP64_MAX_SIZE),
        Zip64Mode::Disabled => (
            entries.try_into().map_err(|_| ZipError::Zip64Needed(Zip64ErrorCase::TooManyFiles))?,
            cd_size.try_into().map_err(|_| ZipError::Zip64Needed(Zip64ErrorCase::LargeFile))?,
            cd_offset.try_into().map_err(|_| ZipError::Zip64Needed(Zip64ErrorCase::LargeFile))?,
        ),
    };

    let header = EndOfCentralDirectoryHeader {
        disk_num: 0,
        start_cent_dir_disk: 0,
        num_of_entries_disk: num_of_entries,
        num_of_entries,
        size_cent_dir,
        cent_dir_offset,
        file_comm_length: comment.len().try_into().map_err(|_| ZipError::CommentTooLarge)?,
    };

    let mut bytes = Vec::with_capacity(SIGNATURE_LENGTH + EOCDR_LENGTH + comment.len());
    bytes.extend_from_slice(&EOCDR_SIGNATURE.to_le_bytes());
    bytes.extend_from_slice(&header.as_slice());
    bytes.extend_from_slice(comment.as_bytes());

    Ok(bytes)
}
