// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

pub const SIGNATURE_LENGTH: usize = 4;

// Local file header constants
//
// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#437
pub const LFH_SIGNATURE: u32 = 0x4034b50;
pub const LFH_LENGTH: usize = 26;

// Central directory header constants
//
// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#4312
pub const CDH_SIGNATURE: u32 = 0x2014b50;
pub const CDH_LENGTH: usize = 42;

// End of central directory record constants
//
// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#4316
pub const EOCDR_SIGNATURE: u32 = 0x6054b50;
pub const EOCDR_LENGTH: usize = 18;

// Zip64 end of central directory record & locator constants
//
// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#4314
pub const ZIP64_EOCDR_SIGNATURE: u32 = 0x06064b50;
pub const ZIP64_EOCDR_LENGTH: usize = 52;
// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#4315
pub const ZIP64_EOCDL_SIGNATURE: u32 = 0x07064b50;
pub const ZIP64_EOCDL_LENGTH: usize = 16;

// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#439
pub const DATA_DESCRIPTOR_SIGNATURE: u32 = 0x8074b50;

// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#453
pub const ZIP64_EXTRA_FIELD_HEADER_ID: u16 = 0x0001;

/// The sentinel written into 32-bit size & offset fields when the true value lives in a Zip64 structure.
pub const NON_ZIP64_MAX_SIZE: u32 = 0xFFFFFFFF;
/// The sentinel written into 16-bit entry count fields when the true value lives in a Zip64 structure.
pub const NON_ZIP64_MAX_NUM_FILES: u16 = 0xFFFF;

/// The number of bytes read from an entry's source per iteration.
pub const STREAM_CHUNK_SIZE: usize = 1024 * 1024;

/// The largest payload a single DEFLATE stored block may carry.
pub const DEFLATE_STORED_BLOCK_MAX: usize = 0xFFFF;
