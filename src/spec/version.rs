// Copyright (c) 2021 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::spec::attribute::AttributeCompatibility;
use crate::spec::compression::Compression;
use crate::spec::counter::Zip64Mode;

/// The version needed to extract any archive using Zip64 structures (4.5).
pub const ZIP64_VERSION: u16 = 45;

// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#443
pub fn as_needed_to_extract(compression: Compression, is_dir: bool, mode: Zip64Mode) -> u16 {
    if mode.is_enabled() {
        return ZIP64_VERSION;
    }

    match (compression, is_dir) {
        (Compression::Deflate, _) | (_, true) => 20,
        _ => 10,
    }
}

// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#4422
pub fn as_made_by(compatibility: AttributeCompatibility, needed: u16) -> u16 {
    let host: u16 = compatibility.into();
    (host << 8) | needed
}
