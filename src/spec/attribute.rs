// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! Resolution of per-entry general purpose flags and external file attributes.

use crate::spec::header::GeneralPurposeFlag;

/// An attribute host compatibility supported by this crate.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeCompatibility {
    Unix,
}

impl From<&AttributeCompatibility> for u16 {
    // Convert a supported attribute host compatibility into its relevant u16 stored with little endianness.
    // https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#4422
    fn from(compatibility: &AttributeCompatibility) -> Self {
        match compatibility {
            AttributeCompatibility::Unix => 3,
        }
    }
}

impl From<AttributeCompatibility> for u16 {
    // Convert a supported attribute host compatibility into its relevant u16 stored with little endianness.
    fn from(compatibility: AttributeCompatibility) -> Self {
        (&compatibility).into()
    }
}

const S_IFDIR: u32 = 0o040000;
const S_IFREG: u32 = 0o100000;

const DOS_DIRECTORY: u32 = 0x10;
const DOS_ARCHIVE: u32 = 0x20;

/// The external file attributes written for regular files and directories.
///
/// The upper sixteen bits hold the Unix mode (including the file type bits) and the low byte holds the MS-DOS
/// attribute bits. Presets are chosen per archive; individual entries cannot override them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributePresets {
    file: u32,
    directory: u32,
}

impl Default for AttributePresets {
    /// `-rw-r--r--` for files and `drwxr-xr-x` for directories.
    fn default() -> Self {
        Self::unix(0o644, 0o755)
    }
}

impl AttributePresets {
    /// Constructs presets from Unix permission bits for files and directories.
    ///
    /// Only the permission bits (`0o7777`) of each mode are used; the file type bits are filled in here.
    pub fn unix(file_mode: u16, dir_mode: u16) -> Self {
        Self {
            file: pack_external_attribute(S_IFREG | (file_mode as u32 & 0o7777), DOS_ARCHIVE),
            directory: pack_external_attribute(S_IFDIR | (dir_mode as u32 & 0o7777), DOS_DIRECTORY),
        }
    }

    /// Constructs presets from raw external file attribute words.
    pub fn raw(file: u32, directory: u32) -> Self {
        Self { file, directory }
    }

    pub fn file(&self) -> u32 {
        self.file
    }

    pub fn directory(&self) -> u32 {
        self.directory
    }

    /// Returns the external file attribute for an entry.
    pub fn resolve(&self, is_dir: bool) -> u32 {
        match is_dir {
            true => self.directory,
            false => self.file,
        }
    }
}

fn pack_external_attribute(unix_mode: u32, dos: u32) -> u32 {
    (unix_mode << 16) | (dos & 0xFF)
}

/// Returns whether the given text needs the general purpose UTF-8 flag (ie. it isn't representable as ASCII).
pub fn requires_utf8_flag(text: &str) -> bool {
    !text.is_ascii()
}

/// Resolves the general purpose flags of an entry.
///
/// Streamed file entries always defer their sizes to a trailing data descriptor.
pub fn resolve_flags(filename: &str, comment: Option<&str>, data_descriptor: bool) -> GeneralPurposeFlag {
    let filename_unicode = requires_utf8_flag(filename) || comment.map(requires_utf8_flag).unwrap_or(false);

    GeneralPurposeFlag { encrypted: false, data_descriptor, filename_unicode }
}
