// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! An offset & length counter whose serialised width follows the archive's Zip64 mode.

use crate::error::{Result, Zip64ErrorCase, ZipError};
use crate::spec::consts::NON_ZIP64_MAX_SIZE;

/// The integer width mode an archive is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zip64Mode {
    /// All sizes & offsets must fit within 32 bits and are written as 4-byte fields.
    Disabled,
    /// Sizes & offsets are true 64-bit values and are written as 8-byte fields where the record allows it.
    Enabled,
}

impl Zip64Mode {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Zip64Mode::Enabled)
    }
}

impl From<bool> for Zip64Mode {
    fn from(zip64: bool) -> Self {
        match zip64 {
            true => Zip64Mode::Enabled,
            false => Zip64Mode::Disabled,
        }
    }
}

/// An unsigned counter with add-in-place semantics, tagged with the [`Zip64Mode`] it will be serialised in.
///
/// In [`Zip64Mode::Disabled`] the counter refuses to grow past `u32::MAX` rather than wrapping; archives written in
/// that mode are bounded to 4 GiB entries & offsets. In [`Zip64Mode::Enabled`] it is a checked 64-bit counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WideCounter {
    value: u64,
    mode: Zip64Mode,
}

impl WideCounter {
    pub fn new(initial: u64, mode: Zip64Mode) -> Self {
        Self { value: initial, mode }
    }

    pub fn zero(mode: Zip64Mode) -> Self {
        Self::new(0, mode)
    }

    /// Adds `delta` to this counter in place.
    ///
    /// The counter is left untouched if the addition fails.
    pub fn add(&mut self, delta: u64) -> Result<&mut Self> {
        let value = self.value.checked_add(delta).ok_or(ZipError::CounterOverflow)?;

        if !self.mode.is_enabled() && value > NON_ZIP64_MAX_SIZE as u64 {
            return Err(ZipError::Zip64Needed(Zip64ErrorCase::LargeFile));
        }

        self.value = value;
        Ok(self)
    }

    pub fn get(&self) -> u64 {
        self.value
    }

    pub fn mode(&self) -> Zip64Mode {
        self.mode
    }

    /// Returns the low 32 bits of this counter with little endianness.
    pub fn to_low_bytes(&self) -> [u8; 4] {
        pack32le(self.value as u32)
    }

    /// Returns this counter as a 4-byte or 8-byte little endian field, depending on its mode.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        match self.mode {
            Zip64Mode::Disabled => self.to_low_bytes().to_vec(),
            Zip64Mode::Enabled => pack64le(self.value).to_vec(),
        }
    }

    /// Returns the value to store within a 32-bit record field.
    ///
    /// In Zip64 mode this is always the sentinel, as the true value is carried by a Zip64 structure.
    pub fn as_u32_field(&self) -> u32 {
        match self.mode {
            Zip64Mode::Disabled => self.value as u32,
            Zip64Mode::Enabled => NON_ZIP64_MAX_SIZE,
        }
    }
}

pub fn pack32le(value: u32) -> [u8; 4] {
    value.to_le_bytes()
}

pub fn pack64le(value: u64) -> [u8; 8] {
    value.to_le_bytes()
}
