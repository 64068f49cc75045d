// Copyright (c) 2021-2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! # async_zip_stream
//!
//! An asynchronous ZIP archive writer for forward-only outputs such as sockets and HTTP response bodies.
//!
//! ## Features
//! - A runtime-agnostic design using `futures-lite`'s IO traits, with `tokio` compatibility behind a feature.
//! - Entries of unknown size streamed chunk by chunk, with sizes deferred to data descriptors.
//! - Zip64 structures (enabled by default) for entries & archives beyond 4 GiB.
//! - Stored and Deflate compression methods.
//! - Aims for reasonable [specification](https://pkware.cachefly.net/webdocs/casestudies/APPNOTE.TXT) compliance.
//!
//! ## Installation
//!
//! ```toml
//! [dependencies]
//! async_zip_stream = { version = "0.1.0", features = ["full"] }
//! ```
//!
//! ### Feature Flags
//! - `full` - Enables all below features.
//! - `tokio` - Enables constructors & type aliases for use with `tokio`'s IO types.
//! - `chrono` - Enables support for the `chrono` crate, and timestamps of the current time for new entries.
//! - `deflate` - Enables real DEFLATE compression; without it, Deflate entries at [`CompressionLevel::None`] are
//!   still available.

pub mod base;
pub mod codec;
pub mod error;

#[cfg(feature = "tokio")]
pub mod tokio;

pub(crate) mod date;
pub(crate) mod entry;
pub(crate) mod opts;
pub(crate) mod spec;

pub use crate::spec::attribute::{AttributeCompatibility, AttributePresets};
pub use crate::spec::compression::{Compression, CompressionLevel};
pub use crate::spec::counter::{WideCounter, Zip64Mode};

pub use crate::date::{builder::ZipDateTimeBuilder, ZipDateTime};
pub use crate::entry::{builder::ZipEntryBuilder, ZipEntryOptions};
pub use crate::opts::ZipWriterOptions;
