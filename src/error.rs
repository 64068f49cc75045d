// Copyright (c) 2021 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! A module which holds relevant error reporting structures/types.

use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::spec::compression::{Compression, CompressionLevel};

/// A Result type alias over ZipError to minimise repetition.
pub type Result<V> = std::result::Result<V, ZipError>;

#[derive(Debug, PartialEq, Eq)]
pub enum Zip64ErrorCase {
    TooManyFiles,
    LargeFile,
}

impl Display for Zip64ErrorCase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooManyFiles => write!(f, "More than 65535 files in archive"),
            Self::LargeFile => write!(f, "File or offset is larger than 4 GiB"),
        }
    }
}

/// An enum of possible errors and their descriptions.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ZipError {
    #[error("compression {0:?} is not available at level {1:?}")]
    CompressionNotAvailable(Compression, CompressionLevel),
    #[error("the archive has already been finalised")]
    WriterFinalized,
    #[error("invalid filename: '{0}'")]
    InvalidFilename(String),
    #[error("attempted to write a ZIP64 archive structure whilst ZIP64 is disabled ({0})")]
    Zip64Needed(Zip64ErrorCase),
    #[error("an offset or length counter overflowed 64 bits")]
    CounterOverflow,

    #[error("filename exceeds the maximum length of a ZIP field")]
    FileNameTooLarge,
    #[error("comment exceeds the maximum length of a ZIP field")]
    CommentTooLarge,

    #[error("an upstream reader returned an error: {0}")]
    UpstreamReadError(#[source] std::io::Error),
    #[error("an upstream writer returned an error: {0}")]
    UpstreamWriteError(#[source] std::io::Error),
}

impl From<std::io::Error> for ZipError {
    /// Converts a writer error, recovering any [`ZipError`] which was raised within an IO adapter of this crate.
    fn from(err: std::io::Error) -> Self {
        if !err.get_ref().is_some_and(|inner| inner.is::<ZipError>()) {
            return ZipError::UpstreamWriteError(err);
        }

        let kind = err.kind();
        match err.into_inner().map(|inner| inner.downcast::<ZipError>()) {
            Some(Ok(inner)) => *inner,
            Some(Err(inner)) => ZipError::UpstreamWriteError(std::io::Error::new(kind, inner)),
            None => ZipError::UpstreamWriteError(kind.into()),
        }
    }
}
