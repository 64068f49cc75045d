// Copyright (c) 2023 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! A set of [`tokio`]-specific type aliases and features.
//!
//! # Usage
//! With the `tokio` feature enabled, [`base::write::ZipFileWriter`] implements the additional constructors
//! [`base::write::ZipFileWriter::with_tokio()`] and [`base::write::ZipFileWriter::with_tokio_options()`], which
//! internally convert between the required async IO traits.
//!
//! The writer returned by these constructors wraps the output in a compatibility type provided by [`tokio_util`].
//! The alias within this module allows it to be named without pulling in that dependency manually. Sources passed to
//! [`base::write::ZipFileWriter::write_entry_stream()`] are converted the same way, via
//! [`TokioAsyncReadCompatExt::compat()`].

#[cfg(doc)]
use crate::base;
#[cfg(doc)]
use tokio;

pub use tokio_util::compat::TokioAsyncReadCompatExt;

pub mod write {
    //! A module which supports writing ZIP files.

    #[cfg(doc)]
    use crate::base;
    use tokio_util::compat::Compat;

    /// A [`tokio`]-specific type alias for [`base::write::ZipFileWriter`];
    pub type ZipFileWriter<W> = crate::base::write::ZipFileWriter<Compat<W>>;
}
