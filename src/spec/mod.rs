// Copyright (c) 2021 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

pub mod attribute;
pub mod compression;
pub(crate) mod consts;
pub mod counter;
pub(crate) mod header;
pub(crate) mod record;
pub(crate) mod version;
