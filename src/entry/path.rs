// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::error::{Result, ZipError};

/// Normalises an entry path into the form stored within an archive.
///
/// Separators are forward slashes, there's no leading or trailing slash, and empty or `.` segments are dropped.
pub(crate) fn normalize(path: &str) -> Result<String> {
    let normalized = path
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/");

    if normalized.is_empty() {
        return Err(ZipError::InvalidFilename(path.to_string()));
    }

    Ok(normalized)
}

/// Normalises a directory path, suffixing it with the trailing slash which marks directory entries.
pub(crate) fn normalize_dir(path: &str) -> Result<String> {
    let mut normalized = normalize(path)?;
    normalized.push('/');
    Ok(normalized)
}
