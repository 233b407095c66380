// Tapecat: backup catalog reconstruction.

// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

//! Tapecat error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type used across the tapecat library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to callers.
///
/// Per-line anomalies in log files are not errors: they are logged and
/// the line is skipped, because old and hand-edited log files are a fact
/// of life in real catalogs.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    /// A dumpspec component failed pattern validation.
    #[error("bad pattern {pattern:?}: {source}")]
    BadPattern {
        pattern: String,
        source: regex::Error,
    },

    /// A sort order string contained a letter that selects no column.
    #[error("invalid sort order {order:?}")]
    BadSortOrder { order: String },

    /// A log file that an existence check said was present could not be
    /// opened. Unlike a simply absent file, this is fatal.
    #[error("could not open log file {path:?}: {source}")]
    OpenLog { path: PathBuf, source: io::Error },

    /// A tape list or disk list file line could not be understood.
    #[error("malformed line {line_number} in {path:?}: {line:?}")]
    MalformedListLine {
        path: PathBuf,
        line_number: usize,
        line: String,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
