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

//! The tape position table: which tape labels exist and when each was
//! last written.
//!
//! The on-disk form is one `<datestamp> <label> [flags...]` line per
//! tape, most recently written first; the line number is the tape's
//! position. A datestamp of `0` marks a tape that has never been
//! written.

use std::fs;
use std::path::Path;

use crate::errors::{Error, Result};

/// Datestamp of a tape that has never been written.
pub const NEVER_WRITTEN: &str = "0";

/// One slot in the tape position table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    /// 1-based position, 1 = most recently written.
    pub position: usize,
    pub datestamp: String,
    pub label: String,
}

#[derive(Debug, Clone, Default)]
pub struct TapeList {
    tapes: Vec<Tape>,
}

impl TapeList {
    pub fn new() -> TapeList {
        TapeList::default()
    }

    /// Load the tape position table from its text file.
    pub fn load(path: &Path) -> Result<TapeList> {
        let mut list = TapeList::new();
        for (index, line) in fs::read_to_string(path)?.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut words = line.split_whitespace();
            match (words.next(), words.next()) {
                (Some(datestamp), Some(label)) => list.push(datestamp, label),
                _ => {
                    return Err(Error::MalformedListLine {
                        path: path.to_owned(),
                        line_number: index + 1,
                        line: line.to_owned(),
                    })
                }
            }
        }
        Ok(list)
    }

    /// Append a tape at the next position.
    pub fn push(&mut self, datestamp: &str, label: &str) {
        self.tapes.push(Tape {
            position: self.tapes.len() + 1,
            datestamp: datestamp.to_owned(),
            label: label.to_owned(),
        });
    }

    /// Number of slots in the table.
    pub fn max_tape(&self) -> usize {
        self.tapes.len()
    }

    /// The tape at a 1-based position, if any.
    pub fn lookup_tapepos(&self, position: usize) -> Option<&Tape> {
        position
            .checked_sub(1)
            .and_then(|index| self.tapes.get(index))
    }
}
