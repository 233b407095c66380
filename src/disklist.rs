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

//! The disk inventory: which (host, disk) pairs the server backs up.
//!
//! Catalog reconstruction only keeps records for disks that are in the
//! inventory and scheduled; in dynamic mode, disks discovered in old
//! logs are added on the fly so historic dumps of retired disks still
//! show up.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::errors::{Error, Result};
use crate::logline::Tokens;

/// One backed-up filesystem on one host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disk {
    pub host: String,
    pub disk: String,
    /// Scheduled for backup; unscheduled disks are filtered out of the
    /// catalog.
    pub todo: bool,
}

/// The inventory of disks, keyed by (host, disk).
#[derive(Debug, Clone, Default)]
pub struct DiskList {
    disks: HashMap<(String, String), Disk>,
}

impl DiskList {
    pub fn new() -> DiskList {
        DiskList::default()
    }

    /// Load a plain-text disk list: one `host disk` pair per line, the
    /// disk name optionally double-quoted; `#` starts a comment.
    pub fn load(path: &Path) -> Result<DiskList> {
        let mut list = DiskList::new();
        for (index, line) in fs::read_to_string(path)?.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut tokens = Tokens::new(line);
            match (tokens.next_word().map(str::to_owned), tokens.next_quoted()) {
                (Some(host), Some(disk)) => {
                    list.add_disk(&host, &disk);
                }
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

    /// Add a disk, scheduled. Returns a reference to the entry.
    pub fn add_disk(&mut self, host: &str, disk: &str) -> &Disk {
        self.disks
            .entry((host.to_owned(), disk.to_owned()))
            .or_insert_with(|| Disk {
                host: host.to_owned(),
                disk: disk.to_owned(),
                todo: true,
            })
    }

    pub fn lookup_disk(&self, host: &str, disk: &str) -> Option<&Disk> {
        self.disks.get(&(host.to_owned(), disk.to_owned()))
    }

    /// Is this (host, disk) present and scheduled?
    pub fn find_match(&self, host: &str, disk: &str) -> bool {
        self.lookup_disk(host, disk).is_some_and(|d| d.todo)
    }

    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.disks.len()
    }
}
