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

//! Dumps staged on the holding disk, not yet written to tape.
//!
//! Each holding file opens with a one-line text header naming what it
//! holds:
//!
//! ```text
//! FILE 20230101 fileserver "/home" lev 0 comp .gz program /bin/tar
//! ```
//!
//! Only `FILE` headers are dumps; continuation chunks and other types
//! are skipped for catalog purposes.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::catalog::{FindResult, WHOLE_DUMP};
use crate::disklist::DiskList;
use crate::errors::Result;
use crate::logline::Tokens;

/// Parsed holding-file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldingHeader {
    /// Header type word, `FILE` for a dump.
    pub file_type: String,
    pub datestamp: String,
    pub host: String,
    pub disk: String,
    pub level: i32,
}

impl HoldingHeader {
    pub fn is_dump(&self) -> bool {
        self.file_type == "FILE"
    }
}

/// All regular files under the holding directory, depth first, sorted
/// by name at every level so the encounter order is deterministic.
///
/// A missing holding directory is an empty holding disk, not an error.
pub fn list_holding_files(holding_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if holding_dir.is_dir() {
        walk_sorted(holding_dir, &mut files)?;
    }
    Ok(files)
}

fn walk_sorted(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    entries.sort();
    for path in entries {
        if path.is_dir() {
            walk_sorted(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

/// Read and parse the header of one holding file.
///
/// Returns None for anything unreadable or not header-shaped; such
/// files are simply not dumps.
pub fn read_holding_header(path: &Path) -> Option<HoldingHeader> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            debug!("cannot open holding file {}: {err}", path.display());
            return None;
        }
    };
    let mut first_line = String::new();
    if BufReader::new(file).read_line(&mut first_line).is_err() {
        debug!("cannot read holding file {}", path.display());
        return None;
    }
    parse_holding_header(&first_line)
}

fn parse_holding_header(line: &str) -> Option<HoldingHeader> {
    let mut tokens = Tokens::new(line);
    let file_type = tokens.next_word()?.to_owned();
    let datestamp = tokens.next_word()?.to_owned();
    let host = tokens.next_word()?.to_owned();
    let disk = tokens.next_quoted()?;
    if tokens.next_word()? != "lev" {
        return None;
    }
    let level = tokens.next_word()?.parse().ok()?;
    Some(HoldingHeader {
        file_type,
        datestamp,
        host,
        disk,
        level,
    })
}

/// Append a catalog record for every eligible dump on the holding disk.
///
/// Eligible means: a dump-type header with a level in 0..=9, whose disk
/// resolves in the inventory and is scheduled. Old chunked holding
/// files carried chunk suffixes on the hostname, so resolution retries
/// with the last `.`-delimited suffix stripped until a disk is found or
/// the name is exhausted.
pub fn search_holding_disk(
    output: &mut Vec<FindResult>,
    holding_dir: &Path,
    disklist: &DiskList,
) -> Result<()> {
    for holding_file in list_holding_files(holding_dir)? {
        let Some(header) = read_holding_header(&holding_file) else {
            continue;
        };
        if !header.is_dump() {
            continue;
        }
        if header.level < 0 || header.level > 9 {
            continue;
        }
        let mut host = header.host.clone();
        let resolved = loop {
            if disklist.lookup_disk(&host, &header.disk).is_some() {
                break true;
            }
            match host.rfind('.') {
                Some(dot) => host.truncate(dot),
                None => break false,
            }
        };
        if !resolved || !disklist.find_match(&host, &header.disk) {
            continue;
        }
        output.push(FindResult {
            timestamp: header.datestamp,
            hostname: host,
            diskname: header.disk,
            level: header.level,
            label: holding_file.to_string_lossy().into_owned(),
            filenum: 0,
            partnum: WHOLE_DUMP.to_owned(),
            status: "OK".to_owned(),
        });
    }
    Ok(())
}
