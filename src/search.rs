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

//! Rebuilding the catalog from per-tape log files.
//!
//! For each tape in the position table, [find_dump] opens every log
//! file variant that may describe it and feeds the lines through a
//! reconstruction pass. A dump written whole produces one record per
//! SUCCESS line; a dump split across tape files produces one record per
//! PART line, and those records are only committed to the catalog when
//! the line that ends the dump says how it ended. The log formats of
//! several archiver generations appear in real catalogs and all are
//! understood here: chunked dumps, multi-part dumps, and very old logs
//! with no datestamp field at all.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::warn;

use crate::catalog::{nice_datestamp, FindResult, WHOLE_DUMP};
use crate::disklist::DiskList;
use crate::errors::{Error, Result};
use crate::holding::search_holding_disk;
use crate::logline::{LogKind, LogLine, Tokens};
use crate::misc::leading_number;
use crate::tapelist::{TapeList, NEVER_WRITTEN};

/// Outcome of scanning one log file for one tape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// The file's start-of-tape line named the expected tape.
    pub matched: bool,
    /// Records added to the catalog.
    pub records: usize,
}

/// Build the whole catalog: every tape in the position table, then the
/// holding disk.
///
/// With `dynamic_disklist`, disks found in logs but missing from the
/// inventory are added and kept; otherwise their lines are skipped.
pub fn find_dump(
    tapelist: &TapeList,
    disklist: &mut DiskList,
    log_dir: &Path,
    holding_dir: &Path,
    dynamic_disklist: bool,
) -> Result<Vec<FindResult>> {
    let mut output = Vec::new();
    for position in 1..=tapelist.max_tape() {
        let Some(tape) = tapelist.lookup_tapepos(position) else {
            continue;
        };
        let mut logs = 0;
        for name in candidate_lognames(&tape.datestamp, log_dir) {
            let logfile = log_dir.join(&name);
            let outcome = search_logfile(
                &mut output,
                &tape.label,
                &tape.datestamp,
                &logfile,
                disklist,
                dynamic_disklist,
            )?;
            if outcome.matched {
                logs += 1;
            }
        }
        if logs == 0 && tape.datestamp != NEVER_WRITTEN {
            warn!(
                "no log files found for tape {} written {}",
                tape.label,
                nice_datestamp(&tape.datestamp)
            );
        }
    }
    search_holding_disk(&mut output, holding_dir, disklist)?;
    Ok(output)
}

/// The names of the log files that actually contain data for the tape
/// set, in tape position order.
///
/// Only the first matching file of the `log.<datestamp>.<seq>` family
/// is listed per tape; the split pieces share one run.
pub fn find_log(tapelist: &TapeList, log_dir: &Path) -> Result<Vec<String>> {
    let mut output = Vec::new();
    for position in 1..=tapelist.max_tape() {
        let Some(tape) = tapelist.lookup_tapepos(position) else {
            continue;
        };
        let mut logs = 0;
        for seq in 0.. {
            let name = format!("log.{}.{seq}", tape.datestamp);
            let logfile = log_dir.join(&name);
            if !logfile.exists() {
                break;
            }
            if logfile_matches_tape(&logfile, &tape.label, &tape.datestamp)? {
                output.push(name);
                logs += 1;
                // The remaining pieces of a split run share this name
                // stem; one entry stands for the run.
                break;
            }
        }
        for name in [
            format!("log.{}.amflush", tape.datestamp),
            format!("log.{}", tape.datestamp),
        ] {
            let logfile = log_dir.join(&name);
            if logfile.exists()
                && logfile_matches_tape(&logfile, &tape.label, &tape.datestamp)?
            {
                output.push(name);
                logs += 1;
            }
        }
        if logs == 0 && tape.datestamp != NEVER_WRITTEN {
            warn!(
                "no log files found for tape {} written {}",
                tape.label,
                nice_datestamp(&tape.datestamp)
            );
        }
    }
    Ok(output)
}

/// Existing log file names that may describe a tape written on this
/// datestamp, in search priority order: `log.<ds>.<seq>` for seq 0, 1,
/// ... while present, then the old `log.<ds>.amflush` and `log.<ds>`
/// forms.
fn candidate_lognames(datestamp: &str, log_dir: &Path) -> Vec<String> {
    let mut names = Vec::new();
    for seq in 0.. {
        let name = format!("log.{datestamp}.{seq}");
        if !log_dir.join(&name).exists() {
            break;
        }
        names.push(name);
    }
    for name in [format!("log.{datestamp}.amflush"), format!("log.{datestamp}")] {
        if log_dir.join(&name).exists() {
            names.push(name);
        }
    }
    names
}

fn open_logfile(path: &Path) -> Result<io::Lines<BufReader<File>>> {
    // The caller established that the file exists, so failure here is a
    // real I/O problem and fatal.
    File::open(path)
        .map(|f| BufReader::new(f).lines())
        .map_err(|source| Error::OpenLog {
            path: path.to_owned(),
            source,
        })
}

/// `datestamp <datestamp> label <label>` from a start-of-tape line.
fn parse_taper_datestamp_log(rest: &str) -> Option<(&str, &str)> {
    let mut tokens = Tokens::new(rest);
    if tokens.next_word()? != "datestamp" {
        return None;
    }
    let datestamp = tokens.next_word()?;
    if tokens.next_word()? != "label" {
        return None;
    }
    let label = tokens.next_word()?;
    Some((datestamp, label))
}

/// Consume lines until the start-of-tape line for the expected tape, or
/// end of file.
fn confirm_tape(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    label: &str,
    datestamp: &str,
    logfile: &Path,
) -> Result<bool> {
    for line in lines {
        let line = line?;
        let Some(entry) = LogLine::parse(&line) else {
            continue;
        };
        if entry.kind == LogKind::Start && entry.is_taper() {
            match parse_taper_datestamp_log(entry.rest) {
                None => warn!(
                    "strange start-of-tape line in {}: {line:?}",
                    logfile.display()
                ),
                Some((ck_datestamp, ck_label)) => {
                    if ck_datestamp == datestamp && ck_label == label {
                        return Ok(true);
                    }
                }
            }
        }
    }
    Ok(false)
}

/// Does this log file belong to the given tape?
///
/// The identity probe of the reconstruction pass: it reads only far
/// enough to find the start-of-tape line and allocates no records.
pub fn logfile_matches_tape(logfile: &Path, label: &str, datestamp: &str) -> Result<bool> {
    let mut lines = open_logfile(logfile)?;
    confirm_tape(&mut lines, label, datestamp, logfile)
}

/// Reconstruct all dump records one log file holds for one tape,
/// appending them to `output`.
///
/// A file whose start-of-tape line names a different tape contributes
/// nothing; that is the common case for shared old-style log files and
/// not an error.
pub fn search_logfile(
    output: &mut Vec<FindResult>,
    label: &str,
    datestamp: &str,
    logfile: &Path,
    disklist: &mut DiskList,
    dynamic_disklist: bool,
) -> Result<SearchOutcome> {
    let mut lines = open_logfile(logfile)?;
    if !confirm_tape(&mut lines, label, datestamp, logfile)? {
        return Ok(SearchOutcome {
            matched: false,
            records: 0,
        });
    }

    let mut records = 0;
    let mut filenum: u64 = 0;
    // Old-style log files hold several tapes' runs in sequence; only
    // lines between start-of-tape lines for our label count.
    let mut within_label = true;
    // Parts of a split dump, held back until the line that ends the
    // dump decides their status.
    let mut part_find: Vec<FindResult> = Vec::new();

    for line in lines {
        let line = line?;
        let Some(entry) = LogLine::parse(&line) else {
            continue;
        };

        if entry.kind == LogKind::Start && entry.is_taper() {
            match parse_taper_datestamp_log(entry.rest) {
                None => warn!(
                    "strange start-of-tape line in {}: {line:?}",
                    logfile.display()
                ),
                Some((_, ck_label)) => within_label = ck_label == label,
            }
            continue;
        }
        if !within_label {
            continue;
        }
        if entry.is_taper()
            && matches!(
                entry.kind,
                LogKind::Success | LogKind::Chunk | LogKind::Part | LogKind::PartPartial
            )
        {
            filenum += 1;
        }
        if !matches!(
            entry.kind,
            LogKind::Success
                | LogKind::ChunkSuccess
                | LogKind::Done
                | LogKind::Fail
                | LogKind::Chunk
                | LogKind::Part
                | LogKind::Partial
                | LogKind::PartPartial
        ) {
            continue;
        }

        let mut tokens = Tokens::new(entry.rest);

        if matches!(entry.kind, LogKind::Part | LogKind::PartPartial) {
            // Part lines lead with the label and tape file number.
            let Some(thelabel) = tokens.next_word() else {
                warn!("strange log line in {}: {line:?}", logfile.display());
                continue;
            };
            if thelabel != label {
                warn!(
                    "part line label {thelabel:?} does not match tape {label:?} in {}",
                    logfile.display()
                );
                continue;
            }
            let Some(number) = tokens.next_word() else {
                warn!("strange log line in {}: {line:?}", logfile.display());
                continue;
            };
            filenum = leading_number(number) as u64;
        }

        let (Some(host), Some(disk), Some(date_field)) = (
            tokens.next_word().map(str::to_owned),
            tokens.next_quoted(),
            tokens.next_word().map(str::to_owned),
        ) else {
            warn!("strange log line in {}: {line:?}", logfile.display());
            continue;
        };

        let mut partnum = WHOLE_DUMP.to_owned();
        let timestamp;
        let level;
        if date_field.len() < 3 {
            // Very old logs have no datestamp field; this short token
            // is the level, and the tape's datestamp stands in.
            level = leading_number(&date_field) as i32;
            timestamp = datestamp.to_owned();
        } else {
            timestamp = date_field;
            if matches!(
                entry.kind,
                LogKind::Chunk | LogKind::Part | LogKind::PartPartial | LogKind::Done
            ) {
                let Some(part_field) = tokens.next_word() else {
                    warn!("strange log line in {}: {line:?}", logfile.display());
                    continue;
                };
                partnum = part_field.to_owned();
            }
            let Some(Ok(parsed_level)) = tokens.next_word().map(|w| w.parse::<i32>()) else {
                warn!("strange log line in {}: {line:?}", logfile.display());
                continue;
            };
            level = parsed_level;
        }

        let rest = tokens.rest();
        if rest.is_empty() {
            warn!("strange log line in {}: {line:?}", logfile.display());
            continue;
        }

        if disklist.lookup_disk(&host, &disk).is_none() {
            if !dynamic_disklist {
                continue;
            }
            disklist.add_disk(&host, &disk);
        }
        if !disklist.find_match(&host, &disk) {
            continue;
        }

        if entry.is_taper() {
            match entry.kind {
                LogKind::Success => {
                    output.push(FindResult {
                        timestamp,
                        hostname: host,
                        diskname: disk,
                        level,
                        label: label.to_owned(),
                        filenum,
                        partnum,
                        status: "OK".to_owned(),
                    });
                    records += 1;
                }
                LogKind::ChunkSuccess | LogKind::Done | LogKind::Partial | LogKind::Fail => {
                    // The line that ends a split dump: fix up the held
                    // parts and commit them.
                    if matches!(entry.kind, LogKind::Partial | LogKind::Fail) {
                        let status = if entry.kind == LogKind::Partial {
                            "PARTIAL".to_owned()
                        } else {
                            rest.to_owned()
                        };
                        for part in &mut part_find {
                            part.status = status.clone();
                        }
                    }
                    records += part_find.len();
                    output.append(&mut part_find);
                }
                LogKind::Chunk | LogKind::Part | LogKind::PartPartial => {
                    let status = if entry.kind == LogKind::PartPartial {
                        "PARTIAL"
                    } else {
                        "OK"
                    };
                    part_find.push(FindResult {
                        timestamp,
                        hostname: host,
                        diskname: disk,
                        level,
                        label: label.to_owned(),
                        filenum,
                        partnum,
                        status: status.to_owned(),
                    });
                    if entry.kind == LogKind::PartPartial {
                        // Also ends the dump at this tape boundary.
                        records += part_find.len();
                        output.append(&mut part_find);
                    }
                }
                _ => {}
            }
        } else if entry.kind == LogKind::Fail {
            // Failures of other programs matter to operators too.
            output.push(FindResult {
                timestamp,
                hostname: host,
                diskname: disk,
                level,
                label: label.to_owned(),
                filenum: 0,
                partnum,
                status: format!("FAILED ({}) {}", entry.program, rest),
            });
            records += 1;
        }
    }

    if !part_find.is_empty() {
        warn!(
            "part list for tape {label} never terminated in {}; {} parts dropped",
            logfile.display(),
            part_find.len()
        );
    }

    Ok(SearchOutcome {
        matched: true,
        records,
    })
}
