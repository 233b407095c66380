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

//! Reconstructed dump records.
//!
//! A catalog is just an owned `Vec<FindResult>`, built by appending
//! while scanning; the order of a freshly built catalog is unspecified
//! until [crate::sort::sort_find_result] runs.

use crate::misc::leading_number;

/// Partnum sentinel for a dump that was written whole, not in parts.
pub const WHOLE_DUMP: &str = "--";

/// One reconstructed dump attempt: one (host, disk) backed up once,
/// landing on one tape file or holding file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindResult {
    /// When the dump was taken, `YYYYMMDD` or `YYYYMMDDHHMMSS`.
    pub timestamp: String,
    pub hostname: String,
    pub diskname: String,
    pub level: i32,
    /// Tape label, or the holding file path for unflushed dumps.
    pub label: String,
    /// Position on the tape; 0 for holding-only and legacy records.
    pub filenum: u64,
    /// Part number like `2/4`, or [WHOLE_DUMP].
    pub partnum: String,
    /// `OK`, `PARTIAL`, `FAILED (<program>) <reason>`, or the verbatim
    /// text of the log line that ended the dump.
    pub status: String,
}

/// Render a datestamp for humans: `YYYY-MM-DD`, with a ` HH:MM:SS`
/// suffix when the stamp carries a time of day.
pub fn nice_datestamp(datestamp: &str) -> String {
    let date = leading_number(&datestamp.chars().take(8).collect::<String>());
    let year = date / 10000;
    let month = date / 100 % 100;
    let day = date % 100;
    if datestamp.chars().count() <= 8 {
        format!("{year:4}-{month:02}-{day:02}")
    } else {
        let time = leading_number(&datestamp.chars().skip(8).take(6).collect::<String>());
        let hours = time / 10000;
        let minutes = time / 100 % 100;
        let seconds = time % 100;
        format!("{year:4}-{month:02}-{day:02} {hours:02}:{minutes:02}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::nice_datestamp;

    #[test]
    fn compact_datestamp() {
        assert_eq!(nice_datestamp("20230101"), "2023-01-01");
    }

    #[test]
    fn extended_datestamp() {
        assert_eq!(nice_datestamp("20230101123456"), "2023-01-01 12:34:56");
    }

    #[test]
    fn never_written_sentinel() {
        // The "0" datestamp still renders without panicking.
        assert_eq!(nice_datestamp("0"), "   0-00-00");
    }
}
