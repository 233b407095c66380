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

//! Pattern predicates for selecting hosts, disks, datestamps and levels.
//!
//! Patterns are regular expressions matched against the whole field
//! value. Host names are matched case-insensitively, since DNS names
//! are.

use regex::{Regex, RegexBuilder};

use crate::errors::{Error, Result};

/// Check that a pattern compiles; used when parsing dumpspecs, so that
/// a bad pattern is reported once up front rather than failing silently
/// on every candidate record.
pub fn validate_pattern(pattern: &str) -> Result<()> {
    compile(pattern, false).map(|_| ())
}

fn compile(pattern: &str, case_insensitive: bool) -> Result<Regex> {
    RegexBuilder::new(&format!("^(?:{pattern})$"))
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|source| Error::BadPattern {
            pattern: pattern.to_owned(),
            source,
        })
}

fn is_match(pattern: &str, value: &str, case_insensitive: bool) -> bool {
    // Patterns reaching this point normally passed validate_pattern;
    // one that did not simply matches nothing.
    compile(pattern, case_insensitive).is_ok_and(|re| re.is_match(value))
}

pub fn match_host(pattern: &str, host: &str) -> bool {
    is_match(pattern, host, true)
}

pub fn match_disk(pattern: &str, disk: &str) -> bool {
    is_match(pattern, disk, false)
}

pub fn match_datestamp(pattern: &str, datestamp: &str) -> bool {
    is_match(pattern, datestamp, false)
}

pub fn match_level(pattern: &str, level: &str) -> bool {
    is_match(pattern, level, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_are_anchored() {
        assert!(match_disk("/usr", "/usr"));
        assert!(!match_disk("/usr", "/usr/local"));
        assert!(match_disk("/usr.*", "/usr/local"));
    }

    #[test]
    fn host_match_ignores_case() {
        assert!(match_host("fileserver", "FileServer"));
        assert!(!match_disk("/Home", "/home"));
    }

    #[test]
    fn datestamp_prefix_pattern() {
        assert!(match_datestamp("202301..", "20230115"));
        assert!(!match_datestamp("202301..", "20230215"));
    }

    #[test]
    fn level_matches_decimal_rendering() {
        assert!(match_level("[0-3]", "2"));
        assert!(!match_level("[0-3]", "4"));
    }

    #[test]
    fn validate_rejects_bad_pattern() {
        assert!(validate_pattern("[").is_err());
        assert!(validate_pattern("web[0-9]+").is_ok());
    }
}
