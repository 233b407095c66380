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

//! Dumpspecs select dumps by host, disk, and datestamp patterns.
//!
//! On a command line, dumpspecs are written as repeating groups of up
//! to three words:
//!
//! ```text
//! [ host [ disk [ datestamp [ host [ disk [ datestamp ... ] ] ] ] ] ]
//! ```
//!
//! An empty component matches anything; a list of one dumpspec with all
//! three components empty is the wildcard list produced by an empty
//! command line.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::holding::{list_holding_files, read_holding_header, HoldingHeader};
use crate::patterns::{match_datestamp, match_disk, match_host, validate_pattern};

/// A (host, disk, datestamp) pattern triple.
///
/// All three fields are always present; empty means "match anything".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dumpspec {
    pub host: String,
    pub disk: String,
    pub datestamp: String,
}

impl Dumpspec {
    pub fn new(host: &str, disk: &str, datestamp: &str) -> Dumpspec {
        Dumpspec {
            host: host.to_owned(),
            disk: disk.to_owned(),
            datestamp: datestamp.to_owned(),
        }
    }

    fn matches_holding(&self, header: &HoldingHeader) -> bool {
        (self.host.is_empty() || match_host(&self.host, &header.host))
            && (self.disk.is_empty() || match_disk(&self.disk, &header.disk))
            && (self.datestamp.is_empty() || match_datestamp(&self.datestamp, &header.datestamp))
    }
}

impl fmt::Display for Dumpspec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Empty components are absent, not empty words.
        fn present(s: &String) -> Option<&str> {
            (!s.is_empty()).then_some(s.as_str())
        }
        f.write_str(&format_dumpspec_components(
            present(&self.host),
            present(&self.disk),
            present(&self.datestamp),
        ))
    }
}

/// Parse a flat argument list into dumpspecs.
///
/// Every non-empty component must be a valid pattern; a bad one fails
/// the whole parse, naming the offending token. An empty argument list
/// yields the single-element wildcard list.
pub fn parse_dumpspecs<S: AsRef<str>>(args: &[S]) -> Result<Vec<Dumpspec>> {
    let mut list = Vec::new();
    for group in args.chunks(3) {
        let host = group[0].as_ref();
        let disk = group.get(1).map_or("", |s| s.as_ref());
        let datestamp = group.get(2).map_or("", |s| s.as_ref());
        for component in [host, disk, datestamp] {
            if !component.is_empty() {
                validate_pattern(component)?;
            }
        }
        list.push(Dumpspec::new(host, disk, datestamp));
    }
    if list.is_empty() {
        list.push(Dumpspec::new("", "", ""));
    }
    Ok(list)
}

/// Is this the wildcard list from an empty command line?
pub fn is_wildcard_list(list: &[Dumpspec]) -> bool {
    matches!(list, [spec]
        if spec.host.is_empty() && spec.disk.is_empty() && spec.datestamp.is_empty())
}

/// Quote one component for shell interpretation, conservatively: any
/// character outside `[A-Za-z0-9./]` triggers surrounding single
/// quotes, and embedded single quotes and backslashes are escaped.
pub(crate) fn quote_dumpspec_string(s: &str) -> String {
    let plain = s
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '/');
    let mut quoted = String::with_capacity(s.len() + 2);
    if !plain {
        quoted.push('\'');
    }
    for c in s.chars() {
        if c == '\'' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    if !plain {
        quoted.push('\'');
    }
    quoted
}

/// Format dumpspec components as a shell-safe string.
///
/// A component is only emitted while every earlier component is
/// present: the disk appears only if the host does, and the datestamp
/// only if both do.
pub fn format_dumpspec_components(
    host: Option<&str>,
    disk: Option<&str>,
    datestamp: Option<&str>,
) -> String {
    let mut out = String::new();
    if let Some(host) = host {
        out.push_str(&quote_dumpspec_string(host));
        if let Some(disk) = disk {
            out.push(' ');
            out.push_str(&quote_dumpspec_string(disk));
            if let Some(datestamp) = datestamp {
                out.push(' ');
                out.push_str(&quote_dumpspec_string(datestamp));
            }
        }
    }
    out
}

/// Find the holding files selected by a dumpspec list.
///
/// Only dump files are considered; each file is kept on its first
/// matching dumpspec, in file encounter order.
pub fn match_holding(specs: &[Dumpspec], holding_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut matching = Vec::new();
    for file in list_holding_files(holding_dir)? {
        let Some(header) = read_holding_header(&file) else {
            continue;
        };
        if !header.is_dump() {
            continue;
        }
        if specs.iter().any(|spec| spec.matches_holding(&header)) {
            matching.push(file);
        }
    }
    Ok(matching)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_args_yield_wildcard() {
        let specs = parse_dumpspecs::<&str>(&[]).unwrap();
        assert_eq!(specs, vec![Dumpspec::new("", "", "")]);
        assert!(is_wildcard_list(&specs));
    }

    #[test]
    fn single_host_is_not_wildcard() {
        let specs = parse_dumpspecs(&["fileserver"]).unwrap();
        assert_eq!(specs, vec![Dumpspec::new("fileserver", "", "")]);
        assert!(!is_wildcard_list(&specs));
    }

    #[test]
    fn args_group_in_threes() {
        let specs = parse_dumpspecs(&["h1", "/d1", "20230101", "h2"]).unwrap();
        assert_eq!(
            specs,
            vec![
                Dumpspec::new("h1", "/d1", "20230101"),
                Dumpspec::new("h2", "", ""),
            ]
        );
    }

    #[test]
    fn bad_pattern_fails_whole_parse() {
        let err = parse_dumpspecs(&["h1", "[", "20230101"]).unwrap_err();
        assert!(err.to_string().contains("\"[\""));
    }

    #[test]
    fn empty_component_skips_validation() {
        // An empty disk is a wildcard, not a pattern to validate.
        let specs = parse_dumpspecs(&["h1", "", "20230101"]).unwrap();
        assert_eq!(specs[0].disk, "");
    }

    #[test]
    fn simple_components_stay_unquoted() {
        assert_eq!(quote_dumpspec_string("a.b/c"), "a.b/c");
        assert_eq!(quote_dumpspec_string(""), "");
    }

    #[test]
    fn space_triggers_single_quotes() {
        assert_eq!(quote_dumpspec_string("a b"), "'a b'");
    }

    #[test]
    fn quote_and_backslash_are_escaped() {
        assert_eq!(quote_dumpspec_string("it's"), "'it\\'s'");
        assert_eq!(quote_dumpspec_string("a\\b"), "'a\\\\b'");
    }

    #[test]
    fn format_joins_with_spaces() {
        assert_eq!(
            format_dumpspec_components(Some("h"), Some("/d x"), Some("20230101")),
            "h '/d x' 20230101"
        );
    }

    #[test]
    fn absent_host_truncates_everything() {
        assert_eq!(
            format_dumpspec_components(None, Some("disk"), Some("date")),
            ""
        );
    }

    #[test]
    fn absent_disk_truncates_datestamp() {
        assert_eq!(
            format_dumpspec_components(Some("h"), None, Some("date")),
            "h"
        );
    }

    #[test]
    fn display_round_trips_parse() {
        let specs = parse_dumpspecs(&["fileserver", "/var/mail", "20230101"]).unwrap();
        assert_eq!(specs[0].to_string(), "fileserver /var/mail 20230101");
    }

    #[test]
    fn display_omits_absent_components() {
        let specs = parse_dumpspecs(&["h1"]).unwrap();
        assert_eq!(specs[0].to_string(), "h1");
        assert_eq!(Dumpspec::new("h1", "/d1", "").to_string(), "h1 /d1");
        assert_eq!(Dumpspec::new("", "", "").to_string(), "");
    }
}
