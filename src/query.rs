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

//! Selecting subsets of a reconstructed catalog.
//!
//! All selection functions borrow from the source catalog: the returned
//! lists have their own spine but share the records.

use crate::catalog::FindResult;
use crate::dumpspec::Dumpspec;
use crate::patterns::{match_datestamp, match_disk, match_host, match_level};

/// Records matching all of the given patterns; an empty pattern matches
/// everything. With `ok_only`, only dumps whose status is exactly `OK`.
pub fn dumps_match<'a>(
    catalog: &'a [FindResult],
    hostname: &str,
    diskname: &str,
    datestamp: &str,
    level: &str,
    ok_only: bool,
) -> Vec<&'a FindResult> {
    catalog
        .iter()
        .filter(|r| {
            (hostname.is_empty() || match_host(hostname, &r.hostname))
                && (diskname.is_empty() || match_disk(diskname, &r.diskname))
                && (datestamp.is_empty() || match_datestamp(datestamp, &r.timestamp))
                && (level.is_empty() || match_level(level, &r.level.to_string()))
                && (!ok_only || r.status == "OK")
        })
        .collect()
}

/// Records matching any dumpspec in the list (and, within one dumpspec,
/// all of its non-empty fields).
pub fn dumps_match_dumpspecs<'a>(
    catalog: &'a [FindResult],
    specs: &[Dumpspec],
    ok_only: bool,
) -> Vec<&'a FindResult> {
    catalog
        .iter()
        .filter(|r| {
            (!ok_only || r.status == "OK")
                && specs.iter().any(|spec| {
                    (spec.host.is_empty() || match_host(&spec.host, &r.hostname))
                        && (spec.disk.is_empty() || match_disk(&spec.disk, &r.diskname))
                        && (spec.datestamp.is_empty()
                            || match_datestamp(&spec.datestamp, &r.timestamp))
                })
        })
        .collect()
}

/// The first record equal on all four identifying fields, if any.
pub fn dump_exists<'a>(
    catalog: &'a [FindResult],
    hostname: &str,
    diskname: &str,
    datestamp: &str,
    level: i32,
) -> Option<&'a FindResult> {
    catalog.iter().find(|r| {
        r.hostname == hostname
            && r.diskname == diskname
            && r.timestamp == datestamp
            && r.level == level
    })
}

#[cfg(test)]
mod tests {
    use crate::dumpspec::parse_dumpspecs;

    use super::*;

    fn catalog() -> Vec<FindResult> {
        let mut records = Vec::new();
        for (host, disk, status, level) in [
            ("host1", "/home", "OK", 0),
            ("host1", "/var", "PARTIAL", 1),
            ("host2", "/home", "OK", 0),
            ("host2", "/home", "FAILED (dumper) timeout", 2),
        ] {
            records.push(FindResult {
                timestamp: "20230101".to_owned(),
                hostname: host.to_owned(),
                diskname: disk.to_owned(),
                level,
                label: "TAPE01".to_owned(),
                filenum: 1,
                partnum: "--".to_owned(),
                status: status.to_owned(),
            });
        }
        records
    }

    #[test]
    fn host_and_ok_filter() {
        let catalog = catalog();
        let matches = dumps_match(&catalog, "host1", "", "", "", true);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].diskname, "/home");
    }

    #[test]
    fn empty_patterns_match_everything() {
        let catalog = catalog();
        assert_eq!(dumps_match(&catalog, "", "", "", "", false).len(), 4);
        assert_eq!(dumps_match(&catalog, "", "", "", "", true).len(), 2);
    }

    #[test]
    fn level_matches_against_decimal_rendering() {
        let catalog = catalog();
        let matches = dumps_match(&catalog, "", "", "", "[1-2]", false);
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn dumpspec_list_is_a_union() {
        let catalog = catalog();
        let specs = parse_dumpspecs(&["host1", "/var", "", "host2"]).unwrap();
        let matches = dumps_match_dumpspecs(&catalog, &specs, false);
        assert_eq!(matches.len(), 3);
    }

    #[test]
    fn exact_existence_lookup() {
        let catalog = catalog();
        assert!(dump_exists(&catalog, "host1", "/var", "20230101", 1).is_some());
        assert!(dump_exists(&catalog, "host1", "/var", "20230101", 0).is_none());
        assert!(dump_exists(&catalog, "host3", "/var", "20230101", 1).is_none());
    }
}
