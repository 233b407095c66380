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

//! Composite sort orders for the catalog.
//!
//! An order string names one column per letter, leftmost first; upper
//! case reverses the direction. `h`ost, dis`k`, `d`atestamp, `l`evel,
//! la`b`el, `f`ilenum, `p`artnum. For levels the convention is swapped:
//! lowercase `l` sorts descending, so full dumps list after the deeper
//! incrementals an operator usually scans for.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::catalog::{FindResult, WHOLE_DUMP};
use crate::errors::{Error, Result};
use crate::misc::leading_number;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Host,
    Disk,
    Timestamp,
    Level,
    Label,
    Filenum,
    Partnum,
}

/// A parsed, validated sort order: the comparator configuration that
/// [sort_find_result] runs with.
#[derive(Debug, Clone)]
pub struct SortOrder {
    keys: Vec<(Column, bool)>,
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(order: &str) -> Result<SortOrder> {
        let mut keys = Vec::new();
        for letter in order.chars() {
            let key = match letter {
                'h' => (Column::Host, false),
                'H' => (Column::Host, true),
                'k' => (Column::Disk, false),
                'K' => (Column::Disk, true),
                'd' => (Column::Timestamp, false),
                'D' => (Column::Timestamp, true),
                // Swapped on purpose, see the module doc.
                'l' => (Column::Level, true),
                'L' => (Column::Level, false),
                'b' => (Column::Label, false),
                'B' => (Column::Label, true),
                'f' => (Column::Filenum, false),
                'F' => (Column::Filenum, true),
                'p' => (Column::Partnum, false),
                'P' => (Column::Partnum, true),
                _ => {
                    return Err(Error::BadSortOrder {
                        order: order.to_owned(),
                    })
                }
            };
            keys.push(key);
        }
        Ok(SortOrder { keys })
    }
}

impl SortOrder {
    /// Compare two records: first key wins, ties fall through to the
    /// next key.
    pub fn compare(&self, a: &FindResult, b: &FindResult) -> Ordering {
        for &(column, reverse) in &self.keys {
            let mut ordering = match column {
                Column::Host => a.hostname.cmp(&b.hostname),
                Column::Disk => a.diskname.cmp(&b.diskname),
                Column::Timestamp => a.timestamp.cmp(&b.timestamp),
                Column::Level => a.level.cmp(&b.level),
                Column::Label => a.label.cmp(&b.label),
                Column::Filenum => a.filenum.cmp(&b.filenum),
                Column::Partnum => compare_partnum(&a.partnum, &b.partnum),
            };
            if reverse {
                ordering = ordering.reverse();
            }
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

/// Part numbers compare numerically, except that the whole-dump
/// sentinel is not a number and falls back to lexicographic order on
/// either side.
fn compare_partnum(a: &str, b: &str) -> Ordering {
    if a != WHOLE_DUMP && b != WHOLE_DUMP {
        leading_number(a).cmp(&leading_number(b))
    } else {
        a.cmp(b)
    }
}

/// Stable in-place sort of the catalog.
pub fn sort_find_result(order: &SortOrder, catalog: &mut [FindResult]) {
    catalog.sort_by(|a, b| order.compare(a, b));
}
