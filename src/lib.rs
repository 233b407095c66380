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

//! Tapecat rebuilds a queryable catalog of a network backup archiver:
//! which hosts and disks were backed up, onto which tape or holding
//! file, and with what outcome.
//!
//! The catalog is not stored anywhere: it is reconstructed on demand by
//! scanning the append-only per-run log files named in the tape position
//! table, plus the holding disk for dumps not yet flushed to tape.
//! Subsets of the catalog are selected with [Dumpspec] pattern triples.

pub mod catalog;
pub mod disklist;
pub mod dumpspec;
pub mod errors;
pub mod holding;
pub mod logline;
mod misc;
pub mod output;
pub mod patterns;
pub mod query;
pub mod search;
pub mod sort;
pub mod tapelist;

pub use crate::catalog::{nice_datestamp, FindResult, WHOLE_DUMP};
pub use crate::disklist::DiskList;
pub use crate::dumpspec::{
    format_dumpspec_components, is_wildcard_list, match_holding, parse_dumpspecs, Dumpspec,
};
pub use crate::errors::{Error, Result};
pub use crate::output::print_find_result;
pub use crate::query::{dump_exists, dumps_match, dumps_match_dumpspecs};
pub use crate::search::{find_dump, find_log, logfile_matches_tape, search_logfile};
pub use crate::sort::{sort_find_result, SortOrder};
pub use crate::tapelist::TapeList;

/// Version of the tapecat library and tools.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
