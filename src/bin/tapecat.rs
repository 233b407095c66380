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

//! Command-line entry point for the tapecat catalog tools.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::Level;

use tapecat::{
    dumps_match_dumpspecs, find_dump, find_log, is_wildcard_list, match_holding, parse_dumpspecs,
    print_find_result, sort_find_result, DiskList, FindResult, Result, SortOrder, TapeList,
};

#[derive(Debug, Parser)]
#[command(author, about, version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Directory holding the per-run log files.
    #[arg(long, global = true, default_value = ".")]
    logdir: PathBuf,

    /// Tape position table file.
    #[arg(long, global = true, default_value = "tapelist")]
    tapelist: PathBuf,

    /// Disk inventory file.
    #[arg(long, global = true, default_value = "disklist")]
    disklist: PathBuf,

    /// Holding disk directory.
    #[arg(long, global = true, default_value = "holding")]
    holdingdisk: PathBuf,

    /// Add disks found in old logs to the inventory instead of
    /// skipping their records.
    #[arg(long, global = true)]
    dynamic: bool,

    /// Show debug trace on stderr.
    #[arg(long, short = 'D', global = true)]
    debug: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rebuild the catalog and print it as a table.
    Find {
        /// Sort order, one letter per column: h=host, k=disk,
        /// d=datestamp, l=level, b=label, f=filenum, p=partnum; upper
        /// case reverses.
        #[arg(long, default_value = "hkdlpb")]
        sort_by: String,

        /// Only list dumps that completed successfully.
        #[arg(long)]
        ok: bool,

        /// Patterns in repeating host [disk [datestamp]] groups.
        dumpspec: Vec<String>,
    },

    /// List the log files that contain data for the tape set.
    Logs,

    /// List holding-disk files matching the given dumpspecs.
    Holding {
        /// Patterns in repeating host [disk [datestamp]] groups.
        dumpspec: Vec<String>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .with_max_level(if args.debug {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .init();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("tapecat: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match &args.command {
        Command::Find {
            sort_by,
            ok,
            dumpspec,
        } => {
            let specs = parse_dumpspecs(dumpspec)?;
            let order: SortOrder = sort_by.parse()?;
            let tapelist = TapeList::load(&args.tapelist)?;
            let mut disklist = DiskList::load(&args.disklist)?;
            let mut catalog = find_dump(
                &tapelist,
                &mut disklist,
                &args.logdir,
                &args.holdingdisk,
                args.dynamic,
            )?;
            sort_find_result(&order, &mut catalog);
            if is_wildcard_list(&specs) && !ok {
                print_find_result(&mut out, &catalog)?;
            } else {
                let selected: Vec<FindResult> = dumps_match_dumpspecs(&catalog, &specs, *ok)
                    .into_iter()
                    .cloned()
                    .collect();
                print_find_result(&mut out, &selected)?;
            }
        }
        Command::Logs => {
            let tapelist = TapeList::load(&args.tapelist)?;
            for name in find_log(&tapelist, &args.logdir)? {
                writeln!(out, "{name}")?;
            }
        }
        Command::Holding { dumpspec } => {
            let specs = parse_dumpspecs(dumpspec)?;
            for path in match_holding(&specs, &args.holdingdisk)? {
                writeln!(out, "{}", path.display())?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
