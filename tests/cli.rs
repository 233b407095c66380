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

//! Run the tapecat CLI as a subprocess and test it.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use indoc::indoc;
use predicates::prelude::*;

fn run_tapecat() -> Command {
    Command::cargo_bin("tapecat").unwrap()
}

/// A config directory with one tape, one disk, one log file and an
/// empty holding disk.
fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    dir.child("tapelist")
        .write_str("20230101 TAPE01 reuse\n")
        .unwrap();
    dir.child("disklist").write_str("host1 /disk1\n").unwrap();
    dir.child("log.20230101.0")
        .write_str(indoc! {r#"
            START taper datestamp 20230101 label TAPE01
            SUCCESS taper host1 "/disk1" 20230101 0 [sec 1.2 kb 345]
        "#})
        .unwrap();
    dir.child("holding").create_dir_all().unwrap();
    dir
}

fn fixture_args(dir: &TempDir) -> Vec<String> {
    vec![
        "--logdir".to_owned(),
        dir.path().display().to_string(),
        "--tapelist".to_owned(),
        dir.child("tapelist").path().display().to_string(),
        "--disklist".to_owned(),
        dir.child("disklist").path().display().to_string(),
        "--holdingdisk".to_owned(),
        dir.child("holding").path().display().to_string(),
    ]
}

#[test]
fn no_args_shows_usage() {
    run_tapecat()
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn help_names_the_commands() {
    run_tapecat()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Catalog reconstruction"))
        .stdout(predicate::str::contains("Rebuild the catalog"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn find_prints_the_catalog() {
    let dir = fixture();
    run_tapecat()
        .arg("find")
        .args(fixture_args(&dir))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "date       host  disk   lv tape or file file part status",
        ))
        .stdout(predicate::str::contains(
            "2023-01-01 host1 /disk1  0 TAPE01          1   -- OK",
        ));
}

#[test]
fn find_with_unmatched_dumpspec_lists_nothing() {
    let dir = fixture();
    run_tapecat()
        .arg("find")
        .args(fixture_args(&dir))
        .arg("otherhost")
        .assert()
        .success()
        .stdout(predicate::str::contains("No dump to list"));
}

#[test]
fn bad_dumpspec_pattern_fails_cleanly() {
    let dir = fixture();
    run_tapecat()
        .arg("find")
        .args(fixture_args(&dir))
        .arg("[")
        .assert()
        .failure()
        .stderr(predicate::str::contains("tapecat: bad pattern \"[\""));
}

#[test]
fn bad_sort_order_fails_cleanly() {
    let dir = fixture();
    run_tapecat()
        .arg("find")
        .args(fixture_args(&dir))
        .arg("--sort-by")
        .arg("hx")
        .assert()
        .failure()
        .stderr(predicate::str::contains("tapecat: invalid sort order"));
}

#[test]
fn logs_lists_files_with_data() {
    let dir = fixture();
    run_tapecat()
        .arg("logs")
        .args(fixture_args(&dir))
        .assert()
        .success()
        .stdout(predicate::eq("log.20230101.0\n"));
}

#[test]
fn holding_lists_matching_files() {
    let dir = fixture();
    dir.child("holding/20230102.0")
        .write_str("FILE 20230102 host1 \"/disk1\" lev 1 comp N\n")
        .unwrap();
    run_tapecat()
        .arg("holding")
        .args(fixture_args(&dir))
        .arg("host1")
        .assert()
        .success()
        .stdout(predicate::str::contains("20230102.0"));
    run_tapecat()
        .arg("holding")
        .args(fixture_args(&dir))
        .arg("otherhost")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
