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

//! Tabular rendering of the catalog.

use std::io::Write;

use crate::catalog::{nice_datestamp, FindResult};
use crate::dumpspec::quote_dumpspec_string;
use crate::errors::Result;

// Column width floors; date, host, disk, label and part widen to fit
// their widest value, level and filenum are wide enough already.
const MIN_DATE: usize = 4;
const MIN_HOST: usize = 4;
const MIN_DISK: usize = 4;
const LEN_LEVEL: usize = 2;
const MIN_LABEL: usize = 12;
const LEN_FILENUM: usize = 4;
const MIN_PART: usize = 4;

/// Print the catalog as a table, one record per line in current
/// catalog order, or the fixed no-dump message for an empty catalog.
pub fn print_find_result(w: &mut dyn Write, catalog: &[FindResult]) -> Result<()> {
    if catalog.is_empty() {
        writeln!(w, "\nNo dump to list")?;
        return Ok(());
    }

    struct Row<'a> {
        date: String,
        host: &'a str,
        disk: String,
        level: i32,
        label: &'a str,
        filenum: u64,
        partnum: &'a str,
        status: &'a str,
    }

    let rows: Vec<Row> = catalog
        .iter()
        .map(|r| Row {
            date: nice_datestamp(&r.timestamp),
            host: &r.hostname,
            disk: quote_dumpspec_string(&r.diskname),
            level: r.level,
            label: &r.label,
            filenum: r.filenum,
            partnum: &r.partnum,
            status: &r.status,
        })
        .collect();

    let mut len_date = MIN_DATE;
    let mut len_host = MIN_HOST;
    let mut len_disk = MIN_DISK;
    let mut len_label = MIN_LABEL;
    let mut len_part = MIN_PART;
    for row in &rows {
        len_date = len_date.max(row.date.len());
        len_host = len_host.max(row.host.len());
        len_disk = len_disk.max(row.disk.len());
        len_label = len_label.max(row.label.len());
        len_part = len_part.max(row.partnum.len());
    }

    writeln!(w)?;
    writeln!(
        w,
        "{:<len_date$} {:<len_host$} {:<len_disk$} {:<LEN_LEVEL$} {:<len_label$} \
         {:<LEN_FILENUM$} {:<len_part$} status",
        "date", "host", "disk", "lv", "tape or file", "file", "part",
    )?;
    for row in &rows {
        writeln!(
            w,
            "{:<len_date$} {:<len_host$} {:<len_disk$} {:>LEN_LEVEL$} {:<len_label$} \
             {:>LEN_FILENUM$} {:>len_part$} {}",
            row.date, row.host, row.disk, row.level, row.label, row.filenum, row.partnum,
            row.status,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;

    fn render(catalog: &[FindResult]) -> String {
        let mut out = Vec::new();
        print_find_result(&mut out, catalog).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn empty_catalog_prints_fixed_message() {
        assert_eq!(render(&[]), "\nNo dump to list\n");
    }

    #[test]
    fn table_layout() {
        let catalog = vec![
            FindResult {
                timestamp: "20230101".to_owned(),
                hostname: "fileserver".to_owned(),
                diskname: "/home".to_owned(),
                level: 0,
                label: "TAPE01".to_owned(),
                filenum: 1,
                partnum: "--".to_owned(),
                status: "OK".to_owned(),
            },
            FindResult {
                timestamp: "20230102123456".to_owned(),
                hostname: "mail".to_owned(),
                diskname: "/var spool".to_owned(),
                level: 1,
                label: "TAPE02".to_owned(),
                filenum: 2,
                partnum: "1/2".to_owned(),
                status: "PARTIAL".to_owned(),
            },
        ];
        assert_eq!(
            render(&catalog),
            indoc! {"

                date                host       disk         lv tape or file file part status
                2023-01-01          fileserver /home         0 TAPE01          1   -- OK
                2023-01-02 12:34:56 mail       '/var spool'  1 TAPE02          2  1/2 PARTIAL
            "}
        );
    }
}
