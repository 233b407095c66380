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

//! Classification of archiver log lines.
//!
//! Every line of a per-run log file has the shape
//! `<KIND> <program> <fields...>`, for example:
//!
//! ```text
//! START taper datestamp 20230101 label TAPE01
//! SUCCESS taper fileserver "/home" 20230101 0 [sec 1.2 kb 345]
//! PART TAPE01 2 fileserver "/home" 20230101120000 2/4 0 [sec 0.5]
//! ```
//!
//! Which fields follow, and what they mean, depends on the kind, the
//! program, and the age of the log format; that interpretation lives in
//! [crate::search]. This module only classifies the line and provides
//! quote-aware tokenization over immutable string slices.

/// The kind word opening a log line.
///
/// Kinds with no bearing on catalog reconstruction (INFO, STATS,
/// WARNING, ...) all classify as [LogKind::Other].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Start,
    Success,
    ChunkSuccess,
    Done,
    Fail,
    Chunk,
    Part,
    Partial,
    PartPartial,
    Other,
}

impl LogKind {
    fn from_word(word: &str) -> LogKind {
        match word {
            "START" => LogKind::Start,
            "SUCCESS" => LogKind::Success,
            "CHUNKSUCCESS" => LogKind::ChunkSuccess,
            "DONE" => LogKind::Done,
            "FAIL" => LogKind::Fail,
            "CHUNK" => LogKind::Chunk,
            "PART" => LogKind::Part,
            "PARTIAL" => LogKind::Partial,
            "PARTPARTIAL" => LogKind::PartPartial,
            _ => LogKind::Other,
        }
    }
}

/// One classified log line.
///
/// The program name is kept as an opaque string: only `taper` gets
/// special treatment, the rest appear verbatim in FAILED statuses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine<'a> {
    pub kind: LogKind,
    pub program: &'a str,
    /// The unparsed remainder of the line after the program name.
    pub rest: &'a str,
}

/// Program name of the tape writer.
pub const TAPER: &str = "taper";

impl<'a> LogLine<'a> {
    /// Classify one log line, or None for a line too short to carry a
    /// kind and a program name.
    pub fn parse(line: &'a str) -> Option<LogLine<'a>> {
        let mut tokens = Tokens::new(line);
        let kind = LogKind::from_word(tokens.next_word()?);
        let program = tokens.next_word()?;
        Some(LogLine {
            kind,
            program,
            rest: tokens.rest(),
        })
    }

    pub fn is_taper(&self) -> bool {
        self.program == TAPER
    }
}

/// A whitespace-and-quote-aware scanner over one line.
///
/// Replaces the historical in-place NUL-termination walk: tokens are
/// slices of (or unquoted copies from) the unmodified input.
pub struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    pub fn new(line: &'a str) -> Tokens<'a> {
        Tokens { rest: line }
    }

    /// The next whitespace-delimited word.
    pub fn next_word(&mut self) -> Option<&'a str> {
        self.rest = self.rest.trim_start();
        if self.rest.is_empty() {
            return None;
        }
        let end = self
            .rest
            .find(char::is_whitespace)
            .unwrap_or(self.rest.len());
        let (word, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(word)
    }

    /// The next token, honoring double quotes: a token starting with
    /// `"` extends to the matching close quote, with backslash escapes
    /// resolved. Disk names are logged quoted because they may contain
    /// spaces.
    pub fn next_quoted(&mut self) -> Option<String> {
        self.rest = self.rest.trim_start();
        let mut chars = self.rest.char_indices();
        match chars.next() {
            None => return None,
            Some((_, '"')) => (),
            Some(_) => return self.next_word().map(str::to_owned),
        }
        let mut value = String::new();
        let mut escaped = false;
        for (i, c) in chars {
            if escaped {
                value.push(c);
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                self.rest = &self.rest[i + c.len_utf8()..];
                return Some(value);
            } else {
                value.push(c);
            }
        }
        // Unterminated quote: take the line to its end.
        self.rest = "";
        Some(value)
    }

    /// Everything left on the line, without leading whitespace.
    pub fn rest(&mut self) -> &'a str {
        self.rest = self.rest.trim_start();
        self.rest.trim_end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_taper_success() {
        let line = LogLine::parse("SUCCESS taper fileserver \"/home\" 20230101 0 [ok]").unwrap();
        assert_eq!(line.kind, LogKind::Success);
        assert!(line.is_taper());
        assert_eq!(line.rest, "fileserver \"/home\" 20230101 0 [ok]");
    }

    #[test]
    fn unknown_kind_is_other() {
        let line = LogLine::parse("STATS driver estimate").unwrap();
        assert_eq!(line.kind, LogKind::Other);
        assert_eq!(line.program, "driver");
    }

    #[test]
    fn short_lines_do_not_classify() {
        assert!(LogLine::parse("").is_none());
        assert!(LogLine::parse("START").is_none());
    }

    #[test]
    fn words_and_rest() {
        let mut tokens = Tokens::new("  datestamp 20230101 label TAPE01");
        assert_eq!(tokens.next_word(), Some("datestamp"));
        assert_eq!(tokens.next_word(), Some("20230101"));
        assert_eq!(tokens.rest(), "label TAPE01");
    }

    #[test]
    fn quoted_token_with_escapes() {
        let mut tokens = Tokens::new("\"/vol/a b\\\"c\" next");
        assert_eq!(tokens.next_quoted(), Some("/vol/a b\"c".to_owned()));
        assert_eq!(tokens.next_word(), Some("next"));
    }

    #[test]
    fn bare_token_where_quotes_allowed() {
        let mut tokens = Tokens::new("/home rest");
        assert_eq!(tokens.next_quoted(), Some("/home".to_owned()));
        assert_eq!(tokens.next_word(), Some("rest"));
    }

    #[test]
    fn unterminated_quote_runs_to_end_of_line() {
        let mut tokens = Tokens::new("\"/half");
        assert_eq!(tokens.next_quoted(), Some("/half".to_owned()));
        assert_eq!(tokens.next_word(), None);
    }
}
