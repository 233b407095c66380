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

//! Generally useful functions.

/// Parse a leading run of decimal digits, ignoring whatever follows;
/// zero if the string starts with a non-digit.
///
/// Historical log fields were read with `atoi`, so a trailing junk
/// character must not make the whole field unreadable. A digit run too
/// long for i64 saturates rather than failing: the field is garbage
/// either way, and a garbage log line must never be fatal.
pub(crate) fn leading_number(s: &str) -> i64 {
    let mut n: i64 = 0;
    for c in s.chars() {
        match c.to_digit(10) {
            Some(d) => n = n.saturating_mul(10).saturating_add(i64::from(d)),
            None => break,
        }
    }
    n
}

#[cfg(test)]
mod tests {
    use super::leading_number;

    #[test]
    fn leading_digits_only() {
        assert_eq!(leading_number("20230101"), 20230101);
        assert_eq!(leading_number("12abc"), 12);
        assert_eq!(leading_number("--"), 0);
        assert_eq!(leading_number(""), 0);
    }

    #[test]
    fn overlong_digit_run_saturates() {
        assert_eq!(leading_number("99999999999999999999"), i64::MAX);
        assert_eq!(leading_number("9223372036854775807"), i64::MAX);
    }
}
