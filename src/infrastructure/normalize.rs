//! Text normalization and composite-value decoding
//!
//! The site renders numbers with decorations: `made-attempted` counters,
//! `MM:SS` clocks, trailing percent signs, thousands separators. These
//! helpers turn cell text into plain values. Decoders return a
//! [`ParseError`] on malformed input; callers that must keep going wrap the
//! result in a [`ParseOutcome`] and fall back to the raw text.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::error::ParseError;

static DASH_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("dash pattern is valid"));

/// Result of decoding a composite value that must never abort a row
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome<T> {
    Parsed(T),
    /// The raw text, kept because it did not decode
    Fallback(String),
}

impl<T> ParseOutcome<T> {
    pub fn from_result(result: Result<T, ParseError>, raw: &str) -> Self {
        result.map_or_else(|_| Self::Fallback(raw.to_string()), Self::Parsed)
    }

    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Compatibility-normalizes text, drops non-ASCII characters and collapses
/// whitespace runs to single spaces
pub fn clean(text: &str) -> String {
    let ascii: String = text.nfkc().filter(char::is_ascii).collect();
    ascii.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits a `made-attempted` counter into its two integers
///
/// Runs of dashes count as one separator.
pub fn split_counter(value: &str) -> Result<(i64, i64), ParseError> {
    let collapsed = DASH_RUN.replace_all(value.trim(), "-");
    let parts: Vec<&str> = collapsed.split('-').collect();
    match parts.as_slice() {
        [made, attempted] => {
            let made = made.trim().parse().map_err(|_| ParseError::counter(value))?;
            let attempted = attempted
                .trim()
                .parse()
                .map_err(|_| ParseError::counter(value))?;
            Ok((made, attempted))
        }
        _ => Err(ParseError::counter(value)),
    }
}

/// Converts `MM:SS` to decimal minutes
pub fn parse_clock(value: &str) -> Result<f64, ParseError> {
    let (minutes, seconds) = value
        .trim()
        .split_once(':')
        .ok_or_else(|| ParseError::clock(value))?;
    let minutes: f64 = minutes.trim().parse().map_err(|_| ParseError::clock(value))?;
    let seconds: f64 = seconds.trim().parse().map_err(|_| ParseError::clock(value))?;
    if !minutes.is_finite() || !seconds.is_finite() {
        return Err(ParseError::clock(value));
    }
    Ok(minutes + seconds / 60.0)
}

/// Drops a trailing `%`
pub fn strip_percent(value: &str) -> &str {
    let trimmed = value.trim();
    trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end()
}

pub fn strip_thousands(value: &str) -> String {
    value.replace(',', "")
}

/// Segment after the last dash, or the whole value when there is none
pub fn last_segment(value: &str) -> &str {
    value.rsplit('-').next().unwrap_or(value)
}

/// Part before the first `/`
pub fn slash_first(value: &str) -> &str {
    value.split('/').next().unwrap_or(value)
}

/// Splits a listed player name on its first space into
/// (`lastname_initials`, `first_name`)
pub fn split_name(full_name: &str) -> (String, String) {
    match full_name.split_once(' ') {
        Some((last, first)) => (last.to_string(), first.to_string()),
        None => (full_name.to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("  Carleton\n\tRavens  ", "Carleton Ravens")]
    #[case("Montr\u{e9}al", "Montral")]
    #[case("UBC\u{a0}Thunderbirds", "UBC Thunderbirds")]
    #[case("\u{ff21}cadia", "Acadia")]
    #[case("", "")]
    fn test_clean(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(clean(input), expected);
    }

    #[rstest]
    #[case("12-30", (12, 30))]
    #[case("0--4", (0, 4))]
    #[case(" 7 - 9 ", (7, 9))]
    fn test_split_counter(#[case] input: &str, #[case] expected: (i64, i64)) {
        assert_eq!(split_counter(input), Ok(expected));
    }

    #[rstest]
    #[case("12")]
    #[case("1-2-3")]
    #[case("a-b")]
    #[case("-")]
    fn test_split_counter_rejects(#[case] input: &str) {
        assert_eq!(split_counter(input), Err(ParseError::counter(input)));
    }

    #[test]
    fn test_parse_clock() {
        assert_eq!(parse_clock("5:30"), Ok(5.5));
        assert_eq!(parse_clock("120:00"), Ok(120.0));
        assert!(parse_clock("90").is_err());
        assert!(parse_clock("a:b").is_err());
    }

    #[test]
    fn test_outcome_falls_back_to_raw() {
        let outcome = ParseOutcome::from_result(parse_clock("DNP"), "DNP");
        assert_eq!(outcome, ParseOutcome::Fallback("DNP".to_string()));
        assert!(outcome.is_fallback());
    }

    #[test]
    fn test_small_decoders() {
        assert_eq!(strip_percent("45.5%"), "45.5");
        assert_eq!(strip_percent("45.5"), "45.5");
        assert_eq!(strip_thousands("12,345"), "12345");
        assert_eq!(last_segment("3-45"), "45");
        assert_eq!(last_segment("45"), "45");
        assert_eq!(slash_first("2/0"), "2");
    }

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("Smith J. John"), ("Smith".to_string(), "J. John".to_string()));
        assert_eq!(split_name("Madonna"), ("Madonna".to_string(), String::new()));
    }

    proptest! {
        #[test]
        fn test_clean_is_idempotent(input in "\\PC*") {
            let once = clean(&input);
            prop_assert_eq!(clean(&once), once.clone());
            prop_assert!(once.is_ascii());
        }
    }
}
