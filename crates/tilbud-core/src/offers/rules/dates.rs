//! Date extraction for Danish flyers.
//!
//! The text is lower-cased and Danish month names are rewritten to their
//! English spelling before matching, so the month table below only needs
//! the English names.

use chrono::{Datelike, NaiveDate, Utc};
use regex::Regex;

use super::patterns::{DATE_DOTTED_MONTH, DATE_NUMERIC, DATE_SPACED_MONTH};
use super::MentionScanner;
use crate::offers::text::TextIndex;

/// Danish month names and their English equivalents, applied in order.
///
/// Full names come before abbreviations. Identity pairs (april, august,
/// november, ...) are omitted.
const MONTH_TRANSLATIONS: [(&str, &str); 8] = [
    ("januar", "january"),
    ("februar", "february"),
    ("marts", "march"),
    ("maj", "may"),
    ("juni", "june"),
    ("juli", "july"),
    ("oktober", "october"),
    ("okt", "oct"),
];

/// A date found in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMention {
    /// Parsed calendar date.
    pub date: NaiveDate,
    /// Matched text (lower-cased, month names normalized).
    pub matched_text: String,
}

/// Date mention scanner.
pub struct DateScanner {
    /// Year around which two-digit years are expanded.
    reference_year: i32,
    /// Day of month used when a match names no day.
    reference_day: u32,
}

impl DateScanner {
    /// Create a scanner that expands two-digit years around the current year
    /// and fills a missing day from today's date.
    pub fn new() -> Self {
        let today = Utc::now().date_naive();
        Self {
            reference_year: today.year(),
            reference_day: today.day(),
        }
    }

    /// Set the reference year for two-digit year expansion.
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = year;
        self
    }

    /// Set the day of month used for matches without a day.
    pub fn with_reference_day(mut self, day: u32) -> Self {
        self.reference_day = day;
        self
    }

    /// Dates only, in discovery order.
    pub fn dates(&self, text: &str) -> Vec<NaiveDate> {
        self.scan(text).into_iter().map(|m| m.date).collect()
    }

    fn resolve(&self, day: &str, month: &str, year: &str) -> Option<NaiveDate> {
        match month_number(month) {
            Some(month) => {
                let day: u32 = day.parse().ok()?;
                let year: i32 = year.parse().ok()?;
                NaiveDate::from_ymd_opt(year, month, day)
            }
            None if month.chars().all(|c| c.is_ascii_digit()) => {
                self.resolve_numeric([day, month, year])
            }
            None => self.resolve_skipping_word(day, year),
        }
    }

    /// Resolve "<n> <word> <yyyy>" where the word names no month.
    ///
    /// The word is skipped, so the lone number is the month and the day
    /// comes from the reference date ("2 pakker 1000" is 1000-02-<day>).
    /// A number above 12 cannot be a month and yields nothing.
    fn resolve_skipping_word(&self, number: &str, year: &str) -> Option<NaiveDate> {
        let month: u32 = number.parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        let year: i32 = year.parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, self.reference_day)
    }

    /// Resolve three numeric tokens day-first.
    ///
    /// A first value above 31 can only be a year. Otherwise the order is
    /// day/month/year unless the second value cannot be a month, in which
    /// case it is month/day/year.
    fn resolve_numeric(&self, tokens: [&str; 3]) -> Option<NaiveDate> {
        let a: u32 = tokens[0].parse().ok()?;
        let b: u32 = tokens[1].parse().ok()?;
        let c: u32 = tokens[2].parse().ok()?;
        let century_specified = tokens.iter().any(|t| t.chars().count() > 2);

        let (year, month, day) = if a > 31 {
            if c <= 12 { (a, c, b) } else { (a, b, c) }
        } else if a > 12 || b <= 12 {
            (c, b, a)
        } else {
            (c, a, b)
        };

        let year = i32::try_from(year).ok()?;
        let year = if century_specified {
            year
        } else {
            expand_two_digit_year(year, self.reference_year)
        };

        NaiveDate::from_ymd_opt(year, month, day)
    }
}

impl Default for DateScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl MentionScanner for DateScanner {
    type Mention = DateMention;

    fn scan_indexed(&self, index: &TextIndex<'_>) -> Vec<Self::Mention> {
        let normalized = normalize_month_names(index.text());
        let patterns: [&Regex; 3] = [&DATE_NUMERIC, &DATE_DOTTED_MONTH, &DATE_SPACED_MONTH];

        let mut results = Vec::new();
        for pattern in patterns {
            for caps in pattern.captures_iter(&normalized) {
                if let Some(date) = self.resolve(&caps[1], &caps[2], &caps[3]) {
                    results.push(DateMention {
                        date,
                        matched_text: caps[0].to_string(),
                    });
                }
            }
        }

        results
    }
}

/// Lower-case the text and rewrite Danish month names to English.
///
/// Rewrites are plain substring replacements, so a month name inside an
/// unrelated word is rewritten too. Occurrences already spelled in English
/// ("january" contains "januar") are left alone.
pub fn normalize_month_names(text: &str) -> String {
    let mut normalized = text.to_lowercase();
    for (danish, english) in MONTH_TRANSLATIONS {
        normalized = replace_unless_spelled(&normalized, danish, english);
    }
    normalized
}

fn replace_unless_spelled(text: &str, from: &str, to: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find(from) {
        result.push_str(&rest[..pos]);
        result.push_str(to);
        let consumed = if rest[pos..].starts_with(to) { to.len() } else { from.len() };
        rest = &rest[pos + consumed..];
    }
    result.push_str(rest);
    result
}

/// Month number for an English month name or abbreviation.
fn month_number(name: &str) -> Option<u32> {
    let month = match name {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "sept" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return None,
    };
    Some(month)
}

/// Expand a two-digit year into the century window around `reference_year`.
fn expand_two_digit_year(year: i32, reference_year: i32) -> i32 {
    if year >= 100 {
        return year;
    }
    let mut year = year + reference_year / 100 * 100;
    if year >= reference_year + 50 {
        year -= 100;
    } else if year < reference_year - 50 {
        year += 100;
    }
    year
}
