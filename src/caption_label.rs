//! Normalization of chronology caption labels.
//!
//! Catalogers abbreviate chronology captions freely: `(year)`, `yr.`, `ye`,
//! `(mo.)`, `da`. This module maps such a label onto a [`DateUnit`] so the
//! matching holdings value can be slotted into a
//! [`DateAccumulator`](crate::date_accumulator::DateAccumulator).
//!
//! Enumeration captions are never interpreted; they are displayed verbatim.

use crate::error::{HoldingsError, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Abbreviation prefix and optional period, bare or inside one pair of parentheses
    static ref DAY: Regex =
        Regex::new(r"(?i)^(?:\(\s*d(?:ay|a)?\.?\s*\)|d(?:ay|a)?\.?)$").unwrap();
    static ref MONTH: Regex =
        Regex::new(r"(?i)^(?:\(\s*m(?:onth|on|o)?\.?\s*\)|m(?:onth|on|o)?\.?)$").unwrap();
    static ref YEAR: Regex =
        Regex::new(r"(?i)^(?:\(\s*y(?:ear|ea|r|e)?\.?\s*\)|y(?:ear|ea|r|e)?\.?)$").unwrap();
    static ref EMPTY_PARENS: Regex = Regex::new(r"^\(\s*\)$").unwrap();
}

/// Canonical date unit a chronology caption resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateUnit {
    /// Year
    Year,
    /// Month (number, name or abbreviation)
    Month,
    /// Day of month
    Day,
    /// Unlabeled chronology such as a season or free date text
    Unknown,
}

impl DateUnit {
    /// Units in the order their fragments are joined.
    pub const ORDER: [DateUnit; 4] = [
        DateUnit::Year,
        DateUnit::Month,
        DateUnit::Day,
        DateUnit::Unknown,
    ];

    /// Canonical name, `None` for [`DateUnit::Unknown`].
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        match self {
            DateUnit::Year => Some("year"),
            DateUnit::Month => Some("month"),
            DateUnit::Day => Some("day"),
            DateUnit::Unknown => None,
        }
    }
}

/// Resolve a chronology caption label to its date unit.
///
/// Matching is case-insensitive and tolerates one balanced pair of surrounding
/// parentheses and a trailing period. A label of exactly `()` resolves to [`DateUnit::Unknown`].
///
/// # Examples
///
/// ```
/// use holdings_parser::caption_label::{resolve, DateUnit};
///
/// assert_eq!(resolve("(yr.)").unwrap(), DateUnit::Year);
/// assert_eq!(resolve("Mo").unwrap(), DateUnit::Month);
/// assert_eq!(resolve("()").unwrap(), DateUnit::Unknown);
/// assert!(resolve("(season)").is_err());
/// ```
///
/// # Errors
///
/// Returns [`HoldingsError::FieldParse`] carrying the label verbatim when it
/// matches none of the recognized forms.
pub fn resolve(label: &str) -> Result<DateUnit> {
    let trimmed = label.trim();

    if DAY.is_match(trimmed) {
        Ok(DateUnit::Day)
    } else if MONTH.is_match(trimmed) {
        Ok(DateUnit::Month)
    } else if YEAR.is_match(trimmed) {
        Ok(DateUnit::Year)
    } else if EMPTY_PARENS.is_match(trimmed) {
        Ok(DateUnit::Unknown)
    } else {
        Err(HoldingsError::FieldParse {
            label: label.to_string(),
        })
    }
}
