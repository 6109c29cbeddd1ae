//! Crosswalk keys linking 863 holdings fields to their 853 caption field.
//!
//! # Background: MARC subfield 8
//!
//! In holdings data, **subfield 8** (Field link and sequence number) ties a
//! holdings value field to the caption definition it was recorded against:
//! - In an 853 caption field it carries the link number alone: `1`
//! - In an 863 holdings field it carries the link number and a sequence
//!   number: `1.3` (third holdings statement for caption 1)
//!
//! The link number selects the caption set and the sequence number gives the
//! 1-based position of the holdings statement within that group.

use crate::error::{HoldingsError, Result};
use lazy_static::lazy_static;
use regex::Regex;

/// Largest sequence number accepted in a holdings key.
pub const MAX_ORDINAL: usize = 9999;

lazy_static! {
    // GROUP[.ORDINAL], digits only, surrounding whitespace tolerated
    static ref CONTROL_NUMBER: Regex = Regex::new(r"^\s*(\d+)(?:\.(\d+))?\s*$").unwrap();
}

/// Information extracted from subfield 8 of an 853 or 863 field.
///
/// # Examples
///
/// ```
/// use holdings_parser::field_linkage::ControlNumber;
///
/// let key = ControlNumber::parse("2.3").unwrap();
/// assert_eq!(key.group(), "2");
/// assert_eq!(key.ordinal(), Some(3));
///
/// let caption_key = ControlNumber::parse("2").unwrap();
/// assert_eq!(caption_key.ordinal(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlNumber {
    /// Link number shared by a caption field and its holdings fields
    pub group: String,

    /// 1-based sequence number within the group, absent on caption fields
    pub ordinal: Option<usize>,
}

impl ControlNumber {
    /// Parse a subfield 8 value.
    ///
    /// # Returns
    ///
    /// `None` when the value is not `GROUP` or `GROUP.ORDINAL` with numeric
    /// parts, or when the ordinal is zero or above [`MAX_ORDINAL`].
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let caps = CONTROL_NUMBER.captures(value)?;

        let group = caps.get(1)?.as_str().to_string();
        let ordinal = match caps.get(2) {
            Some(m) => match m.as_str().parse::<usize>() {
                Ok(n) if (1..=MAX_ORDINAL).contains(&n) => Some(n),
                _ => return None,
            },
            None => None,
        };

        Some(ControlNumber { group, ordinal })
    }

    /// Parse the key of an 863 field, which must carry an ordinal.
    ///
    /// # Errors
    ///
    /// Returns [`HoldingsError::InvalidLinkage`] when the value is missing,
    /// malformed, or has no sequence number.
    pub fn parse_holdings(tag: &str, value: Option<&str>) -> Result<Self> {
        let raw = value.unwrap_or_default();
        match Self::parse(raw) {
            Some(key) if key.ordinal.is_some() => Ok(key),
            _ => Err(HoldingsError::InvalidLinkage {
                tag: tag.to_string(),
                value: raw.to_string(),
            }),
        }
    }

    /// Parse the key of an 853 field; only the link number is used.
    ///
    /// # Errors
    ///
    /// Returns [`HoldingsError::InvalidLinkage`] when the value is missing or
    /// malformed.
    pub fn parse_caption(tag: &str, value: Option<&str>) -> Result<Self> {
        let raw = value.unwrap_or_default();
        Self::parse(raw).ok_or_else(|| HoldingsError::InvalidLinkage {
            tag: tag.to_string(),
            value: raw.to_string(),
        })
    }

    /// Get the link number.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Get the sequence number.
    #[must_use]
    pub fn ordinal(&self) -> Option<usize> {
        self.ordinal
    }

    /// Zero-based slot this key occupies within its group.
    #[must_use]
    pub fn slot(&self) -> Option<usize> {
        self.ordinal.map(|n| n - 1)
    }
}
