//! Rendering one holdings statement into display text.
//!
//! A [`FieldRenderer`] pairs the values of one 863 field with the labels of
//! its 853 caption field and produces strings such as:
//!
//! - `v. 1, iss. 3` (captioned enumeration)
//! - `12:3` (uncaptioned enumeration in compact volume:issue form)
//! - `v. 12 (1999)` (enumeration with chronology)
//! - `no. 1 - no. 3` (a range of holdings)
//! - `v. 40 (2001)-` (open-ended, still being received)

use crate::caption_label::{self, DateUnit};
use crate::date_accumulator::DateAccumulator;
use crate::error::Result;
use crate::subfield_code::{CaptionSet, ChronologyCode, EnumerationCode, HoldingsValueSet};

/// Separator between the two ends of a holdings range.
const RANGE_SEPARATOR: &str = " - ";

/// Output of [`FieldRenderer::render`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedField {
    /// Display string for the holdings statement
    pub text: String,
    /// True when any value was open-ended (trailing `-`)
    pub continuing: bool,
}

/// Start and end halves of the enumeration for one statement.
#[derive(Debug, Default)]
struct Enumeration {
    start: String,
    end: String,
}

impl Enumeration {
    fn push(&mut self, caption: &str, values: &[&str]) {
        let explicit = !caption.is_empty();
        let delimiter = if explicit { ", " } else { ":" };
        let labeled = |value: &str| {
            if explicit {
                format!("{caption} {value}")
            } else {
                value.to_string()
            }
        };

        if let Some(&first) = values.first() {
            if !self.start.is_empty() {
                self.start.push_str(delimiter);
            }
            self.start.push_str(&labeled(first));
        }
        if let Some(&second) = values.get(1) {
            if !self.end.is_empty() {
                self.end.push_str(delimiter);
            }
            self.end.push_str(&labeled(second));
        }
    }

    fn into_parts(self) -> (Option<String>, Option<String>) {
        (non_empty(self.start), non_empty(self.end))
    }
}

/// Renders one holdings value set against its caption set.
///
/// # Examples
///
/// ```
/// use holdings_parser::field_renderer::FieldRenderer;
/// use holdings_parser::subfield_code::{CaptionSet, HoldingsValueSet};
///
/// let values = HoldingsValueSet::from([('a', "1"), ('c', "3")]);
/// let captions = CaptionSet::from([('a', "v."), ('b', "ser."), ('c', "iss.")]);
///
/// let rendered = FieldRenderer::new(&values, &captions).render()?;
/// assert_eq!(rendered.text, "v. 1, iss. 3");
/// # Ok::<(), holdings_parser::HoldingsError>(())
/// ```
#[derive(Debug)]
pub struct FieldRenderer<'a> {
    values: &'a HoldingsValueSet,
    captions: &'a CaptionSet,
    continuing: bool,
}

impl<'a> FieldRenderer<'a> {
    /// Create a renderer for one value/caption pair.
    #[must_use]
    pub fn new(values: &'a HoldingsValueSet, captions: &'a CaptionSet) -> Self {
        FieldRenderer {
            values,
            captions,
            continuing: false,
        }
    }

    /// Render the statement.
    ///
    /// Enumeration codes a–f are rendered first, then chronology codes i–l
    /// are resolved and accumulated, then both are composed into the final
    /// string. A trailing `-` is appended when any value was open-ended.
    ///
    /// # Errors
    ///
    /// Returns [`HoldingsError::FieldParse`](crate::HoldingsError::FieldParse)
    /// when a chronology caption cannot be resolved to a date unit.
    pub fn render(mut self) -> Result<RenderedField> {
        let (start_enum, end_enum) = self.enumeration();
        let (start_chron, end_chron) = self.chronology()?;

        let mut text = if end_enum.is_none() && end_chron.is_none() {
            with_chronology(start_enum.as_deref(), start_chron.as_deref())
        } else {
            let first = with_chronology(start_enum.as_deref(), start_chron.as_deref());
            let second = with_chronology(
                end_enum.as_deref().or(start_enum.as_deref()),
                end_chron.as_deref().or(start_chron.as_deref()),
            );
            format!("{first}{RANGE_SEPARATOR}{second}")
        };

        if self.continuing {
            text.push('-');
        }

        Ok(RenderedField {
            text,
            continuing: self.continuing,
        })
    }

    fn enumeration(&mut self) -> (Option<String>, Option<String>) {
        let mut enumeration = Enumeration::default();

        for code in EnumerationCode::ALL {
            let Some(raw) = self.values.enumeration(code) else {
                continue;
            };
            let parts = split_range(raw);
            if parts.is_empty() {
                continue;
            }
            self.note_continuation(raw);

            let caption = clean_caption(self.captions.enumeration(code).unwrap_or_default());
            enumeration.push(&caption, &parts);
        }

        enumeration.into_parts()
    }

    fn chronology(&mut self) -> Result<(Option<String>, Option<String>)> {
        let mut dates = DateAccumulator::new();

        for code in ChronologyCode::ALL {
            let Some(raw) = self.values.chronology(code) else {
                continue;
            };
            if split_range(raw).is_empty() {
                continue;
            }
            self.note_continuation(raw);

            let unit = match self.captions.chronology(code) {
                Some(label) => caption_label::resolve(label)?,
                None => DateUnit::Unknown,
            };
            dates.set(unit, raw);
        }

        Ok(dates.render())
    }

    fn note_continuation(&mut self, raw: &str) {
        let raw = raw.trim();
        if raw.ends_with('-') || raw.contains("--") {
            self.continuing = true;
        }
    }
}

/// Split a raw value into its range start and end, dropping empty pieces.
fn split_range(raw: &str) -> Vec<&str> {
    raw.trim()
        .split('-')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .take(2)
        .collect()
}

/// Enumeration captions are shown verbatim apart from parentheses.
fn clean_caption(caption: &str) -> String {
    caption.replace(['(', ')'], "").trim().to_string()
}

fn with_chronology(enumeration: Option<&str>, chronology: Option<&str>) -> String {
    match (enumeration, chronology) {
        (Some(e), Some(c)) => format!("{e} ({c})"),
        (Some(e), None) => e.to_string(),
        (None, Some(c)) => c.to_string(),
        (None, None) => String::new(),
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HoldingsError;

    fn render(values: &[(char, &str)], captions: &[(char, &str)]) -> RenderedField {
        let values: HoldingsValueSet = values.iter().copied().collect();
        let captions: CaptionSet = captions.iter().copied().collect();
        FieldRenderer::new(&values, &captions).render().unwrap()
    }

    // ------------------------------------------------------------------
    // Enumeration
    // ------------------------------------------------------------------

    #[test]
    fn test_captioned_enumeration_is_comma_joined() {
        let out = render(&[('a', "1"), ('c', "3")], &[('a', "v."), ('b', "ser."), ('c', "iss.")]);
        assert_eq!(out.text, "v. 1, iss. 3");
        assert!(!out.continuing);
    }

    #[test]
    fn test_mixed_captioned_and_bare_enumeration() {
        let out = render(
            &[('a', "1"), ('b', "2"), ('c', "3")],
            &[('a', "ser."), ('b', "vol."), ('c', "")],
        );
        assert_eq!(out.text, "ser. 1, vol. 2:3");
    }

    #[test]
    fn test_bare_enumeration_uses_colon() {
        let out = render(&[('a', "12"), ('b', "3")], &[('a', ""), ('b', "()")]);
        assert_eq!(out.text, "12:3");
    }

    #[test]
    fn test_blank_enumeration_values_are_skipped() {
        let out = render(
            &[('a', "1"), ('b', ""), ('c', "3")],
            &[('a', "v."), ('b', "ser."), ('c', "i.")],
        );
        assert_eq!(out.text, "v. 1, i. 3");
    }

    #[test]
    fn test_parenthesized_enumeration_caption_is_cleaned() {
        let out = render(&[('a', "4")], &[('a', "(v.)")]);
        assert_eq!(out.text, "v. 4");
    }

    #[test]
    fn test_enumeration_range() {
        let out = render(&[('a', "1-3")], &[('a', "no.")]);
        assert_eq!(out.text, "no. 1 - no. 3");
    }

    #[test]
    fn test_missing_enumeration_caption_renders_bare() {
        let out = render(&[('a', "7")], &[]);
        assert_eq!(out.text, "7");
    }

    // ------------------------------------------------------------------
    // Chronology
    // ------------------------------------------------------------------

    #[test]
    fn test_chronology_only() {
        let out = render(&[('i', "1999"), ('j', "Mar")], &[('i', "year"), ('j', "(month)")]);
        assert_eq!(out.text, "1999-Mar");
    }

    #[test]
    fn test_chronology_abbreviated_captions() {
        let out = render(
            &[('i', "1999"), ('j', "09"), ('k', "09")],
            &[('i', "(yr.)"), ('j', "mo."), ('k', "da")],
        );
        assert_eq!(out.text, "1999-09-09");
    }

    #[test]
    fn test_blank_chronology_value_is_skipped() {
        let out = render(&[('i', "1999"), ('j', "")], &[('i', "year"), ('j', "month")]);
        assert_eq!(out.text, "1999");
    }

    #[test]
    fn test_chronology_range_without_enumeration() {
        let out = render(&[('i', "1999-2000")], &[('i', "(year)")]);
        assert_eq!(out.text, "1999 - 2000");
    }

    #[test]
    fn test_unknown_unit_with_continuation() {
        let out = render(&[('i', "1999"), ('j', "23-")], &[('i', "year"), ('j', "()")]);
        assert!(out.continuing);
        assert!(out.text.ends_with('-'));
        assert_eq!(out.text, "1999-23-");
    }

    #[test]
    fn test_unrecognized_chronology_caption_fails() {
        let values = HoldingsValueSet::from([('i', "1999")]);
        let captions = CaptionSet::from([('i', "(smthg.)")]);
        let err = FieldRenderer::new(&values, &captions).render().unwrap_err();
        assert!(matches!(err, HoldingsError::FieldParse { ref label } if label == "(smthg.)"));
    }

    #[test]
    fn test_unused_chronology_caption_is_never_resolved() {
        let out = render(&[('a', "2")], &[('a', "v."), ('i', "(smthg.)")]);
        assert_eq!(out.text, "v. 2");
    }

    // ------------------------------------------------------------------
    // Composition
    // ------------------------------------------------------------------

    #[test]
    fn test_enumeration_with_chronology() {
        let out = render(&[('a', "12"), ('i', "1999")], &[('a', "v."), ('i', "(year)")]);
        assert_eq!(out.text, "v. 12 (1999)");
    }

    #[test]
    fn test_enumeration_range_with_single_chronology() {
        let out = render(&[('a', "1-3"), ('i', "1999")], &[('a', "v."), ('i', "(year)")]);
        assert_eq!(out.text, "v. 1 (1999) - v. 3 (1999)");
    }

    #[test]
    fn test_enumeration_and_chronology_ranges() {
        let out = render(
            &[('a', "1-10"), ('i', "1990-1999")],
            &[('a', "v."), ('i', "(year)")],
        );
        assert_eq!(out.text, "v. 1 (1990) - v. 10 (1999)");
    }

    #[test]
    fn test_chronology_range_repeats_single_enumeration() {
        let out = render(&[('a', "5"), ('i', "1990-1991")], &[('a', "v."), ('i', "(year)")]);
        assert_eq!(out.text, "v. 5 (1990) - v. 5 (1991)");
    }

    #[test]
    fn test_continuing_enumeration_with_chronology() {
        let out = render(&[('a', "40-"), ('i', "2001-")], &[('a', "v."), ('i', "(year)")]);
        assert_eq!(out.text, "v. 40 (2001)-");
        assert!(out.continuing);
    }

    #[test]
    fn test_double_hyphen_marks_continuation() {
        let out = render(&[('a', "1--")], &[('a', "v.")]);
        assert_eq!(out.text, "v. 1-");
    }

    #[test]
    fn test_no_values_renders_empty() {
        let out = render(&[], &[('a', "v."), ('i', "(year)")]);
        assert_eq!(out, RenderedField::default());
    }

    #[test]
    fn test_only_hyphen_value_renders_empty() {
        let out = render(&[('a', "-")], &[('a', "v.")]);
        assert_eq!(out.text, "");
        assert!(!out.continuing);
    }
}
