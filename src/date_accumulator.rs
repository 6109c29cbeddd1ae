//! Accumulation of chronology fragments into a start/end date pair.
//!
//! A single 863 field spreads its chronology over several subfields
//! (`i` = year, `j` = month, ...), each of which may itself be a range. The
//! [`DateAccumulator`] collects one fragment pair per [`DateUnit`] and joins
//! them into ISO-8601-like strings such as `1999-03` or `1999-03/1999-06`
//! (the latter returned as separate start and end strings).

use crate::caption_label::DateUnit;

/// Start and end fragment recorded for one date unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct UnitSlot {
    start: Option<String>,
    end: Option<String>,
}

/// Collects year, month, day and unlabeled fragments for one holdings statement.
///
/// # Examples
///
/// ```
/// use holdings_parser::caption_label::DateUnit;
/// use holdings_parser::date_accumulator::DateAccumulator;
///
/// let mut dates = DateAccumulator::new();
/// dates.set(DateUnit::Year, "1999");
/// dates.set(DateUnit::Month, "02-04");
/// assert_eq!(
///     dates.render(),
///     (Some("1999-02".to_string()), Some("1999-04".to_string()))
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateAccumulator {
    year: UnitSlot,
    month: UnitSlot,
    day: UnitSlot,
    unknown: UnitSlot,
}

impl DateAccumulator {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the raw value for `unit`.
    ///
    /// The value is split on `-` into at most a start and end fragment; a
    /// value without a second fragment ends where it starts. Year, month and
    /// day keep the last value set. Unlabeled fragments accumulate, so two
    /// `()` captions in one field contribute `a-b` rather than overwriting.
    pub fn set(&mut self, unit: DateUnit, raw_value: &str) {
        let mut parts = raw_value.trim().split('-').filter(|p| !p.is_empty());
        let Some(start) = parts.next() else {
            return;
        };
        let end = parts.next().unwrap_or(start);

        let slot = match unit {
            DateUnit::Year => &mut self.year,
            DateUnit::Month => &mut self.month,
            DateUnit::Day => &mut self.day,
            DateUnit::Unknown => {
                append_fragment(&mut self.unknown.start, start);
                append_fragment(&mut self.unknown.end, end);
                return;
            }
        };
        slot.start = Some(start.to_string());
        slot.end = Some(end.to_string());
    }

    /// Join the collected fragments into `(start, end)`.
    ///
    /// Units are joined year, month, day, unknown with `-`, skipping units
    /// that were never set. Both halves are `None` when nothing was set; the
    /// end is `None` when it equals the start (a single point in time).
    #[must_use]
    pub fn render(&self) -> (Option<String>, Option<String>) {
        let start = self.join(|slot| slot.start.as_deref());
        let end = self.join(|slot| slot.end.as_deref());

        if start.is_empty() && end.is_empty() {
            return (None, None);
        }

        let end = (!end.is_empty() && end != start).then_some(end);
        let start = (!start.is_empty()).then_some(start);
        (start, end)
    }

    fn slot(&self, unit: DateUnit) -> &UnitSlot {
        match unit {
            DateUnit::Year => &self.year,
            DateUnit::Month => &self.month,
            DateUnit::Day => &self.day,
            DateUnit::Unknown => &self.unknown,
        }
    }

    fn join<'a>(&'a self, pick: impl Fn(&'a UnitSlot) -> Option<&'a str>) -> String {
        DateUnit::ORDER
            .iter()
            .filter_map(|unit| pick(self.slot(*unit)))
            .collect::<Vec<_>>()
            .join("-")
    }
}

fn append_fragment(target: &mut Option<String>, fragment: &str) {
    match target {
        Some(existing) => {
            existing.push('-');
            existing.push_str(fragment);
        }
        None => *target = Some(fragment.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        assert_eq!(DateAccumulator::new().render(), (None, None));
    }

    #[test]
    fn test_single_year() {
        let mut dates = DateAccumulator::new();
        dates.set(DateUnit::Year, "1999");
        assert_eq!(dates.render(), (Some("1999".to_string()), None));
    }

    #[test]
    fn test_year_range() {
        let mut dates = DateAccumulator::new();
        dates.set(DateUnit::Year, "1999-2000");
        assert_eq!(
            dates.render(),
            (Some("1999".to_string()), Some("2000".to_string()))
        );
    }

    #[test]
    fn test_month_range_within_year() {
        let mut dates = DateAccumulator::new();
        dates.set(DateUnit::Year, "1999");
        dates.set(DateUnit::Month, "02-04");
        assert_eq!(
            dates.render(),
            (Some("1999-02".to_string()), Some("1999-04".to_string()))
        );
    }

    #[test]
    fn test_full_date_in_fixed_order() {
        let mut dates = DateAccumulator::new();
        dates.set(DateUnit::Day, "09");
        dates.set(DateUnit::Year, "1999");
        dates.set(DateUnit::Month, "09");
        assert_eq!(dates.render(), (Some("1999-09-09".to_string()), None));
    }

    #[test]
    fn test_skipped_unit_leaves_no_double_hyphen() {
        let mut dates = DateAccumulator::new();
        dates.set(DateUnit::Year, "1999");
        dates.set(DateUnit::Day, "15");
        assert_eq!(dates.render(), (Some("1999-15".to_string()), None));
    }

    #[test]
    fn test_trailing_hyphen_is_not_a_range() {
        let mut dates = DateAccumulator::new();
        dates.set(DateUnit::Year, "1999");
        dates.set(DateUnit::Unknown, "23-");
        assert_eq!(dates.render(), (Some("1999-23".to_string()), None));
    }

    #[test]
    fn test_units_are_independent() {
        let mut dates = DateAccumulator::new();
        dates.set(DateUnit::Year, "2001");
        dates.set(DateUnit::Month, "Mar");
        dates.set(DateUnit::Year, "2002");
        assert_eq!(dates.render(), (Some("2002-Mar".to_string()), None));
    }

    #[test]
    fn test_unknown_fragments_accumulate() {
        let mut dates = DateAccumulator::new();
        dates.set(DateUnit::Unknown, "Spring");
        dates.set(DateUnit::Unknown, "Summer");
        assert_eq!(dates.render(), (Some("Spring-Summer".to_string()), None));
    }

    #[test]
    fn test_blank_value_is_ignored() {
        let mut dates = DateAccumulator::new();
        dates.set(DateUnit::Year, "  ");
        assert_eq!(dates.render(), (None, None));
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut dates = DateAccumulator::new();
        dates.set(DateUnit::Year, "1990-1995");
        let first = dates.render();
        assert_eq!(dates.render(), first);
    }
}
