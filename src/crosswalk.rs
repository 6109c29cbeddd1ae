//! Pairing 863 holdings fields with their 853 caption fields.
//!
//! Each caption field defines one group, identified by the link number in
//! its subfield 8. Each holdings field names the group it belongs to and its
//! position within it (`group.ordinal`). The crosswalk lays holdings out in
//! ordinal order per group, renders each against the group's captions, and
//! joins each group's statements into one display string.
//!
//! When a record has holdings but no caption fields at all, a single default
//! group `1` is assumed (see [`CaptionSet::institution_default`]).

use crate::error::Result;
use crate::field_linkage::ControlNumber;
use crate::field_renderer::FieldRenderer;
use crate::record::VarField;
use crate::subfield_code::{CaptionSet, HoldingsValueSet};
use indexmap::IndexMap;
use tracing::{debug, warn};

/// MARC tag for captions and pattern, basic bibliographic unit.
pub const CAPTION_TAG: &str = "853";
/// MARC tag for enumeration and chronology, basic bibliographic unit.
pub const HOLDINGS_TAG: &str = "863";
/// Link number of the default caption group.
pub const DEFAULT_GROUP: &str = "1";
/// Separator between statements of the same group.
pub const STATEMENT_SEPARATOR: &str = "; ";

/// Caption groups and their ordinal-indexed holdings for one record.
///
/// # Examples
///
/// ```
/// use holdings_parser::crosswalk::HoldingsCrosswalk;
/// use holdings_parser::record::{Subfield, VarField};
///
/// let caption = VarField::marc("y", "853", vec![
///     Subfield::new("8", "1"),
///     Subfield::new("a", "v."),
///     Subfield::new("i", "(year)"),
/// ]);
/// let first = VarField::marc("h", "863", vec![
///     Subfield::new("8", "1.1"),
///     Subfield::new("a", "1-10"),
///     Subfield::new("i", "1990-1999"),
/// ]);
/// let second = VarField::marc("h", "863", vec![
///     Subfield::new("8", "1.2"),
///     Subfield::new("a", "12-"),
///     Subfield::new("i", "2001-"),
/// ]);
///
/// let crosswalk = HoldingsCrosswalk::new([&caption], [&first, &second])?;
/// assert_eq!(
///     crosswalk.render()?,
///     vec!["v. 1 (1990) - v. 10 (1999); v. 12 (2001)-".to_string()]
/// );
/// # Ok::<(), holdings_parser::HoldingsError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct HoldingsCrosswalk {
    captions: IndexMap<String, CaptionSet>,
    holdings: IndexMap<String, Vec<Option<HoldingsValueSet>>>,
}

impl HoldingsCrosswalk {
    /// Index caption and holdings fields by their subfield 8 keys.
    ///
    /// # Errors
    ///
    /// Returns [`HoldingsError::InvalidLinkage`](crate::HoldingsError::InvalidLinkage)
    /// when a caption field lacks a link number or a holdings field lacks a
    /// `group.ordinal` key.
    pub fn new<'a, C, H>(caption_fields: C, holdings_fields: H) -> Result<Self>
    where
        C: IntoIterator<Item = &'a VarField>,
        H: IntoIterator<Item = &'a VarField>,
    {
        let mut captions = IndexMap::new();
        for field in caption_fields {
            let key = ControlNumber::parse_caption(CAPTION_TAG, field.get_subfield('8'))?;
            if captions.contains_key(key.group()) {
                warn!(group = key.group(), "duplicate caption group, keeping the first");
                continue;
            }
            captions.insert(key.group, field_to_set::<CaptionSet>(field));
        }

        if captions.is_empty() {
            captions.insert(DEFAULT_GROUP.to_string(), CaptionSet::institution_default());
        }

        let mut holdings: IndexMap<String, Vec<Option<HoldingsValueSet>>> = IndexMap::new();
        for field in holdings_fields {
            let key = ControlNumber::parse_holdings(HOLDINGS_TAG, field.get_subfield('8'))?;
            let Some(slot) = key.slot() else {
                continue;
            };
            let statements = holdings.entry(key.group).or_default();
            if statements.len() <= slot {
                statements.resize(slot + 1, None);
            }
            statements[slot] = Some(field_to_set::<HoldingsValueSet>(field));
        }

        Ok(HoldingsCrosswalk { captions, holdings })
    }

    /// Caption groups in the order they will be rendered.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.captions.keys().map(String::as_str)
    }

    /// Holdings slots for a group; unset ordinals are `None`.
    #[must_use]
    pub fn statements(&self, group: &str) -> &[Option<HoldingsValueSet>] {
        self.holdings.get(group).map_or(&[], Vec::as_slice)
    }

    /// Render one display string per caption group.
    ///
    /// Gaps in the ordinal sequence are skipped, as are statements that render
    /// to nothing. A group with no holdings yields an empty string. Holdings
    /// whose group has no caption field are left out.
    ///
    /// # Errors
    ///
    /// Returns [`HoldingsError::FieldParse`](crate::HoldingsError::FieldParse)
    /// when a chronology caption of a populated group cannot be resolved.
    pub fn render(&self) -> Result<Vec<String>> {
        for group in self.holdings.keys() {
            if !self.captions.contains_key(group) {
                warn!(group = group.as_str(), "holdings reference an undefined caption group");
            }
        }

        let mut rendered = Vec::with_capacity(self.captions.len());
        for (group, captions) in &self.captions {
            let mut statements = Vec::new();
            for values in self.statements(group).iter().flatten() {
                let field = FieldRenderer::new(values, captions).render()?;
                if !field.text.is_empty() {
                    statements.push(field.text);
                }
            }
            debug!(group = group.as_str(), statements = statements.len(), "rendered caption group");
            rendered.push(statements.join(STATEMENT_SEPARATOR));
        }

        Ok(rendered)
    }
}

/// Render caption and holdings fields in one step.
///
/// # Errors
///
/// See [`HoldingsCrosswalk::new`] and [`HoldingsCrosswalk::render`].
pub fn crosswalk<'a, C, H>(caption_fields: C, holdings_fields: H) -> Result<Vec<String>>
where
    C: IntoIterator<Item = &'a VarField>,
    H: IntoIterator<Item = &'a VarField>,
{
    HoldingsCrosswalk::new(caption_fields, holdings_fields)?.render()
}

/// Collect a field's subfields into a code-keyed set, leaving out subfield 8.
fn field_to_set<S>(field: &VarField) -> S
where
    S: FromIterator<(char, String)>,
{
    field
        .subfields()
        .iter()
        .filter_map(|sf| sf.code().map(|code| (code, sf.content.clone())))
        .filter(|(code, _)| *code != '8')
        .collect()
}
