//! Per-record enrichment: location, holdings statements and check-in cards.
//!
//! [`RecordAssembler`] is the entry point for processing one record. It
//! classifies the record's variable fields, renders holdings statements,
//! resolves the location code and attaches check-in cards. Either every
//! enrichment succeeds and the record is returned with all three keys set,
//! or the first failure is returned and the record is dropped.

use crate::check_in::CheckInCardSource;
use crate::crosswalk::{self, CAPTION_TAG, HOLDINGS_TAG};
use crate::error::{HoldingsError, Result};
use crate::location::LocationResolver;
use crate::record::{HoldingEntry, Location, Record, VarField, LOCATION_FIXED_FIELD};
use tracing::{debug, info};

/// Field group tag of holdings fields.
pub const HOLDINGS_FIELD_TAG: &str = "h";
/// MARC tag for free-text holdings, basic bibliographic unit.
pub const TEXTUAL_HOLDINGS_TAG: &str = "866";

/// A record's variable fields sorted by how their holdings are rendered.
#[derive(Debug, Default)]
pub struct HoldingsFields<'a> {
    /// 866 fields, displayed verbatim
    pub textual: Vec<&'a VarField>,
    /// Holdings fields with inline content and no MARC tag, displayed verbatim
    pub legacy: Vec<&'a VarField>,
    /// 863 fields, rendered through the crosswalk
    pub enumerated: Vec<&'a VarField>,
    /// 853 fields defining captions for the 863 fields
    pub captions: Vec<&'a VarField>,
}

impl<'a> HoldingsFields<'a> {
    /// Sort the variable fields of `record`. Fields of no interest are dropped.
    #[must_use]
    pub fn classify(record: &'a Record) -> Self {
        let mut fields = HoldingsFields::default();

        for field in record.var_fields() {
            if field.has_marc_tag(CAPTION_TAG) {
                fields.captions.push(field);
                continue;
            }
            if !field.has_field_tag(HOLDINGS_FIELD_TAG) {
                continue;
            }
            match field.marc_tag() {
                Some(TEXTUAL_HOLDINGS_TAG) => fields.textual.push(field),
                Some(HOLDINGS_TAG) => fields.enumerated.push(field),
                Some(_) => {}
                None => {
                    if field.content().is_some_and(|c| !c.trim().is_empty()) {
                        fields.legacy.push(field);
                    }
                }
            }
        }

        fields
    }

    /// Render all holdings statements: textual first, then legacy, then
    /// enumerated. Blank statements are left out.
    ///
    /// # Errors
    ///
    /// Propagates crosswalk failures (malformed subfield 8 keys and
    /// unrecognized chronology captions).
    pub fn render(&self) -> Result<Vec<HoldingEntry>> {
        let textual = self.textual.iter().map(|field| textual_statement(field));
        let legacy = self
            .legacy
            .iter()
            .map(|field| field.content().unwrap_or_default().to_string());
        let enumerated = crosswalk::crosswalk(
            self.captions.iter().copied(),
            self.enumerated.iter().copied(),
        )?;

        Ok(textual
            .chain(legacy)
            .chain(enumerated)
            .filter(|text| !text.trim().is_empty())
            .map(HoldingEntry::new)
            .collect())
    }
}

/// Text of an 866 field: its `a` subfields, or inline content when it has none.
fn textual_statement(field: &VarField) -> String {
    let values = field.get_subfield_values('a');
    if values.is_empty() {
        field.content().unwrap_or_default().to_string()
    } else {
        values.join(" ")
    }
}

/// Enriches records using the location and check-in card collaborators.
///
/// The assembler holds only references; build the collaborators once at
/// startup and share them across every record of every batch.
pub struct RecordAssembler<'a> {
    locations: &'a dyn LocationResolver,
    check_in_cards: &'a dyn CheckInCardSource,
}

impl std::fmt::Debug for RecordAssembler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordAssembler").finish_non_exhaustive()
    }
}

impl<'a> RecordAssembler<'a> {
    /// Create an assembler over the given collaborators.
    #[must_use]
    pub fn new(
        locations: &'a dyn LocationResolver,
        check_in_cards: &'a dyn CheckInCardSource,
    ) -> Self {
        RecordAssembler {
            locations,
            check_in_cards,
        }
    }

    /// Enrich one record.
    ///
    /// Deleted records are returned exactly as received. Otherwise the
    /// record gains `location`, `holdings` and `checkInCards`.
    ///
    /// # Errors
    ///
    /// - [`HoldingsError::LocationLookup`] when fixed field 40 is missing or
    ///   its code cannot be resolved
    /// - [`HoldingsError::FieldParse`] / [`HoldingsError::InvalidLinkage`]
    ///   when holdings cannot be rendered
    /// - [`HoldingsError::RecordAssembly`] when check-in cards cannot be fetched
    pub fn assemble(&self, mut record: Record) -> Result<Record> {
        if record.is_deleted() {
            debug!(id = %record.id, "record is deleted, passing through");
            return Ok(record);
        }
        info!(id = %record.id, "parsing record");

        let location = self.resolve_location(&record)?;
        let holdings = HoldingsFields::classify(&record).render()?;
        let check_in_cards = self.check_in_cards.fetch(&record.id)?;

        debug!(
            id = %record.id,
            holdings = holdings.len(),
            check_in_cards = check_in_cards.len(),
            "assembled record"
        );

        record.location = Some(location);
        record.holdings = Some(Some(holdings));
        record.check_in_cards = Some(Some(check_in_cards));
        Ok(record)
    }

    fn resolve_location(&self, record: &Record) -> Result<Option<Location>> {
        let code = record.location_code().ok_or_else(|| {
            HoldingsError::LocationLookup(format!(
                "record {} has no location code in fixed field {LOCATION_FIXED_FIELD}",
                record.id
            ))
        })?;

        let location = self.locations.lookup(code)?;
        match &location {
            Some(found) => debug!(code = %found.code, label = %found.label, "resolved location"),
            None => debug!(id = %record.id, "record has no location"),
        }
        Ok(location)
    }
}
