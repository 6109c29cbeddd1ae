//! Catalog holding record structures.
//!
//! Records arrive as JSON in the shape exported by the integrated library
//! system: an `id`, a `fixedFields` map keyed by fixed-field number and a
//! `varFields` list of variable fields with MARC subfields. Keys this crate
//! does not interpret are kept in `extra`, and optional keys remember
//! whether they were absent or `null`, so a record round-trips untouched.
//!
//! Assembly adds three keys to a record: `location`, `holdings` and
//! `checkInCards`.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Fixed field holding the location code.
pub const LOCATION_FIXED_FIELD: &str = "40";

/// Record identifier; the upstream system emits both numbers and strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Numeric identifier
    Number(u64),
    /// Textual identifier
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// A subfield within a variable field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subfield {
    /// Subfield code (single character, kept as sent)
    pub tag: String,
    /// Subfield value
    pub content: String,
    /// Keys not interpreted here
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Subfield {
    /// Create a subfield.
    #[must_use]
    pub fn new(tag: impl Into<String>, content: impl Into<String>) -> Self {
        Subfield {
            tag: tag.into(),
            content: content.into(),
            extra: Map::new(),
        }
    }

    /// The subfield code as a character, `None` for empty or multi-character tags.
    #[must_use]
    pub fn code(&self) -> Option<char> {
        let mut chars = self.tag.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

/// A variable-length field (MARC data field or free-text field)
///
/// Optional keys are `None` when absent and `Some(None)` when sent as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VarField {
    /// Single-letter field group tag assigned by the library system (`h`, `y`, ...)
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub field_tag: Option<Option<String>>,
    /// MARC tag (`853`, `863`, `866`, ...) when the field is MARC-structured
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub marc_tag: Option<Option<String>>,
    /// Inline text for unstructured fields
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub content: Option<Option<String>>,
    /// Subfields for MARC-structured fields
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub subfields: Option<Option<Vec<Subfield>>>,
    /// Keys not interpreted here (indicators and the like)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VarField {
    /// Create a MARC-structured field.
    #[must_use]
    pub fn marc(field_tag: &str, marc_tag: &str, subfields: Vec<Subfield>) -> Self {
        VarField {
            field_tag: Some(Some(field_tag.to_string())),
            marc_tag: Some(Some(marc_tag.to_string())),
            subfields: Some(Some(subfields)),
            ..VarField::default()
        }
    }

    /// Create an unstructured field with inline content.
    #[must_use]
    pub fn text(field_tag: &str, content: &str) -> Self {
        VarField {
            field_tag: Some(Some(field_tag.to_string())),
            content: Some(Some(content.to_string())),
            ..VarField::default()
        }
    }

    /// Field group tag, if set.
    #[must_use]
    pub fn field_tag(&self) -> Option<&str> {
        self.field_tag.as_ref().and_then(|tag| tag.as_deref())
    }

    /// MARC tag, if set.
    #[must_use]
    pub fn marc_tag(&self) -> Option<&str> {
        self.marc_tag.as_ref().and_then(|tag| tag.as_deref())
    }

    /// Inline content, if set.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_ref().and_then(|content| content.as_deref())
    }

    /// Check the field group tag.
    #[must_use]
    pub fn has_field_tag(&self, tag: &str) -> bool {
        self.field_tag() == Some(tag)
    }

    /// Check the MARC tag.
    #[must_use]
    pub fn has_marc_tag(&self, tag: &str) -> bool {
        self.marc_tag() == Some(tag)
    }

    /// All subfields, empty for unstructured fields.
    #[must_use]
    pub fn subfields(&self) -> &[Subfield] {
        self.subfields
            .as_ref()
            .and_then(|subfields| subfields.as_deref())
            .unwrap_or_default()
    }

    /// First value of the subfield with the given code.
    #[must_use]
    pub fn get_subfield(&self, code: char) -> Option<&str> {
        self.subfields()
            .iter()
            .find(|sf| sf.code() == Some(code))
            .map(|sf| sf.content.as_str())
    }

    /// All values of the subfield with the given code.
    #[must_use]
    pub fn get_subfield_values(&self, code: char) -> Vec<&str> {
        self.subfields()
            .iter()
            .filter(|sf| sf.code() == Some(code))
            .map(|sf| sf.content.as_str())
            .collect()
    }
}

/// A fixed-length field. Only `value` is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixedField {
    /// Field value, usually a code string; `None` when the key is absent
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub value: Option<Value>,
    /// Keys not interpreted here (`label`, `display`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FixedField {
    /// Create a fixed field with a string value.
    #[must_use]
    pub fn new(value: &str) -> Self {
        FixedField {
            value: Some(Value::String(value.to_string())),
            extra: Map::new(),
        }
    }
}

/// A resolved location code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Location code as stored on the record
    pub code: String,
    /// Human-readable label
    pub label: String,
}

/// One rendered holdings statement.
///
/// Only the text is computed; the remaining members are reserved and always
/// hold their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoldingEntry {
    /// Display string
    #[serde(rename = "holding_string")]
    pub text: String,
    /// Structured ranges (reserved, always empty)
    #[serde(rename = "holding_ranges", default)]
    pub ranges: Vec<Value>,
    /// Statement describes an index (reserved)
    #[serde(default)]
    pub index: bool,
    /// Statement is known to be incomplete (reserved)
    #[serde(default)]
    pub incomplete: bool,
    /// Statement lists items not held (reserved)
    #[serde(default)]
    pub negation: bool,
}

impl HoldingEntry {
    /// Create an entry for display text with the reserved flags at their defaults.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        HoldingEntry {
            text: text.into(),
            ..HoldingEntry::default()
        }
    }
}

/// A catalog holding record.
///
/// Every optional key is `None` when absent and `Some(None)` when sent as
/// `null`, so deleted records serialize back exactly as they arrived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Record identifier
    pub id: RecordId,
    /// Deletion flag; deleted records pass through untouched
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub deleted: Option<Option<bool>>,
    /// Fixed fields keyed by number - preserves insertion order
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub fixed_fields: Option<Option<IndexMap<String, FixedField>>>,
    /// Variable fields in record order
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub var_fields: Option<Option<Vec<VarField>>>,
    /// Resolved location; `Some(None)` serializes as `null`
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub location: Option<Option<Location>>,
    /// Rendered holdings statements
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub holdings: Option<Option<Vec<HoldingEntry>>>,
    /// Check-in cards attached verbatim
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub check_in_cards: Option<Option<Vec<Value>>>,
    /// Keys not interpreted here
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    /// Create an empty record with the given id.
    #[must_use]
    pub fn new(id: RecordId) -> Self {
        Record {
            id,
            deleted: None,
            fixed_fields: None,
            var_fields: None,
            location: None,
            holdings: None,
            check_in_cards: None,
            extra: Map::new(),
        }
    }

    /// True when the record is flagged deleted.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        matches!(self.deleted, Some(Some(true)))
    }

    /// Variable fields, empty when the key is absent or `null`.
    #[must_use]
    pub fn var_fields(&self) -> &[VarField] {
        self.var_fields
            .as_ref()
            .and_then(|fields| fields.as_deref())
            .unwrap_or_default()
    }

    /// Value of a fixed field when it is a string.
    #[must_use]
    pub fn get_fixed_field(&self, number: &str) -> Option<&str> {
        self.fixed_fields
            .as_ref()
            .and_then(Option::as_ref)
            .and_then(|fields| fields.get(number))
            .and_then(|field| field.value.as_ref())
            .and_then(Value::as_str)
    }

    /// Location code from fixed field 40.
    #[must_use]
    pub fn location_code(&self) -> Option<&str> {
        self.get_fixed_field(LOCATION_FIXED_FIELD)
    }

    /// Resolved location, if assembled and found.
    #[must_use]
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref().and_then(Option::as_ref)
    }

    /// Holdings statements, empty when not assembled.
    #[must_use]
    pub fn holdings(&self) -> &[HoldingEntry] {
        self.holdings
            .as_ref()
            .and_then(|holdings| holdings.as_deref())
            .unwrap_or_default()
    }

    /// Check-in cards, empty when not assembled.
    #[must_use]
    pub fn check_in_cards(&self) -> &[Value] {
        self.check_in_cards
            .as_ref()
            .and_then(|cards| cards.as_deref())
            .unwrap_or_default()
    }

    /// Add a fixed field.
    pub fn add_fixed_field(&mut self, number: &str, value: &str) {
        self.fixed_fields
            .get_or_insert(None)
            .get_or_insert_with(IndexMap::new)
            .insert(number.to_string(), FixedField::new(value));
    }

    /// Add a variable field.
    pub fn add_var_field(&mut self, field: VarField) {
        self.var_fields
            .get_or_insert(None)
            .get_or_insert_with(Vec::new)
            .push(field);
    }
}

/// Deserializes a key that is present, keeping an explicit `null` as
/// `Some(None)` for `Option` targets and `Some(Value::Null)` for [`Value`].
/// Absent keys fall back to `#[serde(default)]`.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_sierra_shape() {
        let record: Record = serde_json::from_value(json!({
            "id": 1_093_458,
            "fixedFields": { "40": { "label": "Location", "value": "mal" } },
            "varFields": [
                { "fieldTag": "h", "marcTag": "863", "ind1": "4", "ind2": "0",
                  "subfields": [ { "tag": "8", "content": "1.1" }, { "tag": "a", "content": "1-3" } ] },
                { "fieldTag": "h", "content": "v. 1-10" }
            ]
        }))
        .unwrap();

        assert_eq!(record.id, RecordId::Number(1_093_458));
        assert!(!record.is_deleted());
        assert_eq!(record.location_code(), Some("mal"));
        let fields = record.var_fields();
        assert_eq!(fields.len(), 2);
        assert!(fields[0].has_marc_tag("863"));
        assert_eq!(fields[0].get_subfield('a'), Some("1-3"));
        assert_eq!(fields[0].extra["ind1"], json!("4"));
        assert_eq!(fields[1].content(), Some("v. 1-10"));
        assert!(fields[1].subfields().is_empty());
    }

    #[test]
    fn test_round_trip_preserves_unknown_keys() {
        let input = json!({
            "id": "b123",
            "deleted": false,
            "nyplSource": "sierra-nypl",
            "fixedFields": { "40": { "label": "Location", "value": "none", "display": null } },
            "varFields": [ { "fieldTag": "y", "marcTag": "853", "subfields": [] } ]
        });
        let record: Record = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(serde_json::to_value(&record).unwrap(), input);
    }

    #[test]
    fn test_minimal_record_round_trips() {
        let input = json!({ "id": 5, "deleted": true });
        let record: Record = serde_json::from_value(input.clone()).unwrap();
        assert!(record.is_deleted());
        assert!(record.var_fields().is_empty());
        assert_eq!(record.location_code(), None);
        assert_eq!(serde_json::to_value(&record).unwrap(), input);
    }

    #[test]
    fn test_null_keys_round_trip() {
        let input = json!({
            "id": 6,
            "deleted": null,
            "fixedFields": { "40": { "value": null }, "41": { "label": "Other" } },
            "varFields": [
                { "fieldTag": "h", "marcTag": null, "content": "x" },
                { "fieldTag": null, "content": null, "subfields": null },
                { "fieldTag": "y", "subfields": [ { "tag": "a", "content": "v.", "lang": "eng" } ] }
            ],
            "holdings": null,
            "checkInCards": null
        });
        let record: Record = serde_json::from_value(input.clone()).unwrap();

        assert!(!record.is_deleted());
        assert_eq!(record.location_code(), None);
        let fields = record.var_fields();
        assert_eq!(fields[0].marc_tag, Some(None));
        assert_eq!(fields[0].marc_tag(), None);
        assert_eq!(fields[0].content(), Some("x"));
        assert_eq!(fields[1].field_tag(), None);
        assert!(fields[1].subfields().is_empty());
        assert_eq!(fields[2].get_subfield('a'), Some("v."));
        assert!(record.holdings().is_empty());

        assert_eq!(serde_json::to_value(&record).unwrap(), input);
    }

    #[test]
    fn test_null_collections_accept_added_fields() {
        let mut record: Record =
            serde_json::from_value(json!({ "id": 7, "fixedFields": null, "varFields": null }))
                .unwrap();
        record.add_fixed_field("40", "mal");
        record.add_var_field(VarField::text("h", "v. 1"));
        assert_eq!(record.location_code(), Some("mal"));
        assert_eq!(record.var_fields().len(), 1);
    }

    #[test]
    fn test_location_null_is_distinct_from_absent() {
        let absent: Record = serde_json::from_value(json!({ "id": 1 })).unwrap();
        assert_eq!(absent.location, None);

        let null: Record = serde_json::from_value(json!({ "id": 1, "location": null })).unwrap();
        assert_eq!(null.location, Some(None));
        assert_eq!(serde_json::to_value(&null).unwrap()["location"], Value::Null);
    }

    #[test]
    fn test_holding_entry_wire_names() {
        let entry = HoldingEntry::new("v. 1-");
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({
                "holding_string": "v. 1-",
                "holding_ranges": [],
                "index": false,
                "incomplete": false,
                "negation": false
            })
        );
    }

    #[test]
    fn test_subfield_code() {
        assert_eq!(Subfield::new("a", "x").code(), Some('a'));
        assert_eq!(Subfield::new("", "x").code(), None);
        assert_eq!(Subfield::new("ab", "x").code(), None);
    }

    #[test]
    fn test_get_subfield_values_keeps_order() {
        let field = VarField::marc(
            "h",
            "866",
            vec![Subfield::new("a", "first"), Subfield::new("z", "note"), Subfield::new("a", "second")],
        );
        assert_eq!(field.get_subfield_values('a'), vec!["first", "second"]);
    }

    #[test]
    fn test_non_string_fixed_field_has_no_code() {
        let record: Record = serde_json::from_value(json!({
            "id": 1,
            "fixedFields": { "40": { "value": 12 } }
        }))
        .unwrap();
        assert_eq!(record.location_code(), None);
    }
}
