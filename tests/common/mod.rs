//! Common test helpers and fixtures shared across the test suite.

use holdings_parser::{
    CheckInCardSource, HoldingsError, LocationTable, Record, RecordId, Result,
};
use serde_json::{json, Value};

/// Location table covering the codes used by the fixtures.
#[allow(dead_code)]
pub fn locations() -> LocationTable {
    LocationTable::from_value(json!({
        "mal": { "code": "mal", "label": "SASB - Service Desk Rm 315" },
        "rc2ma": { "code": "rc2ma", "label": "Offsite" },
        "broken": { "label": "No code here" }
    }))
    .unwrap()
}

/// Check-in card source that always fails, standing in for an unreachable service.
#[derive(Debug)]
#[allow(dead_code)]
pub struct UnreachableCheckInCards;

impl CheckInCardSource for UnreachableCheckInCards {
    fn fetch(&self, record_id: &RecordId) -> Result<Vec<Value>> {
        Err(HoldingsError::RecordAssembly(format!(
            "check-in card service returned 503 for record {record_id}"
        )))
    }
}

/// A serial holding record: a caption group, two 863 statements, an 866 and a legacy field.
#[allow(dead_code)]
pub fn serial_record_json() -> Value {
    json!({
        "id": 1093458,
        "nyplSource": "sierra-nypl",
        "fixedFields": {
            "40": { "label": "Location", "value": "mal  " }
        },
        "varFields": [
            {
                "fieldTag": "y", "marcTag": "853", "ind1": "2", "ind2": "0",
                "subfields": [
                    { "tag": "8", "content": "1" },
                    { "tag": "a", "content": "v." },
                    { "tag": "b", "content": "no." },
                    { "tag": "i", "content": "(year)" },
                    { "tag": "j", "content": "(month)" }
                ]
            },
            {
                "fieldTag": "h", "marcTag": "863", "ind1": "4", "ind2": "1",
                "subfields": [
                    { "tag": "8", "content": "1.1" },
                    { "tag": "a", "content": "1-10" },
                    { "tag": "i", "content": "1990-1999" }
                ]
            },
            {
                "fieldTag": "h", "marcTag": "863", "ind1": "4", "ind2": "1",
                "subfields": [
                    { "tag": "8", "content": "1.2" },
                    { "tag": "a", "content": "12-" },
                    { "tag": "b", "content": "3" },
                    { "tag": "i", "content": "2001-" },
                    { "tag": "j", "content": "03" }
                ]
            },
            {
                "fieldTag": "h", "marcTag": "866", "ind1": "3", "ind2": "1",
                "subfields": [ { "tag": "a", "content": "Lacks v. 11" } ]
            },
            { "fieldTag": "h", "content": "Some issues in Annex" },
            { "fieldTag": "b", "content": "33433012345678" }
        ]
    })
}

/// Parse a fixture into a [`Record`].
#[allow(dead_code)]
pub fn record_from(value: Value) -> Record {
    serde_json::from_value(value).unwrap()
}

/// Minimal record with a location code and the given variable fields.
#[allow(dead_code)]
pub fn record_with_fields(location: &str, var_fields: Value) -> Record {
    record_from(json!({
        "id": "h100",
        "fixedFields": { "40": { "value": location } },
        "varFields": var_fields
    }))
}
