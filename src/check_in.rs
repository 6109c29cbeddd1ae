//! Check-in card retrieval.
//!
//! Check-in cards describe individual serial issues as received at the
//! desk. They are opaque to this crate: whatever array the source returns is
//! attached to the record unmodified.

use crate::error::{HoldingsError, Result};
use crate::record::RecordId;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Fetches the check-in cards for a record.
pub trait CheckInCardSource {
    /// Fetch the cards for `record_id`.
    ///
    /// # Errors
    ///
    /// Returns [`HoldingsError::RecordAssembly`] when the source is
    /// unreachable or answers with anything but a card array.
    fn fetch(&self, record_id: &RecordId) -> Result<Vec<Value>>;
}

/// Card source that never returns cards.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCheckInCards;

impl CheckInCardSource for NoCheckInCards {
    fn fetch(&self, _record_id: &RecordId) -> Result<Vec<Value>> {
        Ok(Vec::new())
    }
}

/// Check-in cards held in memory, keyed by record id.
///
/// ```json
/// { "1093458": [ { "enumeration": "v. 12 no. 3", "status": "Arrived" } ] }
/// ```
#[derive(Debug, Clone, Default)]
pub struct CheckInCardTable {
    cards: Map<String, Value>,
}

impl CheckInCardTable {
    /// Build a table from a parsed JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`HoldingsError::RecordAssembly`] if the document is not an object.
    pub fn from_value(document: Value) -> Result<Self> {
        match document {
            Value::Object(cards) => Ok(CheckInCardTable { cards }),
            _ => Err(HoldingsError::RecordAssembly(
                "check-in card document must be a JSON object keyed by record id".to_string(),
            )),
        }
    }

    /// Parse a table from a reader.
    ///
    /// # Errors
    ///
    /// Returns [`HoldingsError::RecordAssembly`] if reading fails or the data
    /// is not a JSON object.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let document = serde_json::from_reader(reader).map_err(|e| {
            HoldingsError::RecordAssembly(format!("unable to load check-in cards: {e}"))
        })?;
        Self::from_value(document)
    }

    /// Load a table from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`HoldingsError::RecordAssembly`] if the file cannot be opened
    /// or does not contain a JSON object.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            HoldingsError::RecordAssembly(format!(
                "unable to open check-in cards {}: {e}",
                path.display()
            ))
        })?;
        let table = Self::from_reader(BufReader::new(file))?;
        tracing::debug!(path = %path.display(), records = table.cards.len(), "loaded check-in cards");
        Ok(table)
    }
}

impl CheckInCardSource for CheckInCardTable {
    fn fetch(&self, record_id: &RecordId) -> Result<Vec<Value>> {
        match self.cards.get(&record_id.to_string()) {
            None => Ok(Vec::new()),
            Some(Value::Array(cards)) => Ok(cards.clone()),
            Some(_) => Err(HoldingsError::RecordAssembly(format!(
                "check-in cards for record {record_id} are not an array"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table() -> CheckInCardTable {
        CheckInCardTable::from_value(json!({
            "1093458": [ { "enumeration": "v. 12 no. 3", "status": "Arrived" } ],
            "b77": "oops"
        }))
        .unwrap()
    }

    #[test]
    fn test_fetch_returns_cards_verbatim() {
        let cards = table().fetch(&RecordId::Number(1_093_458)).unwrap();
        assert_eq!(
            cards,
            vec![json!({ "enumeration": "v. 12 no. 3", "status": "Arrived" })]
        );
    }

    #[test]
    fn test_unknown_record_has_no_cards() {
        assert!(table()
            .fetch(&RecordId::Text("b1".to_string()))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_non_array_entry_is_assembly_error() {
        let err = table().fetch(&RecordId::Text("b77".to_string())).unwrap_err();
        assert!(matches!(err, HoldingsError::RecordAssembly(_)));
        assert!(err.to_string().contains("b77"));
    }

    #[test]
    fn test_no_check_in_cards() {
        assert!(NoCheckInCards.fetch(&RecordId::Number(1)).unwrap().is_empty());
    }

    #[test]
    fn test_from_reader_rejects_array() {
        let err = CheckInCardTable::from_reader("[]".as_bytes()).unwrap_err();
        assert!(matches!(err, HoldingsError::RecordAssembly(_)));
    }
}
