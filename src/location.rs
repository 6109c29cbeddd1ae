//! Location code lookup.
//!
//! The [`LocationResolver`] trait is the boundary to whatever dataset maps
//! location codes to labels. [`LocationTable`] is the stock implementation:
//! a JSON object keyed by code, each entry carrying at least `code` and
//! `label`, as published in the NYPL-Core locations document.
//!
//! ```json
//! {
//!   "mal": { "code": "mal", "label": "SASB - Service Desk Rm 315", "recapLocation": false },
//!   "rc2ma": { "code": "rc2ma", "label": "Offsite" }
//! }
//! ```

use crate::error::{HoldingsError, Result};
use crate::record::Location;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Code that means "no location" and never fails lookup.
pub const NO_LOCATION: &str = "none";

/// Resolves location codes to `{code, label}` pairs.
pub trait LocationResolver {
    /// Look up a location code.
    ///
    /// Returns `Ok(None)` for the code `none` (after trimming whitespace).
    ///
    /// # Errors
    ///
    /// Returns [`HoldingsError::LocationLookup`] when the dataset is
    /// unavailable or the code has no complete entry.
    fn lookup(&self, code: &str) -> Result<Option<Location>>;
}

/// In-memory location dataset loaded from JSON.
#[derive(Debug, Clone, Default)]
pub struct LocationTable {
    locations: Map<String, Value>,
}

impl LocationTable {
    /// Build a table from a parsed JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`HoldingsError::LocationLookup`] if the document is not an object.
    pub fn from_value(document: Value) -> Result<Self> {
        match document {
            Value::Object(locations) => Ok(LocationTable { locations }),
            other => Err(HoldingsError::LocationLookup(format!(
                "locations document must be a JSON object, found {}",
                json_type(&other)
            ))),
        }
    }

    /// Parse a table from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`HoldingsError::LocationLookup`] if the string is not a JSON object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document = serde_json::from_str(json).map_err(|e| {
            HoldingsError::LocationLookup(format!("unable to parse locations document: {e}"))
        })?;
        Self::from_value(document)
    }

    /// Parse a table from a reader.
    ///
    /// # Errors
    ///
    /// Returns [`HoldingsError::LocationLookup`] if reading fails or the data
    /// is not a JSON object.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let document = serde_json::from_reader(reader).map_err(|e| {
            HoldingsError::LocationLookup(format!("unable to load locations document: {e}"))
        })?;
        Self::from_value(document)
    }

    /// Load a table from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`HoldingsError::LocationLookup`] if the file cannot be opened
    /// or does not contain a JSON object.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            HoldingsError::LocationLookup(format!(
                "unable to open locations document {}: {e}",
                path.display()
            ))
        })?;
        let table = Self::from_reader(BufReader::new(file))?;
        tracing::debug!(path = %path.display(), codes = table.len(), "loaded locations");
        Ok(table)
    }

    /// Number of codes in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// True when the table has no codes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl LocationResolver for LocationTable {
    fn lookup(&self, code: &str) -> Result<Option<Location>> {
        let code = code.trim();
        if code == NO_LOCATION {
            return Ok(None);
        }

        let entry = self.locations.get(code);
        let field = |name: &str| entry.and_then(|e| e.get(name)).and_then(Value::as_str);

        match (field("code"), field("label")) {
            (Some(found_code), Some(label)) => Ok(Some(Location {
                code: found_code.to_string(),
                label: label.to_string(),
            })),
            _ => Err(HoldingsError::LocationLookup(format!(
                "missing or incomplete code record {} for location code {code:?}",
                entry.map_or_else(|| "null".to_string(), Value::to_string)
            ))),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
