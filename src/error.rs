//! Error types for holdings parsing and record assembly.
//!
//! This module provides the [`HoldingsError`] type for all library operations
//! and the [`Result`] convenience type. Every error carries the offending value
//! so the batch layer can log the failure reason for a single record.

use thiserror::Error;

/// Error type for all holdings parsing and assembly operations.
///
/// Each variant is fatal to the record being processed. The core performs no
/// retries; callers iterating a batch catch the error and move on.
#[derive(Error, Debug)]
pub enum HoldingsError {
    /// A chronology caption could not be mapped to a date unit.
    #[error("Unable to identify field {label} for chronology")]
    FieldParse {
        /// The caption label exactly as it appeared in the 853 field
        label: String,
    },

    /// A subfield 8 crosswalk key was missing or malformed.
    #[error("Invalid linkage in field {tag}: {value:?}")]
    InvalidLinkage {
        /// MARC tag of the field carrying the key
        tag: String,
        /// The raw subfield 8 value (empty when absent)
        value: String,
    },

    /// The location dataset was unavailable or a code entry was malformed.
    #[error("Location lookup failed: {0}")]
    LocationLookup(String),

    /// Check-in cards could not be attached to the record.
    #[error("Record assembly failed: {0}")]
    RecordAssembly(String),

    /// IO error from the underlying source/destination.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A record or data table was not valid JSON for its expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of a [`HoldingsError`], used for logging and by
/// callers that need to branch on the failure without matching messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caption or crosswalk key could not be parsed
    FieldParse,
    /// Location dataset problem
    LocationLookup,
    /// Check-in card retrieval problem
    RecordAssembly,
    /// Transport or decoding problem outside the core
    Io,
}

impl HoldingsError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            HoldingsError::FieldParse { .. } | HoldingsError::InvalidLinkage { .. } => {
                ErrorKind::FieldParse
            }
            HoldingsError::LocationLookup(_) => ErrorKind::LocationLookup,
            HoldingsError::RecordAssembly(_) => ErrorKind::RecordAssembly,
            HoldingsError::Io(_) | HoldingsError::Json(_) => ErrorKind::Io,
        }
    }
}

/// Convenience type alias for [`std::result::Result`] with [`HoldingsError`].
pub type Result<T> = std::result::Result<T, HoldingsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_parse_message_carries_label() {
        let err = HoldingsError::FieldParse {
            label: "(smthg.)".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unable to identify field (smthg.) for chronology"
        );
        assert_eq!(err.kind(), ErrorKind::FieldParse);
    }

    #[test]
    fn test_kinds_are_distinct() {
        let linkage = HoldingsError::InvalidLinkage {
            tag: "863".to_string(),
            value: "x".to_string(),
        };
        assert_eq!(linkage.kind(), ErrorKind::FieldParse);
        assert_eq!(
            HoldingsError::LocationLookup("gone".to_string()).kind(),
            ErrorKind::LocationLookup
        );
        assert_eq!(
            HoldingsError::RecordAssembly("503".to_string()).kind(),
            ErrorKind::RecordAssembly
        );
    }
}
