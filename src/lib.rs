#![warn(missing_docs)]

//! # Holdings Parser
//!
//! Turns the serial holdings data on catalog holding records into display
//! strings, and enriches each record with its location and check-in cards.
//!
//! MARC holdings spread a statement such as *v. 1 (1990) - v. 10 (1999)*
//! over two fields: an 853 **caption** field defining labels (`a` = "v.",
//! `i` = "(year)") and one or more 863 **holdings** fields carrying values
//! (`a` = "1-10", `i` = "1990-1999"), linked by subfield 8. This crate pairs
//! them up, interprets abbreviated date captions, and assembles the text.
//!
//! ## Quick Start
//!
//! ### Rendering one statement
//!
//! ```
//! use holdings_parser::field_renderer::FieldRenderer;
//! use holdings_parser::subfield_code::{CaptionSet, HoldingsValueSet};
//!
//! let captions = CaptionSet::from([('a', "v."), ('i', "(year)")]);
//! let values = HoldingsValueSet::from([('a', "12-"), ('i', "2001-")]);
//!
//! let rendered = FieldRenderer::new(&values, &captions).render()?;
//! assert_eq!(rendered.text, "v. 12 (2001)-");
//! # Ok::<(), holdings_parser::HoldingsError>(())
//! ```
//!
//! ### Assembling a record
//!
//! ```
//! use holdings_parser::{CheckInCardTable, LocationTable, Record, RecordAssembler};
//! use serde_json::json;
//!
//! let locations = LocationTable::from_value(json!({
//!     "mal": { "code": "mal", "label": "Main Reading Room" }
//! }))?;
//! let cards = CheckInCardTable::default();
//! let assembler = RecordAssembler::new(&locations, &cards);
//!
//! let record: Record = serde_json::from_value(json!({
//!     "id": 1093458,
//!     "fixedFields": { "40": { "value": "mal" } },
//!     "varFields": [
//!         { "fieldTag": "y", "marcTag": "853",
//!           "subfields": [ { "tag": "8", "content": "1" }, { "tag": "a", "content": "v." } ] },
//!         { "fieldTag": "h", "marcTag": "863",
//!           "subfields": [ { "tag": "8", "content": "1.1" }, { "tag": "a", "content": "1-3" } ] }
//!     ]
//! }))?;
//!
//! let record = assembler.assemble(record)?;
//! assert_eq!(record.holdings()[0].text, "v. 1 - v. 3");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Modules
//!
//! - [`subfield_code`] — Enumeration/chronology code alphabet and typed subfield sets
//! - [`field_linkage`] — Subfield 8 crosswalk keys (`group.ordinal`)
//! - [`caption_label`] — Chronology caption normalization (`yr.` → year)
//! - [`date_accumulator`] — Start/end date assembly
//! - [`field_renderer`] — Rendering one holdings statement
//! - [`crosswalk`] — Pairing 863 holdings with 853 captions
//! - [`assembler`] — Per-record enrichment
//! - [`batch`] — Batch processing with per-record error isolation
//! - [`location`] — Location code lookup
//! - [`check_in`] — Check-in card retrieval
//! - [`record`] — Record structures
//! - [`config`] — Runtime settings
//! - [`logging`] — Tracing subscriber setup
//! - [`error`] — Error types and result type

pub mod assembler;
pub mod batch;
pub mod caption_label;
pub mod check_in;
pub mod config;
pub mod crosswalk;
pub mod date_accumulator;
pub mod error;
pub mod field_linkage;
pub mod field_renderer;
pub mod location;
pub mod logging;
pub mod macros;
pub mod record;
pub mod subfield_code;

pub use assembler::{HoldingsFields, RecordAssembler};
pub use batch::{BatchProcessor, BatchSummary};
pub use caption_label::DateUnit;
pub use check_in::{CheckInCardSource, CheckInCardTable, NoCheckInCards};
pub use crosswalk::{crosswalk, HoldingsCrosswalk};
pub use date_accumulator::DateAccumulator;
pub use error::{ErrorKind, HoldingsError, Result};
pub use field_linkage::ControlNumber;
pub use field_renderer::{FieldRenderer, RenderedField};
pub use location::{LocationResolver, LocationTable};
pub use record::{FixedField, HoldingEntry, Location, Record, RecordId, Subfield, VarField};
pub use subfield_code::{CaptionSet, ChronologyCode, EnumerationCode, HoldingsValueSet, SubfieldCode};
