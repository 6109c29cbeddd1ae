//! Batch processing with per-record error isolation.
//!
//! A batch is a sequence of raw JSON records. Each record is decoded,
//! assembled and handed to a sink independently: a failure at any step is
//! logged with the record id and error kind, counted, and the batch moves on
//! to the next record.
//!
//! # Examples
//!
//! ```
//! use holdings_parser::assembler::RecordAssembler;
//! use holdings_parser::batch::BatchProcessor;
//! use holdings_parser::check_in::NoCheckInCards;
//! use holdings_parser::location::LocationTable;
//!
//! let locations = LocationTable::default();
//! let processor = BatchProcessor::new(RecordAssembler::new(&locations, &NoCheckInCards));
//!
//! let input = r#"{"id": 1, "fixedFields": {"40": {"value": "none"}}, "varFields": []}"#;
//! let mut output = Vec::new();
//! let summary = processor.process_json_lines(input.as_bytes(), &mut output)?;
//!
//! assert_eq!(summary.processed, 1);
//! assert_eq!(summary.failed, 0);
//! # Ok::<(), holdings_parser::HoldingsError>(())
//! ```

use crate::assembler::RecordAssembler;
use crate::error::{HoldingsError, Result};
use crate::record::Record;
use serde_json::Value;
use std::io::{BufRead, Write};
use tracing::{debug, error, info};

/// Outcome counts for one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Records assembled and accepted by the sink
    pub processed: usize,
    /// Records dropped because decoding, assembly or the sink failed
    pub failed: usize,
}

/// Runs a [`RecordAssembler`] over batches of records.
#[derive(Debug)]
pub struct BatchProcessor<'a> {
    assembler: RecordAssembler<'a>,
}

impl<'a> BatchProcessor<'a> {
    /// Create a processor around an assembler.
    #[must_use]
    pub fn new(assembler: RecordAssembler<'a>) -> Self {
        BatchProcessor { assembler }
    }

    /// Decode and assemble one raw record.
    ///
    /// # Errors
    ///
    /// Returns [`HoldingsError::Json`] when the value is not a record, or any
    /// error from [`RecordAssembler::assemble`].
    pub fn process_one(&self, raw: Value) -> Result<Record> {
        let record: Record = serde_json::from_value(raw)?;
        self.assembler.assemble(record)
    }

    /// Process every record in `records`, passing successes to `sink`.
    ///
    /// Never fails as a whole; every per-record failure is logged and counted.
    pub fn process<I, F>(&self, records: I, mut sink: F) -> BatchSummary
    where
        I: IntoIterator<Item = Value>,
        F: FnMut(&Record) -> Result<()>,
    {
        info!("beginning processing of record batch");
        let mut summary = BatchSummary::default();

        for raw in records {
            let id = raw.get("id").cloned().unwrap_or(Value::Null);

            let outcome = self
                .process_one(raw)
                .and_then(|record| sink(&record).map(|()| record));

            match outcome {
                Ok(record) => {
                    debug!(id = %record.id, "processed record");
                    summary.processed += 1;
                }
                Err(e) => {
                    error!(id = %id, kind = ?e.kind(), error = %e, "unable to process record");
                    summary.failed += 1;
                }
            }
        }

        info!(
            processed = summary.processed,
            failed = summary.failed,
            "processing complete"
        );
        summary
    }

    /// Process newline-delimited JSON records from `reader`, writing one
    /// assembled record per line to `writer` as soon as it is ready. Blank
    /// lines are skipped; a line that is not valid JSON counts as a failed
    /// record.
    ///
    /// A read error ends the batch: records already assembled stay written
    /// and are flushed before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`HoldingsError::Io`] when reading the input or flushing the
    /// output fails.
    pub fn process_json_lines<R: BufRead, W: Write>(
        &self,
        reader: R,
        mut writer: W,
    ) -> Result<BatchSummary> {
        let mut malformed = 0;
        let mut read_error = None;

        let records = reader
            .lines()
            .enumerate()
            .map_while(|(index, line)| match line {
                Ok(line) => Some((index, line)),
                Err(e) => {
                    read_error = Some(e);
                    None
                }
            })
            .filter_map(|(index, line)| {
                if line.trim().is_empty() {
                    return None;
                }
                match serde_json::from_str::<Value>(&line) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        error!(line = index + 1, error = %e, "unable to decode record");
                        malformed += 1;
                        None
                    }
                }
            });

        let mut summary = self.process(records, |record| {
            serde_json::to_writer(&mut writer, record)?;
            writer.write_all(b"\n").map_err(HoldingsError::from)
        });
        writer.flush()?;
        summary.failed += malformed;

        if let Some(e) = read_error {
            error!(
                processed = summary.processed,
                failed = summary.failed,
                error = %e,
                "input read failed, ending batch"
            );
            return Err(e.into());
        }
        Ok(summary)
    }
}
