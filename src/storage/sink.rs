//! Writers for accepted combinations.

use std::io::{self, BufWriter, Write};

use serde::{Deserialize, Serialize};

use crate::engine::{AcceptedCombination, Sink};

/// Encoding of accepted combinations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Delimited rows under a `CPU,RAM,Motherboard,SSD` header.
    #[default]
    Csv,
    /// One JSON object per line.
    Json,
}

const HEADER: [&str; 4] = ["CPU", "RAM", "Motherboard", "SSD"];

/// A [`Sink`] that encodes combinations onto a byte stream.
///
/// Output is buffered; call [`finish`](Self::finish) to flush it.
pub enum CombinationWriter<W: Write> {
    /// CSV rows.
    Csv(csv::Writer<W>),
    /// JSON lines.
    Json(BufWriter<W>),
}

impl<W: Write> CombinationWriter<W> {
    /// Creates a writer. CSV output starts with its header row, so an empty
    /// result is still a valid table.
    ///
    /// # Errors
    ///
    /// Returns an error if the CSV header cannot be written.
    pub fn new(format: OutputFormat, writer: W) -> Result<Self, SinkError> {
        Ok(match format {
            OutputFormat::Csv => {
                let mut csv = csv::WriterBuilder::new()
                    .has_headers(false)
                    .from_writer(writer);
                csv.write_record(HEADER)?;
                Self::Csv(csv)
            }
            OutputFormat::Json => Self::Json(BufWriter::new(writer)),
        })
    }

    /// Flushes buffered output and returns the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffered output cannot be written.
    pub fn finish(self) -> Result<W, SinkError> {
        match self {
            Self::Csv(csv) => csv.into_inner().map_err(|e| SinkError::Io(e.into_error())),
            Self::Json(json) => json.into_inner().map_err(|e| SinkError::Io(e.into_error())),
        }
    }
}

impl<'c, W: Write> Sink<'c> for CombinationWriter<W> {
    type Error = SinkError;

    fn accept(&mut self, combination: AcceptedCombination<'c>) -> Result<(), Self::Error> {
        match self {
            Self::Csv(csv) => csv.serialize(combination)?,
            Self::Json(json) => {
                serde_json::to_writer(&mut *json, &combination)?;
                json.write_all(b"\n")?;
            }
        }
        Ok(())
    }
}

/// Errors writing accepted combinations.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The output stream failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
    /// A CSV row could not be written.
    #[error("failed to write CSV row: {0}")]
    Csv(#[from] csv::Error),
    /// A JSON line could not be written.
    #[error("failed to write JSON line: {0}")]
    Json(#[from] serde_json::Error),
}
