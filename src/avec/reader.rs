//! Reader-based decoder implementation for CSV captures.
//!
//! _Requires Cargo feature `std`._

use std::{
    io::Read,
    string::{String, ToString},
};

use thiserror::Error;

use crate::sans::edge::{Sample, SampleError};

use super::{FrameDecoder, FromFrames};

extern crate std;

/// Column holding the clock-line level.
const CLOCK_COLUMN: &str = "clk";

/// Column holding the command-line level.
const COMMAND_COLUMN: &str = "cmd";

/// Column holding the data-line nibble, in hexadecimal.
const DATA_COLUMN: &str = "data";

/// Errors occurring while decoding from a capture reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error reading or parsing the capture table.
    #[error(transparent)]
    Csv(#[from] csv::Error),
    /// A required column is missing from the header line.
    #[error("Capture table has no '{0}' column.")]
    MissingColumn(&'static str),
    /// A field failed to parse as a number.
    #[error("Line {line}: '{value}' is not a valid {column} value.")]
    InvalidField {
        line: u64,
        column: &'static str,
        value: String,
    },
    /// A sample held out-of-domain signal levels.
    #[error("Line {line}: {source}")]
    Sample { line: u64, source: SampleError },
}

/// Decode frames from a CSV capture, publishing to a receiver.
///
/// The capture must carry a header line naming `clk`, `cmd`, and `data`
/// columns, with the data nibble in hexadecimal, as exported by the logic
/// analyzer. A malformed row aborts decoding with an error naming its
/// line; a frame that fails classification is discarded with a warning and
/// decoding continues at the next transaction.
///
/// This method is also re-exported as `interposer::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode(r: impl Read, sample_period: f64, o: &mut impl FromFrames) -> Result<(), Error> {
    let mut reader = csv::Reader::from_reader(r);

    let headers = reader.headers()?.clone();
    let clock = position(&headers, CLOCK_COLUMN)?;
    let command = position(&headers, COMMAND_COLUMN)?;
    let data = position(&headers, DATA_COLUMN)?;

    let mut decoder = FrameDecoder::new(sample_period);

    // Line 1 holds the column header, so the first record is line 2.
    let mut line = 2;

    for record in reader.records() {
        let record = record?;

        let clock = field(&record, clock, CLOCK_COLUMN, line, 10)?;
        let command = field(&record, command, COMMAND_COLUMN, line, 10)?;
        let data = field(&record, data, DATA_COLUMN, line, 16)?;

        let sample =
            Sample::new(clock, command, data).map_err(|source| Error::Sample { line, source })?;

        if let Err(error) = decoder.process_sample(&sample, o) {
            log::warn!("Line {line}: discarding frame: {error}");
        }

        line += 1;
    }

    decoder.finish(o);

    Ok(())
}

/// Find a named column in the header line.
fn position(headers: &csv::StringRecord, column: &'static str) -> Result<usize, Error> {
    headers
        .iter()
        .position(|header| header.trim() == column)
        .ok_or(Error::MissingColumn(column))
}

/// Parse one numeric field of a record.
fn field(
    record: &csv::StringRecord,
    index: usize,
    column: &'static str,
    line: u64,
    radix: u32,
) -> Result<u8, Error> {
    let value = record.get(index).unwrap_or("").trim();

    u8::from_str_radix(value, radix).map_err(|_| Error::InvalidField {
        line,
        column,
        value: value.to_string(),
    })
}
