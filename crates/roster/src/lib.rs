//! Roster loader — turns the birthdays CSV into validated [`RosterRecord`]s.
//!
//! The loader is a streaming validator: a bad row is logged and dropped,
//! it never aborts the load. Only problems with the source as a whole (I/O,
//! a header without the required columns) are fatal.

pub mod row;


use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use zivijo_common::types::RosterRecord;
use zivijo_common::{AppError, Result};

pub use row::{Columns, ParsedRow, RowError, parse_row};

/// Open and read the roster at `path`.
pub fn load_roster(path: &Path) -> Result<Vec<RosterRecord>> {
    let file = File::open(path).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to open roster file");
        AppError::Io(e)
    })?;

    let records = read_roster(file)?;

    tracing::info!(
        count = records.len(),
        path = %path.display(),
        "Read {} birthdays from {}",
        records.len(),
        path.display()
    );

    Ok(records)
}

/// Read roster rows from any source. The first non-blank line is the header.
///
/// An empty source yields an empty roster. A header missing any of
/// `email`, `user_id`, `iso-birth-date`, `iso-name-date` fails the whole load.
pub fn read_roster<R: Read>(source: R) -> Result<Vec<RosterRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        tracing::info!("Roster source is empty");
        return Ok(Vec::new());
    }

    let columns = Columns::from_headers(&headers).inspect_err(|e| {
        tracing::error!(
            header = ?headers,
            error = %e,
            "Roster header is malformed. Please add the correct header."
        );
    })?;

    let mut records = Vec::new();
    let mut rejected = 0usize;

    for result in reader.records() {
        let row = match result {
            Ok(row) => row,
            Err(e) if e.is_io_error() => return Err(AppError::Csv(e)),
            Err(e) => {
                tracing::error!(
                    line = e.position().map(|p| p.line()),
                    error = %e,
                    "Failed to read roster row. Skipping."
                );
                rejected += 1;
                continue;
            }
        };

        let line = row.position().map(|p| p.line());

        match parse_row(&row, &columns) {
            Ok(parsed) => {
                if parsed.prefixed {
                    tracing::warn!(
                        line,
                        user_id = %parsed.record.user_id,
                        "User ID does not start with @. Adding @."
                    );
                }
                records.push(parsed.record);
            }
            Err(e) => {
                tracing::error!(line, error = %e, "Invalid roster row. Skipping.");
                rejected += 1;
            }
        }
    }

    tracing::debug!(accepted = records.len(), rejected, "Roster parsed");

    Ok(records)
}
