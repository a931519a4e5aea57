//! Clockify CSV emission.
//!
//! Clockify's import format wants US-style dates (`%m/%d/%Y`), 12-hour
//! start times, and a decimal-hours duration column. Non-numeric fields are
//! quoted, matching Clockify's own exports.

use std::io::Write;

use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;
use thiserror::Error;

use crate::duration;
use crate::entry::TimeEntry;
use crate::timezone::ZoneSpec;

/// Column order of a Clockify CSV import.
pub const HEADERS: [&str; 10] = [
    "Project",
    "Client",
    "Description",
    "Task",
    "Email",
    "Tags",
    "Billable",
    "Start Date",
    "Start Time",
    "Duration (h)",
];

/// Errors writing Clockify CSV.
#[derive(Debug, Error)]
pub enum ClockifyError {
    #[error("failed to write CSV: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    project: &'a str,
    client: &'a str,
    description: &'a str,
    task: &'a str,
    email: &'a str,
    tags: String,
    billable: &'a str,
    start_date: String,
    start_time: String,
    duration_hours: String,
}

/// Writes canonical entries as a Clockify CSV import.
///
/// Instants are projected into `zone`. Open entries emit an empty duration;
/// the `Task` column is always empty.
pub fn write_csv(
    writer: impl Write,
    entries: &[TimeEntry],
    email: &str,
    zone: &ZoneSpec,
) -> Result<(), ClockifyError> {
    let mut csv_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(HEADERS)?;

    for entry in entries {
        let local = zone.to_local(entry.start);
        csv_writer.serialize(OutputRow {
            project: &entry.project,
            client: &entry.client,
            description: &entry.description,
            task: "",
            email,
            tags: entry.tags.join(", "),
            billable: "No",
            start_date: local.format("%m/%d/%Y").to_string(),
            start_time: local.format("%-I:%M %p").to_string(),
            duration_hours: entry
                .duration()
                .map(duration::format_decimal_hours)
                .unwrap_or_default(),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}
