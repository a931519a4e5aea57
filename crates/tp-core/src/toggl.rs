//! Toggl Track CSV reading and writing.
//!
//! Toggl's export carries naive local timestamps split across `Start date`
//! and `Start time` columns; reading resolves them through the output
//! [`ZoneSpec`] into canonical instants. Writing emits the same column set
//! with every field quoted, matching Toggl's own exports.

use std::io::{Read, Write};

use chrono::{NaiveDate, NaiveTime};
use csv::{QuoteStyle, WriterBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::duration::{self, DurationError};
use crate::entry::{EntryError, EntryStatus, TimeEntry};
use crate::timezone::ZoneSpec;

/// Column order of a Toggl Track CSV export.
pub const HEADERS: [&str; 7] = [
    "Description",
    "Billable",
    "Duration",
    "Email",
    "Project",
    "Start date",
    "Start time",
];

/// Errors reading or writing Toggl CSV.
#[derive(Debug, Error)]
pub enum TogglError {
    #[error("failed to read CSV: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Why a single row was skipped.
#[derive(Debug, Error)]
enum RowError {
    #[error("{0}")]
    Timestamp(#[from] chrono::ParseError),

    #[error(transparent)]
    Duration(#[from] DurationError),

    #[error(transparent)]
    Entry(#[from] EntryError),
}

#[derive(Debug, Deserialize)]
struct TogglRow {
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "Duration", default)]
    duration: String,
    #[serde(rename = "Project", default)]
    project: String,
    #[serde(rename = "Start date")]
    start_date: String,
    #[serde(rename = "Start time")]
    start_time: String,
    #[serde(rename = "Tags", default)]
    tags: String,
}

impl TogglRow {
    fn into_entry(self, zone: &ZoneSpec) -> Result<TimeEntry, RowError> {
        let date = NaiveDate::parse_from_str(&self.start_date, "%Y-%m-%d")?;
        let time = NaiveTime::parse_from_str(&self.start_time, "%H:%M:%S")?;
        let start = zone.from_local(date.and_time(time));

        // An empty duration marks an entry that was still running.
        let end = if self.duration.trim().is_empty() {
            None
        } else {
            Some(start + duration::parse_hms(&self.duration)?)
        };

        let entry = TimeEntry::new(self.description, self.project, start, end, EntryStatus::Active)?
            .with_tags(split_tags(&self.tags));
        Ok(entry)
    }
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

/// Reads a Toggl CSV export into canonical entries.
///
/// Naive timestamps are interpreted in `zone`. Malformed rows are skipped
/// with a warning. A leading UTF-8 BOM (present in Toggl's own exports) is
/// stripped.
pub fn read_csv(mut reader: impl Read, zone: &ZoneSpec) -> Result<Vec<TimeEntry>, TogglError> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    let data = buf.strip_prefix('\u{feff}').unwrap_or(&buf);

    let mut csv_reader = csv::Reader::from_reader(data.as_bytes());
    let mut entries = Vec::new();
    for (idx, result) in csv_reader.deserialize::<TogglRow>().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(error) => {
                tracing::warn!(row = idx + 1, %error, "skipping malformed Toggl row");
                continue;
            }
        };
        match row.into_entry(zone) {
            Ok(entry) => entries.push(entry),
            Err(reason) => {
                tracing::warn!(row = idx + 1, %reason, "skipping malformed Toggl row");
            }
        }
    }
    Ok(entries)
}

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    description: &'a str,
    billable: &'a str,
    duration: String,
    email: &'a str,
    project: &'a str,
    start_date: String,
    start_time: String,
}

/// Writes canonical entries as a Toggl CSV export.
///
/// Instants are projected into `zone`; every field is quoted. Open entries
/// emit an empty duration.
pub fn write_csv(
    writer: impl Write,
    entries: &[TimeEntry],
    email: &str,
    zone: &ZoneSpec,
) -> Result<(), TogglError> {
    let mut csv_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(HEADERS)?;

    for entry in entries {
        let local = zone.to_local(entry.start);
        csv_writer.serialize(OutputRow {
            description: &entry.description,
            billable: "No",
            duration: entry.duration().map(duration::format_hms).unwrap_or_default(),
            email,
            project: &entry.project,
            start_date: local.format("%Y-%m-%d").to_string(),
            start_time: local.format("%H:%M:%S").to_string(),
        })?;
    }
    csv_writer.flush().map_err(TogglError::Io)?;
    Ok(())
}
