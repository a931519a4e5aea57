//! Jiffy JSON export parsing.
//!
//! A Jiffy export is a single JSON document with `time_entries` (tracked
//! intervals, epoch-millisecond timestamps) and `time_owners` (the category
//! tree: an owner is a project, its parent is the client). Individual
//! records that fail to convert are skipped with a warning rather than
//! failing the whole export.

use std::collections::HashMap;
use std::io::Read;

use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::entry::{EntryError, EntryStatus, TimeEntry};

/// Errors reading a Jiffy export document.
#[derive(Debug, Error)]
pub enum JiffyError {
    #[error("failed to read export: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid Jiffy JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a single record was skipped.
#[derive(Debug, Error)]
enum RecordError {
    #[error("{0}")]
    Shape(#[from] serde_json::Error),

    #[error("start timestamp {0} is out of range")]
    BadStart(i64),

    #[error("stop timestamp {0} is out of range")]
    BadStop(i64),

    #[error(transparent)]
    Entry(#[from] EntryError),
}

/// A parsed Jiffy export document.
///
/// Records are kept as raw JSON until [`Self::entries`] converts them, so a
/// malformed record costs a warning instead of a parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct JiffyExport {
    #[serde(default)]
    time_entries: Vec<Value>,
    #[serde(default)]
    time_owners: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    start_time: i64,
    #[serde(default)]
    stop_time: Option<i64>,
    #[serde(default)]
    owner_id: Option<String>,
    #[serde(default)]
    note: Option<String>,
    status: EntryStatus,
}

#[derive(Debug, Deserialize)]
struct RawOwner {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    parent_id: Option<String>,
}

impl JiffyExport {
    /// Parses an export document from a reader.
    pub fn from_reader(mut reader: impl Read) -> Result<Self, JiffyError> {
        let mut buf = String::new();
        reader.read_to_string(&mut buf)?;
        Ok(serde_json::from_str(&buf)?)
    }

    /// Number of raw entry records, including malformed ones.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.time_entries.len()
    }

    /// Converts raw records into canonical entries.
    ///
    /// Malformed records (bad shape, out-of-range timestamps, stop before
    /// start, unknown status) are skipped with a warning.
    #[must_use]
    pub fn entries(&self) -> Vec<TimeEntry> {
        let owners = self.owners();

        self.time_entries
            .iter()
            .enumerate()
            .filter_map(|(idx, raw)| match convert_entry(raw, &owners) {
                Ok(entry) => Some(entry),
                Err(reason) => {
                    tracing::warn!(record = idx + 1, %reason, "skipping malformed Jiffy entry");
                    None
                }
            })
            .collect()
    }

    fn owners(&self) -> HashMap<String, RawOwner> {
        self.time_owners
            .iter()
            .enumerate()
            .filter_map(|(idx, raw)| match serde_json::from_value::<RawOwner>(raw.clone()) {
                Ok(owner) => Some((owner.id.clone(), owner)),
                Err(error) => {
                    tracing::warn!(record = idx + 1, %error, "skipping malformed Jiffy owner");
                    None
                }
            })
            .collect()
    }
}

fn convert_entry(
    raw: &Value,
    owners: &HashMap<String, RawOwner>,
) -> Result<TimeEntry, RecordError> {
    let record: RawEntry = serde_json::from_value(raw.clone())?;

    let start = DateTime::from_timestamp_millis(record.start_time)
        .ok_or(RecordError::BadStart(record.start_time))?;
    let end = match record.stop_time {
        Some(ms) => Some(DateTime::from_timestamp_millis(ms).ok_or(RecordError::BadStop(ms))?),
        None => None,
    };

    let (project, client) = resolve_owner(record.owner_id.as_deref(), owners);
    let entry = TimeEntry::new(
        record.note.unwrap_or_default(),
        project,
        start,
        end,
        record.status,
    )?
    .with_client(client);
    Ok(entry)
}

/// Resolves an owner id to (project, client) names.
///
/// The owner's own name is the project; its parent's name is the client.
/// Unknown or missing owners resolve to empty strings.
fn resolve_owner(
    owner_id: Option<&str>,
    owners: &HashMap<String, RawOwner>,
) -> (String, String) {
    let Some(owner) = owner_id.and_then(|id| owners.get(id)) else {
        return (String::new(), String::new());
    };
    let client = owner
        .parent_id
        .as_deref()
        .and_then(|id| owners.get(id))
        .map_or_else(String::new, |parent| parent.name.clone());
    (owner.name.clone(), client)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use chrono::Duration;

    use super::*;

    const MS_2025_01_01T00_00_00Z: i64 = 1_735_689_600_000;

    fn export(json: &str) -> JiffyExport {
        JiffyExport::from_reader(Cursor::new(json)).unwrap()
    }

    #[test]
    fn converts_entry_with_owner_hierarchy() {
        let export = export(
            r#"{
                "time_entries": [
                    {"start_time": 1735689600000, "stop_time": 1735693200000,
                     "owner_id": "o1", "note": "standup", "status": "ACTIVE"}
                ],
                "time_owners": [
                    {"id": "o1", "name": "Acme Website", "parent_id": "o2", "status": "ACTIVE"},
                    {"id": "o2", "name": "Acme Corp", "status": "ACTIVE"}
                ]
            }"#,
        );

        let entries = export.entries();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.description, "standup");
        assert_eq!(entry.project, "Acme Website");
        assert_eq!(entry.client, "Acme Corp");
        assert_eq!(entry.status, EntryStatus::Active);
        assert_eq!(entry.duration(), Some(Duration::hours(1)));
        assert_eq!(entry.start.timestamp_millis(), MS_2025_01_01T00_00_00Z);
    }

    #[test]
    fn top_level_owner_has_no_client() {
        let export = export(
            r#"{
                "time_entries": [
                    {"start_time": 1735689600000, "stop_time": 1735689600000,
                     "owner_id": "o2", "status": "ACTIVE"}
                ],
                "time_owners": [{"id": "o2", "name": "Acme Corp"}]
            }"#,
        );

        let entries = export.entries();
        assert_eq!(entries[0].project, "Acme Corp");
        assert_eq!(entries[0].client, "");
        assert_eq!(entries[0].description, "");
    }

    #[test]
    fn unknown_owner_resolves_to_empty_fields() {
        let export = export(
            r#"{
                "time_entries": [
                    {"start_time": 1735689600000, "stop_time": 1735689600000,
                     "owner_id": "nope", "status": "ACTIVE"},
                    {"start_time": 1735689600000, "stop_time": 1735689600000,
                     "status": "ACTIVE"}
                ],
                "time_owners": []
            }"#,
        );

        let entries = export.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.project.is_empty() && e.client.is_empty()));
    }

    #[test]
    fn ongoing_entry_is_open() {
        let export = export(
            r#"{
                "time_entries": [
                    {"start_time": 1735689600000, "status": "ACTIVE"}
                ]
            }"#,
        );

        let entries = export.entries();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_open());
        assert_eq!(entries[0].duration(), None);
    }

    #[test]
    fn malformed_records_are_skipped() {
        let export = export(
            r#"{
                "time_entries": [
                    {"note": "no start at all", "status": "ACTIVE"},
                    {"start_time": 1735693200000, "stop_time": 1735689600000, "status": "ACTIVE"},
                    {"start_time": 1735689600000, "stop_time": 1735689600000, "status": "PAUSED"},
                    {"start_time": 99999999999999999, "status": "ACTIVE"},
                    {"start_time": 1735689600000, "stop_time": 1735693200000, "status": "ACTIVE"}
                ]
            }"#,
        );

        assert_eq!(export.entry_count(), 5);
        let entries = export.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].duration(), Some(Duration::hours(1)));
    }

    #[test]
    fn deleted_entries_survive_parsing() {
        // Status filtering happens later in the pipeline, not at parse time.
        let export = export(
            r#"{
                "time_entries": [
                    {"start_time": 1735689600000, "stop_time": 1735693200000, "status": "DELETED"}
                ]
            }"#,
        );

        let entries = export.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, EntryStatus::Deleted);
    }

    #[test]
    fn malformed_owner_is_skipped_but_entries_still_convert() {
        let export = export(
            r#"{
                "time_entries": [
                    {"start_time": 1735689600000, "stop_time": 1735693200000,
                     "owner_id": "o1", "status": "ACTIVE"}
                ],
                "time_owners": [
                    {"name": "missing id"},
                    {"id": "o1", "name": "Acme Website"}
                ]
            }"#,
        );

        let entries = export.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].project, "Acme Website");
    }

    #[test]
    fn empty_document_yields_no_entries() {
        let export = export("{}");
        assert_eq!(export.entry_count(), 0);
        assert!(export.entries().is_empty());
    }

    #[test]
    fn invalid_document_is_an_error() {
        assert!(matches!(
            JiffyExport::from_reader(Cursor::new("[1, 2, 3]")),
            Err(JiffyError::Json(_))
        ));
    }
}
