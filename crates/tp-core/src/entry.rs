//! The canonical time entry model shared by all converters.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for canonical entries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntryError {
    /// The entry ends before it starts.
    #[error("entry ends at {end} before it starts at {start}")]
    EndBeforeStart {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// Invalid status value.
    #[error("invalid entry status: {value}")]
    InvalidStatus { value: String },
}

/// Lifecycle status of an entry in the source tracker.
///
/// Jiffy carries this on the wire as `ACTIVE`/`DELETED`; Toggl exports only
/// contain live entries, which map to [`Self::Active`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryStatus {
    Active,
    Deleted,
}

impl EntryStatus {
    /// Wire representation, matching the Jiffy export format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Deleted => "DELETED",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntryStatus {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "DELETED" => Ok(Self::Deleted),
            _ => Err(EntryError::InvalidStatus {
                value: s.to_string(),
            }),
        }
    }
}

/// A single tracked time entry in canonical form.
///
/// Constructed once per input record and immutable thereafter. Instants are
/// UTC; projection into a display timezone happens at emission via
/// [`crate::ZoneSpec`]. An entry without an end instant is *open* (still
/// running when the export was taken) and has no duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEntry {
    /// Free-text note attached to the entry.
    pub description: String,
    /// Project name; empty when the source has no project.
    pub project: String,
    /// Client name; empty when unresolvable.
    pub client: String,
    /// When tracking started.
    pub start: DateTime<Utc>,
    /// When tracking stopped, or `None` for an open entry.
    pub end: Option<DateTime<Utc>>,
    /// Tags attached to the entry.
    pub tags: Vec<String>,
    /// Lifecycle status in the source tracker.
    pub status: EntryStatus,
}

impl TimeEntry {
    /// Creates an entry, rejecting an end instant earlier than the start.
    pub fn new(
        description: impl Into<String>,
        project: impl Into<String>,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
        status: EntryStatus,
    ) -> Result<Self, EntryError> {
        if let Some(end) = end {
            if end < start {
                return Err(EntryError::EndBeforeStart { start, end });
            }
        }
        Ok(Self {
            description: description.into(),
            project: project.into(),
            client: String::new(),
            start,
            end,
            tags: Vec::new(),
            status,
        })
    }

    /// Sets the client name.
    #[must_use]
    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = client.into();
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Elapsed time, or `None` for an open entry.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.end.map(|end| end - self.start)
    }

    /// Whether the entry was still running when exported.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.end.is_none()
    }
}
