//! Date-range and status filtering over canonical entries.

use chrono::NaiveDate;

use crate::entry::{EntryStatus, TimeEntry};
use crate::timezone::ZoneSpec;

/// An inclusive date range with optional bounds.
///
/// A missing bound means no filtering on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Whether the given date falls inside the range (bounds inclusive).
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        if self.from.is_some_and(|from| date < from) {
            return false;
        }
        if self.to.is_some_and(|to| date > to) {
            return false;
        }
        true
    }

    /// Whether both bounds are absent.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Retains active entries whose start date (in `zone`) falls inside `range`.
///
/// Input order is preserved.
#[must_use]
pub fn filter_entries(
    mut entries: Vec<TimeEntry>,
    range: &DateRange,
    zone: &ZoneSpec,
) -> Vec<TimeEntry> {
    entries.retain(|entry| {
        entry.status == EntryStatus::Active && range.contains(zone.to_local(entry.start).date())
    });
    entries
}
