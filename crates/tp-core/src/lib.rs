//! Core conversion logic for time-tracking exports.
//!
//! This crate contains the shared pipeline for converting between export
//! formats:
//! - Normalization: heterogeneous time representations (epoch milliseconds,
//!   localized date-time strings) into canonical UTC instants
//! - Filtering: date-range and status predicates over canonical entries
//! - Mapping: projection into the Toggl or Clockify CSV schema
//!
//! Formats are parsed from and emitted to `Read`/`Write` implementations;
//! file handling and flag parsing live in the CLI crate.

pub mod clockify;
pub mod duration;
mod entry;
mod filter;
pub mod jiffy;
mod project_map;
mod timezone;
pub mod toggl;

pub use entry::{EntryError, EntryStatus, TimeEntry};
pub use filter::{DateRange, filter_entries};
pub use project_map::{ProjectMap, ProjectMapError};
pub use timezone::{TimeZoneError, ZoneSpec};
