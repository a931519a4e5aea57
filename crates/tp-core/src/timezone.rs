//! Timezone resolution and instant projection.
//!
//! Source exports and CLI flags name timezones two ways: IANA identifiers
//! (`Asia/Bangkok`) and GMT offsets (`GMT+07:00`). Both parse into a
//! [`ZoneSpec`], which projects canonical UTC instants to local wall-clock
//! time for emission and resolves local wall-clock time back to UTC when
//! reading sources that store naive timestamps.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, FixedOffset, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

/// Timezone parsing errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeZoneError {
    /// Not an IANA name or GMT offset.
    #[error("unrecognized timezone: {name}")]
    Unrecognized { name: String },

    /// A GMT offset that could not be parsed or is out of range.
    #[error("invalid GMT offset: {offset}")]
    InvalidOffset { offset: String },
}

/// A timezone given as an IANA name or a fixed GMT offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneSpec {
    /// An IANA zone (DST-aware).
    Named(Tz),
    /// A fixed `GMT±HH:MM` offset.
    Fixed(FixedOffset),
}

impl ZoneSpec {
    /// Projects a UTC instant to wall-clock time in this zone.
    #[must_use]
    pub fn to_local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Self::Named(tz) => instant.with_timezone(tz).naive_local(),
            Self::Fixed(offset) => instant.with_timezone(offset).naive_local(),
        }
    }

    /// Resolves wall-clock time in this zone to a UTC instant.
    ///
    /// Ambiguous local times (DST fall-back) resolve to the earlier instant.
    /// Nonexistent local times (DST spring-forward gap) shift forward an
    /// hour, which is guaranteed to land on a valid wall-clock time.
    #[must_use]
    pub fn from_local(&self, local: NaiveDateTime) -> DateTime<Utc> {
        match self {
            Self::Named(tz) => resolve_local(tz, local),
            Self::Fixed(offset) => resolve_local(offset, local),
        }
    }
}

fn resolve_local<T: TimeZone>(tz: &T, local: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        LocalResult::None => {
            let shifted = local + Duration::hours(1);
            match tz.from_local_datetime(&shifted) {
                LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
                    dt.with_timezone(&Utc)
                }
                // A one-hour gap is the largest chrono-tz knows about, so
                // this arm is unreachable in practice; treat as UTC.
                LocalResult::None => Utc.from_utc_datetime(&local),
            }
        }
    }
}

impl fmt::Display for ZoneSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(tz) => f.write_str(tz.name()),
            Self::Fixed(offset) => write!(f, "GMT{offset}"),
        }
    }
}

impl FromStr for ZoneSpec {
    type Err = TimeZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if let Some(offset) = name.strip_prefix("GMT") {
            return parse_gmt_offset(offset).map(Self::Fixed);
        }
        name.parse::<Tz>()
            .map(Self::Named)
            .map_err(|_| TimeZoneError::Unrecognized {
                name: name.to_string(),
            })
    }
}

/// Parses the offset part of `GMT+07:00` / `GMT-05:30` / bare `GMT`.
fn parse_gmt_offset(offset: &str) -> Result<FixedOffset, TimeZoneError> {
    let invalid = || TimeZoneError::InvalidOffset {
        offset: format!("GMT{offset}"),
    };

    if offset.is_empty() {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let sign = match offset.as_bytes()[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return Err(invalid()),
    };

    let mut parts = offset[1..].splitn(2, ':');
    let hours: i32 = parts
        .next()
        .unwrap_or("")
        .parse()
        .map_err(|_| invalid())?;
    let minutes: i32 = match parts.next() {
        Some(m) => m.parse().map_err(|_| invalid())?,
        None => 0,
    };
    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}
