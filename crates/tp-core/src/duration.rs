//! Duration parsing and formatting for CSV emission.

use chrono::Duration;
use thiserror::Error;

/// Duration parsing errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DurationError {
    /// Not a `H:MM:SS` string.
    #[error("invalid duration {value:?}: expected H:MM:SS")]
    Invalid { value: String },
}

/// Formats a duration as `H:MM:SS` with unpadded hours.
///
/// Negative durations render as zero.
#[must_use]
pub fn format_hms(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    format!("{}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

/// Formats a duration as decimal hours with two digits, e.g. `2.50`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_decimal_hours(duration: Duration) -> String {
    let total = duration.num_seconds().max(0);
    format!("{:.2}", total as f64 / 3600.0)
}

/// Parses a `H:MM:SS` duration string, e.g. `1:05:09` or `27:00:00`.
pub fn parse_hms(value: &str) -> Result<Duration, DurationError> {
    let invalid = || DurationError::Invalid {
        value: value.to_string(),
    };

    let mut parts = value.trim().split(':');
    let (Some(h), Some(m), Some(s), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let hours: i64 = h.parse().map_err(|_| invalid())?;
    let minutes: i64 = m.parse().map_err(|_| invalid())?;
    let seconds: i64 = s.parse().map_err(|_| invalid())?;
    if hours < 0 || !(0..60).contains(&minutes) || !(0..60).contains(&seconds) {
        return Err(invalid());
    }

    Ok(Duration::seconds(hours * 3600 + minutes * 60 + seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hms_formatting() {
        insta::assert_snapshot!(format_hms(Duration::seconds(3661)), @"1:01:01");
        insta::assert_snapshot!(format_hms(Duration::seconds(0)), @"0:00:00");
        insta::assert_snapshot!(format_hms(Duration::seconds(45 * 3600 + 59)), @"45:00:59");
    }

    #[test]
    fn negative_duration_formats_as_zero() {
        assert_eq!(format_hms(Duration::seconds(-5)), "0:00:00");
        assert_eq!(format_decimal_hours(Duration::seconds(-5)), "0.00");
    }

    #[test]
    fn decimal_hours_formatting() {
        insta::assert_snapshot!(format_decimal_hours(Duration::seconds(2700)), @"0.75");
        insta::assert_snapshot!(format_decimal_hours(Duration::seconds(9000)), @"2.50");
        insta::assert_snapshot!(format_decimal_hours(Duration::seconds(3600)), @"1.00");
    }

    #[test]
    fn parses_hms() {
        assert_eq!(parse_hms("1:05:09").unwrap(), Duration::seconds(3909));
        assert_eq!(parse_hms("0:00:00").unwrap(), Duration::zero());
        assert_eq!(parse_hms("27:00:00").unwrap(), Duration::hours(27));
    }

    #[test]
    fn parse_and_format_round_trip() {
        for raw in ["0:00:01", "1:05:09", "12:34:56", "100:00:00"] {
            assert_eq!(format_hms(parse_hms(raw).unwrap()), raw);
        }
    }

    #[test]
    fn rejects_malformed_durations() {
        for raw in ["", "1:05", "1:05:09:00", "x:00:00", "1:60:00", "1:00:60", "-1:00:00"] {
            assert!(parse_hms(raw).is_err(), "{raw:?} should be rejected");
        }
    }
}
