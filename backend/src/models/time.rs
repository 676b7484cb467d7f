use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Offset applied to capture timestamps in the detection table (UTC+7).
pub const TABLE_UTC_OFFSET_HOURS: i32 = 7;

/// Clock granularity used by a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockFormat {
    /// `HH:MM`
    HourMinute,
    /// `HH:MM:SS`
    HourMinuteSecond,
}

impl ClockFormat {
    /// Placeholder shown for unusable timestamps.
    pub fn zero(&self) -> &'static str {
        match self {
            ClockFormat::HourMinute => "00:00",
            ClockFormat::HourMinuteSecond => "00:00:00",
        }
    }

    fn pattern(&self) -> &'static str {
        match self {
            ClockFormat::HourMinute => "%H:%M",
            ClockFormat::HourMinuteSecond => "%H:%M:%S",
        }
    }
}

/// Convert a Unix timestamp in seconds to a wall-clock string.
///
/// The time is taken in UTC and shifted by `offset_hours`; only the clock
/// fields are shown, so a shift across midnight simply wraps. Missing, zero
/// or non-finite timestamps produce [`ClockFormat::zero`] and a warning.
pub fn format_clock(unix_seconds: Option<f64>, offset_hours: i32, format: ClockFormat) -> String {
    let seconds = match unix_seconds {
        Some(v) if v != 0.0 && v.is_finite() => v,
        other => {
            log::warn!("Invalid unix_timestamp: {:?}", other);
            return format.zero().to_string();
        }
    };

    let millis = (seconds * 1000.0).trunc() as i64;
    let shifted = DateTime::<Utc>::from_timestamp_millis(millis)
        .and_then(|dt| dt.checked_add_signed(Duration::hours(i64::from(offset_hours))));

    match shifted {
        Some(dt) => dt.format(format.pattern()).to_string(),
        None => {
            log::warn!("Out of range unix_timestamp: {}", seconds);
            format.zero().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_format_utc_hour_minute() {
        // 2024-01-01T13:45:30Z
        assert_eq!(
            format_clock(Some(1704116730.0), 0, ClockFormat::HourMinute),
            "13:45"
        );
    }

    #[test]
    fn test_format_with_offset_seconds() {
        assert_eq!(
            format_clock(Some(1704116730.0), 7, ClockFormat::HourMinuteSecond),
            "20:45:30"
        );
    }

    #[test]
    fn test_offset_wraps_past_midnight() {
        // 2024-01-01T20:00:05Z + 7h = 03:00:05 next day
        assert_eq!(
            format_clock(Some(1704139205.0), 7, ClockFormat::HourMinuteSecond),
            "03:00:05"
        );
    }

    #[test]
    fn test_negative_offset_wraps_backwards() {
        // 2024-01-01T01:00:00Z - 3h = 22:00
        assert_eq!(
            format_clock(Some(1704070800.0), -3, ClockFormat::HourMinute),
            "22:00"
        );
    }

    #[test]
    fn test_missing_timestamp_returns_zero_time() {
        assert_eq!(format_clock(None, 0, ClockFormat::HourMinute), "00:00");
        assert_eq!(
            format_clock(None, 7, ClockFormat::HourMinuteSecond),
            "00:00:00"
        );
    }

    #[test]
    fn test_nan_and_zero_return_zero_time() {
        assert_eq!(
            format_clock(Some(f64::NAN), 7, ClockFormat::HourMinuteSecond),
            "00:00:00"
        );
        assert_eq!(format_clock(Some(0.0), 7, ClockFormat::HourMinute), "00:00");
        assert_eq!(
            format_clock(Some(f64::INFINITY), 0, ClockFormat::HourMinute),
            "00:00"
        );
    }

    #[test]
    fn test_fractional_seconds_are_truncated() {
        assert_eq!(
            format_clock(Some(1704116730.999), 0, ClockFormat::HourMinuteSecond),
            "13:45:30"
        );
    }

    #[test]
    fn test_pre_epoch_timestamp() {
        // 1969-12-31T23:00:00Z
        assert_eq!(
            format_clock(Some(-3600.0), 0, ClockFormat::HourMinute),
            "23:00"
        );
    }

    proptest! {
        #[test]
        fn prop_format_is_deterministic(ts in 1.0e9..2.0e9f64, offset in -12i32..14) {
            let first = format_clock(Some(ts), offset, ClockFormat::HourMinuteSecond);
            let second = format_clock(Some(ts), offset, ClockFormat::HourMinuteSecond);
            prop_assert_eq!(first.clone(), second);
            prop_assert_eq!(first.len(), 8);
        }

        #[test]
        fn prop_offset_shifts_hour_modulo_day(ts in 1.0e9..2.0e9f64, offset in 0i32..24) {
            let base = format_clock(Some(ts), 0, ClockFormat::HourMinuteSecond);
            let shifted = format_clock(Some(ts), offset, ClockFormat::HourMinuteSecond);
            let base_hour: i32 = base[..2].parse().unwrap();
            let shifted_hour: i32 = shifted[..2].parse().unwrap();
            prop_assert_eq!((base_hour + offset).rem_euclid(24), shifted_hour);
            prop_assert_eq!(&base[2..], &shifted[2..]);
        }
    }
}
