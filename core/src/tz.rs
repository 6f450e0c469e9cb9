// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Wall-clock conversions between a local time zone and UTC.
//!
//! Date-only values carry no instant and pass through unchanged.

use jiff::Timestamp;
use jiff::civil;
use jiff::tz::{AmbiguousOffset, TimeZone};

use crate::value::DateValue;
use crate::value::calendar::civil_from_days;

/// Read a local wall-clock value in `tz` and express it in UTC.
///
/// Times in a DST gap resolve forward, repeated times resolve to the earlier
/// instant. A value jiff cannot place is kept as if it were already UTC.
pub(crate) fn to_utc(value: DateValue, tz: &TimeZone) -> DateValue {
    if !value.is_timed() {
        return value;
    }
    if let Ok(offset) = tz.to_fixed_offset() {
        return shift_seconds(value, -i64::from(offset.seconds()));
    }

    let dt = match to_civil(value) {
        Ok(dt) => dt,
        Err(err) => {
            tracing::warn!(%value, %err, "local time out of range, reading it as UTC");
            return value;
        }
    };
    let ambiguous = tz.to_ambiguous_timestamp(dt);
    if let AmbiguousOffset::Gap { .. } = ambiguous.offset() {
        tracing::debug!(%value, "local time falls in a gap, shifting forward");
    }
    match ambiguous.compatible() {
        Ok(ts) => from_seconds(ts.as_second()),
        Err(err) => {
            tracing::warn!(%value, %err, "cannot map local time to UTC, reading it as UTC");
            value
        }
    }
}

/// Express a UTC value as local wall-clock time in `tz`.
pub(crate) fn from_utc(value: DateValue, tz: &TimeZone) -> DateValue {
    if !value.is_timed() {
        return value;
    }
    if let Ok(offset) = tz.to_fixed_offset() {
        return shift_seconds(value, i64::from(offset.seconds()));
    }

    match Timestamp::from_second(value.second_number()) {
        Ok(ts) => {
            let dt = ts.to_zoned(tz.clone()).datetime();
            DateValue::date_time(
                i32::from(dt.year()),
                i32::from(dt.month()),
                i32::from(dt.day()),
                i32::from(dt.hour()),
                i32::from(dt.minute()),
                i32::from(dt.second()),
            )
        }
        Err(err) => {
            tracing::warn!(%value, %err, "UTC time out of range, keeping it as local time");
            value
        }
    }
}

fn to_civil(value: DateValue) -> Result<civil::DateTime, jiff::Error> {
    let (hour, minute, second) = value.time().unwrap_or((0, 0, 0));
    civil::DateTime::new(
        // Years beyond i16 are outside of jiff's range as well
        i16::try_from(value.year()).unwrap_or(i16::MAX),
        value.month() as i8,
        value.day() as i8,
        hour as i8,
        minute as i8,
        second as i8,
        0,
    )
}

fn shift_seconds(value: DateValue, delta: i64) -> DateValue {
    if delta == 0 {
        return value;
    }
    from_seconds(value.second_number() + delta)
}

/// Date-time of a count of seconds since 1970-01-01T00:00:00.
pub(crate) fn from_seconds(seconds: i64) -> DateValue {
    let (year, month, day) = civil_from_days(seconds.div_euclid(86_400));
    let secs = seconds.rem_euclid(86_400) as i32;
    DateValue::date_time(year, month, day, secs / 3600, secs / 60 % 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_dates_through() {
        let tz = TimeZone::get("America/New_York").unwrap();
        let value = DateValue::date(2006, 1, 1);
        assert_eq!(to_utc(value, &tz), value);
        assert_eq!(from_utc(value, &tz), value);
    }

    #[test]
    fn leaves_utc_unchanged() {
        let value = DateValue::date_time(2006, 1, 1, 22, 0, 0);
        assert_eq!(to_utc(value, &TimeZone::UTC), value);
    }

    #[test]
    fn applies_fixed_offsets() {
        let tz = TimeZone::fixed(jiff::tz::offset(8));
        let value = DateValue::date_time(2006, 1, 1, 2, 0, 0);
        let utc = to_utc(value, &tz);
        assert_eq!(utc, DateValue::date_time(2005, 12, 31, 18, 0, 0));
        assert_eq!(from_utc(utc, &tz), value);
    }

    #[test]
    fn follows_daylight_saving_rules() {
        let tz = TimeZone::get("America/New_York").unwrap();
        let winter = DateValue::date_time(2006, 1, 15, 9, 0, 0);
        let summer = DateValue::date_time(2006, 7, 15, 9, 0, 0);
        assert_eq!(
            to_utc(winter, &tz),
            DateValue::date_time(2006, 1, 15, 14, 0, 0)
        );
        assert_eq!(
            to_utc(summer, &tz),
            DateValue::date_time(2006, 7, 15, 13, 0, 0)
        );
        assert_eq!(from_utc(to_utc(summer, &tz), &tz), summer);
    }

    #[test]
    fn resolves_gap_forward() {
        // 2006-04-02T02:30 does not exist in New York
        let tz = TimeZone::get("America/New_York").unwrap();
        let value = DateValue::date_time(2006, 4, 2, 2, 30, 0);
        assert_eq!(
            to_utc(value, &tz),
            DateValue::date_time(2006, 4, 2, 7, 30, 0)
        );
    }
}
