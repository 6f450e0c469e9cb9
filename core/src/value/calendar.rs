// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Proleptic Gregorian calendar tables and day-number arithmetic.
//!
//! Day numbers count days since 1970-01-01, which is day 0.

use crate::rule::Weekday;

/// Whether `year` has a February 29th.
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
}

/// Number of days in `month` (1-12) of `year`.
#[must_use]
pub const fn days_in_month(year: i32, month: i32) -> i32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Number of days in `year`, 365 or 366.
#[must_use]
pub const fn days_in_year(year: i32) -> i32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Number of days in `year` before the first day of `month`.
pub(crate) const fn days_before_month(year: i32, month: i32) -> i32 {
    let days = match month {
        1 => 0,
        2 => 31,
        3 => 59,
        4 => 90,
        5 => 120,
        6 => 151,
        7 => 181,
        8 => 212,
        9 => 243,
        10 => 273,
        11 => 304,
        _ => 334,
    };
    if month > 2 && is_leap_year(year) {
        days + 1
    } else {
        days
    }
}

/// Day number of a canonical `(year, month, day)`.
pub(crate) const fn days_from_civil(year: i32, month: i32, day: i32) -> i64 {
    let y = if month <= 2 {
        year as i64 - 1
    } else {
        year as i64
    };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let m = month as i64;
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Canonical `(year, month, day)` of a day number.
pub(crate) const fn civil_from_days(days: i64) -> (i32, i32, i32) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = if month <= 2 {
        yoe + era * 400 + 1
    } else {
        yoe + era * 400
    };
    (year as i32, month as i32, day as i32)
}

/// Weekday of a day number.
pub(crate) const fn weekday_from_days(days: i64) -> Weekday {
    // 1970-01-01 was a Thursday
    Weekday::from_sunday_zero((days + 4).rem_euclid(7) as u8)
}

/// Day number of the first day of week 1 of `year`.
///
/// Weeks begin on `week_start`; week 1 is the first week holding at least
/// four days of the year, i.e. the week containing January 4th.
pub(crate) const fn week_one_start(year: i32, week_start: Weekday) -> i64 {
    let jan4 = days_from_civil(year, 1, 4);
    jan4 - weekday_from_days(jan4).days_since(week_start) as i64
}

/// Week numbering of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WeekNumber {
    /// The year the week belongs to, which may differ from the calendar year
    /// around New Year.
    pub week_year: i32,

    /// 1-based week number within `week_year`.
    pub week: i32,

    /// Number of weeks in `week_year`, 52 or 53.
    pub weeks_in_year: i32,
}

/// Week number of day number `days`, which falls in calendar year `year`.
pub(crate) const fn week_number(days: i64, year: i32, week_start: Weekday) -> WeekNumber {
    let this = week_one_start(year, week_start);
    let (week_year, start, next) = if days < this {
        (year - 1, week_one_start(year - 1, week_start), this)
    } else {
        let next = week_one_start(year + 1, week_start);
        if days >= next {
            (year + 1, next, week_one_start(year + 2, week_start))
        } else {
            (year, this, next)
        }
    };

    WeekNumber {
        week_year,
        week: ((days - start) / 7 + 1) as i32,
        weeks_in_year: ((next - start) / 7) as i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2004));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2006));
        assert!(is_leap_year(-4));
    }

    #[test]
    fn returns_month_lengths() {
        assert_eq!(days_in_month(2006, 2), 28);
        assert_eq!(days_in_month(2008, 2), 29);
        assert_eq!(days_in_month(2006, 4), 30);
        assert_eq!(days_in_month(2006, 12), 31);
        assert_eq!(days_in_year(2008), 366);
    }

    #[test]
    fn converts_day_numbers_both_ways() {
        assert_eq!(days_from_civil(1970, 1, 1), 0);
        assert_eq!(days_from_civil(2000, 3, 1), 11_017);
        assert_eq!(days_from_civil(1969, 12, 31), -1);
        assert_eq!(civil_from_days(0), (1970, 1, 1));
        assert_eq!(civil_from_days(-1), (1969, 12, 31));

        for days in (-800_000..800_000).step_by(97) {
            let (y, m, d) = civil_from_days(days);
            assert_eq!(days_from_civil(y, m, d), days);
        }
    }

    #[test]
    fn computes_weekdays() {
        assert_eq!(weekday_from_days(0), Weekday::Thursday);
        assert_eq!(
            weekday_from_days(days_from_civil(2006, 1, 1)),
            Weekday::Sunday
        );
        assert_eq!(
            weekday_from_days(days_from_civil(1997, 9, 2)),
            Weekday::Tuesday
        );
    }

    #[test]
    fn numbers_weeks_like_iso_8601() {
        // 2005-01-01 is a Saturday belonging to 2004-W53
        let days = days_from_civil(2005, 1, 1);
        let wn = week_number(days, 2005, Weekday::Monday);
        assert_eq!((wn.week_year, wn.week, wn.weeks_in_year), (2004, 53, 53));

        // 2008-12-29 is a Monday belonging to 2009-W01
        let days = days_from_civil(2008, 12, 29);
        let wn = week_number(days, 2008, Weekday::Monday);
        assert_eq!((wn.week_year, wn.week), (2009, 1));

        let days = days_from_civil(2006, 6, 15);
        let wn = week_number(days, 2006, Weekday::Monday);
        assert_eq!((wn.week_year, wn.week, wn.weeks_in_year), (2006, 24, 52));
    }

    #[test]
    fn numbers_weeks_with_sunday_start() {
        // With weeks starting Sunday, 1998-01-04 opens week 1 of 1998
        let days = days_from_civil(1998, 1, 4);
        let wn = week_number(days, 1998, Weekday::Sunday);
        assert_eq!((wn.week_year, wn.week), (1998, 1));

        let days = days_from_civil(1998, 1, 3);
        let wn = week_number(days, 1998, Weekday::Sunday);
        assert_eq!(wn.week_year, 1997);
    }
}
