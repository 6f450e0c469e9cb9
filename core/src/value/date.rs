// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

use crate::rule::Weekday;
use crate::value::calendar::{days_before_month, days_from_civil, weekday_from_days};

/// A calendar date, with or without a time of day.
///
/// Fields are not validated on construction, so a value may hold
/// out-of-range fields until it passes through [`DtBuilder::normalize`].
/// Calendar queries such as [`DateValue::weekday`] assume canonical fields.
///
/// Values are totally ordered: the date part is compared first, and on the
/// same date a [`DateValue::Date`] sorts before any [`DateValue::DateTime`].
/// Equality follows the ordering, so a date never equals a date-time, even
/// one at midnight.
///
/// [`DtBuilder::normalize`]: crate::DtBuilder::normalize
#[derive(Debug, Clone, Copy)]
pub enum DateValue {
    /// A date without a time of day.
    Date {
        /// Year
        year: i32,
        /// Month, 1-12 when canonical
        month: i32,
        /// Day of month, 1-31 when canonical
        day: i32,
    },

    /// A date with a time of day.
    DateTime {
        /// Year
        year: i32,
        /// Month, 1-12 when canonical
        month: i32,
        /// Day of month, 1-31 when canonical
        day: i32,
        /// Hour, 0-23 when canonical
        hour: i32,
        /// Minute, 0-59 when canonical
        minute: i32,
        /// Second, 0-59 when canonical
        second: i32,
    },
}

impl DateValue {
    /// Create a date without a time of day.
    #[must_use]
    pub const fn date(year: i32, month: i32, day: i32) -> Self {
        Self::Date { year, month, day }
    }

    /// Create a date with a time of day.
    #[must_use]
    pub const fn date_time(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
    ) -> Self {
        Self::DateTime {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Year
    #[must_use]
    pub const fn year(&self) -> i32 {
        match *self {
            Self::Date { year, .. } | Self::DateTime { year, .. } => year,
        }
    }

    /// Month
    #[must_use]
    pub const fn month(&self) -> i32 {
        match *self {
            Self::Date { month, .. } | Self::DateTime { month, .. } => month,
        }
    }

    /// Day of month
    #[must_use]
    pub const fn day(&self) -> i32 {
        match *self {
            Self::Date { day, .. } | Self::DateTime { day, .. } => day,
        }
    }

    /// The `(hour, minute, second)` of a date-time, `None` for a date.
    #[must_use]
    pub const fn time(&self) -> Option<(i32, i32, i32)> {
        match *self {
            Self::Date { .. } => None,
            Self::DateTime {
                hour,
                minute,
                second,
                ..
            } => Some((hour, minute, second)),
        }
    }

    /// Whether the value carries a time of day.
    #[must_use]
    pub const fn is_timed(&self) -> bool {
        matches!(self, Self::DateTime { .. })
    }

    /// Whether the value is a date-time at 00:00:00.
    #[must_use]
    pub const fn is_midnight(&self) -> bool {
        matches!(self.time(), Some((0, 0, 0)))
    }

    /// The date part, dropping any time of day.
    #[must_use]
    pub const fn to_date(&self) -> Self {
        Self::date(self.year(), self.month(), self.day())
    }

    /// The same date at the given time of day.
    #[must_use]
    pub const fn at_time(&self, hour: i32, minute: i32, second: i32) -> Self {
        Self::date_time(
            self.year(),
            self.month(),
            self.day(),
            hour,
            minute,
            second,
        )
    }

    /// Day of the week.
    #[must_use]
    pub const fn weekday(&self) -> Weekday {
        weekday_from_days(self.day_number())
    }

    /// 1-based day of the year.
    #[must_use]
    pub const fn day_of_year(&self) -> i32 {
        days_before_month(self.year(), self.month()) + self.day()
    }

    /// Days since 1970-01-01.
    pub(crate) const fn day_number(&self) -> i64 {
        days_from_civil(self.year(), self.month(), self.day())
    }

    /// Seconds since 1970-01-01T00:00:00, a date counting as midnight.
    pub(crate) const fn second_number(&self) -> i64 {
        let (hour, minute, second) = match self.time() {
            Some(time) => time,
            None => (0, 0, 0),
        };
        self.day_number() * 86_400 + (hour * 3600 + minute * 60 + second) as i64
    }

    /// Ordered key packing `(year, month, day)`.
    const fn date_key(&self) -> i64 {
        (self.year() as i64) * 512 + (self.month() as i64) * 32 + self.day() as i64
    }

    /// Ordered key packing `(hour, minute, second)`, `None` for a date.
    const fn time_key(&self) -> Option<i64> {
        match self.time() {
            Some((hour, minute, second)) => {
                Some((hour as i64) * 4096 + (minute as i64) * 64 + second as i64)
            }
            None => None,
        }
    }
}

impl Ord for DateValue {
    fn cmp(&self, other: &Self) -> Ordering {
        // `None < Some(_)`: a date sorts before any date-time on that day
        self.date_key()
            .cmp(&other.date_key())
            .then_with(|| self.time_key().cmp(&other.time_key()))
    }
}

impl PartialOrd for DateValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for DateValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DateValue {}

impl Hash for DateValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.date_key().hash(state);
        self.time_key().hash(state);
    }
}

/// Formats as iCalendar basic format, `YYYYMMDD` or `YYYYMMDDTHHMMSS`.
impl Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year(), self.month(), self.day())?;
        if let Some((hour, minute, second)) = self.time() {
            write!(f, "T{hour:02}{minute:02}{second:02}")?;
        }
        Ok(())
    }
}
