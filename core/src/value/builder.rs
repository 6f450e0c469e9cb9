// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::value::DateValue;
use crate::value::calendar::{civil_from_days, days_from_civil};

/// A mutable date-time register for calendar arithmetic.
///
/// Fields may be pushed out of range freely (`day += 40`, `month -= 13`,
/// `second = -1`); [`DtBuilder::normalize`] carries and borrows them back
/// into a canonical calendar position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DtBuilder {
    /// Year
    pub year: i32,

    /// Month, any value before normalization
    pub month: i32,

    /// Day of month, any value before normalization
    pub day: i32,

    /// Hour, any value before normalization
    pub hour: i32,

    /// Minute, any value before normalization
    pub minute: i32,

    /// Second, any value before normalization
    pub second: i32,
}

impl DtBuilder {
    /// Create a builder at midnight of the given date.
    #[must_use]
    pub const fn new(year: i32, month: i32, day: i32) -> Self {
        Self {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }

    /// Set the time of day, returning the builder.
    #[must_use]
    pub const fn with_time(mut self, hour: i32, minute: i32, second: i32) -> Self {
        self.hour = hour;
        self.minute = minute;
        self.second = second;
        self
    }

    /// Carry and borrow every field into its canonical range.
    ///
    /// Seconds carry into minutes, minutes into hours and hours into days.
    /// Months carry into years before days are resolved, so the day overflow
    /// is measured against the right month lengths, leap years included.
    pub fn normalize(&mut self) {
        self.minute += self.second.div_euclid(60);
        self.second = self.second.rem_euclid(60);

        self.hour += self.minute.div_euclid(60);
        self.minute = self.minute.rem_euclid(60);

        self.day += self.hour.div_euclid(24);
        self.hour = self.hour.rem_euclid(24);

        let month0 = self.month - 1;
        self.year += month0.div_euclid(12);
        self.month = month0.rem_euclid(12) + 1;

        // Resolve the day as an offset from the first of the month
        let days = days_from_civil(self.year, self.month, 1) + i64::from(self.day) - 1;
        let (year, month, day) = civil_from_days(days);
        self.year = year;
        self.month = month;
        self.day = day;
    }

    /// The normalized date, without time of day. The builder is unchanged.
    #[must_use]
    pub fn to_date(&self) -> DateValue {
        let mut dt = *self;
        dt.normalize();
        DateValue::date(dt.year, dt.month, dt.day)
    }

    /// The normalized date-time. The builder is unchanged.
    #[must_use]
    pub fn to_date_time(&self) -> DateValue {
        let mut dt = *self;
        dt.normalize();
        DateValue::date_time(dt.year, dt.month, dt.day, dt.hour, dt.minute, dt.second)
    }

    /// The normalized value, timed when `timed` is set.
    #[must_use]
    pub fn to_value(&self, timed: bool) -> DateValue {
        if timed {
            self.to_date_time()
        } else {
            self.to_date()
        }
    }
}

impl From<DateValue> for DtBuilder {
    fn from(value: DateValue) -> Self {
        let (hour, minute, second) = value.time().unwrap_or((0, 0, 0));
        Self::new(value.year(), value.month(), value.day()).with_time(hour, minute, second)
    }
}
