// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Bridges between [`DateValue`] and `jiff`.
//!
//! Timestamps are read in UTC. A UTC midnight maps back to a date-only
//! value, so dates survive a round trip through [`jiff::Timestamp`].

use jiff::Timestamp;
use jiff::civil;
use jiff::tz::TimeZone;

use crate::error::Error;
use crate::iterator::{RRuleIterator, RecurrenceIterable, RecurrenceIterator};
use crate::tz::{from_seconds, to_utc};
use crate::value::DateValue;

impl From<civil::Date> for DateValue {
    fn from(date: civil::Date) -> Self {
        DateValue::date(
            i32::from(date.year()),
            i32::from(date.month()),
            i32::from(date.day()),
        )
    }
}

/// Sub-second precision is dropped.
impl From<civil::DateTime> for DateValue {
    fn from(dt: civil::DateTime) -> Self {
        DateValue::date_time(
            i32::from(dt.year()),
            i32::from(dt.month()),
            i32::from(dt.day()),
            i32::from(dt.hour()),
            i32::from(dt.minute()),
            i32::from(dt.second()),
        )
    }
}

/// A date-only value converts to midnight.
impl TryFrom<DateValue> for civil::DateTime {
    type Error = Error;

    fn try_from(value: DateValue) -> Result<Self, Self::Error> {
        let (hour, minute, second) = value.time().unwrap_or((0, 0, 0));
        let dt = civil::DateTime::new(
            i16::try_from(value.year()).unwrap_or(i16::MAX),
            narrow(value.month()),
            narrow(value.day()),
            narrow(hour),
            narrow(minute),
            narrow(second),
            0,
        )?;
        Ok(dt)
    }
}

/// Saturate into `i8` so that jiff reports the out-of-range field. Years
/// saturate the same way into `i16`.
fn narrow(field: i32) -> i8 {
    i8::try_from(field).unwrap_or(i8::MAX)
}

impl DateValue {
    /// The instant of this value read as UTC, a date counting as midnight.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] when jiff cannot represent the instant.
    pub fn to_timestamp(&self) -> Result<Timestamp, Error> {
        Ok(Timestamp::from_second(self.second_number())?)
    }

    /// This value read as wall-clock time in `tz`, expressed in UTC.
    ///
    /// Dates are returned as they are. Times in a DST gap resolve forward.
    #[must_use]
    pub fn local_to_utc(&self, tz: &TimeZone) -> Self {
        to_utc(*self, tz)
    }

    /// The UTC value of `ts`; exact midnights become date-only values.
    #[must_use]
    pub fn from_timestamp(ts: Timestamp) -> Self {
        let value = from_seconds(ts.as_second());
        if value.is_midnight() {
            value.to_date()
        } else {
            value
        }
    }
}

/// A [`RecurrenceIterator`] viewed as a sequence of [`Timestamp`]s.
#[derive(Debug, Clone)]
pub struct TimestampIterator<I> {
    inner: I,
}

impl<I: RecurrenceIterator> TimestampIterator<I> {
    /// Wrap `inner`.
    pub fn new(inner: I) -> Self {
        Self { inner }
    }

    /// Whether another occurrence exists and has a timestamp.
    pub fn has_next(&mut self) -> bool {
        self.inner
            .peek()
            .is_some_and(|value| value.to_timestamp().is_ok())
    }

    /// Consume the next occurrence.
    ///
    /// The occurrence is only consumed once it converts, so on error the
    /// iterator is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchElement`] when exhausted, or
    /// [`Error::OutOfRange`] when the occurrence has no timestamp.
    pub fn try_next(&mut self) -> Result<Timestamp, Error> {
        let value = self.inner.peek().ok_or(Error::NoSuchElement)?;
        let ts = value.to_timestamp()?;
        self.inner.next();
        Ok(ts)
    }

    /// Skip every occurrence strictly before `target`.
    pub fn advance_to(&mut self, target: Timestamp) {
        self.inner.advance_to(&DateValue::from_timestamp(target));
    }

    /// The wrapped iterator.
    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I: RecurrenceIterator> Iterator for TimestampIterator<I> {
    type Item = Timestamp;

    /// Stops at the first occurrence without a timestamp, which stays
    /// pending for [`TimestampIterator::try_next`] to report.
    fn next(&mut self) -> Option<Self::Item> {
        match self.try_next() {
            Ok(ts) => Some(ts),
            Err(Error::NoSuchElement) => None,
            Err(err) => {
                tracing::warn!(%err, "occurrence out of timestamp range, stopping");
                None
            }
        }
    }
}

/// A restartable recurrence of [`Timestamp`]s.
#[derive(Debug, Clone)]
pub struct TimestampIterable {
    iterable: RecurrenceIterable,
}

impl TimestampIterable {
    /// Wrap `iterable`.
    #[must_use]
    pub fn new(iterable: RecurrenceIterable) -> Self {
        Self { iterable }
    }

    /// A fresh iterator from the first occurrence.
    #[must_use]
    pub fn iter(&self) -> TimestampIterator<RRuleIterator> {
        TimestampIterator::new(self.iterable.iter())
    }
}

impl From<RecurrenceIterable> for TimestampIterable {
    fn from(iterable: RecurrenceIterable) -> Self {
        Self::new(iterable)
    }
}

impl IntoIterator for &TimestampIterable {
    type Item = Timestamp;
    type IntoIter = TimestampIterator<RRuleIterator>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// View any recurrence iterator as a sequence of [`Timestamp`]s.
pub fn create_date_iterator<I: RecurrenceIterator>(iter: I) -> TimestampIterator<I> {
    TimestampIterator::new(iter)
}
