// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Lazy, seekable occurrence iterators.
//!
//! Every iterator here yields strictly ascending [`DateValue`]s in UTC
//! (date-only values are not converted) and supports seeking with
//! [`RecurrenceIterator::advance_to`].

mod compound;
mod rdate;
mod rrule;

use std::sync::Arc;

use jiff::tz::TimeZone;

use crate::error::Error;
use crate::rule::Rule;
use crate::value::DateValue;

pub use compound::{CompoundIterator, RecurrenceSet};
pub use rdate::RDateIterator;
pub use rrule::RRuleIterator;

/// A pull-based iterator over the occurrences of a recurrence.
///
/// Iterators are either active or exhausted; once [`has_next`] returns
/// `false` it keeps returning `false`.
///
/// [`has_next`]: RecurrenceIterator::has_next
pub trait RecurrenceIterator: Iterator<Item = DateValue> {
    /// Compute and buffer the next occurrence, returning whether one exists.
    fn has_next(&mut self) -> bool;

    /// The next occurrence without consuming it.
    fn peek(&mut self) -> Option<DateValue>;

    /// Consume the next occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchElement`] when the iterator is exhausted; the
    /// iterator is left untouched.
    fn try_next(&mut self) -> Result<DateValue, Error> {
        self.next().ok_or(Error::NoSuchElement)
    }

    /// Skip every occurrence strictly before `target`.
    ///
    /// Does nothing when the next occurrence is already at or after
    /// `target`, so repeated calls with the same target are harmless.
    fn advance_to(&mut self, target: &DateValue);

    /// Recurrences are read-only.
    ///
    /// # Errors
    ///
    /// Always returns [`Error::UnsupportedOperation`].
    fn remove(&mut self) -> Result<(), Error> {
        Err(Error::UnsupportedOperation("remove"))
    }
}

impl<I: RecurrenceIterator + ?Sized> RecurrenceIterator for Box<I> {
    fn has_next(&mut self) -> bool {
        (**self).has_next()
    }

    fn peek(&mut self) -> Option<DateValue> {
        (**self).peek()
    }

    fn try_next(&mut self) -> Result<DateValue, Error> {
        (**self).try_next()
    }

    fn advance_to(&mut self, target: &DateValue) {
        (**self).advance_to(target);
    }

    fn remove(&mut self) -> Result<(), Error> {
        (**self).remove()
    }
}

/// A restartable recurrence: each call to [`RecurrenceIterable::iter`]
/// starts a fresh iterator from the beginning.
#[derive(Debug, Clone)]
pub struct RecurrenceIterable {
    rule: Arc<Rule>,
    start: DateValue,
    tz: TimeZone,
}

impl RecurrenceIterable {
    /// Create an iterable over `rule` starting at the local value `start`.
    pub fn new(rule: impl Into<Arc<Rule>>, start: DateValue, tz: TimeZone) -> Self {
        Self {
            rule: rule.into(),
            start,
            tz,
        }
    }

    /// The rule
    #[must_use]
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// The start, in local time
    #[must_use]
    pub fn start(&self) -> DateValue {
        self.start
    }

    /// The time zone of the start
    #[must_use]
    pub fn time_zone(&self) -> &TimeZone {
        &self.tz
    }

    /// A fresh iterator from the first occurrence.
    #[must_use]
    pub fn iter(&self) -> RRuleIterator {
        RRuleIterator::new(&self.rule, self.start, &self.tz)
    }
}

impl IntoIterator for &RecurrenceIterable {
    type Item = DateValue;
    type IntoIter = RRuleIterator;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterate over the occurrences of `rule` from the local value `start` in
/// time zone `tz`.
#[tracing::instrument(level = "debug", skip(tz))]
pub fn create_iterator(rule: &Rule, start: DateValue, tz: &TimeZone) -> RRuleIterator {
    RRuleIterator::new(rule, start, tz)
}

/// A restartable recurrence over `rule` from the local value `start`.
pub fn create_iterable(
    rule: impl Into<Arc<Rule>>,
    start: DateValue,
    tz: TimeZone,
) -> RecurrenceIterable {
    RecurrenceIterable::new(rule, start, tz)
}
