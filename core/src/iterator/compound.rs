// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::sync::Arc;

use jiff::tz::TimeZone;

use crate::iterator::{RDateIterator, RRuleIterator, RecurrenceIterator};
use crate::predicate::Predicate;
use crate::rule::Rule;
use crate::tz::to_utc;
use crate::value::{DateValue, Period};

/// Merges inclusion iterators into one ascending, duplicate-free stream and
/// drops what the exclusions produce or match.
pub struct CompoundIterator {
    inclusions: Vec<Box<dyn RecurrenceIterator>>,
    exclusions: Vec<Box<dyn RecurrenceIterator>>,
    excluded: Predicate<DateValue>,
    pending: Option<DateValue>,
    last: Option<DateValue>,
}

impl CompoundIterator {
    /// An empty iterator; add sources with the builder methods.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inclusions: Vec::new(),
            exclusions: Vec::new(),
            excluded: Predicate::AlwaysFalse,
            pending: None,
            last: None,
        }
    }

    /// Add the occurrences of `iter`, as RRULE or RDATE do.
    #[must_use]
    pub fn include(mut self, iter: impl RecurrenceIterator + 'static) -> Self {
        self.inclusions.push(Box::new(iter));
        self
    }

    /// Drop the occurrences of `iter`, as EXRULE does.
    #[must_use]
    pub fn exclude(mut self, iter: impl RecurrenceIterator + 'static) -> Self {
        self.exclusions.push(Box::new(iter));
        self
    }

    /// Drop the occurrences matching `predicate`, as EXDATE does.
    #[must_use]
    pub fn exclude_matching(mut self, predicate: Predicate<DateValue>) -> Self {
        let excluded = std::mem::replace(&mut self.excluded, Predicate::AlwaysFalse);
        self.excluded = Predicate::or([excluded, predicate]);
        self
    }

    fn compute_next(&mut self) {
        while self.pending.is_none() {
            let Some(next) = self.inclusions.iter_mut().filter_map(|it| it.peek()).min() else {
                return;
            };
            for it in &mut self.inclusions {
                if it.peek() == Some(next) {
                    it.next();
                }
            }

            if self.last.is_some_and(|last| next <= last) || self.excluded.matches(&next) {
                continue;
            }
            let dropped = self.exclusions.iter_mut().any(|ex| {
                ex.advance_to(&next);
                ex.peek() == Some(next)
            });
            if dropped {
                continue;
            }

            self.last = Some(next);
            self.pending = Some(next);
        }
    }
}

impl Default for CompoundIterator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CompoundIterator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompoundIterator")
            .field("inclusions", &self.inclusions.len())
            .field("exclusions", &self.exclusions.len())
            .field("excluded", &self.excluded)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl Iterator for CompoundIterator {
    type Item = DateValue;

    fn next(&mut self) -> Option<Self::Item> {
        self.compute_next();
        self.pending.take()
    }
}

impl RecurrenceIterator for CompoundIterator {
    fn has_next(&mut self) -> bool {
        self.compute_next();
        self.pending.is_some()
    }

    fn peek(&mut self) -> Option<DateValue> {
        self.compute_next();
        self.pending
    }

    fn advance_to(&mut self, target: &DateValue) {
        match self.peek() {
            Some(pending) if pending < *target => self.pending = None,
            _ => return,
        }
        for it in &mut self.inclusions {
            it.advance_to(target);
        }
    }
}

/// A complete recurrence description: RRULEs and RDATEs minus EXRULEs and
/// EXDATEs, all relative to one start in one time zone.
///
/// The set is immutable once built and every [`RecurrenceSet::iter`] starts
/// afresh. RDATE and EXDATE values are local times in the set's time zone.
#[derive(Debug, Clone)]
pub struct RecurrenceSet {
    start: DateValue,
    tz: TimeZone,
    rrules: Vec<Arc<Rule>>,
    rdates: Vec<DateValue>,
    rdate_periods: Vec<Period>,
    exrules: Vec<Arc<Rule>>,
    exdates: Vec<DateValue>,
}

impl RecurrenceSet {
    /// An empty set anchored at the local value `start`.
    #[must_use]
    pub fn new(start: DateValue, tz: TimeZone) -> Self {
        Self {
            start,
            tz,
            rrules: Vec::new(),
            rdates: Vec::new(),
            rdate_periods: Vec::new(),
            exrules: Vec::new(),
            exdates: Vec::new(),
        }
    }

    /// Add an RRULE.
    #[must_use]
    pub fn rrule(mut self, rule: impl Into<Arc<Rule>>) -> Self {
        self.rrules.push(rule.into());
        self
    }

    /// Add RDATE values.
    #[must_use]
    pub fn rdates(mut self, values: impl IntoIterator<Item = DateValue>) -> Self {
        self.rdates.extend(values);
        self
    }

    /// Add an RDATE period; it contributes its start.
    #[must_use]
    pub fn rdate_period(mut self, period: Period) -> Self {
        self.rdate_periods.push(period);
        self
    }

    /// Add an EXRULE.
    #[must_use]
    pub fn exrule(mut self, rule: impl Into<Arc<Rule>>) -> Self {
        self.exrules.push(rule.into());
        self
    }

    /// Add EXDATE values.
    #[must_use]
    pub fn exdates(mut self, values: impl IntoIterator<Item = DateValue>) -> Self {
        self.exdates.extend(values);
        self
    }

    /// The start, in local time
    #[must_use]
    pub fn start(&self) -> DateValue {
        self.start
    }

    /// The time zone of the start and of RDATE/EXDATE values
    #[must_use]
    pub fn time_zone(&self) -> &TimeZone {
        &self.tz
    }

    /// The RRULEs
    #[must_use]
    pub fn rrules(&self) -> &[Arc<Rule>] {
        &self.rrules
    }

    /// The RDATE values
    #[must_use]
    pub fn rdate_values(&self) -> &[DateValue] {
        &self.rdates
    }

    /// The RDATE periods
    #[must_use]
    pub fn rdate_periods(&self) -> &[Period] {
        &self.rdate_periods
    }

    /// The EXRULEs
    #[must_use]
    pub fn exrules(&self) -> &[Arc<Rule>] {
        &self.exrules
    }

    /// The EXDATE values
    #[must_use]
    pub fn exdate_values(&self) -> &[DateValue] {
        &self.exdates
    }

    /// A fresh iterator over the whole set.
    #[must_use]
    pub fn iter(&self) -> CompoundIterator {
        let tz = &self.tz;
        let mut iter = CompoundIterator::new();
        for rule in &self.rrules {
            iter = iter.include(RRuleIterator::new(rule, self.start, tz));
        }

        let period_starts = self.rdate_periods.iter().filter_map(Period::start);
        let rdates: Vec<_> = self
            .rdates
            .iter()
            .copied()
            .chain(period_starts)
            .map(|v| to_utc(v, tz))
            .collect();
        if !rdates.is_empty() {
            iter = iter.include(RDateIterator::new(rdates));
        }

        for rule in &self.exrules {
            iter = iter.exclude(RRuleIterator::new(rule, self.start, tz));
        }
        if !self.exdates.is_empty() {
            let exdates = self.exdates.iter().map(|&v| to_utc(v, tz));
            iter = iter.exclude_matching(Predicate::one_of(exdates.collect::<Vec<_>>()));
        }
        iter
    }
}

impl IntoIterator for &RecurrenceSet {
    type Item = DateValue;
    type IntoIter = CompoundIterator;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{Frequency, Weekday};

    fn dates(days: &[i32]) -> Vec<DateValue> {
        days.iter().map(|&d| DateValue::date(2006, 1, d)).collect()
    }

    #[test]
    fn merges_inclusions_without_duplicates() {
        let it = CompoundIterator::new()
            .include(RDateIterator::new(dates(&[1, 3, 5])))
            .include(RDateIterator::new(dates(&[2, 3, 6])));
        assert_eq!(it.collect::<Vec<_>>(), dates(&[1, 2, 3, 5, 6]));
    }

    #[test]
    fn drops_exclusions() {
        let it = CompoundIterator::new()
            .include(RDateIterator::new(dates(&[1, 2, 3, 4, 5])))
            .exclude(RDateIterator::new(dates(&[2, 4])))
            .exclude_matching(Predicate::one_of(dates(&[5])));
        assert_eq!(it.collect::<Vec<_>>(), dates(&[1, 3]));
    }

    #[test]
    fn advances_every_inclusion() {
        let mut it = CompoundIterator::new()
            .include(RDateIterator::new(dates(&[1, 4, 7])))
            .include(RDateIterator::new(dates(&[2, 5, 8])));
        it.advance_to(&DateValue::date(2006, 1, 5));
        it.advance_to(&DateValue::date(2006, 1, 5));
        assert_eq!(it.collect::<Vec<_>>(), dates(&[5, 7, 8]));
    }

    #[test]
    fn combines_rules_and_dates() {
        let weekly = Rule::builder(Frequency::Weekly)
            .by_day([Weekday::Monday])
            .count(3)
            .build()
            .unwrap();
        // 2006-01-02 is a Monday
        let set = RecurrenceSet::new(DateValue::date(2006, 1, 2), TimeZone::UTC)
            .rrule(weekly)
            .rdates(dates(&[4]))
            .rdate_period(Period::new(Some(DateValue::date(2006, 1, 20)), None))
            .exdates(dates(&[9]));
        assert_eq!(set.iter().collect::<Vec<_>>(), dates(&[2, 4, 16, 20]));
        assert_eq!(set.iter().collect::<Vec<_>>(), dates(&[2, 4, 16, 20]));
    }

    #[test]
    fn excludes_rule_occurrences() {
        let daily = Rule::builder(Frequency::Daily).count(7).build().unwrap();
        let even = Rule::builder(Frequency::Daily).interval(2).build().unwrap();
        let set = RecurrenceSet::new(DateValue::date(2006, 1, 1), TimeZone::UTC)
            .rrule(daily)
            .exrule(even);
        assert_eq!((&set).into_iter().collect::<Vec<_>>(), dates(&[2, 4, 6]));
    }
}
