// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::tz::TimeZone;

use crate::generator::Generator;
use crate::iterator::RecurrenceIterator;
use crate::rule::Rule;
use crate::tz::{from_utc, to_utc};
use crate::value::{DateValue, DtBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Active,
    Exhausted,
}

/// Occurrences of a single rule, bounded by its COUNT or UNTIL.
///
/// COUNT counts every member of the recurrence set, including the ones
/// passed over by [`advance_to`](RecurrenceIterator::advance_to).
#[derive(Debug, Clone)]
pub struct RRuleIterator {
    generator: Generator,
    tz: TimeZone,
    count: Option<u32>,
    /// UTC bound, adjusted to the granularity of the candidates
    until: Option<DateValue>,
    produced: u32,
    pending: Option<DateValue>,
    last: Option<DateValue>,
    state: State,
}

impl RRuleIterator {
    /// Iterate over `rule` from the local value `start` in time zone `tz`.
    #[must_use]
    pub fn new(rule: &Rule, start: DateValue, tz: &TimeZone) -> Self {
        let generator = Generator::new(rule, start);
        let until = rule
            .until()
            .map(|until| match (generator.is_timed(), until.is_timed()) {
                (true, false) => to_utc(until.at_time(23, 59, 59), tz),
                (false, true) => until.to_date(),
                _ => until,
            });

        tracing::debug!(freq = %rule.freq(), %start, "created recurrence iterator");
        Self {
            generator,
            tz: tz.clone(),
            count: rule.count(),
            until,
            produced: 0,
            pending: None,
            last: None,
            state: State::Active,
        }
    }

    fn compute_next(&mut self) {
        while self.pending.is_none() && self.state == State::Active {
            if self.count.is_some_and(|count| self.produced >= count) {
                self.exhaust();
                break;
            }
            let Some(local) = self.generator.next() else {
                self.exhaust();
                break;
            };

            let value = to_utc(local, &self.tz);
            // Gap resolution can fold a local time onto an earlier instant
            if self.last.is_some_and(|last| value <= last) {
                continue;
            }
            if self.until.is_some_and(|until| value > until) {
                self.exhaust();
                break;
            }

            self.produced += 1;
            self.last = Some(value);
            self.pending = Some(value);
        }
    }

    fn exhaust(&mut self) {
        tracing::debug!(produced = self.produced, "recurrence exhausted");
        self.state = State::Exhausted;
    }
}

impl Iterator for RRuleIterator {
    type Item = DateValue;

    fn next(&mut self) -> Option<Self::Item> {
        self.compute_next();
        self.pending.take()
    }
}

impl RecurrenceIterator for RRuleIterator {
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

        // Skipped candidates count against COUNT, so they must be visited
        if self.count.is_none() {
            // Back off a day so a time zone offset never skips past the target
            let local = from_utc(*target, &self.tz);
            let mut back = DtBuilder::from(local);
            back.day -= 1;
            self.generator.fast_forward(back.to_value(local.is_timed()));
        }

        while self.peek().is_some_and(|pending| pending < *target) {
            self.pending = None;
        }
    }
}
