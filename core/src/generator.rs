// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Period-by-period expansion of a rule into local candidates.
//!
//! A generator walks the periods of its frequency (years for YEARLY, months
//! for MONTHLY, and so on), stepping by the rule interval. Each period is
//! expanded into candidate days through the [`DayFilter`], crossed with the
//! period's times of day, reduced by BYSETPOS, and buffered in ascending
//! order. Candidates are local wall-clock values; COUNT and UNTIL are left to
//! the iterator.

mod day;

use std::collections::VecDeque;

use crate::rule::{Frequency, Rule, Weekday};
use crate::value::calendar::{civil_from_days, days_from_civil};
use crate::value::{DateValue, DtBuilder, days_in_month, days_in_year};

use self::day::{DayFilter, satisfies_position};

/// Days in one Gregorian cycle of 400 years, a whole number of weeks.
const DAYS_PER_CYCLE: i64 = 146_097;

/// Expands a rule into ascending local candidates.
#[derive(Debug, Clone)]
pub(crate) struct Generator {
    freq: Frequency,
    interval: i64,
    week_start: Weekday,
    /// Whether candidates carry a time of day
    timed: bool,
    /// First admissible candidate
    start: DateValue,
    /// Start of the next period to expand
    anchor: DtBuilder,
    days: DayFilter,
    /// Hours to expand to, or with HOURLY and finer, hours to keep
    hours: Vec<i32>,
    /// Minutes to expand to, or with MINUTELY and finer, minutes to keep
    minutes: Vec<i32>,
    /// Seconds to expand to, or with SECONDLY, seconds to keep
    seconds: Vec<i32>,
    set_pos: Vec<i32>,
    buffer: VecDeque<DateValue>,
    /// Consecutive periods without a candidate
    empty_periods: i64,
    /// Periods after which the anchor is back at the same place in the
    /// Gregorian cycle
    cycle_periods: i64,
    done: bool,
}

impl Generator {
    pub fn new(rule: &Rule, start: DateValue) -> Self {
        let freq = rule.freq();
        let timed = start.is_timed() || freq < Frequency::Daily || rule.has_time_parts();
        let start = match (timed, start.is_timed()) {
            (true, false) => start.at_time(0, 0, 0),
            _ => start,
        };

        let (hour, minute, second) = start.time().unwrap_or((0, 0, 0));
        let selector = |by: &[i32], own: i32, expands: bool| match by {
            [] if expands => vec![own],
            by => by.to_vec(),
        };

        Self {
            freq,
            interval: i64::from(rule.interval()),
            week_start: rule.week_start(),
            timed,
            start,
            anchor: align(freq, rule.week_start(), start),
            days: DayFilter::new(rule, start),
            hours: selector(rule.by_hour(), hour, freq > Frequency::Hourly),
            minutes: selector(rule.by_minute(), minute, freq > Frequency::Minutely),
            seconds: selector(rule.by_second(), second, freq > Frequency::Secondly),
            set_pos: rule.by_set_pos().to_vec(),
            buffer: VecDeque::new(),
            empty_periods: 0,
            cycle_periods: cycle_periods(freq, i64::from(rule.interval())),
            done: false,
        }
    }

    /// Whether candidates carry a time of day.
    pub fn is_timed(&self) -> bool {
        self.timed
    }

    /// Skip every whole period strictly before the period containing
    /// `target`, a local value.
    pub fn fast_forward(&mut self, target: DateValue) {
        if self.done {
            return;
        }

        let target = align(self.freq, self.week_start, target);
        let units = units_between(self.freq, &self.anchor, &target);
        let periods = units.div_euclid(self.interval);
        if periods > 0 {
            // Buffered candidates all precede the current anchor
            self.buffer.clear();
            self.step(periods);
            self.empty_periods = 0;
        }
    }

    fn fill(&mut self) {
        while self.buffer.is_empty() && !self.done {
            // One more period than the cycle, so the first period is seen
            // again without the start cutting it.
            if self.empty_periods > self.cycle_periods {
                tracing::warn!(
                    freq = %self.freq,
                    periods = self.empty_periods,
                    "no occurrence in a full Gregorian cycle, giving up"
                );
                self.done = true;
                break;
            }

            let (candidates, periods) = match self.freq {
                Frequency::Yearly | Frequency::Monthly | Frequency::Weekly | Frequency::Daily => {
                    (self.expand_days(), 1)
                }
                Frequency::Hourly | Frequency::Minutely | Frequency::Secondly => {
                    self.expand_time()
                }
            };

            let start = self.start;
            let selected: Vec<_> = select_positions(candidates, &self.set_pos)
                .into_iter()
                .filter(|c| *c >= start)
                .collect();
            if selected.is_empty() {
                self.empty_periods = self.empty_periods.saturating_add(periods);
            } else {
                self.empty_periods = 0;
                self.buffer.extend(selected);
            }

            self.step(periods);
        }
    }

    /// Candidates of a DAILY or coarser period.
    fn expand_days(&self) -> Vec<DateValue> {
        let DtBuilder {
            year, month, day, ..
        } = self.anchor;
        let first = days_from_civil(year, month, day);
        let length = match self.freq {
            Frequency::Yearly => days_in_year(year),
            Frequency::Monthly => days_in_month(year, month),
            Frequency::Weekly => 7,
            _ => 1,
        };

        let mut candidates = Vec::new();
        for days in first..first + i64::from(length) {
            if !self.days.matches(days) {
                continue;
            }
            let (year, month, day) = civil_from_days(days);
            let date = DateValue::date(year, month, day);
            if !self.timed {
                candidates.push(date);
                continue;
            }
            for &h in &self.hours {
                for &m in &self.minutes {
                    for &s in &self.seconds {
                        candidates.push(date.at_time(h, m, s));
                    }
                }
            }
        }
        candidates
    }

    /// Candidates of an HOURLY or finer period, and the number of periods to
    /// step past it. Periods on rejected days, hours or minutes are skipped
    /// as a whole run.
    fn expand_time(&self) -> (Vec<DateValue>, i64) {
        let DtBuilder {
            year,
            month,
            day,
            hour,
            minute,
            second,
        } = self.anchor;

        if !self.days.matches(days_from_civil(year, month, day)) {
            return (Vec::new(), self.periods_until_boundary(86_400));
        }

        let date = DateValue::date(year, month, day);
        let candidates = match self.freq {
            Frequency::Hourly => {
                if !self.satisfies_by_hour(hour) {
                    return (Vec::new(), 1);
                }
                let mut candidates = Vec::new();
                for &m in &self.minutes {
                    for &s in &self.seconds {
                        candidates.push(date.at_time(hour, m, s));
                    }
                }
                candidates
            }
            Frequency::Minutely => {
                if !self.satisfies_by_hour(hour) {
                    return (Vec::new(), self.periods_until_boundary(3600));
                }
                if !self.satisfies_by_minute(minute) {
                    return (Vec::new(), 1);
                }
                self.seconds
                    .iter()
                    .map(|&s| date.at_time(hour, minute, s))
                    .collect()
            }
            _ => {
                if !self.satisfies_by_hour(hour) {
                    return (Vec::new(), self.periods_until_boundary(3600));
                }
                if !self.satisfies_by_minute(minute) {
                    return (Vec::new(), self.periods_until_boundary(60));
                }
                if !self.satisfies_by_second(second) {
                    return (Vec::new(), 1);
                }
                vec![date.at_time(hour, minute, second)]
            }
        };
        (candidates, 1)
    }

    /// Whether BYHOUR keeps `hour` in an HOURLY or finer rule.
    fn satisfies_by_hour(&self, hour: i32) -> bool {
        self.hours.is_empty() || self.hours.contains(&hour)
    }

    fn satisfies_by_minute(&self, minute: i32) -> bool {
        self.minutes.is_empty() || self.minutes.contains(&minute)
    }

    fn satisfies_by_second(&self, second: i32) -> bool {
        self.seconds.is_empty() || self.seconds.contains(&second)
    }

    /// Number of periods needed to reach the next multiple of `boundary`
    /// seconds, at least one.
    fn periods_until_boundary(&self, boundary: i64) -> i64 {
        let DtBuilder {
            hour,
            minute,
            second,
            ..
        } = self.anchor;
        let elapsed = i64::from(hour * 3600 + minute * 60 + second) % boundary;
        let step = self.interval * unit_seconds(self.freq);
        let remaining = boundary - elapsed;
        ((remaining + step - 1) / step).max(1)
    }

    /// Move the anchor forward by `periods` intervals.
    fn step(&mut self, periods: i64) {
        let units = self.interval * periods;
        match self.freq {
            Frequency::Yearly => {
                self.anchor.year = saturating_i32(i64::from(self.anchor.year) + units);
            }
            Frequency::Monthly => {
                // Carry whole years first to keep the month field small
                self.anchor.year = saturating_i32(i64::from(self.anchor.year) + units / 12);
                self.anchor.month += (units % 12) as i32;
            }
            Frequency::Weekly => self.add_seconds(units * 7 * 86_400),
            Frequency::Daily => self.add_seconds(units * 86_400),
            Frequency::Hourly | Frequency::Minutely | Frequency::Secondly => {
                self.add_seconds(units * unit_seconds(self.freq));
            }
        }
        self.anchor.normalize();

        if self.anchor.year == i32::MAX {
            self.done = true;
        }
    }

    fn add_seconds(&mut self, seconds: i64) {
        let days = seconds.div_euclid(86_400);
        self.anchor.day = saturating_i32(i64::from(self.anchor.day) + days);
        self.anchor.second += seconds.rem_euclid(86_400) as i32;
    }
}

impl Iterator for Generator {
    type Item = DateValue;

    fn next(&mut self) -> Option<Self::Item> {
        self.fill();
        self.buffer.pop_front()
    }
}

/// The start of the period of `freq` containing `value`.
fn align(freq: Frequency, week_start: Weekday, value: DateValue) -> DtBuilder {
    let (year, month, day) = (value.year(), value.month(), value.day());
    let (hour, minute, second) = value.time().unwrap_or((0, 0, 0));
    let mut anchor = match freq {
        Frequency::Yearly => DtBuilder::new(year, 1, 1),
        Frequency::Monthly => DtBuilder::new(year, month, 1),
        Frequency::Weekly => {
            let back = value.weekday().days_since(week_start);
            DtBuilder::new(year, month, day - back)
        }
        Frequency::Daily => DtBuilder::new(year, month, day),
        Frequency::Hourly => DtBuilder::new(year, month, day).with_time(hour, 0, 0),
        Frequency::Minutely => DtBuilder::new(year, month, day).with_time(hour, minute, 0),
        Frequency::Secondly => DtBuilder::new(year, month, day).with_time(hour, minute, second),
    };
    anchor.normalize();
    anchor
}

/// Whole units of `freq` from period start `from` to period start `to`.
fn units_between(freq: Frequency, from: &DtBuilder, to: &DtBuilder) -> i64 {
    let months = |dt: &DtBuilder| i64::from(dt.year) * 12 + i64::from(dt.month);
    let seconds = |dt: &DtBuilder| dt.to_date_time().second_number();
    match freq {
        Frequency::Yearly => i64::from(to.year) - i64::from(from.year),
        Frequency::Monthly => months(to) - months(from),
        Frequency::Weekly => (seconds(to) - seconds(from)).div_euclid(7 * 86_400),
        Frequency::Daily => (seconds(to) - seconds(from)).div_euclid(86_400),
        Frequency::Hourly | Frequency::Minutely | Frequency::Secondly => {
            (seconds(to) - seconds(from)).div_euclid(unit_seconds(freq))
        }
    }
}

fn unit_seconds(freq: Frequency) -> i64 {
    match freq {
        Frequency::Hourly => 3600,
        Frequency::Minutely => 60,
        _ => 1,
    }
}

/// Number of periods of `interval` units after which the calendar repeats.
fn cycle_periods(freq: Frequency, interval: i64) -> i64 {
    let units = match freq {
        Frequency::Yearly => 400,
        Frequency::Monthly => 400 * 12,
        Frequency::Weekly => DAYS_PER_CYCLE / 7,
        Frequency::Daily => DAYS_PER_CYCLE,
        Frequency::Hourly | Frequency::Minutely | Frequency::Secondly => {
            DAYS_PER_CYCLE * 86_400 / unit_seconds(freq)
        }
    };
    units / gcd(units, interval.max(1))
}

fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn saturating_i32(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

/// Apply BYSETPOS to the ordered candidates of one period.
///
/// An empty list keeps everything.
fn select_positions(mut candidates: Vec<DateValue>, set_pos: &[i32]) -> Vec<DateValue> {
    if set_pos.is_empty() {
        return candidates;
    }

    let len = candidates.len();
    let mut position = 0;
    candidates.retain(|_| {
        let keep = satisfies_by_set_pos(set_pos, position, len);
        position += 1;
        keep
    });
    candidates
}

/// Whether the 0-based `position` in a period of `len` candidates is
/// selected. Positions are 1-based, negative ones counting from the end;
/// positions outside the period select nothing.
fn satisfies_by_set_pos(set_pos: &[i32], position: usize, len: usize) -> bool {
    let (Ok(position), Ok(len)) = (i32::try_from(position), i32::try_from(len)) else {
        return false;
    };
    satisfies_position(set_pos, position + 1, len)
}
