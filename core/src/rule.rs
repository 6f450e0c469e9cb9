// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule model.
//!
//! A [`Rule`] is immutable and can only be obtained from
//! [`RuleBuilder::build`], which enforces the constraints of RFC 5545
//! section 3.3.10: value ranges, rule parts allowed per frequency, and the
//! exclusivity of COUNT and UNTIL.

use std::fmt::{self, Display};

use crate::error::{Error, RuleViolation};
use crate::value::DateValue;

/// Recurrence frequency, ordered from finest to coarsest.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "UPPERCASE")]
#[expect(missing_docs)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Day of the week, displayed as its two-letter iCalendar code.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[expect(missing_docs)]
pub enum Weekday {
    #[strum(serialize = "SU")]
    Sunday,
    #[strum(serialize = "MO")]
    Monday,
    #[strum(serialize = "TU")]
    Tuesday,
    #[strum(serialize = "WE")]
    Wednesday,
    #[strum(serialize = "TH")]
    Thursday,
    #[strum(serialize = "FR")]
    Friday,
    #[strum(serialize = "SA")]
    Saturday,
}

impl Weekday {
    /// Every weekday, starting on Sunday.
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Weekday from its index counted from Sunday (0), modulo 7.
    #[must_use]
    pub const fn from_sunday_zero(index: u8) -> Self {
        match index % 7 {
            0 => Weekday::Sunday,
            1 => Weekday::Monday,
            2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,
            4 => Weekday::Thursday,
            5 => Weekday::Friday,
            _ => Weekday::Saturday,
        }
    }

    /// Index counted from Sunday (0).
    #[must_use]
    pub const fn to_sunday_zero(self) -> u8 {
        self as u8
    }

    /// Number of days from the most recent `other` up to `self`, in `0..7`.
    #[must_use]
    pub const fn days_since(self, other: Weekday) -> i32 {
        (self as i32 - other as i32).rem_euclid(7)
    }
}

/// A BYDAY entry: a weekday with an optional ordinal such as `-1FR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekdayNum {
    /// Ordinal within the month or year, `0` meaning every such weekday
    pub num: i32,

    /// Day of the week
    pub weekday: Weekday,
}

impl WeekdayNum {
    /// Every occurrence of `weekday`.
    #[must_use]
    pub const fn every(weekday: Weekday) -> Self {
        Self { num: 0, weekday }
    }

    /// The `num`-th occurrence of `weekday`, negative counting from the end.
    #[must_use]
    pub const fn nth(num: i32, weekday: Weekday) -> Self {
        Self { num, weekday }
    }
}

impl From<Weekday> for WeekdayNum {
    fn from(weekday: Weekday) -> Self {
        Self::every(weekday)
    }
}

impl Display for WeekdayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.num != 0 {
            write!(f, "{}", self.num)?;
        }
        write!(f, "{}", self.weekday)
    }
}

/// An immutable, validated recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    freq: Frequency,
    interval: u32,
    count: Option<u32>,
    until: Option<DateValue>,
    by_second: Vec<i32>,
    by_minute: Vec<i32>,
    by_hour: Vec<i32>,
    by_day: Vec<WeekdayNum>,
    by_month_day: Vec<i32>,
    by_year_day: Vec<i32>,
    by_week_no: Vec<i32>,
    by_month: Vec<i32>,
    by_set_pos: Vec<i32>,
    week_start: Weekday,
}

impl Rule {
    /// Start building a rule with the given frequency.
    #[must_use]
    pub fn builder(freq: Frequency) -> RuleBuilder {
        RuleBuilder::new(freq)
    }

    /// Frequency
    #[must_use]
    pub fn freq(&self) -> Frequency {
        self.freq
    }

    /// Interval between periods, at least 1.
    #[must_use]
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Maximum number of occurrences.
    #[must_use]
    pub fn count(&self) -> Option<u32> {
        self.count
    }

    /// Last admissible occurrence, inclusive.
    #[must_use]
    pub fn until(&self) -> Option<DateValue> {
        self.until
    }

    /// Seconds selector, sorted.
    #[must_use]
    pub fn by_second(&self) -> &[i32] {
        &self.by_second
    }

    /// Minutes selector, sorted.
    #[must_use]
    pub fn by_minute(&self) -> &[i32] {
        &self.by_minute
    }

    /// Hours selector, sorted.
    #[must_use]
    pub fn by_hour(&self) -> &[i32] {
        &self.by_hour
    }

    /// Weekday selector, sorted.
    #[must_use]
    pub fn by_day(&self) -> &[WeekdayNum] {
        &self.by_day
    }

    /// Day-of-month selector, sorted; negative values count from month end.
    #[must_use]
    pub fn by_month_day(&self) -> &[i32] {
        &self.by_month_day
    }

    /// Day-of-year selector, sorted; negative values count from year end.
    #[must_use]
    pub fn by_year_day(&self) -> &[i32] {
        &self.by_year_day
    }

    /// Week-number selector, sorted; negative values count from year end.
    #[must_use]
    pub fn by_week_no(&self) -> &[i32] {
        &self.by_week_no
    }

    /// Month selector, sorted.
    #[must_use]
    pub fn by_month(&self) -> &[i32] {
        &self.by_month
    }

    /// Set-position selector, sorted.
    #[must_use]
    pub fn by_set_pos(&self) -> &[i32] {
        &self.by_set_pos
    }

    /// First day of the week, Monday by default.
    #[must_use]
    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Whether any BYHOUR, BYMINUTE or BYSECOND part is present.
    pub(crate) fn has_time_parts(&self) -> bool {
        !(self.by_hour.is_empty() && self.by_minute.is_empty() && self.by_second.is_empty())
    }

    /// Whether any day-level BYxxx part is present.
    pub(crate) fn has_day_parts(&self) -> bool {
        !(self.by_day.is_empty()
            && self.by_month_day.is_empty()
            && self.by_year_day.is_empty()
            && self.by_week_no.is_empty())
    }
}

/// Builder for [`Rule`].
///
/// Selector lists may be given in any order and with repetitions; they are
/// sorted and deduplicated by [`RuleBuilder::build`].
#[derive(Debug, Clone)]
pub struct RuleBuilder {
    rule: Rule,
}

impl RuleBuilder {
    /// Create a builder with interval 1, no bounds and weeks starting Monday.
    #[must_use]
    pub fn new(freq: Frequency) -> Self {
        Self {
            rule: Rule {
                freq,
                interval: 1,
                count: None,
                until: None,
                by_second: Vec::new(),
                by_minute: Vec::new(),
                by_hour: Vec::new(),
                by_day: Vec::new(),
                by_month_day: Vec::new(),
                by_year_day: Vec::new(),
                by_week_no: Vec::new(),
                by_month: Vec::new(),
                by_set_pos: Vec::new(),
                week_start: Weekday::Monday,
            },
        }
    }

    /// Set the interval.
    #[must_use]
    pub fn interval(mut self, interval: u32) -> Self {
        self.rule.interval = interval;
        self
    }

    /// Set COUNT.
    #[must_use]
    pub fn count(mut self, count: u32) -> Self {
        self.rule.count = Some(count);
        self
    }

    /// Set UNTIL.
    #[must_use]
    pub fn until(mut self, until: DateValue) -> Self {
        self.rule.until = Some(until);
        self
    }

    /// Set BYSECOND.
    #[must_use]
    pub fn by_second(mut self, values: impl IntoIterator<Item = i32>) -> Self {
        self.rule.by_second = values.into_iter().collect();
        self
    }

    /// Set BYMINUTE.
    #[must_use]
    pub fn by_minute(mut self, values: impl IntoIterator<Item = i32>) -> Self {
        self.rule.by_minute = values.into_iter().collect();
        self
    }

    /// Set BYHOUR.
    #[must_use]
    pub fn by_hour(mut self, values: impl IntoIterator<Item = i32>) -> Self {
        self.rule.by_hour = values.into_iter().collect();
        self
    }

    /// Set BYDAY from weekdays or ordinal weekdays.
    #[must_use]
    pub fn by_day<W: Into<WeekdayNum>>(mut self, values: impl IntoIterator<Item = W>) -> Self {
        self.rule.by_day = values.into_iter().map(Into::into).collect();
        self
    }

    /// Set BYMONTHDAY.
    #[must_use]
    pub fn by_month_day(mut self, values: impl IntoIterator<Item = i32>) -> Self {
        self.rule.by_month_day = values.into_iter().collect();
        self
    }

    /// Set BYYEARDAY.
    #[must_use]
    pub fn by_year_day(mut self, values: impl IntoIterator<Item = i32>) -> Self {
        self.rule.by_year_day = values.into_iter().collect();
        self
    }

    /// Set BYWEEKNO.
    #[must_use]
    pub fn by_week_no(mut self, values: impl IntoIterator<Item = i32>) -> Self {
        self.rule.by_week_no = values.into_iter().collect();
        self
    }

    /// Set BYMONTH.
    #[must_use]
    pub fn by_month(mut self, values: impl IntoIterator<Item = i32>) -> Self {
        self.rule.by_month = values.into_iter().collect();
        self
    }

    /// Set BYSETPOS.
    #[must_use]
    pub fn by_set_pos(mut self, values: impl IntoIterator<Item = i32>) -> Self {
        self.rule.by_set_pos = values.into_iter().collect();
        self
    }

    /// Set WKST.
    #[must_use]
    pub fn week_start(mut self, week_start: Weekday) -> Self {
        self.rule.week_start = week_start;
        self
    }

    /// Validate and freeze the rule.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRule`] when COUNT and UNTIL are both set, the
    /// interval is zero, a selector value is out of range, a rule part is not
    /// allowed with the frequency, or BYSETPOS stands alone.
    pub fn build(self) -> Result<Rule, Error> {
        let mut rule = self.rule;
        for list in [
            &mut rule.by_second,
            &mut rule.by_minute,
            &mut rule.by_hour,
            &mut rule.by_month_day,
            &mut rule.by_year_day,
            &mut rule.by_week_no,
            &mut rule.by_month,
            &mut rule.by_set_pos,
        ] {
            list.sort_unstable();
            list.dedup();
        }
        rule.by_day.sort_unstable();
        rule.by_day.dedup();

        validate(&rule)?;
        Ok(rule)
    }
}

fn validate(rule: &Rule) -> Result<(), RuleViolation> {
    use Frequency::{Daily, Monthly, Weekly, Yearly};

    if rule.count.is_some() && rule.until.is_some() {
        return Err(RuleViolation::CountAndUntil);
    }
    if rule.interval == 0 {
        return Err(RuleViolation::ZeroInterval);
    }

    check_range("BYSECOND", &rule.by_second, 0, 59)?;
    check_range("BYMINUTE", &rule.by_minute, 0, 59)?;
    check_range("BYHOUR", &rule.by_hour, 0, 23)?;
    check_signed_range("BYMONTHDAY", &rule.by_month_day, 31)?;
    check_signed_range("BYYEARDAY", &rule.by_year_day, 366)?;
    check_signed_range("BYWEEKNO", &rule.by_week_no, 53)?;
    check_range("BYMONTH", &rule.by_month, 1, 12)?;
    check_signed_range("BYSETPOS", &rule.by_set_pos, 366)?;

    let freq = rule.freq;
    let not_allowed = |part| Err(RuleViolation::NotAllowed { part, freq });
    if !rule.by_week_no.is_empty() && freq != Yearly {
        return not_allowed("BYWEEKNO");
    }
    if !rule.by_year_day.is_empty() && matches!(freq, Daily | Weekly | Monthly) {
        return not_allowed("BYYEARDAY");
    }
    if !rule.by_month_day.is_empty() && freq == Weekly {
        return not_allowed("BYMONTHDAY");
    }

    let ordinals = rule.by_day.iter().map(|d| d.num).filter(|&n| n != 0);
    let max = match freq {
        Monthly => 5,
        Yearly if rule.by_week_no.is_empty() => 53,
        _ => 0,
    };
    for num in ordinals {
        if max == 0 {
            return Err(RuleViolation::OrdinalByDay {
                freq,
                with_week_no: freq == Yearly,
            });
        }
        if num.abs() > max {
            return Err(RuleViolation::OutOfRange {
                part: "BYDAY",
                value: num,
                min: 1,
                max,
            });
        }
    }

    if !rule.by_set_pos.is_empty()
        && rule.by_month.is_empty()
        && !rule.has_time_parts()
        && !rule.has_day_parts()
    {
        return Err(RuleViolation::SetPosWithoutBy);
    }

    Ok(())
}

fn check_range(part: &'static str, values: &[i32], min: i32, max: i32) -> Result<(), RuleViolation> {
    match values.iter().find(|&&v| v < min || v > max) {
        Some(&value) => Err(RuleViolation::OutOfRange {
            part,
            value,
            min,
            max,
        }),
        None => Ok(()),
    }
}

/// Check `1..=max` in magnitude, zero excluded.
fn check_signed_range(part: &'static str, values: &[i32], max: i32) -> Result<(), RuleViolation> {
    match values.iter().find(|&&v| v == 0 || v.abs() > max) {
        Some(&value) => Err(RuleViolation::OutOfRange {
            part,
            value,
            min: 1,
            max,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(builder: RuleBuilder) -> RuleViolation {
        match builder.build() {
            Err(Error::InvalidRule(v)) => v,
            other => panic!("expected an invalid rule, got {other:?}"),
        }
    }

    #[test]
    fn defaults_interval_and_week_start() {
        let rule = Rule::builder(Frequency::Daily).build().unwrap();
        assert_eq!(rule.interval(), 1);
        assert_eq!(rule.week_start(), Weekday::Monday);
        assert_eq!(rule.count(), None);
        assert_eq!(rule.until(), None);
    }

    #[test]
    fn sorts_and_dedups_selectors() {
        let rule = Rule::builder(Frequency::Yearly)
            .by_month([3, 1, 3, 2])
            .by_day([Weekday::Friday, Weekday::Monday, Weekday::Friday])
            .build()
            .unwrap();
        assert_eq!(rule.by_month(), [1, 2, 3]);
        assert_eq!(
            rule.by_day(),
            [
                WeekdayNum::every(Weekday::Monday),
                WeekdayNum::every(Weekday::Friday)
            ]
        );
    }

    #[test]
    fn rejects_count_with_until() {
        let builder = Rule::builder(Frequency::Daily)
            .count(3)
            .until(DateValue::date(2006, 1, 1));
        assert_eq!(violation(builder), RuleViolation::CountAndUntil);
    }

    #[test]
    fn rejects_zero_interval() {
        let builder = Rule::builder(Frequency::Daily).interval(0);
        assert_eq!(violation(builder), RuleViolation::ZeroInterval);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let builder = Rule::builder(Frequency::Yearly).by_month([13]);
        assert_eq!(
            violation(builder),
            RuleViolation::OutOfRange {
                part: "BYMONTH",
                value: 13,
                min: 1,
                max: 12
            }
        );

        let builder = Rule::builder(Frequency::Monthly).by_month_day([0]);
        assert!(matches!(
            violation(builder),
            RuleViolation::OutOfRange {
                part: "BYMONTHDAY",
                ..
            }
        ));

        let builder = Rule::builder(Frequency::Minutely).by_second([60]);
        assert!(matches!(
            violation(builder),
            RuleViolation::OutOfRange {
                part: "BYSECOND",
                ..
            }
        ));

        let builder = Rule::builder(Frequency::Monthly).by_day([WeekdayNum::nth(6, Weekday::Monday)]);
        assert!(matches!(
            violation(builder),
            RuleViolation::OutOfRange { part: "BYDAY", .. }
        ));
    }

    #[test]
    fn rejects_parts_not_allowed_with_frequency() {
        let builder = Rule::builder(Frequency::Monthly).by_week_no([1]);
        assert_eq!(
            violation(builder),
            RuleViolation::NotAllowed {
                part: "BYWEEKNO",
                freq: Frequency::Monthly
            }
        );

        let builder = Rule::builder(Frequency::Weekly).by_month_day([1]);
        assert!(matches!(
            violation(builder),
            RuleViolation::NotAllowed {
                part: "BYMONTHDAY",
                ..
            }
        ));

        let builder = Rule::builder(Frequency::Daily).by_year_day([100]);
        assert!(matches!(
            violation(builder),
            RuleViolation::NotAllowed {
                part: "BYYEARDAY",
                ..
            }
        ));

        // BYYEARDAY is allowed with sub-daily frequencies
        assert!(Rule::builder(Frequency::Hourly).by_year_day([100]).build().is_ok());
    }

    #[test]
    fn rejects_ordinal_by_day_outside_monthly_and_yearly() {
        let builder = Rule::builder(Frequency::Weekly).by_day([WeekdayNum::nth(1, Weekday::Monday)]);
        assert_eq!(
            violation(builder),
            RuleViolation::OrdinalByDay {
                freq: Frequency::Weekly,
                with_week_no: false
            }
        );

        let builder = Rule::builder(Frequency::Yearly)
            .by_week_no([20])
            .by_day([WeekdayNum::nth(1, Weekday::Monday)]);
        assert_eq!(
            violation(builder),
            RuleViolation::OrdinalByDay {
                freq: Frequency::Yearly,
                with_week_no: true
            }
        );

        assert!(
            Rule::builder(Frequency::Yearly)
                .by_day([WeekdayNum::nth(20, Weekday::Monday)])
                .build()
                .is_ok()
        );
    }

    #[test]
    fn rejects_lonely_set_pos() {
        let builder = Rule::builder(Frequency::Monthly).by_set_pos([-1]);
        assert_eq!(violation(builder), RuleViolation::SetPosWithoutBy);

        assert!(
            Rule::builder(Frequency::Monthly)
                .by_day([Weekday::Monday, Weekday::Tuesday])
                .by_set_pos([-1])
                .build()
                .is_ok()
        );
    }

    #[test]
    fn formats_and_parses_keywords() {
        assert_eq!(Frequency::Weekly.to_string(), "WEEKLY");
        assert_eq!("MONTHLY".parse::<Frequency>().unwrap(), Frequency::Monthly);
        assert_eq!("TH".parse::<Weekday>().unwrap(), Weekday::Thursday);
        assert_eq!(WeekdayNum::nth(-1, Weekday::Friday).to_string(), "-1FR");
        assert_eq!(WeekdayNum::every(Weekday::Sunday).to_string(), "SU");
    }

    #[test]
    fn counts_days_between_weekdays() {
        assert_eq!(Weekday::Monday.days_since(Weekday::Monday), 0);
        assert_eq!(Weekday::Sunday.days_since(Weekday::Monday), 6);
        assert_eq!(Weekday::Monday.days_since(Weekday::Sunday), 1);
        assert_eq!(Weekday::from_sunday_zero(9), Weekday::Tuesday);
    }
}
