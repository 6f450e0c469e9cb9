// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::predicate::Predicate;
use crate::rule::{Frequency, Rule, Weekday, WeekdayNum};
use crate::value::DateValue;
use crate::value::calendar::{
    WeekNumber, civil_from_days, days_in_month, days_in_year, week_number, weekday_from_days,
};

/// A candidate day with the calendar facts the BY-field filters test.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Day {
    /// Month
    pub month: i32,
    /// Day of month
    pub day: i32,
    /// Day of the week
    pub weekday: Weekday,
    /// 1-based day of the year
    pub day_of_year: i32,
    /// Length of the month
    pub days_in_month: i32,
    /// Length of the year
    pub days_in_year: i32,
    /// Week numbering, only computed when BYWEEKNO is present
    pub week: Option<WeekNumber>,
}

/// Ordinal scope of a numbered BYDAY such as `2TU`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Month,
    Year,
}

/// The day-level filter of a rule: BYMONTH, BYWEEKNO, BYYEARDAY,
/// BYMONTHDAY and BYDAY, with the implicit defaults taken from the start.
#[derive(Debug, Clone)]
pub(crate) struct DayFilter {
    predicate: Predicate<Day>,
    week_start: Option<Weekday>,
}

impl DayFilter {
    pub fn new(rule: &Rule, start: DateValue) -> Self {
        let freq = rule.freq();
        let implicit = !rule.has_day_parts();

        let by_month = match rule.by_month() {
            [] if implicit && freq == Frequency::Yearly => vec![start.month()],
            months => months.to_vec(),
        };
        let by_month_day = match rule.by_month_day() {
            [] if implicit && matches!(freq, Frequency::Monthly | Frequency::Yearly) => {
                vec![start.day()]
            }
            days => days.to_vec(),
        };
        let by_day = match rule.by_day() {
            [] if implicit && freq == Frequency::Weekly => vec![WeekdayNum::every(start.weekday())],
            days => days.to_vec(),
        };
        let scope = if freq == Frequency::Monthly || !rule.by_month().is_empty() {
            Scope::Month
        } else {
            Scope::Year
        };

        let mut terms = Vec::new();
        if !by_month.is_empty() {
            terms.push(Predicate::test(move |d: &Day| by_month.contains(&d.month)));
        }
        if !rule.by_week_no().is_empty() {
            let weeks = rule.by_week_no().to_vec();
            terms.push(Predicate::test(move |d: &Day| satisfies_by_week_no(&weeks, d)));
        }
        if !rule.by_year_day().is_empty() {
            let days = rule.by_year_day().to_vec();
            terms.push(Predicate::test(move |d: &Day| {
                satisfies_position(&days, d.day_of_year, d.days_in_year)
            }));
        }
        if !by_month_day.is_empty() {
            terms.push(Predicate::test(move |d: &Day| {
                satisfies_position(&by_month_day, d.day, d.days_in_month)
            }));
        }
        if !by_day.is_empty() {
            terms.push(Predicate::or(
                by_day.into_iter().map(|wn| weekday_predicate(wn, scope)),
            ));
        }

        let week_start = (!rule.by_week_no().is_empty()).then_some(rule.week_start());
        Self {
            predicate: Predicate::and(terms),
            week_start,
        }
    }

    /// Whether every day passes.
    pub fn is_always_true(&self) -> bool {
        self.predicate.is_always_true()
    }

    /// Whether the day with day number `days` passes.
    pub fn matches(&self, days: i64) -> bool {
        self.is_always_true() || self.predicate.matches(&self.day(days))
    }

    fn day(&self, days: i64) -> Day {
        let (year, month, day) = civil_from_days(days);
        let days_in_year = days_in_year(year);
        Day {
            month,
            day,
            weekday: weekday_from_days(days),
            day_of_year: DateValue::date(year, month, day).day_of_year(),
            days_in_month: days_in_month(year, month),
            days_in_year,
            week: self.week_start.map(|ws| week_number(days, year, ws)),
        }
    }
}

/// Whether the 1-based `positive` index among `len` is listed, either as
/// itself or counted from the end (-1 being the last).
pub(super) fn satisfies_position(list: &[i32], positive: i32, len: i32) -> bool {
    let negative = positive - 1 - len;
    list.contains(&positive) || list.contains(&negative)
}

fn satisfies_by_week_no(weeks: &[i32], d: &Day) -> bool {
    d.week
        .is_some_and(|w| satisfies_position(weeks, w.week, w.weeks_in_year))
}

fn weekday_predicate(wn: WeekdayNum, scope: Scope) -> Predicate<Day> {
    let WeekdayNum { num, weekday } = wn;
    if num == 0 {
        return Predicate::test(move |d: &Day| d.weekday == weekday);
    }

    Predicate::test(move |d: &Day| {
        if d.weekday != weekday {
            return false;
        }
        let (index, length) = match scope {
            Scope::Month => (d.day, d.days_in_month),
            Scope::Year => (d.day_of_year, d.days_in_year),
        };
        match num > 0 {
            true => (index - 1) / 7 + 1 == num,
            false => -((length - index) / 7 + 1) == num,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::calendar::days_from_civil;

    fn matching_days(filter: &DayFilter, year: i32, month: i32) -> Vec<i32> {
        (1..=days_in_month(year, month))
            .filter(|&d| filter.matches(days_from_civil(year, month, d)))
            .collect()
    }

    #[test]
    fn defaults_to_start_day_for_monthly() {
        let rule = Rule::builder(Frequency::Monthly).build().unwrap();
        let filter = DayFilter::new(&rule, DateValue::date(2006, 1, 31));
        assert_eq!(matching_days(&filter, 2006, 3), [31]);
        assert!(matching_days(&filter, 2006, 2).is_empty());
    }

    #[test]
    fn defaults_to_start_weekday_for_weekly() {
        let rule = Rule::builder(Frequency::Weekly).build().unwrap();
        // 2006-01-03 is a Tuesday
        let filter = DayFilter::new(&rule, DateValue::date(2006, 1, 3));
        assert_eq!(matching_days(&filter, 2006, 1), [3, 10, 17, 24, 31]);
    }

    #[test]
    fn selects_nth_weekday_of_month() {
        let rule = Rule::builder(Frequency::Monthly)
            .by_day([WeekdayNum::nth(1, Weekday::Friday), WeekdayNum::nth(-1, Weekday::Friday)])
            .build()
            .unwrap();
        let filter = DayFilter::new(&rule, DateValue::date(1997, 9, 5));
        assert_eq!(matching_days(&filter, 1997, 9), [5, 26]);
    }

    #[test]
    fn selects_nth_weekday_of_year() {
        let rule = Rule::builder(Frequency::Yearly)
            .by_day([WeekdayNum::nth(20, Weekday::Monday)])
            .build()
            .unwrap();
        let filter = DayFilter::new(&rule, DateValue::date(1997, 5, 19));
        assert_eq!(matching_days(&filter, 1997, 5), [19]);
    }

    #[test]
    fn counts_negative_month_days_from_end() {
        let rule = Rule::builder(Frequency::Monthly)
            .by_month_day([-1, -3])
            .build()
            .unwrap();
        let filter = DayFilter::new(&rule, DateValue::date(2008, 1, 1));
        assert_eq!(matching_days(&filter, 2008, 2), [27, 29]);
    }

    #[test]
    fn selects_week_numbers() {
        let rule = Rule::builder(Frequency::Yearly)
            .by_week_no([20])
            .by_day([Weekday::Monday])
            .build()
            .unwrap();
        let filter = DayFilter::new(&rule, DateValue::date(1997, 5, 12));
        assert_eq!(matching_days(&filter, 1997, 5), [12]);
        assert_eq!(matching_days(&filter, 1998, 5), [11]);
    }

    #[test]
    fn counts_positions_from_both_ends() {
        assert!(satisfies_position(&[1], 1, 30));
        assert!(satisfies_position(&[-1], 30, 30));
        assert!(satisfies_position(&[-30], 1, 30));
        assert!(!satisfies_position(&[-31, 31], 1, 30));
    }

    #[test]
    fn accepts_everything_for_plain_daily() {
        let rule = Rule::builder(Frequency::Daily).build().unwrap();
        let filter = DayFilter::new(&rule, DateValue::date(2006, 1, 1));
        assert!(filter.is_always_true());
    }
}
