// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule value, RFC 5545 Section 3.3.10.

use chumsky::prelude::*;
use recurcal_core::{DateValue, Frequency, RuleBuilder, Weekday, WeekdayNum};

use crate::keyword::{
    KW_RRULE_BYDAY, KW_RRULE_BYHOUR, KW_RRULE_BYMINUTE, KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY,
    KW_RRULE_BYSECOND, KW_RRULE_BYSETPOS, KW_RRULE_BYWEEKNO, KW_RRULE_BYYEARDAY, KW_RRULE_COUNT,
    KW_RRULE_FREQ, KW_RRULE_INTERVAL, KW_RRULE_UNTIL, KW_RRULE_WKST,
};
use crate::value::{Extra, int, uint, value_date_text};

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// recur           = recur-rule-part *( ";" recur-rule-part )
///                 ;
///                 ; The rule parts are not ordered in any
///                 ; particular sequence.
///                 ;
///                 ; The FREQ rule part is REQUIRED,
///                 ; but MUST NOT occur more than once.
///                 ;
///                 ; The UNTIL or COUNT rule parts are OPTIONAL,
///                 ; but they MUST NOT occur in the same 'recur'.
///                 ;
///                 ; The other rule parts are OPTIONAL,
///                 ; but MUST NOT occur more than once.
/// ```
///
/// Value ranges and the COUNT/UNTIL exclusion are left to
/// [`RuleBuilder::build`].
pub(crate) fn value_rrule<'src>() -> impl Parser<'src, &'src str, RuleBuilder, Extra<'src>> + Clone
{
    recur_rule_part()
        .map_with(|part, e| (part, e.span()))
        .separated_by(just(';'))
        .at_least(1)
        .collect::<Vec<_>>()
        .try_map(build_from_parts)
}

fn build_from_parts<'src>(
    parts: Vec<(Part, SimpleSpan)>,
    span: SimpleSpan,
) -> Result<RuleBuilder, Rich<'src, char>> {
    let mut seen = Vec::with_capacity(parts.len());
    for (part, part_span) in &parts {
        let name = part.name();
        if seen.contains(&name) {
            return Err(Rich::custom(
                *part_span,
                format!("{name} must not occur more than once"),
            ));
        }
        seen.push(name);
    }

    let freq = parts
        .iter()
        .find_map(|(part, _)| match part {
            Part::Freq(freq) => Some(*freq),
            _ => None,
        })
        .ok_or_else(|| Rich::custom(span, format!("{KW_RRULE_FREQ} is required")))?;

    Ok(parts
        .into_iter()
        .fold(RuleBuilder::new(freq), |builder, (part, _)| {
            part.apply(builder)
        }))
}

#[derive(Debug, Clone)]
enum Part {
    Freq(Frequency),
    Until(DateValue),
    Count(u32),
    Interval(u32),
    BySecond(Vec<i32>),
    ByMinute(Vec<i32>),
    ByHour(Vec<i32>),
    ByDay(Vec<WeekdayNum>),
    ByMonthDay(Vec<i32>),
    ByYearDay(Vec<i32>),
    ByWeekNo(Vec<i32>),
    ByMonth(Vec<i32>),
    BySetPos(Vec<i32>),
    Wkst(Weekday),
}

impl Part {
    fn name(&self) -> &'static str {
        match self {
            Part::Freq(_) => KW_RRULE_FREQ,
            Part::Until(_) => KW_RRULE_UNTIL,
            Part::Count(_) => KW_RRULE_COUNT,
            Part::Interval(_) => KW_RRULE_INTERVAL,
            Part::BySecond(_) => KW_RRULE_BYSECOND,
            Part::ByMinute(_) => KW_RRULE_BYMINUTE,
            Part::ByHour(_) => KW_RRULE_BYHOUR,
            Part::ByDay(_) => KW_RRULE_BYDAY,
            Part::ByMonthDay(_) => KW_RRULE_BYMONTHDAY,
            Part::ByYearDay(_) => KW_RRULE_BYYEARDAY,
            Part::ByWeekNo(_) => KW_RRULE_BYWEEKNO,
            Part::ByMonth(_) => KW_RRULE_BYMONTH,
            Part::BySetPos(_) => KW_RRULE_BYSETPOS,
            Part::Wkst(_) => KW_RRULE_WKST,
        }
    }

    fn apply(self, builder: RuleBuilder) -> RuleBuilder {
        match self {
            Part::Freq(_) => builder,
            Part::Until(until) => builder.until(until),
            Part::Count(count) => builder.count(count),
            Part::Interval(interval) => builder.interval(interval),
            Part::BySecond(v) => builder.by_second(v),
            Part::ByMinute(v) => builder.by_minute(v),
            Part::ByHour(v) => builder.by_hour(v),
            Part::ByDay(v) => builder.by_day(v),
            Part::ByMonthDay(v) => builder.by_month_day(v),
            Part::ByYearDay(v) => builder.by_year_day(v),
            Part::ByWeekNo(v) => builder.by_week_no(v),
            Part::ByMonth(v) => builder.by_month(v),
            Part::BySetPos(v) => builder.by_set_pos(v),
            Part::Wkst(weekday) => builder.week_start(weekday),
        }
    }
}

/// ```txt
/// recur-rule-part = ( "FREQ" "=" freq )
///                 / ( "UNTIL" "=" enddate )
///                 / ( "COUNT" "=" 1*DIGIT )
///                 / ( "INTERVAL" "=" 1*DIGIT )
///                 / ( "BYSECOND" "=" byseclist )
///                 / ( "BYMINUTE" "=" byminlist )
///                 / ( "BYHOUR" "=" byhrlist )
///                 / ( "BYDAY" "=" bywdaylist )
///                 / ( "BYMONTHDAY" "=" bymodaylist )
///                 / ( "BYYEARDAY" "=" byyrdaylist )
///                 / ( "BYWEEKNO" "=" bywknolist )
///                 / ( "BYMONTH" "=" bymolist )
///                 / ( "BYSETPOS" "=" bysplist )
///                 / ( "WKST" "=" weekday )
/// ```
fn recur_rule_part<'src>() -> impl Parser<'src, &'src str, Part, Extra<'src>> + Clone {
    let kw = |kw| just(kw).ignore_then(just('='));
    let list = |max_digits| {
        int(max_digits)
            .separated_by(just(','))
            .at_least(1)
            .collect::<Vec<_>>()
    };

    choice((
        kw(KW_RRULE_FREQ).ignore_then(freq()).map(Part::Freq),
        // UNTIL is a date or a date-time; `Z` is implied
        kw(KW_RRULE_UNTIL)
            .ignore_then(value_date_text())
            .map(|until| Part::Until(until.value)),
        // `1*DIGIT`; COUNT=0 is a rule without occurrences
        kw(KW_RRULE_COUNT).ignore_then(uint(10)).map(Part::Count),
        kw(KW_RRULE_INTERVAL)
            .ignore_then(uint(10))
            .map(Part::Interval),
        kw(KW_RRULE_BYSECOND).ignore_then(list(2)).map(Part::BySecond),
        kw(KW_RRULE_BYMINUTE).ignore_then(list(2)).map(Part::ByMinute),
        kw(KW_RRULE_BYHOUR).ignore_then(list(2)).map(Part::ByHour),
        kw(KW_RRULE_BYDAY).ignore_then(bywdaylist()).map(Part::ByDay),
        kw(KW_RRULE_BYMONTHDAY)
            .ignore_then(list(2))
            .map(Part::ByMonthDay),
        kw(KW_RRULE_BYYEARDAY)
            .ignore_then(list(3))
            .map(Part::ByYearDay),
        kw(KW_RRULE_BYWEEKNO).ignore_then(list(2)).map(Part::ByWeekNo),
        kw(KW_RRULE_BYMONTH).ignore_then(list(2)).map(Part::ByMonth),
        kw(KW_RRULE_BYSETPOS).ignore_then(list(3)).map(Part::BySetPos),
        kw(KW_RRULE_WKST).ignore_then(weekday()).map(Part::Wkst),
    ))
}

/// ```txt
/// freq        = "SECONDLY" / "MINUTELY" / "HOURLY" / "DAILY"
///             / "WEEKLY" / "MONTHLY" / "YEARLY"
/// ```
fn freq<'src>() -> impl Parser<'src, &'src str, Frequency, Extra<'src>> + Clone {
    select! { c @ 'A'..='Z' => c }
        .repeated()
        .at_least(1)
        .collect::<String>()
        .try_map(|name, span| {
            name.parse()
                .map_err(|_| Rich::custom(span, format!("unknown frequency `{name}`")))
        })
}

/// ```txt
/// bywdaylist  = ( weekdaynum *("," weekdaynum) )
/// weekdaynum  = [[plus / minus] ordwk] weekday
/// ```
fn bywdaylist<'src>() -> impl Parser<'src, &'src str, Vec<WeekdayNum>, Extra<'src>> + Clone {
    int(2)
        .or_not()
        .then(weekday())
        .map(|(num, weekday)| WeekdayNum::nth(num.unwrap_or(0), weekday))
        .separated_by(just(','))
        .at_least(1)
        .collect()
}

/// ```txt
/// weekday     = "SU" / "MO" / "TU" / "WE" / "TH" / "FR" / "SA"
/// ```
fn weekday<'src>() -> impl Parser<'src, &'src str, Weekday, Extra<'src>> + Clone {
    select! { c @ 'A'..='Z' => c }
        .repeated()
        .exactly(2)
        .collect::<String>()
        .try_map(|name, span| {
            name.parse()
                .map_err(|_| Rich::custom(span, format!("unknown weekday `{name}`")))
        })
}

#[cfg(test)]
mod tests {
    use recurcal_core::Rule;

    use super::*;

    fn parse(src: &str) -> Result<RuleBuilder, Vec<Rich<'_, char>>> {
        value_rrule().then_ignore(end()).parse(src).into_result()
    }

    fn build(src: &str) -> Rule {
        parse(src).unwrap().build().unwrap()
    }

    #[test]
    fn parses_rrule_freq_only() {
        let freqs = [
            ("FREQ=SECONDLY", Frequency::Secondly),
            ("FREQ=MINUTELY", Frequency::Minutely),
            ("FREQ=HOURLY", Frequency::Hourly),
            ("FREQ=DAILY", Frequency::Daily),
            ("FREQ=WEEKLY", Frequency::Weekly),
            ("FREQ=MONTHLY", Frequency::Monthly),
            ("FREQ=YEARLY", Frequency::Yearly),
        ];

        for (src, expected) in freqs {
            let rule = build(src);
            assert_eq!(rule.freq(), expected, "Failed for {src}");
            assert_eq!(rule.interval(), 1);
            assert!(rule.count().is_none());
            assert!(rule.until().is_none());
        }
    }

    #[test]
    fn parses_rrule_with_until() {
        let rule = build("FREQ=DAILY;UNTIL=19971224T000000Z");
        assert_eq!(
            rule.until(),
            Some(DateValue::date_time(1997, 12, 24, 0, 0, 0))
        );

        let rule = build("FREQ=DAILY;UNTIL=19971224");
        assert_eq!(rule.until(), Some(DateValue::date(1997, 12, 24)));
    }

    #[test]
    fn parses_rrule_with_byday() {
        let rule = build("FREQ=MONTHLY;BYDAY=1MO,-1FR,+2TU,WE");
        assert_eq!(
            rule.by_day(),
            [
                WeekdayNum::nth(-1, Weekday::Friday),
                WeekdayNum::every(Weekday::Monday),
                WeekdayNum::every(Weekday::Wednesday),
                WeekdayNum::nth(1, Weekday::Monday),
                WeekdayNum::nth(2, Weekday::Tuesday),
            ]
        );
    }

    #[test]
    fn parses_rrule_complex() {
        // Example from RFC 5545
        let rule = build("FREQ=YEARLY;INTERVAL=2;BYMONTH=1;BYDAY=SU;BYHOUR=8,9;BYMINUTE=30");
        assert_eq!(rule.freq(), Frequency::Yearly);
        assert_eq!(rule.interval(), 2);
        assert_eq!(rule.by_month(), [1]);
        assert_eq!(rule.by_day(), [WeekdayNum::every(Weekday::Sunday)]);
        assert_eq!(rule.by_hour(), [8, 9]);
        assert_eq!(rule.by_minute(), [30]);
    }

    #[test]
    fn parses_rrule_handles_reordered_parts() {
        let rule = build("COUNT=10;WKST=SU;INTERVAL=2;FREQ=DAILY");
        assert_eq!(rule.freq(), Frequency::Daily);
        assert_eq!(rule.count(), Some(10));
        assert_eq!(rule.interval(), 2);
        assert_eq!(rule.week_start(), Weekday::Sunday);
    }

    #[test]
    fn parses_rrule_lists() {
        let rule = build("FREQ=YEARLY;BYYEARDAY=1,100,200,-1;BYWEEKNO=20,-1;BYSETPOS=-1,3");
        assert_eq!(rule.by_year_day(), [-1, 1, 100, 200]);
        assert_eq!(rule.by_week_no(), [-1, 20]);
        assert_eq!(rule.by_set_pos(), [-1, 3]);
    }

    #[test]
    fn parses_rrule_rejects_missing_freq() {
        let err = parse("INTERVAL=2;COUNT=10").unwrap_err();
        assert!(err.iter().any(|e| e.to_string().contains("FREQ is required")));
    }

    #[test]
    fn parses_rrule_rejects_duplicate_parts() {
        let test_cases = [
            ("FREQ=DAILY;FREQ=WEEKLY", "FREQ"),
            (
                "FREQ=DAILY;UNTIL=19971224T000000Z;UNTIL=19971225T000000Z",
                "UNTIL",
            ),
            ("FREQ=DAILY;COUNT=10;COUNT=20", "COUNT"),
            ("FREQ=DAILY;INTERVAL=1;INTERVAL=2", "INTERVAL"),
            ("FREQ=WEEKLY;BYDAY=MO;BYDAY=FR", "BYDAY"),
            ("FREQ=DAILY;BYHOUR=9;BYHOUR=10", "BYHOUR"),
        ];

        for (src, part_name) in test_cases {
            assert!(
                parse(src).is_err(),
                "Duplicate {part_name} should fail for input: {src}"
            );
        }
    }

    #[test]
    fn parses_rrule_rejects_malformed_values() {
        for src in [
            "FREQ=FORTNIGHTLY",
            "FREQ=DAILY;COUNT=",
            "FREQ=DAILY;COUNT=-1",
            "FREQ=WEEKLY;BYDAY=XX",
            "FREQ=WEEKLY;BYDAY=1",
            "FREQ=DAILY;BYHOUR=1,,2",
            "FREQ=DAILY;FOO=1",
            "FREQ=DAILY;",
            "freq=daily",
        ] {
            assert!(parse(src).is_err(), "Parse {src} should fail");
        }
    }

    #[test]
    fn parses_rrule_zero_count() {
        assert_eq!(build("FREQ=DAILY;COUNT=0").count(), Some(0));
    }

    #[test]
    fn leaves_semantic_checks_to_the_builder() {
        let builder = parse("FREQ=DAILY;UNTIL=19971224;COUNT=10").unwrap();
        assert!(builder.build().is_err());

        let builder = parse("FREQ=DAILY;BYHOUR=24").unwrap();
        assert!(builder.build().is_err());

        let builder = parse("FREQ=DAILY;INTERVAL=0").unwrap();
        assert!(builder.build().is_err());
    }
}
