// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests reading recurrence text and expanding it with
//! `recurcal-core`.

use jiff::tz::TimeZone;
use recurcal_core::{DateValue, Frequency, Weekday, WeekdayNum, create_iterator};
use recurcal_ical::{
    ParseError, RRule, format_rrule, parse_date_list, parse_date_value, parse_recurrence,
    parse_rrule,
};

fn expand(text: &str, start: DateValue, tz: TimeZone, limit: usize) -> Vec<String> {
    let set = parse_recurrence(text, start, tz).unwrap();
    set.iter().take(limit).map(|v| v.to_string()).collect()
}

#[test]
fn test_canonical_text_survives_a_round_trip() {
    let texts = [
        "FREQ=DAILY;COUNT=10",
        "FREQ=DAILY;UNTIL=19971224T000000Z",
        "FREQ=WEEKLY;UNTIL=19971007;INTERVAL=2;BYDAY=MO,WE,FR;WKST=SU",
        "FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=-2",
        "FREQ=YEARLY;BYWEEKNO=20;BYDAY=MO",
        "FREQ=YEARLY;INTERVAL=4;BYMONTHDAY=2,3,4,5,6,7,8;BYMONTH=11;BYDAY=TU",
        "FREQ=MINUTELY;INTERVAL=20;BYHOUR=9,10,11,12,13,14,15,16",
        "FREQ=SECONDLY;BYSECOND=0,30;BYMINUTE=0",
        "FREQ=YEARLY;BYYEARDAY=-1,1,100",
    ];
    for text in texts {
        let rule = parse_rrule(text).unwrap();
        assert_eq!(format_rrule(&rule), text);
    }
}

#[test]
fn test_rrule_wrapper_parses_and_displays() {
    let rule: RRule = "BYDAY=-1FR,1MO;FREQ=MONTHLY;INTERVAL=1".parse().unwrap();
    assert_eq!(rule.0.freq(), Frequency::Monthly);
    assert_eq!(
        rule.0.by_day(),
        [
            WeekdayNum::nth(-1, Weekday::Friday),
            WeekdayNum::nth(1, Weekday::Monday)
        ]
    );
    assert_eq!(rule.to_string(), "FREQ=MONTHLY;BYDAY=-1FR,1MO");
}

#[test]
fn test_rule_errors_are_reported() {
    let err = parse_rrule("FREQ=DAILY;COUNT=3;UNTIL=19970902").unwrap_err();
    assert!(matches!(err, ParseError::Rule(_)));
    assert_eq!(err.span(), None);

    let err = parse_rrule("FREQ=DAILY;BYHOUR=24").unwrap_err();
    assert!(matches!(err, ParseError::Rule(_)));
}

#[test]
fn test_zero_count_has_no_occurrences() {
    let rule = parse_rrule("FREQ=DAILY;COUNT=0").unwrap();
    assert_eq!(format_rrule(&rule), "FREQ=DAILY;COUNT=0");
    let start = DateValue::date(1997, 9, 2);
    assert_eq!(create_iterator(&rule, start, &TimeZone::UTC).count(), 0);
}

#[test]
fn test_syntax_errors_point_at_the_text() {
    let src = "FREQ=DAILY;BYDAY=XX";
    let err = parse_rrule(src).unwrap_err();
    assert!(matches!(err, ParseError::Syntax { .. }));
    let span = err.span().unwrap();
    assert!(span.start >= "FREQ=DAILY;BYDAY=".len());
    assert!(span.end <= src.len());

    assert!(parse_rrule("").is_err());
    assert!(parse_rrule("FREQ=FORTNIGHTLY").is_err());
    assert!(parse_rrule("COUNT=3").is_err());
}

#[test]
fn test_date_values() {
    assert_eq!(
        parse_date_value("19970714").unwrap(),
        DateValue::date(1997, 7, 14)
    );
    assert_eq!(
        parse_date_value("19970714T173000Z").unwrap(),
        DateValue::date_time(1997, 7, 14, 17, 30, 0)
    );
    assert_eq!(
        parse_date_list("19960229,19970101T000000").unwrap(),
        [
            DateValue::date(1996, 2, 29),
            DateValue::date_time(1997, 1, 1, 0, 0, 0)
        ]
    );
    assert!(parse_date_value("19970229").is_err());
    assert!(parse_date_value("19971301").is_err());
    assert!(parse_date_value("19970714T250000").is_err());
}

#[test]
fn test_parsed_rule_expands() {
    let rule = parse_rrule("FREQ=MONTHLY;COUNT=6;BYDAY=-2MO").unwrap();
    let start = DateValue::date_time(1997, 9, 22, 9, 0, 0);
    let values: Vec<_> = create_iterator(&rule, start, &TimeZone::UTC)
        .map(|v| v.to_string())
        .collect();
    assert_eq!(
        values,
        [
            "19970922T090000",
            "19971020T090000",
            "19971117T090000",
            "19971222T090000",
            "19980119T090000",
            "19980216T090000",
        ]
    );
}

#[test]
fn test_recurrence_lines_with_exclusions() {
    let text = "\
RRULE:FREQ=WEEKLY;COUNT=5;BYDAY=TU,TH\r
EXDATE:19970904T090000\r
RDATE:19970906T120000\r
";
    let start = DateValue::date_time(1997, 9, 2, 9, 0, 0);
    assert_eq!(
        expand(text, start, TimeZone::UTC, 10),
        [
            "19970902T090000",
            "19970906T120000",
            "19970909T090000",
            "19970911T090000",
            "19970916T090000",
        ]
    );
}

#[test]
fn test_multiple_rules_merge() {
    let text = "\
RRULE:FREQ=MONTHLY;COUNT=3;BYMONTHDAY=1
RRULE:FREQ=MONTHLY;COUNT=3;BYMONTHDAY=15

EXRULE:FREQ=MONTHLY;BYMONTH=2;BYMONTHDAY=1,15
";
    let start = DateValue::date(2024, 1, 1);
    assert_eq!(
        expand(text, start, TimeZone::UTC, 10),
        ["20240101", "20240115", "20240301", "20240315"]
    );
}

#[test]
fn test_local_rule_follows_daylight_saving() {
    let tz = TimeZone::get("America/New_York").unwrap();
    let text = "RRULE:FREQ=WEEKLY;COUNT=3";
    let start = DateValue::date_time(1997, 10, 20, 9, 0, 0);
    // 1997-10-26 ends daylight saving, so 09:00 local moves from 13:00Z to 14:00Z
    assert_eq!(
        expand(text, start, tz, 10),
        ["19971020T130000", "19971027T140000", "19971103T140000"]
    );
}

#[test]
fn test_exdate_in_another_zone() {
    let tz = TimeZone::get("America/New_York").unwrap();
    let text = "\
RRULE:FREQ=DAILY;COUNT=3
EXDATE;TZID=Europe/London:19970903T140000
EXDATE:19970904T130000Z
";
    let start = DateValue::date_time(1997, 9, 2, 9, 0, 0);
    assert_eq!(expand(text, start, tz, 10), ["19970902T130000"]);
}

#[test]
fn test_rdate_period_contributes_its_start() {
    let text = "RDATE;VALUE=PERIOD:19970308T160000Z/PT8H30M,19970101T180000Z/19970102T070000Z";
    let start = DateValue::date_time(1997, 1, 1, 9, 0, 0);
    let set = parse_recurrence(text, start, TimeZone::UTC).unwrap();
    assert_eq!(set.rdate_periods().len(), 2);
    assert_eq!(
        set.rdate_periods()[0].end(),
        Some(DateValue::date_time(1997, 3, 9, 0, 30, 0))
    );
    assert_eq!(
        set.iter().map(|v| v.to_string()).collect::<Vec<_>>(),
        ["19970101T180000", "19970308T160000"]
    );
}

#[test]
fn test_unknown_property_is_rejected() {
    let text = "RRULE:FREQ=DAILY\nSUMMARY:Standup\n";
    let start = DateValue::date(2024, 1, 1);
    let err = parse_recurrence(text, start, TimeZone::UTC).unwrap_err();
    assert_eq!(err.to_string(), "unknown recurrence property `SUMMARY`");
    assert_eq!(err.span().and_then(|s| text.get(s)), Some("SUMMARY"));
}

#[test]
fn test_bad_rule_in_second_line_is_located() {
    let text = "RDATE:20240105\nRRULE:FREQ=DAILY;BYDAY=MO;;\n";
    let start = DateValue::date(2024, 1, 1);
    let err = parse_recurrence(text, start, TimeZone::UTC).unwrap_err();
    let span = err.span().unwrap();
    assert!(span.start >= "RDATE:20240105\nRRULE:".len());
}
