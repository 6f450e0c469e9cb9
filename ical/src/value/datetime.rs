// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! DATE, DATE-TIME and PERIOD values as defined in RFC 5545 Sections
//! 3.3.4, 3.3.5 and 3.3.9.

use chumsky::prelude::*;
use jiff::civil;
use recurcal_core::DateValue;
use recurcal_core::value::days_in_month;

use crate::value::duration::value_duration;
use crate::value::{Extra, d0_1, d0_2, d0_3, d0_5, d0_9, d1_2, d1_9};

/// A DATE or DATE-TIME value as written, before any time zone applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DateText {
    pub value: DateValue,

    /// Whether the time carried the `Z` suffix.
    pub utc: bool,
}

/// One entry of an RDATE value list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RDateText {
    Value(DateText),
    Period { start: DateText, end: DateText },
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// date               = date-value
///
/// date-value         = date-fullyear date-month date-mday
/// date-fullyear      = 4DIGIT
/// date-month         = 2DIGIT        ;01-12
/// date-mday          = 2DIGIT        ;01-28, 01-29, 01-30, 01-31
///                                    ;based on month/year
/// ```
fn value_date<'src>() -> impl Parser<'src, &'src str, DateValue, Extra<'src>> + Clone {
    let year = d0_9()
        .then(d0_9())
        .then(d0_9())
        .then(d0_9())
        .map(|(((a, b), c), d)| 1000 * a + 100 * b + 10 * c + d);

    let month = choice((
        just('0').ignore_then(d1_9()),
        just('1').ignore_then(d0_2()).map(|b| 10 + b),
    ));

    let day = choice((
        just('0').ignore_then(d1_9()),
        d1_2().then(d0_9()).map(|(a, b)| 10 * a + b),
        just('3').ignore_then(d0_1()).map(|b| 30 + b),
    ));

    year.then(month)
        .then(day)
        .try_map(|((year, month), day), span| {
            if day > days_in_month(year, month) {
                Err(Rich::custom(
                    span,
                    format!("invalid date {year:04}-{month:02}-{day:02}"),
                ))
            } else {
                Ok(DateValue::date(year, month, day))
            }
        })
}

/// ```txt
/// time         = time-hour time-minute time-second [time-utc]
///
/// time-hour    = 2DIGIT        ;00-23
/// time-minute  = 2DIGIT        ;00-59
/// time-second  = 2DIGIT        ;00-60
/// time-utc     = "Z"
/// ```
///
/// A leap second is read as second 59.
fn value_time<'src>() -> impl Parser<'src, &'src str, ((i32, i32, i32), bool), Extra<'src>> + Clone
{
    let hour = choice((
        d0_1().then(d0_9()).map(|(a, b)| 10 * a + b),
        just('2').ignore_then(d0_3()).map(|b| 20 + b),
    ));
    let minute = d0_5().then(d0_9()).map(|(a, b)| 10 * a + b);
    let second = choice((minute.clone(), just("60").to(59)));

    hour.then(minute)
        .then(second)
        .then(just('Z').or_not())
        .map(|(((hour, minute), second), utc)| ((hour, minute, second), utc.is_some()))
}

/// ```txt
/// date-time  = date "T" time
/// ```
///
/// Accepts a bare date as well; the result is then date-only.
pub(crate) fn value_date_text<'src>() -> impl Parser<'src, &'src str, DateText, Extra<'src>> + Clone
{
    value_date()
        .then(just('T').ignore_then(value_time()).or_not())
        .map(|(date, time)| match time {
            Some(((hour, minute, second), utc)) => DateText {
                value: date.at_time(hour, minute, second),
                utc,
            },
            None => DateText {
                value: date,
                utc: false,
            },
        })
}

/// Comma-separated DATE or DATE-TIME values.
pub(crate) fn values_date_text<'src>()
-> impl Parser<'src, &'src str, Vec<DateText>, Extra<'src>> + Clone {
    value_date_text().separated_by(just(',')).at_least(1).collect()
}

/// ```txt
/// period     = period-explicit / period-start
///
/// period-explicit = date-time "/" date-time
/// period-start = date-time "/" dur-value
/// ```
fn value_period<'src>() -> impl Parser<'src, &'src str, RDateText, Extra<'src>> + Clone {
    let end = choice((
        value_date_text().map(Ok),
        value_duration().map(Err),
    ));

    value_date_text()
        .then_ignore(just('/'))
        .then(end)
        .try_map(|(start, end), span| {
            if !start.value.is_timed() {
                return Err(Rich::custom(span, "period start must be a date-time"));
            }
            let end = match end {
                Ok(end) => end,
                Err(duration) => {
                    let dt = civil::DateTime::try_from(start.value)
                        .and_then(|dt| Ok(dt.checked_add(duration)?))
                        .map_err(|err| Rich::custom(span, err))?;
                    DateText {
                        value: DateValue::from(dt),
                        utc: start.utc,
                    }
                }
            };
            if !end.value.is_timed() || end.utc != start.utc {
                return Err(Rich::custom(
                    span,
                    "period date-times must have consistent timezone",
                ));
            }
            Ok(RDateText::Period { start, end })
        })
}

/// Comma-separated RDATE entries: periods, date-times or dates.
pub(crate) fn values_rdate<'src>() -> impl Parser<'src, &'src str, Vec<RDateText>, Extra<'src>> + Clone
{
    choice((value_period(), value_date_text().map(RDateText::Value)))
        .separated_by(just(','))
        .at_least(1)
        .collect()
}
