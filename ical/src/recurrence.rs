// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence component properties, RFC 5545 Section 3.8.5.

use chumsky::prelude::*;
use jiff::civil;
use jiff::tz::TimeZone;
use recurcal_core::{DateValue, Period, RecurrenceSet};

use crate::error::ParseError;
use crate::keyword::{KW_EXDATE, KW_EXRULE, KW_RDATE, KW_RRULE, KW_TZID};
use crate::parser::run;
use crate::value::{DateText, Extra, RDateText, value_rrule, values_date_text, values_rdate};

/// Read RRULE, EXRULE, RDATE and EXDATE content lines into a
/// [`RecurrenceSet`] anchored at `start` in `tz`.
///
/// Each non-blank line holds one property. RDATE and EXDATE values are
/// brought into `tz`: a `Z` suffix marks UTC and a `TZID` parameter names
/// the zone of the values. Other parameters are ignored.
///
/// ## Errors
///
/// Returns [`ParseError::UnknownProperty`] for any other property,
/// [`ParseError::Syntax`] for malformed lines with spans into `text`,
/// [`ParseError::Rule`] for invalid rules and [`ParseError::TimeZone`] for
/// an unknown `TZID`.
///
/// ## Examples
///
/// ```
/// use jiff::tz::TimeZone;
/// use recurcal_core::DateValue;
/// use recurcal_ical::parse_recurrence;
///
/// let text = "\
/// RRULE:FREQ=DAILY;COUNT=5\r\n\
/// EXDATE:19970903T090000,19970905T090000\r\n\
/// ";
/// let start = DateValue::date_time(1997, 9, 2, 9, 0, 0);
/// let set = parse_recurrence(text, start, TimeZone::UTC).unwrap();
/// assert_eq!(set.iter().count(), 3);
/// ```
pub fn parse_recurrence(
    text: &str,
    start: DateValue,
    tz: TimeZone,
) -> Result<RecurrenceSet, ParseError> {
    let mut set = RecurrenceSet::new(start, tz);
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }
        set = read_line(set, line, line_start)?;
    }
    Ok(set)
}

fn read_line(set: RecurrenceSet, line: &str, offset: usize) -> Result<RecurrenceSet, ParseError> {
    let content = run(content_line(), line, offset)?;
    let value_offset = offset + content.value_start;
    let source = content
        .params
        .iter()
        .find(|(name, _)| *name == KW_TZID)
        .map(|(_, tzid)| TimeZone::get(tzid))
        .transpose()?;
    let target = set.time_zone().clone();
    let to_local = |text: DateText| localize(text, source.as_ref(), &target);

    match content.name {
        KW_RRULE => {
            let rule = run(value_rrule(), content.value, value_offset)?.build()?;
            Ok(set.rrule(rule))
        }
        KW_EXRULE => {
            let rule = run(value_rrule(), content.value, value_offset)?.build()?;
            Ok(set.exrule(rule))
        }
        KW_RDATE => {
            let mut values = Vec::new();
            let mut set = set;
            for entry in run(values_rdate(), content.value, value_offset)? {
                match entry {
                    RDateText::Value(value) => values.push(to_local(value)?),
                    RDateText::Period { start, end } => {
                        let period = Period::new(Some(to_local(start)?), Some(to_local(end)?));
                        set = set.rdate_period(period);
                    }
                }
            }
            Ok(set.rdates(values))
        }
        KW_EXDATE => {
            let values = run(values_date_text(), content.value, value_offset)?
                .into_iter()
                .map(to_local)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(set.exdates(values))
        }
        name => Err(ParseError::UnknownProperty {
            name: name.to_string(),
            span: offset + content.name_span.start..offset + content.name_span.end,
        }),
    }
}

/// Bring a value written in `source` (or UTC when it has a `Z` suffix) into
/// the wall-clock time of `target`. Dates and floating values are kept.
fn localize(
    text: DateText,
    source: Option<&TimeZone>,
    target: &TimeZone,
) -> Result<DateValue, ParseError> {
    if !text.value.is_timed() {
        return Ok(text.value);
    }
    let source = match (text.utc, source) {
        (true, _) => TimeZone::UTC,
        (false, Some(tz)) => tz.clone(),
        (false, None) => return Ok(text.value),
    };
    let local = civil::DateTime::try_from(text.value)?
        .to_zoned(source)?
        .with_time_zone(target.clone())
        .datetime();
    Ok(DateValue::from(local))
}

#[derive(Debug)]
struct ContentLine<'src> {
    name: &'src str,
    name_span: SimpleSpan,
    params: Vec<(&'src str, &'src str)>,
    value: &'src str,
    value_start: usize,
}

/// ```txt
/// contentline   = name *(";" param ) ":" value CRLF
/// param         = param-name "=" param-value *("," param-value)
/// param-value   = paramtext / quoted-string
/// ```
fn content_line<'src>() -> impl Parser<'src, &'src str, ContentLine<'src>, Extra<'src>> {
    let name = any()
        .filter(|c: &char| c.is_ascii_alphanumeric() || *c == '-')
        .repeated()
        .at_least(1)
        .to_slice();

    let param_value = choice((
        none_of('"')
            .repeated()
            .to_slice()
            .delimited_by(just('"'), just('"')),
        none_of(";:\"").repeated().to_slice(),
    ));
    let param = name.clone().then_ignore(just('=')).then(param_value);

    name.map_with(|name, e| (name, e.span()))
        .then(just(';').ignore_then(param).repeated().collect::<Vec<_>>())
        .then_ignore(just(':'))
        .then(
            any()
                .repeated()
                .to_slice()
                .map_with(|value, e| -> (&str, SimpleSpan) { (value, e.span()) }),
        )
        .map(|(((name, name_span), params), (value, value_span))| ContentLine {
            name,
            name_span,
            params,
            value,
            value_start: value_span.start,
        })
}
