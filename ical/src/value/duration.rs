// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chumsky::prelude::*;
use jiff::Span;

use crate::value::{Extra, is_positive, uint};

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// dur-value  = (["+"] / "-") "P" (dur-date / dur-time / dur-week)
///
/// dur-date   = dur-day [dur-time]
/// dur-time   = "T" (dur-hour / dur-minute / dur-second)
/// dur-week   = 1*DIGIT "W"
/// dur-hour   = 1*DIGIT "H" [dur-minute]
/// dur-minute = 1*DIGIT "M" [dur-second]
/// dur-second = 1*DIGIT "S"
/// dur-day    = 1*DIGIT "D"
/// ```
///
/// Days are calendar days, so adding the result to a civil date-time keeps
/// the wall-clock time.
#[allow(clippy::doc_link_with_quotes)]
pub(super) fn value_duration<'src>() -> impl Parser<'src, &'src str, Span, Extra<'src>> + Clone {
    let int = uint(10).map(i64::from);

    let second = int.clone().then_ignore(just('S'));
    let minute = int.clone().then_ignore(just('M')).then(second.clone().or_not());
    let hour = int.clone().then_ignore(just('H')).then(minute.clone().or_not());
    let time = just('T').ignore_then(choice((
        hour.map(|(h, ms)| {
            let (m, s) = ms.unwrap_or((0, None));
            (h, m, s.unwrap_or(0))
        }),
        minute.map(|(m, s)| (0, m, s.unwrap_or(0))),
        second.map(|s| (0, 0, s)),
    )));

    let week = int.clone().then_ignore(just('W'));
    let day = int.then_ignore(just('D'));

    let body = choice((
        week.map(|w| (w, 0, (0, 0, 0))),
        day.then(time.clone().or_not())
            .map(|(d, t)| (0, d, t.unwrap_or((0, 0, 0)))),
        time.map(|t| (0, 0, t)),
    ));

    is_positive()
        .then_ignore(just('P'))
        .then(body)
        .try_map(|(positive, (weeks, days, (hours, minutes, seconds))), span| {
            let duration = Span::new()
                .try_weeks(weeks)
                .and_then(|d| d.try_days(days))
                .and_then(|d| d.try_hours(hours))
                .and_then(|d| d.try_minutes(minutes))
                .and_then(|d| d.try_seconds(seconds))
                .map_err(|err| Rich::custom(span, err))?;
            Ok(if positive { duration } else { duration.negate() })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Option<Span> {
        value_duration()
            .then_ignore(end())
            .parse(src)
            .into_result()
            .ok()
    }

    #[test]
    fn parses_durations() {
        // examples from RFC 5545 Section 3.3.6
        let span = parse("P15DT5H0M20S").unwrap();
        assert_eq!(
            (span.get_days(), span.get_hours(), span.get_seconds()),
            (15, 5, 20)
        );
        assert_eq!(parse("P7W").unwrap().get_weeks(), 7);

        assert_eq!(parse("PT1H").unwrap().get_hours(), 1);
        assert_eq!(parse("PT30M").unwrap().get_minutes(), 30);
        assert_eq!(parse("-P1D").unwrap().get_days(), -1);
    }

    #[test]
    fn rejects_malformed_durations() {
        for src in ["P", "PT", "P1H", "1D", "P1DT", "P1W2D"] {
            assert!(parse(src).is_none(), "Parse {src} should fail");
        }
    }
}
