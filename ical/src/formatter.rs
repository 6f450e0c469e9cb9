// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence values written back as RFC 5545 text.
//!
//! ```
//! use recurcal_core::{DateValue, Frequency, Rule, Weekday};
//! use recurcal_ical::formatter::format_rrule;
//!
//! let rule = Rule::builder(Frequency::Daily)
//!     .until(DateValue::date_time(1997, 12, 24, 0, 0, 0))
//!     .by_day([Weekday::Monday, Weekday::Friday])
//!     .build()
//!     .unwrap();
//! assert_eq!(
//!     format_rrule(&rule),
//!     "FREQ=DAILY;UNTIL=19971224T000000Z;BYDAY=MO,FR"
//! );
//! ```

use std::fmt::{self, Display, Write};

use recurcal_core::{DateValue, Rule, Weekday};

use crate::keyword::{
    KW_RRULE_BYDAY, KW_RRULE_BYHOUR, KW_RRULE_BYMINUTE, KW_RRULE_BYMONTH, KW_RRULE_BYMONTHDAY,
    KW_RRULE_BYSECOND, KW_RRULE_BYSETPOS, KW_RRULE_BYWEEKNO, KW_RRULE_BYYEARDAY, KW_RRULE_COUNT,
    KW_RRULE_FREQ, KW_RRULE_INTERVAL, KW_RRULE_UNTIL, KW_RRULE_WKST,
};

/// Format a rule as an RRULE value in canonical part order.
///
/// INTERVAL is written only when greater than one and WKST only when it is
/// not Monday, so equal rules always format identically.
#[must_use]
pub fn format_rrule(rule: &Rule) -> String {
    struct Text<'a>(&'a Rule);

    impl Display for Text<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write_rrule(f, self.0)
        }
    }

    Text(rule).to_string()
}

/// Format a value as `YYYYMMDD` or `YYYYMMDDTHHMMSS`.
#[must_use]
pub fn format_date_value(value: &DateValue) -> String {
    value.to_string()
}

/// Write a rule as an RRULE value (RFC 5545 Section 3.3.10).
///
/// A timed UNTIL is written in UTC with the `Z` suffix.
///
/// # Errors
///
/// Propagates errors of the underlying writer.
pub fn write_rrule<W: Write>(w: &mut W, rule: &Rule) -> fmt::Result {
    write!(w, "{KW_RRULE_FREQ}={}", rule.freq())?;

    if let Some(until) = rule.until() {
        let utc = if until.is_timed() { "Z" } else { "" };
        write!(w, ";{KW_RRULE_UNTIL}={until}{utc}")?;
    } else if let Some(count) = rule.count() {
        write!(w, ";{KW_RRULE_COUNT}={count}")?;
    }

    if rule.interval() > 1 {
        write!(w, ";{KW_RRULE_INTERVAL}={}", rule.interval())?;
    }

    write_list(w, KW_RRULE_BYSECOND, rule.by_second())?;
    write_list(w, KW_RRULE_BYMINUTE, rule.by_minute())?;
    write_list(w, KW_RRULE_BYHOUR, rule.by_hour())?;
    write_list(w, KW_RRULE_BYMONTHDAY, rule.by_month_day())?;
    write_list(w, KW_RRULE_BYYEARDAY, rule.by_year_day())?;
    write_list(w, KW_RRULE_BYWEEKNO, rule.by_week_no())?;
    write_list(w, KW_RRULE_BYMONTH, rule.by_month())?;
    write_list(w, KW_RRULE_BYDAY, rule.by_day())?;
    write_list(w, KW_RRULE_BYSETPOS, rule.by_set_pos())?;

    if rule.week_start() != Weekday::Monday {
        write!(w, ";{KW_RRULE_WKST}={}", rule.week_start())?;
    }
    Ok(())
}

fn write_list<W: Write, T: Display>(w: &mut W, name: &str, values: &[T]) -> fmt::Result {
    let Some((first, rest)) = values.split_first() else {
        return Ok(());
    };
    write!(w, ";{name}={first}")?;
    for value in rest {
        write!(w, ",{value}")?;
    }
    Ok(())
}
