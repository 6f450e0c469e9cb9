// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};
use std::str::FromStr;

use chumsky::prelude::*;
use recurcal_core::{DateValue, Rule};

use crate::error::ParseError;
use crate::formatter::write_rrule;
use crate::value::{Extra, value_date_text, value_rrule, values_date_text};

/// Parse an RRULE value such as `FREQ=WEEKLY;COUNT=10;BYDAY=TU,TH`.
///
/// A timed UNTIL is read as UTC whether or not it carries the `Z` suffix.
///
/// ## Errors
///
/// Returns [`ParseError::Syntax`] when the text does not follow the RFC 5545
/// grammar, or [`ParseError::Rule`] when the rule it describes is invalid.
///
/// ## Examples
///
/// ```
/// # use recurcal_ical::parse_rrule;
/// use recurcal_core::Frequency;
///
/// let rule = parse_rrule("FREQ=MONTHLY;BYDAY=-1FR;COUNT=3").unwrap();
/// assert_eq!(rule.freq(), Frequency::Monthly);
/// assert_eq!(rule.count(), Some(3));
/// ```
///
/// Syntax errors carry a byte span suitable for `ariadne` reports:
///
/// ```
/// # use recurcal_ical::{ParseError, parse_rrule};
/// use ariadne::{Color, Label, Report, ReportKind, Source};
///
/// let src = "FREQ=DAILY;BYDAY=XX";
/// let err = parse_rrule(src).unwrap_err();
/// let span = err.span().unwrap();
/// let reason = match &err {
///     ParseError::Syntax { reason, .. } => reason.clone(),
///     err => err.to_string(),
/// };
/// Report::build(ReportKind::Error, span.clone())
///     .with_config(ariadne::Config::new().with_index_type(ariadne::IndexType::Byte))
///     .with_message(err.to_string())
///     .with_label(Label::new(span).with_message(reason).with_color(Color::Red))
///     .finish()
///     .eprint(Source::from(src))
///     .unwrap();
/// ```
pub fn parse_rrule(src: &str) -> Result<Rule, ParseError> {
    let builder = run(value_rrule(), src, 0)?;
    Ok(builder.build()?)
}

/// Parse a DATE (`YYYYMMDD`) or DATE-TIME (`YYYYMMDDTHHMMSS[Z]`) value.
///
/// The `Z` suffix is accepted and dropped; the result holds the wall-clock
/// fields as written.
///
/// ## Errors
///
/// Returns [`ParseError::Syntax`] for malformed text or impossible dates.
pub fn parse_date_value(src: &str) -> Result<DateValue, ParseError> {
    Ok(run(value_date_text(), src, 0)?.value)
}

/// Parse a comma-separated list of DATE or DATE-TIME values, as found in
/// RDATE and EXDATE.
///
/// ## Errors
///
/// Returns [`ParseError::Syntax`] when any value is malformed.
pub fn parse_date_list(src: &str) -> Result<Vec<DateValue>, ParseError> {
    let values = run(values_date_text(), src, 0)?;
    Ok(values.into_iter().map(|v| v.value).collect())
}

/// Run `parser` over the whole of `src`, reporting the first error with
/// its span shifted by `offset` bytes.
pub(crate) fn run<'src, O>(
    parser: impl Parser<'src, &'src str, O, Extra<'src>>,
    src: &'src str,
    offset: usize,
) -> Result<O, ParseError> {
    parser
        .then_ignore(end())
        .parse(src)
        .into_result()
        .map_err(|errs| match errs.first() {
            Some(err) => ParseError::from_rich(err, offset),
            None => ParseError::Syntax {
                message: "invalid input".to_string(),
                reason: "invalid input".to_string(),
                span: offset..offset + src.len(),
            },
        })
}

/// A [`Rule`] read from and written as RRULE text.
///
/// ```
/// # use recurcal_ical::RRule;
/// let rule: RRule = "FREQ=WEEKLY;WKST=SU;INTERVAL=2;BYDAY=TU,TH".parse().unwrap();
/// assert_eq!(rule.to_string(), "FREQ=WEEKLY;INTERVAL=2;BYDAY=TU,TH;WKST=SU");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RRule(pub Rule);

impl RRule {
    /// The wrapped rule.
    #[must_use]
    pub fn into_inner(self) -> Rule {
        self.0
    }
}

impl FromStr for RRule {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_rrule(s).map(RRule)
    }
}

impl Display for RRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rrule(f, &self.0)
    }
}

impl AsRef<Rule> for RRule {
    fn as_ref(&self) -> &Rule {
        &self.0
    }
}

impl From<Rule> for RRule {
    fn from(rule: Rule) -> Self {
        RRule(rule)
    }
}

impl From<RRule> for Rule {
    fn from(rule: RRule) -> Self {
        rule.0
    }
}
