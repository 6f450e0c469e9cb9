// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Errors raised by rule construction and iteration.

use crate::rule::Frequency;

/// Errors produced by the recurrence engine.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The rule is malformed; raised by [`RuleBuilder::build`](crate::RuleBuilder::build) only.
    #[error("invalid recurrence rule: {0}")]
    InvalidRule(#[from] RuleViolation),

    /// `try_next` was called on an exhausted iterator.
    #[error("no more occurrences in the recurrence")]
    NoSuchElement,

    /// The recurrence is read-only.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    /// The value cannot be represented by `jiff`.
    #[error("date value out of range: {0}")]
    OutOfRange(#[from] jiff::Error),
}

/// The reason a rule was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    /// COUNT and UNTIL are mutually exclusive.
    #[error("COUNT and UNTIL must not both be set")]
    CountAndUntil,

    /// INTERVAL must be a positive integer.
    #[error("INTERVAL must be at least 1")]
    ZeroInterval,

    /// A by-field selector is outside of its legal range.
    #[error("{part} value {value} is out of range {min}..={max}")]
    OutOfRange {
        /// Rule part name, e.g. `BYMONTHDAY`
        part: &'static str,
        /// The offending value
        value: i32,
        /// Smallest legal magnitude
        min: i32,
        /// Largest legal magnitude
        max: i32,
    },

    /// A by-field is not allowed with the rule frequency.
    #[error("{part} is not allowed with FREQ={freq}")]
    NotAllowed {
        /// Rule part name, e.g. `BYWEEKNO`
        part: &'static str,
        /// The rule frequency
        freq: Frequency,
    },

    /// An ordinal BYDAY (e.g. `-1FR`) is not allowed here.
    #[error("BYDAY with an ordinal is not allowed with FREQ={freq}{}", week_no_suffix(.with_week_no))]
    OrdinalByDay {
        /// The rule frequency
        freq: Frequency,
        /// Whether BYWEEKNO made the ordinal illegal
        with_week_no: bool,
    },

    /// BYSETPOS needs another BYxxx part to select from.
    #[error("BYSETPOS requires another BYxxx rule part")]
    SetPosWithoutBy,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn week_no_suffix(with_week_no: &bool) -> &'static str {
    if *with_week_no { " and BYWEEKNO" } else { "" }
}
