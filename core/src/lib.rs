// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Expand RFC 5545 recurrence rules into ordered calendar occurrences.
//!
//! The crate is organized leaf first:
//!
//! - [`value`]: the calendar value model ([`DateValue`], [`DtBuilder`], [`Period`]).
//! - [`predicate`]: a small boolean algebra used for BY-field filters and exclusions.
//! - [`rule`]: the immutable [`Rule`] and its validating [`RuleBuilder`].
//! - [`iterator`]: lazy, seekable occurrence iterators built on the frequency generators.
//! - [`adapter`]: conversions to and from [`jiff`] timestamps.
//!
//! ```
//! use jiff::tz::TimeZone;
//! use recurcal_core::{DateValue, Frequency, Rule, create_iterator};
//!
//! let rule = Rule::builder(Frequency::Daily)
//!     .interval(2)
//!     .count(3)
//!     .build()
//!     .unwrap();
//!
//! let start = DateValue::date(2006, 1, 1);
//! let dates: Vec<_> = create_iterator(&rule, start, &TimeZone::UTC).collect();
//! assert_eq!(
//!     dates,
//!     [
//!         DateValue::date(2006, 1, 1),
//!         DateValue::date(2006, 1, 3),
//!         DateValue::date(2006, 1, 5),
//!     ]
//! );
//! ```

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool,
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]

pub mod adapter;
mod error;
mod generator;
pub mod iterator;
pub mod predicate;
pub mod rule;
mod tz;
pub mod value;

pub use crate::adapter::{TimestampIterable, TimestampIterator, create_date_iterator};
pub use crate::error::{Error, RuleViolation};
pub use crate::iterator::{
    CompoundIterator, RDateIterator, RRuleIterator, RecurrenceIterable, RecurrenceIterator,
    RecurrenceSet, create_iterable, create_iterator,
};
pub use crate::predicate::Predicate;
pub use crate::rule::{Frequency, Rule, RuleBuilder, Weekday, WeekdayNum};
pub use crate::value::{DateValue, DtBuilder, Period};
