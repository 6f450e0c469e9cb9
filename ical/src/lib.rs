// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Read and write RFC 5545 recurrence text for `recurcal-core`.
//!
//! - [`parse_rrule`] reads an RRULE value into a [`recurcal_core::Rule`].
//! - [`parse_recurrence`] reads RRULE, EXRULE, RDATE and EXDATE content
//!   lines into a [`recurcal_core::RecurrenceSet`].
//! - [`formatter`] writes rules back in canonical form.
//!
//! ```
//! use jiff::tz::TimeZone;
//! use recurcal_core::DateValue;
//! use recurcal_ical::{format_rrule, parse_recurrence, parse_rrule};
//!
//! let rule = parse_rrule("FREQ=YEARLY;BYMONTH=1;BYDAY=SU,MO;COUNT=4").unwrap();
//! assert_eq!(format_rrule(&rule), "FREQ=YEARLY;COUNT=4;BYMONTH=1;BYDAY=SU,MO");
//!
//! let set = parse_recurrence(
//!     "RRULE:FREQ=YEARLY;BYMONTH=1;BYDAY=SU,MO;COUNT=4\nEXDATE:20070107",
//!     DateValue::date(2007, 1, 1),
//!     TimeZone::UTC,
//! )
//! .unwrap();
//! let days: Vec<_> = set.iter().map(|d| d.to_string()).collect();
//! assert_eq!(days, ["20070101", "20070108", "20070114"]);
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
    clippy::match_bool
)]

mod error;
pub mod formatter;
pub mod keyword;
mod parser;
mod recurrence;
mod value;

pub use crate::error::ParseError;
pub use crate::formatter::{format_date_value, format_rrule, write_rrule};
pub use crate::parser::{RRule, parse_date_list, parse_date_value, parse_rrule};
pub use crate::recurrence::parse_recurrence;
