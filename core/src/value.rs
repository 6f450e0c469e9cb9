// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar value model.
//!
//! [`DateValue`] is the immutable date or date-time every part of the engine
//! speaks, [`DtBuilder`] is the mutable scratch register used for calendar
//! arithmetic, and [`Period`] is an optionally bounded span of time.

mod builder;
pub(crate) mod calendar;
mod date;
mod period;

pub use builder::DtBuilder;
pub use calendar::{days_in_month, days_in_year, is_leap_year};
pub use date::DateValue;
pub use period::{Period, sort_by_start};
