// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cmp::Ordering;

use crate::value::DateValue;

/// A span of time with optional bounds, as used by `RDATE;VALUE=PERIOD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    start: Option<DateValue>,
    end: Option<DateValue>,
}

impl Period {
    /// Create a period; either bound may be open.
    #[must_use]
    pub const fn new(start: Option<DateValue>, end: Option<DateValue>) -> Self {
        Self { start, end }
    }

    /// Inclusive start of the period.
    #[must_use]
    pub const fn start(&self) -> Option<DateValue> {
        self.start
    }

    /// Exclusive end of the period.
    #[must_use]
    pub const fn end(&self) -> Option<DateValue> {
        self.end
    }

    /// Whether `value` falls in `[start, end)`, open bounds admitting all.
    #[must_use]
    pub fn contains(&self, value: &DateValue) -> bool {
        self.start.is_none_or(|start| start <= *value) && self.end.is_none_or(|end| *value < end)
    }

    /// Order by start, a period without a start sorting after every other.
    #[must_use]
    pub fn cmp_by_start(&self, other: &Self) -> Ordering {
        match (self.start, other.start) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Sort periods by their start, stable for equal starts.
pub fn sort_by_start(periods: &mut [Period]) {
    periods.sort_by(Period::cmp_by_start);
}
