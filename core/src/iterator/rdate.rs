// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::iterator::RecurrenceIterator;
use crate::value::DateValue;

/// Occurrences from an explicit list of values, as given by RDATE.
#[derive(Debug, Clone, Default)]
pub struct RDateIterator {
    values: Vec<DateValue>,
    index: usize,
}

impl RDateIterator {
    /// Iterate over `values` in ascending order, duplicates removed.
    pub fn new(values: impl IntoIterator<Item = DateValue>) -> Self {
        let mut values: Vec<_> = values.into_iter().collect();
        values.sort_unstable();
        values.dedup();
        Self { values, index: 0 }
    }
}

impl Iterator for RDateIterator {
    type Item = DateValue;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.values.get(self.index).copied()?;
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.values.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl RecurrenceIterator for RDateIterator {
    fn has_next(&mut self) -> bool {
        self.index < self.values.len()
    }

    fn peek(&mut self) -> Option<DateValue> {
        self.values.get(self.index).copied()
    }

    fn advance_to(&mut self, target: &DateValue) {
        let skip = self.values.partition_point(|v| v < target);
        self.index = self.index.max(skip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_and_dedups() {
        let it = RDateIterator::new([
            DateValue::date(2006, 1, 3),
            DateValue::date(2006, 1, 1),
            DateValue::date(2006, 1, 3),
        ]);
        assert_eq!(
            it.collect::<Vec<_>>(),
            [DateValue::date(2006, 1, 1), DateValue::date(2006, 1, 3)]
        );
    }

    #[test]
    fn advances_without_rewinding() {
        let mut it = RDateIterator::new((1..=5).map(|d| DateValue::date(2006, 1, d)));
        it.advance_to(&DateValue::date(2006, 1, 3));
        it.advance_to(&DateValue::date(2006, 1, 3));
        assert_eq!(it.peek(), Some(DateValue::date(2006, 1, 3)));

        it.advance_to(&DateValue::date(2006, 1, 1));
        assert_eq!(it.next(), Some(DateValue::date(2006, 1, 3)));
        assert_eq!(it.size_hint(), (2, Some(2)));
    }
}
