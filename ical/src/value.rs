// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parsers for the RFC 5545 value types carried by recurrence properties.

mod datetime;
mod duration;
mod rrule;

use chumsky::extra;
use chumsky::prelude::*;

pub(crate) use crate::value::datetime::{
    DateText, RDateText, value_date_text, values_date_text, values_rdate,
};
pub(crate) use crate::value::rrule::value_rrule;

/// Parser state shared by every value parser: `&str` input, rich errors.
pub(crate) type Extra<'src> = extra::Err<Rich<'src, char>>;

/// Unsigned decimal integer of at most `max_digits` digits.
fn uint<'src>(max_digits: usize) -> impl Parser<'src, &'src str, u32, Extra<'src>> + Clone {
    select! { c @ '0'..='9' => c }
        .repeated()
        .at_least(1)
        .at_most(max_digits)
        .collect::<String>()
        .try_map(|str, span| {
            lexical::parse::<u32, _>(&str).map_err(|_| Rich::custom(span, "integer out of range"))
        })
}

/// Optionally signed decimal integer of at most `max_digits` digits.
fn int<'src>(max_digits: usize) -> impl Parser<'src, &'src str, i32, Extra<'src>> + Clone {
    is_positive()
        .then(uint(max_digits))
        .try_map(|(positive, n), span| {
            let n = i32::try_from(n).map_err(|_| Rich::custom(span, "integer out of range"))?;
            Ok(if positive { n } else { -n })
        })
}

fn is_positive<'src>() -> impl Parser<'src, &'src str, bool, Extra<'src>> + Copy {
    select! { c @ ('+' | '-') => c }
        .or_not()
        .map(|c| !matches!(c, Some('-')))
}

macro_rules! define_digit_select {
    ($fname:ident => { $($ch:literal),+ $(,)? }) => {
        #[allow(clippy::char_lit_as_u8)]
        fn $fname<'src>() -> impl Parser<'src, &'src str, i32, Extra<'src>> + Copy {
            select! {
                $(
                    $ch => i32::from($ch as u8 - b'0'),
                )+
            }
        }
    };
}

define_digit_select!(d0_1 => { '0', '1' });
define_digit_select!(d0_2 => { '0', '1', '2' });
define_digit_select!(d0_3 => { '0', '1', '2', '3' });
define_digit_select!(d0_5 => { '0', '1', '2', '3', '4', '5' });
define_digit_select!(d0_9 => { '0', '1', '2', '3', '4', '5', '6', '7', '8', '9' });
define_digit_select!(d1_2 => { '1', '2' });
define_digit_select!(d1_9 => { '1', '2', '3', '4', '5', '6', '7', '8', '9' });
