// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{Arg, ArgMatches, arg, value_parser};
use jiff::civil;
use jiff::tz::{Offset, TimeZone};
use recurcal_core::DateValue;
use recurcal_ical::parse_date_value;

/// How occurrences are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgOutputFormat {
    /// `YYYYMMDD` or `YYYYMMDDTHHMMSSZ`
    #[default]
    Ical,

    /// `YYYY-MM-DD` or RFC 3339 with the offset of the time zone
    Rfc3339,
}

impl ArgOutputFormat {
    pub fn arg() -> Arg {
        arg!(--format <FORMAT> "Output format").value_parser(value_parser!(ArgOutputFormat))
    }

    pub fn from(matches: &ArgMatches) -> Option<Self> {
        matches.get_one("format").copied()
    }
}

pub fn arg_verbose() -> Arg {
    arg!(-v --verbose "Log what the engine is doing")
}

pub fn get_verbose(matches: &ArgMatches) -> bool {
    matches.get_flag("verbose")
}

/// Parse a date or date-time given on the command line.
///
/// Accepts the iCalendar forms `20240105` and `20240105T090000` as well as
/// `2024-01-05` and `2024-01-05T09:00[:00]`.
pub fn parse_date(s: &str) -> Result<DateValue, String> {
    if let Ok(value) = parse_date_value(s) {
        Ok(value)
    } else if let Ok(dt) = s.parse::<civil::DateTime>()
        && s.contains('T')
    {
        Ok(DateValue::from(dt))
    } else if let Ok(date) = s.parse::<civil::Date>() {
        Ok(DateValue::from(date))
    } else {
        Err(format!(
            "invalid date `{s}`, expected YYYYMMDD[THHMMSS] or YYYY-MM-DD[THH:MM[:SS]]"
        ))
    }
}

/// Resolve an IANA time zone name or a fixed offset such as `+08:00`.
pub fn parse_time_zone(s: &str) -> Result<TimeZone, Box<dyn Error>> {
    let Some(rest) = s.strip_prefix(['+', '-']) else {
        return Ok(TimeZone::get(s)?);
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    let (hours, minutes) = match digits.len() {
        2 => (digits.as_str(), "00"),
        4 => digits.split_at(2),
        _ => return Err(format!("invalid offset `{s}`, expected ±HH[:MM]").into()),
    };
    let seconds = hours.parse::<i32>()? * 3600 + minutes.parse::<i32>()? * 60;
    let seconds = if s.starts_with('-') { -seconds } else { seconds };
    Ok(TimeZone::fixed(Offset::from_seconds(seconds)?))
}
