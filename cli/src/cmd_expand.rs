// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    error::Error,
    io::{self, Write as _},
};

use clap::{ArgMatches, Command, arg, value_parser};
use jiff::civil;
use jiff::tz::TimeZone;
use recurcal_core::{DateValue, RecurrenceIterator};
use recurcal_ical::keyword::{KW_EXDATE, KW_RDATE, KW_RRULE};
use recurcal_ical::parse_recurrence;

use crate::cmd_check::strip_property_name;
use crate::config::ExpandConfig;
use crate::report::SourceError;
use crate::util::{ArgOutputFormat, parse_date, parse_time_zone};

#[derive(Debug, Clone)]
pub struct CmdExpand {
    pub rrule: String,
    pub start: DateValue,
    pub tz: Option<String>,
    pub limit: Option<usize>,
    pub after: Option<DateValue>,
    pub exdates: Vec<String>,
    pub rdates: Vec<String>,
    pub format: Option<ArgOutputFormat>,
}

impl CmdExpand {
    pub const NAME: &str = "expand";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Print the occurrences of a recurrence rule, one per line")
            .arg(arg!(rrule: <RRULE> "The RRULE value, e.g. FREQ=WEEKLY;BYDAY=MO,WE"))
            .arg(
                arg!(--start <START> "First occurrence, as 20240105T090000 or 2024-01-05T09:00")
                    .required(true)
                    .value_parser(parse_date),
            )
            .arg(arg!(--tz <TZ> "Time zone of the start, an IANA name or an offset like +08:00"))
            .arg(
                arg!(-n --limit <N> "Maximum number of occurrences to print")
                    .value_parser(value_parser!(usize)),
            )
            .arg(
                arg!(--after <AFTER> "Skip occurrences before this local date or date-time")
                    .value_parser(parse_date),
            )
            .arg(
                arg!(--exdate <LIST> "Comma-separated dates to exclude, may be repeated")
                    .action(clap::ArgAction::Append),
            )
            .arg(
                arg!(--rdate <LIST> "Comma-separated dates or periods to add, may be repeated")
                    .action(clap::ArgAction::Append),
            )
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let many = |id: &str| {
            matches
                .get_many::<String>(id)
                .map(|values| values.cloned().collect::<Vec<_>>())
                .unwrap_or_default()
        };

        Ok(Self {
            rrule: matches
                .get_one::<String>("rrule")
                .cloned()
                .unwrap_or_default(),
            start: matches
                .get_one::<DateValue>("start")
                .copied()
                .ok_or("--start is required")?,
            tz: matches.get_one("tz").cloned(),
            limit: matches.get_one("limit").copied(),
            after: matches.get_one("after").copied(),
            exdates: many("exdate"),
            rdates: many("rdate"),
            format: ArgOutputFormat::from(matches),
        })
    }

    pub fn run(self, config: &ExpandConfig) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "expanding rule...");
        self.write(config, &mut io::stdout().lock())
    }

    fn write(
        &self,
        config: &ExpandConfig,
        out: &mut impl io::Write,
    ) -> Result<(), Box<dyn Error>> {
        for line in self.expand(config)? {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    /// The formatted occurrences, flags taking precedence over `config`.
    pub fn expand(&self, config: &ExpandConfig) -> Result<Vec<String>, Box<dyn Error>> {
        let tz = match &self.tz {
            Some(tz) => parse_time_zone(tz)?,
            None => config.time_zone()?,
        };
        let limit = self.limit.unwrap_or(config.limit);
        let format = self.format.unwrap_or(config.format);

        let text = self.content_lines();
        let set = parse_recurrence(&text, self.start, tz.clone())
            .map_err(|e| SourceError::new(text.clone(), e))?;

        let mut iter = set.iter();
        if let Some(after) = self.after {
            iter.advance_to(&after.local_to_utc(&tz));
        }
        iter.take(limit)
            .map(|value| format_occurrence(value, format, &tz))
            .collect()
    }

    fn content_lines(&self) -> String {
        let mut text = format!("{KW_RRULE}:{}\n", strip_property_name(&self.rrule));
        for list in &self.exdates {
            text.push_str(&format!("{KW_EXDATE}:{list}\n"));
        }
        for list in &self.rdates {
            text.push_str(&format!("{KW_RDATE}:{list}\n"));
        }
        text
    }
}

/// Format an occurrence; timed values are in UTC.
fn format_occurrence(
    value: DateValue,
    format: ArgOutputFormat,
    tz: &TimeZone,
) -> Result<String, Box<dyn Error>> {
    match (format, value.is_timed()) {
        (ArgOutputFormat::Ical, false) => Ok(value.to_string()),
        (ArgOutputFormat::Ical, true) => Ok(format!("{value}Z")),
        (ArgOutputFormat::Rfc3339, false) => {
            Ok(civil::DateTime::try_from(value)?.date().to_string())
        }
        (ArgOutputFormat::Rfc3339, true) => {
            let ts = value.to_timestamp()?;
            let offset = tz.to_offset(ts);
            Ok(ts.display_with_offset(offset).to_string())
        }
    }
}
