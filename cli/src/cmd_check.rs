// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use recurcal_ical::{format_rrule, parse_rrule};

use crate::report::SourceError;

#[derive(Debug, Clone)]
pub struct CmdCheck {
    pub rrule: String,
}

impl CmdCheck {
    pub const NAME: &str = "check";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Validate a recurrence rule and print it in canonical form")
            .arg(arg!(rrule: <RRULE> "The RRULE value, e.g. FREQ=WEEKLY;BYDAY=MO,WE"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            rrule: matches
                .get_one::<String>("rrule")
                .cloned()
                .unwrap_or_default(),
        }
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "checking rule...");
        println!("{}", self.check()?);
        Ok(())
    }

    fn check(&self) -> Result<String, SourceError> {
        let src = strip_property_name(&self.rrule);
        let rule = parse_rrule(src).map_err(|e| SourceError::new(src, e))?;
        Ok(format_rrule(&rule))
    }
}

/// Accept the value with or without the `RRULE:` prefix.
pub fn strip_property_name(src: &str) -> &str {
    let src = src.trim();
    src.strip_prefix("RRULE:").unwrap_or(src)
}
