// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, fmt, io};

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use recurcal_ical::ParseError;

/// A parse error together with the text it was raised on.
#[derive(Debug)]
pub struct SourceError {
    pub src: String,
    pub error: ParseError,
}

impl SourceError {
    pub fn new(src: impl Into<String>, error: ParseError) -> Self {
        Self {
            src: src.into(),
            error,
        }
    }

    /// Render the error pointing into its text; errors without a span are
    /// written as a single line.
    pub fn write(&self, w: &mut impl io::Write) -> io::Result<()> {
        let Some(span) = self.error.span() else {
            return writeln!(w, "{}", self.error);
        };

        let reason = match &self.error {
            ParseError::Syntax { reason, .. } => reason.clone(),
            err => err.to_string(),
        };
        Report::build(ReportKind::Error, span.clone())
            .with_config(Config::new().with_index_type(IndexType::Byte))
            .with_message(self.error.to_string())
            .with_label(Label::new(span).with_message(reason).with_color(Color::Red))
            .finish()
            .write(Source::from(self.src.as_str()), w)
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}
