// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::ops::Range;

use chumsky::error::Rich;

/// Errors raised while reading recurrence text.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The text does not follow the grammar.
    #[error("{message}")]
    Syntax {
        /// Full error message
        message: String,
        /// Short description of what went wrong at `span`
        reason: String,
        /// Byte range of the offending text
        span: Range<usize>,
    },

    /// The text is well formed but the rule it describes is not.
    #[error(transparent)]
    Rule(#[from] recurcal_core::Error),

    /// A content line names a property other than RRULE, EXRULE, RDATE or
    /// EXDATE.
    #[error("unknown recurrence property `{name}`")]
    UnknownProperty {
        /// The property name
        name: String,
        /// Byte range of the name
        span: Range<usize>,
    },

    /// A TZID parameter or a local time could not be resolved.
    #[error("time zone error: {0}")]
    TimeZone(#[from] jiff::Error),
}

impl ParseError {
    /// Byte range of the offending text, when known.
    #[must_use]
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            ParseError::Syntax { span, .. } | ParseError::UnknownProperty { span, .. } => {
                Some(span.clone())
            }
            ParseError::Rule(_) | ParseError::TimeZone(_) => None,
        }
    }

    /// Convert a chumsky error, shifting its span by `offset` bytes.
    pub(crate) fn from_rich(err: &Rich<'_, char>, offset: usize) -> Self {
        let span = err.span().into_range();
        ParseError::Syntax {
            message: err.to_string(),
            reason: err.reason().to_string(),
            span: span.start + offset..span.end + offset,
        }
    }
}
