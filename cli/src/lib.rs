// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! recur - expand RFC 5545 recurrence rules from the command line.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

mod cli;
mod cmd_check;
mod cmd_expand;
mod config;
mod report;
mod util;

pub use crate::cli::{Cli, Commands, run};
pub use crate::cmd_check::CmdCheck;
pub use crate::cmd_expand::CmdExpand;
pub use crate::config::{Config, ExpandConfig, parse_config};
pub use crate::report::SourceError;
pub use crate::util::ArgOutputFormat;
