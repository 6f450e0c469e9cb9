// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! recur - expand RFC 5545 recurrence rules from the command line

use std::process::ExitCode;

use recurcal_cli::run;

fn main() -> ExitCode {
    run()
}
