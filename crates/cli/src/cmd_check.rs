// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check command: does a search string compile under the given flags?

use std::process::ExitCode;

use xword::ScopeFlags;
use xword::cli::CheckArgs;
use xword::pattern;

pub fn run(args: &CheckArgs) -> anyhow::Result<ExitCode> {
    let scope = ScopeFlags {
        use_regex: args.regex,
        match_case: args.match_case,
        ..ScopeFlags::default()
    };

    match pattern::check(&args.search, &scope) {
        Ok(compiled) => {
            let flags = if args.match_case { "g" } else { "gi" };
            println!("ok: /{}/{}", compiled.as_str(), flags);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
