// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Init command: write a starter xword.toml.

use std::process::ExitCode;

use anyhow::Context;

use xword::cli::InitArgs;
use xword::config::defaults::{CONFIG_FILE, INIT_TEMPLATE};

pub fn run(args: &InitArgs) -> anyhow::Result<ExitCode> {
    let path = std::env::current_dir()?.join(CONFIG_FILE);
    if path.exists() && !args.force {
        eprintln!("{} already exists (use --force to overwrite)", CONFIG_FILE);
        return Ok(ExitCode::FAILURE);
    }
    std::fs::write(&path, INIT_TEMPLATE).with_context(|| format!("cannot write {}", path.display()))?;
    println!("Created {}", CONFIG_FILE);
    Ok(ExitCode::SUCCESS)
}
