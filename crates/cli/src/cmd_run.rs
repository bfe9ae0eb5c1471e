// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Replace and highlight commands.

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use termcolor::StandardStream;

use xword::cli::{Cli, RunArgs};
use xword::discovery::ConfigSource;
use xword::geometry::FixedPitch;
use xword::loader;
use xword::report;
use xword::store::SettingsStore;
use xword::{Command, LivePage};

pub fn run(cli: &Cli, args: &RunArgs, command: Command) -> anyhow::Result<ExitCode> {
    let store = settings_store(cli.config.as_deref())?;
    let mut document = loader::load_document(&args.document)
        .with_context(|| format!("cannot load {}", args.document.display()))?;

    if command == Command::Highlight {
        FixedPitch::default().flow(&mut document);
    }

    let mut page = LivePage::new(document, store);
    let results = page.dispatch(command)?;

    if let Some(path) = &args.write {
        loader::save_document(page.document(), path)?;
        tracing::debug!("wrote {}", path.display());
    }

    let mut stdout = StandardStream::stdout(args.color_mode().choice());
    report::formatter(args.output).write(&mut stdout, &results)?;
    stdout.flush()?;

    Ok(ExitCode::SUCCESS)
}

fn settings_store(explicit: Option<&Path>) -> anyhow::Result<Box<dyn SettingsStore>> {
    let cwd = std::env::current_dir()?;
    let source = ConfigSource::locate(explicit, &cwd);
    match source.path() {
        Some(path) => tracing::debug!("using {}", path.display()),
        None => tracing::warn!("no xword.toml found, running with no rules"),
    }
    Ok(source.into_store())
}
