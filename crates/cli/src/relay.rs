// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command relay between a host and a live page.
//!
//! A host (popup, extension background, CLI) sends a [`Command`]; the page
//! runs the matching pass against its own document with settings read fresh
//! from its store, and answers with the result map.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::dom::{Document, MutationRecord, ObserveOptions};
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::results::ResultMap;
use crate::store::SettingsStore;
use crate::supervisor::{MutationSupervisor, Observed, ScanTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Replace,
    Highlight,
}

impl Command {
    pub const REPLACE_TOKEN: &'static str = "searchAndReplaceInContentScript";
    pub const HIGHLIGHT_TOKEN: &'static str = "searchAndHighlightInContentScript";

    pub fn token(self) -> &'static str {
        match self {
            Command::Replace => Self::REPLACE_TOKEN,
            Command::Highlight => Self::HIGHLIGHT_TOKEN,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            Self::REPLACE_TOKEN => Ok(Command::Replace),
            Self::HIGHLIGHT_TOKEN => Ok(Command::Highlight),
            other => Err(Error::UnknownCommand(other.to_string())),
        }
    }
}

/// A document together with the settings store and engine that act on it.
pub struct LivePage {
    document: Document,
    store: Box<dyn SettingsStore>,
    engine: Engine,
}

impl LivePage {
    pub fn new(document: Document, store: Box<dyn SettingsStore>) -> Self {
        Self::with_engine(document, store, Engine::default())
    }

    pub fn with_engine(document: Document, store: Box<dyn SettingsStore>, engine: Engine) -> Self {
        Self {
            document,
            store,
            engine,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn replace(&mut self) -> Result<ResultMap> {
        let settings = self.store.load()?;
        Ok(self.engine.replace(&mut self.document, &settings))
    }

    pub fn highlight(&mut self) -> Result<ResultMap> {
        let settings = self.store.load()?;
        Ok(self.engine.highlight(&mut self.document, &settings))
    }

    pub fn dispatch(&mut self, command: Command) -> Result<ResultMap> {
        tracing::debug!("dispatching {}", command);
        match command {
            Command::Replace => self.replace(),
            Command::Highlight => self.highlight(),
        }
    }

    /// Dispatch a raw command token.
    pub fn handle(&mut self, token: &str) -> Result<ResultMap> {
        let command = token.parse()?;
        self.dispatch(command)
    }

    /// Start continuous highlighting if the stored scope asks for it.
    pub fn auto_start(&mut self, supervisor: &mut MutationSupervisor, now: Instant) -> Result<bool> {
        let settings = self.store.load()?;
        if !settings.scope.auto_highlight {
            return Ok(false);
        }
        supervisor.start(self, now);
        Ok(true)
    }
}

impl Observed for LivePage {
    fn observe(&mut self, options: ObserveOptions) {
        self.document.observe(options);
    }

    fn disconnect(&mut self) {
        self.document.disconnect();
    }

    fn take_records(&mut self) -> Vec<MutationRecord> {
        self.document.take_records()
    }
}

impl ScanTarget for LivePage {
    fn scan(&mut self) -> Result<ResultMap> {
        self.highlight()
    }
}

#[cfg(test)]
#[path = "relay_tests.rs"]
mod tests;
