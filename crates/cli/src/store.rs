// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Settings persistence.
//!
//! Passes read settings fresh on every invocation, so edits made between
//! passes take effect on the next one.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::config::{self, Settings};
use crate::error::Result;

pub trait SettingsStore {
    fn load(&self) -> Result<Settings>;
}

/// Settings read from a TOML file on every load.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileStore {
    fn load(&self) -> Result<Settings> {
        Ok(config::load(&self.path)?)
    }
}

/// Shared in-memory settings. Clones share the same value, so a host can
/// keep one handle for editing while a page owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<Settings>>,
}

impl MemoryStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Rc::new(RefCell::new(settings)),
        }
    }

    pub fn set(&self, settings: Settings) {
        *self.inner.borrow_mut() = settings;
    }

    pub fn update(&self, f: impl FnOnce(&mut Settings)) {
        f(&mut self.inner.borrow_mut());
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Result<Settings> {
        Ok(self.inner.borrow().clone())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
