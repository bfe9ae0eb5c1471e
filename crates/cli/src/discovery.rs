// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Where settings come from.
//!
//! An explicit `--config` path wins. Otherwise the nearest xword.toml in the
//! working directory or one of its ancestors is used, stopping at the
//! repository root. With neither, passes run against empty settings.

use std::path::{Path, PathBuf};

use crate::config::defaults::CONFIG_FILE;
use crate::store::{FileStore, MemoryStore, SettingsStore};

/// Resolved origin of the settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given on the command line or through `XWORD_CONFIG`.
    Explicit(PathBuf),
    /// Found by searching upward from the working directory.
    Discovered(PathBuf),
    /// Nothing found; no rules.
    Empty,
}

impl ConfigSource {
    pub fn locate(explicit: Option<&Path>, start_dir: &Path) -> Self {
        if let Some(path) = explicit {
            return Self::Explicit(path.to_path_buf());
        }
        match find_config(start_dir) {
            Some(path) => Self::Discovered(path),
            None => Self::Empty,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(path) | Self::Discovered(path) => Some(path),
            Self::Empty => None,
        }
    }

    /// The store a page reads its settings from on every pass.
    pub fn into_store(self) -> Box<dyn SettingsStore> {
        match self {
            Self::Explicit(path) | Self::Discovered(path) => Box::new(FileStore::new(path)),
            Self::Empty => Box::new(MemoryStore::default()),
        }
    }
}

/// Nearest xword.toml at or above `start_dir`, without leaving the
/// repository that contains it.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        if is_repo_root(dir) {
            tracing::trace!("stopped config search at {}", dir.display());
            break;
        }
    }
    None
}

/// `.git` is a directory in a checkout and a file in a worktree.
fn is_repo_root(dir: &Path) -> bool {
    dir.join(".git").exists()
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
