// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Crate-level error type.
//!
//! The traversal engine itself never fails: invalid patterns, inaccessible
//! frames and unwritable controls degrade to fewer matches. Errors only come
//! from the edges (settings, document files, command tokens).

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::dom::DomError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dom(#[from] DomError),

    #[error("unknown command {0:?}")]
    UnknownCommand(String),

    #[error("scan failed: {0}")]
    Scan(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
