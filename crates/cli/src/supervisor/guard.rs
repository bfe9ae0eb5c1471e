// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Observation suspended for the lifetime of a guard.

use std::ops::{Deref, DerefMut};

use super::Observed;
use crate::dom::ObserveOptions;

/// Disconnects the observer on creation and reconnects it on drop, so a
/// scan's own edits never trigger another scan. Reconnection also happens
/// when the scan returns an error or unwinds.
pub struct Suspended<'t, T: Observed + ?Sized> {
    target: &'t mut T,
    resume: ObserveOptions,
}

impl<'t, T: Observed + ?Sized> Suspended<'t, T> {
    pub fn new(target: &'t mut T, resume: ObserveOptions) -> Self {
        target.disconnect();
        Self { target, resume }
    }
}

impl<T: Observed + ?Sized> Deref for Suspended<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.target
    }
}

impl<T: Observed + ?Sized> DerefMut for Suspended<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.target
    }
}

impl<T: Observed + ?Sized> Drop for Suspended<'_, T> {
    fn drop(&mut self) {
        self.target.observe(self.resume);
    }
}
