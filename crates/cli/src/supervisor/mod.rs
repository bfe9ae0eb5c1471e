// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Continuous highlighting.
//!
//! The supervisor re-runs a highlight scan whenever the observed document
//! changes, throttled so that bursts of mutations coalesce into a few scans.
//! It owns no clock and no timers: the host passes `now` into every call and
//! calls [`MutationSupervisor::advance`] when [`MutationSupervisor::next_deadline`]
//! comes due.

pub mod guard;
pub mod throttle;

pub use guard::Suspended;
pub use throttle::{Gate, Throttle};

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use crate::config::ContinuousConfig;
use crate::dom::{Document, MutationRecord, ObserveOptions};
use crate::error::Result;
use crate::results::ResultMap;

/// Something whose mutations can be observed.
pub trait Observed {
    fn observe(&mut self, options: ObserveOptions);
    fn disconnect(&mut self);
    fn take_records(&mut self) -> Vec<MutationRecord>;
}

/// Something that can be rescanned when it changes.
pub trait ScanTarget: Observed {
    fn scan(&mut self) -> Result<ResultMap>;
}

impl Observed for Document {
    fn observe(&mut self, options: ObserveOptions) {
        Document::observe(self, options);
    }

    fn disconnect(&mut self) {
        Document::disconnect(self);
    }

    fn take_records(&mut self) -> Vec<MutationRecord> {
        Document::take_records(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    Idle,
    Observing,
    Scanning,
    /// Observing with the escalated interval in effect.
    Backoff,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SupervisorStats {
    pub triggers: usize,
    pub scans: usize,
    pub failed_scans: usize,
}

pub struct MutationSupervisor {
    config: ContinuousConfig,
    throttle: Throttle,
    running: bool,
    scanning: bool,
    pending: Option<Instant>,
    last_results: Option<ResultMap>,
    stats: SupervisorStats,
}

impl MutationSupervisor {
    pub fn new(config: ContinuousConfig) -> Self {
        Self {
            config,
            throttle: Throttle::new(config),
            running: false,
            scanning: false,
            pending: None,
            last_results: None,
            stats: SupervisorStats::default(),
        }
    }

    pub fn state(&self) -> SupervisorState {
        if !self.running {
            SupervisorState::Idle
        } else if self.scanning {
            SupervisorState::Scanning
        } else if self.throttle.is_escalated() {
            SupervisorState::Backoff
        } else {
            SupervisorState::Observing
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stats(&self) -> SupervisorStats {
        self.stats
    }

    pub fn throttle(&self) -> &Throttle {
        &self.throttle
    }

    /// Results of the most recent successful scan.
    pub fn last_results(&self) -> Option<&ResultMap> {
        self.last_results.as_ref()
    }

    /// The deferred scan, if one is scheduled.
    pub fn pending_scan(&self) -> Option<Instant> {
        self.pending
    }

    /// Earliest instant at which [`MutationSupervisor::advance`] has work.
    pub fn next_deadline(&self) -> Option<Instant> {
        if !self.running {
            return None;
        }
        [self.pending, self.throttle.backoff_deadline()]
            .into_iter()
            .flatten()
            .min()
    }

    /// Scan once now, then observe the whole body for changes.
    ///
    /// Starting while running restarts from a clean throttle.
    pub fn start<T: ScanTarget + ?Sized>(&mut self, target: &mut T, now: Instant) {
        if self.running {
            self.stop(target);
        }
        self.throttle = Throttle::new(self.config);
        self.running = true;
        tracing::info!("continuous highlighting started");
        self.run_scan(target, now);
    }

    /// Cancel any scheduled work and stop observing.
    pub fn stop<T: ScanTarget + ?Sized>(&mut self, target: &mut T) {
        target.disconnect();
        self.pending = None;
        self.throttle = Throttle::new(self.config);
        if self.running {
            self.running = false;
            tracing::info!("continuous highlighting stopped");
        }
    }

    /// Deliver pending mutation records, if any.
    pub fn notify<T: ScanTarget + ?Sized>(&mut self, target: &mut T, now: Instant) {
        if !self.running {
            return;
        }
        let records = target.take_records();
        if records.is_empty() {
            return;
        }
        self.stats.triggers += 1;
        tracing::trace!("{} mutation records", records.len());

        match self.throttle.trigger(now) {
            Gate::RunNow => {
                self.pending = None;
                self.run_scan(target, now);
            }
            Gate::Defer(at) => self.pending = Some(at),
        }
    }

    /// Fire whatever has come due by `now`: the end of a backoff period
    /// and the deferred scan.
    pub fn advance<T: ScanTarget + ?Sized>(&mut self, target: &mut T, now: Instant) {
        if !self.running {
            return;
        }
        self.throttle.advance(now);
        if self.pending.is_some_and(|at| now >= at) {
            self.pending = None;
            self.run_scan(target, now);
        }
    }

    fn run_scan<T: ScanTarget + ?Sized>(&mut self, target: &mut T, now: Instant) {
        self.throttle.mark_ran(now);
        self.scanning = true;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut suspended = Suspended::new(&mut *target, ObserveOptions::all());
            suspended.scan()
        }));
        self.scanning = false;

        match outcome {
            Ok(Ok(results)) => {
                self.stats.scans += 1;
                self.last_results = Some(results);
            }
            Ok(Err(e)) => {
                self.stats.failed_scans += 1;
                tracing::warn!("{}", e);
            }
            Err(_) => {
                self.stats.failed_scans += 1;
                tracing::warn!("scan panicked");
            }
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
