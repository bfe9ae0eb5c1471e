// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Adaptive throttle for mutation-triggered scans.
//!
//! The first trigger runs at once. Later triggers run at once when the
//! current interval has passed since the last scan; otherwise a trailing
//! scan is scheduled for `last_scan + interval`. Too many triggers inside the
//! sliding window escalate to the long interval, which holds until the
//! backoff period ends.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::config::ContinuousConfig;

/// What to do with a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    RunNow,
    /// Run once at the given deadline. Replaces any earlier deferred run.
    Defer(Instant),
}

#[derive(Debug, Clone)]
pub struct Throttle {
    config: ContinuousConfig,
    interval: Duration,
    recent: VecDeque<Instant>,
    escalated_until: Option<Instant>,
    last_ran: Option<Instant>,
}

impl Throttle {
    pub fn new(config: ContinuousConfig) -> Self {
        Self {
            config,
            interval: config.short_interval(),
            recent: VecDeque::new(),
            escalated_until: None,
            last_ran: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_escalated(&self) -> bool {
        self.escalated_until.is_some()
    }

    /// When the escalated interval ends, if escalated.
    pub fn backoff_deadline(&self) -> Option<Instant> {
        self.escalated_until
    }

    /// Drop back to the short interval once the backoff has elapsed.
    pub fn advance(&mut self, now: Instant) {
        if let Some(until) = self.escalated_until
            && now >= until
        {
            self.escalated_until = None;
            self.interval = self.config.short_interval();
            self.recent.clear();
            tracing::debug!("mutation rate settled, interval back to {:?}", self.interval);
        }
    }

    /// Register one mutation notification.
    pub fn trigger(&mut self, now: Instant) -> Gate {
        self.advance(now);

        self.recent.push_back(now);
        let window = self.config.window();
        while self
            .recent
            .front()
            .is_some_and(|t| now.saturating_duration_since(*t) > window)
        {
            self.recent.pop_front();
        }

        if self.escalated_until.is_none() && self.recent.len() > self.config.threshold {
            self.interval = self.config.escalated_interval();
            self.escalated_until = Some(saturating_add(now, self.config.backoff()));
            tracing::info!(
                "{} mutations within {:?}, slowing rescans to every {:?}",
                self.recent.len(),
                window,
                self.interval
            );
        }

        match self.last_ran {
            Some(last) if now.saturating_duration_since(last) < self.interval => {
                Gate::Defer(saturating_add(last, self.interval))
            }
            _ => Gate::RunNow,
        }
    }

    pub fn mark_ran(&mut self, now: Instant) {
        self.last_ran = Some(now);
    }
}

/// `at + span`, clamped to the latest instant the platform can represent.
pub fn saturating_add(at: Instant, span: Duration) -> Instant {
    if let Some(sum) = at.checked_add(span) {
        return sum;
    }
    let mut latest = at;
    let mut step = span;
    while !step.is_zero() {
        match latest.checked_add(step) {
            Some(next) => latest = next,
            None => step /= 2,
        }
    }
    latest
}

#[cfg(test)]
#[path = "throttle_tests.rs"]
mod tests;
