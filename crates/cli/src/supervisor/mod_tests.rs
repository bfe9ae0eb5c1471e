#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::time::Duration;

use super::*;
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Succeed,
    Fail,
    Panic,
}

/// A document that counts its scans and edits itself while scanning.
struct Page {
    doc: Document,
    scans: usize,
    observed_during_scan: Vec<bool>,
    outcome: Outcome,
}

impl Page {
    fn new() -> Self {
        Self {
            doc: Document::from_markup("<p>text</p>"),
            scans: 0,
            observed_during_scan: Vec::new(),
            outcome: Outcome::Succeed,
        }
    }

    /// An edit made by "someone else".
    fn mutate(&mut self) {
        let body = self.doc.body();
        let text = self.doc.create_text("more");
        self.doc.append_child(body, text).unwrap();
    }
}

impl Observed for Page {
    fn observe(&mut self, options: ObserveOptions) {
        self.doc.observe(options);
    }

    fn disconnect(&mut self) {
        self.doc.disconnect();
    }

    fn take_records(&mut self) -> Vec<MutationRecord> {
        self.doc.take_records()
    }
}

impl ScanTarget for Page {
    fn scan(&mut self) -> Result<ResultMap> {
        self.scans += 1;
        self.observed_during_scan.push(self.doc.is_observed());
        self.mutate();
        match self.outcome {
            Outcome::Succeed => Ok(ResultMap::new()),
            Outcome::Fail => Err(Error::Scan("boom".to_string())),
            Outcome::Panic => panic!("scan blew up"),
        }
    }
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn started(page: &mut Page, now: Instant) -> MutationSupervisor {
    let mut supervisor = MutationSupervisor::new(ContinuousConfig::default());
    supervisor.start(page, now);
    supervisor
}

// =============================================================================
// LIFECYCLE
// =============================================================================

#[test]
fn start_scans_once_and_observes() {
    let mut page = Page::new();
    let supervisor = started(&mut page, Instant::now());

    assert_eq!(page.scans, 1);
    assert!(page.doc.is_observed());
    assert_eq!(supervisor.state(), SupervisorState::Observing);
    assert_eq!(supervisor.stats().scans, 1);
    assert!(supervisor.last_results().is_some());
}

#[test]
fn scan_runs_with_observer_disconnected() {
    let mut page = Page::new();
    let t0 = Instant::now();
    let mut supervisor = started(&mut page, t0);

    assert_eq!(page.observed_during_scan, vec![false]);
    // the scan's own edit produced no record
    supervisor.notify(&mut page, t0 + ms(1_000));
    assert_eq!(page.scans, 1);
    assert_eq!(supervisor.stats().triggers, 0);
}

#[test]
fn stop_disconnects_and_cancels_pending_scan() {
    let mut page = Page::new();
    let t0 = Instant::now();
    let mut supervisor = started(&mut page, t0);

    page.mutate();
    supervisor.notify(&mut page, t0 + ms(100));
    assert!(supervisor.pending_scan().is_some());

    supervisor.stop(&mut page);
    assert_eq!(supervisor.state(), SupervisorState::Idle);
    assert!(!page.doc.is_observed());
    assert_eq!(supervisor.pending_scan(), None);
    assert_eq!(supervisor.next_deadline(), None);

    supervisor.advance(&mut page, t0 + ms(10_000));
    assert_eq!(page.scans, 1);
}

#[test]
fn stopped_supervisor_ignores_notifications() {
    let mut page = Page::new();
    let mut supervisor = MutationSupervisor::new(ContinuousConfig::default());
    page.doc.observe(ObserveOptions::all());
    page.mutate();
    supervisor.notify(&mut page, Instant::now());
    assert_eq!(page.scans, 0);
    assert_eq!(supervisor.stats().triggers, 0);
}

#[test]
fn restart_scans_again() {
    let mut page = Page::new();
    let t0 = Instant::now();
    let mut supervisor = started(&mut page, t0);
    supervisor.start(&mut page, t0 + ms(10));
    assert_eq!(page.scans, 2);
    assert!(supervisor.is_running());
    assert!(page.doc.is_observed());
}

// =============================================================================
// THROTTLING
// =============================================================================

#[test]
fn notify_without_records_does_nothing() {
    let mut page = Page::new();
    let t0 = Instant::now();
    let mut supervisor = started(&mut page, t0);
    supervisor.notify(&mut page, t0 + ms(5_000));
    assert_eq!(page.scans, 1);
}

#[test]
fn burst_coalesces_into_one_trailing_scan() {
    let mut page = Page::new();
    let t0 = Instant::now();
    let mut supervisor = started(&mut page, t0);

    for i in 1..=3 {
        page.mutate();
        supervisor.notify(&mut page, t0 + ms(100 * i));
    }
    assert_eq!(page.scans, 1);
    assert_eq!(supervisor.pending_scan(), Some(t0 + ms(600)));
    assert_eq!(supervisor.next_deadline(), Some(t0 + ms(600)));

    supervisor.advance(&mut page, t0 + ms(599));
    assert_eq!(page.scans, 1);
    supervisor.advance(&mut page, t0 + ms(600));
    assert_eq!(page.scans, 2);
    assert_eq!(supervisor.pending_scan(), None);
}

#[test]
fn spaced_mutations_scan_immediately() {
    let mut page = Page::new();
    let t0 = Instant::now();
    let mut supervisor = started(&mut page, t0);

    page.mutate();
    supervisor.notify(&mut page, t0 + ms(700));
    assert_eq!(page.scans, 2);
    assert_eq!(supervisor.pending_scan(), None);
}

#[test]
fn sustained_mutations_enter_backoff() {
    let mut page = Page::new();
    let t0 = Instant::now();
    let mut supervisor = started(&mut page, t0);

    for i in 1..=9u64 {
        page.mutate();
        supervisor.notify(&mut page, t0 + ms(650 * i));
    }
    assert_eq!(page.scans, 9);
    assert_eq!(supervisor.state(), SupervisorState::Backoff);
    assert_eq!(supervisor.throttle().interval(), ms(4_000));
    assert_eq!(supervisor.pending_scan(), Some(t0 + ms(650 * 8 + 4_000)));

    // the backoff ends and the deferred scan has long since fired
    supervisor.advance(&mut page, t0 + ms(650 * 9 + 20_000));
    assert_eq!(page.scans, 10);
    assert_eq!(supervisor.state(), SupervisorState::Observing);
    assert_eq!(supervisor.throttle().interval(), ms(600));
}

// =============================================================================
// FAILURES
// =============================================================================

#[test]
fn failed_scan_resumes_observation() {
    let mut page = Page::new();
    page.outcome = Outcome::Fail;
    let supervisor = started(&mut page, Instant::now());

    assert!(page.doc.is_observed());
    assert_eq!(supervisor.stats().failed_scans, 1);
    assert_eq!(supervisor.stats().scans, 0);
    assert!(supervisor.last_results().is_none());
    assert!(supervisor.is_running());
}

#[test]
fn panicking_scan_resumes_observation() {
    let mut page = Page::new();
    page.outcome = Outcome::Panic;
    let t0 = Instant::now();
    let mut supervisor = started(&mut page, t0);

    assert!(page.doc.is_observed());
    assert_eq!(supervisor.stats().failed_scans, 1);
    assert_eq!(supervisor.state(), SupervisorState::Observing);

    page.outcome = Outcome::Succeed;
    page.mutate();
    supervisor.notify(&mut page, t0 + ms(1_000));
    assert_eq!(supervisor.stats().scans, 1);
}

#[test]
fn guard_reconnects_on_drop() {
    let mut page = Page::new();
    {
        let suspended = Suspended::new(&mut page, ObserveOptions::all());
        assert!(!suspended.doc.is_observed());
    }
    assert!(page.doc.is_observed());
}
