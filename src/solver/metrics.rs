use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Instant;

/// Counters accumulated during a solve.
///
/// All counters are atomic so a progress observer on another thread
/// reads a monotonic, if momentarily stale, snapshot while the search
/// thread keeps mutating them.
#[derive(Debug)]
pub struct SolverMetrics {
    nodes_explored: AtomicU64,
    backtracks: AtomicU64,
    constraint_checks: AtomicU64,
    arc_revisions: AtomicU64,
    domain_reductions: AtomicU64,
    solutions_found: AtomicU64,
    timer: Mutex<Timer>,
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    started: Instant,
    stopped: Option<Instant>,
}

impl SolverMetrics {
    pub fn new() -> Self {
        Self {
            nodes_explored: AtomicU64::new(0),
            backtracks: AtomicU64::new(0),
            constraint_checks: AtomicU64::new(0),
            arc_revisions: AtomicU64::new(0),
            domain_reductions: AtomicU64::new(0),
            solutions_found: AtomicU64::new(0),
            timer: Mutex::new(Timer {
                started: Instant::now(),
                stopped: None,
            }),
        }
    }

    /// Zeroes every counter and restarts the clock.
    pub fn reset(&self) {
        self.nodes_explored.store(0, Ordering::Relaxed);
        self.backtracks.store(0, Ordering::Relaxed);
        self.constraint_checks.store(0, Ordering::Relaxed);
        self.arc_revisions.store(0, Ordering::Relaxed);
        self.domain_reductions.store(0, Ordering::Relaxed);
        self.solutions_found.store(0, Ordering::Relaxed);
        let mut timer = self.timer.lock().unwrap();
        timer.started = Instant::now();
        timer.stopped = None;
    }

    /// Freezes the elapsed time.
    pub fn stop(&self) {
        let mut timer = self.timer.lock().unwrap();
        if timer.stopped.is_none() {
            timer.stopped = Some(Instant::now());
        }
    }

    pub fn increment_nodes_explored(&self) {
        self.nodes_explored.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_backtracks(&self) {
        self.backtracks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_constraint_checks(&self, count: u64) {
        self.constraint_checks.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_arc_revisions(&self, count: u64) {
        self.arc_revisions.fetch_add(count, Ordering::Relaxed);
    }

    pub fn add_domain_reductions(&self, count: u64) {
        self.domain_reductions.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_solutions_found(&self) {
        self.solutions_found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn nodes_explored(&self) -> u64 {
        self.nodes_explored.load(Ordering::Relaxed)
    }

    pub fn backtracks(&self) -> u64 {
        self.backtracks.load(Ordering::Relaxed)
    }

    pub fn elapsed_ms(&self) -> u64 {
        let timer = self.timer.lock().unwrap();
        let end = timer.stopped.unwrap_or_else(Instant::now);
        end.duration_since(timer.started).as_millis() as u64
    }

    /// An immutable snapshot of all counters at this instant.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            nodes_explored: self.nodes_explored.load(Ordering::Relaxed),
            backtracks: self.backtracks.load(Ordering::Relaxed),
            constraint_checks: self.constraint_checks.load(Ordering::Relaxed),
            arc_revisions: self.arc_revisions.load(Ordering::Relaxed),
            domain_reductions: self.domain_reductions.load(Ordering::Relaxed),
            solutions_found: self.solutions_found.load(Ordering::Relaxed),
            elapsed_ms: self.elapsed_ms(),
        }
    }
}

impl Default for SolverMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of the solver counters, attached to results and
/// progress events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub nodes_explored: u64,
    pub backtracks: u64,
    pub constraint_checks: u64,
    pub arc_revisions: u64,
    pub domain_reductions: u64,
    pub solutions_found: u64,
    pub elapsed_ms: u64,
}

impl std::fmt::Display for MetricsSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "nodes={} backtracks={} checks={} revisions={} reductions={} time={}ms",
            self.nodes_explored,
            self.backtracks,
            self.constraint_checks,
            self.arc_revisions,
            self.domain_reductions,
            self.elapsed_ms
        )
    }
}
