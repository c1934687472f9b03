//! Host capability providers.
//!
//! The tracker never reaches for ambient globals. Everything it needs from
//! the environment (clocks, the mark/measure store, navigation timing) comes
//! through [`HostCapabilities`], so any capability can be reported absent.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use chrono::Utc;

use crate::timeline::{PerformanceEntry, Timeline};

/// Capabilities the tracker consumes from its host.
///
/// Optional capabilities have no-op defaults.
pub trait HostCapabilities: Send + Sync {
    /// Whether a monotonic high-resolution `now` is available.
    fn has_high_res_clock(&self) -> bool;

    /// Whether a named mark/measure store is available.
    fn has_marking(&self) -> bool;

    /// Monotonic high-resolution timestamp in milliseconds, unspecified epoch.
    fn now(&self) -> f64;

    /// Wall-clock milliseconds since the Unix epoch.
    fn wall_clock_ms(&self) -> f64;

    /// Wall-clock navigation start in milliseconds, `0.0` when unknown.
    fn navigation_start(&self) -> f64 {
        0.0
    }

    /// Record a named mark at the current time.
    fn mark(&self, _label: &str) {}

    /// Record a named measure spanning two marks.
    fn measure(&self, _name: &str, _start_mark: &str, _end_mark: &str) {}

    /// The first timeline entry recorded under `name`.
    fn first_entry_by_name(&self, _name: &str) -> Option<PerformanceEntry> {
        None
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn chrono_now_ms() -> f64 {
    Utc::now().timestamp_millis() as f64
}

/// Entries a [`SystemHost`] timeline keeps before evicting the oldest.
pub const DEFAULT_TIMELINE_CAPACITY: usize = 1000;

/// Host backed by the process clocks.
///
/// `now` is milliseconds since the host was created. Navigation start is the
/// wall-clock time at creation.
///
/// Every `end` adds two marks and a measure, so the timeline is bounded:
/// once it holds [`DEFAULT_TIMELINE_CAPACITY`] entries (or the capacity given
/// to [`SystemHost::with_timeline_capacity`]) the oldest entry is dropped for
/// each new one. A long-lived host therefore forgets early entries, and
/// `first_entry_by_name` answers from what is still retained.
#[derive(Debug)]
pub struct SystemHost {
    origin: Instant,
    navigation_start: f64,
    timeline: Mutex<Timeline>,
}

impl SystemHost {
    /// Create a host whose navigation starts now.
    pub fn new() -> Self {
        Self::with_timeline_capacity(DEFAULT_TIMELINE_CAPACITY)
    }

    /// Create a host whose timeline keeps at most `capacity` entries.
    pub fn with_timeline_capacity(capacity: usize) -> Self {
        Self {
            origin: Instant::now(),
            navigation_start: chrono_now_ms(),
            timeline: Mutex::new(Timeline::with_max_entries(capacity)),
        }
    }

    /// Snapshot of the recorded timeline.
    pub fn timeline(&self) -> Timeline {
        lock(&self.timeline).clone()
    }

    /// Drop all recorded marks and measures.
    pub fn clear_timeline(&self) {
        let mut timeline = lock(&self.timeline);
        timeline.clear_marks(None);
        timeline.clear_measures(None);
    }
}

impl Default for SystemHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostCapabilities for SystemHost {
    fn has_high_res_clock(&self) -> bool {
        true
    }

    fn has_marking(&self) -> bool {
        true
    }

    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    fn wall_clock_ms(&self) -> f64 {
        chrono_now_ms()
    }

    fn navigation_start(&self) -> f64 {
        self.navigation_start
    }

    fn mark(&self, label: &str) {
        let at = self.now();
        lock(&self.timeline).mark(label, at);
    }

    fn measure(&self, name: &str, start_mark: &str, end_mark: &str) {
        if lock(&self.timeline).measure(name, start_mark, end_mark).is_none() {
            tracing::debug!(
                target: "marktime::host",
                name,
                start_mark,
                end_mark,
                "measure skipped, mark missing"
            );
        }
    }

    fn first_entry_by_name(&self, name: &str) -> Option<PerformanceEntry> {
        lock(&self.timeline).first_by_name(name).cloned()
    }
}

/// Wall-clock value a fresh [`ManualHost`] starts at (2020-09-13T12:26:40Z).
pub const MANUAL_WALL_CLOCK_ORIGIN_MS: f64 = 1_600_000_000_000.0;

#[derive(Debug)]
struct ManualClock {
    now: f64,
    wall: f64,
    navigation_start: f64,
}

/// Deterministic host with manually advanced clocks.
///
/// Both clocks move together through [`ManualHost::advance`]. Capability flags
/// can be flipped at any time, including between `start` and `end`.
#[derive(Debug)]
pub struct ManualHost {
    high_res_clock: AtomicBool,
    marking: AtomicBool,
    clock: Mutex<ManualClock>,
    timeline: Mutex<Timeline>,
}

impl ManualHost {
    /// Create a host with every capability present, `now` at zero and
    /// navigation starting at [`MANUAL_WALL_CLOCK_ORIGIN_MS`].
    pub fn new() -> Self {
        Self {
            high_res_clock: AtomicBool::new(true),
            marking: AtomicBool::new(true),
            clock: Mutex::new(ManualClock {
                now: 0.0,
                wall: MANUAL_WALL_CLOCK_ORIGIN_MS,
                navigation_start: MANUAL_WALL_CLOCK_ORIGIN_MS,
            }),
            timeline: Mutex::new(Timeline::new()),
        }
    }

    /// Builder: no mark/measure store.
    pub fn without_marking(self) -> Self {
        self.set_marking(false);
        self
    }

    /// Builder: no high-resolution clock and no mark/measure store.
    pub fn without_clock(self) -> Self {
        self.set_high_res_clock(false);
        self.set_marking(false);
        self
    }

    /// Toggle the mark/measure capability.
    pub fn set_marking(&self, enabled: bool) {
        self.marking.store(enabled, Ordering::SeqCst);
    }

    /// Toggle the high-resolution clock capability.
    pub fn set_high_res_clock(&self, enabled: bool) {
        self.high_res_clock.store(enabled, Ordering::SeqCst);
    }

    /// Advance both clocks by `ms` milliseconds.
    pub fn advance(&self, ms: f64) {
        let mut clock = lock(&self.clock);
        clock.now += ms;
        clock.wall += ms;
    }

    /// Set the wall clock to an absolute value.
    pub fn set_wall_clock(&self, ms: f64) {
        lock(&self.clock).wall = ms;
    }

    /// Set the navigation start timestamp; `0.0` means unknown.
    pub fn set_navigation_start(&self, ms: f64) {
        lock(&self.clock).navigation_start = ms;
    }

    /// Put a foreign entry on the timeline.
    pub fn insert_entry(&self, entry: PerformanceEntry) {
        lock(&self.timeline).insert(entry);
    }

    /// Snapshot of the recorded timeline.
    pub fn timeline(&self) -> Timeline {
        lock(&self.timeline).clone()
    }
}

impl Default for ManualHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostCapabilities for ManualHost {
    fn has_high_res_clock(&self) -> bool {
        self.high_res_clock.load(Ordering::SeqCst)
    }

    fn has_marking(&self) -> bool {
        self.marking.load(Ordering::SeqCst)
    }

    fn now(&self) -> f64 {
        lock(&self.clock).now
    }

    fn wall_clock_ms(&self) -> f64 {
        lock(&self.clock).wall
    }

    fn navigation_start(&self) -> f64 {
        lock(&self.clock).navigation_start
    }

    fn mark(&self, label: &str) {
        let at = self.now();
        lock(&self.timeline).mark(label, at);
    }

    fn measure(&self, name: &str, start_mark: &str, end_mark: &str) {
        lock(&self.timeline).measure(name, start_mark, end_mark);
    }

    fn first_entry_by_name(&self, name: &str) -> Option<PerformanceEntry> {
        lock(&self.timeline).first_by_name(name).cloned()
    }
}
