//! The metric tracker.
//!
//! A metric is a named span opened with [`MetricTracker::start`] and closed
//! with [`MetricTracker::end`]. At most one span per name is in flight.
//!
//! # Clock selection
//!
//! When the host can mark its timeline, timestamps come from the host's
//! high-resolution clock (milliseconds). Otherwise they come from the wall
//! clock converted by [`FallbackClock`]. Capabilities are queried on every
//! call, so a host whose capabilities change mid-span will subtract values
//! from two different clocks.
//!
//! # Duration resolution
//!
//! With marking available, the first timeline entry named after the metric
//! wins if it is anything other than a `measure` entry. This lets a foreign
//! entry that shares the name override the tracker's own span. Otherwise the
//! duration is `end - start`, and a zero span is [`Measurement::Unmeasured`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::analytics::{AnalyticsSink, TimingHit};
use crate::config::{AnalyticsConfig, FallbackClock, TrackerConfig};
use crate::deferred::Deferred;
use crate::error::TimingWarning;
use crate::host::{HostCapabilities, SystemHost};
use crate::measurement::Measurement;
use crate::report::{Reporter, TracingReporter};
use crate::timeline::EntryType;

/// Metric name used for the first-paint sample.
pub const FIRST_PAINT: &str = "firstPaint";

/// One in-flight measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
struct MetricRecord {
    start: f64,
    /// `0.0` until the record is ended
    end: f64,
}

#[derive(Debug)]
struct TrackerState {
    metrics: HashMap<String, MetricRecord>,
    analytics: AnalyticsConfig,
    first_paint_duration: f64,
}

/// Tracks named timing spans and reports their durations.
///
/// Cloning is cheap; clones share the same in-flight metrics, analytics
/// settings and first-paint value.
#[derive(Clone)]
pub struct MetricTracker {
    state: Arc<Mutex<TrackerState>>,
    host: Arc<dyn HostCapabilities>,
    reporter: Arc<dyn Reporter>,
    analytics_sink: Option<Arc<dyn AnalyticsSink>>,
    fallback_clock: FallbackClock,
}

impl MetricTracker {
    /// Create a tracker that reports through `tracing` and has no analytics sink.
    pub fn new(config: TrackerConfig, host: Arc<dyn HostCapabilities>) -> Self {
        let reporter =
            TracingReporter::new(&config.log_prefix).with_color(config.colored_output);
        Self::with_parts(config, host, Arc::new(reporter), None)
    }

    /// Create a tracker on the process clocks with default configuration.
    pub fn system() -> Self {
        Self::new(TrackerConfig::default(), Arc::new(SystemHost::new()))
    }

    /// Create a tracker from explicit collaborators.
    ///
    /// Warns once through `reporter` if the host has no high-resolution clock.
    pub fn with_parts(
        config: TrackerConfig,
        host: Arc<dyn HostCapabilities>,
        reporter: Arc<dyn Reporter>,
        analytics_sink: Option<Arc<dyn AnalyticsSink>>,
    ) -> Self {
        let tracker = Self {
            state: Arc::new(Mutex::new(TrackerState {
                metrics: HashMap::new(),
                analytics: config.analytics,
                first_paint_duration: 0.0,
            })),
            host,
            reporter,
            analytics_sink,
            fallback_clock: config.fallback_clock,
        };

        if !tracker.supports_high_res_clock() {
            tracker.reporter.warn(&TimingWarning::Unsupported);
        }

        tracker
    }

    /// Whether the host exposes a high-resolution clock.
    pub fn supports_high_res_clock(&self) -> bool {
        self.host.has_high_res_clock()
    }

    /// Whether the host exposes a mark/measure store.
    pub fn supports_marking(&self) -> bool {
        self.host.has_marking()
    }

    /// Open the span `name`.
    ///
    /// No-op with a warning if `name` is empty or already in flight.
    pub fn start(&self, name: &str) {
        if !self.check_metric_name(name) {
            return;
        }
        if !self.supports_marking() {
            self.warn(TimingWarning::TimelineUnmarked {
                name: name.to_string(),
            });
        }

        let inserted = {
            let mut state = self.state();
            if state.metrics.contains_key(name) {
                false
            } else {
                let start = self.performance_now();
                state
                    .metrics
                    .insert(name.to_string(), MetricRecord { start, end: 0.0 });
                true
            }
        };

        if !inserted {
            self.warn(TimingWarning::AlreadyStarted {
                name: name.to_string(),
            });
            return;
        }

        self.mark(name, "start");
        tracing::trace!(target: "marktime", metric = name, "metric started");
    }

    /// Close the span `name` and return its duration.
    ///
    /// The span stops being active as soon as `end` is entered. When several
    /// threads end the same span, one gets the duration and the rest get
    /// [`TimingWarning::AlreadyStopped`].
    ///
    /// With `log` set, the duration is also reported as a metric line. The
    /// duration is forwarded to analytics when enabled.
    pub fn end(&self, name: &str, log: bool) -> Measurement {
        if !self.check_metric_name(name) {
            return Measurement::Invalid(TimingWarning::MissingMetricName);
        }

        // Removed under one lock: only one concurrent `end` gets the record.
        let record = self.state().metrics.remove(name).map(|mut record| {
            record.end = self.performance_now();
            record
        });

        let Some(record) = record else {
            let warning = TimingWarning::AlreadyStopped {
                name: name.to_string(),
            };
            self.warn(warning.clone());
            return Measurement::Invalid(warning);
        };

        self.mark(name, "end");
        self.measure(name, "start", "end");

        let measurement = self.resolve_duration(name, &record);
        let value = measurement
            .legacy_value()
            .unwrap_or(crate::measurement::UNMEASURED_SENTINEL);

        if log {
            self.log(name, value);
        }

        self.send_timing(name, value);

        tracing::trace!(
            target: "marktime",
            metric = name,
            duration = value,
            "metric completed"
        );

        measurement
    }

    /// Close the span `name` on the next runtime turn, after pending work
    /// (such as a render pass) has had a chance to run.
    pub fn end_after_paint(&self, name: &str, log: bool) -> Deferred<Measurement> {
        let tracker = self.clone();
        let name = name.to_string();
        Deferred::schedule("end_after_paint", self.reporter.clone(), move || {
            tracker.end(&name, log)
        })
    }

    /// Sample the time since navigation start on the next runtime turn.
    ///
    /// The result is stored as [`MetricTracker::first_paint_duration`] and
    /// always forwarded to analytics, even when it is zero. The returned
    /// handle may be dropped.
    pub fn first_paint(&self) -> Deferred<f64> {
        let tracker = self.clone();
        Deferred::schedule("first_paint", self.reporter.clone(), move || {
            tracker.record_first_paint()
        })
    }

    /// Report `duration_ms` for `name` as a metric line.
    ///
    /// Warns instead if `name` is empty or the duration is zero.
    pub fn log(&self, name: &str, duration_ms: f64) {
        if name.is_empty() || is_falsy(duration_ms) {
            self.warn(TimingWarning::MissingLogInput);
            return;
        }
        self.reporter.metric(name, duration_ms);
    }

    /// Last sampled first-paint duration in milliseconds, `0.0` before any
    /// sample or when navigation start is unknown.
    pub fn first_paint_duration(&self) -> f64 {
        self.state().first_paint_duration
    }

    /// Current analytics settings.
    pub fn analytics(&self) -> AnalyticsConfig {
        self.state().analytics.clone()
    }

    /// Replace the analytics settings.
    pub fn set_analytics(&self, analytics: AnalyticsConfig) {
        self.state().analytics = analytics;
    }

    /// Edit the analytics settings in place.
    pub fn update_analytics(&self, update: impl FnOnce(&mut AnalyticsConfig)) {
        update(&mut self.state().analytics);
    }

    /// Whether a span named `name` is in flight.
    pub fn is_active(&self, name: &str) -> bool {
        self.state().metrics.contains_key(name)
    }

    /// Number of spans in flight.
    pub fn active_count(&self) -> usize {
        self.state().metrics.len()
    }

    fn record_first_paint(&self) -> f64 {
        let navigation_start = self.host.navigation_start();
        let duration = if navigation_start != 0.0 {
            self.host.wall_clock_ms() - navigation_start
        } else {
            0.0
        };

        self.state().first_paint_duration = duration;

        if !is_falsy(duration) {
            self.log(FIRST_PAINT, duration);
        }
        self.send_timing(FIRST_PAINT, duration);

        duration
    }

    fn resolve_duration(&self, name: &str, record: &MetricRecord) -> Measurement {
        if self.supports_marking() {
            if let Some(entry) = self.host.first_entry_by_name(name) {
                if entry.entry_type != EntryType::Measure {
                    return Measurement::Measured(entry.duration);
                }
            }
        }

        let duration = record.end - record.start;
        if is_falsy(duration) {
            Measurement::Unmeasured
        } else {
            Measurement::Measured(duration)
        }
    }

    fn performance_now(&self) -> f64 {
        if self.supports_marking() {
            self.host.now()
        } else {
            self.fallback_clock.convert(self.host.wall_clock_ms())
        }
    }

    fn mark(&self, name: &str, boundary: &str) {
        if !self.supports_marking() {
            return;
        }
        self.host.mark(&mark_label(name, boundary));
    }

    fn measure(&self, name: &str, start_boundary: &str, end_boundary: &str) {
        if !self.supports_marking() {
            return;
        }
        self.host.measure(
            name,
            &mark_label(name, start_boundary),
            &mark_label(name, end_boundary),
        );
    }

    fn send_timing(&self, name: &str, duration: f64) {
        let analytics = self.analytics();
        if !analytics.enabled {
            return;
        }
        match &self.analytics_sink {
            Some(sink) => sink.send(&TimingHit::new(name, &analytics.timing_variable, duration)),
            None => self.warn(TimingWarning::AnalyticsNotLoaded),
        }
    }

    fn check_metric_name(&self, name: &str) -> bool {
        if name.is_empty() {
            self.warn(TimingWarning::MissingMetricName);
            return false;
        }
        true
    }

    fn warn(&self, warning: TimingWarning) {
        self.reporter.warn(&warning);
    }

    fn state(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MetricTracker {
    fn default() -> Self {
        Self::system()
    }
}

impl std::fmt::Debug for MetricTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricTracker")
            .field("active", &self.active_count())
            .field("fallback_clock", &self.fallback_clock)
            .field("has_analytics_sink", &self.analytics_sink.is_some())
            .finish_non_exhaustive()
    }
}

fn mark_label(name: &str, boundary: &str) -> String {
    format!("mark_{}_{}", name, boundary)
}

/// Zero and NaN count as "no value".
fn is_falsy(value: f64) -> bool {
    value == 0.0 || value.is_nan()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::RecordingAnalytics;
    use crate::host::{ManualHost, MANUAL_WALL_CLOCK_ORIGIN_MS};
    use crate::report::RecordingReporter;
    use crate::timeline::PerformanceEntry;

    struct Fixture {
        host: Arc<ManualHost>,
        reporter: Arc<RecordingReporter>,
        analytics: Arc<RecordingAnalytics>,
        tracker: MetricTracker,
    }

    fn fixture_with(host: ManualHost, config: TrackerConfig) -> Fixture {
        let host = Arc::new(host);
        let reporter = Arc::new(RecordingReporter::new());
        let analytics = Arc::new(RecordingAnalytics::new());
        let tracker = MetricTracker::with_parts(
            config,
            host.clone(),
            reporter.clone(),
            Some(analytics.clone()),
        );
        Fixture {
            host,
            reporter,
            analytics,
            tracker,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(ManualHost::new(), TrackerConfig::default())
    }

    #[test]
    fn test_new_tracker_defaults() {
        let f = fixture();
        assert_eq!(f.tracker.active_count(), 0);
        assert_eq!(f.tracker.first_paint_duration(), 0.0);
        assert_eq!(f.tracker.analytics(), AnalyticsConfig::default());
        assert!(f.reporter.reports().is_empty());
    }

    #[test]
    fn test_construction_warns_without_clock() {
        let f = fixture_with(ManualHost::new().without_clock(), TrackerConfig::default());
        assert_eq!(f.reporter.warnings(), vec![TimingWarning::Unsupported]);
        assert!(!f.tracker.supports_high_res_clock());
    }

    #[test]
    fn test_start_end_measures_span() {
        let f = fixture();
        f.tracker.start("load");
        assert!(f.tracker.is_active("load"));

        f.host.advance(42.0);
        let result = f.tracker.end("load", false);

        assert_eq!(result, Measurement::Measured(42.0));
        assert!(!f.tracker.is_active("load"));
        assert!(f.reporter.reports().is_empty());
    }

    #[test]
    fn test_start_end_writes_marks_and_measure() {
        let f = fixture();
        f.tracker.start("load");
        f.host.advance(10.0);
        f.tracker.end("load", false);

        let timeline = f.host.timeline();
        assert_eq!(timeline.entries_by_name("mark_load_start").len(), 1);
        assert_eq!(timeline.entries_by_name("mark_load_end").len(), 1);
        let measure = timeline.first_by_name("load").unwrap();
        assert_eq!(measure.entry_type, EntryType::Measure);
        assert_eq!(measure.duration, 10.0);
    }

    #[test]
    fn test_zero_span_is_unmeasured() {
        let f = fixture();
        f.tracker.start("instant");
        let result = f.tracker.end("instant", false);

        assert_eq!(result, Measurement::Unmeasured);
        assert_eq!(result.legacy_value(), Some(-1.0));
    }

    #[test]
    fn test_end_without_start() {
        let f = fixture();
        let result = f.tracker.end("missing", false);

        assert!(result.is_invalid());
        assert_eq!(result.legacy_value(), None);
        assert_eq!(
            f.reporter.warnings(),
            vec![TimingWarning::AlreadyStopped {
                name: "missing".to_string()
            }]
        );
    }

    #[test]
    fn test_double_start_keeps_first_record() {
        let f = fixture();
        f.tracker.start("load");
        f.host.advance(5.0);
        f.tracker.start("load");

        assert_eq!(f.tracker.active_count(), 1);
        assert_eq!(
            f.reporter.warnings(),
            vec![TimingWarning::AlreadyStarted {
                name: "load".to_string()
            }]
        );

        f.host.advance(5.0);
        assert_eq!(f.tracker.end("load", false), Measurement::Measured(10.0));
    }

    #[test]
    fn test_restart_after_end() {
        let f = fixture();
        f.tracker.start("load");
        f.host.advance(1.0);
        f.tracker.end("load", false);
        f.tracker.start("load");

        assert!(f.tracker.is_active("load"));
        assert!(f.reporter.warnings().is_empty());
    }

    #[test]
    fn test_empty_name_is_noop() {
        let f = fixture();
        f.tracker.start("");
        let result = f.tracker.end("", true);

        assert_eq!(result, Measurement::Invalid(TimingWarning::MissingMetricName));
        assert_eq!(f.tracker.active_count(), 0);
        assert_eq!(
            f.reporter.warnings(),
            vec![
                TimingWarning::MissingMetricName,
                TimingWarning::MissingMetricName
            ]
        );
        assert!(f.host.timeline().is_empty());
    }

    #[test]
    fn test_start_without_marking_warns_but_records() {
        let f = fixture_with(ManualHost::new().without_marking(), TrackerConfig::default());
        f.tracker.start("load");

        assert!(f.tracker.is_active("load"));
        assert_eq!(
            f.reporter.warnings(),
            vec![TimingWarning::TimelineUnmarked {
                name: "load".to_string()
            }]
        );
        assert!(f.host.timeline().is_empty());
    }

    #[test]
    fn test_fallback_clock_seconds() {
        let f = fixture_with(ManualHost::new().without_marking(), TrackerConfig::default());
        f.tracker.start("load");
        f.host.advance(120.0);
        let duration = f.tracker.end("load", false).duration().unwrap();

        assert!((duration - 0.12).abs() < 1e-6, "got {}", duration);
    }

    #[test]
    fn test_fallback_clock_milliseconds() {
        let config = TrackerConfig::default().with_fallback_clock(FallbackClock::Milliseconds);
        let f = fixture_with(ManualHost::new().without_marking(), config);
        f.tracker.start("load");
        f.host.advance(120.0);

        assert_eq!(f.tracker.end("load", false), Measurement::Measured(120.0));
    }

    #[test]
    fn test_foreign_entry_wins_resolution() {
        let f = fixture();
        f.host
            .insert_entry(PerformanceEntry::new("load", EntryType::Mark, 0.0, 77.0));

        f.tracker.start("load");
        f.host.advance(10.0);

        assert_eq!(f.tracker.end("load", false), Measurement::Measured(77.0));
    }

    #[test]
    fn test_foreign_entry_ignored_without_marking() {
        let config = TrackerConfig::default().with_fallback_clock(FallbackClock::Milliseconds);
        let f = fixture_with(ManualHost::new().without_marking(), config);
        f.host
            .insert_entry(PerformanceEntry::new("load", EntryType::Resource, 0.0, 77.0));

        f.tracker.start("load");
        f.host.advance(10.0);

        assert_eq!(f.tracker.end("load", false), Measurement::Measured(10.0));
    }

    #[test]
    fn test_capability_change_mid_span_mixes_clocks() {
        let f = fixture();
        f.tracker.start("load");
        f.host.set_marking(false);
        f.host.advance(10.0);

        let duration = f.tracker.end("load", false).duration().unwrap();
        let expected = (MANUAL_WALL_CLOCK_ORIGIN_MS + 10.0) / 1000.0;
        assert!((duration - expected).abs() < 1e-6, "got {}", duration);
    }

    #[test]
    fn test_end_with_log() {
        let f = fixture();
        f.tracker.start("load");
        f.host.advance(12.5);
        f.tracker.end("load", true);

        assert_eq!(f.reporter.metrics(), vec![("load".to_string(), 12.5)]);
    }

    #[test]
    fn test_end_with_log_reports_sentinel() {
        let f = fixture();
        f.tracker.start("load");
        f.tracker.end("load", true);

        assert_eq!(f.reporter.metrics(), vec![("load".to_string(), -1.0)]);
    }

    #[test]
    fn test_log_validates_input() {
        let f = fixture();
        f.tracker.log("", 10.0);
        f.tracker.log("load", 0.0);
        f.tracker.log("load", f64::NAN);

        assert!(f.reporter.metrics().is_empty());
        assert_eq!(f.reporter.warnings().len(), 3);
        assert!(f
            .reporter
            .warnings()
            .iter()
            .all(|w| *w == TimingWarning::MissingLogInput));

        f.tracker.log("load", 3.0);
        assert_eq!(f.reporter.metrics(), vec![("load".to_string(), 3.0)]);
    }

    #[test]
    fn test_analytics_disabled_never_sends() {
        let f = fixture();
        f.tracker.start("load");
        f.host.advance(10.0);
        f.tracker.end("load", false);
        f.tracker.start("instant");
        f.tracker.end("instant", false);

        assert!(f.analytics.is_empty());
    }

    #[test]
    fn test_analytics_enabled_sends_rounded_value() {
        let config = TrackerConfig::default().with_analytics(AnalyticsConfig::enabled("page"));
        let f = fixture_with(ManualHost::new(), config);
        f.tracker.start("load");
        f.host.advance(10.6);
        f.tracker.end("load", false);

        let hits = f.analytics.hits();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0], TimingHit::new("load", "page", 11.0));
    }

    #[test]
    fn test_analytics_sends_sentinel() {
        let f = fixture();
        f.tracker.set_analytics(AnalyticsConfig::enabled("name"));
        f.tracker.start("instant");
        f.tracker.end("instant", false);

        assert_eq!(f.analytics.hits()[0].value, -1);
    }

    #[test]
    fn test_analytics_missing_sink_warns() {
        let host = Arc::new(ManualHost::new());
        let reporter = Arc::new(RecordingReporter::new());
        let tracker = MetricTracker::with_parts(
            TrackerConfig::default().with_analytics(AnalyticsConfig::enabled("name")),
            host.clone(),
            reporter.clone(),
            None,
        );

        tracker.start("load");
        host.advance(1.0);
        assert!(tracker.end("load", false).is_measured());
        assert_eq!(reporter.warnings(), vec![TimingWarning::AnalyticsNotLoaded]);
    }

    #[test]
    fn test_update_analytics() {
        let f = fixture();
        f.tracker.update_analytics(|a| {
            a.enabled = true;
            a.timing_variable = "route".to_string();
        });

        let clone = f.tracker.clone();
        assert_eq!(clone.analytics(), AnalyticsConfig::enabled("route"));
    }

    #[test]
    fn test_clones_share_state() {
        let f = fixture();
        let other = f.tracker.clone();
        f.tracker.start("load");
        assert!(other.is_active("load"));
    }

    #[test]
    fn test_record_first_paint() {
        let config = TrackerConfig::default().with_analytics(AnalyticsConfig::enabled("name"));
        let f = fixture_with(ManualHost::new(), config);
        f.host.advance(250.0);

        let duration = f.tracker.record_first_paint();

        assert_eq!(duration, 250.0);
        assert_eq!(f.tracker.first_paint_duration(), 250.0);
        assert_eq!(f.reporter.metrics(), vec![(FIRST_PAINT.to_string(), 250.0)]);
        assert_eq!(f.analytics.hits(), vec![TimingHit::new(FIRST_PAINT, "name", 250.0)]);
    }

    #[test]
    fn test_record_first_paint_unknown_navigation() {
        let config = TrackerConfig::default().with_analytics(AnalyticsConfig::enabled("name"));
        let f = fixture_with(ManualHost::new(), config);
        f.host.set_navigation_start(0.0);
        f.host.advance(250.0);

        assert_eq!(f.tracker.record_first_paint(), 0.0);
        assert!(f.reporter.metrics().is_empty());
        assert_eq!(f.analytics.hits(), vec![TimingHit::new(FIRST_PAINT, "name", 0.0)]);
    }

    #[test]
    fn test_mark_label() {
        assert_eq!(mark_label("load", "start"), "mark_load_start");
    }

    /// Host whose `mark` is slow enough for two `end` calls to overlap.
    struct SlowMarkHost {
        inner: ManualHost,
        delay: std::time::Duration,
    }

    impl HostCapabilities for SlowMarkHost {
        fn has_high_res_clock(&self) -> bool {
            self.inner.has_high_res_clock()
        }
        fn has_marking(&self) -> bool {
            self.inner.has_marking()
        }
        fn now(&self) -> f64 {
            self.inner.now()
        }
        fn wall_clock_ms(&self) -> f64 {
            self.inner.wall_clock_ms()
        }
        fn navigation_start(&self) -> f64 {
            self.inner.navigation_start()
        }
        fn mark(&self, label: &str) {
            std::thread::sleep(self.delay);
            self.inner.mark(label);
        }
        fn measure(&self, name: &str, start_mark: &str, end_mark: &str) {
            self.inner.measure(name, start_mark, end_mark);
        }
        fn first_entry_by_name(&self, name: &str) -> Option<PerformanceEntry> {
            self.inner.first_entry_by_name(name)
        }
    }

    #[test]
    fn test_concurrent_end_completes_once() {
        let host = Arc::new(SlowMarkHost {
            inner: ManualHost::new(),
            delay: std::time::Duration::from_millis(30),
        });
        let reporter = Arc::new(RecordingReporter::new());
        let analytics = Arc::new(RecordingAnalytics::new());
        let tracker = MetricTracker::with_parts(
            TrackerConfig::default().with_analytics(AnalyticsConfig::enabled("name")),
            host.clone(),
            reporter.clone(),
            Some(analytics.clone()),
        );

        tracker.start("a");
        host.inner.advance(15.0);

        let results: Vec<Measurement> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..2)
                .map(|_| scope.spawn(|| tracker.end("a", true)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let measured: Vec<_> = results.iter().filter(|m| m.is_measured()).collect();
        assert_eq!(measured.len(), 1, "results: {:?}", results);
        assert_eq!(*measured[0], Measurement::Measured(15.0));
        assert!(results.contains(&Measurement::Invalid(TimingWarning::AlreadyStopped {
            name: "a".to_string()
        })));

        assert_eq!(analytics.len(), 1);
        assert_eq!(reporter.metrics(), vec![("a".to_string(), 15.0)]);
        assert!(!tracker.is_active("a"));
    }

    #[test]
    fn test_second_end_leaves_timeline_untouched() {
        let f = fixture();
        f.tracker.start("load");
        f.host.advance(3.0);
        f.tracker.end("load", false);

        let before = f.host.timeline().len();
        assert!(f.tracker.end("load", false).is_invalid());
        assert_eq!(f.host.timeline().len(), before);
    }

    #[test]
    fn test_debug_output() {
        let f = fixture();
        let debug = format!("{:?}", f.tracker);
        assert!(debug.contains("MetricTracker"));
        assert!(debug.contains("active: 0"));
    }
}
