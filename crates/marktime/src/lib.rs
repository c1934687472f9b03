//! Named Timing Marks
//!
//! This crate measures elapsed time between two points in a host
//! application and reports the result through logging and an analytics sink:
//! - Start/end lifecycle for named metrics, one in-flight span per name
//! - High-resolution clock with a wall-clock fallback when the host cannot
//!   mark its timeline
//! - First-paint sampling from navigation start
//! - Deferred completion on the next async runtime turn
//!
//! Measurement never fails the caller. Invalid input and missing host
//! capabilities are reported as warnings and the call returns early.
//!
//! # Feature Flags
//!
//! - `subscriber` (default): ships [`init_logging`] built on `tracing-subscriber`
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use marktime::{ManualHost, Measurement, MetricTracker, TrackerConfig};
//!
//! let host = Arc::new(ManualHost::new());
//! let tracker = MetricTracker::new(TrackerConfig::default(), host.clone());
//!
//! tracker.start("load");
//! host.advance(120.0);
//! assert_eq!(tracker.end("load", false), Measurement::Measured(120.0));
//! ```

mod analytics;
mod config;
mod deferred;
mod error;
mod host;
#[cfg(feature = "subscriber")]
mod logging;
mod measurement;
mod report;
mod timeline;
mod tracker;

pub use analytics::{AnalyticsSink, ChannelAnalytics, RecordingAnalytics, TimingHit};
pub use config::{AnalyticsConfig, FallbackClock, TrackerConfig, DEFAULT_LOG_PREFIX};
pub use deferred::{Deferred, DeferredOutput};
pub use error::{TimingWarning, TrackerError, TrackerResult};
pub use host::{
    HostCapabilities, ManualHost, SystemHost, DEFAULT_TIMELINE_CAPACITY, MANUAL_WALL_CLOCK_ORIGIN_MS,
};
#[cfg(feature = "subscriber")]
pub use logging::{init_logging, LoggingConfig};
pub use measurement::{Measurement, UNMEASURED_SENTINEL};
pub use report::{render_metric_line, RecordingReporter, Report, Reporter, TracingReporter};
pub use timeline::{EntryType, PerformanceEntry, Timeline};
pub use tracker::{MetricTracker, FIRST_PAINT};
