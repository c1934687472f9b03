//! Reporting sinks for metric lines and warnings.

use std::sync::{Mutex, PoisonError};

use crate::config::DEFAULT_LOG_PREFIX;
use crate::error::TimingWarning;

/// ANSI 24-bit foreground for `#ff6d00`.
const METRIC_COLOR: &str = "\x1b[38;2;255;109;0m";
const RESET: &str = "\x1b[0m";

/// Receives completed metrics and warnings. Must never fail the caller.
pub trait Reporter: Send + Sync {
    /// Report a named duration in milliseconds.
    fn metric(&self, name: &str, duration_ms: f64);

    /// Report a soft failure.
    fn warn(&self, warning: &TimingWarning);
}

/// Render a metric as `"<prefix> <name> <ms> ms"` with two decimals.
pub fn render_metric_line(prefix: &str, name: &str, duration_ms: f64, colored: bool) -> String {
    let line = format!("{} {} {:.2} ms", prefix, name, duration_ms);
    if colored {
        format!("{}{}{}", METRIC_COLOR, line, RESET)
    } else {
        line
    }
}

/// Reporter that emits through `tracing` under the `marktime` target.
#[derive(Debug, Clone)]
pub struct TracingReporter {
    prefix: String,
    colored: bool,
}

impl TracingReporter {
    /// Create a reporter with the given line prefix.
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            colored: false,
        }
    }

    /// Wrap metric lines in ANSI color codes.
    pub fn with_color(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// The line prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for TracingReporter {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_PREFIX)
    }
}

impl Reporter for TracingReporter {
    fn metric(&self, name: &str, duration_ms: f64) {
        let line = render_metric_line(&self.prefix, name, duration_ms, self.colored);
        tracing::info!(target: "marktime", metric = name, duration_ms, "{}", line);
    }

    fn warn(&self, warning: &TimingWarning) {
        tracing::warn!(target: "marktime", "{} {}", self.prefix, warning);
    }
}

/// Something a [`RecordingReporter`] captured.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    /// A metric line
    Metric { name: String, duration_ms: f64 },
    /// A warning
    Warning(TimingWarning),
}

/// Reporter that keeps everything it receives, for inspection.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<Report>>,
}

impl RecordingReporter {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything captured so far, in order.
    pub fn reports(&self) -> Vec<Report> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Captured warnings only.
    pub fn warnings(&self) -> Vec<TimingWarning> {
        self.reports()
            .into_iter()
            .filter_map(|r| match r {
                Report::Warning(w) => Some(w),
                Report::Metric { .. } => None,
            })
            .collect()
    }

    /// Captured metrics only, as `(name, duration_ms)`.
    pub fn metrics(&self) -> Vec<(String, f64)> {
        self.reports()
            .into_iter()
            .filter_map(|r| match r {
                Report::Metric { name, duration_ms } => Some((name, duration_ms)),
                Report::Warning(_) => None,
            })
            .collect()
    }

    /// Forget everything captured so far.
    pub fn clear(&self) {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn push(&self, report: Report) {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report);
    }
}

impl Reporter for RecordingReporter {
    fn metric(&self, name: &str, duration_ms: f64) {
        self.push(Report::Metric {
            name: name.to_string(),
            duration_ms,
        });
    }

    fn warn(&self, warning: &TimingWarning) {
        self.push(Report::Warning(warning.clone()));
    }
}
