//! Error and warning types for the timing tracker.
//!
//! Measurement never fails the caller. Everything that goes wrong on the
//! measurement path is a [`TimingWarning`], routed through the reporter.
//! [`TrackerError`] is reserved for setup paths such as parsing configuration.

use thiserror::Error;

/// Soft failures raised while measuring.
///
/// These are reported, never returned as `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimingWarning {
    /// `start`/`end` called with an empty metric name
    #[error("Please provide a metric name")]
    MissingMetricName,

    /// The host has no mark/measure store; the measurement continues unmarked
    #[error("Timeline won't be marked for \"{name}\".")]
    TimelineUnmarked { name: String },

    /// A record with this name is already in flight
    #[error("Recording already started for \"{name}\".")]
    AlreadyStarted { name: String },

    /// No record with this name is in flight
    #[error("Recording already stopped for \"{name}\".")]
    AlreadyStopped { name: String },

    /// `log` called without a name or with a zero duration
    #[error("Please provide a metric name and the duration value")]
    MissingLogInput,

    /// Analytics is enabled but no sink is registered
    #[error("Analytics sink has not been loaded")]
    AnalyticsNotLoaded,

    /// The host exposes no high-resolution clock
    #[error("Cannot be used in this environment.")]
    Unsupported,

    /// Deferred work was requested outside a tokio runtime
    #[error("No async runtime available, running \"{operation}\" inline")]
    SchedulerUnavailable { operation: &'static str },

    /// The deferred task panicked or was aborted before resolving
    #[error("Deferred task failed: {0}")]
    DeferredTaskFailed(String),
}

/// Errors from fallible setup paths.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for tracker setup operations.
pub type TrackerResult<T> = Result<T, TrackerError>;
