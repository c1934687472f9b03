//! Tracker configuration.

use serde::{Deserialize, Serialize};

use crate::error::TrackerResult;

/// Default prefix put in front of every reported line.
pub const DEFAULT_LOG_PREFIX: &str = "marktime:";

/// Default analytics timing variable.
pub const DEFAULT_TIMING_VARIABLE: &str = "name";

/// Controls forwarding of completed durations to the analytics sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsConfig {
    /// Whether durations are forwarded at all
    pub enabled: bool,
    /// Variable name attached to every timing hit
    pub timing_variable: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            timing_variable: DEFAULT_TIMING_VARIABLE.to_string(),
        }
    }
}

impl AnalyticsConfig {
    /// Enabled config with the given timing variable.
    pub fn enabled(timing_variable: &str) -> Self {
        Self {
            enabled: true,
            timing_variable: timing_variable.to_string(),
        }
    }
}

/// Unit of the fallback clock used when the host cannot mark its timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FallbackClock {
    /// Wall-clock milliseconds divided by 1000
    #[default]
    Seconds,
    /// Wall-clock milliseconds
    Milliseconds,
}

impl FallbackClock {
    /// Convert a wall-clock millisecond reading into this unit.
    pub fn convert(&self, wall_ms: f64) -> f64 {
        match self {
            FallbackClock::Seconds => wall_ms / 1000.0,
            FallbackClock::Milliseconds => wall_ms,
        }
    }
}

/// Configuration for a [`crate::MetricTracker`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerConfig {
    /// Initial analytics settings
    pub analytics: AnalyticsConfig,
    /// Prefix for every reported line
    pub log_prefix: String,
    /// Unit of the fallback clock
    pub fallback_clock: FallbackClock,
    /// Whether metric lines are wrapped in ANSI color codes
    pub colored_output: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            analytics: AnalyticsConfig::default(),
            log_prefix: DEFAULT_LOG_PREFIX.to_string(),
            fallback_clock: FallbackClock::default(),
            colored_output: false,
        }
    }
}

impl TrackerConfig {
    /// Create a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> TrackerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the analytics settings.
    pub fn with_analytics(mut self, analytics: AnalyticsConfig) -> Self {
        self.analytics = analytics;
        self
    }

    /// Set the log prefix.
    pub fn with_log_prefix(mut self, prefix: &str) -> Self {
        self.log_prefix = prefix.to_string();
        self
    }

    /// Set the fallback clock unit.
    pub fn with_fallback_clock(mut self, fallback: FallbackClock) -> Self {
        self.fallback_clock = fallback;
        self
    }

    /// Enable or disable ANSI coloring of metric lines.
    pub fn with_colored_output(mut self, colored: bool) -> Self {
        self.colored_output = colored;
        self
    }
}
