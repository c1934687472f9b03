//! Analytics forwarding.
//!
//! A completed duration becomes a [`TimingHit`] shaped like a classic
//! `send`/`timing` analytics command: category is the metric name, variable
//! comes from [`crate::AnalyticsConfig`], value is the rounded duration.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::TrackerResult;

/// Command sent with every hit.
pub const SEND_COMMAND: &str = "send";

/// Hit type sent with every hit.
pub const TIMING_HIT_TYPE: &str = "timing";

/// One timing event for the analytics sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingHit {
    /// Always `"send"`
    pub command: String,
    /// Always `"timing"`
    pub hit_type: String,
    /// Metric name
    pub category: String,
    /// Configured timing variable
    pub variable: String,
    /// Duration rounded to the nearest integer
    pub value: i64,
}

impl TimingHit {
    /// Build a timing hit, rounding `duration` half up.
    pub fn new(category: &str, variable: &str, duration: f64) -> Self {
        Self {
            command: SEND_COMMAND.to_string(),
            hit_type: TIMING_HIT_TYPE.to_string(),
            category: category.to_string(),
            variable: variable.to_string(),
            value: round_duration(duration),
        }
    }

    /// Serialize the hit as JSON.
    pub fn to_json(&self) -> TrackerResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Round to the nearest integer, ties toward positive infinity. NaN maps to zero.
fn round_duration(duration: f64) -> i64 {
    if duration.is_nan() {
        0
    } else {
        (duration + 0.5).floor() as i64
    }
}

/// Destination for timing hits.
pub trait AnalyticsSink: Send + Sync {
    /// Deliver one hit. Must not fail the caller.
    fn send(&self, hit: &TimingHit);
}

/// Sink that keeps every hit it receives.
#[derive(Debug, Default)]
pub struct RecordingAnalytics {
    hits: Mutex<Vec<TimingHit>>,
}

impl RecordingAnalytics {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hits received so far, in order.
    pub fn hits(&self) -> Vec<TimingHit> {
        self.hits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of hits received.
    pub fn len(&self) -> usize {
        self.hits.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing has been received.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AnalyticsSink for RecordingAnalytics {
    fn send(&self, hit: &TimingHit) {
        self.hits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(hit.clone());
    }
}

/// Sink that forwards hits over an unbounded tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelAnalytics {
    sender: mpsc::UnboundedSender<TimingHit>,
}

impl ChannelAnalytics {
    /// Create a sink and the receiver that drains it.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimingHit>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl AnalyticsSink for ChannelAnalytics {
    fn send(&self, hit: &TimingHit) {
        if self.sender.send(hit.clone()).is_err() {
            tracing::debug!(
                target: "marktime::analytics",
                category = %hit.category,
                "analytics receiver dropped, hit discarded"
            );
        }
    }
}
