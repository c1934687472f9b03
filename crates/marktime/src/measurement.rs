//! Tagged result of ending a measurement.

use crate::error::TimingWarning;

/// Numeric value callers historically received for [`Measurement::Unmeasured`].
pub const UNMEASURED_SENTINEL: f64 = -1.0;

/// Outcome of [`crate::MetricTracker::end`].
#[derive(Debug, Clone, PartialEq)]
pub enum Measurement {
    /// A duration in clock units (milliseconds on the high-resolution path)
    Measured(f64),
    /// The span collapsed to zero; no valid measurement
    Unmeasured,
    /// The call was a no-op
    Invalid(TimingWarning),
}

impl Measurement {
    /// The duration, if one was measured.
    pub fn duration(&self) -> Option<f64> {
        match self {
            Measurement::Measured(duration) => Some(*duration),
            Measurement::Unmeasured | Measurement::Invalid(_) => None,
        }
    }

    /// Numeric view: the duration, [`UNMEASURED_SENTINEL`] when unmeasured,
    /// `None` when the call was a no-op.
    pub fn legacy_value(&self) -> Option<f64> {
        match self {
            Measurement::Measured(duration) => Some(*duration),
            Measurement::Unmeasured => Some(UNMEASURED_SENTINEL),
            Measurement::Invalid(_) => None,
        }
    }

    /// Whether a duration was measured.
    pub fn is_measured(&self) -> bool {
        matches!(self, Measurement::Measured(_))
    }

    /// Whether the call was a no-op.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Measurement::Invalid(_))
    }
}
