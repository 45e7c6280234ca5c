//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts via `#[from]`.
//! Only configuration faults are fatal; sensor and transmission failures are
//! contained within a single polling cycle.

/// Invalid threshold configuration. Fatal at startup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ThresholdError {
    /// The humidity comfort band is empty or inverted.
    #[error("humidity band is invalid: min {min} must be lower than max {max}")]
    HumidityBand { min: f64, max: f64 },

    /// A floating point threshold is NaN or infinite.
    #[error("threshold {name} must be a finite number")]
    NotFinite { name: &'static str },

    /// A motion threshold of zero would keep the blue LED permanently on.
    #[error("motion threshold must be at least 1")]
    ZeroMotionThreshold,

    /// The debouncer cap is lower than the trigger, so the trigger could never fire.
    #[error("motion cap {cap} is lower than the motion threshold {threshold}")]
    MotionCapBelowThreshold { cap: u32, threshold: u32 },
}
