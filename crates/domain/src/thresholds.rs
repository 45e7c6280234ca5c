//! Thresholds and the rule engine mapping readings to LED states.

use serde::Deserialize;

use crate::actuator::ActuatorState;
use crate::error::ThresholdError;
use crate::motion::MotionDebouncer;
use crate::reading::Reading;

/// Limits that decide when each indicator LED lights up.
///
/// Validated once at startup and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Red LED when the temperature is strictly above this value (°C).
    pub temperature_max: f64,
    /// Yellow LED when humidity is strictly below this value (%RH).
    pub humidity_min: f64,
    /// Yellow LED when humidity is strictly above this value (%RH).
    pub humidity_max: f64,
    /// Blue LED once the motion counter reaches this value.
    pub motion_threshold: u32,
    /// Optional ceiling for the motion counter, at or above `motion_threshold`.
    pub motion_cap: Option<u32>,
    /// White LED when the raw light level is strictly below this value.
    pub light_night_max: u16,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            temperature_max: 30.0,
            humidity_min: 40.0,
            humidity_max: 60.0,
            motion_threshold: 3,
            motion_cap: None,
            light_night_max: 400,
        }
    }
}

impl Thresholds {
    /// Check the invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ThresholdError`] when a float threshold is not finite, when
    /// the humidity band is empty or inverted, or when the motion threshold
    /// is zero or above the motion cap.
    pub fn validate(&self) -> Result<(), ThresholdError> {
        for (name, value) in [
            ("temperature_max", self.temperature_max),
            ("humidity_min", self.humidity_min),
            ("humidity_max", self.humidity_max),
        ] {
            if !value.is_finite() {
                return Err(ThresholdError::NotFinite { name });
            }
        }
        if self.humidity_min >= self.humidity_max {
            return Err(ThresholdError::HumidityBand {
                min: self.humidity_min,
                max: self.humidity_max,
            });
        }
        if self.motion_threshold == 0 {
            return Err(ThresholdError::ZeroMotionThreshold);
        }
        if let Some(cap) = self.motion_cap
            && cap < self.motion_threshold
        {
            return Err(ThresholdError::MotionCapBelowThreshold {
                cap,
                threshold: self.motion_threshold,
            });
        }
        Ok(())
    }

    /// A fresh motion debouncer honouring the configured cap.
    #[must_use]
    pub fn debouncer(&self) -> MotionDebouncer {
        self.motion_cap
            .map_or_else(MotionDebouncer::new, MotionDebouncer::with_cap)
    }

    /// Whether a humidity value lies outside the comfort band.
    #[must_use]
    pub fn humidity_out_of_band(&self, humidity: f64) -> bool {
        humidity < self.humidity_min || humidity > self.humidity_max
    }
}

/// Compute the LED states for one cycle.
///
/// Pure: depends only on its arguments. A value whose sensor failed never
/// lights its LED. The blue LED only looks at the motion counter, so it stays
/// computable even when this cycle's PIR read failed.
#[must_use]
pub fn decide(reading: &Reading, motion_count: u32, thresholds: &Thresholds) -> ActuatorState {
    ActuatorState {
        led_red: reading
            .valid_temperature()
            .is_some_and(|t| t > thresholds.temperature_max),
        led_blue: motion_count >= thresholds.motion_threshold,
        led_yellow: reading
            .valid_humidity()
            .is_some_and(|h| thresholds.humidity_out_of_band(h)),
        led_white: reading
            .valid_light_level()
            .is_some_and(|l| l < thresholds.light_night_max),
    }
}
