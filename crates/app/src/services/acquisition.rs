//! Acquisition cycle: one polling iteration from sensor reads to LED states.

use envmon_domain::motion::MotionDebouncer;
use envmon_domain::reading::Reading;
use envmon_domain::record::{CycleRecord, now};
use envmon_domain::thresholds::{Thresholds, decide};

use crate::ports::{ActuatorPort, SensorPort};

/// Owns the motion counter and runs the read → debounce → decide → drive
/// sequence once per call.
///
/// The sensor and actuator handles are borrowed for the duration of a cycle
/// only; they are created once at startup by the caller.
pub struct AcquisitionCycle {
    thresholds: Thresholds,
    debouncer: MotionDebouncer,
    cycle: u64,
}

impl AcquisitionCycle {
    /// Create a cycle runner with a fresh motion counter.
    ///
    /// `thresholds` are expected to have been validated already.
    #[must_use]
    pub fn new(thresholds: Thresholds) -> Self {
        let debouncer = thresholds.debouncer();
        Self {
            thresholds,
            debouncer,
            cycle: 0,
        }
    }

    /// Current motion counter.
    #[must_use]
    pub fn motion_count(&self) -> u32 {
        self.debouncer.count()
    }

    /// Number of cycles run so far.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycle
    }

    /// Run one acquisition cycle.
    ///
    /// Every sensor is read exactly once. Read failures are logged and end
    /// up as ok flags set to `false`; a failure to drive the LEDs is logged
    /// too. Neither aborts the cycle.
    pub fn run_once<S, A>(&mut self, sensors: &mut S, actuators: &mut A) -> CycleRecord
    where
        S: SensorPort,
        A: ActuatorPort,
    {
        self.cycle += 1;
        let cycle = self.cycle;
        let taken_at = now();

        let climate = sensors.read_climate();
        let light = sensors.read_light();
        let motion = sensors.read_motion();
        let extras = sensors.read_extras();

        let core_failures = [
            climate.as_ref().err(),
            light.as_ref().err(),
            motion.as_ref().err(),
        ];
        for err in core_failures.into_iter().flatten().chain(extras.failures()) {
            tracing::warn!(cycle, sensor = %err.sensor(), %err, "sensor read failed");
        }

        let reading = Reading::from_reads(
            climate.as_ref().copied(),
            light.as_ref().copied(),
            motion.as_ref().copied(),
            &extras,
        );

        let motion_count = self.debouncer.update(reading.valid_motion());
        let state = decide(&reading, motion_count, &self.thresholds);

        if let Err(err) = actuators.apply(state) {
            tracing::warn!(cycle, %err, "failed to update indicator LEDs");
        }

        let record = CycleRecord {
            cycle,
            taken_at,
            reading,
            motion_count,
            actuators: state,
        };
        tracing::debug!(
            cycle,
            taken_at = %record.stamp(),
            source = sensors.name(),
            temperature = ?record.reading.temperature,
            humidity = ?record.reading.humidity,
            light_level = ?record.reading.light_level,
            motion = ?record.reading.motion_detected,
            motion_count,
            leds = %state,
            "cycle acquired"
        );
        record
    }
}
