//! Cycle record: everything one polling iteration produced.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::actuator::ActuatorState;
use crate::reading::Reading;

/// UTC timestamp attached to every cycle record.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Output of one acquisition cycle: raw values, derived LED states and the
/// per-sensor ok flags (carried inside the reading).
#[derive(Debug, Clone, PartialEq)]
pub struct CycleRecord {
    /// Sequence number, starting at 1 for the first cycle of the process.
    pub cycle: u64,
    /// When the sensors were read.
    pub taken_at: Timestamp,
    pub reading: Reading,
    /// Motion counter after this cycle's update.
    pub motion_count: u32,
    pub actuators: ActuatorState,
}

impl CycleRecord {
    /// RFC 3339 form of [`CycleRecord::taken_at`], to the second, as it
    /// appears in log lines.
    #[must_use]
    pub fn stamp(&self) -> String {
        self.taken_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_stamp_with_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_format_stamp_as_rfc3339_seconds() {
        use chrono::TimeZone;

        let record = CycleRecord {
            cycle: 1,
            taken_at: Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap(),
            reading: Reading::default(),
            motion_count: 0,
            actuators: ActuatorState::OFF,
        };
        assert_eq!(record.stamp(), "2026-10-19T08:30:00Z");
    }
}
