//! Transmission gating and outcomes.

use serde::Serialize;

use crate::reading::Reading;
use crate::sensor::SensorId;

/// Why a required field disqualified a cycle from being sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipKind {
    /// No value was recorded for the field.
    Missing,
    /// A value exists but its ok flag is false.
    NotOk,
}

/// One required field that kept a cycle from being transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkipReason {
    pub sensor: SensorId,
    pub field: &'static str,
    pub kind: SkipKind,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            SkipKind::Missing => write!(f, "{} missing ({})", self.field, self.sensor),
            SkipKind::NotOk => write!(f, "{} not ok ({})", self.field, self.sensor),
        }
    }
}

/// Whether a cycle may be transmitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// Every required field is present and vouched for.
    Armed,
    /// At least one required field is missing or not ok.
    Withheld(Vec<SkipReason>),
}

impl Gate {
    /// Evaluate a reading against the required-field rule.
    #[must_use]
    pub fn evaluate(reading: &Reading) -> Self {
        let reasons: Vec<SkipReason> = SensorId::REQUIRED
            .into_iter()
            .flat_map(|sensor| {
                let (ok, fields) = required_fields(reading, sensor);
                fields.into_iter().filter_map(move |(field, present)| {
                    let kind = if !present {
                        SkipKind::Missing
                    } else if !ok {
                        SkipKind::NotOk
                    } else {
                        return None;
                    };
                    Some(SkipReason {
                        sensor,
                        field,
                        kind,
                    })
                })
            })
            .collect();

        if reasons.is_empty() {
            Self::Armed
        } else {
            Self::Withheld(reasons)
        }
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        matches!(self, Self::Armed)
    }
}

/// The ok flag of a required sensor and, per field it fills, whether a value
/// was recorded. Optional sensors fill no required field.
fn required_fields(reading: &Reading, sensor: SensorId) -> (bool, Vec<(&'static str, bool)>) {
    match sensor {
        SensorId::Dht22 => (
            reading.dht_ok,
            vec![
                ("temperature", reading.temperature.is_some()),
                ("humidity", reading.humidity.is_some()),
            ],
        ),
        SensorId::Ldr => (
            reading.ldr_ok,
            vec![("light_level", reading.light_level.is_some())],
        ),
        SensorId::Pir => (
            reading.pir_ok,
            vec![("motion_detected", reading.motion_detected.is_some())],
        ),
        SensorId::Hcsr04 | SensorId::Mq135 | SensorId::Mic => (true, Vec::new()),
    }
}

/// Result of one cycle's transmission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransmissionOutcome {
    /// The collector stored the record.
    Sent { status: u16 },
    /// The collector answered with anything other than `201 Created`.
    Rejected { status: u16, body: String },
    /// The collector could not be reached (refused, timed out, DNS, …).
    Unreachable { cause: String },
    /// The cycle was withheld; no call was made.
    Skipped { reasons: Vec<SkipReason> },
}

impl TransmissionOutcome {
    #[must_use]
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }

    #[must_use]
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable { .. })
    }

    /// Sensors implicated when the cycle was skipped, deduplicated in order.
    #[must_use]
    pub fn implicated_sensors(&self) -> Vec<SensorId> {
        let Self::Skipped { reasons } = self else {
            return Vec::new();
        };
        let mut sensors: Vec<SensorId> = Vec::with_capacity(reasons.len());
        for reason in reasons {
            if !sensors.contains(&reason.sensor) {
                sensors.push(reason.sensor);
            }
        }
        sensors
    }
}

impl std::fmt::Display for TransmissionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sent { status } => write!(f, "sent (HTTP {status})"),
            Self::Rejected { status, body } => write!(f, "rejected (HTTP {status}): {body}"),
            Self::Unreachable { cause } => write!(f, "unreachable: {cause}"),
            Self::Skipped { reasons } => {
                f.write_str("skipped: ")?;
                for (idx, reason) in reasons.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{reason}")?;
                }
                Ok(())
            }
        }
    }
}
