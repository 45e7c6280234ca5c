//! Transmission policy: decides whether a record goes out, then sends it.

use envmon_domain::payload::{CollectorPayload, PayloadOptions};
use envmon_domain::record::CycleRecord;
use envmon_domain::transmission::{Gate, TransmissionOutcome};

use crate::ports::CollectorPort;

/// Whether the last evaluated record was eligible for sending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyState {
    /// Ready to send.
    Armed,
    /// The last record had a missing or untrusted required field.
    Withheld,
}

/// Gates each cycle record on its required fields and sends eligible ones
/// through the [`CollectorPort`].
///
/// A withheld record is only logged; the next cycle gets a fresh chance.
/// Nothing here ever escalates beyond a log line.
pub struct TransmissionPolicy<C> {
    collector: C,
    options: PayloadOptions,
    state: PolicyState,
}

impl<C: CollectorPort> TransmissionPolicy<C> {
    /// Create a policy, initially armed.
    pub fn new(collector: C, options: PayloadOptions) -> Self {
        Self {
            collector,
            options,
            state: PolicyState::Armed,
        }
    }

    /// State after the most recent record.
    #[must_use]
    pub fn state(&self) -> PolicyState {
        self.state
    }

    /// Gate the record and, when armed, send it exactly once.
    pub async fn handle(&mut self, record: &CycleRecord) -> TransmissionOutcome {
        let cycle = record.cycle;
        let taken_at = record.stamp();

        let reasons = match Gate::evaluate(&record.reading) {
            Gate::Armed => {
                if self.state == PolicyState::Withheld {
                    tracing::info!(cycle, "required sensors recovered, transmission re-armed");
                }
                self.state = PolicyState::Armed;
                None
            }
            Gate::Withheld(reasons) => {
                if self.state == PolicyState::Armed {
                    tracing::warn!(cycle, "required sensor data unavailable, withholding transmission");
                }
                self.state = PolicyState::Withheld;
                Some(reasons)
            }
        };

        if let Some(reasons) = reasons {
            let outcome = TransmissionOutcome::Skipped { reasons };
            let sensors: Vec<&str> = outcome
                .implicated_sensors()
                .into_iter()
                .map(|sensor| sensor.as_str())
                .collect();
            tracing::warn!(cycle, %taken_at, ?sensors, %outcome, "cycle not transmitted");
            return outcome;
        }

        let payload = CollectorPayload::from_record(record, self.options);
        tracing::debug!(cycle, ?payload, "sending payload");

        let outcome = self.collector.send(&payload).await;
        match &outcome {
            TransmissionOutcome::Sent { status } => {
                tracing::info!(
                    cycle,
                    %taken_at,
                    status,
                    leds = %record.actuators,
                    "cycle transmitted"
                );
            }
            TransmissionOutcome::Rejected { status, body } => {
                tracing::warn!(cycle, %taken_at, status, %body, "collector rejected cycle");
            }
            TransmissionOutcome::Unreachable { cause } => {
                tracing::error!(cycle, %taken_at, %cause, "collector unreachable");
            }
            TransmissionOutcome::Skipped { .. } => {}
        }
        outcome
    }
}
