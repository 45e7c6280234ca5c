//! Polling loop: acquisition, transmission, then sleep until the next cycle
//! or until shutdown is requested.

use std::future::Future;
use std::time::Duration;

use envmon_domain::payload::PayloadOptions;
use envmon_domain::thresholds::Thresholds;
use envmon_domain::transmission::TransmissionOutcome;

use crate::ports::{ActuatorPort, CollectorPort, SensorPort};
use crate::services::acquisition::AcquisitionCycle;
use crate::services::transmission::TransmissionPolicy;

/// Loop cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    /// Pause between the end of one cycle and the start of the next.
    pub interval: Duration,
    /// Upper bound on the pause while the collector stays unreachable.
    pub max_backoff: Duration,
    /// Stop on its own after this many cycles.
    pub max_cycles: Option<u64>,
}

impl Cadence {
    #[must_use]
    pub fn fixed(interval: Duration) -> Self {
        Self {
            interval,
            max_backoff: interval,
            max_cycles: None,
        }
    }
}

/// Doubles the pause for each consecutive unreachable outcome, up to a cap.
#[derive(Debug, Clone)]
pub struct Backoff {
    base: Duration,
    cap: Duration,
    consecutive_unreachable: u32,
}

impl Backoff {
    #[must_use]
    pub fn new(base: Duration, cap: Duration) -> Self {
        Self {
            base,
            cap: cap.max(base),
            consecutive_unreachable: 0,
        }
    }

    /// Account for an outcome and return the pause before the next cycle.
    pub fn next_delay(&mut self, outcome: &TransmissionOutcome) -> Duration {
        if outcome.is_unreachable() {
            self.consecutive_unreachable = self.consecutive_unreachable.saturating_add(1);
        } else {
            self.consecutive_unreachable = 0;
        }
        let factor = 1u32 << self.consecutive_unreachable.min(16);
        self.base.saturating_mul(factor).min(self.cap)
    }
}

/// Tally of what a run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: u64,
    pub sent: u64,
    pub rejected: u64,
    pub unreachable: u64,
    pub skipped: u64,
}

impl RunSummary {
    fn record(&mut self, outcome: &TransmissionOutcome) {
        self.cycles += 1;
        match outcome {
            TransmissionOutcome::Sent { .. } => self.sent += 1,
            TransmissionOutcome::Rejected { .. } => self.rejected += 1,
            TransmissionOutcome::Unreachable { .. } => self.unreachable += 1,
            TransmissionOutcome::Skipped { .. } => self.skipped += 1,
        }
    }
}

/// The acquisition agent: owns the hardware handles for the whole run.
pub struct Monitor<S, A, C> {
    sensors: S,
    actuators: A,
    acquisition: AcquisitionCycle,
    transmission: TransmissionPolicy<C>,
    cadence: Cadence,
}

impl<S, A, C> Monitor<S, A, C>
where
    S: SensorPort,
    A: ActuatorPort,
    C: CollectorPort,
{
    pub fn new(
        sensors: S,
        actuators: A,
        collector: C,
        thresholds: Thresholds,
        options: PayloadOptions,
        cadence: Cadence,
    ) -> Self {
        Self {
            sensors,
            actuators,
            acquisition: AcquisitionCycle::new(thresholds),
            transmission: TransmissionPolicy::new(collector, options),
            cadence,
        }
    }

    pub fn sensors(&self) -> &S {
        &self.sensors
    }

    pub fn actuators(&self) -> &A {
        &self.actuators
    }

    /// Run cycles until `shutdown` resolves or `max_cycles` is reached.
    ///
    /// A cycle in progress always completes; only the pause between cycles
    /// is interrupted. The LEDs are switched off before returning.
    pub async fn run<F>(&mut self, shutdown: F) -> RunSummary
    where
        F: Future<Output = ()>,
    {
        let mut shutdown = std::pin::pin!(shutdown);
        let mut backoff = Backoff::new(self.cadence.interval, self.cadence.max_backoff);
        let mut summary = RunSummary::default();

        tracing::info!(
            source = self.sensors.name(),
            interval_ms = self.cadence.interval.as_millis(),
            max_cycles = ?self.cadence.max_cycles,
            "monitor started"
        );

        loop {
            let record = self
                .acquisition
                .run_once(&mut self.sensors, &mut self.actuators);
            let outcome = self.transmission.handle(&record).await;
            summary.record(&outcome);

            if self
                .cadence
                .max_cycles
                .is_some_and(|max| summary.cycles >= max)
            {
                tracing::info!(cycles = summary.cycles, "cycle limit reached");
                break;
            }

            let delay = backoff.next_delay(&outcome);
            if delay > self.cadence.interval {
                tracing::debug!(delay_ms = delay.as_millis(), "backing off");
            }

            tokio::select! {
                () = &mut shutdown => {
                    tracing::info!("shutdown requested");
                    break;
                }
                () = tokio::time::sleep(delay) => {}
            }
        }

        if let Err(err) = self.actuators.shutdown() {
            tracing::warn!(%err, "failed to switch indicator LEDs off");
        }

        tracing::info!(
            cycles = summary.cycles,
            sent = summary.sent,
            rejected = summary.rejected,
            unreachable = summary.unreachable,
            skipped = summary.skipped,
            "monitor stopped"
        );
        summary
    }
}
