//! # envmon-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `SensorPort`: read each sensor once per cycle, read-or-fail
//!   - `ActuatorPort`: drive the indicator LEDs, fall back to all-off
//!   - `CollectorPort`: post one record to the remote collector
//! - Define the use-cases:
//!   - `AcquisitionCycle`: one polling iteration (reads, debounce, decide)
//!   - `TransmissionPolicy`: gate a record and classify the send outcome
//!   - `Monitor`: the sequential polling loop with backoff and shutdown
//! - Orchestrate domain objects without knowing *how* sensors or HTTP work
//!
//! ## Dependency rule
//! Depends on `envmon-domain` only (plus `tokio` for timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod monitor;
pub mod ports;
pub mod services;

#[cfg(test)]
mod testing;
