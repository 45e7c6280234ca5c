//! # envmon-domain
//!
//! Pure domain model for the envmon sensor acquisition loop.
//!
//! ## Responsibilities
//! - Foundational types: error conventions
//! - Define **Sensors** (identifiers, read failures, climate pairs)
//! - Define **Readings** (one polling cycle's observations with ok flags)
//! - Define the **Motion Debouncer** (bounded counter across cycles)
//! - Define **Thresholds** and the pure decision function mapping readings to
//!   **Actuator** states
//! - Define **Cycle records**, their wire payload, and **Transmission** outcomes
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;

pub mod actuator;
pub mod motion;
pub mod payload;
pub mod reading;
pub mod record;
pub mod sensor;
pub mod thresholds;
pub mod transmission;
