//! # envmon-adapter-simulated
//!
//! Simulated sensor board used when no hardware is attached.
//!
//! ## Provided ports
//!
//! | Port | Type | Behaviour |
//! |------|------|-----------|
//! | `SensorPort` | [`SimulatedSensors`] | Bounded-random readings; every read succeeds |
//! | `ActuatorPort` | [`SimulatedLeds`] | Remembers the LED state and logs changes |
//!
//! ## Value ranges
//!
//! | Reading | Range | Precision |
//! |---------|-------|-----------|
//! | temperature | 24.0 ..= 32.0 °C | 2 decimals |
//! | humidity | 30.0 ..= 70.0 % | 1 decimal |
//! | light level | 200 ..= 800 | integer |
//! | motion | fair coin | |
//! | gas level (extended) | 150.0 ..= 450.0 | 1 decimal |
//! | sound level (extended) | 100 ..= 600 | integer |
//! | distance (extended) | 2.0 ..= 200.0 cm | 2 decimals |
//!
//! ## Dependency rule
//!
//! Depends on `envmon-app` (port traits) and `envmon-domain` only.

mod leds;
mod sensors;

pub use leds::SimulatedLeds;
pub use sensors::SimulatedSensors;
