//! # envmon-adapter-gpio
//!
//! Live sensor board on a Raspberry Pi, driven through `rppal`.
//!
//! ## Wiring (BCM numbering, configurable through [`PinConfig`])
//!
//! | Part | Connection | Default |
//! |------|------------|---------|
//! | DHT22 | single-wire data | GPIO 4 |
//! | PIR | digital input | GPIO 17 |
//! | HC-SR04 (extended) | trigger / echo | GPIO 23 / GPIO 24 |
//! | MCP3008 | SPI0, CE0, 1.35 MHz | LDR ch 1, MQ135 ch 0, mic ch 2 |
//! | LEDs | outputs | red 5, blue 6, yellow 13, white 19 |
//!
//! Every read is read-or-fail: a sensor that does not answer, times out or
//! sends a corrupt frame yields a `SensorError`, never a made-up value.
//!
//! ## Dependency rule
//!
//! Depends on `envmon-app` (port traits) and `envmon-domain` only.

mod board;
mod dht22;
mod hcsr04;
mod mcp3008;
mod pins;

pub use board::{GpioError, GpioLeds, GpioSensors, open_board};
pub use pins::PinConfig;
