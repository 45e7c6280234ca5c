use serde::Deserialize;

/// Pin assignment of the board, `[sensors.pins]` in the config file.
///
/// Unknown keys are rejected: a misspelt pin would otherwise leave its
/// default GPIO driven.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PinConfig {
    pub dht22: u8,
    pub pir: u8,
    pub ultrasonic_trigger: u8,
    pub ultrasonic_echo: u8,
    pub led_red: u8,
    pub led_blue: u8,
    pub led_yellow: u8,
    pub led_white: u8,
    pub spi_clock_hz: u32,
    pub ldr_channel: u8,
    pub gas_channel: u8,
    pub mic_channel: u8,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            dht22: 4,
            pir: 17,
            ultrasonic_trigger: 23,
            ultrasonic_echo: 24,
            led_red: 5,
            led_blue: 6,
            led_yellow: 13,
            led_white: 19,
            spi_clock_hz: 1_350_000,
            ldr_channel: 1,
            gas_channel: 0,
            mic_channel: 2,
        }
    }
}
