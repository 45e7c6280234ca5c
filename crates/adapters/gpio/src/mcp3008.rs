//! MCP3008 10-bit ADC over SPI.

use envmon_domain::sensor::{SensorError, SensorId};
use rppal::spi::Spi;

/// Highest channel number on the chip.
pub(crate) const MAX_CHANNEL: u8 = 7;

/// Start bit, single-ended mode and channel select.
fn command(channel: u8) -> [u8; 3] {
    [0x01, (0x08 | channel) << 4, 0x00]
}

/// The 10-bit result spans the low two bits of the second byte and the
/// whole third byte.
fn decode(rx: [u8; 3]) -> u16 {
    (u16::from(rx[1] & 0x03) << 8) | u16::from(rx[2])
}

/// Sample one single-ended channel, 0 ..= 1023.
pub(crate) fn read_channel(spi: &Spi, channel: u8, sensor: SensorId) -> Result<u16, SensorError> {
    let tx = command(channel);
    let mut rx = [0u8; 3];
    spi.transfer(&mut rx, &tx).map_err(|err| SensorError::Bus {
        sensor,
        message: err.to_string(),
    })?;
    Ok(decode(rx))
}
