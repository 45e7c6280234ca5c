//! DHT22 single-wire protocol.
//!
//! The host pulls the line low for at least 1 ms, then releases it. The
//! sensor answers with an 80 µs low / 80 µs high preamble followed by 40
//! bits. Each bit starts with a ~50 µs low phase; the length of the high
//! phase that follows encodes the value (~27 µs for 0, ~70 µs for 1).
//! The frame is humidity (16 bits), temperature (16 bits, sign in the top
//! bit) and a checksum byte.

use std::thread;
use std::time::{Duration, Instant};

use envmon_domain::sensor::{Climate, SensorError, SensorId};
use rppal::gpio::{IoPin, Level, Mode};

const START_LOW: Duration = Duration::from_micros(1_100);
const PHASE_TIMEOUT: Duration = Duration::from_micros(200);
const ONE_THRESHOLD: Duration = Duration::from_micros(50);
/// Datasheet minimum between two conversions.
const MIN_SAMPLE_PERIOD: Duration = Duration::from_secs(2);
const ATTEMPTS: usize = 3;

/// Read the sensor, retrying a bounded number of times on timeouts and
/// checksum failures.
pub(crate) fn read(pin: &mut IoPin) -> Result<Climate, SensorError> {
    let mut last = SensorError::NotResponding(SensorId::Dht22);
    for attempt in 1..=ATTEMPTS {
        match read_frame(pin).and_then(decode_frame) {
            Ok(climate) => return Ok(climate),
            Err(err) => {
                tracing::debug!(attempt, %err, "dht22 read attempt failed");
                last = err;
            }
        }
        if attempt < ATTEMPTS {
            thread::sleep(MIN_SAMPLE_PERIOD);
        }
    }
    Err(last)
}

fn read_frame(pin: &mut IoPin) -> Result<[u8; 5], SensorError> {
    pin.set_mode(Mode::Output);
    pin.set_low();
    thread::sleep(START_LOW);
    pin.set_high();
    pin.set_mode(Mode::Input);

    wait_while(pin, Level::High, PHASE_TIMEOUT)
        .map_err(|()| SensorError::NotResponding(SensorId::Dht22))?;
    wait_while(pin, Level::Low, PHASE_TIMEOUT).map_err(|()| timeout("preamble"))?;
    wait_while(pin, Level::High, PHASE_TIMEOUT).map_err(|()| timeout("preamble"))?;

    let mut highs = [Duration::ZERO; 40];
    for high in &mut highs {
        wait_while(pin, Level::Low, PHASE_TIMEOUT).map_err(|()| timeout("bit start"))?;
        *high = wait_while(pin, Level::High, PHASE_TIMEOUT).map_err(|()| timeout("bit"))?;
    }
    Ok(bits_to_frame(&highs))
}

fn timeout(stage: &'static str) -> SensorError {
    SensorError::Timeout {
        sensor: SensorId::Dht22,
        stage,
    }
}

/// Spin while the pin stays at `level`, returning how long it stayed there.
fn wait_while(pin: &IoPin, level: Level, limit: Duration) -> Result<Duration, ()> {
    let started = Instant::now();
    while pin.read() == level {
        if started.elapsed() > limit {
            return Err(());
        }
        std::hint::spin_loop();
    }
    Ok(started.elapsed())
}

fn bits_to_frame(highs: &[Duration; 40]) -> [u8; 5] {
    let mut frame = [0u8; 5];
    for (index, high) in highs.iter().enumerate() {
        if *high > ONE_THRESHOLD {
            frame[index / 8] |= 0x80 >> (index % 8);
        }
    }
    frame
}

fn decode_frame(frame: [u8; 5]) -> Result<Climate, SensorError> {
    let expected = frame[..4]
        .iter()
        .fold(0u8, |acc, byte| acc.wrapping_add(*byte));
    if expected != frame[4] {
        return Err(SensorError::Checksum {
            sensor: SensorId::Dht22,
            expected,
            actual: frame[4],
        });
    }

    let humidity = f64::from(u16::from_be_bytes([frame[0], frame[1]])) / 10.0;
    let magnitude = f64::from(u16::from_be_bytes([frame[2] & 0x7f, frame[3]])) / 10.0;
    let temperature = if frame[2] & 0x80 == 0 {
        magnitude
    } else {
        -magnitude
    };

    if !(0.0..=100.0).contains(&humidity) {
        return Err(SensorError::OutOfRange {
            sensor: SensorId::Dht22,
            value: humidity,
        });
    }
    if !(-40.0..=80.0).contains(&temperature) {
        return Err(SensorError::OutOfRange {
            sensor: SensorId::Dht22,
            value: temperature,
        });
    }

    Ok(Climate {
        temperature,
        humidity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_checksum(bytes: [u8; 4]) -> [u8; 5] {
        let sum = bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
        [bytes[0], bytes[1], bytes[2], bytes[3], sum]
    }

    #[test]
    fn should_decode_positive_temperature_frame() {
        // 65.2 %, 35.1 °C
        let climate = decode_frame(with_checksum([0x02, 0x8c, 0x01, 0x5f])).unwrap();
        assert!((climate.humidity - 65.2).abs() < 1e-9);
        assert!((climate.temperature - 35.1).abs() < 1e-9);
    }

    #[test]
    fn should_decode_negative_temperature_frame() {
        // -10.1 °C
        let climate = decode_frame(with_checksum([0x01, 0xf4, 0x80, 0x65])).unwrap();
        assert!((climate.temperature + 10.1).abs() < 1e-9);
        assert!((climate.humidity - 50.0).abs() < 1e-9);
    }

    #[test]
    fn should_reject_frame_with_bad_checksum() {
        let mut frame = with_checksum([0x02, 0x8c, 0x01, 0x5f]);
        frame[4] ^= 0x01;
        let err = decode_frame(frame).unwrap_err();
        assert!(matches!(err, SensorError::Checksum { sensor: SensorId::Dht22, .. }));
    }

    #[test]
    fn should_reject_humidity_above_hundred_percent() {
        // 120.0 %
        let err = decode_frame(with_checksum([0x04, 0xb0, 0x00, 0xfa])).unwrap_err();
        assert!(matches!(err, SensorError::OutOfRange { .. }));
    }

    #[test]
    fn should_pack_long_high_phases_as_ones_msb_first() {
        let mut highs = [Duration::from_micros(27); 40];
        highs[0] = Duration::from_micros(70);
        highs[15] = Duration::from_micros(72);
        highs[39] = Duration::from_micros(68);
        assert_eq!(bits_to_frame(&highs), [0x80, 0x01, 0x00, 0x00, 0x01]);
    }
}
