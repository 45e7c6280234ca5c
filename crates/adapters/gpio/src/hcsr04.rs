//! HC-SR04 ultrasonic ranging.

use std::thread;
use std::time::{Duration, Instant};

use envmon_domain::sensor::{SensorError, SensorId};
use rppal::gpio::{InputPin, OutputPin};

const SETTLE: Duration = Duration::from_millis(50);
const TRIGGER_PULSE: Duration = Duration::from_micros(10);
const ECHO_TIMEOUT: Duration = Duration::from_millis(40);
/// Half the speed of sound, in cm/s.
const HALF_SPEED_OF_SOUND: f64 = 17_150.0;
const MAX_RANGE_CM: f64 = 400.0;

fn distance_cm(echo: Duration) -> f64 {
    (echo.as_secs_f64() * HALF_SPEED_OF_SOUND * 100.0).round() / 100.0
}

/// Fire one ping and time the echo.
pub(crate) fn measure(trigger: &mut OutputPin, echo: &InputPin) -> Result<f64, SensorError> {
    trigger.set_low();
    thread::sleep(SETTLE);
    trigger.set_high();
    thread::sleep(TRIGGER_PULSE);
    trigger.set_low();

    let armed = Instant::now();
    while echo.is_low() {
        if armed.elapsed() > ECHO_TIMEOUT {
            return Err(SensorError::NotResponding(SensorId::Hcsr04));
        }
        std::hint::spin_loop();
    }

    let rising = Instant::now();
    while echo.is_high() {
        if rising.elapsed() > ECHO_TIMEOUT {
            return Err(SensorError::Timeout {
                sensor: SensorId::Hcsr04,
                stage: "waiting for echo to end",
            });
        }
        std::hint::spin_loop();
    }

    let distance = distance_cm(rising.elapsed());
    if distance > MAX_RANGE_CM {
        return Err(SensorError::OutOfRange {
            sensor: SensorId::Hcsr04,
            value: distance,
        });
    }
    Ok(distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_echo_time_to_centimetres() {
        assert!((distance_cm(Duration::from_micros(1_000)) - 17.15).abs() < 1e-9);
        assert!((distance_cm(Duration::from_millis(10)) - 171.5).abs() < 1e-9);
    }

    #[test]
    fn should_round_to_two_decimals() {
        let distance = distance_cm(Duration::from_nanos(123_457));
        assert!((distance - 2.12).abs() < 1e-9);
    }
}
