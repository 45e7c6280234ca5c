//! Sensors: identifiers, read failures and the values they produce.

use serde::{Deserialize, Serialize};

/// Identifies one physical (or simulated) sensor.
///
/// The display form is what skip reasons and log lines name, so an operator
/// can go straight to the wiring of the implicated part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorId {
    /// DHT22 temperature and humidity sensor.
    Dht22,
    /// Light dependent resistor behind the ADC.
    Ldr,
    /// Passive infrared motion sensor.
    Pir,
    /// HC-SR04 ultrasonic distance sensor.
    Hcsr04,
    /// MQ135 gas / air quality sensor behind the ADC.
    Mq135,
    /// Analog microphone behind the ADC.
    Mic,
}

impl SensorId {
    /// Sensors whose readings must be valid for a cycle to be transmitted.
    pub const REQUIRED: [Self; 3] = [Self::Dht22, Self::Ldr, Self::Pir];

    /// Lowercase identifier used in logs and diagnostics.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dht22 => "dht22",
            Self::Ldr => "ldr",
            Self::Pir => "pir",
            Self::Hcsr04 => "hcsr04",
            Self::Mq135 => "mq135",
            Self::Mic => "mic",
        }
    }
}

impl std::fmt::Display for SensorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a sensor could not produce a value this cycle.
///
/// A read failure is never fatal: the acquisition cycle records it as an ok
/// flag set to `false` and carries on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SensorError {
    /// The sensor did not answer at all (no start signal, no echo, …).
    #[error("{0} is not responding")]
    NotResponding(SensorId),

    /// The sensor started answering but a pulse did not arrive in time.
    #[error("{sensor} timed out while {stage}")]
    Timeout {
        sensor: SensorId,
        stage: &'static str,
    },

    /// The frame was received but its checksum does not match.
    #[error("{sensor} checksum mismatch: expected {expected:#04x}, got {actual:#04x}")]
    Checksum {
        sensor: SensorId,
        expected: u8,
        actual: u8,
    },

    /// The underlying bus (GPIO, SPI) reported an error.
    #[error("{sensor} bus error: {message}")]
    Bus { sensor: SensorId, message: String },

    /// The decoded value is physically implausible for this sensor.
    #[error("{sensor} returned an out-of-range value {value}")]
    OutOfRange { sensor: SensorId, value: f64 },
}

impl SensorError {
    /// The sensor this failure is about.
    #[must_use]
    pub fn sensor(&self) -> SensorId {
        match self {
            Self::NotResponding(sensor)
            | Self::Timeout { sensor, .. }
            | Self::Checksum { sensor, .. }
            | Self::Bus { sensor, .. }
            | Self::OutOfRange { sensor, .. } => *sensor,
        }
    }
}

/// Temperature and humidity, read together from the same sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Climate {
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
}

/// Readings of the optional sensors fitted on the extended board.
///
/// Each field is `None` when the sensor is not fitted, and `Some(Err(_))`
/// when it is fitted but failed this cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extras {
    /// Distance in centimetres.
    pub distance: Option<Result<f64, SensorError>>,
    /// Raw gas level from the MQ135.
    pub gas_level: Option<Result<f64, SensorError>>,
    /// Raw sound level from the microphone.
    pub sound_level: Option<Result<f64, SensorError>>,
}

impl Extras {
    /// No optional sensor fitted.
    pub const NOT_FITTED: Self = Self {
        distance: None,
        gas_level: None,
        sound_level: None,
    };

    /// Iterate over the failures of fitted sensors.
    pub fn failures(&self) -> impl Iterator<Item = &SensorError> {
        [&self.distance, &self.gas_level, &self.sound_level]
            .into_iter()
            .filter_map(|slot| slot.as_ref().and_then(|res| res.as_ref().err()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_lowercase_sensor_id() {
        assert_eq!(SensorId::Dht22.to_string(), "dht22");
        assert_eq!(SensorId::Pir.to_string(), "pir");
        assert_eq!(SensorId::Hcsr04.to_string(), "hcsr04");
    }

    #[test]
    fn should_serialize_sensor_id_as_lowercase_string() {
        let json = serde_json::to_string(&SensorId::Ldr).unwrap();
        assert_eq!(json, "\"ldr\"");
    }

    #[test]
    fn should_name_sensor_in_error_message() {
        let err = SensorError::NotResponding(SensorId::Dht22);
        assert_eq!(err.to_string(), "dht22 is not responding");
        assert_eq!(err.sensor(), SensorId::Dht22);
    }

    #[test]
    fn should_format_checksum_error_in_hex() {
        let err = SensorError::Checksum {
            sensor: SensorId::Dht22,
            expected: 0x1a,
            actual: 0x0b,
        };
        assert_eq!(
            err.to_string(),
            "dht22 checksum mismatch: expected 0x1a, got 0x0b"
        );
    }

    #[test]
    fn should_treat_default_extras_as_not_fitted() {
        assert_eq!(Extras::default(), Extras::NOT_FITTED);
        assert_eq!(Extras::NOT_FITTED.failures().count(), 0);
    }

    #[test]
    fn should_list_only_failed_extras() {
        let extras = Extras {
            distance: Some(Err(SensorError::NotResponding(SensorId::Hcsr04))),
            gas_level: Some(Ok(210.0)),
            sound_level: None,
        };
        let failed: Vec<SensorId> = extras.failures().map(SensorError::sensor).collect();
        assert_eq!(failed, vec![SensorId::Hcsr04]);
    }
}
