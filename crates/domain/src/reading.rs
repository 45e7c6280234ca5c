//! Reading: one polling cycle's observations.

use serde::{Deserialize, Serialize};

use crate::sensor::{Climate, Extras, SensorError};

/// Everything observed during one polling cycle.
///
/// Every value is optional: a sensor that failed contributes no value at all
/// rather than a placeholder. The core sensors additionally carry an ok flag.
/// When a reading is built from sensor results the flag always mirrors the
/// presence of the value; when a reading is deserialized, a missing flag
/// means failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Degrees Celsius.
    pub temperature: Option<f64>,
    /// Relative humidity in percent.
    pub humidity: Option<f64>,
    /// Raw ADC value, 0..=1023.
    pub light_level: Option<u16>,
    /// `None` means the motion sensor could not be read, which is not the
    /// same as "no motion".
    pub motion_detected: Option<bool>,
    /// Distance in centimetres (extended board only).
    pub distance: Option<f64>,
    /// Raw gas level (extended board only).
    pub gas_level: Option<f64>,
    /// Raw sound level (extended board only).
    pub sound_level: Option<f64>,
    /// The DHT22 vouches for `temperature` and `humidity`. A cycle whose
    /// flag is false is never transmitted.
    #[serde(default)]
    pub dht_ok: bool,
    /// The LDR channel vouches for `light_level`.
    #[serde(default)]
    pub ldr_ok: bool,
    /// The PIR vouches for `motion_detected`.
    #[serde(default)]
    pub pir_ok: bool,
}

impl Reading {
    /// Assemble a reading from the results of one round of sensor reads.
    #[must_use]
    pub fn from_reads(
        climate: Result<Climate, &SensorError>,
        light: Result<u16, &SensorError>,
        motion: Result<bool, &SensorError>,
        extras: &Extras,
    ) -> Self {
        let climate = climate.ok();
        let light_level = light.ok();
        let motion_detected = motion.ok();

        Self {
            temperature: climate.map(|c| c.temperature),
            humidity: climate.map(|c| c.humidity),
            light_level,
            motion_detected,
            distance: fitted_value(extras.distance.as_ref()),
            gas_level: fitted_value(extras.gas_level.as_ref()),
            sound_level: fitted_value(extras.sound_level.as_ref()),
            dht_ok: climate.is_some(),
            ldr_ok: light_level.is_some(),
            pir_ok: motion_detected.is_some(),
        }
    }

    /// Temperature, only when the DHT sensor vouches for it.
    #[must_use]
    pub fn valid_temperature(&self) -> Option<f64> {
        self.temperature.filter(|_| self.dht_ok)
    }

    /// Humidity, only when the DHT sensor vouches for it.
    #[must_use]
    pub fn valid_humidity(&self) -> Option<f64> {
        self.humidity.filter(|_| self.dht_ok)
    }

    /// Light level, only when the LDR channel vouches for it.
    #[must_use]
    pub fn valid_light_level(&self) -> Option<u16> {
        self.light_level.filter(|_| self.ldr_ok)
    }

    /// Motion, only when the PIR sensor vouches for it.
    #[must_use]
    pub fn valid_motion(&self) -> Option<bool> {
        self.motion_detected.filter(|_| self.pir_ok)
    }
}

fn fitted_value(slot: Option<&Result<f64, SensorError>>) -> Option<f64> {
    slot.and_then(|res| res.as_ref().ok().copied())
}
