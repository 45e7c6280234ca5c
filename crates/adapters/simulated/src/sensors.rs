use std::ops::RangeInclusive;

use envmon_app::ports::SensorPort;
use envmon_domain::sensor::{Climate, Extras, SensorError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TEMPERATURE: RangeInclusive<f64> = 24.0..=32.0;
const HUMIDITY: RangeInclusive<f64> = 30.0..=70.0;
const LIGHT: RangeInclusive<u16> = 200..=800;
const GAS: RangeInclusive<f64> = 150.0..=450.0;
const SOUND: RangeInclusive<u16> = 100..=600;
const DISTANCE: RangeInclusive<f64> = 2.0..=200.0;

/// Sensor board that draws every reading from a bounded random range.
pub struct SimulatedSensors {
    rng: StdRng,
    extended: bool,
}

impl SimulatedSensors {
    /// Simulate the basic board, or the extended one with distance, gas and
    /// sound sensors.
    #[must_use]
    pub fn new(extended: bool) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            extended,
        }
    }

    /// Same as [`SimulatedSensors::new`], with a reproducible sequence.
    #[must_use]
    pub fn seeded(seed: u64, extended: bool) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            extended,
        }
    }

    fn uniform(&mut self, range: RangeInclusive<f64>, decimals: i32) -> f64 {
        let factor = 10f64.powi(decimals);
        (self.rng.gen_range(range) * factor).round() / factor
    }
}

impl SensorPort for SimulatedSensors {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn read_climate(&mut self) -> Result<Climate, SensorError> {
        Ok(Climate {
            temperature: self.uniform(TEMPERATURE, 2),
            humidity: self.uniform(HUMIDITY, 1),
        })
    }

    fn read_light(&mut self) -> Result<u16, SensorError> {
        Ok(self.rng.gen_range(LIGHT))
    }

    fn read_motion(&mut self) -> Result<bool, SensorError> {
        Ok(self.rng.gen_bool(0.5))
    }

    fn read_extras(&mut self) -> Extras {
        if !self.extended {
            return Extras::NOT_FITTED;
        }
        let distance = self.uniform(DISTANCE, 2);
        let gas_level = self.uniform(GAS, 1);
        let sound_level = f64::from(self.rng.gen_range(SOUND));
        Extras {
            distance: Some(Ok(distance)),
            gas_level: Some(Ok(gas_level)),
            sound_level: Some(Ok(sound_level)),
        }
    }
}
