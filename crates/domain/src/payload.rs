//! Wire form of a cycle record, as posted to the collector's `/api/data`.

use serde::Serialize;

use crate::record::CycleRecord;

/// Which optional key groups go on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadOptions {
    /// Add `dht_ok`, `ldr_ok` and `pir_ok`.
    pub include_diagnostics: bool,
    /// Add the extended-board keys (`distance`, `gas_level`, …).
    pub extended: bool,
}

impl Default for PayloadOptions {
    fn default() -> Self {
        Self {
            include_diagnostics: true,
            extended: false,
        }
    }
}

/// JSON body sent to the collector.
///
/// Key names are part of the collector contract and must not change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectorPayload {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub light_level: Option<u16>,
    /// Same value as `light_level`, as a float.
    pub ldr: Option<f64>,
    pub motion_detected: Option<bool>,
    pub motion_count: u32,
    pub led_red: bool,
    pub led_blue: bool,
    pub led_yellow: bool,
    pub led_white: bool,
    #[serde(flatten)]
    pub diagnostics: Option<Diagnostics>,
    #[serde(flatten)]
    pub extended: Option<ExtendedFields>,
}

/// Per-sensor ok flags. The collector does not persist them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    pub dht_ok: bool,
    pub ldr_ok: bool,
    pub pir_ok: bool,
}

/// Keys of the extended board. A failed sensor serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtendedFields {
    pub distance: Option<f64>,
    pub gas_level: Option<f64>,
    pub sound_level: Option<f64>,
    /// Mirrors `gas_level`.
    pub air_quality: Option<f64>,
    /// Mirrors `gas_level`.
    pub mq135: Option<f64>,
    /// Mirrors `sound_level`.
    pub mic: Option<f64>,
}

impl CollectorPayload {
    /// Build the wire payload for a cycle record.
    #[must_use]
    pub fn from_record(record: &CycleRecord, options: PayloadOptions) -> Self {
        let reading = &record.reading;
        let actuators = record.actuators;

        let diagnostics = options.include_diagnostics.then_some(Diagnostics {
            dht_ok: reading.dht_ok,
            ldr_ok: reading.ldr_ok,
            pir_ok: reading.pir_ok,
        });

        let extended = options.extended.then(|| ExtendedFields {
            distance: reading.distance,
            gas_level: reading.gas_level,
            sound_level: reading.sound_level,
            air_quality: reading.gas_level,
            mq135: reading.gas_level,
            mic: reading.sound_level,
        });

        Self {
            temperature: reading.temperature,
            humidity: reading.humidity,
            light_level: reading.light_level,
            ldr: reading.light_level.map(f64::from),
            motion_detected: reading.motion_detected,
            motion_count: record.motion_count,
            led_red: actuators.led_red,
            led_blue: actuators.led_blue,
            led_yellow: actuators.led_yellow,
            led_white: actuators.led_white,
            diagnostics,
            extended,
        }
    }
}
