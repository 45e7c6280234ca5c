//! Sensor port: one read per sensor kind, read-or-fail.

use envmon_domain::sensor::{Climate, Extras, SensorError};

/// Source of sensor readings: a live board or a simulation.
///
/// Reads are blocking and bounded by the driver's own timeouts. They never
/// panic for absent hardware; a sensor that cannot produce a value returns
/// an error, and there is no placeholder value to forward.
///
/// Exactly one implementation is active for the whole process. Live
/// implementations must never substitute made-up values on failure.
pub trait SensorPort {
    /// Short name of the implementation, for logs (e.g. `"simulated"`).
    fn name(&self) -> &'static str;

    /// Read temperature and humidity from the climate sensor.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError`] when the sensor does not answer or its frame
    /// is corrupt.
    fn read_climate(&mut self) -> Result<Climate, SensorError>;

    /// Read the raw light level.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError`] when the ADC cannot be read.
    fn read_light(&mut self) -> Result<u16, SensorError>;

    /// Read the motion sensor.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError`] when the pin cannot be read.
    fn read_motion(&mut self) -> Result<bool, SensorError>;

    /// Read the optional sensors of the extended board.
    ///
    /// The default reports nothing fitted.
    fn read_extras(&mut self) -> Extras {
        Extras::NOT_FITTED
    }
}
