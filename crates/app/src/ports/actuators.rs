//! Actuator port: the indicator LEDs.

use envmon_domain::actuator::{ActuatorState, Led};

/// Failure to drive an output.
#[derive(Debug, thiserror::Error)]
pub enum ActuatorError {
    /// Writing the level of one LED failed.
    #[error("failed to drive {led} LED: {message}")]
    Output { led: Led, message: String },
}

/// Sink for the LED states computed each cycle.
pub trait ActuatorPort {
    /// Set every LED to the given state.
    ///
    /// # Errors
    ///
    /// Returns [`ActuatorError`] when an output cannot be written.
    fn apply(&mut self, state: ActuatorState) -> Result<(), ActuatorError>;

    /// Force every LED off. Called on every exit path of the loop.
    ///
    /// # Errors
    ///
    /// Returns [`ActuatorError`] when an output cannot be written.
    fn shutdown(&mut self) -> Result<(), ActuatorError> {
        self.apply(ActuatorState::OFF)
    }
}
