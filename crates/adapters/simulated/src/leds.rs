use envmon_app::ports::{ActuatorError, ActuatorPort};
use envmon_domain::actuator::ActuatorState;

/// Indicator LEDs without hardware: the state is kept and logged on change.
#[derive(Debug, Default)]
pub struct SimulatedLeds {
    state: ActuatorState,
}

impl SimulatedLeds {
    /// The state most recently applied.
    #[must_use]
    pub fn state(&self) -> ActuatorState {
        self.state
    }
}

impl ActuatorPort for SimulatedLeds {
    fn apply(&mut self, state: ActuatorState) -> Result<(), ActuatorError> {
        if state != self.state {
            tracing::debug!(from = %self.state, to = %state, "simulated LEDs changed");
        }
        self.state = state;
        Ok(())
    }
}
