//! In-memory port implementations shared by the use-case tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use envmon_domain::actuator::{ActuatorState, Led};
use envmon_domain::payload::CollectorPayload;
use envmon_domain::sensor::{Climate, Extras, SensorError};
use envmon_domain::transmission::TransmissionOutcome;

use crate::ports::{ActuatorError, ActuatorPort, CollectorPort, SensorPort};

/// Log sink for tests that assert on what an operator would see.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Route this thread's events into a fresh buffer until the guard drops.
    pub fn install() -> (Self, tracing::subscriber::DefaultGuard) {
        let logs = Self::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        (logs.clone(), tracing::subscriber::set_default(subscriber))
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

pub fn climate(temperature: f64, humidity: f64) -> Climate {
    Climate {
        temperature,
        humidity,
    }
}

/// Sensors with scripted results. Motion results are consumed one per
/// cycle; once the script runs out, motion reads `false`.
pub struct FakeSensors {
    pub climate: Result<Climate, SensorError>,
    pub light: Result<u16, SensorError>,
    pub motion: VecDeque<Result<bool, SensorError>>,
    pub extras: Extras,
    pub climate_reads: usize,
    pub light_reads: usize,
    pub motion_reads: usize,
    pub extras_reads: usize,
}

impl FakeSensors {
    pub fn healthy() -> Self {
        Self {
            climate: Ok(climate(22.0, 50.0)),
            light: Ok(600),
            motion: VecDeque::new(),
            extras: Extras::NOT_FITTED,
            climate_reads: 0,
            light_reads: 0,
            motion_reads: 0,
            extras_reads: 0,
        }
    }

    pub fn with_climate(mut self, climate: Result<Climate, SensorError>) -> Self {
        self.climate = climate;
        self
    }
}

impl SensorPort for FakeSensors {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn read_climate(&mut self) -> Result<Climate, SensorError> {
        self.climate_reads += 1;
        self.climate.clone()
    }

    fn read_light(&mut self) -> Result<u16, SensorError> {
        self.light_reads += 1;
        self.light.clone()
    }

    fn read_motion(&mut self) -> Result<bool, SensorError> {
        self.motion_reads += 1;
        self.motion.pop_front().unwrap_or(Ok(false))
    }

    fn read_extras(&mut self) -> Extras {
        self.extras_reads += 1;
        self.extras.clone()
    }
}

/// Actuators that remember every state applied to them.
#[derive(Default)]
pub struct RecordingActuators {
    pub applied: Vec<ActuatorState>,
    pub shutdowns: usize,
    fail: bool,
}

impl RecordingActuators {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl ActuatorPort for RecordingActuators {
    fn apply(&mut self, state: ActuatorState) -> Result<(), ActuatorError> {
        if self.fail {
            return Err(ActuatorError::Output {
                led: Led::Red,
                message: "pin unavailable".to_string(),
            });
        }
        self.applied.push(state);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), ActuatorError> {
        self.shutdowns += 1;
        self.apply(ActuatorState::OFF)
    }
}

/// Collector that records payloads and answers with scripted outcomes,
/// falling back to `201 Created`.
#[derive(Clone, Default)]
pub struct FakeCollector {
    pub sent: Arc<Mutex<Vec<CollectorPayload>>>,
    outcomes: Arc<Mutex<VecDeque<TransmissionOutcome>>>,
}

impl FakeCollector {
    pub fn answering(outcomes: impl IntoIterator<Item = TransmissionOutcome>) -> Self {
        Self {
            sent: Arc::default(),
            outcomes: Arc::new(Mutex::new(outcomes.into_iter().collect())),
        }
    }

    pub fn calls(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl CollectorPort for FakeCollector {
    async fn send(&self, payload: &CollectorPayload) -> TransmissionOutcome {
        self.sent.lock().unwrap().push(payload.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(TransmissionOutcome::Sent { status: 201 })
    }
}
