//! # envmond: envmon acquisition daemon
//!
//! Composition root that wires the adapters together and runs the polling
//! loop until SIGINT/SIGTERM or until the configured cycle limit.
//!
//! ## Responsibilities
//! - Load configuration (`envmon.toml`, env vars) and refuse to start on a
//!   configuration fault
//! - Initialize logging
//! - Pick the sensor board: simulated, or live GPIO with the `hardware`
//!   feature
//! - Build the HTTP collector client
//! - Run the monitor; the LEDs are switched off on the way out
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use std::future::Future;

use envmon_adapter_collector_http::HttpCollector;
use envmon_adapter_simulated::{SimulatedLeds, SimulatedSensors};
use envmon_app::monitor::{Monitor, RunSummary};
use envmon_app::ports::{ActuatorPort, CollectorPort, SensorPort};
use tokio::signal::unix::{SignalKind, signal};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, SensorMode};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    let filter = EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|err| {
        eprintln!("invalid log filter {:?}: {err}", config.logging.filter);
        EnvFilter::new("info")
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        mode = ?config.sensors.mode,
        extended = config.sensors.extended,
        collector = %config.collector.base_url,
        interval_secs = config.polling.interval_secs,
        "envmond starting"
    );

    let collector = HttpCollector::new(&config.collector.base_url, config.collector_timeout())?;
    let shutdown = shutdown_signal()?;

    let summary = match config.sensors.mode {
        SensorMode::Simulated => {
            let sensors = match config.sensors.seed {
                Some(seed) => SimulatedSensors::seeded(seed, config.sensors.extended),
                None => SimulatedSensors::new(config.sensors.extended),
            };
            run(sensors, SimulatedLeds::default(), collector, &config, shutdown).await
        }
        SensorMode::Live => run_live(collector, &config, shutdown).await?,
    };

    tracing::info!(cycles = summary.cycles, sent = summary.sent, "envmond stopped");
    Ok(())
}

#[cfg(feature = "hardware")]
async fn run_live(
    collector: HttpCollector,
    config: &Config,
    shutdown: impl Future<Output = ()>,
) -> Result<RunSummary, Box<dyn std::error::Error>> {
    let pins = config.pins()?;
    let (sensors, leds) = envmon_adapter_gpio::open_board(&pins, config.sensors.extended)?;
    Ok(run(sensors, leds, collector, config, shutdown).await)
}

#[cfg(not(feature = "hardware"))]
#[allow(clippy::unused_async)]
async fn run_live(
    _collector: HttpCollector,
    _config: &Config,
    _shutdown: impl Future<Output = ()>,
) -> Result<RunSummary, Box<dyn std::error::Error>> {
    Err(config::ConfigError::Validation("live mode is not compiled in".to_string()).into())
}

/// Run the monitor to completion. The hardware handles are dropped on
/// return, which releases the pins.
async fn run<S, A, C>(
    sensors: S,
    actuators: A,
    collector: C,
    config: &Config,
    shutdown: impl Future<Output = ()>,
) -> RunSummary
where
    S: SensorPort,
    A: ActuatorPort,
    C: CollectorPort,
{
    let mut monitor = Monitor::new(
        sensors,
        actuators,
        collector,
        config.thresholds.clone(),
        config.payload_options(),
        config.cadence(),
    );
    monitor.run(shutdown).await
}

/// Resolve on the first SIGINT or SIGTERM.
///
/// The handlers are installed before the loop starts so a signal arriving
/// during the first cycle is not lost.
fn shutdown_signal() -> std::io::Result<impl Future<Output = ()>> {
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;
    Ok(async move {
        tokio::select! {
            _ = interrupt.recv() => tracing::info!("received SIGINT"),
            _ = terminate.recv() => tracing::info!("received SIGTERM"),
        }
    })
}
