//! End-to-end tests: simulated board, real HTTP client, mock collector.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use envmon_adapter_collector_http::HttpCollector;
use envmon_adapter_simulated::{SimulatedLeds, SimulatedSensors};
use envmon_app::monitor::{Cadence, Monitor};
use envmon_domain::actuator::ActuatorState;
use envmon_domain::payload::PayloadOptions;
use envmon_domain::thresholds::Thresholds;
use tokio::process::Command;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENV_OVERRIDES: [&str; 5] = [
    "ENVMON_COLLECTOR_URL",
    "ENVMON_INTERVAL_SECS",
    "ENVMON_MODE",
    "ENVMON_LOG",
    "RUST_LOG",
];

async fn collector_accepting(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/data"))
        .respond_with(ResponseTemplate::new(status).set_body_json(serde_json::json!({
            "status": "success",
            "message": "Data received successfully"
        })))
        .mount(&server)
        .await;
    server
}

fn write_config(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("envmond-{}-{name}.toml", std::process::id()));
    std::fs::write(&path, content).unwrap();
    path
}

async fn run_daemon(config: &Path) -> std::process::Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_envmond"));
    command
        .env("ENVMON_CONFIG", config)
        .stdin(Stdio::null())
        .kill_on_drop(true);
    for key in ENV_OVERRIDES {
        command.env_remove(key);
    }
    tokio::time::timeout(Duration::from_secs(30), command.output())
        .await
        .expect("envmond did not exit in time")
        .unwrap()
}

#[tokio::test]
async fn should_post_every_simulated_cycle_to_the_collector() {
    let server = collector_accepting(201).await;
    let collector = HttpCollector::new(&server.uri(), Duration::from_secs(2)).unwrap();
    let cadence = Cadence {
        max_cycles: Some(3),
        ..Cadence::fixed(Duration::from_millis(10))
    };
    let mut monitor = Monitor::new(
        SimulatedSensors::seeded(7, false),
        SimulatedLeds::default(),
        collector,
        Thresholds::default(),
        PayloadOptions::default(),
        cadence,
    );

    let summary = monitor.run(std::future::pending()).await;

    assert_eq!(summary.cycles, 3);
    assert_eq!(summary.sent, 3);
    assert_eq!(monitor.actuators().state(), ActuatorState::OFF);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    for key in [
        "temperature",
        "humidity",
        "light_level",
        "ldr",
        "motion_detected",
        "motion_count",
        "led_red",
        "led_blue",
        "led_yellow",
        "led_white",
        "dht_ok",
        "ldr_ok",
        "pir_ok",
    ] {
        assert!(body.get(key).is_some(), "missing key {key}");
    }
    assert!(body.get("gas_level").is_none());
}

#[tokio::test]
async fn should_send_extended_keys_when_extended_board_is_simulated() {
    let server = collector_accepting(201).await;
    let collector = HttpCollector::new(&server.uri(), Duration::from_secs(2)).unwrap();
    let options = PayloadOptions {
        include_diagnostics: false,
        extended: true,
    };
    let cadence = Cadence {
        max_cycles: Some(1),
        ..Cadence::fixed(Duration::from_millis(10))
    };
    let mut monitor = Monitor::new(
        SimulatedSensors::seeded(9, true),
        SimulatedLeds::default(),
        collector,
        Thresholds::default(),
        options,
        cadence,
    );

    monitor.run(std::future::pending()).await;

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["gas_level"], body["mq135"]);
    assert_eq!(body["gas_level"], body["air_quality"]);
    assert_eq!(body["sound_level"], body["mic"]);
    assert!(body["distance"].is_number());
    assert!(body.get("dht_ok").is_none());
}

#[tokio::test]
async fn should_count_rejections_without_stopping() {
    let server = collector_accepting(400).await;
    let collector = HttpCollector::new(&server.uri(), Duration::from_secs(2)).unwrap();
    let cadence = Cadence {
        max_cycles: Some(2),
        ..Cadence::fixed(Duration::from_millis(10))
    };
    let mut monitor = Monitor::new(
        SimulatedSensors::seeded(1, false),
        SimulatedLeds::default(),
        collector,
        Thresholds::default(),
        PayloadOptions::default(),
        cadence,
    );

    let summary = monitor.run(std::future::pending()).await;

    assert_eq!(summary.cycles, 2);
    assert_eq!(summary.rejected, 2);
    assert_eq!(summary.sent, 0);
}

#[tokio::test]
async fn should_run_daemon_for_configured_cycles() {
    let server = collector_accepting(201).await;
    let config = write_config(
        "cycles",
        &format!(
            "
            [collector]
            base_url = '{}'
            timeout_secs = 2

            [polling]
            interval_secs = 1
            max_backoff_secs = 1
            max_cycles = 2

            [sensors]
            mode = 'simulated'
            seed = 7

            [logging]
            filter = 'envmond=debug,envmon=debug'
            ",
            server.uri()
        ),
    );

    let output = run_daemon(&config).await;
    std::fs::remove_file(&config).ok();

    assert!(
        output.status.success(),
        "envmond failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn should_refuse_to_start_with_invalid_thresholds() {
    let server = collector_accepting(201).await;
    let config = write_config(
        "thresholds",
        &format!(
            "
            [collector]
            base_url = '{}'

            [thresholds]
            humidity_min = 60.0
            humidity_max = 40.0
            ",
            server.uri()
        ),
    );

    let output = run_daemon(&config).await;
    std::fs::remove_file(&config).ok();

    assert!(!output.status.success());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[cfg(not(feature = "hardware"))]
#[tokio::test]
async fn should_refuse_live_mode_without_hardware_support() {
    let config = write_config("live", "[sensors]\nmode = 'live'\n");

    let output = run_daemon(&config).await;
    std::fs::remove_file(&config).ok();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("hardware"));
}
