//! End-to-end setup tests: supervised login, entity registration, services

use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use arlo_client::{ArloConnector, ArloDevice, ArloSession, ConnectError, Credentials, DeviceError};
use arlo_config::ArloConfig;
use arlo_core::DeviceKind;
use arlo_integration::{setup, setup_with_policy, SetupError, CONNECT_NOTIFICATION_ID};
use arlo_services::test_support::{MockDevice, MockSession};
use arlo_services::{ServiceError, ServiceKind};
use arlo_supervisor::{shutdown_channel, RetryPolicy};

/// Hands out the same underlying mock session once the scripted failures run
/// out, so the test can inspect it afterwards.
struct SharedSession(Arc<MockSession>);

#[async_trait]
impl ArloSession for SharedSession {
    fn is_live(&self) -> bool {
        self.0.is_live()
    }

    fn last_error(&self) -> Option<String> {
        self.0.last_error()
    }

    fn devices(&self) -> Vec<Arc<dyn ArloDevice>> {
        self.0.devices()
    }

    async fn inject_response(&self, packet: serde_json::Value) -> Result<(), DeviceError> {
        self.0.inject_response(packet).await
    }

    async fn stop(&self) {
        self.0.stop().await
    }
}

struct ScriptedConnector {
    failures_left: AtomicU32,
    calls: AtomicU32,
    session: Arc<MockSession>,
}

impl ScriptedConnector {
    fn new(failures: u32, session: Arc<MockSession>) -> Self {
        Self {
            failures_left: AtomicU32::new(failures),
            calls: AtomicU32::new(0),
            session,
        }
    }
}

#[async_trait]
impl ArloConnector for ScriptedConnector {
    type Session = SharedSession;

    async fn connect(&self, _credentials: &Credentials) -> Result<SharedSession, ConnectError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let left = self.failures_left.load(Ordering::SeqCst);
        if left > 0 {
            self.failures_left.store(left - 1, Ordering::SeqCst);
            return Err(ConnectError::Timeout("connect".into()));
        }
        Ok(SharedSession(self.session.clone()))
    }
}

fn config(extra: &str) -> ArloConfig {
    let yaml = format!("username: user@example.com\npassword: hunter2\n{extra}");
    ArloConfig::from_yaml_str(&yaml).unwrap()
}

fn mock_session() -> Arc<MockSession> {
    let base = MockDevice::new("base-01", "Home Base", DeviceKind::BaseStation, true);
    let camera = MockDevice::new("cam-01", "Front Door", DeviceKind::Camera, false);
    MockSession::with_devices(vec![base, camera])
}

#[tokio::test(start_paused = true)]
async fn setup_survives_failed_attempts_and_registers_entities() {
    let session = mock_session();
    let connector = ScriptedConnector::new(2, session.clone());
    let (_handle, signal) = shutdown_channel();
    let dir = tempfile::tempdir().unwrap();

    let integration = setup_with_policy(
        &config(""),
        dir.path(),
        &connector,
        signal,
        RetryPolicy::new(Duration::from_secs(1), Duration::from_secs(4)),
    )
        .await
        .unwrap();

    assert_eq!(connector.calls.load(Ordering::SeqCst), 3);

    let registry = integration.registry();
    assert_eq!(registry.len(), 2);
    assert!(registry
        .get(&"alarm_control_panel.home_base".parse().unwrap())
        .is_some());
    assert!(registry.get(&"camera.front_door".parse().unwrap()).is_some());

    // Two failures, one notification
    let notifications = integration.notifications();
    assert_eq!(notifications.len(), 1);
    assert!(notifications.get(CONNECT_NOTIFICATION_ID).is_some());
}

#[tokio::test]
async fn setup_without_failures_raises_no_notification() {
    let session = mock_session();
    let connector = ScriptedConnector::new(0, session);
    let (_handle, signal) = shutdown_channel();
    let dir = tempfile::tempdir().unwrap();

    let integration = setup(&config(""), dir.path(), &connector, signal)
        .await
        .unwrap();

    assert!(integration.notifications().is_empty());
}

#[tokio::test]
async fn setup_honors_shutdown() {
    let session = mock_session();
    let connector = ScriptedConnector::new(u32::MAX, session);
    let (handle, signal) = shutdown_channel();
    handle.shutdown();
    let dir = tempfile::tempdir().unwrap();

    let result = setup(&config(""), dir.path(), &connector, signal).await;
    assert!(matches!(result, Err(SetupError::Cancelled)));
    assert_eq!(connector.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn siren_service_reaches_device() {
    let base = MockDevice::new("base-01", "Home Base", DeviceKind::BaseStation, true);
    let session = MockSession::with_devices(vec![base.clone()]);
    let connector = ScriptedConnector::new(0, session);
    let (_handle, signal) = shutdown_channel();
    let dir = tempfile::tempdir().unwrap();

    let integration = setup(&config(""), dir.path(), &connector, signal)
        .await
        .unwrap();

    integration
        .handle(
            "siren_on",
            json!({"entity_id": "alarm_control_panel.home_base", "duration": 10, "volume": 4}),
        )
        .await
        .unwrap();
    assert_eq!(base.siren_on_calls().len(), 1);

    integration
        .handle("sirens_off", json!({}))
        .await
        .unwrap();
    assert_eq!(base.siren_off_count(), 1);
}

#[tokio::test]
async fn injection_service_is_config_gated() {
    let dir = tempfile::tempdir().unwrap();

    // Disabled by default
    let session = mock_session();
    let connector = ScriptedConnector::new(0, session);
    let (_handle, signal) = shutdown_channel();
    let integration = setup(&config(""), dir.path(), &connector, signal)
        .await
        .unwrap();
    assert!(!integration
        .dispatcher()
        .registered()
        .contains(&ServiceKind::InjectResponse));

    // Enabled via config
    let session = mock_session();
    let connector = ScriptedConnector::new(0, session.clone());
    let (_handle, signal) = shutdown_channel();
    let integration = setup(
        &config("injection_service: true\n"),
        dir.path(),
        &connector,
        signal,
    )
        .await
        .unwrap();

    let packet = json!({"resource": "cameras/cam-01", "properties": {"motionDetected": true}});
    std::fs::write(
        dir.path().join("packet.json"),
        serde_json::to_string(&packet).unwrap(),
    )
    .unwrap();

    integration
        .handle("inject_response", json!({"filename": "packet.json"}))
        .await
        .unwrap();
    assert_eq!(session.injected(), vec![packet]);
}

#[tokio::test]
async fn unknown_service_is_rejected() {
    let session = mock_session();
    let connector = ScriptedConnector::new(0, session);
    let (_handle, signal) = shutdown_channel();
    let dir = tempfile::tempdir().unwrap();

    let integration = setup(&config(""), dir.path(), &connector, signal)
        .await
        .unwrap();

    let err = integration.handle("turn_on", json!({})).await.unwrap_err();
    assert!(matches!(err, ServiceError::UnknownService(_)));
}

#[tokio::test]
async fn teardown_stops_session() {
    let session = mock_session();
    let connector = ScriptedConnector::new(0, session.clone());
    let (_handle, signal) = shutdown_channel();
    let dir = tempfile::tempdir().unwrap();

    let integration = setup(&config(""), dir.path(), &connector, signal)
        .await
        .unwrap();

    integration.teardown().await;
    assert_eq!(session.stop_count(), 1);
}
