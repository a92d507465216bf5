//! Mock devices and sessions for tests
//!
//! Shared by this crate's unit tests and the integration crate's tests
//! (enable the `test-support` feature).

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use arlo_client::{ArloDevice, ArloSession, DeviceError, SirenArgs};
use arlo_core::{Capability, DeviceKind};

/// Scripted device that records every command it receives
pub struct MockDevice {
    unique_id: String,
    name: String,
    kind: DeviceKind,
    has_siren: bool,
    siren_on_calls: Mutex<Vec<SirenArgs>>,
    siren_off_count: AtomicU32,
    restart_count: AtomicU32,
    next_failure: Mutex<Option<DeviceError>>,
}

impl MockDevice {
    pub fn new(
        unique_id: impl Into<String>,
        name: impl Into<String>,
        kind: DeviceKind,
        has_siren: bool,
    ) -> Arc<Self> {
        Arc::new(Self {
            unique_id: unique_id.into(),
            name: name.into(),
            kind,
            has_siren,
            siren_on_calls: Mutex::new(Vec::new()),
            siren_off_count: AtomicU32::new(0),
            restart_count: AtomicU32::new(0),
            next_failure: Mutex::new(None),
        })
    }

    /// Make the next command fail with the given error
    pub fn fail_next(&self, error: DeviceError) {
        *self.next_failure.lock().unwrap() = Some(error);
    }

    pub fn siren_on_calls(&self) -> Vec<SirenArgs> {
        self.siren_on_calls.lock().unwrap().clone()
    }

    pub fn siren_off_count(&self) -> u32 {
        self.siren_off_count.load(Ordering::SeqCst)
    }

    pub fn restart_count(&self) -> u32 {
        self.restart_count.load(Ordering::SeqCst)
    }

    fn take_failure(&self) -> Result<(), DeviceError> {
        match self.next_failure.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ArloDevice for MockDevice {
    fn unique_id(&self) -> &str {
        &self.unique_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> DeviceKind {
        self.kind
    }

    fn has_capability(&self, capability: Capability) -> bool {
        capability == Capability::SirenState && self.has_siren
    }

    async fn siren_on(&self, args: SirenArgs) -> Result<(), DeviceError> {
        self.take_failure()?;
        self.siren_on_calls.lock().unwrap().push(args);
        Ok(())
    }

    async fn siren_off(&self) -> Result<(), DeviceError> {
        self.take_failure()?;
        self.siren_off_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn restart(&self) -> Result<(), DeviceError> {
        self.take_failure()?;
        self.restart_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Session stub that records injected packets
#[derive(Default)]
pub struct MockSession {
    devices: Mutex<Vec<Arc<dyn ArloDevice>>>,
    injected: Mutex<Vec<serde_json::Value>>,
    stopped: AtomicU32,
}

impl MockSession {
    pub fn with_devices(devices: Vec<Arc<dyn ArloDevice>>) -> Arc<Self> {
        Arc::new(Self {
            devices: Mutex::new(devices),
            ..Self::default()
        })
    }

    pub fn injected(&self) -> Vec<serde_json::Value> {
        self.injected.lock().unwrap().clone()
    }

    pub fn stop_count(&self) -> u32 {
        self.stopped.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArloSession for MockSession {
    fn is_live(&self) -> bool {
        true
    }

    fn last_error(&self) -> Option<String> {
        None
    }

    fn devices(&self) -> Vec<Arc<dyn ArloDevice>> {
        self.devices.lock().unwrap().clone()
    }

    async fn inject_response(&self, packet: serde_json::Value) -> Result<(), DeviceError> {
        self.injected.lock().unwrap().push(packet);
        Ok(())
    }

    async fn stop(&self) {
        self.stopped.fetch_add(1, Ordering::SeqCst);
    }
}
