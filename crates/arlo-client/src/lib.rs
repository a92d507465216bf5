//! Trait seam over the Arlo cloud client
//!
//! The actual vendor client (session management, device enumeration, media
//! handling) lives outside this workspace. This crate defines the surface the
//! rest of the integration programs against: a [`Credentials`] bundle, an
//! [`ArloConnector`] that performs a single login attempt, the [`ArloSession`]
//! it yields, and the [`ArloDevice`]s a session exposes.

mod credentials;
mod error;

pub use credentials::{
    BackendOptions, Credentials, CredentialsBuilder, DoorbellDebounce, Endpoints, MediaOptions,
    RefreshCadence, SnapshotOptions, TfaSettings, Timeouts,
};
pub use error::{ConnectError, DeviceError};

use arlo_core::{Capability, DeviceKind};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Default Arlo API endpoint
pub const DEFAULT_HOST: &str = "https://my.arlo.com";
/// Default Arlo authentication endpoint
pub const DEFAULT_AUTH_HOST: &str = "https://ocapi-app.arlo.com";

/// Arguments for turning a device siren on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SirenArgs {
    /// How long to sound the siren
    pub duration: Duration,
    /// Volume level, 1..=8 on real hardware
    pub volume: u32,
}

/// Performs one login attempt against the Arlo cloud.
///
/// A connector never retries on its own; the connection supervisor owns the
/// retry policy.
#[async_trait]
pub trait ArloConnector: Send + Sync {
    type Session: ArloSession;

    async fn connect(&self, credentials: &Credentials) -> Result<Self::Session, ConnectError>;
}

/// A handle to an authenticated Arlo cloud session.
///
/// `connect` returning a session does not guarantee the event backend came
/// up; callers must check [`ArloSession::is_live`] before treating the
/// session as usable.
#[async_trait]
pub trait ArloSession: Send + Sync + 'static {
    /// Whether the session represents an actually-connected state
    fn is_live(&self) -> bool;

    /// Last error reported by the backend, if any
    fn last_error(&self) -> Option<String>;

    /// Every device known to the session (cameras, base stations, doorbells)
    fn devices(&self) -> Vec<Arc<dyn ArloDevice>>;

    /// Feed a canned backend packet into the event stream (test/debug aid)
    async fn inject_response(&self, packet: serde_json::Value) -> Result<(), DeviceError>;

    /// Tear down the session and its event backend
    async fn stop(&self);
}

/// A single Arlo device reachable through a session
#[async_trait]
pub trait ArloDevice: Send + Sync + 'static {
    /// Stable device identifier (serial number or backend unique id)
    fn unique_id(&self) -> &str;

    /// User-visible device name
    fn name(&self) -> &str;

    /// What kind of hardware this is
    fn kind(&self) -> DeviceKind;

    /// Whether the device advertises a capability
    fn has_capability(&self, capability: Capability) -> bool;

    async fn siren_on(&self, args: SirenArgs) -> Result<(), DeviceError>;

    async fn siren_off(&self) -> Result<(), DeviceError>;

    async fn restart(&self) -> Result<(), DeviceError>;
}
