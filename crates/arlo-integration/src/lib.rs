//! Component setup for the Arlo integration
//!
//! The Rust counterpart of the source component's `async_setup`: translate
//! the configuration into client credentials, keep trying to log in under the
//! connection supervisor, register the session's devices as entities, wire up
//! the services, and hand the caller an [`ArloIntegration`] that owns the
//! whole lot. Nothing is parked in ambient global state; whoever called
//! [`setup`] decides who gets the session.

mod notify;
mod reporter;
mod slug;

pub use notify::{
    Notification, NotificationSink, PersistentNotifications, CONNECT_NOTIFICATION_ID,
    CONNECT_NOTIFICATION_TITLE,
};
pub use reporter::NotifyingReporter;

use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use arlo_client::{ArloConnector, ArloSession};
use arlo_config::ArloConfig;
use arlo_core::EntityId;
use arlo_services::{
    DispatchOptions, EntityRegistry, ServiceDispatcher, ServiceRequest, ServiceResult,
};
use arlo_supervisor::{Cancelled, ConnectionSupervisor, RetryPolicy, ShutdownSignal};

/// Setup did not produce a running integration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SetupError {
    /// Shutdown was requested before a session came up
    #[error("setup cancelled before a session was established")]
    Cancelled,
}

impl From<Cancelled> for SetupError {
    fn from(_: Cancelled) -> Self {
        SetupError::Cancelled
    }
}

/// A fully set-up Arlo component.
///
/// Owns the live session, the entity registry built from it, and the service
/// dispatcher. Dropping it (after [`teardown`](Self::teardown)) releases the
/// session; there is no process-wide registry to clean out.
pub struct ArloIntegration {
    session: Arc<dyn ArloSession>,
    registry: Arc<EntityRegistry>,
    dispatcher: ServiceDispatcher,
    notifications: Arc<PersistentNotifications>,
}

impl ArloIntegration {
    /// Route a raw service call (name plus JSON data)
    pub async fn handle(&self, service: &str, data: serde_json::Value) -> ServiceResult {
        self.dispatcher.call(service, data).await
    }

    /// Route an already-parsed service request
    pub async fn dispatch(&self, request: ServiceRequest) -> ServiceResult {
        self.dispatcher.dispatch(request).await
    }

    pub fn session(&self) -> &Arc<dyn ArloSession> {
        &self.session
    }

    pub fn registry(&self) -> &Arc<EntityRegistry> {
        &self.registry
    }

    pub fn dispatcher(&self) -> &ServiceDispatcher {
        &self.dispatcher
    }

    pub fn notifications(&self) -> &Arc<PersistentNotifications> {
        &self.notifications
    }

    /// Stop the session's backend connection
    pub async fn teardown(&self) {
        self.session.stop().await;
        info!("integration torn down");
    }
}

/// Set up the integration with the default retry policy (15s doubling to a
/// 300s cap)
pub async fn setup<C: ArloConnector>(
    config: &ArloConfig,
    config_dir: &Path,
    connector: &C,
    shutdown: ShutdownSignal,
) -> Result<ArloIntegration, SetupError> {
    setup_with_policy(config, config_dir, connector, shutdown, RetryPolicy::default()).await
}

/// Set up the integration, retrying login under the given policy until it
/// succeeds or `shutdown` is raised
pub async fn setup_with_policy<C: ArloConnector>(
    config: &ArloConfig,
    config_dir: &Path,
    connector: &C,
    shutdown: ShutdownSignal,
    policy: RetryPolicy,
) -> Result<ArloIntegration, SetupError> {
    let credentials = config.credentials(config_dir);

    let notifications = Arc::new(PersistentNotifications::new());
    let reporter = Arc::new(NotifyingReporter::new(notifications.clone()));
    let supervisor = ConnectionSupervisor::new(policy, reporter, shutdown);

    let session: Arc<dyn ArloSession> =
        Arc::new(supervisor.establish(connector, &credentials).await?);

    let registry = Arc::new(EntityRegistry::new());
    for device in session.devices() {
        let object_id = slug::slugify(device.name());
        match EntityId::new(device.kind().entity_domain(), &object_id) {
            Ok(entity_id) => registry.register(entity_id, device),
            Err(err) => warn!(
                device = device.unique_id(),
                error = %err,
                "skipping device with unusable name"
            ),
        }
    }
    info!(
        entities = registry.len(),
        has_sirens = registry.has_sirens(),
        "Arlo session established"
    );

    let dispatcher = ServiceDispatcher::new(
        session.clone(),
        registry.clone(),
        config_dir.to_path_buf(),
        DispatchOptions {
            injection_service: config.injection_service,
        },
    );

    Ok(ArloIntegration {
        session,
        registry,
        dispatcher,
        notifications,
    })
}
