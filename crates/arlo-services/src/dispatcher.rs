//! Service dispatch
//!
//! Handlers are resolved into a map once at construction; a service call is
//! parsed into a [`ServiceRequest`] and routed through that map, never by
//! comparing name strings per call.

use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, info};

use arlo_client::ArloSession;
use arlo_core::Capability;

use crate::{EntityRegistry, ServiceError, ServiceKind, ServiceRequest, ServiceResult};

/// Options fixed at registration time
#[derive(Debug, Clone, Copy, Default)]
pub struct DispatchOptions {
    /// Expose the packet-injection service
    pub injection_service: bool,
}

/// Everything a handler needs, shared across calls
struct DispatchContext {
    session: Arc<dyn ArloSession>,
    registry: Arc<EntityRegistry>,
    /// Base directory injection filenames are resolved against
    config_dir: PathBuf,
}

type HandlerFuture = Pin<Box<dyn Future<Output = ServiceResult> + Send>>;
type Handler = Arc<dyn Fn(Arc<DispatchContext>, ServiceRequest) -> HandlerFuture + Send + Sync>;

fn handler<F, Fut>(f: F) -> Handler
where
    F: Fn(Arc<DispatchContext>, ServiceRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ServiceResult> + Send + 'static,
{
    Arc::new(move |ctx, request| Box::pin(f(ctx, request)))
}

/// Routes parsed service calls to their handlers
pub struct ServiceDispatcher {
    context: Arc<DispatchContext>,
    handlers: HashMap<ServiceKind, Handler>,
    /// Computed once from the device list; siren services are no-ops without
    /// at least one siren-capable device
    has_sirens: bool,
}

impl ServiceDispatcher {
    pub fn new(
        session: Arc<dyn ArloSession>,
        registry: Arc<EntityRegistry>,
        config_dir: PathBuf,
        options: DispatchOptions,
    ) -> Self {
        let has_sirens = registry.has_sirens();

        let mut handlers: HashMap<ServiceKind, Handler> = HashMap::new();
        handlers.insert(ServiceKind::SirenOn, handler(handle_siren_on));
        handlers.insert(ServiceKind::SirensOn, handler(handle_sirens_on));
        handlers.insert(ServiceKind::SirenOff, handler(handle_siren_off));
        handlers.insert(ServiceKind::SirensOff, handler(handle_sirens_off));
        handlers.insert(ServiceKind::RestartDevice, handler(handle_restart_device));
        if options.injection_service {
            handlers.insert(ServiceKind::InjectResponse, handler(handle_inject_response));
        }

        debug!(
            services = handlers.len(),
            has_sirens, "service dispatcher ready"
        );

        Self {
            context: Arc::new(DispatchContext {
                session,
                registry,
                config_dir,
            }),
            handlers,
            has_sirens,
        }
    }

    /// Parse a raw call (name plus JSON data) and dispatch it
    pub async fn call(&self, service: &str, data: serde_json::Value) -> ServiceResult {
        let kind: ServiceKind = service.parse()?;
        let request = ServiceRequest::parse(kind, data)?;
        self.dispatch(request).await
    }

    /// Dispatch an already-parsed request
    pub async fn dispatch(&self, request: ServiceRequest) -> ServiceResult {
        let kind = request.kind();
        info!(service = %kind, "service called");

        if kind.is_siren_service() && !self.has_sirens {
            info!(service = %kind, "no siren-capable devices, ignoring");
            return Ok(());
        }

        let handler = self
            .handlers
            .get(&kind)
            .ok_or(ServiceError::NotRegistered(kind))?
            .clone();
        handler(self.context.clone(), request).await
    }

    /// Which services ended up registered
    pub fn registered(&self) -> Vec<ServiceKind> {
        ServiceKind::ALL
            .into_iter()
            .filter(|kind| self.handlers.contains_key(kind))
            .collect()
    }
}

fn payload_mismatch(kind: ServiceKind) -> ServiceError {
    ServiceError::InvalidData {
        kind,
        reason: "request payload does not match service".to_string(),
    }
}

async fn handle_siren_on(ctx: Arc<DispatchContext>, request: ServiceRequest) -> ServiceResult {
    let ServiceRequest::SirenOn { entity_ids, args } = request else {
        return Err(payload_mismatch(ServiceKind::SirenOn));
    };
    for entity_id in entity_ids {
        match ctx.registry.service_entity(&entity_id) {
            Ok(device) => {
                device.siren_on(args).await?;
                info!(entity_id = %entity_id, volume = args.volume, duration = args.duration.as_secs(), "siren on");
            }
            Err(err) => info!(entity_id = %entity_id, error = %err, "siren device not found"),
        }
    }
    Ok(())
}

async fn handle_sirens_on(ctx: Arc<DispatchContext>, request: ServiceRequest) -> ServiceResult {
    let ServiceRequest::SirensOn { args } = request else {
        return Err(payload_mismatch(ServiceKind::SirensOn));
    };
    for device in ctx.registry.devices_with_capability(Capability::SirenState) {
        device.siren_on(args).await?;
        info!(device = device.unique_id(), volume = args.volume, duration = args.duration.as_secs(), "siren on");
    }
    Ok(())
}

async fn handle_siren_off(ctx: Arc<DispatchContext>, request: ServiceRequest) -> ServiceResult {
    let ServiceRequest::SirenOff { entity_ids } = request else {
        return Err(payload_mismatch(ServiceKind::SirenOff));
    };
    for entity_id in entity_ids {
        match ctx.registry.service_entity(&entity_id) {
            Ok(device) => {
                device.siren_off().await?;
                info!(entity_id = %entity_id, "siren off");
            }
            Err(err) => info!(entity_id = %entity_id, error = %err, "siren device not found"),
        }
    }
    Ok(())
}

async fn handle_sirens_off(ctx: Arc<DispatchContext>, request: ServiceRequest) -> ServiceResult {
    let ServiceRequest::SirensOff = request else {
        return Err(payload_mismatch(ServiceKind::SirensOff));
    };
    for device in ctx.registry.devices_with_capability(Capability::SirenState) {
        device.siren_off().await?;
        info!(device = device.unique_id(), "siren off");
    }
    Ok(())
}

async fn handle_restart_device(ctx: Arc<DispatchContext>, request: ServiceRequest) -> ServiceResult {
    let ServiceRequest::RestartDevice { entity_ids } = request else {
        return Err(payload_mismatch(ServiceKind::RestartDevice));
    };
    for entity_id in entity_ids {
        match ctx.registry.service_entity(&entity_id) {
            Ok(device) => {
                device.restart().await?;
                info!(entity_id = %entity_id, "restarted");
            }
            Err(err) => info!(entity_id = %entity_id, error = %err, "device not found"),
        }
    }
    Ok(())
}

async fn handle_inject_response(ctx: Arc<DispatchContext>, request: ServiceRequest) -> ServiceResult {
    let ServiceRequest::InjectResponse { filename } = request else {
        return Err(payload_mismatch(ServiceKind::InjectResponse));
    };
    let path = ctx.config_dir.join(&filename);
    let raw = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| ServiceError::InjectionFile {
            path: path.clone(),
            source,
        })?;
    let packet: serde_json::Value =
        serde_json::from_str(&raw).map_err(|source| ServiceError::InjectionJson {
            path: path.clone(),
            source,
        })?;
    debug!(path = %path.display(), "injecting packet");
    ctx.session.inject_response(packet).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockDevice, MockSession};
    use arlo_client::DeviceError;
    use arlo_core::DeviceKind;
    use serde_json::json;
    use std::time::Duration;

    struct Fixture {
        session: Arc<MockSession>,
        base: Arc<MockDevice>,
        camera: Arc<MockDevice>,
        dispatcher: ServiceDispatcher,
        _dir: tempfile::TempDir,
    }

    fn fixture(options: DispatchOptions) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let session = Arc::new(MockSession::default());
        let base = MockDevice::new("base-01", "Home Base", DeviceKind::BaseStation, true);
        let camera = MockDevice::new("cam-01", "Front Door", DeviceKind::Camera, true);

        let registry = Arc::new(EntityRegistry::new());
        registry.register("alarm_control_panel.home_base".parse().unwrap(), base.clone());
        registry.register("camera.front_door".parse().unwrap(), camera.clone());

        let dispatcher = ServiceDispatcher::new(
            session.clone(),
            registry,
            dir.path().to_path_buf(),
            options,
        );
        Fixture {
            session,
            base,
            camera,
            dispatcher,
            _dir: dir,
        }
    }

    #[tokio::test]
    async fn test_siren_on_targets_named_entity() {
        let fx = fixture(DispatchOptions::default());
        fx.dispatcher
            .call(
                "siren_on",
                json!({"entity_id": "alarm_control_panel.home_base", "duration": 10, "volume": 4}),
            )
            .await
            .unwrap();

        let calls = fx.base.siren_on_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].volume, 4);
        assert_eq!(calls[0].duration, Duration::from_secs(10));
        assert!(fx.camera.siren_on_calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_entity_is_skipped_not_fatal() {
        let fx = fixture(DispatchOptions::default());
        fx.dispatcher
            .call(
                "siren_on",
                json!({
                    "entity_id": ["camera.garage", "camera.front_door"],
                    "duration": 5,
                    "volume": 8,
                }),
            )
            .await
            .unwrap();

        // The missing entity is logged and skipped, the real one still fires
        assert_eq!(fx.camera.siren_on_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_sirens_on_hits_every_capable_device() {
        let fx = fixture(DispatchOptions::default());
        fx.dispatcher
            .call("sirens_on", json!({"duration": 3, "volume": 2}))
            .await
            .unwrap();

        assert_eq!(fx.base.siren_on_calls().len(), 1);
        assert_eq!(fx.camera.siren_on_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_sirens_off() {
        let fx = fixture(DispatchOptions::default());
        fx.dispatcher.call("sirens_off", json!({})).await.unwrap();
        assert_eq!(fx.base.siren_off_count(), 1);
        assert_eq!(fx.camera.siren_off_count(), 1);
    }

    #[tokio::test]
    async fn test_siren_services_ignored_without_siren_hardware() {
        let dir = tempfile::tempdir().unwrap();
        let session = Arc::new(MockSession::default());
        let camera = MockDevice::new("cam-01", "Front Door", DeviceKind::Camera, false);
        let registry = Arc::new(EntityRegistry::new());
        registry.register("camera.front_door".parse().unwrap(), camera.clone());
        let dispatcher = ServiceDispatcher::new(
            session,
            registry,
            dir.path().to_path_buf(),
            DispatchOptions::default(),
        );

        dispatcher
            .call(
                "siren_on",
                json!({"entity_id": "camera.front_door", "duration": 5, "volume": 1}),
            )
            .await
            .unwrap();
        assert!(camera.siren_on_calls().is_empty());

        // Restart is not siren-gated
        dispatcher
            .call("restart_device", json!({"entity_id": "camera.front_door"}))
            .await
            .unwrap();
        assert_eq!(camera.restart_count(), 1);
    }

    #[tokio::test]
    async fn test_restart_device() {
        let fx = fixture(DispatchOptions::default());
        fx.dispatcher
            .call("restart_device", json!({"entity_id": "camera.front_door"}))
            .await
            .unwrap();
        assert_eq!(fx.camera.restart_count(), 1);
        assert_eq!(fx.base.restart_count(), 0);
    }

    #[tokio::test]
    async fn test_injection_disabled_by_default() {
        let fx = fixture(DispatchOptions::default());
        assert!(!fx
            .dispatcher
            .registered()
            .contains(&ServiceKind::InjectResponse));

        let err = fx
            .dispatcher
            .call("inject_response", json!({"filename": "packet.json"}))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::NotRegistered(ServiceKind::InjectResponse)
        ));
    }

    #[tokio::test]
    async fn test_inject_response_feeds_packet_into_session() {
        let fx = fixture(DispatchOptions {
            injection_service: true,
        });
        let packet = json!({"resource": "cameras/cam-01", "properties": {"motionDetected": true}});
        std::fs::write(
            fx._dir.path().join("packet.json"),
            serde_json::to_string(&packet).unwrap(),
        )
        .unwrap();

        fx.dispatcher
            .call("inject_response", json!({"filename": "packet.json"}))
            .await
            .unwrap();

        assert_eq!(fx.session.injected(), vec![packet]);
    }

    #[tokio::test]
    async fn test_inject_response_file_errors() {
        let fx = fixture(DispatchOptions {
            injection_service: true,
        });

        let err = fx
            .dispatcher
            .call("inject_response", json!({"filename": "missing.json"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InjectionFile { .. }));

        std::fs::write(fx._dir.path().join("bad.json"), "not json").unwrap();
        let err = fx
            .dispatcher
            .call("inject_response", json!({"filename": "bad.json"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InjectionJson { .. }));
    }

    #[tokio::test]
    async fn test_unknown_service_name() {
        let fx = fixture(DispatchOptions::default());
        let err = fx.dispatcher.call("turn_on", json!({})).await.unwrap_err();
        assert!(matches!(err, ServiceError::UnknownService(_)));
    }

    #[tokio::test]
    async fn test_device_rejection_propagates() {
        let fx = fixture(DispatchOptions::default());
        fx.base.fail_next(DeviceError::Rejected {
            device: "base-01".into(),
            reason: "busy".into(),
        });

        let err = fx
            .dispatcher
            .call(
                "siren_on",
                json!({"entity_id": "alarm_control_panel.home_base", "duration": 5, "volume": 1}),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Device(_)));
    }
}
